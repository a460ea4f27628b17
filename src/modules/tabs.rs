// Tab building, renaming and reordering - pure logic.
// The organizer turns these results into store updates.

use std::collections::HashMap;

use uuid::Uuid;

use crate::modules::naming::{name_or_default, strip_numeric_suffix, unique_name};
use crate::modules::tree::{effective_parent, next_order, sibling_tab_names};
use crate::state::{ConnectionQueries, ItemRef, QueryTab, QueryTabPatch, QueryType, TabDraft};

/// Which tabs "close others" removes, relative to the chosen tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDirection {
    All,
    Before,
    After,
}

/// Enabled state of the per-tab context menu entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabMenu {
    pub can_close: bool,
    pub can_close_others: bool,
    pub can_close_before: bool,
    pub can_close_after: bool,
    pub can_reveal: bool,
    /// Close button on the tab itself, from the quick-close preference.
    pub can_quick_close: bool,
}

/// New order key for a single item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderUpdate {
    pub item: ItemRef,
    pub order: i64,
}

/// Allocates a tab from a draft.
///
/// A missing or blank name becomes `default_name` made unique across all
/// tabs of the connection; an explicit name is made unique among its
/// sibling tabs. The tab is appended after everything in its folder.
pub fn build_tab(conn: &ConnectionQueries, draft: TabDraft, default_name: &str) -> QueryTab {
    let parent = effective_parent(&conn.query_folders, draft.folder_id.as_deref());

    let name = match draft.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            unique_name(name, &sibling_tab_names(conn, parent, None))
        }
        _ => {
            let existing: Vec<&str> = conn.queries.iter().map(QueryTab::display_name).collect();
            unique_name(default_name, &existing)
        }
    };

    QueryTab {
        id: Uuid::new_v4().to_string(),
        query_type: draft.query_type,
        name: Some(name),
        query: draft.query,
        variables: draft.variables,
        order: next_order(conn, parent),
        folder_id: draft.folder_id,
    }
}

/// Patch renaming `id`, or `None` when the tab no longer exists.
pub fn rename_patch(
    conn: &ConnectionQueries,
    id: &str,
    new_name: &str,
    default_name: &str,
) -> Option<QueryTabPatch> {
    let tab = conn.tab(id)?;
    let parent = effective_parent(&conn.query_folders, tab.folder_id.as_deref());
    let existing = sibling_tab_names(conn, parent, Some(id));
    let name = unique_name(name_or_default(Some(new_name), default_name), &existing);

    Some(QueryTabPatch {
        id: id.to_string(),
        name: Some(name),
        ..Default::default()
    })
}

/// Draft for a copy of `tab` next to the original.
pub fn duplicate_draft(tab: &QueryTab) -> TabDraft {
    TabDraft {
        query_type: QueryType::Config,
        name: tab.name.as_deref().map(|n| strip_numeric_suffix(n).to_string()),
        query: tab.query.clone(),
        variables: tab.variables.clone(),
        folder_id: tab.folder_id.clone(),
    }
}

/// Ids in `listed` that "close others" removes for `id`.
pub fn tabs_to_close(listed: &[QueryTab], id: &str, direction: CloseDirection) -> Vec<String> {
    let Some(index) = listed.iter().position(|q| q.id == id) else {
        return Vec::new();
    };

    listed
        .iter()
        .enumerate()
        .filter(|(i, q)| {
            q.id != id
                && match direction {
                    CloseDirection::All => true,
                    CloseDirection::Before => *i < index,
                    CloseDirection::After => *i > index,
                }
        })
        .map(|(_, q)| q.id.clone())
        .collect()
}

/// Context menu state for `tab` within the listed queries of its folder.
pub fn tab_menu(listed: &[QueryTab], tab: &QueryTab, quick_close: bool) -> TabMenu {
    let single = listed.len() <= 1;
    let index = listed.iter().position(|q| q.id == tab.id);

    TabMenu {
        can_close: !single,
        can_close_others: !single,
        can_close_before: !single && index.is_some_and(|i| i > 0),
        can_close_after: !single && index.is_some_and(|i| i + 1 < listed.len()),
        can_reveal: tab.query_type == QueryType::File,
        can_quick_close: quick_close,
    }
}

/// Pure logic for reordering a folder context.
///
/// Each item in `new_order` gets its index as order key. Returns only the
/// updates that change something; unknown ids and items missing from
/// `new_order` are left alone.
pub fn reorder_logic(conn: &ConnectionQueries, new_order: &[ItemRef]) -> Vec<OrderUpdate> {
    let current: HashMap<ItemRef, i64> = conn
        .queries
        .iter()
        .map(|q| (ItemRef::Tab(q.id.clone()), q.order))
        .chain(
            conn.query_folders
                .iter()
                .map(|f| (ItemRef::Folder(f.id.clone()), f.order)),
        )
        .collect();

    new_order
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let order = index as i64;
            match current.get(item) {
                Some(existing) if *existing != order => Some(OrderUpdate {
                    item: item.clone(),
                    order,
                }),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QueryFolder;
    use rstest::rstest;

    fn create_test_tab(id: &str, name: &str, folder: Option<&str>, order: i64) -> QueryTab {
        QueryTab {
            id: id.to_string(),
            query_type: QueryType::Config,
            name: Some(name.to_string()),
            query: format!("SELECT * FROM {}", id),
            variables: "{}".to_string(),
            folder_id: folder.map(str::to_string),
            order,
        }
    }

    fn create_test_folder(id: &str, parent: Option<&str>, order: i64) -> QueryFolder {
        QueryFolder {
            id: id.to_string(),
            name: format!("Folder {}", id),
            parent_id: parent.map(str::to_string),
            order,
        }
    }

    #[test]
    fn test_build_tab_default_name() {
        let conn = ConnectionQueries {
            queries: vec![create_test_tab("t1", "New query", None, 0)],
            ..Default::default()
        };

        let tab = build_tab(&conn, TabDraft::default(), "New query");
        assert_eq!(tab.name.as_deref(), Some("New query (1)"));
        assert_eq!(tab.order, 1);
        assert_ne!(tab.id, "t1");
    }

    #[test]
    fn test_build_tab_default_name_unique_across_folders() {
        let conn = ConnectionQueries {
            queries: vec![create_test_tab("t1", "New query", Some("f1"), 0)],
            query_folders: vec![create_test_folder("f1", None, 0)],
            ..Default::default()
        };

        let tab = build_tab(&conn, TabDraft::default(), "New query");
        assert_eq!(tab.name.as_deref(), Some("New query (1)"));
        // Root holds only f1 at order 0.
        assert_eq!(tab.order, 1);
    }

    #[test]
    fn test_build_tab_same_name_in_same_folder() {
        let mut conn = ConnectionQueries {
            query_folders: vec![create_test_folder("f1", None, 0)],
            ..Default::default()
        };
        let draft = TabDraft {
            name: Some("Query".to_string()),
            folder_id: Some("f1".to_string()),
            ..Default::default()
        };

        let first = build_tab(&conn, draft.clone(), "New query");
        conn.queries.push(first.clone());
        let second = build_tab(&conn, draft, "New query");

        assert_eq!(first.name.as_deref(), Some("Query"));
        assert_eq!(second.name.as_deref(), Some("Query (1)"));
        assert_eq!(first.order, 0);
        assert_eq!(second.order, 1);
    }

    #[test]
    fn test_explicit_name_only_checked_against_siblings() {
        let conn = ConnectionQueries {
            queries: vec![create_test_tab("t1", "Query", Some("f1"), 0)],
            query_folders: vec![create_test_folder("f1", None, 0)],
            ..Default::default()
        };
        let draft = TabDraft {
            name: Some("Query".to_string()),
            ..Default::default()
        };

        let tab = build_tab(&conn, draft, "New query");
        assert_eq!(tab.name.as_deref(), Some("Query"));
    }

    #[rstest]
    #[case("", "New query")]
    #[case("Second", "Second (1)")]
    #[case("First", "First")]
    #[case("Fresh", "Fresh")]
    fn test_rename_patch(#[case] input: &str, #[case] expected: &str) {
        let conn = ConnectionQueries {
            queries: vec![
                create_test_tab("t1", "First", None, 0),
                create_test_tab("t2", "Second", None, 1),
            ],
            ..Default::default()
        };

        let patch = rename_patch(&conn, "t1", input, "New query").unwrap();
        assert_eq!(patch.name.as_deref(), Some(expected));
    }

    #[test]
    fn test_rename_missing_tab() {
        let conn = ConnectionQueries::default();
        assert!(rename_patch(&conn, "t1", "Name", "New query").is_none());
    }

    #[test]
    fn test_duplicate_draft_strips_counter() {
        let mut tab = create_test_tab("t1", "Report (2)", Some("f1"), 3);
        tab.query_type = QueryType::File;

        let draft = duplicate_draft(&tab);
        assert_eq!(draft.name.as_deref(), Some("Report"));
        assert_eq!(draft.query_type, QueryType::Config);
        assert_eq!(draft.query, tab.query);
        assert_eq!(draft.folder_id.as_deref(), Some("f1"));
    }

    #[rstest]
    #[case(CloseDirection::All, vec!["a", "b", "d"])]
    #[case(CloseDirection::Before, vec!["a", "b"])]
    #[case(CloseDirection::After, vec!["d"])]
    fn test_tabs_to_close(#[case] direction: CloseDirection, #[case] expected: Vec<&str>) {
        let listed: Vec<QueryTab> = ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, id)| create_test_tab(id, id, None, i as i64))
            .collect();

        assert_eq!(tabs_to_close(&listed, "c", direction), expected);
    }

    #[test]
    fn test_tabs_to_close_unknown_id() {
        let listed = vec![create_test_tab("a", "a", None, 0)];
        assert!(tabs_to_close(&listed, "zzz", CloseDirection::All).is_empty());
    }

    #[test]
    fn test_tab_menu() {
        let listed = vec![
            create_test_tab("a", "a", None, 0),
            create_test_tab("b", "b", None, 1),
        ];

        let first = tab_menu(&listed, &listed[0], true);
        assert!(first.can_close);
        assert!(!first.can_close_before);
        assert!(first.can_close_after);
        assert!(!first.can_reveal);
        assert!(first.can_quick_close);

        let last = tab_menu(&listed, &listed[1], false);
        assert!(last.can_close_before);
        assert!(!last.can_close_after);
        assert!(!last.can_quick_close);

        let only = tab_menu(&listed[..1], &listed[0], true);
        assert!(!only.can_close);
        assert!(!only.can_close_others);
    }

    #[test]
    fn test_reorder_logic() {
        let conn = ConnectionQueries {
            queries: vec![
                create_test_tab("t1", "t1", Some("f0"), 0),
                create_test_tab("t2", "t2", Some("f0"), 1),
            ],
            query_folders: vec![
                create_test_folder("f0", None, 0),
                create_test_folder("f1", Some("f0"), 2),
            ],
            ..Default::default()
        };

        let new_order = vec![
            ItemRef::Folder("f1".to_string()),
            ItemRef::Tab("t2".to_string()),
            ItemRef::Tab("t1".to_string()),
        ];
        let updates = reorder_logic(&conn, &new_order);

        assert_eq!(
            updates,
            vec![
                OrderUpdate { item: ItemRef::Folder("f1".to_string()), order: 0 },
                OrderUpdate { item: ItemRef::Tab("t1".to_string()), order: 2 },
            ]
        );
    }

    #[test]
    fn test_no_change() {
        let conn = ConnectionQueries {
            queries: vec![
                create_test_tab("t1", "t1", None, 0),
                create_test_tab("t2", "t2", None, 1),
            ],
            ..Default::default()
        };

        let new_order = vec![ItemRef::Tab("t1".to_string()), ItemRef::Tab("t2".to_string())];
        assert!(reorder_logic(&conn, &new_order).is_empty());
    }

    #[test]
    fn test_reorder_skips_unknown_ids() {
        let conn = ConnectionQueries {
            queries: vec![create_test_tab("t1", "t1", None, 5)],
            ..Default::default()
        };

        let new_order = vec![ItemRef::Tab("ghost".to_string()), ItemRef::Tab("t1".to_string())];
        assert_eq!(
            reorder_logic(&conn, &new_order),
            vec![OrderUpdate { item: ItemRef::Tab("t1".to_string()), order: 1 }]
        );
    }

    #[test]
    fn test_empty_new_order() {
        let conn = ConnectionQueries {
            queries: vec![create_test_tab("t1", "t1", None, 0)],
            ..Default::default()
        };
        assert!(reorder_logic(&conn, &[]).is_empty());
    }
}
