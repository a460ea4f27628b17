// View computation for the tabs pane.
// Pure function of (queries, folders, path); recomputed after every mutation.

use crate::modules::navigation::{
    breadcrumb_path, truncate_breadcrumbs, Breadcrumb, BreadcrumbTrail,
};
use crate::modules::tree::effective_parent;
use crate::state::{ConnectionQueries, OrganizerItem, QueryFolder, QueryTab};

pub const EMPTY_FOLDER_MESSAGE: &str = "This folder is empty";
pub const EMPTY_ROOT_MESSAGE: &str = "No queries or folders";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryView {
    /// `None` when viewing root.
    pub current_folder_id: Option<String>,
    pub current_queries: Vec<QueryTab>,
    pub current_folders: Vec<QueryFolder>,
    /// Folders and queries interleaved by shared order key.
    pub sortable_items: Vec<OrganizerItem>,
    pub breadcrumb_path: Vec<Breadcrumb>,
    pub breadcrumbs: BreadcrumbTrail,
}

impl QueryView {
    /// Count shown on the pane badge; folders are not counted.
    pub fn query_count(&self) -> usize {
        self.current_queries.len()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.sortable_items.is_empty() {
            None
        } else if self.current_folder_id.is_some() {
            Some(EMPTY_FOLDER_MESSAGE)
        } else {
            Some(EMPTY_ROOT_MESSAGE)
        }
    }
}

pub fn compute_view(
    queries: &[QueryTab],
    folders: &[QueryFolder],
    current_folder_path: &[String],
) -> QueryView {
    let current_folder_id = current_folder_path.last().map(String::as_str);

    let mut current_queries: Vec<QueryTab> = queries
        .iter()
        .filter(|q| effective_parent(folders, q.folder_id.as_deref()) == current_folder_id)
        .cloned()
        .collect();
    current_queries.sort_by_key(|q| q.order);

    let mut current_folders: Vec<QueryFolder> = folders
        .iter()
        .filter(|f| effective_parent(folders, f.parent_id.as_deref()) == current_folder_id)
        .cloned()
        .collect();
    current_folders.sort_by_key(|f| f.order);

    // Stable sort: on equal keys folders stay ahead of queries.
    let mut sortable_items: Vec<OrganizerItem> = current_folders
        .iter()
        .cloned()
        .map(OrganizerItem::Folder)
        .chain(current_queries.iter().cloned().map(OrganizerItem::Tab))
        .collect();
    sortable_items.sort_by_key(OrganizerItem::order);

    let crumbs = breadcrumb_path(current_folder_path, folders);
    let breadcrumbs = truncate_breadcrumbs(&crumbs);

    QueryView {
        current_folder_id: current_folder_id.map(str::to_string),
        current_queries,
        current_folders,
        sortable_items,
        breadcrumb_path: crumbs,
        breadcrumbs,
    }
}

impl ConnectionQueries {
    pub fn view(&self) -> QueryView {
        compute_view(&self.queries, &self.query_folders, &self.current_folder_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemRef, QueryType};

    fn tab(id: &str, folder: Option<&str>, order: i64) -> QueryTab {
        QueryTab {
            id: id.to_string(),
            query_type: QueryType::Config,
            name: Some(id.to_string()),
            query: String::new(),
            variables: String::new(),
            folder_id: folder.map(str::to_string),
            order,
        }
    }

    fn folder(id: &str, parent: Option<&str>, order: i64) -> QueryFolder {
        QueryFolder {
            id: id.to_string(),
            name: id.to_uppercase(),
            parent_id: parent.map(str::to_string),
            order,
        }
    }

    fn refs(view: &QueryView) -> Vec<ItemRef> {
        view.sortable_items.iter().map(OrganizerItem::item_ref).collect()
    }

    #[test]
    fn test_root_view_interleaves_by_order() {
        let queries = vec![tab("t1", None, 2), tab("t2", None, 0), tab("t3", Some("a"), 0)];
        let folders = vec![folder("a", None, 1), folder("b", Some("a"), 0)];

        let view = compute_view(&queries, &folders, &[]);

        assert_eq!(view.current_folder_id, None);
        assert_eq!(view.query_count(), 2);
        assert_eq!(view.current_folders.len(), 1);
        assert_eq!(
            refs(&view),
            vec![
                ItemRef::Tab("t2".to_string()),
                ItemRef::Folder("a".to_string()),
                ItemRef::Tab("t1".to_string()),
            ]
        );
        assert!(view.breadcrumb_path.is_empty());
        assert_eq!(view.empty_message(), None);
    }

    #[test]
    fn test_folder_view() {
        let queries = vec![tab("t1", None, 0), tab("t3", Some("a"), 1)];
        let folders = vec![folder("a", None, 0), folder("b", Some("a"), 0)];

        let view = compute_view(&queries, &folders, &["a".to_string()]);

        assert_eq!(view.current_folder_id.as_deref(), Some("a"));
        assert_eq!(
            refs(&view),
            vec![ItemRef::Folder("b".to_string()), ItemRef::Tab("t3".to_string())]
        );
        assert_eq!(view.breadcrumb_path[0].name, "A");
    }

    #[test]
    fn test_ties_keep_folders_first_and_are_repeatable() {
        let queries = vec![tab("t1", None, 0), tab("t2", None, 0)];
        let folders = vec![folder("a", None, 0)];

        let first = compute_view(&queries, &folders, &[]);
        let second = compute_view(&queries, &folders, &[]);

        assert_eq!(
            refs(&first),
            vec![
                ItemRef::Folder("a".to_string()),
                ItemRef::Tab("t1".to_string()),
                ItemRef::Tab("t2".to_string()),
            ]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_orphans_surface_at_root() {
        let queries = vec![tab("t1", Some("deleted"), 0)];
        let folders = vec![folder("b", Some("deleted"), 1)];

        let view = compute_view(&queries, &folders, &[]);
        assert_eq!(view.query_count(), 1);
        assert_eq!(view.current_folders.len(), 1);
    }

    #[test]
    fn test_missing_folder_in_path() {
        let view = compute_view(&[], &[], &["gone".to_string()]);
        assert_eq!(view.breadcrumb_path[0].name, "Unknown");
        assert_eq!(view.empty_message(), Some(EMPTY_FOLDER_MESSAGE));
    }

    #[test]
    fn test_empty_root_message() {
        let view = ConnectionQueries::default().view();
        assert_eq!(view.empty_message(), Some(EMPTY_ROOT_MESSAGE));
    }
}
