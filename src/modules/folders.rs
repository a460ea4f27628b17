// Folder building, renaming, moving and removal - pure logic.

use uuid::Uuid;

use crate::modules::naming::{name_or_default, unique_name};
use crate::modules::tree::{
    effective_parent, is_within, next_order, sibling_folder_names, sibling_tab_names,
};
use crate::state::{ConnectionQueries, QueryFolder, QueryFolderPatch};

/// Allocates a folder inside `parent` with a sibling-unique name.
pub fn build_folder(
    conn: &ConnectionQueries,
    name: &str,
    parent: Option<&str>,
    default_name: &str,
) -> QueryFolder {
    let parent = effective_parent(&conn.query_folders, parent);
    let existing = sibling_folder_names(conn, parent, None);

    QueryFolder {
        id: Uuid::new_v4().to_string(),
        name: unique_name(name_or_default(Some(name), default_name), &existing),
        parent_id: parent.map(str::to_string),
        order: next_order(conn, parent),
    }
}

/// Patch renaming `id`, or `None` when the folder no longer exists.
pub fn rename_patch(
    conn: &ConnectionQueries,
    id: &str,
    new_name: &str,
    default_name: &str,
) -> Option<QueryFolderPatch> {
    let folder = conn.folder(id)?;
    let parent = effective_parent(&conn.query_folders, folder.parent_id.as_deref());
    let existing = sibling_folder_names(conn, parent, Some(id));

    Some(QueryFolderPatch {
        id: id.to_string(),
        name: Some(unique_name(name_or_default(Some(new_name), default_name), &existing)),
        ..Default::default()
    })
}

/// Patch moving folder `id` under `target`, or `None` if the folder is
/// missing or the move would put it inside itself.
pub fn move_patch(
    conn: &ConnectionQueries,
    id: &str,
    target: Option<&str>,
) -> Option<QueryFolderPatch> {
    let folder = conn.folder(id)?;
    let target = effective_parent(&conn.query_folders, target);

    if let Some(target_id) = target {
        if is_within(&conn.query_folders, target_id, id) {
            return None;
        }
    }

    let existing = sibling_folder_names(conn, target, Some(id));

    Some(QueryFolderPatch {
        id: id.to_string(),
        name: Some(unique_name(&folder.name, &existing)),
        parent_id: Some(target.map(str::to_string)),
        order: Some(next_order(conn, target)),
    })
}

/// Removes folder `id` in place.
///
/// Direct children move up to the removed folder's parent, appended after
/// the siblings already there and renamed where their name is taken. The
/// navigation path is cut just before the removed folder. Returns false
/// when the folder does not exist.
pub fn detach_folder(conn: &mut ConnectionQueries, id: &str) -> bool {
    let Some(removed) = conn.folder(id) else {
        return false;
    };

    // Resolved while the folder still exists, so its children are not
    // mistaken for orphans sitting in the parent.
    let parent = effective_parent(&conn.query_folders, removed.parent_id.as_deref())
        .filter(|p| *p != id)
        .map(str::to_string);
    let mut order = next_order(conn, parent.as_deref());
    let mut folder_names: Vec<String> = sibling_folder_names(conn, parent.as_deref(), Some(id))
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut tab_names: Vec<String> = sibling_tab_names(conn, parent.as_deref(), None)
        .into_iter()
        .map(str::to_string)
        .collect();

    conn.query_folders.retain(|f| f.id != id);

    // Children keep their relative order.
    let mut children: Vec<(bool, usize, i64)> = conn
        .query_folders
        .iter()
        .enumerate()
        .filter(|(_, f)| f.parent_id.as_deref() == Some(id))
        .map(|(i, f)| (true, i, f.order))
        .chain(
            conn.queries
                .iter()
                .enumerate()
                .filter(|(_, q)| q.folder_id.as_deref() == Some(id))
                .map(|(i, q)| (false, i, q.order)),
        )
        .collect();
    children.sort_by_key(|(is_folder, _, child_order)| (*child_order, !*is_folder));

    for (is_folder, i, _) in children {
        if is_folder {
            let folder = &mut conn.query_folders[i];
            folder.name = unique_name(&folder.name, &folder_names);
            folder.parent_id = parent.clone();
            folder.order = order;
            folder_names.push(folder.name.clone());
        } else {
            let tab = &mut conn.queries[i];
            // Unnamed tabs show a default and are left unnamed.
            if !tab.display_name().is_empty() {
                let name = unique_name(tab.display_name(), &tab_names);
                tab_names.push(name.clone());
                tab.name = Some(name);
            }
            tab.folder_id = parent.clone();
            tab.order = order;
        }
        order = order.saturating_add(1);
    }

    if let Some(pos) = conn.current_folder_path.iter().position(|f| f == id) {
        conn.current_folder_path.truncate(pos);
    }

    true
}
