// Sibling-set helpers over a connection's tabs and folders.
// An entity whose parent id does not resolve is treated as a root entity.

use std::collections::HashSet;

use crate::state::{ConnectionQueries, QueryFolder};

/// Parent id as displayed: `None` when absent or pointing at a missing folder.
pub fn effective_parent<'a>(folders: &[QueryFolder], parent: Option<&'a str>) -> Option<&'a str> {
    parent.filter(|id| folders.iter().any(|f| f.id == *id))
}

/// Next free order key in a folder context. Tabs and folders share the namespace.
pub fn next_order(conn: &ConnectionQueries, parent: Option<&str>) -> i64 {
    let folders = &conn.query_folders;
    let tab_orders = conn
        .queries
        .iter()
        .filter(|q| effective_parent(folders, q.folder_id.as_deref()) == parent)
        .map(|q| q.order);
    let folder_orders = folders
        .iter()
        .filter(|f| effective_parent(folders, f.parent_id.as_deref()) == parent)
        .map(|f| f.order);

    tab_orders.chain(folder_orders).max().map_or(0, |max| max.saturating_add(1))
}

/// Names of the tabs in `parent`, skipping `exclude`.
pub fn sibling_tab_names<'a>(
    conn: &'a ConnectionQueries,
    parent: Option<&str>,
    exclude: Option<&str>,
) -> Vec<&'a str> {
    conn.queries
        .iter()
        .filter(|q| Some(q.id.as_str()) != exclude)
        .filter(|q| effective_parent(&conn.query_folders, q.folder_id.as_deref()) == parent)
        .map(|q| q.display_name())
        .collect()
}

/// Names of the folders in `parent`, skipping `exclude`.
pub fn sibling_folder_names<'a>(
    conn: &'a ConnectionQueries,
    parent: Option<&str>,
    exclude: Option<&str>,
) -> Vec<&'a str> {
    let folders = &conn.query_folders;
    folders
        .iter()
        .filter(|f| Some(f.id.as_str()) != exclude)
        .filter(|f| effective_parent(folders, f.parent_id.as_deref()) == parent)
        .map(|f| f.name.as_str())
        .collect()
}

/// True when `folder_id` is `ancestor_id` or sits somewhere beneath it.
pub fn is_within(folders: &[QueryFolder], folder_id: &str, ancestor_id: &str) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(folder_id);

    while let Some(id) = current {
        if id == ancestor_id {
            return true;
        }
        if !seen.insert(id) {
            return false;
        }
        current = folders
            .iter()
            .find(|f| f.id == id)
            .and_then(|f| f.parent_id.as_deref());
    }

    false
}
