use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::modules::folders::detach_folder;
use crate::modules::navigation;
use crate::state::{ConnectionQueries, QueryFolder, QueryFolderPatch, QueryTab, QueryTabPatch};

/// Durable keyed storage for each connection's tabs and folders.
///
/// Every call is a whole-connection read-modify-write. Calls naming an
/// unknown connection do nothing.
pub trait ConfigStore {
    fn connection(&self, connection: &str) -> Option<&ConnectionQueries>;

    /// Registers `connection` with empty collections if it is not known yet.
    fn ensure_connection(&mut self, connection: &str);

    /// Inserts `tab` and makes it the active one.
    fn add_query_tab(&mut self, connection: &str, tab: QueryTab);
    fn update_query_tab(&mut self, connection: &str, patch: QueryTabPatch);
    fn remove_query_tab(&mut self, connection: &str, id: &str);
    fn set_active_query_tab(&mut self, connection: &str, id: &str);

    fn add_query_folder(&mut self, connection: &str, folder: QueryFolder);
    fn update_query_folder(&mut self, connection: &str, patch: QueryFolderPatch);
    fn remove_query_folder(&mut self, connection: &str, id: &str);

    fn navigate_to_folder(&mut self, connection: &str, folder_id: &str);
    fn navigate_to_parent_folder(&mut self, connection: &str);
    fn navigate_to_root(&mut self, connection: &str);
    fn set_current_folder_path(&mut self, connection: &str, path: Vec<String>);
}

impl ConnectionQueries {
    pub(crate) fn insert_tab(&mut self, tab: QueryTab) {
        self.active_query = Some(tab.id.clone());
        self.queries.push(tab);
    }

    pub(crate) fn patch_tab(&mut self, patch: &QueryTabPatch) {
        if let Some(tab) = self.queries.iter_mut().find(|q| q.id == patch.id) {
            tab.apply(patch);
        }
    }

    /// Removes a tab; an active tab hands over to its right neighbour, or the
    /// left one when it was last.
    pub(crate) fn delete_tab(&mut self, id: &str) {
        let Some(index) = self.queries.iter().position(|q| q.id == id) else {
            return;
        };
        self.queries.remove(index);

        if self.active_query.as_deref() == Some(id) {
            self.active_query = self
                .queries
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.queries.get(i)))
                .map(|q| q.id.clone());
        }
    }

    pub(crate) fn patch_folder(&mut self, patch: &QueryFolderPatch) {
        if let Some(folder) = self.query_folders.iter_mut().find(|f| f.id == patch.id) {
            folder.apply(patch);
        }
    }
}

/// In-memory store, also the working copy behind `JsonFileStore`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    connections: BTreeMap<String, ConnectionQueries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_ids(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }

    pub fn remove_connection(&mut self, connection: &str) -> Option<ConnectionQueries> {
        self.connections.remove(connection)
    }

    fn with<F: FnOnce(&mut ConnectionQueries)>(&mut self, connection: &str, f: F) {
        match self.connections.get_mut(connection) {
            Some(conn) => f(conn),
            None => log::debug!("[QueryStore] Unknown connection '{}', skipping", connection),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn connection(&self, connection: &str) -> Option<&ConnectionQueries> {
        self.connections.get(connection)
    }

    fn ensure_connection(&mut self, connection: &str) {
        self.connections.entry(connection.to_string()).or_default();
    }

    fn add_query_tab(&mut self, connection: &str, tab: QueryTab) {
        self.with(connection, |c| c.insert_tab(tab));
    }

    fn update_query_tab(&mut self, connection: &str, patch: QueryTabPatch) {
        self.with(connection, |c| c.patch_tab(&patch));
    }

    fn remove_query_tab(&mut self, connection: &str, id: &str) {
        self.with(connection, |c| c.delete_tab(id));
    }

    fn set_active_query_tab(&mut self, connection: &str, id: &str) {
        self.with(connection, |c| {
            if c.tab(id).is_some() {
                c.active_query = Some(id.to_string());
            }
        });
    }

    fn add_query_folder(&mut self, connection: &str, folder: QueryFolder) {
        self.with(connection, |c| c.query_folders.push(folder));
    }

    fn update_query_folder(&mut self, connection: &str, patch: QueryFolderPatch) {
        self.with(connection, |c| c.patch_folder(&patch));
    }

    fn remove_query_folder(&mut self, connection: &str, id: &str) {
        self.with(connection, |c| {
            detach_folder(c, id);
        });
    }

    fn navigate_to_folder(&mut self, connection: &str, folder_id: &str) {
        self.with(connection, |c| {
            navigation::navigate_to_folder(&mut c.current_folder_path, folder_id)
        });
    }

    fn navigate_to_parent_folder(&mut self, connection: &str) {
        self.with(connection, |c| {
            navigation::navigate_to_parent_folder(&mut c.current_folder_path)
        });
    }

    fn navigate_to_root(&mut self, connection: &str) {
        self.with(connection, |c| navigation::navigate_to_root(&mut c.current_folder_path));
    }

    fn set_current_folder_path(&mut self, connection: &str, path: Vec<String>) {
        self.with(connection, |c| c.current_folder_path = path);
    }
}
