use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::modules::query_store::{ConfigStore, MemoryStore};
use crate::settings::write_atomic;
use crate::state::{ConnectionQueries, QueryFolder, QueryFolderPatch, QueryTab, QueryTabPatch};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryFile {
    #[serde(default)]
    saved_at: Option<String>,
    #[serde(default)]
    connections: MemoryStore,
}

/// `ConfigStore` persisted to a JSON file after every mutation.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Loads `path`, starting empty if it is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inner = match Self::read(&path) {
            Ok(Some(file)) => file.connections,
            Ok(None) => MemoryStore::default(),
            Err(e) => {
                log::warn!("[QueryStore] Failed to load {}: {}", path.display(), e);
                MemoryStore::default()
            }
        };

        Self { path, inner }
    }

    fn read(path: &Path) -> Result<Option<QueryFile>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        let file = QueryFile {
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            connections: self.inner.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_atomic(&self.path, &json)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("[QueryStore] Failed to save {}: {}", self.path.display(), e);
        }
    }
}

impl ConfigStore for JsonFileStore {
    fn connection(&self, connection: &str) -> Option<&ConnectionQueries> {
        self.inner.connection(connection)
    }

    fn ensure_connection(&mut self, connection: &str) {
        if self.inner.connection(connection).is_none() {
            self.inner.ensure_connection(connection);
            self.persist();
        }
    }

    fn add_query_tab(&mut self, connection: &str, tab: QueryTab) {
        self.inner.add_query_tab(connection, tab);
        self.persist();
    }

    fn update_query_tab(&mut self, connection: &str, patch: QueryTabPatch) {
        self.inner.update_query_tab(connection, patch);
        self.persist();
    }

    fn remove_query_tab(&mut self, connection: &str, id: &str) {
        self.inner.remove_query_tab(connection, id);
        self.persist();
    }

    fn set_active_query_tab(&mut self, connection: &str, id: &str) {
        self.inner.set_active_query_tab(connection, id);
        self.persist();
    }

    fn add_query_folder(&mut self, connection: &str, folder: QueryFolder) {
        self.inner.add_query_folder(connection, folder);
        self.persist();
    }

    fn update_query_folder(&mut self, connection: &str, patch: QueryFolderPatch) {
        self.inner.update_query_folder(connection, patch);
        self.persist();
    }

    fn remove_query_folder(&mut self, connection: &str, id: &str) {
        self.inner.remove_query_folder(connection, id);
        self.persist();
    }

    fn navigate_to_folder(&mut self, connection: &str, folder_id: &str) {
        self.inner.navigate_to_folder(connection, folder_id);
        self.persist();
    }

    fn navigate_to_parent_folder(&mut self, connection: &str) {
        self.inner.navigate_to_parent_folder(connection);
        self.persist();
    }

    fn navigate_to_root(&mut self, connection: &str) {
        self.inner.navigate_to_root(connection);
        self.persist();
    }

    fn set_current_folder_path(&mut self, connection: &str, path: Vec<String>) {
        self.inner.set_current_folder_path(connection, path);
        self.persist();
    }
}
