// Shared state structs to avoid circular dependencies.
// Used by the stores, the pure logic modules and the organizer alike.

use serde::{Deserialize, Serialize};

/// Label shown for folders referenced by id that no longer exist.
pub const UNKNOWN_FOLDER: &str = "Unknown";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Inline query text kept in the config.
    #[default]
    Config,
    /// Query text lives in an external file.
    File,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryTab {
    pub id: String,
    #[serde(rename = "type", default)]
    pub query_type: QueryType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl QueryTab {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn apply(&mut self, patch: &QueryTabPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(query) = &patch.query {
            self.query = query.clone();
        }
        if let Some(variables) = &patch.variables {
            self.variables = variables.clone();
        }
        if let Some(folder_id) = &patch.folder_id {
            self.folder_id = folder_id.clone();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryFolder {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub order: i64,
}

impl QueryFolder {
    pub fn apply(&mut self, patch: &QueryFolderPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(parent_id) = &patch.parent_id {
            self.parent_id = parent_id.clone();
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
    }
}

/// Caller-supplied fields for a new tab. Everything else is allocated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabDraft {
    pub query_type: QueryType,
    pub name: Option<String>,
    pub query: String,
    pub variables: String,
    pub folder_id: Option<String>,
}

/// Partial update of a tab. `folder_id: Some(None)` moves the tab to root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryTabPatch {
    pub id: String,
    pub name: Option<String>,
    pub query: Option<String>,
    pub variables: Option<String>,
    pub folder_id: Option<Option<String>>,
    pub order: Option<i64>,
}

/// Partial update of a folder. `parent_id: Some(None)` moves the folder to root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryFolderPatch {
    pub id: String,
    pub name: Option<String>,
    pub parent_id: Option<Option<String>>,
    pub order: Option<i64>,
}

/// The per-connection slice of configuration owned by the organizer.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionQueries {
    #[serde(default)]
    pub queries: Vec<QueryTab>,
    #[serde(default)]
    pub query_folders: Vec<QueryFolder>,
    #[serde(default)]
    pub current_folder_path: Vec<String>,
    #[serde(default)]
    pub active_query: Option<String>,
}

impl ConnectionQueries {
    pub fn tab(&self, id: &str) -> Option<&QueryTab> {
        self.queries.iter().find(|q| q.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&QueryFolder> {
        self.query_folders.iter().find(|f| f.id == id)
    }

    /// Folder currently being viewed, `None` for root.
    pub fn current_folder_id(&self) -> Option<&str> {
        self.current_folder_path.last().map(String::as_str)
    }
}

/// Identifies a tab or folder within the combined sortable list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Tab(String),
    Folder(String),
}

impl ItemRef {
    pub fn id(&self) -> &str {
        match self {
            ItemRef::Tab(id) | ItemRef::Folder(id) => id,
        }
    }
}

/// An entry in the combined list of a folder context.
#[derive(Clone, Debug, PartialEq)]
pub enum OrganizerItem {
    Folder(QueryFolder),
    Tab(QueryTab),
}

impl OrganizerItem {
    pub fn id(&self) -> &str {
        match self {
            OrganizerItem::Folder(folder) => &folder.id,
            OrganizerItem::Tab(tab) => &tab.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OrganizerItem::Folder(folder) => &folder.name,
            OrganizerItem::Tab(tab) => tab.display_name(),
        }
    }

    pub fn order(&self) -> i64 {
        match self {
            OrganizerItem::Folder(folder) => folder.order,
            OrganizerItem::Tab(tab) => tab.order,
        }
    }

    pub fn item_ref(&self) -> ItemRef {
        match self {
            OrganizerItem::Folder(folder) => ItemRef::Folder(folder.id.clone()),
            OrganizerItem::Tab(tab) => ItemRef::Tab(tab.id.clone()),
        }
    }
}
