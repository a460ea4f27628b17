// Query organizer entry point.
// Every operation takes the selected connection; `None` means nothing is
// selected and the call is skipped.

use log::{debug, info, warn};

use crate::collaborators::{FileSystemAdapter, LiveQueryRegistry, NoLiveQueries};
use crate::modules::navigation::{self, Breadcrumb};
use crate::modules::query_store::ConfigStore;
use crate::modules::tabs::{self, CloseDirection, TabMenu};
use crate::modules::view::{compute_view, QueryView};
use crate::modules::{folders, naming, tree};
use crate::settings::Settings;
use crate::state::{
    ConnectionQueries, ItemRef, QueryFolderPatch, QueryTabPatch, QueryType, TabDraft,
};

pub struct Organizer<S: ConfigStore> {
    store: S,
    settings: Settings,
    live_queries: Box<dyn LiveQueryRegistry>,
    files: Option<Box<dyn FileSystemAdapter>>,
}

impl<S: ConfigStore> Organizer<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings,
            live_queries: Box::new(NoLiveQueries),
            files: None,
        }
    }

    pub fn with_live_queries(mut self, registry: Box<dyn LiveQueryRegistry>) -> Self {
        self.live_queries = registry;
        self
    }

    /// Enables desktop file handling for `file` tabs.
    pub fn with_file_adapter(mut self, adapter: Box<dyn FileSystemAdapter>) -> Self {
        self.files = Some(adapter);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn resolve<'a>(&self, connection: Option<&'a str>, action: &str) -> Option<&'a str> {
        match connection {
            Some(id) if self.store.connection(id).is_some() => Some(id),
            Some(id) => {
                debug!("[Organizer] {}: unknown connection '{}', skipping", action, id);
                None
            }
            None => {
                debug!("[Organizer] {}: no connection selected, skipping", action);
                None
            }
        }
    }

    fn queries(&self, connection: &str) -> Option<&ConnectionQueries> {
        self.store.connection(connection)
    }

    /// Registers the connection and makes sure it has at least one tab.
    pub fn open_connection(&mut self, connection: &str) {
        self.store.ensure_connection(connection);

        let empty = self
            .queries(connection)
            .map_or(true, |c| c.queries.is_empty());
        if empty {
            self.new_tab(Some(connection));
        }
    }

    pub fn view(&self, connection: Option<&str>) -> Option<QueryView> {
        let connection = self.resolve(connection, "view")?;
        self.queries(connection).map(ConnectionQueries::view)
    }

    pub fn is_live(&self, tab_id: &str) -> bool {
        self.live_queries.is_live(tab_id)
    }

    // --- tabs ---

    /// Adds a tab from `draft`. Returns the new id.
    pub fn add_tab(&mut self, connection: Option<&str>, draft: TabDraft) -> Option<String> {
        let connection = self.resolve(connection, "add tab")?;
        let tab = {
            let conn = self.queries(connection)?;
            tabs::build_tab(conn, draft, &self.settings.default_query_name)
        };
        let id = tab.id.clone();

        info!("[Organizer] Adding tab '{}' ({})", tab.display_name(), id);
        self.store.add_query_tab(connection, tab);
        Some(id)
    }

    /// Adds an empty config tab in the folder being viewed.
    pub fn new_tab(&mut self, connection: Option<&str>) -> Option<String> {
        let folder_id = connection
            .and_then(|c| self.queries(c))
            .and_then(|c| c.current_folder_id().map(str::to_string));

        self.add_tab(
            connection,
            TabDraft {
                folder_id,
                ..Default::default()
            },
        )
    }

    pub fn duplicate_tab(&mut self, connection: Option<&str>, id: &str) -> Option<String> {
        let connection = self.resolve(connection, "duplicate tab")?;
        let draft = tabs::duplicate_draft(self.queries(connection)?.tab(id)?);
        self.add_tab(Some(connection), draft)
    }

    pub fn rename_tab(&mut self, connection: Option<&str>, id: &str, new_name: &str) {
        let Some(connection) = self.resolve(connection, "rename tab") else {
            return;
        };
        let patch = self.queries(connection).and_then(|conn| {
            tabs::rename_patch(conn, id, new_name, &self.settings.default_query_name)
        });

        if let Some(patch) = patch {
            self.store.update_query_tab(connection, patch);
        }
    }

    pub fn set_active_tab(&mut self, connection: Option<&str>, id: &str) {
        if let Some(connection) = self.resolve(connection, "activate tab") {
            self.store.set_active_query_tab(connection, id);
        }
    }

    /// Removes a tab and its live state. The last tab is replaced by a new one.
    pub fn remove_tab(&mut self, connection: Option<&str>, id: &str) {
        let Some(connection) = self.resolve(connection, "remove tab") else {
            return;
        };
        let Some(conn) = self.queries(connection) else {
            return;
        };
        if conn.tab(id).is_none() {
            debug!("[Organizer] Tab {} not found, skipping removal", id);
            return;
        }
        let was_last = conn.queries.len() == 1;

        info!("[Organizer] Removing tab {}", id);
        self.store.remove_query_tab(connection, id);
        self.live_queries.cancel_live_queries(id);
        self.live_queries.remove_query_state(id);

        if let Some(files) = self.files.as_mut() {
            if let Err(e) = files.prune_query_files() {
                warn!("[Organizer] Failed to prune query files: {}", e);
            }
        }

        if was_last {
            self.new_tab(Some(connection));
        }
    }

    /// "Close others": removes the listed queries of the tab's folder on the
    /// chosen side of `id`.
    pub fn remove_other_tabs(
        &mut self,
        connection: Option<&str>,
        id: &str,
        direction: CloseDirection,
    ) {
        let Some(connection) = self.resolve(connection, "remove other tabs") else {
            return;
        };
        let doomed = match self.listed_siblings(connection, id) {
            Some(listed) => tabs::tabs_to_close(&listed.current_queries, id, direction),
            None => return,
        };

        for other in doomed {
            self.remove_tab(Some(connection), &other);
        }
    }

    pub fn close_active_tab(&mut self, connection: Option<&str>) {
        let active = connection
            .and_then(|c| self.queries(c))
            .and_then(|c| c.active_query.clone());

        if let Some(active) = active {
            self.remove_tab(connection, &active);
        }
    }

    /// Moves a tab into `target` (`None` for root), appended after its new siblings.
    pub fn move_tab(&mut self, connection: Option<&str>, id: &str, target: Option<&str>) {
        let Some(connection) = self.resolve(connection, "move tab") else {
            return;
        };
        let patch = self.queries(connection).and_then(|conn| {
            let tab = conn.tab(id)?;
            let target = tree::effective_parent(&conn.query_folders, target);
            let existing = tree::sibling_tab_names(conn, target, Some(id));

            Some(QueryTabPatch {
                id: id.to_string(),
                name: Some(naming::unique_name(tab.display_name(), &existing)),
                folder_id: Some(target.map(str::to_string)),
                order: Some(tree::next_order(conn, target)),
                ..Default::default()
            })
        });

        if let Some(patch) = patch {
            self.store.update_query_tab(connection, patch);
        }
    }

    /// Context menu state for a tab as listed in its folder.
    pub fn tab_menu(&self, connection: Option<&str>, id: &str) -> Option<TabMenu> {
        let connection = self.resolve(connection, "tab menu")?;
        let listed = self.listed_siblings(connection, id)?;
        let tab = listed.current_queries.iter().find(|q| q.id == id)?;
        Some(tabs::tab_menu(
            &listed.current_queries,
            tab,
            self.settings.query_quick_close,
        ))
    }

    /// Reveals a `file` tab in the system file browser. Desktop only.
    pub fn reveal_tab(&mut self, connection: Option<&str>, id: &str) {
        let Some(connection) = self.resolve(connection, "reveal tab") else {
            return;
        };
        let Some(tab) = self.store.connection(connection).and_then(|c| c.tab(id)) else {
            return;
        };
        if tab.query_type != QueryType::File {
            return;
        }

        if let Some(files) = self.files.as_mut() {
            if let Err(e) = files.open_in_explorer(tab) {
                warn!("[Organizer] Failed to reveal {}: {}", id, e);
            }
        }
    }

    /// View of the folder that holds tab `id`.
    fn listed_siblings(&self, connection: &str, id: &str) -> Option<QueryView> {
        let conn = self.queries(connection)?;
        let tab = conn.tab(id)?;
        let folder = tree::effective_parent(&conn.query_folders, tab.folder_id.as_deref());
        let path: Vec<String> = folder.map(str::to_string).into_iter().collect();

        Some(compute_view(&conn.queries, &conn.query_folders, &path))
    }

    // --- folders ---

    /// Adds a folder inside the folder being viewed. Returns the new id.
    pub fn add_folder(&mut self, connection: Option<&str>, name: &str) -> Option<String> {
        let connection = self.resolve(connection, "add folder")?;
        let folder = {
            let conn = self.queries(connection)?;
            folders::build_folder(
                conn,
                name,
                conn.current_folder_id(),
                &self.settings.default_folder_name,
            )
        };
        let id = folder.id.clone();

        info!("[Organizer] Adding folder '{}' ({})", folder.name, id);
        self.store.add_query_folder(connection, folder);
        Some(id)
    }

    pub fn new_folder(&mut self, connection: Option<&str>) -> Option<String> {
        let name = self.settings.default_folder_name.clone();
        self.add_folder(connection, &name)
    }

    pub fn rename_folder(&mut self, connection: Option<&str>, id: &str, new_name: &str) {
        let Some(connection) = self.resolve(connection, "rename folder") else {
            return;
        };
        let patch = self.queries(connection).and_then(|conn| {
            folders::rename_patch(conn, id, new_name, &self.settings.default_folder_name)
        });

        if let Some(patch) = patch {
            self.store.update_query_folder(connection, patch);
        }
    }

    /// Moves a folder under `target`. Moving a folder into itself or a
    /// descendant is ignored.
    pub fn move_folder(&mut self, connection: Option<&str>, id: &str, target: Option<&str>) {
        let Some(connection) = self.resolve(connection, "move folder") else {
            return;
        };
        let patch = self
            .queries(connection)
            .and_then(|conn| folders::move_patch(conn, id, target));

        match patch {
            Some(patch) => self.store.update_query_folder(connection, patch),
            None => debug!("[Organizer] Ignoring move of folder {}", id),
        }
    }

    pub fn remove_folder(&mut self, connection: Option<&str>, id: &str) {
        if let Some(connection) = self.resolve(connection, "remove folder") {
            info!("[Organizer] Removing folder {}", id);
            self.store.remove_query_folder(connection, id);
        }
    }

    // --- navigation ---

    pub fn navigate_to_folder(&mut self, connection: Option<&str>, folder_id: &str) {
        if let Some(connection) = self.resolve(connection, "navigate") {
            self.store.navigate_to_folder(connection, folder_id);
        }
    }

    pub fn navigate_to_parent_folder(&mut self, connection: Option<&str>) {
        if let Some(connection) = self.resolve(connection, "navigate back") {
            self.store.navigate_to_parent_folder(connection);
        }
    }

    pub fn navigate_to_root(&mut self, connection: Option<&str>) {
        if let Some(connection) = self.resolve(connection, "navigate to root") {
            self.store.navigate_to_root(connection);
        }
    }

    pub fn jump_to_path_index(&mut self, connection: Option<&str>, index: usize) {
        let Some(connection) = self.resolve(connection, "jump") else {
            return;
        };
        let Some(mut path) = self
            .queries(connection)
            .map(|c| c.current_folder_path.clone())
        else {
            return;
        };

        navigation::jump_to_path_index(&mut path, index);
        self.store.set_current_folder_path(connection, path);
    }

    /// Handles a click on a visible or hidden breadcrumb.
    pub fn select_breadcrumb(&mut self, connection: Option<&str>, crumb: &Breadcrumb) {
        self.jump_to_path_index(connection, crumb.index);
    }

    // --- ordering ---

    /// Persists a drag-and-drop result for the folder being viewed.
    pub fn save_order(&mut self, connection: Option<&str>, ordered: &[ItemRef]) {
        let Some(connection) = self.resolve(connection, "save order") else {
            return;
        };
        let updates = match self.queries(connection) {
            Some(conn) => tabs::reorder_logic(conn, ordered),
            None => return,
        };

        debug!("[Organizer] Reorder touched {} item(s)", updates.len());
        for update in updates {
            match update.item {
                ItemRef::Tab(id) => self.store.update_query_tab(
                    connection,
                    QueryTabPatch {
                        id,
                        order: Some(update.order),
                        ..Default::default()
                    },
                ),
                ItemRef::Folder(id) => self.store.update_query_folder(
                    connection,
                    QueryFolderPatch {
                        id,
                        order: Some(update.order),
                        ..Default::default()
                    },
                ),
            }
        }
    }
}
