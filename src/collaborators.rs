// External collaborators the organizer calls into when tabs go away.

use crate::error::Result;
use crate::state::QueryTab;

/// Live-query subscriptions and transient execution state, keyed by tab.
pub trait LiveQueryRegistry {
    fn cancel_live_queries(&mut self, tab_id: &str);
    fn remove_query_state(&mut self, tab_id: &str);

    fn is_live(&self, _tab_id: &str) -> bool {
        false
    }
}

/// Registry for runtimes without live queries.
#[derive(Debug, Default)]
pub struct NoLiveQueries;

impl LiveQueryRegistry for NoLiveQueries {
    fn cancel_live_queries(&mut self, _tab_id: &str) {}

    fn remove_query_state(&mut self, _tab_id: &str) {}
}

/// Desktop-only file operations for `file` tabs. Fire-and-forget: the
/// organizer logs failures and carries on.
pub trait FileSystemAdapter {
    /// Drops query files no longer referenced by any tab.
    fn prune_query_files(&mut self) -> Result<()>;

    /// Reveals the tab's backing file in Finder/Explorer.
    fn open_in_explorer(&mut self, tab: &QueryTab) -> Result<()>;
}
