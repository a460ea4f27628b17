// Surrealist Query Organizer Library Entry Point
// Exposes the organizer, its stores and the pure logic modules so the
// presentation layer can drive them and each piece can be tested on its own.

pub mod collaborators;
pub mod error;
pub mod organizer;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules and the stores
pub mod modules;

pub use error::{Error, Result};
pub use modules::navigation::{Breadcrumb, BreadcrumbTrail};
pub use modules::query_file_store::JsonFileStore;
pub use modules::query_store::{ConfigStore, MemoryStore};
pub use modules::tabs::CloseDirection;
pub use modules::view::{compute_view, QueryView};
pub use organizer::Organizer;
pub use settings::Settings;
pub use state::{ItemRef, OrganizerItem, QueryFolder, QueryTab, QueryType, TabDraft};

/// Installs the `env_logger` backend for the `log` facade.
///
/// Debug builds log the organizer at `Debug`, release builds at `Info`;
/// `RUST_LOG` still applies on top. Safe to call more than once.
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::from_default_env()
        .filter_module("surrealist_organizer", level)
        .is_test(cfg!(test))
        .try_init();
}
