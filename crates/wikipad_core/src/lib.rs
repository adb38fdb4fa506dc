//! Core domain logic for Wikipad.
//! This crate owns the page hierarchy and the editor synchronization rules.

pub mod config;
pub mod editor;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, WikiConfig};
pub use editor::binding::EditorBinding;
pub use editor::image::{is_image_source, read_image_as_data_uri, FileInput, ImageLoadError};
pub use editor::surface::{ContentChange, EditSurface, HtmlSurface};
pub use editor::table::table_html;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogLevel,
    LoggingConfig,
};
pub use model::page::{Page, PageId, PageUpdate, ROOT_PAGE_ID};
pub use service::tree_view::{
    children_of, derive_content_preview, orphans, outline, root_pages, unreachable_pages,
    OutlineRow,
};
pub use service::wiki_session::WikiSession;
pub use store::page_store::{PageStore, PageStoreError, SubscriptionId};
pub use store::snapshot::{restore_store, SnapshotError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
