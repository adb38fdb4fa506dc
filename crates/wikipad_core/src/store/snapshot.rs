//! JSON record layout for the page collection.
//!
//! The serialization unit is the full page list as an array of
//! `{id, title, content, parentId}` records, in collection order.

use crate::model::page::Page;
use crate::store::page_store::{PageStore, PageStoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from snapshot encode/decode.
#[derive(Debug)]
pub enum SnapshotError {
    /// JSON could not be produced or parsed.
    Json(serde_json::Error),
    /// Decoded records violate store invariants.
    Store(PageStoreError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid page snapshot: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<PageStoreError> for SnapshotError {
    fn from(value: PageStoreError) -> Self {
        Self::Store(value)
    }
}

/// Encodes pages as a pretty-printed JSON array.
pub fn to_json(pages: &[Page]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(pages)?)
}

/// Decodes a JSON array of page records.
pub fn from_json(input: &str) -> Result<Vec<Page>, SnapshotError> {
    Ok(serde_json::from_str(input)?)
}

/// Decodes a JSON array and builds a store from it.
///
/// # Errors
/// - `Json` when the input is not a record array.
/// - `Store` when two records share an id.
pub fn restore_store(input: &str) -> Result<PageStore, SnapshotError> {
    let pages = from_json(input)?;
    let count = pages.len();
    let store = PageStore::from_pages(pages)?;
    info!("event=snapshot_restore module=store status=ok pages={count}");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::{from_json, restore_store, to_json, SnapshotError};
    use crate::model::page::PageId;
    use crate::store::page_store::PageStore;

    #[test]
    fn missing_optional_fields_use_defaults() {
        let pages = from_json(r#"[{"id":"root"}]"#).expect("minimal record should decode");
        assert_eq!(pages[0].id, PageId::root());
        assert!(pages[0].title.is_empty());
        assert!(pages[0].parent_id.is_none());
    }

    #[test]
    fn restore_keeps_order_and_orphans() {
        let mut store = PageStore::new();
        let child = store.add_page("Child", Some(PageId::root()));
        store.delete_page(&PageId::root());

        let json = to_json(store.pages()).expect("encode should succeed");
        let restored = restore_store(&json).expect("restore should succeed");
        assert_eq!(restored.pages(), store.pages());
        assert_eq!(
            restored.page(&child).and_then(|page| page.parent_id.clone()),
            Some(PageId::root())
        );
    }

    #[test]
    fn restore_rejects_duplicate_ids() {
        let err = restore_store(r#"[{"id":"a"},{"id":"a"}]"#)
            .err()
            .expect("duplicate ids must fail");
        assert!(matches!(err, SnapshotError::Store(_)));
    }

    #[test]
    fn restore_rejects_non_array_input() {
        let err = restore_store(r#"{"id":"a"}"#)
            .err()
            .expect("object input must fail");
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
