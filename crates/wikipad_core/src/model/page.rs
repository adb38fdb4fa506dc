//! Page domain model.
//!
//! # Responsibility
//! - Define the canonical page record and its identifier.
//! - Define `PageUpdate`, the only way to change a page after creation.
//!
//! # Invariants
//! - `id` is assigned once and never changes for the page lifetime.
//! - `content` is an opaque HTML fragment; nothing in the model parses it.
//! - `parent_id` is a soft reference and may point to a removed page.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Reserved identifier of the page seeded at store initialization.
pub const ROOT_PAGE_ID: &str = "root";

/// Opaque page identifier.
///
/// Generated ids are UUID v4 strings; the seeded root uses `"root"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the reserved root identifier.
    pub fn root() -> Self {
        Self(ROOT_PAGE_ID.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PAGE_ID
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Canonical wiki page record.
///
/// Serialized with camelCase keys so a page list maps 1:1 onto the
/// `{id, title, content, parentId}` record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Stable identifier, unique within one store.
    pub id: PageId,
    /// User-facing label. Not unique, may be empty.
    #[serde(default)]
    pub title: String,
    /// Rich-text body as an HTML fragment.
    #[serde(default)]
    pub content: String,
    /// Parent page. `None` means a root-level page.
    #[serde(default)]
    pub parent_id: Option<PageId>,
}

impl Page {
    /// Creates a page with a generated id and empty content.
    pub fn new(title: impl Into<String>, parent_id: Option<PageId>) -> Self {
        Self::with_id(PageId::generate(), title, parent_id)
    }

    /// Creates a page with a caller-provided id.
    ///
    /// Used for the seeded root and for snapshot import, where identity
    /// already exists.
    pub fn with_id(id: PageId, title: impl Into<String>, parent_id: Option<PageId>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            parent_id,
        }
    }

    /// Returns whether this page sits at root level.
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Applies one update in place.
    ///
    /// Returns `true` when the page actually changed.
    pub fn apply(&mut self, update: PageUpdate) -> bool {
        match update {
            PageUpdate::Title(title) => replace_if_changed(&mut self.title, title),
            PageUpdate::Content(content) => replace_if_changed(&mut self.content, content),
            PageUpdate::Parent(parent_id) => replace_if_changed(&mut self.parent_id, parent_id),
        }
    }
}

/// Tagged field update for one page.
///
/// Each variant names exactly one mutable field; `id` can never be updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    /// Replaces the title.
    Title(String),
    /// Replaces the HTML content.
    Content(String),
    /// Re-parents the page. `None` moves it to root level.
    Parent(Option<PageId>),
}

impl PageUpdate {
    pub fn title(value: impl Into<String>) -> Self {
        Self::Title(value.into())
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self::Content(value.into())
    }

    pub fn parent(value: Option<PageId>) -> Self {
        Self::Parent(value)
    }

    /// Field name used in diagnostics.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Content(_) => "content",
            Self::Parent(_) => "parent_id",
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
