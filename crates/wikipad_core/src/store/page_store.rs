//! Page store with observer notification.
//!
//! # Responsibility
//! - Provide create/read/update/delete/move over the flat page list.
//! - Notify subscribers with the full collection after each mutation.
//!
//! # Invariants
//! - Insertion order equals creation order, never tree order.
//! - Unknown ids are silent no-ops; nothing here returns an error for them.
//! - Delete and move never cascade to children.
//! - Subscribers are only notified when the collection actually changed.

use crate::config::WikiConfig;
use crate::model::page::{Page, PageId, PageUpdate};
use log::debug;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title of the page seeded at initialization.
pub const DEFAULT_ROOT_TITLE: &str = "Welcome";
/// Content of the page seeded at initialization.
pub const DEFAULT_ROOT_CONTENT: &str = "Welcome to your Wiki!";

/// Observer callback receiving the full page list.
pub type Subscriber = Box<dyn FnMut(&[Page])>;

/// Handle returned by `PageStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Errors raised when building a store from existing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStoreError {
    /// Two records share the same id.
    DuplicatePageId(PageId),
}

impl Display for PageStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePageId(id) => write!(f, "duplicate page id: {id}"),
        }
    }
}

impl Error for PageStoreError {}

/// Owned page collection.
pub struct PageStore {
    pages: Vec<Page>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    revision: u64,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore {
    /// Creates a store seeded with the default root page.
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT_TITLE, DEFAULT_ROOT_CONTENT)
    }

    /// Creates a store seeded with a root page using the given title/content.
    pub fn with_root(title: impl Into<String>, content: impl Into<String>) -> Self {
        let mut root = Page::with_id(PageId::root(), title, None);
        root.content = content.into();
        Self::from_pages_unchecked(vec![root])
    }

    /// Creates a store whose root page follows the configured defaults.
    pub fn from_config(config: &WikiConfig) -> Self {
        Self::with_root(config.root_title.as_str(), config.root_content.as_str())
    }

    /// Creates a store from an existing page list, e.g. an imported snapshot.
    ///
    /// The list is kept as-is: no root is seeded and orphans are allowed.
    ///
    /// # Errors
    /// - Returns `DuplicatePageId` when two pages share an id.
    pub fn from_pages(pages: Vec<Page>) -> Result<Self, PageStoreError> {
        let mut seen = HashSet::with_capacity(pages.len());
        for page in &pages {
            if !seen.insert(page.id.as_str()) {
                return Err(PageStoreError::DuplicatePageId(page.id.clone()));
            }
        }
        Ok(Self::from_pages_unchecked(pages))
    }

    fn from_pages_unchecked(pages: Vec<Page>) -> Self {
        Self {
            pages,
            subscribers: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    /// Read-only view in creation order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Loads one page by id.
    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| &page.id == id)
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.page(id).is_some()
    }

    /// Number of effective mutations since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Creates a page with empty content and returns its fresh id.
    pub fn add_page(&mut self, title: impl Into<String>, parent_id: Option<PageId>) -> PageId {
        let mut page = Page::new(title, parent_id);
        while self.contains(&page.id) {
            page.id = PageId::generate();
        }
        let id = page.id.clone();
        debug!(
            "event=page_add module=store status=ok page_id={} has_parent={}",
            id,
            page.parent_id.is_some()
        );
        self.pages.push(page);
        self.commit();
        id
    }

    /// Merges tagged updates into the page matching `id`.
    ///
    /// Fields without an update are preserved. Unknown ids are ignored.
    /// Returns `true` when the page actually changed.
    pub fn update_page(
        &mut self,
        id: &PageId,
        updates: impl IntoIterator<Item = PageUpdate>,
    ) -> bool {
        let Some(page) = self.pages.iter_mut().find(|page| &page.id == id) else {
            debug!("event=page_update module=store status=skipped reason=not_found page_id={id}");
            return false;
        };

        let mut changed = false;
        for update in updates {
            let field = update.field_name();
            if page.apply(update) {
                debug!("event=page_update module=store status=ok page_id={id} field={field}");
                changed = true;
            }
        }
        if changed {
            self.commit();
        }
        changed
    }

    /// Removes exactly one page. Children keep their dangling `parent_id`.
    pub fn delete_page(&mut self, id: &PageId) {
        let before = self.pages.len();
        self.pages.retain(|page| &page.id != id);
        if self.pages.len() == before {
            debug!("event=page_delete module=store status=skipped reason=not_found page_id={id}");
            return;
        }
        debug!(
            "event=page_delete module=store status=ok page_id={id} is_root={}",
            id.is_root()
        );
        self.commit();
    }

    /// Re-parents one page. No cycle check is performed.
    ///
    /// Returns `true` when the parent actually changed.
    pub fn move_page(&mut self, id: &PageId, new_parent_id: Option<PageId>) -> bool {
        self.update_page(id, [PageUpdate::Parent(new_parent_id)])
    }

    /// Registers an observer called with the full list after each mutation.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&[Page]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes an observer. Returns `false` when the handle is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(current, _)| *current != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self) {
        self.revision += 1;
        let pages = self.pages.as_slice();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(pages);
        }
    }
}
