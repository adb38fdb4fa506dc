//! Single-user wiki session.
//!
//! # Responsibility
//! - Own the page store and the editor binding for one UI.
//! - Track the selected page and keep the editor bound to it.
//! - Dispatch surface change events back into the store.
//!
//! # Invariants
//! - The session starts with the root page selected.
//! - Deleting the selected page keeps it selected; the editor then shows
//!   empty content and further edits are dropped.

use crate::config::WikiConfig;
use crate::editor::binding::EditorBinding;
use crate::editor::image::{FileInput, ImageLoadError};
use crate::editor::surface::{ContentChange, EditSurface, HtmlSurface};
use crate::model::page::{Page, PageId, PageUpdate};
use crate::service::tree_view::{outline, OutlineRow};
use crate::store::page_store::{PageStore, SubscriptionId};
use log::info;

/// Wiki session facade over store and editor.
pub struct WikiSession<S: EditSurface> {
    store: PageStore,
    binding: EditorBinding<S>,
    selected: PageId,
}

impl WikiSession<HtmlSurface> {
    /// Replaces the selected page's document, as a select-all paste would.
    ///
    /// Returns whether the store content changed.
    pub fn edit_content(&mut self, html: &str) -> bool {
        match self.surface_mut().replace_all(html) {
            Some(change) => self.dispatch(change),
            None => false,
        }
    }
}

impl<S: EditSurface> WikiSession<S> {
    /// Creates a session over a freshly seeded store.
    pub fn new(surface: S) -> Self {
        Self::with_store(PageStore::new(), surface)
    }

    /// Creates a session whose root page follows `config`.
    pub fn from_config(config: &WikiConfig, surface: S) -> Self {
        Self::with_store(PageStore::from_config(config), surface)
    }

    /// Creates a session over an existing store and selects the root page.
    pub fn with_store(store: PageStore, surface: S) -> Self {
        let mut binding = EditorBinding::new(surface);
        let selected = PageId::root();
        binding.load(&store, &selected);
        info!(
            "event=session_start module=session status=ok pages={}",
            store.len()
        );
        Self {
            store,
            binding,
            selected,
        }
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn pages(&self) -> &[Page] {
        self.store.pages()
    }

    pub fn binding(&self) -> &EditorBinding<S> {
        &self.binding
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.binding.surface_mut()
    }

    pub fn selected_page_id(&self) -> &PageId {
        &self.selected
    }

    /// Selected page, if it still exists.
    pub fn current_page(&self) -> Option<&Page> {
        self.store.page(&self.selected)
    }

    /// Tree-view rows for the current collection.
    pub fn outline(&self) -> Vec<OutlineRow<'_>> {
        outline(self.store.pages())
    }

    /// Registers a store observer.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&[Page]) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    /// Selects a page and loads it into the editor. Returns its content.
    pub fn select_page(&mut self, page_id: &PageId) -> String {
        self.selected = page_id.clone();
        self.binding.load(&self.store, page_id)
    }

    /// Replaces the selected page's title, as typed in the title field.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.store
            .update_page(&self.selected, [PageUpdate::Title(title.into())]);
    }

    /// Creates a page and returns its id. Selection is unchanged.
    pub fn create_page(&mut self, title: impl Into<String>, parent_id: Option<PageId>) -> PageId {
        self.store.add_page(title, parent_id)
    }

    pub fn delete_page(&mut self, page_id: &PageId) {
        self.store.delete_page(page_id);
    }

    pub fn move_page(&mut self, page_id: &PageId, new_parent_id: Option<PageId>) {
        self.store.move_page(page_id, new_parent_id);
    }

    /// Routes one surface change event into the store.
    pub fn dispatch(&mut self, change: ContentChange) -> bool {
        self.binding.on_content_changed(&mut self.store, change)
    }

    /// Inserts a table into the selected page. Returns whether it was stored.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> bool {
        match self.binding.insert_table(rows, cols) {
            Some(change) => self.dispatch(change),
            None => false,
        }
    }

    /// Inserts an image into the selected page. Returns whether it was stored.
    pub fn insert_image(&mut self, source: &str) -> bool {
        match self.binding.insert_image(source) {
            Some(change) => self.dispatch(change),
            None => false,
        }
    }

    /// Reads the picked file and inserts it as an image.
    ///
    /// The input is cleared whatever the outcome.
    ///
    /// # Errors
    /// - Returns the read failure as a recoverable warning.
    pub fn insert_image_file(&mut self, input: &mut FileInput) -> Result<bool, ImageLoadError> {
        Ok(match self.binding.insert_image_file(input)? {
            Some(change) => self.dispatch(change),
            None => false,
        })
    }
}
