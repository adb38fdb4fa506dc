//! Binding between one editing surface and one page's content.
//!
//! # Responsibility
//! - Load the selected page into the surface.
//! - Write surface changes back through `PageStore::update_page`, skipping
//!   writes that would not change anything.
//! - Drive image and table insertion on the surface.
//!
//! # Invariants
//! - A change event is written to the page it was issued for, even when the
//!   binding has since switched to another page.
//! - Two identical consecutive change events cause at most one store write.
//! - Insertion without an active page is skipped, never an error.

use crate::editor::image::{is_image_source, FileInput, ImageLoadError};
use crate::editor::surface::{ContentChange, EditSurface};
use crate::editor::table::table_html;
use crate::model::page::{PageId, PageUpdate};
use crate::store::page_store::PageStore;
use log::{debug, warn};

/// Page currently shown in the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActivePage {
    page_id: PageId,
    /// Last content known to be committed to the store for this page.
    committed: String,
}

/// Editor binding over a surface implementation.
pub struct EditorBinding<S: EditSurface> {
    surface: S,
    active: Option<ActivePage>,
}

impl<S: EditSurface> EditorBinding<S> {
    /// Creates a binding with no page loaded.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Id of the page currently bound, if any.
    pub fn active_page_id(&self) -> Option<&PageId> {
        self.active.as_ref().map(|active| &active.page_id)
    }

    /// Binds `page_id` and pushes its content into the surface.
    ///
    /// Returns the loaded content, or an empty string when the page does not
    /// exist. Any uncommitted surface buffer of the previous page is dropped.
    pub fn load(&mut self, store: &PageStore, page_id: &PageId) -> String {
        let content = store
            .page(page_id)
            .map(|page| page.content.clone())
            .unwrap_or_default();
        debug!(
            "event=editor_load module=editor status=ok page_id={} found={}",
            page_id,
            store.contains(page_id)
        );

        self.surface.load(page_id.clone(), &content);
        self.active = Some(ActivePage {
            page_id: page_id.clone(),
            committed: content.clone(),
        });
        content
    }

    /// Detaches the surface from its page.
    pub fn unload(&mut self) {
        self.surface.unload();
        self.active = None;
    }

    /// Handles a change event from the surface.
    ///
    /// Returns `true` only when the store content actually changed.
    pub fn on_content_changed(&mut self, store: &mut PageStore, change: ContentChange) -> bool {
        let ContentChange { page_id, content } = change;

        if let Some(active) = self.active.as_mut().filter(|a| a.page_id == page_id) {
            if active.committed == content {
                return false;
            }
            if !store.contains(&page_id) {
                debug!(
                    "event=content_write module=editor status=skipped reason=not_found page_id={page_id}"
                );
                return false;
            }
            active.committed = content.clone();
            return store.update_page(&page_id, [PageUpdate::Content(content)]);
        }

        // Late event from a page the binding already switched away from.
        match store.page(&page_id) {
            None => {
                debug!(
                    "event=content_write module=editor status=skipped reason=stale_not_found page_id={page_id}"
                );
                false
            }
            Some(page) if page.content == content => false,
            Some(_) => {
                debug!("event=content_write module=editor status=ok stale=true page_id={page_id}");
                store.update_page(&page_id, [PageUpdate::Content(content)])
            }
        }
    }

    /// Inserts an image embed at the cursor and moves the cursor past it.
    ///
    /// Returns the surface's change event; the caller dispatches it to
    /// `on_content_changed`.
    pub fn insert_image(&mut self, source: &str) -> Option<ContentChange> {
        if !is_image_source(source) {
            warn!("event=insert_image module=editor status=skipped reason=invalid_source");
            return None;
        }
        let index = self.insertion_index("insert_image")?;
        let change = self.surface.insert_image(index, source.trim())?;
        self.surface.set_selection(index + 1);
        Some(change)
    }

    /// Reads the picked file and inserts it as an image.
    ///
    /// The file input is cleared whatever the outcome.
    ///
    /// # Errors
    /// - Returns the read failure so callers can show a warning.
    pub fn insert_image_file(
        &mut self,
        input: &mut FileInput,
    ) -> Result<Option<ContentChange>, ImageLoadError> {
        match input.read_data_uri() {
            Ok(source) => Ok(self.insert_image(&source)),
            Err(err) => {
                warn!("event=insert_image module=editor status=error reason=read_failed error={err}");
                Err(err)
            }
        }
    }

    /// Pastes a `rows` x `cols` table of empty cells at the cursor.
    ///
    /// The table is pasted as one block; the cursor ends right after it.
    pub fn insert_table(&mut self, rows: usize, cols: usize) -> Option<ContentChange> {
        let Some(html) = table_html(rows, cols) else {
            debug!(
                "event=insert_table module=editor status=skipped reason=empty_shape rows={rows} cols={cols}"
            );
            return None;
        };
        let index = self.insertion_index("insert_table")?;
        let change = self.surface.paste_html(index, &html)?;
        self.surface.set_selection(index + 1);
        Some(change)
    }

    fn insertion_index(&mut self, event: &str) -> Option<usize> {
        if self.active.is_none() {
            debug!("event={event} module=editor status=skipped reason=no_active_page");
            return None;
        }
        let index = self.surface.focus_selection();
        if index.is_none() {
            debug!("event={event} module=editor status=skipped reason=no_selection");
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::EditorBinding;
    use crate::editor::surface::{ContentChange, EditSurface, HtmlSurface};
    use crate::model::page::{PageId, PageUpdate};
    use crate::store::page_store::PageStore;

    #[test]
    fn load_missing_page_yields_empty_content() {
        let store = PageStore::new();
        let mut binding = EditorBinding::new(HtmlSurface::new());
        let content = binding.load(&store, &PageId::from("missing"));
        assert!(content.is_empty());
        assert_eq!(binding.active_page_id(), Some(&PageId::from("missing")));
    }

    #[test]
    fn change_for_missing_active_page_is_dropped() {
        let mut store = PageStore::new();
        let mut binding = EditorBinding::new(HtmlSurface::new());
        let missing = PageId::from("missing");
        binding.load(&store, &missing);

        let change = binding
            .surface_mut()
            .type_text("x")
            .expect("loaded surface emits changes");
        assert!(!binding.on_content_changed(&mut store, change));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn insertion_without_loaded_page_is_skipped() {
        let mut binding = EditorBinding::new(HtmlSurface::new());
        assert!(binding.insert_table(2, 2).is_none());
        assert!(binding.insert_image("a.png").is_none());
    }

    #[test]
    fn externally_changed_active_page_still_accepts_edits() {
        let mut store = PageStore::new();
        let mut binding = EditorBinding::new(HtmlSurface::new());
        let root = PageId::root();
        binding.load(&store, &root);

        store.update_page(&root, [PageUpdate::content("<p>external</p>")]);
        let change = ContentChange::new(root.clone(), "<p>mine</p>");
        assert!(binding.on_content_changed(&mut store, change));
        assert_eq!(
            store.page(&root).map(|page| page.content.as_str()),
            Some("<p>mine</p>")
        );
    }

    #[test]
    fn change_matching_externally_updated_content_reports_no_write() {
        let mut store = PageStore::new();
        let mut binding = EditorBinding::new(HtmlSurface::new());
        let root = PageId::root();
        binding.load(&store, &root);

        store.update_page(&root, [PageUpdate::content("<p>x</p>")]);
        let revision = store.revision();
        let change = ContentChange::new(root.clone(), "<p>x</p>");
        assert!(!binding.on_content_changed(&mut store, change.clone()));
        assert_eq!(store.revision(), revision);
        assert!(!binding.on_content_changed(&mut store, change));
    }

    #[test]
    fn unload_detaches_surface() {
        let store = PageStore::new();
        let mut binding = EditorBinding::new(HtmlSurface::new());
        binding.load(&store, &PageId::root());
        binding.unload();
        assert!(binding.active_page_id().is_none());
        assert!(binding.surface_mut().focus_selection().is_none());
    }
}
