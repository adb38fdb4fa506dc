use std::cell::RefCell;
use std::rc::Rc;
use wikipad_core::{
    restore_store, FileInput, HtmlSurface, PageId, PageStore, WikiConfig, WikiSession,
};

fn session() -> WikiSession<HtmlSurface> {
    WikiSession::new(HtmlSurface::new())
}

#[test]
fn session_starts_on_root() {
    let session = session();
    assert_eq!(session.selected_page_id(), &PageId::root());
    assert_eq!(session.current_page().unwrap().title, "Welcome");
}

#[test]
fn title_keystrokes_update_selected_page_each_time() {
    let mut session = session();
    let titles = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&titles);
    session.subscribe(move |pages| sink.borrow_mut().push(pages[0].title.clone()));

    for title in ["H", "Ho", "Hom", "Home"] {
        session.set_title(title);
    }

    assert_eq!(*titles.borrow(), vec!["H", "Ho", "Hom", "Home"]);
}

#[test]
fn typing_then_switching_pages_keeps_edits_on_their_pages() {
    let mut session = session();
    let notes = session.create_page("Notes", Some(PageId::root()));

    let root_edit = session.surface_mut().type_text(" Hi").unwrap();
    assert_eq!(session.select_page(&notes), "");
    let notes_edit = session.surface_mut().type_text("todo").unwrap();

    assert!(session.dispatch(notes_edit));
    assert!(session.dispatch(root_edit));

    let root = session.store().page(&PageId::root()).unwrap();
    assert_eq!(root.content, "Welcome to your Wiki! Hi");
    assert_eq!(session.current_page().unwrap().content, "todo");
}

#[test]
fn toolbar_insertions_are_stored_through_the_change_event() {
    let mut session = session();
    let page = session.create_page("Layout", None);
    session.select_page(&page);

    assert!(session.insert_table(2, 3));
    assert!(session.insert_image("img/logo.png"));
    assert!(!session.insert_table(0, 1));

    let content = &session.current_page().unwrap().content;
    assert_eq!(content.matches("<tr>").count(), 2);
    assert!(content.ends_with(r#"<img src="img/logo.png">"#));
}

#[test]
fn insert_image_file_without_selection_reports_warning() {
    let mut session = session();
    let mut input = FileInput::new();
    assert!(session.insert_image_file(&mut input).is_err());
    assert_eq!(session.store().revision(), 0);
}

#[test]
fn deleting_selected_page_drops_later_edits() {
    let mut session = session();
    let page = session.create_page("Scratch", None);
    session.select_page(&page);
    session.delete_page(&page);

    assert!(session.current_page().is_none());
    let change = session.surface_mut().type_text("lost").unwrap();
    assert!(!session.dispatch(change));
    assert_eq!(session.pages().len(), 1);
}

#[test]
fn outline_reflects_moves() {
    let mut session = session();
    let a = session.create_page("A", Some(PageId::root()));
    let b = session.create_page("B", Some(PageId::root()));
    session.move_page(&b, Some(a.clone()));

    let rows = session
        .outline()
        .into_iter()
        .map(|row| (row.page.title.clone(), row.depth))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            ("Welcome".to_string(), 0),
            ("A".to_string(), 1),
            ("B".to_string(), 2)
        ]
    );
}

#[test]
fn config_seeds_root_and_snapshot_restores_session() {
    let config = WikiConfig::from_json_str(r#"{"root_title":"Home","root_content":"<p>x</p>"}"#)
        .unwrap();
    let mut session = WikiSession::from_config(&config, HtmlSurface::new());
    assert_eq!(session.surface_mut().html(), "<p>x</p>");
    session.create_page("Child", Some(PageId::root()));

    let json = wikipad_core::store::snapshot::to_json(session.pages()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[1]["parentId"], "root");
    assert!(value[0]["parentId"].is_null());

    let restored: PageStore = restore_store(&json).unwrap();
    let restored = WikiSession::with_store(restored, HtmlSurface::new());
    assert_eq!(restored.pages(), session.pages());
    assert_eq!(restored.current_page().unwrap().title, "Home");
}

#[test]
fn edit_content_stores_selected_page_document_once() {
    let mut session = session();
    let page = session.create_page("Draft", None);
    session.select_page(&page);
    let writes = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&writes);
    session.subscribe(move |_| *sink.borrow_mut() += 1);

    assert!(session.edit_content("<h1>Plan</h1><p>step one</p>"));
    assert!(!session.edit_content("<h1>Plan</h1><p>step one</p>"));

    assert_eq!(*writes.borrow(), 1);
    assert_eq!(
        session.current_page().unwrap().content,
        "<h1>Plan</h1><p>step one</p>"
    );
    let root = session.store().page(&PageId::root()).unwrap();
    assert_eq!(root.content, "Welcome to your Wiki!");
}

#[test]
fn edit_content_leaves_cursor_at_document_end() {
    let mut session = session();
    assert!(session.edit_content("<p>ab</p>"));
    assert_eq!(session.surface_mut().selection(), Some(2));
    assert!(session.insert_image("x.png"));
    assert_eq!(
        session.current_page().unwrap().content,
        r#"<p>ab<img src="x.png"></p>"#
    );
}
