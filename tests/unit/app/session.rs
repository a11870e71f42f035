use super::*;
use crate::kernel::persistence::{read_snapshot, write_snapshot};
use crate::kernel::services::adapters::{MemoryBlobRegistry, MemoryStore, RecordingSurface};
use crate::kernel::services::ports::surface_channel;
use crate::kernel::{PersistedState, Project};
use serde_json::json;

type TestSession = Session<MemoryBlobRegistry, RecordingSurface>;

fn open_with(store: Arc<MemoryStore>) -> TestSession {
    let (sender, receiver) = surface_channel();
    let sandbox = PreviewSandbox::new(
        Arc::new(MemoryBlobRegistry::new()),
        RecordingSurface::new(sender),
    );
    Session::open(store, sandbox, receiver, "Untitled").unwrap()
}

fn open_fresh() -> (TestSession, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (open_with(store.clone()), store)
}

#[test]
fn test_open_empty_store_creates_default_project() {
    let (mut session, store) = open_fresh();
    assert_eq!(session.state().projects.len(), 1);
    assert_eq!(session.state().projects[0].name, "Untitled");
    assert!(session.state().current_project().is_some());

    session.flush();
    let persisted = read_snapshot(store.as_ref()).unwrap();
    assert_eq!(persisted.projects, session.state().projects);
}

#[test]
fn test_open_renders_selected_project() {
    let store = Arc::new(MemoryStore::new());
    let mut project = Project::new(ProjectId::new("p"), "Saved");
    project.code.html = "<div>hi</div>".to_string();
    write_snapshot(
        store.as_ref(),
        &PersistedState {
            projects: vec![project],
            current_project_id: Some(ProjectId::new("p")),
        },
    )
    .unwrap();

    let session = open_with(store);
    let ticket = session.sandbox().active().unwrap().clone();
    let doc = session
        .sandbox()
        .registry()
        .resolve_text(&ticket.document)
        .unwrap();
    assert!(doc.contains("<div>hi</div>"));
}

#[test]
fn test_edits_rerender_and_persist() {
    let (mut session, store) = open_fresh();
    let before = session.sandbox().surface().navigations().len();

    assert!(session.edit(Language::JavaScript, "console.log('x')"));
    assert!(session.edit(Language::Css, "body { color: red }"));
    assert_eq!(session.sandbox().surface().navigations().len(), before + 2);
    assert_eq!(session.sandbox().surface().listener_count(), 1);

    session.flush();
    let persisted = read_snapshot(store.as_ref()).unwrap();
    assert_eq!(persisted.projects[0].code.css, "body { color: red }");
}

#[test]
fn test_thrown_error_lands_in_console_once() {
    let (mut session, _store) = open_fresh();
    session.edit(Language::JavaScript, "throw new Error('boom')");

    session
        .sandbox()
        .surface()
        .post(json!({ "type": "ERROR", "message": "boom", "stack": "Error: boom" }))
        .unwrap();

    assert_eq!(session.pump(), 1);
    let console = session.console();
    assert_eq!(console.matches("boom").count(), 1);
    assert_eq!(console, "<span style=\"color: red;\">boom</span>");
    assert_eq!(session.pump(), 0);
}

#[test]
fn test_messages_from_replaced_preview_are_dropped() {
    let (mut session, _store) = open_fresh();
    session.edit(Language::JavaScript, "a()");
    let stale = session.sandbox().active().unwrap().generation;
    for i in 0..5 {
        session.edit(Language::JavaScript, format!("b({})", i));
    }

    session
        .sandbox()
        .surface()
        .post_from(stale, json!({ "type": "ERROR", "message": "stale" }))
        .unwrap();
    assert_eq!(session.pump(), 0);
    assert_eq!(session.console(), "");
}

#[test]
fn test_delete_last_project_is_refused() {
    let (mut session, _store) = open_fresh();
    let only = session.state().projects[0].id.clone();
    assert!(matches!(
        session.delete_project(only),
        Err(SessionError::LastProject)
    ));
    assert_eq!(session.state().projects.len(), 1);
}

#[test]
fn test_delete_with_several_projects() {
    let (mut session, _store) = open_fresh();
    let second = session.create_project("Second");
    session.create_project("Third");

    assert!(session.delete_project(second).unwrap());
    assert!(!session.delete_project(ProjectId::new("nope")).unwrap());
    assert_eq!(session.state().projects.len(), 2);
}

#[test]
fn test_duplicate_and_rename() {
    let (mut session, _store) = open_fresh();
    let original = session.state().projects[0].id.clone();
    session.edit(Language::Html, "<p>x</p>");

    let copy = session.duplicate_project(original.clone()).unwrap();
    assert_ne!(copy, original);
    let project = session.state().project(&copy).unwrap();
    assert_eq!(project.name, "Untitled (Copy)");
    assert_eq!(project.code.html, "<p>x</p>");

    assert!(session.rename_project(copy.clone(), "Fork"));
    assert_eq!(session.state().project(&copy).unwrap().name, "Fork");
    assert!(session.duplicate_project(ProjectId::new("nope")).is_none());
}

#[test]
fn test_state_survives_reopen() {
    let store = Arc::new(MemoryStore::new());
    let (expected, selected) = {
        let mut session = open_with(store.clone());
        let second = session.create_project("Second");
        session.select_project(second.clone());
        session.edit(Language::Html, "<h1>two</h1>");
        session.append_error("note");
        session.flush();
        (session.state().clone(), second)
    };

    let reopened = open_with(store);
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.state().current_project_id, Some(selected));
    assert_eq!(reopened.console(), "note");
}

#[test]
fn test_export_import_round_trip() {
    let (mut session, _store) = open_fresh();
    let original = session.state().projects[0].id.clone();
    session.edit(Language::Css, "a { }");

    let bytes = session.export_project(&original).unwrap();
    let imported = session.import_project(&bytes).unwrap();

    // Same id already exists, so the import gets a fresh one.
    assert_ne!(imported, original);
    let project = session.state().project(&imported).unwrap();
    assert_eq!(project.name, "Untitled");
    assert_eq!(project.code.css, "a { }");
    assert_eq!(session.state().projects.len(), 2);
}

#[test]
fn test_export_unknown_project_fails() {
    let (session, _store) = open_fresh();
    assert!(matches!(
        session.export_project(&ProjectId::new("nope")),
        Err(SessionError::UnknownProject(_))
    ));
}
