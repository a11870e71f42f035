use super::*;
use crate::kernel::code::{CodeAction, Diagnostic, Severity};
use crate::kernel::services::adapters::MemoryStore;
use crate::kernel::state::{AppState, Project};
use crate::kernel::store::reduce;

fn sample_state() -> AppState {
    let mut state = AppState::new();
    for (id, name) in [("a", "Alpha"), ("b", "Beta"), ("c", "Alpha")] {
        state.apply(Action::CreateProject {
            id: ProjectId::new(id),
            name: name.to_string(),
        });
    }
    state.apply(Action::SelectProject(ProjectId::new("b")));
    state.apply(Action::Code(CodeAction::SetHtml("<div>hi</div>".into())));
    state.apply(Action::Code(CodeAction::SetJs("console.log(1)".into())));
    state.apply(Action::Code(CodeAction::SetError("first".into())));
    state.apply(Action::Code(CodeAction::Report(Diagnostic::new(
        Severity::Error,
        "boom",
    ))));
    state
}

fn rehydrate(store: &MemoryStore) -> AppState {
    hydration_actions(load(store), "Untitled")
        .into_iter()
        .fold(AppState::new(), reduce)
}

#[test]
fn test_round_trip_reproduces_state() {
    let store = MemoryStore::new();
    let state = sample_state();
    write_snapshot(&store, &state.persisted()).unwrap();

    let restored = rehydrate(&store);
    assert_eq!(restored, state);
    let ids: Vec<&str> = restored.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_layout_uses_documented_keys() {
    let store = MemoryStore::new();
    write_snapshot(&store, &sample_state().persisted()).unwrap();

    let projects = store.get(PROJECTS_KEY).unwrap().unwrap();
    assert_eq!(projects[1]["id"], serde_json::json!("b"));
    assert_eq!(projects[1]["code"]["html"], serde_json::json!("<div>hi</div>"));
    assert_eq!(
        projects[1]["code"]["error"],
        serde_json::json!("first\n<span style=\"color: red;\">boom</span>")
    );
    assert_eq!(
        store.get(CURRENT_PROJECT_KEY).unwrap(),
        Some(serde_json::json!("b"))
    );
}

#[test]
fn test_empty_store_synthesizes_selected_default_project() {
    let store = MemoryStore::new();
    let state = rehydrate(&store);
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].name, "Untitled");
    assert_eq!(state.current_project_id, Some(state.projects[0].id.clone()));
}

#[test]
fn test_missing_current_id_selects_first_project() {
    let store = MemoryStore::new();
    let projects = vec![
        Project::new(ProjectId::new("x"), "X"),
        Project::new(ProjectId::new("y"), "Y"),
    ];
    store
        .set(PROJECTS_KEY, serde_json::to_value(&projects).unwrap())
        .unwrap();

    let state = rehydrate(&store);
    assert_eq!(state.current_project_id, Some(ProjectId::new("x")));
    assert_eq!(state.projects, projects);
}

#[test]
fn test_null_current_id_selects_first_project() {
    let store = MemoryStore::new();
    let snapshot = PersistedState {
        projects: vec![Project::new(ProjectId::new("x"), "X")],
        current_project_id: None,
    };
    write_snapshot(&store, &snapshot).unwrap();
    assert_eq!(store.get(CURRENT_PROJECT_KEY).unwrap(), Some(Value::Null));

    let state = rehydrate(&store);
    assert_eq!(state.current_project_id, Some(ProjectId::new("x")));
}

#[test]
fn test_unreadable_projects_fall_back_to_default() {
    let store = MemoryStore::new();
    store
        .set(PROJECTS_KEY, serde_json::json!({ "not": "a list" }))
        .unwrap();
    assert!(read_snapshot(&store).is_err());

    let state = rehydrate(&store);
    assert_eq!(state.projects.len(), 1);
}
