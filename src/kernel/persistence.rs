//! Persisted layout and hydration.
//!
//! Key `projects` holds `[{id, name, code: {html, css, javascript, error}}]`
//! in insertion order; key `currentProjectId` holds the selected id.

use serde_json::Value;

use super::services::ports::{KeyValueStore, StoreResult};
use super::state::{PersistedState, ProjectId};
use super::Action;

pub const PROJECTS_KEY: &str = "projects";
pub const CURRENT_PROJECT_KEY: &str = "currentProjectId";

pub fn write_snapshot(store: &dyn KeyValueStore, snapshot: &PersistedState) -> StoreResult<()> {
    store.set(PROJECTS_KEY, serde_json::to_value(&snapshot.projects)?)?;
    let current = match &snapshot.current_project_id {
        Some(id) => Value::String(id.to_string()),
        None => Value::Null,
    };
    store.set(CURRENT_PROJECT_KEY, current)
}

pub fn read_snapshot(store: &dyn KeyValueStore) -> StoreResult<PersistedState> {
    let projects = match store.get(PROJECTS_KEY)? {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value(value)?,
    };
    let current_project_id = match store.get(CURRENT_PROJECT_KEY)? {
        Some(Value::String(id)) => Some(ProjectId::new(id)),
        _ => None,
    };
    Ok(PersistedState {
        projects,
        current_project_id,
    })
}

/// Reads the persisted state; unreadable storage counts as empty.
pub fn load(store: &dyn KeyValueStore) -> PersistedState {
    read_snapshot(store).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read persisted projects");
        PersistedState {
            projects: Vec::new(),
            current_project_id: None,
        }
    })
}

/// Actions that rebuild an application state from a persisted snapshot.
///
/// With nothing persisted, a single default project is created and selected.
/// Otherwise every project is restored through `InitProject`, and the
/// persisted selection wins over the first project.
pub fn hydration_actions(persisted: PersistedState, default_name: &str) -> Vec<Action> {
    if persisted.projects.is_empty() {
        let id = ProjectId::generate();
        return vec![
            Action::CreateProject {
                id: id.clone(),
                name: default_name.to_string(),
            },
            Action::SelectProject(id),
        ];
    }

    let selected = persisted
        .current_project_id
        .or_else(|| persisted.projects.first().map(|p| p.id.clone()));

    let mut actions: Vec<Action> = persisted
        .projects
        .into_iter()
        .map(Action::InitProject)
        .collect();
    if let Some(id) = selected {
        actions.push(Action::SelectProject(id));
    }
    actions
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/persistence.rs"]
mod tests;
