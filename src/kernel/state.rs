use serde::{Deserialize, Serialize};
use std::fmt;

use super::code::{CodeAction, CodeBuffer};
use super::Action;

/// Opaque project identifier, stored as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub code: CodeBuffer,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: CodeBuffer::default(),
        }
    }
}

/// The `{html, css, js}` triple handed to the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSource {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl From<&CodeBuffer> for PreviewSource {
    fn from(code: &CodeBuffer) -> Self {
        Self {
            html: code.html.clone(),
            css: code.css.clone(),
            js: code.javascript.clone(),
        }
    }
}

/// Snapshot written to the persistent store after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub projects: Vec<Project>,
    pub current_project_id: Option<ProjectId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub current_project_id: Option<ProjectId>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project_id
            .as_ref()
            .and_then(|id| self.project(id))
    }

    /// Code of the selected project. A dangling or missing selection yields
    /// an empty buffer.
    pub fn current_code(&self) -> CodeBuffer {
        self.current_project()
            .map(|p| p.code.clone())
            .unwrap_or_default()
    }

    pub fn preview_source(&self) -> PreviewSource {
        self.current_project()
            .map(|p| PreviewSource::from(&p.code))
            .unwrap_or_default()
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            projects: self.projects.clone(),
            current_project_id: self.current_project_id.clone(),
        }
    }

    /// Applies one action in place; returns whether anything changed.
    ///
    /// Actions referring to unknown projects leave the state untouched.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::CreateProject { id, name } => {
                self.projects.push(Project::new(id, name));
                true
            }
            Action::DeleteProject(id) => {
                let before = self.projects.len();
                self.projects.retain(|p| p.id != id);
                self.projects.len() != before
            }
            Action::SelectProject(id) => {
                if self.current_project_id.as_ref() == Some(&id) {
                    return false;
                }
                self.current_project_id = Some(id);
                true
            }
            Action::RenameProject { id, name } => match self.project_mut(&id) {
                Some(project) if project.name != name => {
                    project.name = name;
                    true
                }
                _ => false,
            },
            Action::DuplicateProject { id, new_id } => {
                let Some(source) = self.project(&id) else {
                    return false;
                };
                let copy = Project {
                    id: new_id,
                    name: format!("{} (Copy)", source.name),
                    code: source.code.clone(),
                };
                self.projects.push(copy);
                true
            }
            Action::InitProject(project) | Action::ImportProject(project) => {
                self.projects.push(project);
                true
            }
            Action::Code(code_action) => self.apply_code(code_action),
        }
    }

    fn apply_code(&mut self, action: CodeAction) -> bool {
        let Some(id) = self.current_project_id.clone() else {
            return false;
        };
        match self.project_mut(&id) {
            Some(project) => project.code.apply(action),
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
