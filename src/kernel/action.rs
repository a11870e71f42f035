use super::code::CodeAction;
use super::state::{Project, ProjectId};

#[derive(Debug, Clone)]
pub enum Action {
    CreateProject {
        id: ProjectId,
        name: String,
    },
    DeleteProject(ProjectId),
    SelectProject(ProjectId),
    RenameProject {
        id: ProjectId,
        name: String,
    },
    DuplicateProject {
        id: ProjectId,
        new_id: ProjectId,
    },
    /// Restores a complete project during hydration, keeping its id.
    InitProject(Project),
    ImportProject(Project),
    /// Edits the code buffer of the selected project.
    Code(CodeAction),
}

impl From<CodeAction> for Action {
    fn from(action: CodeAction) -> Self {
        Action::Code(action)
    }
}
