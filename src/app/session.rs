use std::io;
use std::sync::Arc;

use crate::kernel::code::{CodeAction, Language};
use crate::kernel::persistence::{hydration_actions, load};
use crate::kernel::services::adapters::{PersistMessage, PersistenceService};
use crate::kernel::services::ports::{BlobRegistry, ExecutionSurface, KeyValueStore, SurfaceReceiver};
use crate::kernel::transfer::{export_project, import_project, TransferError};
use crate::kernel::{
    reduce, Action, AppState, Effect, PreviewError, PreviewSandbox, ProjectId, Store,
};

#[derive(Debug)]
pub enum SessionError {
    /// The last remaining project cannot be deleted.
    LastProject,
    UnknownProject(ProjectId),
    Transfer(TransferError),
    Preview(PreviewError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::LastProject => write!(f, "You cannot delete the last project"),
            SessionError::UnknownProject(id) => write!(f, "Unknown project: {}", id),
            SessionError::Transfer(e) => write!(f, "{}", e),
            SessionError::Preview(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<TransferError> for SessionError {
    fn from(e: TransferError) -> Self {
        SessionError::Transfer(e)
    }
}

impl From<PreviewError> for SessionError {
    fn from(e: PreviewError) -> Self {
        SessionError::Preview(e)
    }
}

/// Owns the project store, the preview sandbox and the persistence writer,
/// and executes the effects every dispatch produces.
pub struct Session<B: BlobRegistry, S: ExecutionSurface> {
    store: Store,
    sandbox: PreviewSandbox<B, S>,
    persistence: PersistenceService,
    messages: SurfaceReceiver,
}

impl<B: BlobRegistry, S: ExecutionSurface> Session<B, S> {
    /// Hydrates from `backend` and renders the selected project.
    pub fn open(
        backend: Arc<dyn KeyValueStore>,
        sandbox: PreviewSandbox<B, S>,
        messages: SurfaceReceiver,
        default_project_name: &str,
    ) -> io::Result<Self> {
        let persisted = load(backend.as_ref());
        let synthesized = persisted.projects.is_empty();
        let state = hydration_actions(persisted, default_project_name)
            .into_iter()
            .fold(AppState::new(), reduce);
        tracing::info!(
            projects = state.projects.len(),
            current = ?state.current_project_id,
            "session hydrated"
        );

        let mut session = Self {
            store: Store::new(state),
            sandbox,
            persistence: PersistenceService::new(backend)?,
            messages,
        };
        if synthesized {
            session.persistence.persist(session.store.state().persisted());
        }
        if let Err(e) = session.render_current() {
            tracing::error!(error = %e, "initial preview render failed");
        }
        Ok(session)
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn sandbox(&self) -> &PreviewSandbox<B, S> {
        &self.sandbox
    }

    pub fn sandbox_mut(&mut self) -> &mut PreviewSandbox<B, S> {
        &mut self.sandbox
    }

    /// Rendered console text of the selected project.
    pub fn console(&self) -> String {
        self.state().current_code().error.render()
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.run_effect(effect);
        }
        result.state_changed
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Persist(snapshot) => {
                self.persistence.persist(snapshot);
            }
            Effect::RenderPreview(source) => {
                if let Err(e) = self.sandbox.render(&source) {
                    tracing::error!(error = %e, "preview render failed");
                }
            }
        }
    }

    pub fn render_current(&mut self) -> Result<(), PreviewError> {
        let source = self.state().preview_source();
        self.sandbox.render(&source)?;
        Ok(())
    }

    /// Drains messages posted by the preview and appends the accepted ones
    /// to the selected project's console. Returns how many were accepted.
    pub fn pump(&mut self) -> usize {
        let mut accepted = 0;
        while let Ok(message) = self.messages.try_recv() {
            if let Some(diagnostic) = self.sandbox.receive(&message) {
                self.dispatch(CodeAction::Report(diagnostic).into());
                accepted += 1;
            }
        }

        while let Ok(msg) = self.persistence.try_recv() {
            if let PersistMessage::Saved { generation } = msg {
                tracing::trace!(generation, "projects persisted");
            }
        }
        accepted
    }

    pub fn create_project(&mut self, name: impl Into<String>) -> ProjectId {
        let id = ProjectId::generate();
        self.dispatch(Action::CreateProject {
            id: id.clone(),
            name: name.into(),
        });
        id
    }

    pub fn select_project(&mut self, id: ProjectId) -> bool {
        self.dispatch(Action::SelectProject(id))
    }

    pub fn rename_project(&mut self, id: ProjectId, name: impl Into<String>) -> bool {
        self.dispatch(Action::RenameProject {
            id,
            name: name.into(),
        })
    }

    pub fn duplicate_project(&mut self, id: ProjectId) -> Option<ProjectId> {
        let new_id = ProjectId::generate();
        self.dispatch(Action::DuplicateProject {
            id,
            new_id: new_id.clone(),
        })
        .then_some(new_id)
    }

    /// Deletes a project unless it is the last one. Unknown ids are a no-op.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<bool, SessionError> {
        if self.state().projects.len() <= 1 {
            return Err(SessionError::LastProject);
        }
        Ok(self.dispatch(Action::DeleteProject(id)))
    }

    pub fn edit(&mut self, language: Language, text: impl Into<String>) -> bool {
        self.dispatch(CodeAction::edit(language, text.into()).into())
    }

    pub fn append_error(&mut self, line: impl Into<String>) -> bool {
        self.dispatch(CodeAction::SetError(line.into()).into())
    }

    pub fn export_project(&self, id: &ProjectId) -> Result<Vec<u8>, SessionError> {
        let project = self
            .state()
            .project(id)
            .ok_or_else(|| SessionError::UnknownProject(id.clone()))?;
        Ok(export_project(project)?)
    }

    /// Imports a project archive; an id already in use is replaced by a
    /// fresh one.
    pub fn import_project(&mut self, bytes: &[u8]) -> Result<ProjectId, SessionError> {
        let mut project = import_project(bytes)?;
        if self.state().project(&project.id).is_some() {
            project.id = ProjectId::generate();
        }
        let id = project.id.clone();
        self.dispatch(Action::ImportProject(project));
        Ok(id)
    }

    /// Blocks until queued persistence writes have settled.
    pub fn flush(&mut self) {
        self.persistence.flush();
    }
}

impl<B: BlobRegistry, S: ExecutionSurface> Drop for Session<B, S> {
    fn drop(&mut self) {
        self.persistence.flush();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/session.rs"]
mod tests;
