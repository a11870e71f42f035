//! Headless application core (state/action/effect).

pub mod action;
pub mod code;
pub mod effect;
pub mod persistence;
pub mod preview;
pub mod services;
pub mod state;
pub mod store;
pub mod transfer;

pub use action::Action;
pub use code::{CodeAction, CodeBuffer, Diagnostic, DiagnosticLog, Language, Severity};
pub use effect::Effect;
pub use preview::{PreviewError, PreviewSandbox, RenderTicket};
pub use state::{AppState, PersistedState, PreviewSource, Project, ProjectId};
pub use store::{reduce, DispatchResult, Store};
