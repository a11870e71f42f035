//! Preview sandbox: document synthesis, blob lifetime, diagnostic relay.

pub mod document;
mod protocol;
mod sandbox;

pub use document::{build_document, guard_script, ERROR_HOOK_SCRIPT};
pub use protocol::{parse_message, UncaughtError};
pub use sandbox::{PreviewError, PreviewSandbox, RenderTicket};
