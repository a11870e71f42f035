//! Per-project source buffers and the console log.

mod action;
mod buffer;
mod diagnostics;

pub use action::{CodeAction, CodeActionKind, Language};
pub use buffer::CodeBuffer;
pub use diagnostics::{Diagnostic, DiagnosticLog, LogEntry, Severity};

#[cfg(test)]
#[path = "../../../tests/unit/kernel/code/buffer.rs"]
mod tests;
