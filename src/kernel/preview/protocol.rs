//! Cross-frame message protocol: `{type, message, stack?}`.

use serde::Deserialize;

use crate::kernel::code::{Diagnostic, Severity};

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    message: serde_json::Value,
    #[serde(default)]
    stack: Option<String>,
}

/// Parses a posted payload. Unknown `type` tags and malformed payloads are
/// not part of the protocol and yield `None`.
pub fn parse_message(data: &serde_json::Value) -> Option<Diagnostic> {
    let wire = WireMessage::deserialize(data).ok()?;
    let severity = Severity::from_wire(&wire.kind)?;
    Some(Diagnostic::new(severity, message_text(&wire.message)).with_stack(wire.stack))
}

/// Strings pass through unquoted; other values use their JSON text.
fn message_text(message: &serde_json::Value) -> String {
    match message {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A browser-level error event: `{message, source, line, column, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncaughtError {
    pub message: String,
    pub source: String,
    pub line: u32,
    pub column: u32,
    pub error: Option<String>,
}

impl UncaughtError {
    pub fn format(&self) -> String {
        let mut text = format!(
            "{}\n  at {}:{}:{}",
            self.message, self.source, self.line, self.column
        );
        if let Some(stack) = self.error.as_deref().filter(|s| !s.is_empty()) {
            text.push('\n');
            text.push_str(stack);
        }
        text
    }

    /// Payload the error hook posts to the host for this event.
    pub fn to_message(&self) -> serde_json::Value {
        serde_json::json!({
            "type": Severity::Error.wire_tag(),
            "message": self.format(),
            "stack": self.error,
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/preview/protocol.rs"]
mod tests;
