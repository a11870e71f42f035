use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    /// Parses the `type` tag of a message posted by the preview surface.
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "ERROR" => Some(Self::Error),
            "WARN" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            _ => None,
        }
    }

    pub fn wire_tag(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Error => "red",
            Self::Warn => "orange",
            Self::Info => "blue",
            Self::Debug => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub at: SystemTime,
    pub severity: Severity,
    pub message: String,
    pub stack: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            at: SystemTime::now(),
            severity,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }

    /// Console line for this record: the message wrapped in a colored span.
    pub fn render(&self) -> String {
        format!(
            "<span style=\"color: {};\">{}</span>",
            self.severity.color(),
            self.message
        )
    }
}

#[derive(Debug, Clone)]
pub enum LogEntry {
    /// Plain text appended through `SetError` or restored from storage.
    Raw(String),
    Record(Diagnostic),
}

impl LogEntry {
    fn render(&self) -> String {
        match self {
            Self::Raw(text) => text.clone(),
            Self::Record(diagnostic) => diagnostic.render(),
        }
    }
}

/// Append-only console log of one project.
///
/// Entries stay discrete internally; [`DiagnosticLog::render`] produces the
/// newline-joined text shown by the console panel and written to storage.
/// Two logs compare equal when they render to the same text.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<LogEntry>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter_map(|entry| match entry {
            LogEntry::Record(diagnostic) => Some(diagnostic),
            LogEntry::Raw(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push_raw(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::Raw(text.into()));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(LogEntry::Record(diagnostic));
    }

    pub fn render(&self) -> String {
        // An empty accumulated text takes the next entry without a separator.
        let mut out = String::new();
        for entry in &self.entries {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&entry.render());
        }
        out
    }
}

impl PartialEq for DiagnosticLog {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl Eq for DiagnosticLog {}

impl Serialize for DiagnosticLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for DiagnosticLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        let mut log = DiagnosticLog::new();
        if !text.is_empty() {
            log.push_raw(text);
        }
        Ok(log)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/code/diagnostics.rs"]
mod tests;
