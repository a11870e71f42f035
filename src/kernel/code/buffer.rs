use serde::{Deserialize, Serialize};

use super::{CodeAction, DiagnosticLog, Language};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBuffer {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub javascript: String,
    #[serde(default)]
    pub error: DiagnosticLog,
}

impl CodeBuffer {
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Html => &self.html,
            Language::Css => &self.css,
            Language::JavaScript => &self.javascript,
        }
    }

    /// Applies a code action; returns whether the buffer changed.
    pub fn apply(&mut self, action: CodeAction) -> bool {
        match action {
            CodeAction::SetHtml(text) => replace(&mut self.html, text),
            CodeAction::SetCss(text) => replace(&mut self.css, text),
            CodeAction::SetJs(text) => replace(&mut self.javascript, text),
            CodeAction::SetError(line) => {
                self.error.push_raw(line);
                true
            }
            CodeAction::Report(diagnostic) => {
                self.error.push(diagnostic);
                true
            }
        }
    }
}

fn replace(slot: &mut String, text: String) -> bool {
    if *slot == text {
        return false;
    }
    *slot = text;
    true
}
