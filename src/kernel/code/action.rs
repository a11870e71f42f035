use super::Diagnostic;

/// Source languages held by a code buffer, one editor per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Html,
    Css,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Html, Language::Css, Language::JavaScript];
}

#[derive(Debug, Clone)]
pub enum CodeAction {
    SetHtml(String),
    SetCss(String),
    SetJs(String),
    /// Appends a plain line to the console log.
    SetError(String),
    /// Appends a structured diagnostic relayed from the preview.
    Report(Diagnostic),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeActionKind {
    SetHtml,
    SetCss,
    SetJs,
    SetError,
    Report,
}

impl CodeAction {
    /// Edit action for the editor bound to `language`.
    pub fn edit(language: Language, text: String) -> Self {
        match language {
            Language::Html => Self::SetHtml(text),
            Language::Css => Self::SetCss(text),
            Language::JavaScript => Self::SetJs(text),
        }
    }

    pub fn kind(&self) -> CodeActionKind {
        match self {
            Self::SetHtml(_) => CodeActionKind::SetHtml,
            Self::SetCss(_) => CodeActionKind::SetCss,
            Self::SetJs(_) => CodeActionKind::SetJs,
            Self::SetError(_) => CodeActionKind::SetError,
            Self::Report(_) => CodeActionKind::Report,
        }
    }
}
