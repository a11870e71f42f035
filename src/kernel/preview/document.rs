//! Preview document synthesis.

/// Global `onerror` hook the host installs on every loaded document.
///
/// Formats `{message, source, line, column, error}` like
/// [`super::UncaughtError::format`], reports it to the host as `ERROR`, and
/// re-posts the same text into the document itself.
pub const ERROR_HOOK_SCRIPT: &str = r#"window.onerror = function (message, source, line, column, error) {
  var text = message + '\n  at ' + source + ':' + line + ':' + column;
  if (error && error.stack) {
    text += '\n' + error.stack;
  }
  var payload = { type: 'ERROR', message: text, stack: error && error.stack };
  window.parent.postMessage(payload, '*');
  window.postMessage(payload, '*');
  return true;
};"#;

/// Wraps user script so a thrown exception is posted to the host frame
/// instead of surfacing only in the preview's own console.
pub fn guard_script(js: &str) -> String {
    format!(
        r#"try {{
{js}
}} catch (error) {{
  window.parent.postMessage({{
    type: 'ERROR',
    message: error.message,
    stack: error.stack
  }}, '*');
}}
"#
    )
}

/// Standalone document: one stylesheet link, the user's markup verbatim,
/// one script reference.
pub fn build_document(html: &str, css_url: &str, js_url: &str) -> String {
    format!(
        r#"<html>
  <head>
    <meta charset="utf-8" />
    <link rel="stylesheet" type="text/css" href="{css_url}" />
  </head>
  <body>
{html}
    <script src="{js_url}"></script>
  </body>
</html>
"#
    )
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/preview/document.rs"]
mod tests;
