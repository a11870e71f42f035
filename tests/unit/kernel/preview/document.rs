use super::*;

#[test]
fn test_guard_wraps_user_code_in_try_catch() {
    let guarded = guard_script("throw new Error('boom')");
    let try_at = guarded.find("try {").unwrap();
    let code_at = guarded.find("throw new Error('boom')").unwrap();
    let catch_at = guarded.find("} catch (error) {").unwrap();
    assert!(try_at < code_at && code_at < catch_at);
    assert!(guarded.contains("window.parent.postMessage"));
    assert!(guarded.contains("type: 'ERROR'"));
    assert!(guarded.contains("message: error.message"));
    assert!(guarded.contains("stack: error.stack"));
}

#[test]
fn test_guard_of_empty_script_is_still_valid_block() {
    let guarded = guard_script("");
    assert!(guarded.starts_with("try {"));
    assert!(guarded.contains("catch (error)"));
}

#[test]
fn test_document_embeds_html_verbatim() {
    let doc = build_document("<div>hi</div>", "blob:mocode/css", "blob:mocode/js");
    assert!(doc.contains("<div>hi</div>"));
    assert!(doc.contains(r#"href="blob:mocode/css""#));
    assert!(doc.contains(r#"<script src="blob:mocode/js"></script>"#));
}

#[test]
fn test_document_has_one_link_and_one_script() {
    let doc = build_document("<p>plain</p>", "u1", "u2");
    assert_eq!(doc.matches("<link").count(), 1);
    assert_eq!(doc.matches("<script").count(), 1);
    assert_eq!(doc.matches("<style").count(), 0);
}

#[test]
fn test_document_script_follows_markup() {
    let doc = build_document("<canvas id=\"c\"></canvas>", "u1", "u2");
    let markup_at = doc.find("<canvas").unwrap();
    let script_at = doc.find("<script").unwrap();
    assert!(markup_at < script_at);
}

#[test]
fn test_error_hook_reports_to_host_and_self() {
    assert!(ERROR_HOOK_SCRIPT.starts_with("window.onerror"));
    assert!(ERROR_HOOK_SCRIPT.contains("window.parent.postMessage(payload, '*')"));
    assert!(ERROR_HOOK_SCRIPT.contains("window.postMessage(payload, '*')"));
    assert!(ERROR_HOOK_SCRIPT.contains("type: 'ERROR'"));
}
