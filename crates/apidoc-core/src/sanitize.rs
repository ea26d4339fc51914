use std::borrow::Cow;

/// Escapes text content (`&`, `<`, `>`).
pub fn escape_text(text: &str) -> Cow<'_, str> {
    htmlize::escape_text(text)
}

/// Escapes a double-quoted attribute value (`&`, `<`, `>`, `"`).
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    htmlize::escape_attribute(text)
}

/// Converts an arbitrary string into a conservative element `id` token, so several
/// generated fragments can live in one document without id collisions.
///
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `a-` when needed
pub fn sanitize_scope_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "a-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.insert_str(0, "a-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "a" {
        return "a-untitled".to_string();
    }
    out.to_string()
}
