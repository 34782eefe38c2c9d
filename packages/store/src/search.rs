//! Search query handling shared by every store backend.
//!
//! User input is reduced to ASCII letters, digits and spaces before it reaches a
//! backend. The result is matched as a case-insensitive substring of a note's
//! title or content.

/// Strip everything outside `[a-zA-Z0-9 ]` and trim. `None` when nothing is left.
pub fn sanitize_query(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Case-insensitive substring test used by the in-memory backend.
pub(crate) fn matches(needle_lower: &str, title: &str, content: Option<&str>) -> bool {
    title.to_lowercase().contains(needle_lower)
        || content.is_some_and(|c| c.to_lowercase().contains(needle_lower))
}
