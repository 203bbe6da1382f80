//! Classification of attribute values into local file references and everything else.

use std::sync::OnceLock;

use regex::Regex;

/// Values that never name a file relative to the document: URLs with a
/// scheme, protocol-relative URLs, and absolute filesystem paths.
fn non_local_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    return PATTERNS
        .get_or_init(|| {
            return vec![
                // Scheme: `http:`, `mailto:`, `data:`, `javascript:`, `C:` drive letters.
                Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"),
                // Protocol-relative and absolute paths, either separator.
                Regex::new(r"^[/\\]").expect("valid absolute path regex"),
            ];
        })
        .as_slice();
}

/// Whether an attribute value is a candidate for case correction.
///
/// Only non-empty, filesystem-relative references qualify. A value made of
/// nothing but a query or fragment (`#top`, `?page=2`) has no path to resolve.
pub fn is_local_reference(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    if non_local_patterns().iter().any(|p| return p.is_match(value)) {
        return false;
    }
    let (path, _) = split_path_and_suffix(value);
    return !path.is_empty();
}

/// Split a reference into the path used for lookup and the `?query`/`#fragment`
/// suffix that is carried over verbatim.
pub fn split_path_and_suffix(value: &str) -> (&str, &str) {
    return match value.find(['?', '#']) {
        Some(idx) => value.split_at(idx),
        None => (value, ""),
    };
}

/// Split off the ASCII whitespace browsers strip from URL attributes, returning
/// `(leading, reference, trailing)`. The outer parts are carried over verbatim.
pub fn split_surrounding_whitespace(value: &str) -> (&str, &str, &str) {
    let is_html_ws = |c: char| return matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ');
    let start = value.len().saturating_sub(value.trim_start_matches(is_html_ws).len());
    let (leading, rest) = value.split_at(start);
    let inner = rest.trim_end_matches(is_html_ws);
    let (inner, trailing) = rest.split_at(inner.len());
    return (leading, inner, trailing);
}
