//! Rewrites mis-cased local references inside one HTML document.

use std::path::Path;

use crate::config::Config;
use crate::filters::{is_local_reference, split_path_and_suffix, split_surrounding_whitespace};
use crate::resolver;
use crate::scanner;
use crate::types::{Correction, FileReference, ReplaceStrategy};

/// Corrected document text plus the corrections that produced it.
#[derive(Debug)]
pub struct Rewrite {
    /// Document text after all corrections were applied.
    pub content: String,
    /// Corrections in document order.
    pub corrections: Vec<Correction>,
}

/// Correct the case of every local `src`/`href` reference in `content`.
///
/// References are resolved relative to the directory containing
/// `document_path`. A reference is corrected only when every path segment
/// resolves and the result differs from what is written; external URLs,
/// absolute paths, and dangling references are left alone. With no
/// corrections the returned content equals the input.
pub fn rewrite(content: &str, document_path: &Path, config: &Config) -> Rewrite {
    let base_dir = document_dir(document_path);
    let corrections: Vec<Correction> = scanner::extract_references(content, &config.attributes)
        .into_iter()
        .filter_map(|reference| return correct_reference(base_dir, reference))
        .collect();

    let content = match config.strategy {
        ReplaceStrategy::Literal => apply_literal(content, &corrections),
        ReplaceStrategy::Span => apply_spans(content, &corrections),
    };

    return Rewrite { content, corrections };
}

/// Directory a document's relative references are resolved against.
fn document_dir(document_path: &Path) -> &Path {
    return document_path
        .parent()
        .filter(|p| return !p.as_os_str().is_empty())
        .unwrap_or_else(|| return Path::new("."));
}

/// Resolve one reference, returning a correction only if its text changes.
/// Surrounding whitespace and the `?query`/`#fragment` suffix are never
/// looked up and are kept verbatim.
fn correct_reference(base_dir: &Path, reference: FileReference) -> Option<Correction> {
    let (leading, value, trailing) = split_surrounding_whitespace(&reference.value);
    if !is_local_reference(value) {
        return None;
    }
    let (path, suffix) = split_path_and_suffix(value);
    let corrected_path = resolver::resolve_relative(base_dir, path)?;
    let corrected = format!("{leading}{corrected_path}{suffix}{trailing}");
    if corrected == reference.value {
        return None;
    }

    return Some(Correction {
        attribute: reference.attribute,
        corrected,
        original: reference.value,
        span: reference.span,
    });
}

/// Replace exactly the scanned value spans; every other byte is copied as is.
/// Spans must be in document order and must not overlap.
fn apply_spans(content: &str, corrections: &[Correction]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut copied_up_to = 0_usize;

    for correction in corrections {
        let Some(before) = content.get(copied_up_to..correction.span.start) else {
            continue;
        };
        out.push_str(before);
        out.push_str(&correction.corrected);
        copied_up_to = correction.span.end;
    }
    out.push_str(content.get(copied_up_to..).unwrap_or_default());

    return out;
}

/// Replace every occurrence of each original value anywhere in the document,
/// including comments and text. The first correction recorded for a given
/// original value decides its replacement.
fn apply_literal(content: &str, corrections: &[Correction]) -> String {
    let mut out = content.to_string();
    let mut applied: Vec<&str> = Vec::new();

    for correction in corrections {
        if applied.contains(&correction.original.as_str()) {
            continue;
        }
        applied.push(&correction.original);
        out = out.replace(&correction.original, &correction.corrected);
    }

    return out;
}
