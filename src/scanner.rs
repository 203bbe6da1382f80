//! Tolerant HTML attribute scanner.
//!
//! Walks raw markup once and reports the attributes of interest together with
//! the byte span of each value, so a caller can replace exactly that text and
//! nothing else. Malformed markup is skipped, never reported as an error.

use std::ops::Range;

use memchr::{memchr, memmem};

use crate::types::FileReference;

/// Elements whose content is text, not markup. Tags inside them are not tags.
const RAW_TEXT_ELEMENTS: &[&[u8]] = &[
    b"iframe", b"noembed", b"noframes", b"script", b"style", b"textarea", b"title", b"xmp",
];

/// One `name[=value]` pair inside a start tag.
struct RawAttribute {
    name: Range<usize>,
    value: Option<Range<usize>>,
}

/// A parsed start tag: its name, attributes, and the offset just past `>`.
struct StartTag {
    attributes: Vec<RawAttribute>,
    end: usize,
    name: Range<usize>,
}

/// Extract every attribute named in `attributes` (compared ignoring ASCII case)
/// from the start tags of `content`, in document order.
///
/// Only the first occurrence of a name within a tag counts. Attributes without
/// a value are not references and are skipped.
pub fn extract_references(content: &str, attributes: &[String]) -> Vec<FileReference> {
    let bytes = content.as_bytes();
    let mut references = Vec::new();
    let mut pos = 0_usize;

    while let Some(offset) = bytes.get(pos..).and_then(|rest| return memchr(b'<', rest)) {
        let start = pos.saturating_add(offset);
        let rest = bytes.get(start..).unwrap_or_default();

        pos = if rest.starts_with(b"<!--") {
            skip_comment(bytes, start)
        } else {
            match rest.get(1) {
                Some(b'!' | b'?') => skip_past(bytes, start, b'>'),
                Some(b'/') => skip_end_tag(bytes, start),
                Some(c) if c.is_ascii_alphabetic() => {
                    let Some(tag) = parse_start_tag(bytes, start) else {
                        // EOF inside a tag: the tag is dropped.
                        break;
                    };
                    collect_tag_references(content, &tag, attributes, &mut references);
                    skip_raw_text(bytes, &tag)
                },
                _ => start.saturating_add(1),
            }
        };
    }

    return references;
}

/// Push the wanted attributes of one start tag onto `references`.
fn collect_tag_references(
    content: &str,
    tag: &StartTag,
    wanted: &[String],
    references: &mut Vec<FileReference>,
) {
    let mut seen: Vec<&str> = Vec::new();
    for attribute in &tag.attributes {
        let Some(name) = content.get(attribute.name.clone()) else { continue };
        if seen.iter().any(|s| return s.eq_ignore_ascii_case(name)) {
            continue;
        }
        seen.push(name);

        if !wanted.iter().any(|w| return w.eq_ignore_ascii_case(name)) {
            continue;
        }
        let Some(span) = attribute.value.clone() else { continue };
        let Some(value) = content.get(span.clone()) else { continue };

        references.push(FileReference {
            attribute: name.to_string(),
            span,
            value: value.to_string(),
        });
    }
    return;
}

/// Byte offset just past the comment starting at `start` (`<!--`).
/// Handles the abrupt `<!-->` and `<!--->` forms.
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    let body = start.saturating_add(4);
    let rest = bytes.get(body..).unwrap_or_default();
    if rest.starts_with(b">") {
        return body.saturating_add(1);
    }
    if rest.starts_with(b"->") {
        return body.saturating_add(2);
    }
    return match memmem::find(rest, b"-->") {
        Some(idx) => body.saturating_add(idx).saturating_add(3),
        None => bytes.len(),
    };
}

/// Byte offset just past the next `needle` at or after `start`, or end of input.
fn skip_past(bytes: &[u8], start: usize, needle: u8) -> usize {
    return match bytes.get(start..).and_then(|rest| return memchr(needle, rest)) {
        Some(idx) => start.saturating_add(idx).saturating_add(1),
        None => bytes.len(),
    };
}

/// End tags carry no references; attributes on them are ignored by HTML parsers.
fn skip_end_tag(bytes: &[u8], start: usize) -> usize {
    return parse_start_tag(bytes, start.saturating_add(1)).map_or(bytes.len(), |tag| return tag.end);
}

/// Resume position after a start tag, jumping over raw-text element content.
fn skip_raw_text(bytes: &[u8], tag: &StartTag) -> usize {
    let Some(name) = bytes.get(tag.name.clone()) else { return tag.end };
    if !RAW_TEXT_ELEMENTS.iter().any(|raw| return raw.eq_ignore_ascii_case(name)) {
        return tag.end;
    }

    let mut pos = tag.end;
    while let Some(idx) = bytes.get(pos..).and_then(|rest| return memmem::find(rest, b"</")) {
        let close = pos.saturating_add(idx);
        let name_start = close.saturating_add(2);
        let name_end = name_start.saturating_add(name.len());
        let matches_name = bytes
            .get(name_start..name_end)
            .is_some_and(|candidate| return candidate.eq_ignore_ascii_case(name));
        let delimited = bytes
            .get(name_end)
            .is_none_or(|b| return is_ws(*b) || *b == b'/' || *b == b'>');
        if matches_name && delimited {
            return close;
        }
        pos = name_start;
    }
    return bytes.len();
}

/// Parse the tag starting at `start` (`bytes[start] == '<'`).
///
/// Quotes only delimit values directly after `=`, so a stray apostrophe in an
/// unquoted position does not swallow the rest of the document. Returns `None`
/// when input ends before the closing `>`.
fn parse_start_tag(bytes: &[u8], start: usize) -> Option<StartTag> {
    let name_start = start.saturating_add(1);
    let mut i = name_start;
    while bytes.get(i).is_some_and(|b| return !is_ws(*b) && *b != b'/' && *b != b'>') {
        i = i.saturating_add(1);
    }
    let name = name_start..i;
    let mut attributes = Vec::new();

    loop {
        while bytes.get(i).is_some_and(|b| return is_ws(*b) || *b == b'/') {
            i = i.saturating_add(1);
        }
        if *bytes.get(i)? == b'>' {
            break;
        }

        // A leading '=' is part of the name, as in the HTML tokenizer.
        let attr_start = i;
        i = i.saturating_add(1);
        while bytes.get(i).is_some_and(|b| return !is_ws(*b) && !matches!(b, b'/' | b'>' | b'=')) {
            i = i.saturating_add(1);
        }
        let attr_name = attr_start..i;

        while bytes.get(i).is_some_and(|b| return is_ws(*b)) {
            i = i.saturating_add(1);
        }
        if bytes.get(i) != Some(&b'=') {
            attributes.push(RawAttribute { name: attr_name, value: None });
            continue;
        }
        i = i.saturating_add(1);
        while bytes.get(i).is_some_and(|b| return is_ws(*b)) {
            i = i.saturating_add(1);
        }

        let value = match *bytes.get(i)? {
            quote @ (b'"' | b'\'') => {
                let value_start = i.saturating_add(1);
                let len = memchr(quote, bytes.get(value_start..)?)?;
                let value_end = value_start.saturating_add(len);
                i = value_end.saturating_add(1);
                value_start..value_end
            },
            b'>' => i..i,
            _ => {
                let value_start = i;
                while bytes.get(i).is_some_and(|b| return !is_ws(*b) && *b != b'>') {
                    i = i.saturating_add(1);
                }
                value_start..i
            },
        };
        attributes.push(RawAttribute { name: attr_name, value: Some(value) });
    }

    return Some(StartTag { attributes, end: i.saturating_add(1), name });
}

/// HTML whitespace inside tags.
const fn is_ws(b: u8) -> bool {
    return matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c');
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    fn wanted() -> Vec<String> {
        return vec!["src".to_string(), "href".to_string()];
    }

    fn values(content: &str) -> Vec<String> {
        return extract_references(content, &wanted()).into_iter().map(|r| return r.value).collect();
    }

    #[test]
    fn reports_value_spans_without_quotes() {
        let html = r#"<img src="images/logo.PNG" alt="x">"#;
        let refs = extract_references(html, &wanted());
        assert_eq!(refs.len(), 1);
        let reference = refs.first().unwrap();
        assert_eq!(reference.attribute, "src");
        assert_eq!(&html[reference.span.clone()], "images/logo.PNG");
    }

    #[test]
    fn matches_attribute_names_ignoring_case() {
        let refs = extract_references("<IMG SRC='TEST.JPG'><a HREF=page.html>", &wanted());
        let names: Vec<&str> = refs.iter().map(|r| return r.attribute.as_str()).collect();
        assert_eq!(names, vec!["SRC", "HREF"]);
        assert_eq!(refs.get(1).unwrap().value, "page.html");
    }

    #[test]
    fn finds_both_attributes_on_one_tag() {
        assert_eq!(values(r#"<img src="test.jpg" href="page.html">"#), vec!["test.jpg", "page.html"]);
    }

    #[test]
    fn skips_comments_and_declarations() {
        let html = r#"<!DOCTYPE html><!-- <img src="hidden.png"> --><?xml x?><img src="shown.png">"#;
        assert_eq!(values(html), vec!["shown.png"]);
    }

    #[test]
    fn abrupt_comment_does_not_hide_following_markup() {
        assert_eq!(values(r#"<!--><a href="a.html"><!---><a href="b.html">"#), vec!["a.html", "b.html"]);
    }

    #[test]
    fn skips_raw_text_content() {
        let html = r#"<script>var s = '<img src="fake.png">';</script ><img src="real.png">"#;
        assert_eq!(values(html), vec!["real.png"]);
    }

    #[test]
    fn script_src_itself_is_reported() {
        assert_eq!(values(r#"<script src="App.js"></script>"#), vec!["App.js"]);
    }

    #[test]
    fn gt_inside_quoted_value_does_not_end_tag() {
        assert_eq!(values(r#"<a title="a > b" href="x.html">"#), vec!["x.html"]);
    }

    #[test]
    fn stray_apostrophe_in_text_is_harmless() {
        assert_eq!(values("<p>it's <a href=one.html>one</a> and <a href='two.html'>"), vec!["one.html", "two.html"]);
    }

    #[test]
    fn first_duplicate_attribute_wins() {
        assert_eq!(values(r#"<img src="first.png" SRC="second.png">"#), vec!["first.png"]);
    }

    #[test]
    fn attributes_without_values_are_skipped() {
        assert!(values("<a href>x</a>").is_empty());
    }

    #[test]
    fn unterminated_tag_yields_nothing() {
        assert_eq!(values(r#"<img src="a.png"><img src="b.png""#), vec!["a.png"]);
    }

    #[test]
    fn lone_lt_in_text_is_not_a_tag() {
        assert_eq!(values(r#"1 < 2 <a href="x.html">"#), vec!["x.html"]);
    }

    #[test]
    fn non_ascii_values_keep_valid_spans() {
        let html = r#"<p>Привет</p><a href="документы/страница.html">"#;
        let refs = extract_references(html, &wanted());
        let reference = refs.first().unwrap();
        assert_eq!(&html[reference.span.clone()], "документы/страница.html");
    }

    #[test]
    fn end_tag_attributes_are_ignored() {
        assert!(values(r#"</a href="x.html">"#).is_empty());
    }
}
