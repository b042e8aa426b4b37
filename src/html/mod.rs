//! Lenient HTML parsing: turns arbitrary markup into a well-formed
//! [`Document`] the evaluator can walk.
//!
//! This is deliberately forgiving rather than spec-complete. Script bodies
//! are wrapped in CDATA before reading so raw `<` and `&` survive, element
//! and attribute names are lowercased, void elements never open a scope, and
//! stray end tags are dropped. The result always has a single `html` root.

pub mod serializer;

use crate::dom::{Document, NodeId};
use crate::error::HtmlPathError;
use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// HTML elements that never have content and therefore never open a scope.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

static SCRIPT_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<script\b[^>]*>)(.*?)(</script\s*>)").expect("script pattern compiles")
});

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Wraps non-empty script bodies in CDATA so the XML reader tolerates them.
/// Idempotent: already-wrapped bodies are left alone.
fn wrap_script_bodies(html: &str) -> String {
    SCRIPT_BODY
        .replace_all(html, |caps: &Captures| {
            let body = &caps[2];
            if body.trim().is_empty() || body.contains("<![CDATA[") {
                caps[0].to_string()
            } else {
                format!("{}<![CDATA[{}]]>{}", &caps[1], body, &caps[3])
            }
        })
        .into_owned()
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Decodes the attribute list of a start tag, lowercasing names, keeping the
/// first occurrence of a repeated name, and falling back to the raw bytes
/// when a value does not unescape cleanly.
fn decode_attributes(tag: &BytesStart<'_>) -> Vec<(String, String)> {
    let mut attributes: Vec<(String, String)> = Vec::new();
    for attr in tag.attributes().with_checks(false).flatten() {
        let name = decode_name(attr.key.as_ref());
        if attributes.iter().any(|(n, _)| *n == name) {
            continue;
        }
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attributes.push((name, value));
    }
    attributes
}

/// Parses `html` into a document with a guaranteed single `html` root.
///
/// A top-level `<html>` tag becomes the root itself; any other top-level
/// content is wrapped in a synthesized `html` element. Input containing no
/// element at all is an error.
pub fn clean(html: &str) -> Result<Document, HtmlPathError> {
    let prepared = wrap_script_bodies(html);
    let mut reader = Reader::from_str(&prepared);
    // text stays untrimmed (the default); end-tag names are matched by the
    // scope stack below, not by the reader
    reader.config_mut().check_end_names = false;

    let mut doc = Document::new("html");
    let root = doc.root_id();
    let mut root_claimed = false;
    let mut element_count = 0usize;
    // open scopes; the base entry is the synthesized root and is never popped
    let mut stack: Vec<(String, NodeId)> = vec![("html".to_string(), root)];

    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                let name = decode_name(tag.name().as_ref());
                if stack.len() == 1 && name == "html" && !root_claimed {
                    root_claimed = true;
                    element_count += 1;
                    doc.set_attributes(root, decode_attributes(&tag));
                    stack.push((name, root));
                } else {
                    let parent = stack.last().map(|(_, id)| *id).unwrap_or(root);
                    let id = doc.append_element(parent, name.clone(), decode_attributes(&tag));
                    element_count += 1;
                    if !is_void(&name) {
                        stack.push((name, id));
                    }
                }
            }
            Event::Empty(tag) => {
                let name = decode_name(tag.name().as_ref());
                let parent = stack.last().map(|(_, id)| *id).unwrap_or(root);
                doc.append_element(parent, name, decode_attributes(&tag));
                element_count += 1;
            }
            Event::End(tag) => {
                let name = decode_name(tag.name().as_ref());
                // close the nearest matching open scope, ignore stray end tags
                if let Some(at) = stack[1..].iter().rposition(|(n, _)| *n == name) {
                    stack.truncate(at + 1);
                }
            }
            Event::Text(text) => {
                let content = match text.unescape() {
                    Ok(t) => t.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                let parent = stack.last().map(|(_, id)| *id).unwrap_or(root);
                doc.append_text(parent, content);
            }
            Event::CData(data) => {
                let parent = stack.last().map(|(_, id)| *id).unwrap_or(root);
                doc.append_text(parent, String::from_utf8_lossy(&data).into_owned());
            }
            Event::Eof => break,
            // comments, processing instructions, doctypes, declarations
            _ => {}
        }
    }

    if element_count == 0 {
        return Err(HtmlPathError::Parse(
            "input contains no element".to_string(),
        ));
    }
    debug!("cleaned document: {} element(s)", element_count);
    Ok(doc)
}
