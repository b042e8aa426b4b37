//! # htmlpath
//!
//! XPath evaluation over lenient HTML, faithful to the dialect of the
//! HtmlCleaner engine: a small axis set (child, `//` descendant, `.`, `..`,
//! `@` attributes), positional and boolean predicates, comparisons, and the
//! functions `last`, `position`, `text`, `count`, and `data`. Compatibility
//! extends to the dialect's non-standard corners, which are pinned by tests.
//!
//! ```
//! let results = htmlpath::query(
//!     "<html><body><a href=\"/home\">Home</a></body></html>",
//!     "//a/@href",
//! ).unwrap();
//! assert_eq!(results, vec!["/home"]);
//! ```
//!
//! The engine itself is generic: anything implementing [`DomElement`] can be
//! queried through [`evaluate`], and the bundled [`Document`] arena (built by
//! [`clean`]) is one such implementation.

pub mod dom;
pub mod error;
pub mod html;
pub mod xpath;

pub use dom::{Document, DomElement, NodeRef};
pub use error::HtmlPathError;
pub use html::clean;
pub use html::serializer::{serialize, serialize_value};
pub use xpath::{XPathError, XPathExpression, XPathValue};

use log::debug;

/// Evaluates `expression` against `root`, returning the ordered result list.
///
/// This is the engine's entry point for callers that already hold a DOM; use
/// [`query`] for the string-in, strings-out pipeline.
pub fn evaluate<'a, N: DomElement<'a>>(
    root: N,
    expression: &str,
) -> Result<Vec<XPathValue<N>>, XPathError> {
    XPathExpression::new(expression).evaluate(root)
}

/// Cleans `html`, evaluates `expression` from the document root, and
/// serializes every result: elements as markup, scalars naturally.
pub fn query(html: &str, expression: &str) -> Result<Vec<String>, HtmlPathError> {
    let document = clean(html)?;
    let values = evaluate(document.root(), expression)?;
    debug!("'{}' matched {} value(s)", expression, values.len());
    Ok(values.iter().map(serialize_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_wires_clean_evaluate_serialize() {
        let html = "<html><body><div><a id=\"x\" href=\"/a\">A</a><a href=\"/b\">B</a></div></body></html>";
        assert_eq!(query(html, "//a/@href").unwrap(), vec!["/a", "/b"]);
        assert_eq!(
            query(html, "//a[@id]").unwrap(),
            vec!["<a id=\"x\" href=\"/a\">A</a>"]
        );
        assert_eq!(query(html, "count(//a)").unwrap(), vec!["2"]);
    }

    #[test]
    fn query_reports_evaluation_errors() {
        let html = "<html><body></body></html>";
        assert!(matches!(
            query(html, "//a["),
            Err(HtmlPathError::XPath(_))
        ));
    }
}
