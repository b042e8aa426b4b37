//! The evaluator's uniform result type.

use crate::dom::DomElement;
use std::fmt;

/// One result of an XPath evaluation.
///
/// Integers and doubles share the `Number` variant; [`fmt::Display`] renders
/// exact integers without a decimal point, so `count(..)` results print as
/// `"160"` rather than `"160.0"`.
#[derive(Debug, Clone)]
pub enum XPathValue<N> {
    /// A reference to a DOM element.
    Element(N),
    /// An attribute value, text content, or string literal.
    String(String),
    /// A numeric scalar.
    Number(f64),
    /// The result of a comparison.
    Boolean(bool),
}

impl<N> XPathValue<N> {
    pub(crate) fn as_element(&self) -> Option<&N> {
        match self {
            XPathValue::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl<'a, N: DomElement<'a>> XPathValue<N> {
    /// Coerces the value to text: an element yields its text content, every
    /// scalar its natural rendering. This is the coercion comparisons use.
    pub fn to_text(&self) -> String {
        match self {
            XPathValue::Element(e) => e.text_content(),
            XPathValue::String(s) => s.clone(),
            XPathValue::Number(n) => n.to_string(),
            XPathValue::Boolean(b) => b.to_string(),
        }
    }
}

impl<'a, N: DomElement<'a>> fmt::Display for XPathValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
