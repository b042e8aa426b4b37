use thiserror::Error;

/// The single error kind raised while evaluating an XPath expression.
///
/// Raised on unclosed brackets and quotes, a `/` with no following step,
/// unknown function names, and the attribute axis applied to a non-element.
/// There is no partial-success mode; a failed expression yields no results.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct XPathError {
    message: String,
}

impl XPathError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        XPathError {
            message: message.into(),
        }
    }
}
