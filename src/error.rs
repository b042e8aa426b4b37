use crate::xpath::XPathError;
use thiserror::Error;

/// A comprehensive error type for the whole clean -> evaluate -> serialize
/// pipeline.
#[derive(Error, Debug)]
pub enum HtmlPathError {
    #[error("XPath evaluation failed: {0}")]
    XPath(#[from] XPathError),

    #[error("HTML parsing failed: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for HtmlPathError {
    fn from(e: quick_xml::Error) -> Self {
        HtmlPathError::Parse(e.to_string())
    }
}
