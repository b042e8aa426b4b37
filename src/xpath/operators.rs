//! Comparison operators usable inside a predicate.

use super::value::XPathValue;
use crate::dom::DomElement;
use std::cmp::Ordering;

/// A comparison operator between the rolling value-list and a right-hand
/// side evaluated against the filter source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComparisonOp {
    Equals,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    fn holds(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equals => ordering == Ordering::Equal,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    /// Applies the operator to the first element of each side.
    ///
    /// Two numbers compare numerically; anything else is coerced to text and
    /// compared in Unicode codepoint order (no locale collation). An empty
    /// side yields `false`.
    pub(crate) fn apply<'a, N: DomElement<'a>>(
        self,
        left: &[XPathValue<N>],
        right: &[XPathValue<N>],
    ) -> bool {
        let (Some(l), Some(r)) = (left.first(), right.first()) else {
            return false;
        };
        if let (XPathValue::Number(a), XPathValue::Number(b)) = (l, r) {
            return a.partial_cmp(b).is_some_and(|o| self.holds(o));
        }
        self.holds(l.to_text().cmp(&r.to_text()))
    }
}
