//! Defines the core abstraction for a navigable, read-only HTML element tree.

mod tree;

pub use tree::{Document, NodeId, NodeRef};
pub(crate) use tree::ChildNode;

use std::hash::Hash;

/// The universal contract for an element node in a read-only DOM tree.
///
/// The evaluator is written exclusively against this trait, so it can operate
/// on any tree implementation that exposes named elements with ordered
/// attributes, ordered element children, and a parent pointer. Non-element
/// children (text) are invisible to every accessor except [`text_content`],
/// which concatenates descendant text the way DOM Level 2 defines it.
///
/// `'a` is the lifetime of the underlying document.
///
/// [`text_content`]: DomElement::text_content
pub trait DomElement<'a>:
    std::fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord + 'a
{
    /// The element's tag name, case preserved as stored.
    fn name(&self) -> &'a str;

    /// The parent element, or `None` for the document root.
    fn parent(&self) -> Option<Self>;

    /// An iterator over the element children, in document order.
    fn child_elements(&self) -> Box<dyn Iterator<Item = Self> + 'a>;

    /// The value of the attribute `name`, or `None` when absent.
    fn attribute(&self, name: &str) -> Option<&'a str>;

    /// An iterator over the `(name, value)` attribute pairs, in the order
    /// they appear on the element. Names are unique per element.
    fn attributes(&self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    /// The concatenation of all descendant text, or the empty string.
    fn text_content(&self) -> String;

    /// The element children whose name equals `name`, compared
    /// case-insensitively, in document order.
    fn child_elements_named(&self, name: &str) -> Box<dyn Iterator<Item = Self> + 'a> {
        let wanted = name.to_string();
        Box::new(
            self.child_elements()
                .filter(move |c| c.name().eq_ignore_ascii_case(&wanted)),
        )
    }

    /// All element descendants in document order (preorder, excluding self).
    fn descendant_elements(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        let mut stack: Vec<Self> = self.child_elements().collect();
        stack.reverse();
        Box::new(std::iter::from_fn(move || {
            let next = stack.pop()?;
            let mut children: Vec<Self> = next.child_elements().collect();
            children.reverse();
            stack.extend(children);
            Some(next)
        }))
    }
}
