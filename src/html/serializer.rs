//! Renders evaluation results back to strings.

use crate::dom::{ChildNode, DomElement, NodeRef};
use crate::xpath::XPathValue;
use quick_xml::escape::escape;

/// Serializes an element subtree as XML-shaped markup: attributes in stored
/// order, text escaped, childless elements self-closed.
pub fn serialize(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    write_element(&mut out, node);
    out
}

fn write_element(out: &mut String, node: NodeRef<'_>) {
    out.push('<');
    out.push_str(node.name());
    for (name, value) in node.attributes() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    let children: Vec<ChildNode<'_>> = node.child_nodes().collect();
    if children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');
    for child in children {
        match child {
            ChildNode::Element(e) => write_element(out, e),
            ChildNode::Text(t) => out.push_str(&escape(t)),
        }
    }
    out.push_str("</");
    out.push_str(node.name());
    out.push('>');
}

/// Stringifies one evaluation result: elements become markup, scalars their
/// natural rendering (exact integers without a decimal point, booleans as
/// `true`/`false`).
pub fn serialize_value(value: &XPathValue<NodeRef<'_>>) -> String {
    match value {
        XPathValue::Element(e) => serialize(*e),
        other => other.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::clean;

    #[test]
    fn renders_nested_markup() {
        let doc = clean("<div><span>Foo</span><div>Bar</div></div>").unwrap();
        let div = doc.root().child_elements().next().unwrap();
        assert_eq!(serialize(div), "<div><span>Foo</span><div>Bar</div></div>");
    }

    #[test]
    fn renders_attributes_in_order() {
        let doc = clean("<a id=\"t1\" class=\"logo\" href=\"/\">Portal</a>").unwrap();
        let a = doc.root().child_elements().next().unwrap();
        assert_eq!(
            serialize(a),
            "<a id=\"t1\" class=\"logo\" href=\"/\">Portal</a>"
        );
    }

    #[test]
    fn self_closes_childless_elements() {
        let doc = clean("<p>a<br>b</p>").unwrap();
        let p = doc.root().child_elements().next().unwrap();
        assert_eq!(serialize(p), "<p>a<br />b</p>");
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let doc = clean("<p title=\"a&amp;b\">1 &lt; 2</p>").unwrap();
        let p = doc.root().child_elements().next().unwrap();
        assert_eq!(serialize(p), "<p title=\"a&amp;b\">1 &lt; 2</p>");
    }

    #[test]
    fn scalar_values_render_naturally() {
        let n: XPathValue<NodeRef> = XPathValue::Number(160.0);
        assert_eq!(serialize_value(&n), "160");
        let b: XPathValue<NodeRef> = XPathValue::Boolean(false);
        assert_eq!(serialize_value(&b), "false");
        let s: XPathValue<NodeRef> = XPathValue::String("x".to_string());
        assert_eq!(serialize_value(&s), "x");
    }
}
