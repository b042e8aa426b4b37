//! An index-backed arena holding one parsed document.

use super::DomElement;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies one node inside its owning [`Document`]. Ids are assigned in
/// creation order, which the cleaner guarantees to be document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct ElementData {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// An immutable-after-construction tree of elements and text nodes.
///
/// Node 0 is always the root element. The struct is `Sync`, so any number of
/// evaluations may run against one document concurrently.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Creates a document holding a single empty root element.
    pub fn new(root_name: impl Into<String>) -> Self {
        Document {
            nodes: vec![NodeData {
                parent: None,
                kind: NodeKind::Element(ElementData {
                    name: root_name.into(),
                    attributes: Vec::new(),
                    children: Vec::new(),
                }),
            }],
        }
    }

    /// The id of the root element.
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// A handle on the root element.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            doc: self,
            id: NodeId(0),
        }
    }

    /// Appends a new element under `parent` and returns its id.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            kind: NodeKind::Element(ElementData {
                name: name.into(),
                attributes,
                children: Vec::new(),
            }),
        });
        self.element_mut(parent).children.push(id);
        id
    }

    /// Appends a text node under `parent`. Empty text is dropped.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent),
            kind: NodeKind::Text(text),
        });
        self.element_mut(parent).children.push(id);
    }

    /// Replaces the attribute list of an existing element. Used by the
    /// cleaner when an explicit top-level tag claims the prebuilt root.
    pub fn set_attributes(&mut self, id: NodeId, attributes: Vec<(String, String)>) {
        self.element_mut(id).attributes = attributes;
    }

    fn element(&self, id: NodeId) -> &ElementData {
        match &self.nodes[id.0].kind {
            NodeKind::Element(e) => e,
            NodeKind::Text(_) => unreachable!("text node used as element"),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> &mut ElementData {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(e) => e,
            NodeKind::Text(_) => unreachable!("text node used as element"),
        }
    }
}

/// One child slot of an element, in document order.
pub(crate) enum ChildNode<'a> {
    Element(NodeRef<'a>),
    Text(&'a str),
}

/// A cheap, copyable handle on an element node.
///
/// Identity, hashing, and ordering all go through the node id, which equals
/// document order. Handles are only ever constructed for element nodes.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// The id of the referenced node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn child_nodes(&self) -> impl Iterator<Item = ChildNode<'a>> + 'a {
        let doc = self.doc;
        self.doc
            .element(self.id)
            .children
            .iter()
            .map(move |&id| match &doc.nodes[id.0].kind {
                NodeKind::Element(_) => ChildNode::Element(NodeRef { doc, id }),
                NodeKind::Text(t) => ChildNode::Text(t),
            })
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.child_nodes() {
            match child {
                ChildNode::Element(e) => e.collect_text(out),
                ChildNode::Text(t) => out.push_str(t),
            }
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl PartialOrd for NodeRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeRef<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef(<{}> #{})", self.name(), self.id.0)
    }
}

impl<'a> DomElement<'a> for NodeRef<'a> {
    fn name(&self) -> &'a str {
        &self.doc.element(self.id).name
    }

    fn parent(&self) -> Option<Self> {
        let doc = self.doc;
        self.doc.nodes[self.id.0]
            .parent
            .map(|id| NodeRef { doc, id })
    }

    fn child_elements(&self) -> Box<dyn Iterator<Item = Self> + 'a> {
        Box::new(self.child_nodes().filter_map(|c| match c {
            ChildNode::Element(e) => Some(e),
            ChildNode::Text(_) => None,
        }))
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.doc
            .element(self.id)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a> {
        Box::new(
            self.doc
                .element(self.id)
                .attributes
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str())),
        )
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }
}
