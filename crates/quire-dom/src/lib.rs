//! Element tree for the Quire renderer.
//!
//! The box generator only needs a small slice of the
//! [DOM Living Standard](https://dom.spec.whatwg.org/): tag names, attributes,
//! children in document order, and the source line each element came from
//! (for diagnostics). Markup parsing happens elsewhere; this crate is the
//! hand-off format.
//!
//! # Design
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`].
//! [`ElementRef`] pairs a tree with an element id so handlers can read an
//! element and its children without juggling both.

use std::collections::HashMap;

/// Attribute name to raw value.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the element tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node, allocated first.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// The kinds of node the box generator distinguishes.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The tree root.
    Document,
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// Comments generate no boxes.
    Comment(String),
}

/// What an element carries besides its children.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// ASCII-lowercased local name.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// 1-based line of the start tag in the source document, when known.
    pub source_line: Option<usize>,
}

impl ElementData {
    /// Create element data, lowercasing the tag name the way the HTML parser
    /// does for elements in the HTML namespace.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: AttributesMap::new(),
            source_line: None,
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self
            .attrs
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Builder-style source line setter.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.source_line = Some(line);
        self
    }

    /// The raw value of attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based element tree with O(1) node access.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node at `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Node count, document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the Document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Make `child` the last child of `parent`.
    ///
    /// Ids not allocated by this tree are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(NodeType::Element(data));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// The node `id` was appended to.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Element data of `id`, when it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data of `id`, when it is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// A read-only element view, or `None` if `id` is not an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        let data = self.as_element(id)?;
        Some(ElementRef {
            tree: self,
            id,
            data,
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed element together with the tree it lives in.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// The element's node id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The lowercased tag name.
    #[must_use]
    pub fn tag(&self) -> &'a str {
        &self.data.tag_name
    }

    /// The source line of the start tag, when known.
    #[must_use]
    pub const fn source_line(&self) -> Option<usize> {
        self.data.source_line
    }

    /// The raw value of attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data.attribute(name)
    }

    /// Child elements in document order; text and comments are skipped.
    pub fn child_elements(self) -> impl Iterator<Item = ElementRef<'a>> {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .filter_map(move |&child| tree.element(child))
    }
}
