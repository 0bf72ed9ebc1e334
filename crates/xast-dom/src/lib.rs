//! Syntax tree for the xast workspace.
//!
//! This crate provides an arena-based tree following the
//! [xast](https://github.com/syntax-tree/xast) node model: a root, elements,
//! text, comments, CDATA sections, processing instructions and doctypes,
//! each carrying the [`Position`] it occupies in the source.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

use std::collections::HashMap;

use strum_macros::IntoStaticStr;
use xast_common::Position;

mod dump;
mod json;

pub use dump::outline;
pub use json::NodeRef;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What kind of node this is, with its data.
    pub node_type: NodeType,

    /// Parent node (`None` for the root and for detached nodes).
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,

    /// Where the node sits in the source. The root has none.
    pub position: Option<Position>,
}

/// The kinds of node, with their data.
///
/// The static name of each variant is the xast `type` field.
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
    /// The document container. Exactly one per tree.
    Root,
    /// An element with attributes and children.
    Element(ElementData),
    /// Character data.
    Text(String),
    /// The body of `<!--...-->`, without delimiters.
    Comment(String),
    /// The content of `<![CDATA[...]]>`, without delimiters.
    Cdata(String),
    /// A processing instruction, `<?name value?>`.
    Instruction(InstructionData),
    /// A document type declaration.
    Doctype(DoctypeData),
}

impl NodeType {
    /// The xast `type` of this node (`"element"`, `"text"`, ...).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// The literal value of a text, comment, CDATA or instruction node.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Text(value) | Self::Comment(value) | Self::Cdata(value) => Some(value),
            Self::Instruction(data) => Some(&data.value),
            Self::Root | Self::Element(_) | Self::Doctype(_) => None,
        }
    }

    /// Whether nodes of this kind may have children.
    #[must_use]
    pub const fn is_parent(&self) -> bool {
        matches!(self, Self::Root | Self::Element(_))
    }
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// The qualified name, as written (no namespace resolution).
    pub name: String,
    /// Attribute names to their (entity-expanded) values.
    pub attributes: AttributesMap,
}

/// Processing instruction data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionData {
    /// The target, e.g. `xml` for `<?xml version="1.0"?>`.
    pub name: String,
    /// Everything after the target and its whitespace, up to `?>`.
    pub value: String,
}

/// Doctype data.
///
/// `public` and `system` are `None` when the declaration has no such
/// literal, which is distinct from an empty literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoctypeData {
    /// The document element name.
    pub name: String,
    /// The public identifier literal.
    pub public: Option<String>,
    /// The system identifier literal.
    pub system: Option<String>,
}

/// Arena-based tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
///
/// Two trees compare equal when they were built from the same nodes in the
/// same order, which is exactly deep equality for parser output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree with just the root node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Root,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            position: None,
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree and has no position.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            position: None,
        });
        id
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// # Panics
    ///
    /// Panics if either id does not belong to this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the position of a node, if it has one.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.get(id).and_then(|n| n.position)
    }

    /// Set the position of a node. Unknown ids are ignored.
    pub fn set_position(&mut self, id: NodeId, position: Position) {
        if let Some(node) = self.get_mut(id) {
            node.position = Some(position);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over a node and everything below it, in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            pending: vec![id],
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get doctype data if this node is a doctype.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&DoctypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Doctype(data) => Some(data),
            _ => None,
        })
    }

    /// The document element: the first element child of the root.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// Concatenated text and CDATA below a node, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|d| match self.get(d).map(|n| &n.node_type) {
                Some(NodeType::Text(s) | NodeType::Cdata(s)) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    pending: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
