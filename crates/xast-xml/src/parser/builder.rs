//! The tree builder.
//!
//! Keeps the stack of open nodes and seals each node with its position when
//! it is exited. Start positions come from the clock baseline at the moment
//! a node is entered; end positions from the clock reading when it is
//! exited, unless the caller corrects them afterwards.

use xast_common::{Point, Position};
use xast_dom::{DomTree, NodeId, NodeType};

use super::clock::Clock;
use crate::tokenizer::Cursor;

/// A node that has been entered but not yet exited.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    id: NodeId,
    /// `None` only for the root, which has no position.
    start: Option<Point>,
}

/// Builds a [`DomTree`] from enter and exit calls.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: DomTree,
    /// The root is always at the bottom.
    stack_of_open_nodes: Vec<OpenNode>,
    clock: Clock,
}

impl TreeBuilder {
    /// A builder holding only the root, with the clock at 1:1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            stack_of_open_nodes: vec![OpenNode {
                id: NodeId::ROOT,
                start: None,
            }],
            clock: Clock::new(),
        }
    }

    /// How many nodes are open, the root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack_of_open_nodes.len()
    }

    /// The innermost open node.
    #[must_use]
    pub fn current_node(&self) -> NodeId {
        self.stack_of_open_nodes
            .last()
            .map_or(NodeId::ROOT, |open| open.id)
    }

    /// The current clock baseline.
    #[must_use]
    pub const fn baseline(&self) -> Point {
        self.clock.baseline()
    }

    /// Append a node to the innermost open node and open it.
    ///
    /// The node starts at the clock baseline; the clock then advances to
    /// `cursor`.
    pub fn enter(&mut self, node_type: NodeType, cursor: Cursor) -> NodeId {
        let start = self.clock.baseline();
        let parent = self.current_node();
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
        self.stack_of_open_nodes.push(OpenNode {
            id,
            start: Some(start),
        });
        let _ = self.clock.advance(cursor);
        id
    }

    /// Close the innermost open node, ending it at the clock reading for
    /// `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if only the root is open: every exit must match an enter.
    pub fn exit(&mut self, cursor: Cursor) -> NodeId {
        let Some(OpenNode {
            id,
            start: Some(start),
        }) = self.stack_of_open_nodes.pop()
        else {
            panic!("tree builder: exit without a matching enter");
        };
        let end = self.clock.advance(cursor);
        self.tree.set_position(id, Position::new(start, end));
        id
    }

    /// Enter and immediately exit a node without children.
    pub fn leaf(&mut self, node_type: NodeType, cursor: Cursor) -> NodeId {
        let _ = self.enter(node_type, cursor);
        self.exit(cursor)
    }

    /// Replace the end of a sealed node and move the clock there.
    pub fn correct_end(&mut self, id: NodeId, end: Point) {
        if let Some(position) = self.tree.position(id) {
            self.tree.set_position(id, Position::new(position.start, end));
        }
        self.clock.rebase(end);
    }

    /// Move the clock past markup that produces no node.
    pub fn skip_to(&mut self, point: Point) {
        self.clock.rebase(point);
    }

    /// Append to the value of the innermost open node, which must be a
    /// CDATA section.
    ///
    /// # Panics
    ///
    /// Panics if the innermost open node is not a CDATA section.
    pub fn append_to_current(&mut self, data: &str) {
        let id = self.current_node();
        match self.tree.get_mut(id).map(|node| &mut node.node_type) {
            Some(NodeType::Cdata(value)) => value.push_str(data),
            _ => panic!("tree builder: content outside of a CDATA section"),
        }
    }

    /// Hand out the finished tree.
    ///
    /// # Panics
    ///
    /// Panics if anything besides the root is still open.
    #[must_use]
    pub fn finish(self) -> DomTree {
        assert_eq!(
            self.stack_of_open_nodes.len(),
            1,
            "tree builder: nodes left open at end of input"
        );
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
