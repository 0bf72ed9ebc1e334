//! xast JSON serialization.
//!
//! Nodes serialize to the shape used by the xast ecosystem: a `type` tag,
//! the node's own fields, `children` for parents and `position` for
//! everything but the root. Attributes are written in name order so the
//! output is stable across runs.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{DomTree, NodeId, NodeType};

/// A borrowed view of one node, serializable as a nested xast object.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// View `id` inside `tree`.
    #[must_use]
    pub const fn new(tree: &'a DomTree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", node.node_type.kind())?;

        match &node.node_type {
            NodeType::Root => {}
            NodeType::Element(data) => {
                map.serialize_entry("name", &data.name)?;
                let attributes: BTreeMap<&str, &str> = data
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                map.serialize_entry("attributes", &attributes)?;
            }
            NodeType::Text(value) | NodeType::Comment(value) | NodeType::Cdata(value) => {
                map.serialize_entry("value", value)?;
            }
            NodeType::Instruction(data) => {
                map.serialize_entry("name", &data.name)?;
                map.serialize_entry("value", &data.value)?;
            }
            NodeType::Doctype(data) => {
                map.serialize_entry("name", &data.name)?;
                map.serialize_entry("public", &data.public)?;
                map.serialize_entry("system", &data.system)?;
            }
        }

        if node.node_type.is_parent() {
            let children: Vec<NodeRef<'_>> = node
                .children
                .iter()
                .map(|&child| NodeRef::new(self.tree, child))
                .collect();
            map.serialize_entry("children", &children)?;
        }

        if let Some(position) = &node.position {
            map.serialize_entry("position", position)?;
        }

        map.end()
    }
}

impl Serialize for DomTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef::new(self, NodeId::ROOT).serialize(serializer)
    }
}
