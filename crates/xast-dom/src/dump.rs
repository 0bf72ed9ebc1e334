//! Indented outline of a tree, for debugging.

use core::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// Render the subtree at `id` as an indented outline, one node per line,
/// each followed by its source span.
///
/// ```text
/// root
///   doctype html 1:1-1:16
///   element <html lang="en"> 1:16-1:41
///     text "hi" 1:32-1:34
/// ```
#[must_use]
pub fn outline(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    out.push_str(&"  ".repeat(indent));
    out.push_str(node.node_type.kind());

    match &node.node_type {
        NodeType::Root => {}
        NodeType::Element(data) => {
            let mut attrs: Vec<(&String, &String)> = data.attributes.iter().collect();
            attrs.sort();
            let _ = write!(out, " <{}", data.name);
            for (name, value) in attrs {
                let _ = write!(out, " {name}=\"{value}\"");
            }
            out.push('>');
        }
        NodeType::Text(value) | NodeType::Comment(value) | NodeType::Cdata(value) => {
            let _ = write!(out, " {}", quoted(value));
        }
        NodeType::Instruction(data) => {
            let _ = write!(out, " {} {}", data.name, quoted(&data.value));
        }
        NodeType::Doctype(data) => {
            let _ = write!(out, " {}", data.name);
            if let Some(public) = &data.public {
                let _ = write!(out, " PUBLIC {}", quoted(public));
            }
            if let Some(system) = &data.system {
                let _ = write!(out, " SYSTEM {}", quoted(system));
            }
        }
    }

    if let Some(position) = node.position {
        let _ = write!(out, " {position}");
    }
    out.push('\n');

    for &child in &node.children {
        write_node(tree, child, indent + 1, out);
    }
}

fn quoted(value: &str) -> String {
    format!("{value:?}")
}
