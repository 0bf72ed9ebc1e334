//! Tests for tree construction, traversal and serialization.

use serde_json::json;
use xast_common::{Point, Position};
use xast_dom::{DoctypeData, DomTree, ElementData, NodeId, NodeRef, NodeType, outline};

/// Helper to create an element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, name: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData {
        name: name.to_string(),
        attributes: Default::default(),
    }))
}

fn span(start: (usize, usize, usize), end: (usize, usize, usize)) -> Position {
    Position::new(
        Point::new(start.0, start.1, start.2),
        Point::new(end.0, end.1, end.2),
    )
}

// ========== structure ==========

#[test]
fn test_new_tree_has_only_root() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Root)
    ));
    assert_eq!(tree.position(NodeId::ROOT), None);
}

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "list");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
}

#[test]
fn test_descendants_are_in_document_order() {
    let mut tree = DomTree::new();
    let outer = alloc_element(&mut tree, "outer");
    tree.append_child(NodeId::ROOT, outer);
    let first = alloc_element(&mut tree, "first");
    tree.append_child(outer, first);
    let text = tree.alloc(NodeType::Text("x".to_string()));
    tree.append_child(first, text);
    let second = alloc_element(&mut tree, "second");
    tree.append_child(outer, second);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![NodeId::ROOT, outer, first, text, second]);

    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![first, outer, NodeId::ROOT]);
}

#[test]
fn test_text_content_joins_text_and_cdata() {
    let mut tree = DomTree::new();
    let root = alloc_element(&mut tree, "r");
    tree.append_child(NodeId::ROOT, root);
    let text = tree.alloc(NodeType::Text("a < ".to_string()));
    tree.append_child(root, text);
    let comment = tree.alloc(NodeType::Comment("ignored".to_string()));
    tree.append_child(root, comment);
    let cdata = tree.alloc(NodeType::Cdata("b".to_string()));
    tree.append_child(root, cdata);

    assert_eq!(tree.text_content(root), "a < b");
    assert_eq!(tree.document_element(), Some(root));
}

#[test]
fn test_node_kinds_use_xast_names() {
    assert_eq!(NodeType::Root.kind(), "root");
    assert_eq!(NodeType::Cdata(String::new()).kind(), "cdata");
    assert_eq!(
        NodeType::Doctype(DoctypeData::default()).kind(),
        "doctype"
    );
}

// ========== serialization ==========

#[test]
fn test_serializes_to_xast_json() {
    let mut tree = DomTree::new();

    let doctype = tree.alloc(NodeType::Doctype(DoctypeData {
        name: "note".to_string(),
        public: None,
        system: Some("note.dtd".to_string()),
    }));
    tree.append_child(NodeId::ROOT, doctype);
    tree.set_position(doctype, span((1, 1, 0), (1, 33, 32)));

    let element = tree.alloc(NodeType::Element(ElementData {
        name: "note".to_string(),
        attributes: [
            ("to".to_string(), "you".to_string()),
            ("from".to_string(), "me".to_string()),
        ]
        .into_iter()
        .collect(),
    }));
    tree.append_child(NodeId::ROOT, element);
    tree.set_position(element, span((2, 1, 33), (2, 35, 67)));

    let text = tree.alloc(NodeType::Text("hi".to_string()));
    tree.append_child(element, text);
    tree.set_position(text, span((2, 25, 57), (2, 27, 59)));

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "root",
            "children": [
                {
                    "type": "doctype",
                    "name": "note",
                    "public": null,
                    "system": "note.dtd",
                    "position": {
                        "start": {"line": 1, "column": 1, "offset": 0},
                        "end": {"line": 1, "column": 33, "offset": 32}
                    }
                },
                {
                    "type": "element",
                    "name": "note",
                    "attributes": {"from": "me", "to": "you"},
                    "children": [
                        {
                            "type": "text",
                            "value": "hi",
                            "position": {
                                "start": {"line": 2, "column": 25, "offset": 57},
                                "end": {"line": 2, "column": 27, "offset": 59}
                            }
                        }
                    ],
                    "position": {
                        "start": {"line": 2, "column": 1, "offset": 33},
                        "end": {"line": 2, "column": 35, "offset": 67}
                    }
                }
            ]
        })
    );

    // A subtree view serializes on its own.
    let text_json = serde_json::to_value(NodeRef::new(&tree, text)).unwrap();
    assert_eq!(text_json["value"], "hi");
}

#[test]
fn test_outline_lists_nodes_with_spans() {
    let mut tree = DomTree::new();
    let element = tree.alloc(NodeType::Element(ElementData {
        name: "a".to_string(),
        attributes: [("b".to_string(), "c".to_string())].into_iter().collect(),
    }));
    tree.append_child(NodeId::ROOT, element);
    tree.set_position(element, span((1, 1, 0), (1, 17, 16)));
    let text = tree.alloc(NodeType::Text("x\ny".to_string()));
    tree.append_child(element, text);
    tree.set_position(text, span((1, 10, 9), (2, 2, 12)));

    assert_eq!(
        outline(&tree, NodeId::ROOT),
        "root\n  element <a b=\"c\"> 1:1-1:17\n    text \"x\\ny\" 1:10-2:2\n"
    );
}
