//! Integration tests for tree construction and positions.

use serde_json::json;
use xast_common::warning::has_warned;
use xast_common::{Point, Position};
use xast_dom::{DomTree, NodeId, NodeType, outline};
use xast_xml::{ErrorKind, ParseError, from_bytes, from_xml};

/// Helper to parse a document that must be well-formed
fn parse(input: &str) -> DomTree {
    match from_xml(input) {
        Ok(tree) => tree,
        Err(error) => panic!("expected {input:?} to parse, got {error}"),
    }
}

/// Helper to parse a document that must be rejected
fn parse_error(input: &str) -> ParseError {
    match from_xml(input) {
        Ok(tree) => panic!("expected {input:?} to fail, got {tree:?}"),
        Err(error) => error,
    }
}

/// Assert the rendered error and its rule id
fn assert_error(input: &str, expected: &str, rule: &str) {
    let error = parse_error(input);
    assert_eq!(error.to_string(), expected, "for {input:?}");
    assert_eq!(error.rule_id(), format!("xast-xml:{rule}"), "for {input:?}");
}

fn span(start: (usize, usize, usize), end: (usize, usize, usize)) -> Option<Position> {
    Some(Position::new(
        Point::new(start.0, start.1, start.2),
        Point::new(end.0, end.1, end.2),
    ))
}

fn child(tree: &DomTree, parent: NodeId, index: usize) -> NodeId {
    tree.children(parent)[index]
}

// ========== tree shape ==========

#[test]
fn test_empty_document_is_an_empty_root() {
    let tree = parse("");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.position(NodeId::ROOT), None);
}

#[test]
fn test_element_and_text_to_json() {
    let tree = parse("<a b=\"c\">d</a>");
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "type": "root",
            "children": [{
                "type": "element",
                "name": "a",
                "attributes": {"b": "c"},
                "children": [{
                    "type": "text",
                    "value": "d",
                    "position": {
                        "start": {"line": 1, "column": 10, "offset": 9},
                        "end": {"line": 1, "column": 11, "offset": 10}
                    }
                }],
                "position": {
                    "start": {"line": 1, "column": 1, "offset": 0},
                    "end": {"line": 1, "column": 15, "offset": 14}
                }
            }]
        })
    );
}

#[test]
fn test_every_node_kind() {
    let input = "<?xml version=\"1.0\"?>\n<!--c-->\n<doc x=\"1\"><![CDATA[<y>]]>&amp;</doc>";
    let tree = parse(input);
    let root = NodeId::ROOT;
    assert_eq!(tree.children(root).len(), 5);

    let instruction = child(&tree, root, 0);
    assert!(matches!(
        tree.get(instruction).map(|n| &n.node_type),
        Some(NodeType::Instruction(data)) if data.name == "xml" && data.value == "version=\"1.0\""
    ));
    assert_eq!(tree.position(instruction), span((1, 1, 0), (1, 22, 21)));

    let newline = child(&tree, root, 1);
    assert_eq!(tree.as_text(newline), Some("\n"));
    assert_eq!(tree.position(newline), span((1, 22, 21), (2, 1, 22)));

    let comment = child(&tree, root, 2);
    assert!(matches!(
        tree.get(comment).map(|n| &n.node_type),
        Some(NodeType::Comment(value)) if value == "c"
    ));
    assert_eq!(tree.position(comment), span((2, 1, 22), (2, 9, 30)));

    let element = child(&tree, root, 4);
    assert_eq!(tree.as_element(element).map(|e| e.name.as_str()), Some("doc"));
    assert_eq!(tree.position(element), span((3, 1, 31), (3, 38, 68)));

    let cdata = child(&tree, element, 0);
    assert!(matches!(
        tree.get(cdata).map(|n| &n.node_type),
        Some(NodeType::Cdata(value)) if value == "<y>"
    ));
    assert_eq!(tree.position(cdata), span((3, 12, 42), (3, 27, 57)));

    // The end of text is computed from its expanded value, so `&amp;`
    // spans a single column.
    let text = child(&tree, element, 1);
    assert_eq!(tree.as_text(text), Some("&"));
    assert_eq!(tree.position(text), span((3, 27, 57), (3, 28, 58)));
}

#[test]
fn test_doctype_node() {
    let tree = parse("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"x.dtd\"><html/>");
    let doctype = child(&tree, NodeId::ROOT, 0);
    let data = tree.as_doctype(doctype).unwrap();
    assert_eq!(data.name, "html");
    assert_eq!(data.public.as_deref(), Some("-//W3C//DTD XHTML 1.0//EN"));
    assert_eq!(data.system.as_deref(), Some("x.dtd"));
    assert_eq!(tree.position(doctype), span((1, 1, 0), (1, 59, 58)));
}

#[test]
fn test_doctype_without_external_identifier() {
    let tree = parse("<!DOCTYPE note>\n<note/>");
    let data = tree.as_doctype(child(&tree, NodeId::ROOT, 0)).unwrap();
    assert_eq!(data.name, "note");
    assert_eq!(data.public, None);
    assert_eq!(data.system, None);
}

#[test]
fn test_multiline_text_positions() {
    let tree = parse("<a>one\r\ntwo\nthree</a>");
    let text = child(&tree, child(&tree, NodeId::ROOT, 0), 0);
    assert_eq!(tree.position(text), span((1, 4, 3), (3, 6, 17)));
}

#[test]
fn test_nested_elements_outline() {
    let tree = parse("<a>\n  <b c=\"d\"/>\n</a>");
    assert_eq!(
        outline(&tree, NodeId::ROOT),
        "root\n\
         \x20 element <a> 1:1-3:5\n\
         \x20   text \"\\n  \" 1:4-2:3\n\
         \x20   element <b c=\"d\"> 2:3-2:13\n\
         \x20   text \"\\n\" 2:13-3:1\n"
    );
}

#[test]
fn test_positions_count_utf16_units() {
    let tree = parse("<a>🤔</a>");
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.position(element), span((1, 1, 0), (1, 10, 9)));
    assert_eq!(
        tree.position(child(&tree, element, 0)),
        span((1, 4, 3), (1, 6, 5))
    );
}

#[test]
fn test_lone_carriage_return_breaks_the_line() {
    let tree = parse("<a>x\ry<b/><c/></a>");
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.position(element), span((1, 1, 0), (2, 14, 18)));
    assert_eq!(
        tree.position(child(&tree, element, 0)),
        span((1, 4, 3), (2, 2, 6))
    );
    assert_eq!(
        tree.position(child(&tree, element, 1)),
        span((2, 2, 6), (2, 6, 10))
    );
    assert_eq!(
        tree.position(child(&tree, element, 2)),
        span((2, 6, 10), (2, 10, 14))
    );
}

#[test]
fn test_empty_comment_splits_text() {
    let tree = parse("<a>x<!---->y</a>");
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.children(element).len(), 2);

    let before = child(&tree, element, 0);
    assert_eq!(tree.as_text(before), Some("x"));
    assert_eq!(tree.position(before), span((1, 4, 3), (1, 5, 4)));

    let after = child(&tree, element, 1);
    assert_eq!(tree.as_text(after), Some("y"));
    assert_eq!(tree.position(after), span((1, 12, 11), (1, 13, 12)));
    assert_eq!(tree.position(element), span((1, 1, 0), (1, 17, 16)));
}

#[test]
fn test_empty_comment_does_not_start_the_next_sibling() {
    let tree = parse("<a><!----><b/></a>");
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.children(element).len(), 1);
    assert_eq!(
        tree.position(child(&tree, element, 0)),
        span((1, 11, 10), (1, 15, 14))
    );
}

#[test]
fn test_cdata_longer_than_one_chunk() {
    let content = "a".repeat(70_000);
    let tree = parse(&format!("<a><![CDATA[{content}]]></a>"));
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.children(element).len(), 1);

    let cdata = child(&tree, element, 0);
    assert!(matches!(
        tree.get(cdata).map(|n| &n.node_type),
        Some(NodeType::Cdata(value)) if *value == content
    ));
    assert_eq!(
        tree.position(cdata),
        span((1, 4, 3), (1, 70_016, 70_015))
    );
}

#[test]
fn test_attributes_and_entities() {
    let tree = parse("<a x=\"&lt;1&gt;\" y='2' x=\"3\" xmlns:z=\"urn:z\"/>");
    let element = tree.as_element(child(&tree, NodeId::ROOT, 0)).unwrap();
    assert_eq!(element.attributes.len(), 3);
    assert_eq!(element.attributes["x"], "<1>");
    assert_eq!(element.attributes["y"], "2");
    assert_eq!(element.attributes["xmlns:z"], "urn:z");
    assert!(has_warned(
        "XML Parser",
        "namespace declarations are kept as plain attributes"
    ));
}

#[test]
fn test_from_bytes_replaces_invalid_utf8() {
    let tree = from_bytes(b"<a>\xFF</a>").unwrap();
    let element = child(&tree, NodeId::ROOT, 0);
    assert_eq!(tree.text_content(element), "\u{FFFD}");
}

#[test]
fn test_parsing_is_deterministic() {
    let input = "<?pi x?><r a=\"1\"><!--c--><![CDATA[d]]>e</r>";
    assert_eq!(parse(input), parse(input));
}

// ========== errors ==========

#[test]
fn test_syntax_errors() {
    assert_error(
        "<root unquoted=attribute>",
        "1:17: Unquoted attribute value",
        "syntax",
    );
    assert_error("<root>&foo;</root>", "1:12: Invalid character entity", "syntax");
    assert_error("<root>&copy;</root>", "1:13: Invalid character entity", "syntax");
    assert_error(
        "<root>&#65;&#x42;</root>",
        "1:12: Invalid character entity",
        "syntax",
    );
    assert_error(
        "<root><a><b><c/></a></b></root>",
        "1:21: Unexpected close tag",
        "syntax",
    );
    assert_error("<a>\n</b>", "2:5: Unexpected close tag", "syntax");
}

#[test]
fn test_sgml_declaration_is_rejected() {
    assert_error("<!ENTITY>", "1:10: Unexpected SGML declaration", "unexpected-sgml");
    let error = parse_error("<!ELEMENT a ANY><a/>");
    assert_eq!(error.kind, ErrorKind::UnexpectedSgml);
}

#[test]
fn test_doctype_name_errors() {
    assert_error("<!doctype>", "1:11: Expected doctype name", "doctype-name");
    assert_error("<!doctype !>", "1:13: Expected start of doctype name", "doctype-name");
    assert_error(
        "<!DOCTYPE name!>",
        "1:17: Expected doctype name character, whitespace, or doctype end",
        "doctype-name",
    );
}

#[test]
fn test_doctype_internal_subset_errors() {
    assert_error(
        "<!DOCTYPE name[<!ELEMENT greeting (#PCDATA)>]>",
        "1:47: Unexpected internal subset",
        "doctype-internal-subset",
    );
    assert_error(
        "<!DOCTYPE name [<!ELEMENT greeting (#PCDATA)>]>",
        "1:48: Unexpected internal subset",
        "doctype-internal-subset",
    );
    assert_error(
        "<!DOCTYPE name SYSTEM \"asd\" [<!ELEMENT greeting (#PCDATA)>]>",
        "1:61: Unexpected internal subset",
        "doctype-internal-subset",
    );
}

#[test]
fn test_doctype_external_identifier_errors() {
    assert_error(
        "<!DOCTYPE name !>",
        "1:18: Expected external identifier (`PUBLIC` or `SYSTEM`), whitespace, or doctype end",
        "doctype-external-identifier",
    );
    assert_error(
        "<!DOCTYPE name PUB>",
        "1:20: Expected external identifier (`PUBLIC` or `SYSTEM`)",
        "doctype-external-identifier",
    );
    assert_error(
        "<!DOCTYPE name SYSTEm>",
        "1:23: Expected external identifier (`PUBLIC` or `SYSTEM`)",
        "doctype-external-identifier",
    );
}

#[test]
fn test_doctype_public_literal_errors() {
    assert_error(
        "<!DOCTYPE name PUBLIC>",
        "1:23: Expected whitespace after `PUBLIC`",
        "doctype-public-literal",
    );
    assert_error(
        "<!DOCTYPE name PUBLIC !>",
        "1:25: Expected quote or apostrophe to start public literal",
        "doctype-public-literal",
    );
    assert_error(
        "<!DOCTYPE name PUBLIC \"🤔\">",
        "1:28: Expected pubid character in public literal",
        "doctype-public-literal",
    );
}

#[test]
fn test_doctype_system_literal_errors() {
    assert_error(
        "<!DOCTYPE name PUBLIC \"literal\"!>",
        "1:34: Expected whitespace after public literal",
        "doctype-system-literal",
    );
    assert_error(
        "<!DOCTYPE name SYSTEM>",
        "1:23: Expected whitespace after `SYSTEM`",
        "doctype-system-literal",
    );
    assert_error(
        "<!DOCTYPE name SYSTEM !>",
        "1:25: Expected quote or apostrophe to start system literal",
        "doctype-system-literal",
    );
    assert_error(
        "<!DOCTYPE name SYSTEM \"asd\" !>",
        "1:31: Expected whitespace or end of doctype",
        "doctype-system-literal",
    );
}

#[test]
fn test_unterminated_doctype_is_a_syntax_error() {
    assert_error("<!DOCTYPE name SYSTEM \"asd>", "1:28: Unexpected end", "syntax");
}
