//! XML tokenizer and tree builder producing positioned xast trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **XML Tokenizer**: a strict, well-formedness checking state machine
//!   emitting position-stamped events (tags, text, comments, CDATA,
//!   processing instructions, doctypes)
//! - **Tree Builder**: turns the events into a [`DomTree`] whose nodes carry
//!   the span they occupy in the source, in UTF-16 code units
//! - **Doctype Grammar**: validates `<!DOCTYPE ...>` and extracts the name and
//!   the public and system identifiers
//!
//! # Not Implemented
//!
//! - Namespace resolution (`xmlns` attributes are kept as plain attributes)
//! - Internal DTD subsets and entity declarations
//! - Validation against a DTD or schema
//! - Error recovery: the first error ends the parse
//!
//! # Example
//!
//! ```
//! use xast_xml::from_xml;
//!
//! let tree = from_xml("<greeting lang=\"en\">hi</greeting>").unwrap();
//! let element = tree.document_element().unwrap();
//! assert_eq!(tree.as_element(element).unwrap().name, "greeting");
//! assert_eq!(tree.position(element).unwrap().to_string(), "1:1-1:34");
//! ```

mod chars;
/// XML parser and tree construction.
pub mod parser;
/// XML tokenizer for converting input into events.
pub mod tokenizer;

pub use parser::{DoctypeError, ErrorKind, ParseError, Violation, XmlParser, parse_doctype};
pub use tokenizer::{Attribute, Cursor, Event, Token, XmlTokenizer};

use xast_dom::DomTree;

/// Tokenize `input` and build the tree from its events.
fn build(input: String) -> Result<DomTree, ParseError> {
    let mut tokenizer = XmlTokenizer::new(input);
    tokenizer.run();
    XmlParser::new(tokenizer.into_tokens()).run()
}

/// Parse an XML document into a positioned tree.
///
/// # Errors
///
/// Returns the first well-formedness violation, unsupported declaration or
/// malformed doctype, located at the point where parsing stopped.
pub fn from_xml(input: &str) -> Result<DomTree, ParseError> {
    build(input.to_string())
}

/// Parse an XML document given as bytes.
///
/// The bytes are decoded as UTF-8; invalid sequences become U+FFFD.
///
/// # Errors
///
/// See [`from_xml`].
pub fn from_bytes(input: &[u8]) -> Result<DomTree, ParseError> {
    build(String::from_utf8_lossy(input).into_owned())
}
