use xast_common::warning::warn_once;
use xast_dom::{AttributesMap, DomTree, ElementData, InstructionData, NodeType};

use super::builder::TreeBuilder;
use super::clock::Clock;
use super::doctype::parse_doctype;
use super::error::ParseError;
use super::reconcile::{comment_end, text_end};
use crate::tokenizer::{Attribute, Cursor, Event, Token};

const COMPONENT: &str = "XML Parser";

/// Tree construction.
///
/// Consumes the event stream produced by [`XmlTokenizer`](crate::XmlTokenizer)
/// and builds a [`DomTree`] in which every node except the root carries its
/// source position.
pub struct XmlParser {
    /// Input events from the tokenizer.
    tokens: Vec<Event>,

    builder: TreeBuilder,
}

impl XmlParser {
    /// Create a parser over a tokenizer's output.
    #[must_use]
    pub fn new(tokens: Vec<Event>) -> Self {
        Self {
            tokens,
            builder: TreeBuilder::new(),
        }
    }

    /// Build the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`]: a tokenizer error event, an SGML
    /// declaration, or a doctype the grammar rejects. No partial tree is
    /// returned.
    ///
    /// # Panics
    ///
    /// Panics if the event stream is not well nested, which the tokenizer
    /// never produces.
    pub fn run(mut self) -> Result<DomTree, ParseError> {
        let tokens = core::mem::take(&mut self.tokens);
        for event in tokens {
            let terminal = event.token.is_terminal();
            self.process_token(event)?;
            if terminal {
                break;
            }
        }
        Ok(self.builder.finish())
    }

    fn process_token(&mut self, event: Event) -> Result<(), ParseError> {
        let Event { token, cursor } = event;
        match token {
            Token::Doctype { body } => self.handle_doctype(&body, cursor)?,
            Token::SgmlDeclaration { .. } => {
                return Err(ParseError::unexpected_sgml(Clock::now(cursor)));
            }
            Token::ProcessingInstruction { name, body } => {
                self.handle_processing_instruction(name, body, cursor);
            }
            Token::Text { data } => self.handle_text(data, cursor),
            Token::Comment { data } => self.handle_comment(data, cursor),
            Token::EmptyComment => self.builder.skip_to(comment_end(Clock::now(cursor))),
            Token::CdataOpen => {
                let _ = self.builder.enter(NodeType::Cdata(String::new()), cursor);
            }
            Token::CdataChunk { data } => self.builder.append_to_current(&data),
            Token::CdataClose | Token::EndTag { .. } => {
                let _ = self.builder.exit(cursor);
            }
            Token::StartTag {
                name, attributes, ..
            } => self.handle_start_tag(name, attributes, cursor),
            Token::EndOfFile => {}
            Token::Error { message } => {
                return Err(ParseError::from_tokenizer(&message, Clock::now(cursor)));
            }
        }
        Ok(())
    }

    fn handle_doctype(&mut self, body: &str, cursor: Cursor) -> Result<(), ParseError> {
        let doctype =
            parse_doctype(body).map_err(|error| ParseError::from_doctype(error, Clock::now(cursor)))?;
        let _ = self.builder.leaf(NodeType::Doctype(doctype), cursor);
        Ok(())
    }

    fn handle_processing_instruction(&mut self, name: String, value: String, cursor: Cursor) {
        if name == "xml" {
            check_declared_encoding(&value);
        }
        let _ = self
            .builder
            .leaf(NodeType::Instruction(InstructionData { name, value }), cursor);
    }

    /// The tokenizer reports text once it has moved past it, so the end is
    /// computed from the text itself.
    fn handle_text(&mut self, data: String, cursor: Cursor) {
        let end = text_end(self.builder.baseline(), &data);
        let id = self.builder.leaf(NodeType::Text(data), cursor);
        self.builder.correct_end(id, end);
    }

    /// The tokenizer reports comments right before their final `>`.
    fn handle_comment(&mut self, data: String, cursor: Cursor) {
        let end = comment_end(Clock::now(cursor));
        let id = self.builder.leaf(NodeType::Comment(data), cursor);
        self.builder.correct_end(id, end);
    }

    fn handle_start_tag(&mut self, name: String, attributes: Vec<Attribute>, cursor: Cursor) {
        if attributes
            .iter()
            .any(|attribute| is_namespace_declaration(&attribute.name))
        {
            warn_once(
                COMPONENT,
                "namespace declarations are kept as plain attributes",
            );
        }

        let attributes: AttributesMap = attributes
            .into_iter()
            .map(|attribute| (attribute.name, attribute.value))
            .collect();
        let _ = self
            .builder
            .enter(NodeType::Element(ElementData { name, attributes }), cursor);
    }
}

fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}

/// Warn when an XML declaration names an encoding other than UTF-8, which is
/// the only one the input is ever decoded as.
fn check_declared_encoding(declaration: &str) {
    let Some(encoding) = declared_encoding(declaration) else {
        return;
    };
    if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
        warn_once(
            COMPONENT,
            &format!("declared encoding `{encoding}` ignored, input is read as UTF-8"),
        );
    }
}

/// The value of `encoding="..."` in the body of `<?xml ...?>`.
fn declared_encoding(declaration: &str) -> Option<&str> {
    let (_, rest) = declaration.split_once("encoding")?;
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let value = &rest[1..];
    value.split_once(quote).map(|(encoding, _)| encoding)
}
