use strum_macros::Display;

use super::token::{Attribute, Cursor, Event, Token};
use crate::chars::{
    is_entity_char, is_entity_start_char, is_name_char, is_name_start_char, is_quote,
    is_whitespace,
};

/// CDATA content is handed out in pieces once it grows past this many bytes.
pub(super) const MAX_BUFFER_LENGTH: usize = 64 * 1024;

/// The tokenizer state machine.
///
/// Tokenization is strict: the first well-formedness violation ends the
/// token stream with an error event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Nothing read yet. A leading byte order mark is skipped.
    Begin,
    /// Whitespace before the first markup, which is dropped.
    BeginWhitespace,
    /// Character data.
    Text,
    /// After `&` in character data.
    TextEntity,
    /// After `<`.
    TagOpen,
    /// After `<!`, deciding between a comment, CDATA, a doctype or another
    /// declaration.
    MarkupDeclaration,
    /// Inside a quoted string of a declaration.
    MarkupDeclarationQuoted,
    /// After `<!DOCTYPE`.
    Doctype,
    /// Inside a quoted literal of a doctype.
    DoctypeQuoted,
    /// Inside the `[...]` internal subset of a doctype.
    DoctypeInternalSubset,
    /// Inside a quoted string of the internal subset.
    DoctypeInternalSubsetQuoted,
    /// After `<!--`.
    Comment,
    /// After a `-` in a comment.
    CommentEnding,
    /// After `--` in a comment; only `>` may follow.
    CommentEnded,
    /// After `<![CDATA[`.
    Cdata,
    /// After a `]` in a CDATA section.
    CdataEnding,
    /// After `]]` in a CDATA section.
    CdataEndingBracket,
    /// After `<?`, reading the target.
    ProcessingInstruction,
    /// Reading the body of a processing instruction.
    ProcessingInstructionBody,
    /// After a `?` in a processing instruction.
    ProcessingInstructionEnding,
    /// Reading a start tag name.
    TagName,
    /// After `/` in a start tag.
    SelfClosingStartTag,
    /// Between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// Whitespace after an attribute name.
    AfterAttributeName,
    /// After `=`.
    BeforeAttributeValue,
    /// Inside a quoted attribute value.
    AttributeValueQuoted,
    /// After `&` in an attribute value.
    AttributeValueEntity,
    /// Right after the closing quote of an attribute value.
    AfterAttributeValueQuoted,
    /// After `</`.
    EndTagOpen,
    /// Reading an end tag name.
    EndTagName,
    /// Whitespace after an end tag name.
    AfterEndTagName,
}

/// Splits XML source into a stream of [`Event`]s.
///
/// The tokenizer checks well-formedness as it goes: tags must nest, there
/// is a single root, text only appears inside it, and every entity reference
/// resolves. Each event is stamped with the [`Cursor`] at which it was
/// emitted, which is what the tree builder positions nodes from.
pub struct XmlTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) cursor: Cursor,
    pub(super) token_stream: Vec<Event>,
    /// Set once an end-of-file or error event has been emitted.
    pub(super) finished: bool,

    // Buffers for the construct being read.
    pub(super) text: String,
    pub(super) entity: String,
    pub(super) declaration: String,
    pub(super) doctype: String,
    pub(super) comment: String,
    pub(super) cdata: String,
    pub(super) instruction_name: String,
    pub(super) instruction_body: String,
    pub(super) tag_name: String,
    pub(super) attributes: Vec<Attribute>,
    pub(super) attribute_name: String,
    pub(super) attribute_value: String,
    /// The quote that closes the current literal.
    pub(super) quote: Option<char>,

    /// Names of the elements not yet closed, innermost last.
    pub(super) open_tags: Vec<String>,
    pub(super) saw_root: bool,
    pub(super) closed_root: bool,
    pub(super) saw_doctype: bool,
}

impl XmlTokenizer {
    /// Create a new tokenizer for the given input.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Begin,
            input,
            current_pos: 0,
            current_input_character: None,
            cursor: Cursor::default(),
            token_stream: Vec::new(),
            finished: false,
            text: String::new(),
            entity: String::new(),
            declaration: String::new(),
            doctype: String::new(),
            comment: String::new(),
            cdata: String::new(),
            instruction_name: String::new(),
            instruction_body: String::new(),
            tag_name: String::new(),
            attributes: Vec::new(),
            attribute_name: String::new(),
            attribute_value: String::new(),
            quote: None,
            open_tags: Vec::new(),
            saw_root: false,
            closed_root: false,
            saw_doctype: false,
        }
    }

    /// Consume the tokenizer and return the event stream.
    /// Call this after run() to get the events for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Event> {
        self.token_stream
    }

    /// The current state of the state machine.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Where the tokenizer is in the input.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Tokenize the whole input.
    ///
    /// The stream always ends with exactly one end-of-file or error event.
    pub fn run(&mut self) {
        while !self.finished {
            self.current_input_character = self.consume();
            let Some(c) = self.current_input_character else {
                self.handle_end_of_input();
                break;
            };

            match self.state {
                TokenizerState::Begin => self.handle_begin_state(c),
                TokenizerState::BeginWhitespace => self.handle_begin_whitespace_state(c),
                TokenizerState::Text => self.handle_text_state(c),
                TokenizerState::TextEntity | TokenizerState::AttributeValueEntity => {
                    self.handle_entity_state(c);
                }
                TokenizerState::TagOpen => self.handle_tag_open_state(c),
                TokenizerState::MarkupDeclaration => self.handle_markup_declaration_state(c),
                TokenizerState::MarkupDeclarationQuoted => {
                    self.handle_markup_declaration_quoted_state(c);
                }
                TokenizerState::Doctype => self.handle_doctype_state(c),
                TokenizerState::DoctypeQuoted => self.handle_doctype_quoted_state(c),
                TokenizerState::DoctypeInternalSubset => {
                    self.handle_doctype_internal_subset_state(c);
                }
                TokenizerState::DoctypeInternalSubsetQuoted => {
                    self.handle_doctype_internal_subset_quoted_state(c);
                }
                TokenizerState::Comment => self.handle_comment_state(c),
                TokenizerState::CommentEnding => self.handle_comment_ending_state(c),
                TokenizerState::CommentEnded => self.handle_comment_ended_state(c),
                TokenizerState::Cdata => self.handle_cdata_state(c),
                TokenizerState::CdataEnding => self.handle_cdata_ending_state(c),
                TokenizerState::CdataEndingBracket => self.handle_cdata_ending_bracket_state(c),
                TokenizerState::ProcessingInstruction => {
                    self.handle_processing_instruction_state(c);
                }
                TokenizerState::ProcessingInstructionBody => {
                    self.handle_processing_instruction_body_state(c);
                }
                TokenizerState::ProcessingInstructionEnding => {
                    self.handle_processing_instruction_ending_state(c);
                }
                TokenizerState::TagName => self.handle_tag_name_state(c),
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(c),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
                TokenizerState::AttributeName => self.handle_attribute_name_state(c),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(c),
                TokenizerState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state(c);
                }
                TokenizerState::AttributeValueQuoted => {
                    self.handle_attribute_value_quoted_state(c);
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state(c);
                }
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(c),
                TokenizerState::EndTagName => self.handle_end_tag_name_state(c),
                TokenizerState::AfterEndTagName => self.handle_after_end_tag_name_state(c),
            }
        }
    }

    // ===== Document level =====

    fn handle_begin_state(&mut self, c: char) {
        self.switch_to(TokenizerState::BeginWhitespace);
        if c != '\u{FEFF}' {
            self.handle_begin_whitespace_state(c);
        }
    }

    fn handle_begin_whitespace_state(&mut self, c: char) {
        if c == '<' {
            self.switch_to(TokenizerState::TagOpen);
        } else if !is_whitespace(c) {
            self.fail("Non-whitespace before first tag.");
        }
    }

    fn handle_text_state(&mut self, c: char) {
        if c == '<' {
            self.switch_to(TokenizerState::TagOpen);
            return;
        }

        let outside_root = !self.saw_root || self.closed_root;
        if outside_root && !is_whitespace(c) {
            self.fail("Text data outside of root node.");
        } else if c == '&' {
            self.entity.clear();
            self.switch_to(TokenizerState::TextEntity);
        } else {
            self.text.push(c);
        }
    }

    /// Shared by character data and attribute values; the state says where
    /// the resolved character goes.
    fn handle_entity_state(&mut self, c: char) {
        if c == ';' {
            self.flush_entity();
        } else if (self.entity.is_empty() && is_entity_start_char(c))
            || (!self.entity.is_empty() && is_entity_char(c))
        {
            self.entity.push(c);
        } else {
            self.fail("Invalid character in entity name");
        }
    }

    fn handle_tag_open_state(&mut self, c: char) {
        match c {
            '!' => {
                self.declaration.clear();
                self.switch_to(TokenizerState::MarkupDeclaration);
            }
            c if is_whitespace(c) => {}
            c if is_name_start_char(c) => {
                self.tag_name.clear();
                self.tag_name.push(c);
                self.switch_to(TokenizerState::TagName);
            }
            '/' => {
                self.tag_name.clear();
                self.switch_to(TokenizerState::EndTagOpen);
            }
            '?' => {
                self.instruction_name.clear();
                self.instruction_body.clear();
                self.switch_to(TokenizerState::ProcessingInstruction);
            }
            _ => self.fail("Unencoded <"),
        }
    }

    // ===== Declarations =====

    fn handle_markup_declaration_state(&mut self, c: char) {
        if c == '>' {
            let body = core::mem::take(&mut self.declaration);
            self.emit(Token::SgmlDeclaration { body });
            self.switch_to(TokenizerState::Text);
            return;
        }

        self.declaration.push(c);

        if self.declaration.eq_ignore_ascii_case("[CDATA[") {
            self.declaration.clear();
            self.cdata.clear();
            self.emit(Token::CdataOpen);
            self.switch_to(TokenizerState::Cdata);
        } else if self.declaration == "--" {
            self.declaration.clear();
            self.comment.clear();
            self.switch_to(TokenizerState::Comment);
        } else if self.declaration.eq_ignore_ascii_case("DOCTYPE") {
            if self.saw_doctype || self.saw_root {
                self.fail("Inappropriately located doctype declaration");
                return;
            }
            self.declaration.clear();
            self.doctype.clear();
            self.switch_to(TokenizerState::Doctype);
        } else if is_quote(c) {
            self.quote = Some(c);
            self.switch_to(TokenizerState::MarkupDeclarationQuoted);
        }
    }

    fn handle_markup_declaration_quoted_state(&mut self, c: char) {
        self.declaration.push(c);
        if Some(c) == self.quote {
            self.quote = None;
            self.switch_to(TokenizerState::MarkupDeclaration);
        }
    }

    fn handle_doctype_state(&mut self, c: char) {
        if c == '>' {
            let body = core::mem::take(&mut self.doctype);
            self.emit(Token::Doctype { body });
            self.saw_doctype = true;
            self.switch_to(TokenizerState::Text);
            return;
        }

        self.doctype.push(c);
        if c == '[' {
            self.switch_to(TokenizerState::DoctypeInternalSubset);
        } else if is_quote(c) {
            self.quote = Some(c);
            self.switch_to(TokenizerState::DoctypeQuoted);
        }
    }

    fn handle_doctype_quoted_state(&mut self, c: char) {
        self.doctype.push(c);
        if Some(c) == self.quote {
            self.quote = None;
            self.switch_to(TokenizerState::Doctype);
        }
    }

    fn handle_doctype_internal_subset_state(&mut self, c: char) {
        self.doctype.push(c);
        if c == ']' {
            self.switch_to(TokenizerState::Doctype);
        } else if is_quote(c) {
            self.quote = Some(c);
            self.switch_to(TokenizerState::DoctypeInternalSubsetQuoted);
        }
    }

    fn handle_doctype_internal_subset_quoted_state(&mut self, c: char) {
        self.doctype.push(c);
        if Some(c) == self.quote {
            self.quote = None;
            self.switch_to(TokenizerState::DoctypeInternalSubset);
        }
    }

    // ===== Comments =====

    fn handle_comment_state(&mut self, c: char) {
        if c == '-' {
            self.switch_to(TokenizerState::CommentEnding);
        } else {
            self.comment.push(c);
        }
    }

    fn handle_comment_ending_state(&mut self, c: char) {
        if c == '-' {
            if self.comment.is_empty() {
                self.emit(Token::EmptyComment);
            } else {
                let data = core::mem::take(&mut self.comment);
                self.emit(Token::Comment { data });
            }
            self.switch_to(TokenizerState::CommentEnded);
        } else {
            self.comment.push('-');
            self.comment.push(c);
            self.switch_to(TokenizerState::Comment);
        }
    }

    fn handle_comment_ended_state(&mut self, c: char) {
        if c == '>' {
            self.switch_to(TokenizerState::Text);
        } else {
            self.fail("Malformed comment");
        }
    }

    // ===== CDATA sections =====

    fn handle_cdata_state(&mut self, c: char) {
        if c == ']' {
            self.switch_to(TokenizerState::CdataEnding);
        } else {
            self.push_cdata(c);
        }
    }

    fn handle_cdata_ending_state(&mut self, c: char) {
        if c == ']' {
            self.switch_to(TokenizerState::CdataEndingBracket);
        } else {
            self.push_cdata(']');
            self.push_cdata(c);
            self.switch_to(TokenizerState::Cdata);
        }
    }

    fn handle_cdata_ending_bracket_state(&mut self, c: char) {
        match c {
            '>' => {
                self.flush_cdata();
                self.emit(Token::CdataClose);
                self.switch_to(TokenizerState::Text);
            }
            // `]]]>` ends the section with one `]` of content.
            ']' => self.push_cdata(']'),
            _ => {
                self.push_cdata(']');
                self.push_cdata(']');
                self.push_cdata(c);
                self.switch_to(TokenizerState::Cdata);
            }
        }
    }

    // ===== Processing instructions =====

    fn handle_processing_instruction_state(&mut self, c: char) {
        if c == '?' {
            self.switch_to(TokenizerState::ProcessingInstructionEnding);
        } else if is_whitespace(c) {
            self.switch_to(TokenizerState::ProcessingInstructionBody);
        } else {
            self.instruction_name.push(c);
        }
    }

    fn handle_processing_instruction_body_state(&mut self, c: char) {
        if self.instruction_body.is_empty() && is_whitespace(c) {
            return;
        }
        if c == '?' {
            self.switch_to(TokenizerState::ProcessingInstructionEnding);
        } else {
            self.instruction_body.push(c);
        }
    }

    fn handle_processing_instruction_ending_state(&mut self, c: char) {
        if c == '>' {
            let name = core::mem::take(&mut self.instruction_name);
            let body = core::mem::take(&mut self.instruction_body);
            self.emit(Token::ProcessingInstruction { name, body });
            self.switch_to(TokenizerState::Text);
        } else {
            self.instruction_body.push('?');
            self.instruction_body.push(c);
            self.switch_to(TokenizerState::ProcessingInstructionBody);
        }
    }

    // ===== Start tags =====

    fn handle_tag_name_state(&mut self, c: char) {
        if is_name_char(c) {
            self.tag_name.push(c);
            return;
        }

        self.attributes.clear();
        match c {
            '>' => self.emit_start_tag(false),
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            c if is_whitespace(c) => self.switch_to(TokenizerState::BeforeAttributeName),
            _ => self.fail("Invalid character in tag name"),
        }
    }

    fn handle_self_closing_start_tag_state(&mut self, c: char) {
        if c == '>' {
            self.emit_start_tag(true);
            self.emit_end_tag();
        } else {
            self.fail("Forward-slash in opening tag not followed by >");
        }
    }

    fn handle_before_attribute_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace(c) => {}
            '>' => self.emit_start_tag(false),
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            c if is_name_start_char(c) => {
                self.attribute_name.clear();
                self.attribute_name.push(c);
                self.attribute_value.clear();
                self.switch_to(TokenizerState::AttributeName);
            }
            _ => self.fail("Invalid attribute name"),
        }
    }

    fn handle_attribute_name_state(&mut self, c: char) {
        match c {
            '=' => self.switch_to(TokenizerState::BeforeAttributeValue),
            '>' => self.fail("Attribute without value"),
            c if is_whitespace(c) => self.switch_to(TokenizerState::AfterAttributeName),
            c if is_name_char(c) => self.attribute_name.push(c),
            _ => self.fail("Invalid attribute name"),
        }
    }

    fn handle_after_attribute_name_state(&mut self, c: char) {
        match c {
            '=' => self.switch_to(TokenizerState::BeforeAttributeValue),
            c if is_whitespace(c) => {}
            _ => self.fail("Attribute without value"),
        }
    }

    fn handle_before_attribute_value_state(&mut self, c: char) {
        match c {
            c if is_whitespace(c) => {}
            c if is_quote(c) => {
                self.quote = Some(c);
                self.switch_to(TokenizerState::AttributeValueQuoted);
            }
            _ => self.fail("Unquoted attribute value"),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, c: char) {
        if Some(c) == self.quote {
            self.quote = None;
            self.finish_attribute();
            self.switch_to(TokenizerState::AfterAttributeValueQuoted);
        } else if c == '&' {
            self.entity.clear();
            self.switch_to(TokenizerState::AttributeValueEntity);
        } else {
            self.attribute_value.push(c);
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self, c: char) {
        match c {
            c if is_whitespace(c) => self.switch_to(TokenizerState::BeforeAttributeName),
            '>' => self.emit_start_tag(false),
            '/' => self.switch_to(TokenizerState::SelfClosingStartTag),
            c if is_name_start_char(c) => self.fail("No whitespace between attributes"),
            _ => self.fail("Invalid attribute name"),
        }
    }

    // ===== End tags =====

    fn handle_end_tag_open_state(&mut self, c: char) {
        if is_whitespace(c) {
            return;
        }
        if is_name_start_char(c) {
            self.tag_name.push(c);
            self.switch_to(TokenizerState::EndTagName);
        } else {
            self.fail("Invalid tagname in closing tag.");
        }
    }

    fn handle_end_tag_name_state(&mut self, c: char) {
        match c {
            '>' => self.emit_end_tag(),
            c if is_name_char(c) => self.tag_name.push(c),
            c if is_whitespace(c) => self.switch_to(TokenizerState::AfterEndTagName),
            _ => self.fail("Invalid tagname in closing tag"),
        }
    }

    fn handle_after_end_tag_name_state(&mut self, c: char) {
        match c {
            c if is_whitespace(c) => {}
            '>' => self.emit_end_tag(),
            _ => self.fail("Invalid characters in closing tag"),
        }
    }

    // ===== End of input =====

    fn handle_end_of_input(&mut self) {
        if self.saw_root && !self.closed_root {
            self.fail("Unclosed root tag");
            return;
        }

        if !matches!(
            self.state,
            TokenizerState::Begin | TokenizerState::BeginWhitespace | TokenizerState::Text
        ) {
            self.fail("Unexpected end");
            return;
        }

        self.emit_eof_token();
    }
}
