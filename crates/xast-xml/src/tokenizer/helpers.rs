//! Helper functions for the XML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions
//! - Input handling with position tracking
//! - Token emission and buffered text
//! - Tag, attribute and entity bookkeeping
//! - Errors

use core::mem;

use super::core::{MAX_BUFFER_LENGTH, TokenizerState, XmlTokenizer};
use super::entities::resolve_entity;
use super::token::{Attribute, Event, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl XmlTokenizer {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl XmlTokenizer {
    /// Returns the character at the current position and advances past it,
    /// moving the cursor along. Returns None at the end of input.
    ///
    /// `current_input_character` still holds the previous character here.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        self.cursor
            .advance(c, self.current_input_character == Some('\r'));
        Some(c)
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl XmlTokenizer {
    /// Adds a token to the output stream, stamped with the current cursor.
    ///
    /// Any pending character data is emitted first, so text always precedes
    /// the markup that ended it.
    pub(super) fn emit(&mut self, token: Token) {
        self.flush_text();
        self.push_event(token);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.emit(Token::new_eof());
        self.finished = true;
    }

    fn push_event(&mut self, token: Token) {
        self.token_stream.push(Event {
            token,
            cursor: self.cursor,
        });
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let data = mem::take(&mut self.text);
            self.push_event(Token::new_text(data));
        }
    }

    /// Append to the open CDATA section, handing out a chunk when the buffer
    /// is full.
    pub(super) fn push_cdata(&mut self, c: char) {
        self.cdata.push(c);
        if self.cdata.len() >= MAX_BUFFER_LENGTH {
            self.flush_cdata();
        }
    }

    pub(super) fn flush_cdata(&mut self) {
        if !self.cdata.is_empty() {
            let data = mem::take(&mut self.cdata);
            self.emit(Token::CdataChunk { data });
        }
    }
}

// =============================================================================
// Tag Helpers
// =============================================================================

impl XmlTokenizer {
    /// Emit the start tag being read and open its element.
    pub(super) fn emit_start_tag(&mut self, self_closing: bool) {
        self.saw_root = true;
        self.open_tags.push(self.tag_name.clone());

        let attributes = mem::take(&mut self.attributes);
        self.emit(Token::StartTag {
            name: self.tag_name.clone(),
            attributes,
            self_closing,
        });

        if !self_closing {
            self.tag_name.clear();
            self.switch_to(TokenizerState::Text);
        }
    }

    /// Close the element named by the tag just read, which must be the
    /// innermost open one.
    pub(super) fn emit_end_tag(&mut self) {
        let name = mem::take(&mut self.tag_name);

        match self.open_tags.last().map(|open| *open == name) {
            None => {
                self.fail(&format!("Unmatched closing tag: {name}"));
            }
            Some(false) => {
                self.fail("Unexpected close tag");
            }
            Some(true) => {
                let _ = self.open_tags.pop();
                self.emit(Token::EndTag { name });
                if self.open_tags.is_empty() {
                    self.closed_root = true;
                }
                self.switch_to(TokenizerState::Text);
            }
        }
    }

    /// Record the attribute just read. The first of several attributes with
    /// the same name wins.
    pub(super) fn finish_attribute(&mut self) {
        let name = mem::take(&mut self.attribute_name);
        let value = mem::take(&mut self.attribute_value);
        if !self.attributes.iter().any(|attribute| attribute.name == name) {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Resolve the entity reference just closed by `;` and return to where
    /// it appeared.
    pub(super) fn flush_entity(&mut self) {
        let entity = mem::take(&mut self.entity);
        let Some(c) = resolve_entity(&entity) else {
            self.fail("Invalid character entity");
            return;
        };

        if self.state == TokenizerState::AttributeValueEntity {
            self.attribute_value.push(c);
            self.switch_to(TokenizerState::AttributeValueQuoted);
        } else {
            self.text.push(c);
            self.switch_to(TokenizerState::Text);
        }
    }
}

// =============================================================================
// Error Helpers
// =============================================================================

impl XmlTokenizer {
    /// End the stream with an error.
    ///
    /// The message is followed by a diagnostic suffix giving the 0-based
    /// line and column and the offending character.
    pub(super) fn fail(&mut self, reason: &str) {
        let character = self
            .current_input_character
            .map(String::from)
            .unwrap_or_default();
        let message = format!(
            "{reason}\nLine: {}\nColumn: {}\nChar: {character}",
            self.cursor.line, self.cursor.column
        );
        self.emit(Token::Error { message });
        self.finished = true;
    }
}
