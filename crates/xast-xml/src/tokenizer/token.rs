use core::fmt;

use xast_common::Point;

/// The tokenizer's own view of where it is.
///
/// Unlike [`Point`], line and column are 0-based: the cursor counts what has
/// been consumed, so after reading `<a>` on the first line it sits at line 0,
/// column 3, offset 3. Columns and offsets count UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line breaks consumed so far.
    pub line: usize,
    /// Code units consumed since the last line break.
    pub column: usize,
    /// Code units consumed since the start of input.
    pub offset: usize,
}

impl Cursor {
    /// Account for one consumed character.
    ///
    /// `\n`, `\r` and `\r\n` each count as one line break, so the `\n` of a
    /// `\r\n` pair only moves the offset.
    pub(super) fn advance(&mut self, c: char, after_carriage_return: bool) {
        let width = c.len_utf16();
        self.offset += width;
        match c {
            '\n' if after_carriage_return => {}
            '\n' | '\r' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += width,
        }
    }
}

impl From<Cursor> for Point {
    /// Convert the 0-based cursor into a 1-based source point.
    fn from(cursor: Cursor) -> Self {
        Self::new(cursor.line + 1, cursor.column + 1, cursor.offset)
    }
}

/// An attribute on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, as written.
    pub name: String,
    /// The value, with entity references expanded.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The events the tokenizer emits to the tree construction stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE ...>`: everything after the keyword, before the final `>`.
    Doctype {
        /// The raw declaration body, leading whitespace included.
        body: String,
    },

    /// Any other `<!...>` declaration (`<!ENTITY ...>`, `<!ELEMENT ...>`).
    SgmlDeclaration {
        /// The raw declaration body after `<!`.
        body: String,
    },

    /// `<?name body?>`.
    ProcessingInstruction {
        /// The instruction target.
        name: String,
        /// The rest of the instruction, leading whitespace removed.
        body: String,
    },

    /// A run of character data, entity references expanded.
    Text {
        /// The character data.
        data: String,
    },

    /// `<!--data-->`. Emitted once the closing `--` has been read.
    Comment {
        /// The comment body, without delimiters.
        data: String,
    },

    /// `<!---->`. Produces no node, but moves positions past the markup.
    EmptyComment,

    /// `<![CDATA[` has been read.
    CdataOpen,

    /// Part of the content of the open CDATA section.
    CdataChunk {
        /// The next piece of the section content.
        data: String,
    },

    /// `]]>` has been read.
    CdataClose,

    /// `<name attr="value">` or `<name/>`. A self-closing tag is followed by
    /// its own [`Token::EndTag`].
    StartTag {
        /// The element name.
        name: String,
        /// Attributes in source order, duplicates removed.
        attributes: Vec<Attribute>,
        /// Whether the tag ended in `/>`.
        self_closing: bool,
    },

    /// `</name>`, already matched against the innermost open element.
    EndTag {
        /// The element name.
        name: String,
    },

    /// The input is exhausted and well-formed.
    EndOfFile,

    /// Tokenization failed. Always the last event.
    Error {
        /// What went wrong, followed by a multi-line diagnostic suffix.
        message: String,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn new_text(data: impl Into<String>) -> Self {
        Self::Text { data: data.into() }
    }

    /// Create an end-of-file token.
    #[must_use]
    pub const fn new_eof() -> Self {
        Self::EndOfFile
    }

    /// Whether this token ends the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::EndOfFile | Self::Error { .. })
    }
}

/// A token stamped with the tokenizer cursor at the moment it was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// What was read.
    pub token: Token,
    /// Where the tokenizer was when it emitted the token.
    pub cursor: Cursor,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { body } => write!(f, "<!DOCTYPE{body}>"),
            Self::SgmlDeclaration { body } => write!(f, "<!{body}>"),
            Self::ProcessingInstruction { name, body } => write!(f, "<?{name} {body}?>"),
            Self::Text { data } => write!(f, "{data:?}"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::EmptyComment => write!(f, "<!---->"),
            Self::CdataOpen => write!(f, "<![CDATA["),
            Self::CdataChunk { data } => write!(f, "{data:?}"),
            Self::CdataClose => write!(f, "]]>"),
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                for attribute in attributes {
                    write!(f, " {}=\"{}\"", attribute.name, attribute.value)?;
                }
                if *self_closing {
                    write!(f, "/")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::EndOfFile => write!(f, "EOF"),
            Self::Error { message } => {
                write!(f, "error: {}", message.lines().next().unwrap_or_default())
            }
        }
    }
}
