//! Doctype grammar.
//!
//! [XML 1.0 § 2.8 Prolog and Document Type Declaration](https://www.w3.org/TR/xml/#sec-prolog-dtd)
//!
//! "doctypedecl ::= '<!DOCTYPE' S Name (S ExternalID)? S? ('[' intSubset ']' S?)? '>'"
//!
//! The tokenizer hands over the raw declaration body, everything between
//! `<!DOCTYPE` and the closing `>`. This module checks it against the
//! production above, without the internal subset (which is rejected), and
//! pulls out the name and the external identifier literals.

use core::ops::Range;

use thiserror::Error;
use xast_dom::DoctypeData;

use super::error::ErrorKind;
use crate::chars::{is_name_char, is_name_start_char, is_pubid_char, is_quote, is_whitespace};

/// What was wrong with a doctype declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// No whitespace after the `DOCTYPE` keyword.
    #[error("Expected doctype name")]
    MissingName,
    /// The name is missing or starts with a character names cannot start with.
    #[error("Expected start of doctype name")]
    InvalidNameStart,
    /// A character names cannot contain.
    #[error("Expected doctype name character, whitespace, or doctype end")]
    InvalidNameCharacter,
    /// A `[...]` internal subset, which is not supported.
    #[error("Unexpected internal subset")]
    InternalSubset,
    /// Something other than `PUBLIC`, `SYSTEM` or the end after the name.
    #[error("Expected external identifier (`PUBLIC` or `SYSTEM`), whitespace, or doctype end")]
    ExpectedExternalIdentifierOrEnd,
    /// A misspelled `PUBLIC` or `SYSTEM` keyword.
    #[error("Expected external identifier (`PUBLIC` or `SYSTEM`)")]
    InvalidExternalIdentifier,
    /// `PUBLIC` not followed by whitespace.
    #[error("Expected whitespace after `PUBLIC`")]
    MissingWhitespaceAfterPublic,
    /// `SYSTEM` not followed by whitespace.
    #[error("Expected whitespace after `SYSTEM`")]
    MissingWhitespaceAfterSystem,
    /// No quoted public identifier after `PUBLIC`.
    #[error("Expected quote or apostrophe to start public literal")]
    MissingPublicLiteral,
    /// A character not allowed in public identifiers, or an unterminated one.
    #[error("Expected pubid character in public literal")]
    InvalidPubidCharacter,
    /// The public identifier not followed by whitespace.
    #[error("Expected whitespace after public literal")]
    MissingWhitespaceAfterPublicLiteral,
    /// No quoted system identifier where one is required.
    #[error("Expected quote or apostrophe to start system literal")]
    MissingSystemLiteral,
    /// The body ended inside the system identifier.
    #[error("Expected quote or apostrophe to end system literal")]
    UnterminatedSystemLiteral,
    /// Content after the system identifier.
    #[error("Expected whitespace or end of doctype")]
    ExpectedEnd,
}

impl Violation {
    /// The rule this violation belongs to.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::MissingName | Self::InvalidNameStart | Self::InvalidNameCharacter => {
                ErrorKind::DoctypeName
            }
            Self::InternalSubset => ErrorKind::DoctypeInternalSubset,
            Self::ExpectedExternalIdentifierOrEnd | Self::InvalidExternalIdentifier => {
                ErrorKind::DoctypeExternalIdentifier
            }
            Self::MissingWhitespaceAfterPublic
            | Self::MissingPublicLiteral
            | Self::InvalidPubidCharacter => ErrorKind::DoctypePublicLiteral,
            Self::MissingWhitespaceAfterSystem
            | Self::MissingWhitespaceAfterPublicLiteral
            | Self::MissingSystemLiteral
            | Self::UnterminatedSystemLiteral
            | Self::ExpectedEnd => ErrorKind::DoctypeSystemLiteral,
        }
    }
}

/// A doctype body the grammar rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{violation}")]
pub struct DoctypeError {
    /// What was wrong.
    pub violation: Violation,
    /// Index, in characters, of the offending character within the body.
    /// Equals the body length when the body ended too early.
    pub offset: usize,
}

impl DoctypeError {
    /// The rule this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.violation.kind()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Public,
    System,
}

impl Keyword {
    const fn text(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::System => "SYSTEM",
        }
    }

    /// Where the machine goes once the whole keyword has matched.
    const fn after(self) -> State {
        match self {
            Self::Public => State::AfterPublic,
            Self::System => State::AfterSystem,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Begin,
    BeforeName,
    InName { start: usize },
    AfterName,
    /// `matched` characters of the keyword have been seen.
    InExternalId { keyword: Keyword, matched: usize },
    AfterPublic,
    AfterSystem,
    BeforePublicLiteral,
    InPublicLiteral { start: usize, quote: char },
    AfterPublicLiteral,
    BeforeSystemLiteral,
    InSystemLiteral { start: usize, quote: char },
    AfterSystemLiteral,
}

/// A field completed by a transition, as a range of character indices.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Capture {
    Name(Range<usize>),
    Public(Range<usize>),
    System(Range<usize>),
}

type Step = Result<(State, Option<Capture>), Violation>;

const fn next(state: State) -> Step {
    Ok((state, None))
}

/// Advance the machine by one character, or by the end of the body when
/// `code` is `None`.
///
/// Every state either accepts the end of the body or fails on it, so the
/// machine never has to be checked for a final state.
fn transition(state: State, index: usize, code: Option<char>) -> Step {
    let space = code.is_some_and(is_whitespace);

    match state {
        State::Begin => {
            if space {
                next(State::BeforeName)
            } else {
                Err(Violation::MissingName)
            }
        }

        State::BeforeName => match code {
            _ if space => next(state),
            Some(c) if is_name_start_char(c) => next(State::InName { start: index }),
            _ => Err(Violation::InvalidNameStart),
        },

        State::InName { start } => match code {
            Some(c) if is_name_char(c) => next(state),
            _ if space || code.is_none() => {
                Ok((State::AfterName, Some(Capture::Name(start..index))))
            }
            Some('[') => Err(Violation::InternalSubset),
            _ => Err(Violation::InvalidNameCharacter),
        },

        State::AfterName => match code {
            _ if space || code.is_none() => next(state),
            Some('P') => next(State::InExternalId {
                keyword: Keyword::Public,
                matched: 1,
            }),
            Some('S') => next(State::InExternalId {
                keyword: Keyword::System,
                matched: 1,
            }),
            Some('[') => Err(Violation::InternalSubset),
            _ => Err(Violation::ExpectedExternalIdentifierOrEnd),
        },

        State::InExternalId { keyword, matched } => {
            let text = keyword.text();
            let expected = text[matched..].chars().next();
            if code.is_none() || code != expected {
                Err(Violation::InvalidExternalIdentifier)
            } else if matched + 1 == text.len() {
                next(keyword.after())
            } else {
                next(State::InExternalId {
                    keyword,
                    matched: matched + 1,
                })
            }
        }

        State::AfterPublic => {
            if space {
                next(State::BeforePublicLiteral)
            } else {
                Err(Violation::MissingWhitespaceAfterPublic)
            }
        }

        State::AfterSystem => {
            if space {
                next(State::BeforeSystemLiteral)
            } else {
                Err(Violation::MissingWhitespaceAfterSystem)
            }
        }

        State::BeforePublicLiteral => match code {
            _ if space => next(state),
            Some(quote) if is_quote(quote) => next(State::InPublicLiteral {
                start: index + 1,
                quote,
            }),
            _ => Err(Violation::MissingPublicLiteral),
        },

        State::InPublicLiteral { start, quote } => match code {
            Some(c) if c == quote => Ok((
                State::AfterPublicLiteral,
                Some(Capture::Public(start..index)),
            )),
            Some(c) if is_pubid_char(c) => next(state),
            _ => Err(Violation::InvalidPubidCharacter),
        },

        State::AfterPublicLiteral => {
            if space {
                next(State::BeforeSystemLiteral)
            } else {
                Err(Violation::MissingWhitespaceAfterPublicLiteral)
            }
        }

        State::BeforeSystemLiteral => match code {
            _ if space => next(state),
            Some(quote) if is_quote(quote) => next(State::InSystemLiteral {
                start: index + 1,
                quote,
            }),
            _ => Err(Violation::MissingSystemLiteral),
        },

        State::InSystemLiteral { start, quote } => match code {
            None => Err(Violation::UnterminatedSystemLiteral),
            Some(c) if c == quote => Ok((
                State::AfterSystemLiteral,
                Some(Capture::System(start..index)),
            )),
            Some(_) => next(state),
        },

        State::AfterSystemLiteral => match code {
            _ if space || code.is_none() => next(state),
            Some('[') => Err(Violation::InternalSubset),
            _ => Err(Violation::ExpectedEnd),
        },
    }
}

/// Parse a doctype declaration body.
///
/// `body` is what follows the `DOCTYPE` keyword, up to but excluding the
/// closing `>`, so `<!DOCTYPE html SYSTEM "about:legacy-compat">` has the
/// body ` html SYSTEM "about:legacy-compat"`.
///
/// # Errors
///
/// Returns a [`DoctypeError`] at the first character that does not fit the
/// grammar, or at the end of the body if it is incomplete.
///
/// # Example
///
/// ```
/// use xast_xml::parse_doctype;
///
/// let doctype = parse_doctype(" note SYSTEM \"note.dtd\"").unwrap();
/// assert_eq!(doctype.name, "note");
/// assert_eq!(doctype.public, None);
/// assert_eq!(doctype.system.as_deref(), Some("note.dtd"));
/// ```
pub fn parse_doctype(body: &str) -> Result<DoctypeData, DoctypeError> {
    let chars: Vec<char> = body.chars().collect();
    let slice = |range: Range<usize>| -> String { chars[range].iter().collect() };

    let mut doctype = DoctypeData::default();
    let mut state = State::Begin;

    for index in 0..=chars.len() {
        let code = chars.get(index).copied();
        let (next_state, capture) = transition(state, index, code)
            .map_err(|violation| DoctypeError {
                violation,
                offset: index,
            })?;

        match capture {
            Some(Capture::Name(range)) => doctype.name = slice(range),
            Some(Capture::Public(range)) => doctype.public = Some(slice(range)),
            Some(Capture::System(range)) => doctype.system = Some(slice(range)),
            None => {}
        }
        state = next_state;
    }

    Ok(doctype)
}
