//! Parse failures.
//!
//! Every way a document can be rejected ends up as a [`ParseError`]: the
//! tokenizer's well-formedness violations, declarations that are not
//! supported, and doctypes the doctype grammar rejects.

use strum_macros::{AsRefStr, Display};
use thiserror::Error;
use xast_common::Point;

use super::doctype::DoctypeError;

/// Namespace of every rule id.
pub const SOURCE: &str = "xast-xml";

/// The rule a [`ParseError`] belongs to.
///
/// The kebab-case name of each variant is the rule, so
/// `ErrorKind::DoctypeName` displays as `doctype-name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    /// The tokenizer rejected the input.
    Syntax,
    /// A `<!...>` declaration other than a doctype, comment or CDATA section.
    UnexpectedSgml,
    /// A doctype without a valid name.
    DoctypeName,
    /// A doctype with an internal subset.
    DoctypeInternalSubset,
    /// A doctype with a malformed `PUBLIC` or `SYSTEM` keyword, or trailing
    /// content.
    DoctypeExternalIdentifier,
    /// A malformed public identifier literal.
    DoctypePublicLiteral,
    /// A malformed system identifier literal.
    DoctypeSystemLiteral,
}

/// Why a document could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{place}: {reason}")]
pub struct ParseError {
    /// Human readable description, without location information.
    pub reason: String,
    /// Where parsing stopped.
    pub place: Point,
    /// Which rule was broken.
    pub kind: ErrorKind,
}

impl ParseError {
    /// Create an error of the given kind.
    #[must_use]
    pub fn new(reason: impl Into<String>, place: Point, kind: ErrorKind) -> Self {
        Self {
            reason: reason.into(),
            place,
            kind,
        }
    }

    /// The namespaced rule id, e.g. `xast-xml:doctype-name`.
    #[must_use]
    pub fn rule_id(&self) -> String {
        format!("{SOURCE}:{}", self.kind)
    }

    /// Translate a tokenizer error message. Only the text before the
    /// tokenizer's `\nLine` diagnostic suffix is kept.
    #[must_use]
    pub fn from_tokenizer(message: &str, place: Point) -> Self {
        let reason = message
            .split_once("\nLine")
            .map_or(message, |(reason, _)| reason);
        Self::new(reason, place, ErrorKind::Syntax)
    }

    /// A declaration such as `<!ENTITY ...>` was found.
    #[must_use]
    pub fn unexpected_sgml(place: Point) -> Self {
        Self::new("Unexpected SGML declaration", place, ErrorKind::UnexpectedSgml)
    }

    /// Translate a doctype grammar failure.
    #[must_use]
    pub fn from_doctype(error: DoctypeError, place: Point) -> Self {
        Self::new(error.to_string(), place, error.kind())
    }
}
