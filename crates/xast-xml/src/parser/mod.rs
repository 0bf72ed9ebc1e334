//! XML parser module for tree construction.

/// The stack of open nodes.
pub mod builder;
/// Cursor to point conversion.
pub mod clock;
/// Tree construction from tokenizer events.
pub mod core;
/// The doctype declaration grammar.
pub mod doctype;
/// Parse errors and their rule ids.
pub mod error;
/// End-position corrections for text and comments.
pub mod reconcile;

pub use self::core::XmlParser;
pub use builder::TreeBuilder;
pub use clock::Clock;
pub use doctype::{DoctypeError, Violation, parse_doctype};
pub use error::{ErrorKind, ParseError, SOURCE};
