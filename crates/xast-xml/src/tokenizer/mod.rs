//! XML tokenizer module.
//!
//! Turns [XML 1.0](https://www.w3.org/TR/xml/) source into a flat stream of
//! position-stamped events, enforcing well-formedness along the way.

/// Entity reference resolution.
mod entities;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;
/// XML tokenizer state machine implementation.
pub mod core;

pub use self::core::{TokenizerState, XmlTokenizer};
pub use token::{Attribute, Cursor, Event, Token};
