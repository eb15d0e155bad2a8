//! Error types for ratlang.
//!
//! Only malformed input is a recoverable error. Calling an accessor on the
//! wrong kind of node, or building an automaton from an unnumbered tree, is a
//! caller bug and panics.

use thiserror::Error;

/// Failure to read a rational expression from text. Offsets are byte
/// offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("group opened at offset {offset} is never closed")]
    UnclosedGroup { offset: usize },
}

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
