//! Error taxonomy for the formatter.
//!
//! A plain `enum` with a hand-written `Display` impl rather than a
//! derive-macro crate, so the dependency stack doesn't grow a
//! `thiserror`/`anyhow` it didn't already need.

use std::fmt;

#[derive(Debug)]
pub enum FmtError {
    /// A malformed `Doc` was constructed: a `Text`/`Keyword` containing a
    /// newline, or similar programming-invariant violation. Not recoverable;
    /// indicates a bug in the visitor, not bad input.
    InvariantViolation(String),

    /// Post-traversal assertion failure: a comment token was never claimed
    /// by any node. In debug builds this is surfaced as an error; in release
    /// builds the binder instead appends the orphan to the root's trailing
    /// trivia and this variant is never constructed.
    TriviaExhaustion(String),

    /// Surfaced by the lexer (`src/lexer.rs`) or parser (`src/parser.rs`).
    Parse(String),

    /// A configuration file could not be parsed.
    Config(String),

    /// File I/O failure at the CLI boundary.
    Io(std::io::Error),
}

impl fmt::Display for FmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmtError::InvariantViolation(msg) => write!(f, "internal error: {msg}"),
            FmtError::TriviaExhaustion(msg) => write!(f, "trivia exhaustion: {msg}"),
            FmtError::Parse(msg) => write!(f, "parse error: {msg}"),
            FmtError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            FmtError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for FmtError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FmtError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FmtError {
    fn from(err: std::io::Error) -> Self {
        FmtError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, FmtError>;
