//! Lexical trivia: comments and blank-line breaks that sit outside the VHDL
//! grammar but must survive formatting untouched.
//!
//! A [`Trivia`] item is either a [`Comment`] (verbatim token text, leading
//! delimiter included) or a [`Break`] (a run of blank source lines). Each AST
//! node owns an optional [`NodeTrivia`] recording its leading trivia,
//! trailing trivia, and at most one inline (end-of-line) comment.

use std::fmt;

/// A single comment token, stored with its leading delimiter (`--`) intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A run of `blank_lines` blank source lines between two meaningful constructs.
///
/// `blank_lines` is always the *visible* blank-line count, i.e.
/// `consecutive_newlines - 1`: a single `\n` terminating a line never
/// produces a `Break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Break {
    pub blank_lines: u32,
}

impl Break {
    pub fn new(blank_lines: u32) -> Self {
        Self { blank_lines }
    }
}

/// Tagged sum of the two trivia kinds, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Trivia {
    Comment(Comment),
    Break(Break),
}

impl From<Comment> for Trivia {
    fn from(c: Comment) -> Self {
        Trivia::Comment(c)
    }
}

impl From<Break> for Trivia {
    fn from(b: Break) -> Self {
        Trivia::Break(b)
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trivia::Comment(c) => write!(f, "{}", c.text),
            Trivia::Break(b) => write!(f, "<break:{}>", b.blank_lines),
        }
    }
}

/// Trivia attached to one AST node: everything to its left, everything to
/// its right, and at most one same-line trailing comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTrivia {
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
    pub inline_comment: Option<Comment>,
}

impl NodeTrivia {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty() && self.inline_comment.is_none()
    }
}

/// Capability shared by every AST node: it may carry [`NodeTrivia`].
///
/// Kept as a plain trait (rather than an inheritance base, which Rust has no
/// use for) so the pretty-print visitor can wrap any node uniformly.
pub trait TriviaHost {
    fn trivia(&self) -> Option<&NodeTrivia>;
    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia>;

    fn has_trivia(&self) -> bool {
        self.trivia().is_some()
    }

    fn leading(&self) -> &[Trivia] {
        self.trivia().map(|t| t.leading.as_slice()).unwrap_or(&[])
    }

    fn trailing(&self) -> &[Trivia] {
        self.trivia().map(|t| t.trailing.as_slice()).unwrap_or(&[])
    }

    fn inline_comment(&self) -> Option<&Comment> {
        self.trivia().and_then(|t| t.inline_comment.as_ref())
    }

    fn set_trivia(&mut self, trivia: NodeTrivia) {
        *self.trivia_mut() = if trivia.is_empty() { None } else { Some(trivia) };
    }
}

/// Macro to implement [`TriviaHost`] for a struct that stores its trivia in a
/// `trivia: Option<NodeTrivia>` field. Every leaf AST node does this; the
/// macro exists purely to avoid forty hand-written copies of the same four
/// lines.
#[macro_export]
macro_rules! impl_trivia_host {
    ($ty:ty) => {
        impl $crate::trivia::TriviaHost for $ty {
            fn trivia(&self) -> Option<&$crate::trivia::NodeTrivia> {
                self.trivia.as_ref()
            }
            fn trivia_mut(&mut self) -> &mut Option<$crate::trivia::NodeTrivia> {
                &mut self.trivia
            }
        }
    };
}
