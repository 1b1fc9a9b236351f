//! Binds lexical trivia onto AST nodes after parsing.
//!
//! A `used` bitset guarantees each hidden-channel token is claimed by at
//! most one node, `find_context_end` extends a node's span rightward over a
//! trailing `;`, `,`, or `else` so that punctuation's leading trivia isn't
//! orphaned, and an inline comment is only claimed if it sits in the very
//! next raw token slot (no intervening newline).

use std::collections::HashSet;

use crate::token::{Channel, Token, TokenStream};
use crate::trivia::{Break, Comment, NodeTrivia, Trivia};

/// Minimum consecutive newlines needed to register a [`Break`]: one newline
/// just ends a line, it takes a second to leave a visible blank line behind.
const BREAK_THRESHOLD: u32 = 2;

/// The default-channel token span a parsed node covers, as returned by the
/// parser: `start` and `stop` are both inclusive default-token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

impl Span {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
}

pub struct TriviaBinder<'a> {
    tokens: &'a TokenStream,
    /// Source offsets of hidden (and, harmlessly, default) tokens already
    /// claimed by a node. Keyed by offset rather than a position index since
    /// hidden tokens have no default-channel index of their own.
    used: HashSet<usize>,
}

impl<'a> TriviaBinder<'a> {
    pub fn new(tokens: &'a TokenStream) -> Self {
        Self {
            tokens,
            used: HashSet::new(),
        }
    }

    /// Compute the [`NodeTrivia`] for a parsed node's span, or `None` if it
    /// carries no trivia at all: a node with nothing to attach stores no
    /// `NodeTrivia`, not an empty one.
    pub fn bind(&mut self, span: Span) -> Option<NodeTrivia> {
        let stop_idx = self.find_context_end(span);

        let inline_comment = self
            .tokens
            .immediate_right_of(stop_idx)
            .filter(|t| t.channel == Channel::Comment && !self.is_used(t))
            .map(|t| {
                let comment = Comment::new(t.text.clone());
                self.mark_used(t);
                comment
            });

        let leading = self.extract_trivia(self.tokens.hidden_tokens_to_left(span.start));
        let trailing = self.extract_trivia(self.tokens.hidden_tokens_to_right(stop_idx));

        let trivia = NodeTrivia {
            leading,
            trailing,
            inline_comment,
        };

        if trivia.is_empty() {
            None
        } else {
            Some(trivia)
        }
    }

    /// Extend `span.stop` rightward by one default token when that token is
    /// a trailing `;`, `,`, or `else`: those tokens are part of the
    /// construct's visible footprint even though the grammar rule itself
    /// stops short of them.
    fn find_context_end(&self, span: Span) -> usize {
        let next = span.stop + 1;
        match self.tokens.get(next) {
            Some(tok) if matches!(tok.text.as_str(), ";" | "," | "else") => next,
            _ => span.stop,
        }
    }

    /// Consume every not-yet-claimed token in `range`, turning comments into
    /// [`Trivia::Comment`] and runs of `>= BREAK_THRESHOLD` newlines into a
    /// [`Trivia::Break`]. All tokens in `range` are marked used regardless
    /// of channel, even the ones (plain newlines) that never turn into a
    /// `Trivia` item, so a later node can't reclaim them.
    fn extract_trivia(&mut self, range: &[Token]) -> Vec<Trivia> {
        let mut result = Vec::new();
        let mut pending_newlines: u32 = 0;

        for token in range {
            if self.is_used(token) {
                continue;
            }
            self.mark_used(token);

            match token.channel {
                Channel::Newline => pending_newlines += 1,
                Channel::Comment => {
                    if pending_newlines >= BREAK_THRESHOLD {
                        tracing::debug!(blank_lines = pending_newlines - 1, "break before comment");
                        result.push(Trivia::Break(Break::new(pending_newlines - 1)));
                    }
                    pending_newlines = 0;
                    result.push(Trivia::Comment(Comment::new(token.text.clone())));
                }
                Channel::Default => {}
            }
        }

        if pending_newlines >= BREAK_THRESHOLD {
            result.push(Trivia::Break(Break::new(pending_newlines - 1)));
        }

        result
    }

    fn is_used(&self, token: &Token) -> bool {
        self.used.contains(&token.start)
    }

    fn mark_used(&mut self, token: &Token) {
        tracing::trace!(offset = token.start, "trivia token claimed");
        self.used.insert(token.start);
    }

    /// Post-traversal assertion: every comment token in the stream must
    /// have been claimed by some node's leading, trailing, or inline slot.
    /// Called once after the whole tree has been walked.
    pub fn unclaimed_comments(&self) -> Vec<Comment> {
        self.tokens
            .comment_tokens()
            .filter(|t| !self.is_used(t))
            .map(|t| Comment::new(t.text.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn stream(src: Vec<(Channel, &str)>) -> TokenStream {
        let mut offset = 0usize;
        let tokens = src
            .into_iter()
            .map(|(channel, text)| {
                let t = Token::new(channel, text, offset);
                offset += text.len().max(1);
                t
            })
            .collect();
        TokenStream::new(tokens)
    }

    #[test]
    fn leading_comment_and_blank_line_are_bound() {
        let ts = stream(vec![
            (Channel::Comment, "-- header"),
            (Channel::Newline, "\n"),
            (Channel::Newline, "\n"),
            (Channel::Newline, "\n"),
            (Channel::Default, "entity"),
        ]);
        let mut binder = TriviaBinder::new(&ts);
        let trivia = binder.bind(Span::new(0, 0)).expect("has leading trivia");
        assert_eq!(trivia.leading.len(), 2);
        assert!(matches!(trivia.leading[0], Trivia::Comment(_)));
        assert!(matches!(trivia.leading[1], Trivia::Break(Break { blank_lines: 2 })));
    }

    #[test]
    fn single_newline_does_not_produce_a_break() {
        let ts = stream(vec![
            (Channel::Default, "a"),
            (Channel::Newline, "\n"),
            (Channel::Default, "b"),
        ]);
        let mut binder = TriviaBinder::new(&ts);
        assert!(binder.bind(Span::new(0, 0)).is_none());
    }

    #[test]
    fn inline_comment_requires_immediate_adjacency() {
        let ts = stream(vec![
            (Channel::Default, "x"),
            (Channel::Comment, "-- trailing"),
            (Channel::Default, "y"),
        ]);
        let mut binder = TriviaBinder::new(&ts);
        let trivia = binder.bind(Span::new(0, 0)).expect("has inline comment");
        assert_eq!(trivia.inline_comment.unwrap().text, "-- trailing");
    }

    #[test]
    fn context_end_extends_over_trailing_semicolon() {
        // The comment sits on the line after the `;`, so it can't be claimed
        // as an inline comment (that requires zero-gap adjacency); it must
        // land in `trailing` instead, anchored past the semicolon rather
        // than past `x`.
        let ts = stream(vec![
            (Channel::Default, "x"),
            (Channel::Default, ";"),
            (Channel::Newline, "\n"),
            (Channel::Comment, "-- note"),
        ]);
        let mut binder = TriviaBinder::new(&ts);
        let trivia = binder.bind(Span::new(0, 0)).expect("semicolon's trailing comment claimed");
        assert!(trivia.inline_comment.is_none());
        assert_eq!(trivia.trailing.len(), 1);
        assert!(matches!(&trivia.trailing[0], Trivia::Comment(c) if c.text == "-- note"));
    }

    #[test]
    fn each_hidden_token_is_claimed_at_most_once() {
        let ts = stream(vec![
            (Channel::Default, "a"),
            (Channel::Comment, "-- shared"),
            (Channel::Default, "b"),
        ]);
        let mut binder = TriviaBinder::new(&ts);
        let first = binder.bind(Span::new(0, 0)).expect("a claims the inline comment");
        assert!(first.inline_comment.is_some());
        let second = binder.bind(Span::new(1, 1));
        assert!(second.is_none(), "comment already claimed by the first node");
    }
}
