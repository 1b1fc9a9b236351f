//! Token stream contract the trivia binder runs against.
//!
//! The upstream lexer (`crate::lexer`) produces a flat [`TokenStream`] with
//! every token on every channel interleaved in source order; the binder
//! walks it via `hidden_tokens_to_left`/`hidden_tokens_to_right` rather than
//! re-scanning source text.

use std::fmt;

/// Which channel a token was lexed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Ordinary grammar tokens the parser consumes.
    Default,
    /// `-- ...` comment tokens, invisible to the parser.
    Comment,
    /// A single source newline, invisible to the parser. Runs of these are
    /// how the binder counts blank lines.
    Newline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub channel: Channel,
    pub text: String,
    /// Byte offset of the token's first character in the source.
    pub start: usize,
}

impl Token {
    pub fn new(channel: Channel, text: impl Into<String>, start: usize) -> Self {
        Self {
            channel,
            text: text.into(),
            start,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A flat, already-lexed token sequence spanning every channel.
///
/// Index `i` refers to a position in `Default`-channel token order, matching
/// how the parser numbers tokens; hidden tokens between default token `i-1`
/// and `i` are found by scanning outward from `i`'s source offset.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Index into `tokens` for each `Default`-channel token, in order.
    default_indices: Vec<usize>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let default_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.channel == Channel::Default)
            .map(|(i, _)| i)
            .collect();
        Self { tokens, default_indices }
    }

    /// The `i`-th default-channel token.
    pub fn get(&self, i: usize) -> Option<&Token> {
        self.default_indices.get(i).map(|&idx| &self.tokens[idx])
    }

    /// Number of default-channel tokens.
    pub fn size(&self) -> usize {
        self.default_indices.len()
    }

    /// Hidden-channel tokens strictly between default token `i - 1` and
    /// default token `i`, in source order.
    pub fn hidden_tokens_to_left(&self, i: usize) -> &[Token] {
        let end = match self.default_indices.get(i) {
            Some(&idx) => idx,
            None => self.tokens.len(),
        };
        let start = match i.checked_sub(1).and_then(|prev| self.default_indices.get(prev)) {
            Some(&idx) => idx + 1,
            None => 0,
        };
        &self.tokens[start..end]
    }

    /// Hidden-channel tokens strictly between default token `i` and default
    /// token `i + 1`.
    pub fn hidden_tokens_to_right(&self, i: usize) -> &[Token] {
        self.hidden_tokens_to_left(i + 1)
    }

    /// The token immediately after default token `i` in absolute source
    /// order, whether that's the next default token or an intervening
    /// hidden-channel one. Used for the "inline comment must be the very
    /// next token, not just somewhere before the next default token" rule.
    pub fn immediate_right_of(&self, i: usize) -> Option<&Token> {
        let idx = *self.default_indices.get(i)?;
        self.tokens.get(idx + 1)
    }

    /// Every `Comment`-channel token in the stream, in source order (used by
    /// [`crate::trivia_binder::TriviaBinder`]'s post-traversal exhaustion
    /// check).
    pub fn comment_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.channel == Channel::Comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(channel: Channel, text: &str, start: usize) -> Token {
        Token::new(channel, text, start)
    }

    #[test]
    fn hidden_tokens_to_left_spans_comments_and_newlines() {
        let stream = TokenStream::new(vec![
            tok(Channel::Default, "entity", 0),
            tok(Channel::Newline, "\n", 6),
            tok(Channel::Comment, "-- note", 7),
            tok(Channel::Newline, "\n", 14),
            tok(Channel::Default, "foo", 15),
        ]);
        assert_eq!(stream.size(), 2);
        let hidden = stream.hidden_tokens_to_left(1);
        assert_eq!(hidden.len(), 3);
        assert_eq!(hidden[1].text, "-- note");
    }

    #[test]
    fn hidden_tokens_to_left_of_first_token_is_empty_when_none_precede() {
        let stream = TokenStream::new(vec![tok(Channel::Default, "entity", 0)]);
        assert!(stream.hidden_tokens_to_left(0).is_empty());
    }

    #[test]
    fn hidden_tokens_to_right_matches_next_token_left() {
        let stream = TokenStream::new(vec![
            tok(Channel::Default, "a", 0),
            tok(Channel::Comment, "-- x", 2),
            tok(Channel::Default, "b", 7),
        ]);
        assert_eq!(stream.hidden_tokens_to_right(0), stream.hidden_tokens_to_left(1));
    }
}
