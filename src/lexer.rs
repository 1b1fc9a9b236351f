//! A small, intentionally unambitious VHDL lexer: a single forward scan
//! over `char_indices`, pattern-driven token classification, and a flat
//! token list carrying byte spans rather than a generated DFA. Channels
//! follow `crate::token::Channel` exactly: one `Newline` token per `\n`, one
//! `Comment` token per `-- ...` run, everything else on `Default`.

use crate::error::{FmtError, Result};
use crate::token::{Channel, Token, TokenStream};

/// Multi-character symbols recognized before falling back to single-char
/// symbols. Order matters: longer prefixes must be tried first.
const COMPOUND_SYMBOLS: &[&str] = &["<=", ":=", "=>", "/=", ">=", "**"];

pub fn lex(source: &str) -> Result<TokenStream> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < len {
        let c = bytes[pos] as char;

        if c == '\n' {
            tokens.push(Token::new(Channel::Newline, "\n", pos));
            pos += 1;
            continue;
        }
        if c.is_whitespace() {
            pos += 1;
            continue;
        }
        if c == '-' && bytes.get(pos + 1) == Some(&b'-') {
            let start = pos;
            let end = source[pos..].find('\n').map(|i| pos + i).unwrap_or(len);
            tokens.push(Token::new(Channel::Comment, &source[start..end], start));
            pos = end;
            continue;
        }
        if c == '"' {
            let (text, next) = scan_delimited(source, pos, '"')?;
            tokens.push(Token::new(Channel::Default, text, pos));
            pos = next;
            continue;
        }
        if c == '\'' && is_char_literal(source, pos) {
            tokens.push(Token::new(Channel::Default, &source[pos..pos + 3], pos));
            pos += 3;
            continue;
        }
        if c.is_ascii_digit() {
            let (text, next) = scan_number(source, pos);
            tokens.push(Token::new(Channel::Default, text, pos));
            pos = next;
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let (text, next) = scan_identifier(source, pos);
            tokens.push(Token::new(Channel::Default, text, pos));
            pos = next;
            continue;
        }

        if let Some(sym) = COMPOUND_SYMBOLS.iter().find(|s| source[pos..].starts_with(*s)) {
            tokens.push(Token::new(Channel::Default, *sym, pos));
            pos += sym.len();
            continue;
        }

        if c.is_ascii_punctuation() {
            tokens.push(Token::new(Channel::Default, &source[pos..pos + 1], pos));
            pos += 1;
            continue;
        }

        return Err(FmtError::Parse(format!(
            "unexpected character {c:?} at byte offset {pos}"
        )));
    }

    Ok(TokenStream::new(tokens))
}

/// `'x'` is a character literal only when it is exactly three bytes wide
/// (delimiter, one character, delimiter); a lone `'` elsewhere is the tick
/// used by attributes and qualified expressions.
fn is_char_literal(source: &str, pos: usize) -> bool {
    let rest = &source[pos..];
    let mut chars = rest.chars();
    chars.next();
    chars.next().is_some() && chars.next() == Some('\'')
}

fn scan_delimited(source: &str, start: usize, delim: char) -> Result<(&str, usize)> {
    let mut chars = source[start + 1..].char_indices();
    loop {
        match chars.next() {
            Some((i, c)) if c == delim => {
                let end = start + 1 + i + delim.len_utf8();
                return Ok((&source[start..end], end));
            }
            Some(_) => continue,
            None => {
                return Err(FmtError::Parse(format!(
                    "unterminated string literal starting at byte offset {start}"
                )));
            }
        }
    }
}

fn scan_number(source: &str, start: usize) -> (&str, usize) {
    let rest = &source[start..];
    let end = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '#'))
        .map(|(i, _)| start + i)
        .unwrap_or(source.len());
    (&source[start..end], end)
}

fn scan_identifier(source: &str, start: usize) -> (&str, usize) {
    let rest = &source[start..];
    let end = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map(|(i, _)| start + i)
        .unwrap_or(source.len());
    (&source[start..end], end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_entity_skeleton() {
        let stream = lex("entity E is\nend;\n").unwrap();
        assert_eq!(stream.size(), 5);
        assert_eq!(stream.get(0).unwrap().text, "entity");
        assert_eq!(stream.get(4).unwrap().text, ";");
    }

    #[test]
    fn comment_is_its_own_hidden_token() {
        let stream = lex("-- hi\nentity").unwrap();
        assert_eq!(stream.size(), 1);
        let hidden = stream.hidden_tokens_to_left(0);
        assert_eq!(hidden.len(), 2);
        assert_eq!(hidden[0].text, "-- hi");
    }

    #[test]
    fn physical_literal_lexes_as_number_then_identifier() {
        let stream = lex("10 ns").unwrap();
        assert_eq!(stream.size(), 2);
        assert_eq!(stream.get(0).unwrap().text, "10");
        assert_eq!(stream.get(1).unwrap().text, "ns");
    }

    #[test]
    fn char_literal_is_not_confused_with_a_tick_attribute() {
        let stream = lex("x'high").unwrap();
        assert_eq!(stream.size(), 3);
        assert_eq!(stream.get(1).unwrap().text, "'");
        let stream = lex("'0'").unwrap();
        assert_eq!(stream.size(), 1);
        assert_eq!(stream.get(0).unwrap().text, "'0'");
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(lex("\"abc").is_err());
    }
}
