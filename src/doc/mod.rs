//! The document algebra: an immutable, structurally shared description of
//! layout decisions. Nothing in this module knows how wide a line is or how
//! to actually place characters — that's the layout engine
//! (`crate::layout`). `Doc` only describes *what could be rendered*.
//!
//! A thin handle (`Doc`) wraps an `Rc`-shared node tree rather than exposing
//! the node enum directly: sharing is cheap and the tree is read-only once
//! built, so cloning a `Doc` is just an `Rc` clone.

use std::ops::{Add, BitAnd, BitOr, Div, Shl};
use std::rc::Rc;

/// Named alignment-bucket constants for the clause families that opt into
/// column alignment. Kept as plain `i32`s — any integer works as a level
/// tag, these are just the ones the visitor uses.
pub mod align_level {
    pub const NAME: i32 = 0;
    pub const MODE: i32 = 1;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TextKind {
    /// Rendered verbatim, never case-transformed.
    Plain,
    /// Case-transformed per `Config::keyword_case` at emission time.
    Keyword,
}

#[derive(Debug)]
enum DocNode {
    Empty,
    Text {
        text: Rc<str>,
        kind: TextKind,
        level: Option<i32>,
    },
    SoftLine,
    HardLine(u32),
    Concat(Doc, Doc),
    Nest(Doc, i32),
    Group(Doc),
    Align(Doc),
    Hang(Doc),
    InlineComment(Doc),
}

/// A handle to an immutable, sharable layout description.
///
/// Cloning a `Doc` is an `Rc` clone (cheap); combining two `Doc`s never
/// mutates either operand — Docs are value-like.
#[derive(Debug, Clone)]
pub struct Doc(Rc<DocNode>);

impl Doc {
    // ---------------------------------------------------------------
    // Static factories
    // ---------------------------------------------------------------

    pub fn empty() -> Doc {
        Doc(Rc::new(DocNode::Empty))
    }

    /// Literal text. Must not contain `\n` — enforced with a debug assertion,
    /// since a violation here is a programming-invariant bug, not a
    /// recoverable condition.
    pub fn text(s: impl Into<String>) -> Doc {
        Self::text_impl(s.into(), TextKind::Plain, None)
    }

    pub fn text_level(s: impl Into<String>, level: i32) -> Doc {
        Self::text_impl(s.into(), TextKind::Plain, Some(level))
    }

    pub fn keyword(s: impl Into<String>) -> Doc {
        Self::text_impl(s.into(), TextKind::Keyword, None)
    }

    pub fn keyword_level(s: impl Into<String>, level: i32) -> Doc {
        Self::text_impl(s.into(), TextKind::Keyword, Some(level))
    }

    fn text_impl(s: String, kind: TextKind, level: Option<i32>) -> Doc {
        debug_assert!(
            !s.contains('\n'),
            "Doc::text/keyword text must not contain a newline: {s:?}"
        );
        if s.is_empty() {
            return Doc::empty();
        }
        Doc(Rc::new(DocNode::Text {
            text: Rc::from(s),
            kind,
            level,
        }))
    }

    /// A soft line: a space when the enclosing group renders flat, a
    /// newline + indentation when it renders broken.
    pub fn soft_line() -> Doc {
        Doc(Rc::new(DocNode::SoftLine))
    }

    /// An unconditional newline. Forces every enclosing `Group` broken.
    pub fn hard_line() -> Doc {
        Doc::hard_lines(1)
    }

    /// `count` hard newlines; `count == 0` is a break *barrier* that still
    /// forces broken mode but emits nothing itself.
    pub fn hard_lines(count: u32) -> Doc {
        Doc(Rc::new(DocNode::HardLine(count)))
    }

    // ---------------------------------------------------------------
    // Combinators
    // ---------------------------------------------------------------

    /// Direct concatenation, `a + b`.
    pub fn concat(self, other: Doc) -> Doc {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Doc(Rc::new(DocNode::Concat(self, other)))
    }

    /// Space-joined concatenation, `a & b` ≡ `a + text(" ") + b`.
    pub fn space(self, other: Doc) -> Doc {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        self.concat(Doc::text(" ")).concat(other)
    }

    /// Soft-joined concatenation, `a / b` ≡ `a + soft_line + b`.
    pub fn soft(self, other: Doc) -> Doc {
        self.concat(Doc::soft_line()).concat(other)
    }

    /// Hard-joined concatenation, `a | b` ≡ `a + hard_line + b`.
    pub fn hard(self, other: Doc) -> Doc {
        self.concat(Doc::hard_line()).concat(other)
    }

    /// `a << b` ≡ `a + Nest(soft_line + b, indent)`: soft line then `b`,
    /// indented by `indent` once broken.
    pub fn nest_indent(self, other: Doc, indent: i32) -> Doc {
        self.concat(Doc::nest(Doc::soft_line().concat(other), indent))
    }

    /// `hard_indent(a, b)` ≡ `a + Nest(hard_line + b, indent)`.
    pub fn hard_indent(self, other: Doc, indent: i32) -> Doc {
        self.concat(Doc::nest(Doc::hard_line().concat(other), indent))
    }

    pub fn nest(self, indent: i32) -> Doc {
        if self.is_empty() {
            return self;
        }
        Doc(Rc::new(DocNode::Nest(self, indent)))
    }

    /// A layout choice point: render flat if it fits the width budget, else
    /// broken.
    pub fn group(self) -> Doc {
        Doc(Rc::new(DocNode::Group(self)))
    }

    /// `bracket(open, inner, close)` ≡ `group((open << inner) / close)`.
    pub fn bracket(open: Doc, inner: Doc, close: Doc) -> Doc {
        open.nest_indent(inner, DEFAULT_BRACKET_INDENT).soft(close).group()
    }

    /// Like [`Doc::bracket`] but with an explicit indent delta (used by
    /// clauses whose indent is tweaked away from the default).
    pub fn bracket_indent(open: Doc, inner: Doc, close: Doc, indent: i32) -> Doc {
        open.nest_indent(inner, indent).soft(close).group()
    }

    /// Like [`Doc::bracket`] but without the padding space at the boundary:
    /// `open` and `close` sit directly against `inner` when flat, and only
    /// the separators `inner` places between its own elements (e.g. `,` +
    /// `soft_line`) may break. Clause headers (`generic (`, `port (`) want
    /// the roomy `bracket`; expression-level parens — call arguments,
    /// aggregates, slices, index constraints — don't: `(others => '0')`
    /// never gets a space after `(` or before `)`.
    pub fn bracket_tight(open: Doc, inner: Doc, close: Doc) -> Doc {
        open.concat(inner.nest(DEFAULT_BRACKET_INDENT)).concat(close).group()
    }

    /// Opens an alignment scope for `Text`/`Keyword` nodes with a `level`
    /// tag inside `self`. Callers decide whether to wrap in `align` at all
    /// based on `Config::align_signals`; an unwrapped Doc behaves exactly
    /// like `Align` would with alignment disabled.
    pub fn align(self) -> Doc {
        Doc(Rc::new(DocNode::Align(self)))
    }

    /// After an enclosing break, indentation for `self` becomes the column
    /// at which `Hang` began rather than the ambient nest delta.
    pub fn hang(self) -> Doc {
        Doc(Rc::new(DocNode::Hang(self)))
    }

    /// Marks `self` as an end-of-line inline comment: it must not be broken
    /// and must stay on the current line.
    pub fn inline_comment(self) -> Doc {
        Doc(Rc::new(DocNode::InlineComment(self)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(*self.0, DocNode::Empty)
    }

    pub(crate) fn node(&self) -> &DocNode {
        &self.0
    }
}

/// Default nesting delta used by `bracket`/`<<` when callers don't specify
/// one explicitly; overridden per call site with `bracket_indent` where a
/// clause needs a different indent.
pub const DEFAULT_BRACKET_INDENT: i32 = 2;

impl Add for Doc {
    type Output = Doc;
    fn add(self, rhs: Doc) -> Doc {
        self.concat(rhs)
    }
}

impl BitAnd for Doc {
    type Output = Doc;
    fn bitand(self, rhs: Doc) -> Doc {
        self.space(rhs)
    }
}

impl Div for Doc {
    type Output = Doc;
    fn div(self, rhs: Doc) -> Doc {
        self.soft(rhs)
    }
}

impl BitOr for Doc {
    type Output = Doc;
    fn bitor(self, rhs: Doc) -> Doc {
        self.hard(rhs)
    }
}

impl Shl for Doc {
    type Output = Doc;
    fn shl(self, rhs: Doc) -> Doc {
        self.nest_indent(rhs, DEFAULT_BRACKET_INDENT)
    }
}

/// Join `docs` with `sep` between each pair, skipping empty docs so a
/// missing optional element doesn't leave a dangling separator.
pub fn join(docs: impl IntoIterator<Item = Doc>, sep: Doc) -> Doc {
    let mut result = Doc::empty();
    for d in docs {
        if d.is_empty() {
            continue;
        }
        result = if result.is_empty() {
            d
        } else {
            result.concat(sep.clone()).concat(d)
        };
    }
    result
}

/// Map `items` through `f` and join with `sep`; `with_trailing` appends
/// `sep` after the last element too (used by e.g. the design-file join,
/// which wants a trailing blank line but not a leading one).
pub fn join_map<T>(
    items: impl IntoIterator<Item = T>,
    sep: Doc,
    with_trailing: bool,
    f: impl Fn(T) -> Doc,
) -> Doc {
    let docs: Vec<Doc> = items.into_iter().map(f).collect();
    let result = join(docs, sep.clone());
    if with_trailing && !result.is_empty() {
        result.concat(sep)
    } else {
        result
    }
}

pub(crate) use node_access::*;

mod node_access {
    use super::{Doc, DocNode, TextKind};

    pub(crate) enum DocView<'a> {
        Empty,
        Text {
            text: &'a str,
            kind: TextKind,
            level: Option<i32>,
        },
        SoftLine,
        HardLine(u32),
        Concat(&'a Doc, &'a Doc),
        Nest(&'a Doc, i32),
        Group(&'a Doc),
        Align(&'a Doc),
        Hang(&'a Doc),
        InlineComment(&'a Doc),
    }

    impl Doc {
        pub(crate) fn view(&self) -> DocView<'_> {
            match self.node() {
                DocNode::Empty => DocView::Empty,
                DocNode::Text { text, kind, level } => DocView::Text {
                    text,
                    kind: *kind,
                    level: *level,
                },
                DocNode::SoftLine => DocView::SoftLine,
                DocNode::HardLine(n) => DocView::HardLine(*n),
                DocNode::Concat(a, b) => DocView::Concat(a, b),
                DocNode::Nest(d, delta) => DocView::Nest(d, *delta),
                DocNode::Group(d) => DocView::Group(d),
                DocNode::Align(d) => DocView::Align(d),
                DocNode::Hang(d) => DocView::Hang(d),
                DocNode::InlineComment(d) => DocView::InlineComment(d),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_identity_for_concat() {
        let t = Doc::text("x");
        assert!(matches!(Doc::empty().concat(t.clone()).view(), DocView::Text { .. }));
        assert!(matches!(t.concat(Doc::empty()).view(), DocView::Text { .. }));
    }

    #[test]
    fn space_join_inserts_single_space_text() {
        let d = Doc::text("a") & Doc::text("b");
        match d.view() {
            DocView::Concat(_, _) => {}
            _ => panic!("expected Concat"),
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must not contain a newline")]
    fn text_rejects_embedded_newline() {
        let _ = Doc::text("a\nb");
    }
}
