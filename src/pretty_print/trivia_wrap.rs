//! The uniform trivia-wrapping rule every node's Doc passes through.

use crate::doc::Doc;
use crate::trivia::{NodeTrivia, Trivia};

/// Wrap `core_doc` with `trivia`'s leading/trailing/inline material.
/// `is_expression` suppresses `Break` items for expression nodes — blank
/// lines inside an expression tree are never meaningful — while comments
/// still come through.
pub fn with_trivia(core_doc: Doc, trivia: Option<&NodeTrivia>, is_expression: bool) -> Doc {
    let Some(trivia) = trivia else {
        return core_doc;
    };

    let leading = leading_doc(&trivia.leading, is_expression);
    let trailing = trailing_doc(&trivia.trailing, is_expression);
    let inline = trivia
        .inline_comment
        .as_ref()
        .map(|c| Doc::text(format!(" {}", c.text)).inline_comment());

    let mut result = leading.concat(core_doc);
    if let Some(inline) = inline {
        result = result.concat(inline);
    }
    if !trailing.is_empty() {
        result = result.concat(Doc::hard_line()).concat(trailing);
    }
    result
}

fn leading_doc(items: &[Trivia], is_expression: bool) -> Doc {
    let mut doc = Doc::empty();
    for item in items {
        match item {
            Trivia::Comment(c) => {
                doc = doc.concat(Doc::text(c.text.clone())).concat(Doc::hard_line());
            }
            Trivia::Break(b) => {
                if !is_expression {
                    doc = doc.concat(Doc::hard_lines(b.blank_lines));
                }
            }
        }
    }
    doc
}

/// Mirrors `leading_doc`, but the very last item loses its trailing
/// hard-line-or-one-fewer: the wrapping rule already supplies one
/// `hard_line` before `trailing_doc` starts.
fn trailing_doc(items: &[Trivia], is_expression: bool) -> Doc {
    let mut doc = Doc::empty();
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        let is_last = i == last;
        match item {
            Trivia::Comment(c) => {
                doc = doc.concat(Doc::text(c.text.clone()));
                if !is_last {
                    doc = doc.concat(Doc::hard_line());
                }
            }
            Trivia::Break(b) => {
                if is_expression {
                    continue;
                }
                let count = if is_last { b.blank_lines.saturating_sub(1) } else { b.blank_lines };
                doc = doc.concat(Doc::hard_lines(count));
            }
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render;
    use crate::config::Config;
    use crate::trivia::{Break, Comment};

    #[test]
    fn inline_comment_attaches_after_core_doc() {
        let trivia = NodeTrivia {
            leading: vec![],
            trailing: vec![],
            inline_comment: Some(Comment::new("-- note")),
        };
        let wrapped = with_trivia(Doc::text("x;"), Some(&trivia), false);
        assert_eq!(render(&wrapped, &Config::default()), "x; -- note\n");
    }

    #[test]
    fn leading_break_then_comment_then_node() {
        let trivia = NodeTrivia {
            leading: vec![Trivia::Break(Break::new(1)), Trivia::Comment(Comment::new("-- hi"))],
            trailing: vec![],
            inline_comment: None,
        };
        let wrapped = with_trivia(Doc::text("x;"), Some(&trivia), false);
        assert_eq!(render(&wrapped, &Config::default()), "\n-- hi\nx;\n");
    }
}
