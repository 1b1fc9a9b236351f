//! Concurrent statement → Doc rules: conditional and selected concurrent
//! signal assignment, and process statements.

use crate::ast::statements::concurrent::{
    ConcurrentStatement, ConditionalConcurrentAssign, Process, SelectedConcurrentAssign,
};
use crate::config::Config;
use crate::doc::{self, Doc};
use crate::pretty_print::declarations::visit_declaration;
use crate::pretty_print::expressions::visit_expr;
use crate::pretty_print::statements::sequential::visit_sequential_statement;
use crate::pretty_print::statements::waveform::visit_waveform;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_concurrent_statement(stmt: &ConcurrentStatement, config: &Config) -> Doc {
    let core = match stmt {
        ConcurrentStatement::ConditionalAssign(s) => visit_conditional_assign(s),
        ConcurrentStatement::SelectedAssign(s) => visit_selected_assign(s),
        ConcurrentStatement::Process(s) => visit_process(s, config),
    };
    with_trivia(core, stmt.trivia(), false)
}

fn labeled_head(label: &Option<String>, core: Doc) -> Doc {
    match label {
        Some(l) => Doc::text(format!("{l}:")) & core,
        None => core,
    }
}

fn visit_conditional_assign(s: &ConditionalConcurrentAssign) -> Doc {
    let head = visit_expr(&s.target) & Doc::text("<=");
    let mut alternatives = Vec::new();
    for (waveform, condition) in &s.alternatives {
        let piece = match condition {
            Some(cond) => visit_waveform(waveform) & Doc::keyword("when") & visit_expr(cond),
            None => visit_waveform(waveform),
        };
        alternatives.push(piece);
    }
    // A fixed space, not a soft_line, ties the head to the first
    // alternative; only the " else" joins between alternatives may break,
    // with the continuation hanging at the column just past "<=".
    let body = doc::join(alternatives, Doc::text(" ").concat(Doc::keyword("else")).concat(Doc::soft_line()));
    let core = head
        .concat(Doc::text(" "))
        .concat(body.hang())
        .concat(Doc::text(";"))
        .group();
    labeled_head(&s.label, core)
}

fn visit_selected_assign(s: &SelectedConcurrentAssign) -> Doc {
    let head = Doc::keyword("with") & visit_expr(&s.selector) & Doc::keyword("select") & visit_expr(&s.target) & Doc::text("<=");
    let selections = doc::join(
        s.selections.iter().map(|(waveform, choice)| {
            visit_waveform(waveform) & Doc::keyword("when") & visit_expr(choice)
        }),
        Doc::text(",").concat(Doc::soft_line()),
    );
    let core = head
        .concat(Doc::text(" "))
        .concat(selections.hang())
        .concat(Doc::text(";"))
        .group();
    labeled_head(&s.label, core)
}

fn visit_process(s: &Process, config: &Config) -> Doc {
    let mut head = Doc::keyword("process");
    if !s.sensitivity_list.is_empty() {
        head = head.concat(Doc::bracket_tight(Doc::text("("), Doc::text(s.sensitivity_list.join(", ")), Doc::text(")")));
    }
    let declarations = doc::join(s.declarations.iter().map(|d| visit_declaration(d, config)), Doc::hard_line());
    let declarations_empty = declarations.is_empty();
    let declarations = if config.align_signals.signal { declarations.align() } else { declarations };
    let statements = doc::join(s.statements.iter().map(|st| visit_sequential_statement(st, config)), Doc::hard_line());

    let mut doc = head;
    if !declarations_empty {
        doc = doc.hard_indent(declarations, config.indent as i32);
        doc = doc.concat(Doc::hard_line());
    } else {
        doc = doc.concat(Doc::hard_line());
    }
    doc = doc.concat(Doc::keyword("begin"));
    if !statements.is_empty() {
        doc = doc.hard_indent(statements, config.indent as i32);
    }
    doc = doc.concat(Doc::hard_line()).concat(Doc::keyword("end")).concat(Doc::keyword("process")).concat(Doc::text(";"));
    labeled_head(&s.label, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expressions::{BinaryExpr, Expr, TokenExpr};
    use crate::ast::statements::waveform::{Waveform, WaveformElement};
    use crate::layout::render;

    fn token(text: &str) -> Expr {
        Expr::Token(TokenExpr { text: text.into(), trivia: None })
    }

    /// `y <= a when sel = '1' else b;` at `line_length = 20` breaks right
    /// after the first alternative, and the continuation hangs at the
    /// column just past `<=`.
    #[test]
    fn conditional_concurrent_assign_breaks_at_else_and_hangs() {
        let condition = Expr::Binary(Box::new(BinaryExpr {
            left: token("sel"),
            op: "=".into(),
            right: token("'1'"),
            trivia: None,
        }));
        let stmt = ConditionalConcurrentAssign {
            label: None,
            target: token("y"),
            alternatives: vec![
                (Waveform::Elements(vec![WaveformElement { value: token("a"), after_delay: None }]), Some(condition)),
                (Waveform::Elements(vec![WaveformElement { value: token("b"), after_delay: None }]), None),
            ],
            trivia: None,
        };
        let mut config = Config::default();
        config.line_length = 20;
        let doc = visit_conditional_assign(&stmt);
        let out = render(&doc, &config);
        assert_eq!(out, "y <= a when sel = '1' else\n     b;\n");
    }
}
