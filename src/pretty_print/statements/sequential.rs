//! Sequential statement → Doc rules: signal/variable assignment, if, case,
//! and loop statements.

use crate::ast::statements::sequential::{
    CaseArm, CaseStatement, ElsifArm, IfStatement, LoopScheme, LoopStatement, NullStatement,
    SequentialStatement, SignalAssign, VariableAssign,
};
use crate::config::Config;
use crate::doc::{self, Doc};
use crate::pretty_print::expressions::visit_expr;
use crate::pretty_print::statements::waveform::visit_waveform;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_sequential_statement(stmt: &SequentialStatement, config: &Config) -> Doc {
    let core = match stmt {
        SequentialStatement::SignalAssign(s) => visit_signal_assign(s),
        SequentialStatement::VariableAssign(s) => visit_variable_assign(s),
        SequentialStatement::If(s) => visit_if(s, config),
        SequentialStatement::Case(s) => visit_case(s, config),
        SequentialStatement::Loop(s) => visit_loop(s, config),
        SequentialStatement::Null(s) => visit_null(s),
    };
    with_trivia(core, stmt.trivia(), false)
}

fn visit_sequential_block(stmts: &[SequentialStatement], config: &Config) -> Doc {
    doc::join(stmts.iter().map(|s| visit_sequential_statement(s, config)), Doc::hard_line())
}

fn prepend_label(label: &Option<String>, core: Doc) -> Doc {
    match label {
        Some(l) => Doc::text(format!("{l}:")) & core,
        None => core,
    }
}

fn visit_signal_assign(s: &SignalAssign) -> Doc {
    let head = visit_expr(&s.target) & Doc::text("<=");
    let tail = Doc::soft_line().concat(visit_waveform(&s.waveform)).concat(Doc::text(";")).hang();
    let core = head.concat(tail).group();
    prepend_label(&s.label, core)
}

fn visit_variable_assign(s: &VariableAssign) -> Doc {
    let head = visit_expr(&s.target) & Doc::text(":=");
    let tail = Doc::soft_line().concat(visit_expr(&s.value)).concat(Doc::text(";")).hang();
    let core = head.concat(tail).group();
    prepend_label(&s.label, core)
}

fn visit_null(s: &NullStatement) -> Doc {
    prepend_label(&s.label, Doc::keyword("null").concat(Doc::text(";")))
}

fn visit_if(s: &IfStatement, config: &Config) -> Doc {
    let mut doc = Doc::keyword("if") & visit_expr(&s.condition) & Doc::keyword("then");
    doc = doc.hard_indent(visit_sequential_block(&s.then_body, config), config.indent as i32);
    for arm in &s.elsif_arms {
        doc = doc
            .concat(Doc::hard_line())
            .concat(Doc::keyword("elsif") & visit_expr(&arm.condition) & Doc::keyword("then"))
            .hard_indent(visit_sequential_block(&arm.body, config), config.indent as i32);
    }
    if let Some(else_body) = &s.else_body {
        doc = doc
            .concat(Doc::hard_line())
            .concat(Doc::keyword("else"))
            .hard_indent(visit_sequential_block(else_body, config), config.indent as i32);
    }
    doc = doc.concat(Doc::hard_line()).concat(Doc::keyword("end")).concat(Doc::keyword("if")).concat(Doc::text(";"));
    prepend_label(&s.label, doc)
}

fn visit_case(s: &CaseStatement, config: &Config) -> Doc {
    let mut doc = Doc::keyword("case") & visit_expr(&s.selector) & Doc::keyword("is");
    for arm in &s.arms {
        doc = doc.concat(Doc::hard_line()).concat(visit_case_arm(arm, config));
    }
    doc = doc.concat(Doc::hard_line()).concat(Doc::keyword("end")).concat(Doc::keyword("case")).concat(Doc::text(";"));
    prepend_label(&s.label, doc)
}

fn visit_case_arm(arm: &CaseArm, config: &Config) -> Doc {
    let choices = doc::join(arm.choices.iter().map(visit_expr), Doc::text(" |").concat(Doc::soft_line()));
    let head = Doc::keyword("when") & choices & Doc::text("=>");
    head.hard_indent(visit_sequential_block(&arm.body, config), config.indent as i32)
}

fn visit_loop(s: &LoopStatement, config: &Config) -> Doc {
    let head = match &s.scheme {
        LoopScheme::Plain => Doc::keyword("loop"),
        LoopScheme::For { iterator, range } => {
            Doc::keyword("for") & Doc::text(iterator.clone()) & Doc::keyword("in") & visit_expr(range) & Doc::keyword("loop")
        }
        LoopScheme::While(cond) => Doc::keyword("while") & visit_expr(cond) & Doc::keyword("loop"),
    };
    let mut doc = head.hard_indent(visit_sequential_block(&s.body, config), config.indent as i32);
    doc = doc.concat(Doc::hard_line()).concat(Doc::keyword("end")).concat(Doc::keyword("loop"));
    if let Some(label) = &s.label {
        doc = doc.concat(Doc::text(format!(" {label}")));
    }
    doc = doc.concat(Doc::text(";"));
    prepend_label(&s.label, doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render;

    #[test]
    fn signal_assign_breaks_after_arrow_when_too_long() {
        use crate::ast::expressions::{Expr, TokenExpr};
        use crate::ast::statements::waveform::{Waveform, WaveformElement};

        let target = Expr::Token(TokenExpr { text: "y".into(), trivia: None });
        let value = Expr::Token(TokenExpr { text: "a_very_long_value_name".into(), trivia: None });
        let waveform = Waveform::Elements(vec![WaveformElement { value, after_delay: None }]);
        let stmt = SequentialStatement::SignalAssign(SignalAssign {
            label: None,
            target,
            waveform,
            trivia: None,
        });
        let mut config = Config::default();
        config.line_length = 10;
        let doc = visit_sequential_statement(&stmt, &config);
        let out = render(&doc, &config);
        assert!(out.contains('\n'));
    }
}
