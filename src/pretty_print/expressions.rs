//! Expression → Doc rules.

use crate::ast::expressions::{
    AggregateElement, AggregateExpr, AllocatorExpr, AttributeExpr, BinaryExpr, CallExpr, Expr,
    ParenExpr, PhysicalLiteral, QualifiedExpr, SliceExpr, TokenExpr, UnaryExpr,
};
use crate::doc::{self, Doc};
use crate::pretty_print::declarations::visit_subtype_indication;
use crate::pretty_print::trivia_wrap::with_trivia;
use crate::trivia::TriviaHost;

pub fn visit_expr(expr: &Expr) -> Doc {
    let core = visit_expr_core(expr);
    with_trivia(core, expr.trivia(), true)
}

fn visit_expr_core(expr: &Expr) -> Doc {
    match expr {
        Expr::Token(TokenExpr { text, .. }) => Doc::text(text.clone()),
        Expr::Physical(PhysicalLiteral { value, unit, .. }) => {
            Doc::text(value.clone()) & Doc::text(unit.clone())
        }
        Expr::Paren(ParenExpr { inner, .. }) => Doc::bracket_tight(Doc::text("("), visit_expr(inner), Doc::text(")")),
        Expr::Unary(UnaryExpr { op, operand, .. }) => {
            if op.chars().next().is_some_and(|c| c.is_alphabetic()) {
                Doc::keyword(op.clone()) & visit_expr(operand)
            } else {
                Doc::text(op.clone()).concat(visit_expr(operand))
            }
        }
        Expr::Binary(BinaryExpr { left, op, right, .. }) => {
            let op_doc = if crate::ast::expressions::is_keyword_operator(op) {
                Doc::keyword(op.clone())
            } else {
                Doc::text(op.clone())
            };
            visit_expr(left) & op_doc & visit_expr(right)
        }
        Expr::Call(CallExpr { callee, args, .. }) => {
            let args_doc = doc::join(args.iter().map(visit_expr), Doc::text(",").concat(Doc::soft_line()));
            visit_expr(callee).concat(Doc::bracket_tight(Doc::text("("), args_doc, Doc::text(")")))
        }
        Expr::Slice(SliceExpr { prefix, range, .. }) => {
            visit_expr(prefix).concat(Doc::bracket_tight(Doc::text("("), visit_expr(range), Doc::text(")")))
        }
        Expr::Attribute(AttributeExpr { prefix, designator, arg, .. }) => {
            let head = visit_expr(prefix).concat(Doc::text("'")).concat(Doc::text(designator.clone()));
            match arg {
                Some(arg) => head.concat(Doc::bracket_tight(Doc::text("("), visit_expr(arg), Doc::text(")"))),
                None => head,
            }
        }
        Expr::Qualified(QualifiedExpr { type_mark, operand, .. }) => {
            Doc::text(type_mark.clone()).concat(Doc::text("'")).concat(visit_expr(operand))
        }
        Expr::Aggregate(AggregateExpr { elements, .. }) => {
            let inner = doc::join(
                elements.iter().map(visit_aggregate_element),
                Doc::text(",").concat(Doc::soft_line()),
            );
            Doc::bracket_tight(Doc::text("("), inner, Doc::text(")"))
        }
        Expr::Allocator(AllocatorExpr { subtype, .. }) => {
            Doc::keyword("new") & visit_subtype_indication(subtype)
        }
    }
}

fn visit_aggregate_element(element: &AggregateElement) -> Doc {
    match element {
        AggregateElement::Positional(e) => visit_expr(e),
        AggregateElement::Named { choice, value } => {
            visit_expr(choice) & Doc::text("=>") & visit_expr(value)
        }
    }
}
