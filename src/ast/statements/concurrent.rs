//! Concurrent statements. Every concurrent assignment carries a single
//! canonical shape: an optional `label` and a `Waveform`-based right-hand
//! side.

use crate::ast::declarations::Declaration;
use crate::ast::expressions::Expr;
use crate::ast::statements::sequential::SequentialStatement;
use crate::ast::statements::waveform::Waveform;
use crate::impl_trivia_host;
use crate::trivia::{NodeTrivia, TriviaHost};

/// `target <= v1 when c1 else v2 when c2 else v3;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalConcurrentAssign {
    pub label: Option<String>,
    pub target: Expr,
    /// `(waveform, condition)` pairs in source order; the last entry's
    /// condition is `None` when a trailing unconditional `else` waveform is
    /// present, and `Some` otherwise.
    pub alternatives: Vec<(Waveform, Option<Expr>)>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(ConditionalConcurrentAssign);

/// `with selector select target <= v1 when c1, v2 when others;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedConcurrentAssign {
    pub label: Option<String>,
    pub selector: Expr,
    pub target: Expr,
    pub selections: Vec<(Waveform, Expr)>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(SelectedConcurrentAssign);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub label: Option<String>,
    pub sensitivity_list: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub statements: Vec<SequentialStatement>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(Process);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConcurrentStatement {
    ConditionalAssign(ConditionalConcurrentAssign),
    SelectedAssign(SelectedConcurrentAssign),
    Process(Process),
}

impl TriviaHost for ConcurrentStatement {
    fn trivia(&self) -> Option<&NodeTrivia> {
        match self {
            ConcurrentStatement::ConditionalAssign(n) => n.trivia(),
            ConcurrentStatement::SelectedAssign(n) => n.trivia(),
            ConcurrentStatement::Process(n) => n.trivia(),
        }
    }

    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia> {
        match self {
            ConcurrentStatement::ConditionalAssign(n) => n.trivia_mut(),
            ConcurrentStatement::SelectedAssign(n) => n.trivia_mut(),
            ConcurrentStatement::Process(n) => n.trivia_mut(),
        }
    }
}
