//! Sequential statements: signal/variable assignment, if, case, loop, null.

use crate::ast::expressions::Expr;
use crate::ast::statements::waveform::Waveform;
use crate::impl_trivia_host;
use crate::trivia::{NodeTrivia, TriviaHost};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalAssign {
    pub label: Option<String>,
    pub target: Expr,
    pub waveform: Waveform,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(SignalAssign);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableAssign {
    pub label: Option<String>,
    pub target: Expr,
    pub value: Expr,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(VariableAssign);

/// One `elsif cond then body` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElsifArm {
    pub condition: Expr,
    pub body: Vec<SequentialStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub label: Option<String>,
    pub condition: Expr,
    pub then_body: Vec<SequentialStatement>,
    pub elsif_arms: Vec<ElsifArm>,
    pub else_body: Option<Vec<SequentialStatement>>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(IfStatement);

/// One `when choice1 | choice2 => body` arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseArm {
    pub choices: Vec<Expr>,
    pub body: Vec<SequentialStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseStatement {
    pub label: Option<String>,
    pub selector: Expr,
    pub arms: Vec<CaseArm>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(CaseStatement);

/// The iteration scheme a loop carries, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopScheme {
    Plain,
    For { iterator: String, range: Expr },
    While(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopStatement {
    pub label: Option<String>,
    pub scheme: LoopScheme,
    pub body: Vec<SequentialStatement>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(LoopStatement);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullStatement {
    pub label: Option<String>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(NullStatement);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequentialStatement {
    SignalAssign(SignalAssign),
    VariableAssign(VariableAssign),
    If(IfStatement),
    Case(CaseStatement),
    Loop(LoopStatement),
    Null(NullStatement),
}

impl TriviaHost for SequentialStatement {
    fn trivia(&self) -> Option<&NodeTrivia> {
        match self {
            SequentialStatement::SignalAssign(n) => n.trivia(),
            SequentialStatement::VariableAssign(n) => n.trivia(),
            SequentialStatement::If(n) => n.trivia(),
            SequentialStatement::Case(n) => n.trivia(),
            SequentialStatement::Loop(n) => n.trivia(),
            SequentialStatement::Null(n) => n.trivia(),
        }
    }

    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia> {
        match self {
            SequentialStatement::SignalAssign(n) => n.trivia_mut(),
            SequentialStatement::VariableAssign(n) => n.trivia_mut(),
            SequentialStatement::If(n) => n.trivia_mut(),
            SequentialStatement::Case(n) => n.trivia_mut(),
            SequentialStatement::Loop(n) => n.trivia_mut(),
            SequentialStatement::Null(n) => n.trivia_mut(),
        }
    }
}
