//! Generic and port clauses.

use crate::ast::declarations::SubtypeIndication;
use crate::ast::expressions::Expr;
use crate::impl_trivia_host;
use crate::trivia::NodeTrivia;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    In,
    Out,
    Inout,
    Buffer,
    Linkage,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::In => "in",
            Mode::Out => "out",
            Mode::Inout => "inout",
            Mode::Buffer => "buffer",
            Mode::Linkage => "linkage",
        }
    }
}

/// One generic parameter: `names : subtype [:= default]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub names: Vec<String>,
    pub subtype: SubtypeIndication,
    pub default: Option<Expr>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(GenericParam);

/// One port: `names : mode subtype [:= default]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub names: Vec<String>,
    pub mode: Mode,
    pub subtype: SubtypeIndication,
    pub default: Option<Expr>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(Port);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericClause {
    pub params: Vec<GenericParam>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortClause {
    pub ports: Vec<Port>,
}
