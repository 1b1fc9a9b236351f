//! Declaration shapes: signals, variables, constants, types, subtypes,
//! aliases, attributes, components, and a passthrough catch-all.
//!
//! `SubtypeIndication` is treated as the single canonical shape for a
//! type reference everywhere one is needed: callers never see a bare
//! `type_name: string` alternative.

use crate::ast::expressions::Expr;
use crate::impl_trivia_host;
use crate::trivia::{NodeTrivia, TriviaHost};

/// `[resolution_function] type_mark [constraint]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeIndication {
    pub resolution_function: Option<String>,
    pub type_mark: String,
    pub constraint: Option<Constraint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Index(IndexConstraint),
    Range(RangeConstraint),
}

/// `(range, range, …)` — one per array dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConstraint {
    pub ranges: Vec<Expr>,
}

/// `range low to|downto high`, already folded into a single expression by
/// the parser (the direction keyword lives inside the `Expr` text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    pub range: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalDecl {
    pub names: Vec<String>,
    pub subtype: SubtypeIndication,
    pub bus: bool,
    pub default: Option<Expr>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(SignalDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDecl {
    pub shared: bool,
    pub names: Vec<String>,
    pub subtype: SubtypeIndication,
    pub default: Option<Expr>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(VariableDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDecl {
    pub names: Vec<String>,
    pub subtype: SubtypeIndication,
    pub default: Option<Expr>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(ConstantDecl);

/// Type declarations, collapsing separate enumeration/record productions
/// into one node tagged by `TypeDefinition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub definition: TypeDefinition,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(TypeDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    Enumeration(Vec<String>),
    Record(Vec<(Vec<String>, SubtypeIndication)>),
    /// Access, file, or any other definition the visitor doesn't need to
    /// decompose further: the parser hands back its surface text verbatim.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeDecl {
    pub name: String,
    pub subtype: SubtypeIndication,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(SubtypeDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDecl {
    pub name: String,
    pub subtype: Option<SubtypeIndication>,
    pub target: String,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(AliasDecl);

/// `attribute NAME : type_mark;` or `attribute NAME of target : class is expr;`
/// — kept as passthrough text for the part after the attribute name, so the
/// visitor never drops trivia attached to one even without decomposing its
/// internal structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: String,
    pub rest: String,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(AttributeDecl);

/// `disconnect` specifications and `group`/`group template` declarations:
/// rare enough in practice that the visitor carries their full surface text
/// and re-emits it unchanged rather than decomposing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughDecl {
    pub keyword: String,
    pub rest: String,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(PassthroughDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl {
    pub name: String,
    pub is_keyword_present: bool,
    pub generics: Option<crate::ast::interface::GenericClause>,
    pub ports: Option<crate::ast::interface::PortClause>,
    pub end_name: Option<String>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(ComponentDecl);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Signal(SignalDecl),
    Variable(VariableDecl),
    Constant(ConstantDecl),
    Type(TypeDecl),
    Subtype(SubtypeDecl),
    Alias(AliasDecl),
    Attribute(AttributeDecl),
    Component(ComponentDecl),
    Passthrough(PassthroughDecl),
}

impl TriviaHost for Declaration {
    fn trivia(&self) -> Option<&NodeTrivia> {
        match self {
            Declaration::Signal(n) => n.trivia(),
            Declaration::Variable(n) => n.trivia(),
            Declaration::Constant(n) => n.trivia(),
            Declaration::Type(n) => n.trivia(),
            Declaration::Subtype(n) => n.trivia(),
            Declaration::Alias(n) => n.trivia(),
            Declaration::Attribute(n) => n.trivia(),
            Declaration::Component(n) => n.trivia(),
            Declaration::Passthrough(n) => n.trivia(),
        }
    }

    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia> {
        match self {
            Declaration::Signal(n) => n.trivia_mut(),
            Declaration::Variable(n) => n.trivia_mut(),
            Declaration::Constant(n) => n.trivia_mut(),
            Declaration::Type(n) => n.trivia_mut(),
            Declaration::Subtype(n) => n.trivia_mut(),
            Declaration::Alias(n) => n.trivia_mut(),
            Declaration::Attribute(n) => n.trivia_mut(),
            Declaration::Component(n) => n.trivia_mut(),
            Declaration::Passthrough(n) => n.trivia_mut(),
        }
    }
}
