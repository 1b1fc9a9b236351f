//! Design units: entity, architecture, package, and package body, plus
//! the library/use context clauses and trailing end-clause they share.

use crate::ast::declarations::Declaration;
use crate::ast::interface::{GenericClause, PortClause};
use crate::ast::statements::concurrent::ConcurrentStatement;
use crate::impl_trivia_host;
use crate::trivia::{NodeTrivia, TriviaHost};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryClause {
    pub names: Vec<String>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(LibraryClause);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseClause {
    pub names: Vec<String>,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(UseClause);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextClause {
    Library(LibraryClause),
    Use(UseClause),
}

impl TriviaHost for ContextClause {
    fn trivia(&self) -> Option<&NodeTrivia> {
        match self {
            ContextClause::Library(n) => n.trivia(),
            ContextClause::Use(n) => n.trivia(),
        }
    }

    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia> {
        match self {
            ContextClause::Library(n) => n.trivia_mut(),
            ContextClause::Use(n) => n.trivia_mut(),
        }
    }
}

/// The trailing `end [kind] [label];` line every design unit carries, with
/// enough flags to reproduce exactly which parts of it were present in the
/// source: whether the `end` keyword was repeated, and whether a label
/// followed it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndClause {
    pub has_end_keyword: bool,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub generics: Option<GenericClause>,
    pub ports: Option<PortClause>,
    pub declarations: Vec<Declaration>,
    pub end: EndClause,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(Entity);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architecture {
    pub name: String,
    pub entity_name: String,
    pub declarations: Vec<Declaration>,
    pub statements: Vec<ConcurrentStatement>,
    pub end: EndClause,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(Architecture);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub declarations: Vec<Declaration>,
    pub end: EndClause,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(Package);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBody {
    pub name: String,
    pub declarations: Vec<Declaration>,
    pub end: EndClause,
    pub trivia: Option<NodeTrivia>,
}
impl_trivia_host!(PackageBody);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryUnit {
    Entity(Entity),
    Architecture(Architecture),
    Package(Package),
    PackageBody(PackageBody),
}

impl TriviaHost for LibraryUnit {
    fn trivia(&self) -> Option<&NodeTrivia> {
        match self {
            LibraryUnit::Entity(n) => n.trivia(),
            LibraryUnit::Architecture(n) => n.trivia(),
            LibraryUnit::Package(n) => n.trivia(),
            LibraryUnit::PackageBody(n) => n.trivia(),
        }
    }

    fn trivia_mut(&mut self) -> &mut Option<NodeTrivia> {
        match self {
            LibraryUnit::Entity(n) => n.trivia_mut(),
            LibraryUnit::Architecture(n) => n.trivia_mut(),
            LibraryUnit::Package(n) => n.trivia_mut(),
            LibraryUnit::PackageBody(n) => n.trivia_mut(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignUnit {
    pub context: Vec<ContextClause>,
    pub unit: LibraryUnit,
}
