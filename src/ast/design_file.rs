//! The design file root: an ordered sequence of design units.

use crate::ast::design_units::DesignUnit;
use crate::trivia::Comment;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesignFile {
    pub units: Vec<DesignUnit>,
    /// Comments the trivia binder could not attach to any node. Empty on
    /// any well-formed input; a
    /// release build falls back to appending orphans here instead of
    /// failing, so no comment is ever silently dropped.
    pub orphan_trailing: Vec<Comment>,
}
