//! Visitors turning the AST into a `Doc` tree. One `visit_*` function per
//! node kind; each wraps its own "core" rendering with
//! [`trivia_wrap::with_trivia`] so every node gets consistent
//! leading/trailing comment and blank-line handling without repeating that
//! logic at every call site.

pub mod clauses;
pub mod declarations;
pub mod design_file;
pub mod design_units;
pub mod expressions;
pub mod statements;
pub mod trivia_wrap;

use crate::ast::design_file::DesignFile;
use crate::config::Config;
use crate::doc::Doc;

/// Entry point: render a whole design file to a `Doc`. The layout engine
/// (`crate::layout::render`) turns this into the final formatted string.
pub fn visit(file: &DesignFile, config: &Config) -> Doc {
    design_file::visit_design_file(file, config)
}
