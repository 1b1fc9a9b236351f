//! The design file root → Doc rule.

use crate::ast::design_file::DesignFile;
use crate::config::Config;
use crate::doc::{self, Doc};
use crate::pretty_print::design_units::visit_design_unit;

pub fn visit_design_file(file: &DesignFile, config: &Config) -> Doc {
    let units = doc::join(file.units.iter().map(|u| visit_design_unit(u, config)), Doc::soft_line());
    if file.orphan_trailing.is_empty() {
        return units;
    }
    // Release-build trivia-exhaustion fallback: orphan comments are
    // appended to the design file's trailing trivia rather than dropped.
    let orphans = doc::join(
        file.orphan_trailing.iter().map(|c| Doc::text(c.text.clone())),
        Doc::hard_line(),
    );
    if units.is_empty() {
        orphans
    } else {
        units.concat(Doc::hard_line()).concat(orphans)
    }
}
