//! vhdl-fmt: a pretty-printer for VHDL source.
//!
//! The crate is a straight pipeline:
//!
//! ```text
//! source text -> lexer -> parser (+ trivia binder) -> pretty-print visitor -> layout engine -> formatted text
//! ```
//!
//! [`lexer`] and [`parser`] build the AST; everything downstream of a parsed
//! [`ast::design_file::DesignFile`] — [`trivia_binder`], [`doc`],
//! [`pretty_print`], [`layout`] — is the document algebra, layout engine,
//! and trivia-binding core this crate exists to demonstrate.

pub mod ast;
pub mod config;
pub mod doc;
pub mod error;
pub mod layout;
pub mod lexer;
pub mod parser;
pub mod pretty_print;
pub mod token;
pub mod trivia;
pub mod trivia_binder;

pub use config::Config;
pub use error::{FmtError, Result};

/// Run the full pipeline on `source`, returning the formatted text.
///
/// This is the single entry point the CLI (`src/bin/vhdlfmt.rs`) and the
/// end-to-end tests drive; everything else in the crate is reachable from
/// here.
pub fn format_source(source: &str, config: &Config) -> Result<String> {
    let file = parser::parse(source)?;
    let doc = pretty_print::visit(&file, config);
    Ok(layout::render(&doc, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minimal_entity_s1() {
        let out = format_source("entity Minimal is end Minimal;", &Config::default()).unwrap();
        assert_eq!(out, "entity Minimal is\nend Minimal;\n");
    }

    #[test]
    fn formatting_is_idempotent_on_its_own_output() {
        let src = "entity E is\n  port (clk : in std_logic);\nend E;\n";
        let config = Config::default();
        let once = format_source(src, &config).unwrap();
        let twice = format_source(&once, &config).unwrap();
        assert_eq!(once, twice);
    }
}
