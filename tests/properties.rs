//! Property tests over generated identifiers: formatting should never lose
//! or duplicate a declared signal, and re-formatting its own output should
//! always be a no-op, however the name happens to be spelled.

use proptest::prelude::*;
use vhdl_fmt::config::Config;
use vhdl_fmt::format_source;

fn format(source: &str, config: &Config) -> String {
    format_source(source, config).expect("generated source is well-formed VHDL")
}

/// Reserved words the generated identifier must avoid: the parser treats
/// these case-insensitively as keywords no matter where they appear, so a
/// generated name that happens to collide would change the grammar
/// production being parsed rather than just naming a signal/port/constant.
const RESERVED: &[&str] = &[
    "in", "out", "inout", "buffer", "linkage", "is", "end", "entity", "architecture", "of",
    "package", "body", "generic", "port", "signal", "variable", "constant", "shared", "type",
    "subtype", "alias", "attribute", "component", "disconnect", "group", "process", "begin",
    "if", "then", "elsif", "else", "case", "when", "for", "while", "loop", "null", "to",
    "downto", "others", "range", "units", "after", "select", "with", "new", "record", "access",
    "file", "and", "or", "xor", "nand", "nor", "xnor", "mod", "rem", "sll", "srl", "sla", "sra",
    "rol", "ror", "abs", "not", "unaffected", "library", "use", "all",
];

/// A VHDL basic identifier: a letter followed by letters, digits, or
/// underscores, 1-16 characters.
fn vhdl_identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,15}".prop_filter("no trailing underscore, not a reserved word", |s| {
        !s.ends_with('_') && !RESERVED.iter().any(|kw| s.eq_ignore_ascii_case(kw))
    })
}

proptest! {
    #[test]
    fn entity_with_one_signal_port_round_trips_the_name(name in vhdl_identifier()) {
        let src = format!("entity E is\n  port ({name} : in std_logic);\nend E;\n");
        let out = format(&src, &Config::default());
        prop_assert!(out.contains(&name), "formatted output lost the port name:\n{out}");
    }

    #[test]
    fn formatting_a_signal_declaration_is_idempotent(name in vhdl_identifier()) {
        let src = format!("architecture Rtl of E is\n  signal {name} : std_logic;\nbegin\nend Rtl;\n");
        let config = Config::default();
        let once = format(&src, &config);
        let twice = format(&once, &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn constant_default_value_is_preserved_verbatim(name in vhdl_identifier(), value in 0u32..1000) {
        let src = format!("package P is\n  constant {name} : integer := {value};\nend P;\n");
        let out = format(&src, &Config::default());
        prop_assert!(out.contains(&format!(":= {value}")), "lost or reformatted the default value:\n{out}");
    }
}
