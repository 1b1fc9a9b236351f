//! End-to-end formatting tests driven through `vhdl_fmt::format_source`:
//! real source text in, formatted text out, nothing mocked in between.

use rstest::rstest;
use vhdl_fmt::config::Config;
use vhdl_fmt::format_source;

fn format(source: &str, config: &Config) -> String {
    format_source(source, config).expect("well-formed VHDL should format cleanly")
}

#[test]
fn minimal_entity() {
    let out = format("entity Minimal is end Minimal;", &Config::default());
    assert_eq!(out, "entity Minimal is\nend Minimal;\n");
}

#[test]
fn entity_with_generics_and_ports_fits_on_one_line_per_clause() {
    let src = "entity E is generic (W : integer := 8); port (clk : in std_logic; q : out std_logic_vector(7 downto 0)); end entity E;";
    let out = format(src, &Config::default());
    assert_eq!(
        out,
        "entity E is\n  generic ( W : integer := 8 );\n  port ( clk : in std_logic; q : out std_logic_vector(7 downto 0) );\nend entity E;\n"
    );
}

#[test]
fn port_clause_breaks_one_port_per_line_under_a_narrow_width() {
    let src = "entity E is\n  port (clk : in std_logic; data_valid : out std_logic);\nend E;\n";
    let mut config = Config::default();
    config.line_length = 20;
    let out = format(src, &config);
    assert_eq!(
        out,
        "entity E is\n  port (\n    clk : in std_logic;\n    data_valid : out std_logic\n  );\nend E;\n"
    );
}

#[test]
fn aggregate_assignment_has_no_padding_inside_parens() {
    let src = "architecture Rtl of E is\nbegin\n  vec <= (others => '0');\nend Rtl;\n";
    let out = format(src, &Config::default());
    assert!(out.contains("vec <= (others => '0');"), "got:\n{out}");
    assert!(!out.contains("( others"));
    assert!(!out.contains("'0' )"));
}

#[test]
fn index_constraint_and_call_arguments_are_tight() {
    let src = "entity E is\n  port (d : in std_logic_vector(7 downto 0));\nend E;\n";
    let out = format(src, &Config::default());
    assert!(out.contains("std_logic_vector(7 downto 0)"), "got:\n{out}");
}

#[test]
fn conditional_concurrent_assign_breaks_at_else_under_narrow_width() {
    let src = "architecture Rtl of E is\nbegin\n  y <= a when sel = '1' else b;\nend Rtl;\n";
    let mut config = Config::default();
    config.line_length = 20;
    let out = format(src, &config);
    assert!(out.contains("  y <= a when sel = '1' else\n       b;"), "got:\n{out}");
}

#[test]
fn process_with_sensitivity_list_and_if_statement() {
    let src = "architecture Rtl of E is\nbegin\n  process(clk, reset)\n  begin\n    if rising_edge(clk) then\n      q <= d;\n    end if;\n  end process;\nend architecture Rtl;\n";
    let out = format(src, &Config::default());
    assert_eq!(
        out,
        "architecture Rtl of E is\nbegin\n  process(clk, reset)\n  begin\n    if rising_edge(clk) then\n      q <= d;\n    end if;\n  end process;\nend architecture Rtl;\n"
    );
}

/// A process with both a variable and a constant declaration, verbatim.
#[test]
fn process_with_declarations_s6() {
    let src = "process(clk) variable counter : integer := 0; constant MAX : integer := 10; begin counter := 0; end process;";
    // A bare process is a concurrent statement; wrap it in the minimal
    // architecture context the grammar requires at the design-unit level.
    let wrapped = format!("architecture A of E is\nbegin\n{src}\nend A;\n");
    let out = format(&wrapped, &Config::default());
    assert!(out.contains(
        "  process(clk)\n    variable counter : integer := 0;\n    constant MAX : integer := 10;\n  begin\n    counter := 0;\n  end process;"
    ), "got:\n{out}");
}

#[test]
fn a_blank_line_run_before_a_comment_collapses_to_exactly_one() {
    let src = "architecture Rtl of E is\n\n\n\n  -- init all bits low\n  signal vec : std_logic_vector(7 downto 0);\nbegin\nend Rtl;\n";
    let out = format(src, &Config::default());
    assert_eq!(
        out,
        "architecture Rtl of E is\n\n  -- init all bits low\n  signal vec : std_logic_vector(7 downto 0);\nbegin\nend Rtl;\n"
    );
}

#[test]
fn an_inline_trailing_comment_stays_on_the_declaration_line() {
    let src = "entity E is\n  signal dummy : std_logic; -- never mind\nend E;\n";
    let out = format(src, &Config::default());
    let line = out.lines().find(|l| l.contains("dummy")).unwrap();
    assert!(
        line.contains("signal dummy : std_logic; -- never mind"),
        "got: {line:?}\nfull:\n{out}"
    );
}

#[rstest]
#[case("entity A is end A;")]
#[case("entity B is\n  port (x : in std_logic);\nend B;\n")]
#[case("architecture Rtl of E is\nbegin\n  y <= a;\nend Rtl;\n")]
#[case("package P is\n  constant N : integer := 4;\nend P;\n")]
fn formatting_is_idempotent(#[case] source: &str) {
    let config = Config::default();
    let once = format(source, &config);
    let twice = format(&once, &config);
    assert_eq!(once, twice, "re-formatting the formatted output should be a no-op");
}

#[test]
fn every_comment_in_the_source_survives_formatting() {
    let src = "-- top of file\nentity E is\n  signal dummy : std_logic; -- inline note\nend E;\n";
    let out = format(src, &Config::default());
    let count_in = src.matches("--").count();
    let count_out = out.matches("--").count();
    assert_eq!(count_in, count_out, "comment count changed:\ninput:\n{src}\noutput:\n{out}");
    assert!(out.contains("-- top of file"));
    assert!(out.contains("-- inline note"));
}

#[rstest]
#[case(40)]
#[case(100)]
#[case(200)]
fn wide_enough_clauses_never_break(#[case] line_length: usize) {
    let src = "entity E is\n  port (clk : in std_logic);\nend E;\n";
    let mut config = Config::default();
    config.line_length = line_length;
    let out = format(src, &config);
    assert_eq!(out.lines().count(), 3, "a clause that comfortably fits should stay on one line:\n{out}");
}

#[test]
fn no_emitted_line_has_trailing_whitespace() {
    let src = "entity E is\n  generic (W : integer := 8);\n  port (clk : in std_logic);\nend E;\n";
    let mut config = Config::default();
    config.line_length = 10;
    let out = format(src, &config);
    for line in out.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
    }
}

#[test]
fn snapshot_of_a_narrow_port_clause_break() {
    let src = "entity E is\n  port (clk : in std_logic; data_valid : out std_logic);\nend E;\n";
    let mut config = Config::default();
    config.line_length = 20;
    let out = format(src, &config);
    insta::assert_snapshot!(out, @r###"
    entity E is
      port (
        clk : in std_logic;
        data_valid : out std_logic
      );
    end E;
    "###);
}

#[test]
fn snapshot_of_a_process_with_declarations() {
    let src = "architecture Rtl of E is\nbegin\n  process(clk)\n    variable counter : integer := 0;\n  begin\n    counter := 0;\n  end process;\nend Rtl;\n";
    let out = format(src, &Config::default());
    insta::assert_snapshot!(out, @r###"
    architecture Rtl of E is
    begin
      process(clk)
        variable counter : integer := 0;
      begin
        counter := 0;
      end process;
    end Rtl;
    "###);
}

#[test]
fn signal_alignment_pads_names_and_modes_to_a_common_column() {
    let src = "entity E is\n  port (clk : in std_logic; data_valid : out std_logic);\nend E;\n";
    let mut config = Config::default();
    config.line_length = 20;
    config.align_signals.port = true;
    let out = format(src, &config);
    let clk_line = out.lines().find(|l| l.contains("clk")).unwrap();
    let data_line = out.lines().find(|l| l.contains("data_valid")).unwrap();
    let clk_colon = clk_line.find(':').unwrap();
    let data_colon = data_line.find(':').unwrap();
    assert_eq!(clk_colon, data_colon, "port names should be padded to a shared colon column");
}
