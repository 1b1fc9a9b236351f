//! `vhdlfmt` — the CLI front end for `vhdl_fmt`.
//!
//! Reads one or more VHDL source files (or stdin, if none are given),
//! formats each with `vhdl_fmt::format_source`, and either rewrites the
//! file in place or — under `--check` — reports whether it *would* change
//! without touching it, the common pattern for formatter CLIs wired into
//! CI (`rustfmt --check`, `prettier --check`, …).

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use vhdl_fmt::config::{Config, KeywordCase};
use vhdl_fmt::format_source;

/// Default config file name looked up next to the current directory when
/// `--config` isn't passed, mirroring how project-local formatter configs
/// are usually discovered.
const DEFAULT_CONFIG_FILE: &str = ".vhdl-fmt.toml";

#[derive(Parser, Debug)]
#[command(name = "vhdlfmt", about = "Pretty-print VHDL source files")]
struct Args {
    /// VHDL source files to format in place. With none given, reads one
    /// source from stdin and writes the formatted result to stdout.
    paths: Vec<PathBuf>,

    /// Path to a TOML configuration file; defaults to `.vhdl-fmt.toml` in
    /// the current directory if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `Config::line_length`.
    #[arg(long)]
    line_length: Option<usize>,

    /// Override `Config::keyword_case` (`lower`, `upper`, `preserve`).
    #[arg(long)]
    keyword_case: Option<KeywordCase>,

    /// Exit nonzero if any input file isn't already formatted, without
    /// writing anything.
    #[arg(long)]
    check: bool,

    /// Increase log verbosity; repeat for more (`-v` = debug, `-vv` = trace).
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("vhdlfmt: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(line_length) = args.line_length {
        config.line_length = line_length;
    }
    if let Some(keyword_case) = args.keyword_case {
        config.keyword_case = keyword_case;
    }

    if args.paths.is_empty() {
        return run_stdin(&config, args.check);
    }
    run_files(&args.paths, &config, args.check)
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(explicit: Option<&Path>) -> vhdl_fmt::Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            Config::load(default_path)
        }
    }
}

fn run_stdin(config: &Config, check: bool) -> ExitCode {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("vhdlfmt: reading stdin: {e}");
        return ExitCode::FAILURE;
    }
    match format_source(&source, config) {
        Ok(formatted) => {
            if check {
                if formatted == source {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            } else {
                match io::stdout().write_all(formatted.as_bytes()) {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("vhdlfmt: writing stdout: {e}");
                        ExitCode::FAILURE
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("vhdlfmt: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_files(paths: &[PathBuf], config: &Config, check: bool) -> ExitCode {
    let mut any_unformatted = false;
    let mut any_error = false;

    for path in paths {
        match format_one_file(path, config, check) {
            Ok(changed) => any_unformatted |= changed,
            Err(e) => {
                eprintln!("vhdlfmt: {}: {e}", path.display());
                any_error = true;
            }
        }
    }

    if any_error {
        ExitCode::FAILURE
    } else if check && any_unformatted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Formats one file. Returns whether the file's existing content differed
/// from the formatted output (used by `--check`); writes the formatted
/// content back unless `check` is set.
fn format_one_file(path: &Path, config: &Config, check: bool) -> vhdl_fmt::Result<bool> {
    let source = std::fs::read_to_string(path)?;
    let formatted = format_source(&source, config)?;
    let changed = formatted != source;
    if !check && changed {
        std::fs::write(path, &formatted)?;
    }
    if changed {
        tracing::debug!(path = %path.display(), "reformatted");
    }
    Ok(changed)
}
