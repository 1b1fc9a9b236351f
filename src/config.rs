//! Formatter configuration.
//!
//! A flat `serde`-derived struct loaded from a small TOML document, with
//! every field defaulted so a missing or partial config file is never an
//! error. CLI flags (see `src/bin/vhdlfmt.rs`) are applied as an overlay on
//! top of the loaded file.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::{FmtError, Result};

/// How `Keyword` text is cased at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    Lower,
    Upper,
    Preserve,
}

impl Default for KeywordCase {
    fn default() -> Self {
        KeywordCase::Preserve
    }
}

impl KeywordCase {
    /// Apply the case transform to a keyword's source text.
    pub fn apply(self, text: &str) -> String {
        match self {
            KeywordCase::Lower => text.to_lowercase(),
            KeywordCase::Upper => text.to_uppercase(),
            KeywordCase::Preserve => text.to_string(),
        }
    }
}

impl fmt::Display for KeywordCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeywordCase::Lower => "lower",
            KeywordCase::Upper => "upper",
            KeywordCase::Preserve => "preserve",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for KeywordCase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lower" => Ok(KeywordCase::Lower),
            "upper" => Ok(KeywordCase::Upper),
            "preserve" => Ok(KeywordCase::Preserve),
            other => Err(format!("unknown keyword case: {other}")),
        }
    }
}

/// Per-clause-family column alignment toggles: one flag per clause family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlignSignals {
    pub generic: bool,
    pub port: bool,
    pub signal: bool,
}

impl Default for AlignSignals {
    fn default() -> Self {
        Self {
            generic: false,
            port: false,
            signal: false,
        }
    }
}

fn default_line_length() -> usize {
    100
}

fn default_indent() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// The closed configuration surface the core recognizes. Any other key
/// present in a TOML document is silently ignored rather than rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_line_length")]
    pub line_length: usize,
    #[serde(default = "default_indent")]
    pub indent: usize,
    pub keyword_case: KeywordCase,
    #[serde(default = "default_true")]
    pub trailing_newline: bool,
    pub align_signals: AlignSignals,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_length: default_line_length(),
            indent: default_indent(),
            keyword_case: KeywordCase::default(),
            trailing_newline: true,
            align_signals: AlignSignals::default(),
        }
    }
}

impl Config {
    /// Parse a `Config` from a TOML document's text. Never errors on
    /// unrecognised keys; only malformed TOML or a type mismatch on a
    /// recognised key is rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FmtError::Config(e.to_string()))
    }

    /// Load a `Config` from a file path, falling back to [`Config::default`]
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.line_length, 100);
        assert_eq!(cfg.indent, 2);
        assert_eq!(cfg.keyword_case, KeywordCase::Preserve);
        assert!(cfg.trailing_newline);
        assert!(!cfg.align_signals.generic);
        assert!(!cfg.align_signals.port);
        assert!(!cfg.align_signals.signal);
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let cfg = Config::from_toml_str("line_length = 80\n[align_signals]\nport = true\n")
            .expect("valid partial config");
        assert_eq!(cfg.line_length, 80);
        assert!(cfg.align_signals.port);
        assert!(!cfg.align_signals.generic);
        assert_eq!(cfg.indent, 2);
    }

    #[test]
    fn unrecognised_keys_are_ignored() {
        let cfg = Config::from_toml_str("line_length = 60\nsome_future_option = true\n")
            .expect("unknown keys are ignored, not rejected");
        assert_eq!(cfg.line_length, 60);
    }

    #[test]
    fn keyword_case_parses_from_str() {
        assert_eq!("lower".parse::<KeywordCase>().unwrap(), KeywordCase::Lower);
        assert_eq!("upper".parse::<KeywordCase>().unwrap(), KeywordCase::Upper);
        assert!("loud".parse::<KeywordCase>().is_err());
    }
}
