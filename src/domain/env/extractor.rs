//! Line filter over `export NAME=VALUE` environment dumps
//!
//! The dump comes straight from a unit and is untrusted: it is treated as
//! opaque bytes, only split on `\n`, and never interpreted beyond the prefix
//! match.

use regex::bytes::{Regex, RegexBuilder};

use crate::domain::DomainError;

/// Prefix every assignment line in an environment dump starts with
pub const EXPORT_PREFIX: &[u8] = b"export ";

const MAX_PATTERN_SIZE: usize = 1 << 20;

/// Compiled filter for a set of requested variable names
#[derive(Debug, Clone)]
pub struct EnvFilter {
    pattern: Option<Regex>,
}

impl EnvFilter {
    /// Build a filter matching lines `export <NAME>=...` for any requested name
    ///
    /// An empty name set yields a filter that matches nothing.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, DomainError> {
        if names.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternation = names
            .iter()
            .map(|name| regex::escape(name.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = RegexBuilder::new(&format!("^export (?:{})=", alternation))
            .size_limit(MAX_PATTERN_SIZE)
            .build()
            .map_err(|e| DomainError::bad_input(format!("Invalid variable names: {}", e)))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Check a single line against the filter
    pub fn matches(&self, line: &[u8]) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(line))
    }

    /// Filter `dump`, returning matching lines with the export prefix removed
    ///
    /// Lines keep their terminator; a final unterminated line is emitted once
    /// without one.
    pub fn apply(&self, dump: &[u8]) -> Vec<u8> {
        let mut output = Vec::new();

        if self.pattern.is_none() {
            return output;
        }

        for line in dump.split_inclusive(|b| *b == b'\n') {
            if self.matches(line) {
                output.extend_from_slice(&line[EXPORT_PREFIX.len()..]);
            }
        }

        output
    }
}

/// Extract the requested variables from an environment dump
pub fn extract_env<S: AsRef<str>>(names: &[S], dump: &[u8]) -> Result<Vec<u8>, DomainError> {
    Ok(EnvFilter::new(names)?.apply(dump))
}

/// Split a whitespace-separated list of variable names
pub fn parse_variable_names(body: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(body)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
