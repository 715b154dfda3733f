//! Regex filtering over note file names.
//!
//! Keyword filtering is only a way of building a pattern; every filter ends
//! up as a regex searched against the file name.

use crate::error::{Error, Result};
use crate::identifier::KEYWORD_DELIMITER;
use regex::Regex;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keep names the pattern matches.
    Include,
    /// Keep names the pattern does not match.
    Exclude,
}

#[derive(Debug, Clone)]
pub struct Filter {
    regex: Regex,
    mode: Mode,
}

impl Filter {
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_mode(pattern, Mode::Include)
    }

    pub fn with_mode(pattern: &str, mode: Mode) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { regex, mode })
    }

    /// `None` when no keywords were selected.
    pub fn keywords(selected: &[String]) -> Option<Result<Self>> {
        keyword_pattern(selected).map(|p| Self::new(&p))
    }

    pub fn excluding_keywords(selected: &[String]) -> Option<Result<Self>> {
        keyword_pattern(selected).map(|p| Self::with_mode(&p, Mode::Exclude))
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_match(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let found = self.regex.is_match(&name);
        match self.mode {
            Mode::Include => found,
            Mode::Exclude => !found,
        }
    }

    /// Keep the candidates this filter accepts, in their original order.
    pub fn apply(&self, candidates: &[PathBuf]) -> Vec<PathBuf> {
        candidates.iter().filter(|p| self.is_match(p)).cloned().collect()
    }
}

/// `(_kw1|_kw2|...)`, each keyword escaped.
pub fn keyword_pattern(selected: &[String]) -> Option<String> {
    let alternatives: Vec<String> = selected
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| format!("{KEYWORD_DELIMITER}{}", regex::escape(k)))
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Some(format!("({})", alternatives.join("|")))
}
