//! Filename-stem filtering for candidate icons.

use regex::Regex;

use crate::error::PackError;

/// Pattern that matches every stem; also what an empty pattern means.
pub const MATCH_ALL: &str = ".+";

/// Compiled filter over icon filename stems.
///
/// The expression must match the *whole* stem: `edit` does not qualify
/// `edit-copy.svg`, only `edit.svg`. Anchoring is applied here so callers
/// pass the bare expression.
#[derive(Debug, Clone)]
pub struct IconFilter {
    regex: Regex,
}

impl IconFilter {
    /// Compile a filter expression. An empty expression behaves as
    /// match-everything, not match-nothing. Fails before any filesystem
    /// traversal takes place.
    pub fn new(pattern: &str) -> Result<Self, PackError> {
        let effective = if pattern.is_empty() { MATCH_ALL } else { pattern };
        let regex =
            Regex::new(&format!("\\A(?:{effective})\\z")).map_err(|e| PackError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
        Ok(Self { regex })
    }

    /// Filter that accepts every stem
    #[allow(clippy::unwrap_used)] // MATCH_ALL is a known-good expression
    pub fn match_all() -> Self {
        Self::new(MATCH_ALL).unwrap()
    }

    #[inline]
    pub fn matches(&self, stem: &str) -> bool {
        self.regex.is_match(stem)
    }
}
