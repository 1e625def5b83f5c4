//! Title glob matching.
//!
//! `*` matches any run of characters (including none), `?` exactly one, and
//! everything else matches itself. Matching is case-insensitive and anchored
//! at both ends of the title.

use regex::Regex;

use crate::batch::ResolutionError;

/// A compiled title pattern.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    source: String,
    regex: Regex,
}

impl TitlePattern {
    /// Compile a glob.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidPattern`] for an empty or blank pattern.
    pub fn new(pattern: &str) -> Result<Self, ResolutionError> {
        if pattern.trim().is_empty() {
            return Err(ResolutionError::InvalidPattern {
                pattern: pattern.to_string(),
                message: "pattern must not be empty".to_string(),
            });
        }

        let mut expr = String::with_capacity(pattern.len() + 8);
        expr.push_str("(?is)^");
        let mut buf = [0u8; 4];
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                other => expr.push_str(&regex::escape(other.encode_utf8(&mut buf))),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| ResolutionError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}
