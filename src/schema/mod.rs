//! Column rules and numeric coercion for heterogeneous table headers
//!
//! The source tables name the same concept differently across publishers and
//! vintages. A [`ColumnRule`] carries an ordered list of name patterns plus an
//! optional positional fallback, so every table declares up front how each of
//! its columns is found instead of probing headers ad hoc.

use crate::error::{AnalysisError, Result};
use log::warn;

/// Keywords that disqualify a column from being treated as a skill category
pub const FEATURE_DENYLIST: [&str; 7] = [
    "employment",
    "wage",
    "title",
    "education",
    "code",
    "percent",
    "change",
];

/// A name pattern matched against a trimmed header, ignoring case
#[derive(Debug, Clone)]
pub enum ColumnPattern {
    /// Header equals the name
    Equals(String),
    /// Header contains the fragment
    Contains(String),
    /// Header contains every fragment
    ContainsAll(Vec<String>),
}

impl ColumnPattern {
    /// Pattern matching a header exactly
    pub fn equals(name: impl Into<String>) -> Self {
        Self::Equals(name.into())
    }

    /// Pattern matching a header containing the fragment
    pub fn contains(fragment: impl Into<String>) -> Self {
        Self::Contains(fragment.into())
    }

    /// Pattern matching a header containing every fragment
    pub fn contains_all<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ContainsAll(fragments.into_iter().map(Into::into).collect())
    }

    /// Check the pattern against a single header name
    #[must_use]
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        match self {
            Self::Equals(name) => header == name.to_lowercase(),
            Self::Contains(fragment) => header.contains(&fragment.to_lowercase()),
            Self::ContainsAll(fragments) => fragments
                .iter()
                .all(|fragment| header.contains(&fragment.to_lowercase())),
        }
    }
}

/// How one canonical column is located in a table header
///
/// Patterns are tried in declaration order; the first pattern that matches
/// any header wins, scanning headers left to right. When no pattern matches
/// and a fallback position is declared, that position is used and logged.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    /// Canonical name of the column, used in error messages
    pub canonical: String,
    /// Name patterns in priority order
    pub patterns: Vec<ColumnPattern>,
    /// Position to use when no pattern matches
    pub fallback_index: Option<usize>,
}

impl ColumnRule {
    /// Create a rule with no patterns yet
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            patterns: Vec::new(),
            fallback_index: None,
        }
    }

    /// Add a pattern with lower priority than the ones before it
    #[must_use]
    pub fn with_pattern(mut self, pattern: ColumnPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Declare a positional fallback for tables with unrecognizable headers
    #[must_use]
    pub fn with_fallback(mut self, index: usize) -> Self {
        self.fallback_index = Some(index);
        self
    }

    /// Resolve the rule against a table header
    #[must_use]
    pub fn resolve(&self, headers: &[String]) -> Option<usize> {
        for pattern in &self.patterns {
            if let Some(index) = headers.iter().position(|h| pattern.matches(h)) {
                return Some(index);
            }
        }
        match self.fallback_index {
            Some(index) if index < headers.len() => {
                warn!(
                    "column '{}' not matched by name, falling back to position {index} ('{}')",
                    self.canonical, headers[index]
                );
                Some(index)
            }
            _ => None,
        }
    }

    /// Resolve the rule, treating an unresolved column as a schema error
    pub fn require(&self, headers: &[String]) -> Result<usize> {
        self.resolve(headers).ok_or_else(|| {
            AnalysisError::SchemaError(format!("required column '{}' not found", self.canonical))
        })
    }
}

/// The occupation code rule shared by every registry
///
/// Registries whose headers are known to drift pass the positional fallback
/// their source uses; the others treat a missing code column as fatal.
#[must_use]
pub fn soc_column_rule(fallback_index: Option<usize>) -> ColumnRule {
    let rule = ColumnRule::new("SOC")
        .with_pattern(ColumnPattern::equals("soc code"))
        .with_pattern(ColumnPattern::contains_all(["soc", "code"]))
        .with_pattern(ColumnPattern::contains("matrix code"))
        .with_pattern(ColumnPattern::equals("occ_code"));
    match fallback_index {
        Some(index) => rule.with_fallback(index),
        None => rule,
    }
}

/// Coerce a cell to a number
///
/// Strips ASCII thousand separators before parsing. Anything unparseable,
/// including the suppression markers BLS uses (`*`, `**`, `#`) and literal
/// NaN, counts as missing rather than an error.
#[must_use]
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Whether a header is disqualified from skill category selection
#[must_use]
pub fn is_denylisted_feature(header: &str) -> bool {
    let lower = header.to_lowercase();
    FEATURE_DENYLIST
        .iter()
        .any(|keyword| lower.contains(keyword))
}
