//! Parser configuration.
//!
//! Built once at startup (from defaults or CLI flags) and passed by shared
//! reference into every parse. Nothing in here is mutated while parsing.

use std::ops::Range;

use miette::Diagnostic;
use thiserror::Error;

/// Characters that may appear between tokens.
pub const DELIMITERS: [u8; 3] = [b' ', b'-', b':'];

/// The canonical field separator between `[DeptCourse]` and `[OfferSession]`.
pub const DEFAULT_SEPARATOR: u8 = b' ';

/// First year a course can be offered (inclusive).
pub const EARLIEST_COURSE_YEAR: u32 = 2007;

/// Upper bound on offered years (exclusive).
pub const LATEST_COURSE_YEAR: u32 = 2022;

/// Which characters may act as the single field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorPolicy {
    /// Any one delimiter character separates the fields.
    #[default]
    AnyDelimiter,
    /// Only the configured separator character is accepted.
    Exact,
}

/// Settings shared by every parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub separator: u8,
    pub separator_policy: SeparatorPolicy,
    pub earliest_year: u32,
    pub latest_year: u32,
    /// Narrate each parsing step through the `log` facade.
    pub verbose: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            separator_policy: SeparatorPolicy::AnyDelimiter,
            earliest_year: EARLIEST_COURSE_YEAR,
            latest_year: LATEST_COURSE_YEAR,
            verbose: false,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_separator_policy(mut self, policy: SeparatorPolicy) -> Self {
        self.separator_policy = policy;
        self
    }

    pub fn with_year_bounds(mut self, earliest: u32, latest: u32) -> Self {
        self.earliest_year = earliest;
        self.latest_year = latest;
        self
    }

    /// Offered years as a half-open range.
    pub fn year_range(&self) -> Range<u32> {
        self.earliest_year..self.latest_year
    }

    /// Whether `c` may stand as the field separator under the current policy.
    pub fn accepts_separator(&self, c: u8) -> bool {
        match self.separator_policy {
            SeparatorPolicy::AnyDelimiter => DELIMITERS.contains(&c),
            SeparatorPolicy::Exact => c == self.separator,
        }
    }

    /// Rejects settings no entry could ever satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !DELIMITERS.contains(&self.separator) {
            return Err(ConfigError::SeparatorNotDelimiter {
                found: self.separator as char,
            });
        }
        if self.earliest_year >= self.latest_year {
            return Err(ConfigError::InvertedYearBounds {
                earliest: self.earliest_year,
                latest: self.latest_year,
            });
        }
        Ok(())
    }
}

/// Invalid configuration, reported before any entry is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    #[error("separator {found:?} is not one of the delimiters ' ', '-', ':'")]
    #[diagnostic(code(course::config::separator_not_delimiter))]
    SeparatorNotDelimiter { found: char },

    #[error("earliest year {earliest} must be before the latest year {latest}")]
    #[diagnostic(
        code(course::config::inverted_year_bounds),
        help("the latest year is exclusive, e.g. --earliest-year 2007 --latest-year 2022")
    )]
    InvertedYearBounds { earliest: u32, latest: u32 },
}
