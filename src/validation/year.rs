//! Year range validation with 2-digit abbreviation support.

use crate::config::ParserConfig;
use crate::errors::{CourseError, ErrorKind};

/// Values strictly below this are treated as 2-digit abbreviations of a
/// 21st-century year. `99` itself and anything with three or more digits are
/// taken literally.
pub const TWO_DIGIT_CEILING: u32 = 99;

/// Maps an abbreviated year onto the 21st century.
pub fn normalize_year(value: u32) -> u32 {
    if value < TWO_DIGIT_CEILING {
        value + 2000
    } else {
        value
    }
}

/// Parses a digit token, normalizes it and checks it against the configured
/// `[earliest, latest)` range. Returns the 4-digit canonical year.
pub fn validate_year(digits: &str, config: &ParserConfig) -> Result<String, CourseError> {
    let value: u32 = digits.parse().map_err(|_| {
        CourseError::new(ErrorKind::MalformedYear {
            value: digits.to_string(),
        })
    })?;

    let year = normalize_year(value);
    if !config.year_range().contains(&year) {
        return Err(CourseError::new(ErrorKind::YearOutOfRange {
            year,
            earliest: config.earliest_year,
            latest: config.latest_year,
        }));
    }

    Ok(format!("{year:04}"))
}
