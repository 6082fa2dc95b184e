//! Semantic validators for the offer-session tokens.
//!
//! Both are pure functions over an already-scanned token. They report a kind
//! without a position; the field parser places the error on the token span.

pub mod semester;
pub mod year;

pub use semester::{abbreviations, lookup_semester, validate_semester};
pub use year::{normalize_year, validate_year, TWO_DIGIT_CEILING};
