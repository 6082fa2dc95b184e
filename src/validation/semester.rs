//! Semester dictionary lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::errors::{CourseError, ErrorKind};
use crate::selection::Semester;

/// Accepted spellings, uppercase, mapped to their canonical semester.
const ABBREVIATIONS: [(&str, Semester); 20] = [
    ("F", Semester::Fall),
    ("FA", Semester::Fall),
    ("FAL", Semester::Fall),
    ("FALL", Semester::Fall),
    ("S", Semester::Spring),
    ("SP", Semester::Spring),
    ("SPR", Semester::Spring),
    ("SPRG", Semester::Spring),
    ("SPRNG", Semester::Spring),
    ("SPRING", Semester::Spring),
    ("SU", Semester::Summer),
    ("SUMR", Semester::Summer),
    ("SUMMER", Semester::Summer),
    ("W", Semester::Winter),
    ("WI", Semester::Winter),
    ("WIN", Semester::Winter),
    ("WTR", Semester::Winter),
    ("WNTR", Semester::Winter),
    ("WINTR", Semester::Winter),
    ("WINTER", Semester::Winter),
];

static SEMESTER_DICTIONARY: Lazy<HashMap<&'static str, Semester>> =
    Lazy::new(|| ABBREVIATIONS.into_iter().collect());

/// Looks up an already-uppercased key.
pub fn lookup_semester(key: &str) -> Option<Semester> {
    SEMESTER_DICTIONARY.get(key).copied()
}

/// Case-insensitive lookup of an alpha token.
pub fn validate_semester(token: &str) -> Result<Semester, CourseError> {
    let key = token.to_ascii_uppercase();
    lookup_semester(&key).ok_or_else(|| CourseError::new(ErrorKind::UnknownSemester { value: key }))
}

/// All accepted spellings, grouped by semester and shortest first.
pub fn abbreviations() -> Vec<(&'static str, Semester)> {
    let mut entries = ABBREVIATIONS.to_vec();
    entries.sort_by_key(|&(key, semester)| (semester, key.len(), key));
    entries
}
