//! Syntax layer for course selection entries
//!
//! A hand-rolled, single-pass scanner: character classes, a forward-only
//! cursor with its token readers, and the field parsers driven by the
//! top-level state machine.

pub mod classify;
pub mod cursor;
pub mod parser;

pub use classify::{is_delimiter, is_digit, is_letter, is_valid};
pub use cursor::Cursor;
pub use parser::{parse_course_selection, parse_course_selection_with, ParseState};

/// Represents a byte span in the entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}
