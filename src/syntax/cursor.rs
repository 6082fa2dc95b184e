//! Forward-only cursor over an entry, with the primitive token readers.
//!
//! The cursor never moves backward: every reader either consumes a maximal
//! run of one character class or fails without consuming anything past the
//! offending byte. The cursor only ever steps over ASCII bytes, so `position`
//! always sits on a UTF-8 boundary.

use crate::errors::{CourseError, ErrorKind, ErrorReporting, Found};
use crate::syntax::classify::{is_delimiter, is_digit, is_letter, is_valid};
use crate::syntax::Span;

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    /// The byte under the cursor, if any.
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }

    /// The full character under the cursor, for error messages.
    pub fn current_char(&self) -> Option<char> {
        self.text.get(self.position..)?.chars().next()
    }

    pub fn found(&self) -> Found {
        self.current_char().map_or(Found::EndOfInput, Found::Char)
    }

    /// Unconsumed remainder of the entry.
    pub fn remaining(&self) -> &'a str {
        self.text.get(self.position..).unwrap_or_default()
    }

    /// Span of a token that was just read.
    pub fn token_span(&self, token: &str) -> Span {
        Span::new(self.position - token.len(), self.position)
    }

    /// Consumes a single delimiter if one is under the cursor.
    pub fn eat_delimiter(&mut self) -> Option<u8> {
        let c = self.peek().filter(|&c| is_delimiter(c))?;
        self.position += 1;
        Some(c)
    }

    /// Skips a maximal run of delimiters, returning how many were skipped.
    /// Must be called with input remaining; `expected` names what the caller
    /// wants to find after the run.
    pub fn skip_delimiters(&mut self, expected: &'static str) -> Result<usize, CourseError> {
        if self.is_at_end() {
            return Err(self.end_of_input(expected));
        }
        let start = self.position;
        while let Some(c) = self.peek() {
            if !is_valid(c) {
                return Err(self.invalid_character(self.current_char().unwrap_or(c as char)));
            }
            if !is_delimiter(c) {
                break;
            }
            self.position += 1;
        }
        Ok(self.position - start)
    }

    /// Reads a maximal run of letters.
    pub fn read_alpha(&mut self) -> Result<&'a str, CourseError> {
        self.read_run(is_letter, |found| ErrorKind::ExpectedLetter { found })
    }

    /// Reads a maximal run of digits.
    pub fn read_number(&mut self) -> Result<&'a str, CourseError> {
        self.read_run(is_digit, |found| ErrorKind::ExpectedDigit { found })
    }

    fn read_run(
        &mut self,
        accepts: fn(u8) -> bool,
        expected: fn(char) -> ErrorKind,
    ) -> Result<&'a str, CourseError> {
        let first = self.check_bounds()?;
        if !accepts(first) {
            let found = self.current_char().unwrap_or(first as char);
            return Err(self.report(expected(found)));
        }

        let start = self.position;
        while let Some(c) = self.peek() {
            if !is_valid(c) {
                return Err(self.invalid_character(self.current_char().unwrap_or(c as char)));
            }
            if !accepts(c) {
                break;
            }
            self.position += 1;
        }
        Ok(&self.text[start..self.position])
    }

    fn check_bounds(&self) -> Result<u8, CourseError> {
        self.peek().ok_or_else(|| {
            self.report(ErrorKind::CursorOutOfBounds {
                position: self.position,
                length: self.text.len(),
            })
        })
    }
}

impl ErrorReporting for Cursor<'_> {
    fn report(&self, kind: ErrorKind) -> CourseError {
        let width = self.current_char().map_or(0, char::len_utf8);
        CourseError::new(kind).at(Span::new(self.position, self.position + width))
    }
}
