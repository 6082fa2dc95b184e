//! Course Selection Parser
//!
//! Reduces one free-form entry such as `"CS-111 Fall 2016"` to a
//! [`CourseSelection`]. Grammar:
//!
//! ```text
//! entry         := delimiter* dept_course SEPARATOR offer_session
//! dept_course   := letter+ delimiter? digit+
//! offer_session := digit+ delimiter* letter+
//!                | letter+ delimiter* digit+
//! ```
//!
//! The driver walks a strictly linear sequence of [`ParseState`]s. The first
//! failure short-circuits with the originating error, wrapped by each
//! enclosing stage. There is no backtracking: the cursor only moves forward.

use std::fmt;

use crate::config::ParserConfig;
use crate::errors::{CourseError, ErrorKind, ErrorReporting, Stage};
use crate::selection::{CourseSelection, SelectionSlots};
use crate::syntax::classify::{is_delimiter, is_digit, is_letter};
use crate::syntax::cursor::Cursor;
use crate::validation::{validate_semester, validate_year};

/// `log` target used for step-by-step narration in verbose mode.
pub const TRACE_TARGET: &str = "course_selection::trace";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse one entry with the default configuration.
pub fn parse_course_selection(line: &str) -> Result<CourseSelection, CourseError> {
    parse_course_selection_with(line, &ParserConfig::default())
}

/// Parse one entry with an injected configuration.
pub fn parse_course_selection_with(
    line: &str,
    config: &ParserConfig,
) -> Result<CourseSelection, CourseError> {
    let result = CourseParser::new(line, config).run();
    if config.verbose {
        match &result {
            Ok(selection) => log::debug!(target: TRACE_TARGET, "success: {selection}"),
            Err(error) => log::debug!(target: TRACE_TARGET, "failure: {}", error.kind()),
        }
    }
    result.map_err(|e| e.with_source(line))
}

// ============================================================================
// DRIVER STATE
// ============================================================================

/// Driver states, in the only order they can be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseState {
    Start,
    SkippingLeadingJunk,
    ParsingDeptCourse,
    CheckingSeparator,
    ParsingOfferSession,
    Done,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::Start => "start",
            ParseState::SkippingLeadingJunk => "skipping leading junk",
            ParseState::ParsingDeptCourse => "parsing [DeptCourse]",
            ParseState::CheckingSeparator => "checking field separator",
            ParseState::ParsingOfferSession => "parsing [OfferSession]",
            ParseState::Done => "done",
        };
        f.write_str(name)
    }
}

struct CourseParser<'a> {
    cursor: Cursor<'a>,
    config: &'a ParserConfig,
    slots: SelectionSlots,
    state: ParseState,
}

impl<'a> CourseParser<'a> {
    fn new(line: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(line),
            config,
            slots: SelectionSlots::default(),
            state: ParseState::Start,
        }
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.config.verbose {
            log::debug!(
                target: TRACE_TARGET,
                "[{}@{}] {}",
                self.state,
                self.cursor.position(),
                args
            );
        }
    }

    fn enter(&mut self, state: ParseState) {
        debug_assert!(state > self.state || state == ParseState::Start);
        self.state = state;
        self.trace(format_args!("enter"));
    }

    fn run(mut self) -> Result<CourseSelection, CourseError> {
        self.enter(ParseState::Start);
        if self.cursor.is_empty() {
            return Err(CourseError::new(ErrorKind::EmptyInput));
        }

        self.enter(ParseState::SkippingLeadingJunk);
        let skipped = self.cursor.skip_delimiters("department").map_err(|e| {
            e.with_context(Stage::LeadingDelimiters, "skipping leading delimiters")
        })?;
        self.trace(format_args!("skipped {skipped} leading delimiter(s)"));

        self.enter(ParseState::ParsingDeptCourse);
        self.parse_dept_course()
            .map_err(|e| e.with_context(Stage::DeptCourse, "parsing the [DeptCourse] field"))?;

        self.enter(ParseState::CheckingSeparator);
        self.check_separator()
            .map_err(|e| e.with_context(Stage::Separator, "checking the field separator"))?;

        self.enter(ParseState::ParsingOfferSession);
        self.parse_offer_session().map_err(|e| {
            e.with_context(Stage::OfferSession, "parsing the [OfferSession] field")
        })?;

        self.enter(ParseState::Done);
        if !self.cursor.is_at_end() {
            self.trace(format_args!(
                "ignoring trailing input {:?}",
                self.cursor.remaining()
            ));
        }
        self.slots.finish()
    }

    // ========================================================================
    // [DeptCourse]
    // ========================================================================

    fn parse_dept_course(&mut self) -> Result<(), CourseError> {
        match self.cursor.peek() {
            Some(c) if is_letter(c) => {}
            _ => {
                let found = self.cursor.found();
                return Err(self.cursor.report(ErrorKind::InvalidDepartment { found }));
            }
        }

        let dept = self
            .cursor
            .read_alpha()
            .map_err(|e| e.with_context(Stage::Department, "reading the department"))?;
        self.trace(format_args!("department {dept:?}"));
        self.slots.set_dept(dept)?;

        if self.cursor.is_at_end() {
            return Err(self.cursor.report(ErrorKind::MissingCourseNumber));
        }
        if let Some(delimiter) = self.cursor.eat_delimiter() {
            self.trace(format_args!(
                "skipped {:?} between department and course",
                delimiter as char
            ));
            if self.cursor.is_at_end() {
                return Err(self.cursor.report(ErrorKind::MissingCourseNumber));
            }
        }

        match (self.cursor.peek(), self.cursor.current_char()) {
            (Some(c), _) if is_digit(c) => {}
            (_, Some(found)) => {
                return Err(self.cursor.report(ErrorKind::InvalidCourseFormat { found }));
            }
            (_, None) => return Err(self.cursor.report(ErrorKind::MissingCourseNumber)),
        }

        let course = self
            .cursor
            .read_number()
            .map_err(|e| e.with_context(Stage::Course, "reading the course number"))?;
        self.trace(format_args!("course {course:?}"));
        self.slots.set_course(course)
    }

    // ========================================================================
    // FIELD SEPARATOR
    // ========================================================================

    fn check_separator(&mut self) -> Result<(), CourseError> {
        let expected = self.config.separator as char;
        let (Some(c), Some(found)) = (self.cursor.peek(), self.cursor.current_char()) else {
            return Err(self.cursor.report(ErrorKind::MissingOfferSession));
        };
        if !is_delimiter(c) {
            return Err(self.cursor.report(ErrorKind::MissingSeparator { found }));
        }
        if !self.config.accepts_separator(c) {
            return Err(self
                .cursor
                .report(ErrorKind::WrongSeparator { expected, found }));
        }
        self.cursor.eat_delimiter();
        self.trace(format_args!("field separator {found:?}"));

        match (self.cursor.peek(), self.cursor.current_char()) {
            (None, _) | (_, None) => Err(self.cursor.report(ErrorKind::MissingOfferSession)),
            (Some(next), Some(found)) if is_delimiter(next) => Err(self
                .cursor
                .report(ErrorKind::WrongSeparator { expected, found })),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // [OfferSession]
    // ========================================================================

    fn parse_offer_session(&mut self) -> Result<(), CourseError> {
        let Some(c) = self.cursor.peek() else {
            return Err(self.cursor.end_of_input("year or semester"));
        };

        if is_digit(c) {
            self.trace(format_args!("year-first order"));
            self.parse_year()?;
            self.skip_to_next_token("semester")?;
            self.parse_semester()
        } else if is_letter(c) {
            self.trace(format_args!("semester-first order"));
            self.parse_semester()?;
            self.skip_to_next_token("year")?;
            self.parse_year()
        } else {
            let found = self.cursor.current_char().unwrap_or(c as char);
            Err(self.cursor.report(ErrorKind::InvalidOfferSession { found }))
        }
    }

    /// Skips any delimiters between the year and semester, insisting that
    /// something follows them.
    fn skip_to_next_token(&mut self, expected: &'static str) -> Result<(), CourseError> {
        if self.cursor.is_at_end() {
            return Err(self.cursor.end_of_input(expected));
        }
        let skipped = self.cursor.skip_delimiters(expected)?;
        self.trace(format_args!("skipped {skipped} delimiter(s) before {expected}"));
        if self.cursor.is_at_end() {
            return Err(self.cursor.end_of_input(expected));
        }
        Ok(())
    }

    fn parse_year(&mut self) -> Result<(), CourseError> {
        let digits = self
            .cursor
            .read_number()
            .map_err(|e| e.with_context(Stage::Year, "reading the year"))?;
        let span = self.cursor.token_span(digits);
        let year = validate_year(digits, self.config).map_err(|e| {
            e.at(span)
                .with_context(Stage::Year, format!("validating year {digits:?}"))
        })?;
        self.trace(format_args!("year {digits:?} -> {year}"));
        self.slots.set_year(year)
    }

    fn parse_semester(&mut self) -> Result<(), CourseError> {
        let token = self
            .cursor
            .read_alpha()
            .map_err(|e| e.with_context(Stage::Semester, "reading the semester"))?;
        let span = self.cursor.token_span(token);
        let semester = validate_semester(token).map_err(|e| {
            e.at(span)
                .with_context(Stage::Semester, format!("validating semester {token:?}"))
        })?;
        self.trace(format_args!("semester {token:?} -> {semester}"));
        self.slots.set_semester(semester)
    }
}
