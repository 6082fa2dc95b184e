//! Course Selection Error Handling
//!
//! Every failure is a [`CourseError`]: the originating [`ErrorKind`], the byte
//! span where it was observed, and the stack of stages that were active when it
//! surfaced. Errors are enriched in two phases. Scanners and validators report
//! a kind (plus a span when they have one); the top-level driver attaches the
//! raw entry as a named source exactly once before returning to the caller.
//!
//! Nothing here is fatal to the process. A failed entry is reported and the
//! caller moves on to the next one.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

/// Name given to the raw entry when it is attached as diagnostic source code.
pub const ENTRY_SOURCE_NAME: &str = "entry";

// ============================================================================
// STAGES - Where in the pipeline an error surfaced
// ============================================================================

/// A parsing stage that can wrap an error with context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LeadingDelimiters,
    DeptCourse,
    Department,
    Course,
    Separator,
    OfferSession,
    Year,
    Semester,
}

impl Stage {
    /// Identifier used inside diagnostic codes.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Stage::LeadingDelimiters => "leading_delimiters",
            Stage::DeptCourse => "dept_course",
            Stage::Department => "department",
            Stage::Course => "course",
            Stage::Separator => "separator",
            Stage::OfferSession => "offer_session",
            Stage::Year => "year",
            Stage::Semester => "semester",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::LeadingDelimiters => "leading delimiters",
            Stage::DeptCourse => "[DeptCourse]",
            Stage::Department => "department",
            Stage::Course => "course",
            Stage::Separator => "field separator",
            Stage::OfferSession => "[OfferSession]",
            Stage::Year => "year",
            Stage::Semester => "semester",
        };
        f.write_str(label)
    }
}

// ============================================================================
// ERROR KINDS - The taxonomy of reportable failures
// ============================================================================

/// What the scanner was looking at when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{c:?}"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Every distinct way an entry can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("no input data found")]
    EmptyInput,

    #[error("invalid character {found:?}")]
    InvalidCharacter { found: char },

    #[error("expected a letter, found {found:?}")]
    ExpectedLetter { found: char },

    #[error("expected a digit, found {found:?}")]
    ExpectedDigit { found: char },

    #[error("department must start with a letter, found {found}")]
    InvalidDepartment { found: Found },

    #[error("missing course number")]
    MissingCourseNumber,

    #[error("course number must start with a digit, found {found:?}")]
    InvalidCourseFormat { found: char },

    #[error("missing field separator after the course number, found {found:?}")]
    MissingSeparator { found: char },

    #[error("expected exactly one {expected:?} between [DeptCourse] and [OfferSession], found {found:?}")]
    WrongSeparator { expected: char, found: char },

    #[error("missing offer session (year and semester)")]
    MissingOfferSession,

    #[error("offer session must start with a year or a semester, found {found:?}")]
    InvalidOfferSession { found: char },

    #[error("malformed year {value:?}")]
    MalformedYear { value: String },

    #[error("year {year} is outside the offered range [{earliest}, {latest})")]
    YearOutOfRange { year: u32, earliest: u32, latest: u32 },

    #[error("unknown semester {value:?}")]
    UnknownSemester { value: String },

    #[error("unexpected end of input, expected {expected}")]
    EndOfInput { expected: &'static str },

    #[error("cursor position {position} is outside the input (length {length})")]
    CursorOutOfBounds { position: usize, length: usize },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ErrorKind {
    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::ExpectedLetter { .. } => "expected_letter",
            Self::ExpectedDigit { .. } => "expected_digit",
            Self::InvalidDepartment { .. } => "invalid_department",
            Self::MissingCourseNumber => "missing_course_number",
            Self::InvalidCourseFormat { .. } => "invalid_course_format",
            Self::MissingSeparator { .. } => "missing_separator",
            Self::WrongSeparator { .. } => "wrong_separator",
            Self::MissingOfferSession => "missing_offer_session",
            Self::InvalidOfferSession { .. } => "invalid_offer_session",
            Self::MalformedYear { .. } => "malformed_year",
            Self::YearOutOfRange { .. } => "year_out_of_range",
            Self::UnknownSemester { .. } => "unknown_semester",
            Self::EndOfInput { .. } => "end_of_input",
            Self::CursorOutOfBounds { .. } => "cursor_out_of_bounds",
            Self::Internal { .. } => "internal",
        }
    }

    /// True for kinds that signal a defect in the parser rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::CursorOutOfBounds { .. } | Self::Internal { .. })
    }

    fn help(&self) -> Option<String> {
        let help = match self {
            Self::EmptyInput => "enter a selection such as \"CS111 2016 Fall\"".to_string(),
            Self::InvalidCharacter { .. } => {
                "only letters, digits, ' ', '-' and ':' are allowed".to_string()
            }
            Self::InvalidDepartment { .. } => {
                "start the entry with the department letters, e.g. \"CS\"".to_string()
            }
            Self::MissingCourseNumber | Self::InvalidCourseFormat { .. } => {
                "follow the department with the course number, e.g. \"CS111\" or \"CS-111\""
                    .to_string()
            }
            Self::MissingSeparator { .. } | Self::WrongSeparator { .. } => {
                "put a single space between the course and the session, e.g. \"CS111 Fall 2016\""
                    .to_string()
            }
            Self::MissingOfferSession | Self::InvalidOfferSession { .. } => {
                "add the year and semester, in either order, e.g. \"2016 Fall\"".to_string()
            }
            Self::YearOutOfRange {
                earliest, latest, ..
            } => format!(
                "courses are offered from {} through {}",
                earliest,
                latest.saturating_sub(1)
            ),
            Self::UnknownSemester { .. } => {
                "use Fall, Spring, Summer or Winter, or an abbreviation such as F, SPR, SU, WTR"
                    .to_string()
            }
            Self::CursorOutOfBounds { .. } | Self::Internal { .. } => {
                "this is an internal parser error. Please report it as a bug.".to_string()
            }
            Self::ExpectedLetter { .. }
            | Self::ExpectedDigit { .. }
            | Self::MalformedYear { .. }
            | Self::EndOfInput { .. } => return None,
        };
        Some(help)
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty entry",
            Self::InvalidCharacter { .. } => "invalid character",
            Self::ExpectedLetter { .. } => "expected a letter here",
            Self::ExpectedDigit { .. } => "expected a digit here",
            Self::InvalidDepartment { .. } => "not a department",
            Self::MissingCourseNumber => "course number missing here",
            Self::InvalidCourseFormat { .. } => "not a course number",
            Self::MissingSeparator { .. } => "separator missing here",
            Self::WrongSeparator { .. } => "unexpected delimiter",
            Self::MissingOfferSession => "offer session missing here",
            Self::InvalidOfferSession { .. } => "not a year or semester",
            Self::MalformedYear { .. } => "malformed year",
            Self::YearOutOfRange { .. } => "year out of range",
            Self::UnknownSemester { .. } => "unknown semester",
            Self::EndOfInput { .. } => "input ends here",
            Self::CursorOutOfBounds { .. } | Self::Internal { .. } => "internal error",
        }
    }
}

// ============================================================================
// CONTEXT FRAMES
// ============================================================================

/// One layer of context added by an enclosing parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFrame {
    pub stage: Stage,
    pub detail: String,
}

impl fmt::Display for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.detail, self.stage)
    }
}

// ============================================================================
// COURSE ERROR
// ============================================================================

/// The single error type returned by the parser.
#[derive(Debug, Clone)]
pub struct CourseError {
    kind: ErrorKind,
    span: Option<SourceSpan>,
    /// Innermost frame first.
    context: Vec<ContextFrame>,
    source: Option<Arc<NamedSource<String>>>,
    entry: Option<Arc<str>>,
}

impl CourseError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            context: Vec::new(),
            source: None,
            entry: None,
        }
    }

    /// Places the error at a byte span of the entry. An existing span is kept,
    /// since the innermost reporter saw the most precise location.
    pub fn at(mut self, span: impl Into<SourceSpan>) -> Self {
        if self.span.is_none() {
            self.span = Some(span.into());
        }
        self
    }

    /// Pushes an outer context frame.
    pub fn with_context(mut self, stage: Stage, detail: impl Into<String>) -> Self {
        self.context.push(ContextFrame {
            stage,
            detail: detail.into(),
        });
        self
    }

    /// Attaches the raw entry so diagnostics can show it.
    pub fn with_source(mut self, entry: &str) -> Self {
        self.source = Some(Arc::new(NamedSource::new(
            ENTRY_SOURCE_NAME,
            entry.to_string(),
        )));
        self.entry = Some(Arc::from(entry));
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }

    /// Context frames, innermost first.
    pub fn context(&self) -> &[ContextFrame] {
        &self.context
    }

    /// The most specific stage that wrapped this error, if any.
    pub fn stage(&self) -> Option<Stage> {
        self.context.first().map(|frame| frame.stage)
    }

    /// The raw entry, once the driver has attached it.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// Diagnostic code of the form `course::<stage>::<kind>`.
    pub fn diagnostic_code(&self) -> String {
        let stage = self.stage().map_or("input", |stage| stage.as_str());
        format!("course::{}::{}", stage, self.kind.code_suffix())
    }

    /// Renders the whole chain, outermost context first and the originating
    /// error last.
    pub fn render_chain(&self) -> String {
        let mut lines: Vec<String> = self
            .context
            .iter()
            .rev()
            .map(|frame| format!("while {frame}"))
            .collect();
        lines.push(format!("error: {}", self.kind));
        lines.join("\n")
    }
}

impl From<ErrorKind> for CourseError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl std::error::Error for CourseError {}

impl fmt::Display for CourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for frame in &self.context {
            write!(f, "\n  while {frame}")?;
        }
        Ok(())
    }
}

impl Diagnostic for CourseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diagnostic_code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // A label without source code would make miette's renderer bail out.
        self.source.as_ref()?;
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(self.kind.primary_label().into()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// REPORTING
// ============================================================================

/// Context-aware error creation: anything that knows "where we are" can turn a
/// kind into a positioned error.
pub trait ErrorReporting {
    /// Create an error positioned at the reporter's current location.
    fn report(&self, kind: ErrorKind) -> CourseError;

    fn invalid_character(&self, found: char) -> CourseError {
        self.report(ErrorKind::InvalidCharacter { found })
    }

    fn end_of_input(&self, expected: &'static str) -> CourseError {
        self.report(ErrorKind::EndOfInput { expected })
    }
}
