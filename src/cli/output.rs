//! Handles all user-facing output for the CLI.
//!
//! Everything is written to a caller-supplied [`WriteColor`], so the REPL,
//! the batch checker and the tests share one rendering path. Text output
//! shows the raw entry next to the normalized tuple or the full diagnostic;
//! JSON output emits one object per entry.

use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::batch::BatchSummary;
use crate::errors::CourseError;
use crate::selection::{CourseSelection, Semester};
use crate::validation::abbreviations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// ============================================================================
// JSON SHAPES
// ============================================================================

/// Serializable summary of a [`CourseError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub kind: &'static str,
    pub message: String,
    /// Outermost context first.
    pub context: Vec<String>,
}

impl From<&CourseError> for ErrorReport {
    fn from(error: &CourseError) -> Self {
        Self {
            code: error.diagnostic_code(),
            kind: error.kind().code_suffix(),
            message: error.kind().to_string(),
            context: error
                .context()
                .iter()
                .rev()
                .map(|frame| frame.to_string())
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonOutcome<'a> {
    Ok {
        input: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<&'a str>,
        selection: &'a CourseSelection,
    },
    Error {
        input: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<&'a str>,
        error: ErrorReport,
    },
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints the outcome of parsing one entry.
pub fn print_outcome(
    out: &mut dyn WriteColor,
    entry: &str,
    location: Option<&str>,
    result: &Result<CourseSelection, CourseError>,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let outcome = match result {
                Ok(selection) => JsonOutcome::Ok {
                    input: entry,
                    location,
                    selection,
                },
                Err(error) => JsonOutcome::Error {
                    input: entry,
                    location,
                    error: ErrorReport::from(error),
                },
            };
            let json = serde_json::to_string(&outcome).map_err(io::Error::other)?;
            writeln!(out, "{json}")
        }
        OutputFormat::Text => {
            if let Some(location) = location {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
                writeln!(out, "{location}")?;
                out.reset()?;
            }
            writeln!(out, "Entry  | [{entry}]")?;
            match result {
                Ok(selection) => print_selection(out, selection),
                Err(error) => print_failure(out, error),
            }
        }
    }
}

/// Prints a normalized selection in display order.
pub fn print_selection(out: &mut dyn WriteColor, selection: &CourseSelection) -> io::Result<()> {
    write!(out, "Result ")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(out, "{selection}")?;
    out.reset()?;
    writeln!(out)
}

/// Prints the miette rendering of a failed entry, including the context chain.
pub fn print_failure(out: &mut dyn WriteColor, error: &CourseError) -> io::Result<()> {
    let report = miette::Report::new(error.clone());
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    writeln!(out, "Error  | {}", error.diagnostic_code())?;
    out.reset()?;
    writeln!(out, "{report:?}")
}

/// Prints the pass/fail tally of a batch run.
pub fn print_summary(out: &mut dyn WriteColor, summary: &BatchSummary) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "Entry Summary")?;
    out.reset()?;
    writeln!(out, "═════════════")?;
    if summary.passed > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(out, "✓ Accepted: {} entries", summary.passed)?;
        out.reset()?;
    }
    if summary.failed > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(out, "✗ Rejected: {} entries", summary.failed)?;
        out.reset()?;
    }
    writeln!(
        out,
        "Success Rate: {:.1}% ({}/{})",
        summary.success_rate(),
        summary.passed,
        summary.total()
    )
}

/// Blank line, then the summary block that closes a `check` run.
pub fn print_batch_footer(out: &mut dyn WriteColor, summary: &BatchSummary) -> io::Result<()> {
    writeln!(out)?;
    print_summary(out, summary)
}

/// Lists every accepted semester spelling.
pub fn print_semesters(out: &mut dyn WriteColor) -> io::Result<()> {
    let listed = abbreviations();
    for semester in Semester::ALL {
        let keys: Vec<&str> = listed
            .iter()
            .filter(|(_, s)| *s == semester)
            .map(|(key, _)| *key)
            .collect();
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "  {:<8}", semester.name())?;
        out.reset()?;
        writeln!(out, "{}", keys.join(", "))?;
    }
    Ok(())
}
