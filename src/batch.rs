//! Batch checking of entry files.
//!
//! An entry file holds one selection per line. Blank lines and lines starting
//! with `#` are skipped, and a `quit` line ends the file early, the same
//! sentinel the interactive loop honours. A directory is scanned recursively
//! for `*.entries` files, in sorted order so runs are deterministic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use termcolor::WriteColor;
use thiserror::Error;
use walkdir::WalkDir;

use crate::cli::output::{print_outcome, OutputFormat};
use crate::config::ParserConfig;
use crate::repl::is_quit_command;
use crate::syntax::parse_course_selection_with;

pub const ENTRY_FILE_EXTENSION: &str = "entries";

/// One line of an entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based.
    pub line_number: usize,
    pub text: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub passed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, accepted: bool) {
        if accepted {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 / self.total() as f64 * 100.0
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum BatchError {
    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(course::batch::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory: {0}")]
    #[diagnostic(code(course::batch::walk))]
    Walk(#[from] walkdir::Error),

    #[error("no .entries files found under {}", .path.display())]
    #[diagnostic(
        code(course::batch::no_entry_files),
        help("pass a single file, or a directory containing *.entries files")
    )]
    NoEntryFiles { path: PathBuf },

    #[error("failed to write output: {0}")]
    #[diagnostic(code(course::batch::output))]
    Output(#[from] io::Error),
}

// ============================================================================
// DISCOVERY
// ============================================================================

/// A file is returned as-is; a directory is scanned for `*.entries` files.
pub fn discover_entry_files(root: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == ENTRY_FILE_EXTENSION) {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(BatchError::NoEntryFiles {
            path: root.to_path_buf(),
        });
    }
    files.sort();
    Ok(files)
}

/// Splits file contents into entries.
pub fn parse_entries(source: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if is_quit_command(line) {
            break;
        }
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        entries.push(Entry {
            line_number: index + 1,
            text: line.to_string(),
        });
    }
    entries
}

pub fn read_entries(path: &Path) -> Result<Vec<Entry>, BatchError> {
    let source = fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_entries(&source))
}

// ============================================================================
// CHECKING
// ============================================================================

/// Parses every entry under `root`, printing each outcome.
pub fn check_path(
    root: &Path,
    config: &ParserConfig,
    format: OutputFormat,
    out: &mut dyn WriteColor,
) -> Result<BatchSummary, BatchError> {
    let mut summary = BatchSummary::default();

    for file in discover_entry_files(root)? {
        let entries = read_entries(&file)?;
        log::info!("checking {} entries from {}", entries.len(), file.display());

        for entry in entries {
            let location = format!("{}:{}", file.display(), entry.line_number);
            let result = parse_course_selection_with(&entry.text, config);
            print_outcome(out, &entry.text, Some(&location), &result, format)?;
            summary.record(result.is_ok());
        }
    }

    Ok(summary)
}
