//! The Course Selection Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. The parser itself never touches a terminal;
//! everything here is line reading, configuration and display.

use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use termcolor::{ColorChoice, StandardStream};

use crate::{
    batch::{check_path, BatchSummary},
    config::{ParserConfig, SeparatorPolicy, EARLIEST_COURSE_YEAR, LATEST_COURSE_YEAR},
    repl::run_repl,
    syntax::parse_course_selection_with,
};

pub mod output;

use output::{print_batch_footer, print_outcome, print_semesters, OutputFormat};

/// Exit code when at least one entry was rejected.
const EXIT_REJECTED: i32 = 1;
/// Exit code for configuration and I/O failures.
const EXIT_FAILURE: i32 = 2;

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "course_selection",
    version,
    about = "Parse and validate course selection entries such as \"CS111 2016 Fall\"."
)]
pub struct CourseArgs {
    /// Narrate every parsing step (debug-level log output on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print one JSON object per entry instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Accept only a single space between [DeptCourse] and [OfferSession].
    #[arg(long, global = true)]
    pub strict_separator: bool,

    /// First offered year (inclusive).
    #[arg(long, global = true, default_value_t = EARLIEST_COURSE_YEAR)]
    pub earliest_year: u32,

    /// Upper bound on offered years (exclusive).
    #[arg(long, global = true, default_value_t = LATEST_COURSE_YEAR)]
    pub latest_year: u32,

    #[command(subcommand)]
    pub command: Option<ArgsCommand>,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Read entries interactively until "quit" (the default).
    Repl,
    /// Parse each entry given on the command line.
    Parse {
        /// Entries to parse, e.g. "CS111 2016 Fall". Use `--` before entries that start with '-'.
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Parse every line of a file, or of every *.entries file under a directory.
    Check {
        /// The entry file or directory to check.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// List the accepted semester spellings.
    Semesters,
}

impl CourseArgs {
    /// Builds the parser configuration once, before any entry is read.
    pub fn parser_config(&self) -> ParserConfig {
        let policy = if self.strict_separator {
            SeparatorPolicy::Exact
        } else {
            SeparatorPolicy::AnyDelimiter
        };
        ParserConfig::default()
            .with_verbose(self.verbose)
            .with_separator_policy(policy)
            .with_year_bounds(self.earliest_year, self.latest_year)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = CourseArgs::parse();
    init_logging(args.verbose);

    let config = args.parser_config();
    if let Err(e) = config.validate() {
        eprintln!("{:?}", miette::Report::new(e));
        process::exit(EXIT_FAILURE);
    }
    let format = args.output_format();

    let summary = match args.command.unwrap_or(ArgsCommand::Repl) {
        // Rejected entries are part of a normal session; the REPL always exits cleanly.
        ArgsCommand::Repl => {
            let session = run_repl(config, format).unwrap_or_else(|e| {
                eprintln!("Error reading input: {e}");
                process::exit(EXIT_FAILURE);
            });
            log::info!(
                "session ended: {} accepted, {} rejected",
                session.passed,
                session.failed
            );
            BatchSummary::default()
        }

        ArgsCommand::Parse { entries } => {
            let mut stdout = stdout_for(format);
            let mut summary = BatchSummary::default();
            for entry in &entries {
                let result = parse_course_selection_with(entry, &config);
                if let Err(e) = print_outcome(&mut stdout, entry, None, &result, format) {
                    eprintln!("Error writing output: {e}");
                    process::exit(EXIT_FAILURE);
                }
                summary.record(result.is_ok());
            }
            summary
        }

        ArgsCommand::Check { path } => {
            let mut stdout = stdout_for(format);
            let summary = check_path(&path, &config, format, &mut stdout).unwrap_or_else(|e| {
                eprintln!("{:?}", miette::Report::new(e));
                process::exit(EXIT_FAILURE);
            });
            if format == OutputFormat::Text {
                if let Err(e) = print_batch_footer(&mut stdout, &summary) {
                    eprintln!("Error writing output: {e}");
                    process::exit(EXIT_FAILURE);
                }
            }
            summary
        }

        ArgsCommand::Semesters => {
            let mut stdout = stdout_for(OutputFormat::Text);
            if let Err(e) = print_semesters(&mut stdout) {
                eprintln!("Error writing output: {e}");
                process::exit(EXIT_FAILURE);
            }
            BatchSummary::default()
        }
    };

    if summary.failed > 0 {
        process::exit(EXIT_REJECTED);
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// `--verbose` raises the default filter so parser narration is shown;
/// `RUST_LOG` still takes precedence when set.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Colors only when writing text to a terminal.
fn stdout_for(format: OutputFormat) -> StandardStream {
    let color = if format == OutputFormat::Text && atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(color)
}
