//! Course Selection REPL
//!
//! Reads one entry per line, hands it to the parser and prints the outcome.
//! A failed entry never ends the session; only `quit` (any case) or end of
//! input does.

use std::io::{self, BufRead, Write};

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::batch::BatchSummary;
use crate::cli::output::{print_outcome, OutputFormat};
use crate::config::ParserConfig;
use crate::syntax::parse_course_selection_with;

/// The sentinel that ends a session. Checked before the line reaches the parser.
pub fn is_quit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit")
}

/// Strips the line terminator and nothing else; spaces are significant.
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// REPL state that persists across entries
pub struct ReplState {
    config: ParserConfig,
    format: OutputFormat,
    summary: BatchSummary,
}

impl ReplState {
    pub fn new(config: ParserConfig, format: OutputFormat) -> Self {
        Self {
            config,
            format,
            summary: BatchSummary::default(),
        }
    }

    /// Parse and print one entry. Returns whether it was accepted.
    pub fn eval_line(&mut self, out: &mut dyn WriteColor, input: &str) -> io::Result<bool> {
        let result = parse_course_selection_with(input, &self.config);
        print_outcome(out, input, None, &result, self.format)?;
        self.summary.record(result.is_ok());
        Ok(result.is_ok())
    }

    pub fn summary(&self) -> BatchSummary {
        self.summary
    }
}

/// Drives a session over any line source. `interactive` controls the prompt.
pub fn run_session<R: BufRead>(
    mut input: R,
    out: &mut dyn WriteColor,
    state: &mut ReplState,
    interactive: bool,
) -> io::Result<()> {
    loop {
        if interactive {
            write!(out, "-> ")?;
            out.flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            if interactive {
                writeln!(out)?;
            }
            break;
        }

        let line = strip_line_ending(&line);
        if is_quit_command(line) {
            if interactive {
                writeln!(out, "Exiting course selection")?;
            }
            break;
        }
        state.eval_line(out, line)?;
    }
    Ok(())
}

/// Main REPL entry point
pub fn run_repl(config: ParserConfig, format: OutputFormat) -> io::Result<BatchSummary> {
    let interactive = atty::is(atty::Stream::Stdin);
    let color = if atty::is(atty::Stream::Stdout) && format == OutputFormat::Text {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color);

    if interactive {
        writeln!(stdout)?;
        writeln!(stdout, "Course Selection Entry - Type Quit to Exit")?;
        writeln!(stdout, "-------------------------------------------")?;
        writeln!(stdout)?;
    }

    let mut state = ReplState::new(config, format);
    let stdin = io::stdin();
    run_session(stdin.lock(), &mut stdout, &mut state, interactive)?;
    Ok(state.summary())
}
