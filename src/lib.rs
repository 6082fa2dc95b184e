//! Parses free-form course selection entries such as `"CS111 2016 Fall"`,
//! `"CS-111 Fall 2016"` or `"CS 111 F2016"` into a normalized
//! `{Dept, Course, Semester, Year}` tuple, or rejects them with a precise,
//! context-carrying diagnostic.
//!
//! ```
//! use course_selection::{parse_course_selection, Semester};
//!
//! let selection = parse_course_selection("CS:111-2019-SPRG").unwrap();
//! assert_eq!(selection.dept, "CS");
//! assert_eq!(selection.course, "111");
//! assert_eq!(selection.semester, Semester::Spring);
//! assert_eq!(selection.year, "2019");
//! ```

pub use crate::config::{ConfigError, ParserConfig, SeparatorPolicy};
pub use crate::errors::{ContextFrame, CourseError, ErrorKind, Found, Stage};
pub use crate::repl::is_quit_command;
pub use crate::selection::{CourseSelection, Field, Semester};
pub use crate::syntax::{parse_course_selection, parse_course_selection_with};

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod repl;
pub mod selection;
pub mod syntax;
pub mod validation;
