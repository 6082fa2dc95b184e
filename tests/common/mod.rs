//! Shared loader for the `.cases` fixture tables.
//!
//! Each non-comment line is `<entry> => <expectation>`, where the expectation
//! is either `Dept|Course|Semester|Year` or `!<error kind>`. Everything left of
//! the last ` => ` is the entry, untrimmed, so leading spaces are significant.
//! Lines starting with `//` are comments.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Accepted([String; 4]),
    Rejected(String),
}

#[derive(Debug, Clone)]
pub struct FixtureCase {
    pub location: String,
    pub entry: String,
    pub expectation: Expectation,
}

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn load_cases(dir: &Path) -> Vec<FixtureCase> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "cases"))
        .collect();
    files.sort();

    let mut cases = Vec::new();
    for file in files {
        let source = fs::read_to_string(&file).unwrap();
        for (index, line) in source.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with("//") {
                continue;
            }
            let location = format!("{}:{}", file.display(), index + 1);
            let (entry, expected) = line
                .rsplit_once(" => ")
                .unwrap_or_else(|| panic!("{location}: missing ' => '"));
            cases.push(FixtureCase {
                location,
                entry: entry.to_string(),
                expectation: parse_expectation(expected.trim()),
            });
        }
    }
    cases
}

fn parse_expectation(text: &str) -> Expectation {
    if let Some(kind) = text.strip_prefix('!') {
        return Expectation::Rejected(kind.to_string());
    }
    let fields: Vec<String> = text.split('|').map(|f| f.trim().to_string()).collect();
    match <[String; 4]>::try_from(fields) {
        Ok(fields) => Expectation::Accepted(fields),
        Err(fields) => panic!("expected four fields, got {fields:?}"),
    }
}
