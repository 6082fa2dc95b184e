// Integration tests for the course selection parser: accepted shapes,
// rejection kinds and the stage context wrapped around each failure.

use course_selection::{
    parse_course_selection, parse_course_selection_with, CourseSelection, ErrorKind, Found,
    ParserConfig, Semester, SeparatorPolicy, Stage,
};

fn parse_ok(input: &str) -> CourseSelection {
    match parse_course_selection(input) {
        Ok(selection) => selection,
        Err(e) => panic!("expected {input:?} to parse, got:\n{}", e.render_chain()),
    }
}

fn parse_err(input: &str) -> ErrorKind {
    match parse_course_selection(input) {
        Ok(selection) => panic!("expected {input:?} to fail, got {selection}"),
        Err(e) => e.kind().clone(),
    }
}

fn selection(dept: &str, course: &str, semester: Semester, year: &str) -> CourseSelection {
    CourseSelection {
        dept: dept.to_string(),
        course: course.to_string(),
        semester,
        year: year.to_string(),
    }
}

// ============================================================================
// ACCEPTED ENTRIES
// ============================================================================

#[test]
fn test_year_then_semester() {
    assert_eq!(
        parse_ok("CS111 2016 Fall"),
        selection("CS", "111", Semester::Fall, "2016")
    );
}

#[test]
fn test_semester_then_year_with_dash() {
    assert_eq!(
        parse_ok("CS-111 Fall 2016"),
        selection("CS", "111", Semester::Fall, "2016")
    );
}

#[test]
fn test_abbreviated_semester_glued_to_year() {
    assert_eq!(
        parse_ok("CS 111 F2016"),
        selection("CS", "111", Semester::Fall, "2016")
    );
}

#[test]
fn test_colon_and_dash_delimiters() {
    assert_eq!(
        parse_ok("CS:111-2019-SPRG"),
        selection("CS", "111", Semester::Spring, "2019")
    );
}

#[test]
fn test_leading_delimiters_are_skipped() {
    assert_eq!(
        parse_ok("  -:MATH 200 Summer 2010"),
        selection("MATH", "200", Semester::Summer, "2010")
    );
}

#[test]
fn test_semester_is_case_insensitive() {
    assert_eq!(parse_ok("cs111 2016 wInTeR").semester, Semester::Winter);
    // Department case is preserved as typed.
    assert_eq!(parse_ok("cs111 2016 wInTeR").dept, "cs");
}

#[test]
fn test_two_digit_years_are_normalized() {
    assert_eq!(parse_ok("CS111 07 Fall").year, "2007");
    assert_eq!(parse_ok("CS111 Spring 21").year, "2021");
    assert_eq!(parse_ok("CS111 Spring 016").year, "2016");
}

#[test]
fn test_trailing_input_is_ignored() {
    assert_eq!(
        parse_ok("CS111 2016 Fall 2017"),
        selection("CS", "111", Semester::Fall, "2016")
    );
}

#[test]
fn test_year_bounds() {
    assert_eq!(parse_ok("CS111 2007 Fall").year, "2007");
    assert_eq!(parse_ok("CS111 2021 Fall").year, "2021");

    for input in ["CS111 2006 Fall", "CS111 2022 Fall"] {
        assert!(
            matches!(parse_err(input), ErrorKind::YearOutOfRange { .. }),
            "{input}"
        );
    }
}

#[test]
fn test_ninety_nine_is_taken_literally() {
    assert_eq!(
        parse_err("CS111 99 Fall"),
        ErrorKind::YearOutOfRange {
            year: 99,
            earliest: 2007,
            latest: 2022
        }
    );
}

// ============================================================================
// REJECTED ENTRIES
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(parse_err(""), ErrorKind::EmptyInput);
}

#[test]
fn test_only_delimiters() {
    assert_eq!(
        parse_err("   "),
        ErrorKind::InvalidDepartment {
            found: Found::EndOfInput
        }
    );
}

#[test]
fn test_department_must_start_with_a_letter() {
    assert_eq!(
        parse_err("111 CS 2016 Fall"),
        ErrorKind::InvalidDepartment {
            found: Found::Char('1')
        }
    );
}

#[test]
fn test_invalid_leading_character() {
    let err = parse_course_selection("#CS111 2016 Fall").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidCharacter { found: '#' });
    assert_eq!(err.stage(), Some(Stage::LeadingDelimiters));
}

#[test]
fn test_missing_course_number() {
    assert_eq!(parse_err("CS"), ErrorKind::MissingCourseNumber);
    assert_eq!(parse_err("CS-"), ErrorKind::MissingCourseNumber);
}

#[test]
fn test_course_must_be_numeric() {
    assert_eq!(
        parse_err("CS Fall 2016"),
        ErrorKind::InvalidCourseFormat { found: 'F' }
    );
}

#[test]
fn test_double_space_separator() {
    assert_eq!(
        parse_err("CS111  2016 Fall"),
        ErrorKind::WrongSeparator {
            expected: ' ',
            found: ' '
        }
    );
}

#[test]
fn test_missing_separator() {
    assert_eq!(
        parse_err("CS111Fall 2016"),
        ErrorKind::MissingSeparator { found: 'F' }
    );
}

#[test]
fn test_missing_offer_session() {
    assert_eq!(parse_err("CS111"), ErrorKind::MissingOfferSession);
    assert_eq!(parse_err("CS111 "), ErrorKind::MissingOfferSession);
}

#[test]
fn test_invalid_offer_session() {
    assert_eq!(
        parse_err("CS111 #2016"),
        ErrorKind::InvalidOfferSession { found: '#' }
    );
}

#[test]
fn test_unknown_semester() {
    assert_eq!(
        parse_err("CS111 2016 Xyz"),
        ErrorKind::UnknownSemester {
            value: "XYZ".to_string()
        }
    );
}

#[test]
fn test_offer_session_needs_both_halves() {
    assert_eq!(
        parse_err("CS111 2016"),
        ErrorKind::EndOfInput {
            expected: "semester"
        }
    );
    assert_eq!(
        parse_err("CS111 Fall -"),
        ErrorKind::EndOfInput { expected: "year" }
    );
}

#[test]
fn test_invalid_character_inside_a_token() {
    let err = parse_course_selection("CS111 2016 Fa!l").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidCharacter { found: '!' });
    assert_eq!(err.stage(), Some(Stage::Semester));
}

#[test]
fn test_non_ascii_between_year_and_semester() {
    let err = parse_course_selection("CS111 2016 Été").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidCharacter { found: 'É' });
    assert_eq!(err.span(), Some(miette::SourceSpan::from(11..13)));
    assert_eq!(err.stage(), Some(Stage::OfferSession));
}

#[test]
fn test_non_ascii_at_start_of_offer_session() {
    let err = parse_course_selection("CS111 Été 2016").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidOfferSession { found: 'É' });
    assert_eq!(err.span(), Some(miette::SourceSpan::from(6..8)));
}

// ============================================================================
// CONTEXT AND DETERMINISM
// ============================================================================

#[test]
fn test_context_is_innermost_first() {
    let err = parse_course_selection("CS111 2006 Fall").unwrap_err();
    let stages: Vec<Stage> = err.context().iter().map(|frame| frame.stage).collect();
    assert_eq!(stages, vec![Stage::Year, Stage::OfferSession]);
}

#[test]
fn test_parsing_is_deterministic() {
    for input in ["CS111 2016 Fall", "CS111 2016 Xyz", "", "CS111  2016 Fall"] {
        let first = parse_course_selection(input).map_err(|e| e.render_chain());
        let second = parse_course_selection(input).map_err(|e| e.render_chain());
        assert_eq!(first, second, "{input:?}");
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_exact_separator_policy() {
    let config = ParserConfig::default().with_separator_policy(SeparatorPolicy::Exact);

    assert!(parse_course_selection_with("CS111 2016 Fall", &config).is_ok());

    let err = parse_course_selection_with("CS:111-2019-SPRG", &config).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::WrongSeparator {
            expected: ' ',
            found: '-'
        }
    );
    assert_eq!(err.stage(), Some(Stage::Separator));
}

#[test]
fn test_custom_year_bounds() {
    let config = ParserConfig::default().with_year_bounds(2000, 2030);
    assert_eq!(
        parse_course_selection_with("CS111 2025 Fall", &config)
            .unwrap()
            .year,
        "2025"
    );
    assert_eq!(
        parse_course_selection_with("CS111 00 Fall", &config)
            .unwrap()
            .year,
        "2000"
    );
}

#[test]
fn test_verbose_mode_does_not_change_results() {
    let _ = env_logger::builder().is_test(true).try_init();
    let verbose = ParserConfig::default().with_verbose(true);
    for input in ["CS-111 Fall 2016", "CS111 2016 Xyz", "CS111 2016 Fall trailing"] {
        assert_eq!(
            parse_course_selection_with(input, &verbose).map_err(|e| e.kind().clone()),
            parse_course_selection(input).map_err(|e| e.kind().clone()),
            "{input:?}"
        );
    }
}
