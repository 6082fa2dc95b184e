// Year and semester validators, exercised through the public API.

use course_selection::validation::{
    abbreviations, lookup_semester, normalize_year, validate_semester, validate_year,
    TWO_DIGIT_CEILING,
};
use course_selection::{ErrorKind, Field, ParserConfig, Semester};

#[test]
fn test_every_abbreviation_maps_to_its_semester() {
    let listed = abbreviations();
    assert_eq!(listed.len(), 20);
    for (key, semester) in listed {
        assert_eq!(lookup_semester(key), Some(semester), "{key}");
        assert_eq!(
            validate_semester(&key.to_ascii_lowercase()).unwrap(),
            semester
        );
        assert!(semester.name().to_ascii_uppercase().starts_with(&key[..1]));
    }
}

#[test]
fn test_abbreviations_are_grouped_shortest_first() {
    let spring: Vec<&str> = abbreviations()
        .into_iter()
        .filter(|(_, s)| *s == Semester::Spring)
        .map(|(key, _)| key)
        .collect();
    assert_eq!(spring, ["S", "SP", "SPR", "SPRG", "SPRNG", "SPRING"]);
}

#[test]
fn test_unlisted_spellings_are_rejected() {
    for token in ["SUM", "SPRI", "FALLL", "AUTUMN"] {
        let err = validate_semester(token).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::UnknownSemester {
                value: token.to_string()
            }
        );
    }
}

#[test]
fn test_year_normalization_boundary() {
    assert_eq!(TWO_DIGIT_CEILING, 99);
    assert_eq!(normalize_year(0), 2000);
    assert_eq!(normalize_year(98), 2098);
    assert_eq!(normalize_year(99), 99);
    assert_eq!(normalize_year(2016), 2016);
}

#[test]
fn test_validate_year_returns_four_digits() {
    let config = ParserConfig::default();
    assert_eq!(validate_year("16", &config).unwrap(), "2016");
    assert_eq!(validate_year("0016", &config).unwrap(), "2016");
    assert_eq!(validate_year("2021", &config).unwrap(), "2021");
}

#[test]
fn test_overlong_year_is_malformed() {
    let err = validate_year("99999999999", &ParserConfig::default()).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MalformedYear {
            value: "99999999999".to_string()
        }
    );
}

#[test]
fn test_fields_follow_display_order() {
    let selection = course_selection::parse_course_selection("EE 300 W 12").unwrap();
    let names: Vec<&str> = selection.fields().map(|(field, _)| field.name()).collect();
    assert_eq!(names, ["Dept", "Course", "Semester", "Year"]);
    assert_eq!(selection.get(Field::Semester), "Winter");
    assert_eq!(selection.get(Field::Year), "2012");
}
