//! The normalized result of a parse.
//!
//! Fields are reported in the fixed display order Dept, Course, Semester,
//! Year. The parser fills them in a different order (Dept, Course, then the
//! year and semester in whichever order the entry used), which is why the
//! in-flight state is a set of one-shot slots rather than the final struct.

use std::fmt;

use serde::Serialize;

use crate::errors::{CourseError, ErrorKind};

// ============================================================================
// SEMESTER
// ============================================================================

/// Canonical semester names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
    Winter,
}

impl Semester {
    pub const ALL: [Semester; 4] = [
        Semester::Fall,
        Semester::Spring,
        Semester::Summer,
        Semester::Winter,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Semester::Fall => "Fall",
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
            Semester::Winter => "Winter",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Dept,
    Course,
    Semester,
    Year,
}

impl Field {
    /// Order used whenever a selection is shown to a user.
    pub const DISPLAY_ORDER: [Field; 4] = [Field::Dept, Field::Course, Field::Semester, Field::Year];

    pub const fn name(&self) -> &'static str {
        match self {
            Field::Dept => "Dept",
            Field::Course => "Course",
            Field::Semester => "Semester",
            Field::Year => "Year",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// COURSE SELECTION
// ============================================================================

/// A fully validated selection. All four fields are non-empty, the semester is
/// canonical and the year is a 4-digit string inside the configured range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSelection {
    #[serde(rename = "Dept")]
    pub dept: String,
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "Semester")]
    pub semester: Semester,
    #[serde(rename = "Year")]
    pub year: String,
}

impl CourseSelection {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Dept => &self.dept,
            Field::Course => &self.course,
            Field::Semester => self.semester.name(),
            Field::Year => &self.year,
        }
    }

    /// Field values in display order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::DISPLAY_ORDER
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl fmt::Display for CourseSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for (_, value) in self.fields() {
            write!(f, " {value} |")?;
        }
        Ok(())
    }
}

// ============================================================================
// SLOTS - In-flight population, each field written exactly once
// ============================================================================

#[derive(Debug, Default)]
pub(crate) struct SelectionSlots {
    dept: Option<String>,
    course: Option<String>,
    year: Option<String>,
    semester: Option<Semester>,
}

impl SelectionSlots {
    pub(crate) fn set_dept(&mut self, dept: &str) -> Result<(), CourseError> {
        fill(&mut self.dept, dept.to_string(), Field::Dept)
    }

    pub(crate) fn set_course(&mut self, course: &str) -> Result<(), CourseError> {
        fill(&mut self.course, course.to_string(), Field::Course)
    }

    pub(crate) fn set_year(&mut self, year: String) -> Result<(), CourseError> {
        fill(&mut self.year, year, Field::Year)
    }

    pub(crate) fn set_semester(&mut self, semester: Semester) -> Result<(), CourseError> {
        fill(&mut self.semester, semester, Field::Semester)
    }

    pub(crate) fn finish(self) -> Result<CourseSelection, CourseError> {
        Ok(CourseSelection {
            dept: required(self.dept, Field::Dept)?,
            course: required(self.course, Field::Course)?,
            semester: required(self.semester, Field::Semester)?,
            year: required(self.year, Field::Year)?,
        })
    }
}

fn fill<T>(slot: &mut Option<T>, value: T, field: Field) -> Result<(), CourseError> {
    if slot.is_some() {
        return Err(CourseError::new(ErrorKind::Internal {
            message: format!("{field} was populated twice"),
        }));
    }
    *slot = Some(value);
    Ok(())
}

fn required<T>(slot: Option<T>, field: Field) -> Result<T, CourseError> {
    slot.ok_or_else(|| {
        CourseError::new(ErrorKind::Internal {
            message: format!("{field} was never populated"),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CourseSelection {
        CourseSelection {
            dept: "CS".into(),
            course: "111".into(),
            semester: Semester::Fall,
            year: "2016".into(),
        }
    }

    #[test]
    fn test_display_order() {
        assert_eq!(sample().to_string(), "| CS | 111 | Fall | 2016 |");
        let names: Vec<_> = sample().fields().map(|(field, _)| field.name()).collect();
        assert_eq!(names, ["Dept", "Course", "Semester", "Year"]);
    }

    #[test]
    fn test_json_keys_follow_display_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"Dept":"CS","Course":"111","Semester":"Fall","Year":"2016"}"#
        );
    }

    #[test]
    fn test_slots_are_write_once() {
        let mut slots = SelectionSlots::default();
        slots.set_dept("CS").unwrap();
        let err = slots.set_dept("EE").unwrap_err();
        assert!(err.kind().is_internal());
    }

    #[test]
    fn test_unfilled_slots_do_not_finish() {
        let mut slots = SelectionSlots::default();
        slots.set_dept("CS").unwrap();
        slots.set_course("111").unwrap();
        slots.set_year("2016".into()).unwrap();
        let err = slots.finish().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Internal {
                message: "Semester was never populated".into()
            }
        );
    }
}
