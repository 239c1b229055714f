//! Input validation for timetabling problems.
//!
//! Checks the catalog and the constraints before the search starts.
//! Detects:
//! - Malformed periods (`end <= start`, non-finite times, day outside 1..=7)
//! - Options without periods
//! - Duplicate course, activity, and option IDs
//! - Contradictory or out-of-range constraints
//!
//! Every problem found is reported; validation does not stop at the
//! first error.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{activity_id, Activity, ClassOption, Constraints, Course, Period};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A period with `end <= start`, non-finite times, or a bad day.
    InvalidPeriod,
    /// An option has no periods.
    EmptyOption,
    /// Two entities share the same ID.
    DuplicateId,
    /// Constraints that contradict each other or are out of range.
    InvalidConstraints,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates raw courses and constraints together.
pub fn validate_input(courses: &[Course], constraints: &Constraints) -> ValidationResult {
    let mut errors = Vec::new();
    check_courses(courses, &mut errors);
    check_constraints(constraints, &mut errors);
    finish(errors)
}

/// Validates a course catalog.
///
/// Checks:
/// 1. No duplicate course codes
/// 2. No two activities share an ID, within or across courses
/// 3. No duplicate option IDs within an activity
/// 4. Every option has at least one period
/// 5. Every period is well-formed
pub fn validate_courses(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    check_courses(courses, &mut errors);
    finish(errors)
}

/// Validates pre-built activities.
///
/// Same checks as [`validate_courses`], plus unique activity IDs.
pub fn validate_activities(activities: &[Activity]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    for act in activities {
        if !ids.insert(act.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate activity ID: {}", act.id),
            ));
        }
        check_options(&act.id, &act.options, &mut errors);
    }
    finish(errors)
}

/// Validates constraints.
///
/// Checks:
/// 1. Window bounds are finite, within a day, and `earliest < latest`
/// 2. At least one allowed day
/// 3. Gap and break values are finite and non-negative
/// 4. `max_days_on_campus` is at least 1
pub fn validate_constraints(constraints: &Constraints) -> ValidationResult {
    let mut errors = Vec::new();
    check_constraints(constraints, &mut errors);
    finish(errors)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_courses(courses: &[Course], errors: &mut Vec<ValidationError>) {
    let mut codes = HashSet::new();
    let mut activities = HashSet::new();
    for course in courses {
        if !codes.insert(course.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {}", course.code),
            ));
        }
        for (label, options) in &course.activities {
            let id = activity_id(&course.code, label);
            check_options(&id, options, errors);
            if !activities.insert(id.clone()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate activity ID: {id}"),
                ));
            }
        }
    }
}

fn check_options(owner: &str, options: &[ClassOption], errors: &mut Vec<ValidationError>) {
    let mut ids = HashSet::new();
    for opt in options {
        if !ids.insert(opt.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Activity '{owner}' has duplicate option ID '{}'", opt.id),
            ));
        }
        if opt.periods.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyOption,
                format!("Option '{}' of activity '{owner}' has no periods", opt.id),
            ));
        }
        for period in &opt.periods {
            if let Some(problem) = period_problem(period) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPeriod,
                    format!(
                        "Option '{}' of activity '{owner}' has a malformed period ({problem})",
                        opt.id
                    ),
                ));
            }
        }
    }
}

fn period_problem(p: &Period) -> Option<String> {
    if !(1..=7).contains(&p.day) {
        return Some(format!("day {} outside 1-7", p.day));
    }
    if !p.start.is_finite() || !p.end.is_finite() {
        return Some("non-finite time".to_string());
    }
    if p.end <= p.start {
        return Some(format!("ends at {} but starts at {}", p.end, p.start));
    }
    None
}

fn check_constraints(c: &Constraints, errors: &mut Vec<ValidationError>) {
    let mut invalid = |message: String| {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConstraints,
            message,
        ));
    };

    for (name, hour) in [("earliest start", c.earliest_start), ("latest end", c.latest_end)] {
        if let Some(h) = hour {
            if !h.is_finite() || !(0.0..=24.0).contains(&h) {
                invalid(format!("{name} {h} is not an hour of the day"));
            }
        }
    }
    if let (Some(e), Some(l)) = (c.earliest_start, c.latest_end) {
        if e >= l {
            invalid(format!("earliest start {e} is not before latest end {l}"));
        }
    }
    if c.allowed_days.is_empty() {
        invalid("no days are allowed".to_string());
    }
    if let Some(g) = c.max_gap_hours {
        if !g.is_finite() || g < 0.0 {
            invalid(format!("max gap {g} must be a non-negative number of hours"));
        }
    }
    if !c.min_break_hours.is_finite() || c.min_break_hours < 0.0 {
        invalid(format!(
            "min break {} must be a non-negative number of hours",
            c.min_break_hours
        ));
    }
    if c.max_days_on_campus == Some(0) {
        invalid("max days on campus must be at least 1".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayMask, Period};

    fn opt(id: &str, day: u8, start: f64, end: f64) -> ClassOption {
        ClassOption::new(id).with_period(Period::new(day, start, end))
    }

    fn sample_courses() -> Vec<Course> {
        vec![
            Course::new("COMP1511")
                .with_activity("Lecture", vec![opt("LEC1", 1, 10.0, 12.0)])
                .with_activity("Lab", vec![opt("M09A", 1, 9.0, 10.0), opt("T14A", 2, 14.0, 16.0)]),
            Course::new("MATH1081").with_activity("Tutorial", vec![opt("W11", 3, 11.0, 12.0)]),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_courses(), &Constraints::default()).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let courses = vec![Course::new("C").with_activity("Lab", vec![opt("X", 1, 10.0, 9.0)])];
        let errors = validate_courses(&courses).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidPeriod);
        assert!(errors[0].message.contains("C-Lab"));
    }

    #[test]
    fn test_zero_length_and_bad_day() {
        let courses = vec![Course::new("C").with_activity(
            "Lab",
            vec![opt("X", 1, 9.0, 9.0), opt("Y", 8, 9.0, 10.0), opt("Z", 2, f64::NAN, 10.0)],
        )];
        let errors = validate_courses(&courses).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidPeriod));
    }

    #[test]
    fn test_empty_option() {
        let courses = vec![Course::new("C").with_activity("Lab", vec![ClassOption::new("X")])];
        let errors = validate_courses(&courses).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyOption);
    }

    #[test]
    fn test_duplicate_ids() {
        let mut courses = sample_courses();
        courses.push(Course::new("COMP1511"));
        courses[1] = courses[1]
            .clone()
            .with_activity("Tutorial", vec![opt("W11", 4, 11.0, 12.0)]);

        let errors = validate_courses(&courses).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_repeated_label_in_one_course() {
        let course = Course {
            code: "COMP1511".into(),
            activities: vec![
                ("Lab".into(), vec![opt("L1", 1, 9.0, 10.0)]),
                ("Lab".into(), vec![opt("L2", 2, 9.0, 10.0)]),
            ],
        };
        let errors = validate_courses(&[course]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("COMP1511-Lab"));
    }

    #[test]
    fn test_activity_ids_colliding_across_courses() {
        let courses = vec![
            Course::new("A-B").with_activity("C", vec![opt("1", 1, 9.0, 10.0)]),
            Course::new("A").with_activity("B-C", vec![opt("1", 2, 9.0, 10.0)]),
        ];
        let errors = validate_courses(&courses).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("A-B-C"));
    }

    #[test]
    fn test_duplicate_activity_ids() {
        let acts = vec![
            Activity::new("A").with_option(opt("1", 1, 9.0, 10.0)),
            Activity::new("A").with_option(opt("1", 2, 9.0, 10.0)),
        ];
        let errors = validate_activities(&acts).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("activity")));
    }

    #[test]
    fn test_invalid_constraints() {
        let c = Constraints::new()
            .with_window(18.0, 9.0)
            .with_allowed_days(DayMask::EMPTY)
            .with_max_gap(-1.0)
            .with_max_days(0)
            .with_min_break(f64::INFINITY);
        let errors = validate_constraints(&c).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidConstraints));
    }

    #[test]
    fn test_window_out_of_day() {
        let c = Constraints::new().with_window(-1.0, 30.0);
        let errors = validate_constraints(&c).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_multiple_errors() {
        let courses = vec![Course::new("C").with_activity("Lab", vec![opt("X", 1, 10.0, 9.0)])];
        let c = Constraints::new().with_max_days(0);
        let errors = validate_input(&courses, &c).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
