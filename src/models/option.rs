//! Class options, activities, and courses.
//!
//! A course offers several activities (lecture, tutorial, lab). Each
//! activity is offered as several mutually exclusive class options, and
//! a timetable picks exactly one option per activity.

use serde::{Deserialize, Serialize};

use super::{DayMask, Period};

/// Activity identifier: course code plus activity label.
pub type ActivityId = String;

/// Builds the identifier of a course activity (`"COMP1511-Tutorial"`).
pub fn activity_id(course_code: &str, label: &str) -> ActivityId {
    format!("{course_code}-{label}")
}

/// One concrete offering of an activity.
///
/// All periods are taken together when the option is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassOption {
    /// Option identifier (class number or stream code).
    pub id: String,
    /// Weekly periods, in catalog order.
    pub periods: Vec<Period>,
}

impl ClassOption {
    /// Creates an option with no periods.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            periods: Vec::new(),
        }
    }

    /// Adds a period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.periods.push(period);
        self
    }

    /// Days this option occupies.
    pub fn days(&self) -> DayMask {
        DayMask::from_days(self.periods.iter().map(|p| p.day))
    }

    /// Total weekly contact hours.
    pub fn hours(&self) -> f64 {
        self.periods.iter().map(Period::duration).sum()
    }

    /// Whether any period is online.
    pub fn has_online(&self) -> bool {
        self.periods.iter().any(Period::is_online)
    }

    /// Whether any period is in person.
    pub fn has_in_person(&self) -> bool {
        self.periods.iter().any(Period::is_in_person)
    }
}

/// A schedulable component of a course with its candidate options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier (course code + activity label).
    pub id: ActivityId,
    /// Mutually exclusive options; exactly one is chosen.
    pub options: Vec<ClassOption>,
}

impl Activity {
    /// Creates an activity with no options.
    pub fn new(id: impl Into<ActivityId>) -> Self {
        Self {
            id: id.into(),
            options: Vec::new(),
        }
    }

    /// Adds an option.
    pub fn with_option(mut self, option: ClassOption) -> Self {
        self.options.push(option);
        self
    }

    /// Number of candidate options.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Finds an option by identifier.
    pub fn option(&self, option_id: &str) -> Option<&ClassOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Raw catalog entry for one course.
///
/// Activities are kept in catalog order as `(label, options)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g., `"COMP1511"`).
    pub code: String,
    /// Activity label → class options.
    pub activities: Vec<(String, Vec<ClassOption>)>,
}

impl Course {
    /// Creates a course with no activities.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            activities: Vec::new(),
        }
    }

    /// Adds an activity with its options. Options for a label that is
    /// already present are appended to it.
    pub fn with_activity(mut self, label: impl Into<String>, options: Vec<ClassOption>) -> Self {
        let label = label.into();
        match self.activities.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => existing.extend(options),
            None => self.activities.push((label, options)),
        }
        self
    }

    /// Activity labels, in catalog order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|(l, _)| l.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(id: &str, day: u8, start: f64) -> ClassOption {
        ClassOption::new(id).with_period(Period::new(day, start, start + 2.0))
    }

    #[test]
    fn test_activity_id_format() {
        assert_eq!(activity_id("COMP1511", "Lab"), "COMP1511-Lab");
    }

    #[test]
    fn test_option_summary() {
        let opt = ClassOption::new("T1")
            .with_period(Period::new(1, 9.0, 10.0).with_location("Online"))
            .with_period(Period::new(3, 14.0, 16.5).with_location("Quad 1001"));
        assert_eq!(opt.days().to_digits(), "13");
        assert!((opt.hours() - 3.5).abs() < 1e-12);
        assert!(opt.has_online());
        assert!(opt.has_in_person());
    }

    #[test]
    fn test_activity_option_lookup() {
        let act = Activity::new("MATH1081-Tutorial")
            .with_option(lab("W10A", 3, 10.0))
            .with_option(lab("H14B", 4, 14.0));
        assert_eq!(act.option_count(), 2);
        assert_eq!(act.option("H14B").unwrap().periods[0].day, 4);
        assert!(act.option("F09").is_none());
    }

    #[test]
    fn test_course_merges_repeated_labels() {
        let course = Course::new("COMP1511")
            .with_activity("Lab", vec![lab("L1", 1, 9.0)])
            .with_activity("Lecture", vec![lab("LEC", 2, 12.0)])
            .with_activity("Lab", vec![lab("L2", 2, 9.0)]);
        assert_eq!(course.labels().collect::<Vec<_>>(), vec!["Lab", "Lecture"]);
        assert_eq!(course.activities[0].1.len(), 2);
    }
}
