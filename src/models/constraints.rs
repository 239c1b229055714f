//! Student timetable constraints.
//!
//! The constraint object a student fills in: a daily time window, the
//! days they are willing to attend, gap and day-count preferences, and
//! how classes should be delivered. The Candidate Builder applies the
//! hard parts as a pre-filter; the search and the scoring strategies
//! read the rest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{activity_id, ActivityId, DayMask};

/// Preferred delivery mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryMode {
    /// Prefer online options where an activity offers them.
    Online,
    /// Prefer in-person options where an activity offers them.
    InPerson,
    /// Accept any option.
    #[default]
    Hybrid,
}

/// Constraints on a requested timetable.
///
/// # Examples
///
/// ```
/// use u_timetable::models::{Constraints, DayMask, DeliveryMode};
///
/// let c = Constraints::new()
///     .with_window(9.0, 18.0)
///     .with_allowed_days(DayMask::WEEKDAYS)
///     .with_max_days(3)
///     .with_delivery_mode(DeliveryMode::InPerson);
/// assert_eq!(c.max_days_on_campus, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
    /// No class may start before this hour.
    pub earliest_start: Option<f64>,
    /// No class may end after this hour.
    pub latest_end: Option<f64>,
    /// Days classes may fall on.
    pub allowed_days: DayMask,
    /// Longest acceptable gap between consecutive classes on one day (hours).
    pub max_gap_hours: Option<f64>,
    /// Most distinct days with classes.
    pub max_days_on_campus: Option<usize>,
    /// Delivery preference.
    pub delivery_mode: DeliveryMode,
    /// Shortest break required between consecutive classes on one day (hours).
    pub min_break_hours: f64,
    /// Activities left out of the timetable entirely.
    pub excluded: BTreeSet<ActivityId>,
}

impl Constraints {
    /// Unconstrained: every day, any time, any delivery.
    pub fn new() -> Self {
        Self {
            earliest_start: None,
            latest_end: None,
            allowed_days: DayMask::ALL,
            max_gap_hours: None,
            max_days_on_campus: None,
            delivery_mode: DeliveryMode::Hybrid,
            min_break_hours: 0.0,
            excluded: BTreeSet::new(),
        }
    }

    /// Sets the daily time window.
    pub fn with_window(mut self, earliest_start: f64, latest_end: f64) -> Self {
        self.earliest_start = Some(earliest_start);
        self.latest_end = Some(latest_end);
        self
    }

    /// Sets the allowed days.
    pub fn with_allowed_days(mut self, days: DayMask) -> Self {
        self.allowed_days = days;
        self
    }

    /// Sets the maximum gap preference.
    pub fn with_max_gap(mut self, hours: f64) -> Self {
        self.max_gap_hours = Some(hours);
        self
    }

    /// Sets the maximum number of days on campus.
    pub fn with_max_days(mut self, days: usize) -> Self {
        self.max_days_on_campus = Some(days);
        self
    }

    /// Sets the delivery mode.
    pub fn with_delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.delivery_mode = mode;
        self
    }

    /// Sets the minimum break between classes.
    pub fn with_min_break(mut self, hours: f64) -> Self {
        self.min_break_hours = hours;
        self
    }

    /// Leaves a course activity out of the timetable.
    pub fn excluding(mut self, course_code: &str, label: &str) -> Self {
        self.excluded.insert(activity_id(course_code, label));
        self
    }

    /// Whether the activity is excluded.
    pub fn is_excluded(&self, activity_id: &str) -> bool {
        self.excluded.contains(activity_id)
    }

    /// Whether `[start, end)` lies inside the time window.
    pub fn fits_window(&self, start: f64, end: f64) -> bool {
        self.earliest_start.is_none_or(|e| start >= e) && self.latest_end.is_none_or(|l| end <= l)
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new()
    }
}
