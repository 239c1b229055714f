//! Weekly time period model.
//!
//! A period is one fixed weekly occurrence of a class: a weekday, a
//! start and end time in fractional hours, and the teaching weeks in
//! which it runs.
//!
//! # Time Model
//! Times are hours since midnight as `f64` (`9.5` = 09:30). Intervals are
//! half-open: `[start, end)`. Days are numbered `1..=7` starting Monday.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ParseError;

/// Weekday number, `1` (Monday) through `7` (Sunday).
pub type Day = u8;

/// Location label marking an online delivery.
pub const ONLINE_LOCATION: &str = "Online";

/// Highest week number accepted in week lists.
pub const MAX_WEEK: u32 = 53;

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayMask(u8);

impl DayMask {
    /// No days.
    pub const EMPTY: Self = Self(0);
    /// Monday through Sunday.
    pub const ALL: Self = Self(0b111_1111);
    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(0b001_1111);

    /// Creates a mask from raw bits; bits above the seventh are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw mask bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Builds a mask from day numbers, ignoring values outside `1..=7`.
    pub fn from_days(days: impl IntoIterator<Item = Day>) -> Self {
        let mut mask = Self::EMPTY;
        for day in days {
            mask.insert(day);
        }
        mask
    }

    /// Parses a digit string such as `"135"` (Mon, Wed, Fri).
    pub fn from_digits(digits: &str) -> Result<Self, ParseError> {
        let mut mask = Self::EMPTY;
        for c in digits.chars().filter(|c| !c.is_whitespace()) {
            match c.to_digit(10) {
                Some(d @ 1..=7) => mask.insert(d as Day),
                _ => return Err(ParseError::DayDigit(c)),
            }
        }
        Ok(mask)
    }

    /// Renders the mask as ascending day digits.
    pub fn to_digits(self) -> String {
        self.iter().map(|d| char::from(b'0' + d)).collect()
    }

    /// Adds a day (no-op outside `1..=7`).
    pub fn insert(&mut self, day: Day) {
        if (1..=7).contains(&day) {
            self.0 |= 1 << (day - 1);
        }
    }

    /// Whether the day is in the set.
    #[inline]
    pub fn contains(self, day: Day) -> bool {
        (1..=7).contains(&day) && self.0 & (1 << (day - 1)) != 0
    }

    /// Number of days in the set.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the days in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Day> {
        (1..=7).filter(move |&d| self.contains(d))
    }
}

impl Default for DayMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// The teaching weeks in which a period runs.
///
/// An empty set means the week data is unknown; such a set intersects
/// every other set so clash checks stay conservative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSet(BTreeSet<u32>);

impl WeekSet {
    /// Unknown week data.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Inclusive range of weeks.
    pub fn range(first: u32, last: u32) -> Self {
        Self((first..=last).collect())
    }

    /// Parses the course catalog format: `"1-5, 7-10"`, `"2,4,6"`, `"1-10"`.
    ///
    /// Blank text yields unknown week data.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::Weeks(text.to_string());
        let mut weeks = BTreeSet::new();

        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (first, last) = match part.split_once('-') {
                Some((a, b)) => (a.trim(), b.trim()),
                None => (part, part),
            };
            let first: u32 = first.parse().map_err(|_| invalid())?;
            let last: u32 = last.parse().map_err(|_| invalid())?;
            if last < first || last > MAX_WEEK {
                return Err(invalid());
            }
            weeks.extend(first..=last);
        }

        Ok(Self(weeks))
    }

    /// Whether no week data is present.
    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the two sets share a week (unknown data always does).
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.is_unknown() || other.is_unknown() || !self.0.is_disjoint(&other.0)
    }

    /// Whether the given week is active.
    pub fn contains(&self, week: u32) -> bool {
        self.0.contains(&week)
    }

    /// Number of known weeks.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<u32> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One fixed weekly occurrence of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// Weekday (`1..=7`).
    pub day: Day,
    /// Start time (hours, inclusive).
    pub start: f64,
    /// End time (hours, exclusive). Must exceed `start`.
    pub end: f64,
    /// Active teaching weeks.
    #[serde(default, skip_serializing_if = "WeekSet::is_unknown")]
    pub weeks: WeekSet,
    /// Room or delivery label (`"Online"` for online classes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Period {
    /// Creates a period with unknown week data and no location.
    pub fn new(day: Day, start: f64, end: f64) -> Self {
        Self {
            day,
            start,
            end,
            weeks: WeekSet::unknown(),
            location: None,
        }
    }

    /// Creates a period from `HH:MM` clock strings.
    ///
    /// ```
    /// use u_timetable::models::Period;
    ///
    /// let p = Period::from_clock(2, "09:30", "11:00").unwrap();
    /// assert_eq!(p.start, 9.5);
    /// assert_eq!(p.duration(), 1.5);
    /// ```
    pub fn from_clock(day: Day, start: &str, end: &str) -> Result<Self, ParseError> {
        Ok(Self::new(day, parse_clock(start)?, parse_clock(end)?))
    }

    /// Sets the active weeks.
    pub fn with_weeks(mut self, weeks: WeekSet) -> Self {
        self.weeks = weeks;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Length in hours.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this period is delivered online.
    pub fn is_online(&self) -> bool {
        self.location.as_deref() == Some(ONLINE_LOCATION)
    }

    /// Whether this period has a known, non-online location.
    pub fn is_in_person(&self) -> bool {
        matches!(self.location.as_deref(), Some(loc) if loc != ONLINE_LOCATION)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {}-{}",
            self.day,
            format_clock(self.start),
            format_clock(self.end)
        )
    }
}

/// Parses `HH:MM` (or `H:MM`) into fractional hours.
pub fn parse_clock(text: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::Clock(text.to_string());
    let (h, m) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 24 || minutes >= 60 || (hours == 24 && minutes > 0) {
        return Err(invalid());
    }
    Ok(hours as f64 + minutes as f64 / 60.0)
}

/// Formats fractional hours as `HH:MM`, rounding to the minute.
pub fn format_clock(hours: f64) -> String {
    let total = (hours * 60.0).round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
