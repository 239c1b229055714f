//! Clash detection between weekly periods.
//!
//! Two periods clash when they fall on the same day, their half-open
//! time intervals overlap, and they share at least one teaching week.
//! Touching endpoints (`a.end == b.start`) do not clash.
//!
//! Times are compared as exact fractional hours; a 09:30 class does not
//! clash with one ending at 09:30.

use crate::models::{ClassOption, Period};

/// Whether two periods clash.
///
/// # Examples
///
/// ```
/// use u_timetable::clash::clashes;
/// use u_timetable::models::Period;
///
/// let a = Period::new(1, 9.0, 10.0);
/// assert!(clashes(&a, &Period::new(1, 9.5, 11.0)));
/// assert!(!clashes(&a, &Period::new(1, 10.0, 11.0))); // touching
/// assert!(!clashes(&a, &Period::new(2, 9.0, 10.0))); // other day
/// ```
#[inline]
pub fn clashes(a: &Period, b: &Period) -> bool {
    a.day == b.day && a.start < b.end && b.start < a.end && a.weeks.intersects(&b.weeks)
}

/// Whether two periods on the same day and week are separated by less
/// than `min_break` hours.
///
/// Overlapping periods are always too close. With `min_break <= 0` this
/// is equivalent to [`clashes`].
#[inline]
pub fn too_close(a: &Period, b: &Period, min_break: f64) -> bool {
    if min_break <= 0.0 {
        return clashes(a, b);
    }
    if a.day != b.day || !a.weeks.intersects(&b.weeks) {
        return false;
    }
    let separation = a.start.max(b.start) - a.end.min(b.end);
    separation < min_break
}

/// Whether any period of `a` clashes with any period of `b`.
pub fn options_clash(a: &ClassOption, b: &ClassOption) -> bool {
    a.periods
        .iter()
        .any(|p| b.periods.iter().any(|q| clashes(p, q)))
}

/// Whether `candidate` clashes with any already committed period.
#[inline]
pub fn clashes_with_any(candidate: &Period, committed: &[&Period]) -> bool {
    committed.iter().any(|c| clashes(candidate, c))
}
