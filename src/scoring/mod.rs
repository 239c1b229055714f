//! Scoring strategies for ranking timetables.
//!
//! A scoring strategy maps the periods of a (complete or partial)
//! assignment to a real score. The search engine treats it as an opaque,
//! pure callback and keeps the highest-scoring complete assignment.
//!
//! # Usage
//!
//! ```
//! use u_timetable::scoring::{FnScore, MinDaysScore, ScoringStrategy};
//! use u_timetable::models::Period;
//!
//! let a = Period::new(1, 9.0, 10.0);
//! let b = Period::new(3, 9.0, 10.0);
//! assert_eq!(MinDaysScore.score(&[&a, &b]), -2.0);
//!
//! let early = FnScore::new("early", |ps: &[&Period]| {
//!     -ps.iter().map(|p| p.start).sum::<f64>()
//! });
//! assert_eq!(early.score(&[&a, &b]), -18.0);
//! ```

mod strategies;

pub use strategies::{CompositeScore, CompositeWeights, MinDaysScore};

use std::fmt;

use crate::models::{DayMask, Period};

/// Score value. Higher is better.
pub type Score = f64;

/// An objective function over chosen periods.
///
/// # Contract
/// - **Higher score = better timetable.**
/// - Pure: the same periods always give the same score.
/// - [`bound`](Self::bound), when provided, must never be lower than the
///   score of any complete assignment extending the given partial one.
pub trait ScoringStrategy: Send + Sync {
    /// Strategy name (e.g., `"composite"`).
    fn name(&self) -> &'static str;

    /// Scores the periods of an assignment.
    fn score(&self, periods: &[&Period]) -> Score;

    /// Optimistic upper bound for every completion of a partial assignment.
    ///
    /// `None` disables bound pruning.
    fn bound(&self, _partial: &[&Period]) -> Option<Score> {
        None
    }
}

/// Adapts a caller closure into a [`ScoringStrategy`].
pub struct FnScore<F> {
    name: &'static str,
    f: F,
}

impl<F> FnScore<F>
where
    F: Fn(&[&Period]) -> Score + Send + Sync,
{
    /// Wraps a closure under a name.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> ScoringStrategy for FnScore<F>
where
    F: Fn(&[&Period]) -> Score + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn score(&self, periods: &[&Period]) -> Score {
        (self.f)(periods)
    }
}

impl<F> fmt::Debug for FnScore<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnScore").field("name", &self.name).finish()
    }
}

/// Number of distinct days with a class.
pub fn distinct_days(periods: &[&Period]) -> usize {
    DayMask::from_days(periods.iter().map(|p| p.day)).len()
}

/// Gaps (hours) between consecutive classes on each day.
///
/// Periods are sorted by start within a day; overlapping or touching
/// periods contribute no gap.
pub fn daily_gaps(periods: &[&Period]) -> Vec<f64> {
    let mut sorted: Vec<&Period> = periods.to_vec();
    sorted.sort_by(|a, b| a.day.cmp(&b.day).then(a.start.total_cmp(&b.start)));

    let mut gaps = Vec::new();
    let mut prev: Option<&Period> = None;
    let mut latest_end = f64::NEG_INFINITY;
    for p in sorted {
        match prev {
            Some(q) if q.day == p.day => {
                if p.start > latest_end {
                    gaps.push(p.start - latest_end);
                }
                latest_end = latest_end.max(p.end);
            }
            _ => latest_end = p.end,
        }
        prev = Some(p);
    }
    gaps
}

/// Hours of class time inside `[earliest, latest]`; `None` bounds are open.
pub fn hours_within(periods: &[&Period], earliest: Option<f64>, latest: Option<f64>) -> f64 {
    let lo = earliest.unwrap_or(f64::NEG_INFINITY);
    let hi = latest.unwrap_or(f64::INFINITY);
    periods
        .iter()
        .map(|p| (p.end.min(hi) - p.start.max(lo)).max(0.0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_days() {
        let a = Period::new(1, 9.0, 10.0);
        let b = Period::new(1, 11.0, 12.0);
        let c = Period::new(4, 9.0, 10.0);
        assert_eq!(distinct_days(&[&a, &b, &c]), 2);
        assert_eq!(distinct_days(&[]), 0);
    }

    #[test]
    fn test_daily_gaps() {
        let a = Period::new(1, 9.0, 10.0);
        let b = Period::new(1, 12.0, 13.0);
        let c = Period::new(1, 13.0, 14.0); // touching b
        let d = Period::new(2, 8.0, 9.0); // alone on Tuesday
        let e = Period::new(1, 15.5, 16.0);
        let gaps = daily_gaps(&[&e, &c, &a, &d, &b]);
        assert_eq!(gaps, vec![2.0, 1.5]);
    }

    #[test]
    fn test_daily_gaps_with_overlap() {
        let long = Period::new(3, 9.0, 13.0);
        let inner = Period::new(3, 10.0, 11.0);
        let after = Period::new(3, 14.0, 15.0);
        assert_eq!(daily_gaps(&[&inner, &after, &long]), vec![1.0]);
    }

    #[test]
    fn test_hours_within() {
        let a = Period::new(1, 8.0, 10.0);
        let b = Period::new(2, 17.0, 19.0);
        assert_eq!(hours_within(&[&a, &b], Some(9.0), Some(18.0)), 2.0);
        assert_eq!(hours_within(&[&a, &b], None, None), 4.0);
        assert_eq!(hours_within(&[&a], Some(11.0), None), 0.0);
    }

    #[test]
    fn test_fn_score() {
        let s = FnScore::new("count", |ps: &[&Period]| ps.len() as f64);
        let a = Period::new(1, 9.0, 10.0);
        assert_eq!(s.name(), "count");
        assert_eq!(s.score(&[&a, &a]), 2.0);
        assert!(s.bound(&[&a]).is_none());
        assert_eq!(format!("{s:?}"), r#"FnScore { name: "count" }"#);
    }
}
