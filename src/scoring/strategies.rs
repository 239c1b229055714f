//! Built-in scoring strategies.
//!
//! - [`CompositeScore`]: weighted window fit, days attended, start
//!   lateness, and gap time
//! - [`MinDaysScore`]: fewest distinct days on campus
//!
//! # Term Convention
//! Every composite term is a fraction in `0..=1` scaled to `0..=10`.
//! A positive weight rewards more of the quantity; a negative weight
//! rewards less of it (the term becomes `1 - fraction`).

use serde::{Deserialize, Serialize};

use super::{daily_gaps, distinct_days, hours_within, Score, ScoringStrategy};
use crate::models::{Constraints, Period};

const TERM_SCALE: f64 = 10.0;
/// Teaching days per week used to normalise the day count.
const TEACHING_DAYS: f64 = 5.0;
/// Hour the teaching day starts, for start lateness.
const DAY_BEGIN: f64 = 9.0;
/// Length of the teaching day in hours.
const DAY_SPAN: f64 = 12.0;

/// Weights of the composite score terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeWeights {
    /// Days attended (negative = fewer days is better).
    pub days: f64,
    /// Start lateness (positive = later starts are better).
    pub late_start: f64,
    /// Gap time between classes (negative = shorter gaps are better).
    pub gaps: f64,
    /// Fraction of class time inside the window.
    pub window: f64,
    /// Penalty per hour of any gap beyond the maximum gap.
    pub gap_excess: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            days: -1.0,
            late_start: 0.0,
            gaps: -1.0,
            window: 1.0,
            gap_excess: 1.0,
        }
    }
}

/// Composite preference score.
///
/// # Examples
///
/// ```
/// use u_timetable::models::Period;
/// use u_timetable::scoring::{CompositeScore, ScoringStrategy};
///
/// let strategy = CompositeScore::default().with_window(9.0, 17.0);
/// let packed = [Period::new(1, 9.0, 11.0), Period::new(1, 11.0, 13.0)];
/// let spread = [Period::new(1, 9.0, 11.0), Period::new(3, 15.0, 17.0)];
/// let score = |ps: &[Period]| strategy.score(&ps.iter().collect::<Vec<_>>());
/// assert!(score(&packed) > score(&spread));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeScore {
    /// Term weights.
    pub weights: CompositeWeights,
    /// Window start for the fit term.
    pub earliest_start: Option<f64>,
    /// Window end for the fit term.
    pub latest_end: Option<f64>,
    /// Longest gap before the excess penalty applies.
    pub max_gap_hours: Option<f64>,
}

impl CompositeScore {
    /// Creates a composite score with the given weights and no window.
    pub fn new(weights: CompositeWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Takes the window and the gap limit from student constraints.
    pub fn from_constraints(constraints: &Constraints, weights: CompositeWeights) -> Self {
        Self {
            weights,
            earliest_start: constraints.earliest_start,
            latest_end: constraints.latest_end,
            max_gap_hours: constraints.max_gap_hours,
        }
    }

    /// Sets the window for the fit term.
    pub fn with_window(mut self, earliest_start: f64, latest_end: f64) -> Self {
        self.earliest_start = Some(earliest_start);
        self.latest_end = Some(latest_end);
        self
    }

    /// Sets the gap limit.
    pub fn with_max_gap(mut self, hours: f64) -> Self {
        self.max_gap_hours = Some(hours);
        self
    }
}

impl ScoringStrategy for CompositeScore {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn score(&self, periods: &[&Period]) -> Score {
        if periods.is_empty() {
            return 0.0;
        }
        let w = &self.weights;
        let days = distinct_days(periods);

        let day_fraction = (days as f64 / TEACHING_DAYS).min(1.0);

        let lateness = periods
            .iter()
            .map(|p| ((p.start - DAY_BEGIN) / DAY_SPAN).clamp(0.0, 1.0))
            .sum::<f64>()
            / periods.len() as f64;

        let gaps = daily_gaps(periods);
        let gap_fraction = (gaps.iter().sum::<f64>() / (days as f64 * DAY_SPAN)).min(1.0);

        let total_hours: f64 = periods.iter().map(|p| p.duration()).sum();
        let window_fraction = if total_hours > 0.0 {
            hours_within(periods, self.earliest_start, self.latest_end) / total_hours
        } else {
            1.0
        };

        let excess: f64 = match self.max_gap_hours {
            Some(limit) => gaps.iter().map(|g| (g - limit).max(0.0)).sum(),
            None => 0.0,
        };

        term(day_fraction, w.days)
            + term(lateness, w.late_start)
            + term(gap_fraction, w.gaps)
            + term(window_fraction, w.window)
            - excess * w.gap_excess
    }
}

fn term(fraction: f64, weight: f64) -> f64 {
    if weight >= 0.0 {
        fraction * TERM_SCALE * weight
    } else {
        (1.0 - fraction) * TERM_SCALE * -weight
    }
}

/// Fewest days on campus: the score is minus the number of distinct days.
///
/// Adding periods can only add days, so the partial score is an exact
/// upper bound and lets the search skip branches that already use as
/// many days as the best timetable found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinDaysScore;

impl ScoringStrategy for MinDaysScore {
    fn name(&self) -> &'static str {
        "min-days"
    }

    fn score(&self, periods: &[&Period]) -> Score {
        -(distinct_days(periods) as f64)
    }

    fn bound(&self, partial: &[&Period]) -> Option<Score> {
        Some(self.score(partial))
    }
}
