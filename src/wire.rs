//! Numeric request/response shape used across the process boundary.
//!
//! # Request
//!
//! ```json
//! {
//!   "start": 9, "end": 21, "days": "12345", "gap": 0, "maxdays": 3,
//!   "periodsListSerialized": "[[[[1, 9, 11]], [[2, 9, 11]]], [[[1, 13, 15]]]]"
//! }
//! ```
//!
//! `periodsListSerialized` is a JSON string nesting activities, their
//! options, each option's periods, and finally `[day, start, end]`.
//! Activities and options carry no names on the wire; they are
//! identified by position (`"0"`, `"1"`, ...).
//!
//! Zero `start`, `end`, `gap`, or `maxdays` means "not set".
//!
//! # Response
//!
//! One time per activity, in request order: `day * 100 + start * 2` of
//! the first period of the chosen option. Empty when no timetable exists.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ParseError, SolveError};
use crate::models::{Activity, ActivityId, ClassOption, Constraints, Day, DayMask, Period};
use crate::scoring::ScoringStrategy;
use crate::search::{solve_activities, SolveOutcome, SolverConfig};

/// Allowed days as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireDays {
    /// Digit string, e.g. `"135"`.
    Digits(String),
    /// Bitmask, Monday in bit 0.
    Mask(u8),
}

impl WireDays {
    /// Converts to a day set.
    pub fn to_mask(&self) -> Result<DayMask, ParseError> {
        match self {
            Self::Digits(digits) => DayMask::from_digits(digits),
            Self::Mask(bits) => Ok(DayMask::from_bits(*bits)),
        }
    }
}

impl Default for WireDays {
    fn default() -> Self {
        Self::Mask(DayMask::ALL.bits())
    }
}

/// Wire request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRequest {
    /// Earliest start hour.
    #[serde(default)]
    pub start: f64,
    /// Latest end hour.
    #[serde(default)]
    pub end: f64,
    /// Allowed days.
    #[serde(default)]
    pub days: WireDays,
    /// Minimum break between classes on a day (hours).
    #[serde(default)]
    pub gap: f64,
    /// Most days on campus.
    #[serde(default)]
    pub maxdays: u32,
    /// JSON-encoded period list.
    pub periods_list_serialized: String,
}

impl WireRequest {
    /// Decodes the request into activities (in request order) and
    /// constraints.
    ///
    /// # Errors
    /// [`ParseError`] for malformed JSON, day digits, or day values.
    pub fn to_problem(&self) -> Result<(Vec<Activity>, Constraints), ParseError> {
        let raw: Vec<Vec<Vec<[f64; 3]>>> = serde_json::from_str(&self.periods_list_serialized)?;

        let mut activities = Vec::with_capacity(raw.len());
        for (a, options) in raw.into_iter().enumerate() {
            let mut activity = Activity::new(a.to_string());
            for (o, periods) in options.into_iter().enumerate() {
                let mut option = ClassOption::new(o.to_string());
                for [day, start, end] in periods {
                    option = option.with_period(Period::new(wire_day(day)?, start, end));
                }
                activity = activity.with_option(option);
            }
            activities.push(activity);
        }

        let mut constraints = Constraints::new().with_allowed_days(self.days.to_mask()?);
        constraints.earliest_start = set(self.start);
        constraints.latest_end = set(self.end);
        if self.gap > 0.0 {
            constraints = constraints.with_min_break(self.gap);
        }
        if self.maxdays > 0 {
            constraints = constraints.with_max_days(self.maxdays as usize);
        }

        Ok((activities, constraints))
    }
}

/// Wire response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireResponse {
    /// Encoded start of each chosen option, in request order.
    pub times: Vec<u32>,
    /// Whether the search finished within its budget.
    pub optimal: bool,
}

impl WireResponse {
    /// Encodes an outcome. `order` lists activity IDs in request order.
    pub fn from_outcome(order: &[ActivityId], outcome: &SolveOutcome) -> Self {
        let times = match outcome.assignment() {
            Some(assignment) => order
                .iter()
                .filter_map(|id| assignment.get(id))
                .filter_map(|option| option.periods.first())
                .map(encode_time)
                .collect(),
            None => Vec::new(),
        };
        Self {
            times,
            optimal: outcome.is_optimal(),
        }
    }

    /// Decodes every time into `(day, start)`.
    pub fn decode(&self) -> Vec<(Day, f64)> {
        self.times.iter().map(|&t| decode_time(t)).collect()
    }
}

/// `day * 100 + start * 2`, with the start rounded to the half hour.
pub fn encode_time(period: &Period) -> u32 {
    u32::from(period.day) * 100 + (period.start * 2.0).round().max(0.0) as u32
}

/// Inverse of [`encode_time`].
pub fn decode_time(time: u32) -> (Day, f64) {
    ((time / 100) as Day, f64::from(time % 100) / 2.0)
}

/// Decodes and solves a wire request.
///
/// # Example
///
/// ```
/// use u_timetable::scoring::MinDaysScore;
/// use u_timetable::search::SolverConfig;
/// use u_timetable::wire::{solve_wire, WireRequest};
///
/// let request: WireRequest = serde_json::from_str(r#"{
///     "start": 9, "end": 18, "days": "12345", "gap": 0, "maxdays": 0,
///     "periodsListSerialized": "[[[[1, 9, 11]], [[3, 9, 11]]], [[[1, 10, 12]], [[1, 13, 15]]]]"
/// }"#)?;
/// let response = solve_wire(&request, &MinDaysScore, SolverConfig::default())?;
/// assert_eq!(response.times, vec![118, 126]);
/// assert!(response.optimal);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(skip_all)]
pub fn solve_wire(
    request: &WireRequest,
    strategy: &dyn ScoringStrategy,
    config: SolverConfig,
) -> Result<WireResponse, SolveError> {
    let (activities, constraints) = request.to_problem()?;
    let order: Vec<ActivityId> = activities.iter().map(|a| a.id.clone()).collect();
    debug!(activities = order.len(), "decoded wire request");

    let outcome = solve_activities(activities, &constraints, strategy, config)?;
    Ok(WireResponse::from_outcome(&order, &outcome))
}

fn set(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

fn wire_day(value: f64) -> Result<Day, ParseError> {
    if value.fract() == 0.0 && (1.0..=7.0).contains(&value) {
        Ok(value as Day)
    } else {
        Err(ParseError::DayValue(value))
    }
}
