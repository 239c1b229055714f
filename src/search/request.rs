//! Catalog-level entry points: validate, build candidates, search.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::budget::SolverConfig;
use super::engine::Solver;
use super::outcome::SolveOutcome;
use crate::builder::{build_activities, prepare_activities};
use crate::error::SolveError;
use crate::models::{Activity, Constraints, Course};
use crate::scoring::ScoringStrategy;
use crate::validation::{validate_activities, validate_constraints, validate_input};

/// Input container for one timetabling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimetableRequest {
    /// Courses the student is enrolled in.
    pub courses: Vec<Course>,
    /// Student constraints.
    pub constraints: Constraints,
    /// Solver configuration.
    pub config: SolverConfig,
}

impl TimetableRequest {
    /// Creates a request with default constraints and configuration.
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Self::default()
        }
    }

    /// Sets the student constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the request and runs the search.
    pub fn solve(&self, strategy: &dyn ScoringStrategy) -> Result<SolveOutcome, SolveError> {
        solve_catalog(&self.courses, &self.constraints, strategy, self.config)
    }
}

/// Validates a course catalog, builds its candidate activities, and
/// searches for the best timetable.
///
/// # Errors
/// [`SolveError::InvalidInput`] with every validation problem found.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ClassOption, Constraints, Course, Period};
/// use u_timetable::scoring::MinDaysScore;
/// use u_timetable::search::{solve_catalog, SolverConfig};
///
/// let course = Course::new("COMP1511")
///     .with_activity("Lecture", vec![
///         ClassOption::new("LEC").with_period(Period::new(1, 9.0, 11.0)),
///     ])
///     .with_activity("Lab", vec![
///         ClassOption::new("M10").with_period(Period::new(1, 10.0, 12.0)),
///         ClassOption::new("W10").with_period(Period::new(3, 10.0, 12.0)),
///     ]);
///
/// let outcome = solve_catalog(&[course], &Constraints::new(), &MinDaysScore, SolverConfig::default())?;
/// assert_eq!(outcome.assignment().unwrap().get("COMP1511-Lab").unwrap().id, "W10");
/// # Ok::<(), u_timetable::SolveError>(())
/// ```
#[instrument(skip_all, fields(courses = courses.len(), strategy = strategy.name()))]
pub fn solve_catalog(
    courses: &[Course],
    constraints: &Constraints,
    strategy: &dyn ScoringStrategy,
    config: SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    validate_input(courses, constraints)?;
    let activities = build_activities(courses, constraints);
    let outcome = Solver::for_constraints(config, constraints).solve(&activities, strategy);
    log_outcome(&outcome);
    Ok(outcome)
}

/// Like [`solve_catalog`], for activities that were already grouped.
///
/// The constraint pre-filter and the option-count ordering are applied
/// here; exclusions are not, since activity IDs need not follow the
/// `CODE-Label` form.
pub fn solve_activities(
    activities: Vec<Activity>,
    constraints: &Constraints,
    strategy: &dyn ScoringStrategy,
    config: SolverConfig,
) -> Result<SolveOutcome, SolveError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_activities(&activities) {
        errors.extend(e);
    }
    if let Err(e) = validate_constraints(constraints) {
        errors.extend(e);
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let activities = prepare_activities(activities, constraints);
    let outcome = Solver::for_constraints(config, constraints).solve(&activities, strategy);
    log_outcome(&outcome);
    Ok(outcome)
}

fn log_outcome(outcome: &SolveOutcome) {
    match outcome {
        SolveOutcome::Scheduled { score, optimal, .. } => {
            info!(score, optimal, "timetable found");
        }
        SolveOutcome::Infeasible { reason, optimal, .. } => {
            info!(%reason, optimal, "no timetable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassOption, DayMask, Period};
    use crate::scoring::{CompositeScore, CompositeWeights, MinDaysScore};
    use crate::search::InfeasibleReason;

    fn opt(id: &str, day: u8, start: f64, end: f64) -> ClassOption {
        ClassOption::new(id).with_period(Period::new(day, start, end))
    }

    fn catalog() -> Vec<Course> {
        vec![
            Course::new("COMP1511")
                .with_activity("Lecture", vec![opt("L1", 1, 12.0, 14.0), opt("L2", 4, 12.0, 14.0)])
                .with_activity(
                    "Lab",
                    vec![opt("B1", 1, 9.0, 11.0), opt("B2", 2, 15.0, 17.0), opt("B3", 4, 14.0, 16.0)],
                ),
            Course::new("MATH1131")
                .with_activity("Lecture", vec![opt("M1", 4, 9.0, 11.0), opt("M2", 2, 9.0, 11.0)])
                .with_activity("Tutorial", vec![opt("T1", 1, 16.0, 17.0), opt("T2", 4, 11.0, 12.0)]),
        ]
    }

    #[test]
    fn test_fewest_days_catalog() {
        let outcome = TimetableRequest::new(catalog()).solve(&MinDaysScore).unwrap();
        let timetable = outcome.assignment().unwrap();

        // everything fits on Thursday
        assert_eq!(timetable.days(), DayMask::from_days([4]));
        assert_eq!(timetable.len(), 4);
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let bad = vec![Course::new("X").with_activity("Lab", vec![opt("A", 1, 11.0, 10.0)])];
        let err = solve_catalog(
            &bad,
            &Constraints::new().with_window(18.0, 9.0),
            &MinDaysScore,
            SolverConfig::default(),
        )
        .unwrap_err();
        match err {
            SolveError::InvalidInput(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_window_leaves_activity_empty() {
        let c = Constraints::new().with_window(10.0, 18.0);
        let outcome = TimetableRequest::new(catalog())
            .with_constraints(c)
            .solve(&MinDaysScore)
            .unwrap();
        // both MATH1131 lectures start at 9:00
        assert_eq!(
            outcome.infeasible_reason(),
            Some(&InfeasibleReason::NoEligibleOptions {
                activity: "MATH1131-Lecture".into()
            })
        );
    }

    #[test]
    fn test_excluded_activity_is_not_scheduled() {
        let c = Constraints::new().excluding("MATH1131", "Tutorial");
        let outcome = solve_catalog(&catalog(), &c, &MinDaysScore, SolverConfig::default()).unwrap();
        let timetable = outcome.assignment().unwrap();
        assert_eq!(timetable.len(), 3);
        assert!(timetable.get("MATH1131-Tutorial").is_none());
    }

    #[test]
    fn test_composite_from_constraints() {
        let c = Constraints::new().with_window(9.0, 17.0);
        let strategy = CompositeScore::from_constraints(&c, CompositeWeights::default());
        let outcome = solve_catalog(&catalog(), &c, &strategy, SolverConfig::default()).unwrap();
        assert!(outcome.is_scheduled());
    }

    #[test]
    fn test_solve_activities_orders_and_filters() {
        let acts = vec![
            Activity::new("0")
                .with_option(opt("0", 1, 9.0, 10.0))
                .with_option(opt("1", 6, 9.0, 10.0)),
            Activity::new("1").with_option(opt("0", 1, 9.5, 10.5)).with_option(opt("1", 2, 9.0, 10.0)),
        ];
        let c = Constraints::new().with_allowed_days(DayMask::WEEKDAYS);
        let outcome = solve_activities(acts, &c, &MinDaysScore, SolverConfig::default()).unwrap();
        let timetable = outcome.assignment().unwrap();
        assert_eq!(timetable.get("0").unwrap().id, "0");
        assert_eq!(timetable.get("1").unwrap().id, "1");
    }

    #[test]
    fn test_solve_activities_rejects_duplicates() {
        let acts = vec![
            Activity::new("0").with_option(opt("0", 1, 9.0, 10.0)),
            Activity::new("0").with_option(opt("0", 2, 9.0, 10.0)),
        ];
        let err = solve_activities(acts, &Constraints::new(), &MinDaysScore, SolverConfig::default());
        assert!(matches!(err, Err(SolveError::InvalidInput(_))));
    }

    #[test]
    fn test_repeated_label_is_rejected() {
        let json = r#"{"courses": [{"code": "COMP1511", "activities": [
            ["Lab", [{"id": "L1", "periods": [{"day": 1, "start": 9.0, "end": 11.0}]}]],
            ["Lab", [{"id": "L2", "periods": [{"day": 2, "start": 9.0, "end": 11.0}]}]]
        ]}]}"#;
        let req: TimetableRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(req.solve(&MinDaysScore), Err(SolveError::InvalidInput(_))));
    }

    #[test]
    fn test_colliding_activity_ids_are_rejected() {
        let courses = vec![
            Course::new("A-B").with_activity("C", vec![opt("1", 1, 9.0, 10.0)]),
            Course::new("A").with_activity("B-C", vec![opt("1", 2, 9.0, 10.0)]),
        ];
        let err = solve_catalog(&courses, &Constraints::new(), &MinDaysScore, SolverConfig::default());
        assert!(matches!(err, Err(SolveError::InvalidInput(_))));
    }

    #[test]
    fn test_request_serde() {
        let json = r#"{
            "courses": [{"code": "ART1000", "activities": [["Studio", [
                {"id": "S1", "periods": [{"day": 2, "start": 10.0, "end": 13.0}]}
            ]]]}],
            "constraints": {"maxDaysOnCampus": 1},
            "config": {"budget": {"maxNodes": 100}}
        }"#;
        let req: TimetableRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.constraints.max_days_on_campus, Some(1));
        let outcome = req.solve(&MinDaysScore).unwrap();
        assert_eq!(outcome.assignment().unwrap().get("ART1000-Studio").unwrap().id, "S1");
    }
}
