//! Budgeted depth-first branch-and-bound search.
//!
//! # Algorithm
//!
//! Activities are visited in the order given (the builder puts the most
//! restricted first). At depth `d` every option of activity `d` is tried
//! in catalog order:
//!
//! 1. Count one node against the budget; stop if it is spent.
//! 2. Reject the option if any of its periods clashes with, or sits
//!    closer than the minimum break to, a committed period.
//! 3. Reject it if it would take the student past the days-on-campus
//!    limit.
//! 4. Commit it. If the strategy's bound for the partial assignment
//!    cannot beat the incumbent, undo and skip the subtree.
//! 5. Recurse. At full depth, score the assignment and keep it if it is
//!    strictly better than the incumbent.
//!
//! The strict comparison means that among equal scores the first
//! assignment in depth-first order wins, so results are deterministic.
//!
//! # Complexity
//! O(Π kᵢ · P) in the worst case, where kᵢ is the option count of
//! activity i and P the number of committed periods checked per option.

use std::time::Instant;

use tracing::{debug, instrument, trace};

use super::budget::{BudgetTracker, SolverConfig};
use super::outcome::{InfeasibleReason, SearchStats, SolveOutcome};
use crate::clash::{clashes_with_any, too_close};
use crate::models::{Activity, Assignment, ClassOption, Constraints, DayMask, Period};
use crate::scoring::{Score, ScoringStrategy};

/// Backtracking timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Activity, ClassOption, Period};
/// use u_timetable::scoring::MinDaysScore;
/// use u_timetable::search::{Solver, SolverConfig};
///
/// let lab = Activity::new("COMP1511-Lab")
///     .with_option(ClassOption::new("A1").with_period(Period::new(1, 9.0, 11.0)))
///     .with_option(ClassOption::new("A2").with_period(Period::new(3, 9.0, 11.0)));
/// let lecture = Activity::new("COMP1511-Lecture")
///     .with_option(ClassOption::new("B1").with_period(Period::new(1, 10.0, 12.0)))
///     .with_option(ClassOption::new("B2").with_period(Period::new(1, 13.0, 15.0)));
///
/// let outcome = Solver::new(SolverConfig::default()).solve(&[lab, lecture], &MinDaysScore);
/// let timetable = outcome.assignment().unwrap();
/// assert_eq!(timetable.get("COMP1511-Lab").unwrap().id, "A1");
/// assert_eq!(timetable.get("COMP1511-Lecture").unwrap().id, "B2");
/// assert!(outcome.is_optimal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    max_days: Option<usize>,
    min_break_hours: f64,
}

impl Solver {
    /// Creates a solver with no hard day or break limits.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            max_days: None,
            min_break_hours: 0.0,
        }
    }

    /// Creates a solver that enforces the search-time limits of `constraints`
    /// (days on campus and minimum break).
    pub fn for_constraints(config: SolverConfig, constraints: &Constraints) -> Self {
        Self {
            config,
            max_days: constraints.max_days_on_campus,
            min_break_hours: constraints.min_break_hours,
        }
    }

    /// Sets the most distinct days a timetable may use.
    pub fn with_max_days(mut self, days: usize) -> Self {
        self.max_days = Some(days);
        self
    }

    /// Sets the shortest break allowed between classes on the same day.
    pub fn with_min_break(mut self, hours: f64) -> Self {
        self.min_break_hours = hours;
        self
    }

    /// Solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Searches for the best-scoring non-clashing assignment.
    #[instrument(skip_all, fields(activities = activities.len(), strategy = strategy.name()))]
    pub fn solve(&self, activities: &[Activity], strategy: &dyn ScoringStrategy) -> SolveOutcome {
        let started = Instant::now();

        if let Some(empty) = activities.iter().find(|a| a.options.is_empty()) {
            debug!(activity = %empty.id, "activity has no eligible options");
            return SolveOutcome::Infeasible {
                reason: InfeasibleReason::NoEligibleOptions {
                    activity: empty.id.clone(),
                },
                optimal: true,
                stats: SearchStats {
                    elapsed: started.elapsed(),
                    ..SearchStats::default()
                },
            };
        }

        let mut search = Search {
            activities,
            strategy,
            solver: self,
            state: PartialState::new(),
            choice: Vec::with_capacity(activities.len()),
            best: None,
            budget: BudgetTracker::start(self.config.budget),
            stats: SearchStats::default(),
        };
        search.descend(0);
        search.finish()
    }
}

/// Committed periods plus a per-day class count.
#[derive(Debug)]
struct PartialState<'a> {
    periods: Vec<&'a Period>,
    day_load: [u32; 8],
}

impl<'a> PartialState<'a> {
    fn new() -> Self {
        Self {
            periods: Vec::new(),
            day_load: [0; 8],
        }
    }

    /// Commits an option and returns the mark to undo it with.
    fn push(&mut self, option: &'a ClassOption) -> usize {
        let mark = self.periods.len();
        for p in &option.periods {
            if let Some(load) = self.day_load.get_mut(usize::from(p.day)) {
                *load += 1;
            }
            self.periods.push(p);
        }
        mark
    }

    fn truncate(&mut self, mark: usize) {
        for p in self.periods.drain(mark..) {
            if let Some(load) = self.day_load.get_mut(usize::from(p.day)) {
                *load -= 1;
            }
        }
    }

    fn days_with(&self, option: &ClassOption) -> usize {
        let mut days = DayMask::EMPTY;
        for (day, load) in self.day_load.iter().enumerate() {
            if *load > 0 {
                days.insert(day as u8);
            }
        }
        for p in &option.periods {
            days.insert(p.day);
        }
        days.len()
    }
}

#[derive(Debug)]
struct Incumbent {
    choice: Vec<usize>,
    score: Score,
}

struct Search<'a> {
    activities: &'a [Activity],
    strategy: &'a dyn ScoringStrategy,
    solver: &'a Solver,
    state: PartialState<'a>,
    choice: Vec<usize>,
    best: Option<Incumbent>,
    budget: BudgetTracker,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn descend(&mut self, depth: usize) {
        let activities = self.activities;
        let Some(activity) = activities.get(depth) else {
            self.evaluate_leaf();
            return;
        };

        for (index, option) in activity.options.iter().enumerate() {
            if !self.budget.try_visit() {
                return;
            }
            if !self.admits(option) {
                continue;
            }

            let mark = self.state.push(option);
            if self.cannot_improve() {
                self.stats.bound_prunes += 1;
                self.state.truncate(mark);
                continue;
            }

            self.choice.push(index);
            self.descend(depth + 1);
            self.choice.pop();
            self.state.truncate(mark);

            if self.budget.is_exhausted() {
                return;
            }
        }
    }

    fn admits(&mut self, option: &ClassOption) -> bool {
        if !self.solver.config.allow_clashes {
            let min_break = self.solver.min_break_hours;
            let committed = &self.state.periods;
            let blocked = option.periods.iter().any(|p| {
                if min_break > 0.0 {
                    committed.iter().any(|c| too_close(p, c, min_break))
                } else {
                    clashes_with_any(p, committed)
                }
            });
            if blocked {
                self.stats.clash_rejections += 1;
                return false;
            }
        }

        if let Some(max) = self.solver.max_days {
            if self.state.days_with(option) > max {
                self.stats.day_limit_rejections += 1;
                return false;
            }
        }
        true
    }

    fn cannot_improve(&self) -> bool {
        let Some(best) = &self.best else {
            return false;
        };
        match self.strategy.bound(&self.state.periods) {
            Some(bound) => bound <= best.score,
            None => false,
        }
    }

    fn evaluate_leaf(&mut self) {
        self.stats.leaves_evaluated += 1;
        let raw = self.strategy.score(&self.state.periods);
        let score = if raw.is_nan() { f64::NEG_INFINITY } else { raw };

        let improves = self.best.as_ref().is_none_or(|b| score > b.score);
        if improves {
            trace!(score, leaves = self.stats.leaves_evaluated, "new incumbent");
            self.best = Some(Incumbent {
                choice: self.choice.clone(),
                score,
            });
        }
    }

    fn finish(mut self) -> SolveOutcome {
        let optimal = !self.budget.is_exhausted();
        self.stats.nodes_visited = self.budget.nodes();
        self.stats.elapsed = self.budget.elapsed();
        let stats = self.stats;

        debug!(
            nodes = stats.nodes_visited,
            leaves = stats.leaves_evaluated,
            clash_rejections = stats.clash_rejections,
            bound_prunes = stats.bound_prunes,
            optimal,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );

        match self.best {
            Some(best) => {
                let mut assignment = Assignment::new();
                for (activity, &index) in self.activities.iter().zip(&best.choice) {
                    if let Some(option) = activity.options.get(index) {
                        assignment.choose(activity.id.clone(), option.clone());
                    }
                }
                SolveOutcome::Scheduled {
                    assignment,
                    score: best.score,
                    optimal,
                    stats,
                }
            }
            None => SolveOutcome::Infeasible {
                reason: if optimal {
                    InfeasibleReason::AllBranchesPruned
                } else {
                    InfeasibleReason::BudgetExhausted
                },
                optimal,
                stats,
            },
        }
    }
}
