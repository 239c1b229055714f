//! Search engine: budgeted branch-and-bound over class options.
//!
//! Picks exactly one option per activity so that no two chosen periods
//! clash, maximising a caller-supplied [`ScoringStrategy`](crate::scoring::ScoringStrategy).
//!
//! # Entry Points
//!
//! - [`solve_catalog`] / [`TimetableRequest`]: validate, build, search
//! - [`solve_activities`]: same, for activities grouped by the caller
//! - [`Solver::solve`]: search alone, over already prepared activities
//!
//! # Budget
//!
//! A [`SearchBudget`] caps nodes and wall-clock time. When it runs out
//! the best timetable found so far is returned with `optimal = false`.
//!
//! # Reference
//! Land & Doig (1960), "An Automatic Method of Solving Discrete
//! Programming Problems"

mod budget;
mod engine;
mod outcome;
mod request;

pub use budget::{SearchBudget, SolverConfig, DEFAULT_SAMPLE_EVERY};
pub use engine::Solver;
pub use outcome::{InfeasibleReason, SearchStats, SolveOutcome};
pub use request::{solve_activities, solve_catalog, TimetableRequest};
