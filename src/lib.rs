//! University timetable solver.
//!
//! Given the courses a student is enrolled in, where each course offers
//! several activities (Lecture, Tutorial, Lab, ...) and each activity
//! offers several class options at fixed weekly times, picks one option
//! per activity so that no two chosen classes clash and a preference
//! score is maximised.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Period`, `ClassOption`, `Activity`,
//!   `Course`, `Assignment`, `Constraints`, `DayMask`, `WeekSet`
//! - **`validation`**: Input integrity checks (malformed periods, duplicate
//!   IDs, contradictory constraints)
//! - **`clash`**: Period overlap and minimum-break tests
//! - **`builder`**: Catalog grouping, constraint pre-filter, option-count
//!   ordering
//! - **`scoring`**: `ScoringStrategy` trait with composite and
//!   fewest-days strategies
//! - **`search`**: Budgeted branch-and-bound `Solver` and catalog entry
//!   points
//! - **`wire`**: Numeric request/response mapping
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{ClassOption, Constraints, Course, Period};
//! use u_timetable::scoring::{CompositeScore, CompositeWeights};
//! use u_timetable::search::{solve_catalog, SolverConfig};
//!
//! let courses = vec![
//!     Course::new("COMP1511")
//!         .with_activity("Lecture", vec![
//!             ClassOption::new("LEC").with_period(Period::new(2, 12.0, 14.0)),
//!         ])
//!         .with_activity("Lab", vec![
//!             ClassOption::new("M18").with_period(Period::new(1, 18.0, 21.0)),
//!             ClassOption::new("T14").with_period(Period::new(2, 14.0, 17.0)),
//!         ]),
//! ];
//! let constraints = Constraints::new().with_window(9.0, 18.0);
//! let strategy = CompositeScore::from_constraints(&constraints, CompositeWeights::default());
//!
//! let outcome = solve_catalog(&courses, &constraints, &strategy, SolverConfig::default())?;
//! let timetable = outcome.assignment().unwrap();
//! assert_eq!(timetable.get("COMP1511-Lab").unwrap().id, "T14");
//! # Ok::<(), u_timetable::SolveError>(())
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"

pub mod builder;
pub mod clash;
pub mod error;
pub mod models;
pub mod scoring;
pub mod search;
pub mod validation;
pub mod wire;

pub use error::{ParseError, SolveError};
pub use search::{solve_catalog, SolveOutcome, Solver, SolverConfig};
