//! Invariants checked over seeded random catalogs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_timetable::builder::build_activities;
use u_timetable::clash::{clashes, options_clash};
use u_timetable::models::{Activity, ClassOption, Constraints, Course, DayMask, Period};
use u_timetable::scoring::{CompositeScore, CompositeWeights, MinDaysScore, Score, ScoringStrategy};
use u_timetable::search::{solve_catalog, SearchBudget, SolveOutcome, SolverConfig};

const SEEDS: u64 = 40;

fn random_catalog(rng: &mut StdRng) -> Vec<Course> {
    let courses = rng.random_range(2..=4);
    (0..courses)
        .map(|c| {
            let mut course = Course::new(format!("COMP{}", 1000 + c));
            for label in ["Lecture", "Tutorial", "Lab"].iter().take(rng.random_range(1..=3)) {
                let options = (0..rng.random_range(1..=4))
                    .map(|o| random_option(rng, o))
                    .collect();
                course = course.with_activity(*label, options);
            }
            course
        })
        .collect()
}

fn random_option(rng: &mut StdRng, index: usize) -> ClassOption {
    let mut option = ClassOption::new(format!("O{index}"));
    let first_day = rng.random_range(1..=5u8);
    for n in 0..rng.random_range(1..=2u8) {
        // periods of one option fall on distinct days
        let day = (first_day + n * 2 - 1) % 5 + 1;
        let start = rng.random_range(8..=18) as f64 + if rng.random_bool(0.3) { 0.5 } else { 0.0 };
        let length = rng.random_range(1..=3) as f64;
        option = option.with_period(Period::new(day, start, start + length));
    }
    option
}

/// Best score over every non-clashing combination, by exhaustive enumeration.
fn brute_force_best(activities: &[Activity], strategy: &dyn ScoringStrategy) -> Option<Score> {
    fn walk<'a>(
        activities: &'a [Activity],
        chosen: &mut Vec<&'a ClassOption>,
        strategy: &dyn ScoringStrategy,
        best: &mut Option<Score>,
    ) {
        let Some((first, rest)) = activities.split_first() else {
            let periods: Vec<&Period> = chosen.iter().flat_map(|o| o.periods.iter()).collect();
            let score = strategy.score(&periods);
            if best.is_none_or(|b| score > b) {
                *best = Some(score);
            }
            return;
        };
        for option in &first.options {
            if chosen.iter().any(|c| options_clash(c, option)) {
                continue;
            }
            chosen.push(option);
            walk(rest, chosen, strategy, best);
            chosen.pop();
        }
    }

    let mut best = None;
    walk(activities, &mut Vec::new(), strategy, &mut best);
    best
}

fn assert_valid(outcome: &SolveOutcome, activities: &[Activity]) {
    let Some(timetable) = outcome.assignment() else {
        return;
    };
    assert_eq!(timetable.len(), activities.len());
    for act in activities {
        let chosen = timetable.get(&act.id).expect("every activity is assigned");
        assert!(act.options.contains(chosen), "{} uses a foreign option", act.id);
    }
    let periods = timetable.periods();
    for (i, a) in periods.iter().enumerate() {
        for b in &periods[i + 1..] {
            assert!(!clashes(a, b), "{a} clashes with {b}");
        }
    }
}

#[test]
fn chosen_periods_never_clash() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let constraints = Constraints::new();
        let activities = build_activities(&catalog, &constraints);

        let outcome =
            solve_catalog(&catalog, &constraints, &MinDaysScore, SolverConfig::default()).unwrap();
        assert!(outcome.is_optimal());
        assert_valid(&outcome, &activities);
    }
}

#[test]
fn matches_exhaustive_enumeration() {
    let composite = CompositeScore::new(CompositeWeights::default()).with_window(9.0, 17.0);
    let strategies: [&dyn ScoringStrategy; 2] = [&MinDaysScore, &composite];

    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let constraints = Constraints::new();
        let activities = build_activities(&catalog, &constraints);

        for strategy in strategies {
            let outcome =
                solve_catalog(&catalog, &constraints, strategy, SolverConfig::default()).unwrap();
            let expected = brute_force_best(&activities, strategy);
            assert_eq!(outcome.score(), expected, "seed {seed}, {}", strategy.name());
        }
    }
}

#[test]
fn repeated_solves_are_identical() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let constraints = Constraints::new();
        let runs: Vec<SolveOutcome> = (0..3)
            .map(|_| {
                solve_catalog(&catalog, &constraints, &MinDaysScore, SolverConfig::default())
                    .unwrap()
            })
            .collect();
        for run in &runs[1..] {
            assert_eq!(run.assignment(), runs[0].assignment());
            assert_eq!(run.score(), runs[0].score());
        }
    }
}

#[test]
fn budgeted_search_stays_valid() {
    let config = SolverConfig::default().with_budget(SearchBudget::unlimited().with_max_nodes(4));
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let constraints = Constraints::new();
        let activities = build_activities(&catalog, &constraints);

        let limited = solve_catalog(&catalog, &constraints, &MinDaysScore, config).unwrap();
        let full =
            solve_catalog(&catalog, &constraints, &MinDaysScore, SolverConfig::default()).unwrap();

        assert!(limited.stats().nodes_visited <= 4);
        assert_valid(&limited, &activities);
        if let (Some(got), Some(best)) = (limited.score(), full.score()) {
            assert!(got <= best);
        }
        if limited.is_optimal() {
            assert_eq!(limited.score(), full.score());
        }
    }
}

#[test]
fn timetable_respects_hard_constraints() {
    let constraints = Constraints::new()
        .with_allowed_days(DayMask::from_days([1, 2, 3, 4]))
        .with_window(9.0, 19.0)
        .with_max_days(3);
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let outcome =
            solve_catalog(&catalog, &constraints, &MinDaysScore, SolverConfig::default()).unwrap();
        let Some(timetable) = outcome.assignment() else {
            continue;
        };
        assert!(timetable.days().len() <= 3);
        for p in timetable.periods() {
            assert!(constraints.allowed_days.contains(p.day));
            assert!(p.start >= 9.0 && p.end <= 19.0);
        }
    }
}
