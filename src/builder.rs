//! Candidate Builder: from course catalog to ordered activities.
//!
//! # Algorithm
//!
//! 1. Group each course's labelled class lists into [`Activity`] records,
//!    skipping excluded activities.
//! 2. Drop options that break a hard constraint (allowed days, time
//!    window, delivery mode).
//! 3. Stable-sort activities by ascending option count so the most
//!    restricted choices are made first and clashes prune early.
//!
//! An activity left with zero options is kept; the search reports it
//! as infeasible without exploring anything.

use tracing::{debug, instrument};

use crate::models::{activity_id, Activity, ClassOption, Constraints, Course, DeliveryMode};

/// Groups, filters, and orders the activities of the given courses.
///
/// # Examples
///
/// ```
/// use u_timetable::builder::build_activities;
/// use u_timetable::models::{ClassOption, Constraints, Course, Period};
///
/// let course = Course::new("COMP1511")
///     .with_activity("Lab", vec![
///         ClassOption::new("M09").with_period(Period::new(1, 9.0, 11.0)),
///         ClassOption::new("T18").with_period(Period::new(2, 18.0, 20.0)),
///     ])
///     .with_activity("Lecture", vec![
///         ClassOption::new("LEC").with_period(Period::new(3, 12.0, 14.0)),
///     ]);
///
/// let acts = build_activities(&[course], &Constraints::new().with_window(9.0, 17.0));
/// assert_eq!(acts[0].id, "COMP1511-Lab");
/// assert_eq!(acts[0].options.len(), 1);
/// ```
#[instrument(skip_all, fields(courses = courses.len()))]
pub fn build_activities(courses: &[Course], constraints: &Constraints) -> Vec<Activity> {
    let grouped: Vec<Activity> = courses
        .iter()
        .flat_map(|course| {
            course.activities.iter().map(move |(label, options)| Activity {
                id: activity_id(&course.code, label),
                options: options.clone(),
            })
        })
        .filter(|act| !constraints.is_excluded(&act.id))
        .collect();

    debug!(activities = grouped.len(), "grouped catalog");
    prepare_activities(grouped, constraints)
}

/// Applies the constraint pre-filter and the fewest-options-first order
/// to activities that were grouped elsewhere.
pub fn prepare_activities(activities: Vec<Activity>, constraints: &Constraints) -> Vec<Activity> {
    let before: usize = activities.iter().map(Activity::option_count).sum();

    let mut filtered: Vec<Activity> = activities
        .into_iter()
        .map(|act| filter_activity(act, constraints))
        .collect();
    order_by_option_count(&mut filtered);

    let after: usize = filtered.iter().map(Activity::option_count).sum();
    let empty = filtered.iter().filter(|a| a.options.is_empty()).count();
    debug!(
        options_before = before,
        options_after = after,
        empty_activities = empty,
        "filtered candidate options"
    );

    filtered
}

/// Removes the options of one activity that break a hard constraint.
pub fn filter_activity(mut activity: Activity, constraints: &Constraints) -> Activity {
    activity.options.retain(|opt| fits_days_and_window(opt, constraints));

    // Delivery mode only narrows an activity that offers the preferred
    // mode at all.
    let wanted: Option<fn(&ClassOption) -> bool> = match constraints.delivery_mode {
        DeliveryMode::Hybrid => None,
        DeliveryMode::Online => Some(ClassOption::has_online),
        DeliveryMode::InPerson => Some(ClassOption::has_in_person),
    };
    if let Some(matches) = wanted {
        if activity.options.iter().any(matches) {
            activity.options.retain(matches);
        }
    }

    activity
}

/// Stable sort by ascending option count; ties keep catalog order.
pub fn order_by_option_count(activities: &mut [Activity]) {
    activities.sort_by_key(Activity::option_count);
}

fn fits_days_and_window(option: &ClassOption, constraints: &Constraints) -> bool {
    option.periods.iter().all(|p| {
        constraints.allowed_days.contains(p.day) && constraints.fits_window(p.start, p.end)
    })
}
