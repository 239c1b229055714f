//! Timetabling domain models.
//!
//! Provides the data types for describing a course catalog, a student's
//! constraints, and a chosen timetable.
//!
//! # Concepts
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Period`] | One weekly class occurrence (day, time, weeks) |
//! | [`ClassOption`] | One offering of an activity; its periods go together |
//! | [`Activity`] | A course component needing exactly one option |
//! | [`Course`] | Raw catalog entry grouping labelled option lists |
//! | [`Constraints`] | Student preferences and hard limits |
//! | [`Assignment`] | The chosen option per activity |

mod assignment;
mod constraints;
mod option;
mod period;

pub use assignment::Assignment;
pub use constraints::{Constraints, DeliveryMode};
pub use option::{activity_id, Activity, ActivityId, ClassOption, Course};
pub use period::{format_clock, parse_clock, Day, DayMask, Period, WeekSet, MAX_WEEK, ONLINE_LOCATION};
