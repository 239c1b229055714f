//! Assignment (solution) model.
//!
//! An assignment maps each activity to its chosen class option. A
//! complete assignment returned by the solver never contains two clashing
//! periods from different options.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ActivityId, ClassOption, DayMask, Period};

/// Chosen class option per activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Activity → chosen option.
    pub choices: BTreeMap<ActivityId, ClassOption>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a choice, replacing any earlier one for the activity.
    pub fn choose(&mut self, activity_id: impl Into<ActivityId>, option: ClassOption) {
        self.choices.insert(activity_id.into(), option);
    }

    /// The option chosen for an activity.
    pub fn get(&self, activity_id: &str) -> Option<&ClassOption> {
        self.choices.get(activity_id)
    }

    /// Number of assigned activities.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Iterates `(activity, option)` pairs in activity-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ActivityId, &ClassOption)> {
        self.choices.iter()
    }

    /// All chosen periods.
    pub fn periods(&self) -> Vec<&Period> {
        self.choices.values().flat_map(|o| o.periods.iter()).collect()
    }

    /// Days with at least one class.
    pub fn days(&self) -> DayMask {
        DayMask::from_days(self.choices.values().flat_map(|o| o.periods.iter().map(|p| p.day)))
    }

    /// Total weekly contact hours.
    pub fn hours(&self) -> f64 {
        self.choices.values().map(ClassOption::hours).sum()
    }
}
