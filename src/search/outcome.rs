//! Solve results.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{ActivityId, Assignment};
use crate::scoring::Score;

/// Why no timetable was returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InfeasibleReason {
    /// An activity had no options left after filtering.
    #[error("activity '{activity}' has no eligible class options")]
    NoEligibleOptions {
        /// The offending activity.
        activity: ActivityId,
    },
    /// Every branch was rejected by clashes or hard limits.
    #[error("every combination of class options clashes or breaks a hard limit")]
    AllBranchesPruned,
    /// The budget ran out before any complete timetable was found.
    #[error("search budget exhausted before a complete timetable was found")]
    BudgetExhausted,
}

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Option commitments tried.
    pub nodes_visited: u64,
    /// Complete assignments scored.
    pub leaves_evaluated: u64,
    /// Options rejected because of a clash or a too-short break.
    pub clash_rejections: u64,
    /// Options rejected by the days-on-campus limit.
    pub day_limit_rejections: u64,
    /// Branches skipped because their bound could not beat the best.
    pub bound_prunes: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Result of a solve call.
///
/// `optimal` is `true` when the whole search space was explored (the
/// result is proven best, or proven infeasible) and `false` when the
/// budget cut the search short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// A non-clashing timetable.
    Scheduled {
        /// Chosen option per activity.
        assignment: Assignment,
        /// Its score under the strategy used.
        score: Score,
        /// Whether the search finished.
        optimal: bool,
        /// Effort counters.
        stats: SearchStats,
    },
    /// No timetable.
    Infeasible {
        /// Why.
        reason: InfeasibleReason,
        /// Whether infeasibility is proven.
        optimal: bool,
        /// Effort counters.
        stats: SearchStats,
    },
}

impl SolveOutcome {
    /// Whether a timetable was found.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    /// The timetable, if any.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Scheduled { assignment, .. } => Some(assignment),
            Self::Infeasible { .. } => None,
        }
    }

    /// Consumes the outcome, returning the timetable, if any.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            Self::Scheduled { assignment, .. } => Some(assignment),
            Self::Infeasible { .. } => None,
        }
    }

    /// Score of the timetable, if any.
    pub fn score(&self) -> Option<Score> {
        match self {
            Self::Scheduled { score, .. } => Some(*score),
            Self::Infeasible { .. } => None,
        }
    }

    /// Infeasibility reason, if no timetable was found.
    pub fn infeasible_reason(&self) -> Option<&InfeasibleReason> {
        match self {
            Self::Scheduled { .. } => None,
            Self::Infeasible { reason, .. } => Some(reason),
        }
    }

    /// Whether the search space was fully explored.
    pub fn is_optimal(&self) -> bool {
        match self {
            Self::Scheduled { optimal, .. } | Self::Infeasible { optimal, .. } => *optimal,
        }
    }

    /// Effort counters.
    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Scheduled { stats, .. } | Self::Infeasible { stats, .. } => stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let ok = SolveOutcome::Scheduled {
            assignment: Assignment::new(),
            score: 3.5,
            optimal: false,
            stats: SearchStats::default(),
        };
        assert!(ok.is_scheduled());
        assert_eq!(ok.score(), Some(3.5));
        assert!(!ok.is_optimal());
        assert!(ok.infeasible_reason().is_none());

        let none = SolveOutcome::Infeasible {
            reason: InfeasibleReason::AllBranchesPruned,
            optimal: true,
            stats: SearchStats::default(),
        };
        assert!(none.assignment().is_none());
        assert!(none.is_optimal());
        assert_eq!(
            none.infeasible_reason(),
            Some(&InfeasibleReason::AllBranchesPruned)
        );
    }

    #[test]
    fn test_reason_messages() {
        let r = InfeasibleReason::NoEligibleOptions {
            activity: "COMP1511-Lab".into(),
        };
        assert_eq!(
            r.to_string(),
            "activity 'COMP1511-Lab' has no eligible class options"
        );
    }
}
