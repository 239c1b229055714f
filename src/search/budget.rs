//! Search budget and solver configuration.
//!
//! A budget bounds search effort by node count, wall-clock time, or
//! both. When it runs out the search stops and returns the best
//! timetable found so far, flagged as not proven optimal.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Default number of nodes between wall-clock checks.
pub const DEFAULT_SAMPLE_EVERY: u32 = 1024;

/// Limits on search effort. Unlimited by default.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_timetable::search::SearchBudget;
///
/// let budget = SearchBudget::unlimited()
///     .with_max_nodes(50_000)
///     .with_time_limit(Duration::from_millis(200));
/// assert_eq!(budget.max_nodes, Some(50_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchBudget {
    /// Most option commitments the search may try.
    ///
    /// Reaching a complete timetable takes one node per activity, so a
    /// limit below the activity count always ends in
    /// [`BudgetExhausted`](crate::search::InfeasibleReason::BudgetExhausted).
    pub max_nodes: Option<u64>,
    /// Wall-clock limit, checked every `sample_every` nodes.
    pub time_limit: Option<Duration>,
    /// Nodes between wall-clock checks (at least 1).
    pub sample_every: u32,
}

impl SearchBudget {
    /// No limits: the search always runs to completion.
    pub fn unlimited() -> Self {
        Self {
            max_nodes: None,
            time_limit: None,
            sample_every: DEFAULT_SAMPLE_EVERY,
        }
    }

    /// Sets the node limit.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets how often the clock is read.
    pub fn with_sample_every(mut self, nodes: u32) -> Self {
        self.sample_every = nodes.max(1);
        self
    }

    /// Whether no limit is set.
    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit.is_none()
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverConfig {
    /// Effort limits.
    pub budget: SearchBudget,
    /// Skip clash and break checks, accepting overlapping classes.
    pub allow_clashes: bool,
}

impl SolverConfig {
    /// Default configuration: unlimited budget, clashes rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Allows or rejects clashing classes.
    pub fn with_allow_clashes(mut self, allow: bool) -> Self {
        self.allow_clashes = allow;
        self
    }
}

/// Per-solve budget accounting.
#[derive(Debug)]
pub(crate) struct BudgetTracker {
    budget: SearchBudget,
    nodes: u64,
    started: Instant,
    exhausted: bool,
}

impl BudgetTracker {
    pub(crate) fn start(budget: SearchBudget) -> Self {
        Self {
            budget,
            nodes: 0,
            started: Instant::now(),
            exhausted: false,
        }
    }

    /// Counts one node. Returns `false` once the budget is spent.
    #[inline]
    pub(crate) fn try_visit(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if let Some(max) = self.budget.max_nodes {
            if self.nodes >= max {
                self.exhausted = true;
                return false;
            }
        }
        self.nodes += 1;

        if let Some(limit) = self.budget.time_limit {
            let every = u64::from(self.budget.sample_every.max(1));
            if self.nodes % every == 0 && self.started.elapsed() >= limit {
                self.exhausted = true;
                return false;
            }
        }
        true
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
