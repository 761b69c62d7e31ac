//! Assignment quality metrics (KPIs).
//!
//! Under-assignment is silent in both optimizers; these indicators let
//! callers detect it after a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Reward | Sum of `reward(p, r)` over assigned pairs |
//! | Coverage Rate | Fraction of proposals with at least `min_reviewers` |
//! | Under-Assigned | Proposals below `min_reviewers` |
//! | Max Load | Largest reviewer workload |
//! | Avg Load | Mean workload over reviewers with at least one proposal |

use std::collections::BTreeMap;

use crate::config::DEFAULT_REWARD_WEIGHT;
use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};
use crate::models::Assignment;
use crate::optimizer::objective_value;

/// Assignment performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentKpi {
    /// Sum of affinity rewards over all pairs.
    pub total_reward: f64,
    /// Number of (proposal, reviewer) pairs.
    pub pair_count: usize,
    /// Fraction of proposals meeting the minimum (0.0..1.0).
    pub coverage_rate: f64,
    /// Proposals below the minimum, in id order.
    pub under_assigned: Vec<String>,
    /// Workload per assigned reviewer.
    pub load_by_reviewer: BTreeMap<String, usize>,
    /// Largest single workload.
    pub max_load: usize,
    /// Mean workload over assigned reviewers.
    pub avg_load: f64,
}

impl AssignmentKpi {
    /// Computes KPIs for an assignment.
    ///
    /// # Arguments
    /// * `assignment` - Run output.
    /// * `proposals` - Every proposal of the run (missing ones count as uncovered).
    /// * `reviewers` - Reviewer descriptors, for the reward.
    /// * `min_reviewers` - Required reviewers per proposal.
    pub fn calculate(
        assignment: &Assignment,
        proposals: &[ProposalDescriptor],
        reviewers: &[ReviewerDescriptor],
        min_reviewers: usize,
    ) -> Self {
        let under_assigned: Vec<String> = proposals
            .iter()
            .filter(|p| assignment.reviewer_count(&p.id) < min_reviewers)
            .map(|p| p.id.clone())
            .collect();
        let coverage_rate = if proposals.is_empty() {
            1.0
        } else {
            (proposals.len() - under_assigned.len()) as f64 / proposals.len() as f64
        };

        let load_by_reviewer: BTreeMap<String, usize> = assignment
            .workloads()
            .into_iter()
            .map(|(r, load)| (r.to_string(), load))
            .collect();
        let max_load = load_by_reviewer.values().copied().max().unwrap_or(0);
        let avg_load = if load_by_reviewer.is_empty() {
            0.0
        } else {
            load_by_reviewer.values().sum::<usize>() as f64 / load_by_reviewer.len() as f64
        };

        Self {
            total_reward: objective_value(assignment, proposals, reviewers, DEFAULT_REWARD_WEIGHT),
            pair_count: assignment.pair_count(),
            coverage_rate,
            under_assigned,
            load_by_reviewer,
            max_load,
            avg_load,
        }
    }

    /// Whether every proposal met the minimum.
    pub fn fully_covered(&self) -> bool {
        self.under_assigned.is_empty()
    }

    /// Whether the assignment meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_load: usize) -> bool {
        self.coverage_rate >= min_coverage && self.max_load <= max_load
    }
}
