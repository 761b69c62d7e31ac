//! Assignment (solution) model.
//!
//! An assignment maps each proposal to the set of reviewers chosen for it.
//! It is produced fresh by every run and merged by set union; callers
//! replace previously pending assignments with it wholesale.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Strategy;
use crate::solver::SolveStatus;

/// Proposal → reviewer set mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    reviewers: BTreeMap<String, BTreeSet<String>>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a proposal, even if it ends up with no reviewers.
    pub fn ensure_proposal(&mut self, proposal_id: &str) {
        if !self.reviewers.contains_key(proposal_id) {
            self.reviewers
                .insert(proposal_id.to_string(), BTreeSet::new());
        }
    }

    /// Assigns a reviewer to a proposal. Returns `false` if already present.
    pub fn assign(&mut self, proposal_id: &str, reviewer_id: &str) -> bool {
        self.reviewers
            .entry(proposal_id.to_string())
            .or_default()
            .insert(reviewer_id.to_string())
    }

    /// Set union with another assignment (consumes both).
    pub fn merge(mut self, other: Assignment) -> Self {
        for (proposal, reviewers) in other.reviewers {
            self.reviewers.entry(proposal).or_default().extend(reviewers);
        }
        self
    }

    /// Reviewers assigned to a proposal.
    pub fn reviewers_for(&self, proposal_id: &str) -> Option<&BTreeSet<String>> {
        self.reviewers.get(proposal_id)
    }

    /// Number of reviewers assigned to a proposal (0 if unknown).
    pub fn reviewer_count(&self, proposal_id: &str) -> usize {
        self.reviewers.get(proposal_id).map_or(0, BTreeSet::len)
    }

    /// Whether the pair is assigned.
    pub fn contains(&self, proposal_id: &str, reviewer_id: &str) -> bool {
        self.reviewers
            .get(proposal_id)
            .is_some_and(|set| set.contains(reviewer_id))
    }

    /// Number of proposals recorded.
    pub fn proposal_count(&self) -> usize {
        self.reviewers.len()
    }

    /// Total (proposal, reviewer) pairs.
    pub fn pair_count(&self) -> usize {
        self.reviewers.values().map(BTreeSet::len).sum()
    }

    /// Whether no pair is assigned.
    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }

    /// Number of proposals assigned to a reviewer.
    pub fn workload(&self, reviewer_id: &str) -> usize {
        self.reviewers
            .values()
            .filter(|set| set.contains(reviewer_id))
            .count()
    }

    /// Workload of every assigned reviewer.
    pub fn workloads(&self) -> BTreeMap<&str, usize> {
        let mut loads = BTreeMap::new();
        for set in self.reviewers.values() {
            for reviewer in set {
                *loads.entry(reviewer.as_str()).or_insert(0) += 1;
            }
        }
        loads
    }

    /// Iterates `(proposal, reviewers)` in proposal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.reviewers.iter().map(|(p, set)| (p.as_str(), set))
    }

    /// Iterates every `(proposal, reviewer)` pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reviewers
            .iter()
            .flat_map(|(p, set)| set.iter().map(move |r| (p.as_str(), r.as_str())))
    }
}

/// Which sub-problem produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// General reviewer pool.
    General,
    /// Track committee pool (vetoes relaxed).
    Committee,
}

/// Result of one page (exact) or one pass (heuristic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Solver returned OPTIMAL or FEASIBLE.
    Solved { status: SolveStatus, objective: f64 },
    /// Solver ran but found nothing usable (e.g. INFEASIBLE).
    NoSolution { status: SolveStatus },
    /// Backend could not be created: a configuration problem.
    SolverUnavailable { reason: String },
    /// Greedy pass finished with this many pairs.
    Greedy { pairs: usize },
}

impl PageOutcome {
    /// Whether this page contributed a usable result.
    pub fn is_success(&self) -> bool {
        match self {
            PageOutcome::Solved { .. } => true,
            PageOutcome::Greedy { pairs } => *pairs > 0,
            PageOutcome::NoSolution { .. } | PageOutcome::SolverUnavailable { .. } => false,
        }
    }
}

/// Diagnostic record for one page of one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// Sub-problem.
    pub pass: Pass,
    /// Page index (0 for heuristic passes).
    pub page: usize,
    /// Proposals on the page.
    pub proposals: usize,
    /// Reviewers in the pool.
    pub reviewers: usize,
    /// What happened.
    pub outcome: PageOutcome,
}

/// Output of an assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Merged general + committee assignment.
    pub assignment: Assignment,
    /// Whether the strategy produced anything usable.
    pub success: bool,
    /// Strategy that produced `assignment`.
    pub strategy: Strategy,
    /// Per-page diagnostics, general pass first.
    pub reports: Vec<PageReport>,
}

impl RunResult {
    /// Whether any page failed because the solver backend was unavailable.
    pub fn solver_unavailable(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r.outcome, PageOutcome::SolverUnavailable { .. }))
    }

    /// Whether any page ran the solver without finding a solution.
    pub fn has_infeasible_pages(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r.outcome, PageOutcome::NoSolution { .. }))
    }
}
