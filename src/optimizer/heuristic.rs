//! Randomized greedy assignment.
//!
//! Fast, non-optimal alternative to the exact optimizer. Proposals are
//! visited in random order; each takes `min_assignment` random
//! candidates among reviewers that match on technique and area, have
//! spare capacity, and have no conflict of interest.
//!
//! Workload is tracked in a [`WorkloadLedger`] scoped to one run, so the
//! cap holds across every proposal of the run.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};
use crate::models::Assignment;
use crate::scoring::{has_conflict, veto_subject, veto_technique};

/// Running review counts per reviewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadLedger {
    counts: BTreeMap<String, usize>,
}

impl WorkloadLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger with reviews already held in this cycle.
    pub fn with_prior(prior: BTreeMap<String, usize>) -> Self {
        Self { counts: prior }
    }

    /// Current count for a reviewer.
    pub fn load(&self, reviewer_id: &str) -> usize {
        self.counts.get(reviewer_id).copied().unwrap_or(0)
    }

    /// Increments the count for a reviewer.
    pub fn record(&mut self, reviewer_id: &str) {
        *self.counts.entry(reviewer_id.to_string()).or_insert(0) += 1;
    }

    /// Whether the reviewer is below `max_workload`.
    pub fn has_capacity(&self, reviewer_id: &str, max_workload: usize) -> bool {
        self.load(reviewer_id) < max_workload
    }
}

/// Greedy assigner for one pool.
#[derive(Debug, Clone)]
pub struct GreedyAssigner<'a> {
    proposals: &'a [ProposalDescriptor],
    reviewers: &'a [ReviewerDescriptor],
    min_assignment: usize,
    max_workload: usize,
    committee: bool,
}

impl<'a> GreedyAssigner<'a> {
    pub fn new(
        proposals: &'a [ProposalDescriptor],
        reviewers: &'a [ReviewerDescriptor],
        min_assignment: usize,
        max_workload: usize,
    ) -> Self {
        Self {
            proposals,
            reviewers,
            min_assignment,
            max_workload,
            committee: false,
        }
    }

    /// Committee mode skips the technique/area filter. Conflicts of
    /// interest are still excluded.
    pub fn committee(mut self, committee: bool) -> Self {
        self.committee = committee;
        self
    }

    fn matches(&self, proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> bool {
        self.committee
            || (veto_technique(proposal, reviewer, false) == 0
                && veto_subject(proposal, reviewer, false) == 0)
    }

    /// Runs the pass, updating `ledger` as reviewers are assigned.
    ///
    /// Every visited proposal appears in the result, possibly with no
    /// reviewers.
    pub fn assign<R: Rng + ?Sized>(&self, ledger: &mut WorkloadLedger, rng: &mut R) -> Assignment {
        let mut order: Vec<&ProposalDescriptor> = self.proposals.iter().collect();
        order.shuffle(rng);

        let mut assignment = Assignment::new();
        for proposal in order {
            assignment.ensure_proposal(&proposal.id);

            let mut candidates: Vec<&ReviewerDescriptor> = self
                .reviewers
                .iter()
                .filter(|r| self.matches(proposal, r))
                .filter(|r| ledger.has_capacity(&r.id, self.max_workload))
                .filter(|r| !has_conflict(proposal, r))
                .collect();
            candidates.shuffle(rng);
            candidates.truncate(self.min_assignment);

            for reviewer in candidates {
                if assignment.assign(&proposal.id, &reviewer.id) {
                    ledger.record(&reviewer.id);
                }
            }
        }
        assignment
    }
}
