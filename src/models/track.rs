//! Review track configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-track assignment limits.
///
/// The general pool and the committee pool are separate sub-problems with
/// independent workload caps. Committee members are never part of the
/// general pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Track identifier.
    pub id: String,
    /// Reviews required per proposal from the general pool.
    pub min_reviewers: usize,
    /// Maximum proposals per general-pool reviewer.
    pub max_proposals: usize,
    /// Reviewer IDs of the track committee.
    #[serde(default)]
    pub committee: BTreeSet<String>,
    /// Reviews required per proposal from the committee pool.
    #[serde(default = "default_committee_min_reviewers")]
    pub committee_min_reviewers: usize,
}

fn default_committee_min_reviewers() -> usize {
    1
}

impl TrackConfig {
    /// Creates a track with no committee.
    pub fn new(id: impl Into<String>, min_reviewers: usize, max_proposals: usize) -> Self {
        Self {
            id: id.into(),
            min_reviewers,
            max_proposals,
            committee: BTreeSet::new(),
            committee_min_reviewers: default_committee_min_reviewers(),
        }
    }

    /// Adds a committee member.
    pub fn with_committee_member(mut self, reviewer_id: impl Into<String>) -> Self {
        self.committee.insert(reviewer_id.into());
        self
    }

    /// Sets the committee reviews required per proposal.
    pub fn with_committee_min_reviewers(mut self, count: usize) -> Self {
        self.committee_min_reviewers = count;
        self
    }

    /// Whether a reviewer sits on this track's committee.
    pub fn is_committee_member(&self, reviewer_id: &str) -> bool {
        self.committee.contains(reviewer_id)
    }

    /// Upper bound on reviews per proposal from the general pool
    /// (exact strategy): the minimum plus two.
    pub fn max_assignment(&self) -> usize {
        max_assignment(self.min_reviewers, false)
    }

    /// Workload cap for committee members on a batch of `proposal_count`
    /// proposals: `2 + proposal_count / committee_size`.
    pub fn committee_cap(&self, proposal_count: usize) -> usize {
        committee_cap(proposal_count, self.committee.len())
    }
}

/// Upper bound on reviewers per proposal.
///
/// Committee passes demand exactly `min_assignment`; general passes allow
/// two extra reviewers.
pub fn max_assignment(min_assignment: usize, committee: bool) -> usize {
    if committee {
        min_assignment
    } else {
        min_assignment + 2
    }
}

/// Committee workload cap: `2 + proposal_count / max(1, committee_size)`.
pub fn committee_cap(proposal_count: usize, committee_size: usize) -> usize {
    2 + proposal_count / committee_size.max(1)
}
