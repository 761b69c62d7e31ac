//! Reviewer pool preparation.
//!
//! Splits the reviewers handed to a run into the track committee and the
//! general pool. Committee members never appear in the general pool, so
//! the two sub-problems keep independent workload caps. The general pool
//! is shuffled and capped to bound the problem size.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::descriptor::ReviewerDescriptor;
use crate::models::{ReviewerRecord, TrackConfig};

/// General and committee reviewer pools for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewerPool {
    /// Reviewers outside the committee, shuffled and capped.
    pub general: Vec<ReviewerDescriptor>,
    /// Committee members, in input order.
    pub committee: Vec<ReviewerDescriptor>,
}

impl ReviewerPool {
    /// Partitions descriptors by committee membership.
    ///
    /// The general pool is shuffled with `rng` and truncated to `limit`.
    pub fn partition<R: Rng + ?Sized>(
        reviewers: Vec<ReviewerDescriptor>,
        track: &TrackConfig,
        limit: usize,
        rng: &mut R,
    ) -> Self {
        let (committee, mut general): (Vec<_>, Vec<_>) = reviewers
            .into_iter()
            .partition(|r| track.is_committee_member(&r.id));
        general.shuffle(rng);
        general.truncate(limit);
        Self { general, committee }
    }

    /// Builds descriptors from reviewer records, dropping unavailable ones.
    pub fn from_records<T, R>(records: &[T], track: &TrackConfig, limit: usize, rng: &mut R) -> Self
    where
        T: ReviewerRecord,
        R: Rng + ?Sized,
    {
        let available = records
            .iter()
            .filter(|r| r.is_available())
            .map(ReviewerDescriptor::from_record)
            .collect();
        Self::partition(available, track, limit, rng)
    }

    /// Total reviewers across both pools.
    pub fn len(&self) -> usize {
        self.general.len() + self.committee.len()
    }

    /// Whether both pools are empty.
    pub fn is_empty(&self) -> bool {
        self.general.is_empty() && self.committee.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reviewer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn track() -> TrackConfig {
        TrackConfig::new("GEN", 2, 4)
            .with_committee_member("C1")
            .with_committee_member("C2")
    }

    #[test]
    fn test_partition_excludes_committee() {
        let reviewers: Vec<_> = ["R1", "C1", "R2", "C2", "R3"]
            .iter()
            .map(|id| ReviewerDescriptor::new(*id))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let pool = ReviewerPool::partition(reviewers, &track(), 200, &mut rng);

        assert_eq!(pool.committee.len(), 2);
        assert_eq!(pool.general.len(), 3);
        assert!(pool.general.iter().all(|r| !r.id.starts_with('C')));
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_partition_caps_general() {
        let reviewers: Vec<_> = (0..10)
            .map(|i| ReviewerDescriptor::new(format!("R{i}")))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let pool = ReviewerPool::partition(reviewers, &track(), 4, &mut rng);
        assert_eq!(pool.general.len(), 4);
        assert!(pool.committee.is_empty());
    }

    #[test]
    fn test_from_records_skips_unavailable() {
        let records = vec![
            Reviewer::new("R1"),
            Reviewer::new("R2").on_hiatus(),
            Reviewer::new("R3").inactive(),
            Reviewer::new("C1"),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let pool = ReviewerPool::from_records(&records, &track(), 200, &mut rng);
        assert_eq!(pool.general.len(), 1);
        assert_eq!(pool.general[0].id, "R1");
        assert_eq!(pool.committee.len(), 1);
    }

    #[test]
    fn test_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let pool = ReviewerPool::partition(Vec::new(), &track(), 10, &mut rng);
        assert!(pool.is_empty());
    }
}
