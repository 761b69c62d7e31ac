//! Assignment dispatcher.
//!
//! Entry point of the engine. Prepares the reviewer pools, selects the
//! exact or heuristic strategy from [`EngineConfig`], runs the general
//! pass then the committee pass, and unions the two.
//!
//! # Success
//!
//! | Strategy | `success` |
//! |----------|-----------|
//! | Exact | at least one page of either pass solved (OPTIMAL/FEASIBLE) |
//! | Heuristic | at least one pair assigned |
//!
//! With `fallback_to_heuristic`, an unsuccessful exact run is repeated
//! with the heuristic and the result carries both runs' reports.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument, warn};

use crate::config::{EngineConfig, Strategy};
use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};
use crate::error::AssignResult;
use crate::models::{
    committee_cap, Assignment, PageOutcome, PageReport, Pass, ReviewerRecord, RunResult,
    SubmissionRecord, TrackConfig,
};
use crate::optimizer::{ExactOptimizer, GreedyAssigner, PassOutput, WorkloadLedger};
use crate::pool::ReviewerPool;
use crate::solver::{BranchAndBoundFactory, SolverFactory};

/// Input of one assignment run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRequest {
    /// Review cycle identity.
    pub cycle: String,
    /// Track limits and committee.
    pub track: TrackConfig,
    /// Proposals to assign, in input order.
    pub proposals: Vec<ProposalDescriptor>,
    /// Candidate reviewers, committee members included.
    pub reviewers: Vec<ReviewerDescriptor>,
    /// Reviews already held in this cycle, by reviewer id.
    pub prior_workload: BTreeMap<String, usize>,
}

impl AssignmentRequest {
    pub fn new(
        cycle: impl Into<String>,
        track: TrackConfig,
        proposals: Vec<ProposalDescriptor>,
        reviewers: Vec<ReviewerDescriptor>,
    ) -> Self {
        Self {
            cycle: cycle.into(),
            track,
            proposals,
            reviewers,
            prior_workload: BTreeMap::new(),
        }
    }

    /// Builds a request from store records. Unavailable reviewers are dropped.
    pub fn from_records<S, R>(
        cycle: impl Into<String>,
        track: TrackConfig,
        submissions: &[S],
        reviewers: &[R],
    ) -> Self
    where
        S: SubmissionRecord,
        R: ReviewerRecord,
    {
        let proposals = submissions.iter().map(ProposalDescriptor::from_record).collect();
        let reviewers = reviewers
            .iter()
            .filter(|r| r.is_available())
            .map(ReviewerDescriptor::from_record)
            .collect();
        Self::new(cycle, track, proposals, reviewers)
    }

    /// Seeds the heuristic workload ledger.
    pub fn with_prior_workload(mut self, prior: BTreeMap<String, usize>) -> Self {
        self.prior_workload = prior;
        self
    }
}

/// Runs assignments with a configured strategy and solver backend.
///
/// # Example
/// ```
/// use review_assign::config::{EngineConfig, Strategy};
/// use review_assign::descriptor::{ProposalDescriptor, ReviewerDescriptor};
/// use review_assign::dispatcher::{AssignmentRequest, Dispatcher};
/// use review_assign::models::TrackConfig;
///
/// let request = AssignmentRequest::new(
///     "2026-1",
///     TrackConfig::new("GEN", 1, 4),
///     vec![ProposalDescriptor::new("P1").with_technique("XAS").with_area("CHEM")],
///     vec![ReviewerDescriptor::new("R1").with_technique("XAS").with_area("CHEM")],
/// );
///
/// let dispatcher = Dispatcher::new(EngineConfig::new(Strategy::Exact));
/// let result = dispatcher.run(&request).unwrap();
/// assert!(result.success);
/// assert!(result.assignment.contains("P1", "R1"));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<F: SolverFactory = BranchAndBoundFactory> {
    config: EngineConfig,
    factory: F,
}

impl Dispatcher<BranchAndBoundFactory> {
    /// Creates a dispatcher backed by the in-crate branch-and-bound solver.
    pub fn new(config: EngineConfig) -> Self {
        let factory = BranchAndBoundFactory::new(config.node_limit);
        Self { config, factory }
    }
}

impl<F: SolverFactory> Dispatcher<F> {
    /// Creates a dispatcher with a custom solver backend.
    pub fn with_factory(config: EngineConfig, factory: F) -> Self {
        Self { config, factory }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one assignment.
    ///
    /// Returns `Err` only for invalid configuration or a malformed solver
    /// model; infeasibility and an unavailable backend are reported
    /// through [`RunResult`].
    #[instrument(
        skip_all,
        fields(cycle = %request.cycle, track = %request.track.id, strategy = ?self.config.strategy)
    )]
    pub fn run(&self, request: &AssignmentRequest) -> AssignResult<RunResult> {
        self.config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let pool = ReviewerPool::partition(
            request.reviewers.clone(),
            &request.track,
            self.config.pool_limit,
            &mut rng,
        );
        info!(
            proposals = request.proposals.len(),
            general = pool.general.len(),
            committee = pool.committee.len(),
            "assignment run started"
        );

        let mut result = match self.config.strategy {
            Strategy::Exact => self.run_exact(request, &pool)?,
            Strategy::Heuristic => run_heuristic(request, &pool, &mut rng),
        };

        if !result.success
            && self.config.strategy == Strategy::Exact
            && self.config.fallback_to_heuristic
        {
            warn!(
                solver_unavailable = result.solver_unavailable(),
                "exact assignment failed; falling back to heuristic"
            );
            let mut fallback = run_heuristic(request, &pool, &mut rng);
            let mut reports = result.reports;
            reports.append(&mut fallback.reports);
            fallback.reports = reports;
            result = fallback;
        }

        info!(
            success = result.success,
            pairs = result.assignment.pair_count(),
            strategy = ?result.strategy,
            "assignment run finished"
        );
        Ok(result)
    }

    fn run_exact(
        &self,
        request: &AssignmentRequest,
        pool: &ReviewerPool,
    ) -> AssignResult<RunResult> {
        let track = &request.track;
        let optimizer = ExactOptimizer::new(&self.factory)
            .with_page_size(self.config.page_size)
            .with_reward_weight(self.config.reward_weight);

        let general = optimizer.general_pass(
            &request.proposals,
            &pool.general,
            track.min_reviewers,
            track.max_proposals,
        )?;
        let committee = if pool.committee.is_empty() {
            PassOutput::default()
        } else {
            optimizer.committee_pass(
                &request.proposals,
                &pool.committee,
                track.committee_min_reviewers,
            )?
        };

        let success = general.success() || committee.success();
        let mut reports = general.reports;
        reports.extend(committee.reports);
        Ok(RunResult {
            assignment: general.assignment.merge(committee.assignment),
            success,
            strategy: Strategy::Exact,
            reports,
        })
    }
}

fn run_heuristic<R: Rng + ?Sized>(
    request: &AssignmentRequest,
    pool: &ReviewerPool,
    rng: &mut R,
) -> RunResult {
    let track = &request.track;
    let mut ledger = WorkloadLedger::with_prior(request.prior_workload.clone());
    let greedy_report = |pass, reviewers: usize, assignment: &Assignment| PageReport {
        pass,
        page: 0,
        proposals: request.proposals.len(),
        reviewers,
        outcome: PageOutcome::Greedy {
            pairs: assignment.pair_count(),
        },
    };

    let general = GreedyAssigner::new(
        &request.proposals,
        &pool.general,
        track.min_reviewers,
        track.max_proposals,
    )
    .assign(&mut ledger, rng);
    let mut reports = vec![greedy_report(Pass::General, pool.general.len(), &general)];

    let mut assignment = general;
    if !pool.committee.is_empty() {
        let cap = committee_cap(request.proposals.len(), pool.committee.len());
        let committee = GreedyAssigner::new(
            &request.proposals,
            &pool.committee,
            track.committee_min_reviewers,
            cap,
        )
        .committee(true)
        .assign(&mut ledger, rng);
        reports.push(greedy_report(Pass::Committee, pool.committee.len(), &committee));
        assignment = assignment.merge(committee);
    }

    RunResult {
        success: assignment.pair_count() > 0,
        assignment,
        strategy: Strategy::Heuristic,
        reports,
    }
}

/// Runs one assignment with the default backend.
pub fn assign_reviewers(
    request: &AssignmentRequest,
    config: &EngineConfig,
) -> AssignResult<RunResult> {
    Dispatcher::new(config.clone()).run(request)
}
