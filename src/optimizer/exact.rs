//! Integer-programming formulation of reviewer assignment.
//!
//! # Model
//!
//! Binary `x[i,j]` = reviewer `i` reviews proposal `j`.
//!
//! | Constraint | Form |
//! |------------|------|
//! | Workload | `Σ_j x[i,j] ≤ cap_i` |
//! | Coverage | `min ≤ Σ_i x[i,j] ≤ max_assignment` |
//! | Incompatibility | `Σ_i inc(j,i)·x[i,j] = 0`, `Σ_j inc(j,i)·x[i,j] = 0` |
//!
//! Objective: maximize `Σ reward(j,i)·x[i,j]`.
//!
//! Incompatible pairs stay in the model as variables and are excluded by
//! constraint, so the formulation reads the same for any backend. In the
//! general pass `inc` is the full veto. In the committee pass technique and
//! area are relaxed, so `inc` is the conflict-of-interest check alone.
//!
//! # Paging
//!
//! Proposals are solved in pages, each page independently, and the page
//! assignments are folded into one. For the general pool, `max_proposals`
//! is a per-run cap split across pages in proportion to page size (see
//! [`page_budgets`]), so the union never exceeds it. For the committee,
//! the cap is derived per page as `2 + page_len / committee_size`.

use std::collections::BTreeMap;

use tracing::{debug, error, warn};

use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};
use crate::error::{AssignResult, SolverError};
use crate::models::{committee_cap, max_assignment, Assignment, PageOutcome, PageReport, Pass};
use crate::scoring::{has_conflict, is_incompatible, reward_weighted, Veto};
use crate::solver::{Comparison, LinearExpr, Sense, SolveStatus, Solver, SolverFactory, Var};

/// Builds the assignment integer program for one page.
///
/// # Example
/// ```
/// use review_assign::descriptor::{ProposalDescriptor, ReviewerDescriptor};
/// use review_assign::optimizer::AssignmentModel;
/// use review_assign::solver::BranchAndBoundSolver;
///
/// let proposals = vec![ProposalDescriptor::new("P1").with_technique("T1").with_area("A1")];
/// let reviewers = vec![ReviewerDescriptor::new("R1").with_technique("T1").with_area("A1")];
///
/// let model = AssignmentModel::new(&proposals, &reviewers, 1, 3);
/// let mut solver = BranchAndBoundSolver::new();
/// let solution = model.solve(&mut solver).unwrap();
/// assert!(solution.assignment.contains("P1", "R1"));
/// ```
pub struct AssignmentModel<'a> {
    proposals: &'a [ProposalDescriptor],
    reviewers: &'a [ReviewerDescriptor],
    min_assignment: usize,
    capacities: Vec<usize>,
    committee: bool,
    reward_weight: f64,
}

/// Decoded solve result for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactSolution {
    /// Pairs with `x = 1`; empty when the status has no solution.
    pub assignment: Assignment,
    /// Solver status.
    pub status: SolveStatus,
    /// Objective value, if solved.
    pub objective: Option<f64>,
}

impl<'a> AssignmentModel<'a> {
    /// Creates a model where every reviewer has the same workload cap.
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
            capacities: vec![max_workload; reviewers.len()],
            committee: false,
            reward_weight: crate::config::DEFAULT_REWARD_WEIGHT,
        }
    }

    /// Overrides the per-reviewer caps (parallel to the reviewer slice).
    pub fn with_capacities(mut self, capacities: Vec<usize>) -> Self {
        self.capacities = capacities;
        self
    }

    /// Marks the model as a committee sub-problem (technique and area
    /// vetoes relaxed, conflicts still excluded, exactly `min_assignment`
    /// reviewers per proposal).
    pub fn committee(mut self, committee: bool) -> Self {
        self.committee = committee;
        self
    }

    /// Sets the reward base weight.
    pub fn with_reward_weight(mut self, weight: f64) -> Self {
        self.reward_weight = weight;
        self
    }

    /// Upper bound on reviewers per proposal.
    pub fn max_assignment(&self) -> usize {
        max_assignment(self.min_assignment, self.committee)
    }

    fn capacity(&self, reviewer: usize) -> usize {
        self.capacities.get(reviewer).copied().unwrap_or(0)
    }

    fn veto(&self, proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> Veto {
        if self.committee {
            u8::from(has_conflict(proposal, reviewer))
        } else {
            is_incompatible(proposal, reviewer, false)
        }
    }

    /// Adds variables, constraints and objective to `solver`.
    ///
    /// Returns the variable grid, indexed `[reviewer * proposals + proposal]`.
    pub fn build<S: Solver + ?Sized>(&self, solver: &mut S) -> Result<Vec<Var>, SolverError> {
        let n = self.proposals.len();
        let m = self.reviewers.len();

        let mut x = Vec::with_capacity(n * m);
        let mut invalid = Vec::with_capacity(n * m);
        let mut rewards = Vec::with_capacity(n * m);
        for (i, reviewer) in self.reviewers.iter().enumerate() {
            for (j, proposal) in self.proposals.iter().enumerate() {
                x.push(solver.bool_var(&format!("x[{i},{j}]"))?);
                invalid.push(f64::from(self.veto(proposal, reviewer)));
                rewards.push(reward_weighted(proposal, reviewer, self.reward_weight));
            }
        }

        for i in 0..m {
            let row = i * n..(i + 1) * n;
            solver.add_constraint(
                LinearExpr::sum(x[row.clone()].iter().copied()),
                Comparison::LessEq,
                self.capacity(i) as f64,
            )?;
            solver.add_constraint(
                row.map(|k| (x[k], invalid[k])).collect(),
                Comparison::Equal,
                0.0,
            )?;
        }

        let upper = self.max_assignment();
        for j in 0..n {
            let column: Vec<usize> = (0..m).map(|i| i * n + j).collect();
            let coverage = LinearExpr::sum(column.iter().map(|&k| x[k]));
            solver.add_constraint(
                coverage.clone(),
                Comparison::GreaterEq,
                self.min_assignment as f64,
            )?;
            solver.add_constraint(coverage, Comparison::LessEq, upper as f64)?;
            solver.add_constraint(
                column.iter().map(|&k| (x[k], invalid[k])).collect(),
                Comparison::Equal,
                0.0,
            )?;
        }

        let objective = x.iter().zip(&rewards).map(|(&v, &w)| (v, w)).collect();
        solver.set_objective(objective, Sense::Maximize)?;

        Ok(x)
    }

    /// Builds, solves, and decodes the model.
    pub fn solve<S: Solver + ?Sized>(&self, solver: &mut S) -> Result<ExactSolution, SolverError> {
        let x = self.build(solver)?;
        let status = solver.solve();
        if !status.has_solution() {
            return Ok(ExactSolution {
                assignment: Assignment::new(),
                status,
                objective: None,
            });
        }
        Ok(ExactSolution {
            assignment: self.decode(solver, &x),
            status,
            objective: solver.objective_value(),
        })
    }

    fn decode<S: Solver + ?Sized>(&self, solver: &S, x: &[Var]) -> Assignment {
        let n = self.proposals.len();
        let mut assignment = Assignment::new();
        for (j, proposal) in self.proposals.iter().enumerate() {
            assignment.ensure_proposal(&proposal.id);
            for (i, reviewer) in self.reviewers.iter().enumerate() {
                if solver.value(x[i * n + j]).unwrap_or(0.0) > 0.5 {
                    assignment.assign(&proposal.id, &reviewer.id);
                }
            }
        }
        assignment
    }
}

/// Assignment and diagnostics of one pass over all pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassOutput {
    /// Union of all page assignments.
    pub assignment: Assignment,
    /// One report per page.
    pub reports: Vec<PageReport>,
}

impl PassOutput {
    /// Whether any page produced a usable solution.
    pub fn success(&self) -> bool {
        self.reports.iter().any(|r| r.outcome.is_success())
    }

    fn push(mut self, assignment: Assignment, report: PageReport) -> Self {
        self.assignment = self.assignment.merge(assignment);
        self.reports.push(report);
        self
    }
}

/// Paged exact optimizer over a solver factory.
pub struct ExactOptimizer<'f, F: SolverFactory> {
    factory: &'f F,
    page_size: usize,
    reward_weight: f64,
}

impl<'f, F: SolverFactory> ExactOptimizer<'f, F> {
    /// Creates an optimizer with the default page size and reward weight.
    pub fn new(factory: &'f F) -> Self {
        Self {
            factory,
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            reward_weight: crate::config::DEFAULT_REWARD_WEIGHT,
        }
    }

    /// Sets the page size (clamped to at least 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the reward base weight.
    pub fn with_reward_weight(mut self, weight: f64) -> Self {
        self.reward_weight = weight;
        self
    }

    /// General-pool pass. `max_workload` bounds each reviewer over the
    /// whole pass, not per page.
    pub fn general_pass(
        &self,
        proposals: &[ProposalDescriptor],
        reviewers: &[ReviewerDescriptor],
        min_assignment: usize,
        max_workload: usize,
    ) -> AssignResult<PassOutput> {
        let pages: Vec<&[ProposalDescriptor]> = proposals.chunks(self.page_size).collect();
        let lens: Vec<usize> = pages.iter().map(|page| page.len()).collect();
        let budgets = page_budgets(max_workload, &lens);

        pages
            .into_iter()
            .zip(budgets)
            .enumerate()
            .try_fold(PassOutput::default(), |acc, (page, (chunk, budget))| {
                let (assignment, report) = self.solve_page(
                    Pass::General,
                    page,
                    chunk,
                    reviewers,
                    min_assignment,
                    vec![budget; reviewers.len()],
                )?;
                Ok(acc.push(assignment, report))
            })
    }

    /// Committee pass with relaxed vetoes and per-page caps.
    pub fn committee_pass(
        &self,
        proposals: &[ProposalDescriptor],
        committee: &[ReviewerDescriptor],
        min_assignment: usize,
    ) -> AssignResult<PassOutput> {
        proposals
            .chunks(self.page_size)
            .enumerate()
            .try_fold(PassOutput::default(), |acc, (page, chunk)| {
                let cap = committee_cap(chunk.len(), committee.len());
                let (assignment, report) = self.solve_page(
                    Pass::Committee,
                    page,
                    chunk,
                    committee,
                    min_assignment,
                    vec![cap; committee.len()],
                )?;
                Ok(acc.push(assignment, report))
            })
    }

    fn solve_page(
        &self,
        pass: Pass,
        page: usize,
        proposals: &[ProposalDescriptor],
        reviewers: &[ReviewerDescriptor],
        min_assignment: usize,
        capacities: Vec<usize>,
    ) -> AssignResult<(Assignment, PageReport)> {
        let report = |outcome| PageReport {
            pass,
            page,
            proposals: proposals.len(),
            reviewers: reviewers.len(),
            outcome,
        };

        let mut solver = match self.factory.create() {
            Ok(solver) => solver,
            Err(SolverError::Unavailable { backend, reason }) => {
                error!(
                    kind = "configuration",
                    ?pass,
                    page,
                    backend = %backend,
                    reason = %reason,
                    "solver backend unavailable; page left unassigned"
                );
                let outcome = PageOutcome::SolverUnavailable { reason };
                return Ok((Assignment::new(), report(outcome)));
            }
            Err(other) => return Err(other.into()),
        };

        let solution = AssignmentModel::new(proposals, reviewers, min_assignment, 0)
            .with_capacities(capacities)
            .committee(pass == Pass::Committee)
            .with_reward_weight(self.reward_weight)
            .solve(&mut solver)?;

        let outcome = match solution.objective {
            Some(objective) if solution.status.has_solution() => {
                debug!(
                    ?pass,
                    page,
                    backend = solver.backend_name(),
                    status = ?solution.status,
                    objective,
                    pairs = solution.assignment.pair_count(),
                    "page solved"
                );
                PageOutcome::Solved {
                    status: solution.status,
                    objective,
                }
            }
            _ => {
                warn!(
                    kind = "infeasible",
                    ?pass,
                    page,
                    status = ?solution.status,
                    proposals = proposals.len(),
                    reviewers = reviewers.len(),
                    "no feasible assignment for page"
                );
                PageOutcome::NoSolution {
                    status: solution.status,
                }
            }
        };
        Ok((solution.assignment, report(outcome)))
    }
}

/// Splits a per-run workload cap across pages in proportion to page
/// length. Leftover units go to the largest remainders, ties to earlier
/// pages. The budgets always sum to `max_workload` when there is at least
/// one non-empty page.
pub fn page_budgets(max_workload: usize, page_lens: &[usize]) -> Vec<usize> {
    let total: usize = page_lens.iter().sum();
    if total == 0 {
        return vec![max_workload; page_lens.len()];
    }
    // Products can exceed usize; each share is at most max_workload.
    let scaled = |len: usize| max_workload as u128 * len as u128;
    let mut budgets: Vec<usize> = page_lens
        .iter()
        .map(|&len| (scaled(len) / total as u128) as usize)
        .collect();
    let mut remaining = max_workload - budgets.iter().sum::<usize>();

    let mut order: Vec<usize> = (0..page_lens.len()).collect();
    order.sort_by_key(|&k| std::cmp::Reverse(scaled(page_lens[k]) % total as u128));
    for k in order {
        if remaining == 0 {
            break;
        }
        budgets[k] += 1;
        remaining -= 1;
    }
    budgets
}

/// Total reward of an assignment under the given descriptors.
pub fn objective_value(
    assignment: &Assignment,
    proposals: &[ProposalDescriptor],
    reviewers: &[ReviewerDescriptor],
    reward_weight: f64,
) -> f64 {
    let proposals: BTreeMap<&str, &ProposalDescriptor> =
        proposals.iter().map(|p| (p.id.as_str(), p)).collect();
    let reviewers: BTreeMap<&str, &ReviewerDescriptor> =
        reviewers.iter().map(|r| (r.id.as_str(), r)).collect();
    assignment
        .pairs()
        .filter_map(|(p, r)| {
            Some(reward_weighted(proposals.get(p)?, reviewers.get(r)?, reward_weight))
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{BranchAndBoundFactory, BranchAndBoundSolver};

    fn proposal(id: &str, technique: &str, area: &str) -> ProposalDescriptor {
        ProposalDescriptor::new(id).with_technique(technique).with_area(area)
    }

    fn reviewer(id: &str, technique: &str, area: &str) -> ReviewerDescriptor {
        ReviewerDescriptor::new(id)
            .with_technique(technique)
            .with_area(area)
            .with_email(&format!("{id}@review.org"))
    }

    struct Unavailable;

    impl SolverFactory for Unavailable {
        type Solver = BranchAndBoundSolver;

        fn create(&self) -> Result<BranchAndBoundSolver, SolverError> {
            Err(SolverError::Unavailable {
                backend: "SCIP".into(),
                reason: "not installed".into(),
            })
        }
    }

    #[test]
    fn test_build_model_shape() {
        let proposals = vec![proposal("P1", "T1", "A1"), proposal("P2", "T1", "A1")];
        let reviewers = vec![
            reviewer("R1", "T1", "A1"),
            reviewer("R2", "T1", "A1"),
            reviewer("R3", "T2", "A1"),
        ];
        let model = AssignmentModel::new(&proposals, &reviewers, 1, 2);
        let mut solver = BranchAndBoundSolver::new();
        let x = model.build(&mut solver).unwrap();

        assert_eq!(x.len(), 6);
        assert_eq!(solver.variable_count(), 6);
        // 2 rows per reviewer + 3 rows per proposal
        assert_eq!(solver.constraint_count(), 3 * 2 + 2 * 3);
    }

    #[test]
    fn test_single_matching_reviewer() {
        let proposals = vec![proposal("P1", "T1", "A1")];
        let reviewers = vec![
            reviewer("R1", "T1", "A1"),
            reviewer("R2", "T1", "A2"),
            reviewer("R3", "T2", "A1"),
        ];
        let model = AssignmentModel::new(&proposals, &reviewers, 1, 4);
        let solution = model.solve(&mut BranchAndBoundSolver::new()).unwrap();

        assert_eq!(solution.status, SolveStatus::Optimal);
        let assigned = solution.assignment.reviewers_for("P1").unwrap();
        assert_eq!(assigned.len(), 1);
        assert!(assigned.contains("R1"));
        assert_eq!(solution.objective, Some(100.0));
    }

    #[test]
    fn test_conflict_excluded() {
        let proposals = vec![proposal("P1", "T1", "A1").with_email("alice@x.org")];
        let reviewers = vec![
            reviewer("R1", "T1", "A1").with_email("alice@x.org"),
            reviewer("R2", "T1", "A1"),
        ];
        let solution = AssignmentModel::new(&proposals, &reviewers, 1, 4)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();
        assert!(!solution.assignment.contains("P1", "R1"));
        assert!(solution.assignment.contains("P1", "R2"));
    }

    #[test]
    fn test_coverage_bounds_and_max_reward() {
        // min 2 → max_assignment 4; five compatible reviewers
        let proposals = vec![ProposalDescriptor::new("P1")
            .with_technique("T1")
            .with_technique("T2")
            .with_area("A1")];
        let reviewers: Vec<_> = (0..5)
            .map(|i| {
                let r = reviewer(&format!("R{i}"), "T1", "A1");
                if i < 2 { r.with_technique("T2") } else { r }
            })
            .collect();
        let model = AssignmentModel::new(&proposals, &reviewers, 2, 3);
        assert_eq!(model.max_assignment(), 4);
        let solution = model.solve(&mut BranchAndBoundSolver::new()).unwrap();

        let count = solution.assignment.reviewer_count("P1");
        assert!((2..=4).contains(&count));
        // Best four: two with strength 2 (200 each) + two with strength 1 (100 each)
        assert_eq!(solution.objective, Some(600.0));
        assert_eq!(count, 4);
    }

    #[test]
    fn test_workload_cap() {
        let proposals = vec![proposal("P1", "T1", "A1"), proposal("P2", "T1", "A1")];
        let reviewers = vec![reviewer("R1", "T1", "A1"), reviewer("R2", "T1", "A1")];
        let solution = AssignmentModel::new(&proposals, &reviewers, 1, 1)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert_eq!(solution.assignment.workload("R1"), 1);
        assert_eq!(solution.assignment.workload("R2"), 1);
    }

    #[test]
    fn test_infeasible_returns_empty() {
        let proposals = vec![proposal("P1", "T1", "A1")];
        let reviewers = vec![reviewer("R1", "T9", "A9")];
        let solution = AssignmentModel::new(&proposals, &reviewers, 1, 4)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();
        assert_eq!(solution.status, SolveStatus::Infeasible);
        assert!(solution.assignment.is_empty());
        assert_eq!(solution.assignment.proposal_count(), 0);
        assert!(solution.objective.is_none());
    }

    #[test]
    fn test_committee_relaxed_exact_count() {
        let proposals = vec![proposal("P1", "T1", "A1"), proposal("P2", "T2", "A2")];
        let committee = vec![reviewer("C1", "T9", "A9"), reviewer("C2", "T8", "A8")];
        let model = AssignmentModel::new(&proposals, &committee, 1, 2).committee(true);
        assert_eq!(model.max_assignment(), 1);
        let solution = model.solve(&mut BranchAndBoundSolver::new()).unwrap();
        assert!(solution.status.has_solution());
        assert_eq!(solution.assignment.reviewer_count("P1"), 1);
        assert_eq!(solution.assignment.reviewer_count("P2"), 1);
    }

    #[test]
    fn test_committee_conflict_excluded() {
        // C1 is on P1's team; relaxation must not let the pair through
        let proposals = vec![
            proposal("P1", "T1", "A1").with_email("c1@review.org"),
            proposal("P2", "T1", "A1"),
        ];
        let committee = vec![reviewer("C1", "T9", "A9"), reviewer("C2", "T9", "A9")];
        let solution = AssignmentModel::new(&proposals, &committee, 1, 2)
            .committee(true)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();

        assert!(solution.status.has_solution());
        assert!(!solution.assignment.contains("P1", "C1"));
        assert!(solution.assignment.contains("P1", "C2"));
        assert_eq!(solution.assignment.reviewer_count("P2"), 1);
    }

    #[test]
    fn test_committee_conflict_only_member_infeasible() {
        let proposals = vec![proposal("P1", "T1", "A1").with_email("c1@review.org")];
        let committee = vec![reviewer("C1", "T1", "A1")];
        let factory = BranchAndBoundFactory::default();
        let output = ExactOptimizer::new(&factory)
            .committee_pass(&proposals, &committee, 1)
            .unwrap();

        assert!(!output.success());
        assert!(!output.assignment.contains("P1", "C1"));
    }

    #[test]
    fn test_deterministic_objective() {
        let proposals: Vec<_> = (0..4).map(|j| proposal(&format!("P{j}"), "T1", "A1")).collect();
        let reviewers: Vec<_> = (0..6).map(|i| reviewer(&format!("R{i}"), "T1", "A1")).collect();
        let first = AssignmentModel::new(&proposals, &reviewers, 2, 2)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();
        let second = AssignmentModel::new(&proposals, &reviewers, 2, 2)
            .solve(&mut BranchAndBoundSolver::new())
            .unwrap();
        assert_eq!(first.objective, second.objective);
        assert_eq!(
            objective_value(&first.assignment, &proposals, &reviewers, 100.0),
            first.objective.unwrap()
        );
    }

    #[test]
    fn test_page_budgets() {
        assert_eq!(page_budgets(4, &[100]), vec![4]);
        assert_eq!(page_budgets(4, &[100, 100, 50]), vec![2, 1, 1]);
        assert_eq!(page_budgets(2, &[2, 2]), vec![1, 1]);
        assert_eq!(page_budgets(1, &[1, 1]), vec![1, 0]);
        assert_eq!(page_budgets(3, &[]), Vec::<usize>::new());
        assert_eq!(page_budgets(5, &[30, 30, 40]).iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_page_budgets_large_cap() {
        let budgets = page_budgets(usize::MAX, &[100, 100, 50]);
        assert_eq!(budgets.len(), 3);
        assert_eq!(budgets.iter().sum::<usize>(), usize::MAX);
        assert!(budgets[0] >= budgets[2]);
        assert!(budgets[2] > 0);
    }

    #[test]
    fn test_full_page_tight_capacity() {
        // 100 proposals need 2 reviewers each; 200 reviewers take one each
        let proposals: Vec<_> = (0..100)
            .map(|j| proposal(&format!("P{j}"), "T0", "A0"))
            .collect();
        let reviewers: Vec<_> = (0..200)
            .map(|i| reviewer(&format!("R{i}"), "T0", "A0"))
            .collect();
        let factory = BranchAndBoundFactory::default();
        let output = ExactOptimizer::new(&factory)
            .general_pass(&proposals, &reviewers, 2, 1)
            .unwrap();

        assert_eq!(output.reports.len(), 1);
        assert!(matches!(
            output.reports[0].outcome,
            PageOutcome::Solved {
                status: SolveStatus::Optimal,
                ..
            }
        ));
        for p in &proposals {
            assert_eq!(output.assignment.reviewer_count(&p.id), 2);
        }
        assert!(output.assignment.workloads().values().all(|&load| load == 1));
        assert_eq!(output.assignment.pair_count(), 200);
    }

    #[test]
    fn test_general_pass_splits_budget_across_pages() {
        let proposals: Vec<_> = (0..4).map(|j| proposal(&format!("P{j}"), "T1", "A1")).collect();
        let reviewers = vec![reviewer("R1", "T1", "A1"), reviewer("R2", "T1", "A1")];
        let factory = BranchAndBoundFactory::default();
        let output = ExactOptimizer::new(&factory)
            .with_page_size(2)
            .general_pass(&proposals, &reviewers, 1, 2)
            .unwrap();

        assert_eq!(output.reports.len(), 2);
        assert!(output.reports.iter().all(|r| r.outcome.is_success()));
        assert_eq!(output.assignment.workload("R1"), 2);
        assert_eq!(output.assignment.workload("R2"), 2);
        for p in &proposals {
            assert_eq!(output.assignment.reviewer_count(&p.id), 1);
        }
    }

    #[test]
    fn test_zero_budget_page_infeasible() {
        let proposals: Vec<_> = (0..2).map(|j| proposal(&format!("P{j}"), "T1", "A1")).collect();
        let reviewers = vec![reviewer("R1", "T1", "A1")];
        let factory = BranchAndBoundFactory::default();
        let output = ExactOptimizer::new(&factory)
            .with_page_size(1)
            .general_pass(&proposals, &reviewers, 1, 1)
            .unwrap();

        assert!(output.reports[0].outcome.is_success());
        assert!(matches!(output.reports[1].outcome, PageOutcome::NoSolution { .. }));
        assert_eq!(output.assignment.workload("R1"), 1);
        assert!(output.success());
    }

    #[test]
    fn test_committee_pass_per_page_cap() {
        let proposals: Vec<_> = (0..5).map(|j| proposal(&format!("P{j}"), "T1", "A1")).collect();
        let committee = vec![reviewer("C1", "X", "Y"), reviewer("C2", "X", "Y")];
        let factory = BranchAndBoundFactory::default();
        let output = ExactOptimizer::new(&factory)
            .committee_pass(&proposals, &committee, 1)
            .unwrap();

        // cap = 2 + 5 / 2 = 4
        assert!(output.success());
        assert!(output.assignment.workload("C1") <= 4);
        assert!(output.assignment.workload("C2") <= 4);
        assert_eq!(output.assignment.pair_count(), 5);
        assert!(output.reports.iter().all(|r| r.pass == Pass::Committee));
    }

    #[test]
    fn test_solver_unavailable_reported() {
        let proposals = vec![proposal("P1", "T1", "A1")];
        let reviewers = vec![reviewer("R1", "T1", "A1")];
        let output = ExactOptimizer::new(&Unavailable)
            .general_pass(&proposals, &reviewers, 1, 1)
            .unwrap();
        assert!(!output.success());
        assert!(output.assignment.is_empty());
        assert!(matches!(
            output.reports[0].outcome,
            PageOutcome::SolverUnavailable { .. }
        ));
    }
}
