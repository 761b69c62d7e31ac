//! Depth-first branch-and-bound for bounded integer programs.
//!
//! # Algorithm
//!
//! 1. Bound propagation over every linear row tightens variable domains
//!    (activity-based presolve; rows such as `Σ x·inc = 0` fix variables
//!    at the root).
//! 2. Branch on the free variable with the largest objective weight,
//!    trying its upper bound first, then the rest of its domain.
//! 3. Prune a node when its optimistic bound cannot beat the incumbent.
//!    The bound sums the best weights each `Σ x ≤ k` cardinality row can
//!    still admit, which is tight for assignment-shaped models.
//!
//! The search is exact. When the node budget runs out it stops and reports
//! [`SolveStatus::Feasible`] if an incumbent exists, otherwise
//! [`SolveStatus::NotSolved`].
//!
//! Before searching, binary models with transportation shape (unit rows
//! forming a bipartite structure, as the reviewer assignment model does) are
//! solved as a min-cost flow, which is exact at any page size and uses no
//! nodes. See `network.rs`.
//!
//! # Reference
//! Achterberg (2007), "Constraint Integer Programming", Ch. 7 (domain propagation)

use std::collections::{BTreeMap, VecDeque};

use super::network::{solve_network, Presolve};
use super::{Comparison, LinearExpr, Sense, SolveStatus, Solver, SolverFactory, Var};
use crate::config::DEFAULT_NODE_LIMIT;
use crate::error::SolverError;

const EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub(super) struct Row {
    pub(super) terms: Vec<(usize, f64)>,
    pub(super) cmp: Comparison,
    pub(super) rhs: f64,
}

/// Bundled exact backend.
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    names: Vec<String>,
    lower: Vec<i64>,
    upper: Vec<i64>,
    rows: Vec<Row>,
    objective: Vec<(usize, f64)>,
    objective_constant: f64,
    sense: Sense,
    node_limit: u64,
    network: bool,
    nodes: u64,
    solution: Option<Vec<i64>>,
}

impl BranchAndBoundSolver {
    /// Creates an empty model with the default node budget.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            lower: Vec::new(),
            upper: Vec::new(),
            rows: Vec::new(),
            objective: Vec::new(),
            objective_constant: 0.0,
            sense: Sense::Maximize,
            node_limit: DEFAULT_NODE_LIMIT,
            network: true,
            nodes: 0,
            solution: None,
        }
    }

    /// Sets the node budget.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Enables or disables the min-cost-flow path (enabled by default).
    pub fn with_network_presolve(mut self, enabled: bool) -> Self {
        self.network = enabled;
        self
    }

    /// Nodes explored by the last solve.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes
    }

    /// Name given to a variable at creation.
    pub fn var_name(&self, var: Var) -> Option<&str> {
        self.names.get(var.index()).map(String::as_str)
    }

    fn check_var(&self, var: Var) -> Result<usize, SolverError> {
        let index = var.index();
        if index < self.names.len() {
            Ok(index)
        } else {
            Err(SolverError::UnknownVariable { index })
        }
    }

    /// Merges duplicate variables and drops zero coefficients.
    fn compact(&self, expr: &LinearExpr) -> Result<Vec<(usize, f64)>, SolverError> {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for &(var, coef) in expr.terms() {
            let index = self.check_var(var)?;
            *merged.entry(index).or_insert(0.0) += coef;
        }
        Ok(merged.into_iter().filter(|&(_, c)| c.abs() > EPS).collect())
    }
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for BranchAndBoundSolver {
    fn backend_name(&self) -> &str {
        "branch-and-bound"
    }

    fn int_var(&mut self, lower: i64, upper: i64, name: &str) -> Result<Var, SolverError> {
        if lower > upper {
            return Err(SolverError::InvalidBounds {
                name: name.to_string(),
                lower,
                upper,
            });
        }
        let var = Var::from_index(self.names.len());
        self.names.push(name.to_string());
        self.lower.push(lower);
        self.upper.push(upper);
        Ok(var)
    }

    fn add_constraint(
        &mut self,
        expr: LinearExpr,
        cmp: Comparison,
        rhs: f64,
    ) -> Result<(), SolverError> {
        let terms = self.compact(&expr)?;
        self.rows.push(Row {
            terms,
            cmp,
            rhs: rhs - expr.constant(),
        });
        Ok(())
    }

    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) -> Result<(), SolverError> {
        self.objective = self.compact(&expr)?;
        self.objective_constant = expr.constant();
        self.sense = sense;
        Ok(())
    }

    fn solve(&mut self) -> SolveStatus {
        let mut weights = vec![0.0; self.names.len()];
        for &(index, coef) in &self.objective {
            weights[index] = match self.sense {
                Sense::Maximize => coef,
                Sense::Minimize => -coef,
            };
        }

        if self.network {
            match solve_network(&self.rows, &weights, &self.lower, &self.upper) {
                Presolve::Optimal(values) => {
                    self.nodes = 0;
                    self.solution = Some(values);
                    return SolveStatus::Optimal;
                }
                Presolve::Infeasible => {
                    self.nodes = 0;
                    self.solution = None;
                    return SolveStatus::Infeasible;
                }
                Presolve::NotNetwork => {}
            }
        }

        let mut search = Search::new(
            &self.rows,
            weights,
            &self.lower,
            &self.upper,
            self.node_limit,
        );
        search.run();
        self.nodes = search.nodes;

        let status = match (&search.best, search.exhausted) {
            (Some(_), false) => SolveStatus::Optimal,
            (Some(_), true) => SolveStatus::Feasible,
            (None, false) => SolveStatus::Infeasible,
            (None, true) => SolveStatus::NotSolved,
        };
        self.solution = search.best.map(|(_, values)| values);
        status
    }

    fn value(&self, var: Var) -> Option<f64> {
        self.solution
            .as_ref()
            .and_then(|values| values.get(var.index()))
            .map(|&v| v as f64)
    }

    fn objective_value(&self) -> Option<f64> {
        let values = self.solution.as_ref()?;
        let total: f64 = self
            .objective
            .iter()
            .map(|&(index, coef)| coef * values[index] as f64)
            .sum();
        Some(self.objective_constant + total)
    }

    fn variable_count(&self) -> usize {
        self.names.len()
    }

    fn constraint_count(&self) -> usize {
        self.rows.len()
    }
}

/// Factory for [`BranchAndBoundSolver`]. Never unavailable.
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBoundFactory {
    /// Node budget given to each solver.
    pub node_limit: u64,
}

impl BranchAndBoundFactory {
    /// Creates a factory with the given node budget.
    pub fn new(node_limit: u64) -> Self {
        Self { node_limit }
    }
}

impl Default for BranchAndBoundFactory {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_LIMIT)
    }
}

impl SolverFactory for BranchAndBoundFactory {
    type Solver = BranchAndBoundSolver;

    fn create(&self) -> Result<BranchAndBoundSolver, SolverError> {
        Ok(BranchAndBoundSolver::new().with_node_limit(self.node_limit))
    }
}

/// A `Σ x ≤ k` row used to bound the objective of its member variables.
struct Cover {
    row: usize,
    /// Positive-weight binary variables charged to this row, best first.
    members: Vec<usize>,
}

struct Frame {
    var: usize,
    value: i64,
    mark: usize,
    alternative: bool,
}

struct Search<'a> {
    rows: &'a [Row],
    weights: Vec<f64>,
    var_rows: Vec<Vec<usize>>,
    lb: Vec<i64>,
    ub: Vec<i64>,
    trail: Vec<(usize, i64, i64)>,
    order: Vec<usize>,
    covers: Vec<Cover>,
    uncovered: Vec<usize>,
    best: Option<(f64, Vec<i64>)>,
    nodes: u64,
    node_limit: u64,
    exhausted: bool,
}

impl<'a> Search<'a> {
    fn new(
        rows: &'a [Row],
        weights: Vec<f64>,
        lower: &[i64],
        upper: &[i64],
        node_limit: u64,
    ) -> Self {
        let n = weights.len();
        let mut var_rows = vec![Vec::new(); n];
        for (r, row) in rows.iter().enumerate() {
            for &(v, _) in &row.terms {
                var_rows[v].push(r);
            }
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));

        // Charge each positive-weight binary variable to its tightest cardinality row.
        let is_cardinality = |row: &Row| {
            matches!(row.cmp, Comparison::LessEq | Comparison::Equal)
                && row.terms.iter().all(|&(_, c)| (c - 1.0).abs() < EPS)
        };
        let mut charged: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        let mut uncovered = Vec::new();
        for v in 0..n {
            let binary = lower[v] == 0 && upper[v] == 1;
            let cover = if binary && weights[v] > 0.0 {
                var_rows[v]
                    .iter()
                    .copied()
                    .filter(|&r| is_cardinality(&rows[r]))
                    .min_by(|&a, &b| rows[a].rhs.total_cmp(&rows[b].rhs).then(a.cmp(&b)))
            } else {
                None
            };
            match cover {
                Some(r) => charged.entry(r).or_default().push(v),
                None => uncovered.push(v),
            }
        }
        let covers = charged
            .into_iter()
            .map(|(row, mut members)| {
                members.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
                Cover { row, members }
            })
            .collect();

        Self {
            rows,
            weights,
            var_rows,
            lb: lower.to_vec(),
            ub: upper.to_vec(),
            trail: Vec::new(),
            order,
            covers,
            uncovered,
            best: None,
            nodes: 0,
            node_limit,
            exhausted: false,
        }
    }

    fn run(&mut self) {
        if !self.propagate((0..self.rows.len()).collect()) {
            return;
        }

        let mut stack: Vec<Frame> = Vec::new();
        let mut consistent = true;
        loop {
            if consistent {
                self.nodes += 1;
                if self.nodes > self.node_limit {
                    self.exhausted = true;
                    return;
                }
                if !self.can_improve() {
                    consistent = false;
                    continue;
                }
                match self.branch_var() {
                    None => {
                        self.record_incumbent();
                        consistent = false;
                    }
                    Some(var) => {
                        let value = self.ub[var];
                        stack.push(Frame {
                            var,
                            value,
                            mark: self.trail.len(),
                            alternative: false,
                        });
                        consistent = self.set_bounds(var, value, self.ub[var])
                            && self.propagate(self.var_rows[var].iter().copied().collect());
                    }
                }
                continue;
            }

            // Backtrack to the most recent branch with an untried alternative.
            loop {
                let Some(frame) = stack.pop() else {
                    return;
                };
                self.undo(frame.mark);
                if !frame.alternative {
                    let var = frame.var;
                    let value = frame.value;
                    stack.push(Frame {
                        alternative: true,
                        ..frame
                    });
                    consistent = self.set_bounds(var, self.lb[var], value - 1)
                        && self.propagate(self.var_rows[var].iter().copied().collect());
                    break;
                }
            }
        }
    }

    fn can_improve(&self) -> bool {
        match &self.best {
            None => true,
            Some((incumbent, _)) => self.bound() > incumbent + EPS * incumbent.abs().max(1.0),
        }
    }

    /// Optimistic objective over the current domains.
    fn bound(&self) -> f64 {
        let mut total = 0.0;
        for &v in &self.uncovered {
            let w = self.weights[v];
            total += (w * self.lb[v] as f64).max(w * self.ub[v] as f64);
        }
        for cover in &self.covers {
            let row = &self.rows[cover.row];
            let used: f64 = row.terms.iter().map(|&(v, _)| self.lb[v] as f64).sum();
            let mut room = ((row.rhs - used) + EPS).floor().max(0.0) as usize;
            for &v in &cover.members {
                if self.lb[v] >= 1 {
                    total += self.weights[v];
                } else if self.ub[v] >= 1 && room > 0 {
                    total += self.weights[v];
                    room -= 1;
                }
            }
        }
        total
    }

    fn branch_var(&self) -> Option<usize> {
        self.order.iter().copied().find(|&v| self.lb[v] < self.ub[v])
    }

    fn record_incumbent(&mut self) {
        let values = self.lb.clone();
        let feasible = self.rows.iter().all(|row| {
            let activity: f64 = row.terms.iter().map(|&(v, c)| c * values[v] as f64).sum();
            match row.cmp {
                Comparison::LessEq => activity <= row.rhs + EPS,
                Comparison::GreaterEq => activity >= row.rhs - EPS,
                Comparison::Equal => (activity - row.rhs).abs() <= EPS,
            }
        });
        if !feasible {
            return;
        }
        let objective: f64 = values
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * x as f64)
            .sum();
        let improves = match &self.best {
            None => true,
            Some((incumbent, _)) => objective > *incumbent + EPS,
        };
        if improves {
            self.best = Some((objective, values));
        }
    }

    /// Narrows `var` to `[lower, upper]` (intersected with its domain).
    fn set_bounds(&mut self, var: usize, lower: i64, upper: i64) -> bool {
        let new_lb = self.lb[var].max(lower);
        let new_ub = self.ub[var].min(upper);
        if new_lb != self.lb[var] || new_ub != self.ub[var] {
            self.trail.push((var, self.lb[var], self.ub[var]));
            self.lb[var] = new_lb;
            self.ub[var] = new_ub;
        }
        new_lb <= new_ub
    }

    fn undo(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((var, lb, ub)) = self.trail.pop() {
                self.lb[var] = lb;
                self.ub[var] = ub;
            }
        }
    }

    /// Activity-based bound propagation until fixpoint.
    fn propagate(&mut self, initial: Vec<usize>) -> bool {
        let mut queued = vec![false; self.rows.len()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        for r in initial {
            if !queued[r] {
                queued[r] = true;
                queue.push_back(r);
            }
        }

        while let Some(r) = queue.pop_front() {
            queued[r] = false;
            let rows = self.rows;
            let row = &rows[r];

            let (mut min_act, mut max_act) = (0.0, 0.0);
            for &(v, c) in &row.terms {
                let (lo, hi) = (c * self.lb[v] as f64, c * self.ub[v] as f64);
                min_act += lo.min(hi);
                max_act += lo.max(hi);
            }

            let check_upper = matches!(row.cmp, Comparison::LessEq | Comparison::Equal);
            let check_lower = matches!(row.cmp, Comparison::GreaterEq | Comparison::Equal);
            if check_upper && min_act > row.rhs + EPS {
                return false;
            }
            if check_lower && max_act < row.rhs - EPS {
                return false;
            }

            for &(v, c) in &row.terms {
                let (old_lb, old_ub) = (self.lb[v], self.ub[v]);
                let span = (old_ub - old_lb) as f64;
                let mut lower = old_lb;
                let mut upper = old_ub;

                if check_upper {
                    let slack = row.rhs - min_act;
                    let step = (slack / c.abs() + EPS).floor();
                    if step < span {
                        if c > 0.0 {
                            upper = upper.min(old_lb + step as i64);
                        } else {
                            lower = lower.max(old_ub - step as i64);
                        }
                    }
                }
                if check_lower {
                    let slack = max_act - row.rhs;
                    let step = (slack / c.abs() + EPS).floor();
                    if step < span {
                        if c > 0.0 {
                            lower = lower.max(old_ub - step as i64);
                        } else {
                            upper = upper.min(old_lb + step as i64);
                        }
                    }
                }

                if lower != old_lb || upper != old_ub {
                    if !self.set_bounds(v, lower, upper) {
                        return false;
                    }
                    for &next in &self.var_rows[v] {
                        if !queued[next] {
                            queued[next] = true;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bools(solver: &mut BranchAndBoundSolver, n: usize) -> Vec<Var> {
        (0..n)
            .map(|i| solver.bool_var(&format!("x{i}")).unwrap())
            .collect()
    }

    #[test]
    fn test_knapsack_optimal() {
        // max 10a + 13b + 7c s.t. 4a + 6b + 3c <= 7
        let mut solver = BranchAndBoundSolver::new();
        let x = bools(&mut solver, 3);
        solver
            .add_constraint(
                LinearExpr::new().term(x[0], 4.0).term(x[1], 6.0).term(x[2], 3.0),
                Comparison::LessEq,
                7.0,
            )
            .unwrap();
        solver
            .set_objective(
                LinearExpr::new().term(x[0], 10.0).term(x[1], 13.0).term(x[2], 7.0),
                Sense::Maximize,
            )
            .unwrap();

        assert_eq!(solver.solve(), SolveStatus::Optimal);
        // a + c = 17 beats b alone = 13
        assert_eq!(solver.value(x[0]), Some(1.0));
        assert_eq!(solver.value(x[1]), Some(0.0));
        assert_eq!(solver.value(x[2]), Some(1.0));
        assert!((solver.objective_value().unwrap() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible() {
        let mut solver = BranchAndBoundSolver::new();
        let x = bools(&mut solver, 2);
        solver
            .add_constraint(LinearExpr::sum(x.clone()), Comparison::GreaterEq, 3.0)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Infeasible);
        assert_eq!(solver.value(x[0]), None);
        assert_eq!(solver.objective_value(), None);
    }

    #[test]
    fn test_equality_forces_zero() {
        let mut solver = BranchAndBoundSolver::new();
        let x = bools(&mut solver, 3);
        solver
            .add_constraint(
                LinearExpr::new().term(x[0], 1.0).term(x[1], 0.0).term(x[2], 1.0),
                Comparison::Equal,
                0.0,
            )
            .unwrap();
        solver
            .set_objective(LinearExpr::sum(x.clone()), Sense::Maximize)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert_eq!(solver.value(x[0]), Some(0.0));
        assert_eq!(solver.value(x[1]), Some(1.0));
        assert_eq!(solver.value(x[2]), Some(0.0));
    }

    #[test]
    fn test_minimize_with_cover() {
        // min 3a + 2b + 4c s.t. a + b + c >= 2
        let mut solver = BranchAndBoundSolver::new();
        let x = bools(&mut solver, 3);
        solver
            .add_constraint(LinearExpr::sum(x.clone()), Comparison::GreaterEq, 2.0)
            .unwrap();
        solver
            .set_objective(
                LinearExpr::new().term(x[0], 3.0).term(x[1], 2.0).term(x[2], 4.0),
                Sense::Minimize,
            )
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert!((solver.objective_value().unwrap() - 5.0).abs() < 1e-9);
        assert_eq!(solver.value(x[2]), Some(0.0));
    }

    #[test]
    fn test_general_integer_domain() {
        // max x + y s.t. 2x + 3y <= 12, x in [0, 4], y in [0, 5]
        let mut solver = BranchAndBoundSolver::new();
        let x = solver.int_var(0, 4, "x").unwrap();
        let y = solver.int_var(0, 5, "y").unwrap();
        solver
            .add_constraint(
                LinearExpr::new().term(x, 2.0).term(y, 3.0),
                Comparison::LessEq,
                12.0,
            )
            .unwrap();
        solver
            .set_objective(LinearExpr::sum([x, y]), Sense::Maximize)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        // x = 4, y = 1 → 5 (x = 3, y = 2 also gives 5)
        assert!((solver.objective_value().unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_assignment_shape() {
        // 2 workers, 2 tasks, each task exactly one worker, each worker at most one task.
        // reward[w][t]: w0 prefers t1 (5 vs 1), w1 indifferent (3, 3).
        let reward = [[1.0, 5.0], [3.0, 3.0]];
        let mut solver = BranchAndBoundSolver::new();
        let mut x = [[Var::from_index(0); 2]; 2];
        for (w, row) in x.iter_mut().enumerate() {
            for (t, cell) in row.iter_mut().enumerate() {
                *cell = solver.bool_var(&format!("x[{w},{t}]")).unwrap();
            }
        }
        for row in &x {
            solver
                .add_constraint(LinearExpr::sum(row.iter().copied()), Comparison::LessEq, 1.0)
                .unwrap();
        }
        for t in 0..2 {
            solver
                .add_constraint(LinearExpr::sum([x[0][t], x[1][t]]), Comparison::Equal, 1.0)
                .unwrap();
        }
        let objective = (0..2)
            .flat_map(|w| (0..2).map(move |t| (w, t)))
            .map(|(w, t)| (x[w][t], reward[w][t]))
            .collect();
        solver.set_objective(objective, Sense::Maximize).unwrap();

        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert_eq!(solver.value(x[0][1]), Some(1.0));
        assert_eq!(solver.value(x[1][0]), Some(1.0));
        assert!((solver.objective_value().unwrap() - 8.0).abs() < 1e-9);
        assert_eq!(solver.variable_count(), 4);
        assert_eq!(solver.constraint_count(), 4);
    }

    #[test]
    fn test_node_limit_feasible() {
        // The first dive (6 branches + 1 leaf) finds the incumbent; the
        // budget runs out while closing the remaining branches.
        let mut solver = BranchAndBoundSolver::new()
            .with_node_limit(8)
            .with_network_presolve(false);
        let x = bools(&mut solver, 12);
        solver
            .add_constraint(LinearExpr::sum(x.clone()), Comparison::LessEq, 6.0)
            .unwrap();
        let objective = x.iter().enumerate().map(|(i, &v)| (v, (i % 3) as f64 + 1.0)).collect();
        solver.set_objective(objective, Sense::Maximize).unwrap();

        assert_eq!(solver.solve(), SolveStatus::Feasible);
        // Four weight-3 and two weight-2 variables
        assert!((solver.objective_value().unwrap() - 16.0).abs() < 1e-9);
        assert_eq!(solver.nodes_explored(), 9);
    }

    #[test]
    fn test_node_limit_zero_not_solved() {
        let mut solver = BranchAndBoundSolver::new()
            .with_node_limit(0)
            .with_network_presolve(false);
        let x = bools(&mut solver, 2);
        solver
            .set_objective(LinearExpr::sum(x), Sense::Maximize)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::NotSolved);
    }

    #[test]
    fn test_invalid_bounds() {
        let mut solver = BranchAndBoundSolver::new();
        let err = solver.int_var(2, 1, "bad").unwrap_err();
        assert!(matches!(err, SolverError::InvalidBounds { .. }));
    }

    #[test]
    fn test_unknown_variable() {
        let mut solver = BranchAndBoundSolver::new();
        let err = solver
            .add_constraint(
                LinearExpr::new().term(Var::from_index(5), 1.0),
                Comparison::LessEq,
                1.0,
            )
            .unwrap_err();
        assert_eq!(err, SolverError::UnknownVariable { index: 5 });
    }

    #[test]
    fn test_empty_model() {
        let mut solver = BranchAndBoundSolver::new();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert_eq!(solver.objective_value(), Some(0.0));
    }

    #[test]
    fn test_constant_offset() {
        let mut solver = BranchAndBoundSolver::new();
        let x = solver.bool_var("x").unwrap();
        // x + 1 <= 1  →  x = 0
        solver
            .add_constraint(
                LinearExpr::new().term(x, 1.0).with_constant(1.0),
                Comparison::LessEq,
                1.0,
            )
            .unwrap();
        solver
            .set_objective(LinearExpr::new().term(x, 1.0).with_constant(2.0), Sense::Maximize)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert_eq!(solver.value(x), Some(0.0));
        assert_eq!(solver.objective_value(), Some(2.0));
        assert_eq!(solver.var_name(x), Some("x"));
    }

    fn assignment_model(
        solver: &mut BranchAndBoundSolver,
        workers: usize,
        tasks: usize,
        per_task: f64,
        per_worker: f64,
        reward: impl Fn(usize, usize) -> f64,
    ) -> Vec<Var> {
        let x: Vec<Var> = (0..workers * tasks)
            .map(|k| solver.bool_var(&format!("x{k}")).unwrap())
            .collect();
        for w in 0..workers {
            let row = x[w * tasks..(w + 1) * tasks].iter().copied();
            solver
                .add_constraint(LinearExpr::sum(row), Comparison::LessEq, per_worker)
                .unwrap();
        }
        for t in 0..tasks {
            let column = (0..workers).map(|w| x[w * tasks + t]);
            solver
                .add_constraint(LinearExpr::sum(column), Comparison::GreaterEq, per_task)
                .unwrap();
        }
        let objective = (0..workers)
            .flat_map(|w| (0..tasks).map(move |t| (w, t)))
            .map(|(w, t)| (x[w * tasks + t], reward(w, t)))
            .collect();
        solver.set_objective(objective, Sense::Maximize).unwrap();
        x
    }

    #[test]
    fn test_network_path_page_scale() {
        // 200 workers at most one task each, 100 tasks at least two workers
        let mut solver = BranchAndBoundSolver::new();
        let x = assignment_model(&mut solver, 200, 100, 2.0, 1.0, |_, _| 200.0);

        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert_eq!(solver.nodes_explored(), 0);
        for t in 0..100 {
            let covered = (0..200)
                .filter(|&w| solver.value(x[w * 100 + t]) == Some(1.0))
                .count();
            assert_eq!(covered, 2);
        }
        assert!((solver.objective_value().unwrap() - 40_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_network_path_infeasible_cover() {
        // 3 workers with one task each cannot give 2 tasks two workers
        let mut solver = BranchAndBoundSolver::new();
        assignment_model(&mut solver, 3, 2, 2.0, 1.0, |_, _| 1.0);
        assert_eq!(solver.solve(), SolveStatus::Infeasible);
        assert_eq!(solver.objective_value(), None);
    }

    #[test]
    fn test_network_path_matches_search() {
        let reward = |w: usize, t: usize| ((w * 7 + t * 3) % 5) as f64 + 1.0;

        let mut flow = BranchAndBoundSolver::new();
        assignment_model(&mut flow, 4, 3, 1.0, 1.0, reward);
        let mut search = BranchAndBoundSolver::new().with_network_presolve(false);
        assignment_model(&mut search, 4, 3, 1.0, 1.0, reward);

        assert_eq!(flow.solve(), SolveStatus::Optimal);
        assert_eq!(search.solve(), SolveStatus::Optimal);
        assert!(search.nodes_explored() > 0);
        let best = search.objective_value().unwrap();
        assert!((flow.objective_value().unwrap() - best).abs() < 1e-9);
    }

    #[test]
    fn test_odd_cycle_uses_search() {
        // Pairwise exclusions on three variables are not bipartite
        let mut solver = BranchAndBoundSolver::new();
        let x = bools(&mut solver, 3);
        for (a, b) in [(0, 1), (1, 2), (0, 2)] {
            solver
                .add_constraint(LinearExpr::sum([x[a], x[b]]), Comparison::LessEq, 1.0)
                .unwrap();
        }
        solver
            .set_objective(LinearExpr::sum(x.clone()), Sense::Maximize)
            .unwrap();
        assert_eq!(solver.solve(), SolveStatus::Optimal);
        assert!(solver.nodes_explored() > 0);
        assert!((solver.objective_value().unwrap() - 1.0).abs() < 1e-9);
    }
}
