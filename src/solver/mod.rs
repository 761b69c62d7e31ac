//! Integer-programming solver abstraction.
//!
//! The exact optimizer builds its model through the [`Solver`] trait only,
//! so any backend (an in-memory search, an open-source MIP library, a
//! commercial engine) can be plugged in through a [`SolverFactory`].
//!
//! [`BranchAndBoundSolver`] is the bundled backend: an exact depth-first
//! branch-and-bound over bounded integer variables, with a min-cost-flow
//! path for transportation-shaped binary models.
//!
//! # Example
//!
//! ```
//! use review_assign::solver::{
//!     BranchAndBoundSolver, Comparison, LinearExpr, Sense, SolveStatus, Solver,
//! };
//!
//! let mut solver = BranchAndBoundSolver::new();
//! let x = solver.int_var(0, 1, "x").unwrap();
//! let y = solver.int_var(0, 1, "y").unwrap();
//! solver
//!     .add_constraint(LinearExpr::sum([x, y]), Comparison::LessEq, 1.0)
//!     .unwrap();
//! solver
//!     .set_objective(LinearExpr::new().term(x, 2.0).term(y, 3.0), Sense::Maximize)
//!     .unwrap();
//!
//! assert_eq!(solver.solve(), SolveStatus::Optimal);
//! assert_eq!(solver.value(y), Some(1.0));
//! ```

mod branch_bound;
mod network;

pub use branch_bound::{BranchAndBoundFactory, BranchAndBoundSolver};

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Handle to a decision variable inside one solver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(usize);

impl Var {
    /// Creates a handle from a raw index. Backends use this when allocating.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw index of the variable.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A linear expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(Var, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit-coefficient sum of variables.
    pub fn sum<I: IntoIterator<Item = Var>>(vars: I) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    /// Adds a term (builder form).
    pub fn term(mut self, var: Var, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Adds a term in place.
    pub fn add_term(&mut self, var: Var, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Adds a constant offset.
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant += constant;
        self
    }

    /// The terms in insertion order (duplicates not merged).
    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    /// The constant offset.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression with the given variable values.
    pub fn evaluate<F: Fn(Var) -> f64>(&self, value: F) -> f64 {
        self.constant + self.terms.iter().map(|&(v, c)| c * value(v)).sum::<f64>()
    }
}

impl FromIterator<(Var, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (Var, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `expr ≤ rhs`
    LessEq,
    /// `expr ≥ rhs`
    GreaterEq,
    /// `expr = rhs`
    Equal,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    /// Maximize the objective.
    #[default]
    Maximize,
    /// Minimize the objective.
    Minimize,
}

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// Feasible solution without an optimality proof (search budget exhausted).
    Feasible,
    /// The model has no feasible solution.
    Infeasible,
    /// The search stopped before finding any feasible solution.
    NotSolved,
}

impl SolveStatus {
    /// Whether a usable solution is available (OPTIMAL or FEASIBLE).
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// An integer-programming backend.
///
/// Mirrors the usual MIP modelling API: create variables, add linear
/// constraints, set an objective, solve, then read status and values.
pub trait Solver {
    /// Backend name (for logs).
    fn backend_name(&self) -> &str;

    /// Creates an integer variable with inclusive bounds.
    fn int_var(&mut self, lower: i64, upper: i64, name: &str) -> Result<Var, SolverError>;

    /// Creates a 0/1 variable.
    fn bool_var(&mut self, name: &str) -> Result<Var, SolverError> {
        self.int_var(0, 1, name)
    }

    /// Adds `expr (cmp) rhs`.
    fn add_constraint(
        &mut self,
        expr: LinearExpr,
        cmp: Comparison,
        rhs: f64,
    ) -> Result<(), SolverError>;

    /// Replaces the objective.
    fn set_objective(&mut self, expr: LinearExpr, sense: Sense) -> Result<(), SolverError>;

    /// Solves the model.
    fn solve(&mut self) -> SolveStatus;

    /// Value of a variable in the last solution, if any.
    fn value(&self, var: Var) -> Option<f64>;

    /// Objective value of the last solution, if any.
    fn objective_value(&self) -> Option<f64>;

    /// Number of variables in the model.
    fn variable_count(&self) -> usize;

    /// Number of constraints in the model.
    fn constraint_count(&self) -> usize;
}

/// Creates fresh solver instances, one per page.
///
/// Returning [`SolverError::Unavailable`] signals a configuration problem
/// (backend missing or unreachable) rather than an infeasible model.
pub trait SolverFactory {
    /// Solver type produced by this factory.
    type Solver: Solver;

    /// Creates an empty solver.
    fn create(&self) -> Result<Self::Solver, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_expr_builder() {
        let a = Var::from_index(0);
        let b = Var::from_index(1);
        let expr = LinearExpr::new().term(a, 2.0).term(b, -1.0).with_constant(3.0);
        assert_eq!(expr.len(), 2);
        assert!(!expr.is_empty());
        assert!((expr.constant() - 3.0).abs() < 1e-10);
        let value = expr.evaluate(|v| if v == a { 1.0 } else { 4.0 });
        assert!((value - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_expr_sum() {
        let vars = (0..3).map(Var::from_index);
        let expr = LinearExpr::sum(vars);
        assert_eq!(expr.len(), 3);
        assert!(expr.terms().iter().all(|&(_, c)| (c - 1.0).abs() < 1e-10));
    }

    #[test]
    fn test_status_has_solution() {
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::NotSolved.has_solution());
    }
}
