//! Min-cost-flow path for assignment-shaped models.
//!
//! A binary model is a transportation problem when every row has unit
//! coefficients and the rows, grouped by their variable sets, split into two
//! sides with each variable in at most one group per side. Such a model is
//! solved exactly as a min-cost flow with lower bounds:
//!
//! | Model | Network |
//! |-------|---------|
//! | Left group, bounds `[lo, hi]` | `s → g`: `lo` units at cost `-M`, `hi - lo` at cost 0 |
//! | Right group, bounds `[lo, hi]` | The same arcs, `g → t` |
//! | Variable `x` with weight `w` | Arc `left(x) → right(x)`, capacity 1, cost `-w` |
//! | Variable in a single group | The missing side is an uncapacitated dummy node |
//! | Row `Σ x = 0` | Its variables are fixed at 0 |
//!
//! `M` exceeds the total absolute weight, so a min-cost flow fills every
//! lower bound before trading any weight. The model is infeasible exactly
//! when some lower-bound arc stays unsaturated. Flows are integral, so the
//! optimal flow is an optimal 0/1 solution.
//!
//! Models without this shape report [`Presolve::NotNetwork`] and go to the
//! tree search.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9 (successive shortest paths)

use std::collections::{BTreeMap, VecDeque};

use super::branch_bound::Row;
use super::Comparison;

const EPS: f64 = 1e-9;

const SOURCE: usize = 0;
const SINK: usize = 1;
const LEFT_DUMMY: usize = 2;
const RIGHT_DUMMY: usize = 3;
const FIRST_GROUP: usize = 4;

/// Result of the network path.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Presolve {
    /// The model is not a transportation problem.
    NotNetwork,
    /// Some group bound cannot be met.
    Infeasible,
    /// Optimal values, one per variable.
    Optimal(Vec<i64>),
}

/// Rows sharing one variable set, with their merged bounds.
struct Group {
    members: Vec<usize>,
    lo: i64,
    hi: i64,
}

/// Solves the model as a min-cost flow if it has transportation shape.
///
/// `weights` are maximization weights (already negated for minimization).
pub(super) fn solve_network(
    rows: &[Row],
    weights: &[f64],
    lower: &[i64],
    upper: &[i64],
) -> Presolve {
    let n = weights.len();
    if (0..n).any(|v| lower[v] != 0 || upper[v] != 1)
        || rows
            .iter()
            .any(|row| row.terms.iter().any(|&(_, c)| (c - 1.0).abs() > EPS))
    {
        return Presolve::NotNetwork;
    }

    let mut fixed = vec![false; n];
    for row in rows {
        if row.cmp == Comparison::Equal && row.rhs.abs() < EPS {
            for &(v, _) in &row.terms {
                fixed[v] = true;
            }
        }
    }

    let mut bounds: BTreeMap<Vec<usize>, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let members: Vec<usize> = row
            .terms
            .iter()
            .map(|&(v, _)| v)
            .filter(|&v| !fixed[v])
            .collect();
        let size = members.len() as i64;
        let (lo, hi) = bounds.entry(members).or_insert((0, size));
        let floor = (row.rhs + EPS).floor() as i64;
        let ceil = (row.rhs - EPS).ceil() as i64;
        match row.cmp {
            Comparison::LessEq => *hi = (*hi).min(floor),
            Comparison::GreaterEq => *lo = (*lo).max(ceil),
            Comparison::Equal => {
                *hi = (*hi).min(floor);
                *lo = (*lo).max(ceil);
            }
        }
    }

    let mut groups = Vec::new();
    for (members, (lo, hi)) in bounds {
        if lo > hi {
            return Presolve::Infeasible;
        }
        if !members.is_empty() {
            groups.push(Group { members, lo, hi });
        }
    }

    let mut var_groups: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (g, group) in groups.iter().enumerate() {
        for &v in &group.members {
            var_groups[v].push(g);
            if var_groups[v].len() > 2 {
                return Presolve::NotNetwork;
            }
        }
    }

    let Some(right_side) = two_color(groups.len(), &var_groups) else {
        return Presolve::NotNetwork;
    };

    let big = 1.0 + weights.iter().map(|w| w.abs()).sum::<f64>();
    let unbounded = n as i64;
    let mut graph = FlowGraph::new(FIRST_GROUP + groups.len());
    graph.add_arc(SOURCE, LEFT_DUMMY, unbounded, 0.0);
    graph.add_arc(RIGHT_DUMMY, SINK, unbounded, 0.0);

    let mut required = Vec::new();
    for (g, group) in groups.iter().enumerate() {
        let node = FIRST_GROUP + g;
        let (from, to) = if right_side[g] {
            (node, SINK)
        } else {
            (SOURCE, node)
        };
        if group.lo > 0 {
            required.push((graph.add_arc(from, to, group.lo, -big), group.lo));
        }
        if group.hi > group.lo {
            graph.add_arc(from, to, group.hi - group.lo, 0.0);
        }
    }

    let mut values = vec![0; n];
    let mut var_arcs = Vec::new();
    for v in (0..n).filter(|&v| !fixed[v]) {
        let (tail, head) = match var_groups[v][..] {
            [] => {
                values[v] = i64::from(weights[v] > 0.0);
                continue;
            }
            [g] if right_side[g] => (LEFT_DUMMY, FIRST_GROUP + g),
            [g] => (FIRST_GROUP + g, RIGHT_DUMMY),
            [a, b] if right_side[a] => (FIRST_GROUP + b, FIRST_GROUP + a),
            [a, b] => (FIRST_GROUP + a, FIRST_GROUP + b),
            _ => return Presolve::NotNetwork,
        };
        var_arcs.push((v, graph.add_arc(tail, head, 1, -weights[v])));
    }

    graph.min_cost_flow(SOURCE, SINK);

    if required.iter().any(|&(arc, lo)| graph.flow(arc) < lo) {
        return Presolve::Infeasible;
    }
    for (v, arc) in var_arcs {
        values[v] = graph.flow(arc);
    }
    Presolve::Optimal(values)
}

/// Splits groups into two sides so no variable joins two groups on one side.
///
/// Returns `None` when the group graph has an odd cycle.
fn two_color(group_count: usize, var_groups: &[Vec<usize>]) -> Option<Vec<bool>> {
    let mut adjacent: Vec<Vec<usize>> = vec![Vec::new(); group_count];
    for groups in var_groups {
        if let [a, b] = groups[..] {
            adjacent[a].push(b);
            adjacent[b].push(a);
        }
    }

    let mut side: Vec<Option<bool>> = vec![None; group_count];
    for root in 0..group_count {
        if side[root].is_some() {
            continue;
        }
        side[root] = Some(false);
        let mut queue = VecDeque::from([root]);
        while let Some(g) = queue.pop_front() {
            let right = side[g] == Some(true);
            for &h in &adjacent[g] {
                match side[h] {
                    None => {
                        side[h] = Some(!right);
                        queue.push_back(h);
                    }
                    Some(s) if s == right => return None,
                    Some(_) => {}
                }
            }
        }
    }
    Some(side.into_iter().map(|s| s == Some(true)).collect())
}

/// Residual graph; arc `a ^ 1` is the reverse of arc `a`.
struct FlowGraph {
    adjacency: Vec<Vec<usize>>,
    head: Vec<usize>,
    capacity: Vec<i64>,
    cost: Vec<f64>,
}

impl FlowGraph {
    fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            head: Vec::new(),
            capacity: Vec::new(),
            cost: Vec::new(),
        }
    }

    fn add_arc(&mut self, from: usize, to: usize, capacity: i64, cost: f64) -> usize {
        let arc = self.head.len();
        self.adjacency[from].push(arc);
        self.head.push(to);
        self.capacity.push(capacity);
        self.cost.push(cost);
        self.adjacency[to].push(arc + 1);
        self.head.push(from);
        self.capacity.push(0);
        self.cost.push(-cost);
        arc
    }

    fn flow(&self, arc: usize) -> i64 {
        self.capacity[arc ^ 1]
    }

    fn tail(&self, arc: usize) -> usize {
        self.head[arc ^ 1]
    }

    /// Bellman-Ford distances from `source`; unreachable nodes get 0.
    fn initial_potentials(&self, source: usize) -> Vec<f64> {
        let nodes = self.adjacency.len();
        let mut dist = vec![f64::INFINITY; nodes];
        dist[source] = 0.0;
        for _ in 0..nodes {
            let mut changed = false;
            for u in 0..nodes {
                if !dist[u].is_finite() {
                    continue;
                }
                for &arc in &self.adjacency[u] {
                    let v = self.head[arc];
                    if self.capacity[arc] > 0 && dist[u] + self.cost[arc] < dist[v] - EPS {
                        dist[v] = dist[u] + self.cost[arc];
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist.into_iter()
            .map(|d| if d.is_finite() { d } else { 0.0 })
            .collect()
    }

    /// Successive shortest paths until no path has negative cost.
    fn min_cost_flow(&mut self, source: usize, sink: usize) {
        let nodes = self.adjacency.len();
        let mut potential = self.initial_potentials(source);
        loop {
            let mut dist = vec![f64::INFINITY; nodes];
            let mut via: Vec<Option<usize>> = vec![None; nodes];
            let mut done = vec![false; nodes];
            dist[source] = 0.0;

            loop {
                let next = (0..nodes)
                    .filter(|&v| !done[v] && dist[v].is_finite())
                    .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
                let Some(u) = next else {
                    break;
                };
                done[u] = true;
                for &arc in &self.adjacency[u] {
                    let v = self.head[arc];
                    if self.capacity[arc] <= 0 || done[v] {
                        continue;
                    }
                    let reduced = (self.cost[arc] + potential[u] - potential[v]).max(0.0);
                    if dist[u] + reduced < dist[v] {
                        dist[v] = dist[u] + reduced;
                        via[v] = Some(arc);
                    }
                }
            }

            if !dist[sink].is_finite() {
                break;
            }
            let path_cost = dist[sink] + potential[sink] - potential[source];
            if path_cost >= -EPS {
                break;
            }
            for v in 0..nodes {
                if dist[v].is_finite() {
                    potential[v] += dist[v];
                }
            }

            let mut path = Vec::new();
            let mut node = sink;
            while let Some(arc) = via[node] {
                path.push(arc);
                node = self.tail(arc);
            }
            let push = path
                .iter()
                .map(|&arc| self.capacity[arc])
                .min()
                .unwrap_or(0);
            if push == 0 {
                break;
            }
            for &arc in &path {
                self.capacity[arc] -= push;
                self.capacity[arc ^ 1] += push;
            }
        }
    }
}
