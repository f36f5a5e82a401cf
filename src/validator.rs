//! Post-solve validator (component C8).
//!
//! Re-derives feasibility, complementary slackness, and the primal/dual
//! objective equality from a completed solve, independent of the pivot loop
//! that produced it. Any mismatch here is a bug in [`crate::solver`], never
//! in the caller's input — see spec.md §4.8.

use crate::basis::{ArcState, BasisStore};
use crate::flow::FlowState;
use crate::graph::Graph;

/// Everything [`validate`] checked, plus the numbers it computed along the
/// way so a failing check can be reported with context.
#[derive(Debug, Clone, Copy)]
pub struct ValidationReport {
    pub bounds_respected: bool,
    pub conservation_holds: bool,
    pub artificial_flow_is_zero: bool,
    pub complementary_slackness_holds: bool,
    pub primal_objective: i64,
    pub dual_objective: i64,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.bounds_respected
            && self.conservation_holds
            && self.artificial_flow_is_zero
            && self.complementary_slackness_holds
            && self.primal_objective == self.dual_objective
    }
}

/// Checks the invariants of spec.md §8 against a completed solve.
/// `supplies` is the caller's original per-node supply, the quantity the
/// real-plus-artificial flow must conserve to exactly at every node.
/// `adjusted_supply` is `s'(v)`, the supply after lower-bound elimination
/// computed at init time, needed separately by spec.md §4.8's dual formula.
pub fn validate(
    graph: &Graph,
    flow: &FlowState,
    basis: &BasisStore,
    supplies: &[i64],
    adjusted_supply: &[i64],
) -> ValidationReport {
    let n = graph.node_count();
    let m = graph.arc_count();

    let bounds_respected = (0..m).all(|a| {
        let f = flow.flow(a);
        flow.lower(a) <= f && f <= flow.upper(a)
    });

    let mut net_flow = vec![0i64; n as usize];
    for a in 0..m {
        let f = flow.flow(a);
        net_flow[graph.source(a) as usize] += f;
        net_flow[graph.target(a) as usize] -= f;
    }
    // A cycle pivot pushes flow around a closed loop, so it never changes a
    // node's real-plus-artificial net flow: that sum stays pinned to the
    // caller's original supply from initialization onward.
    let conservation_holds = (0..n).all(|v| {
        let v = v as usize;
        net_flow[v] + artificial_net(flow, graph, v as u32) == supplies[v]
    });

    let artificial_flow_is_zero = (m..m + n).all(|a| flow.flow(a) == 0);

    let complementary_slackness_holds = (0..m).all(|a| {
        let r = flow.reduced_cost(a);
        match basis.state(a) {
            ArcState::Tree => r == 0,
            ArcState::Lower => r >= 0,
            ArcState::Upper => r <= 0,
        }
    });

    let primal_objective = flow.real_arc_cost(m);
    let dual_objective = dual_objective(graph, flow, adjusted_supply);

    ValidationReport {
        bounds_respected,
        conservation_holds,
        artificial_flow_is_zero,
        complementary_slackness_holds,
        primal_objective,
        dual_objective,
    }
}

/// Net contribution of node `v`'s single artificial arc: positive if it
/// exports to the root, negative if the root imports into it.
fn artificial_net(flow: &FlowState, graph: &Graph, v: u32) -> i64 {
    let m = graph.arc_count();
    let arc = m + v;
    if flow.source(arc) == v {
        flow.flow(arc)
    } else {
        -flow.flow(arc)
    }
}

/// `D = -Σ s'(v)·π(v) + Σ ℓ(a)·c(a) - Σ (u(a)-ℓ(a))·max(0, -r(a))` over real
/// arcs (spec.md §4.8).
fn dual_objective(graph: &Graph, flow: &FlowState, adjusted_supply: &[i64]) -> i64 {
    let n = graph.node_count();
    let m = graph.arc_count();

    let supply_term: i64 = (0..n).map(|v| adjusted_supply[v as usize] * flow.potential(v)).sum();
    let lower_cost_term: i64 = (0..m).map(|a| flow.lower(a) * flow.cost(a)).sum();
    let slack_term: i64 = (0..m)
        .map(|a| {
            let width = flow.upper(a).saturating_sub(flow.lower(a));
            let slack = (-flow.reduced_cost(a)).max(0);
            width.saturating_mul(slack)
        })
        .sum();

    -supply_term + lower_cost_term - slack_term
}

#[cfg(test)]
mod tests {
    use super::Graph;
    use crate::solver::{Solver, SolverStatus};

    #[test]
    fn two_node_line_validates_cleanly() {
        let mut graph = Graph::new(2);
        graph.add_arc(0, 1).unwrap();
        let mut solver = Solver::new(graph);
        solver.set_node_supply(0, 5).unwrap();
        solver.set_node_supply(1, -5).unwrap();
        solver.set_arc_cost(0, 1).unwrap();
        solver.set_arc_bounds(0, 0, 10).unwrap();
        assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);

        let report = solver.validate().expect("solved");
        assert!(report.bounds_respected);
        assert!(report.artificial_flow_is_zero);
        assert!(report.complementary_slackness_holds);
        assert_eq!(report.primal_objective, report.dual_objective);
        assert!(report.is_valid());
    }

    #[test]
    fn negative_cycle_instance_validates_cleanly() {
        let mut graph = Graph::new(3);
        let a01 = graph.add_arc(0, 1).unwrap();
        let a12 = graph.add_arc(1, 2).unwrap();
        let a20 = graph.add_arc(2, 0).unwrap();
        let mut solver = Solver::new(graph);
        for a in [a01, a12, a20] {
            solver.set_arc_cost(a, -1).unwrap();
            solver.set_arc_bounds(a, 0, 1).unwrap();
        }
        assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);

        let report = solver.validate().expect("solved");
        assert!(report.is_valid());
    }
}
