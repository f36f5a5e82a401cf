//! Big-M initialization: artificial arcs, the star basis, and initial
//! potentials (spec.md §4.7 "Initialization").

use crate::basis::BasisStore;
use crate::error::SolverError;
use crate::flow::FlowState;
use crate::graph::Graph;

use super::SupplyMode;

pub struct Initialization {
    pub flow: FlowState,
    pub basis: BasisStore,
    pub big_m: i64,
    /// Supply after lower-bound elimination, `s'(v)` in spec.md §4.8 —
    /// needed again by the validator's dual-objective formula.
    pub adjusted_supply: Vec<i64>,
}

/// Builds the artificial-arc extension of `graph`, the initial star basis,
/// and initial potentials so every artificial arc has reduced cost zero.
pub fn initialize(
    graph: &Graph,
    costs: &[i64],
    lower: &[i64],
    upper: &[i64],
    supplies: &[i64],
    supply_mode: SupplyMode,
) -> Result<Initialization, SolverError> {
    let n = graph.node_count();
    let m = graph.arc_count();
    let root = n;
    let total_arcs = m + n;
    let total_nodes = n + 1;

    let big_m = compute_big_m(costs, n, m)?;

    let mut flow = FlowState::new(total_arcs, total_nodes);
    for a in 0..m {
        flow.set_arc(
            a,
            graph.source(a),
            graph.target(a),
            lower[a as usize],
            upper[a as usize],
            costs[a as usize],
        );
    }

    // Net flow each node already carries once every real arc sits at its
    // lower bound; the artificial arc only needs to absorb what's left.
    let mut lower_bound_balance = vec![0i64; n as usize];
    for a in 0..m {
        let s = graph.source(a) as usize;
        let t = graph.target(a) as usize;
        lower_bound_balance[s] += lower[a as usize];
        lower_bound_balance[t] -= lower[a as usize];
    }

    let mut adjusted_supply = vec![0i64; n as usize];
    let mut artificial_arcs = vec![0u32; n as usize];
    let mut from_root = vec![false; n as usize];
    for v in 0..n {
        let s_prime = supplies[v as usize] - lower_bound_balance[v as usize];
        adjusted_supply[v as usize] = s_prime;
        let arc = m + v;
        artificial_arcs[v as usize] = arc;

        if s_prime >= 0 {
            // v -> root, absorbs a surplus.
            let cap = if supply_mode == SupplyMode::Leq { i64::MAX } else { s_prime };
            flow.set_arc(arc, v, root, 0, cap, big_m);
            flow.set_flow(arc, s_prime);
            from_root[v as usize] = false;
        } else {
            // root -> v, covers a deficit.
            let cap = if supply_mode == SupplyMode::Geq { i64::MAX } else { -s_prime };
            flow.set_arc(arc, root, v, 0, cap, big_m);
            flow.set_flow(arc, -s_prime);
            from_root[v as usize] = true;
        }
    }

    let mut basis = BasisStore::new(n, total_arcs);
    basis.init_star(&artificial_arcs, &from_root);

    flow.set_potential(root, 0);
    for v in 0..n {
        let pi = if adjusted_supply[v as usize] >= 0 { -big_m } else { big_m };
        flow.set_potential(v, pi);
    }

    Ok(Initialization {
        flow,
        basis,
        big_m,
        adjusted_supply,
    })
}

/// `Big-M` must strictly dominate any real-arc cost path (spec.md §4.7: "a
/// 'Big-M' strictly larger than `1 + (n + m) * max|c|`") while staying far
/// enough from `i64::MAX` that `cost * flow` accumulations elsewhere in the
/// solver cannot overflow (§4.7 failure semantics: `<= INT64_MAX / (1 + m)`).
fn compute_big_m(costs: &[i64], n: u32, m: u32) -> Result<i64, SolverError> {
    let max_abs_cost = costs.iter().map(|c| c.unsigned_abs()).max().unwrap_or(0);
    let span = (n as u128 + m as u128) * max_abs_cost as u128;
    let big_m = span + 2;
    let overflow_bound = (i64::MAX as u128) / (1 + m as u128);

    if big_m > i64::MAX as u128 || big_m > overflow_bound {
        return Err(SolverError::NumericOverflow {
            max_abs_cost: max_abs_cost as i64,
            n,
            m,
        });
    }
    Ok(big_m as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_node_line_has_zero_reduced_cost_on_artificial_arcs() {
        let mut graph = Graph::new(2);
        graph.add_arc(0, 1).unwrap();
        let init = initialize(
            &graph,
            &[1],
            &[0],
            &[10],
            &[5, -5],
            SupplyMode::Geq,
        )
        .unwrap();
        // artificial arcs are index 1 (node 0) and 2 (node 1).
        assert_eq!(init.flow.reduced_cost(1), 0);
        assert_eq!(init.flow.reduced_cost(2), 0);
        assert_eq!(init.adjusted_supply, vec![5, -5]);
    }

    #[test]
    fn oversized_costs_are_rejected_as_overflow() {
        let mut graph = Graph::new(2);
        graph.add_arc(0, 1).unwrap();
        let err = initialize(&graph, &[i64::MAX / 2], &[0], &[10], &[0, 0], SupplyMode::Geq)
            .unwrap_err();
        assert!(matches!(err, SolverError::NumericOverflow { .. }));
    }
}
