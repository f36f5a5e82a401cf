//! Stands in for the DIMACS `netgen 8_10a` fixture (1024 nodes, 8192 arcs)
//! referenced in spec.md §8: that exact generator output isn't vendored into
//! this crate, so this builds a comparably sized random instance from a
//! fixed seed and checks the universal invariants instead of a literal
//! expected objective.
mod support;

use netsimplex_mcf::graph::Graph;
use netsimplex_mcf::{Solver, SolverStatus};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn netgen_scale_instance_solves_and_validates() {
    let mut rng = StdRng::seed_from_u64(810);
    let node_count = 1024u32;
    let source_count = 32u32;
    let per_source_supply = 2000i64;

    // One high-capacity direct arc per source/sink pair guarantees a
    // feasible solution exists regardless of what the random filler arcs
    // below look like; they only ever add cheaper alternatives to explore.
    let mut graph = Graph::with_capacity(node_count, 8192);
    let mut costs = Vec::with_capacity(8192);
    let mut uppers = Vec::with_capacity(8192);
    for i in 0..source_count {
        graph.add_arc(i, node_count - source_count + i).unwrap();
        costs.push(1000i64);
        uppers.push(per_source_supply);
    }

    let filler_arc_count = 8192 - source_count;
    for _ in 0..filler_arc_count {
        let from = rng.random_range(0..node_count);
        let mut to = rng.random_range(0..node_count);
        while to == from {
            to = rng.random_range(0..node_count);
        }
        graph.add_arc(from, to).unwrap();
        costs.push(rng.random_range(1..1000));
        uppers.push(rng.random_range(10..500));
    }

    let arc_count = graph.arc_count();
    let mut solver = Solver::new(graph);
    for v in 0..source_count {
        solver.set_node_supply(v, per_source_supply).unwrap();
    }
    for v in (node_count - source_count)..node_count {
        solver.set_node_supply(v, -per_source_supply).unwrap();
    }
    for a in 0..arc_count {
        solver.set_arc_cost(a, costs[a as usize]).unwrap();
        solver.set_arc_bounds(a, 0, uppers[a as usize]).unwrap();
    }

    let status = solver.solve().unwrap();
    assert_eq!(status, SolverStatus::Optimal);

    let report = solver.validate().expect("solved");
    assert!(report.is_valid());
}
