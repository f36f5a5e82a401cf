use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use netsimplex_mcf::graph::Graph;
use netsimplex_mcf::{Solver, SolverStatus};

/// One arc literal: `(from, to, lower, upper, cost)`.
pub type ArcSpec = (u32, u32, i64, i64, i64);

static TRACING_INIT: Once = Once::new();

/// Installs a tree-formatted tracing subscriber the first time it is called;
/// later calls are no-ops. Run `MCF_VERBOSE=1 RUST_LOG=debug cargo test --
/// --nocapture` to see pivot-level traces while a scenario test runs.
pub fn init_logger() {
    TRACING_INIT.call_once(|| {
        let tree_layer = tracing_tree::HierarchicalLayer::new(2)
            .with_bracketed_fields(true)
            .with_deferred_spans(false)
            .with_wraparound(25)
            .with_indent_lines(true)
            .with_timer(tracing_tree::time::Uptime::default())
            .with_thread_names(false)
            .with_thread_ids(false)
            .with_targets(false);

        tracing_subscriber::registry()
            .with(tree_layer)
            .with(EnvFilter::from_default_env())
            .init();
    });
}

/// Builds a solver from node supplies and arc specs in one call, the shape
/// every scenario test in this crate is stated in (spec.md §8).
pub fn build(supplies: &[i64], arcs: &[ArcSpec]) -> Solver {
    init_logger();
    let mut graph = Graph::with_capacity(supplies.len() as u32, arcs.len() as u32);
    let mut ids = Vec::with_capacity(arcs.len());
    for &(from, to, ..) in arcs {
        ids.push(graph.add_arc(from, to).unwrap());
    }

    let mut solver = Solver::new(graph);
    for (v, &supply) in supplies.iter().enumerate() {
        solver.set_node_supply(v as u32, supply).unwrap();
    }
    for (&id, &(_, _, lower, upper, cost)) in ids.iter().zip(arcs) {
        solver.set_arc_bounds(id, lower, upper).unwrap();
        solver.set_arc_cost(id, cost).unwrap();
    }
    solver
}

/// Solves and asserts the status, returning the solver for further
/// inspection (flows, cost, validation report).
pub fn solve_expecting(solver: &mut Solver, expected: SolverStatus) {
    let status = solver.solve().expect("solve() should not error for a well-formed instance");
    assert_eq!(status, expected);
}
