use criterion::{black_box, criterion_group, criterion_main, Criterion};

use netsimplex_mcf::graph::Graph;
use netsimplex_mcf::pivot::PivotRuleKind;
use netsimplex_mcf::solver::Solver;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A random bipartite transportation instance: `sources` supply nodes each
/// connected to every one of `sinks` demand nodes, costs and capacities drawn
/// from a fixed seed so runs are comparable across pivot rules.
fn transportation_instance(sources: u32, sinks: u32, seed: u64) -> Solver {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = sources + sinks;
    let mut graph = Graph::with_capacity(n, sources * sinks);
    let mut costs = Vec::with_capacity((sources * sinks) as usize);

    for s in 0..sources {
        for d in 0..sinks {
            graph.add_arc(s, sources + d).unwrap();
            costs.push(rng.random_range(1..100));
        }
    }

    let mut solver = Solver::new(graph);
    let per_source = 100;
    for s in 0..sources {
        solver.set_node_supply(s, per_source).unwrap();
    }
    for d in 0..sinks {
        solver.set_node_supply(sources + d, -per_source * sources as i64 / sinks as i64).unwrap();
    }
    for (a, cost) in costs.into_iter().enumerate() {
        solver.set_arc_cost(a as u32, cost).unwrap();
        solver.set_arc_bounds(a as u32, 0, per_source * sources as i64).unwrap();
    }
    solver
}

fn pivot_rule_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("transportation_20x20");
    for kind in [
        PivotRuleKind::FirstEligible,
        PivotRuleKind::BestEligible,
        PivotRuleKind::BlockSearch,
        PivotRuleKind::CandidateList,
    ] {
        group.bench_function(format!("{kind:?}"), |b| {
            b.iter(|| {
                let mut solver = transportation_instance(20, 20, 42);
                solver.set_auto_configuration(false);
                solver.set_pivot_rule(kind);
                let status = solver.solve().unwrap();
                black_box(status);
            })
        });
    }
    group.finish();
}

fn auto_configuration_overhead(c: &mut Criterion) {
    c.bench_function("transportation_20x20_auto", |b| {
        b.iter(|| {
            let mut solver = transportation_instance(20, 20, 42);
            let status = solver.solve().unwrap();
            black_box(status);
        })
    });
}

fn all_benchmarks(c: &mut Criterion) {
    pivot_rule_comparison(c);
    auto_configuration_overhead(c);
}

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
