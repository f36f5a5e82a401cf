//! Problem analyzer (component C4).
//!
//! Scans the declared graph, supplies, costs, and bounds once before
//! `solve()` enters its hot loop and produces a read-only characteristics
//! bundle. [`crate::config`] turns that bundle into an [`crate::config::OptimizationConfig`];
//! nothing in this module mutates solver state.

use serde::Serialize;

/// Coarse shape of the instance, used by the config selector and useful on
/// its own for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProblemType {
    General,
    Circulation,
    Assignment,
    Transportation,
    Transshipment,
    TimeExpanded,
}

/// Read-only snapshot of structural properties of the problem, computed by
/// [`analyze`]. All fields are descriptive; none are used directly by the
/// solver's pivot loop, only by [`crate::config::select`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProblemCharacteristics {
    pub node_count: u32,
    pub arc_count: u32,
    pub density: f64,
    pub average_degree: f64,
    pub max_degree: u32,
    pub degree_cv: f64,
    pub source_count: u32,
    pub sink_count: u32,
    pub transshipment_count: u32,
    pub total_supply: i64,
    pub cost_cv: f64,
    pub finite_capacity_fraction: f64,
    pub problem_type: ProblemType,
    pub is_dense: bool,
    pub is_sparse: bool,
    pub has_uniform_costs: bool,
}

/// Per-node degree and supply-sign tallies gathered in a single arc scan,
/// the input to every rule in [`analyze`].
struct NodeStats {
    out_degree: Vec<u32>,
    in_degree: Vec<u32>,
}

fn node_stats(node_count: u32, sources: &[u32], targets: &[u32]) -> NodeStats {
    let mut out_degree = vec![0u32; node_count as usize];
    let mut in_degree = vec![0u32; node_count as usize];
    for (&s, &t) in sources.iter().zip(targets.iter()) {
        out_degree[s as usize] += 1;
        in_degree[t as usize] += 1;
    }
    NodeStats { out_degree, in_degree }
}

fn mean_and_cv(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    if mean == 0.0 {
        return (0.0, 0.0);
    }
    let variance = values.map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, variance.sqrt() / mean)
}

/// Computes the characteristics bundle from the graph's topology plus the
/// caller-supplied per-node supplies, per-arc costs, and per-arc upper
/// bounds. `upper` entries of `i64::MAX` are treated as infinite capacity.
pub fn analyze(
    node_count: u32,
    sources: &[u32],
    targets: &[u32],
    supplies: &[i64],
    costs: &[i64],
    upper: &[i64],
) -> ProblemCharacteristics {
    let arc_count = sources.len() as u32;
    let stats = node_stats(node_count, sources, targets);

    let degrees: Vec<u32> = (0..node_count as usize)
        .map(|v| stats.out_degree[v] + stats.in_degree[v])
        .collect();
    let (average_degree, degree_cv) = mean_and_cv(degrees.iter().map(|&d| d as f64));
    let max_degree = degrees.iter().copied().max().unwrap_or(0);

    let density = if node_count > 1 {
        arc_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    } else {
        0.0
    };

    let source_count = supplies.iter().filter(|&&s| s > 0).count() as u32;
    let sink_count = supplies.iter().filter(|&&s| s < 0).count() as u32;
    let transshipment_count = supplies.iter().filter(|&&s| s == 0).count() as u32;
    let total_supply: i64 = supplies.iter().filter(|&&s| s > 0).sum();

    let (_, cost_cv) = mean_and_cv(costs.iter().map(|&c| c as f64));
    let finite_capacity_fraction = if arc_count == 0 {
        1.0
    } else {
        upper.iter().filter(|&&u| u < i64::MAX).count() as f64 / arc_count as f64
    };

    let is_dense = density > 0.01 || arc_count > 10_000;
    let is_sparse = density < 0.005;
    let has_uniform_costs = cost_cv < 0.01;

    let one_directional_fraction = if node_count == 0 {
        0.0
    } else {
        (0..node_count as usize)
            .filter(|&v| stats.out_degree[v] == 0 || stats.in_degree[v] == 0)
            .count() as f64
            / node_count as f64
    };
    let is_bipartite_layout = one_directional_fraction >= 0.8;
    let max_abs_supply = supplies.iter().map(|&s| s.abs()).max().unwrap_or(0);

    let problem_type = if supplies.iter().all(|&s| s == 0) {
        ProblemType::Circulation
    } else if is_bipartite_layout && max_abs_supply == 1 && source_count == sink_count {
        ProblemType::Assignment
    } else if is_bipartite_layout && transshipment_count == 0 {
        ProblemType::Transportation
    } else if transshipment_count > 0 {
        if is_sparse && degree_cv < 0.3 {
            ProblemType::TimeExpanded
        } else {
            ProblemType::Transshipment
        }
    } else {
        ProblemType::General
    };

    ProblemCharacteristics {
        node_count,
        arc_count,
        density,
        average_degree,
        max_degree,
        degree_cv,
        source_count,
        sink_count,
        transshipment_count,
        total_supply,
        cost_cv,
        finite_capacity_fraction,
        problem_type,
        is_dense,
        is_sparse,
        has_uniform_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_supply_is_circulation() {
        let c = analyze(3, &[0, 1, 2], &[1, 2, 0], &[0, 0, 0], &[1, 1, -3], &[i64::MAX; 3]);
        assert_eq!(c.problem_type, ProblemType::Circulation);
    }

    #[test]
    fn bipartite_single_unit_supplies_is_assignment() {
        // nodes 0,1 are sources (out only), 2,3 are sinks (in only).
        let sources = [0, 0, 1, 1];
        let targets = [2, 3, 2, 3];
        let supplies = [1, 1, -1, -1];
        let c = analyze(4, &sources, &targets, &supplies, &[1, 2, 3, 4], &[10; 4]);
        assert_eq!(c.problem_type, ProblemType::Assignment);
    }

    #[test]
    fn density_and_sparsity_thresholds() {
        let n = 1000u32;
        let sources: Vec<u32> = (0..n - 1).collect();
        let targets: Vec<u32> = (1..n).collect();
        let supplies = vec![0i64; n as usize];
        let costs = vec![1i64; (n - 1) as usize];
        let upper = vec![i64::MAX; (n - 1) as usize];
        let c = analyze(n, &sources, &targets, &supplies, &costs, &upper);
        assert!(c.is_sparse);
        assert!(!c.is_dense);
    }
}
