//! Arc flows and node potentials (component C3).
//!
//! Both are stored as flat parallel arrays, one entry per arc (flows, plus
//! `cost`/`lower`/`upper`) or per node (potentials), matching the
//! structure-of-arrays layout of [`crate::graph::Graph`] and
//! [`crate::basis::BasisStore`].

use crate::basis::ArcState;

/// Flows, costs, and bounds for every arc (real arcs first, then one
/// artificial arc per real node), plus potentials for every node including
/// the artificial root.
#[derive(Debug, Clone)]
pub struct FlowState {
    flow: Vec<i64>,
    cost: Vec<i64>,
    lower: Vec<i64>,
    upper: Vec<i64>,
    potential: Vec<i64>,
    source: Vec<u32>,
    target: Vec<u32>,
}

impl FlowState {
    pub fn new(total_arc_count: u32, total_node_count: u32) -> Self {
        Self {
            flow: vec![0; total_arc_count as usize],
            cost: vec![0; total_arc_count as usize],
            lower: vec![0; total_arc_count as usize],
            upper: vec![0; total_arc_count as usize],
            potential: vec![0; total_node_count as usize],
            source: vec![0; total_arc_count as usize],
            target: vec![0; total_arc_count as usize],
        }
    }

    pub fn set_arc(&mut self, arc: u32, source: u32, target: u32, lower: i64, upper: i64, cost: i64) {
        let a = arc as usize;
        self.source[a] = source;
        self.target[a] = target;
        self.lower[a] = lower;
        self.upper[a] = upper;
        self.cost[a] = cost;
        self.flow[a] = lower;
    }

    #[inline]
    pub fn source(&self, arc: u32) -> u32 {
        self.source[arc as usize]
    }

    #[inline]
    pub fn target(&self, arc: u32) -> u32 {
        self.target[arc as usize]
    }

    #[inline]
    pub fn flow(&self, arc: u32) -> i64 {
        self.flow[arc as usize]
    }

    #[inline]
    pub fn set_flow(&mut self, arc: u32, value: i64) {
        self.flow[arc as usize] = value;
    }

    #[inline]
    pub fn add_flow(&mut self, arc: u32, delta: i64) {
        self.flow[arc as usize] += delta;
    }

    #[inline]
    pub fn cost(&self, arc: u32) -> i64 {
        self.cost[arc as usize]
    }

    #[inline]
    pub fn lower(&self, arc: u32) -> i64 {
        self.lower[arc as usize]
    }

    #[inline]
    pub fn upper(&self, arc: u32) -> i64 {
        self.upper[arc as usize]
    }

    #[inline]
    pub fn residual_to_upper(&self, arc: u32) -> i64 {
        self.upper[arc as usize] - self.flow[arc as usize]
    }

    #[inline]
    pub fn residual_to_lower(&self, arc: u32) -> i64 {
        self.flow[arc as usize] - self.lower[arc as usize]
    }

    #[inline]
    pub fn potential(&self, node: u32) -> i64 {
        self.potential[node as usize]
    }

    #[inline]
    pub fn set_potential(&mut self, node: u32, value: i64) {
        self.potential[node as usize] = value;
    }

    #[inline]
    pub fn add_potential(&mut self, node: u32, delta: i64) {
        self.potential[node as usize] += delta;
    }

    /// `r(a) = cost[a] + potential[source[a]] - potential[target[a]]`
    /// (spec.md §4.3). Zero for every tree arc at all times (I5).
    #[inline]
    pub fn reduced_cost(&self, arc: u32) -> i64 {
        let a = arc as usize;
        self.cost[a] + self.potential[self.source[a] as usize] - self.potential[self.target[a] as usize]
    }

    /// True iff a non-tree arc's reduced cost has the sign that lets it
    /// improve the objective if it enters the basis: `state(a) * r(a) < 0`,
    /// the single uniform predicate spec.md §4.3 uses for both bound sides.
    #[inline]
    pub fn is_eligible(&self, arc: u32, state: ArcState) -> bool {
        match state {
            ArcState::Tree => false,
            ArcState::Lower => self.reduced_cost(arc) < 0,
            ArcState::Upper => self.reduced_cost(arc) > 0,
        }
    }

    /// `|state(a) * r(a)|`, the magnitude used to rank eligible arcs against
    /// each other (best-eligible and candidate-list pivoting).
    #[inline]
    pub fn eligibility_magnitude(&self, arc: u32, state: ArcState) -> i64 {
        match state {
            ArcState::Tree => 0,
            ArcState::Lower => -self.reduced_cost(arc).min(0),
            ArcState::Upper => self.reduced_cost(arc).max(0),
        }
    }

    pub fn total_cost(&self) -> i64 {
        self.flow
            .iter()
            .zip(self.cost.iter())
            .map(|(f, c)| f * c)
            .sum()
    }

    /// Cost of the first `real_arc_count` arcs only, excluding the
    /// artificial arcs appended after them — what callers actually mean by
    /// "the objective".
    pub fn real_arc_cost(&self, real_arc_count: u32) -> i64 {
        (0..real_arc_count).map(|a| self.flow(a) * self.cost(a)).sum()
    }
}
