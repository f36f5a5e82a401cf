//! Read-only adjacency over the arcs of a directed network (component C1).
//!
//! Storage is structure-of-arrays: two parallel `i32`-width (stored as `u32`
//! node ids) vectors, `source[]` and `target[]`, one entry per arc. No
//! per-node adjacency list is built — every pivot rule in [`crate::pivot`]
//! scans the arc arrays directly, and the hot loop in
//! [`crate::solver::Solver::solve`] never needs anything richer than "given
//! an arc id, what are its endpoints". Keeping this contiguous and flat is
//! what makes those scans cache-friendly.
//!
//! No arcs may be added once a [`crate::solver::Solver`] has taken ownership
//! of the graph and `solve()` has been called.

use crate::error::SolverError;

/// A directed network's topology: node count plus a dense, append-only arc
/// list. Costs, bounds, and supplies are not stored here — see
/// [`crate::flow::FlowState`] and [`crate::solver::Solver`] — `Graph` only
/// ever answers "what are this arc's endpoints" and "how many nodes/arcs are
/// there".
#[derive(Debug, Clone, Default)]
pub struct Graph {
    node_count: u32,
    source: Vec<u32>,
    target: Vec<u32>,
}

impl Graph {
    /// Creates an empty graph over `node_count` nodes (ids `0..node_count`).
    /// Arcs are added afterwards with [`Graph::add_arc`].
    pub fn new(node_count: u32) -> Self {
        Self {
            node_count,
            source: Vec::new(),
            target: Vec::new(),
        }
    }

    /// Creates a graph with arc storage pre-allocated for `arc_count` arcs,
    /// to avoid reallocation while the caller populates it one arc at a time.
    pub fn with_capacity(node_count: u32, arc_count: u32) -> Self {
        Self {
            node_count,
            source: Vec::with_capacity(arc_count as usize),
            target: Vec::with_capacity(arc_count as usize),
        }
    }

    /// Appends a directed arc `from -> to` and returns its dense arc id.
    pub fn add_arc(&mut self, from: u32, to: u32) -> Result<u32, SolverError> {
        if from >= self.node_count {
            return Err(SolverError::InvalidNode(from, self.node_count));
        }
        if to >= self.node_count {
            return Err(SolverError::InvalidNode(to, self.node_count));
        }
        let id = self.source.len() as u32;
        self.source.push(from);
        self.target.push(to);
        Ok(id)
    }

    #[inline]
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    #[inline]
    pub fn arc_count(&self) -> u32 {
        self.source.len() as u32
    }

    #[inline]
    pub fn source(&self, arc: u32) -> u32 {
        self.source[arc as usize]
    }

    #[inline]
    pub fn target(&self, arc: u32) -> u32 {
        self.target[arc as usize]
    }

    pub fn nodes(&self) -> impl Iterator<Item = u32> {
        0..self.node_count
    }

    pub fn arcs(&self) -> impl Iterator<Item = u32> {
        0..self.arc_count()
    }

    pub(crate) fn validate_arc(&self, arc: u32) -> Result<(), SolverError> {
        if arc >= self.arc_count() {
            Err(SolverError::InvalidArc(arc, self.arc_count()))
        } else {
            Ok(())
        }
    }

    pub(crate) fn validate_node(&self, node: u32) -> Result<(), SolverError> {
        if node >= self.node_count {
            Err(SolverError::InvalidNode(node, self.node_count))
        } else {
            Ok(())
        }
    }

    /// Renders the real arcs (not the artificial root arcs added at solve
    /// time) as a Graphviz DOT document, for debugging. This is never on a
    /// hot path: it builds a throwaway `petgraph` graph purely to reuse
    /// `petgraph::dot::Dot`'s formatting.
    pub fn to_dot(&self) -> String {
        let mut pg = petgraph::graph::DiGraph::<u32, ()>::with_capacity(
            self.node_count as usize,
            self.arc_count() as usize,
        );
        let indices: Vec<_> = self.nodes().map(|n| pg.add_node(n)).collect();
        for arc in self.arcs() {
            pg.add_edge(
                indices[self.source(arc) as usize],
                indices[self.target(arc) as usize],
                (),
            );
        }
        format!("{:?}", petgraph::dot::Dot::new(&pg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_arc_assigns_dense_ids() {
        let mut g = Graph::new(3);
        assert_eq!(g.add_arc(0, 1).unwrap(), 0);
        assert_eq!(g.add_arc(1, 2).unwrap(), 1);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.arc_count(), 2);
        assert_eq!(g.source(1), 1);
        assert_eq!(g.target(1), 2);
    }

    #[test]
    fn add_arc_rejects_out_of_range_nodes() {
        let mut g = Graph::new(2);
        assert_eq!(
            g.add_arc(0, 5).unwrap_err(),
            SolverError::InvalidNode(5, 2)
        );
    }

    #[test]
    fn to_dot_contains_every_arc() {
        let mut g = Graph::new(2);
        g.add_arc(0, 1).unwrap();
        let dot = g.to_dot();
        assert!(dot.contains("digraph"));
    }
}
