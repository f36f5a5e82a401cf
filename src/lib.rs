//! Minimum-cost flow via the network simplex method.
//!
//! The crate is single-threaded and synchronous by design: a pivot loop is
//! inherently sequential (each pivot depends on the basis tree left by the
//! last one), so there is no async runtime or thread pool here — just a
//! cooperative [`cancellation::CancellationToken`] a caller can flip from
//! another thread to abort a running [`solver::Solver::solve`].
//!
//! Typical use:
//!
//! ```
//! use netsimplex_mcf::graph::Graph;
//! use netsimplex_mcf::solver::{Solver, SolverStatus};
//!
//! let mut graph = Graph::new(2);
//! let arc = graph.add_arc(0, 1).unwrap();
//! let mut solver = Solver::new(graph);
//! solver.set_node_supply(0, 5).unwrap();
//! solver.set_node_supply(1, -5).unwrap();
//! solver.set_arc_cost(arc, 1).unwrap();
//! solver.set_arc_bounds(arc, 0, 10).unwrap();
//!
//! assert_eq!(solver.solve().unwrap(), SolverStatus::Optimal);
//! assert_eq!(solver.get_total_cost(), 5);
//! ```

pub mod analyzer;
pub mod basis;
pub mod cancellation;
pub mod config;
pub mod error;
pub mod flow;
pub mod graph;
pub mod pivot;
pub mod solver;
pub mod validator;

pub use error::SolverError;
pub use graph::Graph;
pub use solver::{Solver, SolverStatus, SupplyMode};
