//! Error types for the solver's public API.
//!
//! Following spec.md §7: argument errors ([`SolverError`]) surface
//! synchronously from mutation calls, while algorithmic outcomes
//! (infeasible/unbounded/iteration-limit) are reported as [`SolverStatus`]
//! values returned from `solve()`, never as an `Err`.

use crate::cancellation::CancellationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("node id {0} is out of range for a graph with {1} nodes")]
    InvalidNode(u32, u32),
    #[error("arc id {0} is out of range for a graph with {1} arcs")]
    InvalidArc(u32, u32),
    #[error("arc bounds invalid: lower ({lower}) must be <= upper ({upper})")]
    InvalidBounds { lower: i64, upper: i64 },
    #[error("cannot mutate the instance after solve() has been called; call reset() first")]
    AlreadySolved,
    #[error("big-M cost would overflow i64 arithmetic for this instance (max |cost| = {max_abs_cost}, n = {n}, m = {m})")]
    NumericOverflow {
        max_abs_cost: i64,
        n: u32,
        m: u32,
    },
    #[error("solve() was cancelled: {0}")]
    Cancelled(#[from] CancellationError),
}
