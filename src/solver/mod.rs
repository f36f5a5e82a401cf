//! The simplex driver (component C7): owns the instance's mutable state and
//! the public solver API of spec.md §6.

mod augment;
mod init;

use std::num::NonZeroU32;

use serde::Serialize;

use crate::analyzer::{self, ProblemCharacteristics};
use crate::basis::{ArcState, BasisStore};
use crate::cancellation::{CancellationToken, DEFAULT_CHECK_CADENCE};
use crate::config::{self, OptimizationConfig, OptimizationFlags};
use crate::error::SolverError;
use crate::flow::FlowState;
use crate::graph::Graph;
use crate::pivot::{EligibilityView, PivotRule, PivotRuleKind};
use crate::validator::{self, ValidationReport};

/// Whether undersatisfaction or oversatisfaction of the declared supplies is
/// tolerated (spec.md §4.7 "Supply modes"). `Geq` is the default and, for a
/// balanced instance, behaves exactly like the conventional equality-MCF
/// formulation since there is no slack to exploit either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SupplyMode {
    #[default]
    Geq,
    Leq,
}

/// Outcome of `solve()` (spec.md §4.7 "Termination statuses"). The
/// iteration-limit safety cap folds into `NotSolved`, per the same section's
/// explicit wording, rather than a separate status variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SolverStatus {
    #[default]
    NotSolved,
    Optimal,
    Infeasible,
    Unbounded,
}

/// Everything produced by a completed (or attempted) `solve()` call, kept
/// around so `get_flow`/`get_potential`/`get_total_cost` don't have to
/// recompute anything.
struct RuntimeState {
    flow: FlowState,
    basis: BasisStore,
    adjusted_supply: Vec<i64>,
    #[allow(dead_code)] // surfaced for diagnostics only, not read by the driver itself
    big_m: i64,
}

/// A minimum-cost flow instance: topology plus the per-node/per-arc
/// quantities the caller fills in before calling [`Solver::solve`].
pub struct Solver {
    graph: Graph,
    supplies: Vec<i64>,
    costs: Vec<i64>,
    lower: Vec<i64>,
    upper: Vec<i64>,
    supply_mode: SupplyMode,
    pivot_rule_override: Option<PivotRuleKind>,
    auto_configuration: bool,
    cancellation: CancellationToken,
    verbose: bool,
    solved: bool,
    status: SolverStatus,
    runtime: Option<RuntimeState>,
}

impl Solver {
    /// Builds a solver over `graph`'s topology. Supplies default to 0, costs
    /// to 0, bounds to `[0, ∞)` — a circulation with free capacity until the
    /// caller narrows it down.
    pub fn new(graph: Graph) -> Self {
        let n = graph.node_count() as usize;
        let m = graph.arc_count() as usize;
        Self {
            graph,
            supplies: vec![0; n],
            costs: vec![0; m],
            lower: vec![0; m],
            upper: vec![i64::MAX; m],
            supply_mode: SupplyMode::default(),
            pivot_rule_override: None,
            auto_configuration: true,
            cancellation: CancellationToken::new(),
            verbose: std::env::var("MCF_VERBOSE").as_deref() == Ok("1"),
            solved: false,
            status: SolverStatus::NotSolved,
            runtime: None,
        }
    }

    fn ensure_not_solved(&self) -> Result<(), SolverError> {
        if self.solved {
            Err(SolverError::AlreadySolved)
        } else {
            Ok(())
        }
    }

    pub fn set_node_supply(&mut self, node: u32, supply: i64) -> Result<(), SolverError> {
        self.ensure_not_solved()?;
        self.graph.validate_node(node)?;
        self.supplies[node as usize] = supply;
        Ok(())
    }

    pub fn set_arc_cost(&mut self, arc: u32, cost: i64) -> Result<(), SolverError> {
        self.ensure_not_solved()?;
        self.graph.validate_arc(arc)?;
        self.costs[arc as usize] = cost;
        Ok(())
    }

    pub fn set_arc_bounds(&mut self, arc: u32, lower: i64, upper: i64) -> Result<(), SolverError> {
        self.ensure_not_solved()?;
        self.graph.validate_arc(arc)?;
        if lower > upper {
            return Err(SolverError::InvalidBounds { lower, upper });
        }
        self.lower[arc as usize] = lower;
        self.upper[arc as usize] = upper;
        Ok(())
    }

    pub fn set_supply_type(&mut self, mode: SupplyMode) {
        self.supply_mode = mode;
    }

    pub fn set_pivot_rule(&mut self, kind: PivotRuleKind) {
        self.pivot_rule_override = Some(kind);
    }

    pub fn set_auto_configuration(&mut self, enabled: bool) {
        self.auto_configuration = enabled;
    }

    /// A clone of the token `solve()` checks every [`DEFAULT_CHECK_CADENCE`]
    /// pivots; call `.cancel()` on it from another thread to abort a running
    /// `solve()`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Read-only structural analysis of the instance as currently
    /// configured (spec.md §4.4). Safe to call before or after `solve()`.
    pub fn analyze_problem(&self) -> ProblemCharacteristics {
        let sources: Vec<u32> = self.graph.arcs().map(|a| self.graph.source(a)).collect();
        let targets: Vec<u32> = self.graph.arcs().map(|a| self.graph.target(a)).collect();
        analyzer::analyze(
            self.graph.node_count(),
            &sources,
            &targets,
            &self.supplies,
            &self.costs,
            &self.upper,
        )
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// Clears the solution so the instance can be mutated and re-solved.
    pub fn reset(&mut self) {
        self.solved = false;
        self.status = SolverStatus::NotSolved;
        self.runtime = None;
    }

    pub fn get_flow(&self, arc: u32) -> Result<i64, SolverError> {
        self.graph.validate_arc(arc)?;
        Ok(match &self.runtime {
            Some(rt) => rt.flow.flow(arc),
            None => self.lower[arc as usize],
        })
    }

    pub fn get_potential(&self, node: u32) -> Result<i64, SolverError> {
        self.graph.validate_node(node)?;
        Ok(match &self.runtime {
            Some(rt) => rt.flow.potential(node),
            None => 0,
        })
    }

    pub fn get_total_cost(&self) -> i64 {
        match &self.runtime {
            Some(rt) => rt.flow.real_arc_cost(self.graph.arc_count()),
            None => 0,
        }
    }

    /// Re-derives feasibility, complementary slackness, and primal/dual
    /// objective equality from the completed solve (component C8). `None`
    /// before the first `solve()` call.
    pub fn validate(&self) -> Option<ValidationReport> {
        let rt = self.runtime.as_ref()?;
        Some(validator::validate(
            &self.graph,
            &rt.flow,
            &rt.basis,
            &self.supplies,
            &rt.adjusted_supply,
        ))
    }

    /// Runs the pivot loop to completion, timeout, cancellation, or the
    /// iteration cap, and caches the result. Idempotent: a second call
    /// without an intervening [`Solver::reset`] just returns the cached
    /// status (spec.md §8 "Solving an instance twice ... yields identical
    /// flow vector").
    #[tracing::instrument(skip(self))]
    pub fn solve(&mut self) -> Result<SolverStatus, SolverError> {
        if self.solved {
            return Ok(self.status);
        }

        let characteristics = self.analyze_problem();
        let config = if self.auto_configuration {
            config::select(&characteristics, self.verbose)
        } else {
            OptimizationConfig::default()
        };
        if self.verbose {
            tracing::debug!(?characteristics.problem_type, density = characteristics.density, "analyzed problem");
        }

        let kind = match self.pivot_rule_override {
            Some(kind) => kind,
            None if self.auto_configuration && config.has(OptimizationFlags::CANDIDATE_LIST_PIVOT) => {
                PivotRuleKind::CandidateList
            }
            None => PivotRuleKind::default(),
        };

        let init::Initialization {
            mut flow,
            mut basis,
            big_m,
            adjusted_supply,
        } = init::initialize(
            &self.graph,
            &self.costs,
            &self.lower,
            &self.upper,
            &self.supplies,
            self.supply_mode,
        )?;

        let n = self.graph.node_count();
        let m = self.graph.arc_count();
        let total_arcs = m + n;
        let mut rule = PivotRule::new(kind, total_arcs, &config);
        let iteration_cap = 50u64 * (n as u64 + m as u64).max(1);
        let mut cancel_tick = self
            .cancellation
            .throttle_check(NonZeroU32::new(DEFAULT_CHECK_CADENCE).expect("nonzero constant"));

        let mut iterations: u64 = 0;
        let status = loop {
            if cancel_tick.bail_if_cancelled().is_err() {
                tracing::warn!("solve cancelled or timed out, returning NotSolved");
                break SolverStatus::NotSolved;
            }
            if iterations >= iteration_cap {
                tracing::warn!(iterations, iteration_cap, "iteration cap reached, returning NotSolved");
                break SolverStatus::NotSolved;
            }

            let entering = {
                let view = EligibilityView {
                    flow: &flow,
                    basis: &basis,
                    arc_count: total_arcs,
                };
                rule.select(&view)
            };

            let entering = match entering {
                Some(a) => a,
                None => {
                    let artificial_flow: i64 = (m..total_arcs).map(|a| flow.flow(a)).sum();
                    break if artificial_flow > 0 {
                        SolverStatus::Infeasible
                    } else {
                        SolverStatus::Optimal
                    };
                }
            };

            let cycle_dir: i8 = if basis.state(entering) == ArcState::Lower { 1 } else { -1 };
            let entering_u = flow.source(entering);
            let entering_v = flow.target(entering);
            let r_entering = flow.reduced_cost(entering);

            let augmentation =
                match augment::find_augmentation(&basis, &flow, entering, entering_u, entering_v, cycle_dir) {
                    Some(a) => a,
                    None => break SolverStatus::Unbounded,
                };

            augment::apply_augmentation(&basis, &mut flow, entering, entering_u, entering_v, cycle_dir, augmentation.delta);

            if augmentation.leaving_arc == entering {
                basis.set_state(entering, augmentation.leaving_new_state);
            } else {
                let u_in_subtree = basis.in_subtree(augmentation.leaving_child_side, entering_u);
                let moving_nodes: Vec<u32> = basis.subtree_nodes(augmentation.leaving_child_side).collect();
                let delta_pi = if u_in_subtree { -r_entering } else { r_entering };

                basis.update_tree(
                    entering,
                    entering_u,
                    entering_v,
                    augmentation.leaving_arc,
                    augmentation.leaving_child_side,
                    augmentation.leaving_new_state,
                );
                for w in moving_nodes {
                    flow.add_potential(w, delta_pi);
                }
            }

            iterations += 1;
        };

        self.runtime = Some(RuntimeState {
            flow,
            basis,
            adjusted_supply,
            big_m,
        });
        self.status = status;
        self.solved = true;
        Ok(status)
    }
}
