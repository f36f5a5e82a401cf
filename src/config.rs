//! Config selector (component C5).
//!
//! Turns a [`crate::analyzer::ProblemCharacteristics`] bundle into an
//! [`OptimizationConfig`] by the fixed decision table in spec.md §4.5 — no
//! part of this is learned or tuned at runtime, it is a pure lookup.

use bitflags::bitflags;

use crate::analyzer::{ProblemCharacteristics, ProblemType};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OptimizationFlags: u16 {
        const ADAPTIVE_BLOCK_SIZE     = 1 << 0;
        const SMALL_BLOCKS_FOR_DENSE  = 1 << 1;
        const REDUCED_COST_CACHING    = 1 << 2;
        const CANDIDATE_LIST_PIVOT    = 1 << 3;
        const HOT_COLD_SPLITTING      = 1 << 4;
        const EARLY_TERMINATION       = 1 << 5;
    }
}

/// Numeric knobs that accompany [`OptimizationFlags`]. Defaults mirror the
/// "not dense" / "no adaptive" row of the decision table; [`select`]
/// overwrites whichever fields its matched rows govern.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    pub flags: OptimizationFlags,
    pub min_block_size: u32,
    pub max_block_size: u32,
    pub block_size_growth_factor: f64,
    pub block_size_shrink_factor: f64,
    pub consecutive_hits_before_adapt: u32,
    pub low_hit_rate_threshold: f64,
    pub high_hit_rate_threshold: f64,
    pub candidate_list_ratio: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            flags: OptimizationFlags::empty(),
            min_block_size: 25,
            max_block_size: 100,
            block_size_growth_factor: 1.3,
            block_size_shrink_factor: 0.7,
            consecutive_hits_before_adapt: 2,
            low_hit_rate_threshold: 0.05,
            high_hit_rate_threshold: 0.3,
            candidate_list_ratio: 0.1,
        }
    }
}

impl OptimizationConfig {
    #[inline]
    pub fn has(&self, flag: OptimizationFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// Applies the decision table of spec.md §4.5, in order, to `characteristics`.
/// `verbose` is the caller's already-captured `MCF_VERBOSE` flag (read once,
/// in `Solver::new`) — this function never reads the environment itself.
pub fn select(characteristics: &ProblemCharacteristics, verbose: bool) -> OptimizationConfig {
    let c = characteristics;
    let mut cfg = OptimizationConfig::default();

    if c.is_dense {
        cfg.flags |= OptimizationFlags::SMALL_BLOCKS_FOR_DENSE;
        cfg.min_block_size = 10;
        cfg.max_block_size = 50;
    } else {
        cfg.min_block_size = 25;
        cfg.max_block_size = 100;
    }

    if c.degree_cv > 0.5 {
        cfg.flags |= OptimizationFlags::ADAPTIVE_BLOCK_SIZE;
        cfg.block_size_growth_factor = 1.3;
        cfg.block_size_shrink_factor = 0.7;
        cfg.consecutive_hits_before_adapt = 2;
    } else if c.degree_cv > 0.3 {
        cfg.flags |= OptimizationFlags::ADAPTIVE_BLOCK_SIZE;
    }

    if c.is_sparse && c.arc_count < 50_000 {
        cfg.flags |= OptimizationFlags::REDUCED_COST_CACHING;
    }

    let candidate_eligible = c.arc_count >= 1000
        && ((c.is_sparse && c.arc_count > 5000)
            || c.has_uniform_costs
            || matches!(c.problem_type, ProblemType::Assignment | ProblemType::Transportation));
    if candidate_eligible {
        cfg.flags |= OptimizationFlags::CANDIDATE_LIST_PIVOT;
        cfg.candidate_list_ratio = if c.has_uniform_costs {
            0.2
        } else if c.arc_count > 100_000 {
            0.05
        } else {
            0.1
        };
    }

    if c.node_count > 5000 && c.degree_cv > 1.0 {
        cfg.flags |= OptimizationFlags::HOT_COLD_SPLITTING;
    }

    if matches!(c.problem_type, ProblemType::Assignment | ProblemType::Transportation) {
        cfg.flags |= OptimizationFlags::EARLY_TERMINATION;
    }

    if c.arc_count > 10_000 {
        cfg.low_hit_rate_threshold = 0.03;
        cfg.high_hit_rate_threshold = 0.25;
    } else {
        cfg.low_hit_rate_threshold = 0.05;
        cfg.high_hit_rate_threshold = 0.3;
    }

    if verbose {
        tracing::debug!(?cfg.flags, min_block_size = cfg.min_block_size, max_block_size = cfg.max_block_size, "selected optimization config");
    }

    cfg
}
