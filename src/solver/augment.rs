//! The augmenting step of the pivot loop: cycle identification, forward/
//! backward classification of tree arcs, and blocking-arc (leaving arc)
//! selection (spec.md §4.7 steps 3-5).

use crate::basis::{ArcState, BasisStore};
use crate::flow::FlowState;

/// Result of walking the cycle formed by an entering arc: how far flow can
/// move before something hits a bound, and which arc hits it first.
pub struct Augmentation {
    pub delta: i64,
    pub leaving_arc: u32,
    /// The node whose `pred_arc` is the leaving arc — always the endpoint
    /// farther from the tree root, i.e. the subtree that gets detached.
    pub leaving_child_side: u32,
    pub leaving_new_state: ArcState,
}

/// An arc contributes `Some(residual)` as a finite bound on `delta`, or
/// `None` if it imposes no bound at all (infinite capacity in the direction
/// flow would move).
fn forward_residual(flow: &FlowState, arc: u32) -> Option<i64> {
    if flow.upper(arc) == i64::MAX {
        None
    } else {
        Some(flow.residual_to_upper(arc))
    }
}

fn backward_residual(flow: &FlowState, arc: u32) -> i64 {
    flow.residual_to_lower(arc)
}

/// Finds the join node and the blocking arc for the cycle that `entering_arc`
/// would create, or `None` if the cycle is unbounded (spec.md §4.7 step 4).
/// `cycle_dir` is `+1` if flow increases along `entering_arc` from
/// `entering_u` to `entering_v` (it was at its lower bound), `-1` if it
/// decreases (it was at its upper bound).
pub fn find_augmentation(
    basis: &BasisStore,
    flow: &FlowState,
    entering_arc: u32,
    entering_u: u32,
    entering_v: u32,
    cycle_dir: i8,
) -> Option<Augmentation> {
    let join = basis.find_join(entering_u, entering_v);

    let mut best: Option<i64> = if cycle_dir == 1 {
        forward_residual(flow, entering_arc)
    } else {
        Some(backward_residual(flow, entering_arc))
    };
    let mut leaving_arc = entering_arc;
    let mut leaving_child_side = if cycle_dir == 1 { entering_u } else { entering_v };
    let mut leaving_new_state = if cycle_dir == 1 {
        ArcState::Upper
    } else {
        ArcState::Lower
    };

    // On the side walked "upward" (toward the join), a tree arc is forward
    // when its stored direction is child -> parent; on the side walked
    // "downward" from the join, forward means parent -> child. Which side is
    // upward flips with the cycle direction: if entering_arc pushes u -> v,
    // the return path walks v upward to the join and then downward to u.
    let u_side_upward = cycle_dir == -1;
    let v_side_upward = cycle_dir == 1;

    consider_path(
        basis,
        flow,
        entering_u,
        join,
        u_side_upward,
        &mut best,
        &mut leaving_arc,
        &mut leaving_child_side,
        &mut leaving_new_state,
    );
    consider_path(
        basis,
        flow,
        entering_v,
        join,
        v_side_upward,
        &mut best,
        &mut leaving_arc,
        &mut leaving_child_side,
        &mut leaving_new_state,
    );

    best.map(|delta| Augmentation {
        delta,
        leaving_arc,
        leaving_child_side,
        leaving_new_state,
    })
}

/// Pushes `delta` around the cycle formed by `entering_arc`: the arc itself
/// plus every tree arc on the path between its endpoints (spec.md §4.7 step
/// 5). Must be called with the same `cycle_dir` used to find `delta`.
pub fn apply_augmentation(
    basis: &BasisStore,
    flow: &mut FlowState,
    entering_arc: u32,
    entering_u: u32,
    entering_v: u32,
    cycle_dir: i8,
    delta: i64,
) {
    flow.add_flow(entering_arc, cycle_dir as i64 * delta);

    let join = basis.find_join(entering_u, entering_v);
    let u_side_upward = cycle_dir == -1;
    let v_side_upward = cycle_dir == 1;
    apply_path(basis, flow, entering_u, join, u_side_upward, delta);
    apply_path(basis, flow, entering_v, join, v_side_upward, delta);
}

fn apply_path(basis: &BasisStore, flow: &mut FlowState, start: u32, join: u32, side_is_upward: bool, delta: i64) {
    let mut x = start;
    while x != join {
        let arc = basis.pred_arc(x);
        let forward = if side_is_upward {
            basis.pred_dir(x) == -1
        } else {
            basis.pred_dir(x) == 1
        };
        flow.add_flow(arc, if forward { delta } else { -delta });
        x = basis.parent(x);
    }
}

#[allow(clippy::too_many_arguments)]
fn consider_path(
    basis: &BasisStore,
    flow: &FlowState,
    start: u32,
    join: u32,
    side_is_upward: bool,
    best: &mut Option<i64>,
    leaving_arc: &mut u32,
    leaving_child_side: &mut u32,
    leaving_new_state: &mut ArcState,
) {
    let mut x = start;
    while x != join {
        let arc = basis.pred_arc(x);
        let forward = if side_is_upward {
            basis.pred_dir(x) == -1
        } else {
            basis.pred_dir(x) == 1
        };
        let residual = if forward {
            forward_residual(flow, arc)
        } else {
            Some(backward_residual(flow, arc))
        };
        // Strict `<` keeps the first-seen (farther from the join, since we
        // walk from the leaf upward) arc on ties, matching Cunningham's rule.
        if let Some(r) = residual {
            let improves = match *best {
                Some(b) => r < b,
                None => true,
            };
            if improves {
                *best = Some(r);
                *leaving_arc = arc;
                *leaving_child_side = x;
                *leaving_new_state = if forward { ArcState::Upper } else { ArcState::Lower };
            }
        }
        x = basis.parent(x);
    }
}
