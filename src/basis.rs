//! The spanning-tree basis (component C2).
//!
//! The basis is a tree over `{0..n} ∪ {root}` (root is node `n`), stored as
//! parallel arrays indexed by node id — an arena + index pattern. No node
//! owns another; every array is owned by `BasisStore` itself, which sidesteps
//! both pointer-chasing and Rust lifetime questions for what would otherwise
//! be a cyclic, mutable graph of cross-referencing nodes (spec.md §9).
//!
//! The thread fields (`thread`/`rev_thread`/`succ_num`/`last_succ`) implement
//! a linearization of the tree in which every subtree occupies a contiguous
//! run of the `thread` linked list starting at its root — see
//! [`BasisStore::in_subtree`] for the walk this enables.

pub const NO_NODE: u32 = u32::MAX;
pub const NO_ARC: u32 = u32::MAX;

/// Which bound, if any, a non-tree arc currently sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcState {
    /// Non-basic, flow pinned at the lower bound.
    Lower,
    /// Basic: part of the spanning tree, flow is free between bounds.
    Tree,
    /// Non-basic, flow pinned at the upper bound.
    Upper,
}

impl ArcState {
    /// The `{-1, 0, +1}` sign used by the uniform eligibility predicate in
    /// spec.md §4.3: `state[a] * r(a) < 0` is the same test for both LOWER
    /// and UPPER arcs.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            ArcState::Lower => 1,
            ArcState::Tree => 0,
            ArcState::Upper => -1,
        }
    }
}

/// Parallel-array spanning tree over `node_count + 1` nodes (the last index
/// is the artificial root) and `arc_count` arcs (real arcs plus one
/// artificial arc per real node).
#[derive(Debug, Clone)]
pub struct BasisStore {
    root: u32,
    parent: Vec<u32>,
    pred_arc: Vec<u32>,
    pred_dir: Vec<i8>,
    thread: Vec<u32>,
    rev_thread: Vec<u32>,
    succ_num: Vec<u32>,
    last_succ: Vec<u32>,
    state: Vec<ArcState>,
}

impl BasisStore {
    pub fn new(node_count: u32, total_arc_count: u32) -> Self {
        let n = node_count as usize + 1;
        Self {
            root: node_count,
            parent: vec![NO_NODE; n],
            pred_arc: vec![NO_ARC; n],
            pred_dir: vec![1; n],
            thread: vec![NO_NODE; n],
            rev_thread: vec![NO_NODE; n],
            succ_num: vec![1; n],
            last_succ: vec![NO_NODE; n],
            state: vec![ArcState::Lower; total_arc_count as usize],
        }
    }

    #[inline]
    pub fn root(&self) -> u32 {
        self.root
    }

    #[inline]
    pub fn parent(&self, node: u32) -> u32 {
        self.parent[node as usize]
    }

    #[inline]
    pub fn pred_arc(&self, node: u32) -> u32 {
        self.pred_arc[node as usize]
    }

    #[inline]
    pub fn pred_dir(&self, node: u32) -> i8 {
        self.pred_dir[node as usize]
    }

    #[inline]
    pub fn succ_num(&self, node: u32) -> u32 {
        self.succ_num[node as usize]
    }

    #[inline]
    pub fn last_succ(&self, node: u32) -> u32 {
        self.last_succ[node as usize]
    }

    #[inline]
    pub fn thread_next(&self, node: u32) -> u32 {
        self.thread[node as usize]
    }

    #[inline]
    pub fn state(&self, arc: u32) -> ArcState {
        self.state[arc as usize]
    }

    #[inline]
    pub fn set_state(&mut self, arc: u32, state: ArcState) {
        self.state[arc as usize] = state;
    }

    /// Builds the initial star basis: `root` is the parent of every real
    /// node, the thread order is `root, 0, 1, …, n-1`, and every real node is
    /// a singleton subtree (spec.md §4.2 `init_star`).
    ///
    /// `artificial_arcs[v]` is node `v`'s artificial tree arc; `from_root[v]`
    /// says whether that arc points `root -> v` (`true`, `pred_dir = +1`) or
    /// `v -> root` (`false`, `pred_dir = -1`) — the direction depends on the
    /// sign of `v`'s adjusted supply and isn't uniform across nodes.
    pub fn init_star(&mut self, artificial_arcs: &[u32], from_root: &[bool]) {
        let n = self.root;
        self.parent[self.root as usize] = NO_NODE;
        self.pred_arc[self.root as usize] = NO_ARC;
        self.succ_num[self.root as usize] = n + 1;
        self.last_succ[self.root as usize] = if n == 0 { self.root } else { n - 1 };

        let mut prev = self.root;
        for v in 0..n {
            self.parent[v as usize] = self.root;
            self.pred_arc[v as usize] = artificial_arcs[v as usize];
            self.pred_dir[v as usize] = if from_root[v as usize] { 1 } else { -1 };
            self.succ_num[v as usize] = 1;
            self.last_succ[v as usize] = v;
            self.thread[prev as usize] = v;
            self.rev_thread[v as usize] = prev;
            self.state[artificial_arcs[v as usize] as usize] = ArcState::Tree;
            prev = v;
        }
        self.thread[prev as usize] = self.root;
        self.rev_thread[self.root as usize] = prev;
    }

    /// Lowest common ancestor of `u` and `v`, found by repeatedly advancing
    /// whichever side has the smaller subtree (an ancestor's `succ_num` is
    /// always >= a descendant's, so the smaller side can never be the
    /// ancestor — this needs no explicit depth array, see spec.md §4.2).
    pub fn find_join(&self, mut u: u32, mut v: u32) -> u32 {
        while u != v {
            if self.succ_num[u as usize] < self.succ_num[v as usize] {
                u = self.parent[u as usize];
            } else {
                v = self.parent[v as usize];
            }
        }
        u
    }

    /// True iff `v` lies in the subtree rooted at `u` (inclusive). Walks the
    /// thread list for at most `succ_num[u]` steps, i.e. it costs exactly the
    /// size of `u`'s subtree — the same subtree the caller is about to touch
    /// either way, so this never adds asymptotic work to a pivot.
    pub fn in_subtree(&self, u: u32, v: u32) -> bool {
        if u == v {
            return true;
        }
        let mut node = u;
        for _ in 0..self.succ_num[u as usize].saturating_sub(1) {
            node = self.thread[node as usize];
            if node == v {
                return true;
            }
        }
        false
    }

    /// Nodes of the subtree rooted at `u`, in thread order, starting at `u`.
    pub fn subtree_nodes(&self, u: u32) -> SubtreeIter<'_> {
        SubtreeIter {
            basis: self,
            next: Some(u),
            last: self.last_succ[u as usize],
        }
    }

    /// Detaches the subtree rooted at `sub_root` from the rest of the tree.
    /// `sub_root` must be a child of the node reached from the leaving arc's
    /// other endpoint. Splices the subtree out of the thread list in O(1);
    /// per-ancestor bookkeeping (`succ_num`/`last_succ`) above the detach
    /// point is O(depth).
    fn detach(&mut self, sub_root: u32) {
        let prev_t = self.rev_thread[sub_root as usize];
        let last_t = self.last_succ[sub_root as usize];
        let next_last_t = self.thread[last_t as usize];

        self.thread[prev_t as usize] = next_last_t;
        self.rev_thread[next_last_t as usize] = prev_t;
        self.thread[last_t as usize] = sub_root;
        self.rev_thread[sub_root as usize] = last_t;

        let sub_size = self.succ_num[sub_root as usize];
        let mut ancestor = self.parent[sub_root as usize];
        while ancestor != NO_NODE {
            self.succ_num[ancestor as usize] -= sub_size;
            if self.last_succ[ancestor as usize] == last_t {
                self.last_succ[ancestor as usize] = prev_t;
            }
            ancestor = self.parent[ancestor as usize];
        }

        self.parent[sub_root as usize] = NO_NODE;
        self.pred_arc[sub_root as usize] = NO_ARC;
    }

    /// Attaches the subtree rooted at `sub_root` as a new child of
    /// `attach_at`, connected by `entering_arc` in direction `dir`.
    fn attach(&mut self, attach_at: u32, sub_root: u32, entering_arc: u32, dir: i8) {
        self.parent[sub_root as usize] = attach_at;
        self.pred_arc[sub_root as usize] = entering_arc;
        self.pred_dir[sub_root as usize] = dir;

        let last_p = self.last_succ[attach_at as usize];
        let next_last_p = self.thread[last_p as usize];
        let last_q = self.last_succ[sub_root as usize];

        self.thread[last_p as usize] = sub_root;
        self.rev_thread[sub_root as usize] = last_p;
        self.rev_thread[next_last_p as usize] = last_q;
        self.thread[last_q as usize] = next_last_p;

        let sub_size = self.succ_num[sub_root as usize];
        let mut ancestor = attach_at;
        loop {
            self.succ_num[ancestor as usize] += sub_size;
            if self.last_succ[ancestor as usize] == last_p {
                self.last_succ[ancestor as usize] = last_q;
            }
            let next = self.parent[ancestor as usize];
            if next == NO_NODE {
                break;
            }
            ancestor = next;
        }
    }

    /// Re-roots the path from `new_subtree_root` up to the current top of its
    /// side, so that `new_subtree_root` can be reattached as a hanging
    /// subtree on the other side of the cycle. Mirrors the `re_rooting` step
    /// of a textbook primal network simplex update (grounded in
    /// `examples/other_examples/..._spanning_tree_structure.rs.rs`).
    fn reroot_path_to(&mut self, new_root: u32) {
        let mut ancestors = Vec::new();
        let mut node = new_root;
        while node != NO_NODE {
            ancestors.push(node);
            node = self.parent[node as usize];
        }
        ancestors.reverse();

        for pair in ancestors.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            let size_p = self.succ_num[p as usize];
            let last_q = self.last_succ[q as usize];

            self.parent[p as usize] = q;
            self.parent[q as usize] = NO_NODE;
            self.pred_arc[p as usize] = self.pred_arc[q as usize];
            self.pred_dir[p as usize] = -self.pred_dir[q as usize];
            self.pred_arc[q as usize] = NO_ARC;
            self.succ_num[p as usize] = size_p - self.succ_num[q as usize];
            self.succ_num[q as usize] = size_p;

            let prev_q = self.rev_thread[q as usize];
            let next_last_q = self.thread[last_q as usize];
            self.thread[prev_q as usize] = next_last_q;
            self.rev_thread[next_last_q as usize] = prev_q;
            self.thread[last_q as usize] = q;
            self.rev_thread[q as usize] = last_q;

            let mut last_p = self.last_succ[p as usize];
            if last_p == last_q {
                self.last_succ[p as usize] = prev_q;
                last_p = prev_q;
            }

            self.rev_thread[p as usize] = last_q;
            self.thread[last_q as usize] = p;
            self.thread[last_p as usize] = q;
            self.rev_thread[q as usize] = last_p;
            self.last_succ[q as usize] = last_p;
        }
    }

    /// Replaces the leaving arc with the entering arc in the basis, updating
    /// `parent`/`pred_arc`/`pred_dir`/`thread`/`rev_thread`/`succ_num`/
    /// `last_succ` so invariant I6 holds, and moves `entering_arc`/
    /// `leaving_arc` between `ArcState::Tree` and `leaving_new_state` in
    /// `state[]`. `entering_arc` connects `entering_u` and `entering_v`;
    /// `leaving_child_side` is whichever endpoint of the leaving arc is
    /// farther from the join node — that side's whole subtree is the one
    /// that gets detached and reattached. Only that subtree's ancestors are
    /// touched; the rest of the thread is untouched (spec.md §4.7 step 7).
    pub fn update_tree(
        &mut self,
        entering_arc: u32,
        entering_u: u32,
        entering_v: u32,
        leaving_arc: u32,
        leaving_child_side: u32,
        leaving_new_state: ArcState,
    ) {
        let u_in_subtree = self.in_subtree(leaving_child_side, entering_u);
        let (attach_at, reattach_root) = if u_in_subtree {
            (entering_v, entering_u)
        } else {
            (entering_u, entering_v)
        };

        self.set_state(leaving_arc, leaving_new_state);
        self.detach(leaving_child_side);
        self.reroot_path_to(reattach_root);

        let dir: i8 = if entering_u == attach_at { 1 } else { -1 };
        self.attach(attach_at, reattach_root, entering_arc, dir);
        self.set_state(entering_arc, ArcState::Tree);
    }
}

/// Iterator over a subtree's nodes in thread order, produced by
/// [`BasisStore::subtree_nodes`].
pub struct SubtreeIter<'a> {
    basis: &'a BasisStore,
    next: Option<u32>,
    last: u32,
}

impl<'a> Iterator for SubtreeIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = if current == self.last {
            None
        } else {
            Some(self.basis.thread[current as usize])
        };
        Some(current)
    }
}
