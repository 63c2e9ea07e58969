//! Frontier bookkeeping for edge-ordered decision-diagram construction.
//!
//! For every edge of the graph, processed in list order, the manager
//! precomputes which vertices enter the frontier at that edge, which leave
//! after it, the full live frontier, and a reusable vertex-to-slot map so
//! per-node solver state stays proportional to the maximum frontier width
//! instead of the vertex count.
//!
//! Levels count down: the first edge is processed at level `m` (the edge
//! count) and the last at level 1, matching the decision-diagram engine.

use std::collections::BTreeSet;

use crate::graph::{Graph, VertexId};

/// Precomputed frontier sets and slot maps for one edge list.
#[derive(Debug, Clone)]
pub struct FrontierManager {
    vertex_count: usize,
    edge_list: Vec<(VertexId, VertexId)>,
    width: usize,
    enters: Vec<Vec<VertexId>>,
    leaves: Vec<Vec<VertexId>>,
    frontiers: Vec<Vec<VertexId>>,
    remains: Vec<Vec<VertexId>>,
    v2p: Vec<usize>,
    p2v: Vec<Vec<VertexId>>,
}

impl FrontierManager {
    /// Build the frontier data for `edge_list` over vertices `1..=vertex_count`.
    ///
    /// Well-formedness (no self-loops or duplicate edges, ids in range) is
    /// the caller's responsibility.
    #[must_use]
    pub fn new(vertex_count: usize, edge_list: Vec<(VertexId, VertexId)>) -> Self {
        let m = edge_list.len();
        let mut manager = Self {
            vertex_count,
            edge_list,
            width: 0,
            enters: vec![Vec::new(); m],
            leaves: vec![Vec::new(); m],
            frontiers: vec![Vec::new(); m],
            remains: vec![Vec::new(); m],
            v2p: vec![0; vertex_count + 1],
            p2v: Vec::new(),
        };
        manager.construct_enters();
        manager.construct_leaves();
        manager.construct_frontiers();
        manager.construct_remains();
        manager.construct_slot_map();
        manager
    }

    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.vertex_count(), graph.edges().to_vec())
    }

    /// A vertex enters the frontier at its first edge, `u` before `v`.
    fn construct_enters(&mut self) {
        let mut seen = vec![false; self.vertex_count + 1];
        for (k, &(u, v)) in self.edge_list.iter().enumerate() {
            for w in [u, v] {
                if !seen[w] {
                    self.enters[k].push(w);
                    seen[w] = true;
                }
            }
        }
    }

    /// A vertex leaves the frontier after its last edge, found by the
    /// mirrored scan from the back.
    fn construct_leaves(&mut self) {
        let mut seen = vec![false; self.vertex_count + 1];
        for (k, &(u, v)) in self.edge_list.iter().enumerate().rev() {
            for w in [u, v] {
                if !seen[w] {
                    self.leaves[k].push(w);
                    seen[w] = true;
                }
            }
        }
    }

    /// `F_k = F_{k-1} ∪ E_k`, recorded before removing `L_k`; the width is
    /// the largest live set.
    fn construct_frontiers(&mut self) {
        let mut live: BTreeSet<VertexId> = BTreeSet::new();
        for k in 0..self.edge_list.len() {
            live.extend(self.enters[k].iter().copied());
            self.frontiers[k] = live.iter().copied().collect();
            self.width = self.width.max(live.len());
            for v in &self.leaves[k] {
                live.remove(v);
            }
        }
    }

    /// `R_k = F_k \ L_k`, preserving `F_k` order.
    fn construct_remains(&mut self) {
        for k in 0..self.edge_list.len() {
            self.remains[k] = self.frontiers[k]
                .iter()
                .filter(|v| !self.leaves[k].contains(v))
                .copied()
                .collect();
        }
    }

    /// Entering vertices pop a slot off the free stack; leaving vertices
    /// push theirs back, so at most `width` slots are ever live.
    fn construct_slot_map(&mut self) {
        let m = self.edge_list.len();
        self.p2v = vec![vec![0; self.width]; m];

        let mut free: Vec<usize> = (0..self.width).rev().collect();
        for k in 0..m {
            if k > 0 {
                let carried = self.p2v[k - 1].clone();
                self.p2v[k] = carried;
            }
            for i in 0..self.enters[k].len() {
                let v = self.enters[k][i];
                let slot = free.pop().expect("free slot available below the width");
                self.v2p[v] = slot;
                self.p2v[k][slot] = v;
            }
            for i in 0..self.leaves[k].len() {
                free.push(self.v2p[self.leaves[k][i]]);
            }
        }
    }

    // -- graph info -----------------------------------------------------------

    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_list.len()
    }

    /// Maximum frontier size; the solver's slot-array length.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    // -- per-level lookups ----------------------------------------------------

    /// Zero-based edge index of a level; level `m` is the first edge.
    #[must_use]
    pub fn edge_id(&self, level: usize) -> usize {
        self.edge_list.len() - level
    }

    #[must_use]
    pub fn edge(&self, level: usize) -> (VertexId, VertexId) {
        self.edge_list[self.edge_id(level)]
    }

    /// Vertices first appearing at this level's edge.
    #[must_use]
    pub fn entering(&self, level: usize) -> &[VertexId] {
        &self.enters[self.edge_id(level)]
    }

    /// Vertices appearing for the last time at this level's edge.
    #[must_use]
    pub fn leaving(&self, level: usize) -> &[VertexId] {
        &self.leaves[self.edge_id(level)]
    }

    /// Vertices live while this level's edge is processed.
    #[must_use]
    pub fn frontier(&self, level: usize) -> &[VertexId] {
        &self.frontiers[self.edge_id(level)]
    }

    /// Vertices still live after this level's edge.
    #[must_use]
    pub fn remaining(&self, level: usize) -> &[VertexId] {
        &self.remains[self.edge_id(level)]
    }

    /// The slot of `v`, valid only between its first and last edge.
    #[must_use]
    pub fn position_of(&self, v: VertexId) -> usize {
        self.v2p[v]
    }

    /// The vertex holding `slot` at `level` (0 if the slot is unused).
    #[must_use]
    pub fn vertex_at(&self, level: usize, slot: usize) -> VertexId {
        self.p2v[self.edge_id(level)][slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The path 1-2-3-4.
    fn path_manager() -> FrontierManager {
        FrontierManager::new(4, vec![(1, 2), (2, 3), (3, 4)])
    }

    #[test]
    fn path_graph_sets() {
        let fm = path_manager();
        assert_eq!(fm.width(), 2);

        // Levels run 3, 2, 1 over edges 0, 1, 2.
        assert_eq!(fm.entering(3), &[1, 2]);
        assert_eq!(fm.entering(2), &[3]);
        assert_eq!(fm.entering(1), &[4]);

        assert_eq!(fm.leaving(3), &[1]);
        assert_eq!(fm.leaving(2), &[2]);
        assert_eq!(fm.leaving(1), &[3, 4]);

        assert_eq!(fm.frontier(3), &[1, 2]);
        assert_eq!(fm.frontier(2), &[2, 3]);
        assert_eq!(fm.frontier(1), &[3, 4]);

        assert_eq!(fm.remaining(3), &[2]);
        assert_eq!(fm.remaining(2), &[3]);
        assert_eq!(fm.remaining(1), &[] as &[VertexId]);
    }

    #[test]
    fn path_graph_slots_are_reused() {
        let fm = path_manager();
        // Slot 0 goes to vertex 1, slot 1 to vertex 2; vertex 3 reuses
        // vertex 1's slot, vertex 4 reuses vertex 2's.
        assert_eq!(fm.vertex_at(3, 0), 1);
        assert_eq!(fm.vertex_at(3, 1), 2);
        assert_eq!(fm.vertex_at(2, 0), 3);
        assert_eq!(fm.vertex_at(2, 1), 2);
        assert_eq!(fm.vertex_at(1, 0), 3);
        assert_eq!(fm.vertex_at(1, 1), 4);
    }

    #[test]
    fn frontier_partition_invariants() {
        // 2x2 grid in board scan order, interned ids.
        let fm = FrontierManager::new(4, vec![(1, 2), (1, 3), (2, 4), (3, 4)]);
        let m = fm.edge_count();

        let mut previous: Vec<VertexId> = Vec::new();
        for level in (1..=m).rev() {
            // F_k = F_{k-1} ∪ E_k as sets.
            let mut expected: Vec<VertexId> = previous.clone();
            expected.extend_from_slice(fm.entering(level));
            expected.sort_unstable();
            expected.dedup();
            assert_eq!(fm.frontier(level), &expected);

            assert!(fm.frontier(level).len() <= fm.width());

            // R_k = F_k \ L_k.
            let remaining: Vec<VertexId> = fm
                .frontier(level)
                .iter()
                .filter(|v| !fm.leaving(level).contains(v))
                .copied()
                .collect();
            assert_eq!(fm.remaining(level), &remaining);

            previous = remaining;
        }
    }

    #[test]
    fn live_vertices_hold_distinct_slots() {
        let fm = FrontierManager::new(4, vec![(1, 2), (1, 3), (2, 4), (3, 4)]);
        for level in (1..=fm.edge_count()).rev() {
            let mut slots: Vec<usize> = fm
                .frontier(level)
                .iter()
                .map(|&v| {
                    // The slot map inverts back to the vertex while it is live.
                    assert_eq!(fm.vertex_at(level, fm.position_of(v)), v);
                    fm.position_of(v)
                })
                .collect();
            slots.sort_unstable();
            slots.dedup();
            assert_eq!(slots.len(), fm.frontier(level).len());
            assert!(slots.iter().all(|&slot| slot < fm.width()));
        }
    }
}
