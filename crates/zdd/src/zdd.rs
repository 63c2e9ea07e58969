use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use num::BigUint;

use crate::iterators::Members;
use crate::spec::{FrontierSpec, Step};

/// Index of a node in the diagram's node table.
pub type NodeId = usize;

/// The `⊥` terminal: no member passes through here.
pub const BOTTOM: NodeId = 0;
/// The `⊤` terminal: every path ending here is a member.
pub const TOP: NodeId = 1;

/// A single decision node. `lo` is the "don't take" child, `hi` the
/// "take" child; both point at strictly lower levels or at a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub level: usize,
    pub lo: NodeId,
    pub hi: NodeId,
}

const TERMINAL: Node = Node {
    level: 0,
    lo: BOTTOM,
    hi: BOTTOM,
};

/// A zero-suppressed binary decision diagram.
///
/// Node ids 0 and 1 are the terminals; real nodes start at 2. Identical
/// node triples `(level, lo, hi)` are shared after [`Zdd::reduce`].
#[derive(Debug, Clone)]
pub struct Zdd {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Zdd {
    /// Build the (unreduced) diagram described by `spec`.
    ///
    /// Construction is breadth-first by level. At each level the whole
    /// slot array of every pending node is hash-consed, so branches that
    /// reach identical frontier state continue from one shared node.
    ///
    /// # Panics
    ///
    /// Panics if the spec violates the level contract: a root level of 0
    /// with a [`Step::Down`], or a child that does not strictly descend.
    #[must_use]
    pub fn build<S: FrontierSpec>(spec: &S) -> Self {
        let mut state = vec![S::State::default(); spec.array_size()];
        let top = match spec.root(&mut state) {
            Step::Reject => return Self::terminal(false),
            Step::Accept => return Self::terminal(true),
            Step::Down(level) => level,
        };
        assert!(top >= 1, "root level must be positive");

        let mut nodes = vec![TERMINAL; 2];

        // Per-level unique tables and insertion-ordered work lists. The
        // tables guarantee hash-consing; the lists keep expansion order
        // deterministic.
        let mut tables: Vec<HashMap<Box<[S::State]>, NodeId>> =
            (0..=top).map(|_| HashMap::new()).collect();
        let mut layers: Vec<Vec<(Box<[S::State]>, NodeId)>> =
            (0..=top).map(|_| Vec::new()).collect();

        let root_state: Box<[S::State]> = state.into_boxed_slice();
        let root = nodes.len();
        nodes.push(Node {
            level: top,
            lo: BOTTOM,
            hi: BOTTOM,
        });
        tables[top].insert(root_state.clone(), root);
        layers[top].push((root_state, root));

        for level in (1..=top).rev() {
            let layer = std::mem::take(&mut layers[level]);
            for (node_state, id) in layer {
                for take in [false, true] {
                    let mut child_state = node_state.clone();
                    let child = match spec.child(&mut child_state, level, take) {
                        Step::Reject => BOTTOM,
                        Step::Accept => TOP,
                        Step::Down(next) => {
                            assert!(
                                (1..level).contains(&next),
                                "child level must strictly descend"
                            );
                            match tables[next].entry(child_state) {
                                Entry::Occupied(occupied) => *occupied.get(),
                                Entry::Vacant(vacant) => {
                                    let child_id = nodes.len();
                                    nodes.push(Node {
                                        level: next,
                                        lo: BOTTOM,
                                        hi: BOTTOM,
                                    });
                                    layers[next].push((vacant.key().clone(), child_id));
                                    vacant.insert(child_id);
                                    child_id
                                }
                            }
                        }
                    };
                    if take {
                        nodes[id].hi = child;
                    } else {
                        nodes[id].lo = child;
                    }
                }
            }
            // States of a finished level are never looked up again.
            tables[level].clear();
        }

        tracing::debug!(nodes = nodes.len() - 2, top, "constructed diagram");
        Self { nodes, root }
    }

    fn terminal(accept: bool) -> Self {
        Self {
            nodes: vec![TERMINAL; 2],
            root: if accept { TOP } else { BOTTOM },
        }
    }

    /// Apply ZDD reduction in place: delete every node whose `hi` edge
    /// points at `⊥` (zero-suppression) and merge duplicate triples.
    pub fn reduce(&mut self) {
        if self.root <= TOP {
            return;
        }

        // Children sit at strictly lower levels, so a level-ascending
        // sweep sees every child remapped before its parents.
        let mut order: Vec<NodeId> = (2..self.nodes.len()).collect();
        order.sort_by_key(|&id| self.nodes[id].level);

        let mut remap: Vec<NodeId> = (0..self.nodes.len()).collect();
        let mut unique: HashMap<Node, NodeId> = HashMap::new();
        let mut reduced = vec![TERMINAL; 2];

        for id in order {
            let node = self.nodes[id];
            let lo = remap[node.lo];
            let hi = remap[node.hi];
            if hi == BOTTOM {
                remap[id] = lo;
                continue;
            }
            let key = Node {
                level: node.level,
                lo,
                hi,
            };
            remap[id] = match unique.entry(key) {
                Entry::Occupied(occupied) => *occupied.get(),
                Entry::Vacant(vacant) => {
                    let new_id = reduced.len();
                    reduced.push(key);
                    vacant.insert(new_id);
                    new_id
                }
            };
        }

        self.root = remap[self.root];
        self.nodes = reduced;
        tracing::debug!(nodes = self.node_count(), "reduced diagram");
    }

    /// Number of members of the encoded family, as a decimal string.
    ///
    /// Counts can exceed any fixed-width integer, so the sum is carried
    /// in a [`BigUint`] and rendered to decimal.
    #[must_use]
    pub fn cardinality(&self) -> String {
        if self.root == BOTTOM {
            return "0".to_owned();
        }
        if self.root == TOP {
            return "1".to_owned();
        }

        let mut order: Vec<NodeId> = (2..self.nodes.len()).collect();
        order.sort_by_key(|&id| self.nodes[id].level);

        let mut counts: Vec<BigUint> = vec![BigUint::default(); self.nodes.len()];
        counts[TOP] = BigUint::from(1_u8);
        for id in order {
            let node = self.nodes[id];
            let sum = &counts[node.lo] + &counts[node.hi];
            counts[id] = sum;
        }
        counts[self.root].to_string()
    }

    /// Iterate over the member sets, each yielded as the ascending list
    /// of levels whose `hi` edge the member takes.
    #[must_use]
    pub fn members(&self) -> Members<'_> {
        Members::new(self)
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of non-terminal nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Total table length, terminals included. Valid node ids are
    /// `0..len()`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root == BOTTOM
    }

    /// Look up a node by id. Terminal ids yield a dummy level-0 node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Family of all single-item subsets of `{1..=n}`.
    struct PickOne {
        n: usize,
    }

    impl FrontierSpec for PickOne {
        type State = u8;

        fn array_size(&self) -> usize {
            1
        }

        fn root(&self, state: &mut [u8]) -> Step {
            state[0] = 0;
            Step::Down(self.n)
        }

        fn child(&self, state: &mut [u8], level: usize, take: bool) -> Step {
            if take {
                if state[0] == 1 {
                    return Step::Reject;
                }
                state[0] = 1;
            }
            if level == 1 {
                if state[0] == 1 {
                    Step::Accept
                } else {
                    Step::Reject
                }
            } else {
                Step::Down(level - 1)
            }
        }
    }

    /// Family of all subsets of `{1..=n}`, with no state at all.
    struct Unconstrained {
        n: usize,
    }

    impl FrontierSpec for Unconstrained {
        type State = u8;

        fn array_size(&self) -> usize {
            0
        }

        fn root(&self, _state: &mut [u8]) -> Step {
            Step::Down(self.n)
        }

        fn child(&self, _state: &mut [u8], level: usize, _take: bool) -> Step {
            if level == 1 {
                Step::Accept
            } else {
                Step::Down(level - 1)
            }
        }
    }

    #[test]
    fn pick_one_cardinality() {
        let mut zdd = Zdd::build(&PickOne { n: 5 });
        assert_eq!(zdd.cardinality(), "5");
        zdd.reduce();
        assert_eq!(zdd.cardinality(), "5");
    }

    #[test]
    fn pick_one_members() {
        let mut zdd = Zdd::build(&PickOne { n: 3 });
        zdd.reduce();
        let mut members: Vec<Vec<usize>> = zdd.members().collect();
        members.sort();
        assert_eq!(members, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn pick_one_is_reduced_to_chain() {
        let mut zdd = Zdd::build(&PickOne { n: 4 });
        zdd.reduce();
        // One "nothing picked yet" node and one "already picked" node per
        // level, minus the zero-suppressed ones: 2n - 1 at most. The exact
        // shape matters less than sharing kicking in at all.
        assert!(zdd.node_count() <= 2 * 4 - 1);
        // Idempotent.
        let before = zdd.node_count();
        zdd.reduce();
        assert_eq!(zdd.node_count(), before);
    }

    #[test]
    fn unconstrained_counts_exceed_u64() {
        let mut zdd = Zdd::build(&Unconstrained { n: 64 });
        zdd.reduce();
        assert_eq!(zdd.cardinality(), "18446744073709551616");
        // All levels merge into a single chain of 64 nodes.
        assert_eq!(zdd.node_count(), 64);
    }

    #[test]
    fn trivial_families() {
        struct Empty;
        impl FrontierSpec for Empty {
            type State = u8;
            fn array_size(&self) -> usize {
                0
            }
            fn root(&self, _state: &mut [u8]) -> Step {
                Step::Reject
            }
            fn child(&self, _state: &mut [u8], _level: usize, _take: bool) -> Step {
                unreachable!()
            }
        }

        let zdd = Zdd::build(&Empty);
        assert!(zdd.is_empty());
        assert_eq!(zdd.cardinality(), "0");
        assert_eq!(zdd.members().count(), 0);
    }
}
