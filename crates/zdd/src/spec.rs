use core::fmt::Debug;
use core::hash::Hash;

/// Outcome of a root or transition call of a [`FrontierSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The branch cannot lead to a member; route it to the `⊥` terminal.
    Reject,
    /// The branch completes a member; route it to the `⊤` terminal.
    Accept,
    /// Continue at the given (strictly lower, positive) level.
    Down(usize),
}

/// A state machine describing a set family level by level.
///
/// The builder owns a fixed-size array of `State` slots per diagram node
/// (the *pod array*); the spec reads and mutates only that array. Levels
/// run from `root()`'s returned level down to 1, and every [`Step::Down`]
/// must strictly descend.
///
/// Implementations must be deterministic and must not keep mutable state
/// of their own: the builder may evaluate transitions of distinct nodes
/// in any order.
pub trait FrontierSpec {
    /// Per-slot state carried at each frontier position. Slot arrays are
    /// compared and hashed wholesale, so slots no longer in use must be
    /// reset to `State::default()`.
    type State: Default + Clone + Eq + Hash + Debug;

    /// Number of state slots in the pod array.
    fn array_size(&self) -> usize;

    /// Initialise `state` and return the top level, or a terminal for a
    /// trivial family ([`Step::Reject`] = empty, [`Step::Accept`] = `{∅}`).
    fn root(&self, state: &mut [Self::State]) -> Step;

    /// Apply one branch decision at `level` to `state`.
    fn child(&self, state: &mut [Self::State], level: usize, take: bool) -> Step;
}
