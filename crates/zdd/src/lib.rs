//! Zero-suppressed binary decision diagrams built by the frontier method.
//!
//! `nagare_zdd` constructs a ZDD from a *frontier specification*: a state
//! machine that, for each decision level from the top down, branches on
//! "take / don't take" and either prunes the branch, accepts it, or hands
//! back the state to carry to the next level. The builder hash-conses the
//! per-level state arrays so branches that converge on identical frontier
//! state share a single diagram node.
//!
//! The resulting [`Zdd`] encodes a family of sets: every root-to-`⊤` path
//! is one member, consisting of the levels on which the `hi` (take) edge
//! was followed.
//!
//! # Entry points
//!
//! - [`FrontierSpec`] -- implemented by the client; see [`Step`] for the
//!   transition outcomes.
//! - [`Zdd::build`] -- top-down construction from a spec.
//! - [`Zdd::reduce`] -- in-place ZDD reduction (zero-suppression rule plus
//!   duplicate merging).
//! - [`Zdd::cardinality`] -- number of members as a decimal string of
//!   arbitrary precision.
//! - [`Zdd::members`] -- iterator over the member sets.
//! - [`write_dot`] -- Graphviz export.

pub mod dot;
pub mod iterators;
pub mod spec;
pub mod zdd;

pub use dot::write_dot;
pub use spec::{FrontierSpec, Step};
pub use zdd::{Node, NodeId, Zdd, BOTTOM, TOP};
