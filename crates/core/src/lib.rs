//! Solution counting for the Nagareru ("flow") pencil puzzle.
//!
//! A Nagareru solution is a single directed cycle over the board's cells
//! that passes through every White cell along its arrow, never flows
//! against the wind of a Black cell, and never crosses a wind. This crate
//! counts and enumerates the solutions of a board by the *frontier
//! method*: the board's valid edges are ordered, and a decision diagram is
//! built edge by edge, branching on "take / don't take" while carrying
//! just enough per-vertex state (path mates, forced flow direction,
//! arrival direction) to prune every branch that cannot extend to a legal
//! cycle.
//!
//! # Components
//!
//! - [`board`] -- the `W×H` grid: colors, directions, wind propagation
//!   ([`Board::properize`]), validity predicates, and the text/Graphviz/CSP
//!   renderings.
//! - [`graph`] -- the ordered edge list the diagram is built over.
//! - [`frontier`] -- per-edge entering/leaving/live vertex sets, frontier
//!   width, and the vertex-to-slot map.
//! - [`solver`] -- the frontier specification encoding the Nagareru rules,
//!   plus the [`count_solutions`]/[`solve`] entry points.
//!
//! The generic diagram engine lives in the `nagare_zdd` crate; random
//! instance generation in `nagare_gen`; `pzprv3` file parsing in
//! `nagare_parser`.
//!
//! ```rust
//! use nagare_core::{count_solutions, Board};
//!
//! // The empty 2x2 board has exactly one solution: the full ring.
//! let board = Board::new(2, 2);
//! assert_eq!(count_solutions(&board), "1");
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on [`Board`],
//!   [`Color`], and [`Direction`].

pub mod board;
pub mod frontier;
pub mod graph;
pub mod solver;

pub use board::types::{Color, Direction};
pub use board::Board;
pub use solver::{count_solutions, solve};
