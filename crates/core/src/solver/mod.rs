//! Solution counting and enumeration over the decision diagram.

mod spec;

pub use spec::{CycleSpec, VertexState};

use nagare_zdd::Zdd;

use crate::board::Board;
use crate::graph::Graph;

/// Build and reduce the solution diagram of a properized board.
///
/// Returns the diagram together with the graph it was built over, so the
/// caller can map member levels back to board edges.
#[must_use]
pub fn solve(board: &Board) -> (Zdd, Graph) {
    let graph = Graph::from_board(board);
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "building solution diagram"
    );

    let spec = CycleSpec::new(board, &graph);
    let mut zdd = Zdd::build(&spec);
    zdd.reduce();
    tracing::debug!(nodes = zdd.node_count(), "solution diagram ready");

    (zdd, graph)
}

/// Number of solutions of a properized board, as a decimal string.
#[must_use]
pub fn count_solutions(board: &Board) -> String {
    solve(board).0.cardinality()
}
