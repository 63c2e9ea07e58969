use nagare_zdd::{FrontierSpec, Step};

use crate::board::types::{Color, Direction};
use crate::board::Board;
use crate::frontier::FrontierManager;
use crate::graph::{Graph, VertexId};

/// Per-slot solver state carried through the decision diagram.
///
/// `mate` encodes the open partial paths: for a path endpoint it holds the
/// opposite endpoint, for a live-but-untouched vertex it holds the vertex
/// itself, and 0 marks an interior (degree-2) vertex. `upstream` is set on
/// the endpoint a wind or arrow constraint has forced the path to flow
/// from. `arrival` remembers the direction the single incident edge of an
/// endpoint came from, to catch a Gray cell being crossed twice in a row
/// orthogonally to its winds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexState {
    mate: VertexId,
    upstream: bool,
    arrival: Direction,
}

/// Frontier specification whose members are exactly the valid Nagareru
/// solution cycles of one board.
///
/// Holds the board and graph by shared reference for one diagram build;
/// the frontier manager is constructed once per graph and owned here.
pub struct CycleSpec<'a> {
    board: &'a Board,
    graph: &'a Graph,
    fm: FrontierManager,
}

impl<'a> CycleSpec<'a> {
    #[must_use]
    pub fn new(board: &'a Board, graph: &'a Graph) -> Self {
        Self {
            board,
            graph,
            fm: FrontierManager::from_graph(graph),
        }
    }

    #[must_use]
    pub const fn frontier_manager(&self) -> &FrontierManager {
        &self.fm
    }

    fn cell_of(&self, v: VertexId) -> usize {
        self.graph.label(v)
    }

    fn mate(&self, s: &[VertexState], v: VertexId) -> VertexId {
        s[self.fm.position_of(v)].mate
    }

    fn upstream(&self, s: &[VertexState], v: VertexId) -> bool {
        s[self.fm.position_of(v)].upstream
    }

    fn arrival(&self, s: &[VertexState], v: VertexId) -> Direction {
        s[self.fm.position_of(v)].arrival
    }

    fn set_mate(&self, s: &mut [VertexState], v: VertexId, mate: VertexId) {
        s[self.fm.position_of(v)].mate = mate;
    }

    fn set_upstream(&self, s: &mut [VertexState], v: VertexId, upstream: bool) {
        s[self.fm.position_of(v)].upstream = upstream;
    }

    fn set_arrival(&self, s: &mut [VertexState], v: VertexId, arrival: Direction) {
        s[self.fm.position_of(v)].arrival = arrival;
    }
}

impl FrontierSpec for CycleSpec<'_> {
    type State = VertexState;

    fn array_size(&self) -> usize {
        self.fm.width()
    }

    fn root(&self, state: &mut [VertexState]) -> Step {
        for slot in state.iter_mut() {
            *slot = VertexState::default();
        }
        let edges = self.fm.edge_count();
        if edges == 0 {
            Step::Reject
        } else {
            Step::Down(edges)
        }
    }

    #[allow(clippy::too_many_lines)]
    fn child(&self, s: &mut [VertexState], level: usize, take: bool) -> Step {
        // Vertices entering the frontier start isolated.
        for &v in self.fm.entering(level) {
            s[self.fm.position_of(v)] = VertexState {
                mate: v,
                upstream: false,
                arrival: Direction::None,
            };
        }

        let (v1, v2) = self.fm.edge(level);
        let cell1 = self.cell_of(v1);
        let cell2 = self.cell_of(v2);
        let c1 = self.board.color(cell1);
        let c2 = self.board.color(cell2);
        let ds1 = self.board.directions(cell1);
        let ds2 = self.board.directions(cell2);
        let d12 = self.board.relative_direction(cell1, cell2);
        let d21 = self.board.relative_direction(cell2, cell1);

        if take {
            let m1 = self.mate(s, v1);
            let m2 = self.mate(s, v2);

            // Taking the edge would give an interior vertex a third edge.
            if m1 == 0 || m2 == 0 {
                return Step::Reject;
            }

            let u_v1 = self.upstream(s, v1);
            let u_v2 = self.upstream(s, v2);
            let u_m1 = self.upstream(s, m1);
            let u_m2 = self.upstream(s, m2);
            let n1 = self.arrival(s, v1);
            let n2 = self.arrival(s, v2);

            // Joining two paths that are both forced to flow into the joint.
            if (u_v1 && u_v2) || (u_m1 && u_m2) {
                return Step::Reject;
            }

            // Once either end of a path is committed upstream, an arrow or
            // wind at this cell may not point back along the forced flow.
            if matches!(c1, Color::White | Color::Gray) {
                if u_m1 || u_v2 {
                    if ds1.contains(&d21) {
                        return Step::Reject;
                    }
                } else if (u_m2 || u_v1) && ds1.contains(&d12) {
                    return Step::Reject;
                }
            }
            if matches!(c2, Color::White | Color::Gray) {
                if u_m2 || u_v1 {
                    if ds2.contains(&d12) {
                        return Step::Reject;
                    }
                } else if (u_m1 || u_v2) && ds2.contains(&d21) {
                    return Step::Reject;
                }
            }

            // A Gray cell entered and left in a straight line orthogonal to
            // one of its winds would cross that wind.
            if c1 == Color::Gray && n1 == d12 && ds1.iter().any(|&d| d != d12 && d != d21) {
                return Step::Reject;
            }
            if c2 == Color::Gray && n2 == d21 && ds2.iter().any(|&d| d != d12 && d != d21) {
                return Step::Reject;
            }

            // This edge closes the open path between v1 and v2 into a cycle.
            if m1 == v2 && m2 == v1 {
                for &v in self.fm.frontier(level) {
                    if v == v1 || v == v2 {
                        continue;
                    }
                    let m = self.mate(s, v);
                    // Another path fragment is still open elsewhere.
                    if m != 0 && m != v {
                        return Step::Reject;
                    }
                }
                // Closing before the last white-incident edge would strand
                // a mandatory edge.
                if self.fm.edge_count() - level < self.board.last_white_edge() {
                    return Step::Reject;
                }
                return Step::Accept;
            }

            // Join the two paths end to end.
            self.set_mate(s, m1, m2);
            self.set_mate(s, m2, m1);
            if m1 != v1 {
                self.set_mate(s, v1, 0);
            }
            if m2 != v2 {
                self.set_mate(s, v2, 0);
            }

            self.set_arrival(s, v1, if m1 == v1 { d21 } else { Direction::None });
            self.set_arrival(s, v2, if m2 == v2 { d12 } else { Direction::None });

            // An arrow or wind parallel to this edge fixes the flow of the
            // joined path; the end it flows from becomes upstream.
            if matches!(c1, Color::White | Color::Gray) {
                for &d in ds1 {
                    if d == d12 {
                        if u_m2 || u_v1 {
                            return Step::Reject;
                        }
                        self.set_upstream(s, m1, true);
                    } else if d == d21 {
                        if u_m1 || u_v2 {
                            return Step::Reject;
                        }
                        self.set_upstream(s, m2, true);
                    }
                }
            }
            if matches!(c2, Color::White | Color::Gray) {
                for &d in ds2 {
                    if d == d12 {
                        if u_m2 || u_v1 {
                            return Step::Reject;
                        }
                        self.set_upstream(s, m1, true);
                    } else if d == d21 {
                        if u_m1 || u_v2 {
                            return Step::Reject;
                        }
                        self.set_upstream(s, m2, true);
                    }
                }
            }

            // Joined interior vertices hand their upstream mark to the far
            // end and stop carrying state of their own.
            if m1 != v1 && u_v1 {
                self.set_upstream(s, m2, true);
            }
            if m2 != v2 && u_v2 {
                self.set_upstream(s, m1, true);
            }
            if m1 != v1 {
                self.set_upstream(s, v1, false);
            }
            if m2 != v2 {
                self.set_upstream(s, v2, false);
            }
        } else if c1 == Color::White || c2 == Color::White {
            // Arrow-aligned edges of a White cell are mandatory.
            return Step::Reject;
        }

        for &v in self.fm.leaving(level) {
            let slot = self.fm.position_of(v);
            let mate = s[slot].mate;
            // An open endpoint leaving the frontier can never be closed.
            if mate != 0 && mate != v {
                return Step::Reject;
            }
            s[slot] = VertexState::default();
        }

        // The only accepting exit is cycle closure above.
        if level == 1 {
            return Step::Reject;
        }
        Step::Down(level - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nagare_zdd::Zdd;

    fn count(board: &Board) -> String {
        let graph = Graph::from_board(board);
        let spec = CycleSpec::new(board, &graph);
        let mut zdd = Zdd::build(&spec);
        zdd.reduce();
        zdd.cardinality()
    }

    #[test]
    fn unique_cycle_on_2x2() {
        assert_eq!(count(&Board::new(2, 2)), "1");
    }

    #[test]
    fn all_cycles_of_3x3() {
        // 4 unit squares + 4 dominoes + 4 L-shapes + the outer ring.
        assert_eq!(count(&Board::new(3, 3)), "13");
    }

    #[test]
    fn no_cycle_on_degenerate_boards() {
        assert_eq!(count(&Board::new(1, 1)), "0");
        assert_eq!(count(&Board::new(3, 1)), "0");
    }

    #[test]
    fn members_of_2x2_take_every_edge() {
        let board = Board::new(2, 2);
        let graph = Graph::from_board(&board);
        let spec = CycleSpec::new(&board, &graph);
        let mut zdd = Zdd::build(&spec);
        zdd.reduce();

        let members: Vec<Vec<usize>> = zdd.members().collect();
        assert_eq!(members, vec![vec![1, 2, 3, 4]]);
    }
}
