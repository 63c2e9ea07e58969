//! CSP export of a board as s-expression constraints.
//!
//! The encoding mirrors the solver's rules with integer variables: each
//! valid edge gets an orientation variable in `{-1, 0, 1}` (sign = flow
//! direction, 0 = unused), each valid node a degree in `{0, 2}`, a
//! reachability order `x_i` and a cycle-root flag `y_i`. White arrows pin
//! edge orientations; Gray winds forbid the opposing orientation and
//! crossing the wind; the `x`/`y` variables force a single cycle.

use std::io::{self, Write};

use crate::board::types::{Color, Direction};
use crate::board::Board;

fn edge_var(i: usize, j: usize) -> String {
    if i < j {
        format!("e_{i}_{j}")
    } else {
        format!("e_{j}_{i}")
    }
}

fn degree_var(i: usize) -> String {
    format!("d_{i}")
}

fn order_var(i: usize) -> String {
    format!("x_{i}")
}

fn root_var(i: usize) -> String {
    format!("y_{i}")
}

/// Cell index offset by one grid step, if it stays in `0..cells`.
///
/// Row wrapping is not checked here; geometric validity is delegated to
/// [`Board::is_valid_edge`] as everywhere else.
fn offset(i: usize, delta: isize, cells: usize) -> Option<usize> {
    let j = i.checked_add_signed(delta)?;
    (j < cells).then_some(j)
}

fn valid_offset_edge(board: &Board, i: usize, delta: isize) -> Option<usize> {
    let cells = board.width() * board.height();
    let j = offset(i, delta, cells)?;
    board.is_valid_edge(i, j).then_some(j)
}

/// Write the CSP encoding of `board`.
///
/// # Errors
///
/// Propagates any error of the underlying writer.
#[allow(clippy::too_many_lines)]
pub fn write_csp<W: Write>(board: &Board, out: &mut W) -> io::Result<()> {
    let width = board.width();
    let cells = width * board.height();
    let signed_width = width as isize;
    let diffs = [-signed_width, -1, 1, signed_width];

    let num_nodes = (0..cells).filter(|&i| board.is_valid_node(i)).count();

    // Variables.
    writeln!(out, "(domain degree (0 2))")?;
    for i in 0..cells {
        for delta in [1, signed_width] {
            if let Some(j) = valid_offset_edge(board, i, delta) {
                writeln!(out, "(int {} -1 1)", edge_var(i, j))?;
            }
        }
    }
    for i in 0..cells {
        if board.is_valid_node(i) {
            writeln!(out, "(int {} degree)", degree_var(i))?;
        }
    }
    for i in 0..cells {
        if board.is_valid_node(i) {
            writeln!(out, "(int {} 0 {num_nodes})", order_var(i))?;
        }
    }
    for i in 0..cells {
        if board.is_valid_node(i) {
            writeln!(out, "(int {} 0 1)", root_var(i))?;
        }
    }

    // Degree = number of incident used edges.
    for i in 0..cells {
        if !board.is_valid_node(i) {
            continue;
        }
        write!(out, "(= {} (+", degree_var(i))?;
        for delta in diffs {
            if let Some(j) = valid_offset_edge(board, i, delta) {
                write!(out, " (abs {})", edge_var(i, j))?;
            }
        }
        writeln!(out, "))")?;
    }

    // Flow conservation: in-degree equals out-degree at every node.
    for i in 0..cells {
        if !board.is_valid_node(i) {
            continue;
        }
        write!(out, "(= (+")?;
        for delta in diffs {
            if let Some(j) = valid_offset_edge(board, i, delta) {
                if j < i {
                    write!(out, " {}", edge_var(i, j))?;
                } else {
                    write!(out, " (neg {})", edge_var(i, j))?;
                }
            }
        }
        writeln!(out, ") 0)")?;
    }

    // A node is ordered iff it is used.
    for i in 0..cells {
        if board.is_valid_node(i) {
            writeln!(out, "(iff (> {} 0) (> {} 0))", degree_var(i), order_var(i))?;
        }
    }

    // The first-ordered node is the cycle root.
    for i in 0..cells {
        if board.is_valid_node(i) {
            writeln!(out, "(iff (= {} 1) (= {} 1))", order_var(i), root_var(i))?;
        }
    }

    // A used edge increases the order along its flow unless it re-enters
    // the root.
    for i in 0..cells {
        for delta in [1, signed_width] {
            if let Some(j) = valid_offset_edge(board, i, delta) {
                writeln!(
                    out,
                    "(=> (> {} 0) (or (> {} {}) (= {} 1)))",
                    edge_var(i, j),
                    order_var(j),
                    order_var(i),
                    order_var(j)
                )?;
                writeln!(
                    out,
                    "(=> (< {} 0) (or (> {} {}) (= {} 1)))",
                    edge_var(i, j),
                    order_var(i),
                    order_var(j),
                    order_var(i)
                )?;
            }
        }
    }

    // White cells: used, and both arrow-axis edges flow along the arrow.
    for i in 0..cells {
        if !board.is_valid_node(i) || board.color(i) != Color::White {
            continue;
        }
        writeln!(out, "(> {} 0)", order_var(i))?;

        let arrow = board.directions(i).first().copied().unwrap_or(Direction::None);
        let vertical = matches!(arrow, Direction::Up | Direction::Down);
        let before = if vertical { -signed_width } else { -1 };
        let after = if vertical { signed_width } else { 1 };
        let orientation: i8 = if matches!(arrow, Direction::Up | Direction::Left) {
            -1
        } else {
            1
        };
        if let Some(j) = valid_offset_edge(board, i, before) {
            writeln!(out, "(= {} {orientation})", edge_var(j, i))?;
        }
        if let Some(k) = valid_offset_edge(board, i, after) {
            writeln!(out, "(= {} {orientation})", edge_var(i, k))?;
        }
    }

    // Gray cells: never flow against a wind, never cross one.
    for i in 0..cells {
        if !board.is_valid_node(i) || board.color(i) != Color::Gray {
            continue;
        }
        for &wind in board.directions(i) {
            let vertical = matches!(wind, Direction::Up | Direction::Down);
            let forward = if vertical { signed_width } else { 1 };
            let against: i8 = if matches!(wind, Direction::Up | Direction::Left) {
                1
            } else {
                -1
            };
            if let Some(j) = valid_offset_edge(board, i, forward) {
                writeln!(out, "(!= {} {against})", edge_var(i, j))?;
            }
        }
        for &wind in board.directions(i) {
            let vertical = matches!(wind, Direction::Up | Direction::Down);
            let before = if vertical { -1 } else { -signed_width };
            let after = if vertical { 1 } else { signed_width };
            if let (Some(j), Some(k)) = (
                valid_offset_edge(board, i, before),
                valid_offset_edge(board, i, after),
            ) {
                writeln!(
                    out,
                    "(or (= {} 0) (= {} 0))",
                    edge_var(j, i),
                    edge_var(i, k)
                )?;
            }
        }
    }

    // Exactly one cycle root.
    write!(out, "(= (+")?;
    for i in 0..cells {
        if board.is_valid_node(i) {
            write!(out, " {}", root_var(i))?;
        }
    }
    writeln!(out, ") 1)")
}

#[cfg(test)]
mod tests {
    use super::write_csp;
    use crate::board::types::{Color, Direction};
    use crate::board::Board;

    fn render(board: &Board) -> String {
        let mut buffer = Vec::new();
        write_csp(board, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn empty_2x2_declares_all_variables() {
        let text = render(&Board::new(2, 2));
        assert!(text.starts_with("(domain degree (0 2))"));
        // Four valid edges and four valid nodes.
        assert_eq!(text.matches("(int e_").count(), 4);
        assert_eq!(text.matches("(int d_").count(), 4);
        assert!(text.ends_with("(= (+ y_0 y_1 y_2 y_3) 1)\n"));
    }

    #[test]
    fn white_arrow_pins_edge_orientation() {
        let board = Board::with_cells(3, 3, [(2, 2, Color::White, Direction::Up)]);
        let text = render(&board);
        // Upward flow through the center: both vertical edges set to -1.
        assert!(text.contains("(= e_1_4 -1)"));
        assert!(text.contains("(= e_4_7 -1)"));
    }

    #[test]
    fn gray_wind_forbids_backflow() {
        let board = Board::with_cells(3, 1, [(1, 1, Color::Black, Direction::Right)]);
        let text = render(&board);
        // Cells 1 and 2 are Gray with wind Right; flowing Left over the
        // forward edge is excluded.
        assert!(text.contains("(!= e_1_2 -1)"));
    }
}
