//! Graphviz rendering of a board, optionally overlaying a solution cycle.

use std::io::{self, Write};

use crate::board::types::Color;
use crate::board::Board;

/// Write the board as a Graphviz `graph`.
///
/// Cells render as filled squares labelled `index:arrows`; invalid edges
/// are dotted. When `solution` carries the levels of a ZDD member, the
/// corresponding edges are drawn red and bold.
///
/// # Errors
///
/// Propagates any error of the underlying writer.
pub fn write_board_dot<W: Write>(
    board: &Board,
    out: &mut W,
    solution: Option<&[usize]>,
) -> io::Result<()> {
    let cells = board.width() * board.height();

    writeln!(out, "graph {{")?;

    for i in 0..cells {
        write_node(board, out, i)?;
    }

    for i in 0..cells {
        if (i + 1) % board.width() != 0 {
            write_edge(board, out, i, i + 1)?;
        }
        if i + board.width() < cells {
            write_edge(board, out, i, i + board.width())?;
        }
    }

    if let Some(levels) = solution {
        for &level in levels {
            let (a, b) = board.edges()[board.edges().len() - level];
            writeln!(out, "{a}--{b} [color=red, style=bold];")?;
        }
    }

    for row in 0..board.height() {
        write!(out, "{{rank = same")?;
        for col in 0..board.width() {
            write!(out, ";{}", row * board.width() + col)?;
        }
        writeln!(out, "}};")?;
    }

    writeln!(out, "}}")
}

fn write_node<W: Write>(board: &Board, out: &mut W, i: usize) -> io::Result<()> {
    let paint = match board.color(i) {
        Color::White => "fillcolor=white,fontcolor=black,",
        Color::Black => "fillcolor=black,fontcolor=white,",
        Color::Gray => "fillcolor=gray,fontcolor=white,",
        Color::None => "fillcolor=blue,",
    };

    let arrows: String = board.directions(i).iter().map(|d| d.arrow()).collect();
    writeln!(
        out,
        "{i} [shape=square,style=filled,{paint}label=\"{i}:{arrows}\"];"
    )
}

fn write_edge<W: Write>(board: &Board, out: &mut W, i: usize, j: usize) -> io::Result<()> {
    let ports = if i + 1 == j {
        "headport=w,tailport=e"
    } else {
        "headport=n,tailport=s"
    };
    let style = if board.is_valid_edge(i, j) { "" } else { ",style=dotted" };
    writeln!(out, "{i}--{j} [{ports}{style}];")
}
