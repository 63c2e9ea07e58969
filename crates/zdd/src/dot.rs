//! Graphviz rendering of a [`Zdd`].

use std::io::{self, Write};

use crate::zdd::{Zdd, BOTTOM, TOP};

/// Write `zdd` as a Graphviz digraph.
///
/// Decision nodes are labelled with their level; `lo` edges are dashed,
/// `hi` edges solid. Terminals render as boxed `0` and `1`.
///
/// # Errors
///
/// Propagates any error of the underlying writer.
pub fn write_dot<W: Write>(zdd: &Zdd, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph zdd {{")?;
    writeln!(out, "  {BOTTOM} [shape=box,label=\"0\"];")?;
    writeln!(out, "  {TOP} [shape=box,label=\"1\"];")?;
    for id in 2..zdd.len() {
        let node = zdd.node(id);
        writeln!(out, "  {id} [label=\"{}\"];", node.level)?;
        writeln!(out, "  {id} -> {} [style=dashed];", node.lo)?;
        writeln!(out, "  {id} -> {};", node.hi)?;
    }
    writeln!(out, "}}")
}
