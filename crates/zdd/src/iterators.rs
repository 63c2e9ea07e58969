//! Iteration over the member sets of a [`Zdd`].

use crate::zdd::{NodeId, Zdd, BOTTOM, TOP};

/// Depth-first walk over all root-to-`⊤` paths.
///
/// Each member is yielded as the ascending list of levels on which the
/// path follows a `hi` edge. Created by [`Zdd::members`].
pub struct Members<'a> {
    zdd: &'a Zdd,
    stack: Vec<(NodeId, Vec<usize>)>,
}

impl<'a> Members<'a> {
    pub(crate) fn new(zdd: &'a Zdd) -> Self {
        Self {
            zdd,
            stack: vec![(zdd.root(), Vec::new())],
        }
    }
}

impl Iterator for Members<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, mut taken)) = self.stack.pop() {
            if id == BOTTOM {
                continue;
            }
            if id == TOP {
                taken.sort_unstable();
                return Some(taken);
            }
            let node = self.zdd.node(id);
            self.stack.push((node.lo, taken.clone()));
            taken.push(node.level);
            self.stack.push((node.hi, taken));
        }
        None
    }
}
