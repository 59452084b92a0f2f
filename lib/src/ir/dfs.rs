use rustc_hash::FxHashSet;

use crate::ir::{Arena, ExprId};

/// An iterator that conducts a Depth First Search (DFS) traversal of the
/// expression graph, visiting every node reachable from a starting node
/// exactly once.
///
/// Contrary to a tree traversal, the graph can be cyclic once references are
/// bound, so the iterator remembers the nodes it has already visited. Bound
/// references are yielded before the node they are bound to, which allows
/// callers to spot references that are still unbound. For example, given:
///
/// ```text
///       a
///      / \
///     b   c
///        / \
///       d   a
/// ```
///
/// The nodes are yielded in the order `a`, `b`, `c`, `d`.
pub(crate) struct DepthFirstSearch<'a> {
    arena: &'a Arena,
    stack: Vec<ExprId>,
    visited: FxHashSet<ExprId>,
}

impl<'a> DepthFirstSearch<'a> {
    /// Creates a new [`DepthFirstSearch`] that traverses the graph starting
    /// at the given node.
    pub fn new(arena: &'a Arena, start: ExprId) -> Self {
        Self { arena, stack: vec![start], visited: FxHashSet::default() }
    }
}

impl<'a> Iterator for DepthFirstSearch<'a> {
    type Item = ExprId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.stack.pop()?;

            if !self.visited.insert(next) {
                continue;
            }

            if self.arena.is_ref(next) {
                let target = self.arena.force(next);
                if target != next {
                    self.stack.push(target);
                }
                return Some(next);
            }

            // Children are pushed in reverse order so that they are
            // visited from left to right.
            let children: Vec<ExprId> =
                self.arena.get(next).children().collect();

            for child in children.into_iter().rev() {
                if !self.visited.contains(&child) {
                    self.stack.push(child);
                }
            }

            return Some(next);
        }
    }
}
