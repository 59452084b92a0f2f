/*! Least-fixed-point memoization for recursive functions over cyclic graphs.

Every algorithm in this crate is a case analysis over the variants of
[`crate::Expr`] that calls itself on the children of the node being analysed.
When the expression graph has cycles (i.e: recursive grammars) a naive
implementation never terminates, as computing the result for a node requires
the result for that same node.

This module breaks those cycles. A recursive function is described by
implementing [`Recursion`], and is always invoked through [`solve`], which
looks up the result in a [`Fix`] table keyed by the function arguments. The
first time some key is seen, a provisional *bottom* value is stored in the
table before running the case analysis. If the analysis re-enters with the
same key while the outer call is still in progress, it gets the provisional
value instead of recursing forever. Once the analysis finishes, its result
overwrites the provisional value and is returned by every subsequent call.

With [`Strategy::SinglePass`] that is all there is to it. With
[`Strategy::Iterate`] the outermost call is repeated while the provisional
values that were observed during the previous pass keep changing, each pass
starting from the results of the previous one. This is Kleene iteration, and
produces the least fixed point of monotone functions over finite lattices,
like the nullability of mutually recursive rules.
*/

use std::hash::Hash;

use log::*;
use rustc_hash::{FxHashMap, FxHashSet};

#[cfg(test)]
mod tests;

/// Controls how a [`Fix`] table deals with re-entrant calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Re-entrant calls observe the bottom value and the result of the
    /// outermost call is final.
    SinglePass,
    /// Re-entrant calls observe the value computed in the previous pass, and
    /// the outermost call is repeated until no value changes or `max_passes`
    /// passes have been done.
    Iterate {
        /// Maximum number of passes.
        max_passes: usize,
    },
}

/// Result of [`Fix::enter`].
enum Enter<V> {
    /// The value is known, either because it was computed before, or
    /// because the call is re-entrant and the value is provisional.
    Known(V),
    /// The value must be computed.
    Unknown,
}

/// Result of [`Fix::leave`].
enum Leave<V> {
    Done(V),
    /// The outermost call must be evaluated once more.
    Again,
}

/// Memoization table for a recursive function with keys of type `K` and
/// results of type `V`.
pub struct Fix<K, V> {
    strategy: Strategy,
    /// Final results.
    done: FxHashMap<K, V>,
    /// Results for the computation in progress, some of them provisional.
    pending: FxHashMap<K, V>,
    /// Keys whose case analysis is currently running.
    active: FxHashSet<K>,
    /// Keys already evaluated during the current pass.
    seen: FxHashSet<K>,
    /// Number of nested calls currently running.
    depth: usize,
    /// Number of passes done by the current outermost call.
    passes: usize,
    /// True if a re-entrant call has been answered with a provisional value
    /// during the current pass.
    reentered: bool,
    /// True if some result changed during the current pass.
    changed: bool,
}

impl<K, V> Fix<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
{
    /// Creates an empty table.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            done: FxHashMap::default(),
            pending: FxHashMap::default(),
            active: FxHashSet::default(),
            seen: FxHashSet::default(),
            depth: 0,
            passes: 0,
            reentered: false,
            changed: false,
        }
    }

    /// Returns the table's strategy.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the final result for `key`, if already computed.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.done.get(key)
    }

    /// Number of final results in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.done.len()
    }

    /// True if the table doesn't contain any final result.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    /// Removes every result from the table.
    ///
    /// # Panics
    ///
    /// If called while a computation that uses the table is in progress.
    pub fn clear(&mut self) {
        assert_eq!(self.depth, 0, "clearing a table that is in use");
        self.done.clear();
        self.pending.clear();
        self.seen.clear();
    }

    fn enter(&mut self, key: &K) -> Enter<V> {
        if let Some(value) = self.done.get(key) {
            return Enter::Known(value.clone());
        }
        if self.active.contains(key) {
            self.reentered = true;
            return Enter::Known(self.pending[key].clone());
        }
        if self.seen.contains(key) {
            return Enter::Known(self.pending[key].clone());
        }
        Enter::Unknown
    }

    fn begin(&mut self, key: &K, bottom: V) {
        if self.depth == 0 {
            self.passes = 1;
            self.reentered = false;
            self.changed = false;
        }
        self.depth += 1;
        self.active.insert(key.clone());
        // In passes after the first one the value from the previous pass
        // is kept as the starting point.
        self.pending.entry(key.clone()).or_insert(bottom);
    }

    fn leave(&mut self, key: &K, value: V) -> Leave<V> {
        self.active.remove(key);
        self.depth -= 1;

        if self.pending.insert(key.clone(), value.clone()).as_ref()
            != Some(&value)
        {
            self.changed = true;
        }

        self.seen.insert(key.clone());

        if self.depth > 0 {
            return Leave::Done(value);
        }

        let unstable = self.reentered && self.changed;

        if let Strategy::Iterate { max_passes } = self.strategy {
            if unstable && self.passes < max_passes {
                self.passes += 1;
                self.reentered = false;
                self.changed = false;
                self.seen.clear();
                self.active.insert(key.clone());
                self.depth = 1;
                return Leave::Again;
            }
            if unstable {
                warn!(
                    "no fixed point after {} passes, keeping last values",
                    self.passes
                );
            }
        }

        self.seen.clear();
        self.done.extend(self.pending.drain());

        Leave::Done(value)
    }
}

/// A recursive function over some context `C`, evaluated with [`solve`].
///
/// The function's case analysis goes in [`Recursion::step`], which must
/// compute results for other keys by calling [`solve`], never by calling
/// itself directly, so that cycles are broken by the [`Fix`] table returned
/// by [`Recursion::table`].
pub trait Recursion<C: ?Sized> {
    /// The function's arguments.
    type Key: Clone + Eq + Hash;
    /// The function's result.
    type Value: Clone + PartialEq;

    /// Returns the memoization table, which lives in the context.
    fn table(ctx: &mut C) -> &mut Fix<Self::Key, Self::Value>;

    /// Provisional result for `key`, observed by re-entrant calls.
    fn bottom(ctx: &mut C, key: &Self::Key) -> Self::Value;

    /// The case analysis.
    fn step(ctx: &mut C, key: &Self::Key) -> Self::Value;

    /// Invoked once the case analysis for `key` is complete, with the
    /// provisional value that was stored before running it. Returns the
    /// value that is finally stored.
    ///
    /// This hook exists for functions whose bottom is a placeholder that
    /// must be linked to the actual result, the default implementation
    /// simply returns `value`.
    fn settle(
        _ctx: &mut C,
        _key: &Self::Key,
        _bottom: &Self::Value,
        value: Self::Value,
    ) -> Self::Value {
        value
    }
}

/// Evaluates the recursive function `R` for `key`.
pub fn solve<C, R>(ctx: &mut C, key: R::Key) -> R::Value
where
    C: ?Sized,
    R: Recursion<C>,
{
    if let Enter::Known(value) = R::table(ctx).enter(&key) {
        return value;
    }

    let bottom = R::bottom(ctx, &key);

    R::table(ctx).begin(&key, bottom.clone());

    loop {
        let value = R::step(ctx, &key);
        let value = R::settle(ctx, &key, &bottom, value);

        match R::table(ctx).leave(&key, value) {
            Leave::Done(value) => return value,
            Leave::Again => {
                trace!("re-evaluating recursive function");
            }
        }
    }
}
