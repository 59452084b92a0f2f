/*! Algorithms over regular language expressions.

Each algorithm is a case analysis over [`crate::Expr`] implemented as a
[`Recursion`] with its own memoization table in [`Caches`]. Tables are keyed
by forced expression IDs, so a reference and the expression it stands for
share the same results.
*/

use crate::config::Config;
use crate::grammar::Grammar;
use crate::ir::ExprId;
use crate::memo::{solve, Fix, Strategy};

mod deriv;
mod equals;
mod height;
mod nil_or_empty;
mod nullable;
mod render;
mod simplify;


/// Memoization tables for every algorithm, one per algorithm.
pub(crate) struct Caches {
    pub nullable: Fix<ExprId, bool>,
    pub deriv: Fix<(ExprId, char), ExprId>,
    pub equals: Fix<(ExprId, ExprId), bool>,
    pub height: Fix<ExprId, u32>,
    pub simplify: Fix<ExprId, ExprId>,
    pub render: Fix<ExprId, String>,
    pub nil_or_empty: Fix<ExprId, ExprId>,
}

impl Caches {
    pub fn new(config: &Config) -> Self {
        let iterate =
            Strategy::Iterate { max_passes: config.fixpoint.max_passes };
        Self {
            nullable: Fix::new(iterate),
            deriv: Fix::new(Strategy::SinglePass),
            equals: Fix::new(iterate),
            height: Fix::new(Strategy::SinglePass),
            simplify: Fix::new(Strategy::SinglePass),
            render: Fix::new(Strategy::SinglePass),
            nil_or_empty: Fix::new(Strategy::SinglePass),
        }
    }

    pub fn clear(&mut self) {
        self.nullable.clear();
        self.deriv.clear();
        self.equals.clear();
        self.height.clear();
        self.simplify.clear();
        self.render.clear();
        self.nil_or_empty.clear();
    }
}

pub(crate) fn contains_empty(grammar: &mut Grammar, expr: ExprId) -> bool {
    let expr = grammar.arena.force(expr);
    solve::<_, nullable::Nullable>(grammar, expr)
}

pub(crate) fn deriv(grammar: &mut Grammar, expr: ExprId, c: char) -> ExprId {
    let expr = grammar.arena.force(expr);
    solve::<_, deriv::Derivative>(grammar, (expr, c))
}

pub(crate) fn equals(grammar: &mut Grammar, a: ExprId, b: ExprId) -> bool {
    let a = grammar.arena.force(a);
    let b = grammar.arena.force(b);
    // Equality is symmetric, both orders share the same entry.
    let key = if a <= b { (a, b) } else { (b, a) };
    solve::<_, equals::Equals>(grammar, key)
}

pub(crate) fn height(grammar: &mut Grammar, expr: ExprId) -> u32 {
    let expr = grammar.arena.force(expr);
    solve::<_, height::Height>(grammar, expr)
}

pub(crate) fn simplify(grammar: &mut Grammar, expr: ExprId) -> ExprId {
    let expr = grammar.arena.force(expr);
    solve::<_, simplify::Simplify>(grammar, expr)
}

pub(crate) fn render(grammar: &mut Grammar, expr: ExprId) -> String {
    let expr = grammar.arena.force(expr);
    solve::<_, render::Render>(grammar, expr)
}

pub(crate) fn nil_or_empty(grammar: &mut Grammar, expr: ExprId) -> ExprId {
    let expr = grammar.arena.force(expr);
    solve::<_, nil_or_empty::NilOrEmpty>(grammar, expr)
}
