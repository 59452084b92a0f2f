use crate::grammar::Grammar;
use crate::ir::{Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::equals;

/// Structural equality.
///
/// Expressions that depend on their own equality are assumed to be equal
/// until some difference is found, so two copies of the same recursive
/// rule compare equal.
pub(super) struct Equals;

impl Recursion<Grammar> for Equals {
    type Key = (ExprId, ExprId);
    type Value = bool;

    fn table(grammar: &mut Grammar) -> &mut Fix<(ExprId, ExprId), bool> {
        &mut grammar.caches.equals
    }

    fn bottom(_grammar: &mut Grammar, _key: &(ExprId, ExprId)) -> bool {
        true
    }

    fn step(grammar: &mut Grammar, &(a, b): &(ExprId, ExprId)) -> bool {
        if a == b {
            return true;
        }
        // An unbound reference may end up being anything, it's only equal
        // to itself.
        if grammar.arena.is_unbound(a) || grammar.arena.is_unbound(b) {
            return false;
        }
        match (grammar.arena.get(a), grammar.arena.get(b)) {
            (
                Expr::Alt { left: l1, right: r1 },
                Expr::Alt { left: l2, right: r2 },
            ) => equals(grammar, l1, l2) & equals(grammar, r1, r2),
            (
                Expr::Cat { first: f1, second: s1 },
                Expr::Cat { first: f2, second: s2 },
            ) => equals(grammar, f1, f2) & equals(grammar, s1, s2),
            (Expr::Any, Expr::Any)
            | (Expr::Empty, Expr::Empty)
            | (Expr::Nil, Expr::Nil) => true,
            (Expr::Char(x), Expr::Char(y)) => x == y,
            (Expr::Not(x), Expr::Not(y))
            | (Expr::Opt(x), Expr::Opt(y))
            | (Expr::Plus(x), Expr::Plus(y))
            | (Expr::Star(x), Expr::Star(y)) => equals(grammar, x, y),
            (
                Expr::Range { from: f1, to: t1 },
                Expr::Range { from: f2, to: t2 },
            ) => f1 == f2 && t1 == t2,
            (
                Expr::Rep { lang: l1, n: n1 },
                Expr::Rep { lang: l2, n: n2 },
            ) => n1 == n2 && equals(grammar, l1, l2),
            // Literals are interned, equal strings have equal IDs.
            (Expr::Token(x), Expr::Token(y)) => x == y,
            _ => false,
        }
    }
}
