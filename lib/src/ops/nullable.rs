use crate::grammar::Grammar;
use crate::ir::{Count, Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::contains_empty;

/// Nullability: whether the language contains the empty string.
///
/// Recursive rules start as not nullable and are re-evaluated until the
/// answer stabilizes, so `S = S a | ε` is found to be nullable regardless
/// of which rule is asked first.
pub(super) struct Nullable;

impl Recursion<Grammar> for Nullable {
    type Key = ExprId;
    type Value = bool;

    fn table(grammar: &mut Grammar) -> &mut Fix<ExprId, bool> {
        &mut grammar.caches.nullable
    }

    fn bottom(_grammar: &mut Grammar, _key: &ExprId) -> bool {
        false
    }

    fn step(grammar: &mut Grammar, key: &ExprId) -> bool {
        match grammar.arena.get(*key) {
            Expr::Alt { left, right } => {
                contains_empty(grammar, left) | contains_empty(grammar, right)
            }
            Expr::Cat { first, second } => {
                contains_empty(grammar, first)
                    & contains_empty(grammar, second)
            }
            Expr::Not(lang) => !contains_empty(grammar, lang),
            Expr::Rep { n: Count::Finite(0) | Count::Infinite, .. } => true,
            Expr::Rep { lang, .. } => contains_empty(grammar, lang),
            Expr::Plus(lang) => contains_empty(grammar, lang),
            Expr::Any | Expr::Empty | Expr::Opt(_) | Expr::Star(_) => true,
            Expr::Char(_) | Expr::Nil | Expr::Range { .. } | Expr::Token(_) => {
                false
            }
        }
    }
}
