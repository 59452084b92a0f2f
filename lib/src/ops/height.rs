use crate::grammar::Grammar;
use crate::ir::{Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::height;

/// Height of the expression tree, where recursive references count as 0.
pub(super) struct Height;

impl Recursion<Grammar> for Height {
    type Key = ExprId;
    type Value = u32;

    fn table(grammar: &mut Grammar) -> &mut Fix<ExprId, u32> {
        &mut grammar.caches.height
    }

    fn bottom(_grammar: &mut Grammar, _key: &ExprId) -> u32 {
        0
    }

    fn step(grammar: &mut Grammar, key: &ExprId) -> u32 {
        match grammar.arena.get(*key) {
            Expr::Alt { left: a, right: b }
            | Expr::Cat { first: a, second: b } => {
                let a = height(grammar, a);
                let b = height(grammar, b);
                a.max(b) + 1
            }
            Expr::Not(lang)
            | Expr::Opt(lang)
            | Expr::Plus(lang)
            | Expr::Rep { lang, .. }
            | Expr::Star(lang) => height(grammar, lang) + 1,
            Expr::Any
            | Expr::Char(_)
            | Expr::Empty
            | Expr::Nil
            | Expr::Range { .. }
            | Expr::Token(_) => 1,
        }
    }
}
