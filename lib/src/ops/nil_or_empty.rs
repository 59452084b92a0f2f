use crate::grammar::Grammar;
use crate::ir::{Count, Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::{contains_empty, nil_or_empty};

/// δ(L): ε if the language contains the empty string, ∅ if not.
///
/// ```text
/// δ(L1 | L2) = δ(L1) | δ(L2)
/// δ(L1 L2)   = δ(L1) δ(L2)
/// δ(¬L)      = ε if δ(L) doesn't contain ε, ∅ otherwise
/// δ(L+)      = δ(L)
/// δ(L{0})    = δ(L{∞}) = ε
/// δ(L{n})    = δ(L)
/// δ(ε) = δ(L?) = δ(L*) = ε
/// δ(∅) = δ(.) = δ(c) = δ([a-b]) = δ("abc") = ∅
/// ```
pub(super) struct NilOrEmpty;

impl Recursion<Grammar> for NilOrEmpty {
    type Key = ExprId;
    type Value = ExprId;

    fn table(grammar: &mut Grammar) -> &mut Fix<ExprId, ExprId> {
        &mut grammar.caches.nil_or_empty
    }

    fn bottom(grammar: &mut Grammar, _key: &ExprId) -> ExprId {
        grammar.arena.nil()
    }

    fn step(grammar: &mut Grammar, key: &ExprId) -> ExprId {
        match grammar.arena.get(*key) {
            Expr::Alt { left, right } => {
                let left = nil_or_empty(grammar, left);
                let right = nil_or_empty(grammar, right);
                grammar.arena.push(Expr::Alt { left, right })
            }
            Expr::Cat { first, second } => {
                let first = nil_or_empty(grammar, first);
                let second = nil_or_empty(grammar, second);
                grammar.arena.push(Expr::Cat { first, second })
            }
            Expr::Not(lang) => {
                let lang = nil_or_empty(grammar, lang);
                if contains_empty(grammar, lang) {
                    grammar.arena.nil()
                } else {
                    grammar.arena.empty()
                }
            }
            Expr::Plus(lang) => nil_or_empty(grammar, lang),
            Expr::Rep { n: Count::Finite(0) | Count::Infinite, .. } => {
                grammar.arena.empty()
            }
            Expr::Rep { lang, .. } => nil_or_empty(grammar, lang),
            Expr::Empty | Expr::Opt(_) | Expr::Star(_) => grammar.arena.empty(),
            Expr::Any
            | Expr::Char(_)
            | Expr::Nil
            | Expr::Range { .. }
            | Expr::Token(_) => grammar.arena.nil(),
        }
    }
}
