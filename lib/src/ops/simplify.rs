use crate::grammar::Grammar;
use crate::ir::{Count, Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::{equals, height, simplify};

/// One bottom-up pass of rewriting rules that shrink the expression without
/// changing its language.
///
/// The rules are:
///
/// ```text
/// L | L         → L
/// M | L         → L | M      if height(M) > height(L)
/// ∅ | L, L | ∅  → L
/// (L | M) | N   → L | (M | N)
/// ∅L, L∅        → ∅
/// εL, Lε        → L
/// ¬¬L           → L
/// ∅?, ε?        → ε
/// ∅+            → ∅
/// ε+            → ε
/// [a-a]         → a
/// L{0}          → ε
/// L{1}          → L
/// L{∞}          → L*
/// ∅*, ε*        → ε
/// L**           → L*
/// ```
///
/// Expressions whose operands are not modified are returned as they are,
/// no new node is created for them.
///
/// Like the derivative, the provisional result of an expression that is
/// being simplified is a reference bound to the final result, so the
/// simplified form of a recursive rule refers to itself and not to the
/// original rule. While unbound, such references are opaque to the rules
/// above.
pub(super) struct Simplify;

impl Recursion<Grammar> for Simplify {
    type Key = ExprId;
    type Value = ExprId;

    fn table(grammar: &mut Grammar) -> &mut Fix<ExprId, ExprId> {
        &mut grammar.caches.simplify
    }

    fn bottom(grammar: &mut Grammar, _key: &ExprId) -> ExprId {
        grammar.arena.reserve()
    }

    fn step(grammar: &mut Grammar, key: &ExprId) -> ExprId {
        let expr = *key;
        match grammar.arena.get(expr) {
            Expr::Alt { left, right } => {
                let mut l = simplify(grammar, left);
                let mut r = simplify(grammar, right);

                if let Some(Expr::Alt { left: inner, right: rest }) =
                    shape(grammar, l)
                {
                    l = grammar.arena.force(inner);
                    r = grammar.arena.push(Expr::Alt { left: rest, right: r });
                }

                if height(grammar, l) > height(grammar, r) {
                    std::mem::swap(&mut l, &mut r);
                }

                if equals(grammar, l, r)
                    || shape(grammar, r) == Some(Expr::Nil)
                {
                    l
                } else if shape(grammar, l) == Some(Expr::Nil) {
                    r
                } else if unchanged(grammar, left, l)
                    && unchanged(grammar, right, r)
                {
                    expr
                } else {
                    grammar.arena.push(Expr::Alt { left: l, right: r })
                }
            }
            Expr::Cat { first, second } => {
                let f = simplify(grammar, first);
                let s = simplify(grammar, second);
                match (shape(grammar, f), shape(grammar, s)) {
                    (Some(Expr::Nil), _) => f,
                    (_, Some(Expr::Nil)) => s,
                    (Some(Expr::Empty), _) => s,
                    (_, Some(Expr::Empty)) => f,
                    _ if unchanged(grammar, first, f)
                        && unchanged(grammar, second, s) =>
                    {
                        expr
                    }
                    _ => grammar.arena.push(Expr::Cat { first: f, second: s }),
                }
            }
            Expr::Not(lang) => {
                let simplified = simplify(grammar, lang);
                match shape(grammar, simplified) {
                    Some(Expr::Not(inner)) => grammar.arena.force(inner),
                    _ => rebuild(grammar, expr, lang, simplified, Expr::Not),
                }
            }
            Expr::Opt(lang) => {
                let simplified = simplify(grammar, lang);
                match shape(grammar, simplified) {
                    Some(Expr::Nil | Expr::Empty) => grammar.arena.empty(),
                    _ => rebuild(grammar, expr, lang, simplified, Expr::Opt),
                }
            }
            Expr::Plus(lang) => {
                let simplified = simplify(grammar, lang);
                match shape(grammar, simplified) {
                    Some(Expr::Nil | Expr::Empty) => simplified,
                    _ => rebuild(grammar, expr, lang, simplified, Expr::Plus),
                }
            }
            Expr::Range { from, to } if from == to => {
                grammar.arena.push(Expr::Char(from))
            }
            Expr::Rep { lang, n } => match n {
                Count::Finite(0) => grammar.arena.empty(),
                Count::Finite(1) => simplify(grammar, lang),
                Count::Infinite => {
                    let simplified = simplify(grammar, lang);
                    grammar.arena.push(Expr::Star(simplified))
                }
                Count::Finite(n) => {
                    let simplified = simplify(grammar, lang);
                    rebuild(grammar, expr, lang, simplified, |lang| {
                        Expr::Rep { lang, n: Count::Finite(n) }
                    })
                }
            },
            Expr::Star(lang) => {
                let simplified = simplify(grammar, lang);
                match shape(grammar, simplified) {
                    Some(Expr::Nil | Expr::Empty) => grammar.arena.empty(),
                    Some(Expr::Star(_)) => simplified,
                    _ => rebuild(grammar, expr, lang, simplified, Expr::Star),
                }
            }
            Expr::Any
            | Expr::Char(_)
            | Expr::Empty
            | Expr::Nil
            | Expr::Range { .. }
            | Expr::Token(_) => expr,
        }
    }

    fn settle(
        grammar: &mut Grammar,
        _key: &ExprId,
        bottom: &ExprId,
        value: ExprId,
    ) -> ExprId {
        grammar.arena.bind(*bottom, value);
        value
    }
}

/// Returns the expression `id` stands for, or `None` if it is a reference
/// that is not bound yet.
fn shape(grammar: &Grammar, id: ExprId) -> Option<Expr> {
    if grammar.arena.is_unbound(grammar.arena.force(id)) {
        None
    } else {
        Some(grammar.arena.get(id))
    }
}

/// True if simplifying `operand` produced `simplified` without changes.
#[inline]
fn unchanged(grammar: &Grammar, operand: ExprId, simplified: ExprId) -> bool {
    grammar.arena.force(operand) == simplified
}

/// Returns `expr` if its only operand was not modified by simplification,
/// or a new expression built by `f` with the simplified operand.
fn rebuild<F>(
    grammar: &mut Grammar,
    expr: ExprId,
    operand: ExprId,
    simplified: ExprId,
    f: F,
) -> ExprId
where
    F: FnOnce(ExprId) -> Expr,
{
    if unchanged(grammar, operand, simplified) {
        expr
    } else {
        grammar.arena.push(f(simplified))
    }
}
