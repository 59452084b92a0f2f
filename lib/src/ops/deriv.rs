use crate::errors::Error;
use crate::grammar::Grammar;
use crate::ir::{Count, Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::{contains_empty, deriv};

/// Brzozowski derivative with respect to a single character.
///
/// The provisional result for a derivative in progress is a reference that
/// gets bound to the final result once it is known. A derivative that
/// depends on itself, which happens with left-recursive rules like
/// `S = S ( S ) | ε`, produces a residual expression that refers back to
/// itself through that reference.
pub(super) struct Derivative;

impl Recursion<Grammar> for Derivative {
    type Key = (ExprId, char);
    type Value = ExprId;

    fn table(grammar: &mut Grammar) -> &mut Fix<(ExprId, char), ExprId> {
        &mut grammar.caches.deriv
    }

    fn bottom(grammar: &mut Grammar, _key: &(ExprId, char)) -> ExprId {
        grammar.arena.reserve()
    }

    fn step(grammar: &mut Grammar, &(expr, c): &(ExprId, char)) -> ExprId {
        match grammar.arena.get(expr) {
            Expr::Alt { left, right } => {
                let left = deriv(grammar, left, c);
                let right = deriv(grammar, right, c);
                grammar.arena.push(Expr::Alt { left, right })
            }
            Expr::Any => grammar.arena.empty(),
            Expr::Cat { first, second } => {
                let head = deriv(grammar, first, c);
                let cat =
                    grammar.arena.push(Expr::Cat { first: head, second });
                if contains_empty(grammar, first) {
                    let tail = deriv(grammar, second, c);
                    grammar.arena.push(Expr::Alt { left: cat, right: tail })
                } else {
                    cat
                }
            }
            Expr::Char(value) => {
                if value == c {
                    grammar.arena.empty()
                } else {
                    grammar.arena.nil()
                }
            }
            Expr::Empty | Expr::Nil => grammar.arena.nil(),
            Expr::Not(lang) => {
                let lang = deriv(grammar, lang, c);
                grammar.arena.push(Expr::Not(lang))
            }
            Expr::Opt(lang) => {
                let right = grammar.arena.empty();
                let alt = grammar.arena.push(Expr::Alt { left: lang, right });
                deriv(grammar, alt, c)
            }
            Expr::Plus(lang) => {
                let head = deriv(grammar, lang, c);
                let star = grammar.arena.push(Expr::Star(lang));
                grammar.arena.push(Expr::Cat { first: head, second: star })
            }
            Expr::Star(lang) => {
                let head = deriv(grammar, lang, c);
                grammar.arena.push(Expr::Cat { first: head, second: expr })
            }
            Expr::Range { from, to } => {
                let target = if (from..=to).contains(&c) {
                    grammar.arena.push(Expr::Char(c))
                } else {
                    grammar.arena.nil()
                };
                deriv(grammar, target, c)
            }
            Expr::Rep { lang, n } => match n {
                Count::Finite(0) => grammar.arena.empty(),
                Count::Finite(1) => deriv(grammar, lang, c),
                Count::Finite(n) => {
                    let head = deriv(grammar, lang, c);
                    let rest = grammar
                        .arena
                        .push(Expr::Rep { lang, n: Count::Finite(n - 1) });
                    grammar.arena.push(Expr::Cat { first: head, second: rest })
                }
                Count::Infinite => {
                    grammar.fail(Error::UnboundedRepetition);
                    grammar.arena.nil()
                }
            },
            Expr::Token(literal) => {
                let literal = grammar.arena.literal(literal).to_owned();
                let mut chars = literal.chars();
                match chars.next() {
                    None => {
                        let empty = grammar.arena.empty();
                        deriv(grammar, empty, c)
                    }
                    Some(head) => {
                        let head = grammar.arena.push(Expr::Char(head));
                        let head = deriv(grammar, head, c);
                        let tail = chars.as_str();
                        if tail.is_empty() {
                            head
                        } else {
                            let tail = grammar.token(tail);
                            grammar
                                .arena
                                .push(Expr::Cat { first: head, second: tail })
                        }
                    }
                }
            }
        }
    }

    fn settle(
        grammar: &mut Grammar,
        _key: &(ExprId, char),
        bottom: &ExprId,
        value: ExprId,
    ) -> ExprId {
        grammar.arena.bind(*bottom, value);
        value
    }
}
