use crate::grammar::Grammar;
use crate::ir::{Expr, ExprId};
use crate::memo::{Fix, Recursion};
use crate::ops::render;

/// Text shown in place of an expression that contains itself.
const SENTINEL: &str = "…";

/// Characters that must be escaped when they appear as a [`Expr::Char`].
const METACHARS: &[char] = &[
    '\\', '|', '(', ')', '.', '*', '+', '?', '[', ']', '{', '}', '¬', '"', 'ε',
    '∅', '…',
];

/// Textual representation of an expression.
pub(super) struct Render;

impl Recursion<Grammar> for Render {
    type Key = ExprId;
    type Value = String;

    fn table(grammar: &mut Grammar) -> &mut Fix<ExprId, String> {
        &mut grammar.caches.render
    }

    fn bottom(_grammar: &mut Grammar, _key: &ExprId) -> String {
        SENTINEL.to_string()
    }

    fn step(grammar: &mut Grammar, key: &ExprId) -> String {
        match grammar.arena.get(*key) {
            Expr::Alt { left, right } => {
                let left = operand(grammar, left);
                let right = operand(grammar, right);
                format!("{}|{}", left, right)
            }
            Expr::Any => ".".to_string(),
            Expr::Cat { first, second } => {
                let first = operand(grammar, first);
                let second = operand(grammar, second);
                format!("{}{}", first, second)
            }
            Expr::Char(c) => escape(c, METACHARS),
            Expr::Empty => "ε".to_string(),
            Expr::Nil => "∅".to_string(),
            Expr::Not(lang) => format!("¬{}", operand(grammar, lang)),
            Expr::Opt(lang) => format!("{}?", operand(grammar, lang)),
            Expr::Plus(lang) => format!("{}+", operand(grammar, lang)),
            Expr::Range { from, to } => {
                let bounds = &['\\', '-', ']'];
                format!("[{}-{}]", escape(from, bounds), escape(to, bounds))
            }
            Expr::Rep { lang, n } => {
                format!("{}{{{}}}", operand(grammar, lang), n)
            }
            Expr::Star(lang) => format!("{}*", operand(grammar, lang)),
            Expr::Token(literal) => {
                format!("{:?}", grammar.arena.literal(literal))
            }
        }
    }
}

/// Renders an operand, enclosed in parenthesis unless it is atomic.
fn operand(grammar: &mut Grammar, expr: ExprId) -> String {
    let s = render(grammar, expr);
    if grammar.arena.get(expr).is_atomic() {
        s
    } else {
        format!("({})", s)
    }
}

fn escape(c: char, special: &[char]) -> String {
    if special.contains(&c) {
        format!("\\{}", c)
    } else {
        c.to_string()
    }
}
