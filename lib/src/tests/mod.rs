/*! End-to-end tests. */
use pretty_assertions::assert_eq;

use crate::{Count, ExprId, Grammar};

macro_rules! test_matches {
    ($g:ident, $expr:expr, $text:literal, $expected_result:expr) => {{
        let result = $g.matches($expr, $text).expect("match should not fail");
        assert_eq!(
            result,
            $expected_result,
            "\n\n`{}` matching {:?} should be {}, but it is {}",
            $g.render($expr),
            $text,
            $expected_result,
            !$expected_result
        );
    }};
}

macro_rules! matches_true {
    ($g:ident, $expr:expr, $text:literal) => {{
        test_matches!($g, $expr, $text, true);
    }};
}

macro_rules! matches_false {
    ($g:ident, $expr:expr, $text:literal) => {{
        test_matches!($g, $expr, $text, false);
    }};
}

#[test]
fn single_operators() {
    let mut g = Grammar::new();

    let a = g.char('a');
    let b = g.char('b');

    let e = g.alt(a, b);
    matches_true!(g, e, "a");
    matches_true!(g, e, "b");
    matches_false!(g, e, "c");
    matches_false!(g, e, "");
    matches_false!(g, e, "ab");

    let e = g.any();
    matches_true!(g, e, "a");
    matches_true!(g, e, "ñ");
    matches_false!(g, e, "ab");

    let e = g.cat(a, b);
    matches_true!(g, e, "ab");
    matches_false!(g, e, "a");
    matches_false!(g, e, "ba");
    matches_false!(g, e, "abb");

    matches_true!(g, a, "a");
    matches_false!(g, a, "b");

    let e = g.empty();
    matches_true!(g, e, "");
    matches_false!(g, e, "a");

    let e = g.nil();
    matches_false!(g, e, "");
    matches_false!(g, e, "a");
    matches_false!(g, e, "b");

    let e = g.not(a);
    matches_false!(g, e, "a");
    matches_true!(g, e, "b");
    matches_true!(g, e, "");
    matches_true!(g, e, "aa");

    let e = g.plus(a);
    matches_true!(g, e, "a");
    matches_true!(g, e, "aa");
    matches_false!(g, e, "");
    matches_false!(g, e, "ab");

    let e = g.opt(a);
    matches_true!(g, e, "");
    matches_true!(g, e, "a");
    matches_false!(g, e, "b");
    matches_false!(g, e, "aa");

    let e = g.range('a', 'b').unwrap();
    matches_true!(g, e, "a");
    matches_true!(g, e, "b");
    matches_false!(g, e, "c");

    let e = g.rep(a, 0);
    matches_true!(g, e, "");
    matches_false!(g, e, "a");

    let e = g.rep(a, 1);
    matches_true!(g, e, "a");
    matches_false!(g, e, "aa");

    let e = g.rep(a, 2);
    matches_true!(g, e, "aa");
    matches_false!(g, e, "a");
    matches_false!(g, e, "aaa");

    let e = g.rep(a, Count::Infinite);
    matches_true!(g, e, "");
    matches_true!(g, e, "aaaa");

    let e = g.star(a);
    matches_true!(g, e, "");
    matches_true!(g, e, "a");
    matches_true!(g, e, "aa");
    matches_false!(g, e, "ab");

    let e = g.token("abc");
    matches_true!(g, e, "abc");
    matches_false!(g, e, "ab");
    matches_false!(g, e, "abcd");
    matches_false!(g, e, "");

    let e = g.token("");
    matches_false!(g, e, "");
}

#[test]
fn hex() {
    let mut g = Grammar::new();

    let digit = g.range('0', '9').unwrap();
    let letter = g.range('a', 'f').unwrap();
    let hex = g.alt(digit, letter);
    let hex6 = g.rep(hex, 6);

    matches_true!(g, hex6, "123456");
    matches_true!(g, hex6, "abcdef");
    matches_true!(g, hex6, "123abc");
    matches_true!(g, hex6, "abc123");
    matches_false!(g, hex6, "cafebabe");
    matches_false!(g, hex6, "deadbeef");
    matches_false!(g, hex6, "12345");
    matches_false!(g, hex6, "1234567");
    matches_false!(g, hex6, "12345g");
}

#[test]
fn zip_code() {
    let mut g = Grammar::new();

    let digit = g.range('0', '9').unwrap();
    let five = g.rep(digit, 5);
    let four = g.rep(digit, 4);
    let dash = g.char('-');
    let zip = g.seq([five, dash, four]);

    matches_true!(g, zip, "12345-1234");
    matches_false!(g, zip, "12345-123");
    matches_false!(g, zip, "1234-1234");
    matches_false!(g, zip, "12345-12345");
    matches_false!(g, zip, "123451234");
}

#[test]
fn credit_card() {
    let mut g = Grammar::new();

    let digit = g.range('0', '9').unwrap();
    let digit4 = g.rep(digit, 4);
    let component = g.cat(digit4, '-');
    let components = g.rep(component, 3);
    let card = g.cat(components, digit4);

    matches_true!(g, card, "1234-1234-1234-1234");
    matches_false!(g, card, "1234-1234-1234-123");
    matches_false!(g, card, "1234-1234-1234-12345");
    matches_false!(g, card, "1234-1234-1234-1234-1234");
}

#[test]
fn identifiers() {
    let mut g = Grammar::new();

    // [a-zA-Z_][a-zA-Z0-9_]*
    let lower = g.range('a', 'z').unwrap();
    let upper = g.range('A', 'Z').unwrap();
    let digit = g.range('0', '9').unwrap();
    let underscore = g.char('_');
    let first = g.choice([lower, upper, underscore]);
    let rest = g.alt(first, digit);
    let rest = g.star(rest);
    let ident = g.cat(first, rest);

    matches_true!(g, ident, "foo");
    matches_true!(g, ident, "_foo_bar2");
    matches_true!(g, ident, "X");
    matches_false!(g, ident, "2foo");
    matches_false!(g, ident, "foo-bar");
    matches_false!(g, ident, "");
}

#[test]
fn complement() {
    let mut g = Grammar::new();

    // Anything but the keyword "if".
    let keyword = g.token("if");
    let not_keyword = g.not(keyword);

    matches_true!(g, not_keyword, "i");
    matches_true!(g, not_keyword, "iff");
    matches_true!(g, not_keyword, "of");
    matches_false!(g, not_keyword, "if");
}

/// `S = S ( S ) | ε`
fn balanced_parens(g: &mut Grammar) -> ExprId {
    g.recursive(|g, s| {
        let open = g.char('(');
        let close = g.char(')');
        let group = g.seq([s, open, s, close]);
        let empty = g.empty();
        g.alt(group, empty)
    })
}

#[test]
fn balanced_parens_matches() {
    let mut g = Grammar::new();
    let s = balanced_parens(&mut g);

    assert!(g.get(s).is_alt());
    assert!(g.contains_empty(s));
    assert!(g.equals(s, s));
    assert_eq!(g.height(s), 5);

    matches_true!(g, s, "");
    matches_true!(g, s, "()");
    matches_true!(g, s, "(()())");
    matches_true!(g, s, "(())");
    matches_true!(g, s, "()()()");
    matches_true!(g, s, "((()))(())");
}

#[test]
fn balanced_parens_unbalanced() {
    let mut g = Grammar::new();
    let s = balanced_parens(&mut g);

    matches_false!(g, s, "(");
    matches_false!(g, s, ")");
    matches_false!(g, s, "(()");
    matches_false!(g, s, "())");
    matches_false!(g, s, "(()))");
    matches_false!(g, s, ")(");
    matches_false!(g, s, "(a)");
}

#[test]
fn balanced_parens_deriv() {
    let mut g = Grammar::new();
    let s = balanced_parens(&mut g);

    // D( S = D( S ( S ) | D( ε
    let ds = g.deriv(s, '(').unwrap();

    let expected = g.recursive(|g, this| {
        let open = g.char('(');
        let close = g.char(')');
        // D( (S () = D( S ( | D( (
        let head = g.cat(this, open);
        let head = g.alt(head, g.empty());
        let group = g.seq([head, s, close]);
        g.alt(group, g.nil())
    });

    assert!(g.equals(ds, expected));
}

/// ```text
/// EXPR   = EXPR + TERM | TERM
/// TERM   = TERM * FACTOR | FACTOR
/// FACTOR = ( EXPR ) | NUMBER
/// NUMBER = [0-9]
/// ```
fn arithmetic(g: &mut Grammar) -> ExprId {
    let expr = g.declare();
    let term = g.declare();
    let factor = g.declare();

    let plus = g.char('+');
    let sum = g.seq([expr, plus, term]);
    let expr_body = g.alt(sum, term);

    let times = g.char('*');
    let product = g.seq([term, times, factor]);
    let term_body = g.alt(product, factor);

    let open = g.char('(');
    let close = g.char(')');
    let group = g.seq([open, expr, close]);
    let number = g.range('0', '9').unwrap();
    let factor_body = g.alt(group, number);

    g.define(expr, expr_body).unwrap();
    g.define(term, term_body).unwrap();
    g.define(factor, factor_body).unwrap();

    expr
}

#[test]
fn arithmetic_matches() {
    let mut g = Grammar::new();
    let expr = arithmetic(&mut g);

    matches_true!(g, expr, "1");
    matches_true!(g, expr, "1+2");
    matches_true!(g, expr, "1+2*3");
    matches_true!(g, expr, "(1+2)*3");
    matches_true!(g, expr, "(1+2)*(3+4)");
    matches_true!(g, expr, "1+2*(3+4)");
    matches_true!(g, expr, "((7))");
}

#[test]
fn arithmetic_does_not_match() {
    let mut g = Grammar::new();
    let expr = arithmetic(&mut g);

    matches_false!(g, expr, "");
    matches_false!(g, expr, "1+");
    matches_false!(g, expr, "+2");
    matches_false!(g, expr, "1+2*");
    matches_false!(g, expr, "*3");
    matches_false!(g, expr, "1+2*3+");
    matches_false!(g, expr, "(1+2)*3+");
    matches_false!(g, expr, "(1+2)*(3+4)+");
    matches_false!(g, expr, "1+2*(3+4)+");
    matches_false!(g, expr, "(1+2");
    matches_false!(g, expr, "12");
}

#[test]
fn shared_grammar() {
    let mut g = Grammar::new();

    // Results computed for one expression are reused by others that share
    // sub-expressions with it.
    let s = balanced_parens(&mut g);
    let expr = arithmetic(&mut g);
    let either = g.alt(s, expr);

    matches_true!(g, s, "(())");
    matches_true!(g, expr, "(1)");
    matches_true!(g, either, "(())");
    matches_true!(g, either, "(1)");
    matches_false!(g, either, "(()");
}

#[test]
fn without_simplifying_each_step() {
    let mut config = crate::Config::default();
    config.simplify.each_step = false;

    let mut g = Grammar::with_config(config);
    let s = balanced_parens(&mut g);

    matches_true!(g, s, "(()())");
    matches_false!(g, s, "(()");
}
