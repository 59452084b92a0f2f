use pretty_assertions::assert_eq;

use super::{Lexicon, Token};
use crate::{Error, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    If,
    Ident,
    Number,
    Parens,
}

fn token(kind: Kind, span: std::ops::Range<u32>) -> Token<Kind> {
    Token { kind, span: Span(span) }
}

/// Adds the rules for identifiers, numbers and blanks.
fn common_rules(lexicon: &mut Lexicon<Kind>) {
    let g = lexicon.grammar_mut();

    let letter = g.range('a', 'z').unwrap();
    let ident = g.plus(letter);
    let digit = g.range('0', '9').unwrap();
    let number = g.plus(digit);
    let blank = g.choice([' ', '\t', '\n']);
    let blanks = g.plus(blank);

    lexicon.rule(Kind::Ident, ident).rule(Kind::Number, number).skip(blanks);
}

fn keywords_first() -> Lexicon<Kind> {
    let mut lexicon = Lexicon::new();
    lexicon.rule(Kind::If, "if");
    common_rules(&mut lexicon);
    lexicon
}

#[test]
fn keywords() {
    let mut lexicon = keywords_first();
    let mut tokenizer = lexicon.tokenize("if iff x");

    assert_eq!(tokenizer.next_token(), Ok(Some(token(Kind::If, 0..2))));
    assert_eq!(tokenizer.next_token(), Ok(Some(token(Kind::Ident, 3..6))));
    assert_eq!(tokenizer.next_token(), Ok(Some(token(Kind::Ident, 7..8))));
    assert_eq!(tokenizer.next_token(), Ok(None));
}

#[test]
fn earliest_rule_wins() {
    // Same rules, but identifiers come before the keyword.
    let mut lexicon = Lexicon::new();
    common_rules(&mut lexicon);
    lexicon.rule(Kind::If, "if");

    assert_eq!(lexicon.tokens("if"), Ok(vec![token(Kind::Ident, 0..2)]));
}

#[test]
fn maximal_munch() {
    let mut lexicon = keywords_first();

    assert_eq!(
        lexicon.tokens("ifx"),
        Ok(vec![token(Kind::Ident, 0..3)])
    );

    assert_eq!(
        lexicon.tokens("123abc"),
        Ok(vec![token(Kind::Number, 0..3), token(Kind::Ident, 3..6)])
    );

    assert_eq!(
        lexicon.tokens("x1\n22"),
        Ok(vec![
            token(Kind::Ident, 0..1),
            token(Kind::Number, 1..2),
            token(Kind::Number, 3..5)
        ])
    );
}

#[test]
fn skip_rules() {
    let mut lexicon = keywords_first();

    assert_eq!(lexicon.tokens(""), Ok(vec![]));
    assert_eq!(lexicon.tokens(" \t\n "), Ok(vec![]));
    assert_eq!(
        lexicon.tokens("  if  "),
        Ok(vec![token(Kind::If, 2..4)])
    );
}

#[test]
fn unexpected_character() {
    let mut lexicon = keywords_first();
    let mut tokenizer = lexicon.tokenize("ab $ cd");

    assert_eq!(tokenizer.next_token(), Ok(Some(token(Kind::Ident, 0..2))));
    assert_eq!(
        tokenizer.next_token(),
        Err(Error::UnexpectedCharacter { character: '$', span: Span(3..4) })
    );
    // Nothing else is produced after an error.
    assert_eq!(tokenizer.next_token(), Ok(None));

    // Spans are byte offsets.
    assert_eq!(
        lexicon.tokens("añ"),
        Err(Error::UnexpectedCharacter { character: 'ñ', span: Span(1..3) })
    );
}

#[test]
fn recursive_rules() {
    let mut lexicon = Lexicon::new();
    let g = lexicon.grammar_mut();

    // S = S ( S ) | ε
    let parens = g.recursive(|g, s| {
        let open = g.char('(');
        let close = g.char(')');
        let group = g.seq([s, open, s, close]);
        let empty = g.empty();
        g.alt(group, empty)
    });

    lexicon.rule(Kind::Parens, parens).skip(' ');

    assert_eq!(
        lexicon.tokens("(())() ()"),
        Ok(vec![token(Kind::Parens, 0..6), token(Kind::Parens, 7..9)])
    );

    // The empty string is never a token.
    assert_eq!(
        lexicon.tokens("(()"),
        Err(Error::UnexpectedCharacter { character: '(', span: Span(0..1) })
    );

    assert_eq!(
        lexicon.tokens("()(").unwrap_err(),
        Error::UnexpectedCharacter { character: '(', span: Span(2..3) }
    );
}

#[test]
fn undefined_reference() {
    let mut lexicon = Lexicon::new();
    let g = lexicon.grammar_mut();

    let r = g.declare();
    let e = g.cat('a', r);

    lexicon.rule(Kind::Ident, e);

    assert_eq!(
        lexicon.tokens("ab"),
        Err(Error::Grammar(relang::Error::UndefinedReference(r)))
    );
}

#[test]
fn iterator() {
    let mut lexicon = keywords_first();

    let kinds: Vec<Kind> = lexicon
        .tokenize("if a 1")
        .map(|token| token.unwrap().kind)
        .collect();

    assert_eq!(kinds, vec![Kind::If, Kind::Ident, Kind::Number]);
}
