/*! Tokenizes and parses text using regular languages from [`relang`].

The [`Tokenizer`] doesn't compile its rules into an automaton. Every rule in
a [`Lexicon`] is an expression in a [`relang::Grammar`], and all of them are
derived in lock-step with respect to each character of the input. The
longest prefix accepted by some rule becomes the next token. When more than
one rule accepts that prefix, the rule that was added first wins. Because
rules are arbitrary expressions, they can be recursive, so a single token
can describe things like balanced parenthesis.

The [`Parser`] is a Pratt parser (also known as "top down operator
precedence" parser) that consumes the tokens produced by the tokenizer.
Each kind of token is associated to a symbol that has a left binding power
and, optionally, a handler for when the token appears at the start of an
expression (`nud`) and a handler for when it appears after an expression
(`led`).

# Example

```rust
# use relang_parser::{Lexicon, Parser, Token, Error};
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Number,
    Plus,
}

let mut lexicon = Lexicon::new();
let grammar = lexicon.grammar_mut();
let digit = grammar.range('0', '9').unwrap();
let digits = grammar.plus(digit);

lexicon.rule(Kind::Number, digits).rule(Kind::Plus, '+').skip(' ');

let source = "1 + 22";
let tokens = lexicon.tokens(source).unwrap();

fn number(p: &mut Parser<Kind, u64>, t: Token<Kind>) -> Result<u64, Error> {
    Ok(p.text(&t).parse().unwrap())
}

fn add(
    p: &mut Parser<Kind, u64>,
    _: Token<Kind>,
    left: u64,
) -> Result<u64, Error> {
    Ok(left + p.expression(10)?)
}

let mut parser = Parser::new(source, tokens);

parser
    .symbol(Kind::Number, "number", 0)
    .prefix(Kind::Number, number)
    .symbol(Kind::Plus, "+", 10)
    .infix(Kind::Plus, add);

assert_eq!(parser.parse(), Ok(23));
```
*/

#![deny(missing_docs)]

use std::fmt::{Display, Formatter};
use std::ops::Range;

pub use errors::Error;
pub use parser::Led;
pub use parser::Nud;
pub use parser::Parser;
pub use tokenizer::Lexicon;
pub use tokenizer::Token;
pub use tokenizer::Tokenizer;

mod errors;
mod parser;
mod tokenizer;

/// Starting and ending positions of some token inside the source code.
#[derive(Default, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Span(pub Range<u32>);

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self(value.start as u32..value.end as u32)
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{}]", self.start(), self.end())
    }
}

impl Span {
    const MAX: usize = u32::MAX as usize;

    /// Offset within the source code (in bytes) were the span starts.
    #[inline]
    pub fn start(&self) -> usize {
        self.0.start as usize
    }

    /// Offset within the source code (in bytes) where the span ends.
    #[inline]
    pub fn end(&self) -> usize {
        self.0.end as usize
    }

    /// Returns the span as a range of byte offsets.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.0.start as usize..self.0.end as usize
    }

    /// Returns a new [`Span`] that combines this span with `other`.
    ///
    /// The resulting span goes from `self.start()` to `other.end()`.
    ///
    /// ```
    /// # use relang_parser::Span;
    /// assert_eq!(Span(0..2).combine(&Span(4..6)), Span(0..6))
    /// ```
    pub fn combine(&self, other: &Self) -> Self {
        Self(self.0.start..other.0.end)
    }
}
