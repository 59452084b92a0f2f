/*! A Pratt parser that works on the tokens produced by the tokenizer.

Pratt parsing is a well-known algorithm. For more information see [1], [2]
and [3].

[1]: https://matklad.github.io/2020/04/13/simple-but-powerful-pratt-parsing.html
[2]: https://martin.janiczek.cz/2023/07/03/demystifying-pratt-parsers.html
[3]: https://abarker.github.io/typped/pratt_parsing_intro.html
*/

use std::fmt::Debug;
use std::hash::Hash;

use log::*;
use rustc_hash::FxHashMap;

use crate::errors::Error;
use crate::tokenizer::Token;


/// Handler invoked when a token appears at the start of an expression
/// ("null denotation"). Receives the token, which was already consumed.
pub type Nud<'src, K, T> =
    fn(&mut Parser<'src, K, T>, Token<K>) -> Result<T, Error>;

/// Handler invoked when a token appears after an expression ("left
/// denotation"). Receives the token, which was already consumed, and the
/// expression at its left.
pub type Led<'src, K, T> =
    fn(&mut Parser<'src, K, T>, Token<K>, T) -> Result<T, Error>;

struct Symbol<'src, K, T> {
    name: String,
    /// Left binding power.
    lbp: u8,
    nud: Option<Nud<'src, K, T>>,
    led: Option<Led<'src, K, T>>,
}

/// Parses a sequence of tokens into a value of type `T`.
///
/// Every kind of token is described by a symbol, registered with
/// [`Parser::symbol`], that has a name (used in error messages) and a left
/// binding power. The higher the binding power, the tighter the operator
/// binds to the expression at its left. Tokens whose kind was never
/// registered have binding power 0, so they end any expression, which is
/// what closing delimiters need.
///
/// Handlers registered with [`Parser::prefix`] and [`Parser::infix`] build
/// the result. Infix operators usually parse their right operand with
/// [`Parser::expression`] passing their own binding power, which makes
/// them left-associative. Passing the binding power minus one makes them
/// right-associative.
pub struct Parser<'src, K, T> {
    source: &'src str,
    tokens: Vec<Token<K>>,
    /// Index of the next token to be consumed.
    pos: usize,
    symbols: FxHashMap<K, Symbol<'src, K, T>>,
}

impl<'src, K, T> Parser<'src, K, T>
where
    K: Copy + Debug + Eq + Hash,
{
    /// Creates a parser for `tokens`, which were obtained from `source`.
    pub fn new(source: &'src str, tokens: Vec<Token<K>>) -> Self {
        Self { source, tokens, pos: 0, symbols: FxHashMap::default() }
    }

    /// Registers the symbol for tokens of the given kind, or updates its
    /// name and binding power if it was already registered.
    pub fn symbol(&mut self, kind: K, name: &str, lbp: u8) -> &mut Self {
        let symbol = self.symbol_mut(kind);
        symbol.name = name.to_string();
        symbol.lbp = lbp;
        self
    }

    /// Sets the handler for tokens of the given kind when they appear at
    /// the start of an expression.
    pub fn prefix(&mut self, kind: K, nud: Nud<'src, K, T>) -> &mut Self {
        self.symbol_mut(kind).nud = Some(nud);
        self
    }

    /// Sets the handler for tokens of the given kind when they appear after
    /// an expression.
    pub fn infix(&mut self, kind: K, led: Led<'src, K, T>) -> &mut Self {
        self.symbol_mut(kind).led = Some(led);
        self
    }

    /// Parses the whole input as a single expression.
    pub fn parse(&mut self) -> Result<T, Error> {
        let result = self.expression(0)?;

        if let Some(token) = self.tokens.get(self.pos) {
            return Err(Error::TrailingInput {
                found: self.name(token.kind),
                span: token.span.clone(),
            });
        }

        Ok(result)
    }

    /// Parses an expression, stopping at the first token whose left binding
    /// power is not greater than `rbp`.
    pub fn expression(&mut self, rbp: u8) -> Result<T, Error> {
        let Some(token) = self.advance() else {
            return Err(Error::UnexpectedEnd {
                expected: "expression".to_string(),
            });
        };

        let nud = self.symbols.get(&token.kind).and_then(|symbol| symbol.nud);

        let Some(nud) = nud else {
            return Err(Error::UndefinedNud {
                name: self.name(token.kind),
                span: token.span,
            });
        };

        trace!("nud {:?} at {}", token.kind, token.span);

        let mut left = nud(self, token)?;

        while let Some(kind) = self.peek() {
            if rbp >= self.lbp(kind) {
                break;
            }

            let Some(token) = self.advance() else {
                break;
            };

            let led =
                self.symbols.get(&token.kind).and_then(|symbol| symbol.led);

            let Some(led) = led else {
                return Err(Error::UndefinedLed {
                    name: self.name(token.kind),
                    span: token.span,
                });
            };

            trace!("led {:?} at {}", token.kind, token.span);

            left = led(self, token, left)?;
        }

        Ok(left)
    }

    /// Consumes the next token and returns it, or returns `None` at the end
    /// of the input.
    pub fn advance(&mut self) -> Option<Token<K>> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    /// Returns the kind of the next token without consuming it.
    pub fn peek(&self) -> Option<K> {
        self.tokens.get(self.pos).map(|token| token.kind)
    }

    /// Consumes the next token, which must be of the given kind.
    pub fn expect(&mut self, kind: K) -> Result<Token<K>, Error> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(Error::UnexpectedToken {
                expected: self.name(kind),
                found: self.name(token.kind),
                span: token.span,
            }),
            None => Err(Error::UnexpectedEnd { expected: self.name(kind) }),
        }
    }

    /// Returns the text of a token.
    #[inline]
    pub fn text(&self, token: &Token<K>) -> &'src str {
        &self.source[token.span.range()]
    }
}

impl<'src, K, T> Parser<'src, K, T>
where
    K: Copy + Debug + Eq + Hash,
{
    fn symbol_mut(&mut self, kind: K) -> &mut Symbol<'src, K, T> {
        self.symbols.entry(kind).or_insert_with(|| Symbol {
            name: format!("{:?}", kind),
            lbp: 0,
            nud: None,
            led: None,
        })
    }

    fn lbp(&self, kind: K) -> u8 {
        self.symbols.get(&kind).map_or(0, |symbol| symbol.lbp)
    }

    fn name(&self, kind: K) -> String {
        match self.symbols.get(&kind) {
            Some(symbol) => symbol.name.clone(),
            None => format!("{:?}", kind),
        }
    }
}
