/*! Splits text into tokens using derivatives of regular languages.

A [`Lexicon`] is a list of rules, each one described by an expression in a
[`Grammar`]. Rules are either token rules, that produce a [`Token`] of some
kind, or skip rules, whose matches are consumed silently (whitespace,
comments, etc).
*/

use std::fmt::Debug;

use log::*;
use relang::{ExprId, Grammar, IntoExpr};

use crate::errors::Error;
use crate::Span;

#[cfg(test)]
mod tests;

/// A token produced by the [`Tokenizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    /// The kind of token, as given to [`Lexicon::rule`].
    pub kind: K,
    /// Location of the token within the source code.
    pub span: Span,
}

struct Rule<K> {
    /// `None` for skip rules.
    kind: Option<K>,
    expr: ExprId,
}

/// An ordered set of tokenization rules.
///
/// Expressions used by the rules must be created in the lexicon's own
/// grammar, which is accessible with [`Lexicon::grammar_mut`].
pub struct Lexicon<K> {
    grammar: Grammar,
    rules: Vec<Rule<K>>,
}

impl<K: Copy + Debug> Default for Lexicon<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Debug> Lexicon<K> {
    /// Creates an empty lexicon with a new grammar.
    pub fn new() -> Self {
        Self::with_grammar(Grammar::new())
    }

    /// Creates an empty lexicon that uses an existing grammar.
    pub fn with_grammar(grammar: Grammar) -> Self {
        Self { grammar, rules: Vec::new() }
    }

    /// Returns the grammar where the expressions of the rules live.
    #[inline]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the grammar where the expressions of the rules live.
    #[inline]
    pub fn grammar_mut(&mut self) -> &mut Grammar {
        &mut self.grammar
    }

    /// Adds a rule that produces tokens of the given kind.
    ///
    /// Rules added first take precedence over rules added later when both
    /// accept the same text.
    pub fn rule(&mut self, kind: K, expr: impl IntoExpr) -> &mut Self {
        let expr = expr.into_expr(&mut self.grammar);
        self.rules.push(Rule { kind: Some(kind), expr });
        self
    }

    /// Adds a rule whose matches are discarded.
    pub fn skip(&mut self, expr: impl IntoExpr) -> &mut Self {
        let expr = expr.into_expr(&mut self.grammar);
        self.rules.push(Rule { kind: None, expr });
        self
    }

    /// Returns a [`Tokenizer`] that splits `source` into tokens.
    pub fn tokenize<'a>(&'a mut self, source: &'a str) -> Tokenizer<'a, K> {
        Tokenizer::new(self, source)
    }

    /// Splits `source` into tokens, failing at the first error.
    pub fn tokens(&mut self, source: &str) -> Result<Vec<Token<K>>, Error> {
        self.tokenize(source).collect()
    }

    /// Finds the longest prefix of `input` accepted by some rule.
    ///
    /// Returns the index of the rule and the length of the prefix in bytes,
    /// or `None` if no rule accepts a non-empty prefix.
    fn longest_match(
        &mut self,
        input: &str,
    ) -> Result<Option<(usize, usize)>, Error> {
        let grammar = &mut self.grammar;

        // The residual language of each rule after the characters seen so
        // far. `None` once the residual is ∅.
        let mut residuals: Vec<Option<ExprId>> = self
            .rules
            .iter()
            .map(|rule| Some(grammar.canonicalize(rule.expr)))
            .collect();

        let mut longest = None;

        for (offset, c) in input.char_indices() {
            let mut accepted_by = None;
            let mut alive = false;

            for (index, residual) in residuals.iter_mut().enumerate() {
                let Some(expr) = *residual else {
                    continue;
                };

                let next = grammar.deriv(expr, c)?;
                let next = grammar.canonicalize(next);

                if grammar.get(next).is_nil() {
                    *residual = None;
                    continue;
                }

                if accepted_by.is_none() && grammar.contains_empty(next) {
                    accepted_by = Some(index);
                }

                *residual = Some(next);
                alive = true;
            }

            if let Some(index) = accepted_by {
                longest = Some((index, offset + c.len_utf8()));
            }

            if !alive {
                break;
            }
        }

        Ok(longest)
    }
}

/// Takes source code and produces a sequence of tokens, according to the
/// rules in a [`Lexicon`].
///
/// Tokens are produced by maximal munch: at each position the longest text
/// accepted by any of the rules is consumed. Matches of skip rules are
/// consumed without producing tokens.
pub struct Tokenizer<'a, K> {
    lexicon: &'a mut Lexicon<K>,
    source: &'a str,
    /// Offset within the source code where the next token starts.
    offset: usize,
}

impl<'a, K: Copy + Debug> Tokenizer<'a, K> {
    /// Creates a new [`Tokenizer`].
    pub fn new(lexicon: &'a mut Lexicon<K>, source: &'a str) -> Self {
        // Can't handle source files greater than the maximum span size.
        assert!(source.len() < Span::MAX);
        Self { lexicon, source, offset: 0 }
    }

    /// Returns the source code passed to the tokenizer.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the next token, or `None` at the end of the source code.
    ///
    /// After an error the tokenizer doesn't produce more tokens.
    pub fn next_token(&mut self) -> Result<Option<Token<K>>, Error> {
        loop {
            let rest = &self.source[self.offset..];

            let Some(c) = rest.chars().next() else {
                return Ok(None);
            };

            let (index, len) = match self.lexicon.longest_match(rest) {
                Ok(Some(found)) => found,
                Ok(None) => {
                    let span =
                        Span::from(self.offset..self.offset + c.len_utf8());
                    self.offset = self.source.len();
                    return Err(Error::UnexpectedCharacter {
                        character: c,
                        span,
                    });
                }
                Err(err) => {
                    self.offset = self.source.len();
                    return Err(err);
                }
            };

            let span = Span::from(self.offset..self.offset + len);
            self.offset += len;

            match self.lexicon.rules[index].kind {
                Some(kind) => {
                    trace!("{:?} at {}", kind, span);
                    return Ok(Some(Token { kind, span }));
                }
                None => {
                    trace!("skipped {}", span);
                }
            }
        }
    }
}

impl<'a, K: Copy + Debug> Iterator for Tokenizer<'a, K> {
    type Item = Result<Token<K>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
