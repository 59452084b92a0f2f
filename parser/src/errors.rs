use thiserror::Error;

use crate::Span;

/// Errors returned while tokenizing or parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Some of the expressions in the lexicon can't be derived.
    #[error(transparent)]
    Grammar(#[from] relang::Error),

    /// No rule in the lexicon accepts the text that starts with this
    /// character.
    #[error("unexpected character {character:?} at {span}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Location of the character.
        span: Span,
    },

    /// A token that can't start an expression was found at the start of
    /// an expression.
    #[error("`{name}` can't start an expression, found at {span}")]
    UndefinedNud {
        /// Name of the symbol.
        name: String,
        /// Location of the token.
        span: Span,
    },

    /// A token that can't follow an expression was found after an
    /// expression.
    #[error("`{name}` can't follow an expression, found at {span}")]
    UndefinedLed {
        /// Name of the symbol.
        name: String,
        /// Location of the token.
        span: Span,
    },

    /// A token different from the expected one was found.
    #[error("expected `{expected}`, found `{found}` at {span}")]
    UnexpectedToken {
        /// Name of the expected symbol.
        expected: String,
        /// Name of the symbol actually found.
        found: String,
        /// Location of the token found.
        span: Span,
    },

    /// The input ended before the parser was done.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was expecting.
        expected: String,
    },

    /// The parser completed an expression but some tokens remain.
    #[error("unexpected `{found}` after the end of the expression at {span}")]
    TrailingInput {
        /// Name of the first symbol after the expression.
        found: String,
        /// Location of the token.
        span: Span,
    },
}
