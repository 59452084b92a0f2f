/*! Regular languages matched with Brzozowski derivatives.

The derivative of a language `L` with respect to a character `c` is the
language of the strings that, prepended with `c`, belong to `L`. A string
`c₁c₂…cₙ` matches `L` if the language obtained by deriving `L` with respect
to `c₁`, then `c₂`, and so on, contains the empty string. No automaton is
built, the expression itself is the state.

Expressions live in a [`Grammar`], which owns their nodes and the
memoization tables used by every algorithm. Rules can refer to themselves
(directly or through other rules), which allows describing languages that
are not regular, like balanced parenthesis. Every algorithm in the crate is
total over such cyclic definitions.

# Example

```rust
# use relang::Grammar;
let mut grammar = Grammar::new();

// [0-9]{5}-[0-9]{4}
let digit = grammar.range('0', '9').unwrap();
let five = grammar.rep(digit, 5);
let four = grammar.rep(digit, 4);
let dash = grammar.char('-');
let zip = grammar.seq([five, dash, four]);

assert!(grammar.matches(zip, "12345-1234").unwrap());
assert!(!grammar.matches(zip, "12345-123").unwrap());
```
*/

#![deny(missing_docs)]

pub use config::load_config_from_file;
pub use config::Config;
pub use config::FixpointConfig;
pub use config::SimplifyConfig;

pub use errors::Error;

pub use grammar::Grammar;
pub use grammar::IntoExpr;

pub use ir::Count;
pub use ir::Expr;
pub use ir::ExprId;
pub use ir::LiteralId;

mod config;
mod errors;
mod grammar;
mod ir;
mod ops;
mod string_pool;

pub mod memo;

#[cfg(test)]
mod tests;
