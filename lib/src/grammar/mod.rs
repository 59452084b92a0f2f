use log::*;

use crate::config::Config;
use crate::errors::Error;
use crate::ir::dfs::DepthFirstSearch;
use crate::ir::{Arena, Count, Expr, ExprId, LiteralId};
use crate::ops;
use crate::ops::Caches;


/// Types that can be used wherever an expression is expected.
///
/// A single character becomes [`Expr::Char`], any other string becomes
/// [`Expr::Token`], and an [`ExprId`] is passed through unchanged.
pub trait IntoExpr {
    /// Converts `self` into an expression in `grammar`.
    fn into_expr(self, grammar: &mut Grammar) -> ExprId;
}

impl IntoExpr for ExprId {
    #[inline]
    fn into_expr(self, _grammar: &mut Grammar) -> ExprId {
        self
    }
}

impl IntoExpr for char {
    #[inline]
    fn into_expr(self, grammar: &mut Grammar) -> ExprId {
        grammar.char(self)
    }
}

impl IntoExpr for &str {
    #[inline]
    fn into_expr(self, grammar: &mut Grammar) -> ExprId {
        grammar.token(self)
    }
}

impl IntoExpr for &String {
    #[inline]
    fn into_expr(self, grammar: &mut Grammar) -> ExprId {
        grammar.token(self)
    }
}

impl IntoExpr for String {
    #[inline]
    fn into_expr(self, grammar: &mut Grammar) -> ExprId {
        grammar.token(&self)
    }
}

/// A set of regular language expressions, together with the memoization
/// tables used by the algorithms that operate on them.
///
/// Expressions are created with the constructor methods ([`Grammar::alt`],
/// [`Grammar::seq`], [`Grammar::star`], etc.), which return the [`ExprId`]
/// of the new expression. Expressions are never modified after creation,
/// and can be shared as operands of any number of other expressions.
///
/// Recursive rules are created with [`Grammar::declare`] and
/// [`Grammar::define`], or with [`Grammar::recursive`]:
///
/// ```
/// # use relang::Grammar;
/// let mut grammar = Grammar::new();
///
/// // S = S ( S ) | ε
/// let s = grammar.recursive(|g, s| {
///     let open = g.char('(');
///     let close = g.char(')');
///     let group = g.seq([s, open, s, close]);
///     let empty = g.empty();
///     g.alt(group, empty)
/// });
///
/// assert!(grammar.matches(s, "(()())").unwrap());
/// assert!(!grammar.matches(s, "(()").unwrap());
/// ```
pub struct Grammar {
    pub(crate) arena: Arena,
    pub(crate) caches: Caches,
    pub(crate) config: Config,
    /// First error found while running a memoized algorithm. Algorithms
    /// can't return errors through the memoization tables, so they record
    /// them here.
    pub(crate) fault: Option<Error>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    /// Creates an empty grammar with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty grammar with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            arena: Arena::new(),
            caches: Caches::new(&config),
            config,
            fault: None,
        }
    }

    /// Returns the grammar's configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of nodes in the grammar, including the ones created while
    /// deriving and simplifying.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if the grammar contains only the predefined expressions `.`,
    /// `ε` and `∅`, which is the case right after creating it.
    ///
    /// This is about the number of nodes, not about languages. Use
    /// [`Expr::is_empty`] on the result of [`Grammar::get`] for checking
    /// whether some expression is `ε`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 3
    }

    /// Removes the results of every algorithm from the memoization tables.
    ///
    /// Results are kept across calls, so the tables grow with every
    /// expression and character seen. Expressions remain valid after
    /// clearing the tables.
    pub fn clear_caches(&mut self) {
        self.caches.clear();
    }
}

/// Constructors.
impl Grammar {
    /// `.`, matches any single character.
    #[inline]
    pub fn any(&self) -> ExprId {
        self.arena.any()
    }

    /// `ε`, matches only the empty string.
    #[inline]
    pub fn empty(&self) -> ExprId {
        self.arena.empty()
    }

    /// `∅`, matches nothing.
    #[inline]
    pub fn nil(&self) -> ExprId {
        self.arena.nil()
    }

    /// A single literal character.
    pub fn char(&mut self, c: char) -> ExprId {
        self.arena.push(Expr::Char(c))
    }

    /// A literal string. Strings of exactly one character produce the same
    /// expression as [`Grammar::char`].
    pub fn token(&mut self, value: &str) -> ExprId {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.char(c),
            _ => {
                let literal = self.arena.intern(value);
                self.arena.push(Expr::Token(literal))
            }
        }
    }

    /// `[from-to]`, matches any character in the inclusive range.
    pub fn range(&mut self, from: char, to: char) -> Result<ExprId, Error> {
        if from > to {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(self.arena.push(Expr::Range { from, to }))
    }

    /// `L1 | L2`
    pub fn alt(
        &mut self,
        left: impl IntoExpr,
        right: impl IntoExpr,
    ) -> ExprId {
        let left = left.into_expr(self);
        let right = right.into_expr(self);
        self.arena.push(Expr::Alt { left, right })
    }

    /// `L1 | L2 | ... | Ln`, grouped from the left. An empty sequence of
    /// alternatives produces `∅`.
    pub fn choice<I>(&mut self, langs: I) -> ExprId
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let mut langs = langs.into_iter();
        let first = match langs.next() {
            Some(first) => first.into_expr(self),
            None => return self.nil(),
        };
        langs.fold(first, |acc, lang| self.alt(acc, lang))
    }

    /// `L1 L2`
    pub fn cat(
        &mut self,
        first: impl IntoExpr,
        second: impl IntoExpr,
    ) -> ExprId {
        let first = first.into_expr(self);
        let second = second.into_expr(self);
        self.arena.push(Expr::Cat { first, second })
    }

    /// `L1 L2 ... Ln`, grouped from the left. An empty sequence produces
    /// `ε`.
    pub fn seq<I>(&mut self, langs: I) -> ExprId
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let mut langs = langs.into_iter();
        let first = match langs.next() {
            Some(first) => first.into_expr(self),
            None => return self.empty(),
        };
        langs.fold(first, |acc, lang| self.cat(acc, lang))
    }

    /// `¬L`
    pub fn not(&mut self, lang: impl IntoExpr) -> ExprId {
        let lang = lang.into_expr(self);
        self.arena.push(Expr::Not(lang))
    }

    /// `L?`
    pub fn opt(&mut self, lang: impl IntoExpr) -> ExprId {
        let lang = lang.into_expr(self);
        self.arena.push(Expr::Opt(lang))
    }

    /// `L+`
    pub fn plus(&mut self, lang: impl IntoExpr) -> ExprId {
        let lang = lang.into_expr(self);
        self.arena.push(Expr::Plus(lang))
    }

    /// `L*`
    pub fn star(&mut self, lang: impl IntoExpr) -> ExprId {
        let lang = lang.into_expr(self);
        self.arena.push(Expr::Star(lang))
    }

    /// `L{n}`, where `n` is either a `u32` or [`Count::Infinite`].
    pub fn rep(&mut self, lang: impl IntoExpr, n: impl Into<Count>) -> ExprId {
        let lang = lang.into_expr(self);
        self.arena.push(Expr::Rep { lang, n: n.into() })
    }

    /// Creates a reference to an expression that will be defined later with
    /// [`Grammar::define`]. The reference can be used as an operand right
    /// away, which allows defining recursive rules.
    pub fn declare(&mut self) -> ExprId {
        self.arena.reserve()
    }

    /// Defines the expression a reference created with
    /// [`Grammar::declare`] stands for.
    ///
    /// A reference defined as itself, directly or through other references,
    /// stands for `∅`.
    pub fn define(
        &mut self,
        reference: ExprId,
        expr: impl IntoExpr,
    ) -> Result<(), Error> {
        let expr = expr.into_expr(self);
        if !self.arena.is_ref(reference) {
            return Err(Error::NotAReference(reference));
        }
        if !self.arena.bind(reference, expr) {
            return Err(Error::AlreadyDefined(reference));
        }
        // Results computed while the reference was unbound saw it as `∅`.
        self.clear_caches();
        Ok(())
    }

    /// Creates a recursive rule. The closure receives a reference to the
    /// rule being defined and returns the rule's definition.
    pub fn recursive<F>(&mut self, f: F) -> ExprId
    where
        F: FnOnce(&mut Self, ExprId) -> ExprId,
    {
        let this = self.declare();
        let definition = f(self, this);
        // `this` was just declared, binding it can't fail.
        self.arena.bind(this, definition);
        self.clear_caches();
        this
    }
}

/// Queries.
impl Grammar {
    /// Resolves references, returning the ID of the expression `expr`
    /// stands for. Any other expression is returned unchanged.
    #[inline]
    pub fn force(&self, expr: ExprId) -> ExprId {
        self.arena.force(expr)
    }

    /// Returns the expression identified by `expr`, after resolving
    /// references. References that are not defined yet are seen as `∅`.
    #[inline]
    pub fn get(&self, expr: ExprId) -> Expr {
        self.arena.get(expr)
    }

    /// Returns the string of a token literal.
    #[inline]
    pub fn literal(&self, literal: LiteralId) -> &str {
        self.arena.literal(literal)
    }

    /// True if the language contains the empty string.
    pub fn contains_empty(&mut self, expr: ExprId) -> bool {
        ops::contains_empty(self, expr)
    }

    /// Structural equality. Recursive expressions are equal unless some
    /// difference is found.
    pub fn equals(&mut self, a: ExprId, b: ExprId) -> bool {
        ops::equals(self, a, b)
    }

    /// Height of the expression tree. Recursive references count as zero.
    pub fn height(&mut self, expr: ExprId) -> u32 {
        ops::height(self, expr)
    }

    /// Applies one pass of the simplification rules.
    pub fn simplify(&mut self, expr: ExprId) -> ExprId {
        ops::simplify(self, expr)
    }

    /// Simplifies `expr` repeatedly until it doesn't change anymore.
    pub fn canonicalize(&mut self, expr: ExprId) -> ExprId {
        let mut current = expr;

        for pass in 0..self.config.simplify.max_passes {
            let next = ops::simplify(self, current);
            if ops::equals(self, current, next) {
                trace!("{} canonicalized in {} passes", expr, pass + 1);
                return next;
            }
            current = next;
        }

        warn!(
            "{} not canonical after {} passes",
            expr, self.config.simplify.max_passes
        );

        current
    }

    /// Returns `ε` if the language contains the empty string and `∅` if not,
    /// keeping the structure of the expression (e.g: `a|b*` becomes `∅|ε`).
    pub fn nil_or_empty(&mut self, expr: ExprId) -> ExprId {
        ops::nil_or_empty(self, expr)
    }

    /// Textual representation of the expression.
    pub fn render(&mut self, expr: ExprId) -> String {
        ops::render(self, expr)
    }

    /// Brzozowski derivative of `expr` with respect to `c`: the language of
    /// the strings that complete `c` into a string of `expr`.
    pub fn deriv(&mut self, expr: ExprId, c: char) -> Result<ExprId, Error> {
        self.ensure_defined(expr)?;
        self.derive(expr, c)
    }

    /// Like [`Grammar::deriv`], but with the character given as a string,
    /// which must contain exactly one character.
    pub fn deriv_str(
        &mut self,
        expr: ExprId,
        c: &str,
    ) -> Result<ExprId, Error> {
        let mut chars = c.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.deriv(expr, c),
            _ => Err(Error::NotSingleChar(c.to_string())),
        }
    }

    /// True if `text` belongs to the language.
    ///
    /// The expression is canonicalized and derived with respect to each
    /// character of `text` in turn. The text matches if the residual
    /// language contains the empty string.
    pub fn matches(
        &mut self,
        expr: impl IntoExpr,
        text: &str,
    ) -> Result<bool, Error> {
        let expr = expr.into_expr(self);

        self.ensure_defined(expr)?;

        let each_step = self.config.simplify.each_step;
        let mut current = self.canonicalize(expr);

        for (i, c) in text.char_indices() {
            if self.arena.get(current).is_nil() {
                debug!("{} rejected {:?} at offset {}", expr, text, i);
                return Ok(false);
            }

            current = self.derive(current, c)?;

            if each_step {
                current = self.canonicalize(current);
            }

            if log_enabled!(Level::Trace) {
                let residual = self.render(current);
                trace!("after {:?} at offset {}: {}", c, i, residual);
            }
        }

        if !each_step {
            current = self.canonicalize(current);
        }

        let matched = ops::contains_empty(self, current);
        debug!("{} matching {:?}: {}", expr, text, matched);

        Ok(matched)
    }
}

impl Grammar {
    /// Computes a derivative and surfaces any error found while doing it.
    fn derive(&mut self, expr: ExprId, c: char) -> Result<ExprId, Error> {
        let result = ops::deriv(self, expr, c);
        match self.fault.take() {
            Some(err) => {
                // Results that depend on the failed computation are not
                // valid.
                self.caches.deriv.clear();
                Err(err)
            }
            None => Ok(result),
        }
    }

    /// Makes sure that every reference reachable from `expr` is defined.
    fn ensure_defined(&self, expr: ExprId) -> Result<(), Error> {
        if self.arena.unbound() == 0 {
            return Ok(());
        }
        match DepthFirstSearch::new(&self.arena, expr)
            .find(|id| self.arena.is_unbound(*id))
        {
            Some(reference) => Err(Error::UndefinedReference(reference)),
            None => Ok(()),
        }
    }

    /// Records an error found by a memoized algorithm. Only the first
    /// error is kept.
    pub(crate) fn fail(&mut self, err: Error) {
        self.fault.get_or_insert(err);
    }
}
