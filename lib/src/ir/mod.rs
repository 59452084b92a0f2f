/*! Expression model for regular languages.

A regular language is represented as a graph of [`Expr`] nodes stored in an
[`Arena`] and addressed by [`ExprId`]. Nodes are immutable once created and
children are shared, never copied, so the graph is a DAG in general.

Grammars that refer to themselves (e.g: `S = S(S) | ε`) are expressed with
references: a reference is a slot in the arena that is created before the
expression it stands for exists, and is bound to that expression later. Every
algorithm resolves references through [`Arena::force`], which turns a
reference into the node it is bound to. Once references are bound the graph
may contain cycles, and that's why all the algorithms that traverse it are
routed through the least-fixed-point memoizer in [`crate::memo`].
*/

use std::fmt::{Display, Formatter};

use crate::string_pool::StringPool;

pub(crate) mod dfs;


/// Identifies a node in the expression arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl From<u32> for ExprId {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ExprId> for u32 {
    #[inline]
    fn from(value: ExprId) -> Self {
        value.0
    }
}

impl From<ExprId> for usize {
    #[inline]
    fn from(value: ExprId) -> Self {
        value.0 as usize
    }
}

impl Display for ExprId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies the literal string of a [`Expr::Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiteralId(u32);

impl From<u32> for LiteralId {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<LiteralId> for u32 {
    #[inline]
    fn from(value: LiteralId) -> Self {
        value.0
    }
}

/// Number of repetitions in [`Expr::Rep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Count {
    /// Exactly `n` repetitions.
    Finite(u32),
    /// Any number of repetitions. Simplification rewrites `L{∞}` as `L*`.
    Infinite,
}

impl From<u32> for Count {
    #[inline]
    fn from(value: u32) -> Self {
        Count::Finite(value)
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Finite(n) => write!(f, "{}", n),
            Count::Infinite => write!(f, "∞"),
        }
    }
}

/// A node in the expression graph.
///
/// The set of variants is closed, every algorithm in this crate does an
/// exhaustive case analysis over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expr {
    /// `L1 | L2`, the union of two languages.
    Alt {
        /// Left operand.
        left: ExprId,
        /// Right operand.
        right: ExprId,
    },
    /// `.`, any single character.
    Any,
    /// `L1 L2`, the concatenation of two languages.
    Cat {
        /// Leading operand.
        first: ExprId,
        /// Trailing operand.
        second: ExprId,
    },
    /// A single literal character.
    Char(char),
    /// `ε`, the language containing only the empty string.
    Empty,
    /// `∅`, the language that contains nothing.
    Nil,
    /// `¬L`, the complement of a language.
    Not(ExprId),
    /// `L?`, zero or one occurrences.
    Opt(ExprId),
    /// `L+`, one or more occurrences.
    Plus(ExprId),
    /// `[a-b]`, an inclusive range of characters.
    Range {
        /// Lower bound.
        from: char,
        /// Upper bound.
        to: char,
    },
    /// `L{n}`, exactly `n` occurrences.
    Rep {
        /// Repeated language.
        lang: ExprId,
        /// Number of repetitions.
        n: Count,
    },
    /// `L*`, zero or more occurrences.
    Star(ExprId),
    /// `"abc"`, a literal string.
    Token(LiteralId),
}

impl Expr {
    /// True if the expression is [`Expr::Alt`].
    #[inline]
    pub fn is_alt(&self) -> bool {
        matches!(self, Expr::Alt { .. })
    }

    /// True if the expression is [`Expr::Any`].
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Expr::Any)
    }

    /// True if the expression is [`Expr::Cat`].
    #[inline]
    pub fn is_cat(&self) -> bool {
        matches!(self, Expr::Cat { .. })
    }

    /// True if the expression is [`Expr::Char`].
    #[inline]
    pub fn is_char(&self) -> bool {
        matches!(self, Expr::Char(_))
    }

    /// True if the expression is [`Expr::Empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::Empty)
    }

    /// True if the expression is [`Expr::Nil`].
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Nil)
    }

    /// True if the expression is [`Expr::Not`].
    #[inline]
    pub fn is_not(&self) -> bool {
        matches!(self, Expr::Not(_))
    }

    /// True if the expression is [`Expr::Opt`].
    #[inline]
    pub fn is_opt(&self) -> bool {
        matches!(self, Expr::Opt(_))
    }

    /// True if the expression is [`Expr::Plus`].
    #[inline]
    pub fn is_plus(&self) -> bool {
        matches!(self, Expr::Plus(_))
    }

    /// True if the expression is [`Expr::Range`].
    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Expr::Range { .. })
    }

    /// True if the expression is [`Expr::Rep`].
    #[inline]
    pub fn is_rep(&self) -> bool {
        matches!(self, Expr::Rep { .. })
    }

    /// True if the expression is [`Expr::Star`].
    #[inline]
    pub fn is_star(&self) -> bool {
        matches!(self, Expr::Star(_))
    }

    /// True if the expression is [`Expr::Token`].
    #[inline]
    pub fn is_token(&self) -> bool {
        matches!(self, Expr::Token(_))
    }

    /// True for the expressions that are rendered without parenthesis when
    /// they appear as operands: [`Expr::Char`], [`Expr::Empty`] and
    /// [`Expr::Nil`].
    #[inline]
    pub fn is_atomic(&self) -> bool {
        matches!(self, Expr::Char(_) | Expr::Empty | Expr::Nil)
    }

    /// Returns the children of this expression, in order.
    pub fn children(&self) -> impl Iterator<Item = ExprId> {
        let (a, b) = match *self {
            Expr::Alt { left, right } => (Some(left), Some(right)),
            Expr::Cat { first, second } => (Some(first), Some(second)),
            Expr::Not(lang)
            | Expr::Opt(lang)
            | Expr::Plus(lang)
            | Expr::Star(lang)
            | Expr::Rep { lang, .. } => (Some(lang), None),
            Expr::Any
            | Expr::Char(_)
            | Expr::Empty
            | Expr::Nil
            | Expr::Range { .. }
            | Expr::Token(_) => (None, None),
        };
        a.into_iter().chain(b)
    }
}

/// A slot in the arena.
#[derive(Debug, Clone, Copy)]
enum Node {
    Expr(Expr),
    /// A reference that is either unbound (`None`) or bound to some other
    /// node.
    Ref(Option<ExprId>),
}

/// Owner of every node in a grammar.
pub(crate) struct Arena {
    nodes: Vec<Node>,
    literals: StringPool<LiteralId>,
    /// Number of references that are not bound yet.
    unbound: usize,
    any: ExprId,
    empty: ExprId,
    nil: ExprId,
}

impl Arena {
    pub fn new() -> Self {
        let mut arena = Self {
            nodes: Vec::new(),
            literals: StringPool::new(),
            unbound: 0,
            any: ExprId(0),
            empty: ExprId(0),
            nil: ExprId(0),
        };
        arena.any = arena.alloc(Node::Expr(Expr::Any));
        arena.empty = arena.alloc(Node::Expr(Expr::Empty));
        arena.nil = arena.alloc(Node::Expr(Expr::Nil));
        arena
    }

    /// Total number of nodes, references included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn any(&self) -> ExprId {
        self.any
    }

    #[inline]
    pub fn empty(&self) -> ExprId {
        self.empty
    }

    #[inline]
    pub fn nil(&self) -> ExprId {
        self.nil
    }

    /// Adds an expression to the arena. The nullary variants `Any`, `Empty`
    /// and `Nil` are shared, every other expression gets a new node.
    pub fn push(&mut self, expr: Expr) -> ExprId {
        match expr {
            Expr::Any => self.any,
            Expr::Empty => self.empty,
            Expr::Nil => self.nil,
            expr => self.alloc(Node::Expr(expr)),
        }
    }

    /// Adds an unbound reference to the arena.
    pub fn reserve(&mut self) -> ExprId {
        self.unbound += 1;
        self.alloc(Node::Ref(None))
    }

    /// Number of references that are not bound yet.
    #[inline]
    pub fn unbound(&self) -> usize {
        self.unbound
    }

    /// True if `id` is a reference, bound or not.
    #[inline]
    pub fn is_ref(&self, id: ExprId) -> bool {
        matches!(self.nodes[usize::from(id)], Node::Ref(_))
    }

    /// True if `id` is a reference that is not bound yet.
    #[inline]
    pub fn is_unbound(&self, id: ExprId) -> bool {
        matches!(self.nodes[usize::from(id)], Node::Ref(None))
    }

    /// Binds the unbound reference `slot` to `target`.
    ///
    /// If `target` resolves back to `slot` the reference would stand for
    /// itself (`X = X`), in that case it is bound to `Nil`, the least fixed
    /// point of such an equation.
    ///
    /// Returns `false` if `slot` is not an unbound reference.
    pub fn bind(&mut self, slot: ExprId, target: ExprId) -> bool {
        if !self.is_unbound(slot) {
            return false;
        }
        let target =
            if self.force(target) == slot { self.nil } else { target };
        self.nodes[usize::from(slot)] = Node::Ref(Some(target));
        self.unbound -= 1;
        true
    }

    /// Resolves references, returning the ID of the node `id` stands for.
    ///
    /// Nodes that are not references are returned as is. An unbound
    /// reference resolves to itself.
    pub fn force(&self, mut id: ExprId) -> ExprId {
        while let Node::Ref(Some(target)) = self.nodes[usize::from(id)] {
            id = target;
        }
        id
    }

    /// Returns the expression `id` stands for. Unbound references are seen
    /// as `Nil`.
    pub fn get(&self, id: ExprId) -> Expr {
        match self.nodes[usize::from(self.force(id))] {
            Node::Expr(expr) => expr,
            Node::Ref(_) => Expr::Nil,
        }
    }

    /// Interns a token literal.
    #[inline]
    pub fn intern(&mut self, literal: &str) -> LiteralId {
        self.literals.get_or_intern(literal)
    }

    /// Returns the string of a token literal.
    #[inline]
    pub fn literal(&self, id: LiteralId) -> &str {
        self.literals.get(id)
    }

    fn alloc(&mut self, node: Node) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
