//! Rational expression trees.
//!
//! The empty language is not a node: it is the `None` of an `Option<Expr>`.
//! The combinators below keep every tree reduced (∅ and ε are absorbed at
//! construction time), so no separate normalization pass exists.

use crate::formlang::StateId;
use std::collections::BTreeSet;
use std::fmt;

/// A letter position. Glushkov states are positions, hence the shared type.
pub type Position = StateId;

/// Range of letter positions below an internal node, `[min, max]`.
///
/// Both bounds are 0 until the tree is numbered, and stay 0 for subtrees
/// without letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    min: Position,
    max: Position,
}

impl Span {
    pub(crate) fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Position {
        self.min
    }

    pub fn max(&self) -> Position {
        self.max
    }

    /// Whether the span holds at least one numbered position.
    pub fn is_numbered(&self) -> bool {
        self.min != 0
    }

    pub fn contains(&self, position: Position) -> bool {
        self.is_numbered() && self.min <= position && position <= self.max
    }
}

/// Node tag, for callers that only need to dispatch on the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Epsilon,
    Letter,
    Union,
    Concat,
    Star,
}

/// A rational expression. Children are exclusively owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The language {ε}.
    Epsilon,
    Letter {
        letter: char,
        /// 0 until numbered
        position: Position,
    },
    Union {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Concat {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Star {
        child: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn epsilon() -> Self {
        Expr::Epsilon
    }

    pub fn letter(letter: char) -> Self {
        Expr::Letter {
            letter,
            position: 0,
        }
    }

    pub fn union(left: Expr, right: Expr) -> Self {
        Expr::Union {
            left: Box::new(left),
            right: Box::new(right),
            span: Span::default(),
        }
    }

    /// Concatenation; ε on either side is absorbed.
    pub fn concat(left: Expr, right: Expr) -> Self {
        match (left, right) {
            (Expr::Epsilon, other) | (other, Expr::Epsilon) => other,
            (left, right) => Expr::Concat {
                left: Box::new(left),
                right: Box::new(right),
                span: Span::default(),
            },
        }
    }

    pub fn star(child: Expr) -> Self {
        Expr::Star {
            child: Box::new(child),
            span: Span::default(),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Expr::Epsilon => Kind::Epsilon,
            Expr::Letter { .. } => Kind::Letter,
            Expr::Union { .. } => Kind::Union,
            Expr::Concat { .. } => Kind::Concat,
            Expr::Star { .. } => Kind::Star,
        }
    }

    /// The letter of a `Letter` node.
    ///
    /// # Panics
    ///
    /// Panics on any other node.
    pub fn get_letter(&self) -> char {
        match self {
            Expr::Letter { letter, .. } => *letter,
            other => panic!("get_letter called on a {:?} node", other.kind()),
        }
    }

    /// Left operand of a `Union` or `Concat`.
    ///
    /// # Panics
    ///
    /// Panics on any other node.
    pub fn left(&self) -> &Expr {
        match self {
            Expr::Union { left, .. } | Expr::Concat { left, .. } => left,
            other => panic!("left called on a {:?} node", other.kind()),
        }
    }

    /// Right operand of a `Union` or `Concat`.
    ///
    /// # Panics
    ///
    /// Panics on any other node.
    pub fn right(&self) -> &Expr {
        match self {
            Expr::Union { right, .. } | Expr::Concat { right, .. } => right,
            other => panic!("right called on a {:?} node", other.kind()),
        }
    }

    /// Operand of a `Star`.
    ///
    /// # Panics
    ///
    /// Panics on any other node.
    pub fn child(&self) -> &Expr {
        match self {
            Expr::Star { child, .. } => child,
            other => panic!("child called on a {:?} node", other.kind()),
        }
    }

    /// Position range covered by this node; `None` for ε, which has no
    /// position.
    pub fn span(&self) -> Option<Span> {
        match self {
            Expr::Epsilon => None,
            Expr::Letter { position, .. } => Some(Span::new(*position, *position)),
            Expr::Union { span, .. } | Expr::Concat { span, .. } | Expr::Star { span, .. } => {
                Some(*span)
            }
        }
    }

    /// # Panics
    ///
    /// Panics on ε, which is not part of the position space.
    pub fn position_min(&self) -> Position {
        match self.span() {
            Some(span) => span.min(),
            None => panic!("position_min called on an Epsilon node"),
        }
    }

    /// # Panics
    ///
    /// Panics on ε, which is not part of the position space.
    pub fn position_max(&self) -> Position {
        match self.span() {
            Some(span) => span.max(),
            None => panic!("position_max called on an Epsilon node"),
        }
    }

    /// Number of letter occurrences.
    pub fn letter_count(&self) -> usize {
        match self {
            Expr::Epsilon => 0,
            Expr::Letter { .. } => 1,
            Expr::Union { left, right, .. } | Expr::Concat { left, right, .. } => {
                left.letter_count() + right.letter_count()
            }
            Expr::Star { child, .. } => child.letter_count(),
        }
    }

    /// Letters occurring in the expression.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut letters = BTreeSet::new();
        self.collect_letters(&mut letters);
        letters
    }

    fn collect_letters(&self, letters: &mut BTreeSet<char>) {
        match self {
            Expr::Epsilon => {}
            Expr::Letter { letter, .. } => {
                letters.insert(*letter);
            }
            Expr::Union { left, right, .. } | Expr::Concat { left, right, .. } => {
                left.collect_letters(letters);
                right.collect_letters(letters);
            }
            Expr::Star { child, .. } => child.collect_letters(letters),
        }
    }

    /// Whether the letters carry positions 1..=k in left-to-right order,
    /// i.e. whether the numbering pass has run on this tree.
    pub fn is_numbered(&self) -> bool {
        let mut expected = 1;
        self.check_numbering(&mut expected)
    }

    fn check_numbering(&self, expected: &mut Position) -> bool {
        match self {
            Expr::Epsilon => true,
            Expr::Letter { position, .. } => {
                let ok = *position == *expected;
                *expected += 1;
                ok
            }
            Expr::Union { left, right, .. } | Expr::Concat { left, right, .. } => {
                left.check_numbering(expected) && right.check_numbering(expected)
            }
            Expr::Star { child, .. } => child.check_numbering(expected),
        }
    }
}

/// Union over possibly-empty languages; ∅ is the identity.
pub fn union(left: Option<Expr>, right: Option<Expr>) -> Option<Expr> {
    match (left, right) {
        (None, other) | (other, None) => other,
        (Some(left), Some(right)) => Some(Expr::union(left, right)),
    }
}

/// Concatenation over possibly-empty languages; ∅ annihilates, ε is the
/// identity.
pub fn concat(left: Option<Expr>, right: Option<Expr>) -> Option<Expr> {
    Some(Expr::concat(left?, right?))
}

/// Kleene star over a possibly-empty language; ∅* = ε.
pub fn star(expr: Option<Expr>) -> Option<Expr> {
    Some(expr.map_or(Expr::Epsilon, Expr::star))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Epsilon => write!(f, "ε"),
            Expr::Letter { letter, .. } => write!(f, "{letter}"),
            Expr::Union { left, right, .. } => write!(f, "({left} + {right})"),
            Expr::Concat { left, right, .. } => write!(f, "[{left} . {right}]"),
            Expr::Star { child, .. } => write!(f, "{{{child}}}*"),
        }
    }
}

/// Display adapter for a possibly-empty language: `None` renders as `∅`.
#[derive(Debug, Clone, Copy)]
pub struct Language<'a>(pub Option<&'a Expr>);

impl fmt::Display for Language<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(expr) => expr.fmt(f),
            None => write!(f, "∅"),
        }
    }
}
