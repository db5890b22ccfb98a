//! Pattern AST for the domain label grammar.
//!
//! The grammar engine is deliberately small: four node kinds, byte ranges,
//! Kleene star and ordered alternation. There are no groups, escapes or
//! counted quantifiers.
//!
//! ## Example
//!
//! ```
//! use record_acl::grammar::{byte, choice, range, seq, star, is_match};
//!
//! let label = choice![range(b'a', b'z'), byte(b'*')];
//! let name = seq![label.clone(), star(seq![byte(b'.'), label])];
//!
//! assert!(is_match(&name, "a.b.*"));
//! assert!(!is_match(&name, "a..b"));
//! ```

pub mod backtrack;
pub mod stack;

use std::fmt;

pub use backtrack::{is_match, match_cont, Continuation};
pub use stack::Backtracker;

/// A node of the pattern tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Either side may match; `left` is tried first.
    Alternation { left: Box<Node>, right: Box<Node> },
    /// `left` must match, then `right`.
    Concatenation { left: Box<Node>, right: Box<Node> },
    /// Zero or more repetitions of `inner`.
    Repetition { inner: Box<Node> },
    /// Exactly one byte in `lo..=hi`.
    CharRange { lo: u8, hi: u8 },
}

impl Node {
    pub fn alternation(left: Node, right: Node) -> Self {
        Node::Alternation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn concatenation(left: Node, right: Node) -> Self {
        Node::Concatenation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn repetition(inner: Node) -> Self {
        Node::Repetition {
            inner: Box::new(inner),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Node::Alternation { left, right } | Node::Concatenation { left, right } => {
                1 + left.size() + right.size()
            }
            Node::Repetition { inner } => 1 + inner.size(),
            Node::CharRange { .. } => 1,
        }
    }
}

/// Byte range `[lo, hi]`, inclusive on both ends.
pub fn range(lo: u8, hi: u8) -> Node {
    Node::CharRange { lo, hi }
}

/// A single literal byte.
pub fn byte(c: u8) -> Node {
    range(c, c)
}

/// Literal text as a right-nested concatenation. Returns `None` for the
/// empty string, which has no node of its own.
pub fn text(s: &str) -> Option<Node> {
    s.bytes().rev().map(byte).reduce(|acc, b| Node::concatenation(b, acc))
}

pub fn star(inner: Node) -> Node {
    Node::repetition(inner)
}

/// One or more: `seq(r, star(r))`.
pub fn plus(inner: Node) -> Node {
    Node::concatenation(inner.clone(), star(inner))
}

/// Right-folds `first, second, rest...` with `combine`.
#[doc(hidden)]
pub fn fold_right(
    first: Node,
    second: Node,
    mut rest: Vec<Node>,
    combine: fn(Node, Node) -> Node,
) -> Node {
    let Some(mut acc) = rest.pop() else {
        return combine(first, second);
    };
    while let Some(node) = rest.pop() {
        acc = combine(node, acc);
    }
    combine(first, combine(second, acc))
}

/// Ordered choice over two or more operands.
#[macro_export]
macro_rules! choice {
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::grammar::fold_right(
            $first,
            $second,
            vec![$($rest),*],
            $crate::grammar::Node::alternation,
        )
    };
}

/// Sequence of two or more operands.
#[macro_export]
macro_rules! seq {
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::grammar::fold_right(
            $first,
            $second,
            vec![$($rest),*],
            $crate::grammar::Node::concatenation,
        )
    };
}

pub use crate::{choice, seq};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Alternation { left, right } => write!(f, "({}|{})", left, right),
            Node::Concatenation { left, right } => write!(f, "({}{})", left, right),
            Node::Repetition { inner } => write!(f, "({})*", inner),
            Node::CharRange { lo, hi } if lo == hi => write!(f, "{}", char::from(*lo)),
            Node::CharRange { lo, hi } => {
                write!(f, "[{}-{}]", char::from(*lo), char::from(*hi))
            }
        }
    }
}
