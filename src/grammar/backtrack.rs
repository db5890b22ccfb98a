//! Continuation-passing backtracking matcher.
//!
//! Each call frame handles one node; whatever must still match after that
//! node lives in the [`Continuation`]. Recursion depth grows with the
//! length of the subject, so long inputs should go through
//! [`Backtracker`](super::Backtracker) instead.

use super::Node;

/// Pending sub-patterns, most recent first.
#[derive(Debug, Clone, Copy)]
pub enum Continuation<'a> {
    /// Nothing left to match: the subject must be fully consumed.
    Done,
    /// Match `head`, then whatever `rest` requires.
    Then(&'a Node, &'a Continuation<'a>),
}

impl<'a> Continuation<'a> {
    /// Splits off the head pattern. `Done` yields `(None, Done)`.
    pub fn split<'s>(&'s self) -> (Option<&'a Node>, &'s Continuation<'a>) {
        match self {
            Continuation::Done => (None, self),
            Continuation::Then(head, rest) => (Some(*head), *rest),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Continuation::Done)
    }
}

/// Matches `node` followed by `cont` against all of `text`.
///
/// A `None` node means the current pattern is exhausted; the continuation
/// is resumed if it still holds patterns, otherwise the subject must be
/// empty.
///
/// A repetition whose body can match the empty string recurses without
/// bound.
pub fn match_cont(node: Option<&Node>, cont: &Continuation<'_>, text: &[u8]) -> bool {
    let Some(node) = node else {
        return match cont.split() {
            (None, _) => text.is_empty(),
            (head, rest) => match_cont(head, rest, text),
        };
    };

    match node {
        Node::Alternation { left, right } => {
            match_cont(Some(&**left), cont, text) || match_cont(Some(&**right), cont, text)
        }
        Node::Concatenation { left, right } => {
            let next = Continuation::Then(&**right, cont);
            match_cont(Some(&**left), &next, text)
        }
        Node::Repetition { inner } => {
            let (head, rest) = cont.split();
            if match_cont(head, rest, text) {
                return true;
            }
            if text.is_empty() {
                return false;
            }
            // inner, then this repetition again
            let again = Continuation::Then(node, cont);
            match_cont(Some(&**inner), &again, text)
        }
        Node::CharRange { lo, hi } => match text.split_first() {
            Some((c, remaining)) if (*lo..=*hi).contains(c) => {
                let (head, rest) = cont.split();
                match_cont(head, rest, remaining)
            }
            _ => false,
        },
    }
}

/// True iff the whole of `text` is accepted by `node`.
pub fn is_match(node: &Node, text: &str) -> bool {
    match_cont(Some(node), &Continuation::Done, text.as_bytes())
}
