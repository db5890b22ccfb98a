//! Backtracking matcher with heap-allocated state.
//!
//! Accepts the same strings as [`match_cont`](super::match_cont), but the
//! pending continuation is a shared persistent list and every choice point
//! is pushed onto a `Vec`, so native stack usage stays constant no matter
//! how long the subject is.

use std::rc::Rc;

use super::Node;

/// An entry of the persistent continuation list.
#[derive(Debug, Clone, Copy)]
enum Pending<'r> {
    /// Match this node next.
    Node(&'r Node),
    /// Re-enter `star` after an iteration that began at byte `from`.
    Iterate { star: &'r Node, from: usize },
}

#[derive(Debug)]
struct Link<'r> {
    head: Pending<'r>,
    next: Cont<'r>,
}

type Cont<'r> = Option<Rc<Link<'r>>>;

fn push<'r>(head: Pending<'r>, next: Cont<'r>) -> Cont<'r> {
    Some(Rc::new(Link { head, next }))
}

/// A choice point to come back to.
struct Frame<'r> {
    node: &'r Node,
    cont: Cont<'r>,
    pos: usize,
}

enum Resume<'r> {
    Accept,
    Reject,
    Next(&'r Node, Cont<'r>),
}

/// Pops the continuation once the current node has matched up to `pos`.
fn resume<'r>(cont: &Cont<'r>, pos: usize, len: usize) -> Resume<'r> {
    let Some(link) = cont else {
        return if pos == len {
            Resume::Accept
        } else {
            Resume::Reject
        };
    };

    match link.head {
        Pending::Node(node) => Resume::Next(node, link.next.clone()),
        // an iteration that consumed nothing revisits a state already explored
        Pending::Iterate { from, .. } if from == pos => Resume::Reject,
        Pending::Iterate { star, .. } => Resume::Next(star, link.next.clone()),
    }
}

/// Anchored matcher over a borrowed pattern tree.
#[derive(Debug, Clone, Copy)]
pub struct Backtracker<'r> {
    root: &'r Node,
}

impl<'r> Backtracker<'r> {
    pub fn new(root: &'r Node) -> Self {
        Self { root }
    }

    /// True iff the whole of `text` is accepted.
    pub fn is_match(&self, text: &str) -> bool {
        self.is_match_bytes(text.as_bytes())
    }

    pub fn is_match_bytes(&self, text: &[u8]) -> bool {
        let len = text.len();
        let mut frames = vec![Frame {
            node: self.root,
            cont: None,
            pos: 0,
        }];

        'frames: while let Some(Frame {
            node: mut current,
            mut cont,
            mut pos,
        }) = frames.pop()
        {
            loop {
                match current {
                    Node::Alternation { left, right } => {
                        frames.push(Frame {
                            node: &**right,
                            cont: cont.clone(),
                            pos,
                        });
                        current = &**left;
                        continue;
                    }
                    Node::Concatenation { left, right } => {
                        cont = push(Pending::Node(&**right), cont);
                        current = &**left;
                        continue;
                    }
                    Node::Repetition { inner } => {
                        if pos < len {
                            let again = push(
                                Pending::Iterate {
                                    star: current,
                                    from: pos,
                                },
                                cont.clone(),
                            );
                            frames.push(Frame {
                                node: &**inner,
                                cont: again,
                                pos,
                            });
                        }
                    }
                    Node::CharRange { lo, hi } => match text.get(pos) {
                        Some(c) if (*lo..=*hi).contains(c) => pos += 1,
                        _ => continue 'frames,
                    },
                }

                match resume(&cont, pos, len) {
                    Resume::Accept => return true,
                    Resume::Reject => continue 'frames,
                    Resume::Next(node, rest) => {
                        current = node;
                        cont = rest;
                    }
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{byte, choice, is_match, range, seq, star, text};

    fn agrees(node: &Node, subjects: &[&str]) {
        let engine = Backtracker::new(node);
        for subject in subjects {
            assert_eq!(
                engine.is_match(subject),
                is_match(node, subject),
                "engines disagree on {:?} for {}",
                subject,
                node
            );
        }
    }

    #[test]
    fn test_basic_nodes() {
        let node = range(b'a', b'c');
        let engine = Backtracker::new(&node);
        assert!(engine.is_match("b"));
        assert!(!engine.is_match("d"));
        assert!(!engine.is_match(""));
        assert!(!engine.is_match("ab"));
    }

    #[test]
    fn test_top_level_repetition() {
        let node = star(choice![byte(b'x'), byte(b'y')]);
        let engine = Backtracker::new(&node);
        assert!(engine.is_match(""));
        assert!(engine.is_match("xyyx"));
        assert!(!engine.is_match("xyz"));
    }

    #[test]
    fn test_agrees_with_recursive_matcher() {
        let subjects = ["", "a", "b", "ab", "ba", "abb", "aab", "abab", "bbbb", "c"];
        agrees(&seq![star(choice![byte(b'a'), byte(b'b')]), byte(b'b')], &subjects);
        agrees(&seq![byte(b'a'), star(byte(b'b'))], &subjects);
        agrees(&choice![text("ab").unwrap(), text("ba").unwrap()], &subjects);
        agrees(&star(text("ab").unwrap()), &subjects);
    }

    #[test]
    fn test_nullable_repetition_body_terminates() {
        // (a*)* b
        let node = seq![star(star(byte(b'a'))), byte(b'b')];
        let engine = Backtracker::new(&node);
        assert!(engine.is_match("b"));
        assert!(engine.is_match("aaab"));
        assert!(!engine.is_match("aaa"));
        assert!(!engine.is_match("c"));
    }

    #[test]
    fn test_long_subject_does_not_grow_native_stack() {
        let node = seq![range(b'a', b'z'), star(seq![byte(b'.'), range(b'a', b'z')])];
        let subject = vec!["a"; 50_000].join(".");
        let engine = Backtracker::new(&node);
        assert!(engine.is_match(&subject));

        let mut broken = subject.clone();
        broken.push('.');
        assert!(!engine.is_match(&broken));
    }
}
