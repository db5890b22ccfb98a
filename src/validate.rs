//! Domain label grammar: `Label ('.' Label)*` with `Label = [a-z] | '*'`.

use once_cell::sync::Lazy;

use crate::error::Malformed;
use crate::grammar::{byte, choice, range, seq, star, Backtracker, Node};

/// The label grammar, built once and shared read-only.
pub static LABEL_GRAMMAR: Lazy<Node> = Lazy::new(|| {
    let label = || choice![range(b'a', b'z'), byte(b'*')];
    seq![label(), star(seq![byte(b'.'), label()])]
});

/// Bytes the label grammar can consume.
pub fn is_label_byte(c: u8) -> bool {
    c.is_ascii_lowercase() || c == b'*' || c == b'.'
}

/// Check whether `name` is a non-empty sequence of labels.
#[tracing::instrument(level = "trace", fields(len = name.len() as u64))]
pub fn is_valid_domain_name(name: &str) -> bool {
    Backtracker::new(&LABEL_GRAMMAR).is_match(name)
}

/// Explain why `name` fails the label grammar, or `None` if it is valid.
pub fn diagnose_domain_name(name: &str) -> Option<Malformed> {
    if name.is_empty() {
        return Some(Malformed::Empty);
    }

    if let Some((index, &byte)) = name
        .as_bytes()
        .iter()
        .enumerate()
        .find(|(_, c)| !is_label_byte(**c))
    {
        return Some(Malformed::IllegalCharacter { index, byte });
    }

    if is_valid_domain_name(name) {
        None
    } else {
        Some(Malformed::Grammar)
    }
}
