use super::HostMatcher;
use crate::error::{AclError, InputRole, Result};
use crate::gate::InputGate;
use crate::types::HostInfo;
use crate::validate::is_valid_domain_name;

/// Compare a domain against a record pattern from the right.
///
/// Both arguments are expected to have passed the label grammar. A pattern
/// of exactly `*` matches anything. Otherwise both names are walked
/// backwards in lock-step: reaching a `*` in the pattern matches whatever
/// is left of the domain, and any differing byte is a mismatch. Without a
/// `*` the two names must have the same length.
pub fn is_matching_a_record(domain: &str, pattern: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let d = domain.as_bytes();
    let p = pattern.as_bytes();
    // unconsumed lengths; the byte under examination is at `i - 1` / `j - 1`
    let (mut i, mut j) = (d.len(), p.len());

    while i > 0 && j > 0 {
        if p[j - 1] == b'*' {
            return true;
        }
        if d[i - 1] != p[j - 1] {
            return false;
        }
        i -= 1;
        j -= 1;
    }

    // domain ran out with pattern left over
    if i == 0 && j > 0 && p[j - 1] != b'*' {
        return false;
    }
    // pattern ran out with domain left over
    if j == 0 && i > 0 {
        return false;
    }

    true
}

/// Record matcher - matches hosts against one validated record pattern
#[derive(Debug, Clone)]
pub struct RecordMatcher {
    pattern: String,
}

impl RecordMatcher {
    /// Create a new record matcher, rejecting patterns outside the label grammar
    pub fn new(pattern: &str) -> Result<Self> {
        InputGate::default().check_name(Some(pattern), InputRole::Pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl TryFrom<&str> for RecordMatcher {
    type Error = AclError;

    fn try_from(pattern: &str) -> Result<Self> {
        Self::new(pattern)
    }
}

impl HostMatcher for RecordMatcher {
    fn matches(&self, host: &HostInfo) -> bool {
        if !is_valid_domain_name(&host.name) {
            return false;
        }

        is_matching_a_record(&host.name, &self.pattern)
    }
}
