mod record;

pub use record::{is_matching_a_record, RecordMatcher};

use crate::types::HostInfo;

/// Trait for host matchers
pub trait HostMatcher: Send + Sync {
    /// Check if the host matches this matcher
    fn matches(&self, host: &HostInfo) -> bool;
}

/// All matcher - matches everything
#[derive(Debug, Clone)]
pub struct AllMatcher;

impl HostMatcher for AllMatcher {
    fn matches(&self, _host: &HostInfo) -> bool {
        true
    }
}

/// Enum wrapper for all matcher types
#[derive(Debug, Clone)]
pub enum Matcher {
    All(AllMatcher),
    Record(RecordMatcher),
}

impl HostMatcher for Matcher {
    fn matches(&self, host: &HostInfo) -> bool {
        match self {
            Matcher::All(m) => m.matches(host),
            Matcher::Record(m) => m.matches(host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matcher_ignores_grammar() {
        let matcher = Matcher::All(AllMatcher);
        assert!(matcher.matches(&HostInfo::from_name("not-a-label")));
        assert!(matcher.matches(&HostInfo::default()));
    }

    #[test]
    fn test_matcher_dispatch() {
        let matcher = Matcher::Record(RecordMatcher::new("a.b").unwrap());
        assert!(matcher.matches(&HostInfo::from_name("a.b")));
        assert!(!matcher.matches(&HostInfo::from_name("c.b")));
    }
}
