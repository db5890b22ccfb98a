use serde::{Deserialize, Serialize};

/// Host information for matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    /// Hostname (domain name)
    pub name: String,
}

impl HostInfo {
    /// Create a new HostInfo from a name, lowercased
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
        }
    }
}

/// Outcome of comparing a domain against a record pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Either input was absent or failed the label grammar
    pub bad_input: bool,
    /// The pattern matched; always false when `bad_input` is set
    pub matched: bool,
}

impl Verdict {
    pub fn bad_input() -> Self {
        Self {
            bad_input: true,
            matched: false,
        }
    }

    pub fn from_match(matched: bool) -> Self {
        Self {
            bad_input: false,
            matched,
        }
    }
}

/// Parsed text rule before compilation
#[derive(Debug, Clone)]
pub struct TextRule {
    /// Action name
    pub action: String,
    /// Record pattern
    pub pattern: String,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

/// Match result from a compiled rule set
#[derive(Debug, Clone)]
pub struct MatchResult<O> {
    /// The matched action
    pub action: O,
    /// Index of the rule that matched
    pub rule_index: usize,
}
