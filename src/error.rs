use std::fmt;

use thiserror::Error;

/// Which argument of a domain/pattern pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// The queried domain name
    Domain,
    /// The record pattern the domain is compared against
    Pattern,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Domain => f.write_str("domain"),
            InputRole::Pattern => f.write_str("pattern"),
        }
    }
}

/// Classifies why a name was rejected by the label grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// A name needs at least one label
    Empty,
    /// A byte outside `a-z`, `*` and `.`
    IllegalCharacter { index: usize, byte: u8 },
    /// Every byte is legal but the labels are not `.`-separated single characters
    Grammar,
    /// Longer than the configured limit
    TooLong { len: usize, max: usize },
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::Empty => f.write_str("empty name"),
            Malformed::IllegalCharacter { index, byte } => {
                write!(f, "illegal byte 0x{:02x} at {}", byte, index)
            }
            Malformed::Grammar => f.write_str("not a sequence of labels"),
            Malformed::TooLong { len, max } => write!(f, "length {} exceeds {}", len, max),
        }
    }
}

/// Record ACL error types
#[derive(Error, Debug)]
pub enum AclError {
    #[error("Missing {role}")]
    AbsentInput { role: InputRole },

    #[error("Malformed {role} {value:?}: {reason}")]
    MalformedDomain {
        role: InputRole,
        value: String,
        reason: Malformed,
    },

    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid pattern at line {line}: {reason}")]
    InvalidPattern { line: usize, reason: Malformed },
}

impl AclError {
    /// True for the two failure kinds that make a verdict `bad_input`.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            AclError::AbsentInput { .. } | AclError::MalformedDomain { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AclError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input_is_matchable() {
        let err = AclError::AbsentInput {
            role: InputRole::Pattern,
        };
        match &err {
            AclError::AbsentInput { role } => assert_eq!(*role, InputRole::Pattern),
            _ => panic!("expected AbsentInput"),
        }
        assert!(err.is_bad_input());
        assert_eq!(err.to_string(), "Missing pattern");
    }

    #[test]
    fn test_malformed_display_includes_reason() {
        let err = AclError::MalformedDomain {
            role: InputRole::Domain,
            value: "a-b".into(),
            reason: Malformed::IllegalCharacter {
                index: 1,
                byte: b'-',
            },
        };
        let display = format!("{}", err);
        assert!(display.contains("\"a-b\""), "got: {}", display);
        assert!(display.contains("0x2d at 1"), "got: {}", display);
        assert!(err.is_bad_input());
    }

    #[test]
    fn test_rule_errors_are_not_bad_input() {
        let err = AclError::UnknownAction("block".into());
        assert!(!err.is_bad_input());

        let err = AclError::InvalidPattern {
            line: 3,
            reason: Malformed::Grammar,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pattern at line 3: not a sequence of labels"
        );
    }
}
