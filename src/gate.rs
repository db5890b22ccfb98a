//! Input gate.
//!
//! Both the domain and the pattern must be present and accepted by the
//! label grammar before they are compared. A pair that fails the gate
//! always yields a "bad input" verdict with no match.

use crate::error::{AclError, InputRole, Malformed, Result};
use crate::matcher::is_matching_a_record;
use crate::types::Verdict;
use crate::validate::diagnose_domain_name;

/// Gate options.
#[derive(Debug, Clone, Default)]
pub struct GateOptions {
    /// Longest accepted name in bytes; `None` means unlimited
    pub max_name_len: Option<usize>,
}

impl GateOptions {
    /// Create new gate options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest accepted name.
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = Some(len);
        self
    }
}

/// Validates domain/pattern pairs and produces verdicts.
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    options: GateOptions,
}

impl InputGate {
    pub fn new(options: GateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GateOptions {
        &self.options
    }

    /// Validate a single name in the given role.
    pub fn check_name(&self, name: Option<&str>, role: InputRole) -> Result<()> {
        let name = name.ok_or(AclError::AbsentInput { role })?;

        let reason = match self.options.max_name_len {
            Some(max) if name.len() > max => Some(Malformed::TooLong {
                len: name.len(),
                max,
            }),
            _ => diagnose_domain_name(name),
        };

        match reason {
            None => Ok(()),
            Some(reason) => Err(AclError::MalformedDomain {
                role,
                value: name.to_string(),
                reason,
            }),
        }
    }

    /// Validate both inputs, domain first.
    pub fn check(&self, domain: Option<&str>, pattern: Option<&str>) -> Result<()> {
        self.check_name(domain, InputRole::Domain)?;
        self.check_name(pattern, InputRole::Pattern)
    }

    /// Gate the inputs, then compare them.
    pub fn evaluate(&self, domain: Option<&str>, pattern: Option<&str>) -> Verdict {
        if let Err(err) = self.check(domain, pattern) {
            tracing::debug!(error = %err, "rejected input pair");
            return Verdict::bad_input();
        }

        match (domain, pattern) {
            (Some(domain), Some(pattern)) => {
                Verdict::from_match(is_matching_a_record(domain, pattern))
            }
            _ => Verdict::bad_input(),
        }
    }
}

/// Check that both inputs are present and well-formed.
pub fn check_inputs(domain: Option<&str>, pattern: Option<&str>) -> Result<()> {
    InputGate::default().check(domain, pattern)
}

/// True iff both inputs are present and accepted by the label grammar.
pub fn is_valid_inputs(domain: Option<&str>, pattern: Option<&str>) -> bool {
    check_inputs(domain, pattern).is_ok()
}

/// Gate the inputs with default options, then compare them.
pub fn evaluate(domain: Option<&str>, pattern: Option<&str>) -> Verdict {
    InputGate::default().evaluate(domain, pattern)
}
