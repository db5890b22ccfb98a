//! Record ACL - wildcard domain record matching for allow-lists
//!
//! This library decides whether a host name is covered by a record pattern
//! such as `*.b`:
//! - A small backtracking matcher over an alternation/concatenation/star/range AST
//! - A fixed label grammar validating both names before any comparison
//! - A right-anchored wildcard comparison between a domain and a pattern
//! - Allow-list rule parsing and compiled rule sets with LRU caching
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use record_acl::{compile, evaluate, parse_rules, HostInfo, Verdict};
//!
//! // Single comparison, gated on the label grammar
//! assert_eq!(evaluate(Some("a.b"), Some("*.b")), Verdict::from_match(true));
//! assert_eq!(evaluate(Some(""), Some("a")), Verdict::bad_input());
//!
//! // Rule sets
//! let rules = parse_rules("
//! deny(x.b)     # carve-out
//! allow(*.b)
//! deny(all)     # default
//! ").unwrap();
//!
//! let mut actions = HashMap::new();
//! actions.insert("allow".to_string(), true);
//! actions.insert("deny".to_string(), false);
//!
//! let compiled = compile(&rules, &actions, 1024).unwrap();
//! let result = compiled.match_host(&HostInfo::from_name("a.b")).unwrap();
//! assert!(result.action);
//! ```
//!
//! # Names
//!
//! A valid name is one or more single-character labels separated by `.`;
//! each label is a lowercase ASCII letter or `*`. In a pattern, `*` absorbs
//! everything to its left in the domain once every character to its right
//! has matched; a pattern of just `*` matches every name.
//!
//! # Rule Syntax
//!
//! ```text
//! action(pattern)
//! ```
//!
//! `all` may be used as a pattern that matches every host, including hosts
//! outside the label grammar.

pub mod compile;
pub mod error;
pub mod gate;
pub mod grammar;
pub mod matcher;
pub mod parser;
pub mod types;
pub mod validate;

// Re-export commonly used items
pub use compile::{compile, CompiledRule, CompiledRuleSet, DEFAULT_CACHE_SIZE};
pub use error::{AclError, InputRole, Malformed, Result};
pub use gate::{check_inputs, evaluate, is_valid_inputs, GateOptions, InputGate};
pub use matcher::{is_matching_a_record, AllMatcher, HostMatcher, Matcher, RecordMatcher};
pub use parser::parse_rules;
pub use types::{HostInfo, MatchResult, TextRule, Verdict};
pub use validate::{diagnose_domain_name, is_valid_domain_name, LABEL_GRAMMAR};
