use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::error::{AclError, Result};
use crate::matcher::{AllMatcher, HostMatcher, Matcher, RecordMatcher};
use crate::types::{HostInfo, MatchResult, TextRule};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Cache value type: matched action and rule index
type CacheValue<O> = Option<(O, usize)>;

/// A compiled rule ready for matching
#[derive(Debug)]
pub struct CompiledRule<O> {
    /// The action for this rule
    pub action: O,
    /// Host matcher
    pub matcher: Matcher,
    /// Source line of the rule
    pub line_num: usize,
}

impl<O> CompiledRule<O> {
    /// Check if this rule matches the given host
    pub fn matches(&self, host: &HostInfo) -> bool {
        self.matcher.matches(host)
    }
}

/// Compiled rule set with LRU caching
pub struct CompiledRuleSet<O: Clone> {
    rules: Vec<CompiledRule<O>>,
    cache: Mutex<LruCache<String, CacheValue<O>>>,
}

impl<O: Clone> CompiledRuleSet<O> {
    /// Create a new compiled rule set
    pub fn new(rules: Vec<CompiledRule<O>>, cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            rules,
            cache: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Match a host against the rule set; the first matching rule wins
    pub fn match_host(&self, host: &HostInfo) -> Option<MatchResult<O>> {
        let key = if host.name.bytes().any(|b| b.is_ascii_uppercase()) {
            host.name.to_lowercase()
        } else {
            host.name.clone()
        };

        let mut cache = self.cache.lock();

        if let Some(cached) = cache.get(&key) {
            return cached.clone().map(|(action, rule_index)| MatchResult {
                action,
                rule_index,
            });
        }

        // Matching is CPU-only, so computing under the lock is acceptable.
        let result = self.find_match(&HostInfo { name: key.clone() });

        cache.put(
            key,
            result.as_ref().map(|r| (r.action.clone(), r.rule_index)),
        );

        result
    }

    /// Find a matching rule without caching
    fn find_match(&self, host: &HostInfo) -> Option<MatchResult<O>> {
        self.rules
            .iter()
            .position(|rule| rule.matches(host))
            .map(|rule_index| MatchResult {
                action: self.rules[rule_index].action.clone(),
                rule_index,
            })
    }

    /// Get the number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Get the number of cached hosts
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
    }
}

/// Compile text rules into a CompiledRuleSet
#[tracing::instrument(level = "debug", skip_all, fields(rules = rules.len() as u64))]
pub fn compile<O: Clone>(
    rules: &[TextRule],
    actions: &HashMap<String, O>,
    cache_size: usize,
) -> Result<CompiledRuleSet<O>> {
    let mut compiled_rules = Vec::with_capacity(rules.len());

    for rule in rules {
        let action = actions
            .get(&rule.action.to_lowercase())
            .or_else(|| actions.get(&rule.action))
            .cloned()
            .ok_or_else(|| AclError::UnknownAction(rule.action.clone()))?;

        let matcher = compile_matcher(rule)?;

        compiled_rules.push(CompiledRule {
            action,
            matcher,
            line_num: rule.line_num,
        });
    }

    tracing::debug!(count = compiled_rules.len(), "compiled rule set");
    Ok(CompiledRuleSet::new(compiled_rules, cache_size))
}

/// Compile a rule pattern into a matcher
fn compile_matcher(rule: &TextRule) -> Result<Matcher> {
    let pattern = rule.pattern.to_lowercase();

    if pattern == "all" {
        return Ok(Matcher::All(AllMatcher));
    }

    RecordMatcher::new(&pattern)
        .map(Matcher::Record)
        .map_err(|err| match err {
            AclError::MalformedDomain { reason, .. } => AclError::InvalidPattern {
                line: rule.line_num,
                reason,
            },
            other => other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Malformed;
    use crate::parser::parse_rules;

    fn actions() -> HashMap<String, &'static str> {
        let mut actions = HashMap::new();
        actions.insert("allow".to_string(), "ALLOW");
        actions.insert("deny".to_string(), "DENY");
        actions
    }

    #[test]
    fn test_first_match_wins() {
        let rules = parse_rules("deny(a.b)\nallow(*.b)\ndeny(all)").unwrap();
        let compiled = compile(&rules, &actions(), 16).unwrap();
        assert_eq!(compiled.rule_count(), 3);

        let result = compiled.match_host(&HostInfo::from_name("a.b")).unwrap();
        assert_eq!(result.action, "DENY");
        assert_eq!(result.rule_index, 0);

        let result = compiled.match_host(&HostInfo::from_name("c.b")).unwrap();
        assert_eq!(result.action, "ALLOW");
        assert_eq!(result.rule_index, 1);

        let result = compiled.match_host(&HostInfo::from_name("c.d")).unwrap();
        assert_eq!(result.action, "DENY");
        assert_eq!(result.rule_index, 2);
    }

    #[test]
    fn test_no_match() {
        let rules = parse_rules("allow(*.b)").unwrap();
        let compiled = compile(&rules, &actions(), 16).unwrap();
        assert!(compiled.match_host(&HostInfo::from_name("a.c")).is_none());
        // hosts outside the label grammar never match a record
        assert!(compiled.match_host(&HostInfo::from_name("ab.b")).is_none());
    }

    #[test]
    fn test_unknown_action() {
        let rules = parse_rules("block(a)").unwrap();
        match compile(&rules, &actions(), 16) {
            Err(AclError::UnknownAction(name)) => assert_eq!(name, "block"),
            Err(other) => panic!("expected UnknownAction, got {:?}", other),
            Ok(_) => panic!("expected UnknownAction"),
        }
    }

    #[test]
    fn test_action_lookup_is_case_insensitive() {
        let rules = parse_rules("ALLOW(a)").unwrap();
        let compiled = compile(&rules, &actions(), 16).unwrap();
        assert_eq!(
            compiled.match_host(&HostInfo::from_name("a")).unwrap().action,
            "ALLOW"
        );
    }

    #[test]
    fn test_invalid_pattern_reports_line() {
        let rules = parse_rules("allow(a)\n\nallow(ab.cd)").unwrap();
        match compile(&rules, &actions(), 16) {
            Err(AclError::InvalidPattern { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, Malformed::Grammar);
            }
            Err(other) => panic!("expected InvalidPattern, got {:?}", other),
            Ok(_) => panic!("expected InvalidPattern"),
        }
    }

    #[test]
    fn test_cache_is_keyed_by_lowercased_name() {
        let rules = parse_rules("allow(*.b)").unwrap();
        let compiled = compile(&rules, &actions(), 16).unwrap();

        let direct = HostInfo {
            name: "A.B".to_string(),
        };
        assert_eq!(compiled.match_host(&direct).unwrap().action, "ALLOW");
        assert_eq!(
            compiled.match_host(&HostInfo::from_name("a.b")).unwrap().action,
            "ALLOW"
        );
        assert_eq!(compiled.cached_count(), 1);

        // misses are cached too
        assert!(compiled.match_host(&HostInfo::from_name("a.c")).is_none());
        assert_eq!(compiled.cached_count(), 2);

        compiled.clear_cache();
        assert_eq!(compiled.cached_count(), 0);
    }

    #[test]
    fn test_zero_cache_size_still_works() {
        let rules = parse_rules("allow(*)").unwrap();
        let compiled = compile(&rules, &actions(), 0).unwrap();
        assert!(compiled.match_host(&HostInfo::from_name("a")).is_some());
        assert!(compiled.match_host(&HostInfo::from_name("b")).is_some());
        assert_eq!(compiled.cached_count(), 1);
    }
}
