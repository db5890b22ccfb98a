use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AclError, Result};
use crate::types::TextRule;

/// Regex pattern for parsing rules
/// Format: action(pattern)
static RULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\w.\-]+)\s*\(([^(),]*)\)$")
        .expect("RULE_PATTERN: hardcoded regex is invalid")
});

/// Parse allow-list rules from text.
///
/// One `action(pattern)` rule per line; `#` starts a comment.
pub fn parse_rules(text: &str) -> Result<Vec<TextRule>> {
    let mut rules = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers

        // Remove comments and trim whitespace
        let line = if let Some(comment_pos) = line.find('#') {
            &line[..comment_pos]
        } else {
            line
        };
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        rules.push(parse_single_rule(line, line_num)?);
    }

    Ok(rules)
}

/// Parse a single rule line
fn parse_single_rule(line: &str, line_num: usize) -> Result<TextRule> {
    let invalid = || AclError::ParseErrorAtLine {
        line: line_num,
        message: format!("Invalid rule format: {}", line),
    };

    let captures = RULE_PATTERN.captures(line).ok_or_else(invalid)?;
    let (Some(action), Some(pattern)) = (captures.get(1), captures.get(2)) else {
        return Err(invalid());
    };

    let pattern = pattern.as_str().trim();
    if pattern.is_empty() {
        return Err(AclError::ParseErrorAtLine {
            line: line_num,
            message: "Empty pattern".to_string(),
        });
    }

    Ok(TextRule {
        action: action.as_str().to_string(),
        pattern: pattern.to_string(),
        line_num,
    })
}
