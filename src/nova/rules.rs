//! Conversion rules
//!
//! A rule maps a family of pseudocode lines to one Java statement template:
//!
//! ```text
//! { "keyword": "while", "patterns": ["while\\s+(.+?)\\s+do", "while\\s+(.+)"], "template": "while (%s) {" }
//! ```
//!
//! Rules are loaded once, compiled once, and never mutated afterwards. The load
//! order is part of the contract: the first rule whose pattern fully matches a
//! line wins, no matter how specific a later rule is.
//!
//! Patterns are matched case-insensitively against the whole (trimmed) line.
//! Templates use `%s` placeholders filled left to right with capture groups.

use crate::nova::converting::template;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Rule set compiled into every binary
const DEFAULT_RULES_JSON: &str = include_str!("../../rules/default.json");

/// Shared instance of the embedded rule set
static BUILTIN_RULES: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    Arc::new(RuleSet::from_json(DEFAULT_RULES_JSON).expect("embedded rule set must be valid"))
});

/// Keywords that select the counted-loop substitution
const COUNTED_LOOP_KEYWORDS: &[&str] = &["for loop", "for"];

/// Placeholders required by a counted-loop template
const COUNTED_LOOP_PLACEHOLDERS: usize = 5;

/// Capture groups required by every counted-loop pattern
const COUNTED_LOOP_CAPTURES: usize = 3;

/// Errors raised while loading a rule set
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The rule file could not be read
    Io { path: String, message: String },
    /// The rule document could not be deserialized
    Malformed(String),
    /// A rule declares no patterns
    EmptyPatterns { keyword: String },
    /// A pattern is not a valid regex
    InvalidPattern {
        keyword: String,
        pattern: String,
        message: String,
    },
    /// The template cannot be filled from the patterns' capture groups
    PlaceholderMismatch {
        keyword: String,
        placeholders: usize,
        captures: usize,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::Io { path, message } => {
                write!(f, "Cannot read rules from '{}': {}", path, message)
            }
            RuleError::Malformed(msg) => write!(f, "Malformed rule set: {}", msg),
            RuleError::EmptyPatterns { keyword } => {
                write!(f, "Rule '{}' declares no patterns", keyword)
            }
            RuleError::InvalidPattern {
                keyword,
                pattern,
                message,
            } => write!(
                f,
                "Rule '{}' has an invalid pattern '{}': {}",
                keyword, pattern, message
            ),
            RuleError::PlaceholderMismatch {
                keyword,
                placeholders,
                captures,
            } => write!(
                f,
                "Rule '{}' has {} placeholder(s) but its patterns capture {} group(s)",
                keyword, placeholders, captures
            ),
        }
    }
}

impl std::error::Error for RuleError {}

/// A rule as it appears in the configuration document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleRecord {
    pub keyword: String,
    pub patterns: Vec<String>,
    pub template: String,
}

/// How captured groups are fed into the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Groups 1..n fill placeholders in order
    Positional,
    /// Three groups (variable, start, end) fill a five-slot loop header:
    /// variable, start, variable, end, variable
    CountedLoop,
}

/// One compiled conversion rule
#[derive(Debug, Clone)]
pub struct ConversionRule {
    keyword: String,
    sources: Vec<String>,
    patterns: Vec<Regex>,
    template: String,
    substitution: Substitution,
}

impl ConversionRule {
    /// Compile and validate a rule record
    pub fn compile(record: RuleRecord) -> Result<Self, RuleError> {
        let RuleRecord {
            keyword,
            patterns: sources,
            template,
        } = record;

        if sources.is_empty() {
            return Err(RuleError::EmptyPatterns { keyword });
        }

        let mut patterns = Vec::with_capacity(sources.len());
        for source in &sources {
            let regex = RegexBuilder::new(&format!("^(?:{})$", source))
                .case_insensitive(true)
                .build()
                .map_err(|e| RuleError::InvalidPattern {
                    keyword: keyword.clone(),
                    pattern: source.clone(),
                    message: e.to_string(),
                })?;
            patterns.push(regex);
        }

        let substitution = if COUNTED_LOOP_KEYWORDS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(&keyword))
        {
            Substitution::CountedLoop
        } else {
            Substitution::Positional
        };

        let rule = Self {
            keyword,
            sources,
            patterns,
            template,
            substitution,
        };
        rule.validate()?;
        Ok(rule)
    }

    fn validate(&self) -> Result<(), RuleError> {
        let placeholders = template::count_placeholders(&self.template);
        match self.substitution {
            Substitution::CountedLoop => {
                let min_captures = self.patterns.iter().map(capture_count).min().unwrap_or(0);
                if placeholders != COUNTED_LOOP_PLACEHOLDERS
                    || min_captures < COUNTED_LOOP_CAPTURES
                {
                    return Err(RuleError::PlaceholderMismatch {
                        keyword: self.keyword.clone(),
                        placeholders,
                        captures: min_captures,
                    });
                }
            }
            Substitution::Positional => {
                let max_captures = self.max_captures();
                if placeholders > max_captures {
                    return Err(RuleError::PlaceholderMismatch {
                        keyword: self.keyword.clone(),
                        placeholders,
                        captures: max_captures,
                    });
                }
            }
        }
        Ok(())
    }

    /// Category label of the rule
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The patterns as written in the configuration
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn substitution(&self) -> Substitution {
        self.substitution
    }

    /// Largest capture-group count across all patterns
    pub fn max_captures(&self) -> usize {
        self.patterns.iter().map(capture_count).max().unwrap_or(0)
    }

    /// Convert `line` if one of this rule's patterns matches all of it.
    ///
    /// Patterns are tried in declaration order; the first full match is used.
    pub fn apply(&self, line: &str) -> Option<String> {
        self.patterns.iter().find_map(|regex| {
            let caps = regex.captures(line)?;
            let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
            let output = match self.substitution {
                Substitution::CountedLoop => {
                    let (var, start, end) = (group(1), group(2), group(3));
                    template::instantiate(&self.template, &[var, start, var, end, var])
                }
                Substitution::Positional => {
                    let args: Vec<&str> = (1..caps.len()).map(group).collect();
                    template::instantiate(&self.template, &args)
                }
            };
            Some(output)
        })
    }
}

fn capture_count(regex: &Regex) -> usize {
    regex.captures_len().saturating_sub(1)
}

/// Ordered, read-only collection of conversion rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ConversionRule>,
}

impl RuleSet {
    /// Compile a rule set from records, keeping their order
    pub fn from_records(records: Vec<RuleRecord>) -> Result<Self, RuleError> {
        let rules = records
            .into_iter()
            .map(ConversionRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Parse a JSON array of rule records
    pub fn from_json(source: &str) -> Result<Self, RuleError> {
        let records: Vec<RuleRecord> =
            serde_json::from_str(source).map_err(|e| RuleError::Malformed(e.to_string()))?;
        Self::from_records(records)
    }

    /// Parse a YAML sequence of rule records
    pub fn from_yaml(source: &str) -> Result<Self, RuleError> {
        let records: Vec<RuleRecord> =
            serde_yaml::from_str(source).map_err(|e| RuleError::Malformed(e.to_string()))?;
        Self::from_records(records)
    }

    /// Load a rule file. `.yaml`/`.yml` files are read as YAML, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| RuleError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let rules = if is_yaml {
            Self::from_yaml(&source)?
        } else {
            Self::from_json(&source)?
        };
        tracing::debug!(path = %path.display(), rules = rules.len(), "loaded rule set");
        Ok(rules)
    }

    /// The embedded default rule set
    pub fn builtin() -> Arc<RuleSet> {
        Arc::clone(&BUILTIN_RULES)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, patterns: &[&str], template: &str) -> RuleRecord {
        RuleRecord {
            keyword: keyword.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_builtin_rules_compile() {
        let rules = RuleSet::builtin();
        assert!(!rules.is_empty());
        assert_eq!(rules.iter().next().unwrap().keyword(), "comment");
    }

    #[test]
    fn test_patterns_match_whole_line_only() {
        let rule = ConversionRule::compile(record("set", &[r"set\s+(\w+)"], "%s = 0;")).unwrap();
        assert_eq!(rule.apply("set x"), Some("x = 0;".to_string()));
        assert_eq!(rule.apply("set x y"), None);
        assert_eq!(rule.apply("reset x"), None);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let rule = ConversionRule::compile(record("else", &["else"], "} else {")).unwrap();
        assert_eq!(rule.apply("ELSE"), Some("} else {".to_string()));
    }

    #[test]
    fn test_first_pattern_in_rule_wins() {
        let rule = ConversionRule::compile(record(
            "if",
            &[r"if\s+(.+?)\s+then", r"if\s+(.+)"],
            "if (%s) {",
        ))
        .unwrap();
        assert_eq!(rule.apply("if x > 1 then"), Some("if (x > 1) {".to_string()));
        assert_eq!(rule.apply("if x > 1"), Some("if (x > 1) {".to_string()));
    }

    #[test]
    fn test_counted_loop_reuses_variable() {
        let rule = ConversionRule::compile(record(
            "For Loop",
            &[r"for\s+(\w+)\s*=\s*(\w+)\s+to\s+(\w+)"],
            "for (int %s = %s; %s <= %s; %s++) {",
        ))
        .unwrap();
        assert_eq!(rule.substitution(), Substitution::CountedLoop);
        assert_eq!(
            rule.apply("for i = 1 to 10"),
            Some("for (int i = 1; i <= 10; i++) {".to_string())
        );
    }

    #[test]
    fn test_counted_loop_requires_five_placeholders() {
        let err = ConversionRule::compile(record(
            "for",
            &[r"for\s+(\w+)\s*=\s*(\w+)\s+to\s+(\w+)"],
            "for (%s; %s; %s) {",
        ))
        .unwrap_err();
        assert!(matches!(err, RuleError::PlaceholderMismatch { placeholders: 3, .. }));
    }

    #[test]
    fn test_too_many_placeholders_rejected() {
        let err = ConversionRule::compile(record("ret", &[r"return\s+(.+)"], "return %s %s;"))
            .unwrap_err();
        assert_eq!(
            err,
            RuleError::PlaceholderMismatch {
                keyword: "ret".to_string(),
                placeholders: 2,
                captures: 1,
            }
        );
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = ConversionRule::compile(record("bad", &["(unclosed"], "x")).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let err = ConversionRule::compile(record("none", &[], "x")).unwrap_err();
        assert_eq!(
            err,
            RuleError::EmptyPatterns {
                keyword: "none".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            RuleSet::from_json("{ not json"),
            Err(RuleError::Malformed(_))
        ));
    }

    #[test]
    fn test_yaml_rules() {
        let yaml = r#"
- keyword: halt
  patterns: ["stop"]
  template: "System.exit(0);"
"#;
        let rules = RuleSet::from_yaml(yaml).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.iter().next().unwrap().apply("STOP"),
            Some("System.exit(0);".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RuleSet::load("/definitely/not/here/rules.json").unwrap_err();
        assert!(matches!(err, RuleError::Io { .. }));
    }

    #[test]
    fn test_builtin_keeps_file_order() {
        let rules = RuleSet::builtin();
        let keywords: Vec<&str> = rules.iter().map(|r| r.keyword()).collect();
        assert_eq!(keywords.first(), Some(&"comment"));
        assert_eq!(keywords.last(), Some(&"call"));
        let else_if = keywords.iter().position(|k| *k == "else if").unwrap();
        let plain_if = keywords.iter().position(|k| *k == "if").unwrap();
        assert!(else_if < plain_if);
    }
}
