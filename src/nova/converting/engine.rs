//! Rule engine
//!
//! The conversion order is a hard contract:
//! 1. configured rules, in load order, patterns in declaration order;
//!    the first full match wins even when a later rule would also match
//! 2. `input <type> <name>`
//! 3. `print <expr>`
//! 4. statement termination / pass-through
//!
//! Conversion never fails. Problems are reported as `// ERROR` comments in
//! the returned statement.

use crate::nova::converting::builtins;
use crate::nova::rules::RuleSet;

/// Converts single pseudocode lines into Java statements
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'r> {
    rules: &'r RuleSet,
}

impl<'r> RuleEngine<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Convert one trimmed line into one statement
    pub fn convert(&self, line: &str) -> String {
        for rule in self.rules.iter() {
            if let Some(statement) = rule.apply(line) {
                tracing::trace!(rule = rule.keyword(), line, "rule matched");
                return statement;
            }
        }

        if let Some(statement) = builtins::convert_input(line) {
            return statement;
        }
        if let Some(statement) = builtins::convert_print(line) {
            return statement;
        }
        builtins::terminate(line)
    }
}
