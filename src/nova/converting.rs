//! Line conversion
//!
//! Turns one trimmed pseudocode line into one Java statement. Configured rules
//! are tried first, in load order; the built-in `input`/`print` handling and
//! statement termination only apply when no rule matches.

pub mod builtins;
pub mod engine;
pub mod template;

pub use engine::RuleEngine;
