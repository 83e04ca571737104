//! Line Classification
//!
//! Shape checks used by the structural parser. Classification happens in
//! this order (important for correctness):
//! 1. Blank lines
//! 2. Class headers (`class Name` / `class Name, Parent`)
//! 3. Function headers (`function ...`) and `endfunction`
//! 4. Implicit method headers (`name(args)`, see [`signature`](super::signature))
//! 5. Field declarations
//! 6. Everything else is a statement

use crate::nova::converting::builtins::strip_keyword;
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^class\s+(\w+)(?:\s*,\s*(\w+))?$").unwrap());

static FIELD_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(public|private|protected)?\s*(\w+)\s+\w+;?$").unwrap());

/// Leading words that always start a statement, never a declaration
///
/// Wins over the field and implicit-method shapes: `next i` and `end for`
/// have the structure of a field, `print greet(name)` that of a method header,
/// and all three stay statements.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "print", "input", "return", "if", "else", "while", "for", "call", "set", "declare",
    "increment", "decrement", "next", "end",
];

/// Keyword opening an explicit method header
const FUNCTION_KEYWORD: &str = "function ";

/// Keyword closing a method body
const END_FUNCTION_KEYWORD: &str = "endfunction";

/// A parsed `class` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassHeader<'a> {
    pub name: &'a str,
    pub parent: Option<&'a str>,
}

/// Match `class Name` or `class Name, Parent`
pub fn class_header(line: &str) -> Option<ClassHeader<'_>> {
    let caps = CLASS_HEADER.captures(line)?;
    Some(ClassHeader {
        name: caps.get(1)?.as_str(),
        parent: caps.get(2).map(|m| m.as_str()),
    })
}

/// The header text after a leading `function ` keyword
pub fn function_header(line: &str) -> Option<&str> {
    strip_keyword(line, FUNCTION_KEYWORD).map(str::trim)
}

pub fn is_end_function(line: &str) -> bool {
    line.eq_ignore_ascii_case(END_FUNCTION_KEYWORD)
}

/// Whether the first word is a statement keyword
pub fn starts_with_statement_keyword(line: &str) -> bool {
    let first = line
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or("");
    STATEMENT_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(first))
}

/// Optional visibility, a type token and an identifier
pub fn is_field_shape(line: &str) -> bool {
    match FIELD_SHAPE.captures(line) {
        Some(caps) => {
            let ty = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            !STATEMENT_KEYWORDS
                .iter()
                .any(|kw| kw.eq_ignore_ascii_case(ty))
        }
        None => false,
    }
}

/// Whether a line switches the whole input to structural mode
pub fn is_structural_marker(line: &str) -> bool {
    let line = line.trim();
    strip_keyword(line, "class ").is_some() || strip_keyword(line, FUNCTION_KEYWORD).is_some()
}
