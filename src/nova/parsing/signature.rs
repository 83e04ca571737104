//! Method header parsing
//!
//! Two shapes are accepted, tried in this order:
//! 1. `ReturnType name(params)`
//! 2. `name(params)` (no return type, defaults to `void`)
//!
//! A header whose name equals the enclosing class is a constructor under
//! either shape; any return type written for it is dropped.

use crate::nova::converting::builtins::canonical_type;
use crate::nova::model::{MethodKind, MethodSignature, Parameter};
use crate::nova::parsing::classification::starts_with_statement_keyword;
use once_cell::sync::Lazy;
use regex::Regex;

static WITH_RETURN_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s+(\w+)\s*\((.*)\)$").unwrap());

static WITHOUT_RETURN_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*\((.*)\)$").unwrap());

/// Name given to the stub emitted for unreadable headers
pub const STUB_METHOD_NAME: &str = "unknownMethod";

/// Return type used when none is written
const NO_VALUE: &str = "void";

/// Parser for method and constructor headers
pub struct SignatureParser;

impl SignatureParser {
    /// Parse an explicit header (the text after `function`).
    ///
    /// Never fails: an unreadable header yields a `void unknownMethod()` stub
    /// carrying a diagnostic.
    pub fn parse(header: &str, class_name: &str) -> MethodSignature {
        Self::try_parse(header, class_name).unwrap_or_else(|| {
            tracing::debug!(header, class = class_name, "unparseable method header");
            MethodSignature {
                owner: class_name.to_string(),
                kind: MethodKind::Method,
                name: STUB_METHOD_NAME.to_string(),
                return_type: Some(NO_VALUE.to_string()),
                parameters: Vec::new(),
                diagnostic: Some(format!("ERROR Parsing function signature: {}", header)),
            }
        })
    }

    /// Parse a header if it has one of the two accepted shapes
    pub fn try_parse(header: &str, class_name: &str) -> Option<MethodSignature> {
        let header = header.trim();

        let (return_type, name, params) = if let Some(caps) = WITH_RETURN_TYPE.captures(header) {
            (
                Some(canonical_type(&caps[1])),
                caps[2].to_string(),
                caps[3].to_string(),
            )
        } else if let Some(caps) = WITHOUT_RETURN_TYPE.captures(header) {
            (
                Some(NO_VALUE.to_string()),
                caps[1].to_string(),
                caps[2].to_string(),
            )
        } else {
            return None;
        };

        let (kind, return_type) = if name == class_name {
            (MethodKind::Constructor, None)
        } else {
            (MethodKind::Method, return_type)
        };

        Some(MethodSignature {
            owner: class_name.to_string(),
            kind,
            name,
            return_type,
            parameters: parse_parameters(&params),
            diagnostic: None,
        })
    }

    /// Parse a line that might be a method header written without `function`.
    ///
    /// Lines led by a statement keyword (`print(x)`, `if (a)`) are never
    /// taken as headers.
    pub fn try_parse_implicit(line: &str, class_name: &str) -> Option<MethodSignature> {
        if starts_with_statement_keyword(line) {
            return None;
        }
        Self::try_parse(line, class_name)
    }
}

/// Split a comma-separated parameter list into `type name` pairs.
///
/// Anything that is not exactly two tokens is kept as written.
pub fn parse_parameters(raw: &str) -> Vec<Parameter> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(|param| {
            let param = param.trim();
            match param.split_whitespace().collect::<Vec<_>>().as_slice() {
                [ty, name] => Parameter::Typed {
                    ty: canonical_type(ty),
                    name: name.to_string(),
                },
                _ => Parameter::Raw(param.to_string()),
            }
        })
        .collect()
}
