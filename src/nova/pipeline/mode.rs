//! Procedural vs. structural mode

use crate::nova::parsing::classification::is_structural_marker;
use serde::Serialize;
use std::fmt;

/// How an input is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every line becomes a statement of one synthesized `main`
    Procedural,
    /// Lines are scanned into classes, fields and methods
    Structural,
}

impl Mode {
    /// Structural as soon as any line starts with `class ` or `function `
    pub fn detect<'a, I>(lines: I) -> Mode
    where
        I: IntoIterator<Item = &'a str>,
    {
        if lines.into_iter().any(is_structural_marker) {
            Mode::Structural
        } else {
            Mode::Procedural
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Procedural => write!(f, "procedural"),
            Mode::Structural => write!(f, "structural"),
        }
    }
}
