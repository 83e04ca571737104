//! Pipeline orchestrator
//!
//! ```text
//! lines -> Mode::detect -> procedural: RuleEngine per line -> one Main unit
//!                       -> structural: StructuralParser -> ClassModel -> CodeGenerator
//! ```
//!
//! Conversion is synchronous, linear in the number of lines and never fails:
//! every problem ends up as a comment in the generated source. The rule set
//! is shared read-only, so one transpiler can serve concurrent callers.

use crate::nova::codegen::{CodeGenerator, EntryPoint, GeneratedProgram};
use crate::nova::config::NovaConfig;
use crate::nova::converting::RuleEngine;
use crate::nova::model::{ClassModel, DEFAULT_CLASS};
use crate::nova::parsing::StructuralParser;
use crate::nova::pipeline::mode::Mode;
use crate::nova::rules::{RuleError, RuleSet};
use serde::Serialize;
use std::sync::Arc;

/// Result of converting one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub mode: Mode,
    pub model: ClassModel,
    pub program: GeneratedProgram,
}

impl Conversion {
    /// Class to launch after compilation
    pub fn entry_class(&self) -> &str {
        &self.program.entry_class
    }
}

/// Converts pseudocode into Java source units
#[derive(Debug, Clone)]
pub struct Transpiler {
    rules: Arc<RuleSet>,
    generator: CodeGenerator,
    default_class: String,
}

impl Transpiler {
    /// Create a transpiler over an already loaded rule set
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            generator: CodeGenerator::new(),
            default_class: DEFAULT_CLASS.to_string(),
        }
    }

    /// Create a transpiler over the embedded rule set
    pub fn with_builtin_rules() -> Self {
        Self::new(RuleSet::builtin())
    }

    /// Create a transpiler from configuration, loading the configured rules
    pub fn from_config(config: &NovaConfig) -> Result<Self, RuleError> {
        let rules = config.load_rules()?;
        Ok(Self::new(rules)
            .with_default_class(config.generation.default_class.clone())
            .with_indent(config.generation.indent.clone()))
    }

    /// Name of the class that collects header-less code and is preferred as entry class
    pub fn with_default_class(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.generator = self.generator.with_entry_class(name.clone());
        self.default_class = name;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.generator = self.generator.with_indent(indent);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Convert source text (`\n` or `\r\n` line endings)
    pub fn convert(&self, source: &str) -> Conversion {
        self.convert_lines(source.lines())
    }

    /// Convert a sequence of lines
    pub fn convert_lines<'a, I>(&self, lines: I) -> Conversion
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<&str> = lines.into_iter().collect();
        let mode = Mode::detect(lines.iter().copied());
        tracing::debug!(%mode, lines = lines.len(), "converting");

        match mode {
            Mode::Procedural => self.convert_procedural(&lines),
            Mode::Structural => self.convert_structural(&lines),
        }
    }

    fn convert_procedural(&self, lines: &[&str]) -> Conversion {
        let engine = RuleEngine::new(&self.rules);
        let mut model = ClassModel::new();
        let class = model.declare(&self.default_class, None);
        class.entry_statements = lines
            .iter()
            .map(|line| engine.convert(line.trim()))
            .collect();

        let program = self.generator.generate(&model, EntryPoint::Always);
        Conversion {
            mode: Mode::Procedural,
            model,
            program,
        }
    }

    fn convert_structural(&self, lines: &[&str]) -> Conversion {
        let model = StructuralParser::new(&self.rules)
            .with_default_class(self.default_class.clone())
            .parse(lines.iter().copied());

        let program = self.generator.generate(&model, EntryPoint::WhenNeeded);
        tracing::debug!(
            classes = model.len(),
            entry = %program.entry_class,
            "structural conversion done"
        );
        Conversion {
            mode: Mode::Structural,
            model,
            program,
        }
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::with_builtin_rules()
    }
}
