//! Java code generation
//!
//! Renders a [`ClassModel`] into one source unit per class. Each class is
//! rendered on its own:
//!
//! ```text
//! import java.util.*;            (entry class only)
//!
//! public class Name extends Parent {
//!
//!     <fields>
//!
//!     <methods, one blank line apart>
//!
//!     public static void main(String[] args) {   (only with entry statements)
//!         Scanner sc = new Scanner(System.in);
//!         <entry statements>
//!     }
//! }
//! ```
//!
//! Classes other than the entry class spell the scanner type out in full so
//! each unit compiles without the import block.

use crate::nova::converting::builtins::SCANNER_VARIABLE;
use crate::nova::model::{ClassDefinition, ClassModel, MethodDefinition, DEFAULT_CLASS};
use serde::Serialize;
use std::fmt::Write as _;

/// Import block emitted at the top of the entry class
const IMPORTS: &str = "import java.util.*;\n";

/// Default indentation unit
pub const DEFAULT_INDENT: &str = "    ";

/// Extension of generated units
pub const SOURCE_EXTENSION: &str = "java";

/// When the entry class gets a `main` method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// Only when it collected entry statements
    WhenNeeded,
    /// Always, even when empty
    Always,
}

/// One generated compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    pub class_name: String,
    pub file_name: String,
    pub source: String,
}

impl SourceUnit {
    pub fn new(class_name: impl Into<String>, source: String) -> Self {
        let class_name = class_name.into();
        let file_name = format!("{}.{}", class_name, SOURCE_EXTENSION);
        Self {
            class_name,
            file_name,
            source,
        }
    }
}

/// All units produced by one conversion plus the class to launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedProgram {
    pub entry_class: String,
    pub units: Vec<SourceUnit>,
}

impl GeneratedProgram {
    /// All units concatenated, for display only
    pub fn display(&self) -> String {
        self.units
            .iter()
            .map(|unit| unit.source.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn unit(&self, class_name: &str) -> Option<&SourceUnit> {
        self.units.iter().find(|unit| unit.class_name == class_name)
    }

    pub fn entry_unit(&self) -> Option<&SourceUnit> {
        self.unit(&self.entry_class)
    }
}

/// Renders class models as Java source
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    indent: String,
    preferred_entry: String,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            preferred_entry: DEFAULT_CLASS.to_string(),
        }
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Class name preferred as entry class when present
    pub fn with_entry_class(mut self, name: impl Into<String>) -> Self {
        self.preferred_entry = name.into();
        self
    }

    /// Render every class of `model`, in insertion order
    pub fn generate(&self, model: &ClassModel, entry_point: EntryPoint) -> GeneratedProgram {
        let entry_class = model
            .entry_class(&self.preferred_entry)
            .unwrap_or(self.preferred_entry.as_str())
            .to_string();

        let units = model
            .iter()
            .map(|class| {
                let is_entry = class.name == entry_class;
                let force_main = is_entry && entry_point == EntryPoint::Always;
                SourceUnit::new(&class.name, self.render_class(class, is_entry, force_main))
            })
            .collect();

        GeneratedProgram { entry_class, units }
    }

    /// Render one class
    pub fn render_class(&self, class: &ClassDefinition, is_entry: bool, force_main: bool) -> String {
        let indent = &self.indent;
        let mut blocks: Vec<String> = Vec::new();

        if !class.fields.is_empty() {
            let mut block = String::new();
            for field in &class.fields {
                let _ = writeln!(block, "{}{}", indent, field);
            }
            blocks.push(block);
        }

        for method in &class.methods {
            blocks.push(self.render_method(method));
        }

        if class.has_entry_point() || force_main {
            blocks.push(self.render_entry_point(class, is_entry));
        }

        let mut out = String::new();
        if is_entry {
            out.push_str(IMPORTS);
            out.push('\n');
        }
        out.push_str("public class ");
        out.push_str(&class.name);
        if let Some(parent) = &class.parent {
            out.push_str(" extends ");
            out.push_str(parent);
        }
        out.push_str(" {\n");
        for block in blocks {
            out.push('\n');
            out.push_str(&block);
        }
        out.push_str("}\n");
        out
    }

    fn render_method(&self, method: &MethodDefinition) -> String {
        let indent = &self.indent;
        let mut out = String::new();
        if let Some(diagnostic) = &method.signature.diagnostic {
            let _ = writeln!(out, "{}// {}", indent, diagnostic);
        }
        let _ = writeln!(out, "{}{} {{", indent, method.signature.declaration());
        for statement in &method.body {
            let _ = writeln!(out, "{}{}{}", indent, indent, statement);
        }
        let _ = writeln!(out, "{}}}", indent);
        out
    }

    fn render_entry_point(&self, class: &ClassDefinition, is_entry: bool) -> String {
        let indent = &self.indent;
        let scanner_type = if is_entry {
            "Scanner"
        } else {
            "java.util.Scanner"
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}public static void main(String[] args) {{", indent);
        let _ = writeln!(
            out,
            "{}{}{} {} = new {}(System.in);",
            indent, indent, scanner_type, SCANNER_VARIABLE, scanner_type
        );
        for statement in class.entry_statements.iter().filter(|s| !s.trim().is_empty()) {
            let _ = writeln!(out, "{}{}{}", indent, indent, statement);
        }
        let _ = writeln!(out, "{}}}", indent);
        out
    }
}
