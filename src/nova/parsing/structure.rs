//! Structural parser
//!
//! A finite-state scanner over the whole line sequence:
//!
//! ```text
//! NoActiveClass --(class header)--------------> InClass
//! NoActiveClass --(any other line)------------> InClass(Main), line re-applied
//! InClass       --(function header / name())--> InMethodBody
//! InClass       --(field shape)---------------> InClass       (field added)
//! InClass       --(other)---------------------> InClass       (entry statement)
//! InMethodBody  --(endfunction)---------------> InClass       (method closed)
//! InMethodBody  --(other)---------------------> InMethodBody  (body statement)
//! any           --(class header)--------------> InClass       (open method dropped)
//! any           --(blank)---------------------> unchanged
//! ```
//!
//! End of input is the only termination condition. A method still open at
//! that point is dropped without being emitted.

use crate::nova::converting::RuleEngine;
use crate::nova::model::{ClassModel, MethodDefinition, MethodSignature, DEFAULT_CLASS};
use crate::nova::parsing::classification::{
    class_header, function_header, is_end_function, is_field_shape,
};
use crate::nova::parsing::fields::parse_field;
use crate::nova::parsing::signature::SignatureParser;
use crate::nova::rules::RuleSet;

/// Scanner state
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    NoActiveClass,
    InClass {
        class: String,
    },
    InMethodBody {
        class: String,
        signature: MethodSignature,
        body: Vec<String>,
    },
}

/// Builds a [`ClassModel`] from pseudocode lines
#[derive(Debug, Clone)]
pub struct StructuralParser<'r> {
    engine: RuleEngine<'r>,
    default_class: String,
}

impl<'r> StructuralParser<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            engine: RuleEngine::new(rules),
            default_class: DEFAULT_CLASS.to_string(),
        }
    }

    /// Use another name for the class that collects header-less lines
    pub fn with_default_class(mut self, name: impl Into<String>) -> Self {
        self.default_class = name.into();
        self
    }

    /// Scan all lines top to bottom
    pub fn parse<'a, I>(&self, lines: I) -> ClassModel
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scan = Scan {
            parser: self,
            model: ClassModel::new(),
            state: ScanState::NoActiveClass,
        };
        for line in lines {
            scan.step(line.trim());
        }
        scan.finish()
    }
}

/// One conversion run: the model being built and the current state
struct Scan<'p, 'r> {
    parser: &'p StructuralParser<'r>,
    model: ClassModel,
    state: ScanState,
}

impl Scan<'_, '_> {
    fn step(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        let state = std::mem::replace(&mut self.state, ScanState::NoActiveClass);

        if let Some(header) = class_header(line) {
            if let ScanState::InMethodBody { signature, .. } = &state {
                tracing::warn!(
                    method = %signature.name,
                    class = %signature.owner,
                    "class header inside an open method; method dropped"
                );
            }
            self.model.declare(header.name, header.parent);
            self.state = ScanState::InClass {
                class: header.name.to_string(),
            };
            return;
        }

        self.state = match state {
            ScanState::NoActiveClass => {
                let class = self.parser.default_class.clone();
                self.model.declare(&class, None);
                self.in_class(class, line)
            }
            ScanState::InClass { class } => self.in_class(class, line),
            ScanState::InMethodBody {
                class,
                signature,
                body,
            } => self.in_method_body(class, signature, body, line),
        };
    }

    fn in_class(&mut self, class: String, line: &str) -> ScanState {
        if let Some(header) = function_header(line) {
            let signature = SignatureParser::parse(header, &class);
            return ScanState::InMethodBody {
                class,
                signature,
                body: Vec::new(),
            };
        }

        if let Some(signature) = SignatureParser::try_parse_implicit(line, &class) {
            return ScanState::InMethodBody {
                class,
                signature,
                body: Vec::new(),
            };
        }

        let statement = if is_field_shape(line) {
            None
        } else {
            Some(self.parser.engine.convert(line))
        };

        let definition = self.model.declare(&class, None);
        match statement {
            None => {
                definition.add_field(parse_field(line));
            }
            Some(statement) => definition.entry_statements.push(statement),
        }
        ScanState::InClass { class }
    }

    fn in_method_body(
        &mut self,
        class: String,
        signature: MethodSignature,
        mut body: Vec<String>,
        line: &str,
    ) -> ScanState {
        if let Some(header) = function_header(line) {
            tracing::warn!(
                method = %signature.name,
                class = %class,
                "function header inside an open method; method dropped"
            );
            return ScanState::InMethodBody {
                signature: SignatureParser::parse(header, &class),
                class,
                body: Vec::new(),
            };
        }

        if is_end_function(line) {
            self.model
                .declare(&class, None)
                .methods
                .push(MethodDefinition { signature, body });
            return ScanState::InClass { class };
        }

        body.push(self.parser.engine.convert(line));
        ScanState::InMethodBody {
            class,
            signature,
            body,
        }
    }

    fn finish(self) -> ClassModel {
        if let ScanState::InMethodBody {
            class, signature, ..
        } = &self.state
        {
            tracing::warn!(
                method = %signature.name,
                class = %class,
                "input ended inside a method without endfunction; method dropped"
            );
        }
        self.model
    }
}
