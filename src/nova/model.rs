//! Class model built by the structural parser
//!
//! The parser fills this model in a single top-to-bottom pass; the code
//! generator renders it in a separate pass. Classes keep insertion order,
//! which decides both the fallback entry class and the generation order.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Name of the class created for statements that appear before any header
pub const DEFAULT_CLASS: &str = "Main";

/// Field access modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

impl Visibility {
    /// Parse a modifier keyword, case-insensitively
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field such as `private int count;`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDeclaration {
    pub visibility: Visibility,
    pub ty: String,
    pub name: String,
}

impl fmt::Display for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {};", self.visibility, self.ty, self.name)
    }
}

/// One line of a class's field block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldEntry {
    Declaration(FieldDeclaration),
    /// A line shaped like a field that could not be read as one
    Invalid { line: String },
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEntry::Declaration(field) => write!(f, "{}", field),
            FieldEntry::Invalid { line } => {
                write!(f, "// ERROR: Invalid field declaration: {}", line)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    /// `type name`
    Typed { ty: String, name: String },
    /// Anything else, passed through as written
    Raw(String),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Typed { ty, name } => write!(f, "{} {}", ty, name),
            Parameter::Raw(text) => f.write_str(text),
        }
    }
}

/// A parsed method or constructor header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub owner: String,
    pub kind: MethodKind,
    pub name: String,
    /// `None` for constructors
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Set when the header could not be parsed; the signature is then a stub
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl MethodSignature {
    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor
    }

    /// Java declaration head without the opening brace
    pub fn declaration(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match (&self.kind, &self.return_type) {
            (MethodKind::Method, Some(ret)) => {
                format!("public {} {}({})", ret, self.name, params)
            }
            _ => format!("public {}({})", self.name, params),
        }
    }
}

/// A closed method: its header plus converted body statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDefinition {
    pub signature: MethodSignature,
    pub body: Vec<String>,
}

/// Everything collected for one class during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDefinition {
    pub name: String,
    pub parent: Option<String>,
    pub fields: Vec<FieldEntry>,
    pub methods: Vec<MethodDefinition>,
    /// Statements for the synthesized `main`, in order
    pub entry_statements: Vec<String>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            fields: Vec::new(),
            methods: Vec::new(),
            entry_statements: Vec::new(),
        }
    }

    /// Add a field entry unless an identical one is already present.
    ///
    /// Returns whether the entry was added.
    pub fn add_field(&mut self, entry: FieldEntry) -> bool {
        if self.fields.contains(&entry) {
            return false;
        }
        self.fields.push(entry);
        true
    }

    pub fn has_entry_point(&self) -> bool {
        !self.entry_statements.is_empty()
    }
}

/// Classes by name, in first-reference order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassModel {
    classes: IndexMap<String, ClassDefinition>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a class, creating it on first reference.
    ///
    /// A parent given for an existing class without one is recorded; an
    /// already known parent is never replaced.
    pub fn declare(&mut self, name: &str, parent: Option<&str>) -> &mut ClassDefinition {
        let class = self
            .classes
            .entry(name.to_string())
            .or_insert_with(|| ClassDefinition::new(name, None));
        if class.parent.is_none() {
            class.parent = parent.map(str::to_string);
        }
        class
    }

    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The class that hosts imports and is launched: `preferred` if present,
    /// otherwise the first class declared
    pub fn entry_class(&self, preferred: &str) -> Option<&str> {
        if let Some((name, _)) = self.classes.get_key_value(preferred) {
            return Some(name.as_str());
        }
        self.names().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_back_fills_parent_once() {
        let mut model = ClassModel::new();
        model.declare("Dog", None);
        assert_eq!(model.get("Dog").unwrap().parent, None);

        model.declare("Dog", Some("Animal"));
        assert_eq!(model.get("Dog").unwrap().parent.as_deref(), Some("Animal"));

        model.declare("Dog", Some("Pet"));
        assert_eq!(model.get("Dog").unwrap().parent.as_deref(), Some("Animal"));
    }

    #[test]
    fn test_insertion_order_and_entry_class() {
        let mut model = ClassModel::new();
        model.declare("Zebra", None);
        model.declare("Apple", None);
        assert_eq!(model.names().collect::<Vec<_>>(), vec!["Zebra", "Apple"]);
        assert_eq!(model.entry_class(DEFAULT_CLASS), Some("Zebra"));

        model.declare("Main", None);
        assert_eq!(model.entry_class(DEFAULT_CLASS), Some("Main"));
    }

    #[test]
    fn test_add_field_dedups() {
        let mut class = ClassDefinition::new("Dog", None);
        let field = FieldEntry::Declaration(FieldDeclaration {
            visibility: Visibility::Private,
            ty: "int".to_string(),
            name: "age".to_string(),
        });
        assert!(class.add_field(field.clone()));
        assert!(!class.add_field(field));
        assert_eq!(class.fields.len(), 1);
    }

    #[test]
    fn test_signature_declaration() {
        let method = MethodSignature {
            owner: "Dog".to_string(),
            kind: MethodKind::Method,
            name: "bark".to_string(),
            return_type: Some("String".to_string()),
            parameters: vec![
                Parameter::Typed {
                    ty: "int".to_string(),
                    name: "times".to_string(),
                },
                Parameter::Raw("loud".to_string()),
            ],
            diagnostic: None,
        };
        assert_eq!(method.declaration(), "public String bark(int times, loud)");

        let ctor = MethodSignature {
            kind: MethodKind::Constructor,
            name: "Dog".to_string(),
            return_type: None,
            parameters: vec![],
            ..method
        };
        assert_eq!(ctor.declaration(), "public Dog()");
    }
}
