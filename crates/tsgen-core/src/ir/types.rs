use std::fmt;

use super::diagnostics::Diagnostic;

/// The generator-ready view of a document: named declarations in emission
/// order plus any problems noticed while building them.
#[derive(Debug, Clone, Default)]
pub struct IrSpec {
    pub declarations: Vec<IrInterface>,
    pub diagnostics: Vec<Diagnostic>,
}

impl IrSpec {
    pub fn declaration(&self, name: &str) -> Option<&IrInterface> {
        self.declarations.iter().find(|d| d.name == name)
    }
}

/// Where a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationOrigin {
    /// An entry of the Swagger 2 `definitions` section.
    Definition,
    /// An entry of `components.schemas`.
    ComponentSchema,
    /// Parameters of an operation, gathered into one object.
    Request { path: String, method: String },
    /// The inline `200` JSON body of an operation.
    Response { path: String, method: String },
}

impl DeclarationOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationOrigin::Definition => "definition",
            DeclarationOrigin::ComponentSchema => "component",
            DeclarationOrigin::Request { .. } => "request",
            DeclarationOrigin::Response { .. } => "response",
        }
    }
}

/// A named object declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct IrInterface {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<IrField>,
    pub origin: DeclarationOrigin,
}

/// A property of an object declaration or inline object type.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    pub name: String,
    pub field_type: IrType,
    pub required: bool,
    pub description: Option<String>,
}

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum IrType {
    Number,
    String,
    Boolean,
    /// Untyped value.
    Any,
    /// Reference to a named declaration, by bare name.
    Ref(String),
    Array(Box<IrType>),
    /// String-keyed map.
    Map(Box<IrType>),
    /// Inline object with fields in declaration order.
    Object(Vec<IrField>),
}

impl fmt::Display for DeclarationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationOrigin::Request { path, method }
            | DeclarationOrigin::Response { path, method } => {
                write!(f, "{} {} {}", self.as_str(), method.to_uppercase(), path)
            }
            _ => f.write_str(self.as_str()),
        }
    }
}
