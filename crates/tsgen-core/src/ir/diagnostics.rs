use std::fmt;

/// A non-fatal problem found while building the IR. Output is still produced;
/// callers decide whether to surface these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `$ref` names a definition that exists in neither `definitions` nor
    /// `components.schemas`. The bare name is still emitted.
    UnresolvedReference { name: String },
    /// Two declarations ended up with the same name; both are emitted.
    DuplicateName { name: String },
    /// A `$ref` parameter was skipped while assembling a request declaration.
    ParameterReference {
        path: String,
        method: String,
        ref_path: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedReference { name } => {
                write!(f, "unresolved reference: {name}")
            }
            Diagnostic::DuplicateName { name } => {
                write!(f, "duplicate generated name: {name}")
            }
            Diagnostic::ParameterReference {
                path,
                method,
                ref_path,
            } => write!(
                f,
                "parameter reference {ref_path} in {} {path} is not followed",
                method.to_uppercase()
            ),
        }
    }
}
