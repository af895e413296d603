pub mod diagnostics;
pub mod types;

pub use diagnostics::Diagnostic;
pub use types::{DeclarationOrigin, IrField, IrInterface, IrSpec, IrType};
