pub mod emitters;
pub mod generator;
pub mod type_mapper;

pub use generator::{TypeScriptConfig, TypeScriptError, TypeScriptGenerator};

use tsgen_core::parse::document::Document;
use tsgen_core::transform;

/// Generate the TypeScript declarations for a whole document in one step.
pub fn generate_types(doc: &Document) -> Result<String, TypeScriptError> {
    emitters::types::emit_types(&transform::transform(doc))
}
