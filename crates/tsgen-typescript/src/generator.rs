use tsgen_core::ir::IrSpec;
use tsgen_core::output::DEFAULT_FILE_NAME;
use tsgen_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters;

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone)]
pub struct TypeScriptConfig {
    /// Path of the generated file, relative to the output directory.
    pub file_name: String,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// TypeScript declaration generator: all declarations go into one file.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        log::debug!(
            "rendering {} declarations into {}",
            ir.declarations.len(),
            config.file_name
        );
        Ok(vec![GeneratedFile {
            path: config.file_name.clone(),
            content: emitters::types::emit_types(ir)?,
        }])
    }
}
