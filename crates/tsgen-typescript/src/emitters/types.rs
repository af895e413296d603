use tsgen_core::ir::IrSpec;

use super::interfaces::InterfaceEmitter;
use crate::generator::TypeScriptError;

/// Render every declaration in emission order, separated by blank lines.
pub fn emit_types(ir: &IrSpec) -> Result<String, TypeScriptError> {
    let emitter = InterfaceEmitter::new()?;
    let blocks = ir
        .declarations
        .iter()
        .map(|decl| emitter.render(decl))
        .collect::<Result<Vec<_>, _>>()?;

    if blocks.is_empty() {
        return Ok(String::new());
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    Ok(out)
}
