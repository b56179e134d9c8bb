//! Variable declaration lowering

use crate::ast::VariableDeclaration;
use crate::codegen::{FunctionLowering, LoweringContext};
use crate::ir::Segment;
use pseudoc_common::CompilerError;

/// The name is bound before the initializer is lowered, so `int x = x;`
/// reads the new, uninitialized slot
pub fn lower_declaration(
    lowering: &mut FunctionLowering,
    declaration: &VariableDeclaration,
    ctx: LoweringContext,
) -> Result<Segment, CompilerError> {
    let mut segment = Segment::new();
    let slot = lowering.declare_slot(&mut segment, ctx.scope, &declaration.name, declaration.ty)?;

    if let Some(initializer) = &declaration.initializer {
        let lowered = lowering.lower_expression(initializer, ctx.scope)?;
        let value = segment.append_value(lowered, "initializer")?;
        let value = lowering.coerce(&mut segment, value, declaration.ty, "initializer")?;
        lowering.store(&mut segment, value, slot)?;
    }

    Ok(segment)
}
