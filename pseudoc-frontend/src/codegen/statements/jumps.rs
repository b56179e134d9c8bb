//! Jump statement lowering (break, continue, return)

use crate::ast::Expression;
use crate::codegen::{FunctionLowering, LoweringContext};
use crate::ir::{Instruction, Segment};
use pseudoc_common::{AtomicType, CompilerError, LoweringError};

pub fn lower_break(ctx: LoweringContext) -> Result<Segment, CompilerError> {
    let target = ctx.break_label.ok_or(LoweringError::BreakOutsideLoop)?;
    let mut segment = Segment::new();
    segment.push(Instruction::jump(target));
    Ok(segment)
}

pub fn lower_continue(ctx: LoweringContext) -> Result<Segment, CompilerError> {
    let target = ctx.continue_label.ok_or(LoweringError::ContinueOutsideLoop)?;
    let mut segment = Segment::new();
    segment.push(Instruction::jump(target));
    Ok(segment)
}

pub fn lower_return(
    lowering: &mut FunctionLowering,
    value: Option<&Expression>,
    ctx: LoweringContext,
) -> Result<Segment, CompilerError> {
    let return_type = lowering.return_type;
    let mut segment = Segment::new();

    let value = match value {
        None if return_type.is_void() => None,
        None => return Err(LoweringError::type_mismatch(return_type, AtomicType::Void, "return").into()),
        Some(expr) => {
            let lowered = lowering.lower_expression(expr, ctx.scope)?;
            let value = segment.append_value(lowered, "return")?;
            if return_type.is_void() {
                return Err(LoweringError::type_mismatch(AtomicType::Void, value.ty(), "return").into());
            }
            Some(lowering.coerce(&mut segment, value, return_type, "return")?)
        }
    };

    segment.push(Instruction::ret(value));
    Ok(segment)
}
