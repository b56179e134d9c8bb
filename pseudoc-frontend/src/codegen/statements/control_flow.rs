//! Control flow statement lowering (if, while, for)

use crate::ast::{Expression, Statement};
use crate::codegen::{FunctionLowering, LoweringContext};
use crate::ir::{Instruction, Label, Segment};
use pseudoc_common::{AtomicType, CompilerError};

/// Lower a condition and branch on it
fn branch_on(
    lowering: &mut FunctionLowering,
    segment: &mut Segment,
    condition: &Expression,
    on_true: Label,
    on_false: Label,
    ctx: LoweringContext,
) -> Result<(), CompilerError> {
    let lowered = lowering.lower_expression(condition, ctx.scope)?;
    let value = segment.append_value(lowered, "condition")?;
    let value = lowering.coerce(segment, value, AtomicType::Bool, "condition")?;
    segment.push(Instruction::branch(value, on_true, on_false)?);
    Ok(())
}

pub fn lower_if(
    lowering: &mut FunctionLowering,
    condition: &Expression,
    then_stmt: &Statement,
    else_stmt: Option<&Statement>,
    ctx: LoweringContext,
) -> Result<Segment, CompilerError> {
    let mut segment = Segment::new();
    let then_label = lowering.new_label();
    let else_label = lowering.new_label();
    branch_on(lowering, &mut segment, condition, then_label, else_label, ctx)?;

    // Then block
    lowering.place_label(&mut segment, then_label)?;
    let lowered = lowering.lower_statement(then_stmt, ctx)?;
    segment.append(lowered);

    match else_stmt {
        None => {
            lowering.push_jump(&mut segment, else_label);
            lowering.place_label(&mut segment, else_label)?;
        }
        Some(else_stmt) => {
            let end_label = lowering.new_label();
            lowering.push_jump(&mut segment, end_label);

            // Else block
            lowering.place_label(&mut segment, else_label)?;
            let lowered = lowering.lower_statement(else_stmt, ctx)?;
            segment.append(lowered);
            lowering.push_jump(&mut segment, end_label);

            lowering.place_label(&mut segment, end_label)?;
        }
    }

    Ok(segment)
}

pub fn lower_while(
    lowering: &mut FunctionLowering,
    condition: &Expression,
    body: &Statement,
    ctx: LoweringContext,
) -> Result<Segment, CompilerError> {
    let check_label = lowering.new_label();
    let body_label = lowering.new_label();
    let exit_label = lowering.new_label();
    let mut segment = Segment::new();

    lowering.push_jump(&mut segment, check_label);

    // Condition check
    lowering.place_label(&mut segment, check_label)?;
    branch_on(lowering, &mut segment, condition, body_label, exit_label, ctx)?;

    // Body
    lowering.place_label(&mut segment, body_label)?;
    let lowered = lowering.lower_statement(body, ctx.in_loop(exit_label, check_label))?;
    segment.append(lowered);
    lowering.push_jump(&mut segment, check_label);

    lowering.place_label(&mut segment, exit_label)?;
    Ok(segment)
}

/// The initializer lives in a scope of its own. `continue` jumps to the
/// condition, skipping the step.
pub fn lower_for(
    lowering: &mut FunctionLowering,
    init: Option<&Statement>,
    condition: Option<&Expression>,
    step: Option<&Expression>,
    body: &Statement,
    ctx: LoweringContext,
) -> Result<Segment, CompilerError> {
    let ctx = ctx.in_scope(lowering.scopes.open_child(ctx.scope));
    let mut segment = Segment::new();

    if let Some(init) = init {
        let lowered = lowering.lower_statement(init, ctx)?;
        segment.append(lowered);
    }

    let check_label = lowering.new_label();
    let body_label = lowering.new_label();
    let exit_label = lowering.new_label();

    lowering.push_jump(&mut segment, check_label);

    // Condition check; a missing condition always enters the body
    lowering.place_label(&mut segment, check_label)?;
    match condition {
        Some(condition) => branch_on(lowering, &mut segment, condition, body_label, exit_label, ctx)?,
        None => lowering.push_jump(&mut segment, body_label),
    }

    // Body, then step
    lowering.place_label(&mut segment, body_label)?;
    let lowered = lowering.lower_statement(body, ctx.in_loop(exit_label, check_label))?;
    segment.append(lowered);

    if let Some(step) = step {
        lowering.open_block_if_terminated(&mut segment)?;
        let lowered = lowering.lower_expression(step, ctx.scope)?;
        segment.append(lowered);
    }
    lowering.push_jump(&mut segment, check_label);

    lowering.place_label(&mut segment, exit_label)?;
    Ok(segment)
}
