//! Expression lowering
//!
//! Each expression lowers into a segment whose `result` is the value it
//! produced. Operands are always lowered left to right.

use super::{retype_literal, FunctionLowering};
use crate::ast::{ArithmeticOp, CompareOp, Expression};
use crate::ir::{Instruction, IrBinaryOp, Relation, Segment, Value};
use crate::scope::ScopeId;
use pseudoc_common::{AtomicType, CompilerError, LoweringError};

impl From<ArithmeticOp> for IrBinaryOp {
    fn from(op: ArithmeticOp) -> Self {
        match op {
            ArithmeticOp::Add => IrBinaryOp::Add,
            ArithmeticOp::Sub => IrBinaryOp::Sub,
            ArithmeticOp::Mul => IrBinaryOp::Mul,
            ArithmeticOp::Div => IrBinaryOp::SDiv,
            ArithmeticOp::Rem => IrBinaryOp::SRem,
        }
    }
}

impl From<CompareOp> for Relation {
    fn from(op: CompareOp) -> Self {
        match op {
            CompareOp::Less => Relation::Slt,
            CompareOp::LessEqual => Relation::Sle,
            CompareOp::Greater => Relation::Sgt,
            CompareOp::GreaterEqual => Relation::Sge,
            CompareOp::Equal => Relation::Eq,
            CompareOp::NotEqual => Relation::Ne,
        }
    }
}

impl FunctionLowering<'_> {
    pub fn lower_expression(&mut self, expr: &Expression, scope: ScopeId) -> Result<Segment, CompilerError> {
        match expr {
            Expression::I32Constant(value) => {
                Ok(Segment::from_value(Value::int(i64::from(*value), AtomicType::I32)))
            }
            Expression::FloatConstant(value) => Ok(Segment::from_value(Value::Float {
                value: *value,
                ty: AtomicType::Double,
            })),
            Expression::VariableRef(name) => {
                let slot = self.scopes.lookup(scope, name)?;
                let mut segment = Segment::new();
                segment.result = Some(self.load(&mut segment, slot)?);
                Ok(segment)
            }
            Expression::PreIncrement { name, delta } => self.lower_increment(name, *delta, true, scope),
            Expression::PostIncrement { name, delta } => self.lower_increment(name, *delta, false, scope),
            Expression::Binary { op, left, right } => self.lower_arithmetic(*op, left, right, scope),
            Expression::Compare { op, left, right } => self.lower_comparison(*op, left, right, scope),
            Expression::LogicalAnd { left, right } => self.lower_logical(IrBinaryOp::And, left, right, scope),
            Expression::LogicalOr { left, right } => self.lower_logical(IrBinaryOp::Or, left, right, scope),
            Expression::BooleanCast(inner) => self.lower_boolean_cast(inner, scope),
            Expression::Conditional {
                condition,
                then_expr,
                else_expr,
            } => self.lower_conditional(condition, then_expr, else_expr, scope),
            Expression::Assignment { target, value } => self.lower_assignment(target, value, scope),
            Expression::Call { callee, arguments } => self.lower_call(callee, arguments, scope),
        }
    }

    /// Lower `expr` into `segment` and return its value
    fn lower_operand(
        &mut self,
        segment: &mut Segment,
        expr: &Expression,
        scope: ScopeId,
        context: &str,
    ) -> Result<Value, CompilerError> {
        let lowered = self.lower_expression(expr, scope)?;
        Ok(segment.append_value(lowered, context)?)
    }

    fn lower_increment(
        &mut self,
        name: &str,
        delta: i32,
        prefix: bool,
        scope: ScopeId,
    ) -> Result<Segment, CompilerError> {
        let slot = self.scopes.lookup(scope, name)?;
        let ty = slot.ty();
        let mut segment = Segment::new();

        let old = self.load(&mut segment, slot)?;
        let new = self.new_temp(ty);
        segment.push(Instruction::binary(new, IrBinaryOp::Add, old, Value::int(i64::from(delta), ty))?);
        self.store(&mut segment, new, slot)?;

        segment.result = Some(if prefix { new } else { old });
        Ok(segment)
    }

    fn lower_arithmetic(
        &mut self,
        op: ArithmeticOp,
        left: &Expression,
        right: &Expression,
        scope: ScopeId,
    ) -> Result<Segment, CompilerError> {
        let op = IrBinaryOp::from(op);
        let context = op.to_string();
        let mut segment = Segment::new();

        let lhs = self.lower_operand(&mut segment, left, scope, &context)?;
        let lhs = self.coerce(&mut segment, lhs, AtomicType::I32, &context)?;
        let rhs = self.lower_operand(&mut segment, right, scope, &context)?;
        let rhs = self.coerce(&mut segment, rhs, AtomicType::I32, &context)?;

        let result = self.new_temp(AtomicType::I32);
        segment.push(Instruction::binary(result, op, lhs, rhs)?);
        segment.result = Some(result);
        Ok(segment)
    }

    fn lower_comparison(
        &mut self,
        op: CompareOp,
        left: &Expression,
        right: &Expression,
        scope: ScopeId,
    ) -> Result<Segment, CompilerError> {
        let mut segment = Segment::new();

        let lhs = self.lower_operand(&mut segment, left, scope, "icmp")?;
        let rhs = self.lower_operand(&mut segment, right, scope, "icmp")?;
        let ty = common_type(lhs, rhs)?;
        let lhs = self.coerce(&mut segment, lhs, ty, "icmp")?;
        let rhs = self.coerce(&mut segment, rhs, ty, "icmp")?;

        let result = self.new_temp(AtomicType::Bool);
        segment.push(Instruction::icmp(result, Relation::from(op), lhs, rhs)?);
        segment.result = Some(result);
        Ok(segment)
    }

    /// `&&` and `||` evaluate both operands
    fn lower_logical(
        &mut self,
        op: IrBinaryOp,
        left: &Expression,
        right: &Expression,
        scope: ScopeId,
    ) -> Result<Segment, CompilerError> {
        let context = op.to_string();
        let mut segment = Segment::new();

        let lhs = self.lower_operand(&mut segment, left, scope, &context)?;
        let lhs = self.coerce(&mut segment, lhs, AtomicType::Bool, &context)?;
        let rhs = self.lower_operand(&mut segment, right, scope, &context)?;
        let rhs = self.coerce(&mut segment, rhs, AtomicType::Bool, &context)?;

        let result = self.new_temp(AtomicType::Bool);
        segment.push(Instruction::binary(result, op, lhs, rhs)?);
        segment.result = Some(result);
        Ok(segment)
    }

    fn lower_boolean_cast(&mut self, inner: &Expression, scope: ScopeId) -> Result<Segment, CompilerError> {
        let mut segment = Segment::new();
        let value = self.lower_operand(&mut segment, inner, scope, "boolean cast")?;
        let ty = value.ty();

        if ty == AtomicType::Bool {
            segment.result = Some(value);
            return Ok(segment);
        }
        if !ty.is_integer() {
            return Err(LoweringError::UnsupportedType {
                ty,
                context: "boolean cast".to_string(),
            }
            .into());
        }

        let result = self.new_temp(AtomicType::Bool);
        segment.push(Instruction::icmp(result, Relation::Ne, value, Value::int(0, ty))?);
        segment.result = Some(result);
        Ok(segment)
    }

    fn lower_conditional(
        &mut self,
        condition: &Expression,
        then_expr: &Expression,
        else_expr: &Expression,
        scope: ScopeId,
    ) -> Result<Segment, CompilerError> {
        let mut segment = Segment::new();
        let condition = self.lower_operand(&mut segment, condition, scope, "conditional")?;
        let condition = self.coerce(&mut segment, condition, AtomicType::Bool, "conditional")?;

        let on_true = self.new_label();
        let on_false = self.new_label();
        let join = self.new_label();
        segment.push(Instruction::branch(condition, on_true, on_false)?);

        // i1 only survives when both arms are i1
        let keep_boolean = then_expr.is_boolean() && else_expr.is_boolean();

        self.place_label(&mut segment, on_true)?;
        let then_value = self.lower_arm(&mut segment, then_expr, keep_boolean, scope)?;
        let then_block = self.current_block;
        self.push_jump(&mut segment, join);

        self.place_label(&mut segment, on_false)?;
        let else_value = self.lower_arm(&mut segment, else_expr, keep_boolean, scope)?;
        let else_block = self.current_block;
        self.push_jump(&mut segment, join);

        self.place_label(&mut segment, join)?;

        let ty = if then_value.is_literal() {
            else_value.ty()
        } else {
            then_value.ty()
        };
        let then_value = retype_literal(then_value, ty, "conditional")?;
        let else_value = retype_literal(else_value, ty, "conditional")?;

        let result = self.new_temp(ty);
        segment.push(Instruction::phi(
            result,
            vec![(then_value, then_block), (else_value, else_block)],
        )?);
        segment.result = Some(result);
        Ok(segment)
    }

    fn lower_arm(
        &mut self,
        segment: &mut Segment,
        expr: &Expression,
        keep_boolean: bool,
        scope: ScopeId,
    ) -> Result<Value, CompilerError> {
        let value = self.lower_operand(segment, expr, scope, "conditional")?;
        if !keep_boolean && value.ty() == AtomicType::Bool {
            return Ok(self.coerce(segment, value, AtomicType::I32, "conditional")?);
        }
        Ok(value)
    }

    fn lower_assignment(&mut self, target: &str, value: &Expression, scope: ScopeId) -> Result<Segment, CompilerError> {
        let slot = self.scopes.lookup(scope, target)?;
        let mut segment = Segment::new();

        let value = self.lower_operand(&mut segment, value, scope, "assignment")?;
        let value = self.coerce(&mut segment, value, slot.ty(), "assignment")?;
        self.store(&mut segment, value, slot)?;

        segment.result = Some(value);
        Ok(segment)
    }

    fn lower_call(&mut self, callee: &str, arguments: &[Expression], scope: ScopeId) -> Result<Segment, CompilerError> {
        let functions = self.functions;
        let signature = functions.lookup(callee)?;
        if signature.params.len() != arguments.len() {
            return Err(LoweringError::ArityMismatch {
                function: callee.to_string(),
                expected: signature.params.len(),
                found: arguments.len(),
            }
            .into());
        }

        let mut segment = Segment::new();
        let mut values = Vec::with_capacity(arguments.len());
        for (argument, &ty) in arguments.iter().zip(&signature.params) {
            let value = self.lower_operand(&mut segment, argument, scope, "argument")?;
            values.push(self.coerce(&mut segment, value, ty, "argument")?);
        }

        let return_type = signature.return_type;
        let result = if return_type.is_void() {
            None
        } else {
            Some(self.new_temp(return_type))
        };
        segment.push(Instruction::call(result, callee, return_type, values)?);
        segment.result = result;
        Ok(segment)
    }
}

/// Integer type both sides of a comparison are converted to
fn common_type(lhs: Value, rhs: Value) -> Result<AtomicType, LoweringError> {
    let ty = match (lhs.ty(), rhs.ty()) {
        (l, r) if l == r => l,
        (AtomicType::Bool, r) if !lhs.is_literal() => r,
        (l, AtomicType::Bool) if !rhs.is_literal() => l,
        (_, r) if lhs.is_literal() => r,
        (l, _) if rhs.is_literal() => l,
        (l, r) => return Err(LoweringError::type_mismatch(l, r, "icmp")),
    };

    if !ty.is_integer() {
        return Err(LoweringError::UnsupportedType {
            ty,
            context: "icmp".to_string(),
        });
    }
    Ok(ty)
}
