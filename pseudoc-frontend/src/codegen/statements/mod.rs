//! Statement lowering
//!
//! Statements produce no value; their segments only carry instructions.

mod control_flow;
mod declarations;
mod jumps;

use control_flow::{lower_for, lower_if, lower_while};
use declarations::lower_declaration;
use jumps::{lower_break, lower_continue, lower_return};

use super::{FunctionLowering, LoweringContext};
use crate::ast::Statement;
use crate::ir::Segment;
use pseudoc_common::CompilerError;

impl FunctionLowering<'_> {
    pub fn lower_statement(&mut self, stmt: &Statement, ctx: LoweringContext) -> Result<Segment, CompilerError> {
        match stmt {
            Statement::Expression(expr) => {
                let mut segment = self.lower_expression(expr, ctx.scope)?;
                segment.result = None;
                Ok(segment)
            }
            Statement::Declaration(declarations) => {
                let mut segment = Segment::new();
                for declaration in declarations {
                    let lowered = lower_declaration(self, declaration, ctx)?;
                    segment.append(lowered);
                }
                Ok(segment)
            }
            Statement::Compound(statements) => {
                let inner = ctx.in_scope(self.scopes.open_child(ctx.scope));
                self.lower_block(statements, inner)
            }
            Statement::If {
                condition,
                then_stmt,
                else_stmt,
            } => lower_if(self, condition, then_stmt, else_stmt.as_deref(), ctx),
            Statement::While { condition, body } => lower_while(self, condition, body, ctx),
            Statement::For {
                init,
                condition,
                step,
                body,
            } => lower_for(self, init.as_deref(), condition.as_ref(), step.as_ref(), body, ctx),
            Statement::Return(value) => lower_return(self, value.as_ref(), ctx),
            Statement::Break => lower_break(ctx),
            Statement::Continue => lower_continue(ctx),
        }
    }

    /// Lower statements in order, all in the scope of `ctx`
    pub fn lower_block(&mut self, statements: &[Statement], ctx: LoweringContext) -> Result<Segment, CompilerError> {
        let mut segment = Segment::new();
        for stmt in statements {
            self.open_block_if_terminated(&mut segment)?;
            let lowered = self.lower_statement(stmt, ctx)?;
            segment.append(lowered);
        }
        Ok(segment)
    }
}
