//! Function definition lowering and the compilation driver

use super::{FunctionLowering, LoweringContext};
use crate::ast::FunctionDefinition;
use crate::ir::{Instruction, Segment};
use crate::parser::Parser;
use crate::scope::{FunctionTable, Signature};
use log::{debug, warn};
use pseudoc_common::{CompileOptions, CompilerError};

impl FunctionLowering<'_> {
    /// Lower a whole definition into one segment with every label resolved
    pub fn lower_function(mut self, definition: &FunctionDefinition) -> Result<Segment, CompilerError> {
        let mut segment = Segment::new();
        segment.push(Instruction::FunctionBegin {
            name: definition.name.clone(),
            return_type: definition.return_type,
            params: self.params.clone(),
        });
        segment.push(Instruction::Label(self.entry));

        // Spill parameters so the body can treat them like locals
        let root = self.scopes.root();
        let incoming = self.params.clone();
        for (param, value) in definition.params.iter().zip(incoming) {
            let slot = self.declare_slot(&mut segment, root, &param.name, param.ty)?;
            self.store(&mut segment, value, slot)?;
        }

        let body_scope = self.scopes.open_child(root);
        let body = self.lower_block(&definition.body, LoweringContext::new(body_scope))?;
        segment.append(body);

        if !segment.ends_with_terminator() {
            if self.return_type.is_void() {
                segment.push(Instruction::ret(None));
            } else {
                warn!("control reaches the end of non-void function '{}'", definition.name);
            }
        }
        segment.push(Instruction::FunctionEnd);

        self.labels.check_all_fixed()?;
        self.labels.resolve_segment(&mut segment)?;

        debug!(
            "lowered '{}': {} instruction(s), {} label(s)",
            definition.name,
            segment.len(),
            self.labels.len()
        );
        Ok(segment)
    }
}

/// Lowers definitions in source order against one function table
#[derive(Debug, Default)]
pub struct Compiler {
    functions: FunctionTable,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            functions: FunctionTable::new(),
            options,
        }
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Register the definition's signature, then lower its body
    pub fn lower_definition(&mut self, definition: &FunctionDefinition) -> Result<Segment, CompilerError> {
        let signature = Signature {
            return_type: definition.return_type,
            params: definition.param_types(),
        };
        debug!("lowering '{}' {signature}", definition.name);
        self.functions.register(&definition.name, signature.clone())?;

        let lowering = FunctionLowering::new(&self.functions, &self.options, &signature)?;
        lowering.lower_function(definition)
    }

    /// Parse and lower every definition in `source`, one at a time
    pub fn compile(&mut self, source: &str) -> Result<Vec<Segment>, CompilerError> {
        let mut parser = Parser::new(source);
        let mut segments = Vec::new();

        while !parser.is_at_end() {
            let definition = parser.parse_definition()?;
            segments.push(self.lower_definition(&definition)?);
        }

        Ok(segments)
    }
}
