//! The JVM bytecode format for the assembly front end of [`jasm`].
//!
//! [`JvmFormat`] decides which instructions exist and what their operands look like. The [`handle`] and
//! [`constant`] modules turn verified operands into values an emitter can put into a class file.

use jasm::ast::Element;
use jasm::operand::{BytecodeFormat, InstructionSet};
use jasm::processor::{AstProcessor, ProcessResult};
use crate::instructions::jvm_instructions;
use crate::operands::JvmOperand;

pub mod handle;
pub mod constant;
pub mod operands;
pub mod instructions;

#[derive(Debug, Clone)]
pub struct JvmFormat {
	instructions: InstructionSet<JvmOperand>,
}

impl JvmFormat {
	pub fn new() -> JvmFormat {
		JvmFormat { instructions: jvm_instructions() }
	}
}

impl Default for JvmFormat {
	fn default() -> Self {
		JvmFormat::new()
	}
}

impl BytecodeFormat for JvmFormat {
	type Operand = JvmOperand;

	fn name(&self) -> &'static str {
		"jvm"
	}

	fn instructions(&self) -> &InstructionSet<JvmOperand> {
		&self.instructions
	}
}

/// Processes top level declarations with the JVM format.
pub fn process(declarations: &[Element]) -> ProcessResult {
	let format = JvmFormat::new();
	AstProcessor::new(&format).process(declarations)
}
