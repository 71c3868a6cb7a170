//! The operand verification framework.
//!
//! A [`BytecodeFormat`] brings its own operand kinds (implementing [`Operand`]) and an [`InstructionSet`] mapping
//! each mnemonic to the operands of the instruction. Formats usually wrap [`DefaultOperand`] in their own
//! operand kind type.

use std::fmt::Debug;
use indexmap::IndexMap;
use log::trace;
use crate::ast::Element;
use crate::ast::composite::Instruction;
use crate::context::ParserContext;
use crate::error::ErrorKind;

/// A kind of instruction argument.
///
/// Verification only ever reports problems to the context: verifying a valid element leaves the context unchanged.
pub trait Operand: Copy + Debug {
	fn name(self) -> &'static str;

	fn verify(self, ctx: &mut ParserContext, element: &Element);
}

/// The operand kinds every format has.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DefaultOperand {
	String,
	/// A number that isn't floating point.
	Integer,
	Identifier,
	/// An identifier, number or string.
	Literal,
	/// The name of a label.
	Label,
}

impl Operand for DefaultOperand {
	fn name(self) -> &'static str {
		match self {
			DefaultOperand::String => "string",
			DefaultOperand::Integer => "integer",
			DefaultOperand::Identifier => "identifier",
			DefaultOperand::Literal => "literal",
			DefaultOperand::Label => "label",
		}
	}

	fn verify(self, ctx: &mut ParserContext, element: &Element) {
		match self {
			DefaultOperand::String => {
				ctx.string("string", element);
			},
			DefaultOperand::Integer => {
				ctx.integer("integer", element);
			},
			DefaultOperand::Identifier => {
				ctx.identifier("identifier", element);
			},
			DefaultOperand::Literal => {
				if !element.is_literal() {
					ctx.unexpected("literal", element);
				}
			},
			DefaultOperand::Label => {
				ctx.identifier("label", element);
			},
		}
	}
}

/// Maps mnemonics to the operands of the instruction, in order.
#[derive(Debug, Clone)]
pub struct InstructionSet<O> {
	instructions: IndexMap<String, Vec<O>>,
}

impl<O> Default for InstructionSet<O> {
	fn default() -> Self {
		InstructionSet { instructions: IndexMap::new() }
	}
}

impl<O: Operand> InstructionSet<O> {
	pub fn new() -> InstructionSet<O> {
		InstructionSet::default()
	}

	/// Registers an instruction, replacing any previous one with the same mnemonic.
	pub fn register(&mut self, mnemonic: impl Into<String>, operands: &[O]) {
		self.instructions.insert(mnemonic.into(), operands.to_vec());
	}

	/// Like [`Self::register`], but for chaining.
	pub fn with(mut self, mnemonic: impl Into<String>, operands: &[O]) -> InstructionSet<O> {
		self.register(mnemonic, operands);
		self
	}

	pub fn get(&self, mnemonic: &str) -> Option<&[O]> {
		self.instructions.get(mnemonic).map(Vec::as_slice)
	}

	pub fn contains(&self, mnemonic: &str) -> bool {
		self.instructions.contains_key(mnemonic)
	}

	pub fn len(&self) -> usize {
		self.instructions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.instructions.is_empty()
	}

	pub fn mnemonics(&self) -> impl Iterator<Item=&str> {
		self.instructions.keys().map(String::as_str)
	}

	/// Verifies an instruction: the mnemonic must be known, the argument count must match, and each argument must
	/// have the shape of its operand.
	pub fn verify(&self, ctx: &mut ParserContext, instruction: &Instruction) {
		let mnemonic = instruction.mnemonic.text();
		let Some(operands) = self.get(&mnemonic) else {
			ctx.error(ErrorKind::UnknownInstruction { mnemonic: mnemonic.into_owned() }, &instruction.location);
			return;
		};

		if operands.len() != instruction.arguments.len() {
			let reason = format!("{mnemonic} takes {} arguments, got {}", operands.len(), instruction.arguments.len());
			ctx.malformed("instruction", reason, &instruction.location);
			return;
		}

		trace!("verifying {mnemonic} with {operands:?}");
		for (operand, argument) in operands.iter().zip(&instruction.arguments) {
			if let Some(argument) = ctx.present(operand.name(), argument.as_ref(), &instruction.location) {
				operand.verify(ctx, argument);
			}
		}
	}
}

/// A bytecode format, defining which instructions exist and what operands they take.
pub trait BytecodeFormat {
	type Operand: Operand;

	fn name(&self) -> &'static str;

	fn instructions(&self) -> &InstructionSet<Self::Operand>;
}
