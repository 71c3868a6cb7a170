//! The values of loadable constants, as an emitter would put them into the constant pool.

use anyhow::{anyhow, bail, Context, Result};
use java_string::JavaString;
use log::trace;
use jasm::ast::Element;
use jasm::ast::composite::Array;
use jasm::number::NumberValue;
use crate::handle::Handle;

#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	String(JavaString),
	/// A class or array type, given as descriptor.
	Type(JavaString),
	/// A method type, given as method descriptor.
	MethodType(JavaString),
	Handle(Handle),
	Dynamic(Box<ConstantDynamic>),
}

/// A dynamically computed constant, written as `[name, descriptor, [bootstrap handle], [arguments]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDynamic {
	pub name: JavaString,
	pub descriptor: JavaString,
	pub bootstrap: Handle,
	pub arguments: Vec<Constant>,
}

impl Constant {
	/// Converts an element that was verified to be a constant.
	///
	/// Nesting isn't bounded here, so the element must have passed [`verify_constant`][crate::operands::verify_constant]
	/// first, which rejects anything nested deeper than [`MAX_NESTING_DEPTH`][jasm::context::MAX_NESTING_DEPTH].
	pub fn from_element(element: &Element) -> Result<Constant> {
		match element {
			Element::Number(number) => Ok(match number.value()? {
				NumberValue::Int(x) => Constant::Int(x),
				NumberValue::Long(x) => Constant::Long(x),
				NumberValue::Float(x) => Constant::Float(x),
				NumberValue::Double(x) => Constant::Double(x),
			}),
			Element::String(string) => Ok(Constant::String(string.token.content.clone())),
			Element::Identifier(identifier) => {
				let content = identifier.content();
				if content.starts_with('(') {
					Ok(Constant::MethodType(identifier.token.content.clone()))
				} else if content.starts_with('L') || content.starts_with('[') {
					Ok(Constant::Type(identifier.token.content.clone()))
				} else {
					bail!("expected class, method or array descriptor, got {:?} at {}", identifier.text(), identifier.location())
				}
			},
			Element::Array(array) => match array.last() {
				Some(Element::Array(_) | Element::Empty(_)) => Ok(Constant::Dynamic(Box::new(ConstantDynamic::try_from(array)?))),
				Some(Element::Identifier(_)) => Ok(Constant::Handle(Handle::try_from(array)?)),
				_ => bail!("expected constant dynamic or handle at {}", array.location),
			},
			element => bail!("expected constant, got {} at {}", element.kind(), element.location()),
		}
	}
}

impl TryFrom<&Array> for ConstantDynamic {
	type Error = anyhow::Error;

	fn try_from(array: &Array) -> Result<ConstantDynamic> {
		if array.len() != 4 {
			bail!("expected name, type, handle and args for a constant dynamic, got {} elements", array.len());
		}

		let identifier = |index: usize| match array.get(index) {
			Some(Element::Identifier(identifier)) => Ok(identifier.token.content.clone()),
			_ => Err(anyhow!("expected identifier at index {index} of constant dynamic at {}", array.location)),
		};
		let name = identifier(0)?;
		let descriptor = identifier(1)?;
		trace!("converting constant dynamic {name:?} {descriptor:?} at {}", array.location);

		let bootstrap = match array.get(2) {
			Some(Element::Array(handle)) => Handle::try_from(handle)
				.with_context(|| anyhow!("invalid bootstrap handle of constant dynamic {name:?}"))?,
			_ => bail!("expected bootstrap handle of constant dynamic {name:?}"),
		};

		let arguments = match array.get(3) {
			Some(Element::Array(arguments)) => arguments.elements.iter()
				.map(|argument| match argument {
					Some(argument) => Constant::from_element(argument),
					None => bail!("hole in the arguments of constant dynamic {name:?}"),
				})
				.collect::<Result<_>>()?,
			Some(Element::Empty(_)) => Vec::new(),
			_ => bail!("expected arguments of constant dynamic {name:?}"),
		};

		Ok(ConstantDynamic { name, descriptor, bootstrap, arguments })
	}
}
