//! The operand kinds of the JVM format.
//!
//! The composite kinds are built from each other: an args array holds constants, a constant may be a handle or a
//! constant dynamic, and a constant dynamic holds a handle and another args array. Each of the checks reports the
//! problems it finds and goes on with the remaining parts.

use jasm::ast::{Element, ElementKind};
use jasm::ast::composite::Array;
use jasm::context::ParserContext;
use jasm::error::ErrorKind;
use jasm::operand::{DefaultOperand, Operand};
use crate::handle::HandleKind;

/// The primitive types `newarray` takes.
pub const NEW_ARRAY_TYPES: [&str; 8] = ["boolean", "byte", "char", "short", "int", "float", "long", "double"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JvmOperand {
	Default(DefaultOperand),
	/// Anything `ldc` can load: a number, a string, a type or method descriptor, a handle or a constant dynamic.
	Constant,
	/// A `[kind, Owner.member, descriptor]`.
	Handle,
	/// A `{ min: .., max: .., default: .., cases: [..] }`.
	TableSwitch,
	/// A `{ <key>: <label>, .., default: <label> }`.
	LookupSwitch,
	/// An array of constants.
	Args,
	Type,
	NewArrayType,
}

impl From<DefaultOperand> for JvmOperand {
	fn from(value: DefaultOperand) -> Self {
		JvmOperand::Default(value)
	}
}

impl Operand for JvmOperand {
	fn name(self) -> &'static str {
		match self {
			JvmOperand::Default(operand) => operand.name(),
			JvmOperand::Constant => "constant",
			JvmOperand::Handle => "handle",
			JvmOperand::TableSwitch => "table switch",
			JvmOperand::LookupSwitch => "lookup switch",
			JvmOperand::Args => "args",
			JvmOperand::Type => "type",
			JvmOperand::NewArrayType => "new array type",
		}
	}

	fn verify(self, ctx: &mut ParserContext, element: &Element) {
		match self {
			JvmOperand::Default(operand) => operand.verify(ctx, element),
			JvmOperand::Constant => verify_constant(ctx, element),
			JvmOperand::Handle => verify_handle(ctx, element),
			JvmOperand::TableSwitch => verify_table_switch(ctx, element),
			JvmOperand::LookupSwitch => verify_lookup_switch(ctx, element),
			JvmOperand::Args => verify_args(ctx, element),
			JvmOperand::Type => verify_type(ctx, element),
			JvmOperand::NewArrayType => verify_new_array_type(ctx, element),
		}
	}
}

fn unexpected_array(ctx: &mut ParserContext, expected: &str, array: &Array) {
	ctx.error(ErrorKind::UnexpectedElement { expected: expected.to_owned(), actual: ElementKind::Array }, &array.location);
}

pub fn verify_constant(ctx: &mut ParserContext, element: &Element) {
	match element {
		Element::Number(_) | Element::String(_) => {},
		Element::Identifier(identifier) => {
			let content = identifier.content();
			if !(content.starts_with('L') || content.starts_with('(') || content.starts_with('[')) {
				ctx.unexpected("class, method or array descriptor", element);
			}
		},
		Element::Array(array) => {
			ctx.nested("constant", &array.location, |ctx| match array.elements.last() {
				Some(Some(Element::Array(_) | Element::Empty(_))) => verify_constant_dynamic(ctx, array),
				Some(Some(Element::Identifier(_))) => verify_handle_array(ctx, array),
				_ => ctx.unexpected("constant", element),
			});
		},
		_ => ctx.unexpected("constant", element),
	}
}

/// Checks a `[name, descriptor, handle, args]`.
pub fn verify_constant_dynamic(ctx: &mut ParserContext, array: &Array) {
	let [name, descriptor, handle, args] = array.elements.as_slice() else {
		unexpected_array(ctx, "name, type, handle and args", array);
		return;
	};

	if let Some(name) = ctx.present("constant dynamic name", name.as_ref(), &array.location) {
		ctx.identifier("constant dynamic name", name);
	}
	if let Some(descriptor) = ctx.present("constant dynamic type", descriptor.as_ref(), &array.location) {
		ctx.identifier("constant dynamic type", descriptor);
	}
	if let Some(handle) = ctx.present("bootstrap handle", handle.as_ref(), &array.location) {
		verify_handle(ctx, handle);
	}
	if let Some(args) = ctx.present("bootstrap arguments", args.as_ref(), &array.location) {
		verify_args(ctx, args);
	}
}

pub fn verify_handle(ctx: &mut ParserContext, element: &Element) {
	match element {
		Element::Array(array) => verify_handle_array(ctx, array),
		_ => ctx.unexpected("handle", element),
	}
}

/// Checks a `[kind, name, descriptor]`.
pub fn verify_handle_array(ctx: &mut ParserContext, array: &Array) {
	if array.len() != 3 {
		unexpected_array(ctx, "kind, name and descriptor", array);
		return;
	}

	let parts: Vec<_> = array.elements.iter()
		.map(|part| {
			let part = ctx.present("handle element", part.as_ref(), &array.location)?;
			ctx.identifier("handle element", part)
		})
		.collect();

	if let Some(Some(kind)) = parts.first() {
		if HandleKind::from_keyword(&kind.text()).is_none() {
			ctx.error(ErrorKind::UnexpectedElement {
				expected: "kind, name and descriptor".to_owned(),
				actual: ElementKind::Identifier,
			}, kind.location());
		}
	}
}

/// Checks an array of constants, where `{}` is the empty array.
pub fn verify_args(ctx: &mut ParserContext, element: &Element) {
	let Some(array) = ctx.array("args", element) else {
		return;
	};
	ctx.nested("args", &array.location, |ctx| {
		for value in &array.elements {
			if let Some(value) = ctx.present("args element", value.as_ref(), &array.location) {
				verify_constant(ctx, value);
			}
		}
	});
}

pub fn verify_table_switch(ctx: &mut ParserContext, element: &Element) {
	let Some(object) = ctx.object("table switch", element) else {
		return;
	};
	ctx.duplicate_keys("table switch", &object);
	if !ctx.object_with_keys("table switch", &object, &["min", "max", "default", "cases"]) {
		return;
	}

	for key in ["min", "max"] {
		if let Some(value) = ctx.present(key, object.value(key), &object.location) {
			ctx.integer(key, value);
		}
	}
	if let Some(default) = ctx.present("default label", object.value("default"), &object.location) {
		ctx.identifier("default label", default);
	}
	if let Some(cases) = ctx.present("cases", object.value("cases"), &object.location) {
		ctx.identifiers("cases", cases);
	}
}

pub fn verify_lookup_switch(ctx: &mut ParserContext, element: &Element) {
	let Some(object) = ctx.object("lookup switch", element) else {
		return;
	};
	ctx.duplicate_keys("lookup switch", &object);
	if !object.contains_key("default") {
		ctx.missing("default label", &object.location);
	}

	for entry in object.entries() {
		if let Some(label) = ctx.present("label", entry.value.as_ref(), &entry.key.location) {
			ctx.identifier("label", label);
		}
	}
}

pub fn verify_type(ctx: &mut ParserContext, element: &Element) {
	ctx.identifier("type", element);
}

pub fn verify_new_array_type(ctx: &mut ParserContext, element: &Element) {
	let Some(identifier) = ctx.identifier("new array type", element) else {
		return;
	};
	let text = identifier.text();
	if !NEW_ARRAY_TYPES.contains(&text.as_ref()) {
		ctx.unexpected("boolean, byte, char, short, int, float, long or double", element);
	}
}
