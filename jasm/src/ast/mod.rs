//! The element model.
//!
//! Raw trees, as produced by grouping tokens, consist of [`Declaration`]s, literals, [`Array`]s, [`Object`]s,
//! [`Code`] with [`Instruction`]s and [`Label`]s, and [`Empty`]s. Processing them produces the resolved
//! [`Class`], [`Field`], [`Method`], [`Annotation`], [`Enum`] and [`Bool`] nodes.

use std::fmt::{Display, Formatter};
use crate::location::Location;
use crate::token::TokenKind;

pub mod primitive;
pub mod composite;
pub mod specific;

use primitive::{Bool, Empty, Identifier, Label, Number, StringLiteral};
use composite::{Array, Code, Declaration, Instruction, Object};
use specific::{Annotation, Class, Enum, Field, Method};

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
	Declaration(Declaration),
	Identifier(Identifier),
	Number(Number),
	String(StringLiteral),
	Array(Array),
	Object(Object),
	Label(Label),
	Bool(Bool),
	Empty(Empty),
	Code(Code),
	Instruction(Instruction),
	Class(Box<Class>),
	Field(Box<Field>),
	Method(Method),
	Annotation(Annotation),
	Enum(Enum),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Declaration,
	Identifier,
	Number,
	String,
	Array,
	Object,
	Label,
	Bool,
	Empty,
	Code,
	Instruction,
	Class,
	Field,
	Method,
	Annotation,
	Enum,
}

impl ElementKind {
	/// The kind of the literal element a token of that kind becomes.
	pub fn of_token(kind: TokenKind) -> ElementKind {
		match kind {
			TokenKind::String => ElementKind::String,
			TokenKind::Number => ElementKind::Number,
			TokenKind::Identifier | TokenKind::Operator => ElementKind::Identifier,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			ElementKind::Declaration => "declaration",
			ElementKind::Identifier => "identifier",
			ElementKind::Number => "number",
			ElementKind::String => "string",
			ElementKind::Array => "array",
			ElementKind::Object => "object",
			ElementKind::Label => "label",
			ElementKind::Bool => "bool",
			ElementKind::Empty => "empty",
			ElementKind::Code => "code",
			ElementKind::Instruction => "instruction",
			ElementKind::Class => "class",
			ElementKind::Field => "field",
			ElementKind::Method => "method",
			ElementKind::Annotation => "annotation",
			ElementKind::Enum => "enum",
		}
	}
}

impl Display for ElementKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl Element {
	pub fn kind(&self) -> ElementKind {
		match self {
			Element::Declaration(_) => ElementKind::Declaration,
			Element::Identifier(_) => ElementKind::Identifier,
			Element::Number(_) => ElementKind::Number,
			Element::String(_) => ElementKind::String,
			Element::Array(_) => ElementKind::Array,
			Element::Object(_) => ElementKind::Object,
			Element::Label(_) => ElementKind::Label,
			Element::Bool(_) => ElementKind::Bool,
			Element::Empty(_) => ElementKind::Empty,
			Element::Code(_) => ElementKind::Code,
			Element::Instruction(_) => ElementKind::Instruction,
			Element::Class(_) => ElementKind::Class,
			Element::Field(_) => ElementKind::Field,
			Element::Method(_) => ElementKind::Method,
			Element::Annotation(_) => ElementKind::Annotation,
			Element::Enum(_) => ElementKind::Enum,
		}
	}

	pub fn location(&self) -> &Location {
		match self {
			Element::Declaration(x) => &x.location,
			Element::Identifier(x) => x.location(),
			Element::Number(x) => x.location(),
			Element::String(x) => x.location(),
			Element::Array(x) => &x.location,
			Element::Object(x) => &x.location,
			Element::Label(x) => x.location(),
			Element::Bool(x) => x.location(),
			Element::Empty(x) => &x.location,
			Element::Code(x) => &x.location,
			Element::Instruction(x) => &x.location,
			Element::Class(x) => &x.location,
			Element::Field(x) => &x.location,
			Element::Method(x) => &x.location,
			Element::Annotation(x) => &x.location,
			Element::Enum(x) => &x.location,
		}
	}

	/// Checks if this is a single value written as one token: an identifier, a number, a string or a bool.
	pub fn is_literal(&self) -> bool {
		matches!(self, Element::Identifier(_) | Element::Number(_) | Element::String(_) | Element::Bool(_))
	}

	pub fn as_identifier(&self) -> Option<&Identifier> {
		match self {
			Element::Identifier(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&Number> {
		match self {
			Element::Number(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_string(&self) -> Option<&StringLiteral> {
		match self {
			Element::String(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&Array> {
		match self {
			Element::Array(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Element::Object(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_declaration(&self) -> Option<&Declaration> {
		match self {
			Element::Declaration(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_class(&self) -> Option<&Class> {
		match self {
			Element::Class(x) => Some(&**x),
			_ => None,
		}
	}
}
