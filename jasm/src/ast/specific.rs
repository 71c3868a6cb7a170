//! The resolved nodes, produced by the [`AstProcessor`][crate::processor::AstProcessor].

use indexmap::IndexMap;
use crate::ast::Element;
use crate::ast::composite::Code;
use crate::ast::primitive::Identifier;
use crate::location::Location;
use crate::modifiers::Modifiers;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
	pub modifiers: Modifiers,
	pub name: Identifier,
	pub signature: Option<Identifier>,
	pub super_name: Option<Identifier>,
	pub interfaces: Vec<Identifier>,
	pub annotations: Vec<Annotation>,
	pub fields: Vec<Field>,
	pub methods: Vec<Method>,
	pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	pub modifiers: Modifiers,
	pub name: Identifier,
	pub descriptor: Identifier,
	/// The constant value, either an [`Element::Number`] or an [`Element::String`].
	pub value: Option<Element>,
	pub signature: Option<Identifier>,
	pub annotations: Vec<Annotation>,
	pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
	pub modifiers: Modifiers,
	pub name: Identifier,
	pub descriptor: Identifier,
	pub signature: Option<Identifier>,
	pub annotations: Vec<Annotation>,
	pub parameters: Vec<Identifier>,
	pub code: Option<Code>,
	pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationValue {
	pub name: Token,
	/// A normalized value: a number, a string, a bool, a type identifier, an array of normalized values,
	/// an annotation or an enum.
	pub value: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
	pub annotation_type: Identifier,
	pub values: IndexMap<String, AnnotationValue>,
	pub location: Location,
}

impl Annotation {
	pub fn get(&self, name: &str) -> Option<&Element> {
		self.values.get(name).map(|value| &value.value)
	}
}

/// An enum constant used as annotation value.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
	pub enum_type: Identifier,
	pub name: Identifier,
	pub location: Location,
}
