//! The [`ParserContext`], holding the diagnostics of one run, and validation helpers on top of it.
//!
//! Each helper checks the shape of one element. If the shape is wrong, it reports that and returns `None`,
//! so that the caller can go on with the next element.

use std::borrow::Cow;
use crate::ast::Element;
use crate::ast::composite::{Array, Code, Declaration, Object};
use crate::ast::primitive::{Identifier, Number, StringLiteral};
use crate::error::{ErrorCollector, ErrorKind};
use crate::location::Location;

/// How deep composite operands and annotation values may be nested.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Default)]
pub struct ParserContext {
	errors: ErrorCollector,
	depth: usize,
}

impl ParserContext {
	pub fn new() -> ParserContext {
		ParserContext::default()
	}

	pub fn error(&mut self, kind: ErrorKind, location: &Location) {
		self.errors.add_error(kind, location.clone());
	}

	pub fn warn(&mut self, message: impl Into<String>, location: &Location) {
		self.errors.add_warning(message, location.clone());
	}

	pub fn errors(&self) -> &ErrorCollector {
		&self.errors
	}

	pub fn into_errors(self) -> ErrorCollector {
		self.errors
	}

	pub fn unexpected(&mut self, expected: &str, element: &Element) {
		self.error(ErrorKind::UnexpectedElement { expected: expected.to_owned(), actual: element.kind() }, element.location());
	}

	pub fn missing(&mut self, expected: &str, location: &Location) {
		self.error(ErrorKind::MissingElement { expected: expected.to_owned() }, location);
	}

	pub fn malformed(&mut self, operand: &str, reason: impl Into<String>, location: &Location) {
		self.error(ErrorKind::MalformedOperand { operand: operand.to_owned(), reason: reason.into() }, location);
	}

	/// Reports a hole as missing. The `location` is the one of the container of the hole.
	pub fn present<'e>(&mut self, expected: &str, element: Option<&'e Element>, location: &Location) -> Option<&'e Element> {
		if element.is_none() {
			self.missing(expected, location);
		}
		element
	}

	/// Requires an identifier.
	pub fn identifier(&mut self, expected: &str, element: &Element) -> Option<Identifier> {
		match element {
			Element::Identifier(identifier) => Some(identifier.clone()),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires an identifier, but also accepts a number as identifier, since names like `1` are valid.
	pub fn name(&mut self, expected: &str, element: &Element) -> Option<Identifier> {
		match element {
			Element::Identifier(identifier) => Some(identifier.clone()),
			Element::Number(number) => Some(Identifier::from_number(number)),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	pub fn number<'e>(&mut self, expected: &str, element: &'e Element) -> Option<&'e Number> {
		match element {
			Element::Number(number) => Some(number),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires a number that isn't floating point.
	pub fn integer<'e>(&mut self, expected: &str, element: &'e Element) -> Option<&'e Number> {
		let number = self.number(expected, element)?;
		if number.is_floating_point() {
			self.unexpected("integer", element);
			None
		} else {
			Some(number)
		}
	}

	pub fn string<'e>(&mut self, expected: &str, element: &'e Element) -> Option<&'e StringLiteral> {
		match element {
			Element::String(string) => Some(string),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires an array, taking an [`Element::Empty`] as the empty array.
	pub fn array<'e>(&mut self, expected: &str, element: &'e Element) -> Option<Cow<'e, Array>> {
		match element {
			Element::Array(array) => Some(Cow::Borrowed(array)),
			Element::Empty(empty) => Some(Cow::Owned(Array::empty(empty.location.clone()))),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires an object, taking an [`Element::Empty`] as the empty object.
	pub fn object<'e>(&mut self, expected: &str, element: &'e Element) -> Option<Cow<'e, Object>> {
		match element {
			Element::Object(object) => Some(Cow::Borrowed(object)),
			Element::Empty(empty) => Some(Cow::Owned(Object::empty(empty.location.clone()))),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires code, taking an [`Element::Empty`] as empty code.
	pub fn code<'e>(&mut self, expected: &str, element: &'e Element) -> Option<Cow<'e, Code>> {
		match element {
			Element::Code(code) => Some(Cow::Borrowed(code)),
			Element::Empty(empty) => Some(Cow::Owned(Code::new(Vec::new(), empty.location.clone()))),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	pub fn declaration<'e>(&mut self, expected: &str, element: &'e Element) -> Option<&'e Declaration> {
		match element {
			Element::Declaration(declaration) => Some(declaration),
			_ => {
				self.unexpected(expected, element);
				None
			},
		}
	}

	/// Requires an array of identifiers. Elements that aren't identifiers are reported and left out.
	pub fn identifiers(&mut self, expected: &str, element: &Element) -> Option<Vec<Identifier>> {
		let array = self.array(expected, element)?;
		let identifiers = array.elements.iter()
			.filter_map(|x| {
				let x = self.present("identifier", x.as_ref(), &array.location)?;
				self.identifier("identifier", x)
			})
			.collect();
		Some(identifiers)
	}

	/// Requires the object to have exactly the given keys.
	///
	/// A mismatch is reported once for the whole key set.
	pub fn object_with_keys(&mut self, context: &str, object: &Object, keys: &[&str]) -> bool {
		let matches = object.len() == keys.len() && keys.iter().all(|key| object.contains_key(key));
		if !matches {
			let expected = keys.join(", ");
			self.error(ErrorKind::KeyMismatch { expected, context: context.to_owned() }, &object.location);
		}
		matches
	}

	/// Reports each repeated key of the object.
	pub fn duplicate_keys(&mut self, context: &str, object: &Object) {
		for duplicate in object.duplicates() {
			let key = duplicate.key.text().into_owned();
			self.error(ErrorKind::DuplicateKey { key, context: context.to_owned() }, &duplicate.key.location);
		}
	}

	/// Goes one nesting level deeper. Reports and returns `false` if that would exceed [`MAX_NESTING_DEPTH`].
	///
	/// Each successful call must be paired with a call to [`Self::leave`].
	pub fn enter(&mut self, operand: &str, location: &Location) -> bool {
		if self.depth >= MAX_NESTING_DEPTH {
			self.malformed(operand, format!("nested deeper than {MAX_NESTING_DEPTH} levels"), location);
			false
		} else {
			self.depth += 1;
			true
		}
	}

	pub fn leave(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}

	/// Runs `f` one nesting level deeper, see [`Self::enter`].
	pub fn nested<R>(&mut self, operand: &str, location: &Location, f: impl FnOnce(&mut ParserContext) -> R) -> Option<R> {
		if !self.enter(operand, location) {
			return None;
		}
		let result = f(self);
		self.leave();
		Some(result)
	}

	pub fn depth(&self) -> usize {
		self.depth
	}
}
