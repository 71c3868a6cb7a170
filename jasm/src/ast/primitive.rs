use std::borrow::Cow;
use anyhow::Result;
use java_string::JavaStr;
use crate::location::Location;
use crate::number::{self, NumberValue};
use crate::token::{Token, TokenKind};

/// A name, like `java/lang/Object`, `(I)V` or `public`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
	pub token: Token,
}

impl Identifier {
	pub fn new(token: Token) -> Identifier {
		Identifier { token }
	}

	/// Reinterprets a number token as an identifier, as numbers are valid names.
	pub fn from_number(number: &Number) -> Identifier {
		let mut token = number.token.clone();
		token.kind = TokenKind::Identifier;
		Identifier { token }
	}

	pub fn content(&self) -> &JavaStr {
		self.token.content()
	}

	pub fn text(&self) -> Cow<'_, str> {
		self.token.text()
	}

	pub fn is(&self, text: &str) -> bool {
		self.token.is(text)
	}

	pub fn location(&self) -> &Location {
		&self.token.location
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
	pub token: Token,
}

impl Number {
	pub fn new(token: Token) -> Number {
		Number { token }
	}

	pub fn text(&self) -> Cow<'_, str> {
		self.token.text()
	}

	pub fn is_wide(&self) -> bool {
		number::is_wide(&self.text())
	}

	pub fn is_floating_point(&self) -> bool {
		number::is_floating_point(&self.text())
	}

	pub fn radix(&self) -> u32 {
		number::radix(&self.text())
	}

	pub fn value(&self) -> Result<NumberValue> {
		number::value(&self.text())
	}

	pub fn location(&self) -> &Location {
		&self.token.location
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
	pub token: Token,
}

impl StringLiteral {
	pub fn new(token: Token) -> StringLiteral {
		StringLiteral { token }
	}

	pub fn content(&self) -> &JavaStr {
		self.token.content()
	}

	pub fn location(&self) -> &Location {
		&self.token.location
	}
}

/// A `true` or `false`, only ever created when normalizing annotation values.
#[derive(Debug, Clone, PartialEq)]
pub struct Bool {
	pub token: Token,
	pub value: bool,
}

impl Bool {
	pub fn location(&self) -> &Location {
		&self.token.location
	}
}

/// The definition of a jump target inside of code, like `start:`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
	/// The name of the label, without the `:`.
	pub name: Token,
}

impl Label {
	pub fn new(name: Token) -> Label {
		Label { name }
	}

	pub fn text(&self) -> Cow<'_, str> {
		self.name.text()
	}

	pub fn location(&self) -> &Location {
		&self.name.location
	}
}

/// A `{}`, which could be an empty array, an empty object or empty code.
///
/// Whoever consumes it decides what it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Empty {
	pub location: Location,
}

impl Empty {
	pub fn new(location: Location) -> Empty {
		Empty { location }
	}
}
