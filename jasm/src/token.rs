use std::borrow::Cow;
use std::ops::Range;
use java_string::{JavaStr, JavaString};
use crate::location::Location;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// The content of a `"..."` literal, with escapes already processed.
	String,
	Number,
	Identifier,
	/// One of `{`, `}`, `:` and `,`.
	Operator,
}

/// A located piece of source text, as produced by [`tokenize`][crate::tokenizer::tokenize].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	/// The byte range in the source text.
	///
	/// For string tokens this is the range between the quotes, so it can differ in length from `content`
	/// if escapes were used.
	pub range: Range<usize>,
	/// The location of the first character of the token. For string tokens that's the opening quote.
	pub location: Location,
	pub kind: TokenKind,
	/// Uses [`JavaString`] since a `\uXXXX` escape may name a lone surrogate.
	pub content: JavaString,
}

impl Token {
	pub fn new(range: Range<usize>, location: Location, kind: TokenKind, content: JavaString) -> Token {
		Token { range, location, kind, content }
	}

	pub fn content(&self) -> &JavaStr {
		self.content.as_java_str()
	}

	/// Returns the content, replacing lone surrogates with the replacement character.
	pub fn text(&self) -> Cow<'_, str> {
		self.content.as_str_lossy()
	}

	pub fn is(&self, text: &str) -> bool {
		self.content.as_java_str() == JavaStr::from_str(text)
	}

	pub fn is_operator(&self, operator: char) -> bool {
		self.kind == TokenKind::Operator && self.content.starts_with(operator)
	}
}
