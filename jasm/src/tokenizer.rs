//! The scanner, turning source text into [`Token`]s.
//!
//! Scanning is a single forward pass over the code points of the input. Outside of strings and comments:
//! - `{`, `}`, `:` and `,` are always tokens of their own,
//! - whitespace separates tokens and is discarded,
//! - `//` starts a comment going until the end of the line,
//! - `"` starts a string,
//! - everything else is collected into one token, which is then classified as a number or an identifier.
//!
//! Inside of strings the escapes `\n`, `\r`, `\t`, `\b`, `\f`, `\"`, `\'`, `\\` and `\uXXXX` are processed.
//! For any other character after a `\`, both are kept as they are.

use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::Arc;
use java_string::{JavaCodePoint, JavaStr, JavaString};
use log::{debug, trace};
use crate::location::Location;
use crate::number::is_number;
use crate::token::{Token, TokenKind};

/// Checks if a character is one of the four operator characters `{`, `}`, `:` and `,`.
pub fn is_operator(c: char) -> bool {
	matches!(c, '{' | '}' | ':' | ',')
}

/// Splits the `text` of the source named `source_name` into tokens.
///
/// This never fails: an unterminated string at the end is still emitted as a string token.
pub fn tokenize(source_name: &str, text: &str) -> Vec<Token> {
	let mut tokenizer = Tokenizer::new(source_name, text);
	tokenizer.run();

	debug!("tokenized {source_name:?} into {} tokens", tokenizer.tokens.len());
	tokenizer.tokens
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
	Normal,
	String,
	Comment,
}

#[derive(Debug)]
struct Start {
	offset: usize,
	location: Location,
}

struct Tokenizer<'a> {
	source: Arc<str>,
	text: &'a str,
	chars: Peekable<CharIndices<'a>>,
	mode: Mode,

	line: usize,
	column: usize,

	buffer: JavaString,
	/// Where the token currently in `buffer` started, `None` if there's no such token.
	start: Option<Start>,
	/// The byte offset just after the last source character of the token in `buffer`.
	end: usize,

	tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
	fn new(source_name: &str, text: &'a str) -> Tokenizer<'a> {
		Tokenizer {
			source: Arc::from(source_name),
			text,
			chars: text.char_indices().peekable(),
			mode: Mode::Normal,
			line: 1,
			column: 1,
			buffer: JavaString::new(),
			start: None,
			end: 0,
			tokens: Vec::new(),
		}
	}

	fn location(&self) -> Location {
		Location::new(self.line, self.column, self.source.clone())
	}

	/// Moves line and column past `c`.
	fn advance(&mut self, c: char) {
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
	}

	/// Appends a source character to the current token. Must be called before [`Self::advance`] for `c`.
	fn push(&mut self, offset: usize, c: char) {
		if self.start.is_none() {
			self.start = Some(Start { offset, location: self.location() });
		}
		self.buffer.push(c);
		self.end = offset + c.len_utf8();
	}

	fn flush(&mut self) {
		let Some(start) = self.start.take() else {
			return;
		};
		let content = std::mem::replace(&mut self.buffer, JavaString::new());

		let kind = if self.mode == Mode::String {
			TokenKind::String
		} else {
			classify(&content)
		};

		trace!("token {kind:?} {content:?} at {}", start.location);
		self.tokens.push(Token::new(start.offset..self.end, start.location, kind, content));
	}

	fn run(&mut self) {
		while let Some((offset, c)) = self.chars.next() {
			match self.mode {
				Mode::Comment => {
					if c == '\n' {
						self.mode = Mode::Normal;
					}
					self.advance(c);
				},
				Mode::String => self.string(offset, c),
				Mode::Normal => self.normal(offset, c),
			}
		}

		self.flush();
	}

	fn normal(&mut self, offset: usize, c: char) {
		if c == '/' && self.chars.peek().is_some_and(|&(_, next)| next == '/') {
			self.flush();
			self.chars.next();
			self.advance(c);
			self.advance('/');
			self.mode = Mode::Comment;
		} else if c == '"' {
			self.flush();
			self.start = Some(Start { offset: offset + 1, location: self.location() });
			self.end = offset + 1;
			self.advance(c);
			self.mode = Mode::String;
		} else if is_operator(c) {
			self.flush();
			self.push(offset, c);
			self.advance(c);
			self.flush();
		} else if c.is_whitespace() {
			self.flush();
			self.advance(c);
		} else {
			self.push(offset, c);
			self.advance(c);
		}
	}

	fn string(&mut self, offset: usize, c: char) {
		match c {
			'"' => {
				self.flush();
				self.mode = Mode::Normal;
				self.advance(c);
			},
			'\\' => {
				self.advance(c);
				self.escape(offset);
			},
			_ => {
				self.push(offset, c);
				self.advance(c);
			},
		}
	}

	/// Processes the character(s) after the `\` at `backslash_offset`.
	fn escape(&mut self, backslash_offset: usize) {
		let Some((offset, escaped)) = self.chars.next() else {
			self.push(backslash_offset, '\\');
			return;
		};
		self.advance(escaped);

		let replacement = match escaped {
			'n' => '\n',
			'r' => '\r',
			't' => '\t',
			'b' => '\u{8}',
			'f' => '\u{c}',
			'"' => '"',
			'\'' => '\'',
			'\\' => '\\',
			'u' => {
				self.unicode_escape(offset);
				return;
			},
			other => {
				self.push(backslash_offset, '\\');
				self.push(offset, other);
				return;
			},
		};

		self.buffer.push(replacement);
		self.end = offset + escaped.len_utf8();
	}

	/// Processes the four hex digits after the `u` at `u_offset`.
	///
	/// If there aren't four hex digits, the `\u` is kept as it is.
	fn unicode_escape(&mut self, u_offset: usize) {
		let digits_start = u_offset + 1;
		let code_point = self.text.get(digits_start..digits_start + 4)
			.filter(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
			.and_then(|digits| u32::from_str_radix(digits, 16).ok())
			.and_then(JavaCodePoint::from_u32);

		match code_point {
			Some(code_point) => {
				for _ in 0..4 {
					if let Some((_, digit)) = self.chars.next() {
						self.advance(digit);
					}
				}
				self.buffer.push_java(code_point);
				self.end = digits_start + 4;
			},
			None => {
				self.buffer.push('\\');
				self.buffer.push('u');
				self.end = digits_start;
			},
		}
	}
}

fn classify(content: &JavaStr) -> TokenKind {
	match content.as_str() {
		Ok(text) if text.len() == 1 && text.chars().all(is_operator) => TokenKind::Operator,
		Ok(text) if is_number(text) => TokenKind::Number,
		_ => TokenKind::Identifier,
	}
}

#[cfg(test)]
mod testing {
	use java_string::{JavaCodePoint, JavaString};
	use pretty_assertions::assert_eq;
	use crate::token::TokenKind;
	use crate::tokenizer::tokenize;

	fn kinds_and_texts(text: &str) -> Vec<(TokenKind, String)> {
		tokenize("test", text).into_iter()
			.map(|token| (token.kind, token.text().into_owned()))
			.collect()
	}

	#[test]
	fn operators_split_tokens() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts("a: 1, b: {2}"), vec![
			(Identifier, "a".to_owned()),
			(Operator, ":".to_owned()),
			(Number, "1".to_owned()),
			(Operator, ",".to_owned()),
			(Identifier, "b".to_owned()),
			(Operator, ":".to_owned()),
			(Operator, "{".to_owned()),
			(Number, "2".to_owned()),
			(Operator, "}".to_owned()),
		]);
	}

	#[test]
	fn operators_without_whitespace() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts("{a,b}"), vec![
			(Operator, "{".to_owned()),
			(Identifier, "a".to_owned()),
			(Operator, ",".to_owned()),
			(Identifier, "b".to_owned()),
			(Operator, "}".to_owned()),
		]);
	}

	#[test]
	fn strings_are_always_strings() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts(r#"ldc "12" "a: {b}, c" "// no comment""#), vec![
			(Identifier, "ldc".to_owned()),
			(String, "12".to_owned()),
			(String, "a: {b}, c".to_owned()),
			(String, "// no comment".to_owned()),
		]);
	}

	#[test]
	fn escapes() {
		let tokens = tokenize("test", r#""\n\t\u0041""#);
		assert_eq!(tokens.len(), 1);
		assert_eq!(tokens[0].kind, TokenKind::String);
		assert_eq!(tokens[0].text(), "\n\tA");
		// the range covers the source text between the quotes
		assert_eq!(tokens[0].range, 1..11);
	}

	#[test]
	fn unknown_escapes_keep_the_backslash() {
		assert_eq!(tokenize("test", r#""a\qb""#)[0].text(), "a\\qb");
		assert_eq!(tokenize("test", r#""a\\b""#)[0].text(), "a\\b");
		assert_eq!(tokenize("test", r#""\u00g1""#)[0].text(), "\\u00g1");
		assert_eq!(tokenize("test", r#""\u00""#)[0].text(), "\\u00");
	}

	#[test]
	fn surrogate_escape() {
		let tokens = tokenize("test", r#""\ud800""#);

		let mut expected = JavaString::new();
		expected.push_java(JavaCodePoint::from_u32(0xd800).unwrap());
		assert_eq!(tokens[0].content, expected);
	}

	#[test]
	fn empty_and_unterminated_strings() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts(r#"a "" b "open"#), vec![
			(Identifier, "a".to_owned()),
			(String, "".to_owned()),
			(Identifier, "b".to_owned()),
			(String, "open".to_owned()),
		]);
	}

	#[test]
	fn comments() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts("a// comment: {\nb // another\n// whole line\nc"), vec![
			(Identifier, "a".to_owned()),
			(Identifier, "b".to_owned()),
			(Identifier, "c".to_owned()),
		]);
	}

	#[test]
	fn single_slash_is_not_a_comment() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts("java/lang/Object"), vec![
			(Identifier, "java/lang/Object".to_owned()),
		]);
	}

	#[test]
	fn locations() {
		let tokens = tokenize("Example.jasm", ".class public A {\n\tmethod \"s\"\n}");
		let positions: Vec<_> = tokens.iter()
			.map(|token| (token.text().into_owned(), token.location.line, token.location.column))
			.collect();
		assert_eq!(positions, vec![
			(".class".to_owned(), 1, 1),
			("public".to_owned(), 1, 8),
			("A".to_owned(), 1, 15),
			("{".to_owned(), 1, 17),
			("method".to_owned(), 2, 2),
			("s".to_owned(), 2, 9),
			("}".to_owned(), 3, 1),
		]);
		assert_eq!(&*tokens[0].location.source, "Example.jasm");
	}

	#[test]
	fn byte_ranges() {
		let text = "ä bc";
		let tokens = tokenize("test", text);
		assert_eq!(&text[tokens[0].range.clone()], "ä");
		assert_eq!(&text[tokens[1].range.clone()], "bc");
	}

	#[test]
	fn numbers_and_identifiers() {
		use TokenKind::*;
		assert_eq!(kinds_and_texts("10 -3 1.5f 0xCAFE 10L NaN -Infinity iconst_0 L10 1.2.3"), vec![
			(Number, "10".to_owned()),
			(Number, "-3".to_owned()),
			(Number, "1.5f".to_owned()),
			(Number, "0xCAFE".to_owned()),
			(Number, "10L".to_owned()),
			(Number, "NaN".to_owned()),
			(Number, "-Infinity".to_owned()),
			(Identifier, "iconst_0".to_owned()),
			(Identifier, "L10".to_owned()),
			(Identifier, "1.2.3".to_owned()),
		]);
	}
}
