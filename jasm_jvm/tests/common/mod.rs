//! Raw trees for the JVM format tests.
#![allow(dead_code)]

use jasm::ast::Element;
use jasm::ast::composite::{Array, Code, Declaration, Instruction, Object};
use jasm::ast::primitive::{Empty, Identifier, Label, Number, StringLiteral};
use jasm::location::Location;
use jasm::token::{Token, TokenKind};
use jasm::tokenizer::tokenize;

pub fn location() -> Location {
	Location::new(1, 1, "test".into())
}

pub fn token(text: &str) -> Token {
	let mut tokens = tokenize("test", text);
	assert_eq!(tokens.len(), 1, "{text:?} should be a single token");
	tokens.remove(0)
}

pub fn literal(text: &str) -> Element {
	let token = token(text);
	match token.kind {
		TokenKind::String => Element::String(StringLiteral::new(token)),
		TokenKind::Number => Element::Number(Number::new(token)),
		TokenKind::Identifier | TokenKind::Operator => Element::Identifier(Identifier::new(token)),
	}
}

/// An array of literals.
pub fn literals(texts: &[&str]) -> Element {
	array(texts.iter().map(|text| literal(text)).collect())
}

pub fn decl(keyword: &str, elements: Vec<Element>) -> Element {
	Element::Declaration(Declaration::new(Some(token(keyword)), elements.into_iter().map(Some).collect(), location()))
}

pub fn body(elements: Vec<Element>) -> Element {
	Element::Declaration(Declaration::new(None, elements.into_iter().map(Some).collect(), location()))
}

pub fn array(elements: Vec<Element>) -> Element {
	holey_array(elements.into_iter().map(Some).collect())
}

pub fn holey_array(elements: Vec<Option<Element>>) -> Element {
	Element::Array(Array::new(elements, location()))
}

pub fn object(pairs: Vec<(&str, Element)>) -> Element {
	Element::Object(Object::new(location(), pairs.into_iter().map(|(key, value)| (token(key), Some(value)))))
}

pub fn empty() -> Element {
	Element::Empty(Empty::new(location()))
}

pub fn code(elements: Vec<Element>) -> Element {
	Element::Code(Code::new(elements.into_iter().map(Some).collect(), location()))
}

pub fn insn(mnemonic: &str, arguments: Vec<Element>) -> Element {
	Element::Instruction(Instruction::new(Identifier::new(token(mnemonic)), arguments.into_iter().map(Some).collect()))
}

pub fn label(name: &str) -> Element {
	Element::Label(Label::new(token(name)))
}
