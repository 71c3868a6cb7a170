//! Diagnostics for problems in the input.
//!
//! Problems with the input are never reported through `Result`: they're collected in an [`ErrorCollector`] and
//! processing continues, so that a single run reports each problem it finds.

use std::fmt::{Display, Formatter};
use crate::ast::ElementKind;
use crate::location::Location;
use crate::modifiers::ModifierTarget;

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
	/// An element was found, but of the wrong kind or shape.
	UnexpectedElement { expected: String, actual: ElementKind },
	/// An element is required, but there's nothing (or a hole).
	MissingElement { expected: String },
	/// A second signature or super name before the declaration consuming the first one.
	DuplicateAttribute { attribute: &'static str },
	/// A key appears more than once in an object.
	DuplicateKey { key: String, context: String },
	/// A label is defined more than once in a method.
	DuplicateLabel { label: String },
	InvalidModifier { modifier: String, target: ModifierTarget },
	UnknownDeclarationKeyword { keyword: String },
	/// A known declaration that isn't allowed where it was found.
	UnexpectedDeclaration { keyword: String, context: &'static str },
	/// The set of keys of an object doesn't match the required one.
	KeyMismatch { expected: String, context: String },
	UnknownInstruction { mnemonic: String },
	/// An instruction argument doesn't have the shape its operand requires.
	MalformedOperand { operand: String, reason: String },
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorKind::UnexpectedElement { expected, actual } => write!(f, "Expected {expected} but got {actual}"),
			ErrorKind::MissingElement { expected } => write!(f, "Expected {expected} but got nothing"),
			ErrorKind::DuplicateAttribute { attribute } => write!(f, "{attribute} already defined"),
			ErrorKind::DuplicateKey { key, context } => write!(f, "Duplicate key {key:?} in {context}"),
			ErrorKind::DuplicateLabel { label } => write!(f, "Label {label:?} already defined"),
			ErrorKind::InvalidModifier { modifier, target } => write!(f, "Invalid modifier for {target}: {modifier}"),
			ErrorKind::UnknownDeclarationKeyword { keyword } => write!(f, "Unknown declaration: {keyword}"),
			ErrorKind::UnexpectedDeclaration { keyword, context } => write!(f, "Declaration {keyword} not allowed in {context}"),
			ErrorKind::KeyMismatch { expected, context } => write!(f, "Expected {context} to have the keys {expected}"),
			ErrorKind::UnknownInstruction { mnemonic } => write!(f, "Unknown instruction: {mnemonic}"),
			ErrorKind::MalformedOperand { operand, reason } => write!(f, "Malformed {operand}: {reason}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
	pub kind: ErrorKind,
	pub location: Location,
}

impl Error {
	pub fn new(kind: ErrorKind, location: Location) -> Error {
		Error { kind, location }
	}

	pub fn message(&self) -> String {
		self.kind.to_string()
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.location, self.kind)
	}
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
	pub message: String,
	pub location: Location,
}

impl Warning {
	pub fn new(message: impl Into<String>, location: Location) -> Warning {
		Warning { message: message.into(), location }
	}
}

impl Display for Warning {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: warning: {}", self.location, self.message)
	}
}

/// An append-only list of errors and warnings, in the order they were discovered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorCollector {
	errors: Vec<Error>,
	warnings: Vec<Warning>,
}

impl ErrorCollector {
	pub fn new() -> ErrorCollector {
		ErrorCollector::default()
	}

	pub fn add_error(&mut self, kind: ErrorKind, location: Location) {
		self.errors.push(Error::new(kind, location));
	}

	pub fn add_warning(&mut self, message: impl Into<String>, location: Location) {
		self.warnings.push(Warning::new(message, location));
	}

	/// Appends all errors and warnings of `other`, keeping their order.
	pub fn extend(&mut self, other: ErrorCollector) {
		self.errors.extend(other.errors);
		self.warnings.extend(other.warnings);
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn has_warnings(&self) -> bool {
		!self.warnings.is_empty()
	}

	pub fn errors(&self) -> &[Error] {
		&self.errors
	}

	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}

	pub fn into_parts(self) -> (Vec<Error>, Vec<Warning>) {
		(self.errors, self.warnings)
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::ast::ElementKind;
	use crate::error::{ErrorCollector, ErrorKind};
	use crate::location::Location;

	#[test]
	fn collects_in_order() {
		let location = Location::new(1, 1, "test".into());

		let mut collector = ErrorCollector::new();
		assert!(!collector.has_errors());
		assert!(!collector.has_warnings());

		collector.add_error(ErrorKind::MissingElement { expected: "name".to_owned() }, location.clone());
		collector.add_warning("first", location.clone());
		collector.add_error(ErrorKind::MissingElement { expected: "name".to_owned() }, location.clone());

		let mut other = ErrorCollector::new();
		other.add_warning("second", location.clone());
		collector.extend(other);

		assert!(collector.has_errors());
		assert!(collector.has_warnings());
		// the same problem may be reported twice
		assert_eq!(collector.errors().len(), 2);

		let (_, warnings) = collector.into_parts();
		let messages: Vec<_> = warnings.iter().map(|warning| warning.message.as_str()).collect();
		assert_eq!(messages, vec!["first", "second"]);
	}

	#[test]
	fn messages() {
		let kind = ErrorKind::UnexpectedElement { expected: "identifier".to_owned(), actual: ElementKind::Number };
		assert_eq!(kind.to_string(), "Expected identifier but got number");

		let kind = ErrorKind::MissingElement { expected: "descriptor".to_owned() };
		assert_eq!(kind.to_string(), "Expected descriptor but got nothing");

		let kind = ErrorKind::DuplicateAttribute { attribute: "Signature" };
		assert_eq!(kind.to_string(), "Signature already defined");

		let mut collector = ErrorCollector::new();
		collector.add_error(ErrorKind::UnknownInstruction { mnemonic: "foo".to_owned() }, Location::new(2, 5, "A.jasm".into()));
		assert_eq!(collector.errors()[0].to_string(), "A.jasm:2:5: Unknown instruction: foo");
	}
}
