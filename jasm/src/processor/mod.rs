//! Resolving raw declaration trees into [`Class`], [`Field`] and [`Method`] nodes.
//!
//! Declarations are processed in order. The attribute declarations (`.signature`, `.super`, `.interface` and
//! annotations) are collected and given to the next class, field or method of the same sequence.
//!
//! Positional rules:
//! - `.class <modifiers..> <name> <body>`, where the body is a declaration without keyword, holding the members,
//! - `.field <modifiers..> <name> <descriptor> [<value>]`, where the value is a number or string, or an object
//!   `{ value: <number or string> }`,
//! - `.method <modifiers..> <name> <descriptor> <body>`, where the body is an object with the optional keys
//!   `parameters` (an array of identifiers) and `code`,
//! - `.annotation <type> <values>`, where values is an object,
//! - `.enum <type> <name>`, only as annotation value,
//! - `.signature <signature>`, `.super <name>` and `.interface <name>`.

use std::collections::HashSet;
use indexmap::IndexMap;
use log::{debug, trace};
use crate::ast::{Element, ElementKind};
use crate::ast::composite::{Array, Code, Declaration, Object};
use crate::ast::primitive::{Bool, Identifier};
use crate::ast::specific::{Annotation, AnnotationValue, Class, Enum, Field, Method};
use crate::context::ParserContext;
use crate::error::{Error, ErrorKind, Warning};
use crate::location::Location;
use crate::modifiers::{Modifier, ModifierTarget, Modifiers};
use crate::operand::{BytecodeFormat, InstructionSet, Operand};
use crate::token::TokenKind;

mod attributes;

use attributes::Attributes;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
	Class,
	Field,
	Method,
	Annotation,
	Enum,
	Signature,
	Super,
	Interface,
}

impl DeclarationKind {
	/// What may appear in the top level sequence.
	pub const TOP_LEVEL: &'static [DeclarationKind] = &[
		DeclarationKind::Class,
		DeclarationKind::Field,
		DeclarationKind::Method,
		DeclarationKind::Annotation,
		DeclarationKind::Signature,
		DeclarationKind::Super,
		DeclarationKind::Interface,
	];

	/// What may appear in the body of a class.
	pub const CLASS_BODY: &'static [DeclarationKind] = &[
		DeclarationKind::Field,
		DeclarationKind::Method,
		DeclarationKind::Annotation,
		DeclarationKind::Signature,
	];

	/// Takes a keyword without the leading `.`.
	pub fn from_keyword(keyword: &str) -> Option<DeclarationKind> {
		match keyword {
			"class" => Some(DeclarationKind::Class),
			"field" => Some(DeclarationKind::Field),
			"method" => Some(DeclarationKind::Method),
			"annotation" => Some(DeclarationKind::Annotation),
			"enum" => Some(DeclarationKind::Enum),
			"signature" => Some(DeclarationKind::Signature),
			"super" => Some(DeclarationKind::Super),
			"interface" => Some(DeclarationKind::Interface),
			_ => None,
		}
	}

	pub fn keyword(self) -> &'static str {
		match self {
			DeclarationKind::Class => "class",
			DeclarationKind::Field => "field",
			DeclarationKind::Method => "method",
			DeclarationKind::Annotation => "annotation",
			DeclarationKind::Enum => "enum",
			DeclarationKind::Signature => "signature",
			DeclarationKind::Super => "super",
			DeclarationKind::Interface => "interface",
		}
	}
}

/// The result of [`AstProcessor::process`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
	/// The resolved classes, fields and methods of the top level, in source order.
	pub elements: Vec<Element>,
	pub errors: Vec<Error>,
	pub warnings: Vec<Warning>,
}

impl ProcessResult {
	/// Checks if there are no errors. Warnings don't count.
	pub fn is_ok(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn classes(&self) -> impl Iterator<Item=&Class> {
		self.elements.iter().filter_map(Element::as_class)
	}
}

/// Validates and resolves raw declarations, checking instructions against a [`BytecodeFormat`].
///
/// A processor holds no state between runs, so one can be used for any number of inputs.
#[derive(Debug)]
pub struct AstProcessor<'f, F> {
	format: &'f F,
}

impl<'f, F: BytecodeFormat> AstProcessor<'f, F> {
	pub fn new(format: &'f F) -> AstProcessor<'f, F> {
		AstProcessor { format }
	}

	/// Processes the top level declarations.
	///
	/// This never fails: problems are reported in the result, and processing goes on after each.
	pub fn process(&self, declarations: &[Element]) -> ProcessResult {
		let mut pass = Pass {
			ctx: ParserContext::new(),
			instructions: self.format.instructions(),
		};

		let mut attributes = Attributes::default();
		let mut elements = Vec::new();
		for element in declarations {
			let Some(declaration) = pass.ctx.declaration("declaration", element) else {
				continue;
			};
			if let Some(element) = pass.sequence_item(declaration, DeclarationKind::TOP_LEVEL, "top level", &mut attributes) {
				elements.push(element);
			}
		}
		attributes.warn_unused(&mut pass.ctx);

		let (errors, warnings) = pass.ctx.into_errors().into_parts();
		debug!("processed {} declarations for {}: {} resolved, {} errors, {} warnings",
			declarations.len(), self.format.name(), elements.len(), errors.len(), warnings.len());

		ProcessResult { elements, errors, warnings }
	}
}

/// The state of one run of an [`AstProcessor`].
struct Pass<'i, O> {
	ctx: ParserContext,
	instructions: &'i InstructionSet<O>,
}

impl<O: Operand> Pass<'_, O> {
	/// Processes one declaration of a sequence. Attributes go into `attributes`, anything else is returned.
	fn sequence_item(
		&mut self,
		declaration: &Declaration,
		allowed: &[DeclarationKind],
		context: &'static str,
		attributes: &mut Attributes,
	) -> Option<Element> {
		let kind = self.declaration_kind(declaration)?;
		if !allowed.contains(&kind) {
			let keyword = kind.keyword().to_owned();
			self.ctx.error(ErrorKind::UnexpectedDeclaration { keyword, context }, &declaration.location);
			return None;
		}

		trace!("processing .{} at {}", kind.keyword(), declaration.location);
		match kind {
			DeclarationKind::Class => self.class(declaration, attributes).map(|class| Element::Class(Box::new(class))),
			DeclarationKind::Field => self.field(declaration, attributes).map(|field| Element::Field(Box::new(field))),
			DeclarationKind::Method => self.method(declaration, attributes).map(Element::Method),
			DeclarationKind::Enum => self.enum_constant(declaration).map(Element::Enum),
			DeclarationKind::Annotation => {
				if let Some(annotation) = self.annotation(declaration) {
					attributes.add_annotation(annotation);
				}
				None
			},
			DeclarationKind::Signature => {
				if let Some(signature) = self.single_identifier(declaration, "signature") {
					attributes.set_signature(&mut self.ctx, signature);
				}
				None
			},
			DeclarationKind::Super => {
				if let Some(super_name) = self.single_identifier(declaration, "super name") {
					attributes.set_super_name(&mut self.ctx, super_name);
				}
				None
			},
			DeclarationKind::Interface => {
				if let Some(interface) = self.single_identifier(declaration, "interface name") {
					attributes.add_interface(interface);
				}
				None
			},
		}
	}

	fn declaration_kind(&mut self, declaration: &Declaration) -> Option<DeclarationKind> {
		let Some(keyword) = &declaration.keyword else {
			self.ctx.missing("declaration keyword", &declaration.location);
			return None;
		};
		let name = declaration.keyword_name().unwrap_or_default();
		let kind = DeclarationKind::from_keyword(&name);
		if kind.is_none() {
			let keyword = keyword.text().into_owned();
			self.ctx.error(ErrorKind::UnknownDeclarationKeyword { keyword }, &declaration.location);
		}
		kind
	}

	/// Returns the element at `index`, reporting if it's missing.
	fn argument<'d>(&mut self, declaration: &'d Declaration, index: usize, expected: &str) -> Option<&'d Element> {
		let element = declaration.elements.get(index).and_then(Option::as_ref);
		self.ctx.present(expected, element, &declaration.location)
	}

	/// Reports each element from `count` on.
	fn no_more(&mut self, declaration: &Declaration, count: usize) {
		let expected = format!("end of {}", declaration.keyword_name().unwrap_or_default());
		for element in declaration.elements.iter().skip(count).flatten() {
			self.ctx.unexpected(&expected, element);
		}
	}

	fn single_identifier(&mut self, declaration: &Declaration, expected: &str) -> Option<Identifier> {
		let identifier = self.argument(declaration, 0, expected)
			.and_then(|element| self.ctx.identifier(expected, element));
		self.no_more(declaration, 1);
		identifier
	}

	fn modifiers(&mut self, elements: &[Option<Element>], target: ModifierTarget, location: &Location) -> Modifiers {
		let expected = format!("{target} modifier");
		let mut modifiers = Modifiers::new();
		for element in elements {
			let Some(element) = self.ctx.present(&expected, element.as_ref(), location) else {
				continue;
			};
			let Some(identifier) = self.ctx.identifier(&expected, element) else {
				continue;
			};

			let text = identifier.text();
			match Modifier::from_keyword(&text).filter(|modifier| modifier.is_allowed_on(target)) {
				Some(modifier) => {
					if !modifiers.add(modifier, identifier.location().clone()) {
						self.ctx.warn(format!("Repeated modifier: {text}"), identifier.location());
					}
				},
				None => {
					let modifier = text.into_owned();
					self.ctx.error(ErrorKind::InvalidModifier { modifier, target }, identifier.location());
				},
			}
		}
		modifiers
	}

	fn class(&mut self, declaration: &Declaration, attributes: &mut Attributes) -> Option<Class> {
		let pending = attributes.take();
		let elements = &declaration.elements;
		let location = &declaration.location;

		let Some(body_index) = elements.len().checked_sub(1) else {
			self.ctx.missing("class name and body", location);
			return None;
		};
		let body = self.ctx.present("class body", elements[body_index].as_ref(), location)?;
		let body = match self.ctx.declaration("class body", body)? {
			body if body.keyword.is_none() => body,
			body => {
				self.ctx.error(ErrorKind::UnexpectedElement {
					expected: "class body".to_owned(),
					actual: ElementKind::Declaration,
				}, &body.location);
				return None;
			},
		};
		if body_index == 0 {
			self.ctx.missing("class name", location);
			return None;
		}

		let name = self.ctx.present("class name", elements[body_index - 1].as_ref(), location)
			.and_then(|element| self.ctx.name("class name", element));
		let modifiers = self.modifiers(&elements[..body_index - 1], ModifierTarget::Class, location);

		let mut members = Attributes::default();
		let mut fields = Vec::new();
		let mut methods = Vec::new();
		let mut previous = &body.location;
		for element in &body.elements {
			let expected = "class member or member attribute";
			let Some(element) = self.ctx.present(expected, element.as_ref(), previous) else {
				continue;
			};
			previous = element.location();
			let Some(member) = self.ctx.declaration(expected, element) else {
				continue;
			};
			match self.sequence_item(member, DeclarationKind::CLASS_BODY, "class body", &mut members) {
				Some(Element::Field(field)) => fields.push(*field),
				Some(Element::Method(method)) => methods.push(method),
				_ => {},
			}
		}
		members.warn_unused(&mut self.ctx);

		Some(Class {
			modifiers,
			name: name?,
			signature: pending.signature,
			super_name: pending.super_name,
			interfaces: pending.interfaces,
			annotations: pending.annotations,
			fields,
			methods,
			location: location.clone(),
		})
	}

	fn field(&mut self, declaration: &Declaration, attributes: &mut Attributes) -> Option<Field> {
		let pending = attributes.take();
		pending.warn_class_only(&mut self.ctx, "field");
		let elements = &declaration.elements;
		let location = &declaration.location;

		let (value, end) = match elements.last() {
			Some(Some(Element::Object(object))) => (Some(self.field_value(object)?), elements.len() - 1),
			Some(Some(value @ (Element::Number(_) | Element::String(_)))) => (Some(value.clone()), elements.len() - 1),
			_ => (None, elements.len()),
		};
		if end < 2 {
			self.ctx.missing("field name and descriptor", location);
			return None;
		}

		let descriptor = self.ctx.present("field descriptor", elements[end - 1].as_ref(), location)
			.and_then(|element| self.ctx.identifier("field descriptor", element));
		let name = self.ctx.present("field name", elements[end - 2].as_ref(), location)
			.and_then(|element| self.ctx.name("field name", element));
		let modifiers = self.modifiers(&elements[..end - 2], ModifierTarget::Field, location);

		Some(Field {
			modifiers,
			name: name?,
			descriptor: descriptor?,
			value,
			signature: pending.signature,
			annotations: pending.annotations,
			location: location.clone(),
		})
	}

	/// Validates a `{ value: .. }`, returning the value.
	fn field_value(&mut self, object: &Object) -> Option<Element> {
		self.ctx.duplicate_keys("field value", object);
		if !self.ctx.object_with_keys("field value", object, &["value"]) {
			return None;
		}
		let entry = object.get("value")?;
		match self.ctx.present("field value", entry.value.as_ref(), &entry.key.location)? {
			value @ (Element::Number(_) | Element::String(_)) => Some(value.clone()),
			value => {
				self.ctx.unexpected("field value", value);
				None
			},
		}
	}

	fn method(&mut self, declaration: &Declaration, attributes: &mut Attributes) -> Option<Method> {
		let pending = attributes.take();
		pending.warn_class_only(&mut self.ctx, "method");
		let elements = &declaration.elements;
		let location = &declaration.location;

		if elements.len() < 3 {
			self.ctx.missing("method name, descriptor and body", location);
			return None;
		}
		let last = elements.len() - 1;

		let body = self.ctx.present("method body", elements[last].as_ref(), location)?;
		let body = self.ctx.object("method body", body)?;
		let (parameters, code) = self.method_body(&body);

		let descriptor = self.ctx.present("method descriptor", elements[last - 1].as_ref(), location)
			.and_then(|element| self.ctx.identifier("method descriptor", element));
		let name = self.ctx.present("method name", elements[last - 2].as_ref(), location)
			.and_then(|element| self.ctx.name("method name", element));
		let modifiers = self.modifiers(&elements[..last - 2], ModifierTarget::Method, location);

		Some(Method {
			modifiers,
			name: name?,
			descriptor: descriptor?,
			signature: pending.signature,
			annotations: pending.annotations,
			parameters,
			code,
			location: location.clone(),
		})
	}

	fn method_body(&mut self, body: &Object) -> (Vec<Identifier>, Option<Code>) {
		self.ctx.duplicate_keys("method body", body);
		for entry in body.entries() {
			if !entry.key.is("parameters") && !entry.key.is("code") {
				self.ctx.warn(format!("Unknown method body key: {}", entry.key.text()), &entry.key.location);
			}
		}

		let parameters = body.get("parameters")
			.and_then(|entry| self.ctx.present("method parameters", entry.value.as_ref(), &entry.key.location))
			.and_then(|element| self.ctx.identifiers("method parameters", element))
			.unwrap_or_default();

		let code = body.get("code")
			.and_then(|entry| self.ctx.present("method code", entry.value.as_ref(), &entry.key.location))
			.and_then(|element| self.ctx.code("method code", element))
			.map(|code| code.into_owned());
		if let Some(code) = &code {
			self.verify_code(code);
		}

		(parameters, code)
	}

	/// Checks each instruction against the instruction set, and that no label is defined twice.
	fn verify_code(&mut self, code: &Code) {
		let mut labels = HashSet::new();
		let mut previous = &code.location;
		for element in &code.elements {
			let Some(element) = self.ctx.present("instruction or label", element.as_ref(), previous) else {
				continue;
			};
			previous = element.location();
			match element {
				Element::Instruction(instruction) => self.instructions.verify(&mut self.ctx, instruction),
				Element::Label(label) => {
					let name = label.text().into_owned();
					if !labels.insert(name.clone()) {
						self.ctx.error(ErrorKind::DuplicateLabel { label: name }, label.location());
					}
				},
				element => self.ctx.unexpected("instruction or label", element),
			}
		}
	}

	fn annotation(&mut self, declaration: &Declaration) -> Option<Annotation> {
		let annotation_type = self.argument(declaration, 0, "annotation type")
			.and_then(|element| self.ctx.identifier("annotation type", element));
		let values = self.argument(declaration, 1, "annotation values")
			.and_then(|element| self.ctx.object("annotation values", element));
		self.no_more(declaration, 2);
		let values = values?;

		self.ctx.duplicate_keys("annotation values", &values);
		let mut resolved = IndexMap::new();
		for entry in values.entries() {
			if entry.key.kind != TokenKind::Identifier {
				self.ctx.error(ErrorKind::UnexpectedElement {
					expected: "annotation value key".to_owned(),
					actual: ElementKind::of_token(entry.key.kind),
				}, &entry.key.location);
				continue;
			}
			let Some(value) = self.ctx.present("annotation value", entry.value.as_ref(), &entry.key.location) else {
				continue;
			};
			if let Some(value) = self.element_value(value) {
				let name = entry.key.text().into_owned();
				resolved.insert(name, AnnotationValue { name: entry.key.clone(), value });
			}
		}

		Some(Annotation {
			annotation_type: annotation_type?,
			values: resolved,
			location: declaration.location.clone(),
		})
	}

	fn enum_constant(&mut self, declaration: &Declaration) -> Option<Enum> {
		let enum_type = self.argument(declaration, 0, "enum type")
			.and_then(|element| self.ctx.identifier("enum type", element));
		let name = self.argument(declaration, 1, "enum name")
			.and_then(|element| self.ctx.identifier("enum name", element));
		self.no_more(declaration, 2);

		Some(Enum {
			enum_type: enum_type?,
			name: name?,
			location: declaration.location.clone(),
		})
	}

	/// Normalizes an annotation value.
	fn element_value(&mut self, value: &Element) -> Option<Element> {
		if !self.ctx.enter("annotation value", value.location()) {
			return None;
		}
		let result = self.element_value_unbounded(value);
		self.ctx.leave();
		result
	}

	fn element_value_unbounded(&mut self, value: &Element) -> Option<Element> {
		match value {
			Element::Number(_) | Element::String(_) => Some(value.clone()),
			Element::Identifier(identifier) if identifier.is("true") || identifier.is("false") => {
				Some(Element::Bool(Bool { token: identifier.token.clone(), value: identifier.is("true") }))
			},
			Element::Identifier(identifier) if identifier.content().starts_with('L') => Some(value.clone()),
			Element::Identifier(_) => {
				self.ctx.unexpected("class type or boolean", value);
				None
			},
			Element::Empty(empty) => Some(Element::Array(Array::empty(empty.location.clone()))),
			Element::Declaration(declaration) if declaration.keyword.is_some() => {
				match self.declaration_kind(declaration)? {
					DeclarationKind::Annotation => self.annotation(declaration).map(Element::Annotation),
					DeclarationKind::Enum => self.enum_constant(declaration).map(Element::Enum),
					kind => {
						let keyword = kind.keyword().to_owned();
						self.ctx.error(ErrorKind::UnexpectedDeclaration { keyword, context: "annotation value" }, &declaration.location);
						None
					},
				}
			},
			Element::Declaration(declaration) => {
				let [element] = declaration.elements.as_slice() else {
					self.ctx.unexpected("annotation value", value);
					return None;
				};
				let element = self.ctx.present("annotation value", element.as_ref(), &declaration.location)?;
				let element = self.element_value(element)?;
				Some(Element::Array(Array::new(vec![Some(element)], declaration.location.clone())))
			},
			Element::Array(array) => {
				let elements = array.elements.iter()
					.filter_map(|element| {
						let element = self.ctx.present("annotation value", element.as_ref(), &array.location)?;
						self.element_value(element)
					})
					.map(Some)
					.collect();
				Some(Element::Array(Array::new(elements, array.location.clone())))
			},
			_ => {
				self.ctx.unexpected("annotation value", value);
				None
			},
		}
	}
}
