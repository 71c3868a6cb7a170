use crate::ast::primitive::Identifier;
use crate::ast::specific::Annotation;
use crate::context::ParserContext;
use crate::error::ErrorKind;

/// The attributes declared before the declaration they belong to.
///
/// Each declaration sequence has its own. The next class, field or method of the sequence takes all of them.
#[derive(Debug, Default)]
pub(crate) struct Attributes {
	pub(crate) signature: Option<Identifier>,
	pub(crate) super_name: Option<Identifier>,
	pub(crate) interfaces: Vec<Identifier>,
	pub(crate) annotations: Vec<Annotation>,
}

impl Attributes {
	/// Sets the signature. If there's already one, that one is kept and the new one is reported.
	pub(crate) fn set_signature(&mut self, ctx: &mut ParserContext, signature: Identifier) {
		if self.signature.is_some() {
			ctx.error(ErrorKind::DuplicateAttribute { attribute: "Signature" }, signature.location());
		} else {
			self.signature = Some(signature);
		}
	}

	/// Sets the super name. If there's already one, that one is kept and the new one is reported.
	pub(crate) fn set_super_name(&mut self, ctx: &mut ParserContext, super_name: Identifier) {
		if self.super_name.is_some() {
			ctx.error(ErrorKind::DuplicateAttribute { attribute: "Super name" }, super_name.location());
		} else {
			self.super_name = Some(super_name);
		}
	}

	pub(crate) fn add_interface(&mut self, interface: Identifier) {
		self.interfaces.push(interface);
	}

	pub(crate) fn add_annotation(&mut self, annotation: Annotation) {
		self.annotations.push(annotation);
	}

	/// Takes all attributes, leaving none behind.
	pub(crate) fn take(&mut self) -> Attributes {
		std::mem::take(self)
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.signature.is_none() && self.super_name.is_none() && self.interfaces.is_empty() && self.annotations.is_empty()
	}

	/// Warns about the super name and interfaces, for a `target` that isn't a class.
	pub(crate) fn warn_class_only(&self, ctx: &mut ParserContext, target: &str) {
		if let Some(super_name) = &self.super_name {
			ctx.warn(format!("Super name doesn't apply to a {target}"), super_name.location());
		}
		for interface in &self.interfaces {
			ctx.warn(format!("Interface doesn't apply to a {target}"), interface.location());
		}
	}

	/// Warns about each attribute that's still here at the end of a declaration sequence.
	pub(crate) fn warn_unused(self, ctx: &mut ParserContext) {
		if self.is_empty() {
			return;
		}
		if let Some(signature) = &self.signature {
			ctx.warn("Signature isn't followed by a declaration", signature.location());
		}
		if let Some(super_name) = &self.super_name {
			ctx.warn("Super name isn't followed by a declaration", super_name.location());
		}
		for interface in &self.interfaces {
			ctx.warn("Interface isn't followed by a declaration", interface.location());
		}
		for annotation in &self.annotations {
			ctx.warn("Annotation isn't followed by a declaration", &annotation.location);
		}
	}
}
