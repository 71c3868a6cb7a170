use std::fmt::{Display, Formatter};
use anyhow::{anyhow, bail, Context, Result};
use java_string::{JavaStr, JavaString};
use jasm::ast::Element;
use jasm::ast::composite::Array;

/// The kind of a method handle, as in the `reference_kind` of a `CONSTANT_MethodHandle_info`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HandleKind {
	GetField,
	GetStatic,
	PutField,
	PutStatic,
	InvokeVirtual,
	InvokeStatic,
	InvokeSpecial,
	NewInvokeSpecial,
	InvokeInterface,
}

impl HandleKind {
	pub const ALL: [HandleKind; 9] = [
		HandleKind::GetField,
		HandleKind::GetStatic,
		HandleKind::PutField,
		HandleKind::PutStatic,
		HandleKind::InvokeVirtual,
		HandleKind::InvokeStatic,
		HandleKind::InvokeSpecial,
		HandleKind::NewInvokeSpecial,
		HandleKind::InvokeInterface,
	];

	pub fn keyword(self) -> &'static str {
		match self {
			HandleKind::GetField         => "getfield",
			HandleKind::GetStatic        => "getstatic",
			HandleKind::PutField         => "putfield",
			HandleKind::PutStatic        => "putstatic",
			HandleKind::InvokeVirtual    => "invokevirtual",
			HandleKind::InvokeStatic     => "invokestatic",
			HandleKind::InvokeSpecial    => "invokespecial",
			HandleKind::NewInvokeSpecial => "newinvokespecial",
			HandleKind::InvokeInterface  => "invokeinterface",
		}
	}

	/// Case sensitive.
	pub fn from_keyword(keyword: &str) -> Option<HandleKind> {
		HandleKind::ALL.into_iter().find(|kind| kind.keyword() == keyword)
	}

	/// The `reference_kind`, from `1` to `9`.
	pub fn reference_kind(self) -> u8 {
		match self {
			HandleKind::GetField         => 1,
			HandleKind::GetStatic        => 2,
			HandleKind::PutField         => 3,
			HandleKind::PutStatic        => 4,
			HandleKind::InvokeVirtual    => 5,
			HandleKind::InvokeStatic     => 6,
			HandleKind::InvokeSpecial    => 7,
			HandleKind::NewInvokeSpecial => 8,
			HandleKind::InvokeInterface  => 9,
		}
	}

	pub fn is_field(self) -> bool {
		matches!(self, HandleKind::GetField | HandleKind::GetStatic | HandleKind::PutField | HandleKind::PutStatic)
	}
}

impl Display for HandleKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.keyword())
	}
}

/// A method handle, written as `[kind, Owner.member, descriptor]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
	pub kind: HandleKind,
	/// The owner and the member name, separated by the last `.`.
	pub name: JavaString,
	pub descriptor: JavaString,
}

impl Handle {
	/// Splits the name into the internal name of the owner class and the member name.
	pub fn owner_and_member(&self) -> Result<(&JavaStr, &JavaStr)> {
		self.name.rsplit_once('.')
			.ok_or_else(|| anyhow!("handle name {:?} has no owner, expected `Owner.member`", self.name))
	}
}

impl TryFrom<&Array> for Handle {
	type Error = anyhow::Error;

	fn try_from(array: &Array) -> Result<Handle> {
		if array.len() != 3 {
			bail!("expected kind, name and descriptor for a handle, got {} elements", array.len());
		}

		let identifier = |index: usize, what: &str| -> Result<JavaString> {
			match array.get(index) {
				Some(Element::Identifier(identifier)) => Ok(identifier.token.content.clone()),
				Some(element) => bail!("expected identifier for handle {what}, got {}", element.kind()),
				None => bail!("expected identifier for handle {what}, got nothing"),
			}
		};

		let kind = identifier(0, "kind")?;
		let kind = kind.as_str().ok()
			.and_then(HandleKind::from_keyword)
			.with_context(|| anyhow!("unknown handle kind {kind:?} at {}", array.location))?;

		Ok(Handle {
			kind,
			name: identifier(1, "name")?,
			descriptor: identifier(2, "descriptor")?,
		})
	}
}
