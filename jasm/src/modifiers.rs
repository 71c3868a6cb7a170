use std::fmt::{Display, Formatter};
use crate::location::Location;

/// What a set of modifiers is applied to. Which modifiers are valid depends on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ModifierTarget {
	Class,
	Field,
	Method,
}

impl Display for ModifierTarget {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			ModifierTarget::Class => "class",
			ModifierTarget::Field => "field",
			ModifierTarget::Method => "method",
		})
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
	Public,
	Private,
	Protected,
	Static,
	Final,
	Super,
	Synchronized,
	Volatile,
	Bridge,
	Transient,
	Varargs,
	Native,
	Interface,
	Abstract,
	Strict,
	Synthetic,
	Annotation,
	Enum,
	Module,
}

impl Modifier {
	pub const ALL: [Modifier; 19] = [
		Modifier::Public, Modifier::Private, Modifier::Protected, Modifier::Static, Modifier::Final,
		Modifier::Super, Modifier::Synchronized, Modifier::Volatile, Modifier::Bridge, Modifier::Transient,
		Modifier::Varargs, Modifier::Native, Modifier::Interface, Modifier::Abstract, Modifier::Strict,
		Modifier::Synthetic, Modifier::Annotation, Modifier::Enum, Modifier::Module,
	];

	pub fn keyword(self) -> &'static str {
		match self {
			Modifier::Public       => "public",
			Modifier::Private      => "private",
			Modifier::Protected    => "protected",
			Modifier::Static       => "static",
			Modifier::Final        => "final",
			Modifier::Super        => "super",
			Modifier::Synchronized => "synchronized",
			Modifier::Volatile     => "volatile",
			Modifier::Bridge       => "bridge",
			Modifier::Transient    => "transient",
			Modifier::Varargs      => "varargs",
			Modifier::Native       => "native",
			Modifier::Interface    => "interface",
			Modifier::Abstract     => "abstract",
			Modifier::Strict       => "strictfp",
			Modifier::Synthetic    => "synthetic",
			Modifier::Annotation   => "annotation",
			Modifier::Enum         => "enum",
			Modifier::Module       => "module",
		}
	}

	pub fn from_keyword(keyword: &str) -> Option<Modifier> {
		Modifier::ALL.into_iter().find(|modifier| modifier.keyword() == keyword)
	}

	/// The bit of the modifier in the access flags of the class file.
	pub fn access_flag(self) -> u16 {
		match self {
			Modifier::Public       => 0x0001,
			Modifier::Private      => 0x0002,
			Modifier::Protected    => 0x0004,
			Modifier::Static       => 0x0008,
			Modifier::Final        => 0x0010,
			Modifier::Super        => 0x0020,
			Modifier::Synchronized => 0x0020,
			Modifier::Volatile     => 0x0040,
			Modifier::Bridge       => 0x0040,
			Modifier::Transient    => 0x0080,
			Modifier::Varargs      => 0x0080,
			Modifier::Native       => 0x0100,
			Modifier::Interface    => 0x0200,
			Modifier::Abstract     => 0x0400,
			Modifier::Strict       => 0x0800,
			Modifier::Synthetic    => 0x1000,
			Modifier::Annotation   => 0x2000,
			Modifier::Enum         => 0x4000,
			Modifier::Module       => 0x8000,
		}
	}

	pub fn is_allowed_on(self, target: ModifierTarget) -> bool {
		use Modifier::*;
		match target {
			ModifierTarget::Class => matches!(self,
				Public | Final | Super | Interface | Abstract | Synthetic | Annotation | Enum | Module
			),
			ModifierTarget::Field => matches!(self,
				Public | Private | Protected | Static | Final | Volatile | Transient | Synthetic | Enum
			),
			ModifierTarget::Method => matches!(self,
				Public | Private | Protected | Static | Final | Synchronized | Bridge | Varargs | Native | Abstract
					| Strict | Synthetic
			),
		}
	}
}

/// The modifiers of a declaration, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
	pub modifiers: Vec<(Modifier, Location)>,
}

impl Modifiers {
	pub fn new() -> Modifiers {
		Modifiers::default()
	}

	/// Adds a modifier, returning `false` if it was already present. A repeated modifier is still recorded.
	pub fn add(&mut self, modifier: Modifier, location: Location) -> bool {
		let new = !self.contains(modifier);
		self.modifiers.push((modifier, location));
		new
	}

	pub fn contains(&self, modifier: Modifier) -> bool {
		self.modifiers.iter().any(|(m, _)| *m == modifier)
	}

	pub fn iter(&self) -> impl Iterator<Item=Modifier> + '_ {
		self.modifiers.iter().map(|(modifier, _)| *modifier)
	}

	pub fn is_empty(&self) -> bool {
		self.modifiers.is_empty()
	}

	pub fn access_flags(&self) -> u16 {
		self.iter().fold(0, |flags, modifier| flags | modifier.access_flag())
	}
}
