use indexmap::IndexMap;
use crate::ast::Element;
use crate::ast::primitive::Identifier;
use crate::location::Location;
use crate::token::Token;

/// A keyworded list of elements, like `.field public a I`.
///
/// A declaration without keyword is a body, like the member list of a class.
/// Elements are `None` where the grouping step found a hole.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
	/// The keyword token, including the leading `.` if there is one.
	pub keyword: Option<Token>,
	pub elements: Vec<Option<Element>>,
	pub location: Location,
}

impl Declaration {
	pub fn new(keyword: Option<Token>, elements: Vec<Option<Element>>, location: Location) -> Declaration {
		Declaration { keyword, elements, location }
	}

	/// Returns the keyword with a leading `.` removed.
	pub fn keyword_name(&self) -> Option<String> {
		self.keyword.as_ref().map(|keyword| {
			let text = keyword.text();
			text.strip_prefix('.').unwrap_or(&text).to_owned()
		})
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
	pub elements: Vec<Option<Element>>,
	pub location: Location,
}

impl Array {
	pub fn new(elements: Vec<Option<Element>>, location: Location) -> Array {
		Array { elements, location }
	}

	/// Creates the array an [`Empty`][super::primitive::Empty] stands for.
	pub fn empty(location: Location) -> Array {
		Array { elements: Vec::new(), location }
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Returns the element at `index`, and `None` for both holes and out of bounds.
	pub fn get(&self, index: usize) -> Option<&Element> {
		self.elements.get(index).and_then(Option::as_ref)
	}

	pub fn last(&self) -> Option<&Element> {
		self.elements.last().and_then(Option::as_ref)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
	pub key: Token,
	pub value: Option<Element>,
}

/// A `{ key: value, .. }` in source order.
///
/// The first occurrence of a key is the entry for that key, any later occurrences are kept in `duplicates` so that
/// they can be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
	entries: IndexMap<String, ObjectEntry>,
	duplicates: Vec<ObjectEntry>,
	pub location: Location,
}

impl Object {
	pub fn new(location: Location, pairs: impl IntoIterator<Item=(Token, Option<Element>)>) -> Object {
		let mut entries = IndexMap::new();
		let mut duplicates = Vec::new();
		for (key, value) in pairs {
			let entry = ObjectEntry { key, value };
			let name = entry.key.text().into_owned();
			if entries.contains_key(&name) {
				duplicates.push(entry);
			} else {
				entries.insert(name, entry);
			}
		}
		Object { entries, duplicates, location }
	}

	/// Creates the object an [`Empty`][super::primitive::Empty] stands for.
	pub fn empty(location: Location) -> Object {
		Object { entries: IndexMap::new(), duplicates: Vec::new(), location }
	}

	pub fn get(&self, key: &str) -> Option<&ObjectEntry> {
		self.entries.get(key)
	}

	/// Returns the value for `key`, and `None` for both holes and missing keys.
	pub fn value(&self, key: &str) -> Option<&Element> {
		self.get(key).and_then(|entry| entry.value.as_ref())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> impl Iterator<Item=&ObjectEntry> {
		self.entries.values()
	}

	pub fn keys(&self) -> impl Iterator<Item=&str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn duplicates(&self) -> &[ObjectEntry] {
		&self.duplicates
	}
}

/// The instructions and labels of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
	pub elements: Vec<Option<Element>>,
	pub location: Location,
}

impl Code {
	pub fn new(elements: Vec<Option<Element>>, location: Location) -> Code {
		Code { elements, location }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
	pub mnemonic: Identifier,
	pub arguments: Vec<Option<Element>>,
	pub location: Location,
}

impl Instruction {
	pub fn new(mnemonic: Identifier, arguments: Vec<Option<Element>>) -> Instruction {
		let location = mnemonic.location().clone();
		Instruction { mnemonic, arguments, location }
	}
}
