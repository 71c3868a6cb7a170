use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A position in a source text.
///
/// Both `line` and `column` start at `1`. The column counts unicode code points, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
	pub line: usize,
	pub column: usize,
	/// The name of the source, usually a file name. Shared between all locations of one source.
	pub source: Arc<str>,
}

impl Location {
	pub fn new(line: usize, column: usize, source: Arc<str>) -> Location {
		Location { line, column, source }
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}:{}", self.source, self.line, self.column)
	}
}
