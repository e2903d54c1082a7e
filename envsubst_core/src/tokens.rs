use std::fmt::Display;
use std::ops::Range;

use derive_more::Deref;

/// How the braces around a reference were written. The opening and closing
/// brace are matched independently, so every combination is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraceShape {
	/// `$NAME`
	Bare,
	/// `${NAME}`
	Braced,
	/// `${NAME` with no closing brace.
	Unterminated,
	/// `$NAME}` with no opening brace.
	StrayClose,
}

impl BraceShape {
	pub fn from_flags(opened: bool, closed: bool) -> Self {
		match (opened, closed) {
			(false, false) => Self::Bare,
			(true, true) => Self::Braced,
			(true, false) => Self::Unterminated,
			(false, true) => Self::StrayClose,
		}
	}

	pub fn has_open(self) -> bool {
		matches!(self, Self::Braced | Self::Unterminated)
	}

	pub fn has_close(self) -> bool {
		matches!(self, Self::Braced | Self::StrayClose)
	}
}

/// A single `$NAME` / `${NAME}` token found in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
	/// The captured name. Empty when `$` is followed by a non-word character.
	pub name: String,
	/// Byte span of the whole token, including `$` and any braces.
	pub span: Range<usize>,
	pub braces: BraceShape,
}

impl VariableReference {
	/// The original token text, as it appears in `source`.
	pub fn literal<'a>(&self, source: &'a str) -> &'a str {
		&source[self.span.clone()]
	}
}

impl Display for VariableReference {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let open = if self.braces.has_open() { "{" } else { "" };
		let close = if self.braces.has_close() { "}" } else { "" };
		write!(f, "${open}{}{close}", self.name)
	}
}

/// Ordered references from one scan, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct References(pub(crate) Vec<VariableReference>);

impl References {
	/// The referenced names in order of occurrence.
	pub fn names(&self) -> Vec<String> {
		self.0.iter().map(|reference| reference.name.clone()).collect()
	}
}
