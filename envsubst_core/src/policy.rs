use serde::Deserialize;

use crate::Binding;
use crate::EnvsubstError;
use crate::EnvsubstResult;

/// Whether unset variables are replaced with the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceUnset {
	/// `yes` when no shell format restricts the substitution, `no` otherwise.
	#[default]
	System,
	Yes,
	No,
}

/// Flags that govern how unset and empty variables are handled.
///
/// The fields are independent of each other and are checked per reference
/// in the order documented on [`RestrictionPolicy::decide`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RestrictionPolicy {
	/// Fail when a reference resolves to an absent variable.
	pub error_on_unset: bool,
	/// Fail when a reference resolves to an empty value.
	pub error_on_empty: bool,
	/// Emit the original token text for absent variables.
	pub keep_unset_literal: bool,
	/// Emit the empty string for absent variables.
	pub replace_unset_with_empty: bool,
}

/// What to write in place of a single reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum Replacement<'a> {
	/// Copy the original token text through unchanged.
	Literal,
	/// Write this text instead of the token.
	Text(&'a str),
}

impl RestrictionPolicy {
	pub const fn new() -> Self {
		Self {
			error_on_unset: false,
			error_on_empty: false,
			keep_unset_literal: false,
			replace_unset_with_empty: false,
		}
	}

	/// Build the policy for one invocation from caller options.
	///
	/// `restricted` is true when a shell format closed the mapping. A
	/// restricted run always keeps absent references literal, so names
	/// outside the shell format are never touched. Otherwise absent
	/// references are either replaced with `""` or kept literal.
	pub fn from_options(
		unset_fatal: bool,
		empty_fatal: bool,
		replace_unset: ReplaceUnset,
		restricted: bool,
	) -> Self {
		let replace_unset_with_empty = match replace_unset {
			ReplaceUnset::System => !restricted,
			ReplaceUnset::Yes => true,
			ReplaceUnset::No => false,
		};

		Self {
			error_on_unset: unset_fatal,
			error_on_empty: empty_fatal,
			keep_unset_literal: restricted || !replace_unset_with_empty,
			replace_unset_with_empty,
		}
	}

	#[must_use]
	pub const fn with_error_on_unset(mut self, value: bool) -> Self {
		self.error_on_unset = value;
		self
	}

	#[must_use]
	pub const fn with_error_on_empty(mut self, value: bool) -> Self {
		self.error_on_empty = value;
		self
	}

	#[must_use]
	pub const fn with_keep_unset_literal(mut self, value: bool) -> Self {
		self.keep_unset_literal = value;
		self
	}

	#[must_use]
	pub const fn with_replace_unset_with_empty(mut self, value: bool) -> Self {
		self.replace_unset_with_empty = value;
		self
	}

	/// Decide what a reference to `name` becomes. The first matching row
	/// wins:
	///
	/// | binding  | flag                       | outcome              |
	/// |----------|----------------------------|----------------------|
	/// | absent   | `error_on_unset`           | `UnsetVariable`      |
	/// | empty    | `error_on_empty`           | `EmptyValue`         |
	/// | absent   | `keep_unset_literal`       | original token text  |
	/// | absent   | `replace_unset_with_empty` | `""`                 |
	/// | absent   |                            | `""`                 |
	/// | empty    |                            | `""`                 |
	/// | value    |                            | the value            |
	pub fn decide<'a>(&self, name: &str, binding: &'a Binding) -> EnvsubstResult<Replacement<'a>> {
		match binding {
			Binding::Absent if self.error_on_unset => {
				Err(EnvsubstError::UnsetVariable {
					name: name.to_string(),
				})
			}
			Binding::Empty if self.error_on_empty => {
				Err(EnvsubstError::EmptyValue {
					name: name.to_string(),
				})
			}
			Binding::Absent if self.keep_unset_literal => Ok(Replacement::Literal),
			Binding::Absent | Binding::Empty => Ok(Replacement::Text("")),
			Binding::Value(value) => Ok(Replacement::Text(value)),
		}
	}
}
