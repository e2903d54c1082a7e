//! Variable sources and the key resolver.
//!
//! A [`VariableSource`] is anything that can answer "what is the value of
//! `NAME`?". The [`KeyResolver`] turns a source into a [`KeyMapping`], which
//! is the only thing the substitution engine ever looks at.

use std::collections::BTreeMap;

use serde::Deserialize;

/// The resolved state of a single variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(variant_size_differences)]
pub enum Binding {
	/// The name is not known to the source.
	Absent,
	/// The name is known and its value is the empty string.
	Empty,
	/// The name is known and has a non-empty value.
	Value(String),
}

static ABSENT: Binding = Binding::Absent;

impl Binding {
	pub fn from_lookup(value: Option<String>) -> Self {
		match value {
			None => Self::Absent,
			Some(value) if value.is_empty() => Self::Empty,
			Some(value) => Self::Value(value),
		}
	}
}

/// A key/value source the resolver can read from.
pub trait VariableSource {
	/// Look up a single name. `None` means the name is absent, which is
	/// different from `Some(String::new())`.
	fn lookup(&self, name: &str) -> Option<String>;

	/// Every entry the source knows about.
	fn entries(&self) -> Vec<(String, String)>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
	fn lookup(&self, name: &str) -> Option<String> {
		if name.is_empty() {
			return None;
		}

		std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
	}

	fn entries(&self) -> Vec<(String, String)> {
		std::env::vars_os()
			.map(|(key, value)| {
				(
					key.to_string_lossy().into_owned(),
					value.to_string_lossy().into_owned(),
				)
			})
			.collect()
	}
}

/// An explicit, in-memory set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
	values: BTreeMap<String, String>,
}

impl MapSource {
	/// Empty keys are dropped, since no reference can name them.
	pub fn new(mut values: BTreeMap<String, String>) -> Self {
		values.remove("");
		Self { values }
	}
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::new(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl VariableSource for MapSource {
	fn lookup(&self, name: &str) -> Option<String> {
		self.values.get(name).cloned()
	}

	fn entries(&self) -> Vec<(String, String)> {
		self.values
			.iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}
}

/// Overrides first, then the fallback source.
#[derive(Debug, Clone)]
pub struct LayeredSource<O, F> {
	overrides: O,
	fallback: F,
}

impl<O: VariableSource, F: VariableSource> LayeredSource<O, F> {
	pub fn new(overrides: O, fallback: F) -> Self {
		Self {
			overrides,
			fallback,
		}
	}
}

impl<O: VariableSource, F: VariableSource> VariableSource for LayeredSource<O, F> {
	fn lookup(&self, name: &str) -> Option<String> {
		self.overrides
			.lookup(name)
			.or_else(|| self.fallback.lookup(name))
	}

	fn entries(&self) -> Vec<(String, String)> {
		let mut merged: BTreeMap<String, String> = self.fallback.entries().into_iter().collect();
		merged.extend(self.overrides.entries());
		merged.into_iter().collect()
	}
}

/// How restricted names that the source does not know are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupMode {
	/// Unknown names stay [`Binding::Absent`].
	#[default]
	PresenceAware,
	/// Unknown names collapse to [`Binding::Empty`]. This matches older
	/// envsubst builds, where `--unset-fatal` can never fire for names listed
	/// in a shell format.
	Lossy,
}

/// Resolved bindings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapping {
	bindings: BTreeMap<String, Binding>,
	/// When closed, only the names in `bindings` can be substituted.
	closed: bool,
}

impl KeyMapping {
	/// An open mapping over a full set of entries.
	pub fn open<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let bindings = entries
			.into_iter()
			.map(|(key, value)| (key.into(), Binding::from_lookup(Some(value.into()))))
			.collect();

		Self {
			bindings,
			closed: false,
		}
	}

	/// A closed mapping with explicit bindings per name.
	pub fn closed<I, K>(bindings: I) -> Self
	where
		I: IntoIterator<Item = (K, Binding)>,
		K: Into<String>,
	{
		Self {
			bindings: bindings
				.into_iter()
				.map(|(key, binding)| (key.into(), binding))
				.collect(),
			closed: true,
		}
	}

	/// Resolve `name`. Anything the mapping does not hold is absent.
	pub fn get(&self, name: &str) -> &Binding {
		self.bindings.get(name).unwrap_or(&ABSENT)
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

/// Builds a [`KeyMapping`] from an injected [`VariableSource`].
pub struct KeyResolver<'a> {
	source: &'a dyn VariableSource,
	mode: LookupMode,
}

impl<'a> KeyResolver<'a> {
	pub fn new(source: &'a dyn VariableSource) -> Self {
		Self {
			source,
			mode: LookupMode::default(),
		}
	}

	#[must_use]
	pub fn with_mode(mut self, mode: LookupMode) -> Self {
		self.mode = mode;
		self
	}

	/// Resolve the mapping for one invocation.
	///
	/// Without a restriction the whole source is exposed as an open mapping.
	/// With one, the mapping is closed over exactly `names`, even when `names`
	/// is empty.
	pub fn resolve(&self, restriction: Option<&[String]>) -> KeyMapping {
		let Some(names) = restriction else {
			let mapping = KeyMapping::open(self.source.entries());
			tracing::debug!(entries = mapping.len(), "resolved open mapping");
			return mapping;
		};

		let mapping = KeyMapping::closed(names.iter().map(|name| {
			let binding = match (Binding::from_lookup(self.source.lookup(name)), self.mode) {
				(Binding::Absent, LookupMode::Lossy) => Binding::Empty,
				(binding, _) => binding,
			};
			(name.clone(), binding)
		}));

		tracing::debug!(
			names = names.len(),
			entries = mapping.len(),
			mode = ?self.mode,
			"resolved closed mapping"
		);

		mapping
	}
}
