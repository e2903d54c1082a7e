//! File routing: `IN` (rewrite in place) or `IN:OUT`.

use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use crate::EnvsubstError;
use crate::EnvsubstResult;
use crate::KeyMapping;
use crate::RestrictionPolicy;
use crate::substitute;

/// Where one file is read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRoute {
	pub input: PathBuf,
	pub output: PathBuf,
}

impl FileRoute {
	pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
		Self {
			input: input.into(),
			output: output.into(),
		}
	}

	pub fn in_place(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		Self {
			input: path.clone(),
			output: path,
		}
	}

	pub fn is_in_place(&self) -> bool {
		self.input == self.output
	}
}

impl FromStr for FileRoute {
	type Err = EnvsubstError;

	/// Parse `IN` or `IN:OUT`. Only the first `:` separates the two paths.
	fn from_str(route: &str) -> Result<Self, Self::Err> {
		let (input, output) = match route.split_once(':') {
			Some((input, output)) => (input, output),
			None => (route, route),
		};

		if input.is_empty() || output.is_empty() {
			return Err(EnvsubstError::InvalidFileRoute(route.to_string()));
		}

		Ok(Self::new(input, output))
	}
}

impl Display for FileRoute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"\"{}\" to \"{}\"",
			self.input.display(),
			self.output.display()
		)
	}
}

/// Substitute a single file and write the result to its output path.
///
/// The input is read fully before anything is written, so in-place routes
/// are safe. The output receives the input's permission bits.
pub fn substitute_file(
	route: &FileRoute,
	mapping: &KeyMapping,
	policy: &RestrictionPolicy,
) -> EnvsubstResult<()> {
	let metadata = std::fs::metadata(&route.input).map_err(|e| io_error(&route.input, e))?;
	let content = std::fs::read_to_string(&route.input).map_err(|e| io_error(&route.input, e))?;
	let output = substitute(&content, mapping, policy)?;

	std::fs::write(&route.output, output).map_err(|e| io_error(&route.output, e))?;
	std::fs::set_permissions(&route.output, metadata.permissions())
		.map_err(|e| io_error(&route.output, e))?;

	tracing::info!(
		input = %route.input.display(),
		output = %route.output.display(),
		"substituted file"
	);

	Ok(())
}

/// Process routes strictly in order and stop at the first failure. Files
/// written before the failure are left in place. `on_written` runs after
/// each successful write.
pub fn substitute_files<F>(
	routes: &[FileRoute],
	mapping: &KeyMapping,
	policy: &RestrictionPolicy,
	mut on_written: F,
) -> EnvsubstResult<usize>
where
	F: FnMut(&FileRoute),
{
	for route in routes {
		substitute_file(route, mapping, policy)?;
		on_written(route);
	}

	Ok(routes.len())
}

fn io_error(path: &Path, source: std::io::Error) -> EnvsubstError {
	EnvsubstError::io(path.display(), source)
}
