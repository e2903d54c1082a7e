use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EnvsubstError {
	#[error("variable `{name}` is not set")]
	#[diagnostic(
		code(envsubst::unset_variable),
		help("export `{name}` before running envsubst or drop `--unset-fatal`")
	)]
	UnsetVariable { name: String },

	#[error("variable `{name}` is set but empty")]
	#[diagnostic(
		code(envsubst::empty_value),
		help("give `{name}` a non-empty value or drop `--empty-fatal`")
	)]
	EmptyValue { name: String },

	#[error("failed to access `{path}`: {source}")]
	#[diagnostic(code(envsubst::io_error))]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("no input: stdin is a terminal and no files were given")]
	#[diagnostic(
		code(envsubst::no_input),
		help("pipe content in (`envsubst < in.txt`) or pass `--file IN[:OUT]`")
	)]
	NoInput,

	#[error("invalid file route: `{0}`")]
	#[diagnostic(
		code(envsubst::invalid_file_route),
		help("use `IN` to rewrite a file in place or `IN:OUT` to write elsewhere")
	)]
	InvalidFileRoute(String),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(envsubst::config_parse),
		help("check that the file is valid TOML with [policy] and/or [variables] sections")
	)]
	ConfigParse { path: String, reason: String },
}

impl EnvsubstError {
	/// Wrap an I/O error together with the path (or stream label) that
	/// produced it.
	pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
		Self::Io {
			path: path.to_string(),
			source,
		}
	}
}

pub type EnvsubstResult<T> = Result<T, EnvsubstError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
