use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use envsubst_core::ReplaceUnset;

#[derive(Parser)]
#[command(
	name = "envsubst",
	author,
	version,
	about = "Substitutes the values of environment variables.",
	long_about = "In normal operation mode, standard input is copied to standard output, with \
	              references to environment variables of the form $VARIABLE or ${VARIABLE} being \
	              replaced with the corresponding values. If a SHELL-FORMAT is given, only those \
	              environment variables that are referenced in SHELL-FORMAT are substituted; \
	              otherwise all environment variable references occurring in standard input are \
	              substituted.\n\nWhen --variables is used, standard input is ignored, and the \
	              output consists of the environment variables that are referenced in \
	              SHELL-FORMAT, one per line."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct EnvsubstCli {
	/// Only substitute the variables referenced in this template. An empty
	/// string still restricts substitution (to nothing).
	#[arg(value_name = "SHELL-FORMAT")]
	pub shell_format: Option<String>,

	/// Files to substitute, as `IN:OUT` or `IN` to rewrite in place. May be
	/// repeated; files are processed in order and the first failure stops
	/// the batch.
	#[arg(long, short, value_name = "IN[:OUT]")]
	pub file: Vec<String>,

	/// Output the variables occurring in SHELL-FORMAT, one per line.
	#[arg(long, short = 'v', default_value_t = false)]
	pub variables: bool,

	/// Whether unset variables are replaced with an empty string. `system`
	/// means `yes` when SHELL-FORMAT is not given and `no` otherwise. With a
	/// SHELL-FORMAT, unset references are always kept.
	#[arg(long, value_enum, value_name = "MODE")]
	pub replace_unset: Option<ReplaceUnsetMode>,

	/// Fail if a referenced variable is not set.
	#[arg(long, default_value_t = false)]
	pub unset_fatal: bool,

	/// Fail if a referenced variable is set to an empty value.
	#[arg(long, default_value_t = false)]
	pub empty_fatal: bool,

	/// Treat SHELL-FORMAT variables that are not set as empty, the way older
	/// envsubst builds did. `--unset-fatal` never fires for those names.
	#[arg(long, default_value_t = false)]
	pub lossy_lookup: bool,

	/// Path to a config file. Defaults to the first of `envsubst.toml`,
	/// `.envsubst.toml`, or `.config/envsubst.toml` in the current directory.
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Enable verbose logging on stderr.
	#[arg(long, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplaceUnsetMode {
	/// `yes` without SHELL-FORMAT, `no` with it.
	#[value(alias = "s")]
	System,
	/// Replace unset variables with an empty string.
	#[value(aliases = ["y", "true"])]
	Yes,
	/// Keep references to unset variables as they are.
	#[value(aliases = ["n", "false"])]
	No,
}

impl From<ReplaceUnsetMode> for ReplaceUnset {
	fn from(mode: ReplaceUnsetMode) -> Self {
		match mode {
			ReplaceUnsetMode::System => Self::System,
			ReplaceUnsetMode::Yes => Self::Yes,
			ReplaceUnsetMode::No => Self::No,
		}
	}
}
