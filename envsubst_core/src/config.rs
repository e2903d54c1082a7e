use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::EnvsubstError;
use crate::EnvsubstResult;
use crate::LookupMode;
use crate::MapSource;
use crate::ReplaceUnset;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"envsubst.toml",
	".envsubst.toml",
	".config/envsubst.toml",
];

/// Defaults loaded from an `envsubst.toml` file. Command line flags take
/// precedence over every value here.
///
/// ```toml
/// lookup = "presence-aware"
///
/// [policy]
/// unset_fatal = false
/// empty_fatal = true
/// replace_unset = "system"
///
/// [variables]
/// GREETING = "hello"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EnvsubstConfig {
	/// How names listed in a shell format are looked up.
	#[serde(default)]
	pub lookup: LookupMode,
	/// Default policy flags.
	#[serde(default)]
	pub policy: PolicyConfig,
	/// Variables layered above the process environment.
	#[serde(default)]
	pub variables: BTreeMap<String, String>,
}

/// The `[policy]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
	#[serde(default)]
	pub unset_fatal: bool,
	#[serde(default)]
	pub empty_fatal: bool,
	#[serde(default)]
	pub replace_unset: ReplaceUnset,
}

impl EnvsubstConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> EnvsubstResult<Option<EnvsubstConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_file(path: &Path) -> EnvsubstResult<EnvsubstConfig> {
		let content =
			std::fs::read_to_string(path).map_err(|e| EnvsubstError::io(path.display(), e))?;
		let config: EnvsubstConfig =
			toml::from_str(&content).map_err(|e| EnvsubstError::ConfigParse {
				path: path.display().to_string(),
				reason: e.to_string(),
			})?;

		tracing::debug!(path = %path.display(), "loaded config");

		Ok(config)
	}

	/// The `[variables]` table as a source to layer above the environment.
	pub fn variable_source(&self) -> MapSource {
		MapSource::new(self.variables.clone())
	}
}
