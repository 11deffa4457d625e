use std::env;
use std::fs;
use std::path::Path;

use affirm_core::{AffirmError, Detail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming a policy file picked up by [`Policy::from_env`].
pub const ENV_VAR: &str = "AFFIRM_POLICY";

fn config_error(code: &str, err: impl ToString) -> AffirmError {
    AffirmError::Config(Detail::new(code, err.to_string()))
}

/// Rendering policy applied by the [`Reporter`](crate::Reporter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Maximum number of failure details listed before the rest are elided.
    #[serde(default = "Policy::default_max_listed_failures")]
    pub max_listed_failures: usize,
    /// Whether the context pairs of each failure are rendered.
    #[serde(default = "Policy::default_show_context")]
    pub show_context: bool,
    /// Spaces per nesting level.
    #[serde(default = "Policy::default_indent")]
    pub indent: usize,
    /// Whether passed nodes appear in rendered trees.
    #[serde(default = "Policy::default_show_passed")]
    pub show_passed: bool,
}

impl Policy {
    const fn default_max_listed_failures() -> usize {
        20
    }

    const fn default_show_context() -> bool {
        true
    }

    const fn default_indent() -> usize {
        2
    }

    const fn default_show_passed() -> bool {
        true
    }

    /// Parses a policy from YAML bytes. Missing fields take their defaults.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, AffirmError> {
        serde_yaml::from_slice(data).map_err(|err| config_error("policy-yaml", err))
    }

    /// Parses a policy from JSON bytes. Missing fields take their defaults.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, AffirmError> {
        serde_json::from_slice(data).map_err(|err| config_error("policy-json", err))
    }

    /// Loads a policy file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, AffirmError> {
        let bytes = fs::read(path).map_err(|err| {
            AffirmError::Config(
                Detail::new("policy-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), json = is_json, "loading policy");
        if is_json {
            Self::from_json_slice(&bytes)
        } else {
            Self::from_yaml_slice(&bytes)
        }
    }

    /// Loads the policy named by [`ENV_VAR`], or the default when it is unset.
    pub fn from_env() -> Result<Self, AffirmError> {
        Self::from_env_var(ENV_VAR)
    }

    /// Loads the policy file named by the environment variable `key`, or the
    /// default when it is unset or empty.
    pub fn from_env_var(key: &str) -> Result<Self, AffirmError> {
        match env::var_os(key) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Serializes the policy as YAML.
    pub fn to_yaml_string(&self) -> Result<String, AffirmError> {
        serde_yaml::to_string(self).map_err(|err| config_error("policy-yaml", err))
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_listed_failures: Self::default_max_listed_failures(),
            show_context: Self::default_show_context(),
            indent: Self::default_indent(),
            show_passed: Self::default_show_passed(),
        }
    }
}
