//! Configuration models for kgex.
//!
//! All I^R (resolvable ignorance) is parameterized here.
//! The user resolves these unknowns at runtime via an optional config file.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Default config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "kgex.toml";

/// Top-level configuration for kgex.
///
/// I^R resolved: every section falls back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How components are referenced in listings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Listing defaults
    #[serde(default)]
    pub listing: ListingConfig,

    /// Training hook settings
    #[serde(default)]
    pub train: TrainConfig,
}

/// Catalog reference settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root of dotted reference paths (e.g. "poem" → `poem.models.TransE`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Sphinx role used for rst references (e.g. "class" → `:class:`)
    #[serde(default = "default_rst_role")]
    pub rst_role: String,
}

fn default_namespace() -> String {
    "poem".to_string()
}

fn default_rst_role() -> String {
    "class".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            rst_role: default_rst_role(),
        }
    }
}

/// Listing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Table format used when `--tablefmt` is not given.
    /// Unrecognized values behave as "plain".
    #[serde(default = "default_tablefmt")]
    pub tablefmt: String,
}

fn default_tablefmt() -> String {
    "plain".to_string()
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            tablefmt: default_tablefmt(),
        }
    }
}

/// Training hook settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Print the constructed model as JSON on stdout
    #[serde(default = "default_true")]
    pub emit_json: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            emit_json: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// B_i(file exists) → Result
    /// B_i(file is valid TOML) → Result
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Parse configuration from TOML text, expanding `${VAR}` references.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.catalog.namespace = expand_env_vars(&config.catalog.namespace);
        config.catalog.rst_role = expand_env_vars(&config.catalog.rst_role);
        config.listing.tablefmt = expand_env_vars(&config.listing.tablefmt);
        Ok(config)
    }

    /// Load configuration, tolerating an absent default file.
    ///
    /// A missing file is only an error when the user named it explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        if !explicit && !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Check the values that have a closed domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.namespace must not be empty".to_string(),
            ));
        }
        if self.catalog.rst_role.contains(':') || self.catalog.rst_role.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "catalog.rst_role '{}' is not a valid role name",
                self.catalog.rst_role
            )));
        }
        Ok(())
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// Expand environment variables in a string.
///
/// Supports ${VAR_NAME} syntax.
/// If the variable is not set, the placeholder is left unchanged.
pub fn expand_env_vars(s: &str) -> String {
    let mut result = s.to_string();

    for cap in env_var_pattern().captures_iter(s) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

/// Example configuration printed by `kgex config example`.
pub const EXAMPLE_CONFIG: &str = r#"# kgex configuration file

[catalog]
# Root of dotted reference paths in rst/github listings
namespace = "poem"
# Sphinx role used for rst references
rst_role = "class"

[listing]
# Default table format: plain, rst or github
tablefmt = "plain"

[train]
# Print the constructed model as JSON
emit_json = true
"#;

/// Configuration errors.
///
/// Epistemic origin:
/// - B_i falsified: File not found, parse error
/// - I^B materialized: Values outside their domain
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.catalog.namespace, "poem");
        assert_eq!(config.catalog.rst_role, "class");
        assert_eq!(config.listing.tablefmt, "plain");
        assert!(config.train.emit_json);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[catalog]\nnamespace = \"pykeen\"\n\n[listing]\ntablefmt = \"github\"\n\n[train]\nemit_json = false"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.catalog.namespace, "pykeen");
        assert_eq!(config.listing.tablefmt, "github");
        assert!(!config.train.emit_json);
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_toml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_load_missing_default_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        assert_eq!(Config::load(&path, false).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[catalog\nnamespace = ").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_role() {
        let mut config = Config::default();
        config.catalog.rst_role = ":class:".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catalog.namespace = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        let result = expand_env_vars("${KGEX_TEST_SURELY_UNSET_VAR}.models");
        assert_eq!(result, "${KGEX_TEST_SURELY_UNSET_VAR}.models");

        let path = std::env::var("PATH").unwrap_or_default();
        assert_eq!(expand_env_vars("${PATH}"), path);
    }
}
