//! Configuration management for lineage rewriting.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `lineage.toml` file
//! 3. User config `~/.config/lineage/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rules::Rules;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to parse YAML rules: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON rules: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule engine behaviour.
    pub engine: EngineConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Rewrite rules.
    pub rules: Rules,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./lineage.toml` (project local)
    /// 2. `~/.config/lineage/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Path of the per-user config file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_USER_CONFIG_FILE))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(strict) = env_flag("LINEAGE_STRICT") {
            self.engine.strict = strict;
        }
        if let Some(assign) = env_flag("LINEAGE_ASSIGN_LEVELS") {
            self.engine.assign_levels = assign;
        }
        if let Some(prune) = env_flag("LINEAGE_PRUNE_DANGLING") {
            self.engine.prune_dangling = prune;
        }

        if let Ok(level) = std::env::var("LINEAGE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = env_flag("LINEAGE_LOG_JSON") {
            self.logging.json = json;
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Parse a boolean environment variable. Unparseable values are ignored.
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Rule engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fail when a rewrite leaves dangling edges.
    pub strict: bool,

    /// Recompute node levels from the queried node before applying rules.
    pub assign_levels: bool,

    /// Remove dangling edges after all rules have run.
    pub prune_dangling: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict: DEFAULT_STRICT,
            assign_levels: DEFAULT_ASSIGN_LEVELS,
            prune_dangling: DEFAULT_PRUNE_DANGLING,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "lineage_core=debug").
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: DEFAULT_LOG_JSON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.strict, DEFAULT_STRICT);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[engine]"));
        assert!(toml_str.contains("[logging]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[engine]
strict = true

[logging]
level = "debug"

[[rules.incomplete]]
edge_type = "ClassificationAssignment"
destination_node_type = "Confidentiality"

[[rules.invert_edge]]
edge_type = "SemanticAssignment"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.engine.strict);
        assert!(!config.engine.assign_levels);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.rules.len(), 2);
        assert!(config.rules.remove_nodes.is_none());
    }
}
