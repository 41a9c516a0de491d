//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hiertree/hiertree.toml`
//! 3. Local config: `<dir>/.hiertree.toml` (working directory unless `-C` is given)
//! 4. Environment variables: `HIERTREE_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_DELIMITER;

/// How a hierarchy is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One debug line per entry: `[parent/]name*>`
    #[default]
    Inspect,
    /// Tab-separated parent, name, element flag and leaf flag
    Entries,
    /// Box-drawing tree
    Tree,
    /// Full paths of leaf entries only
    Leaves,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inspect => "inspect",
            Self::Entries => "entries",
            Self::Tree => "tree",
            Self::Leaves => "leaves",
        };
        write!(f, "{name}")
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub delimiter: Option<String>,
    pub format: Option<OutputFormat>,
    pub comment_prefix: Option<String>,
    pub skip_blank_lines: Option<bool>,
}

/// Unified configuration for hiertree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator between path components in text input and leaf output (default: "/")
    pub delimiter: String,
    /// Default output format
    pub format: OutputFormat,
    /// Input lines starting with this prefix are ignored; empty disables comments
    pub comment_prefix: String,
    /// Ignore blank input lines instead of rejecting them as empty paths
    pub skip_blank_lines: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            format: OutputFormat::default(),
            comment_prefix: "#".to_string(),
            skip_blank_lines: true,
        }
    }
}

/// Get the XDG config directory for hiertree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hiertree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hiertree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".hiertree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            delimiter: overlay
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            format: overlay.format.unwrap_or(self.format),
            comment_prefix: overlay
                .comment_prefix
                .clone()
                .unwrap_or_else(|| self.comment_prefix.clone()),
            skip_blank_lines: overlay.skip_blank_lines.unwrap_or(self.skip_blank_lines),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.hiertree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/hiertree/hiertree.toml`
    /// 3. Local config: `<local_dir>/.hiertree.toml`
    /// 4. Environment variables: `HIERTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply HIERTREE_* environment variables as explicit overrides.
    ///
    /// Unset variables leave the setting alone; a value that does not parse
    /// is a config error naming the variable.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HIERTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value("delimiter", config.get_string("delimiter"))? {
            settings.delimiter = val;
        }
        if let Some(val) = env_value("format", config.get_string("format"))? {
            settings.format =
                OutputFormat::from_str(&val, true).map_err(|e| ApplicationError::Config {
                    message: format!("{}: {e}", env_var_name("format")),
                })?;
        }
        if let Some(val) = env_value("comment_prefix", config.get_string("comment_prefix"))? {
            settings.comment_prefix = val;
        }
        if let Some(val) = env_value("skip_blank_lines", config.get_bool("skip_blank_lines"))? {
            settings.skip_blank_lines = val;
        }

        Ok(settings)
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.delimiter.is_empty() {
            return Err(ApplicationError::Config {
                message: "delimiter must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# hiertree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/hiertree/hiertree.toml
#   Local:  <dir>/.hiertree.toml
#   Env:    HIERTREE_* environment variables

# Separator between path components in input lines and leaf output
# delimiter = "/"

# Default output format: inspect | entries | tree | leaves
# format = "inspect"

# Lines starting with this prefix are ignored ("" disables comments)
# comment_prefix = "#"

# Ignore blank lines (false: a blank line is rejected as an empty path)
# skip_blank_lines = true
"##
        .to_string()
    }
}

fn env_var_name(key: &str) -> String {
    format!("HIERTREE_{}", key.to_uppercase())
}

/// `None` when the variable is unset, an error when its value is malformed.
fn env_value<T>(key: &str, value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("{}: {e}", env_var_name(key)),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_slash_delimited_inspect() {
        let settings = Settings::default();
        assert_eq!(settings.delimiter, "/");
        assert_eq!(settings.format, OutputFormat::Inspect);
        assert_eq!(settings.comment_prefix, "#");
        assert!(settings.skip_blank_lines);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            delimiter: Some("::".to_string()),
            format: None,
            comment_prefix: None,
            skip_blank_lines: Some(false),
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.delimiter, "::");
        assert_eq!(result.format, OutputFormat::Inspect);
        assert_eq!(result.comment_prefix, "#");
        assert!(!result.skip_blank_lines);
    }

    #[test]
    fn given_empty_delimiter_when_validating_then_config_error() {
        let settings = Settings {
            delimiter: String::new(),
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        let settings = Settings::default().merge_with(&raw);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_missing_key_when_reading_env_value_then_none() {
        let value: Result<bool, ConfigError> = Err(ConfigError::NotFound("format".to_string()));
        assert_eq!(env_value("format", value).unwrap(), None);
    }

    #[test]
    fn given_malformed_value_when_reading_env_value_then_error_names_variable() {
        let value: Result<bool, ConfigError> = Err(ConfigError::Message("invalid type".to_string()));
        let err = env_value("skip_blank_lines", value).unwrap_err();
        assert!(err.to_string().contains("HIERTREE_SKIP_BLANK_LINES"));
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings {
            format: OutputFormat::Tree,
            ..Settings::default()
        };
        let text = settings.to_toml().unwrap();
        assert!(text.contains("format = \"tree\""));
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
