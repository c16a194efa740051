//! Configuration loading utilities

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tpulse_common::{LogFormat, LocationField, Result as TPulseResult};
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TPULSE_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// What was wrong with the value.
        message: String,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),
}

impl From<ConfigError> for tpulse_common::TPulseError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source(err.to_string(), err)
    }
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content, format)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration text without touching the environment.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from the conventional locations.
    ///
    /// Tries `$TPULSE_CONFIG_PATH`, then `config.yaml`, `config.yml` and
    /// `config.toml` in the working directory, then falls back to defaults.
    /// Environment overrides apply in every case.
    pub fn load() -> TPulseResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }
        for candidate in ["config.yaml", "config.yml", "config.toml"] {
            if Path::new(candidate).exists() {
                return Ok(Self::load_config(candidate)?);
            }
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TPulseResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `TPULSE_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup` instead of the process environment.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TPULSE_DATASET_PATH") {
            config.dataset.path = path.into();
        }
        if let Some(top_n) = parse_var(&lookup, "TPULSE_TOP_N")? {
            config.dashboard.top_n = top_n;
        }
        if let Some(location) = parse_var::<LocationField, _>(&lookup, "TPULSE_DEFAULT_LOCATION")? {
            config.dashboard.default_location = location;
        }
        if let Some(topic) = lookup("TPULSE_DEFAULT_TOPIC") {
            config.dashboard.default_topic = topic;
        }
        if let Some(color) = lookup("TPULSE_TOP_LOCATIONS_COLOR") {
            config.dashboard.top_locations_color = color;
        }
        if let Some(background) = lookup("TPULSE_BACKGROUND") {
            config.styling.background = background;
        }
        if let Some(width) = parse_var(&lookup, "TPULSE_RENDER_WIDTH")? {
            config.render.width = width;
        }
        if let Some(height) = parse_var(&lookup, "TPULSE_RENDER_HEIGHT")? {
            config.render.height = height;
        }
        if let Some(level) = lookup("TPULSE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("TPULSE_LOG_FORMAT") {
            config.logging.format = parse_log_format(&format)?;
        }
        if let Some(file) = lookup("TPULSE_LOG_FILE") {
            config.logging.file_path = Some(file).filter(|path| !path.is_empty());
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|err| ConfigError::EnvParseError {
                var: var.to_string(),
                message: err.to_string(),
            })
        })
        .transpose()
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" => Ok(LogFormat::Pretty),
        "compact" => Ok(LogFormat::Compact),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::EnvParseError {
            var: "TPULSE_LOG_FORMAT".to_string(),
            message: format!("unknown log format '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tpulse_common::ReliabilityCategory;

    fn create_test_config_file(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_valid_yaml_config() {
        let yaml = "dataset:\n  path: /data/tweets.json\ndashboard:\n  top_n: 3\n  default_location: city\n  reliability_order: [very_high, high, medium, low, very_low]\nlogging:\n  level: debug\n";
        let parsed = ConfigLoader::parse(yaml, ConfigFormat::Yaml).unwrap();

        assert_eq!(parsed.dataset.path, PathBuf::from("/data/tweets.json"));
        assert_eq!(parsed.dashboard.top_n, 3);
        assert_eq!(parsed.dashboard.default_location, LocationField::City);
        assert_eq!(
            parsed.dashboard.reliability_order[0],
            ReliabilityCategory::VeryHigh
        );
        assert_eq!(parsed.logging.level, "debug");
        assert_eq!(parsed.styling.background, "#f7f7f7");
    }

    #[test]
    fn test_load_toml_file() {
        let toml = "[dashboard]\ntop_n = 7\n\n[render]\nwidth = 640\nheight = 360\n";
        let file = create_test_config_file(toml, ".toml");
        let parsed = ConfigLoader::parse(
            &std::fs::read_to_string(file.path()).unwrap(),
            ConfigFormat::from_path(file.path()).unwrap(),
        )
        .unwrap();

        assert_eq!(parsed.dashboard.top_n, 7);
        assert_eq!(parsed.render.width, 640);
        assert_eq!(parsed.render.height, 360);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = ConfigLoader::parse("dashboard: [unclosed", ConfigFormat::Yaml);
        assert!(matches!(result.unwrap_err(), ConfigError::YamlError(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = create_test_config_file("{}", ".json");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/config.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_environment_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("TPULSE_DATASET_PATH", "/srv/posts.json"),
            ("TPULSE_TOP_N", "10"),
            ("TPULSE_DEFAULT_LOCATION", "city"),
            ("TPULSE_LOG_LEVEL", "trace"),
            ("TPULSE_LOG_FORMAT", "JSON"),
            ("TPULSE_RENDER_WIDTH", "1200"),
        ]);
        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(config.dataset.path, PathBuf::from("/srv/posts.json"));
        assert_eq!(config.dashboard.top_n, 10);
        assert_eq!(config.dashboard.default_location, LocationField::City);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.render.width, 1200);
    }

    #[test]
    fn test_env_parse_error() {
        let mut config = Config::default();
        let result = ConfigLoader::apply_overrides_from(
            &mut config,
            lookup_from(&[("TPULSE_TOP_N", "plenty")]),
        );
        match result.unwrap_err() {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "TPULSE_TOP_N"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_from_file() {
        let file = create_test_config_file("dashboard:\n  top_n: 0\n", ".yaml");
        let result = ConfigLoader::load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_config_error_converts_to_common_error() {
        let error: tpulse_common::TPulseError =
            ConfigError::ValidationError(vec!["bad".to_string()]).into();
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
