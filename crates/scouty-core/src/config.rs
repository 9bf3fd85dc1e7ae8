// Configuration loading and validation (scouty.toml).
//
// The file is optional: every section has built-in defaults. Lookup order is
// an explicit path, then ./scouty.toml, then the per-user config directory.

use crate::ingest::{IngestLimits, MAX_INPUT_BYTES, MAX_JSON_BYTES};
use crate::player::Skill;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working and user config directories.
pub const CONFIG_FILE_NAME: &str = "scouty.toml";

pub const WEEKS_RANGE: std::ops::RangeInclusive<u32> = 1..=52;
pub const MAX_PROMOTIONS_RANGE: std::ops::RangeInclusive<usize> = 1..=20;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: LimitsConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

/// Input size ceilings. May only tighten the built-in limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_input_bytes: u64,
    pub max_json_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_input_bytes: MAX_INPUT_BYTES,
            max_json_bytes: MAX_JSON_BYTES,
        }
    }
}

impl LimitsConfig {
    pub fn ingest_limits(&self) -> IngestLimits {
        IngestLimits {
            max_input_bytes: self.max_input_bytes,
            max_json_bytes: self.max_json_bytes,
        }
    }
}

/// Fallbacks for command options the user did not pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub training: Skill,
    pub weeks: u32,
    pub max_promotions: usize,
    pub last_n: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            training: Skill::Playmaking,
            weeks: 4,
            max_promotions: 3,
            last_n: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Resolve which config file to use, if any.
///
/// An explicit path must exist; the implicit locations are optional.
pub fn discover_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Ok(Some(local));
    }

    let user = directories::ProjectDirs::from("", "", "scouty")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .filter(|p| p.is_file());
    Ok(user)
}

/// Convenience wrapper: discover, load and validate, or fall back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match discover_config_path(explicit)? {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let limits: &[(&str, u64, u64)] = &[
        (
            "limits.max_input_bytes",
            config.limits.max_input_bytes,
            MAX_INPUT_BYTES,
        ),
        (
            "limits.max_json_bytes",
            config.limits.max_json_bytes,
            MAX_JSON_BYTES,
        ),
    ];
    for (name, val, ceiling) in limits {
        if *val == 0 || val > ceiling {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be between 1 and {ceiling}, got {val}"),
            });
        }
    }

    let d = &config.defaults;
    if !d.training.is_trainable() {
        return Err(ConfigError::ValidationError {
            field: "defaults.training".into(),
            message: format!("`{}` is not a trainable skill", d.training),
        });
    }
    if !WEEKS_RANGE.contains(&d.weeks) {
        return Err(ConfigError::ValidationError {
            field: "defaults.weeks".into(),
            message: format!("must be between 1 and 52, got {}", d.weeks),
        });
    }
    if !MAX_PROMOTIONS_RANGE.contains(&d.max_promotions) {
        return Err(ConfigError::ValidationError {
            field: "defaults.max_promotions".into(),
            message: format!("must be between 1 and 20, got {}", d.max_promotions),
        });
    }
    if d.last_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "defaults.last_n".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_file_yields_defaults() {
        let (_dir, path) = write_config("");
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.limits.max_input_bytes, MAX_INPUT_BYTES);
        assert_eq!(config.limits.max_json_bytes, MAX_JSON_BYTES);
        assert_eq!(config.defaults.training, Skill::Playmaking);
        assert_eq!(config.defaults.weeks, 4);
        assert_eq!(config.defaults.max_promotions, 3);
        assert_eq!(config.defaults.last_n, 5);
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let (_dir, path) = write_config(
            r#"
[limits]
max_input_bytes = 1048576

[defaults]
training = "scoring"
weeks = 8
max_promotions = 5

[logging]
filter = "scouty_core=debug"
"#,
        );
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.limits.max_input_bytes, 1_048_576);
        assert_eq!(config.limits.max_json_bytes, MAX_JSON_BYTES);
        assert_eq!(config.defaults.training, Skill::Scoring);
        assert_eq!(config.defaults.weeks, 8);
        assert_eq!(config.defaults.max_promotions, 5);
        assert_eq!(config.logging.filter.as_deref(), Some("scouty_core=debug"));
    }

    #[test]
    fn limits_cannot_exceed_ceiling() {
        let (_dir, path) = write_config("[limits]\nmax_json_bytes = 999999999\n");
        let err = load_config_from(&path).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "limits.max_json_bytes")
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn set_pieces_is_not_a_training_default() {
        let (_dir, path) = write_config("[defaults]\ntraining = \"set_pieces\"\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "defaults.training"
        ));
    }

    #[test]
    fn weeks_out_of_range_rejected() {
        let (_dir, path) = write_config("[defaults]\nweeks = 53\n");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn unknown_training_is_a_parse_error() {
        let (_dir, path) = write_config("[defaults]\ntraining = \"juggling\"\n");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = discover_config_path(Some(Path::new("/nope/scouty.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
