//! Configuration parsing and validation for the habit tracker
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Day boundary policy, login delay, default view preferences
//! - Notification defaults
//! - Validation with clear error messages

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration, falling back to built-in defaults when the file
/// does not exist. Any other failure is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    load_config(path)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_api::{SortBy, ViewPeriod};
    use habit_util::DayBoundary;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let settings = parse_config("config_version = 1").unwrap();
        assert_eq!(settings.app.day_boundary, DayBoundary::Local);
        assert_eq!(settings.app.login_delay, DEFAULT_LOGIN_DELAY);
        assert_eq!(settings.app.default_sort, SortBy::Date);
        assert!(!settings.default_notifications.enabled);
    }

    #[test]
    fn parse_full_config() {
        let config = r#"
            config_version = 1

            [app]
            data_dir = "/tmp/habit-test"
            day_boundary = "utc"
            login_delay_ms = 0
            default_sort = "frequency"
            default_view = "month"

            [notifications]
            enabled = true
            time = "21:00"
            days = [6, 0, 0]
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.app.data_dir, std::path::PathBuf::from("/tmp/habit-test"));
        assert_eq!(settings.app.day_boundary, DayBoundary::Utc);
        assert_eq!(settings.app.login_delay, Duration::ZERO);
        assert_eq!(settings.app.default_sort, SortBy::Frequency);
        assert_eq!(settings.app.default_view, ViewPeriod::Month);
        assert!(settings.default_notifications.enabled);
        assert_eq!(settings.default_notifications.time.to_string(), "21:00");
        assert_eq!(settings.default_notifications.days, vec![0, 6]);
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_values() {
        let config = r#"
            config_version = 1

            [app]
            day_boundary = "sometimes"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_config_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.app.login_delay, DEFAULT_LOGIN_DELAY);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_version = 1\n[app]\nlogin_delay_ms = 10\n").unwrap();

        let settings = load_config(&path).unwrap();
        assert_eq!(settings.app.login_delay, Duration::from_millis(10));
    }
}
