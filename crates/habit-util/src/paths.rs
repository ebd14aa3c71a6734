//! Default paths for the habit tracker
//!
//! Paths are user-writable by default:
//! - Data: `$HABIT_DATA_DIR`, `$XDG_DATA_HOME/habit` or `~/.local/share/habit`
//! - Config: `$XDG_CONFIG_HOME/habit/config.toml` or `~/.config/habit/config.toml`

use std::path::{Path, PathBuf};

/// Environment variable for overriding the data directory
pub const HABIT_DATA_DIR_ENV: &str = "HABIT_DATA_DIR";

/// Database filename within the data directory
pub const DB_FILENAME: &str = "habit.db";

/// Application subdirectory name
const APP_DIR: &str = "habit";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$HABIT_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/habit` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/habit` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(HABIT_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking HABIT_DATA_DIR.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Path of the database inside a data directory
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_contains_app_dir() {
        let path = data_dir_without_env();
        assert!(path.to_string_lossy().contains("habit"));
    }

    #[test]
    fn config_path_is_toml() {
        let path = default_config_path();
        assert!(path.to_string_lossy().contains("habit"));
        assert_eq!(path.extension().unwrap(), "toml");
    }

    #[test]
    fn db_path_lives_in_data_dir() {
        let dir = PathBuf::from("/var/lib/habit");
        assert_eq!(db_path(&dir), PathBuf::from("/var/lib/habit/habit.db"));
    }
}
