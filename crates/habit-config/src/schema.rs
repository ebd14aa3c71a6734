//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Application settings
    #[serde(default)]
    pub app: RawAppConfig,

    /// Notification defaults, used until the user stores their own
    #[serde(default)]
    pub notifications: Option<RawNotifications>,
}

/// Application-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAppConfig {
    /// Data directory for the store
    pub data_dir: Option<PathBuf>,

    /// "local" or "utc"
    pub day_boundary: Option<String>,

    /// Simulated login/signup delay in milliseconds
    pub login_delay_ms: Option<u64>,

    /// "name", "date", "frequency" or "status"
    pub default_sort: Option<String>,

    /// "day", "week" or "month"
    pub default_view: Option<String>,
}

/// Notification defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawNotifications {
    #[serde(default)]
    pub enabled: bool,

    /// HH:MM
    pub time: Option<String>,

    /// Weekday indices, 0 = Sunday
    pub days: Option<Vec<u32>>,
}
