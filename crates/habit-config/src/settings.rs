//! Validated settings

use crate::schema::{RawAppConfig, RawConfig, RawNotifications};
use crate::validation::{normalize_days, parse_time};
use habit_api::{NotificationSettings, SortBy, ViewPeriod};
use habit_util::DayBoundary;
use std::path::PathBuf;
use std::time::Duration;

/// Default simulated login/signup delay
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(500);

/// Validated settings ready for use by the core
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub app: AppConfig,

    /// Returned when no notification settings have been stored yet
    pub default_notifications: NotificationSettings,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            app: AppConfig::from_raw(raw.app),
            default_notifications: raw
                .notifications
                .map(convert_notifications)
                .unwrap_or_default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub day_boundary: DayBoundary,
    pub login_delay: Duration,
    pub default_sort: SortBy,
    pub default_view: ViewPeriod,
}

impl AppConfig {
    fn from_raw(raw: RawAppConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(habit_util::default_data_dir),
            day_boundary: raw
                .day_boundary
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            login_delay: raw
                .login_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_LOGIN_DELAY),
            default_sort: raw
                .default_sort
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            default_view: raw
                .default_view
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: habit_util::default_data_dir(),
            day_boundary: DayBoundary::default(),
            login_delay: DEFAULT_LOGIN_DELAY,
            default_sort: SortBy::default(),
            default_view: ViewPeriod::default(),
        }
    }
}

fn convert_notifications(raw: RawNotifications) -> NotificationSettings {
    let defaults = NotificationSettings::default();
    NotificationSettings {
        enabled: raw.enabled,
        time: raw
            .time
            .and_then(|t| parse_time(&t).ok())
            .unwrap_or(defaults.time),
        days: raw
            .days
            .map(|d| normalize_days(&d))
            .unwrap_or(defaults.days),
    }
}
