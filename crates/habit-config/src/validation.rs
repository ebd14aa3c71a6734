//! Configuration validation

use crate::schema::{RawConfig, RawNotifications};
use habit_api::{SortBy, ViewPeriod};
use habit_util::{DayBoundary, WallClock};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Invalid time format '{value}': {message}")]
    InvalidTimeFormat { value: String, message: String },

    #[error("Invalid weekday index {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u32),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(value) = &config.app.day_boundary
        && let Err(message) = value.parse::<DayBoundary>()
    {
        errors.push(invalid("app.day_boundary", value, message));
    }

    if let Some(value) = &config.app.default_sort
        && let Err(message) = value.parse::<SortBy>()
    {
        errors.push(invalid("app.default_sort", value, message));
    }

    if let Some(value) = &config.app.default_view
        && let Err(message) = value.parse::<ViewPeriod>()
    {
        errors.push(invalid("app.default_view", value, message));
    }

    if let Some(notifications) = &config.notifications {
        errors.extend(validate_notifications(notifications));
    }

    errors
}

fn validate_notifications(notifications: &RawNotifications) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(time) = &notifications.time
        && let Err(message) = parse_time(time)
    {
        errors.push(ValidationError::InvalidTimeFormat {
            value: time.clone(),
            message,
        });
    }

    if let Some(days) = &notifications.days {
        for &day in days {
            if day > 6 {
                errors.push(ValidationError::InvalidWeekday(day));
            }
        }
    }

    errors
}

fn invalid(field: &str, value: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message,
    }
}

/// Parse HH:MM time format
pub fn parse_time(s: &str) -> Result<WallClock, String> {
    s.parse()
}

/// Normalize weekday indices: drop out-of-range values, sort, dedupe
pub fn normalize_days(days: &[u32]) -> Vec<u8> {
    let mut out: Vec<u8> = days.iter().filter(|d| **d <= 6).map(|d| *d as u8).collect();
    out.sort_unstable();
    out.dedup();
    out
}
