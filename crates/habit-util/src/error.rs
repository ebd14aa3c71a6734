//! Error types for the habit tracker

use thiserror::Error;

use crate::HabitId;

/// Core error type for habit tracker operations
#[derive(Debug, Error)]
pub enum HabitError {
    #[error("Habit not found: {0}")]
    HabitNotFound(HabitId),

    #[error("No active session")]
    NoActiveSession,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl HabitError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, HabitError>;
