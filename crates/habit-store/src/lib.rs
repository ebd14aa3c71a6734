//! Persistence layer for the habit tracker
//!
//! Four logical collections (user, habits, completions, notification
//! settings), each stored as one JSON blob under its own key. Every read
//! loads a whole collection; every write replaces one.
//!
//! Provides:
//! - The raw key-value [`Store`] trait and its SQLite implementation
//! - [`Collections`], a typed facade that never surfaces storage errors

mod collections;
mod sqlite;
mod traits;

pub use collections::*;
pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
