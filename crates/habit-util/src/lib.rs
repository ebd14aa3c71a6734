//! Shared utilities for the habit tracker
//!
//! This crate provides:
//! - ID types (UserId, HabitId, CompletionId) and the id generator
//! - Time utilities (day keys, day boundary policy, mock time)
//! - Error types
//! - Default paths for data and config

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
