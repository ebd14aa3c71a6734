//! Data model for the habit tracker
//!
//! This crate defines the shapes shared by the store, the core and the
//! front end:
//! - Persisted records (User, Habit, HabitCompletion, NotificationSettings)
//! - Inputs for creating and editing habits
//! - View preferences and statistics views

mod presets;
mod stats;
mod types;

pub use presets::*;
pub use stats::*;
pub use types::*;
