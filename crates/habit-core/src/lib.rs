//! Domain operations and session state manager for the habit tracker
//!
//! This crate contains:
//! - Streak computation over a habit's completions
//! - Habit list views (sorting, view periods) and statistics
//! - Pure record operations (create, patch, toggle, cascade delete)
//! - The engine: session state machine (LoggedOut <-> LoggedIn) that mirrors
//!   every mutation to the store

mod engine;
mod ops;
mod session;
mod stats;
mod streak;
mod views;

pub use engine::*;
pub use ops::*;
pub use session::*;
pub use stats::*;
pub use streak::*;
pub use views::*;
