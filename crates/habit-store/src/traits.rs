//! Store trait definitions

use std::fmt;

use crate::StoreResult;

/// The logical collections persisted by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    User,
    Habits,
    Completions,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::User,
        Collection::Habits,
        Collection::Completions,
        Collection::Notifications,
    ];

    /// Storage key of the collection
    pub fn key(&self) -> &'static str {
        match self {
            Collection::User => "habit_user",
            Collection::Habits => "habit_habits",
            Collection::Completions => "habit_completions",
            Collection::Notifications => "habit_notifications",
        }
    }

    /// Key holding the last unparseable value of the collection
    pub fn backup_key(&self) -> String {
        format!("{}_corrupt", self.key())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Durable string-keyed storage. Values are whole serialized blobs.
pub trait Store: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
