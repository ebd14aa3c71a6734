//! Typed access to the persisted collections
//!
//! Storage problems never reach the caller: a failed or malformed read
//! behaves like an absent value and a failed write is dropped. Both are
//! logged. A malformed value is copied to the collection's backup key before
//! anything can overwrite it.

use habit_api::{Habit, HabitCompletion, NotificationSettings, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};

use crate::{Collection, Store};

/// Whole-collection reads and writes over a [`Store`]
#[derive(Clone)]
pub struct Collections {
    store: Arc<dyn Store>,
}

impl Collections {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Underlying raw store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Load a collection. Missing, unreadable and malformed values are `None`.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        let raw = match self.store.get(collection.key()) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(collection = %collection, error = %e, "Storage read failed, treating as empty");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(collection = %collection, error = %e, "Malformed stored value, treating as absent");
                self.back_up(collection, &raw);
                None
            }
        }
    }

    /// Copy a malformed value aside unless that exact value is already there
    fn back_up(&self, collection: Collection, raw: &str) {
        let backup_key = collection.backup_key();
        match self.store.get(&backup_key) {
            Ok(Some(existing)) if existing == raw => {}
            Ok(_) => {
                if let Err(e) = self.store.set(&backup_key, raw) {
                    warn!(collection = %collection, error = %e, "Failed to back up malformed value");
                } else {
                    warn!(collection = %collection, backup_key = %backup_key, "Malformed value backed up");
                }
            }
            Err(e) => {
                warn!(collection = %collection, error = %e, "Failed to check backup key");
            }
        }
    }

    /// Replace a collection. Failures are logged and dropped.
    pub fn set<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(collection = %collection, error = %e, "Failed to serialize collection, write dropped");
                return;
            }
        };

        if let Err(e) = self.store.set(collection.key(), &json) {
            warn!(collection = %collection, error = %e, "Storage write failed, write dropped");
        }
    }

    /// Delete a collection. Failures are logged and dropped.
    pub fn remove(&self, collection: Collection) {
        if let Err(e) = self.store.remove(collection.key()) {
            warn!(collection = %collection, error = %e, "Storage remove failed");
        }
    }

    // User

    pub fn user(&self) -> Option<User> {
        self.get(Collection::User)
    }

    pub fn set_user(&self, user: &User) {
        self.set(Collection::User, user);
    }

    pub fn remove_user(&self) {
        self.remove(Collection::User);
    }

    // Habits

    pub fn habits(&self) -> Vec<Habit> {
        self.get(Collection::Habits).unwrap_or_default()
    }

    pub fn set_habits(&self, habits: &[Habit]) {
        self.set(Collection::Habits, habits);
    }

    // Completions

    pub fn completions(&self) -> Vec<HabitCompletion> {
        self.get(Collection::Completions).unwrap_or_default()
    }

    pub fn set_completions(&self, completions: &[HabitCompletion]) {
        self.set(Collection::Completions, completions);
    }

    // Notification settings

    /// Stored settings, or `default` when nothing usable is stored
    pub fn notification_settings(&self, default: &NotificationSettings) -> NotificationSettings {
        self.get(Collection::Notifications)
            .unwrap_or_else(|| default.clone())
    }

    pub fn set_notification_settings(&self, settings: &NotificationSettings) {
        self.set(Collection::Notifications, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SqliteStore, StoreError, StoreResult};
    use chrono::{NaiveDate, TimeZone, Utc};
    use habit_api::Frequency;
    use habit_util::{CompletionId, HabitId, UserId, WallClock};

    /// A store whose medium is gone
    struct UnavailableStore;

    impl Store for UnavailableStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Database("storage disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Database("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Database("storage disabled".into()))
        }

        fn is_healthy(&self) -> bool {
            false
        }
    }

    fn collections() -> Collections {
        Collections::new(Arc::new(SqliteStore::in_memory().unwrap()))
    }

    fn habit(id: &str) -> Habit {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        Habit {
            id: HabitId::new(id),
            user_id: UserId::new("u1"),
            name: format!("habit {id}"),
            description: Some("desc".into()),
            frequency: Frequency::Weekly,
            color: "#0080FF".into(),
            icon: "book".into(),
            created_at: at,
            updated_at: at,
            archived: false,
        }
    }

    #[test]
    fn test_empty_collections() {
        let c = collections();
        assert!(c.user().is_none());
        assert!(c.habits().is_empty());
        assert!(c.completions().is_empty());
        assert_eq!(
            c.notification_settings(&NotificationSettings::default()),
            NotificationSettings::default()
        );
    }

    #[test]
    fn test_habits_read_back_equal() {
        let c = collections();
        let habits = vec![habit("a"), habit("b")];

        c.set_habits(&habits);
        assert_eq!(c.habits(), habits);
    }

    #[test]
    fn test_user_lifecycle() {
        let c = collections();
        let user = User {
            id: UserId::new("u1"),
            email: "ada@example.com".into(),
            name: "Ada".into(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap(),
        };

        c.set_user(&user);
        assert_eq!(c.user(), Some(user));

        c.remove_user();
        assert!(c.user().is_none());
    }

    #[test]
    fn test_completions_read_back_equal() {
        let c = collections();
        let completions = vec![HabitCompletion {
            id: CompletionId::new("c1"),
            habit_id: HabitId::new("a"),
            user_id: UserId::new("u1"),
            completed_at: Utc.with_ymd_and_hms(2025, 5, 2, 7, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        }];

        c.set_completions(&completions);
        assert_eq!(c.completions(), completions);
    }

    #[test]
    fn test_notification_settings_stored_over_default() {
        let c = collections();
        let stored = NotificationSettings {
            enabled: true,
            time: WallClock::new(20, 0).unwrap(),
            days: vec![1, 3],
        };

        c.set_notification_settings(&stored);
        assert_eq!(c.notification_settings(&NotificationSettings::default()), stored);
    }

    #[test]
    fn test_malformed_blob_is_absent() {
        let c = collections();
        c.store().set(Collection::Habits.key(), "{not json").unwrap();
        assert!(c.habits().is_empty());

        c.store().set(Collection::User.key(), "[1, 2]").unwrap();
        assert!(c.user().is_none());
    }

    #[test]
    fn test_malformed_blob_survives_overwrite() {
        let c = collections();
        let raw = r#"[{"id":"a","name":"Run"}]"#;
        c.store().set(Collection::Habits.key(), raw).unwrap();

        assert!(c.habits().is_empty());
        c.set_habits(&[habit("b")]);

        assert_eq!(c.habits(), vec![habit("b")]);
        let backup = c.store().get(&Collection::Habits.backup_key()).unwrap();
        assert_eq!(backup.as_deref(), Some(raw));
    }

    #[test]
    fn test_unavailable_store_degrades_silently() {
        let c = Collections::new(Arc::new(UnavailableStore));

        c.set_habits(&[habit("a")]);
        assert!(c.habits().is_empty());
        assert!(c.user().is_none());
        c.remove_user();
    }

    #[test]
    fn test_collection_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 4);
    }
}
