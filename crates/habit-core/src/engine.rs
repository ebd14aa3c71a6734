//! Session state manager
//!
//! The engine owns the in-memory copy of the user's data and writes every
//! mutation through to the store before returning. Front ends hold the
//! engine and call into it; there is no global state.

use chrono::NaiveDate;
use habit_api::{
    Habit, HabitCompletion, HabitDraft, HabitPatch, HabitStats, NotificationSettings, SortBy,
    User, ViewPeriod,
};
use habit_config::Settings;
use habit_store::{Collections, Store};
use habit_util::{DayBoundary, HabitError, HabitId, Result, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    apply_patch, compute_stats, compute_streak, completions_in_period, new_habit, remove_habit,
    sort_habits, toggle_completion, ActiveSession, SessionState, ToggleOutcome,
};

/// The habit tracker's state container
pub struct HabitEngine {
    collections: Collections,
    day_boundary: DayBoundary,
    login_delay: Duration,
    default_notifications: NotificationSettings,
    session: Option<ActiveSession>,
    sort_by: SortBy,
    view_period: ViewPeriod,
}

impl HabitEngine {
    /// Create an engine over a store. If a user is already persisted the
    /// engine starts logged in with that user's data loaded.
    pub fn new(settings: &Settings, store: Arc<dyn Store>) -> Self {
        let mut engine = Self {
            collections: Collections::new(store),
            day_boundary: settings.app.day_boundary,
            login_delay: settings.app.login_delay,
            default_notifications: settings.default_notifications.clone(),
            session: None,
            sort_by: settings.app.default_sort,
            view_period: settings.app.default_view,
        };

        if let Some(user) = engine.collections.user() {
            info!(user_id = %user.id, "Restoring persisted session");
            engine.start_session(user);
        } else {
            debug!("No persisted user, starting logged out");
        }

        engine
    }

    // Session lifecycle

    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Log in. Any credentials are accepted; the user is fabricated with the
    /// local part of the email as its name.
    pub async fn login(&mut self, email: &str, _password: &str) -> User {
        self.simulate_delay().await;

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = fabricate_user(email, name);
        info!(user_id = %user.id, "Logged in");
        self.start_session(user.clone());
        user
    }

    /// Sign up. Always succeeds; the user is fabricated from the given name.
    pub async fn signup(&mut self, email: &str, _password: &str, name: &str) -> User {
        self.simulate_delay().await;

        let user = fabricate_user(email, name.to_string());
        info!(user_id = %user.id, "Signed up");
        self.start_session(user.clone());
        user
    }

    /// Drop the in-memory state and forget the persisted user. Habits and
    /// completions stay in the store.
    pub fn logout(&mut self) {
        self.collections.remove_user();
        if let Some(session) = self.session.take() {
            info!(user_id = %session.user.id, "Logged out");
        }
    }

    /// Reload habits and completions from the store
    pub fn refresh(&mut self) {
        let habits = self.collections.habits();
        let completions = self.collections.completions();
        if let Some(session) = self.session.as_mut() {
            session.habits = habits;
            session.completions = completions;
            debug!(
                habits = session.habits.len(),
                completions = session.completions.len(),
                "Session data refreshed"
            );
        }
    }

    async fn simulate_delay(&self) {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }
    }

    fn start_session(&mut self, user: User) {
        self.collections.set_user(&user);
        let habits = self.collections.habits();
        let completions = self.collections.completions();
        debug!(
            habits = habits.len(),
            completions = completions.len(),
            "Session data loaded"
        );
        self.session = Some(ActiveSession::new(user, habits, completions));
    }

    fn session_mut(&mut self) -> Result<&mut ActiveSession> {
        self.session.as_mut().ok_or(HabitError::NoActiveSession)
    }

    // Read-only accessors

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// All habits, archived included; empty when logged out
    pub fn habits(&self) -> &[Habit] {
        self.session.as_ref().map(|s| s.habits.as_slice()).unwrap_or(&[])
    }

    /// All completions; empty when logged out
    pub fn completions(&self) -> &[HabitCompletion] {
        self.session
            .as_ref()
            .map(|s| s.completions.as_slice())
            .unwrap_or(&[])
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.session.as_ref().and_then(|s| s.habit(habit_id))
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// Today's day key under the configured boundary
    pub fn today(&self) -> NaiveDate {
        habit_util::today(self.day_boundary)
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    pub fn view_period(&self) -> ViewPeriod {
        self.view_period
    }

    pub fn set_view_period(&mut self, period: ViewPeriod) {
        self.view_period = period;
    }

    // Habit mutations

    pub fn add_habit(&mut self, draft: HabitDraft) -> Result<Habit> {
        let session = self.session_mut()?;
        let habit = new_habit(draft, session.user_id(), habit_util::now_utc())?;
        session.habits.push(habit.clone());

        self.collections.set_habits(self.habits());
        info!(habit_id = %habit.id, name = %habit.name, "Habit added");
        Ok(habit)
    }

    /// Merge `patch` into a habit. Returns `None` when no such habit exists.
    pub fn update_habit(&mut self, habit_id: &HabitId, patch: HabitPatch) -> Result<Option<Habit>> {
        let session = self.session_mut()?;
        let Some(habit) = session.habit_mut(habit_id) else {
            debug!(habit_id = %habit_id, "Update for unknown habit ignored");
            return Ok(None);
        };

        apply_patch(habit, patch, habit_util::now_utc())?;
        let updated = habit.clone();

        self.collections.set_habits(self.habits());
        info!(habit_id = %habit_id, "Habit updated");
        Ok(Some(updated))
    }

    pub fn archive_habit(&mut self, habit_id: &HabitId) -> Result<Option<Habit>> {
        self.update_habit(habit_id, HabitPatch::archived(true))
    }

    pub fn unarchive_habit(&mut self, habit_id: &HabitId) -> Result<Option<Habit>> {
        self.update_habit(habit_id, HabitPatch::archived(false))
    }

    /// Delete a habit and its completions. Returns whether it existed.
    ///
    /// Habits and completions are written separately; an interruption
    /// between the two writes leaves orphaned completions in the store.
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<bool> {
        let session = self.session_mut()?;
        let existed = remove_habit(&mut session.habits, &mut session.completions, habit_id);
        if !existed {
            debug!(habit_id = %habit_id, "Delete for unknown habit ignored");
            return Ok(false);
        }

        self.collections.set_habits(self.habits());
        self.collections.set_completions(self.completions());
        info!(habit_id = %habit_id, "Habit deleted");
        Ok(true)
    }

    // Completions

    /// Mark the habit done on `date`, or undo it if it already was.
    pub fn toggle_habit_completion(&mut self, habit_id: &HabitId, date: NaiveDate) -> Result<ToggleOutcome> {
        let session = self.session_mut()?;
        if session.habit(habit_id).is_none() {
            return Err(HabitError::HabitNotFound(habit_id.clone()));
        }

        let user_id: UserId = session.user_id().clone();
        let outcome = toggle_completion(
            &mut session.completions,
            habit_id,
            &user_id,
            date,
            habit_util::now_utc(),
        );

        self.collections.set_completions(self.completions());
        info!(
            habit_id = %habit_id,
            date = %habit_util::format_date(date),
            completed = outcome.is_completed(),
            "Completion toggled"
        );
        Ok(outcome)
    }

    pub fn is_completed_on(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        crate::is_completed_on(self.completions(), habit_id, date)
    }

    // Derived views

    pub fn habit_streak(&self, habit_id: &HabitId) -> u32 {
        compute_streak(self.completions(), habit_id, self.today())
    }

    /// Active habits in the current sort order
    pub fn sorted_habits(&self) -> Vec<&Habit> {
        self.sorted_habits_by(self.sort_by)
    }

    pub fn sorted_habits_by(&self, sort_by: SortBy) -> Vec<&Habit> {
        sort_habits(self.habits(), self.completions(), sort_by, self.today())
    }

    /// Completions of a habit within the current view period
    pub fn completions_in_view(&self, habit_id: &HabitId) -> usize {
        completions_in_period(self.completions(), habit_id, self.view_period, self.today())
    }

    pub fn stats(&self) -> HabitStats {
        compute_stats(self.habits(), self.completions(), self.today())
    }

    // Notification settings

    /// Stored settings, or the configured defaults
    pub fn notification_settings(&self) -> NotificationSettings {
        self.collections
            .notification_settings(&self.default_notifications)
    }

    /// Validate, normalize and store notification settings
    pub fn set_notification_settings(&mut self, mut settings: NotificationSettings) -> Result<NotificationSettings> {
        if let Some(day) = settings.days.iter().find(|d| **d > 6) {
            return Err(HabitError::validation(format!(
                "weekday index {} out of range (0-6, 0 = Sunday)",
                day
            )));
        }
        settings.days.sort_unstable();
        settings.days.dedup();

        self.collections.set_notification_settings(&settings);
        info!(
            enabled = settings.enabled,
            time = %settings.time,
            "Notification settings saved"
        );
        Ok(settings)
    }
}

fn fabricate_user(email: &str, name: String) -> User {
    User {
        id: UserId::generate(),
        email: email.to_string(),
        name,
        created_at: habit_util::now_utc(),
    }
}
