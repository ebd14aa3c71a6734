//! Logged-in session state

use habit_api::{Habit, HabitCompletion, User};
use habit_util::{HabitId, UserId};

/// What the engine holds while a user is logged in
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub user: User,
    pub habits: Vec<Habit>,
    pub completions: Vec<HabitCompletion>,
}

impl ActiveSession {
    pub fn new(user: User, habits: Vec<Habit>, completions: Vec<HabitCompletion>) -> Self {
        Self {
            user,
            habits,
            completions,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == habit_id)
    }

    pub fn habit_mut(&mut self, habit_id: &HabitId) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| &h.id == habit_id)
    }
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}
