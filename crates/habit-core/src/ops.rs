//! Record operations on in-memory collections
//!
//! These functions never touch storage; the engine persists their results.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use habit_api::{is_valid_color, Habit, HabitCompletion, HabitDraft, HabitPatch};
use habit_util::{CompletionId, HabitError, HabitId, Result, UserId};

/// Result of toggling a (habit, day) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The day was not done; this completion now records it
    Completed(HabitCompletion),
    /// The day was done; its completion was removed
    Uncompleted(CompletionId),
}

impl ToggleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ToggleOutcome::Completed(_))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(HabitError::validation("habit name cannot be empty"));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<()> {
    if !is_valid_color(color) {
        return Err(HabitError::validation(format!(
            "color must be #RRGGBB, got '{}'",
            color
        )));
    }
    Ok(())
}

/// Build a new habit from user input
pub fn new_habit(draft: HabitDraft, user_id: &UserId, now: DateTime<Utc>) -> Result<Habit> {
    validate_name(&draft.name)?;
    validate_color(&draft.color)?;

    Ok(Habit {
        id: HabitId::generate(),
        user_id: user_id.clone(),
        name: draft.name.trim().to_string(),
        description: draft.description.filter(|d| !d.trim().is_empty()),
        frequency: draft.frequency,
        color: draft.color,
        icon: draft.icon,
        created_at: now,
        updated_at: now,
        archived: draft.archived,
    })
}

/// Next `updated_at` value: the current time, but always later than the
/// previous value.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::milliseconds(1);
    now.max(floor)
}

/// Merge a patch into a habit. The id never changes; `updated_at` is
/// refreshed even for an empty patch.
pub fn apply_patch(habit: &mut Habit, patch: HabitPatch, now: DateTime<Utc>) -> Result<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(color) = &patch.color {
        validate_color(color)?;
    }

    if let Some(name) = patch.name {
        habit.name = name.trim().to_string();
    }
    if let Some(description) = patch.description {
        habit.description = description.filter(|d| !d.trim().is_empty());
    }
    if let Some(frequency) = patch.frequency {
        habit.frequency = frequency;
    }
    if let Some(color) = patch.color {
        habit.color = color;
    }
    if let Some(icon) = patch.icon {
        habit.icon = icon;
    }
    if let Some(archived) = patch.archived {
        habit.archived = archived;
    }

    habit.updated_at = next_updated_at(habit.updated_at, now);
    Ok(())
}

/// Remove a habit and every completion that references it.
/// Returns whether the habit existed.
pub fn remove_habit(
    habits: &mut Vec<Habit>,
    completions: &mut Vec<HabitCompletion>,
    habit_id: &HabitId,
) -> bool {
    let before = habits.len();
    habits.retain(|h| &h.id != habit_id);
    completions.retain(|c| &c.habit_id != habit_id);
    habits.len() != before
}

/// Whether the habit has a completion on the given day
pub fn is_completed_on(completions: &[HabitCompletion], habit_id: &HabitId, date: NaiveDate) -> bool {
    completions
        .iter()
        .any(|c| &c.habit_id == habit_id && c.date == date)
}

/// Flip the done/not-done state of (habit, day).
///
/// When the day is already done every matching completion is removed, so
/// the pair is unique again even if the input held duplicates.
pub fn toggle_completion(
    completions: &mut Vec<HabitCompletion>,
    habit_id: &HabitId,
    user_id: &UserId,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> ToggleOutcome {
    let existing = completions
        .iter()
        .find(|c| &c.habit_id == habit_id && c.date == date)
        .map(|c| c.id.clone());

    match existing {
        Some(id) => {
            completions.retain(|c| !(&c.habit_id == habit_id && c.date == date));
            ToggleOutcome::Uncompleted(id)
        }
        None => {
            let completion = HabitCompletion {
                id: CompletionId::generate(),
                habit_id: habit_id.clone(),
                user_id: user_id.clone(),
                completed_at: now,
                date,
            };
            completions.push(completion.clone());
            ToggleOutcome::Completed(completion)
        }
    }
}
