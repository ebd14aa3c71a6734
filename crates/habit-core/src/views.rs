//! Habit list views: active filtering, sorting and view periods

use chrono::{Duration, NaiveDate};
use habit_api::{Habit, HabitCompletion, SortBy, ViewPeriod};
use habit_util::HabitId;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::is_completed_on;

/// Habits that are not archived, in stored order
pub fn active_habits(habits: &[Habit]) -> Vec<&Habit> {
    habits.iter().filter(|h| !h.archived).collect()
}

/// Lowercased with diacritics stripped, so "Écrire" collates next to "ecrire"
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style name comparison: accent- and case-insensitive first, then
/// unaccented before accented, then lowercase before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Active habits ordered for display. All orderings are stable.
pub fn sort_habits<'a>(
    habits: &'a [Habit],
    completions: &[HabitCompletion],
    sort_by: SortBy,
    today: NaiveDate,
) -> Vec<&'a Habit> {
    let mut active = active_habits(habits);

    match sort_by {
        SortBy::Name => active.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::Date => active.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Frequency => active.sort_by_key(|h| h.frequency.rank()),
        SortBy::Status => {
            active.sort_by_key(|h| is_completed_on(completions, &h.id, today));
        }
    }

    active
}

/// Days covered by a view period ending today, oldest first
pub fn period_days(period: ViewPeriod, today: NaiveDate) -> Vec<NaiveDate> {
    (0..period.days() as i64)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Completions of a habit within a view period ending today
pub fn completions_in_period(
    completions: &[HabitCompletion],
    habit_id: &HabitId,
    period: ViewPeriod,
    today: NaiveDate,
) -> usize {
    let first = today - Duration::days(period.days() as i64 - 1);
    completions
        .iter()
        .filter(|c| &c.habit_id == habit_id && c.date >= first && c.date <= today)
        .count()
}
