//! Streak computation

use chrono::NaiveDate;
use habit_api::HabitCompletion;
use habit_util::HabitId;

/// Count consecutive completed days for a habit, ending today or yesterday.
///
/// The walk is anchored at `today` when the habit was done today, otherwise
/// at yesterday when it was done yesterday; anything older means the streak
/// is broken. From the anchor it steps back one day at a time and stops at
/// the first day without a completion. Completions dated after `today` are
/// ignored.
pub fn compute_streak(completions: &[HabitCompletion], habit_id: &HabitId, today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = completions
        .iter()
        .filter(|c| &c.habit_id == habit_id && c.date <= today)
        .map(|c| c.date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let yesterday = today.pred_opt();
    let mut expected = match dates.first() {
        Some(&d) if d == today => today,
        Some(&d) if Some(d) == yesterday => d,
        _ => return 0,
    };

    let mut streak = 0;
    for date in dates {
        if date != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(prev) => expected = prev,
            None => break,
        }
    }

    streak
}
