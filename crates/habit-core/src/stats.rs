//! Dashboard statistics

use chrono::{Duration, NaiveDate};
use habit_api::{DailyCount, Habit, HabitCompletion, HabitStats, TopHabit};

use crate::{active_habits, compute_streak};

/// How many habits the top list holds
pub const TOP_HABITS_LIMIT: usize = 5;

/// Rounded percentage, half up; zero when there is nothing to divide by
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part * 200 + whole) / (whole * 2)) as u32
}

pub fn compute_stats(habits: &[Habit], completions: &[HabitCompletion], today: NaiveDate) -> HabitStats {
    let active = active_habits(habits);

    let today_completions = completions
        .iter()
        .filter(|c| c.date == today && active.iter().any(|h| h.id == c.habit_id))
        .count();

    let longest_streak = habits
        .iter()
        .map(|h| compute_streak(completions, &h.id, today))
        .max()
        .unwrap_or(0);

    let last_seven_days = (0..7)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DailyCount {
                date,
                completions: completions.iter().filter(|c| c.date == date).count(),
            }
        })
        .collect();

    let mut top_habits: Vec<TopHabit> = active
        .iter()
        .map(|h| TopHabit {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            color: h.color.clone(),
            completions: completions.iter().filter(|c| c.habit_id == h.id).count(),
            streak: compute_streak(completions, &h.id, today),
        })
        .collect();
    top_habits.sort_by(|a, b| b.completions.cmp(&a.completions));
    top_habits.truncate(TOP_HABITS_LIMIT);

    HabitStats {
        today_completions,
        total_active_habits: active.len(),
        completion_rate: percent(today_completions, active.len()),
        longest_streak,
        total_completions: completions.len(),
        last_seven_days,
        top_habits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use habit_api::Frequency;
    use habit_util::{CompletionId, HabitId, UserId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    fn habit(id: &str) -> Habit {
        let at = Utc.with_ymd_and_hms(2025, 8, 1, 8, 0, 0).unwrap();
        Habit {
            id: HabitId::new(id),
            user_id: UserId::new("u1"),
            name: id.to_uppercase(),
            description: None,
            frequency: Frequency::Daily,
            color: "#FFC500".into(),
            icon: "zap".into(),
            created_at: at,
            updated_at: at,
            archived: false,
        }
    }

    fn done(habit: &str, days_ago: i64) -> HabitCompletion {
        HabitCompletion {
            id: CompletionId::new(format!("{habit}{days_ago}")),
            habit_id: HabitId::new(habit),
            user_id: UserId::new("u1"),
            completed_at: Utc.with_ymd_and_hms(2025, 8, 20, 8, 0, 0).unwrap(),
            date: today() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn test_empty_stats() {
        let stats = compute_stats(&[], &[], today());
        assert_eq!(stats.total_active_habits, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.longest_streak, 0);
        assert_eq!(stats.last_seven_days.len(), 7);
        assert!(stats.top_habits.is_empty());
    }

    #[test]
    fn test_stats_summary() {
        let mut habits = vec![habit("a"), habit("b"), habit("c"), habit("z")];
        habits[3].archived = true;

        let completions = vec![
            done("a", 0),
            done("a", 1),
            done("a", 2),
            done("b", 1),
            done("z", 0),
            done("z", 1),
            done("z", 2),
            done("z", 3),
        ];

        let stats = compute_stats(&habits, &completions, today());
        assert_eq!(stats.total_active_habits, 3);
        assert_eq!(stats.today_completions, 1);
        assert_eq!(stats.completion_rate, 33);
        // Archived habits still count toward the longest streak
        assert_eq!(stats.longest_streak, 4);
        assert_eq!(stats.total_completions, 8);

        let last = stats.last_seven_days.last().unwrap();
        assert_eq!(last.date, today());
        assert_eq!(last.completions, 2);
        assert_eq!(stats.last_seven_days[0].date, today() - Duration::days(6));

        let top: Vec<_> = stats.top_habits.iter().map(|t| t.habit_id.to_string()).collect();
        assert_eq!(top, vec!["a", "b", "c"]);
        assert_eq!(stats.top_habits[0].streak, 3);
        assert_eq!(stats.top_habits[1].streak, 1);
    }

    #[test]
    fn test_top_habits_limited() {
        let habits: Vec<_> = (0..8).map(|i| habit(&format!("h{i}"))).collect();
        let stats = compute_stats(&habits, &[], today());
        assert_eq!(stats.top_habits.len(), TOP_HABITS_LIMIT);
    }
}
