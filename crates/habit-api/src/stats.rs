//! Statistics views

use chrono::NaiveDate;
use habit_util::HabitId;
use serde::{Deserialize, Serialize};

/// Dashboard summary over the active habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    /// Completions recorded for today
    pub today_completions: usize,
    /// Habits that are not archived
    pub total_active_habits: usize,
    /// Rounded percentage of active habits done today
    pub completion_rate: u32,
    /// Longest current streak over all habits
    pub longest_streak: u32,
    /// All completions ever recorded
    pub total_completions: usize,
    /// Completions per day for the last seven days, oldest first
    pub last_seven_days: Vec<DailyCount>,
    /// Up to five active habits with the most completions
    pub top_habits: Vec<TopHabit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub completions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHabit {
    pub habit_id: HabitId,
    pub name: String,
    pub color: String,
    pub completions: usize,
    pub streak: u32,
}
