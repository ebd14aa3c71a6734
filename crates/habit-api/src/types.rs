//! Persisted records and view preferences
//!
//! Records serialize in camelCase; this is the layout of the stored JSON
//! blobs.

use chrono::{DateTime, NaiveDate, Utc};
use habit_util::{CompletionId, HabitId, UserId, WallClock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The local user. Fabricated at login/signup; there is no credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// How often a habit is meant to be done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Fixed ordering used when sorting by frequency
    pub fn rank(&self) -> u8 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::Monthly => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
}

/// "Habit X was done on day D". At most one per (habit, day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    /// Calendar day key, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Reminder configuration for the installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub time: WallClock,
    /// Weekday indices, 0 = Sunday
    pub days: Vec<u8>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            time: WallClock { hour: 9, minute: 0 },
            days: (0..7).collect(),
        }
    }
}

/// Fields supplied by the user when creating a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub color: String,
    pub icon: String,
    pub archived: bool,
}

impl HabitDraft {
    /// A draft with the default color and icon
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            name: name.into(),
            description: None,
            frequency,
            color: crate::DEFAULT_COLOR.to_string(),
            icon: crate::DEFAULT_ICON.to_string(),
            archived: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Partial update for a habit. `None` leaves a field untouched;
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub archived: Option<bool>,
}

impl HabitPatch {
    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Ordering of the habit list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Name,
    /// Newest first
    #[default]
    Date,
    Frequency,
    /// Not yet done today first
    Status,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "date" => Ok(SortBy::Date),
            "frequency" => Ok(SortBy::Frequency),
            "status" => Ok(SortBy::Status),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Display granularity. Does not affect stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewPeriod {
    /// Number of calendar days the period covers, ending today
    pub fn days(&self) -> u32 {
        match self {
            ViewPeriod::Day => 1,
            ViewPeriod::Week => 7,
            ViewPeriod::Month => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPeriod::Day => "day",
            ViewPeriod::Week => "week",
            ViewPeriod::Month => "month",
        }
    }
}

impl FromStr for ViewPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(ViewPeriod::Day),
            "week" => Ok(ViewPeriod::Week),
            "month" => Ok(ViewPeriod::Month),
            other => Err(format!("Unknown view period: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_habit() -> Habit {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        Habit {
            id: HabitId::new("h1"),
            user_id: UserId::new("u1"),
            name: "Run".into(),
            description: None,
            frequency: Frequency::Daily,
            color: "#DC0000".into(),
            icon: "flame".into(),
            created_at: at,
            updated_at: at,
            archived: false,
        }
    }

    #[test]
    fn habit_serializes_camel_case() {
        let json = serde_json::to_value(sample_habit()).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["frequency"], "daily");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn completion_date_is_day_key() {
        let completion = HabitCompletion {
            id: CompletionId::new("c1"),
            habit_id: HabitId::new("h1"),
            user_id: UserId::new("u1"),
            completed_at: Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        };
        let json = serde_json::to_value(&completion).unwrap();
        assert_eq!(json["date"], "2025-01-02");
        assert_eq!(json["habitId"], "h1");
    }

    #[test]
    fn archived_defaults_to_false_when_missing() {
        let mut json = serde_json::to_value(sample_habit()).unwrap();
        json.as_object_mut().unwrap().remove("archived");
        let habit: Habit = serde_json::from_value(json).unwrap();
        assert!(!habit.archived);
    }

    #[test]
    fn notification_defaults() {
        let settings = NotificationSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.time.to_string(), "09:00");
        assert_eq!(settings.days, vec![0, 1, 2, 3, 4, 5, 6]);

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["time"], "09:00");
    }

    #[test]
    fn frequency_rank_order() {
        assert!(Frequency::Daily.rank() < Frequency::Weekly.rank());
        assert!(Frequency::Weekly.rank() < Frequency::Monthly.rank());
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn view_and_sort_defaults() {
        assert_eq!(SortBy::default(), SortBy::Date);
        assert_eq!(ViewPeriod::default(), ViewPeriod::Day);
        assert_eq!(ViewPeriod::Week.days(), 7);
        assert_eq!("status".parse::<SortBy>().unwrap(), SortBy::Status);
    }

    #[test]
    fn patch_emptiness() {
        assert!(HabitPatch::default().is_empty());
        assert!(!HabitPatch::archived(true).is_empty());
    }
}
