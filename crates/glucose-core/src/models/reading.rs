//! Glucose reading models.

use serde::{Deserialize, Serialize};

/// Default user that owns readings when none is specified.
pub const DEFAULT_USER_ID: i64 = 1;

/// Storage format of [`Reading::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of [`Reading::time`].
pub const TIME_FORMAT: &str = "%H:%M";

/// Meal context of a reading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    Fasting,
    BeforeMeal,
    BeforeBreakfast,
    AfterBreakfast,
    BeforeLunch,
    AfterLunch,
    BeforeDinner,
    AfterDinner,
    BeforeSleep,
    Other,
    #[default]
    Unknown,
}

impl MealStatus {
    pub const ALL: [MealStatus; 11] = [
        MealStatus::Fasting,
        MealStatus::BeforeMeal,
        MealStatus::BeforeBreakfast,
        MealStatus::AfterBreakfast,
        MealStatus::BeforeLunch,
        MealStatus::AfterLunch,
        MealStatus::BeforeDinner,
        MealStatus::AfterDinner,
        MealStatus::BeforeSleep,
        MealStatus::Other,
        MealStatus::Unknown,
    ];

    /// Storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealStatus::Fasting => "fasting",
            MealStatus::BeforeMeal => "before_meal",
            MealStatus::BeforeBreakfast => "before_breakfast",
            MealStatus::AfterBreakfast => "after_breakfast",
            MealStatus::BeforeLunch => "before_lunch",
            MealStatus::AfterLunch => "after_lunch",
            MealStatus::BeforeDinner => "before_dinner",
            MealStatus::AfterDinner => "after_dinner",
            MealStatus::BeforeSleep => "before_sleep",
            MealStatus::Other => "other",
            MealStatus::Unknown => "unknown",
        }
    }

    /// Parse a storage key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == key)
    }

    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            MealStatus::Fasting => "ناشتا",
            MealStatus::BeforeMeal => "قبل از غذا",
            MealStatus::BeforeBreakfast => "قبل از صبحانه",
            MealStatus::AfterBreakfast => "بعد از صبحانه",
            MealStatus::BeforeLunch => "قبل از نهار",
            MealStatus::AfterLunch => "بعد از نهار",
            MealStatus::BeforeDinner => "قبل از شام",
            MealStatus::AfterDinner => "بعد از شام",
            MealStatus::BeforeSleep => "قبل از خواب",
            MealStatus::Other => "سایر",
            MealStatus::Unknown => "نامعلوم",
        }
    }
}

/// Self-reported mood at measurement time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excellent,
    Good,
    #[default]
    Neutral,
    Bad,
    VeryBad,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Excellent,
        Mood::Good,
        Mood::Neutral,
        Mood::Bad,
        Mood::VeryBad,
    ];

    /// Storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excellent => "excellent",
            Mood::Good => "good",
            Mood::Neutral => "neutral",
            Mood::Bad => "bad",
            Mood::VeryBad => "very_bad",
        }
    }

    /// Parse a storage key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mood| mood.as_str() == key)
    }

    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Excellent => "عالی",
            Mood::Good => "خوب",
            Mood::Neutral => "متوسط",
            Mood::Bad => "بد",
            Mood::VeryBad => "خیلی بد",
        }
    }
}

/// A single blood glucose measurement.
///
/// `date` and `time` are kept as text; rows whose text does not parse are
/// still stored and listed, and only dropped by predictor training.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Local UUID
    pub id: String,
    /// Owning user
    pub user_id: i64,
    /// Gregorian date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time, `HH:MM`
    pub time: String,
    /// Glucose level in mg/dL
    pub glucose_level: i64,
    /// Free-text note
    pub description: String,
    pub meal_status: MealStatus,
    pub mood: Mood,
    /// Stress on a 1-10 scale
    pub stress_level: i64,
    pub exercise_minutes: i64,
    pub sleep_hours: f64,
    /// Creation timestamp
    pub created_at: String,
}

impl Reading {
    /// Create a reading with default context (stress 5, no exercise, 8h sleep).
    pub fn new(date: String, time: String, glucose_level: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID,
            date,
            time,
            glucose_level,
            description: String::new(),
            meal_status: MealStatus::default(),
            mood: Mood::default(),
            stress_level: 5,
            exercise_minutes: 0,
            sleep_hours: 8.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Glucose value as a float for analysis.
    pub fn value(&self) -> f64 {
        self.glucose_level as f64
    }

    /// Parsed date, if well-formed.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Hour of day taken from the text before the first `:`.
    ///
    /// The hour is not range-checked; `"25:10"` yields 25.
    pub fn hour(&self) -> Option<u32> {
        self.time.split(':').next()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reading_defaults() {
        let reading = Reading::new("2024-03-01".into(), "08:30".into(), 120);
        assert_eq!(reading.user_id, DEFAULT_USER_ID);
        assert_eq!(reading.stress_level, 5);
        assert_eq!(reading.exercise_minutes, 0);
        assert_eq!(reading.sleep_hours, 8.0);
        assert_eq!(reading.meal_status, MealStatus::Unknown);
        assert_eq!(reading.mood, Mood::Neutral);
        assert_eq!(reading.id.len(), 36); // UUID format
    }

    #[test]
    fn test_hour_parsing() {
        let mut reading = Reading::new("2024-03-01".into(), "08:30".into(), 120);
        assert_eq!(reading.hour(), Some(8));

        reading.time = "23".into();
        assert_eq!(reading.hour(), Some(23));

        reading.time = "noon".into();
        assert_eq!(reading.hour(), None);
    }

    #[test]
    fn test_date_parsing() {
        let mut reading = Reading::new("2024-03-01".into(), "08:30".into(), 120);
        assert!(reading.parsed_date().is_some());

        reading.date = "1402/12/11".into();
        assert!(reading.parsed_date().is_none());
    }

    #[test]
    fn test_storage_keys_round_trip() {
        for status in MealStatus::ALL {
            assert_eq!(MealStatus::from_key(status.as_str()), Some(status));
        }
        for mood in Mood::ALL {
            assert_eq!(Mood::from_key(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::from_key("ecstatic"), None);
    }
}
