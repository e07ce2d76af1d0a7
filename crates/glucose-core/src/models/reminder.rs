//! Measurement and medication reminders.

use serde::{Deserialize, Serialize};

use super::reading::DEFAULT_USER_ID;

/// A scheduled reminder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    /// Local UUID
    pub id: String,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    /// Kind of reminder (e.g. "اندازه‌گیری" for a measurement)
    pub reminder_type: String,
    /// Time of day, `HH:MM`
    pub scheduled_time: String,
    /// Recurrence (e.g. "روزانه" for daily)
    pub frequency: String,
    pub is_active: bool,
    pub created_at: String,
}

impl Reminder {
    /// Create an active daily measurement reminder.
    pub fn new(title: String, scheduled_time: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID,
            title,
            message: String::new(),
            reminder_type: "اندازه‌گیری".into(),
            scheduled_time,
            frequency: "روزانه".into(),
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
