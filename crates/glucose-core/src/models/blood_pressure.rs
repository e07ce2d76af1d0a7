//! Blood pressure reading model.

use serde::{Deserialize, Serialize};

use super::reading::DEFAULT_USER_ID;

/// A systolic/diastolic measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureReading {
    /// Local UUID
    pub id: String,
    pub user_id: i64,
    /// When the measurement was taken (RFC 3339)
    pub measured_at: String,
    /// Systolic pressure in mmHg (the higher number)
    pub systolic: i64,
    /// Diastolic pressure in mmHg (the lower number)
    pub diastolic: i64,
    /// Pulse in beats per minute
    pub pulse: Option<i64>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl BloodPressureReading {
    /// Create a reading measured now.
    pub fn new(systolic: i64, diastolic: i64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID,
            measured_at: now.clone(),
            systolic,
            diastolic,
            pulse: None,
            notes: None,
            created_at: now,
        }
    }
}
