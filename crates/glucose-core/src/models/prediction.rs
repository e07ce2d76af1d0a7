//! Stored predictor output.

use serde::{Deserialize, Serialize};

/// A prediction logged for later display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    /// Local UUID
    pub id: String,
    pub user_id: i64,
    /// Date the prediction applies to, `YYYY-MM-DD`
    pub prediction_date: String,
    /// Hour of day the prediction applies to
    pub hour: i64,
    pub predicted_glucose: f64,
    pub confidence: f64,
    pub created_at: String,
}

impl PredictionRecord {
    pub fn new(
        user_id: i64,
        prediction_date: String,
        hour: i64,
        predicted_glucose: f64,
        confidence: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            prediction_date,
            hour,
            predicted_glucose,
            confidence,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
