//! Prediction log database operations.

use chrono::{Days, Local, NaiveDate};
use rusqlite::params;

use super::{Database, DbResult};
use crate::models::{PredictionRecord, DATE_FORMAT};

impl Database {
    /// Log a prediction.
    pub fn insert_prediction(&self, record: &PredictionRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO predictions (
                id, user_id, prediction_date, hour, predicted_glucose, confidence, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.id,
                record.user_id,
                record.prediction_date,
                record.hour,
                record.predicted_glucose,
                record.confidence,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// Predictions dated within the last `days` days, newest first.
    pub fn fetch_recent_predictions(&self, days: u32, user_id: i64) -> DbResult<Vec<PredictionRecord>> {
        let cutoff = Local::now()
            .date_naive()
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        self.fetch_predictions_since(cutoff, user_id)
    }

    /// Predictions dated on or after `cutoff`, newest first.
    pub fn fetch_predictions_since(
        &self,
        cutoff: NaiveDate,
        user_id: i64,
    ) -> DbResult<Vec<PredictionRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, prediction_date, hour, predicted_glucose, confidence, created_at
            FROM predictions
            WHERE user_id = ? AND prediction_date >= ?
            ORDER BY prediction_date DESC, hour
            "#,
        )?;

        let cutoff = cutoff.format(DATE_FORMAT).to_string();
        let rows = stmt.query_map(params![user_id, cutoff], |row| {
            Ok(PredictionRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                prediction_date: row.get(2)?,
                hour: row.get(3)?,
                predicted_glucose: row.get(4)?,
                confidence: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
