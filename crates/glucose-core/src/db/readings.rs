//! Glucose reading database operations.

use chrono::{Days, Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{MealStatus, Mood, Reading, DATE_FORMAT};

const READING_COLUMNS: &str = r#"
    id, user_id, reading_date, reading_time, glucose_level, description,
    meal_status, mood, stress_level, exercise_minutes, sleep_hours, created_at
"#;

impl Database {
    /// Insert a new reading.
    pub fn insert_reading(&self, reading: &Reading) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO readings (
                id, user_id, reading_date, reading_time, glucose_level, description,
                meal_status, mood, stress_level, exercise_minutes, sleep_hours, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                reading.id,
                reading.user_id,
                reading.date,
                reading.time,
                reading.glucose_level,
                reading.description,
                reading.meal_status.as_str(),
                reading.mood.as_str(),
                reading.stress_level,
                reading.exercise_minutes,
                reading.sleep_hours,
                reading.created_at,
            ],
        )?;
        tracing::debug!(id = %reading.id, user_id = reading.user_id, "Inserted reading");
        Ok(())
    }

    /// Update an existing reading of `reading.user_id` (the explicit edit path).
    pub fn update_reading(&self, reading: &Reading) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE readings SET
                reading_date = ?2,
                reading_time = ?3,
                glucose_level = ?4,
                description = ?5,
                meal_status = ?6,
                mood = ?7,
                stress_level = ?8,
                exercise_minutes = ?9,
                sleep_hours = ?10
            WHERE id = ?1 AND user_id = ?11
            "#,
            params![
                reading.id,
                reading.date,
                reading.time,
                reading.glucose_level,
                reading.description,
                reading.meal_status.as_str(),
                reading.mood.as_str(),
                reading.stress_level,
                reading.exercise_minutes,
                reading.sleep_hours,
                reading.user_id,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a reading by ID.
    pub fn get_reading(&self, id: &str) -> DbResult<Option<Reading>> {
        self.conn
            .query_row(
                &format!("SELECT {READING_COLUMNS} FROM readings WHERE id = ?"),
                [id],
                ReadingRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Delete a reading owned by `user_id`.
    pub fn delete_reading(&self, id: &str, user_id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM readings WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(rows_affected > 0)
    }

    /// All readings of a user, newest first.
    pub fn fetch_all_readings(&self, user_id: i64) -> DbResult<Vec<Reading>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM readings
            WHERE user_id = ?
            ORDER BY reading_date DESC, reading_time DESC, created_at DESC
            "#
        ))?;

        let rows = stmt.query_map([user_id], ReadingRow::from_row)?;
        collect_readings(rows)
    }

    /// Readings from the last `days` days (relative to today), newest first.
    pub fn fetch_recent_readings(&self, days: u32, user_id: i64) -> DbResult<Vec<Reading>> {
        let today = Local::now().date_naive();
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        self.fetch_readings_since(cutoff, user_id)
    }

    /// Readings dated on or after `cutoff`, newest first.
    pub fn fetch_readings_since(&self, cutoff: NaiveDate, user_id: i64) -> DbResult<Vec<Reading>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM readings
            WHERE user_id = ? AND reading_date >= ?
            ORDER BY reading_date DESC, reading_time DESC, created_at DESC
            "#
        ))?;

        let cutoff = cutoff.format(DATE_FORMAT).to_string();
        let rows = stmt.query_map(params![user_id, cutoff], ReadingRow::from_row)?;
        collect_readings(rows)
    }

    /// Readings dated within `[start, end]` inclusive, newest first.
    pub fn fetch_readings_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        user_id: i64,
    ) -> DbResult<Vec<Reading>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {READING_COLUMNS}
            FROM readings
            WHERE user_id = ? AND reading_date BETWEEN ? AND ?
            ORDER BY reading_date DESC, reading_time DESC, created_at DESC
            "#
        ))?;

        let start = start.format(DATE_FORMAT).to_string();
        let end = end.format(DATE_FORMAT).to_string();
        let rows = stmt.query_map(params![user_id, start, end], ReadingRow::from_row)?;
        collect_readings(rows)
    }

    /// Number of readings stored for a user.
    pub fn count_readings(&self, user_id: i64) -> DbResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM readings WHERE user_id = ?",
                [user_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}

/// Intermediate row struct for database mapping.
struct ReadingRow {
    id: String,
    user_id: i64,
    date: String,
    time: String,
    glucose_level: i64,
    description: String,
    meal_status: String,
    mood: String,
    stress_level: i64,
    exercise_minutes: i64,
    sleep_hours: f64,
    created_at: String,
}

impl ReadingRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            date: row.get(2)?,
            time: row.get(3)?,
            glucose_level: row.get(4)?,
            description: row.get(5)?,
            meal_status: row.get(6)?,
            mood: row.get(7)?,
            stress_level: row.get(8)?,
            exercise_minutes: row.get(9)?,
            sleep_hours: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}

impl TryFrom<ReadingRow> for Reading {
    type Error = DbError;

    fn try_from(row: ReadingRow) -> Result<Self, Self::Error> {
        let meal_status = MealStatus::from_key(&row.meal_status)
            .ok_or_else(|| DbError::Constraint(format!("Unknown meal status: {}", row.meal_status)))?;
        let mood = Mood::from_key(&row.mood)
            .ok_or_else(|| DbError::Constraint(format!("Unknown mood: {}", row.mood)))?;

        Ok(Reading {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            time: row.time,
            glucose_level: row.glucose_level,
            description: row.description,
            meal_status,
            mood,
            stress_level: row.stress_level,
            exercise_minutes: row.exercise_minutes,
            sleep_hours: row.sleep_hours,
            created_at: row.created_at,
        })
    }
}

fn collect_readings<I>(rows: I) -> DbResult<Vec<Reading>>
where
    I: Iterator<Item = rusqlite::Result<ReadingRow>>,
{
    let mut readings = Vec::new();
    for row in rows {
        readings.push(row?.try_into()?);
    }
    Ok(readings)
}
