//! Blood pressure reading database operations.

use rusqlite::params;

use super::{Database, DbResult};
use crate::models::BloodPressureReading;

impl Database {
    /// Insert a blood pressure reading.
    pub fn insert_blood_pressure(&self, reading: &BloodPressureReading) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO blood_pressure_readings (
                id, user_id, measured_at, systolic, diastolic, pulse, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                reading.id,
                reading.user_id,
                reading.measured_at,
                reading.systolic,
                reading.diastolic,
                reading.pulse,
                reading.notes,
                reading.created_at,
            ],
        )?;
        Ok(())
    }

    /// All blood pressure readings of a user, newest first.
    pub fn fetch_blood_pressure_readings(&self, user_id: i64) -> DbResult<Vec<BloodPressureReading>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, measured_at, systolic, diastolic, pulse, notes, created_at
            FROM blood_pressure_readings
            WHERE user_id = ?
            ORDER BY measured_at DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(BloodPressureReading {
                id: row.get(0)?,
                user_id: row.get(1)?,
                measured_at: row.get(2)?,
                systolic: row.get(3)?,
                diastolic: row.get(4)?,
                pulse: row.get(5)?,
                notes: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a blood pressure reading owned by `user_id`.
    pub fn delete_blood_pressure(&self, id: &str, user_id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM blood_pressure_readings WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_USER_ID;

    #[test]
    fn test_insert_and_list() {
        let db = Database::open_in_memory().unwrap();

        let mut first = BloodPressureReading::new(118, 76);
        first.measured_at = "2024-03-01T08:00:00+00:00".into();
        first.pulse = Some(64);

        let mut second = BloodPressureReading::new(142, 91);
        second.measured_at = "2024-03-02T08:00:00+00:00".into();
        second.notes = Some("after coffee".into());

        db.insert_blood_pressure(&first).unwrap();
        db.insert_blood_pressure(&second).unwrap();

        let readings = db.fetch_blood_pressure_readings(DEFAULT_USER_ID).unwrap();
        assert_eq!(readings, vec![second, first]);
    }

    #[test]
    fn test_delete_blood_pressure() {
        let db = Database::open_in_memory().unwrap();

        let reading = BloodPressureReading::new(118, 76);
        db.insert_blood_pressure(&reading).unwrap();

        assert!(!db.delete_blood_pressure(&reading.id, DEFAULT_USER_ID + 1).unwrap());
        assert!(db.delete_blood_pressure(&reading.id, DEFAULT_USER_ID).unwrap());
        assert!(db
            .fetch_blood_pressure_readings(DEFAULT_USER_ID)
            .unwrap()
            .is_empty());
    }
}
