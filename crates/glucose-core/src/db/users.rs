//! User settings database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::UserSettings;

impl Database {
    /// Insert a user unless one with the same ID already exists.
    pub fn insert_user_if_missing(&self, settings: &UserSettings) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO users (
                id, username, age, gender, target_glucose_min, target_glucose_max
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                settings.id,
                settings.username,
                settings.age,
                settings.gender,
                settings.target_glucose_min,
                settings.target_glucose_max,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Insert or update a user's settings.
    pub fn save_user_settings(&self, settings: &UserSettings) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (
                id, username, age, gender, target_glucose_min, target_glucose_max
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                age = excluded.age,
                gender = excluded.gender,
                target_glucose_min = excluded.target_glucose_min,
                target_glucose_max = excluded.target_glucose_max
            "#,
            params![
                settings.id,
                settings.username,
                settings.age,
                settings.gender,
                settings.target_glucose_min,
                settings.target_glucose_max,
            ],
        )?;
        Ok(())
    }

    /// Get a user's settings.
    pub fn get_user_settings(&self, id: i64) -> DbResult<Option<UserSettings>> {
        self.conn
            .query_row(
                r#"
                SELECT id, username, age, gender, target_glucose_min, target_glucose_max
                FROM users
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(UserSettings {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        age: row.get(2)?,
                        gender: row.get(3)?,
                        target_glucose_min: row.get(4)?,
                        target_glucose_max: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all users.
    pub fn list_users(&self) -> DbResult<Vec<UserSettings>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, username, age, gender, target_glucose_min, target_glucose_max
            FROM users
            ORDER BY username
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(UserSettings {
                id: row.get(0)?,
                username: row.get(1)?,
                age: row.get(2)?,
                gender: row.get(3)?,
                target_glucose_min: row.get(4)?,
                target_glucose_max: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a user together with all of their records.
    pub fn delete_user(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM users WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reading, DEFAULT_USER_ID};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_default_user_exists() {
        let db = setup_db();

        let settings = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        assert_eq!(settings.target_glucose_min, 80);
        assert_eq!(settings.target_glucose_max, 140);
    }

    #[test]
    fn test_save_updates_existing() {
        let db = setup_db();

        let mut settings = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        settings.username = "مریم".into();
        settings.age = 52;
        settings.target_glucose_max = 160;
        db.save_user_settings(&settings).unwrap();

        let retrieved = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        assert_eq!(retrieved, settings);
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_insert_if_missing_keeps_existing() {
        let db = setup_db();

        let mut settings = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        settings.username = "ignored".into();
        assert!(!db.insert_user_if_missing(&settings).unwrap());

        let retrieved = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        assert_ne!(retrieved.username, "ignored");
    }

    #[test]
    fn test_invalid_target_range_rejected() {
        let db = setup_db();

        let mut settings = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        settings.target_glucose_min = 150;
        settings.target_glucose_max = 100;
        assert!(db.save_user_settings(&settings).is_err());
    }

    #[test]
    fn test_delete_user_removes_readings() {
        let db = setup_db();

        let mut settings = db.get_user_settings(DEFAULT_USER_ID).unwrap().unwrap();
        settings.id = 7;
        db.save_user_settings(&settings).unwrap();

        let mut reading = Reading::new("2024-03-01".into(), "08:00".into(), 100);
        reading.user_id = 7;
        db.insert_reading(&reading).unwrap();

        assert!(db.delete_user(7).unwrap());
        assert!(db.get_reading(&reading.id).unwrap().is_none());
    }
}
