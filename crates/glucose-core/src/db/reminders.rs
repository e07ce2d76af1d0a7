//! Reminder database operations.

use rusqlite::params;

use super::{Database, DbResult};
use crate::models::Reminder;

impl Database {
    /// Insert a new reminder.
    pub fn insert_reminder(&self, reminder: &Reminder) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO reminders (
                id, user_id, title, message, reminder_type,
                scheduled_time, frequency, is_active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                reminder.id,
                reminder.user_id,
                reminder.title,
                reminder.message,
                reminder.reminder_type,
                reminder.scheduled_time,
                reminder.frequency,
                reminder.is_active,
                reminder.created_at,
            ],
        )?;
        Ok(())
    }

    /// List a user's reminders ordered by time of day.
    pub fn fetch_all_reminders(&self, user_id: i64) -> DbResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, title, message, reminder_type,
                   scheduled_time, frequency, is_active, created_at
            FROM reminders
            WHERE user_id = ?
            ORDER BY scheduled_time
            "#,
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(Reminder {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                message: row.get(3)?,
                reminder_type: row.get(4)?,
                scheduled_time: row.get(5)?,
                frequency: row.get(6)?,
                is_active: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Flip a reminder between active and inactive.
    ///
    /// Returns the new state, or `None` if `user_id` has no such reminder.
    pub fn toggle_reminder(&self, id: &str, user_id: i64) -> DbResult<Option<bool>> {
        let rows_affected = self.conn.execute(
            "UPDATE reminders SET is_active = 1 - is_active WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }

        let is_active: bool =
            self.conn
                .query_row("SELECT is_active FROM reminders WHERE id = ?", [id], |row| {
                    row.get(0)
                })?;
        Ok(Some(is_active))
    }

    /// Delete a reminder owned by `user_id`.
    pub fn delete_reminder(&self, id: &str, user_id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM reminders WHERE id = ? AND user_id = ?",
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
    fn test_insert_and_list_ordered() {
        let db = Database::open_in_memory().unwrap();

        let evening = Reminder::new("Evening".into(), "21:00".into());
        let morning = Reminder::new("Morning".into(), "07:30".into());
        db.insert_reminder(&evening).unwrap();
        db.insert_reminder(&morning).unwrap();

        let reminders = db.fetch_all_reminders(DEFAULT_USER_ID).unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0], morning);
        assert_eq!(reminders[1], evening);
    }

    #[test]
    fn test_toggle_reminder() {
        let db = Database::open_in_memory().unwrap();

        let reminder = Reminder::new("Morning".into(), "07:30".into());
        db.insert_reminder(&reminder).unwrap();

        assert_eq!(db.toggle_reminder(&reminder.id, DEFAULT_USER_ID).unwrap(), Some(false));
        assert_eq!(db.toggle_reminder(&reminder.id, DEFAULT_USER_ID).unwrap(), Some(true));
        assert_eq!(db.toggle_reminder("missing", DEFAULT_USER_ID).unwrap(), None);
        assert_eq!(db.toggle_reminder(&reminder.id, DEFAULT_USER_ID + 1).unwrap(), None);
    }

    #[test]
    fn test_delete_reminder() {
        let db = Database::open_in_memory().unwrap();

        let reminder = Reminder::new("Morning".into(), "07:30".into());
        db.insert_reminder(&reminder).unwrap();

        assert!(!db.delete_reminder(&reminder.id, DEFAULT_USER_ID + 1).unwrap());
        assert!(db.delete_reminder(&reminder.id, DEFAULT_USER_ID).unwrap());
        assert!(db.fetch_all_reminders(DEFAULT_USER_ID).unwrap().is_empty());
    }
}
