//! Reading store for the glucose tracker.

mod schema;
mod readings;
mod users;
mod reminders;
mod predictions;
mod blood_pressure;

pub use schema::*;

use chrono::Local;
use rusqlite::{Connection, DatabaseName};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DefaultUser;
use crate::models::{UserSettings, DEFAULT_USER_ID};

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open_with_defaults(path, &DefaultUser::default())
    }

    /// Open database at path, seeding user 1 from `defaults` on first use.
    pub fn open_with_defaults<P: AsRef<Path>>(path: P, defaults: &DefaultUser) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize(defaults)?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize(&DefaultUser::default())?;
        Ok(db)
    }

    /// Initialize schema and the default user.
    fn initialize(&self, defaults: &DefaultUser) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.insert_user_if_missing(&UserSettings::from_defaults(DEFAULT_USER_ID, defaults))?;
        Ok(())
    }

    /// Copy the live database into `dir` as `glucose_backup_YYYYmmdd_HHMMSS.db`
    /// through SQLite's online backup. Creates `dir` if needed.
    pub fn backup_to<P: AsRef<Path>>(&self, dir: P) -> DbResult<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("glucose_backup_{stamp}.db"));
        self.conn.backup(DatabaseName::Main, &path, None)?;

        tracing::info!(path = %path.display(), "Database backed up");
        Ok(path)
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
