//! SQLite schema definition.

/// Complete database schema for the glucose tracker.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    age INTEGER NOT NULL DEFAULT 30,
    gender TEXT NOT NULL DEFAULT '',
    target_glucose_min INTEGER NOT NULL DEFAULT 80,
    target_glucose_max INTEGER NOT NULL DEFAULT 140,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (target_glucose_min < target_glucose_max)
);

-- ============================================================================
-- Glucose Readings
-- ============================================================================

CREATE TABLE IF NOT EXISTS readings (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id) ON DELETE CASCADE,
    reading_date TEXT NOT NULL,                  -- YYYY-MM-DD (not enforced)
    reading_time TEXT NOT NULL,                  -- HH:MM (not enforced)
    glucose_level INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    meal_status TEXT NOT NULL DEFAULT 'unknown',
    mood TEXT NOT NULL DEFAULT 'neutral',
    stress_level INTEGER NOT NULL DEFAULT 5,
    exercise_minutes INTEGER NOT NULL DEFAULT 0,
    sleep_hours REAL NOT NULL DEFAULT 8.0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_readings_user_date ON readings(user_id, reading_date, reading_time);

-- ============================================================================
-- Blood Pressure Readings
-- ============================================================================

CREATE TABLE IF NOT EXISTS blood_pressure_readings (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id) ON DELETE CASCADE,
    measured_at TEXT NOT NULL,
    systolic INTEGER NOT NULL,
    diastolic INTEGER NOT NULL,
    pulse INTEGER,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_bp_user_time ON blood_pressure_readings(user_id, measured_at);

-- ============================================================================
-- Reminders
-- ============================================================================

CREATE TABLE IF NOT EXISTS reminders (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    message TEXT NOT NULL DEFAULT '',
    reminder_type TEXT NOT NULL,
    scheduled_time TEXT NOT NULL,
    frequency TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Predictions (optional bookkeeping of predictor output)
-- ============================================================================

CREATE TABLE IF NOT EXISTS predictions (
    id TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL DEFAULT 1 REFERENCES users(id) ON DELETE CASCADE,
    prediction_date TEXT NOT NULL,
    hour INTEGER NOT NULL,
    predicted_glucose REAL NOT NULL,
    confidence REAL NOT NULL CHECK (confidence >= 0.0 AND confidence <= 1.0),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_predictions_user_date ON predictions(user_id, prediction_date);
"#;
