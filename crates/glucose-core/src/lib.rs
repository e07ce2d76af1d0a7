//! Glucose Tracker Core Library
//!
//! Local-first blood glucose and blood pressure tracking with a small
//! analytical core and Persian-language reports.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (forms, lists, report panes)
//!                 │
//!        ┌────────▼────────┐
//!        │  GlucoseTracker │   validation → store → analysis → report text
//!        └───┬─────────┬───┘
//!            │         │
//!   ┌────────▼───┐  ┌──▼─────────────────────────────────┐
//!   │  Database  │  │  analysis                          │
//!   │  (SQLite)  │  │  classifier · trend · predictor    │
//!   └────────────┘  │  report                            │
//!                   └────────────────────────────────────┘
//! ```
//!
//! The store returns readings newest first; trend analysis takes them
//! oldest first, so the facade reverses before analyzing.
//!
//! # Modules
//!
//! - [`db`]: SQLite reading store
//! - [`models`]: Domain records (Reading, UserSettings, Reminder, etc.)
//! - [`analysis`]: Classifier, trend analyzer, naive predictor, text reports
//! - [`nutrition`]: Carbohydrate lookup and menu suggestions
//! - [`validation`]: Form input checks
//! - [`config`]: JSON configuration
//! - [`logging`]: Tracing subscriber bootstrap

pub mod analysis;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod validation;

// Re-export commonly used types
pub use analysis::{
    BloodPressureCategory, Classification, GlucoseCategory, GlucoseClassifier, NaivePredictor,
    Prediction, TrendAnalysis, TrendAnalyzer, TrendSummary,
};
pub use config::TrackerConfig;
pub use db::Database;
pub use models::{BloodPressureReading, MealStatus, Mood, Reading, Reminder, UserSettings};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Days, Local, NaiveDate};

use analysis::report;
use models::{PredictionRecord, DATE_FORMAT, DEFAULT_USER_ID, TIME_FORMAT};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for TrackerError {
    fn from(e: db::DbError) -> Self {
        tracing::error!(error = %e, "Storage operation failed");
        TrackerError::DatabaseError(e.to_string())
    }
}

impl From<validation::ValidationError> for TrackerError {
    fn from(e: validation::ValidationError) -> Self {
        TrackerError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for TrackerError {
    fn from(e: config::ConfigError) -> Self {
        TrackerError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for TrackerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        TrackerError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a tracker database at the given path with default settings.
#[uniffi::export]
pub fn open_tracker(path: String) -> Result<Arc<GlucoseTracker>, TrackerError> {
    let mut config = TrackerConfig::default();
    config.database.path = path;
    let db = Database::open_with_defaults(&config.database.path, &config.default_user)?;
    Ok(Arc::new(GlucoseTracker::new(db, config)))
}

/// Load (or create) a JSON config file and open the database it names.
#[uniffi::export]
pub fn open_tracker_with_config(config_path: String) -> Result<Arc<GlucoseTracker>, TrackerError> {
    let config = TrackerConfig::load_or_create(&config_path)?;
    let db = Database::open_with_defaults(&config.database.path, &config.default_user)?;
    Ok(Arc::new(GlucoseTracker::new(db, config)))
}

/// Create an in-memory tracker (for testing).
#[uniffi::export]
pub fn open_tracker_in_memory() -> Result<Arc<GlucoseTracker>, TrackerError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(GlucoseTracker::new(db, TrackerConfig::default())))
}

/// Install the default log subscriber. Returns `false` if one was already set.
#[uniffi::export]
pub fn enable_logging() -> bool {
    logging::init_logging(logging::DEFAULT_LOG_FILTER)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe tracker for FFI.
#[derive(uniffi::Object)]
pub struct GlucoseTracker {
    db: Arc<Mutex<Database>>,
    config: TrackerConfig,
    classifier: GlucoseClassifier,
    analyzer: TrendAnalyzer,
    predictor: Mutex<NaivePredictor>,
    current_user: AtomicI64,
}

impl GlucoseTracker {
    /// Wrap an open database.
    pub fn new(db: Database, config: TrackerConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            classifier: GlucoseClassifier::new(&config.glucose_ranges),
            analyzer: TrendAnalyzer::new(&config.analysis),
            predictor: Mutex::new(NaivePredictor::new(&config.prediction)),
            current_user: AtomicI64::new(DEFAULT_USER_ID),
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn user_id(&self) -> i64 {
        self.current_user.load(Ordering::Relaxed)
    }

    /// Recent readings, oldest first.
    fn chronological_recent(&self, days: Option<u32>) -> Result<Vec<Reading>, TrackerError> {
        let days = days.unwrap_or(self.config.analysis.recent_days);
        let db = self.db.lock()?;
        let mut readings = db.fetch_recent_readings(days, self.user_id())?;
        readings.reverse();
        Ok(readings)
    }

    fn build_reading(&self, input: FfiReadingInput, base: Reading) -> Result<Reading, TrackerError> {
        let date = validation::validate_date(&input.date)?;
        let time = validation::validate_time(&input.time)?;
        let glucose_level = validation::validate_glucose_level(&input.glucose_level)?;

        let meal_status = parse_key(&input.meal_status, "meal status", MealStatus::from_key)?;
        let mood = parse_key(&input.mood, "mood", Mood::from_key)?;

        Ok(Reading {
            date: date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            glucose_level,
            description: input.description.trim().to_string(),
            meal_status,
            mood,
            stress_level: or_default(&input.stress_level, base.stress_level, validation::validate_stress_level)?,
            exercise_minutes: or_default(
                &input.exercise_minutes,
                base.exercise_minutes,
                validation::validate_exercise_minutes,
            )?,
            sleep_hours: or_default(&input.sleep_hours, base.sleep_hours, validation::validate_sleep_hours)?,
            ..base
        })
    }

    fn forecast_date(date: Option<String>) -> Result<NaiveDate, TrackerError> {
        match date {
            Some(raw) => Ok(validation::validate_date(&raw)?),
            None => Local::now()
                .date_naive()
                .checked_add_days(Days::new(1))
                .ok_or_else(|| TrackerError::InvalidInput("Date out of range".into())),
        }
    }
}

#[uniffi::export]
impl GlucoseTracker {
    // =========================================================================
    // Classification
    // =========================================================================

    /// Classify a glucose value in mg/dL.
    pub fn classify_glucose(&self, value: f64) -> FfiClassification {
        self.classifier.classify(value).into()
    }

    /// Classify raw text; non-numeric input is reported as invalid.
    pub fn classify_glucose_text(&self, raw: String) -> FfiClassification {
        self.classifier.classify_text(&raw).into()
    }

    /// Classify a systolic/diastolic pair given as text.
    pub fn classify_blood_pressure(&self, systolic: String, diastolic: String) -> FfiClassification {
        analysis::classify_blood_pressure_text(&systolic, &diastolic).into()
    }

    // =========================================================================
    // Reading Operations
    // =========================================================================

    /// Validate and store a new reading.
    pub fn add_reading(&self, input: FfiReadingInput) -> Result<FfiReading, TrackerError> {
        let mut base = Reading::new(String::new(), String::new(), 0);
        base.user_id = self.user_id();
        let reading = self.build_reading(input, base)?;
        let db = self.db.lock()?;
        db.insert_reading(&reading)?;
        tracing::info!(id = %reading.id, glucose = reading.glucose_level, "Reading added");
        Ok(reading.into())
    }

    /// Replace the editable fields of one of the current user's readings.
    pub fn update_reading(&self, id: String, input: FfiReadingInput) -> Result<FfiReading, TrackerError> {
        let db = self.db.lock()?;
        let existing = db
            .get_reading(&id)?
            .filter(|r| r.user_id == self.user_id())
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        let reading = self.build_reading(input, existing)?;
        if !db.update_reading(&reading)? {
            return Err(TrackerError::NotFound(id));
        }
        tracing::info!(id = %reading.id, "Reading updated");
        Ok(reading.into())
    }

    /// Delete one of the current user's readings. Returns `false` if there is none.
    pub fn delete_reading(&self, id: String) -> Result<bool, TrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_reading(&id, self.user_id())?)
    }

    /// All readings of the current user, newest first.
    pub fn list_readings(&self) -> Result<Vec<FfiReading>, TrackerError> {
        let db = self.db.lock()?;
        let readings = db.fetch_all_readings(self.user_id())?;
        Ok(readings.into_iter().map(|r| r.into()).collect())
    }

    /// Readings from the last `days` days, newest first.
    pub fn recent_readings(&self, days: u32) -> Result<Vec<FfiReading>, TrackerError> {
        let db = self.db.lock()?;
        let readings = db.fetch_recent_readings(days, self.user_id())?;
        Ok(readings.into_iter().map(|r| r.into()).collect())
    }

    /// Readings dated between `start` and `end` inclusive, newest first.
    pub fn readings_between(&self, start: String, end: String) -> Result<Vec<FfiReading>, TrackerError> {
        let start = validation::validate_date(&start)?;
        let end = validation::validate_date(&end)?;
        let db = self.db.lock()?;
        let readings = db.fetch_readings_by_date_range(start, end, self.user_id())?;
        Ok(readings.into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Analysis Operations
    // =========================================================================

    /// Trend analysis over recent readings (configured window if `days` is unset).
    pub fn analyze_recent(&self, days: Option<u32>) -> Result<FfiTrendAnalysis, TrackerError> {
        let readings = self.chronological_recent(days)?;
        let analysis = self.analyzer.analyze_default(&readings);
        Ok(match analysis {
            TrendAnalysis::InsufficientData { available, required } => {
                tracing::warn!(available, required, "Not enough readings for trend analysis");
                FfiTrendAnalysis::InsufficientData {
                    available: available as u32,
                    required: required as u32,
                }
            }
            TrendAnalysis::Summary(summary) => {
                let recommendations = self.analyzer.recommendations(&summary);
                FfiTrendAnalysis::Summary {
                    summary: FfiTrendSummary::new(summary, recommendations),
                }
            }
        })
    }

    /// Pattern analysis text for the recent window.
    pub fn pattern_report(&self, days: Option<u32>) -> Result<String, TrackerError> {
        let readings = self.chronological_recent(days)?;
        let analysis = self.analyzer.analyze_default(&readings);
        Ok(report::pattern_report(&analysis, &self.config.glucose_ranges))
    }

    /// Detailed statistics text over the whole history; `None` without readings.
    pub fn statistics_report(&self) -> Result<Option<String>, TrackerError> {
        let db = self.db.lock()?;
        let readings = db.fetch_all_readings(self.user_id())?;
        Ok(self
            .analyzer
            .statistics(&readings, &self.config.glucose_ranges)
            .map(|stats| report::statistics_report(&stats)))
    }

    // =========================================================================
    // Prediction Operations
    // =========================================================================

    /// Train the predictor on the current user's history.
    pub fn train_predictor(&self) -> Result<bool, TrackerError> {
        // Predictor lock first, held across the fetch
        let mut predictor = self.predictor.lock()?;
        let readings = {
            let db = self.db.lock()?;
            db.fetch_all_readings(self.user_id())?
        };
        Ok(predictor.train(&readings))
    }

    /// Whether the predictor has been trained.
    pub fn is_predictor_trained(&self) -> Result<bool, TrackerError> {
        Ok(self.predictor.lock()?.is_trained())
    }

    /// Predict glucose at an hour of day; `None` until trained.
    pub fn predict(&self, hour: u32) -> Result<Option<FfiPrediction>, TrackerError> {
        let hour = validation::validate_hour(hour)?;
        let predictor = self.predictor.lock()?;
        Ok(predictor
            .predict(hour)
            .map(|prediction| FfiPrediction::new(hour, prediction, &self.classifier)))
    }

    /// Prediction text for an hour of day; `None` until trained.
    pub fn prediction_report(&self, hour: u32) -> Result<Option<String>, TrackerError> {
        let hour = validation::validate_hour(hour)?;
        let predictor = self.predictor.lock()?;
        Ok(predictor
            .predict(hour)
            .map(|prediction| report::prediction_text(hour, &prediction, &self.classifier)))
    }

    /// Whole-day forecast report for `date` (tomorrow if unset); `None` until trained.
    pub fn forecast_report(&self, date: Option<String>) -> Result<Option<String>, TrackerError> {
        let date = Self::forecast_date(date)?;
        let predictor = self.predictor.lock()?;
        let Some(forecast) = predictor.forecast_day(date) else {
            return Ok(None);
        };
        let critical = predictor.critical_times(
            &forecast,
            self.config.analysis.crisis_low,
            self.config.analysis.crisis_high,
        );
        Ok(Some(report::forecast_report(&forecast, &critical)))
    }

    /// Predict an hour of `date` (tomorrow if unset) and log the result.
    pub fn record_prediction(
        &self,
        hour: u32,
        date: Option<String>,
    ) -> Result<Option<FfiPrediction>, TrackerError> {
        let hour = validation::validate_hour(hour)?;
        let date = Self::forecast_date(date)?;

        let Some(prediction) = self.predictor.lock()?.predict(hour) else {
            return Ok(None);
        };

        let record = PredictionRecord::new(
            self.user_id(),
            date.format(DATE_FORMAT).to_string(),
            i64::from(hour),
            prediction.value,
            prediction.confidence,
        );
        let db = self.db.lock()?;
        db.insert_prediction(&record)?;
        Ok(Some(FfiPrediction::new(hour, prediction, &self.classifier)))
    }

    /// Logged predictions dated within the last `days` days.
    pub fn recent_predictions(&self, days: u32) -> Result<Vec<FfiPredictionRecord>, TrackerError> {
        let db = self.db.lock()?;
        let records = db.fetch_recent_predictions(days, self.user_id())?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Settings of the current user.
    pub fn get_user_settings(&self) -> Result<FfiUserSettings, TrackerError> {
        let db = self.db.lock()?;
        let user_id = self.user_id();
        let settings = db
            .get_user_settings(user_id)?
            .ok_or_else(|| TrackerError::NotFound(format!("user {user_id}")))?;
        Ok(settings.into())
    }

    /// Validate and save the current user's settings.
    pub fn update_user_settings(
        &self,
        username: String,
        age: String,
        gender: String,
        target_min: String,
        target_max: String,
    ) -> Result<FfiUserSettings, TrackerError> {
        let (target_glucose_min, target_glucose_max) =
            validation::validate_target_range(&target_min, &target_max)?;
        let settings = UserSettings {
            id: self.user_id(),
            username: validation::validate_name(&username)?,
            age: validation::validate_age(&age)?,
            gender: gender.trim().to_string(),
            target_glucose_min,
            target_glucose_max,
        };

        let db = self.db.lock()?;
        db.save_user_settings(&settings)?;
        tracing::info!(user_id = settings.id, "User settings saved");
        Ok(settings.into())
    }

    /// Create a user with the configured defaults and a validated name.
    pub fn create_user(&self, username: String) -> Result<FfiUserSettings, TrackerError> {
        let username = validation::validate_name(&username)?;
        let db = self.db.lock()?;
        let next_id = db.list_users()?.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        let mut settings = UserSettings::from_defaults(next_id, &self.config.default_user);
        settings.username = username;
        db.save_user_settings(&settings)?;
        Ok(settings.into())
    }

    /// All users.
    pub fn list_users(&self) -> Result<Vec<FfiUserSettings>, TrackerError> {
        let db = self.db.lock()?;
        Ok(db.list_users()?.into_iter().map(|u| u.into()).collect())
    }

    /// Make `user_id` the current user. The predictor must be retrained.
    pub fn switch_user(&self, user_id: i64) -> Result<FfiUserSettings, TrackerError> {
        let settings = {
            let db = self.db.lock()?;
            db.get_user_settings(user_id)?
                .ok_or_else(|| TrackerError::NotFound(format!("user {user_id}")))?
        };
        self.current_user.store(user_id, Ordering::Relaxed);
        *self.predictor.lock()? = NaivePredictor::new(&self.config.prediction);
        tracing::info!(user_id, "Switched user");
        Ok(settings.into())
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Copy the database into `dir` (the configured backup directory if unset).
    /// Returns the path of the new backup file.
    pub fn backup_database(&self, dir: Option<String>) -> Result<String, TrackerError> {
        let dir = dir.unwrap_or_else(|| self.config.database.backup_dir.clone());
        let db = self.db.lock()?;
        let path = db.backup_to(&dir)?;
        Ok(path.to_string_lossy().into_owned())
    }

    // =========================================================================
    // Reminder Operations
    // =========================================================================

    /// Add an active daily reminder.
    pub fn add_reminder(
        &self,
        title: String,
        scheduled_time: String,
        message: String,
    ) -> Result<FfiReminder, TrackerError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(TrackerError::InvalidInput("Reminder title is empty".into()));
        }
        let time = validation::validate_time(&scheduled_time)?;

        let mut reminder = Reminder::new(title, time.format(TIME_FORMAT).to_string());
        reminder.user_id = self.user_id();
        reminder.message = message;

        let db = self.db.lock()?;
        db.insert_reminder(&reminder)?;
        Ok(reminder.into())
    }

    /// Reminders of the current user ordered by time of day.
    pub fn list_reminders(&self) -> Result<Vec<FfiReminder>, TrackerError> {
        let db = self.db.lock()?;
        let reminders = db.fetch_all_reminders(self.user_id())?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    /// Flip a reminder on or off; returns the new state.
    pub fn toggle_reminder(&self, id: String) -> Result<bool, TrackerError> {
        let db = self.db.lock()?;
        db.toggle_reminder(&id, self.user_id())?
            .ok_or(TrackerError::NotFound(id))
    }

    /// Delete a reminder. Returns `false` if it did not exist.
    pub fn delete_reminder(&self, id: String) -> Result<bool, TrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_reminder(&id, self.user_id())?)
    }

    // =========================================================================
    // Blood Pressure Operations
    // =========================================================================

    /// Validate and store a blood pressure reading.
    pub fn add_blood_pressure(
        &self,
        systolic: String,
        diastolic: String,
        pulse: Option<i64>,
        notes: Option<String>,
    ) -> Result<FfiBloodPressure, TrackerError> {
        let (systolic, diastolic) = validation::validate_blood_pressure(&systolic, &diastolic)?;

        let mut reading = BloodPressureReading::new(systolic, diastolic);
        reading.user_id = self.user_id();
        reading.pulse = pulse;
        reading.notes = notes.filter(|n| !n.trim().is_empty());

        let db = self.db.lock()?;
        db.insert_blood_pressure(&reading)?;
        Ok(reading.into())
    }

    /// Blood pressure readings of the current user, newest first.
    pub fn list_blood_pressure(&self) -> Result<Vec<FfiBloodPressure>, TrackerError> {
        let db = self.db.lock()?;
        let readings = db.fetch_blood_pressure_readings(self.user_id())?;
        Ok(readings.into_iter().map(|r| r.into()).collect())
    }

    /// Delete a blood pressure reading.
    pub fn delete_blood_pressure(&self, id: String) -> Result<bool, TrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_blood_pressure(&id, self.user_id())?)
    }

    // =========================================================================
    // Nutrition
    // =========================================================================

    /// Carbohydrate estimate for a portion; `None` for unknown foods.
    pub fn carbs_for(&self, food: String, grams: f64) -> Option<FfiCarbEstimate> {
        nutrition::carbs_for(&food, grams).map(|e| e.into())
    }

    /// Menu suggestion for the current user's overall mean glucose.
    pub fn menu_suggestion(&self) -> Result<Option<String>, TrackerError> {
        let db = self.db.lock()?;
        let readings = db.fetch_all_readings(self.user_id())?;
        Ok(self
            .analyzer
            .statistics(&readings, &self.config.glucose_ranges)
            .map(|stats| nutrition::suggest_menu(stats.mean).to_string()))
    }
}

/// Empty input selects the default; anything else must be a known key.
fn parse_key<T: Default>(
    raw: &str,
    field: &str,
    from_key: fn(&str) -> Option<T>,
) -> Result<T, TrackerError> {
    let key = raw.trim();
    if key.is_empty() {
        return Ok(T::default());
    }
    from_key(key).ok_or_else(|| TrackerError::InvalidInput(format!("Unknown {field}: {key}")))
}

/// Empty input keeps `default`; anything else must validate.
fn or_default<T>(
    raw: &str,
    default: T,
    validate: fn(&str) -> validation::ValidationResult<T>,
) -> Result<T, TrackerError> {
    if raw.trim().is_empty() {
        Ok(default)
    } else {
        Ok(validate(raw)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// Reading form input as typed by the user.
///
/// Empty context fields keep their defaults; empty keys select the default
/// meal status and mood.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiReadingInput {
    pub date: String,
    pub time: String,
    pub glucose_level: String,
    pub description: String,
    pub meal_status: String,
    pub mood: String,
    pub stress_level: String,
    pub exercise_minutes: String,
    pub sleep_hours: String,
}

/// FFI-safe reading.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiReading {
    pub id: String,
    pub user_id: i64,
    pub date: String,
    pub time: String,
    pub glucose_level: i64,
    pub description: String,
    pub meal_status: String,
    pub meal_status_label: String,
    pub mood: String,
    pub mood_label: String,
    pub stress_level: i64,
    pub exercise_minutes: i64,
    pub sleep_hours: f64,
    pub created_at: String,
}

impl From<Reading> for FfiReading {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            user_id: reading.user_id,
            date: reading.date,
            time: reading.time,
            glucose_level: reading.glucose_level,
            description: reading.description,
            meal_status: reading.meal_status.as_str().to_string(),
            meal_status_label: reading.meal_status.label().to_string(),
            mood: reading.mood.as_str().to_string(),
            mood_label: reading.mood.label().to_string(),
            stress_level: reading.stress_level,
            exercise_minutes: reading.exercise_minutes,
            sleep_hours: reading.sleep_hours,
            created_at: reading.created_at,
        }
    }
}

/// FFI-safe classification.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiClassification {
    pub category: String,
    pub label: String,
    pub severity: Option<u8>,
}

impl From<Classification> for FfiClassification {
    fn from(c: Classification) -> Self {
        Self {
            category: format!("{:?}", c.category),
            label: c.category.label().to_string(),
            severity: c.severity,
        }
    }
}

impl From<BloodPressureCategory> for FfiClassification {
    fn from(category: BloodPressureCategory) -> Self {
        Self {
            category: format!("{:?}", category),
            label: category.label().to_string(),
            severity: category.severity(),
        }
    }
}

/// FFI-safe crisis entry.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiCrisis {
    pub reading_id: String,
    pub date: String,
    pub time: String,
    pub value: f64,
    pub direction: String,
    pub label: String,
}

impl From<analysis::CrisisEntry> for FfiCrisis {
    fn from(c: analysis::CrisisEntry) -> Self {
        Self {
            reading_id: c.reading_id,
            date: c.date,
            time: c.time,
            value: c.value,
            direction: format!("{:?}", c.direction),
            label: c.direction.label().to_string(),
        }
    }
}

/// FFI-safe trend summary with advice.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiTrendSummary {
    pub count: u32,
    pub mean: f64,
    pub std_dev: f64,
    pub slope: f64,
    pub trend: String,
    pub trend_label: String,
    pub recent_average: f64,
    pub older_average: f64,
    pub short_term: String,
    pub crises: Vec<FfiCrisis>,
    pub recommendations: Vec<String>,
}

impl FfiTrendSummary {
    fn new(summary: TrendSummary, recommendations: Vec<String>) -> Self {
        Self {
            count: summary.count as u32,
            mean: summary.mean,
            std_dev: summary.std_dev,
            slope: summary.slope,
            trend: format!("{:?}", summary.trend),
            trend_label: summary.trend.label().to_string(),
            recent_average: summary.recent_average,
            older_average: summary.older_average,
            short_term: format!("{:?}", summary.short_term),
            crises: summary.crises.into_iter().map(|c| c.into()).collect(),
            recommendations,
        }
    }
}

/// FFI-safe trend analysis result.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiTrendAnalysis {
    InsufficientData { available: u32, required: u32 },
    Summary { summary: FfiTrendSummary },
}

/// FFI-safe prediction.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPrediction {
    pub hour: u32,
    pub value: f64,
    pub confidence: f64,
    pub neighbours: u32,
    pub status: String,
}

impl FfiPrediction {
    fn new(hour: u32, prediction: Prediction, classifier: &GlucoseClassifier) -> Self {
        Self {
            hour,
            value: prediction.value,
            confidence: prediction.confidence,
            neighbours: prediction.neighbours as u32,
            status: classifier.classify(prediction.value).category.label().to_string(),
        }
    }
}

/// FFI-safe logged prediction.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPredictionRecord {
    pub id: String,
    pub prediction_date: String,
    pub hour: i64,
    pub predicted_glucose: f64,
    pub confidence: f64,
    pub created_at: String,
}

impl From<PredictionRecord> for FfiPredictionRecord {
    fn from(r: PredictionRecord) -> Self {
        Self {
            id: r.id,
            prediction_date: r.prediction_date,
            hour: r.hour,
            predicted_glucose: r.predicted_glucose,
            confidence: r.confidence,
            created_at: r.created_at,
        }
    }
}

/// FFI-safe user settings.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiUserSettings {
    pub id: i64,
    pub username: String,
    pub age: i64,
    pub gender: String,
    pub target_glucose_min: i64,
    pub target_glucose_max: i64,
}

impl From<UserSettings> for FfiUserSettings {
    fn from(s: UserSettings) -> Self {
        Self {
            id: s.id,
            username: s.username,
            age: s.age,
            gender: s.gender,
            target_glucose_min: s.target_glucose_min,
            target_glucose_max: s.target_glucose_max,
        }
    }
}

/// FFI-safe reminder.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiReminder {
    pub id: String,
    pub title: String,
    pub message: String,
    pub reminder_type: String,
    pub scheduled_time: String,
    pub frequency: String,
    pub is_active: bool,
}

impl From<Reminder> for FfiReminder {
    fn from(r: Reminder) -> Self {
        Self {
            id: r.id,
            title: r.title,
            message: r.message,
            reminder_type: r.reminder_type,
            scheduled_time: r.scheduled_time,
            frequency: r.frequency,
            is_active: r.is_active,
        }
    }
}

/// FFI-safe blood pressure reading with its category.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiBloodPressure {
    pub id: String,
    pub measured_at: String,
    pub systolic: i64,
    pub diastolic: i64,
    pub pulse: Option<i64>,
    pub notes: Option<String>,
    pub classification: FfiClassification,
}

impl From<BloodPressureReading> for FfiBloodPressure {
    fn from(r: BloodPressureReading) -> Self {
        Self {
            classification: analysis::classify_blood_pressure(r.systolic, r.diastolic).into(),
            id: r.id,
            measured_at: r.measured_at,
            systolic: r.systolic,
            diastolic: r.diastolic,
            pulse: r.pulse,
            notes: r.notes,
        }
    }
}

/// FFI-safe carbohydrate estimate.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiCarbEstimate {
    pub food: String,
    pub grams: f64,
    pub carbs: f64,
    pub impact: String,
    pub impact_label: String,
}

impl From<nutrition::CarbEstimate> for FfiCarbEstimate {
    fn from(e: nutrition::CarbEstimate) -> Self {
        Self {
            food: e.food,
            grams: e.grams,
            carbs: e.carbs,
            impact: format!("{:?}", e.impact),
            impact_label: e.impact.label().to_string(),
        }
    }
}
