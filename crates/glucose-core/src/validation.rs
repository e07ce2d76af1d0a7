//! Form input validation.
//!
//! Each check parses the raw text a user typed and returns the typed value,
//! or a [`ValidationError`] naming the field and the accepted range.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::{DATE_FORMAT, TIME_FORMAT};

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a number")]
    NotNumeric { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Target minimum must be below target maximum")]
    InvertedTargetRange,

    #[error("Diastolic pressure must be lower than systolic pressure")]
    DiastolicNotBelowSystolic,

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn parse_int(raw: &str, field: &'static str) -> ValidationResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric { field })
}

fn parse_float(raw: &str, field: &'static str) -> ValidationResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotNumeric { field }),
    }
}

fn int_in_range(raw: &str, field: &'static str, min: i64, max: i64) -> ValidationResult<i64> {
    let value = parse_int(raw, field)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: min as f64,
            max: max as f64,
        })
    }
}

fn float_in_range(raw: &str, field: &'static str, min: f64, max: f64) -> ValidationResult<f64> {
    let value = parse_float(raw, field)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}

/// Glucose level in mg/dL, 20..=600.
pub fn validate_glucose_level(raw: &str) -> ValidationResult<i64> {
    int_in_range(raw, "glucose level", 20, 600)
}

/// Stress on a 1..=10 scale.
pub fn validate_stress_level(raw: &str) -> ValidationResult<i64> {
    int_in_range(raw, "stress level", 1, 10)
}

/// Exercise minutes, at most eight hours.
pub fn validate_exercise_minutes(raw: &str) -> ValidationResult<i64> {
    int_in_range(raw, "exercise minutes", 0, 480)
}

/// Sleep hours, 0..=24.
pub fn validate_sleep_hours(raw: &str) -> ValidationResult<f64> {
    float_in_range(raw, "sleep hours", 0.0, 24.0)
}

/// Age in years, 1..=120.
pub fn validate_age(raw: &str) -> ValidationResult<i64> {
    int_in_range(raw, "age", 1, 120)
}

/// Hour of day for predictions, 0..=23.
pub fn validate_hour(hour: u32) -> ValidationResult<u32> {
    if hour <= 23 {
        Ok(hour)
    } else {
        Err(ValidationError::OutOfRange {
            field: "hour",
            min: 0.0,
            max: 23.0,
        })
    }
}

/// Personal target range; both ends within 50..=200 and min < max.
pub fn validate_target_range(min_raw: &str, max_raw: &str) -> ValidationResult<(i64, i64)> {
    let min = int_in_range(min_raw, "target minimum", 50, 200)?;
    let max = int_in_range(max_raw, "target maximum", 50, 200)?;
    if min >= max {
        return Err(ValidationError::InvertedTargetRange);
    }
    Ok((min, max))
}

/// Systolic/diastolic pair in mmHg.
pub fn validate_blood_pressure(systolic_raw: &str, diastolic_raw: &str) -> ValidationResult<(i64, i64)> {
    let systolic = int_in_range(systolic_raw, "systolic", 50, 300)?;
    let diastolic = int_in_range(diastolic_raw, "diastolic", 30, 200)?;
    if diastolic >= systolic {
        return Err(ValidationError::DiastolicNotBelowSystolic);
    }
    Ok((systolic, diastolic))
}

/// Gregorian date in `YYYY-MM-DD` form.
pub fn validate_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Wall-clock time in `HH:MM` form.
pub fn validate_time(raw: &str) -> ValidationResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(raw.to_string()))
}

/// Display name: at least two characters, letters (any script), digits and spaces.
pub fn validate_name(raw: &str) -> ValidationResult<String> {
    let name = raw.trim();
    let valid = name.chars().count() >= 2
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '\u{200c}');
    if valid {
        Ok(name.to_string())
    } else {
        Err(ValidationError::InvalidName(raw.to_string()))
    }
}
