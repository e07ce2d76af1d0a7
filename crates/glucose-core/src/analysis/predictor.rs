//! Hour-of-day glucose predictor.
//!
//! Not a learned model: training keeps a feature row per usable reading, and
//! a prediction is the mean glucose of rows recorded within a few hours of
//! the query hour. Confidence grows with the number of such neighbours.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::PredictionConfig;
use crate::models::Reading;

use super::trend::CrisisDirection;

/// Features extracted from one reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureRow {
    /// Day of week, Monday = 0
    pub weekday: u32,
    pub hour: u32,
    pub stress_level: i64,
    pub exercise_minutes: i64,
    pub sleep_hours: f64,
    /// Glucose level (label)
    pub glucose: f64,
}

impl FeatureRow {
    /// Extract features; `None` when the date or hour does not parse.
    pub fn from_reading(reading: &Reading) -> Option<Self> {
        let date = reading.parsed_date()?;
        let hour = reading.hour()?;
        Some(Self {
            weekday: date.weekday().num_days_from_monday(),
            hour,
            stress_level: reading.stress_level,
            exercise_minutes: reading.exercise_minutes,
            sleep_hours: reading.sleep_hours,
            glucose: reading.value(),
        })
    }
}

/// A single-hour prediction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub value: f64,
    /// In `[0, 1]`
    pub confidence: f64,
    /// Rows inside the hour window; 0 means the global mean was used
    pub neighbours: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourlyPrediction {
    pub hour: u32,
    pub prediction: Prediction,
}

/// Predictions for every hour of one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub hourly: Vec<HourlyPrediction>,
    pub average_confidence: f64,
}

impl DayForecast {
    /// Hour with the highest predicted value (earliest on ties).
    pub fn highest(&self) -> Option<&HourlyPrediction> {
        self.hourly.iter().fold(None, |best, entry| match best {
            Some(b) if b.prediction.value >= entry.prediction.value => Some(b),
            _ => Some(entry),
        })
    }

    /// Hour with the lowest predicted value (earliest on ties).
    pub fn lowest(&self) -> Option<&HourlyPrediction> {
        self.hourly.iter().fold(None, |best, entry| match best {
            Some(b) if b.prediction.value <= entry.prediction.value => Some(b),
            _ => Some(entry),
        })
    }
}

/// An hour where a confident prediction leaves the safe band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CriticalTime {
    pub hour: u32,
    pub value: f64,
    pub confidence: f64,
    pub direction: CrisisDirection,
}

/// Nearest-hour mean predictor.
#[derive(Debug, Clone)]
pub struct NaivePredictor {
    config: PredictionConfig,
    rows: Vec<FeatureRow>,
    trained: bool,
}

impl Default for NaivePredictor {
    fn default() -> Self {
        Self::new(&PredictionConfig::default())
    }
}

impl NaivePredictor {
    pub fn new(config: &PredictionConfig) -> Self {
        Self {
            config: config.clone(),
            rows: Vec::new(),
            trained: false,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Feature rows kept by the last successful training.
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Train on a reading history. Returns `false` and stays untrained when
    /// there are too few readings or too few usable rows.
    ///
    /// Readings with an unparseable date or hour are skipped without error.
    pub fn train(&mut self, readings: &[Reading]) -> bool {
        self.rows.clear();
        self.trained = false;

        if readings.len() < self.config.min_readings {
            tracing::warn!(
                available = readings.len(),
                required = self.config.min_readings,
                "Not enough readings to train predictor"
            );
            return false;
        }

        let rows: Vec<FeatureRow> = readings.iter().filter_map(FeatureRow::from_reading).collect();

        let dropped = readings.len() - rows.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Skipped readings with unparseable date or time");
        }

        if rows.len() < self.config.min_feature_rows {
            tracing::warn!(
                usable = rows.len(),
                required = self.config.min_feature_rows,
                "Not enough usable rows to train predictor"
            );
            return false;
        }

        tracing::info!(rows = rows.len(), "Predictor trained");
        self.rows = rows;
        self.trained = true;
        true
    }

    /// Predict glucose at an hour of day. `None` until trained.
    pub fn predict(&self, hour: u32) -> Option<Prediction> {
        if !self.trained || self.rows.is_empty() {
            return None;
        }

        let window = i64::from(self.config.hour_window);
        let neighbours: Vec<f64> = self
            .rows
            .iter()
            .filter(|row| (i64::from(row.hour) - i64::from(hour)).abs() <= window)
            .map(|row| row.glucose)
            .collect();

        let prediction = if neighbours.is_empty() {
            Prediction {
                value: mean(self.rows.iter().map(|row| row.glucose)),
                confidence: self.config.fallback_confidence,
                neighbours: 0,
            }
        } else {
            let confidence = (neighbours.len() as f64 / self.config.neighbours_for_full_confidence)
                .min(self.config.max_confidence);
            Prediction {
                value: mean(neighbours.iter().copied()),
                confidence,
                neighbours: neighbours.len(),
            }
        };
        Some(prediction)
    }

    /// Predict all 24 hours of `date`.
    pub fn forecast_day(&self, date: NaiveDate) -> Option<DayForecast> {
        let hourly = (0..24)
            .map(|hour| {
                self.predict(hour)
                    .map(|prediction| HourlyPrediction { hour, prediction })
            })
            .collect::<Option<Vec<_>>>()?;

        let average_confidence = mean(hourly.iter().map(|h| h.prediction.confidence));
        Some(DayForecast {
            date,
            hourly,
            average_confidence,
        })
    }

    /// Hours predicted below `low` or above `high` with enough confidence.
    pub fn critical_times(&self, forecast: &DayForecast, low: f64, high: f64) -> Vec<CriticalTime> {
        forecast
            .hourly
            .iter()
            .filter(|h| h.prediction.confidence > self.config.critical_confidence)
            .filter_map(|h| {
                let value = h.prediction.value;
                let direction = if value < low {
                    CrisisDirection::Low
                } else if value > high {
                    CrisisDirection::High
                } else {
                    return None;
                };
                Some(CriticalTime {
                    hour: h.hour,
                    value,
                    confidence: h.prediction.confidence,
                    direction,
                })
            })
            .collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(date: &str, time: &str, level: i64) -> Reading {
        Reading::new(date.into(), time.into(), level)
    }

    fn hourly_readings(hours: &[(u32, i64)]) -> Vec<Reading> {
        hours
            .iter()
            .enumerate()
            .map(|(i, (hour, level))| {
                reading(&format!("2024-03-{:02}", i + 1), &format!("{hour:02}:15"), *level)
            })
            .collect()
    }

    #[test]
    fn test_feature_extraction() {
        // 2024-03-04 was a Monday
        let mut r = reading("2024-03-04", "07:30", 110);
        r.stress_level = 7;
        r.exercise_minutes = 30;
        r.sleep_hours = 6.5;

        let row = FeatureRow::from_reading(&r).unwrap();
        assert_eq!(row.weekday, 0);
        assert_eq!(row.hour, 7);
        assert_eq!(row.stress_level, 7);
        assert_eq!(row.exercise_minutes, 30);
        assert_eq!(row.sleep_hours, 6.5);
        assert_eq!(row.glucose, 110.0);

        assert!(FeatureRow::from_reading(&reading("1402/12/11", "07:30", 110)).is_none());
        assert!(FeatureRow::from_reading(&reading("2024-03-04", "morning", 110)).is_none());
    }

    #[test]
    fn test_untrained_predicts_nothing() {
        let predictor = NaivePredictor::default();
        assert!(!predictor.is_trained());
        assert_eq!(predictor.predict(8), None);
        assert_eq!(
            predictor.forecast_day(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            None
        );
    }

    #[test]
    fn test_train_requires_ten_readings() {
        let mut predictor = NaivePredictor::default();
        let nine = hourly_readings(&[(8, 100); 9]);
        assert!(!predictor.train(&nine));
        assert!(!predictor.is_trained());

        let ten = hourly_readings(&[(8, 100); 10]);
        assert!(predictor.train(&ten));
        assert_eq!(predictor.rows().len(), 10);
    }

    #[test]
    fn test_train_requires_five_usable_rows() {
        let mut predictor = NaivePredictor::default();

        let mut input = hourly_readings(&[(8, 100); 10]);
        for r in &mut input[4..] {
            r.date = "not a date".into();
        }
        assert!(!predictor.train(&input));
        assert_eq!(predictor.predict(8), None);

        input[4].date = "2024-03-20".into();
        assert!(predictor.train(&input));
        assert_eq!(predictor.rows().len(), 5);
    }

    #[test]
    fn test_failed_retrain_resets() {
        let mut predictor = NaivePredictor::default();
        assert!(predictor.train(&hourly_readings(&[(8, 100); 10])));
        assert!(!predictor.train(&hourly_readings(&[(8, 100); 3])));
        assert!(!predictor.is_trained());
    }

    #[test]
    fn test_neighbour_mean_and_confidence() {
        let mut predictor = NaivePredictor::default();
        let mut hours = vec![(7, 100), (8, 110), (9, 120), (10, 130)];
        hours.extend([(20, 200); 6]);
        assert!(predictor.train(&hourly_readings(&hours)));

        let prediction = predictor.predict(8).unwrap();
        assert_eq!(prediction.neighbours, 4);
        assert!((prediction.value - 115.0).abs() < 1e-9);
        assert!((prediction.confidence - 0.4).abs() < 1e-9);

        // Window is inclusive of +/-2 and does not wrap past midnight
        let edge = predictor.predict(22).unwrap();
        assert_eq!(edge.neighbours, 6);
        let midnight = predictor.predict(0).unwrap();
        assert_eq!(midnight.neighbours, 0);
    }

    #[test]
    fn test_confidence_capped() {
        let mut predictor = NaivePredictor::default();
        assert!(predictor.train(&hourly_readings(&[(12, 100); 15])));
        let prediction = predictor.predict(12).unwrap();
        assert_eq!(prediction.confidence, 0.9);
    }

    #[test]
    fn test_no_neighbours_uses_global_mean() {
        let mut predictor = NaivePredictor::default();
        let mut hours = vec![(10, 100); 4];
        hours.extend([(11, 120); 3]);
        hours.extend([(20, 160); 3]);
        assert!(predictor.train(&hourly_readings(&hours)));

        let prediction = predictor.predict(14).unwrap();
        assert_eq!(prediction.neighbours, 0);
        assert_eq!(prediction.confidence, 0.3);
        assert!((prediction.value - 124.0).abs() < 1e-9);
    }

    #[test]
    fn test_forecast_and_critical_times() {
        let mut predictor = NaivePredictor::default();
        let mut hours = vec![(3, 60); 6];
        hours.extend([(15, 200); 6]);
        assert!(predictor.train(&hourly_readings(&hours)));

        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let forecast = predictor.forecast_day(date).unwrap();
        assert_eq!(forecast.date, date);
        assert_eq!(forecast.hourly.len(), 24);
        assert_eq!(forecast.highest().unwrap().hour, 13);
        assert_eq!(forecast.lowest().unwrap().hour, 1);

        let critical = predictor.critical_times(&forecast, 70.0, 180.0);
        let low_hours: Vec<u32> = critical
            .iter()
            .filter(|c| c.direction == CrisisDirection::Low)
            .map(|c| c.hour)
            .collect();
        let high_hours: Vec<u32> = critical
            .iter()
            .filter(|c| c.direction == CrisisDirection::High)
            .map(|c| c.hour)
            .collect();
        assert_eq!(low_hours, vec![1, 2, 3, 4, 5]);
        assert_eq!(high_hours, vec![13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let mut predictor = NaivePredictor::default();
        let input = hourly_readings(&[
            (6, 90),
            (7, 95),
            (8, 140),
            (9, 150),
            (12, 170),
            (13, 160),
            (18, 130),
            (19, 120),
            (21, 110),
            (22, 100),
        ]);
        assert!(predictor.train(&input));
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(predictor.forecast_day(date), predictor.forecast_day(date));
    }
}
