//! Trend analysis over a window of readings.
//!
//! Two independent trend signals are produced and both are reported:
//! - the least-squares slope of value against sequence index, and
//! - a short-term comparison of the newest and oldest few readings.
//!
//! They can disagree (a long rise ending in a dip, for instance); callers
//! surface both as they are.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, GlucoseRanges};
use crate::models::{Mood, Reading};

/// Direction of the fitted slope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl TrendDirection {
    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "صعودی",
            TrendDirection::Falling => "نزولی",
            TrendDirection::Stable => "ثابت",
        }
    }
}

/// Newest-vs-oldest window comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShortTermTrend {
    Increasing,
    Decreasing,
    Steady,
}

/// Which side of the crisis band a reading fell on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrisisDirection {
    Low,
    High,
}

impl CrisisDirection {
    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            CrisisDirection::Low => "پایین",
            CrisisDirection::High => "بالا",
        }
    }
}

/// A reading outside the crisis band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrisisEntry {
    pub reading_id: String,
    pub date: String,
    pub time: String,
    pub value: f64,
    pub direction: CrisisDirection,
}

/// Descriptive statistics and trend signals for a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Least-squares slope in mg/dL per reading
    pub slope: f64,
    pub trend: TrendDirection,
    /// Mean of the newest readings
    pub recent_average: f64,
    /// Mean of the oldest readings
    pub older_average: f64,
    pub short_term: ShortTermTrend,
    pub crises: Vec<CrisisEntry>,
}

/// Result of [`TrendAnalyzer::analyze`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TrendAnalysis {
    InsufficientData { available: usize, required: usize },
    Summary(TrendSummary),
}

impl TrendAnalysis {
    /// The summary, if enough data was available.
    pub fn summary(&self) -> Option<&TrendSummary> {
        match self {
            TrendAnalysis::Summary(summary) => Some(summary),
            TrendAnalysis::InsufficientData { .. } => None,
        }
    }
}

/// Average glucose per mood, best (lowest) and worst (highest).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodCorrelation {
    pub best_mood: Mood,
    pub best_average: f64,
    pub worst_mood: Mood,
    pub worst_average: f64,
}

/// Whole-history statistics for the detailed statistics view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingStatistics {
    pub total: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub normal_count: usize,
    pub high_count: usize,
    pub low_count: usize,
    /// Estimated HbA1c (%)
    pub estimated_hba1c: f64,
    pub mood_correlation: Option<MoodCorrelation>,
}

/// Minimum readings for a mood correlation.
const MIN_READINGS_FOR_MOOD: usize = 10;

/// Standard deviation above which variability advice is given.
const HIGH_VARIABILITY_STD: f64 = 30.0;

/// Trend analyzer.
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    config: AnalysisConfig,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl TrendAnalyzer {
    /// Create an analyzer.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Analyze readings ordered oldest first, with the given crisis band.
    pub fn analyze(&self, readings: &[Reading], low: f64, high: f64) -> TrendAnalysis {
        let required = self.config.min_readings;
        if readings.len() < required || readings.is_empty() {
            return TrendAnalysis::InsufficientData {
                available: readings.len(),
                required,
            };
        }

        let values: Vec<f64> = readings.iter().map(Reading::value).collect();
        let mean = mean(&values);
        let std_dev = population_std_dev(&values, mean);
        let slope = least_squares_slope(&values);

        let trend = if slope > self.config.slope_threshold {
            TrendDirection::Rising
        } else if slope < -self.config.slope_threshold {
            TrendDirection::Falling
        } else {
            TrendDirection::Stable
        };

        let window = self.config.short_term_window.clamp(1, values.len());
        let older_average = self::mean(&values[..window]);
        let recent_average = self::mean(&values[values.len() - window..]);
        let short_term = if recent_average > older_average + self.config.short_term_delta {
            ShortTermTrend::Increasing
        } else if recent_average < older_average - self.config.short_term_delta {
            ShortTermTrend::Decreasing
        } else {
            ShortTermTrend::Steady
        };

        TrendAnalysis::Summary(TrendSummary {
            count: values.len(),
            mean,
            std_dev,
            slope,
            trend,
            recent_average,
            older_average,
            short_term,
            crises: detect_crises(readings, low, high),
        })
    }

    /// Analyze with the configured crisis band.
    pub fn analyze_default(&self, readings: &[Reading]) -> TrendAnalysis {
        self.analyze(readings, self.config.crisis_low, self.config.crisis_high)
    }

    /// Persian advice derived from a summary.
    pub fn recommendations(&self, summary: &TrendSummary) -> Vec<String> {
        let mut recommendations = Vec::new();

        match summary.trend {
            TrendDirection::Rising => recommendations
                .push("روند قند خون شما صعودی است. لطفاً با پزشک خود مشورت کنید.".to_string()),
            TrendDirection::Falling => recommendations
                .push("روند قند خون شما نزولی است. مراقب افت قند خون باشید.".to_string()),
            TrendDirection::Stable => {}
        }

        if summary.std_dev > HIGH_VARIABILITY_STD {
            recommendations.push(
                "تغییرات قند خون شما زیاد است. سعی کنید رژیم غذایی خود را منظم‌تر کنید."
                    .to_string(),
            );
        }

        if summary.mean > self.config.crisis_high {
            recommendations.push(
                "میانگین قند خون شما بالاست. رژیم غذایی و فعالیت بدنی خود را بررسی کنید."
                    .to_string(),
            );
        } else if summary.mean < self.config.crisis_low {
            recommendations.push("میانگین قند خون شما پایین است. با پزشک خود مشورت کنید.".to_string());
        }

        recommendations
    }

    /// Statistics for the whole history. `None` for an empty slice.
    pub fn statistics(&self, readings: &[Reading], ranges: &GlucoseRanges) -> Option<ReadingStatistics> {
        if readings.is_empty() {
            return None;
        }

        let values: Vec<f64> = readings.iter().map(Reading::value).collect();
        let mean = mean(&values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let low_count = values.iter().filter(|v| **v < ranges.dangerous_low).count();
        let high_count = values.iter().filter(|v| **v > ranges.normal_max).count();
        let normal_count = values.len() - low_count - high_count;

        Some(ReadingStatistics {
            total: values.len(),
            mean,
            min,
            max,
            normal_count,
            high_count,
            low_count,
            estimated_hba1c: estimate_hba1c(mean),
            mood_correlation: mood_correlation(readings),
        })
    }
}

/// Every reading strictly below `low` or strictly above `high`, in input order.
pub fn detect_crises(readings: &[Reading], low: f64, high: f64) -> Vec<CrisisEntry> {
    readings
        .iter()
        .filter_map(|reading| {
            let value = reading.value();
            let direction = if value < low {
                CrisisDirection::Low
            } else if value > high {
                CrisisDirection::High
            } else {
                return None;
            };
            Some(CrisisEntry {
                reading_id: reading.id.clone(),
                date: reading.date.clone(),
                time: reading.time.clone(),
                value,
                direction,
            })
        })
        .collect()
}

/// Estimated HbA1c (%) from mean glucose (ADA formula), two decimals.
pub fn estimate_hba1c(mean_glucose: f64) -> f64 {
    round_to((mean_glucose + 46.7) / 28.7, 2)
}

/// Mean glucose per mood. Needs at least ten readings and two distinct moods.
pub fn mood_correlation(readings: &[Reading]) -> Option<MoodCorrelation> {
    if readings.len() < MIN_READINGS_FOR_MOOD {
        return None;
    }

    // Fixed mood order keeps ties deterministic
    let averages: Vec<(Mood, f64)> = Mood::ALL
        .into_iter()
        .filter_map(|mood| {
            let values: Vec<f64> = readings
                .iter()
                .filter(|r| r.mood == mood)
                .map(Reading::value)
                .collect();
            (!values.is_empty()).then(|| (mood, self::mean(&values)))
        })
        .collect();

    if averages.len() < 2 {
        return None;
    }

    let mut best = averages[0];
    let mut worst = averages[0];
    for &(mood, average) in &averages[1..] {
        if average < best.1 {
            best = (mood, average);
        }
        if average > worst.1 {
            worst = (mood, average);
        }
    }

    Some(MoodCorrelation {
        best_mood: best.0,
        best_average: best.1,
        worst_mood: worst.0,
        worst_average: worst.1,
    })
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Slope of the least-squares line through `(index, value)`.
fn least_squares_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let x_mean = (values.len() - 1) as f64 / 2.0;
    let y_mean = mean(values);

    let (covariance, x_variance) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(cov, var), (i, y)| {
            let dx = i as f64 - x_mean;
            (cov + dx * (y - y_mean), var + dx * dx)
        },
    );

    if x_variance == 0.0 {
        return 0.0;
    }
    covariance / x_variance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(values: &[i64]) -> Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Reading::new(format!("2024-03-{:02}", i + 1), "08:00".into(), *v))
            .collect()
    }

    fn summary(values: &[i64]) -> TrendSummary {
        TrendAnalyzer::default()
            .analyze_default(&readings(values))
            .summary()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_insufficient_data() {
        let analyzer = TrendAnalyzer::default();
        assert_eq!(
            analyzer.analyze_default(&[]),
            TrendAnalysis::InsufficientData {
                available: 0,
                required: 5
            }
        );
        assert!(matches!(
            analyzer.analyze_default(&readings(&[100, 110, 120, 130])),
            TrendAnalysis::InsufficientData { available: 4, .. }
        ));
    }

    #[test]
    fn test_constant_sequence() {
        let s = summary(&[100, 100, 100, 100, 100, 100, 100]);
        assert_eq!(s.mean, 100.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.slope, 0.0);
        assert_eq!(s.trend, TrendDirection::Stable);
        assert_eq!(s.short_term, ShortTermTrend::Steady);
        assert!(s.crises.is_empty());
    }

    #[test]
    fn test_rising_and_falling() {
        let rising = summary(&[100, 102, 104, 106, 108]);
        assert!((rising.slope - 2.0).abs() < 1e-9);
        assert_eq!(rising.trend, TrendDirection::Rising);

        let falling = summary(&[108, 106, 104, 102, 100]);
        assert!((falling.slope + 2.0).abs() < 1e-9);
        assert_eq!(falling.trend, TrendDirection::Falling);
    }

    #[test]
    fn test_slope_threshold_is_exclusive() {
        // Slope exactly 0.5 is still stable
        let s = summary(&[100, 98, 100, 101, 101]);
        assert!((s.slope - 0.5).abs() < 1e-9);
        assert_eq!(s.trend, TrendDirection::Stable);
    }

    #[test]
    fn test_population_std_dev() {
        let s = summary(&[90, 110, 90, 110, 90, 110]);
        assert!((s.std_dev - 10.0).abs() < 1e-9);
        assert!((s.mean - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_term_uses_window_ends() {
        // 10 readings: oldest five average 100, newest five average 130
        let s = summary(&[100, 100, 100, 100, 100, 130, 130, 130, 130, 130]);
        assert_eq!(s.older_average, 100.0);
        assert_eq!(s.recent_average, 130.0);
        assert_eq!(s.short_term, ShortTermTrend::Increasing);
    }

    #[test]
    fn test_signals_can_disagree() {
        // Late spike in the oldest window, late rise in the newest one
        let s = summary(&[60, 60, 60, 60, 300, 60, 60, 60, 60, 100]);
        assert!((s.slope - 60.0 / 82.5).abs() < 1e-9);
        assert_eq!(s.trend, TrendDirection::Rising);
        assert_eq!(s.older_average, 108.0);
        assert_eq!(s.recent_average, 68.0);
        assert_eq!(s.short_term, ShortTermTrend::Decreasing);
    }

    #[test]
    fn test_crisis_entries() {
        let s = summary(&[65, 100, 190, 120, 180, 70]);
        assert_eq!(s.crises.len(), 2);
        assert_eq!(s.crises[0].value, 65.0);
        assert_eq!(s.crises[0].direction, CrisisDirection::Low);
        assert_eq!(s.crises[1].value, 190.0);
        assert_eq!(s.crises[1].direction, CrisisDirection::High);
    }

    #[test]
    fn test_custom_crisis_band() {
        let analyzer = TrendAnalyzer::default();
        let analysis = analyzer.analyze(&readings(&[100, 120, 140, 160, 200]), 110.0, 150.0);
        let crises = &analysis.summary().unwrap().crises;
        assert_eq!(crises.len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let input = readings(&[95, 130, 88, 210, 140, 77, 160]);
        let analyzer = TrendAnalyzer::default();
        assert_eq!(analyzer.analyze_default(&input), analyzer.analyze_default(&input));
    }

    #[test]
    fn test_recommendations() {
        let analyzer = TrendAnalyzer::default();

        let s = summary(&[150, 180, 210, 240, 270]);
        let advice = analyzer.recommendations(&s);
        assert_eq!(advice.len(), 3);
        assert!(advice[0].contains("صعودی"));

        let calm = summary(&[100, 100, 100, 100, 100]);
        assert!(analyzer.recommendations(&calm).is_empty());
    }

    #[test]
    fn test_statistics() {
        let analyzer = TrendAnalyzer::default();
        let stats = analyzer
            .statistics(&readings(&[60, 100, 140, 141, 200]), &GlucoseRanges::default())
            .unwrap();

        assert_eq!(stats.total, 5);
        assert_eq!(stats.min, 60.0);
        assert_eq!(stats.max, 200.0);
        assert_eq!(stats.low_count, 1);
        assert_eq!(stats.normal_count, 2);
        assert_eq!(stats.high_count, 2);
        assert_eq!(stats.estimated_hba1c, estimate_hba1c(128.2));
        assert!(stats.mood_correlation.is_none());

        assert!(analyzer.statistics(&[], &GlucoseRanges::default()).is_none());
    }

    #[test]
    fn test_hba1c_estimate() {
        assert_eq!(estimate_hba1c(154.0), 6.99);
        assert_eq!(estimate_hba1c(126.0), 6.02);
    }

    #[test]
    fn test_mood_correlation() {
        let mut input = readings(&[90, 95, 100, 105, 110, 150, 160, 170, 180, 190]);
        for r in &mut input[5..] {
            r.mood = Mood::Bad;
        }
        for r in &mut input[..5] {
            r.mood = Mood::Good;
        }

        let correlation = mood_correlation(&input).unwrap();
        assert_eq!(correlation.best_mood, Mood::Good);
        assert_eq!(correlation.best_average, 100.0);
        assert_eq!(correlation.worst_mood, Mood::Bad);
        assert_eq!(correlation.worst_average, 170.0);

        // Single mood: nothing to compare
        for r in &mut input {
            r.mood = Mood::Neutral;
        }
        assert!(mood_correlation(&input).is_none());
    }
}
