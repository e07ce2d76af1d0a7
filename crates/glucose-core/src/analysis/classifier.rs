//! Glucose and blood pressure band classification.
//!
//! Bands are checked lowest threshold first, so a value sitting exactly on
//! a boundary resolves to the first band whose condition holds.

use serde::{Deserialize, Serialize};

use crate::config::GlucoseRanges;

/// Glucose risk band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseCategory {
    DangerousLow,
    Low,
    Normal,
    High,
    DangerousHigh,
    /// Input was not a finite number
    Invalid,
}

impl GlucoseCategory {
    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            GlucoseCategory::DangerousLow => "پایین (خطرناک)",
            GlucoseCategory::Low => "پایین",
            GlucoseCategory::Normal => "طبیعی",
            GlucoseCategory::High => "بالا",
            GlucoseCategory::DangerousHigh => "خطرناک بالا",
            GlucoseCategory::Invalid => "مقدار نامعتبر",
        }
    }

    /// Distance from the normal band: 0 normal, 1 warning, 2 dangerous.
    /// `None` for invalid input.
    pub fn severity(&self) -> Option<u8> {
        match self {
            GlucoseCategory::Normal => Some(0),
            GlucoseCategory::Low | GlucoseCategory::High => Some(1),
            GlucoseCategory::DangerousLow | GlucoseCategory::DangerousHigh => Some(2),
            GlucoseCategory::Invalid => None,
        }
    }
}

/// Category plus its severity ordinal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub category: GlucoseCategory,
    pub severity: Option<u8>,
}

impl From<GlucoseCategory> for Classification {
    fn from(category: GlucoseCategory) -> Self {
        Self {
            category,
            severity: category.severity(),
        }
    }
}

/// Classifier over a fixed threshold table.
#[derive(Debug, Clone)]
pub struct GlucoseClassifier {
    ranges: GlucoseRanges,
}

impl Default for GlucoseClassifier {
    fn default() -> Self {
        Self::new(&GlucoseRanges::default())
    }
}

impl GlucoseClassifier {
    /// Create a classifier for the given thresholds.
    pub fn new(ranges: &GlucoseRanges) -> Self {
        Self {
            ranges: ranges.clone(),
        }
    }

    /// Thresholds in use.
    pub fn ranges(&self) -> &GlucoseRanges {
        &self.ranges
    }

    /// Classify a glucose value in mg/dL.
    pub fn classify(&self, value: f64) -> Classification {
        let category = if !value.is_finite() {
            GlucoseCategory::Invalid
        } else if value < self.ranges.dangerous_low {
            GlucoseCategory::DangerousLow
        } else if value < self.ranges.low {
            GlucoseCategory::Low
        } else if value <= self.ranges.normal_max {
            GlucoseCategory::Normal
        } else if value <= self.ranges.high {
            GlucoseCategory::High
        } else {
            GlucoseCategory::DangerousHigh
        };
        category.into()
    }

    /// Classify raw text; anything that is not a number is `Invalid`.
    pub fn classify_text(&self, raw: &str) -> Classification {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.classify(value),
            Err(_) => GlucoseCategory::Invalid.into(),
        }
    }
}

/// Blood pressure category per the common clinical cutoffs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Hypotension,
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
    HypertensiveCrisis,
    Invalid,
}

impl BloodPressureCategory {
    /// Persian display label with the English term.
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Hypotension => "فشار خون پایین (Hypotension)",
            BloodPressureCategory::Normal => "نرمال (Normal)",
            BloodPressureCategory::Elevated => "بالا رفته (Elevated)",
            BloodPressureCategory::HypertensionStage1 => {
                "فشار خون بالا - مرحله 1 (Hypertension Stage 1)"
            }
            BloodPressureCategory::HypertensionStage2 => {
                "فشار خون بالا - مرحله 2 (Hypertension Stage 2)"
            }
            BloodPressureCategory::HypertensiveCrisis => {
                "بحران فشار خون (Hypertensive Crisis) - فوراً به پزشک مراجعه کنید!"
            }
            BloodPressureCategory::Invalid => "مقادیر نامعتبر",
        }
    }

    /// 0 normal, 1 hypotension or elevated, 2 stage 1, 3 stage 2, 4 crisis.
    pub fn severity(&self) -> Option<u8> {
        match self {
            BloodPressureCategory::Normal => Some(0),
            BloodPressureCategory::Hypotension | BloodPressureCategory::Elevated => Some(1),
            BloodPressureCategory::HypertensionStage1 => Some(2),
            BloodPressureCategory::HypertensionStage2 => Some(3),
            BloodPressureCategory::HypertensiveCrisis => Some(4),
            BloodPressureCategory::Invalid => None,
        }
    }
}

/// Classify a systolic/diastolic pair in mmHg.
pub fn classify_blood_pressure(systolic: i64, diastolic: i64) -> BloodPressureCategory {
    if systolic < 90 || diastolic < 60 {
        BloodPressureCategory::Hypotension
    } else if systolic < 120 && diastolic < 80 {
        BloodPressureCategory::Normal
    } else if (120..=129).contains(&systolic) && diastolic < 80 {
        BloodPressureCategory::Elevated
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        BloodPressureCategory::HypertensionStage1
    } else if (140..=179).contains(&systolic) || (90..=119).contains(&diastolic) {
        BloodPressureCategory::HypertensionStage2
    } else {
        BloodPressureCategory::HypertensiveCrisis
    }
}

/// Classify raw text pair; non-integer input is `Invalid`.
pub fn classify_blood_pressure_text(systolic: &str, diastolic: &str) -> BloodPressureCategory {
    match (systolic.trim().parse(), diastolic.trim().parse()) {
        (Ok(s), Ok(d)) => classify_blood_pressure(s, d),
        _ => BloodPressureCategory::Invalid,
    }
}
