//! Golden tests for glucose and blood pressure classification.
//!
//! These tests pin the band boundaries of the default threshold table.

use glucose_core::analysis::{
    classify_blood_pressure_text, BloodPressureCategory, GlucoseCategory, GlucoseClassifier,
};

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected_category: GlucoseCategory,
    expected_severity: Option<u8>,
    expected_label: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "just-below-dangerous-low",
            input: "69",
            expected_category: GlucoseCategory::DangerousLow,
            expected_severity: Some(2),
            expected_label: "پایین (خطرناک)",
        },
        GoldenCase {
            id: "dangerous-low-boundary",
            input: "70",
            expected_category: GlucoseCategory::Low,
            expected_severity: Some(1),
            expected_label: "پایین",
        },
        GoldenCase {
            id: "top-of-low",
            input: "79",
            expected_category: GlucoseCategory::Low,
            expected_severity: Some(1),
            expected_label: "پایین",
        },
        GoldenCase {
            id: "normal-lower-boundary",
            input: "80",
            expected_category: GlucoseCategory::Normal,
            expected_severity: Some(0),
            expected_label: "طبیعی",
        },
        GoldenCase {
            id: "normal-upper-boundary",
            input: "140",
            expected_category: GlucoseCategory::Normal,
            expected_severity: Some(0),
            expected_label: "طبیعی",
        },
        GoldenCase {
            id: "just-high",
            input: "141",
            expected_category: GlucoseCategory::High,
            expected_severity: Some(1),
            expected_label: "بالا",
        },
        GoldenCase {
            id: "high-upper-boundary",
            input: "180",
            expected_category: GlucoseCategory::High,
            expected_severity: Some(1),
            expected_label: "بالا",
        },
        GoldenCase {
            id: "dangerous-high",
            input: "181",
            expected_category: GlucoseCategory::DangerousHigh,
            expected_severity: Some(2),
            expected_label: "خطرناک بالا",
        },
        GoldenCase {
            id: "fractional-value",
            input: "79.5",
            expected_category: GlucoseCategory::Low,
            expected_severity: Some(1),
            expected_label: "پایین",
        },
        GoldenCase {
            id: "padded-text",
            input: "  120 ",
            expected_category: GlucoseCategory::Normal,
            expected_severity: Some(0),
            expected_label: "طبیعی",
        },
        GoldenCase {
            id: "non-numeric",
            input: "high",
            expected_category: GlucoseCategory::Invalid,
            expected_severity: None,
            expected_label: "مقدار نامعتبر",
        },
        GoldenCase {
            id: "empty",
            input: "",
            expected_category: GlucoseCategory::Invalid,
            expected_severity: None,
            expected_label: "مقدار نامعتبر",
        },
    ]
}

#[test]
fn test_golden_glucose_cases() {
    let classifier = GlucoseClassifier::default();

    for case in get_golden_cases() {
        let result = classifier.classify_text(case.input);
        assert_eq!(
            result.category, case.expected_category,
            "Case {}: category mismatch",
            case.id
        );
        assert_eq!(
            result.severity, case.expected_severity,
            "Case {}: severity mismatch",
            case.id
        );
        assert_eq!(
            result.category.label(),
            case.expected_label,
            "Case {}: label mismatch",
            case.id
        );
    }
}

#[test]
fn test_all_blood_pressure_bands() {
    let bp_tests = vec![
        ("85", "55", BloodPressureCategory::Hypotension),
        ("119", "79", BloodPressureCategory::Normal),
        ("120", "79", BloodPressureCategory::Elevated),
        ("129", "70", BloodPressureCategory::Elevated),
        ("130", "70", BloodPressureCategory::HypertensionStage1),
        ("110", "80", BloodPressureCategory::HypertensionStage1),
        ("140", "70", BloodPressureCategory::HypertensionStage2),
        ("125", "90", BloodPressureCategory::HypertensionStage2),
        ("179", "119", BloodPressureCategory::HypertensionStage2),
        ("180", "100", BloodPressureCategory::HypertensionStage2),
        ("180", "70", BloodPressureCategory::HypertensiveCrisis),
        ("150", "120", BloodPressureCategory::HypertensionStage2),
        ("185", "125", BloodPressureCategory::HypertensiveCrisis),
        ("abc", "80", BloodPressureCategory::Invalid),
        ("120", "", BloodPressureCategory::Invalid),
    ];

    for (systolic, diastolic, expected) in bp_tests {
        let result = classify_blood_pressure_text(systolic, diastolic);
        assert_eq!(
            result, expected,
            "{}/{} should be {:?}, got {:?}",
            systolic, diastolic, expected, result
        );
    }
}
