//! Carbohydrate lookup and menu suggestions.
//!
//! Food names are Persian. Lookup tries an exact match first and falls back
//! to the closest name by Jaro-Winkler similarity.

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Minimum similarity for a fuzzy name match.
const MIN_NAME_SIMILARITY: f64 = 0.85;

/// Carbohydrates in grams per 100 g of food.
const CARBS_PER_100G: &[(&str, f64)] = &[
    ("برنج", 28.0),
    ("نان", 50.0),
    ("سیب زمینی", 17.0),
    ("سیب", 14.0),
    ("خرما", 75.0),
    ("شیر", 5.0),
    ("ماکارونی", 25.0),
    ("پرتقال", 12.0),
    ("شکلات", 60.0),
    ("کیک", 55.0),
    ("موز", 23.0),
    ("ماست", 4.0),
    ("گوشت", 0.0),
    ("مرغ", 0.0),
    ("ماهی", 0.0),
    ("تخم مرغ", 1.0),
    ("عدس", 20.0),
    ("لوبیا", 19.0),
    ("نخود", 21.0),
    ("بیسکویت", 70.0),
    ("آبمیوه", 10.0),
    ("نوشابه", 11.0),
];

/// Expected effect of a portion on blood glucose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseImpact {
    Low,
    Moderate,
    High,
}

impl GlucoseImpact {
    /// Persian display label.
    pub fn label(&self) -> &'static str {
        match self {
            GlucoseImpact::Low => "کم",
            GlucoseImpact::Moderate => "متوسط",
            GlucoseImpact::High => "زیاد",
        }
    }
}

/// Carbohydrate estimate for a portion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarbEstimate {
    /// Table name the input resolved to
    pub food: String,
    pub grams: f64,
    pub carbs: f64,
    pub impact: GlucoseImpact,
}

/// Impact band for a carbohydrate amount in grams.
pub fn glucose_impact(carbs: f64) -> GlucoseImpact {
    if carbs > 30.0 {
        GlucoseImpact::High
    } else if carbs > 15.0 {
        GlucoseImpact::Moderate
    } else {
        GlucoseImpact::Low
    }
}

/// Names in the carbohydrate table.
pub fn known_foods() -> impl Iterator<Item = &'static str> {
    CARBS_PER_100G.iter().map(|(name, _)| *name)
}

/// Resolve a food name to a table entry.
pub fn lookup_food(name: &str) -> Option<(&'static str, f64)> {
    let query = normalize(name);
    if query.is_empty() {
        return None;
    }

    if let Some(&(food, carbs)) = CARBS_PER_100G.iter().find(|(food, _)| *food == query) {
        return Some((food, carbs));
    }

    let mut best: Option<(&'static str, f64, f64)> = None;
    for &(food, carbs) in CARBS_PER_100G {
        let score = jaro_winkler(&query, food);
        if score >= MIN_NAME_SIMILARITY && best.map_or(true, |(_, _, s)| score > s) {
            best = Some((food, carbs, score));
        }
    }

    if let Some((food, _, score)) = best {
        tracing::debug!(query = %query, food, score, "Fuzzy food match");
    }
    best.map(|(food, carbs, _)| (food, carbs))
}

/// Carbohydrates in `grams` of the named food. `None` for unknown foods or
/// a non-positive portion.
pub fn carbs_for(name: &str, grams: f64) -> Option<CarbEstimate> {
    if !grams.is_finite() || grams <= 0.0 {
        return None;
    }

    let (food, per_100g) = lookup_food(name)?;
    let carbs = per_100g * grams / 100.0;
    Some(CarbEstimate {
        food: food.to_string(),
        grams,
        carbs,
        impact: glucose_impact(carbs),
    })
}

/// Menu suggestion for a mean glucose level.
pub fn suggest_menu(mean_glucose: f64) -> &'static str {
    if mean_glucose < 80.0 {
        "مصرف غذاهای پرکربوهیدرات با کنترل پزشک"
    } else if mean_glucose > 180.0 {
        "پرهیز از قند و کربوهیدرات بالا، مصرف سبزیجات و پروتئین"
    } else {
        "رژیم متعادل با میوه، سبزیجات و غلات کامل"
    }
}

/// Trim, turn zero-width non-joiners into spaces and collapse whitespace.
fn normalize(name: &str) -> String {
    name.replace('\u{200c}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let estimate = carbs_for("برنج", 200.0).unwrap();
        assert_eq!(estimate.food, "برنج");
        assert_eq!(estimate.carbs, 56.0);
        assert_eq!(estimate.impact, GlucoseImpact::High);

        // Exact match wins over a longer name with the same prefix
        assert_eq!(lookup_food("سیب").unwrap().0, "سیب");
        assert_eq!(lookup_food(" سیب  زمینی ").unwrap().0, "سیب زمینی");
    }

    #[test]
    fn test_zwnj_spelling() {
        assert_eq!(lookup_food("تخم‌مرغ").unwrap(), ("تخم مرغ", 1.0));
    }

    #[test]
    fn test_fuzzy_lookup() {
        assert_eq!(lookup_food("ماکارونى").map(|(food, _)| food), Some("ماکارونی"));
        assert_eq!(lookup_food("پیتزا"), None);
        assert_eq!(lookup_food("   "), None);
    }

    #[test]
    fn test_invalid_portion() {
        assert!(carbs_for("نان", 0.0).is_none());
        assert!(carbs_for("نان", f64::NAN).is_none());
    }

    #[test]
    fn test_impact_bands() {
        assert_eq!(glucose_impact(15.0), GlucoseImpact::Low);
        assert_eq!(glucose_impact(15.5), GlucoseImpact::Moderate);
        assert_eq!(glucose_impact(30.0), GlucoseImpact::Moderate);
        assert_eq!(glucose_impact(30.1), GlucoseImpact::High);
    }

    #[test]
    fn test_menu_suggestion() {
        assert!(suggest_menu(75.0).contains("پرکربوهیدرات"));
        assert!(suggest_menu(80.0).contains("متعادل"));
        assert!(suggest_menu(180.0).contains("متعادل"));
        assert!(suggest_menu(181.0).contains("پرهیز"));
    }

    #[test]
    fn test_table_names_unique() {
        let mut names: Vec<&str> = known_foods().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
