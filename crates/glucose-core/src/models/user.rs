//! User profile and glucose targets.

use serde::{Deserialize, Serialize};

use crate::config::DefaultUser;

/// Per-user settings shown in the settings dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSettings {
    pub id: i64,
    pub username: String,
    pub age: i64,
    pub gender: String,
    /// Personal target range lower bound (mg/dL)
    pub target_glucose_min: i64,
    /// Personal target range upper bound (mg/dL)
    pub target_glucose_max: i64,
}

impl UserSettings {
    /// Build settings for `id` from the configured defaults.
    pub fn from_defaults(id: i64, defaults: &DefaultUser) -> Self {
        Self {
            id,
            username: defaults.username.clone(),
            age: defaults.age,
            gender: defaults.gender.clone(),
            target_glucose_min: defaults.target_glucose_min,
            target_glucose_max: defaults.target_glucose_max,
        }
    }
}

