//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Measurement system a user prefers to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Profile fields of the `users/{uid}` document, shared with the mobile
/// client and written with merge semantics.
///
/// Height and weight are always stored in metric units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    /// Whole centimeters
    #[serde(default, rename = "height")]
    pub height_cm: Option<u32>,
    /// Kilograms
    #[serde(default, rename = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

/// Firestore field names of `UserProfile`, the mask for merge writes.
pub const PROFILE_FIELDS: [&str; 8] = [
    "displayName",
    "email",
    "age",
    "gender",
    "height",
    "weight",
    "unitSystem",
    "updatedAt",
];
