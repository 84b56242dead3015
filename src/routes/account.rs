// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile, reminder preference and account routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ReminderKind, ReminderSettings, UnitSystem, UserProfile};
use crate::services::units::{cm_to_feet_inches, feet_inches_to_cm, kg_to_lb, lb_to_kg};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_HEIGHT_CM: u32 = 300;
const MAX_WEIGHT_KG: f64 = 700.0;

/// Account routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/reminders", get(get_reminders).put(update_reminders))
        .route("/api/account", delete(delete_account))
}

// ─── Profile ─────────────────────────────────────────────────

/// Height as entered by the user.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum HeightInput {
    Metric { cm: u32 },
    Imperial { feet: u32, inches: u32 },
}

impl HeightInput {
    /// Canonical height in whole centimeters.
    pub fn to_cm(self) -> Result<u32> {
        let cm = match self {
            HeightInput::Metric { cm } => cm,
            HeightInput::Imperial { feet, inches } => {
                if inches >= 12 {
                    return Err(AppError::BadRequest(
                        "Inches must be less than 12".to_string(),
                    ));
                }
                feet_inches_to_cm(feet, inches)
            }
        };
        if cm > MAX_HEIGHT_CM {
            return Err(AppError::BadRequest("Height is out of range".to_string()));
        }
        Ok(cm)
    }
}

/// Weight as entered by the user.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum WeightInput {
    Metric { kg: f64 },
    Imperial { lb: f64 },
}

impl WeightInput {
    /// Canonical weight in kilograms.
    pub fn to_kg(self) -> Result<f64> {
        let (value, kg) = match self {
            WeightInput::Metric { kg } => (kg, kg),
            WeightInput::Imperial { lb } => (lb, lb_to_kg(lb)),
        };
        // lb_to_kg maps negatives to 0, so check the raw value too
        if value < 0.0 || !(0.0..=MAX_WEIGHT_KG).contains(&kg) {
            return Err(AppError::BadRequest("Weight is out of range".to_string()));
        }
        Ok(kg)
    }
}

/// Profile update. Fields left out keep their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(max = 60))]
    pub display_name: Option<String>,
    /// Contact address; an empty string clears it
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
    #[validate(range(max = 130))]
    pub age: Option<u32>,
    #[validate(length(max = 30))]
    pub gender: Option<String>,
    pub height: Option<HeightInput>,
    pub weight: Option<WeightInput>,
    pub unit_system: Option<UnitSystem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HeightView {
    pub cm: u32,
    pub feet: u32,
    pub inches: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightView {
    pub kg: f64,
    pub lb: u32,
}

/// Profile with height and weight in both unit systems.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub display_name: String,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub gender: String,
    pub unit_system: UnitSystem,
    pub height: Option<HeightView>,
    pub weight: Option<WeightView>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            height: profile.height_cm.map(|cm| {
                let (feet, inches) = cm_to_feet_inches(cm);
                HeightView { cm, feet, inches }
            }),
            weight: profile.weight_kg.map(|kg| WeightView {
                kg,
                lb: kg_to_lb(kg),
            }),
            display_name: profile.display_name,
            email: profile.email,
            age: profile.age,
            gender: profile.gender,
            unit_system: profile.unit_system,
        }
    }
}

fn validate_optional_email(email: &str) -> std::result::Result<(), validator::ValidationError> {
    use validator::ValidateEmail;
    let email = email.trim();
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("email"))
    }
}

/// Apply an update on top of the stored profile.
fn apply_profile_update(mut profile: UserProfile, request: ProfileRequest) -> Result<UserProfile> {
    request.validate()?;

    if let Some(name) = request.display_name {
        profile.display_name = name.trim().to_string();
    }
    if let Some(email) = request.email {
        let email = email.trim();
        profile.email = (!email.is_empty()).then(|| email.to_string());
    }
    if let Some(age) = request.age {
        profile.age = Some(age);
    }
    if let Some(gender) = request.gender {
        profile.gender = gender.trim().to_string();
    }
    if let Some(height) = request.height {
        profile.height_cm = Some(height.to_cm()?);
    }
    if let Some(weight) = request.weight {
        profile.weight_kg = Some(weight.to_kg()?);
    }
    if let Some(units) = request.unit_system {
        profile.unit_system = units;
    }
    Ok(profile)
}

/// Get the current user's profile (empty if never saved).
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .get_profile(&user.user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(profile.into()))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    // Fetch-modify-write to preserve fields the request leaves out
    let stored = state
        .db
        .get_profile(&user.user_id)
        .await?
        .unwrap_or_default();

    let mut profile = apply_profile_update(stored, body)?;
    profile.updated_at = format_utc_rfc3339(chrono::Utc::now());

    state.db.upsert_profile(&user.user_id, &profile).await?;
    tracing::info!(user_id = %user.user_id, "Profile saved");

    Ok(Json(profile.into()))
}

// ─── Reminders ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub settings: ReminderSettings,
    /// Next local trigger time (ISO 8601), absent when reminders are off
    pub next_trigger: Option<String>,
    pub reminds_about: Vec<ReminderKind>,
}

fn reminder_response(state: &AppState, settings: ReminderSettings) -> ReminderResponse {
    ReminderResponse {
        next_trigger: settings
            .next_trigger(state.clock.now())
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()),
        reminds_about: settings.due_reminders(),
        settings,
    }
}

async fn get_reminders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ReminderResponse>> {
    let settings = state.db.get_reminder_settings(&user.user_id).await?;
    Ok(Json(reminder_response(&state, settings)))
}

async fn update_reminders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(settings): Json<ReminderSettings>,
) -> Result<Json<ReminderResponse>> {
    settings.validate()?;
    state
        .db
        .set_reminder_settings(&user.user_id, &settings)
        .await?;
    Ok(Json(reminder_response(&state, settings)))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_records: usize,
}

/// Delete the user's meals, workouts, goals, settings and profile.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    let deleted_records = state.db.delete_user_data(&user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_records,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_request() -> ProfileRequest {
        ProfileRequest {
            display_name: None,
            email: None,
            age: None,
            gender: None,
            height: None,
            weight: None,
            unit_system: None,
        }
    }

    #[test]
    fn test_imperial_input_is_stored_metric() {
        let request = ProfileRequest {
            height: Some(HeightInput::Imperial {
                feet: 5,
                inches: 11,
            }),
            weight: Some(WeightInput::Imperial { lb: 220.0 }),
            unit_system: Some(UnitSystem::Imperial),
            ..empty_request()
        };

        let profile = apply_profile_update(UserProfile::default(), request).unwrap();

        assert_eq!(profile.height_cm, Some(180));
        assert!((profile.weight_kg.unwrap() - 99.79).abs() < 0.01);
        assert_eq!(profile.unit_system, UnitSystem::Imperial);
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let stored = UserProfile {
            display_name: "Sam".to_string(),
            height_cm: Some(170),
            ..Default::default()
        };
        let request = ProfileRequest {
            age: Some(31),
            ..empty_request()
        };

        let profile = apply_profile_update(stored, request).unwrap();

        assert_eq!(profile.display_name, "Sam");
        assert_eq!(profile.height_cm, Some(170));
        assert_eq!(profile.age, Some(31));
    }

    #[test]
    fn test_email_is_set_and_cleared() {
        let request = ProfileRequest {
            email: Some(" sam@example.com ".to_string()),
            ..empty_request()
        };
        let profile = apply_profile_update(UserProfile::default(), request).unwrap();
        assert_eq!(profile.email.as_deref(), Some("sam@example.com"));

        let request = ProfileRequest {
            email: Some(String::new()),
            ..empty_request()
        };
        let profile = apply_profile_update(profile, request).unwrap();
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let request = ProfileRequest {
            email: Some("not an address".to_string()),
            ..empty_request()
        };
        assert!(apply_profile_update(UserProfile::default(), request).is_err());
    }

    #[test]
    fn test_out_of_range_body_measurements() {
        let bad_inches = HeightInput::Imperial {
            feet: 5,
            inches: 12,
        };
        assert!(bad_inches.to_cm().is_err());
        assert!(HeightInput::Metric { cm: 301 }.to_cm().is_err());
        assert!(WeightInput::Metric { kg: -1.0 }.to_kg().is_err());
        assert!(WeightInput::Imperial { lb: -1.0 }.to_kg().is_err());
    }

    #[test]
    fn test_height_input_json() {
        let input: HeightInput =
            serde_json::from_str(r#"{"unit":"imperial","feet":6,"inches":0}"#).unwrap();
        assert_eq!(input.to_cm().unwrap(), 183);
    }

    #[test]
    fn test_profile_response_shows_both_units() {
        let profile = UserProfile {
            height_cm: Some(180),
            weight_kg: Some(100.0),
            ..Default::default()
        };

        let response = ProfileResponse::from(profile);

        assert_eq!(
            response.height,
            Some(HeightView {
                cm: 180,
                feet: 5,
                inches: 11
            })
        );
        assert_eq!(response.weight.map(|w| w.lb), Some(220));
    }
}
