// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal and workout log routes.

use crate::db::is_valid_document_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{MealRecord, WorkoutRecord};
use crate::time_utils::{parse_local_date, parse_local_date_time};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const MAX_ID_LEN: usize = 128;

/// Record routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meals", get(list_meals).post(create_meal))
        .route("/api/meals/{id}", put(update_meal).delete(delete_meal))
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            put(update_workout).delete(delete_workout),
        )
}

/// Reject path IDs that cannot be Firestore document IDs.
fn check_record_id(id: &str) -> Result<()> {
    if id.len() > MAX_ID_LEN || !is_valid_document_id(id) {
        return Err(AppError::BadRequest("Invalid record ID".to_string()));
    }
    Ok(())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ─── Meals ───────────────────────────────────────────────────

/// Meal fields accepted on create and update.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    /// Local date-time, e.g. `2024-01-10T12:30`
    pub date_time: String,
    #[validate(length(min = 1, max = 50))]
    pub meal_type: String,
    #[validate(range(max = 20000))]
    pub calories: u32,
    #[serde(default)]
    #[validate(range(max = 2000))]
    pub protein: u32,
    #[serde(default)]
    #[validate(range(max = 2000))]
    pub carbs: u32,
    #[serde(default)]
    #[validate(range(max = 2000))]
    pub fats: u32,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl MealRequest {
    /// Validate and turn into a record with the given ID.
    fn into_record(self, id: String) -> Result<MealRecord> {
        self.validate()?;
        let date_time = parse_local_date_time(&self.date_time).ok_or_else(|| {
            AppError::BadRequest("Invalid 'dateTime': expected YYYY-MM-DDTHH:MM[:SS]".to_string())
        })?;

        Ok(MealRecord {
            id,
            date_time: date_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            meal_type: self.meal_type.trim().to_string(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            notes: trimmed(self.notes),
        })
    }
}

/// List the user's meals, newest first.
async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MealRecord>>> {
    let meals = state.db.list_meals(&user.user_id).await?;
    Ok(Json(meals))
}

async fn create_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<MealRequest>,
) -> Result<(StatusCode, Json<MealRecord>)> {
    let meal = body.into_record(String::new())?;
    let meal = state.db.add_meal(&user.user_id, &meal).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

async fn update_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<MealRequest>,
) -> Result<Json<MealRecord>> {
    check_record_id(&id)?;
    let meal = body.into_record(id)?;

    if state.db.get_meal(&user.user_id, &meal.id).await?.is_none() {
        return Err(AppError::NotFound(format!("Meal {} not found", meal.id)));
    }
    state.db.update_meal(&user.user_id, &meal).await?;
    Ok(Json(meal))
}

async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    check_record_id(&id)?;
    if state.db.get_meal(&user.user_id, &id).await?.is_none() {
        return Err(AppError::NotFound(format!("Meal {} not found", id)));
    }
    state.db.delete_meal(&user.user_id, &id).await?;
    tracing::debug!(user_id = %user.user_id, meal_id = %id, "Meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Workouts ────────────────────────────────────────────────

/// Workout fields accepted on create and update.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    /// Date, `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub workout_type: String,
    #[validate(length(max = 50))]
    pub muscle_group: Option<String>,
    #[serde(default)]
    #[validate(range(max = 100))]
    pub sets: u32,
    #[serde(default)]
    #[validate(range(max = 1000))]
    pub reps: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1000.0))]
    pub weight_per_rep: f64,
    #[validate(range(max = 1440))]
    pub duration_minutes: u32,
    #[validate(length(max = 50))]
    pub intensity: Option<String>,
    #[validate(range(max = 20000))]
    pub calories_burned: Option<u32>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl WorkoutRequest {
    /// Validate and turn into a record with the given ID.
    fn into_record(self, id: String) -> Result<WorkoutRecord> {
        self.validate()?;
        let date = parse_local_date(&self.date).ok_or_else(|| {
            AppError::BadRequest("Invalid 'date': expected YYYY-MM-DD".to_string())
        })?;

        Ok(WorkoutRecord {
            id,
            date: date.format("%Y-%m-%d").to_string(),
            workout_type: self.workout_type.trim().to_string(),
            muscle_group: trimmed(self.muscle_group),
            sets: self.sets,
            reps: self.reps,
            weight_per_rep: self.weight_per_rep,
            duration_minutes: self.duration_minutes,
            intensity: trimmed(self.intensity),
            calories_burned: self.calories_burned,
            notes: trimmed(self.notes),
        })
    }
}

/// List the user's workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutRecord>>> {
    let workouts = state.db.list_workouts(&user.user_id).await?;
    Ok(Json(workouts))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<WorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutRecord>)> {
    let workout = body.into_record(String::new())?;
    let workout = state.db.add_workout(&user.user_id, &workout).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<WorkoutRequest>,
) -> Result<Json<WorkoutRecord>> {
    check_record_id(&id)?;
    let workout = body.into_record(id)?;

    if state
        .db
        .get_workout(&user.user_id, &workout.id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!("Workout {} not found", workout.id)));
    }
    state.db.update_workout(&user.user_id, &workout).await?;
    Ok(Json(workout))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    check_record_id(&id)?;
    if state.db.get_workout(&user.user_id, &id).await?.is_none() {
        return Err(AppError::NotFound(format!("Workout {} not found", id)));
    }
    state.db.delete_workout(&user.user_id, &id).await?;
    tracing::debug!(user_id = %user.user_id, workout_id = %id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}
