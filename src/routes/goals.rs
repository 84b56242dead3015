// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal and dashboard routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{GoalKind, GoalSettings};
use crate::services::dashboard::{build_dashboard, DashboardSummary};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Goal routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/goals", get(get_goals))
        .route("/api/goals/calories", put(set_calorie_goal))
        .route("/api/goals/workout", put(set_workout_goal))
        .route("/api/dashboard", get(get_dashboard))
}

/// New goal value. Signed so that negative input gets a clear 400.
#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub goal: i64,
}

async fn get_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GoalSettings>> {
    Ok(Json(state.db.get_goal_settings(&user.user_id).await?))
}

async fn set_goal(
    state: &AppState,
    user: &AuthUser,
    kind: GoalKind,
    request: GoalRequest,
) -> Result<Json<GoalSettings>> {
    // Validate before touching the store
    let value = kind.validate(request.goal)?;
    state.db.set_goal(&user.user_id, kind, value).await?;
    Ok(Json(state.db.get_goal_settings(&user.user_id).await?))
}

/// Set the daily calorie goal (1..=4000).
async fn set_calorie_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<GoalSettings>> {
    set_goal(&state, &user, GoalKind::Calories, body).await
}

/// Set the weekly workout goal in minutes (1..=840).
async fn set_workout_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<GoalSettings>> {
    set_goal(&state, &user, GoalKind::WorkoutMinutes, body).await
}

/// Dashboard for today, computed from a fresh snapshot of the user's data.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardSummary>> {
    let (meals, workouts, goals) = tokio::try_join!(
        state.db.list_meals(&user.user_id),
        state.db.list_workouts(&user.user_id),
        state.db.get_goal_settings(&user.user_id),
    )?;

    let today = state.clock.today();
    tracing::debug!(
        user_id = %user.user_id,
        %today,
        meals = meals.len(),
        workouts = workouts.len(),
        "Building dashboard"
    );

    Ok(Json(build_dashboard(&meals, &workouts, goals, today)))
}
