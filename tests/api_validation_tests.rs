// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! The test app runs on an offline store, so a 400 here proves the
//! request was rejected before any database access.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn send_json(method: &str, uri: &str, body: serde_json::Value) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn test_calorie_goal_above_limit() {
    let status = send_json("PUT", "/api/goals/calories", serde_json::json!({"goal": 4001})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_goal_above_limit() {
    let status = send_json("PUT", "/api/goals/workout", serde_json::json!({"goal": 841})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_goal_must_be_positive() {
    for goal in [0, -100] {
        let status =
            send_json("PUT", "/api/goals/calories", serde_json::json!({ "goal": goal })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "goal {}", goal);
    }
}

#[tokio::test]
async fn test_valid_goal_reaches_store() {
    // In range, so the offline store is hit and fails
    let status = send_json("PUT", "/api/goals/workout", serde_json::json!({"goal": 840})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_meal_with_invalid_timestamp() {
    let status = send_json(
        "POST",
        "/api/meals",
        serde_json::json!({
            "dateTime": "not-a-date",
            "mealType": "lunch",
            "calories": 500
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_meal_type_too_long() {
    let status = send_json(
        "POST",
        "/api/meals",
        serde_json::json!({
            "dateTime": "2024-01-10T12:00",
            "mealType": "a".repeat(51),
            "calories": 500
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_with_invalid_date() {
    let status = send_json(
        "POST",
        "/api/workouts",
        serde_json::json!({
            "date": "2024-13-01",
            "type": "Run",
            "durationMinutes": 30
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_with_negative_weight() {
    let status = send_json(
        "POST",
        "/api/workouts",
        serde_json::json!({
            "date": "2024-01-10",
            "type": "Bench press",
            "sets": 3,
            "reps": 10,
            "weightPerRep": -40.0,
            "durationMinutes": 15
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reminder_time_out_of_range() {
    let status = send_json(
        "PUT",
        "/api/reminders",
        serde_json::json!({
            "reminders_enabled": true,
            "hour": 25,
            "minute": 0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
