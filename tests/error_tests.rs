// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use nutrifit_tracker::error::AppError;

#[test]
fn test_status_codes() {
    assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        AppError::NotFound("meal".to_string()).status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::BadRequest("bad".to_string()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Database("offline".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_validation_errors_are_bad_requests() {
    let err = AppError::from(validator::ValidationErrors::new());
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_internal_error_from_anyhow() {
    let err: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
