// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session authentication.
//!
//! The session token is read from the `nutrifit_token` cookie (web) or an
//! `Authorization: Bearer` header (mobile). Its subject is the user ID and
//! is used directly as the Firestore document ID under `users/`.

use crate::db::is_valid_document_id;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session cookie carrying the JWT.
pub const SESSION_COOKIE: &str = "nutrifit_token";

const SESSION_TTL_SECS: usize = 30 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated user, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Token from the session cookie, else from the bearer header.
fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Check signature and expiry and extract the user.
pub fn verify_session(token: &str, signing_key: &[u8]) -> Result<AuthUser, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(signing_key),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AppError::InvalidToken)?
    .claims;

    let user_id = claims.sub.trim();
    if !is_valid_document_id(user_id) {
        tracing::warn!("Rejected token with unusable subject");
        return Err(AppError::InvalidToken);
    }

    Ok(AuthUser {
        user_id: user_id.to_string(),
    })
}

/// Middleware that requires a valid session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(&jar, request.headers()).ok_or(AppError::Unauthorized)?;
    let user = verify_session(&token, &state.config.jwt_signing_key)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Issue a 30-day session token for `user_id`.
pub fn create_jwt(user_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp();
    let iat = usize::try_from(now)?;

    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + SESSION_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;

    const KEY: &[u8] = b"unit_test_signing_key_32_bytes!!";

    #[test]
    fn test_issued_token_verifies() {
        let token = create_jwt("abc123", KEY).unwrap();
        let user = verify_session(&token, KEY).unwrap();
        assert_eq!(user.user_id, "abc123");
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let token = create_jwt("abc123", KEY).unwrap();
        assert!(matches!(
            verify_session(&token, b"another_key_entirely_32_bytes!!!"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            sub: "abc123".to_string(),
            iat: 1_000_000,
            exp: 1_000_100,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        assert!(verify_session(&token, KEY).is_err());
    }

    #[test]
    fn test_unusable_subjects_are_rejected() {
        for subject in ["../users/other", ".", "..", "__foo__", "   "] {
            let token = create_jwt(subject, KEY).unwrap();
            assert!(
                matches!(verify_session(&token, KEY), Err(AppError::InvalidToken)),
                "subject {:?}",
                subject
            );
        }
    }

    #[test]
    fn test_cookie_takes_precedence() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "from-cookie"));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );

        assert_eq!(
            session_token(&jar, &headers).as_deref(),
            Some("from-cookie")
        );
        assert_eq!(
            session_token(&CookieJar::new(), &headers).as_deref(),
            Some("from-header")
        );
        assert_eq!(session_token(&CookieJar::new(), &HeaderMap::new()), None);
    }
}
