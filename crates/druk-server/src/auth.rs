use crate::{error::ApiError, state::SharedState};

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::RwLock;
use uuid::Uuid;

/// Server-side session table. Tokens are opaque random strings issued on
/// login and checked on every write endpoint; the client never sees the
/// admin password compared locally.
#[derive(Debug, Default)]
pub struct Sessions {
    tokens: RwLock<HashSet<String>>,
}

impl Sessions {
    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .write()
            .expect("sessions lock poisoned")
            .insert(token.clone());
        token
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .expect("sessions lock poisoned")
            .remove(token)
    }

    pub fn verify(&self, token: &str) -> bool {
        self.tokens
            .read()
            .expect("sessions lock poisoned")
            .contains(token)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<SharedState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state.password_matches(&body.password) {
        tracing::warn!("admin login rejected");
        return Err(ApiError::Unauthorized);
    }
    let token = state.sessions.issue();
    tracing::info!("admin session issued");
    Ok(Json(LoginResponse { token }))
}

/// `POST /api/admin/logout`
pub async fn logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    if !state.sessions.revoke(token) {
        return Err(ApiError::Unauthorized);
    }
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

/// Gate for write endpoints: the request must carry a bearer token from a
/// live session.
pub fn require_admin(state: &SharedState, headers: &HeaderMap) -> Result<(), ApiError> {
    match bearer_token(headers) {
        Some(token) if state.sessions.verify(token) => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
