use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use uuid::Uuid;

use super::{bearer_token, generate_token, seed, ApiError, MockState};
use crate::api::auth::{LoginResponse, RegisterResponse};
use crate::models::{LoginForm, RegisterForm, Role, User};

/// Canned credential check: the seeded admin account gets the ADMIN role,
/// anything else signs in as a regular user under the submitted email.
pub async fn login(
    State(state): State<Arc<MockState>>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, ApiError> {
    if form.email.is_empty() || form.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let user = if form.email == seed::ADMIN_EMAIL && form.password == seed::ADMIN_PASSWORD {
        state
            .users
            .read()
            .iter()
            .find(|u| u.email == seed::ADMIN_EMAIL)
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?
    } else {
        // Demo identity with the submitted email.
        let mut user = state
            .users
            .read()
            .iter()
            .find(|u| u.role == Role::User)
            .cloned()
            .unwrap_or_else(|| User {
                id: "2".to_string(),
                username: "Demo User".to_string(),
                email: form.email.clone(),
                avatar: None,
                phone: None,
                role: Role::User,
            });
        user.email = form.email.clone();
        user
    };

    let token = generate_token();
    state.sessions.insert(token.clone(), user.clone());
    tracing::debug!(email = %user.email, role = %user.role, "Mock login");

    Ok(Json(LoginResponse {
        token: Some(token),
        user: Some(user),
    }))
}

pub async fn register(
    State(state): State<Arc<MockState>>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if form.email.is_empty() || !form.email.contains('@') {
        return Err(ApiError::validation("Invalid email address"));
    }
    if form.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if form.password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }
    if form.password != form.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }
    if state.users.read().iter().any(|u| u.email == form.email) {
        return Err(ApiError::validation("Email is already registered"));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: form.username,
        email: form.email,
        avatar: None,
        phone: None,
        role: Role::User,
    };
    state.users.write().push(user);

    // The client ignores this token on success; registration does not
    // auto-login.
    Ok(Json(RegisterResponse {
        token: Some(generate_token()),
    }))
}

pub async fn me(user: User) -> Json<User> {
    Json(user)
}

pub async fn logout(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.remove(&token);
    }
    Json(serde_json::json!({ "message": "Signed out" }))
}
