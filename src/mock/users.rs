use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::{paginate, require_admin, ApiError, MockState};
use crate::api::users::UserQuery;
use crate::models::{Page, Role, User};

#[derive(Debug, serde::Deserialize)]
pub struct RoleChange {
    pub role: Role,
}

pub async fn list(
    State(state): State<Arc<MockState>>,
    user: User,
    Query(query): Query<UserQuery>,
) -> Result<Json<Page<User>>, ApiError> {
    require_admin(&user)?;
    let users = state.users.read();
    let filtered: Vec<User> = users
        .iter()
        .filter(|u| {
            query
                .username
                .as_deref()
                .map_or(true, |name| u.username.contains(name))
                && query
                    .email
                    .as_deref()
                    .map_or(true, |email| u.email.contains(email))
                && query.role.map_or(true, |role| u.role == role)
        })
        .cloned()
        .collect();
    Ok(Json(paginate(&filtered, query.page, query.size)))
}

pub async fn set_role(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
    Json(change): Json<RoleChange>,
) -> Result<Json<User>, ApiError> {
    require_admin(&user)?;
    let mut users = state.users.write();
    let target = users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    target.role = change.role;
    let updated = target.clone();
    drop(users);

    // Live sessions see the role change immediately.
    for mut entry in state.sessions.iter_mut() {
        if entry.id == id {
            entry.role = change.role;
        }
    }
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&user)?;
    if user.id == id {
        return Err(ApiError::validation("Cannot delete your own account"));
    }
    let mut users = state.users.write();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return Err(ApiError::not_found("User not found"));
    }
    drop(users);

    state.sessions.retain(|_, u| u.id != id);
    Ok(Json(serde_json::json!({ "success": true })))
}
