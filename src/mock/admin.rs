//! Back-office handlers. Everything here requires the ADMIN role.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::{paginate, require_admin, ApiError, MockState};
use crate::api::admin::{DashboardStats, PageQuery};
use crate::models::{House, Order, OrderStatus, Page, Review, User};

pub async fn dashboard_stats(
    State(state): State<Arc<MockState>>,
    user: User,
) -> Result<Json<DashboardStats>, ApiError> {
    require_admin(&user)?;
    let orders = state.orders.read();
    let total_revenue = orders
        .iter()
        .filter(|o| !matches!(o.status, OrderStatus::Cancelled | OrderStatus::Refunded))
        .map(|o| o.total_price)
        .sum();
    Ok(Json(DashboardStats {
        total_users: state.users.read().len() as u64,
        total_houses: state.houses.read().len() as u64,
        total_orders: orders.len() as u64,
        total_revenue,
    }))
}

pub async fn list_users(
    State(state): State<Arc<MockState>>,
    user: User,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<User>>, ApiError> {
    require_admin(&user)?;
    Ok(Json(paginate(&state.users.read(), query.page, query.size)))
}

pub async fn list_houses(
    State(state): State<Arc<MockState>>,
    user: User,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<House>>, ApiError> {
    require_admin(&user)?;
    Ok(Json(paginate(&state.houses.read(), query.page, query.size)))
}

/// Approval is an acknowledgement in the mock; listings are live as soon as
/// they are created.
pub async fn approve_house(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<House>, ApiError> {
    require_admin(&user)?;
    state
        .houses
        .read()
        .iter()
        .find(|h| h.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("House not found"))
}

#[derive(Debug, serde::Deserialize)]
pub struct RejectReason {
    pub reason: String,
}

/// Rejection takes the listing down.
pub async fn reject_house(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
    Json(body): Json<RejectReason>,
) -> Result<Json<House>, ApiError> {
    require_admin(&user)?;
    if body.reason.trim().is_empty() {
        return Err(ApiError::validation("A rejection reason is required"));
    }
    let mut houses = state.houses.write();
    let position = houses
        .iter()
        .position(|h| h.id == id)
        .ok_or_else(|| ApiError::not_found("House not found"))?;
    let house = houses.remove(position);
    tracing::debug!(house_id = %id, reason = %body.reason, "House rejected");
    Ok(Json(house))
}

pub async fn list_orders(
    State(state): State<Arc<MockState>>,
    user: User,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Order>>, ApiError> {
    require_admin(&user)?;
    Ok(Json(paginate(&state.orders.read(), query.page, query.size)))
}

pub async fn refund_order(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    require_admin(&user)?;
    let mut orders = state.orders.write();
    let order = orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    if order.status == OrderStatus::Refunded {
        return Err(ApiError::validation("Order is already refunded"));
    }
    order.status = OrderStatus::Refunded;
    Ok(Json(order.clone()))
}

pub async fn list_reviews(
    State(state): State<Arc<MockState>>,
    user: User,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Review>>, ApiError> {
    require_admin(&user)?;
    Ok(Json(paginate(
        &state.reviews.read(),
        query.page,
        query.size,
    )))
}

pub async fn delete_review(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&user)?;
    let mut reviews = state.reviews.write();
    let before = reviews.len();
    reviews.retain(|r| r.id != id);
    if reviews.len() == before {
        return Err(ApiError::not_found("Review not found"));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
