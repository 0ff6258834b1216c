use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::{ApiError, MockState};
use crate::api::orders::OrderList;
use crate::models::{CreateOrderForm, Order, OrderHouse, OrderStatus, Role, User};

/// Orders belonging to the authenticated user.
pub async fn list(State(state): State<Arc<MockState>>, user: User) -> Json<OrderList> {
    let list = state
        .orders
        .read()
        .iter()
        .filter(|o| o.user_id == user.id)
        .cloned()
        .collect();
    Json(OrderList { list })
}

pub async fn create(
    State(state): State<Arc<MockState>>,
    user: User,
    Json(form): Json<CreateOrderForm>,
) -> Result<Json<Order>, ApiError> {
    if form.check_out <= form.check_in {
        return Err(ApiError::validation(
            "Check-out must be after check-in",
        ));
    }
    if form.guests == 0 {
        return Err(ApiError::validation("At least one guest is required"));
    }

    let house = state
        .houses
        .read()
        .iter()
        .find(|h| h.id == form.house_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("House not found"))?;

    let nights = (form.check_out - form.check_in).num_days() as f64;
    let order = Order {
        id: Uuid::new_v4().to_string(),
        house_id: house.id.clone(),
        user_id: user.id,
        check_in: form.check_in,
        check_out: form.check_out,
        guests: form.guests,
        total_price: house.price * nights,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
        house: Some(OrderHouse {
            title: house.title,
            image_url: house.image_url,
            address: house.address,
        }),
    };
    state.orders.write().push(order.clone());
    Ok(Json(order))
}

pub async fn detail(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let orders = state.orders.read();
    let order = orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    if order.user_id != user.id && user.role != Role::Admin {
        return Err(ApiError::forbidden("Not your order"));
    }
    Ok(Json(order.clone()))
}

pub async fn cancel(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let mut orders = state.orders.write();
    let order = orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    if order.user_id != user.id && user.role != Role::Admin {
        return Err(ApiError::forbidden("Not your order"));
    }
    match order.status {
        OrderStatus::Pending | OrderStatus::Confirmed => {
            order.status = OrderStatus::Cancelled;
            Ok(Json(order.clone()))
        }
        _ => Err(ApiError::validation("Order can no longer be cancelled")),
    }
}
