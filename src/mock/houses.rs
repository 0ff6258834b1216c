use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{require_host, search, ApiError, MockState};
use crate::api::houses::{HouseForm, HouseList};
use crate::models::{House, HouseQuery, User};

pub async fn list(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HouseQuery>,
) -> Json<HouseList> {
    let houses = state.houses.read();
    let list = search::apply(&houses, &query)
        .iter()
        .map(House::summary)
        .collect();
    Json(HouseList { list })
}

pub async fn detail(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Result<Json<House>, ApiError> {
    state
        .houses
        .read()
        .iter()
        .find(|h| h.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("House not found"))
}

pub async fn create(
    State(state): State<Arc<MockState>>,
    user: User,
    Json(form): Json<HouseForm>,
) -> Result<Json<House>, ApiError> {
    require_host(&user)?;
    if form.title.is_empty() {
        return Err(ApiError::validation("Title is required"));
    }
    if form.price <= 0.0 {
        return Err(ApiError::validation("Price must be positive"));
    }

    let house = House {
        id: Uuid::new_v4().to_string(),
        title: form.title,
        address: form.address,
        price: form.price,
        image_url: form.image_url,
        rating: 0.0,
        tags: form.tags,
        description: form.description,
        facilities: form.facilities,
        owner: form.owner,
    };
    state.houses.write().push(house.clone());
    Ok(Json(house))
}

pub async fn update(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
    Json(form): Json<HouseForm>,
) -> Result<Json<House>, ApiError> {
    require_host(&user)?;
    let mut houses = state.houses.write();
    let house = houses
        .iter_mut()
        .find(|h| h.id == id)
        .ok_or_else(|| ApiError::not_found("House not found"))?;

    house.title = form.title;
    house.address = form.address;
    house.price = form.price;
    house.image_url = form.image_url;
    house.tags = form.tags;
    house.description = form.description;
    house.facilities = form.facilities;
    house.owner = form.owner;
    Ok(Json(house.clone()))
}

pub async fn remove(
    State(state): State<Arc<MockState>>,
    user: User,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_host(&user)?;
    let mut houses = state.houses.write();
    let before = houses.len();
    houses.retain(|h| h.id != id);
    if houses.len() == before {
        return Err(ApiError::not_found("House not found"));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
