//! Mock backend.
//!
//! Simulates the rental API for local development and tests: an in-memory
//! house collection behind a structured route table with typed query
//! decoding, plus canned auth, order, and review behavior. The route shapes
//! and response bodies match the real backend, so the client runs against
//! either unchanged.

mod admin;
mod auth;
mod error;
mod houses;
mod orders;
mod reviews;
pub mod search;
pub mod seed;
mod users;

pub use error::{ApiError, ErrorCode, ErrorResponse};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    routing::{delete, get, patch, post},
    Router,
};
use dashmap::DashMap;
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::models::{House, Order, Page, Review, Role, User};

pub struct MockState {
    pub houses: RwLock<Vec<House>>,
    pub orders: RwLock<Vec<Order>>,
    pub reviews: RwLock<Vec<Review>>,
    pub users: RwLock<Vec<User>>,
    /// token -> authenticated user
    pub sessions: DashMap<String, User>,
}

impl MockState {
    /// State pre-populated with the canonical demo dataset.
    pub fn seeded() -> Self {
        Self {
            houses: RwLock::new(seed::houses()),
            orders: RwLock::new(seed::orders()),
            reviews: RwLock::new(seed::reviews()),
            users: RwLock::new(seed::users()),
            sessions: DashMap::new(),
        }
    }
}

pub fn create_router(state: Arc<MockState>) -> Router {
    // Public auth routes.
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout));

    let api_routes = Router::new()
        // Houses
        .route("/houses", get(houses::list).post(houses::create))
        .route(
            "/houses/:id",
            get(houses::detail)
                .put(houses::update)
                .delete(houses::remove),
        )
        // Reviews
        .route(
            "/houses/:id/reviews",
            get(reviews::list_for_house).post(reviews::create),
        )
        .route("/reviews", get(admin::list_reviews))
        .route("/reviews/:id", delete(admin::delete_review))
        // Orders
        .route("/orders", get(orders::list).post(orders::create))
        .route("/orders/:id", get(orders::detail))
        .route("/orders/:id/cancel", post(orders::cancel))
        // User management
        .route("/users", get(users::list))
        .route("/users/:id/role", patch(users::set_role))
        .route("/users/:id", delete(users::remove))
        // Admin back-office
        .route("/admin/dashboard/stats", get(admin::dashboard_stats))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id/role", patch(users::set_role))
        .route("/admin/users/:id", delete(users::remove))
        .route("/admin/houses", get(admin::list_houses))
        .route("/admin/houses/:id/approve", post(admin::approve_house))
        .route("/admin/houses/:id/reject", post(admin::reject_house))
        .route("/admin/houses/:id", delete(houses::remove))
        .route("/admin/orders", get(admin::list_orders))
        .route("/admin/orders/:id/refund", post(admin::refund_order));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Serve the mock API on an already-bound listener. Tests bind port 0 and
/// read the local address back before calling this.
pub async fn serve(listener: TcpListener, state: Arc<MockState>) -> std::io::Result<()> {
    axum::serve(listener, create_router(state)).await
}

/// Random session token, hex-encoded.
pub(crate) fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Extractor resolving the bearer token to its session user.
#[async_trait]
impl FromRequestParts<Arc<MockState>> for User {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<MockState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
        state
            .sessions
            .get(&token)
            .map(|entry| entry.clone())
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))
    }
}

pub(crate) fn require_admin(user: &User) -> Result<(), ApiError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::forbidden("Administrator role required"))
    }
}

pub(crate) fn require_host(user: &User) -> Result<(), ApiError> {
    if user.role == Role::Admin || user.role == Role::Host {
        Ok(())
    } else {
        Err(ApiError::forbidden("Host or administrator role required"))
    }
}

pub(crate) fn paginate<T: Clone>(items: &[T], page: u32, size: u32) -> Page<T> {
    let size = size.max(1);
    let total_elements = items.len() as u64;
    let total_pages = total_elements.div_ceil(u64::from(size));
    let start = (page as usize).saturating_mul(size as usize);
    let content = items
        .iter()
        .skip(start)
        .take(size as usize)
        .cloned()
        .collect();
    Page {
        content,
        total_elements,
        total_pages,
        size,
        number: page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_splits_and_reports_totals() {
        let items: Vec<u32> = (0..25).collect();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.content, (10..20).collect::<Vec<_>>());
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 1);

        let past_end = paginate(&items, 9, 10);
        assert!(past_end.content.is_empty());
    }

    #[test]
    fn paginate_clamps_zero_size() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 0);
        assert_eq!(page.size, 1);
        assert_eq!(page.content, vec![1]);
    }

    #[test]
    fn bearer_token_requires_scheme_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc".to_string()));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
