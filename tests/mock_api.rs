//! End-to-end coverage of the mock backend through the shared client.

mod common;

use std::sync::Arc;

use common::{client_for, memory_tokens, spawn_mock, RecordingNotices};
use lodgr::error::Error;
use lodgr::TokenStore;
use lodgr::models::{
    CreateOrderForm, CreateReviewForm, HouseQuery, LoginForm, OrderStatus, RegisterForm,
    ReviewImage, Role,
};

async fn login_as_admin(client: &lodgr::ApiClient) -> String {
    let response = client
        .login(&LoginForm {
            email: "admin@example.com".to_string(),
            password: "123456".to_string(),
        })
        .await
        .unwrap();
    let token = response.token.unwrap();
    client.token_store().save(&token);
    token
}

async fn login_as_user(client: &lodgr::ApiClient, email: &str) -> String {
    let response = client
        .login(&LoginForm {
            email: email.to_string(),
            password: "whatever".to_string(),
        })
        .await
        .unwrap();
    let token = response.token.unwrap();
    client.token_store().save(&token);
    token
}

#[tokio::test]
async fn house_listing_filters_and_sorts() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));

    let all = client.list_houses(&HouseQuery::default()).await.unwrap();
    assert_eq!(all.list.len(), 3);

    let beijing = client
        .list_houses(&HouseQuery {
            city: Some("Beijing".to_string()),
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let prices: Vec<f64> = beijing.list.iter().map(|h| h.price).collect();
    assert_eq!(prices, vec![328.0, 688.0]);

    let tagged = client
        .list_houses(&HouseQuery {
            tags: Some("twin,metro".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(tagged.list.len(), 2);
}

#[tokio::test]
async fn house_detail_and_not_found() {
    let (addr, _state) = spawn_mock().await;
    let notices = Arc::new(RecordingNotices::default());
    let client = client_for(addr, memory_tokens(), notices.clone());

    let house = client.house_detail("1").await.unwrap();
    assert_eq!(house.title, "Seaview Twin Room");
    assert!(house.facilities.is_some());
    assert!(house.owner.is_some());

    let err = client.house_detail("999").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(notices.errors.lock().as_slice(), ["House not found"]);
}

#[tokio::test]
async fn anonymous_access_to_protected_route_is_unauthorized() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));

    let err = client.list_orders().await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired));
}

#[tokio::test]
async fn order_lifecycle() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));
    login_as_user(&client, "guest@example.com").await;

    // The demo user starts with two seeded orders.
    let initial = client.list_orders().await.unwrap();
    assert_eq!(initial.list.len(), 2);

    // Two nights in house 1 at 458 per night.
    let order = client
        .create_order(&CreateOrderForm {
            house_id: "1".to_string(),
            check_in: "2026-09-01".parse().unwrap(),
            check_out: "2026-09-03".parse().unwrap(),
            guests: 2,
        })
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_price, 916.0);
    assert_eq!(order.house.as_ref().unwrap().title, "Seaview Twin Room");

    let cancelled = client.cancel_order(&order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // A cancelled order cannot be cancelled again.
    let err = client.cancel_order(&order.id).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn order_with_inverted_dates_is_rejected() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));
    login_as_user(&client, "guest@example.com").await;

    let err = client
        .create_order(&CreateOrderForm {
            house_id: "1".to_string(),
            check_in: "2026-09-03".parse().unwrap(),
            check_out: "2026-09-01".parse().unwrap(),
            guests: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn review_listing_and_multipart_creation() {
    let (addr, _state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));

    let seeded = client.house_reviews("1").await.unwrap();
    assert_eq!(seeded.list.len(), 2);

    login_as_user(&client, "guest@example.com").await;
    let review = client
        .create_review(
            "1",
            &CreateReviewForm {
                rating: 5,
                content: "Wonderful stay, would book again.".to_string(),
                images: vec![ReviewImage {
                    file_name: "balcony.jpg".to_string(),
                    bytes: vec![0xFF, 0xD8, 0xFF],
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(review.rating, 5);
    assert_eq!(
        review.images.as_deref(),
        Some(&["upload://balcony.jpg".to_string()][..])
    );

    let after = client.house_reviews("1").await.unwrap();
    assert_eq!(after.list.len(), 3);
}

#[tokio::test]
async fn register_validates_and_creates_account() {
    let (addr, state) = spawn_mock().await;
    let client = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));

    let err = client
        .register(&RegisterForm {
            email: "new@example.com".to_string(),
            password: "123456".to_string(),
            username: "newcomer".to_string(),
            confirm_password: "654321".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    client
        .register(&RegisterForm {
            email: "new@example.com".to_string(),
            password: "123456".to_string(),
            username: "newcomer".to_string(),
            confirm_password: "123456".to_string(),
        })
        .await
        .unwrap();
    assert!(state
        .users
        .read()
        .iter()
        .any(|u| u.email == "new@example.com" && u.role == Role::User));
}

#[tokio::test]
async fn admin_endpoints_allow_admin_and_reject_users() {
    let (addr, _state) = spawn_mock().await;
    let admin = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));
    login_as_admin(&admin).await;

    let stats = admin.dashboard_stats().await.unwrap();
    assert_eq!(stats.total_houses, 3);
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_orders, 2);
    // Seeded revenue counts the confirmed and pending orders.
    assert_eq!(stats.total_revenue, 1572.0);

    let users = admin.admin_users(&Default::default()).await.unwrap();
    assert_eq!(users.total_elements, 2);

    let refunded = admin.refund_order("1").await.unwrap();
    assert_eq!(refunded.status, OrderStatus::Refunded);

    // A regular user is rejected, and the rejection tears their session
    // down client-side.
    let tokens = memory_tokens();
    let user = client_for(
        addr,
        tokens.clone(),
        Arc::new(RecordingNotices::default()),
    );
    login_as_user(&user, "guest@example.com").await;
    let err = user.dashboard_stats().await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn host_gate_on_house_mutations() {
    let (addr, state) = spawn_mock().await;
    let admin = client_for(addr, memory_tokens(), Arc::new(RecordingNotices::default()));
    login_as_admin(&admin).await;

    let house = admin
        .create_house(&lodgr::api::houses::HouseForm {
            title: "Lakeside Cabin".to_string(),
            address: "West Lake, Hangzhou".to_string(),
            price: 520.0,
            image_url: "https://picsum.photos/800/600?random=9".to_string(),
            tags: vec!["lake".to_string()],
            description: "Quiet cabin right on the water.".to_string(),
            facilities: None,
            owner: None,
        })
        .await
        .unwrap();
    assert_eq!(state.houses.read().len(), 4);

    admin.admin_delete_house(&house.id).await.unwrap();
    assert_eq!(state.houses.read().len(), 3);
}
