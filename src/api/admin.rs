//! Back-office endpoints. Every call requires an ADMIN session; the mock
//! rejects anything else with 403.

use serde::{Deserialize, Serialize};

use super::users::{default_page_size, RoleChange};
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{House, Order, Page, Review, Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_houses: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize)]
struct RejectReason {
    reason: String,
}

impl ApiClient {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/admin/dashboard/stats").await
    }

    pub async fn admin_users(&self, query: &PageQuery) -> Result<Page<User>> {
        self.get_query("/admin/users", query).await
    }

    pub async fn admin_set_user_role(&self, user_id: &str, role: Role) -> Result<User> {
        self.patch(&format!("/admin/users/{user_id}/role"), &RoleChange { role })
            .await
    }

    pub async fn admin_delete_user(&self, user_id: &str) -> Result<serde_json::Value> {
        self.delete(&format!("/admin/users/{user_id}")).await
    }

    pub async fn admin_houses(&self, query: &PageQuery) -> Result<Page<House>> {
        self.get_query("/admin/houses", query).await
    }

    pub async fn approve_house(&self, house_id: &str) -> Result<House> {
        self.post_empty(&format!("/admin/houses/{house_id}/approve"))
            .await
    }

    pub async fn reject_house(&self, house_id: &str, reason: &str) -> Result<House> {
        self.post(
            &format!("/admin/houses/{house_id}/reject"),
            &RejectReason {
                reason: reason.to_string(),
            },
        )
        .await
    }

    pub async fn admin_delete_house(&self, house_id: &str) -> Result<serde_json::Value> {
        self.delete(&format!("/admin/houses/{house_id}")).await
    }

    pub async fn admin_orders(&self, query: &PageQuery) -> Result<Page<Order>> {
        self.get_query("/admin/orders", query).await
    }

    pub async fn refund_order(&self, order_id: &str) -> Result<Order> {
        self.post_empty(&format!("/admin/orders/{order_id}/refund"))
            .await
    }

    pub async fn admin_reviews(&self, query: &PageQuery) -> Result<Page<Review>> {
        self.get_query("/reviews", query).await
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<serde_json::Value> {
        self.delete(&format!("/reviews/{review_id}")).await
    }
}
