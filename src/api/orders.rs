use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateOrderForm, Order};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderList {
    pub list: Vec<Order>,
}

impl ApiClient {
    /// Orders belonging to the current user.
    pub async fn list_orders(&self) -> Result<OrderList> {
        self.get("/orders").await
    }

    pub async fn create_order(&self, form: &CreateOrderForm) -> Result<Order> {
        self.post("/orders", form).await
    }

    pub async fn order_detail(&self, id: &str) -> Result<Order> {
        self.get(&format!("/orders/{id}")).await
    }

    pub async fn cancel_order(&self, id: &str) -> Result<Order> {
        self.post_empty(&format!("/orders/{id}/cancel")).await
    }
}
