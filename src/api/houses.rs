use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{House, HouseQuery, HouseSummary, Owner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseList {
    pub list: Vec<HouseSummary>,
}

/// Fields accepted when creating or updating a house (host/admin side).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseForm {
    pub title: String,
    pub address: String,
    pub price: f64,
    pub image_url: String,
    pub tags: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
}

impl ApiClient {
    pub async fn list_houses(&self, query: &HouseQuery) -> Result<HouseList> {
        self.get_query("/houses", query).await
    }

    pub async fn house_detail(&self, id: &str) -> Result<House> {
        self.get(&format!("/houses/{id}")).await
    }

    pub async fn create_house(&self, form: &HouseForm) -> Result<House> {
        self.post("/houses", form).await
    }

    pub async fn update_house(&self, id: &str, form: &HouseForm) -> Result<House> {
        self.put(&format!("/houses/{id}"), form).await
    }

    pub async fn delete_house(&self, id: &str) -> Result<serde_json::Value> {
        self.delete(&format!("/houses/{id}")).await
    }
}
