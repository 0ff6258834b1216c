use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Page, Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            username: None,
            email: None,
            role: None,
        }
    }
}

pub(crate) fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleChange {
    pub role: Role,
}

impl ApiClient {
    pub async fn list_users(&self, query: &UserQuery) -> Result<Page<User>> {
        self.get_query("/users", query).await
    }

    pub async fn set_user_role(&self, user_id: &str, role: Role) -> Result<User> {
        self.patch(&format!("/users/{user_id}/role"), &RoleChange { role })
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<serde_json::Value> {
        self.delete(&format!("/users/{user_id}")).await
    }
}
