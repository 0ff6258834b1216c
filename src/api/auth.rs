use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, AuthHeader};
use crate::error::Result;
use crate::models::{LoginForm, RegisterForm, User};

/// Body of `POST /auth/login`. The token is optional on the wire so the
/// session layer can reject a token-less response as a contract violation
/// instead of failing deserialization with an opaque error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl ApiClient {
    /// Credentials are sent with the Authorization header suppressed; a
    /// stale persisted token must not leak into a fresh login.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse> {
        self.post_with_auth("/auth/login", form, AuthHeader::None)
            .await
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<RegisterResponse> {
        self.post_with_auth("/auth/register", form, AuthHeader::None)
            .await
    }

    /// Resolve the current user from the persisted token.
    pub async fn current_user(&self) -> Result<User> {
        self.get("/auth/me").await
    }

    /// Resolve the current user with an explicit token, used during login
    /// before anything has been persisted.
    pub async fn current_user_with(&self, token: &str) -> Result<User> {
        self.get_with_auth("/auth/me", AuthHeader::Bearer(token.to_string()))
            .await
    }

    pub async fn logout(&self) -> Result<serde_json::Value> {
        self.post_empty("/auth/logout").await
    }
}
