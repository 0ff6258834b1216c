//! HTTP request client.
//!
//! `ApiClient` is the single chokepoint every API module funnels through:
//! it joins relative paths onto a fixed base URL, applies the fixed request
//! timeout, injects the bearer token from the token store, and centralizes
//! failure presentation. A 401 or 403 on any call except logout tears the
//! session down (token store cleared, expiry hook fired) before the error
//! is propagated, so callers can still apply local recovery.

mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use reqwest::multipart::Form;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Sink for user-visible notices (toasts in the original UI). The default
/// implementation logs through `tracing`; tests substitute a recording one.
pub trait NoticeSink: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notice sink that forwards to the log.
#[derive(Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn success(&self, message: &str) {
        tracing::info!(notice = message, "notice");
    }

    fn error(&self, message: &str) {
        tracing::error!(notice = message, "notice");
    }
}

/// Per-call authorization behavior.
#[derive(Debug, Clone, Default)]
pub enum AuthHeader {
    /// Inject `Bearer <token>` from the token store when one is persisted.
    #[default]
    Inherit,
    /// Send no Authorization header (login and register).
    None,
    /// Send this exact token, bypassing the store.
    Bearer(String),
}

type ExpiryHook = Box<dyn Fn() + Send + Sync>;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    notices: Arc<dyn NoticeSink>,
    on_session_expired: parking_lot::RwLock<Option<ExpiryHook>>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        // A base without a trailing slash would drop its last segment on
        // join, so normalize here.
        let base = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Unexpected(format!("invalid base URL {base:?}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            tokens,
            notices,
            on_session_expired: parking_lot::RwLock::new(None),
        })
    }

    /// Register the hook fired after a 401/403 tears the session down. The
    /// application wires this to its redirect-to-login navigation.
    pub fn on_session_expired(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.on_session_expired.write() = Some(Box::new(hook));
    }

    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>, AuthHeader::Inherit)
            .await
    }

    pub async fn get_with_auth<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: AuthHeader,
    ) -> Result<T> {
        self.request(Method::GET, path, None::<&()>, auth).await
    }

    pub async fn get_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let builder = self
            .http
            .request(Method::GET, self.endpoint(path)?)
            .query(query);
        self.execute(builder, AuthHeader::Inherit, path).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body), AuthHeader::Inherit)
            .await
    }

    pub async fn post_with_auth<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: AuthHeader,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body), auth).await
    }

    /// POST with no request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, None::<&()>, AuthHeader::Inherit)
            .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let builder = self
            .http
            .request(Method::POST, self.endpoint(path)?)
            .multipart(form);
        self.execute(builder, AuthHeader::Inherit, path).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PUT, path, Some(body), AuthHeader::Inherit)
            .await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PATCH, path, Some(body), AuthHeader::Inherit)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>, AuthHeader::Inherit)
            .await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: AuthHeader,
    ) -> Result<T> {
        let mut builder = self.http.request(method, self.endpoint(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(builder, auth, path).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|e| Error::Unexpected(format!("invalid request path {path:?}: {e}")))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        mut builder: reqwest::RequestBuilder,
        auth: AuthHeader,
        path: &str,
    ) -> Result<T> {
        match auth {
            AuthHeader::Inherit => {
                if let Some(token) = self.tokens.load() {
                    builder = builder.bearer_auth(token);
                }
            }
            AuthHeader::None => {}
            AuthHeader::Bearer(token) => builder = builder.bearer_auth(token),
        }

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = extract_message(response).await;
        Err(self.handle_failure(status, message, path))
    }

    /// Map a non-success status into the error taxonomy, performing session
    /// teardown for auth failures. Side effects happen before the error is
    /// returned so callers always observe a consistent store.
    fn handle_failure(&self, status: StatusCode, message: String, path: &str) -> Error {
        let is_logout = path.contains("/auth/logout");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN if !is_logout => {
                self.expire_session();
                self.notices
                    .error("Your session has expired, please sign in again");
                if status == StatusCode::FORBIDDEN {
                    Error::Forbidden(message)
                } else {
                    Error::SessionExpired
                }
            }
            StatusCode::NOT_FOUND => {
                self.notices.error(&message);
                Error::NotFound(message)
            }
            _ if status.is_client_error() => {
                self.notices.error(&message);
                Error::Validation(message)
            }
            _ => {
                self.notices.error(&message);
                Error::Unexpected(format!("{status}: {message}"))
            }
        }
    }

    fn expire_session(&self) {
        self.tokens.clear();
        if let Some(hook) = self.on_session_expired.read().as_ref() {
            hook();
        }
    }
}

/// Pull the server-provided message out of an error body, falling back to a
/// generic notice when there is none.
async fn extract_message(response: reqwest::Response) -> String {
    let body: Option<serde_json::Value> = response.json().await.ok();
    body.as_ref()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error").and_then(|e| e.get("message")))
        })
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| "Request failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_join_keeps_last_segment() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            timeout_secs: 5,
        };
        let client = ApiClient::new(
            &config,
            Arc::new(MemoryTokenStore::default()),
            Arc::new(LogNotices),
        )
        .unwrap();
        assert_eq!(
            client.endpoint("/houses/1").unwrap().as_str(),
            "http://127.0.0.1:8080/api/houses/1"
        );
        assert_eq!(
            client.endpoint("auth/me").unwrap().as_str(),
            "http://127.0.0.1:8080/api/auth/me"
        );
    }
}
