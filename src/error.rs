//! Client-side error taxonomy.
//!
//! Every failure a caller can observe falls into one of these classes. The
//! request client maps HTTP status codes into them; stores and the session
//! either propagate the error or convert it into a notice plus a safe
//! fallback value. Nothing is silently swallowed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure, including the request timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Missing or invalid token, or a malformed login response (a login
    /// response without a token is a backend contract violation).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// 403 on a concrete action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 401 outside the logout call. The session has already been torn down
    /// by the time this is returned.
    #[error("session expired")]
    SessionExpired,

    /// 4xx carrying a server-provided message.
    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A credential-submitting call was already outstanding.
    #[error("another login attempt is already in flight")]
    LoginInFlight,

    /// Any other non-success status.
    #[error("request failed: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the request client already performed session teardown for
    /// this error. Callers must not clear the token store a second time.
    pub fn session_torn_down(&self) -> bool {
        matches!(self, Error::SessionExpired | Error::Forbidden(_))
    }
}
