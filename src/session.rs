//! Auth session lifecycle.
//!
//! The session is the pair of persisted token and resolved user. The token
//! is the sole authority for authenticated calls; the user is derived by
//! fetching `/auth/me` after token acquisition. Invariant: token absent
//! implies user absent. Login is a single logical unit: the token is
//! persisted only after the current-user fetch succeeds, and any failure
//! inside the sequence rolls every piece of state back.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::client::{ApiClient, NoticeSink, TokenStore};
use crate::error::{Error, Result};
use crate::models::{LoginForm, RegisterForm, User};

pub struct AuthSession {
    client: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
    notices: Arc<dyn NoticeSink>,
    user: Arc<RwLock<Option<User>>>,
    /// Hard guard against overlapping credential-submitting calls.
    in_flight: Arc<AtomicBool>,
}

impl AuthSession {
    /// Builds the session and wires the client's session-expiry hook so a
    /// 401/403 anywhere also drops the in-memory user.
    pub fn new(client: Arc<ApiClient>, notices: Arc<dyn NoticeSink>) -> Self {
        let user = Arc::new(RwLock::new(None::<User>));
        let hook_user = Arc::clone(&user);
        client.on_session_expired(move || {
            *hook_user.write() = None;
        });
        Self {
            tokens: client.token_store(),
            client,
            notices,
            user,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    /// Whether a login or register call is currently outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Log in and resolve the current user.
    ///
    /// A response without a token is a backend contract violation and fails
    /// with [`Error::Auth`]. Nothing is persisted until the whole sequence
    /// has succeeded; on any failure both the token store and the in-memory
    /// user end up cleared before the error reaches the caller.
    pub async fn login(&self, form: &LoginForm) -> Result<User> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(Error::LoginInFlight)?;

        let response = self.client.login(form).await?;
        let token = match response.token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                self.notices.error("Sign-in failed");
                return Err(Error::Auth("login response carried no token".to_string()));
            }
        };

        match self.client.current_user_with(&token).await {
            Ok(user) => {
                self.tokens.save(&token);
                *self.user.write() = Some(user.clone());
                Ok(user)
            }
            Err(err) => {
                if !err.session_torn_down() {
                    self.tokens.clear();
                }
                *self.user.write() = None;
                self.notices.error("Sign-in failed");
                Err(err)
            }
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// At most once per session: if a user is already resolved in memory
    /// this returns the current authenticated-ness without a network call.
    /// A persisted token whose current-user fetch fails is cleared.
    pub async fn check_auth(&self) -> bool {
        if self.user.read().is_some() {
            return true;
        }
        if self.tokens.load().is_none() {
            return false;
        }

        match self.client.current_user().await {
            Ok(user) => {
                *self.user.write() = Some(user);
                true
            }
            Err(err) => {
                debug!(error = %err, "Session restoration failed");
                if !err.session_torn_down() {
                    self.tokens.clear();
                }
                *self.user.write() = None;
                false
            }
        }
    }

    /// Local-only teardown. The server is notified best-effort in the
    /// background; its answer never gates the clear.
    pub fn logout(&self) {
        self.tokens.clear();
        *self.user.write() = None;

        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            if let Err(e) = client.logout().await {
                debug!(error = %e, "Logout notification failed");
            }
        });
    }

    /// Register a new account. Does not auto-login.
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(Error::LoginInFlight)?;

        self.client.register(form).await?;
        self.notices.success("Registration complete, please sign in");
        Ok(())
    }
}

/// RAII flag claim; releases on drop so error paths cannot leak the guard.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
