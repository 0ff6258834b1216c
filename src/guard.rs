//! Route guard.
//!
//! Evaluated before every navigation: resolve the session first (restoring
//! it from the persisted token when no user is in memory), then decide from
//! route metadata. The decision function itself is total and pure; the only
//! side effect of evaluation is the session check.

use crate::models::{Role, User};
use crate::session::AuthSession;

/// Auth requirements carried in route metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// Implies `requires_auth`.
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const PUBLIC: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_admin: false,
    };
    pub const AUTH: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_admin: false,
    };
    pub const ADMIN: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_admin: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// Redirect to the login view, preserving the intended destination for
    /// the post-login redirect.
    ToLogin { redirect: String },
    /// Redirect to the forbidden view.
    Forbidden,
}

/// Resolve the session, then decide.
pub async fn evaluate(session: &AuthSession, meta: RouteMeta, full_path: &str) -> Decision {
    if !session.is_authenticated() {
        session.check_auth().await;
    }
    decide(session.user().as_ref(), meta, full_path)
}

/// Pure decision over (route metadata, resolved session state).
pub fn decide(user: Option<&User>, meta: RouteMeta, full_path: &str) -> Decision {
    if !meta.requires_auth && !meta.requires_admin {
        return Decision::Proceed;
    }
    match user {
        None => Decision::ToLogin {
            redirect: full_path.to_string(),
        },
        Some(user) => {
            if meta.requires_admin && user.role != Role::Admin {
                Decision::Forbidden
            } else {
                Decision::Proceed
            }
        }
    }
}
