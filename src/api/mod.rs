//! Typed endpoint modules.
//!
//! Every call funnels through the shared [`ApiClient`](crate::ApiClient);
//! no module builds its own HTTP client, so auth-header injection and
//! failure handling apply uniformly.

pub mod admin;
pub mod auth;
pub mod houses;
pub mod orders;
pub mod reviews;
pub mod users;
