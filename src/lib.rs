pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod mock;
pub mod models;
pub mod session;
pub mod store;

pub use client::{ApiClient, AuthHeader, FileTokenStore, LogNotices, MemoryTokenStore, NoticeSink, TokenStore};
pub use error::{Error, Result};
pub use guard::{Decision, RouteMeta};
pub use session::AuthSession;
pub use store::HouseStore;
