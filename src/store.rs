//! Application-state store for houses.
//!
//! Holds the fetched list and detail so the (out-of-scope) UI always reads
//! a consistent snapshot. Failures reset the affected slot to a safe empty
//! value and raise a notice; stale or partial data never survives an error.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

use crate::client::{ApiClient, NoticeSink};
use crate::models::{House, HouseQuery, HouseSummary};

pub struct HouseStore {
    client: Arc<ApiClient>,
    notices: Arc<dyn NoticeSink>,
    houses: RwLock<Vec<HouseSummary>>,
    current: RwLock<Option<House>>,
    loading: AtomicBool,
}

impl HouseStore {
    pub fn new(client: Arc<ApiClient>, notices: Arc<dyn NoticeSink>) -> Self {
        Self {
            client,
            notices,
            houses: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn houses(&self) -> Vec<HouseSummary> {
        self.houses.read().clone()
    }

    pub fn current(&self) -> Option<House> {
        self.current.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn fetch_list(&self, query: &HouseQuery) {
        self.loading.store(true, Ordering::Release);
        match self.client.list_houses(query).await {
            Ok(response) => *self.houses.write() = response.list,
            Err(e) => {
                warn!(error = %e, "Failed to fetch house list");
                self.notices.error("Failed to load houses");
                self.houses.write().clear();
            }
        }
        self.loading.store(false, Ordering::Release);
    }

    pub async fn fetch_detail(&self, id: &str) {
        self.loading.store(true, Ordering::Release);
        match self.client.house_detail(id).await {
            Ok(house) => *self.current.write() = Some(house),
            Err(e) => {
                warn!(error = %e, house_id = id, "Failed to fetch house detail");
                self.notices.error("Failed to load house details");
                *self.current.write() = None;
            }
        }
        self.loading.store(false, Ordering::Release);
    }
}
