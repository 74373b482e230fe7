use std::sync::Arc;

use crate::analytics::AnalyticsEngine;
use crate::database::store::MatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub analytics: AnalyticsEngine,
    pub default_limit: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        AppState {
            analytics: AnalyticsEngine::new(store.clone()),
            store,
            default_limit: 20,
        }
    }

    pub fn with_default_limit(mut self, limit: i64) -> Self {
        self.default_limit = limit;
        self
    }
}
