// Application state module
// Shared, read-only state handed to every connection task

use std::sync::Arc;

use super::types::Config;
use crate::handler::Dispatcher;
use crate::store::Store;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
    // Cached from config so the request path never walks the config tree
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    /// Wire the dispatcher to an already seeded store
    pub fn new(config: &Config, store: Arc<Store>) -> Self {
        Self {
            config: config.clone(),
            dispatcher: Dispatcher::new(store, config.http.max_body_size),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
        }
    }
}
