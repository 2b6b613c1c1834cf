use std::sync::Arc;

use common::DocumentStore;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: AppConfig,
}
