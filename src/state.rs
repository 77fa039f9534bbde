use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::trigger::TriggerRegistry;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<TriggerRegistry>,
}

impl AppState {
    pub fn new(config: AppConfig, registry: TriggerRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }
}
