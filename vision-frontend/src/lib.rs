pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use crate::config::VisionSettings;
use crate::services::VisionClient;
use std::sync::Arc;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<VisionSettings>,
    pub vision_client: Arc<VisionClient>,
}

impl AppState {
    pub fn new(settings: Arc<VisionSettings>, vision_client: Arc<VisionClient>) -> Self {
        Self {
            settings,
            vision_client,
        }
    }
}
