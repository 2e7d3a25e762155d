pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::PlacidClient;
use std::sync::Arc;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub placid: Arc<PlacidClient>,
}

impl AppState {
    pub fn new(placid: Arc<PlacidClient>) -> Self {
        Self { placid }
    }
}
