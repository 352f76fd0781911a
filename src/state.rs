// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::gemini::{GeminiClient, Generator};

pub type SharedState = Arc<AppState>;

/// Per-process state shared by every request. Holds no per-request data.
pub struct AppState {
    pub config: Arc<Config>,
    pub generator: Arc<dyn Generator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let generator = Arc::new(GeminiClient::new(&config));
        Self::with_generator(config, generator)
    }

    pub fn with_generator(config: Config, generator: Arc<dyn Generator>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }
}
