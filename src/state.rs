// src/state.rs
use std::sync::Arc;

use crate::config::{AppConfig, StoreConfig};
use crate::services::gemini::{GeminiClient, TextGenerator};
use crate::services::interaction_log::{
    InteractionStore, JsonlInteractionStore, PgInteractionStore, StoreError,
};
use crate::services::prompt::PromptBuilder;

pub type SharedState = Arc<AppState>;

/// Long-lived collaborators, built once by the entry point and read by every request.
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub store: Option<Arc<dyn InteractionStore>>,
    pub prompt: PromptBuilder,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, prompt: PromptBuilder) -> Self {
        Self { generator, store: None, prompt }
    }

    pub fn with_store(mut self, store: Arc<dyn InteractionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Wire up the Gemini client and the configured interaction store.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let generator = Arc::new(GeminiClient::from_config(config));
        let state = Self::new(generator, PromptBuilder::new(config.sanitize_prompt));

        let state = match &config.store {
            StoreConfig::Disabled => {
                tracing::info!("interaction logging disabled");
                state
            }
            StoreConfig::Postgres { url } => {
                let store = PgInteractionStore::connect(url).await?;
                tracing::info!("Successfully connected to the database.");
                state.with_store(Arc::new(store))
            }
            StoreConfig::JsonLines { path } => {
                tracing::info!(path = %path.display(), "logging interactions to file");
                state.with_store(Arc::new(JsonlInteractionStore::new(path.clone())))
            }
        };

        Ok(state)
    }

    /// Release the interaction store, if any.
    pub async fn shutdown(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}
