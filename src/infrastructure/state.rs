//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{register_grammars, DescriptorBuilder, MigrationService};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::dnd5e::Dnd5eSystem;
use crate::infrastructure::notifications::TracingNotifier;
use crate::infrastructure::persistence::JsonWorldStore;
use crate::infrastructure::text_enricher::TextEnricher;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// World documents and compendium packs
    pub store: Arc<JsonWorldStore>,
    /// Text pipeline with the inline roll grammars registered
    pub enricher: TextEnricher,
    pub migrations: MigrationService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = JsonWorldStore::open(&config.world_file, config.persist_changes).await?;
        Self::with_store(config, Arc::new(store))
    }

    /// Wire the services around an already loaded store
    pub fn with_store(config: AppConfig, store: Arc<JsonWorldStore>) -> Result<Self> {
        let system = Arc::new(Dnd5eSystem::new());
        let builder = Arc::new(DescriptorBuilder::new(system.clone(), system, store.clone()));

        let mut enricher = TextEnricher::new();
        register_grammars(&mut enricher, builder);

        let migrations = MigrationService::new(store.clone(), store.clone(), Arc::new(TracingNotifier))
            .with_chunk_size(config.migration_chunk_size)?;

        Ok(Self {
            config,
            store,
            enricher,
            migrations,
        })
    }
}
