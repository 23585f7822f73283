//! Infrastructure layer - Host adapters and the HTTP surface
//!
//! This layer contains:
//! - Persistence: JSON world snapshot store
//! - Dnd5e: skill and ability registry with English prompt titles
//! - Text enricher and click router: the pipeline and dispatcher the services register with
//! - Selection and roll executor: who rolls and what gets rolled
//! - HTTP: REST API routes
//! - Config and State: configuration and shared application state

pub mod click_router;
pub mod config;
pub mod dnd5e;
pub mod http;
pub mod notifications;
pub mod persistence;
pub mod roll_executor;
pub mod selection;
pub mod state;
pub mod text_enricher;
