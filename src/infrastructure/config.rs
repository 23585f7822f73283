//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::application::services::DEFAULT_CHUNK_SIZE;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,

    /// JSON world snapshot served and migrated by this process
    pub world_file: PathBuf,
    /// Write the snapshot back to `world_file` after every update
    pub persist_changes: bool,

    /// Pack document IDs fetched per migration chunk
    pub migration_chunk_size: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let migration_chunk_size = env::var("INLINE_ROLL_MIGRATION_CHUNK_SIZE")
            .unwrap_or_else(|_| DEFAULT_CHUNK_SIZE.to_string())
            .parse()
            .context("INLINE_ROLL_MIGRATION_CHUNK_SIZE must be a positive integer")?;
        if migration_chunk_size == 0 {
            bail!("INLINE_ROLL_MIGRATION_CHUNK_SIZE must be greater than zero");
        }

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            world_file: env::var("INLINE_ROLL_WORLD_FILE")
                .map(PathBuf::from)
                .context("INLINE_ROLL_WORLD_FILE environment variable is required")?,
            persist_changes: env::var("INLINE_ROLL_PERSIST")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("INLINE_ROLL_PERSIST must be true or false")?,

            migration_chunk_size,
        })
    }
}
