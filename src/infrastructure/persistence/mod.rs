//! World persistence adapters
//!
//! The world is a JSON snapshot of the host's documents and compendium packs,
//! loaded once at startup and optionally written back after every update.

mod json_world_store;

pub use json_world_store::{JsonWorldStore, StoredPack, WorldSnapshot};
