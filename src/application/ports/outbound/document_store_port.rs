//! Document store ports - Interfaces for reading and persisting host documents
//!
//! These traits define the contracts that the host's document store must implement.
//! The migration service depends on these traits, not on a concrete store.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Actor, CompendiumPack, Document, DocumentType, Item, ItemUpdate, Scene, UpdateBatch,
};
use crate::domain::value_objects::{DocumentId, PackId};

/// Where a batch of updates is written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum CollectionScope {
    /// A world-level collection of the given document type
    World { document_type: DocumentType },
    /// A compendium pack
    Pack { pack_id: PackId },
}

impl CollectionScope {
    pub fn world(document_type: DocumentType) -> Self {
        Self::World { document_type }
    }

    pub fn pack(pack_id: PackId) -> Self {
        Self::Pack { pack_id }
    }
}

impl std::fmt::Display for CollectionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World { document_type } => write!(f, "world {document_type}"),
            Self::Pack { pack_id } => write!(f, "pack {pack_id}"),
        }
    }
}

// =============================================================================
// Document Store Port
// =============================================================================

/// Port for the host's world collections and document writes
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// List all world actors with their embedded items
    async fn list_actors(&self) -> Result<Vec<Actor>>;

    /// Get a world actor by ID
    async fn get_actor(&self, id: &DocumentId) -> Result<Option<Actor>>;

    /// List all top-level world items
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// List all scenes with their tokens
    async fn list_scenes(&self) -> Result<Vec<Scene>>;

    /// Apply a batch of partial updates, keyed by document ID, to one collection
    async fn update_documents(&self, scope: &CollectionScope, batch: UpdateBatch) -> Result<()>;

    /// Update items embedded in one actor of the collection
    async fn update_embedded_items(
        &self,
        scope: &CollectionScope,
        actor_id: &DocumentId,
        updates: Vec<ItemUpdate>,
    ) -> Result<()>;
}

// =============================================================================
// Compendium Port
// =============================================================================

/// Port for reading compendium packs
#[async_trait]
pub trait CompendiumPort: Send + Sync {
    /// Get pack metadata and index, `None` if no pack has that ID
    async fn get_pack(&self, pack_id: &PackId) -> Result<Option<CompendiumPack>>;

    /// Load the documents with the given IDs from a pack
    async fn fetch_documents(&self, pack_id: &PackId, ids: &[DocumentId]) -> Result<Vec<Document>>;
}
