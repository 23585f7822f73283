//! Migration Service - Rewrites stored documents to the host's native roll syntax
//!
//! A run walks its documents strictly in order and never retries. A failed
//! write is recorded in the report and the run carries on with the next
//! document or chunk; nothing already written is rolled back.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::application::ports::outbound::{
    CollectionScope, CompendiumPort, DocumentStorePort, NotificationPort,
};
use crate::domain::entities::{
    Actor, Document, DocumentType, DocumentUpdate, Item, Scene, UpdateBatch,
};
use crate::domain::services::document_migration::{
    migrate_actor_fields, migrate_embedded_items, migrate_item, migrate_scene,
};
use crate::domain::value_objects::{DocumentId, MigrationRunId, PackId};

/// Number of pack document IDs fetched per request
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Errors that stop a migration before it starts
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Compendium pack not found: {0}")]
    PackNotFound(PackId),

    #[error("Migration chunk size must be greater than zero")]
    InvalidChunkSize,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationState {
    Idle,
    Running,
    Complete,
}

/// What a run migrates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum MigrationTarget {
    World,
    Pack { pack_id: PackId },
}

/// Why a pack run did nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PackSkipReason {
    Locked,
    UnsupportedDocumentType { document_type: DocumentType },
}

/// A write or read that failed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFailure {
    pub scope: CollectionScope,
    pub document_id: Option<DocumentId>,
    pub message: String,
}

/// Summary of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub run_id: MigrationRunId,
    pub target: MigrationTarget,
    pub state: MigrationState,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Top-level documents written through batch updates
    pub documents_updated: usize,
    /// Embedded items written through embedded updates
    pub embedded_items_updated: usize,
    pub chunks_processed: usize,
    pub skipped: Option<PackSkipReason>,
    pub failures: Vec<MigrationFailure>,
}

impl MigrationReport {
    fn new(target: MigrationTarget) -> Self {
        Self {
            run_id: MigrationRunId::new(),
            target,
            state: MigrationState::Idle,
            started_at: None,
            finished_at: None,
            documents_updated: 0,
            embedded_items_updated: 0,
            chunks_processed: 0,
            skipped: None,
            failures: Vec::new(),
        }
    }

    fn begin(&mut self) {
        self.state = MigrationState::Running;
        self.started_at = Some(Utc::now());
    }

    fn complete(&mut self) {
        self.state = MigrationState::Complete;
        self.finished_at = Some(Utc::now());
    }

    fn skip(mut self, reason: PackSkipReason) -> Self {
        self.skipped = Some(reason);
        self.complete();
        self
    }

    fn record_failure(
        &mut self,
        scope: &CollectionScope,
        document_id: Option<DocumentId>,
        error: anyhow::Error,
    ) {
        error!(run_id = %self.run_id, %scope, ?document_id, "Migration step failed: {:#}", error);
        self.failures.push(MigrationFailure {
            scope: scope.clone(),
            document_id,
            message: format!("{error:#}"),
        });
    }

    /// Whether the run finished without any failed step
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs world and compendium migrations
pub struct MigrationService {
    store: Arc<dyn DocumentStorePort>,
    compendiums: Arc<dyn CompendiumPort>,
    notifier: Arc<dyn NotificationPort>,
    chunk_size: usize,
}

impl MigrationService {
    pub fn new(
        store: Arc<dyn DocumentStorePort>,
        compendiums: Arc<dyn CompendiumPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            store,
            compendiums,
            notifier,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self, MigrationError> {
        if chunk_size == 0 {
            return Err(MigrationError::InvalidChunkSize);
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Migrate world actors, then world items, then scene tokens
    #[instrument(skip(self))]
    pub async fn migrate_world(&self) -> Result<MigrationReport> {
        let mut report = MigrationReport::new(MigrationTarget::World);
        report.begin();
        info!(run_id = %report.run_id, "Starting world migration");
        self.notifier
            .info("Migrating world documents to the native inline roll syntax. Please be patient.");

        let scope = CollectionScope::world(DocumentType::Actor);
        match self.store.list_actors().await.context("Failed to list world actors") {
            Ok(actors) => self.migrate_actors(&scope, &actors, &mut report).await,
            Err(e) => report.record_failure(&scope, None, e),
        }

        let scope = CollectionScope::world(DocumentType::Item);
        match self.store.list_items().await.context("Failed to list world items") {
            Ok(items) => self.migrate_items(&scope, &items, &mut report).await,
            Err(e) => report.record_failure(&scope, None, e),
        }

        let scope = CollectionScope::world(DocumentType::Scene);
        match self.store.list_scenes().await.context("Failed to list scenes") {
            Ok(scenes) => self.migrate_scenes(&scope, &scenes, &mut report).await,
            Err(e) => report.record_failure(&scope, None, e),
        }

        report.complete();
        info!(
            run_id = %report.run_id,
            documents_updated = report.documents_updated,
            embedded_items_updated = report.embedded_items_updated,
            failures = report.failures.len(),
            "World migration complete"
        );
        self.notify_finished("World", &report);
        Ok(report)
    }

    /// Migrate one compendium pack, chunk by chunk
    ///
    /// Locked packs and packs of other document types are left untouched.
    #[instrument(skip(self, pack_id), fields(pack_id = %pack_id))]
    pub async fn migrate_pack(&self, pack_id: &PackId) -> Result<MigrationReport> {
        let pack = self
            .compendiums
            .get_pack(pack_id)
            .await
            .context("Failed to load compendium pack")?
            .ok_or_else(|| MigrationError::PackNotFound(pack_id.clone()))?;

        let report = MigrationReport::new(MigrationTarget::Pack {
            pack_id: pack_id.clone(),
        });
        if pack.locked {
            debug!("Pack is locked, skipping");
            return Ok(report.skip(PackSkipReason::Locked));
        }
        if !pack.document_type.is_migratable() {
            debug!(document_type = %pack.document_type, "Pack document type has no markers, skipping");
            return Ok(report.skip(PackSkipReason::UnsupportedDocumentType {
                document_type: pack.document_type,
            }));
        }

        let mut report = report;
        report.begin();
        info!(run_id = %report.run_id, documents = pack.index.len(), "Starting pack migration");
        self.notifier.info(&format!(
            "Migrating compendium {} to the native inline roll syntax. Please be patient.",
            pack.label
        ));

        let scope = CollectionScope::pack(pack_id.clone());
        for chunk in pack.index.chunks(self.chunk_size) {
            debug!(chunk = report.chunks_processed, size = chunk.len(), "Fetching pack documents");
            match self
                .compendiums
                .fetch_documents(pack_id, chunk)
                .await
                .context("Failed to fetch pack documents")
            {
                Ok(documents) => self.migrate_documents(&scope, documents, &mut report).await,
                Err(e) => report.record_failure(&scope, None, e),
            }
            report.chunks_processed += 1;
        }

        report.complete();
        info!(
            run_id = %report.run_id,
            chunks = report.chunks_processed,
            documents_updated = report.documents_updated,
            failures = report.failures.len(),
            "Pack migration complete"
        );
        self.notify_finished(&format!("Compendium {}", pack.label), &report);
        Ok(report)
    }

    fn notify_finished(&self, what: &str, report: &MigrationReport) {
        if report.is_clean() {
            self.notifier
                .info(&format!("{what} migration to the native inline roll syntax complete."));
        } else {
            self.notifier.warn(&format!(
                "{what} migration finished with {} failed updates, see the log for details.",
                report.failures.len()
            ));
        }
    }

    async fn migrate_documents(
        &self,
        scope: &CollectionScope,
        documents: Vec<Document>,
        report: &mut MigrationReport,
    ) {
        let mut actors = Vec::new();
        let mut items = Vec::new();
        let mut scenes = Vec::new();
        for document in documents {
            match document {
                Document::Actor(actor) => actors.push(actor),
                Document::Item(item) => items.push(item),
                Document::Scene(scene) => scenes.push(scene),
            }
        }

        self.migrate_actors(scope, &actors, report).await;
        self.migrate_items(scope, &items, report).await;
        self.migrate_scenes(scope, &scenes, report).await;
    }

    /// Embedded items of each actor are written before the actors' own batch
    async fn migrate_actors(
        &self,
        scope: &CollectionScope,
        actors: &[Actor],
        report: &mut MigrationReport,
    ) {
        let mut batch = UpdateBatch::new();
        for actor in actors {
            let item_updates = migrate_embedded_items(actor);
            if !item_updates.is_empty() {
                let count = item_updates.len();
                debug!(actor_id = %actor.id, count, "Updating embedded items");
                match self
                    .store
                    .update_embedded_items(scope, &actor.id, item_updates)
                    .await
                    .with_context(|| format!("Failed to update items of actor {}", actor.name))
                {
                    Ok(()) => report.embedded_items_updated += count,
                    Err(e) => report.record_failure(scope, Some(actor.id.clone()), e),
                }
            }

            if let Some(update) = migrate_actor_fields(actor) {
                batch.push(actor.id.clone(), DocumentUpdate::Actor(update));
            }
        }
        self.persist(scope, batch, report).await;
    }

    async fn migrate_items(&self, scope: &CollectionScope, items: &[Item], report: &mut MigrationReport) {
        let mut batch = UpdateBatch::new();
        for item in items {
            if let Some(update) = migrate_item(item) {
                batch.push(item.id.clone(), DocumentUpdate::Item(update));
            }
        }
        self.persist(scope, batch, report).await;
    }

    async fn migrate_scenes(&self, scope: &CollectionScope, scenes: &[Scene], report: &mut MigrationReport) {
        let mut batch = UpdateBatch::new();
        for scene in scenes {
            if let Some(update) = migrate_scene(scene) {
                batch.push(scene.id.clone(), DocumentUpdate::Scene(update));
            }
        }
        self.persist(scope, batch, report).await;
    }

    async fn persist(&self, scope: &CollectionScope, batch: UpdateBatch, report: &mut MigrationReport) {
        if batch.is_empty() {
            debug!(%scope, "Nothing to update");
            return;
        }

        let count = batch.len();
        match self
            .store
            .update_documents(scope, batch)
            .await
            .with_context(|| format!("Failed to update {count} documents in {scope}"))
        {
            Ok(()) => {
                info!(%scope, count, "Updated documents");
                report.documents_updated += count;
            }
            Err(e) => report.record_failure(scope, None, e),
        }
    }
}
