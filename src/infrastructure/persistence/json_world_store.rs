//! JSON world snapshot store
//!
//! Holds a world (actors, items, scenes, compendium packs and the user's
//! character) in memory and optionally writes it back to its file after every
//! update.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::ports::outbound::{
    CollectionScope, CompendiumPort, DocumentStorePort, UserCharacterPort,
};
use crate::domain::entities::{
    Actor, ActorUpdate, BatchEntry, CompendiumPack, Document, DocumentType, DocumentUpdate, Item,
    ItemUpdate, Scene, SceneUpdate, UpdateBatch,
};
use crate::domain::value_objects::{DocumentId, PackId};

/// A compendium pack with its documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPack {
    pub id: PackId,
    pub label: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl StoredPack {
    fn metadata(&self) -> CompendiumPack {
        CompendiumPack {
            id: self.id.clone(),
            label: self.label.clone(),
            document_type: self.document_type.clone(),
            locked: self.locked,
            index: self.documents.iter().map(|d| d.id().clone()).collect(),
        }
    }
}

/// Serialized form of a world
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    #[serde(default)]
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub packs: Vec<StoredPack>,
    /// Actor assigned to the acting user
    #[serde(default)]
    pub user_character: Option<DocumentId>,
}

/// In-memory world backed by a JSON file
///
/// Updates are applied to a copy of the world, which replaces it only after
/// every entry applied and the file was written.
pub struct JsonWorldStore {
    world: RwLock<WorldSnapshot>,
    /// Where to write the world after updates, `None` to keep changes in memory
    path: Option<PathBuf>,
}

impl JsonWorldStore {
    /// Load a world from `path`
    pub async fn open(path: impl Into<PathBuf>, persist_changes: bool) -> Result<Self> {
        let path = path.into();
        let json = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read world file {}", path.display()))?;
        let world: WorldSnapshot = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse world file {}", path.display()))?;

        info!(
            actors = world.actors.len(),
            items = world.items.len(),
            scenes = world.scenes.len(),
            packs = world.packs.len(),
            "Loaded world from {}",
            path.display()
        );
        Ok(Self {
            world: RwLock::new(world),
            path: persist_changes.then_some(path),
        })
    }

    /// In-memory store that never writes to disk
    pub fn from_snapshot(world: WorldSnapshot) -> Self {
        Self {
            world: RwLock::new(world),
            path: None,
        }
    }

    pub async fn snapshot(&self) -> WorldSnapshot {
        self.world.read().await.clone()
    }

    async fn save(&self, world: &WorldSnapshot) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(world).context("Failed to serialize world")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write world file {}", path.display()))?;
        debug!("Saved world to {}", path.display());
        Ok(())
    }
}

fn apply_item_updates(items: &mut [Item], updates: &[ItemUpdate]) -> Result<()> {
    for update in updates {
        let item = items
            .iter_mut()
            .find(|item| item.id == update.id)
            .with_context(|| format!("Embedded item {} not found", update.id))?;
        item.description = update.description.clone();
    }
    Ok(())
}

fn apply_actor_update(actor: &mut Actor, update: &ActorUpdate) -> Result<()> {
    if let Some(biography) = &update.biography {
        actor.biography = biography.clone();
    }
    apply_item_updates(&mut actor.items, &update.items)
}

fn apply_scene_update(scene: &mut Scene, update: &SceneUpdate) -> Result<()> {
    for token_update in &update.tokens {
        let actor = scene
            .tokens
            .iter_mut()
            .find(|token| token.id == token_update.id)
            .and_then(|token| token.actor.as_mut())
            .with_context(|| format!("Token {} has no synthetic actor", token_update.id))?;
        apply_actor_update(actor, &token_update.actor)?;
    }
    Ok(())
}

fn apply_world_entry(world: &mut WorldSnapshot, entry: &BatchEntry) -> Result<()> {
    let id = &entry.id;
    match &entry.update {
        DocumentUpdate::Actor(update) => {
            let actor = world
                .actors
                .iter_mut()
                .find(|actor| &actor.id == id)
                .with_context(|| format!("Actor {id} not found"))?;
            apply_actor_update(actor, update)
        }
        DocumentUpdate::Item(update) => {
            let item = world
                .items
                .iter_mut()
                .find(|item| &item.id == id)
                .with_context(|| format!("Item {id} not found"))?;
            item.description = update.description.clone();
            Ok(())
        }
        DocumentUpdate::Scene(update) => {
            let scene = world
                .scenes
                .iter_mut()
                .find(|scene| &scene.id == id)
                .with_context(|| format!("Scene {id} not found"))?;
            apply_scene_update(scene, update)
        }
    }
}

fn apply_pack_entry(pack: &mut StoredPack, entry: &BatchEntry) -> Result<()> {
    let document = pack
        .documents
        .iter_mut()
        .find(|document| document.id() == &entry.id)
        .with_context(|| format!("Document {} not found in pack {}", entry.id, pack.id))?;

    match (document, &entry.update) {
        (Document::Actor(actor), DocumentUpdate::Actor(update)) => apply_actor_update(actor, update),
        (Document::Item(item), DocumentUpdate::Item(update)) => {
            item.description = update.description.clone();
            Ok(())
        }
        (Document::Scene(scene), DocumentUpdate::Scene(update)) => apply_scene_update(scene, update),
        (document, _) => bail!(
            "Update for {} does not match its document type {}",
            entry.id,
            document.document_type()
        ),
    }
}

fn find_pack<'a>(world: &'a mut WorldSnapshot, pack_id: &PackId) -> Result<&'a mut StoredPack> {
    world
        .packs
        .iter_mut()
        .find(|pack| &pack.id == pack_id)
        .with_context(|| format!("Compendium pack {pack_id} not found"))
}

#[async_trait]
impl DocumentStorePort for JsonWorldStore {
    async fn list_actors(&self) -> Result<Vec<Actor>> {
        Ok(self.world.read().await.actors.clone())
    }

    async fn get_actor(&self, id: &DocumentId) -> Result<Option<Actor>> {
        let world = self.world.read().await;
        Ok(world.actors.iter().find(|actor| &actor.id == id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.world.read().await.items.clone())
    }

    async fn list_scenes(&self) -> Result<Vec<Scene>> {
        Ok(self.world.read().await.scenes.clone())
    }

    async fn update_documents(&self, scope: &CollectionScope, batch: UpdateBatch) -> Result<()> {
        let mut world = self.world.write().await;
        let mut staged = world.clone();
        match scope {
            CollectionScope::World { .. } => {
                for entry in batch.iter() {
                    apply_world_entry(&mut staged, entry)?;
                }
            }
            CollectionScope::Pack { pack_id } => {
                let pack = find_pack(&mut staged, pack_id)?;
                for entry in batch.iter() {
                    apply_pack_entry(pack, entry)?;
                }
            }
        }
        self.save(&staged).await?;
        *world = staged;
        debug!(%scope, count = batch.len(), "Applied document updates");
        Ok(())
    }

    async fn update_embedded_items(
        &self,
        scope: &CollectionScope,
        actor_id: &DocumentId,
        updates: Vec<ItemUpdate>,
    ) -> Result<()> {
        let mut world = self.world.write().await;
        let mut staged = world.clone();
        let actor = match scope {
            CollectionScope::World { .. } => staged
                .actors
                .iter_mut()
                .find(|actor| &actor.id == actor_id)
                .with_context(|| format!("Actor {actor_id} not found"))?,
            CollectionScope::Pack { pack_id } => {
                let pack = find_pack(&mut staged, pack_id)?;
                pack.documents
                    .iter_mut()
                    .find_map(|document| match document {
                        Document::Actor(actor) if &actor.id == actor_id => Some(actor),
                        _ => None,
                    })
                    .with_context(|| format!("Actor {actor_id} not found in pack {pack_id}"))?
            }
        };
        apply_item_updates(&mut actor.items, &updates)?;
        self.save(&staged).await?;
        *world = staged;
        debug!(%scope, %actor_id, count = updates.len(), "Applied embedded item updates");
        Ok(())
    }
}

#[async_trait]
impl CompendiumPort for JsonWorldStore {
    async fn get_pack(&self, pack_id: &PackId) -> Result<Option<CompendiumPack>> {
        let world = self.world.read().await;
        Ok(world
            .packs
            .iter()
            .find(|pack| &pack.id == pack_id)
            .map(StoredPack::metadata))
    }

    async fn fetch_documents(&self, pack_id: &PackId, ids: &[DocumentId]) -> Result<Vec<Document>> {
        let world = self.world.read().await;
        let pack = world
            .packs
            .iter()
            .find(|pack| &pack.id == pack_id)
            .with_context(|| format!("Compendium pack {pack_id} not found"))?;

        Ok(ids
            .iter()
            .filter_map(|id| pack.documents.iter().find(|document| document.id() == id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserCharacterPort for JsonWorldStore {
    async fn default_character(&self) -> Result<Option<Actor>> {
        let world = self.world.read().await;
        let Some(character_id) = &world.user_character else {
            return Ok(None);
        };
        Ok(world.actors.iter().find(|actor| &actor.id == character_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::ports::outbound::NotificationPort;
    use crate::application::services::MigrationService;
    use crate::domain::entities::Token;

    struct Silent;

    impl NotificationPort for Silent {
        fn info(&self, _message: &str) {}

        fn warn(&self, _message: &str) {}
    }

    fn world() -> WorldSnapshot {
        WorldSnapshot {
            actors: vec![Actor::new("a1", "Aria")
                .with_biography("Sneaky: [[/brSkill ste]]{Hide}")
                .with_item(
                    Item::new("i1", "Dagger of Venom")
                        .with_img("icons/venom.webp")
                        .with_description("[[/rollItem Dagger of Venom]]{Attack!} then [[/rSave con]]"),
                )],
            items: vec![Item::new("i2", "Trap").with_description("[[/gmrAbility wis]]")],
            scenes: vec![Scene {
                id: "s1".into(),
                name: "Crypt".to_string(),
                tokens: vec![Token {
                    id: "t1".into(),
                    name: "Ghoul".to_string(),
                    actor_link: false,
                    actor: Some(Actor::new("a9", "Ghoul").with_biography("[[/rSave con]]")),
                }],
            }],
            packs: vec![StoredPack {
                id: "world.monsters".into(),
                label: "Monsters".to_string(),
                document_type: DocumentType::Actor,
                locked: false,
                documents: vec![Document::Actor(
                    Actor::new("p1", "Ogre").with_item(
                        Item::new("p1i", "Club").with_description("[[/rollSkill ath]]{Smash}"),
                    ),
                )],
            }],
            user_character: Some("a1".into()),
        }
    }

    fn migrations(store: &Arc<JsonWorldStore>) -> MigrationService {
        MigrationService::new(store.clone(), store.clone(), Arc::new(Silent))
    }

    #[tokio::test]
    async fn test_world_migration_rewrites_and_is_idempotent() {
        let store = Arc::new(JsonWorldStore::from_snapshot(world()));

        let first = migrations(&store).migrate_world().await.unwrap();
        assert!(first.is_clean());
        assert_eq!(first.documents_updated, 3);
        assert_eq!(first.embedded_items_updated, 1);

        let migrated = store.snapshot().await;
        assert_eq!(migrated.actors[0].biography, "Sneaky: [[/skill ste]]{Hide}");
        assert_eq!(
            migrated.actors[0].items[0].description,
            "[[/item Dagger of Venom]]{Attack!} then [[/save con]]"
        );
        assert_eq!(migrated.items[0].description, "[[/check wis]]");
        let ghoul = migrated.scenes[0].tokens[0].actor.as_ref().unwrap();
        assert_eq!(ghoul.biography, "[[/save con]]");

        let second = migrations(&store).migrate_world().await.unwrap();
        assert_eq!(second.documents_updated, 0);
        assert_eq!(second.embedded_items_updated, 0);
        assert_eq!(store.snapshot().await, migrated);
    }

    #[tokio::test]
    async fn test_pack_migration_updates_embedded_items() {
        let store = Arc::new(JsonWorldStore::from_snapshot(world()));

        let report = migrations(&store)
            .migrate_pack(&"world.monsters".into())
            .await
            .unwrap();
        assert_eq!(report.embedded_items_updated, 1);
        assert_eq!(report.documents_updated, 0);

        let snapshot = store.snapshot().await;
        let Document::Actor(ogre) = &snapshot.packs[0].documents[0] else {
            panic!("Expected actor document");
        };
        assert_eq!(ogre.items[0].description, "[[/skill ath]]{Smash}");
    }

    #[tokio::test]
    async fn test_user_character_and_pack_index() {
        let store = JsonWorldStore::from_snapshot(world());

        let character = store.default_character().await.unwrap().unwrap();
        assert_eq!(character.name, "Aria");

        let pack = store.get_pack(&"world.monsters".into()).await.unwrap().unwrap();
        assert_eq!(pack.index, vec![DocumentId::new("p1")]);
        assert!(store.get_pack(&"world.none".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_world_untouched() {
        let store = JsonWorldStore::from_snapshot(world());
        let mut batch = UpdateBatch::new();
        batch.push(
            "i2".into(),
            DocumentUpdate::Item(ItemUpdate {
                id: "i2".into(),
                description: "new".to_string(),
            }),
        );
        batch.push(
            "gone".into(),
            DocumentUpdate::Item(ItemUpdate {
                id: "gone".into(),
                description: "x".to_string(),
            }),
        );

        let result = store
            .update_documents(&CollectionScope::world(DocumentType::Item), batch)
            .await;

        assert!(result.is_err());
        assert_eq!(store.snapshot().await, world());
    }

    #[tokio::test]
    async fn test_failed_embedded_update_leaves_actor_untouched() {
        let store = JsonWorldStore::from_snapshot(world());
        let updates = vec![
            ItemUpdate {
                id: "i1".into(),
                description: "new".to_string(),
            },
            ItemUpdate {
                id: "missing".into(),
                description: "x".to_string(),
            },
        ];

        let result = store
            .update_embedded_items(&CollectionScope::world(DocumentType::Actor), &"a1".into(), updates)
            .await;

        assert!(result.is_err());
        assert_eq!(store.snapshot().await, world());
    }

    #[tokio::test]
    async fn test_update_for_unknown_document_fails() {
        let store = JsonWorldStore::from_snapshot(world());
        let mut batch = UpdateBatch::new();
        batch.push(
            "nope".into(),
            DocumentUpdate::Item(ItemUpdate {
                id: "nope".into(),
                description: String::new(),
            }),
        );

        let result = store
            .update_documents(&CollectionScope::world(DocumentType::Item), batch)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_and_persist_round_trip() {
        let path = std::env::temp_dir().join(format!("inline-roll-world-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, serde_json::to_string(&world()).unwrap())
            .await
            .unwrap();

        let store = Arc::new(JsonWorldStore::open(&path, true).await.unwrap());
        migrations(&store).migrate_world().await.unwrap();

        let reopened = JsonWorldStore::open(&path, false).await.unwrap();
        assert_eq!(
            reopened.snapshot().await.items[0].description,
            "[[/check wis]]"
        );
        tokio::fs::remove_file(&path).await.unwrap();
    }
}
