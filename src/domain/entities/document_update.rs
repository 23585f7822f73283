//! Partial document updates produced by the migration

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DocumentId;

/// New description for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub id: DocumentId,
    pub description: String,
}

/// Changed fields of an actor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    /// Embedded item changes carried inside this update (synthetic actors only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemUpdate>,
}

impl ActorUpdate {
    pub fn is_empty(&self) -> bool {
        self.biography.is_none() && self.items.is_empty()
    }
}

/// Synthetic actor changes for one unlinked token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
    pub id: DocumentId,
    pub actor: ActorUpdate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneUpdate {
    pub tokens: Vec<TokenUpdate>,
}

/// Partial update for one top-level document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentUpdate {
    Actor(ActorUpdate),
    Item(ItemUpdate),
    Scene(SceneUpdate),
}

/// One entry of an update batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub id: DocumentId,
    pub update: DocumentUpdate,
}

/// Updates keyed by document, in the order the documents were visited
///
/// Only documents with at least one changed field are ever pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
    entries: Vec<BatchEntry>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the update for `id`
    pub fn push(&mut self, id: DocumentId, update: DocumentUpdate) {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.update = update,
            None => self.entries.push(BatchEntry { id, update }),
        }
    }

    pub fn get(&self, id: &DocumentId) -> Option<&DocumentUpdate> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| &entry.update)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_keeps_one_entry_per_document() {
        let mut batch = UpdateBatch::new();
        batch.push(
            "a1".into(),
            DocumentUpdate::Actor(ActorUpdate {
                biography: Some("old".to_string()),
                items: vec![],
            }),
        );
        batch.push(
            "a1".into(),
            DocumentUpdate::Actor(ActorUpdate {
                biography: Some("new".to_string()),
                items: vec![],
            }),
        );

        assert_eq!(batch.len(), 1);
        assert!(matches!(
            batch.get(&"a1".into()),
            Some(DocumentUpdate::Actor(ActorUpdate { biography: Some(b), .. })) if b == "new"
        ));
    }

    #[test]
    fn test_empty_actor_update_serializes_without_fields() {
        let update = ActorUpdate::default();
        assert!(update.is_empty());
        let json = serde_json::to_string(&update).expect("serialization should succeed");
        assert_eq!(json, "{}");
    }
}
