//! Token selection - Who rolls when an inline roll element is clicked

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::outbound::RollTargetsPort;
use crate::domain::entities::{Actor, RollTarget};
use crate::domain::value_objects::DocumentId;

/// Controlled tokens on the viewed scene, falling back to the user's character
///
/// Built from the client's selection at click time.
#[derive(Debug, Clone, Default)]
pub struct TokenSelection {
    scene: Option<DocumentId>,
    controlled: Vec<RollTarget>,
    character: Option<RollTarget>,
}

impl TokenSelection {
    pub fn new(scene: Option<DocumentId>, controlled: Vec<RollTarget>) -> Self {
        Self {
            scene,
            controlled,
            character: None,
        }
    }

    /// Roll as this character when no token is controlled
    pub fn with_character(mut self, character: Option<&Actor>) -> Self {
        self.character = character.map(|actor| RollTarget {
            token_id: actor.id.clone(),
            actor_id: Some(actor.id.clone()),
            name: actor.name.clone(),
        });
        self
    }
}

#[async_trait]
impl RollTargetsPort for TokenSelection {
    async fn current_scene(&self) -> Option<DocumentId> {
        self.scene.clone()
    }

    async fn roll_targets(&self) -> Result<Vec<RollTarget>> {
        if self.controlled.is_empty() {
            return Ok(self.character.iter().cloned().collect());
        }
        Ok(self.controlled.clone())
    }
}
