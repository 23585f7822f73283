//! Roll ports - Target resolution and the host's roll actions

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{RollOptions, RollTarget};
use crate::domain::value_objects::DocumentId;

/// Resolves who rolls when a button is clicked
#[async_trait]
pub trait RollTargetsPort: Send + Sync {
    /// Scene currently viewed, used for the chat speaker
    async fn current_scene(&self) -> Option<DocumentId>;

    /// Controlled tokens, or the user's character when none are controlled
    async fn roll_targets(&self) -> Result<Vec<RollTarget>>;
}

/// The host's roll actions
#[async_trait]
pub trait RollActionPort: Send + Sync {
    async fn roll_skill(&self, target: &RollTarget, skill_id: &str, options: RollOptions) -> Result<()>;

    async fn roll_ability_check(
        &self,
        target: &RollTarget,
        ability_id: &str,
        options: RollOptions,
    ) -> Result<()>;

    async fn roll_ability_save(
        &self,
        target: &RollTarget,
        ability_id: &str,
        options: RollOptions,
    ) -> Result<()>;

    /// Activate an item by name on the user's speaker, as the item macro does
    async fn use_item(&self, item_name: &str) -> Result<()>;
}
