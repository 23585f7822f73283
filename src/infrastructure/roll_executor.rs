//! Roll executor - Records roll requests and reports them through tracing
//!
//! Dice are not rolled here; each request is logged and kept so the caller can
//! hand it to whatever performs the roll.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::application::ports::outbound::RollActionPort;
use crate::domain::entities::{RollOptions, RollTarget};

/// Host action a request was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollAction {
    Skill,
    AbilityCheck,
    AbilitySave,
    UseItem,
}

/// One roll or item request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub action: RollAction,
    /// Skill or ability id, or the item name
    pub argument: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<RollTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RollOptions>,
}

#[derive(Debug, Default)]
pub struct RecordingRollExecutor {
    requests: RwLock<Vec<RollRequest>>,
}

impl RecordingRollExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn requests(&self) -> Vec<RollRequest> {
        self.requests.read().await.clone()
    }

    async fn record(
        &self,
        action: RollAction,
        argument: &str,
        target: Option<&RollTarget>,
        options: Option<RollOptions>,
    ) {
        info!(
            ?action,
            argument,
            target = target.map(|t| t.name.as_str()),
            roll_mode = options.as_ref().and_then(|o| o.roll_mode).map(|m| m.as_str()),
            "Roll requested"
        );
        self.requests.write().await.push(RollRequest {
            action,
            argument: argument.to_string(),
            target: target.cloned(),
            options,
        });
    }
}

#[async_trait]
impl RollActionPort for RecordingRollExecutor {
    async fn roll_skill(&self, target: &RollTarget, skill_id: &str, options: RollOptions) -> Result<()> {
        self.record(RollAction::Skill, skill_id, Some(target), Some(options))
            .await;
        Ok(())
    }

    async fn roll_ability_check(
        &self,
        target: &RollTarget,
        ability_id: &str,
        options: RollOptions,
    ) -> Result<()> {
        self.record(RollAction::AbilityCheck, ability_id, Some(target), Some(options))
            .await;
        Ok(())
    }

    async fn roll_ability_save(
        &self,
        target: &RollTarget,
        ability_id: &str,
        options: RollOptions,
    ) -> Result<()> {
        self.record(RollAction::AbilitySave, ability_id, Some(target), Some(options))
            .await;
        Ok(())
    }

    async fn use_item(&self, item_name: &str) -> Result<()> {
        self.record(RollAction::UseItem, item_name, None, None).await;
        Ok(())
    }
}
