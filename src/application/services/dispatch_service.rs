//! Dispatch Service - Runs the roll behind a clicked inline roll element
//!
//! Rolls are made one target at a time, each awaited before the next starts,
//! so chat messages appear in target order.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::inbound::{
    ActivationDispatcher, ActivationHandler, DispatchOutcome,
};
use crate::application::ports::outbound::{RollActionPort, RollTargetsPort};
use crate::domain::entities::{
    ActionDescriptor, ActivationEvent, RollOptions, RollTarget, Speaker, INLINE_ROLL_CLASS,
};
use crate::domain::errors::AttributeError;
use crate::domain::value_objects::{CommandKind, RollCommand};

/// A per-target roll
#[derive(Debug, Clone, Copy)]
enum TargetRoll<'a> {
    Skill(&'a str),
    AbilityCheck(&'a str),
    Save(&'a str),
}

impl<'a> TargetRoll<'a> {
    /// `None` for commands that are not rolled per target
    fn from_command(command: &'a RollCommand) -> Option<Self> {
        match command {
            RollCommand::Skill { skill_id } => Some(Self::Skill(skill_id)),
            RollCommand::AbilityCheck { ability_id } => Some(Self::AbilityCheck(ability_id)),
            RollCommand::Save { ability_id } => Some(Self::Save(ability_id)),
            RollCommand::Item { .. } => None,
        }
    }
}

/// Routes element activations to the host's roll actions
pub struct DispatchService {
    targets: Arc<dyn RollTargetsPort>,
    rolls: Arc<dyn RollActionPort>,
}

impl DispatchService {
    pub fn new(targets: Arc<dyn RollTargetsPort>, rolls: Arc<dyn RollActionPort>) -> Self {
        Self { targets, rolls }
    }

    async fn roll_for_target(
        &self,
        roll: TargetRoll<'_>,
        target: &RollTarget,
        options: RollOptions,
    ) -> Result<()> {
        match roll {
            TargetRoll::Skill(skill_id) => self.rolls.roll_skill(target, skill_id, options).await,
            TargetRoll::AbilityCheck(ability_id) => {
                self.rolls.roll_ability_check(target, ability_id, options).await
            }
            TargetRoll::Save(ability_id) => {
                self.rolls.roll_ability_save(target, ability_id, options).await
            }
        }
    }
}

#[async_trait]
impl ActivationHandler for DispatchService {
    #[instrument(skip_all)]
    async fn activate(&self, event: &mut ActivationEvent) -> Result<DispatchOutcome> {
        event.prevent_default();

        let descriptor = match ActionDescriptor::from_attributes(&event.attributes) {
            Ok(descriptor) => descriptor,
            Err(AttributeError::UnknownKind(kind)) => {
                debug!(kind, "Ignoring element with unknown command kind");
                return Ok(DispatchOutcome::ignored());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context("Failed to read roll command from element"))
            }
        };
        let kind = descriptor.kind();

        let Some(roll) = TargetRoll::from_command(&descriptor.command) else {
            let item_name = descriptor.command.argument();
            debug!(item_name, "Using item");
            self.rolls
                .use_item(item_name)
                .await
                .with_context(|| format!("Failed to use item {item_name}"))?;
            return Ok(DispatchOutcome {
                kind: Some(CommandKind::Item),
                invocations: 1,
            });
        };

        let targets = self
            .targets
            .roll_targets()
            .await
            .context("Failed to resolve roll targets")?;
        let scene = self.targets.current_scene().await;
        let roll_mode = descriptor.mode.explicit();
        let flavor = descriptor.flavor.clone().unwrap_or_default();

        let mut invocations = 0;
        for target in &targets {
            let options = RollOptions {
                flavor: flavor.clone(),
                roll_mode,
                speaker: Speaker::for_target(scene.clone(), target),
                modifiers: event.modifiers,
            };
            debug!(token_id = %target.token_id, ?roll_mode, "Rolling {} for {}", kind, target.name);
            self.roll_for_target(roll, target, options)
                .await
                .with_context(|| format!("Failed to roll {kind} for {}", target.name))?;
            invocations += 1;
        }

        info!(%kind, invocations, "Dispatched inline roll");
        Ok(DispatchOutcome {
            kind: Some(kind),
            invocations,
        })
    }
}

/// Register the dispatch service as the click handler for inline roll elements
pub fn register_activation_handler(
    dispatcher: &mut dyn ActivationDispatcher,
    service: Arc<DispatchService>,
) {
    dispatcher.register_activation_handler(INLINE_ROLL_CLASS, service);
}
