//! Descriptor Builder - Resolves a marker match into a displayable action descriptor
//!
//! Labels come from the game system's registry and titles from the host's
//! localization. Unknown skill or ability ids fall back to the raw id, and an
//! item without a resolvable image simply gets the dice glyph.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::ports::inbound::EnrichmentContext;
use crate::application::ports::outbound::{LocalizationPort, RulesRegistryPort, UserCharacterPort};
use crate::domain::entities::ActionDescriptor;
use crate::domain::errors::MarkerError;
use crate::domain::services::{MarkerFamily, MarkerMatch};
use crate::domain::value_objects::{CommandKind, RollMode};

pub const SKILL_PROMPT_TITLE: &str = "DND5E.SkillPromptTitle";
pub const ABILITY_PROMPT_TITLE: &str = "DND5E.AbilityPromptTitle";
pub const SAVE_PROMPT_TITLE: &str = "DND5E.SavePromptTitle";

/// Builds descriptors for matched markers
pub struct DescriptorBuilder {
    rules: Arc<dyn RulesRegistryPort>,
    localization: Arc<dyn LocalizationPort>,
    user: Arc<dyn UserCharacterPort>,
}

impl DescriptorBuilder {
    pub fn new(
        rules: Arc<dyn RulesRegistryPort>,
        localization: Arc<dyn LocalizationPort>,
        user: Arc<dyn UserCharacterPort>,
    ) -> Self {
        Self {
            rules,
            localization,
            user,
        }
    }

    /// Build the descriptor for one marker
    ///
    /// Fails only when the alias is not a known roll mode.
    #[instrument(skip(self, context), fields(family = %marker.family, identifier = %marker.identifier))]
    pub async fn build(
        &self,
        marker: &MarkerMatch,
        context: &EnrichmentContext,
    ) -> Result<ActionDescriptor, MarkerError> {
        let mode = RollMode::from_alias(&marker.alias)?;
        let kind = marker.family.command_kind();
        let command = kind.with_argument(marker.identifier.as_str());
        debug!(%mode, %kind, "Resolved marker");

        let descriptor = match marker.family {
            MarkerFamily::Skill => {
                let skill = self
                    .rules
                    .skill_label(&marker.identifier)
                    .unwrap_or_else(|| marker.identifier.clone());
                let title = self.localization.format(SKILL_PROMPT_TITLE, &[("skill", skill.as_str())]);
                ActionDescriptor::new(mode, command, title)
            }
            MarkerFamily::Ability | MarkerFamily::Save => {
                let ability = self
                    .rules
                    .ability_label(&marker.identifier)
                    .unwrap_or_else(|| marker.identifier.clone());
                let key = if kind == CommandKind::Save {
                    SAVE_PROMPT_TITLE
                } else {
                    ABILITY_PROMPT_TITLE
                };
                let title = self.localization.format(key, &[("ability", ability.as_str())]);
                ActionDescriptor::new(mode, command, title)
            }
            MarkerFamily::Item => {
                let image = self.resolve_item_icon(context, &marker.identifier).await;
                debug!(?image, "Resolved item image");
                ActionDescriptor::new(mode, command, marker.identifier.as_str()).with_image(image)
            }
        };

        Ok(descriptor.with_flavor(marker.flavor.clone()))
    }

    /// Image of the item named `item_name`
    ///
    /// Looks on the actor the text belongs to when there is one, otherwise on
    /// the user's assigned character.
    pub async fn resolve_item_icon(
        &self,
        context: &EnrichmentContext,
        item_name: &str,
    ) -> Option<String> {
        if let Some(actor) = &context.relative_actor {
            return actor.item_named(item_name).and_then(|item| item.img.clone());
        }

        match self.user.default_character().await {
            Ok(Some(character)) => character
                .item_named(item_name)
                .and_then(|item| item.img.clone()),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not load the user's character for item image lookup");
                None
            }
        }
    }
}
