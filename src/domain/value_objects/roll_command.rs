//! Roll commands a marker can request
//!
//! Each variant carries exactly the argument its action needs, so the command
//! kind and its arguments can never disagree.

use serde::{Deserialize, Serialize};

/// The action requested by a marker, with its kind-specific argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "func", rename_all = "camelCase")]
pub enum RollCommand {
    /// Skill check, e.g. `ath`
    Skill {
        #[serde(rename = "skillId")]
        skill_id: String,
    },
    /// Ability check, e.g. `str`
    AbilityCheck {
        #[serde(rename = "abilityId")]
        ability_id: String,
    },
    /// Saving throw, e.g. `dex`
    Save {
        #[serde(rename = "abilityId")]
        ability_id: String,
    },
    /// Activate an owned item by its display name
    Item {
        #[serde(rename = "itemName")]
        item_name: String,
    },
}

impl RollCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Skill { .. } => CommandKind::Skill,
            Self::AbilityCheck { .. } => CommandKind::AbilityCheck,
            Self::Save { .. } => CommandKind::Save,
            Self::Item { .. } => CommandKind::Item,
        }
    }

    /// The skill id, ability id or item name carried by the command
    pub fn argument(&self) -> &str {
        match self {
            Self::Skill { skill_id } => skill_id,
            Self::AbilityCheck { ability_id } | Self::Save { ability_id } => ability_id,
            Self::Item { item_name } => item_name,
        }
    }
}

/// Discriminant of [`RollCommand`], as stored in an element's `data-func` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    Skill,
    AbilityCheck,
    Save,
    Item,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::AbilityCheck => "abilityCheck",
            Self::Save => "save",
            Self::Item => "item",
        }
    }

    /// Name of the attribute holding this kind's argument
    pub fn argument_attribute(&self) -> &'static str {
        match self {
            Self::Skill => "data-skill-id",
            Self::AbilityCheck | Self::Save => "data-ability-id",
            Self::Item => "data-item-name",
        }
    }

    pub fn from_func(func: &str) -> Option<Self> {
        match func {
            "skill" => Some(Self::Skill),
            "abilityCheck" => Some(Self::AbilityCheck),
            "save" => Some(Self::Save),
            "item" => Some(Self::Item),
            _ => None,
        }
    }

    /// Build the command for this kind from its single argument
    pub fn with_argument(self, argument: impl Into<String>) -> RollCommand {
        let argument = argument.into();
        match self {
            Self::Skill => RollCommand::Skill { skill_id: argument },
            Self::AbilityCheck => RollCommand::AbilityCheck { ability_id: argument },
            Self::Save => RollCommand::Save { ability_id: argument },
            Self::Item => RollCommand::Item { item_name: argument },
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
