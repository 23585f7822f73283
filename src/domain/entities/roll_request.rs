//! Click activation and the per-target roll request it turns into

use serde::{Deserialize, Serialize};

use crate::domain::entities::ElementAttributes;
use crate::domain::value_objects::{DocumentId, RollMode};

/// A token selected to roll, with the actor it speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTarget {
    pub token_id: DocumentId,
    #[serde(default)]
    pub actor_id: Option<DocumentId>,
    pub name: String,
}

/// Chat speaker identity for a roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub scene: Option<DocumentId>,
    pub token: DocumentId,
    pub actor: Option<DocumentId>,
    pub alias: String,
}

impl Speaker {
    /// Speaker for a target token on the current scene
    pub fn for_target(scene: Option<DocumentId>, target: &RollTarget) -> Self {
        Self {
            scene,
            token: target.token_id.clone(),
            actor: target.actor_id.clone(),
            alias: target.name.clone(),
        }
    }
}

/// Modifier keys held during the click; the host uses them to fast-forward rolls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickModifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
}

/// Options passed along with every roll action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    pub flavor: String,
    /// `None` leaves the visibility to the user's chat setting
    pub roll_mode: Option<RollMode>,
    pub speaker: Speaker,
    pub modifiers: ClickModifiers,
}

/// Activation of a rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    pub classes: Vec<String>,
    pub attributes: ElementAttributes,
    pub modifiers: ClickModifiers,
    default_prevented: bool,
}

impl ActivationEvent {
    pub fn new(classes: Vec<String>, attributes: ElementAttributes, modifiers: ClickModifiers) -> Self {
        Self {
            classes,
            attributes,
            modifiers,
            default_prevented: false,
        }
    }

    /// Suppress the anchor's navigation
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
