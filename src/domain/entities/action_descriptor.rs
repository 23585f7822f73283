//! Action descriptor - everything needed to display and later dispatch one marker

use serde::{Deserialize, Serialize};

use crate::domain::entities::ElementAttributes;
use crate::domain::errors::AttributeError;
use crate::domain::value_objects::{CommandKind, RollCommand, RollMode};

pub const MODE_ATTRIBUTE: &str = "data-mode";
pub const FUNC_ATTRIBUTE: &str = "data-func";
pub const FLAVOR_ATTRIBUTE: &str = "data-flavor";

/// A self-contained description of a deferred roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub mode: RollMode,
    pub command: RollCommand,
    /// User supplied caption, shown instead of the title and passed to the roll
    pub flavor: Option<String>,
    /// Computed display title, e.g. "Athletics Skill Check"
    pub title: String,
    /// Item image, only ever set for item commands
    pub image: Option<String>,
}

impl ActionDescriptor {
    pub fn new(mode: RollMode, command: RollCommand, title: impl Into<String>) -> Self {
        Self {
            mode,
            command,
            flavor: None,
            title: title.into(),
            image: None,
        }
    }

    pub fn with_flavor(mut self, flavor: Option<String>) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }

    /// Text shown on the button: the flavor if present, else the title
    pub fn label(&self) -> &str {
        self.flavor.as_deref().unwrap_or(&self.title)
    }

    /// Serialize the dispatchable part of the descriptor into element attributes
    ///
    /// The flavor attribute is always written, empty when there is no flavor.
    pub fn to_attributes(&self) -> ElementAttributes {
        let kind = self.kind();
        ElementAttributes::new()
            .with(MODE_ATTRIBUTE, self.mode.as_str())
            .with(FUNC_ATTRIBUTE, kind.as_str())
            .with(kind.argument_attribute(), self.command.argument())
            .with(FLAVOR_ATTRIBUTE, self.flavor.clone().unwrap_or_default())
    }

    /// Re-derive a descriptor from element attributes
    ///
    /// Display fields are not stored on the element, so the title falls back to
    /// the flavor or the command argument and the image is left empty.
    pub fn from_attributes(attributes: &ElementAttributes) -> Result<Self, AttributeError> {
        let func = attributes
            .get(FUNC_ATTRIBUTE)
            .ok_or(AttributeError::Missing(FUNC_ATTRIBUTE))?;
        let kind = CommandKind::from_func(func)
            .ok_or_else(|| AttributeError::UnknownKind(func.to_string()))?;

        let mode = attributes
            .get(MODE_ATTRIBUTE)
            .ok_or(AttributeError::Missing(MODE_ATTRIBUTE))?
            .parse::<RollMode>()?;

        let argument = attributes
            .get(kind.argument_attribute())
            .ok_or(AttributeError::Missing(kind.argument_attribute()))?;

        let flavor = attributes
            .get(FLAVOR_ATTRIBUTE)
            .filter(|f| !f.is_empty())
            .map(str::to_string);

        let title = flavor.clone().unwrap_or_else(|| argument.to_string());
        Ok(Self::new(mode, kind.with_argument(argument), title).with_flavor(flavor))
    }
}
