//! Turns an action descriptor into a clickable roll element

use crate::domain::entities::{ActionDescriptor, ElementIcon, InlineRollElement, INLINE_ROLL_CLASS};

/// Build the element for `descriptor`
///
/// The element carries the marker class plus a class named after the roll
/// mode, every dispatchable field as a `data-*` attribute, and either the item
/// image or the dice glyph in front of the label.
pub fn materialize(descriptor: &ActionDescriptor) -> InlineRollElement {
    let icon = match &descriptor.image {
        Some(src) => ElementIcon::Image(src.clone()),
        None => ElementIcon::Dice,
    };

    InlineRollElement {
        classes: vec![
            INLINE_ROLL_CLASS.to_string(),
            descriptor.mode.as_str().to_string(),
        ],
        attributes: descriptor.to_attributes(),
        icon,
        label: descriptor.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FLAVOR_ATTRIBUTE, FUNC_ATTRIBUTE, MODE_ATTRIBUTE};
    use crate::domain::value_objects::{RollCommand, RollMode};

    #[test]
    fn test_skill_button_uses_title_without_flavor() {
        let descriptor = ActionDescriptor::new(
            RollMode::BlindRoll,
            RollCommand::Skill {
                skill_id: "ste".to_string(),
            },
            "Stealth Skill Check",
        );

        let element = materialize(&descriptor);
        assert_eq!(element.classes, vec!["inline-roll-cmd", "blindroll"]);
        assert_eq!(element.icon, ElementIcon::Dice);
        assert_eq!(element.label, "Stealth Skill Check");
        assert_eq!(element.attributes.get(MODE_ATTRIBUTE), Some("blindroll"));
        assert_eq!(element.attributes.get(FUNC_ATTRIBUTE), Some("skill"));
        assert_eq!(element.attributes.get("data-skill-id"), Some("ste"));
        assert_eq!(element.attributes.get(FLAVOR_ATTRIBUTE), Some(""));
    }

    #[test]
    fn test_flavor_replaces_title() {
        let descriptor = ActionDescriptor::new(
            RollMode::Roll,
            RollCommand::AbilityCheck {
                ability_id: "str".to_string(),
            },
            "Strength Ability Check",
        )
        .with_flavor(Some("Force the door".to_string()));

        let element = materialize(&descriptor);
        assert_eq!(element.label, "Force the door");
        assert_eq!(element.attributes.get(FLAVOR_ATTRIBUTE), Some("Force the door"));
        assert_eq!(element.attributes.get("data-ability-id"), Some("str"));
    }

    #[test]
    fn test_item_button_shows_image() {
        let descriptor = ActionDescriptor::new(
            RollMode::Roll,
            RollCommand::Item {
                item_name: "Dagger".to_string(),
            },
            "Dagger",
        )
        .with_image(Some("icons/weapons/dagger.webp".to_string()));

        let element = materialize(&descriptor);
        assert_eq!(
            element.icon,
            ElementIcon::Image("icons/weapons/dagger.webp".to_string())
        );
        assert_eq!(element.attributes.get("data-item-name"), Some("Dagger"));
        assert_eq!(element.attributes.get(FLAVOR_ATTRIBUTE), Some(""));
    }

    #[test]
    fn test_element_decodes_back_to_same_command() {
        let descriptor = ActionDescriptor::new(
            RollMode::SelfRoll,
            RollCommand::Save {
                ability_id: "wis".to_string(),
            },
            "Wisdom Saving Throw",
        );

        let element = materialize(&descriptor);
        let decoded = ActionDescriptor::from_attributes(&element.attributes)
            .expect("element attributes should decode");
        assert_eq!(decoded.command, descriptor.command);
        assert_eq!(decoded.mode, RollMode::SelfRoll);
    }
}
