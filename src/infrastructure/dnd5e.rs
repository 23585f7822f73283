//! D&D 5th Edition registry and English prompt titles
//!
//! Stands in for the game system's skill and ability configuration and the
//! host's English translation file.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::application::ports::outbound::{LocalizationPort, RulesRegistryPort};

/// Skill ids and their labels
const SKILLS: [(&str, &str); 18] = [
    ("acr", "Acrobatics"),
    ("ani", "Animal Handling"),
    ("arc", "Arcana"),
    ("ath", "Athletics"),
    ("dec", "Deception"),
    ("his", "History"),
    ("ins", "Insight"),
    ("itm", "Intimidation"),
    ("inv", "Investigation"),
    ("med", "Medicine"),
    ("nat", "Nature"),
    ("prc", "Perception"),
    ("prf", "Performance"),
    ("per", "Persuasion"),
    ("rel", "Religion"),
    ("slt", "Sleight of Hand"),
    ("ste", "Stealth"),
    ("sur", "Survival"),
];

/// Ability ids and their labels
const ABILITIES: [(&str, &str); 6] = [
    ("str", "Strength"),
    ("dex", "Dexterity"),
    ("con", "Constitution"),
    ("int", "Intelligence"),
    ("wis", "Wisdom"),
    ("cha", "Charisma"),
];

const TRANSLATIONS: [(&str, &str); 3] = [
    ("DND5E.SkillPromptTitle", "{skill} Skill Check"),
    ("DND5E.AbilityPromptTitle", "{ability} Ability Check"),
    ("DND5E.SavePromptTitle", "{ability} Saving Throw"),
];

/// `{name}` placeholder in a translation
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// D&D 5e labels and English titles
pub struct Dnd5eSystem {
    skills: HashMap<&'static str, &'static str>,
    abilities: HashMap<&'static str, &'static str>,
    translations: HashMap<&'static str, &'static str>,
}

impl Default for Dnd5eSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Dnd5eSystem {
    pub fn new() -> Self {
        Self {
            skills: SKILLS.into_iter().collect(),
            abilities: ABILITIES.into_iter().collect(),
            translations: TRANSLATIONS.into_iter().collect(),
        }
    }
}

impl RulesRegistryPort for Dnd5eSystem {
    fn skill_label(&self, skill_id: &str) -> Option<String> {
        self.skills.get(skill_id).map(|label| label.to_string())
    }

    fn ability_label(&self, ability_id: &str) -> Option<String> {
        self.abilities.get(ability_id).map(|label| label.to_string())
    }
}

impl LocalizationPort for Dnd5eSystem {
    /// Unknown keys render as the key itself, like the host does
    fn format(&self, key: &str, data: &[(&str, &str)]) -> String {
        let template = self.translations.get(key).copied().unwrap_or(key);
        PLACEHOLDER
            .replace_all(template, |captures: &Captures<'_>| {
                data.iter()
                    .find(|(name, _)| *name == &captures[1])
                    .map_or_else(|| captures[0].to_string(), |(_, value)| value.to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let system = Dnd5eSystem::new();
        assert_eq!(system.skill_label("slt").as_deref(), Some("Sleight of Hand"));
        assert_eq!(system.ability_label("cha").as_deref(), Some("Charisma"));
        assert_eq!(system.skill_label("str"), None);
        assert_eq!(system.ability_label("ath"), None);
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        let system = Dnd5eSystem::new();
        assert_eq!(
            system.format("DND5E.SavePromptTitle", &[("ability", "Wisdom")]),
            "Wisdom Saving Throw"
        );
        assert_eq!(system.format("DND5E.Missing", &[("x", "y")]), "DND5E.Missing");
    }

    #[test]
    fn test_substituted_values_are_not_expanded_again() {
        let system = Dnd5eSystem::new();
        assert_eq!(
            system.format("DND5E.SkillPromptTitle", &[("skill", "{ability}"), ("ability", "Wisdom")]),
            "{ability} Skill Check"
        );
        assert_eq!(
            system.format("DND5E.SavePromptTitle", &[("skill", "Stealth")]),
            "{ability} Saving Throw"
        );
    }
}
