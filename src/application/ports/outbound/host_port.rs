//! Host configuration, localization, user and notification ports

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::Actor;

/// The game system's registry of skills and abilities
pub trait RulesRegistryPort: Send + Sync {
    /// Display label for a skill id, e.g. `ath` -> "Athletics"
    fn skill_label(&self, skill_id: &str) -> Option<String>;

    /// Display label for an ability id, e.g. `dex` -> "Dexterity"
    fn ability_label(&self, ability_id: &str) -> Option<String>;
}

/// The host's localization subsystem
pub trait LocalizationPort: Send + Sync {
    /// Format a localized template, substituting `{name}` placeholders
    fn format(&self, key: &str, data: &[(&str, &str)]) -> String;
}

/// The acting user
#[async_trait]
pub trait UserCharacterPort: Send + Sync {
    /// The character assigned to the user, if any
    async fn default_character(&self) -> Result<Option<Actor>>;
}

/// The host's notification toasts
pub trait NotificationPort: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);
}
