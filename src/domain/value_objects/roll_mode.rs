//! Roll visibility modes and the alias table used by the marker grammar

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::MarkerError;

/// Canonical roll visibility mode
///
/// The serialized values match the host's dice roll mode constants, which is
/// also what rendered elements store in their `data-mode` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    /// Defer to the user's chat roll mode setting
    Roll,
    PublicRoll,
    GmRoll,
    BlindRoll,
    SelfRoll,
}

impl RollMode {
    pub const ALL: [RollMode; 5] = [
        RollMode::Roll,
        RollMode::PublicRoll,
        RollMode::GmRoll,
        RollMode::BlindRoll,
        RollMode::SelfRoll,
    ];

    /// Normalize a marker alias token (case-insensitive) to its canonical mode
    pub fn from_alias(alias: &str) -> Result<Self, MarkerError> {
        match alias.to_ascii_lowercase().as_str() {
            "r" | "roll" => Ok(Self::Roll),
            "pr" | "publicroll" => Ok(Self::PublicRoll),
            "gmr" | "gmroll" => Ok(Self::GmRoll),
            "br" | "broll" | "blindroll" => Ok(Self::BlindRoll),
            "sr" | "selfroll" => Ok(Self::SelfRoll),
            _ => Err(MarkerError::UnknownRollMode(alias.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::PublicRoll => "publicroll",
            Self::GmRoll => "gmroll",
            Self::BlindRoll => "blindroll",
            Self::SelfRoll => "selfroll",
        }
    }

    /// The mode to pass to a roll action; `None` leaves the choice to the user's setting
    pub fn explicit(self) -> Option<RollMode> {
        match self {
            Self::Roll => None,
            other => Some(other),
        }
    }
}

impl std::fmt::Display for RollMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses canonical values only; aliases go through [`RollMode::from_alias`]
impl FromStr for RollMode {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| MarkerError::UnknownRollMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves() {
        let table = [
            ("r", RollMode::Roll),
            ("roll", RollMode::Roll),
            ("pr", RollMode::PublicRoll),
            ("publicroll", RollMode::PublicRoll),
            ("gmr", RollMode::GmRoll),
            ("gmroll", RollMode::GmRoll),
            ("br", RollMode::BlindRoll),
            ("broll", RollMode::BlindRoll),
            ("blindroll", RollMode::BlindRoll),
            ("sr", RollMode::SelfRoll),
            ("selfroll", RollMode::SelfRoll),
        ];

        for (alias, expected) in table {
            assert_eq!(RollMode::from_alias(alias), Ok(expected), "alias {alias}");
        }
    }

    #[test]
    fn test_alias_is_case_insensitive() {
        assert_eq!(RollMode::from_alias("GMRoll"), Ok(RollMode::GmRoll));
        assert_eq!(RollMode::from_alias("BR"), Ok(RollMode::BlindRoll));
    }

    #[test]
    fn test_unknown_alias_is_rejected() {
        for alias in ["", "x", "rolls", "gm", "public", "blind"] {
            assert_eq!(
                RollMode::from_alias(alias),
                Err(MarkerError::UnknownRollMode(alias.to_string()))
            );
        }
    }

    #[test]
    fn test_only_roll_defers_to_user_setting() {
        assert_eq!(RollMode::Roll.explicit(), None);
        assert_eq!(RollMode::GmRoll.explicit(), Some(RollMode::GmRoll));
        assert_eq!(RollMode::SelfRoll.explicit(), Some(RollMode::SelfRoll));
    }

    #[test]
    fn test_canonical_parse_rejects_short_aliases() {
        assert_eq!("blindroll".parse::<RollMode>(), Ok(RollMode::BlindRoll));
        assert!("br".parse::<RollMode>().is_err());
    }

    #[test]
    fn test_serializes_as_host_constant() {
        let json = serde_json::to_string(&RollMode::PublicRoll).expect("serialization should succeed");
        assert_eq!(json, "\"publicroll\"");
    }
}
