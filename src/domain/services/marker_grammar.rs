//! Marker grammar - recognizes inline roll command markers in authored text
//!
//! # Marker Formats
//!
//! - `[[/<alias>Skill <id>]]` - skill check, e.g. `[[/gmrSkill ath]]`
//! - `[[/<alias>Ability <id>]]` - ability check, e.g. `[[/rollAbility str]]`
//! - `[[/<alias>Save <id>]]` - saving throw, e.g. `[[/brSave dex]]`
//! - `[[/rollItem <name>]]` - item use, e.g. `[[/rollItem Dagger of Venom]]`
//!
//! Any marker may be followed immediately by `{flavor text}`. Matching is
//! ASCII case-insensitive. Skill and ability ids are ASCII word characters; item
//! names are anything up to the closing bracket.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::errors::MarkerError;
use crate::domain::value_objects::CommandKind;

/// Alternation of every roll mode alias, longest forms listed after their prefixes
const MODE_ALIASES: &str = "r|roll|pr|publicroll|gmr|gmroll|br|broll|blindroll|sr|selfroll";

static SKILL_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern("Skill"));
static ABILITY_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern("Ability"));
static SAVE_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_pattern("Save"));
static ITEM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[/((?i-u:roll))(?i-u:Item) ([^\]]+)\]\](?:\{([^}]+)\})?").expect("item marker pattern is valid")
});

fn keyword_pattern(keyword: &str) -> Regex {
    let pattern = format!(
        r"\[\[/((?i-u:{MODE_ALIASES}))(?i-u:{keyword}) ((?i-u:[A-Za-z0-9_]+))\]\](?:\{{([^}}]+)\}})?"
    );
    Regex::new(&pattern).expect("keyword marker pattern is valid")
}

/// One of the four marker families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerFamily {
    Skill,
    Ability,
    Save,
    Item,
}

impl MarkerFamily {
    /// Registration and rewrite order
    pub const ALL: [MarkerFamily; 4] = [
        MarkerFamily::Skill,
        MarkerFamily::Ability,
        MarkerFamily::Save,
        MarkerFamily::Item,
    ];

    pub fn pattern(&self) -> &'static Regex {
        match self {
            Self::Skill => &SKILL_PATTERN,
            Self::Ability => &ABILITY_PATTERN,
            Self::Save => &SAVE_PATTERN,
            Self::Item => &ITEM_PATTERN,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::Ability => "Ability",
            Self::Save => "Save",
            Self::Item => "Item",
        }
    }

    pub fn command_kind(&self) -> CommandKind {
        match self {
            Self::Skill => CommandKind::Skill,
            Self::Ability => CommandKind::AbilityCheck,
            Self::Save => CommandKind::Save,
            Self::Item => CommandKind::Item,
        }
    }

    /// Command name of the host's native marker for this family
    pub fn native_command(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Ability => "check",
            Self::Save => "save",
            Self::Item => "item",
        }
    }
}

impl std::fmt::Display for MarkerFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A located marker occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerMatch {
    pub family: MarkerFamily,
    /// Roll mode alias as written, e.g. `gmr`
    pub alias: String,
    /// Skill id, ability id or item name
    pub identifier: String,
    pub flavor: Option<String>,
    /// Byte offset of the opening `[[`
    pub start: usize,
    /// Byte offset just past the marker, including any flavor braces
    pub end: usize,
}

impl MarkerMatch {
    /// Read a match from the captures of `family`'s pattern
    pub fn from_captures(family: MarkerFamily, captures: &Captures<'_>) -> Result<Self, MarkerError> {
        let whole = captures.get(0).ok_or(MarkerError::MissingCapture("marker"))?;
        let alias = captures.get(1).ok_or(MarkerError::MissingCapture("alias"))?;
        let identifier = captures
            .get(2)
            .ok_or(MarkerError::MissingCapture("identifier"))?;

        Ok(Self {
            family,
            alias: alias.as_str().to_string(),
            identifier: identifier.as_str().to_string(),
            flavor: captures.get(3).map(|m| m.as_str().to_string()),
            start: whole.start(),
            end: whole.end(),
        })
    }

    pub fn overlaps(&self, other: &MarkerMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// All non-overlapping occurrences of one family, in text order
pub fn scan_family(family: MarkerFamily, text: &str) -> Vec<MarkerMatch> {
    family
        .pattern()
        .captures_iter(text)
        .filter_map(|captures| MarkerMatch::from_captures(family, &captures).ok())
        .collect()
}

/// All markers of every family, in text order
///
/// When markers of different families overlap, the one starting first wins;
/// on equal starts the earlier family in [`MarkerFamily::ALL`] wins.
pub fn scan(text: &str) -> Vec<MarkerMatch> {
    let mut found: Vec<MarkerMatch> = MarkerFamily::ALL
        .iter()
        .flat_map(|family| scan_family(*family, text))
        .collect();
    // stable sort keeps family order for equal starts
    found.sort_by_key(|m| m.start);

    let mut accepted: Vec<MarkerMatch> = Vec::with_capacity(found.len());
    for marker in found {
        if accepted.last().is_some_and(|last| last.overlaps(&marker)) {
            continue;
        }
        accepted.push(marker);
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_family_with_and_without_flavor() {
        let cases = [
            (MarkerFamily::Skill, "[[/rollSkill ath]]", "ath"),
            (MarkerFamily::Ability, "[[/gmrAbility str]]", "str"),
            (MarkerFamily::Save, "[[/brSave dex]]", "dex"),
            (MarkerFamily::Item, "[[/rollItem Dagger of Venom]]", "Dagger of Venom"),
        ];

        for (family, marker, identifier) in cases {
            let plain = scan_family(family, marker);
            assert_eq!(plain.len(), 1, "{marker}");
            assert_eq!(plain[0].identifier, identifier);
            assert_eq!(plain[0].flavor, None);

            let flavored = format!("{marker}{{Do it now}}");
            let with_flavor = scan_family(family, &flavored);
            assert_eq!(with_flavor.len(), 1, "{flavored}");
            assert_eq!(with_flavor[0].identifier, identifier);
            assert_eq!(with_flavor[0].flavor.as_deref(), Some("Do it now"));
            assert_eq!(with_flavor[0].end, flavored.len());
        }
    }

    #[test]
    fn test_alias_backtracks_to_longest_fitting_form() {
        let found = scan_family(MarkerFamily::Skill, "[[/blindrollSkill ste]]");
        assert_eq!(found[0].alias, "blindroll");

        let found = scan_family(MarkerFamily::Save, "[[/rSave con]]");
        assert_eq!(found[0].alias, "r");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let found = scan_family(MarkerFamily::Ability, "[[/GMROLLABILITY wis]]");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].alias, "GMROLL");

        assert_eq!(scan_family(MarkerFamily::Item, "[[/ROLLITEM Rope]]").len(), 1);
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        // U+017F folds to `s` and U+212A folds to `k` under Unicode rules
        assert!(scan("[[/roll\u{17F}kill ath]]").is_empty());
        assert!(scan("[[/rollSave \u{212A}ey]]").is_empty());
        assert!(scan("[[/rollSkill \u{17F}te]]").is_empty());
        assert!(scan("[[/\u{17F}rSkill ath]]").is_empty());
    }

    #[test]
    fn test_finds_every_occurrence() {
        let text = "[[/rSkill ath]] then [[/prSkill acr]]{Tumble} and [[/srSkill ste]]";
        let found = scan_family(MarkerFamily::Skill, text);
        let ids: Vec<&str> = found.iter().map(|m| m.identifier.as_str()).collect();
        assert_eq!(ids, vec!["ath", "acr", "ste"]);
        assert_eq!(found[1].flavor.as_deref(), Some("Tumble"));
    }

    #[test]
    fn test_rejects_malformed_markers() {
        for text in [
            "[[/rollSkill]]",
            "[[/rollSkill two words]]",
            "[[/xSkill ath]]",
            "[[/rollskillath]]",
            "[/rollSkill ath]",
            "[[/gmrItem Rope]]",
        ] {
            assert!(scan(text).is_empty(), "{text}");
        }
    }

    #[test]
    fn test_empty_flavor_braces_are_not_flavor() {
        let found = scan_family(MarkerFamily::Save, "[[/rollSave dex]]{}");
        assert_eq!(found[0].flavor, None);
        assert_eq!(found[0].end, "[[/rollSave dex]]".len());
    }

    #[test]
    fn test_native_syntax_is_not_a_marker() {
        let text = "[[/skill ath]]{Climb} [[/check str]] [[/save dex]] [[/item Rope]]";
        assert!(scan(text).is_empty());
    }

    #[test]
    fn test_scan_orders_markers_across_families() {
        let text = "[[/rollItem Rope]] [[/gmrSave dex]] [[/rSkill ath]]";
        let families: Vec<MarkerFamily> = scan(text).iter().map(|m| m.family).collect();
        assert_eq!(
            families,
            vec![MarkerFamily::Item, MarkerFamily::Save, MarkerFamily::Skill]
        );
    }

    #[test]
    fn test_overlapping_markers_keep_the_earliest() {
        // the item name swallows the start of a skill marker
        let text = "[[/rollItem [[/rollSkill ath]]";
        let found = scan(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].family, MarkerFamily::Item);
        assert_eq!(found[0].identifier, "[[/rollSkill ath");
    }
}
