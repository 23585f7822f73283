//! Rewrites old inline roll markers to the host's native marker syntax
//!
//! | old                              | native                  |
//! |----------------------------------|-------------------------|
//! | `[[/<alias>Skill ath]]{Climb}`   | `[[/skill ath]]{Climb}` |
//! | `[[/<alias>Ability str]]`        | `[[/check str]]`        |
//! | `[[/<alias>Save dex]]`           | `[[/save dex]]`         |
//! | `[[/rollItem Dagger]]{Stab}`     | `[[/item Dagger]]{Stab}`|
//!
//! The roll mode alias has no native equivalent and is dropped. Native markers
//! never match the old patterns, so rewriting is idempotent.

use regex::Captures;

use crate::domain::services::marker_grammar::MarkerFamily;

/// Rewrite every old marker in `text`
///
/// Families are rewritten in the fixed order skill, ability, save, item, each
/// across the whole text. Returns `None` when nothing was rewritten, which is
/// distinct from returning text that happens to be unchanged.
pub fn migrate_text(text: &str) -> Option<String> {
    let mut migrated: Option<String> = None;

    for family in MarkerFamily::ALL {
        let current = migrated.as_deref().unwrap_or(text);
        let pattern = family.pattern();
        if !pattern.is_match(current) {
            continue;
        }
        let rewritten = pattern
            .replace_all(current, |captures: &Captures<'_>| native_marker(family, captures))
            .into_owned();
        migrated = Some(rewritten);
    }

    migrated
}

fn native_marker(family: MarkerFamily, captures: &Captures<'_>) -> String {
    let identifier = captures.get(2).map_or("", |m| m.as_str());
    let mut marker = format!("[[/{} {}]]", family.native_command(), identifier);
    if let Some(flavor) = captures.get(3) {
        marker.push('{');
        marker.push_str(flavor.as_str());
        marker.push('}');
    }
    marker
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::marker_grammar::scan_family;

    #[test]
    fn test_save_maps_to_native_save() {
        let migrated = migrate_text("You gain [[/rollSkill ath]]{Athletics Check} and [[/gmrollSave dex]]");
        assert_eq!(
            migrated.as_deref(),
            Some("You gain [[/skill ath]]{Athletics Check} and [[/save dex]]")
        );
    }

    #[test]
    fn test_item_name_keeps_spaces() {
        assert_eq!(
            migrate_text("[[/rollItem Dagger of Venom]]{Attack!}").as_deref(),
            Some("[[/item Dagger of Venom]]{Attack!}")
        );
    }

    #[test]
    fn test_ability_maps_to_check() {
        assert_eq!(
            migrate_text("<p>[[/prAbility str]]</p>").as_deref(),
            Some("<p>[[/check str]]</p>")
        );
    }

    #[test]
    fn test_text_without_markers_is_unchanged() {
        assert_eq!(migrate_text("Just a biography."), None);
        assert_eq!(migrate_text(""), None);
    }

    #[test]
    fn test_non_ascii_lookalikes_are_not_rewritten() {
        assert_eq!(migrate_text("[[/roll\u{17F}kill ath]]"), None);
        assert_eq!(migrate_text("[[/rollSave \u{212A}ey]]"), None);
    }

    #[test]
    fn test_native_syntax_is_unchanged() {
        assert_eq!(
            migrate_text("[[/skill ath]]{Climb} [[/check str]] [[/save dex]] [[/item Rope]]"),
            None
        );
    }

    #[test]
    fn test_second_run_is_unchanged() {
        let original = "[[/brSkill ste]]{Sneak} [[/srAbility int]] [[/gmrSave wis]]{Resist} [[/rollItem Potion of Healing]]";
        let first = migrate_text(original).expect("old markers should be rewritten");
        assert_eq!(
            first,
            "[[/skill ste]]{Sneak} [[/check int]] [[/save wis]]{Resist} [[/item Potion of Healing]]"
        );
        assert_eq!(migrate_text(&first), None);
    }

    #[test]
    fn test_family_order_matches_per_family_replacement() {
        let text = "[[/rollItem Rope]] [[/rSave con]] [[/rollAbility dex]]{Quick} [[/rSkill prc]] [[/rSave str]]";

        // replace each family's occurrences one marker at a time, family by family
        let mut expected = text.to_string();
        for family in MarkerFamily::ALL {
            while let Some(marker) = scan_family(family, &expected).into_iter().next() {
                let mut replacement = format!("[[/{} {}]]", family.native_command(), marker.identifier);
                if let Some(flavor) = &marker.flavor {
                    replacement.push_str(&format!("{{{flavor}}}"));
                }
                expected.replace_range(marker.start..marker.end, &replacement);
            }
        }

        assert_eq!(migrate_text(text), Some(expected));
    }

    #[test]
    fn test_alias_and_case_are_dropped_from_command() {
        assert_eq!(
            migrate_text("[[/BLINDROLLSKILL Ath]]").as_deref(),
            Some("[[/skill Ath]]")
        );
    }
}
