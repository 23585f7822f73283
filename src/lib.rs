//! Inline roll commands for tabletop documents
//!
//! Authored text may carry markers such as `[[/rSkill ath]]{Climb the wall}`.
//! The enrichers turn each marker into a roll button, a click on the button
//! rolls for every selected token, and the migration service rewrites stored
//! documents to the host's native `[[/skill ath]]` syntax.

pub mod application;
pub mod domain;
pub mod infrastructure;
