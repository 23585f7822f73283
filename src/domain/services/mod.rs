//! Domain services - Pure operations over markers and documents

pub mod button_materializer;
pub mod document_migration;
pub mod marker_grammar;
pub mod syntax_migration;

pub use button_materializer::materialize;
pub use marker_grammar::{scan, scan_family, MarkerFamily, MarkerMatch};
pub use syntax_migration::migrate_text;
