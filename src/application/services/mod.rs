//! Application services - Use case implementations
//!
//! Each service accepts its host collaborators as port trait objects, so the
//! same services run against the real host or the test doubles.

pub mod descriptor_builder;
pub mod dispatch_service;
pub mod inline_roll_enricher;
pub mod migration_service;

pub use descriptor_builder::DescriptorBuilder;
pub use dispatch_service::{register_activation_handler, DispatchService};
pub use inline_roll_enricher::{register_grammars, InlineRollEnricher};
pub use migration_service::{
    MigrationError, MigrationFailure, MigrationReport, MigrationService, MigrationState,
    MigrationTarget, PackSkipReason, DEFAULT_CHUNK_SIZE,
};
