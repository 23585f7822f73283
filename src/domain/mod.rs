//! Domain layer - Marker grammar, descriptors and syntax migration with no host dependencies
//!
//! This layer contains:
//! - Value Objects: roll modes, roll commands, identifiers
//! - Entities: action descriptors, rendered roll elements, host documents and their updates
//! - Domain Services: marker scanning, button materialization, text and document migration
//! - Errors: marker and element attribute failures

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
