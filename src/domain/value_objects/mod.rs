//! Value objects - Immutable objects defined by their attributes

mod ids;
mod roll_command;
mod roll_mode;

pub use ids::*;
pub use roll_command::{CommandKind, RollCommand};
pub use roll_mode::RollMode;
