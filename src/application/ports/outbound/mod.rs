//! Outbound ports - Interfaces that the application requires from the host

mod document_store_port;
mod host_port;
mod roll_port;

pub use document_store_port::{CollectionScope, CompendiumPort, DocumentStorePort};
pub use host_port::{LocalizationPort, NotificationPort, RulesRegistryPort, UserCharacterPort};
pub use roll_port::{RollActionPort, RollTargetsPort};
