//! Domain entities

mod action_descriptor;
mod document_update;
mod documents;
mod inline_roll_element;
mod roll_request;

pub use action_descriptor::{ActionDescriptor, FLAVOR_ATTRIBUTE, FUNC_ATTRIBUTE, MODE_ATTRIBUTE};
pub use document_update::{
    ActorUpdate, BatchEntry, DocumentUpdate, ItemUpdate, SceneUpdate, TokenUpdate, UpdateBatch,
};
pub use documents::{Actor, CompendiumPack, Document, DocumentType, Item, Scene, Token};
pub use inline_roll_element::{ElementAttributes, ElementIcon, InlineRollElement, INLINE_ROLL_CLASS};
pub use roll_request::{
    ActivationEvent, ClickModifiers, RollOptions, RollTarget, Speaker,
};
