//! Host documents walked by the migration
//!
//! Only the fields that can hold authored markers are modelled: actor
//! biographies and item descriptions, plus the containment needed to reach
//! them (embedded items, scene tokens and their synthetic actors).

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{DocumentId, PackId};

/// An item, either top-level or embedded in an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: DocumentId,
    pub name: String,
    /// Image path
    #[serde(default)]
    pub img: Option<String>,
    /// Rich text description
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<DocumentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            img: None,
            description: String::new(),
        }
    }

    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An actor with its embedded items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: DocumentId,
    pub name: String,
    /// Rich text biography
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Actor {
    pub fn new(id: impl Into<DocumentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            biography: String::new(),
            items: Vec::new(),
        }
    }

    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = biography.into();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// First embedded item whose name matches exactly
    pub fn item_named(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }
}

/// A token placed on a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: DocumentId,
    pub name: String,
    /// Linked tokens share the world actor; unlinked ones own a synthetic copy
    #[serde(default)]
    pub actor_link: bool,
    #[serde(default)]
    pub actor: Option<Actor>,
}

impl Token {
    /// The token's own synthetic actor, if it is unlinked and has one
    pub fn synthetic_actor(&self) -> Option<&Actor> {
        if self.actor_link {
            None
        } else {
            self.actor.as_ref()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

/// Document type tag of a collection or compendium pack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Actor,
    Item,
    Scene,
    JournalEntry,
    RollTable,
    Macro,
    Other(String),
}

impl DocumentType {
    /// Whether documents of this type can hold markers the migration rewrites
    pub fn is_migratable(&self) -> bool {
        matches!(self, Self::Actor | Self::Item | Self::Scene)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Actor => "Actor",
            Self::Item => "Item",
            Self::Scene => "Scene",
            Self::JournalEntry => "JournalEntry",
            Self::RollTable => "RollTable",
            Self::Macro => "Macro",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for DocumentType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Actor" => Self::Actor,
            "Item" => Self::Item,
            "Scene" => Self::Scene,
            "JournalEntry" => Self::JournalEntry,
            "RollTable" => Self::RollTable,
            "Macro" => Self::Macro,
            _ => Self::Other(name),
        }
    }
}

impl From<DocumentType> for String {
    fn from(document_type: DocumentType) -> Self {
        document_type.as_str().to_string()
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document loaded from a compendium pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    Actor(Actor),
    Item(Item),
    Scene(Scene),
}

impl Document {
    pub fn id(&self) -> &DocumentId {
        match self {
            Self::Actor(actor) => &actor.id,
            Self::Item(item) => &item.id,
            Self::Scene(scene) => &scene.id,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::Actor(_) => DocumentType::Actor,
            Self::Item(_) => DocumentType::Item,
            Self::Scene(_) => DocumentType::Scene,
        }
    }
}

/// Compendium pack metadata and index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompendiumPack {
    pub id: PackId,
    pub label: String,
    pub document_type: DocumentType,
    pub locked: bool,
    /// Identifiers of every document in the pack, in index order
    pub index: Vec<DocumentId>,
}
