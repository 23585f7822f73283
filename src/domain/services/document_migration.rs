//! Computes migration updates for host documents
//!
//! These functions only read documents; persisting the updates and the order
//! in which that happens is the migration service's job.

use crate::domain::entities::{
    Actor, ActorUpdate, Item, ItemUpdate, Scene, SceneUpdate, TokenUpdate,
};
use crate::domain::services::syntax_migration::migrate_text;

/// Update for an item whose description contains old markers
pub fn migrate_item(item: &Item) -> Option<ItemUpdate> {
    migrate_text(&item.description).map(|description| ItemUpdate {
        id: item.id.clone(),
        description,
    })
}

/// Updates for the actor's embedded items, in item order
pub fn migrate_embedded_items(actor: &Actor) -> Vec<ItemUpdate> {
    actor.items.iter().filter_map(migrate_item).collect()
}

/// The actor's own field changes, without embedded items
pub fn migrate_actor_fields(actor: &Actor) -> Option<ActorUpdate> {
    migrate_text(&actor.biography).map(|biography| ActorUpdate {
        biography: Some(biography),
        items: Vec::new(),
    })
}

/// Field changes with embedded item changes nested inside, for actors that can
/// only be written as a whole (a token's synthetic actor)
pub fn migrate_synthetic_actor(actor: &Actor) -> Option<ActorUpdate> {
    let update = ActorUpdate {
        biography: migrate_text(&actor.biography),
        items: migrate_embedded_items(actor),
    };
    (!update.is_empty()).then_some(update)
}

/// Updates for the synthetic actors of the scene's unlinked tokens
pub fn migrate_scene(scene: &Scene) -> Option<SceneUpdate> {
    let tokens: Vec<TokenUpdate> = scene
        .tokens
        .iter()
        .filter_map(|token| {
            let actor = token.synthetic_actor()?;
            migrate_synthetic_actor(actor).map(|update| TokenUpdate {
                id: token.id.clone(),
                actor: update,
            })
        })
        .collect();

    (!tokens.is_empty()).then_some(SceneUpdate { tokens })
}
