//! Migration API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::services::{MigrationError, MigrationReport};
use crate::domain::value_objects::PackId;
use crate::infrastructure::state::AppState;

/// Rewrite every world actor, item and scene token to the native syntax
pub async fn migrate_world(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MigrationReport>, (StatusCode, String)> {
    let report = state
        .migrations
        .migrate_world()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    Ok(Json(report))
}

/// Rewrite the documents of one compendium pack
pub async fn migrate_pack(
    State(state): State<Arc<AppState>>,
    Path(pack_id): Path<String>,
) -> Result<Json<MigrationReport>, (StatusCode, String)> {
    let report = state
        .migrations
        .migrate_pack(&PackId::new(pack_id))
        .await
        .map_err(|e| match e.downcast_ref::<MigrationError>() {
            Some(MigrationError::PackNotFound(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
        })?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::infrastructure::http::test_support::{app, post_json};

    #[tokio::test]
    async fn test_world_migration_report() {
        let (app, store) = app();
        let (status, body) = post_json(app, "/api/migrations/world", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], json!("complete"));
        assert_eq!(body["documents_updated"], json!(2));
        assert_eq!(body["failures"], json!([]));

        let world = store.snapshot().await;
        assert_eq!(world.actors[0].biography, "[[/skill ste]]{Hide}");
        assert_eq!(world.items[0].description, "[[/check wis]]");
    }

    #[tokio::test]
    async fn test_locked_pack_is_skipped() {
        let (app, store) = app();
        let (status, body) = post_json(app, "/api/migrations/packs/world.spells", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skipped"], json!({ "reason": "locked" }));
        assert_eq!(body["chunks_processed"], json!(0));
        assert_eq!(
            store.snapshot().await.packs[0].documents,
            crate::infrastructure::http::test_support::world().packs[0].documents
        );
    }

    #[tokio::test]
    async fn test_missing_pack_is_not_found() {
        let (app, _) = app();
        let (status, _) = post_json(app, "/api/migrations/packs/world.none", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
