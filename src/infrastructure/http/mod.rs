//! HTTP REST API routes

mod dispatch_routes;
mod enrich_routes;
mod migration_routes;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use dispatch_routes::*;
pub use enrich_routes::*;
pub use migration_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Enrichment routes
        .route("/api/enrich", post(enrich_routes::enrich_text))
        .route("/api/convert", post(enrich_routes::convert_text))
        // Click dispatch
        .route("/api/dispatch", post(dispatch_routes::dispatch_click))
        // Migration routes
        .route("/api/migrations/world", post(migration_routes::migrate_world))
        .route(
            "/api/migrations/packs/{pack_id}",
            post(migration_routes::migrate_pack),
        )
}
