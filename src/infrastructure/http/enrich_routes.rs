//! Enrichment API routes

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::inbound::EnrichmentContext;
use crate::application::ports::outbound::DocumentStorePort;
use crate::domain::services::{migrate_text, scan, MarkerMatch};
use crate::domain::value_objects::DocumentId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub text: String,
    /// Actor the text belongs to; item images are looked up on it
    #[serde(default)]
    pub relative_actor_id: Option<DocumentId>,
}

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub text: String,
    pub changed: bool,
    /// Old markers found in the submitted text, in text order
    pub markers: Vec<MarkerMatch>,
}

/// Render inline roll markers in text as roll buttons
pub async fn enrich_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrichRequest>,
) -> Result<Json<EnrichResponse>, (StatusCode, String)> {
    let context = match &req.relative_actor_id {
        Some(actor_id) => {
            let actor = state
                .store
                .get_actor(actor_id)
                .await
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
                .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Actor {actor_id} not found")))?;
            EnrichmentContext::relative_to(actor)
        }
        None => EnrichmentContext::default(),
    };

    let html = state.enricher.enrich(&req.text, &context).await;
    Ok(Json(EnrichResponse { html }))
}

/// Rewrite old inline roll markers to the native syntax without storing anything
pub async fn convert_text(Json(req): Json<ConvertRequest>) -> Json<ConvertResponse> {
    let markers = scan(&req.text);
    match migrate_text(&req.text) {
        Some(text) => Json(ConvertResponse {
            text,
            changed: true,
            markers,
        }),
        None => Json(ConvertResponse {
            text: req.text,
            changed: false,
            markers,
        }),
    }
}
