//! Click dispatch API routes
//!
//! Each request carries the clicked element and the client's token selection.
//! Targets and recorded rolls live for the duration of the request only.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::inbound::DispatchOutcome;
use crate::application::ports::outbound::UserCharacterPort;
use crate::application::services::{register_activation_handler, DispatchService};
use crate::domain::entities::{ActivationEvent, ClickModifiers, ElementAttributes, RollTarget};
use crate::domain::value_objects::DocumentId;
use crate::infrastructure::click_router::ClickRouter;
use crate::infrastructure::roll_executor::{RecordingRollExecutor, RollRequest};
use crate::infrastructure::selection::TokenSelection;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub classes: Vec<String>,
    pub attributes: ElementAttributes,
    #[serde(default)]
    pub scene_id: Option<DocumentId>,
    /// Controlled tokens; the user's character rolls when empty
    #[serde(default)]
    pub targets: Vec<RollTarget>,
    #[serde(default)]
    pub modifiers: ClickModifiers,
}

#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// Whether a handler was registered for the element's classes
    pub routed: bool,
    pub default_prevented: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DispatchOutcome>,
    pub rolls: Vec<RollRequest>,
}

/// Activate a rendered inline roll element
pub async fn dispatch_click(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, (StatusCode, String)> {
    let character = state
        .store
        .default_character()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let selection = TokenSelection::new(req.scene_id, req.targets).with_character(character.as_ref());
    let rolls = Arc::new(RecordingRollExecutor::new());

    let mut router = ClickRouter::new();
    register_activation_handler(
        &mut router,
        Arc::new(DispatchService::new(Arc::new(selection), rolls.clone())),
    );

    let mut event = ActivationEvent::new(req.classes, req.attributes, req.modifiers);
    let outcome = router
        .dispatch(&mut event)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;

    Ok(Json(DispatchResponse {
        routed: outcome.is_some(),
        default_prevented: event.default_prevented(),
        outcome,
        rolls: rolls.requests().await,
    }))
}
