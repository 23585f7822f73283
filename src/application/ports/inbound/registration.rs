//! Registration contracts for the host's text enrichment pipeline and click dispatch
//!
//! Grammars and the click handler are registered once at startup by passing
//! the host's pipeline and dispatcher in; nothing is kept in global state.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActivationEvent, Actor, InlineRollElement};
use crate::domain::errors::MarkerError;
use crate::domain::value_objects::CommandKind;

/// Options of one enrichment call
#[derive(Debug, Clone, Default)]
pub struct EnrichmentContext {
    /// Actor owning the text being enriched, if any
    pub relative_actor: Option<Actor>,
}

impl EnrichmentContext {
    pub fn relative_to(actor: Actor) -> Self {
        Self {
            relative_actor: Some(actor),
        }
    }
}

/// Turns one pattern match into an element
#[async_trait]
pub trait MarkerHandler: Send + Sync {
    async fn enrich(
        &self,
        captures: &Captures<'_>,
        context: &EnrichmentContext,
    ) -> Result<InlineRollElement, MarkerError>;
}

/// The host's rich text pipeline; calls each handler once per match of its pattern
pub trait EnrichmentPipeline {
    fn register_enricher(&mut self, pattern: Regex, handler: Arc<dyn MarkerHandler>);
}

/// What an activation did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Kind dispatched, `None` when the element named no known kind
    pub kind: Option<CommandKind>,
    /// Number of roll or item actions invoked
    pub invocations: usize,
}

impl DispatchOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }
}

/// Handles a click on an element carrying the registered class
#[async_trait]
pub trait ActivationHandler: Send + Sync {
    async fn activate(&self, event: &mut ActivationEvent) -> Result<DispatchOutcome>;
}

/// The host's delegated click listener
pub trait ActivationDispatcher {
    fn register_activation_handler(&mut self, class: &str, handler: Arc<dyn ActivationHandler>);
}
