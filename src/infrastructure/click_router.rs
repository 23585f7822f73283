//! Click router - Delegated click listener for rendered elements

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::inbound::{ActivationDispatcher, ActivationHandler, DispatchOutcome};
use crate::domain::entities::ActivationEvent;

/// Sends each activation to the first handler registered for one of its classes
#[derive(Default)]
pub struct ClickRouter {
    routes: Vec<(String, Arc<dyn ActivationHandler>)>,
}

impl ClickRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when no handler is registered for the element's classes
    pub async fn dispatch(&self, event: &mut ActivationEvent) -> Result<Option<DispatchOutcome>> {
        let Some((class, handler)) = self.routes.iter().find(|(class, _)| event.has_class(class)) else {
            debug!(classes = ?event.classes, "No activation handler for element");
            return Ok(None);
        };
        debug!(class, "Routing activation");
        handler.activate(event).await.map(Some)
    }
}

impl ActivationDispatcher for ClickRouter {
    fn register_activation_handler(&mut self, class: &str, handler: Arc<dyn ActivationHandler>) {
        self.routes.push((class.to_string(), handler));
    }
}
