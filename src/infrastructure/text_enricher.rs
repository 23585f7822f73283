//! Text enricher - The rich text pipeline that enrichers register with
//!
//! Registered patterns run in registration order. Every match is handed to its
//! handler and replaced with the rendered element; a handler error leaves the
//! matched text as written.

use std::sync::Arc;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::application::ports::inbound::{EnrichmentContext, EnrichmentPipeline, MarkerHandler};

struct Enricher {
    pattern: Regex,
    handler: Arc<dyn MarkerHandler>,
}

#[derive(Default)]
pub struct TextEnricher {
    enrichers: Vec<Enricher>,
}

impl TextEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.enrichers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrichers.is_empty()
    }

    /// Replace every registered marker in `text` with its rendered element
    pub async fn enrich(&self, text: &str, context: &EnrichmentContext) -> String {
        let mut text = text.to_string();
        for enricher in &self.enrichers {
            text = enricher.apply(&text, context).await;
        }
        text
    }
}

impl Enricher {
    async fn apply(&self, text: &str, context: &EnrichmentContext) -> String {
        let matches: Vec<Captures<'_>> = self.pattern.captures_iter(text).collect();
        if matches.is_empty() {
            return text.to_string();
        }

        let mut enriched = String::with_capacity(text.len());
        let mut last = 0;
        for captures in &matches {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            enriched.push_str(&text[last..whole.start()]);
            match self.handler.enrich(captures, context).await {
                Ok(element) => enriched.push_str(&element.to_html()),
                Err(e) => {
                    warn!(marker = whole.as_str(), "Leaving marker unenriched: {}", e);
                    enriched.push_str(whole.as_str());
                }
            }
            last = whole.end();
        }
        enriched.push_str(&text[last..]);

        debug!(pattern = self.pattern.as_str(), count = matches.len(), "Enriched markers");
        enriched
    }
}

impl EnrichmentPipeline for TextEnricher {
    fn register_enricher(&mut self, pattern: Regex, handler: Arc<dyn MarkerHandler>) {
        debug!(pattern = pattern.as_str(), "Registered enricher");
        self.enrichers.push(Enricher { pattern, handler });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::services::descriptor_builder::tests::builder_with_user;
    use crate::application::services::register_grammars;
    use crate::domain::entities::{Actor, Item, InlineRollElement};
    use crate::domain::errors::MarkerError;

    fn pipeline(character: Option<Actor>) -> TextEnricher {
        let mut enricher = TextEnricher::new();
        register_grammars(&mut enricher, Arc::new(builder_with_user(character)));
        enricher
    }

    #[tokio::test]
    async fn test_all_four_grammars_are_registered() {
        assert_eq!(pipeline(None).len(), 4);
    }

    #[tokio::test]
    async fn test_markers_are_replaced_in_place() {
        let html = pipeline(None)
            .enrich(
                "Roll [[/rSkill ath]]{Climb} or [[/gmrSave dex]] now.",
                &EnrichmentContext::default(),
            )
            .await;

        assert!(html.starts_with("Roll <a class=\"inline-roll-cmd roll\""));
        assert!(html.contains("data-skill-id=\"ath\""));
        assert!(html.contains(">Climb</a>"));
        assert!(html.contains("data-mode=\"gmroll\""));
        assert!(html.contains("data-func=\"save\""));
        assert!(html.ends_with("</a> now."));
        assert!(!html.contains("[[/"));
    }

    #[tokio::test]
    async fn test_item_marker_uses_relative_actor_image() {
        let actor = Actor::new("a1", "Aria").with_item(Item::new("i1", "Rope").with_img("icons/rope.webp"));

        let html = pipeline(None)
            .enrich("[[/rollItem Rope]]", &EnrichmentContext::relative_to(actor))
            .await;

        assert!(html.contains("data-item-name=\"Rope\""));
        assert!(html.contains("<img class=\"item-image\" src=\"icons/rope.webp\">"));
    }

    #[tokio::test]
    async fn test_unknown_alias_leaves_text() {
        let text = "Try [[/xSkill ath]] instead.";
        let html = pipeline(None).enrich(text, &EnrichmentContext::default()).await;
        assert_eq!(html, text);
    }

    struct Failing;

    #[async_trait]
    impl MarkerHandler for Failing {
        async fn enrich(
            &self,
            _captures: &Captures<'_>,
            _context: &EnrichmentContext,
        ) -> Result<InlineRollElement, MarkerError> {
            Err(MarkerError::UnknownRollMode("q".to_string()))
        }
    }

    #[tokio::test]
    async fn test_handler_error_keeps_matched_text() {
        let mut enricher = TextEnricher::new();
        enricher.register_enricher(Regex::new(r"\{\{\w+\}\}").unwrap(), Arc::new(Failing));

        let text = "a {{b}} c {{d}}";
        assert_eq!(enricher.enrich(text, &EnrichmentContext::default()).await, text);
    }
}
