//! Inline roll enrichers - Marker handlers registered with the host's text pipeline

use std::sync::Arc;

use async_trait::async_trait;
use regex::Captures;
use tracing::debug;

use crate::application::ports::inbound::{EnrichmentContext, EnrichmentPipeline, MarkerHandler};
use crate::application::services::descriptor_builder::DescriptorBuilder;
use crate::domain::entities::InlineRollElement;
use crate::domain::errors::MarkerError;
use crate::domain::services::{materialize, MarkerFamily, MarkerMatch};

/// Handler for one marker family
pub struct InlineRollEnricher {
    family: MarkerFamily,
    builder: Arc<DescriptorBuilder>,
}

impl InlineRollEnricher {
    pub fn new(family: MarkerFamily, builder: Arc<DescriptorBuilder>) -> Self {
        Self { family, builder }
    }
}

#[async_trait]
impl MarkerHandler for InlineRollEnricher {
    async fn enrich(
        &self,
        captures: &Captures<'_>,
        context: &EnrichmentContext,
    ) -> Result<InlineRollElement, MarkerError> {
        let marker = MarkerMatch::from_captures(self.family, captures)?;
        debug!(family = %self.family, ?marker, "Enriching inline roll marker");

        let descriptor = self.builder.build(&marker, context).await?;
        Ok(materialize(&descriptor))
    }
}

/// Register the four marker grammars, in family order, with the host pipeline
pub fn register_grammars(pipeline: &mut dyn EnrichmentPipeline, builder: Arc<DescriptorBuilder>) {
    for family in MarkerFamily::ALL {
        pipeline.register_enricher(
            family.pattern().clone(),
            Arc::new(InlineRollEnricher::new(family, builder.clone())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    use crate::application::services::descriptor_builder::tests::builder_with_user;
    use crate::domain::entities::{ElementIcon, FLAVOR_ATTRIBUTE, INLINE_ROLL_CLASS};

    #[derive(Default)]
    struct RecordingPipeline {
        enrichers: Vec<(Regex, Arc<dyn MarkerHandler>)>,
    }

    impl EnrichmentPipeline for RecordingPipeline {
        fn register_enricher(&mut self, pattern: Regex, handler: Arc<dyn MarkerHandler>) {
            self.enrichers.push((pattern, handler));
        }
    }

    #[test]
    fn test_registers_one_enricher_per_family() {
        let mut pipeline = RecordingPipeline::default();
        register_grammars(&mut pipeline, Arc::new(builder_with_user(None)));

        let patterns: Vec<&str> = pipeline.enrichers.iter().map(|(p, _)| p.as_str()).collect();
        let expected: Vec<&str> = MarkerFamily::ALL.iter().map(|f| f.pattern().as_str()).collect();
        assert_eq!(patterns, expected);
    }

    #[tokio::test]
    async fn test_registered_handler_renders_button() {
        let mut pipeline = RecordingPipeline::default();
        register_grammars(&mut pipeline, Arc::new(builder_with_user(None)));

        let (pattern, handler) = &pipeline.enrichers[2];
        let text = "[[/gmrollSave dex]]{Dodge the boulder}";
        let captures = pattern.captures(text).expect("save pattern should match");

        let element = handler
            .enrich(&captures, &EnrichmentContext::default())
            .await
            .unwrap();

        assert_eq!(element.classes, vec![INLINE_ROLL_CLASS, "gmroll"]);
        assert_eq!(element.icon, ElementIcon::Dice);
        assert_eq!(element.label, "Dodge the boulder");
        assert_eq!(element.attributes.get("data-func"), Some("save"));
        assert_eq!(element.attributes.get(FLAVOR_ATTRIBUTE), Some("Dodge the boulder"));
    }

    #[tokio::test]
    async fn test_item_without_image_renders_text_button() {
        let enricher = InlineRollEnricher::new(MarkerFamily::Item, Arc::new(builder_with_user(None)));
        let captures = MarkerFamily::Item
            .pattern()
            .captures("[[/rollItem Bag of Holding]]")
            .expect("item pattern should match");

        let element = enricher
            .enrich(&captures, &EnrichmentContext::default())
            .await
            .unwrap();

        assert_eq!(element.icon, ElementIcon::Dice);
        assert_eq!(element.label, "Bag of Holding");
        assert_eq!(element.attributes.get("data-item-name"), Some("Bag of Holding"));
    }
}
