//! Inbound ports - Interfaces the host uses to drive this crate

mod registration;

pub use registration::{
    ActivationDispatcher, ActivationHandler, DispatchOutcome, EnrichmentContext,
    EnrichmentPipeline, MarkerHandler,
};
