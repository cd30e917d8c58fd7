//! Lead enrichment pipeline.
//!
//! Flow for one row: `aggregate` merges pattern-extracted entities with the
//! row's explicit fields into a `ContactBundle`; `confidence_score` reduces
//! the bundle to a deterministic 0-100 score; a `Classifier` judges the
//! lead's nature and quality; `EnrichmentProcessor` assembles the
//! `LeadResult`. `BatchOrchestrator` drives the processor over an input set
//! with bounded concurrency and cooperative cancellation.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod orchestrator;
pub mod patterns;
pub mod processor;
pub mod scoring;
pub mod types;

pub use aggregate::aggregate;
pub use classify::{classify_rules, Classifier, RemoteClassifier, RuleBasedClassifier};
pub use error::{ClassifyError, EnrichError};
pub use orchestrator::{BatchOrchestrator, CancelFlag, ProgressFn};
pub use processor::{EnrichmentProcessor, LeadProcessor};
pub use scoring::confidence_score;
pub use types::{
    Classification, ContactBundle, LeadResult, LeadType, Row, RunEvent, RunOutcome, RunStatus,
    RunSummary,
};
