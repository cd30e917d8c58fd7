//! Leadqual — lead enrichment pipeline.
//!
//! Ingests tabular lead rows, extracts structured contact information from
//! free text, scores extraction confidence, classifies each lead via a remote
//! model (with a deterministic rule-based fallback), and drives the whole row
//! set under bounded concurrency with cooperative cancellation.
//!
//! The surrounding application concerns — UI, file dialogs, the CSV codec,
//! persisted configuration — live outside this crate. Callers hand in a
//! `Vec<Row>` and a `RunConfig` and receive `LeadResult`s plus progress
//! events.

pub mod config;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the pipeline.
///
/// Respects `RUST_LOG` when set; falls back to the crate default filter.
/// Safe to call more than once — later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
