//! Pipeline error types.
//!
//! Two tiers: `ClassifyError` stays inside the classification adapter and is
//! always recovered by the rule-based fallback; `EnrichError` is the per-row
//! failure recorded into the run's error list. A run itself cannot fail — it
//! either completes or is cancelled.

use thiserror::Error;

/// Remote classification transport failures. Internal to the adapter;
/// `Classifier::classify` never surfaces these to its caller.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("cannot reach classification service at {0}")]
    Connection(String),

    #[error("classification request timed out after {0}s")]
    Timeout(u64),

    #[error("classification service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("malformed classification response: {0}")]
    MalformedResponse(String),
}

/// Per-row pipeline failure. The offending row contributes no `LeadResult`;
/// the run records the error and continues.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("row is missing a non-empty `url` field")]
    MissingUrl,

    #[error("row processing failed: {0}")]
    Processing(String),
}
