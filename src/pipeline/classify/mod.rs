//! Lead classification — remote model with a deterministic local fallback.
//!
//! The adapter asks a chat-completions service to judge {type, quality,
//! flags} for a lead; any transport, timeout, or parse failure is absorbed
//! and answered by fixed rules instead. `classify` is therefore infallible
//! by contract, which is what lets the orchestrator treat classification
//! errors as non-events.

pub mod fallback;
pub mod prompt;
pub mod remote;

use std::future::Future;

use super::types::{Classification, ContactBundle};

pub use fallback::{classify_rules, RuleBasedClassifier};
pub use remote::RemoteClassifier;

/// The seam between row processing and the classification transport.
///
/// Implementations must not fail: a remote-backed classifier falls back to
/// rules, a rule-based one is total to begin with.
pub trait Classifier: Send + Sync {
    fn classify(
        &self,
        url: &str,
        text: &str,
        bundle: &ContactBundle,
    ) -> impl Future<Output = Classification> + Send;
}
