//! Run configuration for the enrichment pipeline.
//!
//! Everything here is an explicit, typed struct — validation happens against
//! named fields, never against string key paths. The caller owns persistence
//! and secret storage; this crate only consumes the assembled config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_NAME: &str = "Leadqual";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "leadqual=info".to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,

    #[error("max_concurrent must be at least 1")]
    ZeroConcurrency,

    #[error("temperature must be within [0, 2], got {0}")]
    TemperatureOutOfRange(f32),

    #[error("score thresholds must satisfy high_value > qualified > minimum, got {high_value}/{qualified}/{minimum}")]
    UnorderedThresholds {
        high_value: u8,
        qualified: u8,
        minimum: u8,
    },

    #[error("score threshold {0} exceeds the 0-100 confidence scale")]
    ThresholdOutOfRange(u8),
}

/// Remote classification service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Bearer token for the chat-completions endpoint. Never logged.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Per-request timeout. The orchestrator enforces no timeout of its own.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

/// Batch/concurrency settings for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Rows per batch; progress is reported at batch boundaries.
    pub batch_size: usize,
    /// Admission window: in-flight row tasks never exceed this.
    pub max_concurrent: usize,
    /// Extra attempts the classification adapter may make on transport
    /// failure before falling back to rules. Not used by the orchestrator.
    pub retry_attempts: u32,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_concurrent: 3,
            retry_attempts: 3,
        }
    }
}

/// Confidence-score buckets for downstream consumers.
///
/// The scorer itself never reads these — they only classify finished
/// `LeadResult.confidence_score` values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub high_value: u8,
    pub qualified: u8,
    pub minimum: u8,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            high_value: 80,
            qualified: 60,
            minimum: 40,
        }
    }
}

/// Bucket assigned to a confidence score by `ScoreThresholds::band`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    HighValue,
    Qualified,
    Minimum,
    Rejected,
}

impl ScoreThresholds {
    pub fn band(&self, score: u8) -> ScoreBand {
        if score >= self.high_value {
            ScoreBand::HighValue
        } else if score >= self.qualified {
            ScoreBand::Qualified
        } else if score >= self.minimum {
            ScoreBand::Minimum
        } else {
            ScoreBand::Rejected
        }
    }
}

/// Complete configuration for one enrichment run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub remote: RemoteConfig,
    pub processing: ProcessingConfig,
    pub thresholds: ScoreThresholds,
}

impl RunConfig {
    /// Validate caller-supplied configuration before a run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.batch_size < 1 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.processing.max_concurrent < 1 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if !(0.0..=2.0).contains(&self.remote.temperature) {
            return Err(ConfigError::TemperatureOutOfRange(self.remote.temperature));
        }
        let t = &self.thresholds;
        for v in [t.high_value, t.qualified, t.minimum] {
            if v > 100 {
                return Err(ConfigError::ThresholdOutOfRange(v));
            }
        }
        if !(t.high_value > t.qualified && t.qualified > t.minimum) {
            return Err(ConfigError::UnorderedThresholds {
                high_value: t.high_value,
                qualified: t.qualified,
                minimum: t.minimum,
            });
        }
        Ok(())
    }
}
