//! Batch orchestration with bounded concurrency and cooperative cancellation.
//!
//! Rows are consumed in fixed-size batches; within a batch at most
//! `max_concurrent` rows are in flight at once. Cancellation is observed at
//! batch boundaries only: rows already admitted run to completion and their
//! results are kept.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures_util::stream::{self, StreamExt};

use super::processor::LeadProcessor;
use super::types::{LeadResult, Row, RunEvent, RunOutcome, RunStatus, RunSummary};
use crate::config::{ProcessingConfig, ScoreThresholds};

/// Shared cancellation handle. Cloned into whatever owns the cancel button;
/// the orchestrator only reads it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent; takes effect at the next batch
    /// boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress sink for a run. Events arrive from the driving task only, in
/// order. The lifetime parameter lets callers pass closures that borrow
/// run-local state.
pub type ProgressFn<'a> = dyn Fn(RunEvent) + Send + Sync + 'a;

/// Drives a `LeadProcessor` over an input set.
pub struct BatchOrchestrator<P> {
    processor: P,
    batch_size: usize,
    max_concurrent: usize,
}

impl<P: LeadProcessor> BatchOrchestrator<P> {
    pub fn new(processor: P, config: &ProcessingConfig) -> Self {
        Self {
            processor,
            batch_size: config.batch_size.max(1),
            max_concurrent: config.max_concurrent.max(1),
        }
    }

    /// Process `rows` to completion or cancellation.
    ///
    /// Results accumulate in completion order. A failed row contributes one
    /// `"{url}: {error}"` entry to the error list and the run continues.
    /// `BatchCompleted` events carry the accumulation so far, so the last one
    /// before a cancellation holds all partial data.
    pub async fn run(
        &self,
        rows: &[Row],
        cancel: &CancelFlag,
        progress: Option<&ProgressFn<'_>>,
    ) -> RunOutcome {
        let started = Instant::now();
        let total = rows.len() as u32;

        tracing::info!(
            total,
            batch_size = self.batch_size,
            max_concurrent = self.max_concurrent,
            "Starting enrichment run"
        );
        emit(progress, RunEvent::Started { total_rows: total });

        let mut results: Vec<LeadResult> = Vec::with_capacity(rows.len());
        let mut errors: Vec<String> = Vec::new();
        let mut processed: u32 = 0;
        let current_url: Mutex<Option<String>> = Mutex::new(None);

        for batch in rows.chunks(self.batch_size) {
            if cancel.is_cancelled() {
                tracing::info!(processed, total, "Run cancelled at batch boundary");
                emit(progress, RunEvent::Cancelled { processed });
                return RunOutcome {
                    status: RunStatus::Cancelled,
                    results,
                    errors,
                    duration_ms: started.elapsed().as_millis() as u64,
                };
            }

            let current = &current_url;
            let batch_outcomes: Vec<(String, Result<LeadResult, _>)> = stream::iter(
                batch.iter().map(|row| async move {
                    if let Ok(mut slot) = current.lock() {
                        *slot = Some(row.url.clone());
                    }
                    (row.url.clone(), self.processor.process(row).await)
                }),
            )
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

            for (url, outcome) in batch_outcomes {
                processed += 1;
                match outcome {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Row failed");
                        errors.push(format!("{url}: {e}"));
                    }
                }
            }

            emit(
                progress,
                RunEvent::BatchCompleted {
                    processed,
                    total,
                    results: results.clone(),
                    errors: errors.clone(),
                    current_url: current_url.lock().ok().and_then(|slot| slot.clone()),
                },
            );
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            processed,
            result_count = results.len(),
            error_count = errors.len(),
            duration_ms,
            "Enrichment run completed"
        );
        emit(
            progress,
            RunEvent::Completed {
                results: results.clone(),
                duration_ms,
            },
        );

        RunOutcome {
            status: RunStatus::Completed,
            results,
            errors,
            duration_ms,
        }
    }
}

fn emit(progress: Option<&ProgressFn<'_>>, event: RunEvent) {
    if let Some(callback) = progress {
        callback(event);
    }
}

impl RunOutcome {
    /// Bucket a finished run's counts against the caller's thresholds.
    /// `total` is the input row count, which exceeds `processed` when the
    /// run was cancelled.
    pub fn summarize(&self, total: u32, thresholds: &ScoreThresholds) -> RunSummary {
        let qualified = self
            .results
            .iter()
            .filter(|r| r.confidence_score >= thresholds.minimum)
            .count() as u32;
        let processed = self.results.len() as u32;
        RunSummary {
            total,
            processed,
            qualified,
            rejected: processed - qualified,
            errors: self.errors.len() as u32,
        }
    }
}
