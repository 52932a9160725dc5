//! Outcome reporting for [`super::examples_from_path`].
//!
//! One call reports exactly once: a success with the number of examples built, or a failure
//! with a severity (and an alert when that severity reaches the configured threshold).

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ExampleError;

use super::unified::IngestionFormat;

/// How bad a failed example-building run was, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Not currently produced by ingestion; available to custom observers.
    Info,
    /// Not currently produced by ingestion; available to custom observers.
    Warning,
    /// A record could not be turned into an example (bad shape, missing key, parse failure).
    Error,
    /// The input could not be read at all, or tree support is missing from this build.
    Critical,
}

/// Which file was being turned into examples, and how.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Source file.
    pub path: PathBuf,
    /// Record format, given or inferred from the extension.
    pub format: IngestionFormat,
}

/// Reported when every record became an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of examples built.
    pub examples: usize,
}

/// Receives the outcome of each [`super::examples_from_path`] call.
pub trait IngestionObserver: Send + Sync {
    /// All records were built into examples.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Building stopped at the first failing record; no examples are returned.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &ExampleError) {}

    /// A failure at or above [`super::IngestionOptions::alert_at_or_above`]. Called after
    /// [`Self::on_failure`]; the default forwards to it again.
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ExampleError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Sends every outcome to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ExampleError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ExampleError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits outcomes as `tracing` events: `info` on success, `warn` on failure, `error` on alert.
#[derive(Debug, Default)]
pub struct LogObserver;

impl IngestionObserver for LogObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            format = ?ctx.format,
            path = %ctx.path.display(),
            examples = stats.examples,
            "ingest ok"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ExampleError) {
        tracing::warn!(
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "ingest failed"
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &ExampleError) {
        tracing::error!(
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "ingest alert"
        );
    }
}
