//! Prometheus metrics for observability and monitoring.
//!
//! The store records its activity through the `metrics` facade. This module
//! installs a Prometheus recorder and renders the exposition format:
//! - Action processing and reducer latency
//! - Effect execution by kind
//! - Effect cancellation (replaced or cancelled timers)
//! - Shutdown outcomes
//!
//! # Example
//!
//! ```rust,no_run
//! use marquee_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut recorder = MetricsRecorder::new();
//! recorder.start()?;
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus metrics recorder.
///
/// Installs the process-wide recorder once and renders on demand.
#[derive(Default)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Create a recorder that is not installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Describe metrics and install the Prometheus recorder.
    ///
    /// A recorder already installed by someone else is not an error; the
    /// recorder then has no handle and [`MetricsRecorder::render`] returns `None`.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    pub fn start(&mut self) -> Result<(), MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                tracing::info!("Metrics recorder installed");
                Ok(())
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this recorder did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!("store.commands.total", "Total number of actions sent to stores");
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time spent inside reducers per action"
    );
    describe_counter!("store.effects.executed", "Effects started, labelled by type");
    describe_counter!(
        "store.effects.cancelled",
        "Cancellable effects aborted by replacement, cancel, or shutdown"
    );
    describe_counter!("store.shutdown.initiated", "Graceful shutdowns started");
    describe_counter!("store.shutdown.completed", "Graceful shutdowns that drained in time");
    describe_counter!("store.shutdown.timeout", "Graceful shutdowns that timed out");
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );
    describe_counter!(
        "carousel.slide_changes",
        "Slide index changes, labelled by trigger"
    );
    describe_histogram!(
        "carousel.slide_dwell_seconds",
        "How long a slide stayed on screen before the index changed"
    );
}

/// Carousel metrics recorder.
pub struct CarouselMetrics;

impl CarouselMetrics {
    /// Record a slide change and what caused it (`autoplay`, `next`, `prev`, `select`, `resize`).
    pub fn record_slide_change(trigger: &'static str) {
        counter!("carousel.slide_changes", "trigger" => trigger).increment(1);
    }

    /// Record how long a slide stayed on screen.
    pub fn record_dwell(duration: Duration) {
        histogram!("carousel.slide_dwell_seconds").record(duration.as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recorder_starts_uninstalled() {
        let recorder = MetricsRecorder::default();
        assert!(recorder.handle().is_none());
        assert!(recorder.render().is_none());
    }

    #[test]
    fn test_metrics_recorder_render() {
        let mut recorder = MetricsRecorder::new();

        assert!(recorder.start().is_ok());

        CarouselMetrics::record_slide_change("autoplay");
        CarouselMetrics::record_dwell(Duration::from_secs(8));

        // Another test may have installed the recorder first; metrics are
        // still recorded, there is just no handle here to render them.
        if let Some(rendered) = recorder.render() {
            assert!(rendered.contains("carousel_slide_changes"));
        }
    }
}
