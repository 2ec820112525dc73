//! Metrics.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};

use crate::{Result, ServerError};

lazy_static! {
    /// Issue operations, by operation and outcome.
    pub static ref ISSUE_OPERATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("issue_operations", "Issue operations"),
        &["operation", "outcome"]
    )
    .expect("valid metric definition");
}

/// Outcome of an issue operation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Outcome {
    Success,
    Rejected,
    Failed,
}

impl Outcome {
    fn to_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

pub(crate) fn record_operation(operation: &str, outcome: Outcome) {
    ISSUE_OPERATIONS
        .with_label_values(&[operation, outcome.to_str()])
        .inc();
}

/// Build the Prometheus middleware, serving `/metrics`.
pub fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError { source: e })?;

    setup_process_metrics(&prometheus)?;

    prometheus
        .registry
        .register(Box::new(ISSUE_OPERATIONS.clone()))
        .map_err(|e| ServerError::MetricsError { source: e.into() })?;

    Ok(prometheus)
}

#[cfg(unix)]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(|e| ServerError::MetricsError { source: e.into() })
}

#[cfg(not(unix))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    Ok(())
}
