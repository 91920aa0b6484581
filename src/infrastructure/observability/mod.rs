//! Metrics export.

pub mod metrics;

pub use metrics::{PrometheusMetrics, init_metrics, metrics_router};
