//! Observability infrastructure - Tracing and Metrics

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_http_request, record_repository_change,
    record_unit_command, PrometheusMetrics, UnitCommandOutcome,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
