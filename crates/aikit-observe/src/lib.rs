//! Observability setup for aikit: structured logging through `tracing` with
//! optional OpenTelemetry span export.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};
