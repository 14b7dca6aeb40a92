//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! Agent executions are recorded under `gen_ai.invoke_agent` spans; enabling
//! span close events makes their timing visible in the log output.
//!
//! # Usage
//!
//! ```no_run
//! // Basic structured logging only
//! aikit_observe::init_tracing(false).unwrap();
//!
//! // From the `[telemetry]` section of a loaded configuration
//! # let config: aikit_types::config::ToolkitConfig = unimplemented!();
//! aikit_observe::TracingOptions::from(&config.telemetry).init().unwrap();
//!
//! // JSON lines with OpenTelemetry export to stdout
//! aikit_observe::TracingOptions::default()
//!     .with_json(true)
//!     .with_otel_stdout(true)
//!     .init()
//!     .unwrap();
//! ```

use std::sync::OnceLock;

use aikit_types::config::TelemetrySettings;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Tracer name reported to OpenTelemetry.
const TRACER_NAME: &str = "aikit";

/// Directive used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVE: &str = "info";

/// Subscriber options.
#[derive(Debug, Clone, Default)]
pub struct TracingOptions {
    /// Bridge spans to OpenTelemetry with a stdout exporter.
    pub otel_stdout: bool,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl TracingOptions {
    pub fn with_otel_stdout(mut self, enabled: bool) -> Self {
        self.otel_stdout = enabled;
        self
    }

    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Install the global subscriber.
    ///
    /// Respects `RUST_LOG`, falling back to `info`.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber has already been set.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if self.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .boxed()
        };

        let registry = tracing_subscriber::registry().with(fmt_layer);

        if self.otel_stdout {
            let provider = SdkTracerProvider::builder()
                .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
                .build();
            let tracer = provider.tracer(TRACER_NAME);
            let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

            registry.with(otel_layer).with(env_filter).try_init()?;

            let _ = TRACER_PROVIDER.set(provider.clone());
            opentelemetry::global::set_tracer_provider(provider);
        } else {
            registry.with(env_filter).try_init()?;
        }

        Ok(())
    }
}

/// Options from the `[telemetry]` section of the configuration file.
impl From<&TelemetrySettings> for TracingOptions {
    fn from(settings: &TelemetrySettings) -> Self {
        Self::default().with_otel_stdout(settings.otel_stdout)
    }
}

/// Initialize the global tracing subscriber with human-readable output.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(enable_otel: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    TracingOptions::default().with_otel_stdout(enable_otel).init()
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// No-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
