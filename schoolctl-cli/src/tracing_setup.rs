//! Log and trace setup for the schoolctl binary
//!
//! ```bash
//! schoolctl --debug list                      # debug-level default filter
//! RUST_LOG=schoolctl_server=trace schoolctl serve
//! schoolctl --otel serve                      # with the `telemetry` feature
//! ```
//!
//! OTLP export reads `OTEL_EXPORTER_OTLP_ENDPOINT` (default
//! `http://localhost:4317`) and `OTEL_SERVICE_NAME` (default `schoolctl`).
//! Everything is written to stderr; stdout carries command output only.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Default the filter to `debug` and show targets
    pub debug: bool,
    /// Add an OTLP span exporter (needs the `telemetry` feature)
    pub otel: bool,
}

/// `RUST_LOG` wins over `--debug`.
fn env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.debug { "debug" } else { "info" }))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console = fmt::layer()
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(console);

    #[cfg(feature = "telemetry")]
    if config.otel {
        let (layer, endpoint) = otel_layer()?;
        registry.with(layer).try_init().map_err(|e| anyhow!(e))?;
        tracing::info!(endpoint = %endpoint, "exporting traces over OTLP");
        return Ok(());
    }

    registry.try_init().map_err(|e| anyhow!(e))
}

#[cfg(feature = "telemetry")]
fn otel_layer<S>() -> Result<(
    tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>,
    String,
)>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    let service = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "schoolctl".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .map_err(|e| anyhow!("OTLP exporter: {}", e))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new("service.name", service)]))
        .build();
    let tracer = provider.tracer("schoolctl");

    // The global provider must outlive the layer or export stops
    let _ = opentelemetry::global::set_tracer_provider(provider);

    Ok((tracing_opentelemetry::layer().with_tracer(tracer), endpoint))
}

/// Flush pending spans before exit.
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}
