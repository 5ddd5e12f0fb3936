use anyhow::{Context, Result};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, Resource};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Telemetry configuration structure
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub otlp_endpoint: Option<String>,
    pub enable_tracing: bool,
    pub export_timeout: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
            enable_tracing: std::env::var("OTEL_TRACES_ENABLED")
                .map(|v| v.parse().unwrap_or(true))
                .unwrap_or(true),
            export_timeout: Duration::from_secs(30),
        }
    }
}

/// Held by the binary until exit so pending spans get flushed.
pub struct TelemetryHandles {
    exporting: bool,
}

impl TelemetryHandles {
    pub async fn shutdown(self) -> Result<()> {
        if self.exporting {
            info!("Flushing trace exporter...");
            global::shutdown_tracer_provider();
        }
        Ok(())
    }
}

/// Install the tracing subscriber and, when an OTLP endpoint is configured,
/// the batch span exporter.
pub async fn init_telemetry(config: Option<TelemetryConfig>) -> Result<TelemetryHandles> {
    let config = config.unwrap_or_default();

    setup_tracing_subscriber()?;

    info!(
        "Initializing telemetry for {} v{} in environment: {}",
        config.service_name, config.service_version, config.environment
    );

    let exporting = if config.enable_tracing {
        init_tracing(&config)?
    } else {
        false
    };

    Ok(TelemetryHandles { exporting })
}

fn create_resource(config: &TelemetryConfig) -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", config.service_version.clone()),
        KeyValue::new("deployment.environment", config.environment.clone()),
    ])
}

fn init_tracing(config: &TelemetryConfig) -> Result<bool> {
    let Some(endpoint) = &config.otlp_endpoint else {
        info!("No OTLP endpoint configured, spans stay local");
        return Ok(false);
    };

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint)
                .with_timeout(config.export_timeout),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::config()
                .with_resource(create_resource(config))
                .with_sampler(opentelemetry_sdk::trace::Sampler::AlwaysOn),
        )
        .install_batch(runtime::Tokio)
        .context("Failed to initialize OTLP tracer")?;

    info!(endpoint = %endpoint, "Client spans exported over OTLP");
    Ok(true)
}

fn setup_tracing_subscriber() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into());

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

/// Get a tracer instance for the current service
pub fn get_tracer(name: &'static str) -> opentelemetry::global::BoxedTracer {
    global::tracer(name)
}

/// Request counters and latency histograms for the HTTP layer. Values are
/// emitted as debug events; there is no metrics exporter in the client.
#[derive(Debug, Clone)]
pub struct RequestMetrics {
    scope: &'static str,
}

impl RequestMetrics {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, method: &str, route: &str, status_code: u16, duration: Duration) {
        tracing::debug!(
            scope = self.scope,
            counter = "http_client_requests_total",
            histogram = "http_client_request_duration_seconds",
            method,
            route,
            status_code,
            seconds = duration.as_secs_f64(),
            "Request recorded"
        );
    }

    pub fn record_failure(&self, method: &str, route: &str, duration: Duration) {
        tracing::debug!(
            scope = self.scope,
            counter = "http_client_failures_total",
            method,
            route,
            seconds = duration.as_secs_f64(),
            "Request failed before a response"
        );
    }
}
