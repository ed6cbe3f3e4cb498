use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Counter of `AssignUsers` calls, labelled by `outcome`
/// (`success`, `bad_request`, `not_found`, `internal_error`).
pub const ASSIGNMENT_OUTCOMES_COUNTER: &str = "plan_procedure_assignments_total";

const DEFAULT_LOG_FILTER: &str = "planroster=debug,tower_http=debug,axum=debug";

/// Flushes pending spans when dropped; hold it for the life of `main`.
pub struct ObservabilityGuard {
    otel_enabled: bool,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        if self.otel_enabled {
            global::shutdown_tracer_provider();
        }
    }
}

pub fn init(config: &Config) -> anyhow::Result<ObservabilityGuard> {
    let otel_enabled = init_tracing(config)?;
    init_metrics(config.metrics_port)?;
    Ok(ObservabilityGuard { otel_enabled })
}

/// `RUST_LOG` wins when it parses; otherwise the crate logs at debug.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

// Returns whether spans are exported over OTLP
fn init_tracing(config: &Config) -> anyhow::Result<bool> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);
    let env_filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());

    let Some(endpoint) = &config.otel_exporter_endpoint else {
        Registry::default().with(env_filter).with(fmt_layer).init();
        return Ok(false);
    };

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", config.service_name.clone()),
        ])))
        .install_batch(runtime::Tokio)?;

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    tracing::info!("Exporting traces for {} to {}", config.service_name, endpoint);
    Ok(true)
}

fn init_metrics(metrics_port: u16) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], metrics_port))
        .install()?;
    describe_metrics();

    tracing::info!("Prometheus metrics on port {}", metrics_port);
    Ok(())
}

pub fn describe_metrics() {
    metrics::describe_counter!(
        ASSIGNMENT_OUTCOMES_COUNTER,
        "AssignUsers calls by outcome"
    );
}
