//! Exporter setup for spans and metrics
//!
//! Builds the OTLP/gRPC pipelines: a batch tracer provider with an AlwaysOn
//! sampler and a periodic-reader meter provider carrying the `task_latency`
//! histogram. All batching, aggregation, and retry behavior is owned by the
//! OpenTelemetry SDK; nothing here retries on its own.

use std::time::Duration;

use opentelemetry::global;
use opentelemetry::metrics::Histogram;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_sdk::Resource;
use tracing::info;

use crate::error::Result;

/// Instrumentation scope name for tracer and meter lookups
pub const SCOPE: &str = "tracegen";

/// Histogram bucket boundaries for the latency distribution, in milliseconds
const LATENCY_BOUNDARIES: [f64; 6] = [100.0, 200.0, 400.0, 1000.0, 2000.0, 4000.0];

/// How often the periodic reader pushes metric data to the exporter
const METRIC_EXPORT_INTERVAL: Duration = Duration::from_secs(60);

// =============================================================================
// Telemetry handles
// =============================================================================

/// Installed telemetry pipelines and the one instrument the workload records
pub struct Telemetry {
    tracer_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,

    /// Latency of one span-tree iteration, in milliseconds
    pub latency_ms: Histogram<f64>,
}

impl Telemetry {
    /// Build and globally install the trace and metric pipelines.
    ///
    /// Construction failures are fatal to the caller; export failures after
    /// installation surface only through the SDK's own error handler.
    pub fn init(project_id: &str, otlp_endpoint: &str) -> Result<Self> {
        let resource = Resource::builder()
            .with_service_name(SCOPE)
            .with_attribute(KeyValue::new("gcp.project_id", project_id.to_string()))
            .build();

        let span_exporter = SpanExporter::builder()
            .with_tonic()
            .with_endpoint(otlp_endpoint)
            .build()?;

        let tracer_provider = SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .with_sampler(Sampler::AlwaysOn)
            .with_resource(resource.clone())
            .build();

        let metric_exporter = MetricExporter::builder()
            .with_tonic()
            .with_endpoint(otlp_endpoint)
            .build()?;

        let reader = PeriodicReader::builder(metric_exporter)
            .with_interval(METRIC_EXPORT_INTERVAL)
            .build();

        let meter_provider = SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(resource)
            .build();

        global::set_tracer_provider(tracer_provider.clone());
        global::set_meter_provider(meter_provider.clone());

        let latency_ms = global::meter(SCOPE)
            .f64_histogram("task_latency")
            .with_description("The task latency in milliseconds")
            .with_unit("ms")
            .with_boundaries(LATENCY_BOUNDARIES.to_vec())
            .build();

        info!("Telemetry pipelines installed, exporting to {}", otlp_endpoint);

        Ok(Self {
            tracer_provider,
            meter_provider,
            latency_ms,
        })
    }

    /// Tracer for the workload's spans
    pub fn tracer(&self) -> opentelemetry_sdk::trace::SdkTracer {
        self.tracer_provider.tracer(SCOPE)
    }

    /// Flush and shut down both providers. Call once, at exit.
    pub fn shutdown(&self) -> Result<()> {
        self.tracer_provider.shutdown()?;
        self.meter_provider.shutdown()?;
        Ok(())
    }
}
