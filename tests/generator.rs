//! Integration tests for the synthetic workload
//!
//! The span tree runs against a no-op tracer here; export behavior is owned
//! by the OpenTelemetry SDK and is not under test.

use opentelemetry::global;
use opentelemetry::trace::noop::NoopTracer;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tracegen::workload::{self, span_resource_name};

#[test]
fn resource_name_matches_cloud_trace_format() {
    assert_eq!(
        span_resource_name("demo", "abc123", "def456"),
        "projects/demo/traces/abc123/spans/def456"
    );
    assert_eq!(
        span_resource_name("my-project", "0af7651916cd43dd8448eb211c80319c", "b7ad6b7169203331"),
        "projects/my-project/traces/0af7651916cd43dd8448eb211c80319c/spans/b7ad6b7169203331"
    );
}

#[tokio::test(start_paused = true)]
async fn each_iteration_yields_one_sample() {
    let tracer = NoopTracer::new();
    let latency = global::meter("generator-tests")
        .f64_histogram("task_latency")
        .build();
    let mut rng = StdRng::seed_from_u64(99);

    let mut outcomes = Vec::new();
    for _ in 0..3 {
        outcomes.push(workload::root(&tracer, &latency, &mut rng, "demo").await);
    }

    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        assert!(outcome.latency_ms >= 0.0);
        assert!(outcome.span_name.starts_with("projects/demo/traces/"));
    }
}
