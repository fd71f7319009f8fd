//! Synthetic span tree (`root` → `child_foo` → `child_bar`)
//!
//! Each level opens a named span, attaches a wait-duration label, and blocks
//! for a pseudo-random duration to simulate work. `root` additionally records
//! its own wall-clock latency as the one externally visible metric sample,
//! tagged with a `projects/{id}/traces/{trace}/spans/{span}` resource name.

use std::time::{Duration, Instant};

use opentelemetry::metrics::Histogram;
use opentelemetry::trace::{Span, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

/// Measurement attachment type for exemplar span contexts
const SPAN_CONTEXT_TYPE: &str = "type.googleapis.com/google.monitoring.v3.SpanContext";

/// What one iteration of the span tree produced
#[derive(Debug, Clone)]
pub struct IterationOutcome {
    /// Wall-clock duration of the whole tree, in milliseconds
    pub latency_ms: f64,

    /// Synthesized span resource name for the root span
    pub span_name: String,
}

/// Cloud Trace resource name for a span
pub fn span_resource_name(project_id: &str, trace_id: &str, span_id: &str) -> String {
    format!("projects/{project_id}/traces/{trace_id}/spans/{span_id}")
}

/// Run one iteration of the span tree and record its latency sample.
pub async fn root<T>(
    tracer: &T,
    latency_ms: &Histogram<f64>,
    rng: &mut StdRng,
    project_id: &str,
) -> IterationOutcome
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let start = Instant::now();

    let span = tracer.start("root");
    let trace_id = span.span_context().trace_id().to_string();
    let span_id = span.span_context().span_id().to_string();
    let span_name = span_resource_name(project_id, &trace_id, &span_id);

    let cx = Context::current_with_span(span);
    foo(tracer, &cx, rng).await;
    cx.span().end();

    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    info!("span name: {}", span_name);
    info!("task elapsed: {}ms", elapsed);

    latency_ms.record(
        elapsed,
        &[
            KeyValue::new("@type", SPAN_CONTEXT_TYPE),
            KeyValue::new("value", span_name.clone()),
        ],
    );

    IterationOutcome {
        latency_ms: elapsed,
        span_name,
    }
}

/// Middle span: waits in [0, 2000) ms, nests `bar` before sleeping.
async fn foo<T>(tracer: &T, parent: &Context, rng: &mut StdRng)
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let mut span = tracer.start_with_context("child_foo", parent);
    let wait_ms = foo_wait_ms(rng);
    info!("task foo blocked: {}ms", wait_ms);
    span.set_attribute(KeyValue::new("foo_wait", wait_ms.to_string()));

    let cx = parent.with_span(span);
    bar(tracer, &cx, rng).await;

    tokio::time::sleep(Duration::from_secs_f64(wait_ms / 1000.0)).await;
    cx.span().end();
}

/// Leaf span: waits in [0, 1000) ms.
async fn bar<T>(tracer: &T, parent: &Context, rng: &mut StdRng)
where
    T: Tracer,
    T::Span: Send + Sync + 'static,
{
    let mut span = tracer.start_with_context("child_bar", parent);
    let wait_ms = bar_wait_ms(rng);
    info!("task bar blocked: {}ms", wait_ms);
    span.set_attribute(KeyValue::new("bar_wait", wait_ms.to_string()));

    tokio::time::sleep(Duration::from_secs_f64(wait_ms / 1000.0)).await;
    span.end();
}

fn foo_wait_ms(rng: &mut StdRng) -> f64 {
    rng.gen_range(0.0..2000.0)
}

fn bar_wait_ms(rng: &mut StdRng) -> f64 {
    rng.gen_range(0.0..1000.0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::global;
    use opentelemetry::trace::noop::NoopTracer;
    use rand::SeedableRng;

    #[test]
    fn wait_durations_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let foo = foo_wait_ms(&mut rng);
            let bar = bar_wait_ms(&mut rng);
            assert!((0.0..2000.0).contains(&foo));
            assert!((0.0..1000.0).contains(&bar));
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_wait_sequence() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let seq_a: Vec<f64> = (0..10).map(|_| foo_wait_ms(&mut a)).collect();
        let seq_b: Vec<f64> = (0..10).map(|_| foo_wait_ms(&mut b)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[tokio::test(start_paused = true)]
    async fn root_produces_a_non_negative_sample() {
        let tracer = NoopTracer::new();
        let latency = global::meter("workload-tests").f64_histogram("task_latency").build();
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = root(&tracer, &latency, &mut rng, "demo").await;

        assert!(outcome.latency_ms >= 0.0);
        assert!(outcome.span_name.starts_with("projects/demo/traces/"));
        assert!(outcome.span_name.contains("/spans/"));
    }
}
