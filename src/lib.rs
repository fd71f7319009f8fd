//! tracegen - Synthetic Trace & Latency-Metric Generator
//!
//! A small daemon that exercises a cloud observability backend with a known
//! workload: once per second it opens a fresh trace, runs a fixed three-span
//! call tree with randomized sleeps, and records the tree's wall-clock
//! latency as one histogram sample. Spans and metrics are exported over
//! OTLP/gRPC; propagation, aggregation, batching, and retry are all owned by
//! the OpenTelemetry SDK.
//!
//! # Call tree
//!
//! ```text
//! root ─▶ child_foo (sleep [0, 2000) ms) ─▶ child_bar (sleep [0, 1000) ms)
//! ```
//!
//! # Modules
//!
//! - [`config`] - Project-id resolution and runtime configuration
//! - [`error`] - Error types
//! - [`runner`] - The once-per-second loop driver
//! - [`telemetry`] - OTLP exporter setup for spans and metrics
//! - [`workload`] - The synthetic span tree

pub mod config;
pub mod error;
pub mod runner;
pub mod telemetry;
pub mod workload;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use telemetry::Telemetry;
pub use workload::IterationOutcome;
