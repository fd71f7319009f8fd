//! Error types for the trace generator

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the trace generator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (fatal at startup, no retry)
    #[error("Configuration error: {0}")]
    Config(String),

    /// OTLP exporter construction failed
    #[error("Failed to build OTLP exporter: {0}")]
    ExporterBuild(#[from] opentelemetry_otlp::ExporterBuildError),

    /// Telemetry SDK shutdown/flush failure
    #[error("Telemetry SDK error: {0}")]
    Sdk(#[from] opentelemetry_sdk::error::OTelSdkError),
}
