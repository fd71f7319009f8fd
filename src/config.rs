//! Runtime configuration and project-id resolution
//!
//! The Google Cloud project id is resolved once at startup and carried in
//! [`Config`] from then on. Resolution order:
//!
//! 1. explicit `--project-id` override,
//! 2. ambient application-default credentials (`gcp_auth`),
//! 3. the `GCP_PROJECT_ID` environment variable.
//!
//! If none of these yields a value, startup aborts with a configuration
//! error. There is no retry.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable consulted when ambient credentials carry no project id
pub const PROJECT_ID_ENV: &str = "GCP_PROJECT_ID";

/// Fixed pacing between loop iterations. The sleep is not compensated for
/// the span tree's own duration, so the true period is ~1s + tree duration.
pub const LOOP_PERIOD: Duration = Duration::from_secs(1);

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Cloud project id, non-empty
    pub project_id: String,

    /// OTLP/gRPC endpoint for span and metric export
    pub otlp_endpoint: String,

    /// Seed for the workload RNG; `None` seeds from OS entropy
    pub seed: Option<u64>,

    /// Stop after this many iterations; `None` runs forever
    pub iterations: Option<u64>,
}

// =============================================================================
// Project-id resolution
// =============================================================================

/// Resolve the project id from ambient credentials, falling back to the
/// `GCP_PROJECT_ID` environment variable.
pub async fn resolve_project_id() -> Result<String> {
    let ambient = ambient_project_id().await;
    project_id_from(ambient, std::env::var(PROJECT_ID_ENV).ok())
}

/// Query application-default credentials for a project id. Absence of
/// credentials is not fatal here; the env fallback may still apply.
async fn ambient_project_id() -> Option<String> {
    let provider = match gcp_auth::provider().await {
        Ok(provider) => provider,
        Err(e) => {
            warn!("Ambient credential discovery failed: {}", e);
            return None;
        }
    };

    match provider.project_id().await {
        Ok(id) => {
            debug!("Project id from ambient credentials: {}", id);
            Some(id.to_string())
        }
        Err(e) => {
            warn!("Ambient credentials carry no project id: {}", e);
            None
        }
    }
}

/// Precedence core: the first non-empty value wins, ambient credentials
/// before the env fallback.
fn project_id_from(ambient: Option<String>, env: Option<String>) -> Result<String> {
    ambient
        .filter(|id| !id.is_empty())
        .or_else(|| env.filter(|id| !id.is_empty()))
        .ok_or_else(|| {
            Error::Config(format!(
                "no project id: ambient credential discovery failed and {} is unset",
                PROJECT_ID_ENV
            ))
        })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn ambient_takes_precedence_over_env() {
        let id = project_id_from(
            Some("ambient-project".to_string()),
            Some("env-project".to_string()),
        )
        .unwrap();
        assert_eq!(id, "ambient-project");
    }

    #[test]
    fn env_is_used_when_ambient_is_absent() {
        let id = project_id_from(None, Some("env-project".to_string())).unwrap();
        assert_eq!(id, "env-project");
    }

    #[test]
    fn missing_both_is_a_config_error() {
        let err = project_id_from(None, None).unwrap_err();
        assert_matches!(err, Error::Config(_));
    }

    #[test]
    fn empty_ambient_falls_through_to_env() {
        let id = project_id_from(Some(String::new()), Some("env-project".to_string())).unwrap();
        assert_eq!(id, "env-project");
    }

    #[test]
    fn empty_values_do_not_count() {
        let err = project_id_from(Some(String::new()), Some(String::new())).unwrap_err();
        assert_matches!(err, Error::Config(_));
    }
}
