//! Loop driver
//!
//! Opens a fresh trace once per second and runs the span tree under it. The
//! pacing sleep is fixed and deliberately not compensated for the tree's own
//! duration, so the effective period is ~1s plus the tree's sleeps. There is
//! no cancellation beyond the optional iteration limit or process
//! termination.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{Config, LOOP_PERIOD};
use crate::error::Result;
use crate::telemetry::Telemetry;
use crate::workload;

/// Run the generator loop until the configured iteration limit (if any).
pub async fn run(config: &Config, telemetry: &Telemetry) -> Result<()> {
    let tracer = telemetry.tracer();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("starting loop");
    let mut iteration: u64 = 0;
    loop {
        info!("loop start");
        let outcome = workload::root(
            &tracer,
            &telemetry.latency_ms,
            &mut rng,
            &config.project_id,
        )
        .await;
        debug!(
            "iteration {}: {:.3}ms recorded for {}",
            iteration, outcome.latency_ms, outcome.span_name
        );

        tokio::time::sleep(LOOP_PERIOD).await;
        info!("loop end");

        iteration += 1;
        if let Some(limit) = config.iterations {
            if iteration >= limit {
                info!("iteration limit {} reached, stopping", limit);
                break;
            }
        }
    }

    Ok(())
}
