//! Periodic store maintenance.
//!
//! Purges expired keys every minute and runs the full sweep (stale cooldown
//! markers, old history, empty contacts) every `SWEEP_INTERVAL_SECS`.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// How often expired keys are purged.
pub const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Run the maintenance loop until `cancel` is triggered.
pub async fn run(state: AppState, cancel: CancellationToken) {
    let sweep_every = Duration::from_secs(state.config.sweep_interval_secs.max(1));
    tracing::info!(
        purge_interval_secs = PURGE_INTERVAL.as_secs(),
        sweep_interval_secs = sweep_every.as_secs(),
        "Maintenance job started"
    );

    let mut purge = tokio::time::interval(PURGE_INTERVAL);
    let mut sweep = tokio::time::interval(sweep_every);
    purge.set_missed_tick_behavior(MissedTickBehavior::Delay);
    sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Both intervals fire immediately; skip the startup sweep.
    sweep.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Maintenance job stopping");
                break;
            }
            _ = purge.tick() => {
                match state.sweeper().purge().await {
                    Ok(0) => tracing::debug!("Maintenance: no expired keys"),
                    Ok(purged) => tracing::info!(purged, "Maintenance: purged expired keys"),
                    Err(e) => tracing::error!(error = %e, "Maintenance: purge failed"),
                }
            }
            _ = sweep.tick() => {
                if let Err(e) = state.sweeper().sweep().await {
                    tracing::error!(error = %e, "Maintenance: sweep failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use spinwin_core::catalog::Catalog;
    use spinwin_core::clock::SystemClock;
    use spinwin_core::cooldown::CooldownPolicy;
    use spinwin_core::random::ThreadRandom;
    use spinwin_delivery::RecordingSender;
    use spinwin_store::MemoryStore;

    use crate::config::ServerConfig;

    #[tokio::test]
    async fn stops_when_cancelled() {
        let state = AppState {
            store: Arc::new(MemoryStore::new()),
            config: Arc::new(ServerConfig::default()),
            sender: Arc::new(RecordingSender::default()),
            clock: Arc::new(SystemClock),
            rng: Arc::new(ThreadRandom),
            catalog: Arc::new(Catalog::default()),
            policy: CooldownPolicy::utc(),
        };
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(state, cancel.clone()));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("maintenance job did not stop")
            .unwrap();
    }
}
