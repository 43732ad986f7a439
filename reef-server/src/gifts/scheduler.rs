//! Gift maintenance schedulers
//!
//! Two periodic tasks tied to the server lifetime:
//!
//! - [`ExpirySweeper`] purges expired wheel gifts (default every 1s,
//!   configurable 1–5s).
//! - [`SettingsWatcher`] polls the wheel settings and retroactively
//!   resyncs the expiry of un-expired gifts when the participation delay
//!   changes.

use chrono::Utc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::gifts::GiftManager;

/// Periodic purge of expired wheel gifts
pub struct ExpirySweeper {
    state: ServerState,
    shutdown: CancellationToken,
}

impl ExpirySweeper {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        let period = Duration::from_millis(self.state.config.gift_sweep_interval_ms);
        tracing::info!("Gift expiry sweep started (period {:?})", period);
        let gifts = GiftManager::new(self.state.db.clone());
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Utc::now().timestamp_millis();
                    if let Err(e) = gifts.sweep_expired(now).await {
                        tracing::error!("Gift expiry sweep failed: {e}");
                    }
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Gift expiry sweep stopped");
                    return;
                }
            }
        }
    }
}

/// Poll the wheel settings and resync gift TTLs on change
pub struct SettingsWatcher {
    state: ServerState,
    shutdown: CancellationToken,
}

impl SettingsWatcher {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        let period = Duration::from_millis(self.state.config.wheel_poll_interval_ms);
        tracing::info!("Wheel settings watcher started (period {:?})", period);
        let gifts = GiftManager::new(self.state.db.clone());

        let mut last_seen = match gifts.wheel_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to read wheel settings: {e}");
                Default::default()
            }
        };

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match gifts.wheel_settings().await {
                        Ok(current) if current != last_seen => {
                            tracing::info!(
                                delay_hours = current.participation_delay_hours,
                                "Wheel participation delay changed, resyncing gift expiries"
                            );
                            let now = Utc::now().timestamp_millis();
                            match gifts.resync_wheel_ttls(&current, now).await {
                                Ok(_) => last_seen = current,
                                Err(e) => tracing::error!("Wheel TTL resync failed: {e}"),
                            }
                        }
                        Ok(_) => {}
                        Err(e) => tracing::error!("Failed to read wheel settings: {e}"),
                    }
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Wheel settings watcher stopped");
                    return;
                }
            }
        }
    }
}
