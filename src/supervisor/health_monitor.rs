//! Optional periodic health-check sweep, layered on top of (not replacing)
//! the failure-driven supervision in §4.5.
//!
//! The reactive path (`Context::handle_failure` -> strategy -> directive) is
//! the only supervision the core requires. This sweep exists for actors whose
//! handler can wedge without returning an `Err` — e.g. blocked on an external
//! resource — where nothing would otherwise trigger `Context.handleFailure`.
//! It is off by default (`SystemConfig::health_check_interval = None`).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::interval;

use crate::actor::{ActorError, LifecyclePhase};
use crate::system::System;

/// Spawns a background task that periodically sweeps the system's actor
/// table and restarts any actor observed in the `Failed` phase.
///
/// Returns a `(JoinHandle, shutdown sender)` pair; sending on the shutdown
/// sender stops the sweep on its next tick.
pub fn spawn_health_monitor(
    system: System,
    check_interval: Duration,
) -> (tokio::task::JoinHandle<()>, oneshot::Sender<()>) {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

    let task_handle = tokio::spawn(async move {
        let mut ticker = interval(check_interval);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    for address in system.addresses() {
                        if system.lifecycle_phase(&address) == Some(LifecyclePhase::Failed) {
                            let _ = system
                                .restart(&address, ActorError::lifecycle("health check observed Failed phase"))
                                .await;
                        }
                    }
                }
            }
        }
    });

    (task_handle, shutdown_tx)
}
