use crate::connectivity::{Connectivity, ConnectivityMonitor};
use crate::offline_queue::OfflineQueue;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

pub fn spawn_replay_trigger(queue: Arc<OfflineQueue>, monitor: &dyn ConnectivityMonitor) -> JoinHandle<()> {
    let rx = monitor.subscribe();
    tokio::spawn(async move {
        run_replay_trigger(queue, rx).await;
    })
}

/// Replays the offline queue once right away and again every time connectivity is restored.
/// Returns when the monitor goes away.
#[instrument(skip_all)]
pub async fn run_replay_trigger(queue: Arc<OfflineQueue>, mut rx: watch::Receiver<Connectivity>) {
    replay(&queue).await;

    while rx.changed().await.is_ok() {
        let connectivity = *rx.borrow_and_update();
        if connectivity == Connectivity::Online {
            info!("🔌 Connectivity restored");
            replay(&queue).await;
        }
    }

    debug!("🔌 Connectivity monitor closed, no longer replaying offline check-ins");
}

async fn replay(queue: &OfflineQueue) {
    match queue.replay_all().await {
        Ok(report) if !report.remaining.is_empty() => {
            warn!("⚠️ {} offline check-in(s) still pending", report.remaining.len());
        }
        Ok(_) => {}
        Err(e) => warn!("⚠️ Unable to replay offline check-ins: {}", e),
    }
}
