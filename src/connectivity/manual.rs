use crate::connectivity::{Connectivity, ConnectivityMonitor};
use tokio::sync::watch;
use tracing::debug;

/// A monitor switched by hand.
#[derive(Debug)]
pub struct ManualConnectivityMonitor {
    state: watch::Sender<Connectivity>,
}

impl ManualConnectivityMonitor {
    pub fn new(initial: Connectivity) -> Self {
        let (state, _) = watch::channel(initial);
        ManualConnectivityMonitor { state }
    }

    pub fn set(&self, connectivity: Connectivity) {
        let changed = self.state.send_if_modified(|current| {
            let changed = *current != connectivity;
            *current = connectivity;
            changed
        });

        if changed {
            debug!("🔌 Connectivity changed to {:?}", connectivity);
        }
    }
}

impl ConnectivityMonitor for ManualConnectivityMonitor {
    fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.state.subscribe()
    }
}
