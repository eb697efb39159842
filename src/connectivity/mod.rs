#[cfg(test)]
mod manual;
mod probe;
mod replay_trigger;

#[cfg(test)]
pub use manual::ManualConnectivityMonitor;
pub use probe::{Config as ProbeConfig, ProbeConnectivityMonitor};
pub use replay_trigger::{run_replay_trigger, spawn_replay_trigger};

use std::fmt::Debug;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Reports network reachability. Receivers are notified on every transition.
pub trait ConnectivityMonitor: Debug + Send + Sync {
    fn subscribe(&self) -> watch::Receiver<Connectivity>;
}
