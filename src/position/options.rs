use crate::position::{LocationError, PositionUpdate};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct PositionOptions {
    /// Longest wait for a single fix, on a watch this bounds every update.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl PositionOptions {
    /// Continuous acquisition.
    pub fn watch() -> Self {
        PositionOptions {
            timeout: Duration::from_secs(10),
        }
    }

    /// A fresh fix taken at the moment of checking in.
    pub fn single_shot() -> Self {
        PositionOptions {
            timeout: Duration::from_secs(15),
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions::watch()
    }
}

/// Bounds a fix acquisition by `options.timeout`.
pub async fn with_timeout<F>(options: &PositionOptions, fix: F) -> PositionUpdate
where
    F: Future<Output = PositionUpdate>,
{
    timeout(options.timeout, fix).await.unwrap_or(Err(LocationError::Timeout))
}
