mod configured;
mod error;
mod options;
mod watch;

pub use configured::ConfiguredPositionSource;
pub use error::LocationError;
pub use options::{PositionOptions, with_timeout};
pub use watch::PositionWatch;

use crate::domain::Coordinate;
use async_trait::async_trait;
use std::fmt::Debug;

pub type PositionUpdate = Result<Coordinate, LocationError>;

/// The device location capability.
#[async_trait]
pub trait PositionSource: Debug + Send + Sync {
    /// Starts continuous acquisition. The returned watch yields a fix or an error per update
    /// until it is stopped or dropped.
    fn watch(&self, options: PositionOptions) -> PositionWatch;

    /// Acquires exactly one fix, failing with [`LocationError::Timeout`] when none arrives in time.
    async fn get_once(&self, options: PositionOptions) -> PositionUpdate;
}
