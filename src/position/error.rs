use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission was denied, allow location access to check in")]
    PermissionDenied,
    #[error("Your position is unavailable, move to an open area and try again")]
    PositionUnavailable,
    #[error("Locating you took too long, try again")]
    Timeout,
}

impl LocationError {
    /// Only a timeout is worth re-acquiring for, the others need the user to act first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LocationError::Timeout)
    }
}
