use crate::api::domain::{CheckInRequest, CheckInResponse};
use crate::domain::GeofencingContext;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// The remote attendance service.
#[async_trait]
pub trait AttendanceApi: Debug + Send + Sync {
    async fn geofencing_context(&self) -> Result<GeofencingContext, ApiError>;

    async fn check_in_office(&self, request: &CheckInRequest) -> Result<CheckInResponse, ApiError>;

    async fn check_in_mission(&self, order_number: &str, request: &CheckInRequest) -> Result<CheckInResponse, ApiError>;

    /// Replays a check-in recorded while offline. The service must treat a repeated timestamp
    /// as the same attempt.
    async fn check_in_offline(&self, timestamp: &str) -> Result<(), ApiError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never got a response: offline, refused or timed out.
    #[error("network error: {0}")]
    Network(String),
    #[error("attendance API responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid attendance API response: {0}")]
    Decode(String),
    #[error("invalid attendance API url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return ApiError::Decode(error.to_string());
        }

        match error.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
                body: error.to_string(),
            },
            None => ApiError::Network(error.to_string()),
        }
    }
}
