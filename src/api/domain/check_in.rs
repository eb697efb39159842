use crate::domain::Coordinate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub timestamp: String,
}

impl CheckInRequest {
    pub fn new(coordinate: &Coordinate, timestamp: String) -> Self {
        CheckInRequest {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            accuracy: coordinate.accuracy,
            timestamp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OfflineCheckInRequest<'a> {
    pub timestamp: &'a str,
}

/// The server's verdict on a check-in. Authoritative, whatever the local classification said.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CheckInResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
