use crate::domain::GeoPoint;
use serde::{Deserialize, Serialize};

/// A fix reported by the device. Only latitude and longitude are guaranteed, the
/// other fields are present only when the platform reports them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>, // In meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>, // In meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>, // In degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>, // In meters per second
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            heading: None,
            speed: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Returns the fix as a [`GeoPoint`], or `None` when the platform reported an invalid position.
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
