use serde::Serialize;

/// A validated latitude/longitude pair in degrees.
///
/// Only constructible when both coordinates are present, finite and within range, so a
/// half-configured center cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid_latitude = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let valid_longitude = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        (valid_latitude && valid_longitude).then_some(GeoPoint { latitude, longitude })
    }

    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude),
            _ => None,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A center plus a radius in meters. Both parts are required.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Geofence {
    center: GeoPoint,
    radius: f64,
}

impl Geofence {
    pub fn new(center: GeoPoint, radius: f64) -> Option<Self> {
        (radius.is_finite() && radius >= 0.0).then_some(Geofence { center, radius })
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}
