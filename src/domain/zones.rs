use crate::domain::{GeoPoint, Geofence};

#[derive(Clone, Debug, PartialEq)]
pub struct OfficeZone {
    pub id: String,
    pub name: String,
    pub center: Option<GeoPoint>,
    pub radius: Option<f64>,
    pub required_accuracy: Option<f64>,
}

/// A mission assigned to the worker. Its geodata is either complete or absent.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionZone {
    pub id: String,
    pub order_number: String,
    pub title: String,
    pub geofence: Option<Geofence>,
    pub required_accuracy: Option<f64>,
    pub status: String,
}

/// Tenant-wide default zone, used when no office is configured.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackZone {
    pub center: GeoPoint,
    pub radius: Option<f64>,
    pub required_accuracy: Option<f64>,
}

/// Authorization context of a single check-in session. Replaced as a whole on refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeofencingContext {
    pub offices: Vec<OfficeZone>,
    pub missions: Vec<MissionZone>,
    pub fallback: Option<FallbackZone>,
}
