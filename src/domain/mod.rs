mod check_in_mode;
mod coordinate;
mod geo_point;
mod resolved_zone;
mod zones;

pub use check_in_mode::CheckInMode;
pub use coordinate::Coordinate;
pub use geo_point::{GeoPoint, Geofence};
pub use resolved_zone::{ResolvedZone, ZoneKind, ZoneType};
pub use zones::{FallbackZone, GeofencingContext, MissionZone, OfficeZone};
