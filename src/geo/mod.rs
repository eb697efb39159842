mod classifier;
mod haversine;
mod resolver;

pub use classifier::{Proximity, classify};
pub use haversine::{EARTH_RADIUS_METERS, distance_meters};
pub use resolver::{FALLBACK_ZONE_LABEL, ZoneUnavailable, resolve_zone};
