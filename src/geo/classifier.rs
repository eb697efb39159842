use crate::domain::{Coordinate, ResolvedZone};
use crate::geo::distance_meters;
use serde::Serialize;

/// Where a fix lies relative to a zone. Advisory only, the server has the final say.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Proximity {
    pub distance_meters: Option<f64>,
    /// `None` when either the radius or the distance is unknown.
    pub is_inside: Option<bool>,
}

/// Classifies `position` against `zone`. The zone's required accuracy is guidance for the
/// user and never changes the outcome.
pub fn classify(zone: &ResolvedZone, position: &Coordinate) -> Proximity {
    let distance = position.point().map(|point| distance_meters(point, zone.center));
    let is_inside = match (distance, zone.radius) {
        (Some(distance), Some(radius)) => Some(distance <= radius),
        _ => None,
    };

    Proximity {
        distance_meters: distance,
        is_inside,
    }
}
