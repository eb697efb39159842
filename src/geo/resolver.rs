use crate::domain::{CheckInMode, Coordinate, FallbackZone, GeofencingContext, MissionZone, OfficeZone, ResolvedZone, ZoneKind};
use crate::geo::distance_meters;
use ordered_float::OrderedFloat;
use thiserror::Error;
use tracing::{debug, instrument};

pub const FALLBACK_ZONE_LABEL: &str = "Default zone";

/// Why no zone could be resolved. The message is meant for the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneUnavailable {
    #[error("Geofencing is not configured, no office or default zone is available")]
    NotConfigured,
    #[error("Select a mission to check in")]
    SelectMission,
    #[error("Mission '{0}' was not found or is not assigned to you")]
    MissionNotFound(String),
    #[error("Mission '{0}' is missing coordinates, ask an administrator to configure it")]
    MissionMissingCoordinates(String),
}

/// Selects the zone that applies to a check-in attempt.
///
/// In office mode the nearest office with a configured center wins, ties going to the office
/// listed first. Without a position the first eligible office is returned. Without any eligible
/// office the tenant fallback zone is used.
///
/// In mission mode the mission is picked by its order number, never by distance, and must carry
/// complete geodata.
#[instrument(skip(context, position))]
pub fn resolve_zone(
    context: &GeofencingContext,
    mode: CheckInMode,
    mission_order_number: Option<&str>,
    position: Option<&Coordinate>,
) -> Result<ResolvedZone, ZoneUnavailable> {
    match mode {
        CheckInMode::Office => resolve_office_zone(context, position),
        CheckInMode::Mission => resolve_mission_zone(&context.missions, mission_order_number),
    }
}

fn resolve_office_zone(context: &GeofencingContext, position: Option<&Coordinate>) -> Result<ResolvedZone, ZoneUnavailable> {
    let mut eligible = context.offices.iter().filter(|office| office.center.is_some()).peekable();

    if eligible.peek().is_none() {
        return match &context.fallback {
            Some(fallback) => {
                debug!("📍 No office with coordinates, using the default zone");
                Ok(fallback_zone(fallback))
            }
            None => Err(ZoneUnavailable::NotConfigured),
        };
    }

    let office = match position.and_then(Coordinate::point) {
        // `min_by_key` keeps the first of equally distant offices
        Some(point) => eligible.min_by_key(|office| OrderedFloat(office.center.map_or(f64::INFINITY, |center| distance_meters(point, center)))),
        None => eligible.next(),
    };

    office.and_then(office_zone).ok_or(ZoneUnavailable::NotConfigured)
}

fn resolve_mission_zone(missions: &[MissionZone], order_number: Option<&str>) -> Result<ResolvedZone, ZoneUnavailable> {
    let Some(order_number) = order_number.filter(|order_number| !order_number.is_empty()) else {
        return Err(ZoneUnavailable::SelectMission);
    };

    let Some(mission) = missions.iter().find(|mission| mission.order_number == order_number) else {
        return Err(ZoneUnavailable::MissionNotFound(order_number.to_string()));
    };

    let Some(geofence) = mission.geofence else {
        return Err(ZoneUnavailable::MissionMissingCoordinates(order_number.to_string()));
    };

    Ok(ResolvedZone {
        label: mission.order_number.clone(),
        kind: ZoneKind::Mission {
            order_number: mission.order_number.clone(),
        },
        center: geofence.center(),
        radius: Some(geofence.radius()),
        required_accuracy: mission.required_accuracy,
        extra_label: Some(mission.title.clone()).filter(|title| !title.is_empty()),
    })
}

fn office_zone(office: &OfficeZone) -> Option<ResolvedZone> {
    Some(ResolvedZone {
        label: office.name.clone(),
        kind: ZoneKind::Office { id: office.id.clone() },
        center: office.center?,
        radius: office.radius,
        required_accuracy: office.required_accuracy,
        extra_label: None,
    })
}

fn fallback_zone(fallback: &FallbackZone) -> ResolvedZone {
    ResolvedZone {
        label: FALLBACK_ZONE_LABEL.to_string(),
        kind: ZoneKind::Fallback,
        center: fallback.center,
        radius: fallback.radius,
        required_accuracy: fallback.required_accuracy,
        extra_label: None,
    }
}
