use crate::api::domain::{FallbackGet, GeofencingContextGet, MissionGet, OfficeGet};
use crate::domain::{FallbackZone, GeoPoint, Geofence, GeofencingContext, MissionZone, OfficeZone};
use tracing::warn;

/// Maps the wire context into the domain. Partially configured geodata maps to no geodata.
pub fn map_context(context: GeofencingContextGet) -> GeofencingContext {
    GeofencingContext {
        offices: context.offices.into_iter().map(map_office).collect(),
        missions: context.missions.into_iter().map(map_mission).collect(),
        fallback: context.fallback.and_then(map_fallback),
    }
}

fn map_office(office: OfficeGet) -> OfficeZone {
    let center = center(office.latitude, office.longitude);
    if center.is_none() && (office.latitude.is_some() || office.longitude.is_some()) {
        warn!(office_id = office.id, "⚠️ Ignoring invalid coordinates of office '{}'", office.name);
    }

    OfficeZone {
        id: office.id,
        name: office.name,
        center,
        radius: office.radius.filter(|radius| radius.is_finite() && *radius >= 0.0),
        required_accuracy: office.required_accuracy,
    }
}

fn map_mission(mission: MissionGet) -> MissionZone {
    let geofence = center(mission.latitude, mission.longitude).and_then(|center| mission.radius.and_then(|radius| Geofence::new(center, radius)));

    MissionZone {
        id: mission.id,
        order_number: mission.order_number,
        title: mission.title,
        geofence,
        required_accuracy: mission.required_accuracy,
        status: mission.status,
    }
}

fn map_fallback(fallback: FallbackGet) -> Option<FallbackZone> {
    let Some(center) = center(fallback.latitude, fallback.longitude) else {
        warn!("⚠️ Ignoring default zone without valid coordinates");
        return None;
    };

    Some(FallbackZone {
        center,
        radius: fallback.radius.filter(|radius| radius.is_finite() && *radius >= 0.0),
        required_accuracy: fallback.required_accuracy,
    })
}

fn center(latitude: Option<f64>, longitude: Option<f64>) -> Option<GeoPoint> {
    GeoPoint::from_parts(latitude, longitude)
}
