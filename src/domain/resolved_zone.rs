use crate::domain::GeoPoint;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Office,
    Mission,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ZoneKind {
    Office { id: String },
    Mission { order_number: String },
    Fallback,
}

impl ZoneKind {
    pub fn zone_type(&self) -> ZoneType {
        match self {
            ZoneKind::Office { .. } => ZoneType::Office,
            ZoneKind::Mission { .. } => ZoneType::Mission,
            ZoneKind::Fallback => ZoneType::Fallback,
        }
    }
}

/// The zone applicable to the current check-in attempt. Recomputed on every input change.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedZone {
    pub label: String,
    pub kind: ZoneKind,
    pub center: GeoPoint,
    pub radius: Option<f64>,
    pub required_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_label: Option<String>,
}

impl ResolvedZone {
    pub fn zone_type(&self) -> ZoneType {
        self.kind.zone_type()
    }
}
