use serde::Deserialize;

// Every geodata field is independently nullable on the wire
#[derive(Debug, Deserialize)]
pub struct GeofencingContextGet {
    #[serde(default)]
    pub offices: Vec<OfficeGet>,
    #[serde(default)]
    pub missions: Vec<MissionGet>,
    pub fallback: Option<FallbackGet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeGet {
    pub id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>, // In meters
    pub required_accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionGet {
    pub id: String,
    #[serde(rename = "order_number")]
    pub order_number: String,
    #[serde(default)]
    pub title: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub required_accuracy: Option<f64>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackGet {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub required_accuracy: Option<f64>,
}
