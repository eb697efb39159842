mod check_in;
mod context_get;

pub use check_in::{CheckInRequest, CheckInResponse, OfflineCheckInRequest};
pub use context_get::{FallbackGet, GeofencingContextGet, MissionGet, OfficeGet};
