mod attendance_api;
pub mod domain;
mod http;
mod map_context;

pub use attendance_api::{ApiError, AttendanceApi};
pub use http::{ApiClientError, HttpAttendanceApi, new_client};
pub use map_context::map_context;
