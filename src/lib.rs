//! Geofenced check-in verification: decides whether a worker stands inside an authorized zone
//! and keeps check-ins made while offline until they reach the attendance service.

pub mod api;
pub mod app_config;
pub mod check_in;
pub mod connectivity;
pub mod context;
pub mod domain;
pub mod geo;
mod location_config_deserializer;
pub mod offline_queue;
pub mod position;
pub mod session;
pub mod storage;

#[cfg(test)]
mod testing;
