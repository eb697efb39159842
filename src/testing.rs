//! Scripted collaborators for tests.

use crate::api::domain::{CheckInRequest, CheckInResponse};
use crate::api::{ApiError, AttendanceApi};
use crate::domain::GeofencingContext;
use crate::position::{LocationError, PositionOptions, PositionSource, PositionUpdate, PositionWatch};
use async_trait::async_trait;
use serde_json::Map;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCheckIn {
    pub order_number: Option<String>,
    pub request: CheckInRequest,
}

#[derive(Debug, Default)]
pub struct FakeAttendanceApi {
    contexts: Mutex<VecDeque<(Result<GeofencingContext, ApiError>, Duration)>>,
    check_in_responses: Mutex<VecDeque<Result<CheckInResponse, ApiError>>>,
    check_ins: Mutex<Vec<RecordedCheckIn>>,
    offline_failures: Mutex<HashMap<String, ApiError>>,
    offline_calls: Mutex<Vec<String>>,
    offline_delay: Mutex<Duration>,
    context_calls: AtomicUsize,
}

impl FakeAttendanceApi {
    pub fn new() -> Self {
        FakeAttendanceApi::default()
    }

    pub fn push_context(&self, context: Result<GeofencingContext, ApiError>, delay: Duration) {
        self.contexts.lock().unwrap().push_back((context, delay));
    }

    pub fn push_check_in(&self, response: Result<CheckInResponse, ApiError>) {
        self.check_in_responses.lock().unwrap().push_back(response);
    }

    pub fn fail_offline(&self, timestamp: &str, error: ApiError) {
        self.offline_failures.lock().unwrap().insert(timestamp.to_string(), error);
    }

    pub fn delay_offline(&self, delay: Duration) {
        *self.offline_delay.lock().unwrap() = delay;
    }

    pub fn accept_offline(&self, timestamp: &str) {
        self.offline_failures.lock().unwrap().remove(timestamp);
    }

    pub fn check_ins(&self) -> Vec<RecordedCheckIn> {
        self.check_ins.lock().unwrap().clone()
    }

    pub fn offline_calls(&self) -> Vec<String> {
        self.offline_calls.lock().unwrap().clone()
    }

    pub fn context_calls(&self) -> usize {
        self.context_calls.load(Ordering::SeqCst)
    }

    fn record_check_in(&self, order_number: Option<&str>, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        self.check_ins.lock().unwrap().push(RecordedCheckIn {
            order_number: order_number.map(str::to_string),
            request: request.clone(),
        });

        self.check_in_responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(response(true, "Checked in")))
    }
}

pub fn response(success: bool, message: &str) -> CheckInResponse {
    CheckInResponse {
        success,
        message: message.to_string(),
        details: Map::new(),
    }
}

#[async_trait]
impl AttendanceApi for FakeAttendanceApi {
    async fn geofencing_context(&self) -> Result<GeofencingContext, ApiError> {
        self.context_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.contexts.lock().unwrap().pop_front();
        let (result, delay) = next.unwrap_or_else(|| (Ok(GeofencingContext::default()), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn check_in_office(&self, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        self.record_check_in(None, request)
    }

    async fn check_in_mission(&self, order_number: &str, request: &CheckInRequest) -> Result<CheckInResponse, ApiError> {
        self.record_check_in(Some(order_number), request)
    }

    async fn check_in_offline(&self, timestamp: &str) -> Result<(), ApiError> {
        self.offline_calls.lock().unwrap().push(timestamp.to_string());
        let delay = *self.offline_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.offline_failures.lock().unwrap().get(timestamp) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// A position source driven by the test through [`FakePositionSource::emit`].
#[derive(Debug, Default)]
pub struct FakePositionSource {
    watcher: Mutex<Option<mpsc::Sender<PositionUpdate>>>,
    fixes: Mutex<VecDeque<PositionUpdate>>,
    stops: Arc<AtomicUsize>,
    watches: AtomicUsize,
}

impl FakePositionSource {
    pub fn new() -> Self {
        FakePositionSource::default()
    }

    pub async fn emit(&self, update: PositionUpdate) {
        let tx = self.watcher.lock().unwrap().clone().expect("no active watch");
        tx.send(update).await.expect("watch was stopped");
    }

    pub fn push_fix(&self, fix: PositionUpdate) {
        self.fixes.lock().unwrap().push_back(fix);
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn watches(&self) -> usize {
        self.watches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionSource for FakePositionSource {
    fn watch(&self, _options: PositionOptions) -> PositionWatch {
        let (tx, rx) = mpsc::channel(8);
        *self.watcher.lock().unwrap() = Some(tx);
        self.watches.fetch_add(1, Ordering::SeqCst);

        let stops = self.stops.clone();
        PositionWatch::new(rx, move || {
            stops.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn get_once(&self, _options: PositionOptions) -> PositionUpdate {
        self.fixes.lock().unwrap().pop_front().unwrap_or(Err(LocationError::PositionUnavailable))
    }
}
