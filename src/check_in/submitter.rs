use crate::api::domain::{CheckInRequest, CheckInResponse};
use crate::api::{ApiError, AttendanceApi};
use crate::domain::{CheckInMode, Coordinate, ResolvedZone, ZoneKind, ZoneType};
use crate::offline_queue::{OfflineQueue, QueueError};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const OFFLINE_NOTICE: &str = "You appear to be offline, your check-in was saved and will sync once you are back online";

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// The server accepted the check-in.
    Acknowledged { message: String, response: CheckInResponse },
    /// The server was unreachable, the attempt waits in the offline queue.
    Queued { timestamp: String },
}

impl CheckInOutcome {
    pub fn message(&self) -> &str {
        match self {
            CheckInOutcome::Acknowledged { message, .. } => message,
            CheckInOutcome::Queued { .. } => OFFLINE_NOTICE,
        }
    }
}

#[derive(Error, Debug)]
pub enum CheckInError {
    /// The server declined the check-in. The message is the server's, shown as is.
    #[error("{message}")]
    Rejected { message: String },
    #[error("check-in failed: {0}")]
    Server(ApiError),
    #[error("check-in could not be saved for later: {0}")]
    Queue(#[from] QueueError),
    #[error("cannot check in to a {zone_type:?} zone in {mode} mode")]
    ModeMismatch { mode: CheckInMode, zone_type: ZoneType },
}

/// Sends check-ins to the attendance service. Attempts that fail to reach it are handed to the
/// offline queue instead of being retried.
pub struct CheckInSubmitter {
    api: Arc<dyn AttendanceApi>,
    queue: Arc<OfflineQueue>,
    clock: Clock,
}

impl CheckInSubmitter {
    pub fn new(api: Arc<dyn AttendanceApi>, queue: Arc<OfflineQueue>) -> Self {
        CheckInSubmitter {
            api,
            queue,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[instrument(skip_all, fields(mode = %mode, zone = %zone.label))]
    pub async fn submit(&self, mode: CheckInMode, zone: &ResolvedZone, coordinate: &Coordinate) -> Result<CheckInOutcome, CheckInError> {
        let timestamp = (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true);
        let request = CheckInRequest::new(coordinate, timestamp.clone());

        info!("✅ Checking in...");
        let result = match (mode, &zone.kind) {
            (CheckInMode::Office, ZoneKind::Office { .. } | ZoneKind::Fallback) => self.api.check_in_office(&request).await,
            (CheckInMode::Mission, ZoneKind::Mission { order_number }) => self.api.check_in_mission(order_number, &request).await,
            _ => {
                return Err(CheckInError::ModeMismatch {
                    mode,
                    zone_type: zone.zone_type(),
                });
            }
        };

        match result {
            Ok(response) if response.success => {
                info!("✅ Checking in... OK, {}", response.message);
                Ok(CheckInOutcome::Acknowledged {
                    message: response.message.clone(),
                    response,
                })
            }
            Ok(response) => {
                warn!("✅ Checking in... rejected, {}", response.message);
                let message = if response.message.is_empty() {
                    "Check-in was rejected".to_string()
                } else {
                    response.message
                };
                Err(CheckInError::Rejected { message })
            }
            Err(e) if e.is_network() => {
                warn!("✅ Checking in... offline, saving for later: {}", e);
                self.queue.enqueue(&timestamp).await?;
                Ok(CheckInOutcome::Queued { timestamp })
            }
            Err(e) => {
                warn!("✅ Checking in... failed, {}", e);
                Err(CheckInError::Server(e))
            }
        }
    }
}

impl Debug for CheckInSubmitter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckInSubmitter").field("api", &self.api).field("queue", &self.queue).finish()
    }
}
