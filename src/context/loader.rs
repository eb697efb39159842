use crate::api::{ApiError, AttendanceApi};
use crate::domain::GeofencingContext;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// What callers see of the context: the loaded context, whether a fetch is in flight and the
/// error of the last failed fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    pub context: Option<Arc<GeofencingContext>>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Loads the geofencing context of a check-in session.
///
/// Every fetch replaces the snapshot as a whole. When fetches overlap only the most recently
/// started one is applied, responses of older ones are discarded.
#[derive(Debug)]
pub struct GeofencingContextLoader {
    api: Arc<dyn AttendanceApi>,
    state: watch::Sender<ContextSnapshot>,
    generation: AtomicU64,
}

impl GeofencingContextLoader {
    pub fn new(api: Arc<dyn AttendanceApi>) -> Self {
        let (state, _) = watch::channel(ContextSnapshot::default());
        GeofencingContextLoader {
            api,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ContextSnapshot {
        self.state.borrow().clone()
    }

    pub fn context(&self) -> Option<Arc<GeofencingContext>> {
        self.state.borrow().context.clone()
    }

    /// Notifies on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<ContextSnapshot> {
        self.state.subscribe()
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> ContextSnapshot {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.loading = true);

        info!("🗺️ Loading geofencing context...");
        let result = self.api.geofencing_context().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "🗺️ Loading geofencing context... superseded, discarding response");
            return self.snapshot();
        }

        let snapshot = match result {
            Ok(context) => {
                info!(
                    "🗺️ Loading geofencing context... OK, {} office(s), {} mission(s), fallback: {}",
                    context.offices.len(),
                    context.missions.len(),
                    context.fallback.is_some()
                );
                ContextSnapshot {
                    context: Some(Arc::new(context)),
                    loading: false,
                    error: None,
                }
            }
            Err(e) => {
                warn!("🗺️ Loading geofencing context... failed, {}", e);
                ContextSnapshot {
                    context: None,
                    loading: false,
                    error: Some(user_message(&e)),
                }
            }
        };

        self.state.send_replace(snapshot.clone());
        snapshot
    }

    pub async fn refresh(&self) -> ContextSnapshot {
        self.fetch().await
    }
}

fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => "Could not reach the attendance service, check your connection and try again".to_string(),
        ApiError::Status { status, .. } => format!("The attendance service could not load your check-in zones (status {})", status),
        ApiError::Decode(_) | ApiError::InvalidUrl(_) => "The attendance service returned invalid check-in zones".to_string(),
    }
}
