use crate::check_in::{CheckInError, CheckInOutcome, CheckInSubmitter};
use crate::context::{ContextSnapshot, GeofencingContextLoader};
use crate::domain::{CheckInMode, Coordinate, ResolvedZone};
use crate::geo::{Proximity, ZoneUnavailable, classify, resolve_zone};
use crate::position::{LocationError, PositionOptions, PositionSource, PositionWatch};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// What the user is shown while checking in. Advisory only.
#[derive(Debug, Clone, PartialEq)]
pub struct Guidance {
    /// `None` while no context is loaded.
    pub zone: Option<Result<ResolvedZone, ZoneUnavailable>>,
    pub proximity: Option<Proximity>,
    pub position: Option<Coordinate>,
    pub location_error: Option<LocationError>,
    pub loading: bool,
    pub context_error: Option<String>,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Zone(#[from] ZoneUnavailable),
    #[error("{0}")]
    ContextUnavailable(String),
    #[error(transparent)]
    CheckIn(#[from] CheckInError),
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub watch: PositionOptions,
    pub single_shot: PositionOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            watch: PositionOptions::watch(),
            single_shot: PositionOptions::single_shot(),
        }
    }
}

/// A running check-in flow: owns the position watch for as long as the flow is shown and
/// recomputes the guidance whenever the position or the context changes.
///
/// The watch is released by [`CheckInSession::close`] or when the session is dropped, so every
/// exit path gives up device location access.
#[derive(Debug)]
pub struct CheckInSession {
    loader: Arc<GeofencingContextLoader>,
    source: Arc<dyn PositionSource>,
    submitter: Arc<CheckInSubmitter>,
    options: SessionOptions,
    watch: PositionWatch,
    context_rx: watch::Receiver<ContextSnapshot>,
    mode: CheckInMode,
    mission: Option<String>,
    position: Option<Coordinate>,
    location_error: Option<LocationError>,
}

impl CheckInSession {
    #[instrument(skip(loader, source, submitter, options))]
    pub async fn open(
        loader: Arc<GeofencingContextLoader>,
        source: Arc<dyn PositionSource>,
        submitter: Arc<CheckInSubmitter>,
        options: SessionOptions,
        mode: CheckInMode,
        mission: Option<String>,
    ) -> Self {
        loader.fetch().await;
        let context_rx = loader.subscribe();
        let watch = source.watch(options.watch);
        info!("🧭 Opened check-in session");

        CheckInSession {
            loader,
            source,
            submitter,
            options,
            watch,
            context_rx,
            mode,
            mission,
            position: None,
            location_error: None,
        }
    }

    pub fn mode(&self) -> CheckInMode {
        self.mode
    }

    /// Waits for the next position update or context change. Returns `None` once the watch has
    /// ended.
    pub async fn next_guidance(&mut self) -> Option<Guidance> {
        tokio::select! {
            update = self.watch.next() => match update {
                Some(Ok(coordinate)) => {
                    self.position = Some(coordinate);
                    self.location_error = None;
                }
                Some(Err(error)) => {
                    debug!("🧭 Position update failed: {}", error);
                    self.location_error = Some(error);
                }
                None => return None,
            },
            Ok(()) = self.context_rx.changed() => {
                self.context_rx.borrow_and_update();
            }
        }

        Some(self.guidance())
    }

    pub fn guidance(&self) -> Guidance {
        let snapshot = self.loader.snapshot();
        let zone = snapshot
            .context
            .as_deref()
            .map(|context| resolve_zone(context, self.mode, self.mission.as_deref(), self.position.as_ref()));
        let proximity = match (&zone, &self.position) {
            (Some(Ok(zone)), Some(position)) => Some(classify(zone, position)),
            _ => None,
        };

        Guidance {
            zone,
            proximity,
            position: self.position.clone(),
            location_error: self.location_error,
            loading: snapshot.loading,
            context_error: snapshot.error,
        }
    }

    pub fn set_mode(&mut self, mode: CheckInMode) -> Guidance {
        self.mode = mode;
        self.guidance()
    }

    pub fn select_mission(&mut self, order_number: Option<String>) -> Guidance {
        self.mission = order_number;
        self.guidance()
    }

    pub async fn refresh_context(&mut self) -> Guidance {
        self.loader.refresh().await;
        self.context_rx.borrow_and_update();
        self.guidance()
    }

    /// Checks in with a fresh fix rather than the last watched one.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub async fn submit(&mut self) -> Result<CheckInOutcome, SessionError> {
        let fix = self.source.get_once(self.options.single_shot).await?;
        self.position = Some(fix.clone());
        self.location_error = None;

        let snapshot = self.loader.snapshot();
        let Some(context) = snapshot.context else {
            return Err(SessionError::ContextUnavailable(
                snapshot.error.unwrap_or_else(|| ZoneUnavailable::NotConfigured.to_string()),
            ));
        };

        let zone = resolve_zone(&context, self.mode, self.mission.as_deref(), Some(&fix))?;
        let outcome = self.submitter.submit(self.mode, &zone, &fix).await?;
        Ok(outcome)
    }

    pub fn close(mut self) {
        self.watch.stop();
        info!("🧭 Closed check-in session");
    }
}
