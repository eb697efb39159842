use crate::app_config::LocationConfig;
use crate::domain::Coordinate;
use crate::position::{LocationError, PositionOptions, PositionSource, PositionUpdate, PositionWatch, with_timeout};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, instrument};

const WATCH_BUFFER_SIZE: usize = 8;

/// Reports a position taken from configuration, for hosts without a location sensor.
/// Without a configured position every acquisition fails with
/// [`LocationError::PositionUnavailable`]. A watch produces a fix every watch interval and reports
/// [`LocationError::Timeout`] whenever the next fix takes longer than the watch timeout.
#[derive(Debug, Clone)]
pub struct ConfiguredPositionSource {
    coordinate: Option<Coordinate>,
    watch_interval: Duration,
}

impl ConfiguredPositionSource {
    pub fn new(coordinate: Option<Coordinate>, watch_interval: Duration) -> Self {
        ConfiguredPositionSource { coordinate, watch_interval }
    }

    pub fn from_config(config: &LocationConfig) -> Self {
        ConfiguredPositionSource::new(config.coordinate(), config.watch_interval())
    }

    fn current(&self) -> PositionUpdate {
        self.coordinate.clone().ok_or(LocationError::PositionUnavailable)
    }
}

#[async_trait]
impl PositionSource for ConfiguredPositionSource {
    #[instrument(skip(self))]
    fn watch(&self, options: PositionOptions) -> PositionWatch {
        let (tx, rx) = mpsc::channel::<PositionUpdate>(WATCH_BUFFER_SIZE);
        let source = self.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(source.watch_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let update = with_timeout(&options, async {
                    ticker.tick().await;
                    source.current()
                })
                .await;

                if tx.send(update).await.is_err() {
                    break;
                }
            }
        });

        debug!("📡 Started position watch");
        PositionWatch::new(rx, move || handle.abort())
    }

    #[instrument(skip(self))]
    async fn get_once(&self, options: PositionOptions) -> PositionUpdate {
        with_timeout(&options, async { self.current() }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn watch_emits_the_configured_position_repeatedly() {
        let source = ConfiguredPositionSource::new(Some(Coordinate::new(51.86, 4.35).with_accuracy(8.0)), Duration::from_secs(1));
        let mut watch = source.watch(PositionOptions::watch());

        let first = watch.next().await;
        let second = watch.next().await;

        assert_eq!(first, Some(Ok(Coordinate::new(51.86, 4.35).with_accuracy(8.0))));
        assert_eq!(first, second);
        watch.stop();
        assert_eq!(watch.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_without_position_reports_unavailable() {
        let source = ConfiguredPositionSource::new(None, Duration::from_secs(1));
        let mut watch = source.watch(PositionOptions::watch());

        assert_eq!(watch.next().await, Some(Err(LocationError::PositionUnavailable)));
    }

    #[tokio::test(start_paused = true)]
    async fn watch_reports_a_timeout_when_fixes_arrive_too_slowly() {
        let source = ConfiguredPositionSource::new(Some(Coordinate::new(51.86, 4.35)), Duration::from_secs(60));
        let mut watch = source.watch(PositionOptions {
            timeout: Duration::from_secs(10),
        });

        assert_eq!(watch.next().await, Some(Ok(Coordinate::new(51.86, 4.35))));

        let started = Instant::now();
        assert_eq!(watch.next().await, Some(Err(LocationError::Timeout)));
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(10) && waited < Duration::from_secs(60), "waited {:?}", waited);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_resumes_after_a_timeout() {
        let source = ConfiguredPositionSource::new(Some(Coordinate::new(51.86, 4.35)), Duration::from_secs(15));
        let mut watch = source.watch(PositionOptions::watch());

        assert_eq!(watch.next().await, Some(Ok(Coordinate::new(51.86, 4.35))));
        assert_eq!(watch.next().await, Some(Err(LocationError::Timeout)));
        assert_eq!(watch.next().await, Some(Ok(Coordinate::new(51.86, 4.35))));
    }

    #[tokio::test]
    async fn get_once_returns_a_single_fix() {
        let source = ConfiguredPositionSource::new(Some(Coordinate::new(1.0, 2.0)), Duration::from_secs(1));

        assert_eq!(source.get_once(PositionOptions::single_shot()).await, Ok(Coordinate::new(1.0, 2.0)));
    }
}
