use crate::api::AttendanceApi;
use crate::storage::{KeyValueStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_STORAGE_KEY: &str = "offline_check_ins";

/// Check-in attempts that did not reach the server, persisted as a JSON array of ISO timestamps.
///
/// Every read-modify-write of the stored list happens under `storage_lock`. A replay pass holds
/// it only to take its snapshot and to write back the result, so an enqueue never waits for the
/// server. Replay passes are serialized by `replay_lock`.
#[derive(Debug)]
pub struct OfflineQueue {
    storage: Arc<dyn KeyValueStore>,
    api: Arc<dyn AttendanceApi>,
    key: String,
    storage_lock: Mutex<()>,
    replay_lock: Mutex<()>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub acknowledged: usize,
    /// The stored list after the pass: failed entries followed by entries queued during the pass.
    pub remaining: Vec<String>,
}

impl OfflineQueue {
    pub fn new(storage: Arc<dyn KeyValueStore>, api: Arc<dyn AttendanceApi>, key: impl Into<String>) -> Self {
        OfflineQueue {
            storage,
            api,
            key: key.into(),
            storage_lock: Mutex::new(()),
            replay_lock: Mutex::new(()),
        }
    }

    #[instrument(skip(self))]
    pub async fn enqueue(&self, timestamp: &str) -> Result<(), QueueError> {
        let _guard = self.storage_lock.lock().await;

        let mut pending = self.read().await?;
        pending.push(timestamp.to_string());
        self.write(&pending).await?;

        info!(pending = pending.len(), "📥 Queued offline check-in {}", timestamp);
        Ok(())
    }

    pub async fn pending(&self) -> Result<Vec<String>, QueueError> {
        let _guard = self.storage_lock.lock().await;
        self.read().await
    }

    /// Replays every queued check-in one after the other, in the order they were queued.
    /// Acknowledged entries are dropped, the ones that fail again are written back ahead of
    /// anything queued while the pass was running.
    #[instrument(skip(self))]
    pub async fn replay_all(&self) -> Result<ReplayReport, QueueError> {
        let _replaying = self.replay_lock.lock().await;

        let snapshot = {
            let _guard = self.storage_lock.lock().await;
            self.read().await?
        };

        if snapshot.is_empty() {
            debug!("📤 No offline check-ins to replay");
            return Ok(ReplayReport::default());
        }

        info!("📤 Replaying {} offline check-in(s)...", snapshot.len());
        let mut acknowledged = 0;
        let mut remaining = Vec::new();
        for timestamp in &snapshot {
            match self.api.check_in_offline(timestamp).await {
                Ok(()) => {
                    debug!("📤 Replayed offline check-in {}", timestamp);
                    acknowledged += 1;
                }
                Err(e) => {
                    warn!("⚠️ Replaying offline check-in {} failed, keeping it: {}", timestamp, e);
                    remaining.push(timestamp.clone());
                }
            }
        }

        let _guard = self.storage_lock.lock().await;
        let current = self.read().await?;
        let queued_meanwhile: Vec<String> = match current.strip_prefix(snapshot.as_slice()) {
            Some(added) => added.to_vec(),
            None => current.into_iter().filter(|timestamp| !snapshot.contains(timestamp)).collect(),
        };

        remaining.extend(queued_meanwhile);
        self.write(&remaining).await?;
        info!("📤 Replaying offline check-ins... OK, {} acknowledged, {} remaining", acknowledged, remaining.len());

        Ok(ReplayReport { acknowledged, remaining })
    }

    async fn read(&self) -> Result<Vec<String>, QueueError> {
        let Some(value) = self.storage.get_item(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&value) {
            Ok(pending) => Ok(pending),
            Err(e) => {
                warn!(key = self.key, "⚠️ Discarding unreadable offline check-ins: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, pending: &[String]) -> Result<(), QueueError> {
        if pending.is_empty() {
            self.storage.remove_item(&self.key).await?;
        } else {
            self.storage.set_item(&self.key, &serde_json::to_string(pending)?).await?;
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum QueueError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode offline check-ins: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::storage::MemoryStore;
    use crate::testing::FakeAttendanceApi;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use test_log::test;
    use tokio::time::sleep;

    fn queue(api: Arc<FakeAttendanceApi>) -> (OfflineQueue, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (OfflineQueue::new(storage.clone(), api, DEFAULT_STORAGE_KEY), storage)
    }

    #[test(tokio::test)]
    async fn enqueue_appends_in_order() -> Result<(), QueueError> {
        let (queue, storage) = queue(Arc::new(FakeAttendanceApi::new()));

        queue.enqueue("t1").await?;
        queue.enqueue("t2").await?;

        assert_eq!(queue.pending().await?, vec!["t1", "t2"]);
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).await?, Some(r#"["t1","t2"]"#.to_string()));
        Ok(())
    }

    #[test(tokio::test)]
    async fn replay_keeps_exactly_the_failed_entries() -> Result<(), QueueError> {
        let api = Arc::new(FakeAttendanceApi::new());
        api.fail_offline("t2", ApiError::Network("offline".to_string()));
        let (queue, _) = queue(api.clone());
        queue.enqueue("t1").await?;
        queue.enqueue("t2").await?;

        let report = queue.replay_all().await?;

        assert_eq!(
            report,
            ReplayReport {
                acknowledged: 1,
                remaining: vec!["t2".to_string()]
            }
        );
        assert_eq!(queue.pending().await?, vec!["t2"]);
        assert_eq!(api.offline_calls(), vec!["t1", "t2"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn replay_removes_the_key_when_everything_is_acknowledged() -> Result<(), QueueError> {
        let api = Arc::new(FakeAttendanceApi::new());
        let (queue, storage) = queue(api.clone());
        queue.enqueue("t1").await?;
        queue.enqueue("t2").await?;

        let report = queue.replay_all().await?;

        assert_eq!(report.acknowledged, 2);
        assert!(report.remaining.is_empty());
        assert!(!storage.contains_key(DEFAULT_STORAGE_KEY).await);
        Ok(())
    }

    #[test(tokio::test)]
    async fn replay_of_an_empty_queue_makes_no_calls() -> Result<(), QueueError> {
        let api = Arc::new(FakeAttendanceApi::new());
        let (queue, storage) = queue(api.clone());

        let report = queue.replay_all().await?;

        assert_eq!(report, ReplayReport::default());
        assert!(api.offline_calls().is_empty());
        assert!(!storage.contains_key(DEFAULT_STORAGE_KEY).await);
        Ok(())
    }

    #[test(tokio::test)]
    async fn replay_keeps_entries_rejected_by_the_server() -> Result<(), QueueError> {
        let api = Arc::new(FakeAttendanceApi::new());
        api.fail_offline("t1", ApiError::Status {
            status: 503,
            body: "maintenance".to_string(),
        });
        let (queue, _) = queue(api.clone());
        queue.enqueue("t1").await?;

        let report = queue.replay_all().await?;

        assert_eq!(report.remaining, vec!["t1"]);
        assert_eq!(queue.pending().await?, vec!["t1"]);
        Ok(())
    }

    #[test(tokio::test)]
    async fn unreadable_storage_starts_a_new_queue() -> Result<(), QueueError> {
        let (queue, storage) = queue(Arc::new(FakeAttendanceApi::new()));
        storage.set_item(DEFAULT_STORAGE_KEY, "not json").await?;

        queue.enqueue("t1").await?;

        assert_eq!(queue.pending().await?, vec!["t1"]);
        Ok(())
    }

    #[test(tokio::test(start_paused = true))]
    async fn enqueue_during_replay_is_not_held_up_and_survives() -> Result<(), QueueError> {
        let api = Arc::new(FakeAttendanceApi::new());
        api.delay_offline(Duration::from_secs(10));
        api.fail_offline("t2", ApiError::Network("offline".to_string()));
        let (queue, _) = queue(api.clone());
        let queue = Arc::new(queue);
        queue.enqueue("t1").await?;
        queue.enqueue("t2").await?;

        let replay = tokio::spawn({
            let queue = queue.clone();
            async move { queue.replay_all().await }
        });
        sleep(Duration::from_secs(1)).await;

        queue.enqueue("t3").await?;
        assert!(!replay.is_finished());

        let report = replay.await.expect("replay panicked")?;

        assert_eq!(report.acknowledged, 1);
        assert_eq!(report.remaining, vec!["t2", "t3"]);
        assert_eq!(queue.pending().await?, vec!["t2", "t3"]);
        assert_eq!(api.offline_calls(), vec!["t1", "t2"]);
        Ok(())
    }
}
