mod queue;

pub use queue::{DEFAULT_STORAGE_KEY, OfflineQueue, QueueError, ReplayReport};
