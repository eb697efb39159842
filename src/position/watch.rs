use crate::position::PositionUpdate;
use futures::Stream;
use std::fmt::{Debug, Formatter};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::Receiver;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

type StopHook = Box<dyn FnOnce() + Send>;

/// A running position watch: a lazy, non-restartable stream of fixes or errors.
///
/// The watch releases the device location on [`PositionWatch::stop`] or on drop, whichever comes
/// first. Once stopped the stream ends.
pub struct PositionWatch {
    updates: Option<ReceiverStream<PositionUpdate>>,
    on_stop: Option<StopHook>,
}

impl PositionWatch {
    pub fn new(rx: Receiver<PositionUpdate>, on_stop: impl FnOnce() + Send + 'static) -> Self {
        PositionWatch {
            updates: Some(ReceiverStream::new(rx)),
            on_stop: Some(Box::new(on_stop)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.updates.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(mut updates) = self.updates.take() {
            updates.close();
        }

        if let Some(on_stop) = self.on_stop.take() {
            on_stop();
            debug!("📡 Stopped position watch");
        }
    }
}

impl Stream for PositionWatch {
    type Item = PositionUpdate;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.get_mut().updates.as_mut() {
            Some(updates) => Pin::new(updates).poll_next(cx),
            None => Poll::Ready(None),
        }
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Debug for PositionWatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionWatch").field("active", &self.is_active()).finish()
    }
}
