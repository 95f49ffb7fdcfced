//! Fan-out of outbound events to the connected client.

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::types::OutboundEvent;

/// Writes events to the client as SSE frames, in the order received.
///
/// Liveness is an explicit [`CancellationToken`] handed in by value: the
/// transport cancels it when the client disconnects, and a failed write
/// (receiver dropped) cancels it too. Once cancelled, `publish` becomes a
/// silent no-op; the publisher keeps accepting events so it never blocks
/// the loop or aborts an in-flight tool action.
#[derive(Debug, Clone)]
pub struct OutputPublisher {
    tx: mpsc::UnboundedSender<String>,
    cancel: CancellationToken,
}

impl OutputPublisher {
    pub fn new(tx: mpsc::UnboundedSender<String>, cancel: CancellationToken) -> Self {
        Self { tx, cancel }
    }

    /// Publisher plus the frame receiver the transport drains.
    pub fn channel(cancel: CancellationToken) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx, cancel), rx)
    }

    /// Like [`channel`](Self::channel), but exposes the frames as a
    /// `Stream` for push-transport integration.
    pub fn frame_stream(cancel: CancellationToken) -> (Self, UnboundedReceiverStream<String>) {
        let (publisher, rx) = Self::channel(cancel);
        (publisher, UnboundedReceiverStream::new(rx))
    }

    /// Write one event. Never fails and never blocks.
    pub fn publish(&self, event: &OutboundEvent) {
        if self.cancel.is_cancelled() {
            return;
        }
        if self.tx.send(event.to_sse_frame()).is_err() {
            self.cancel.cancel();
        }
    }

    /// Whether the client transport is still considered open.
    pub fn is_live(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}
