use crate::events::TransportFrame;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// The live connection object for one open server-push channel: a frame
/// receiver plus the reader task feeding it.
///
/// Frames for one handle arrive in order. Closing (or dropping) the handle
/// aborts the reader task and detaches the receiver, so a closed handle
/// delivers no further frames.
pub struct StreamHandle {
    frames: mpsc::Receiver<TransportFrame>,
    task: JoinHandle<()>,
}

impl StreamHandle {
    pub fn new(frames: mpsc::Receiver<TransportFrame>, task: JoinHandle<()>) -> Self {
        Self { frames, task }
    }

    /// Next frame, or `None` once the reader side is gone.
    pub async fn next(&mut self) -> Option<TransportFrame> {
        self.frames.recv().await
    }

    pub fn close(self) {
        self.task.abort();
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
