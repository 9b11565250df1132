//! Deadline wrapper for slow landmark providers.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use selfie_check_core::domain::{ImageInfo, LandmarkSet};
use selfie_check_core::{DetectionError, LandmarkProvider};
use tracing::warn;

/// Runs an inner provider on a worker thread and gives up after `timeout`.
///
/// A timed-out worker is detached; its late answer is discarded.
pub struct DeadlineLandmarkProvider<P> {
    inner: Arc<P>,
    timeout: Duration,
}

impl<P> DeadlineLandmarkProvider<P> {
    /// Wraps `inner` with a deadline.
    #[must_use]
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: LandmarkProvider + 'static> LandmarkProvider for DeadlineLandmarkProvider<P> {
    fn detect(&self, image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError> {
        let (tx, rx) = bounded(1);
        let inner = Arc::clone(&self.inner);
        let image = image.clone();

        thread::Builder::new()
            .name("landmark-detect".into())
            .spawn(move || {
                // Receiver is gone after a timeout.
                let _ = tx.send(inner.detect(&image));
            })
            .map_err(|e| DetectionError::Backend(format!("failed to spawn detector thread: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!("Landmark detection exceeded {:?}", self.timeout);
                Err(DetectionError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(DetectionError::Backend(
                "detector thread exited without a result".into(),
            )),
        }
    }
}
