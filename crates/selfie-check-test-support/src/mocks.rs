//! Mock implementations of core port traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use selfie_check_core::domain::{ImageInfo, LandmarkSet, ValidationReport};
use selfie_check_core::ports::{
    ImageSource, LandmarkProvider, ProgressEvent, ProgressSink, ResultOutput,
};
use selfie_check_core::DetectionError;

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images and tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<ImageInfo>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Box::new(self.images.iter().cloned().map(Ok))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

#[derive(Debug, Clone)]
enum Response {
    Faces(Vec<LandmarkSet>),
    Fail(String),
    Slow(Duration, Vec<LandmarkSet>),
}

/// Mock implementation of `LandmarkProvider` for testing.
///
/// Returns a scripted response for every image and counts invocations, so
/// tests can assert that early rejections never reach detection.
#[derive(Debug)]
pub struct MockLandmarkProvider {
    response: Response,
    calls: AtomicUsize,
}

impl MockLandmarkProvider {
    /// Returns `faces` for every image.
    #[must_use]
    pub const fn with_faces(faces: Vec<LandmarkSet>) -> Self {
        Self {
            response: Response::Faces(faces),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns a single face for every image.
    #[must_use]
    pub fn with_face(face: LandmarkSet) -> Self {
        Self::with_faces(vec![face])
    }

    /// Reports no faces.
    #[must_use]
    pub const fn no_faces() -> Self {
        Self::with_faces(Vec::new())
    }

    /// Fails every call with a backend error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Response::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleeps for `delay` before returning `faces`.
    #[must_use]
    pub const fn slow(delay: Duration, faces: Vec<LandmarkSet>) -> Self {
        Self {
            response: Response::Slow(delay, faces),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the number of `detect` calls so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LandmarkProvider for MockLandmarkProvider {
    fn detect(&self, _image: &ImageInfo) -> Result<Vec<LandmarkSet>, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Response::Faces(faces) => Ok(faces.clone()),
            Response::Fail(message) => Err(DetectionError::Backend(message.clone())),
            Response::Slow(delay, faces) => {
                std::thread::sleep(*delay);
                Ok(faces.clone())
            }
        }
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<ValidationReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<ValidationReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &ValidationReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Started { .. }))
            .count()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
