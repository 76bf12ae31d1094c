//! Change notifications for progress bars.

use crate::model::ProgressModel;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives progress and gesture notifications from a [`ProgressModel`].
///
/// Every method has a no-op default so listeners only override what they
/// care about. Callbacks see the model read-only, in the state it has at the
/// moment of the notification.
pub trait ProgressListener: Send + Sync {
    /// The primary value was set, either programmatically (`from_user ==
    /// false`) or by a completed drag (`from_user == true`).
    fn on_progress_changed(&mut self, _model: &ProgressModel, _progress: f32, _from_user: bool) {}

    /// A pointer went down and the bar started tracking it.
    fn on_touch_start(&mut self, _model: &ProgressModel) {}

    /// Tracking ended through release or cancellation.
    fn on_touch_end(&mut self, _model: &ProgressModel) {}
}

/// A single notification, as seen by a listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// See [`ProgressListener::on_progress_changed`]
    ProgressChanged {
        /// New primary value
        progress: f32,
        /// Whether a drag produced it
        from_user: bool,
    },
    /// See [`ProgressListener::on_touch_start`]
    TouchStart,
    /// See [`ProgressListener::on_touch_end`]
    TouchEnd,
}

impl ProgressEvent {
    pub(crate) fn dispatch(self, listener: &mut dyn ProgressListener, model: &ProgressModel) {
        match self {
            Self::ProgressChanged {
                progress,
                from_user,
            } => listener.on_progress_changed(model, progress, from_user),
            Self::TouchStart => listener.on_touch_start(model),
            Self::TouchEnd => listener.on_touch_end(model),
        }
    }
}

/// Listener that appends every notification to a shared log.
///
/// Clones share the log, so one clone can be registered on a bar while
/// another is kept to inspect what was delivered.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingListener {
    /// Create a listener with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of notifications matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| predicate(event))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ProgressListener for RecordingListener {
    fn on_progress_changed(&mut self, _model: &ProgressModel, progress: f32, from_user: bool) {
        self.push(ProgressEvent::ProgressChanged {
            progress,
            from_user,
        });
    }

    fn on_touch_start(&mut self, _model: &ProgressModel) {
        self.push(ProgressEvent::TouchStart);
    }

    fn on_touch_end(&mut self, _model: &ProgressModel) {
        self.push(ProgressEvent::TouchEnd);
    }
}
