//! Touch-interactive dual progress bar for the progressview toolkit.
//!
//! The crate is split into a toolkit-independent core and a thin adapter:
//!
//! - [`ProgressModel`] holds the value state, derives the drawn geometry and
//!   runs the idle/dragging pointer state machine.
//! - [`ProgressBarView`] implements [`progressview_core::Widget`] by
//!   forwarding layout, paint and input into the model.
//!
//! ```
//! use progressview_core::{Point, Rect, Widget};
//! use progressview_widgets::{PointerAction, ProgressBarView, ProgressStyle, RecordingListener};
//!
//! let recorder = RecordingListener::new();
//! let mut view = ProgressBarView::new(ProgressStyle::default()).listener(recorder.clone());
//! view.layout(Rect::new(0.0, 0.0, 200.0, 40.0));
//! view.model_mut().set_max_value(100.0);
//!
//! let model = view.model_mut();
//! model.handle_pointer(PointerAction::Down, Point::new(20.0, 20.0));
//! model.handle_pointer(PointerAction::Up, Point::new(100.0, 20.0));
//! assert_eq!(model.primary_value(), 50.0);
//! assert_eq!(recorder.events().len(), 3);
//! ```

mod error;
pub mod listener;
pub mod model;
pub mod progress_bar;
pub mod style;

pub use error::StyleError;
pub use listener::{ProgressEvent, ProgressListener, RecordingListener};
pub use model::{
    DragState, PointerAction, ProgressGeometry, ProgressModel, BAR_HEIGHT_COEFFICIENT,
    DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE,
};
pub use progress_bar::{ProgressBarView, ProgressChanged};
pub use style::{ProgressAttrs, ProgressStyle};
