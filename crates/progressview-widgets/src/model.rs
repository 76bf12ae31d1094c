//! Toolkit-independent state of a dual progress bar with a draggable thumb.
//!
//! [`ProgressModel`] owns the value range, the primary and secondary progress,
//! the presentation style and the pointer state machine. Everything drawn is
//! derived on demand by [`ProgressModel::geometry`] from that state plus the
//! size and padding the host last reported; nothing geometric is cached.
//!
//! All coordinates are local to the widget: `(0, 0)` is its top-left corner.
//!
//! Setters never validate their input. `min_value < max_value` and
//! `max_value != 0` are caller preconditions; violating them yields
//! meaningless (possibly NaN) geometry, never a panic.

use crate::listener::{ProgressEvent, ProgressListener};
use crate::style::{ProgressAttrs, ProgressStyle};
use crate::StyleError;
use progressview_core::{Color, Padding, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar height as a fraction of the widget height.
pub const BAR_HEIGHT_COEFFICIENT: f32 = 0.2;

/// Default range minimum.
pub const DEFAULT_MIN_VALUE: f32 = 0.0;

/// Default range maximum.
pub const DEFAULT_MAX_VALUE: f32 = 1.0;

/// Pointer tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A pointer went down and has not been released or cancelled.
    Dragging,
}

/// Pointer action delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    /// Pointer pressed
    Down,
    /// Pointer moved while pressed
    Move,
    /// Pointer released
    Up,
    /// Gesture taken away by the host
    Cancel,
}

/// Rectangles to draw for one frame, in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressGeometry {
    /// Full-width background bar
    pub bar: Rect,
    /// Primary fill, from content left to the primary edge
    pub primary_fill: Rect,
    /// Secondary fill, from content left to the secondary edge
    pub secondary_fill: Rect,
    /// Bounding square of the thumb
    pub thumb: Rect,
}

impl ProgressGeometry {
    /// Center of the thumb.
    #[must_use]
    pub fn thumb_center(&self) -> Point {
        self.thumb.center()
    }

    /// Radius of the circle inscribed in the thumb bounds.
    #[must_use]
    pub fn thumb_circle_radius(&self) -> f32 {
        self.thumb.width / 2.0
    }

    /// Same geometry shifted by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            bar: self.bar.translate(offset),
            primary_fill: self.primary_fill.translate(offset),
            secondary_fill: self.secondary_fill.translate(offset),
            thumb: self.thumb.translate(offset),
        }
    }
}

/// Value state, geometry derivation and pointer state machine of a progress bar.
pub struct ProgressModel {
    min_value: f32,
    max_value: f32,
    primary_value: f32,
    secondary_value: f32,
    snap_threshold: f32,
    style: ProgressStyle,
    drag: DragState,
    last_pointer: Point,
    size: Size,
    padding: Padding,
    repaint_requested: bool,
    listener: Option<Box<dyn ProgressListener>>,
}

impl fmt::Debug for ProgressModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressModel")
            .field("min_value", &self.min_value)
            .field("max_value", &self.max_value)
            .field("primary_value", &self.primary_value)
            .field("secondary_value", &self.secondary_value)
            .field("snap_threshold", &self.snap_threshold)
            .field("style", &self.style)
            .field("drag", &self.drag)
            .field("last_pointer", &self.last_pointer)
            .field("size", &self.size)
            .field("padding", &self.padding)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ProgressModel {
    fn default() -> Self {
        Self::new(ProgressStyle::default())
    }
}

impl ProgressModel {
    /// Create a model with default values and the given style.
    #[must_use]
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            primary_value: 0.0,
            secondary_value: 0.0,
            snap_threshold: 0.0,
            style,
            drag: DragState::Idle,
            last_pointer: Point::ORIGIN,
            size: Size::ZERO,
            padding: Padding::ZERO,
            repaint_requested: false,
            listener: None,
        }
    }

    /// Create a model from construction-time attributes layered over `defaults`.
    ///
    /// Values are applied in attribute order (min, max, snap, primary,
    /// secondary), through the regular setters.
    pub fn from_attrs(attrs: &ProgressAttrs, defaults: &ProgressStyle) -> Result<Self, StyleError> {
        let mut model = Self::new(attrs.resolve_style(defaults)?);
        model.set_min_value(attrs.min_value.unwrap_or(DEFAULT_MIN_VALUE));
        model.set_max_value(attrs.max_value.unwrap_or(DEFAULT_MAX_VALUE));
        model.set_snap_threshold(attrs.snap_threshold.unwrap_or(0.0));
        model.set_primary_value(attrs.primary_value.unwrap_or(0.0));
        model.set_secondary_value(attrs.secondary_value.unwrap_or(0.0));
        Ok(model)
    }

    // =========================================================================
    // Listener
    // =========================================================================

    /// Register the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ProgressListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove and return the registered listener.
    pub fn take_listener(&mut self) -> Option<Box<dyn ProgressListener>> {
        self.listener.take()
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    fn notify(&mut self, event: ProgressEvent) {
        // The listener is moved out for the call so it can borrow the model.
        if let Some(mut listener) = self.listener.take() {
            event.dispatch(listener.as_mut(), self);
            self.listener = Some(listener);
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Range minimum.
    #[must_use]
    pub const fn min_value(&self) -> f32 {
        self.min_value
    }

    /// Set the range minimum.
    pub fn set_min_value(&mut self, value: f32) {
        self.min_value = value;
        self.invalidate();
    }

    /// Range maximum.
    #[must_use]
    pub const fn max_value(&self) -> f32 {
        self.max_value
    }

    /// Set the range maximum. Must not be zero.
    pub fn set_max_value(&mut self, value: f32) {
        self.max_value = value;
        self.invalidate();
    }

    /// Primary progress.
    #[must_use]
    pub const fn primary_value(&self) -> f32 {
        self.primary_value
    }

    /// Set the primary progress and notify the listener with
    /// `from_user == false`. Notifies on every call, even when the value is
    /// unchanged.
    pub fn set_primary_value(&mut self, value: f32) {
        self.commit_primary(value, false);
    }

    fn commit_primary(&mut self, value: f32, from_user: bool) {
        self.primary_value = value;
        self.notify(ProgressEvent::ProgressChanged {
            progress: value,
            from_user,
        });
        self.invalidate();
    }

    /// Secondary progress.
    #[must_use]
    pub const fn secondary_value(&self) -> f32 {
        self.secondary_value
    }

    /// Set the secondary progress.
    pub fn set_secondary_value(&mut self, value: f32) {
        self.secondary_value = value;
        self.invalidate();
    }

    /// Snap threshold in value units.
    #[must_use]
    pub const fn snap_threshold(&self) -> f32 {
        self.snap_threshold
    }

    /// Set the snap threshold in value units.
    pub fn set_snap_threshold(&mut self, value: f32) {
        self.snap_threshold = value;
        self.invalidate();
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Current style.
    #[must_use]
    pub const fn style(&self) -> &ProgressStyle {
        &self.style
    }

    /// Thumb extent in pixels: the side of the square the thumb circle is
    /// inscribed in. Never exceeds the content height once laid out.
    #[must_use]
    pub const fn thumb_radius(&self) -> f32 {
        self.style.thumb_radius
    }

    /// Set the thumb extent. Clamped immediately if the widget has already
    /// been measured.
    pub fn set_thumb_radius(&mut self, radius: f32) {
        self.style.thumb_radius = radius;
        self.clamp_thumb_radius();
        self.invalidate();
    }

    /// Thumb border width in pixels.
    #[must_use]
    pub const fn thumb_border_width(&self) -> f32 {
        self.style.thumb_border_width
    }

    /// Set the thumb border width.
    pub fn set_thumb_border_width(&mut self, width: f32) {
        self.style.thumb_border_width = width;
        self.invalidate();
    }

    /// Set the background bar color.
    pub fn set_bar_color(&mut self, color: Color) {
        self.style.bar_color = color;
        self.invalidate();
    }

    /// Set the primary fill color.
    pub fn set_primary_color(&mut self, color: Color) {
        self.style.primary_color = color;
        self.invalidate();
    }

    /// Set the secondary fill color.
    pub fn set_secondary_color(&mut self, color: Color) {
        self.style.secondary_color = color;
        self.invalidate();
    }

    /// Set the thumb fill color.
    pub fn set_thumb_fill_color(&mut self, color: Color) {
        self.style.thumb_fill_color = color;
        self.invalidate();
    }

    /// Set the thumb border color.
    pub fn set_thumb_border_color(&mut self, color: Color) {
        self.style.thumb_border_color = color;
        self.invalidate();
    }

    // =========================================================================
    // Host layout
    // =========================================================================

    /// Size last reported by the host.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Padding last reported by the host.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Size-changed notification from the host.
    pub fn resize(&mut self, size: Size, padding: Padding) {
        self.size = size;
        self.padding = padding;
        self.clamp_thumb_radius();
        self.invalidate();
    }

    fn clamp_thumb_radius(&mut self) {
        // Not measured yet.
        if self.size.height == 0.0 {
            return;
        }
        let max_radius = self.size.height - self.padding.vertical();
        if self.style.thumb_radius > max_radius {
            tracing::warn!(
                requested = self.style.thumb_radius,
                max = max_radius,
                "thumb radius exceeds available height, clamping to {max_radius}"
            );
            self.style.thumb_radius = max_radius;
        }
    }

    // =========================================================================
    // Repaint coalescing
    // =========================================================================

    fn invalidate(&mut self) {
        if !self.repaint_requested {
            tracing::trace!("repaint requested");
        }
        self.repaint_requested = true;
    }

    /// Whether a repaint is pending.
    #[must_use]
    pub const fn needs_repaint(&self) -> bool {
        self.repaint_requested
    }

    /// Consume the pending repaint request. Any number of invalidations since
    /// the last call collapse into one `true`.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Left edge of the content area.
    #[must_use]
    pub fn content_left(&self) -> f32 {
        self.padding.left
    }

    /// Right edge of the content area.
    #[must_use]
    pub fn content_right(&self) -> f32 {
        self.size.width - self.padding.right
    }

    /// Width of the content area.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.content_right() - self.content_left()
    }

    /// Right edge of the primary fill. The ratio is taken against
    /// `max_value` alone; `min_value` is not an offset.
    #[must_use]
    pub fn primary_fill_right_edge(&self) -> f32 {
        (self.primary_value / self.max_value) * self.content_width() + self.content_left()
    }

    /// Right edge of the secondary fill. Unlike the primary edge the ratio
    /// scales the content right coordinate rather than the content width, so
    /// the two fills only agree when the left padding is zero.
    #[must_use]
    pub fn secondary_fill_right_edge(&self) -> f32 {
        (self.secondary_value / self.max_value) * self.content_right() + self.content_left()
    }

    /// Horizontal thumb center.
    ///
    /// While dragging, the thumb stays pinned to the primary edge until the
    /// pointer is more than `snap_threshold` value units away from it.
    #[must_use]
    pub fn thumb_center_x(&self) -> f32 {
        let primary_edge = self.primary_fill_right_edge();
        if self.drag == DragState::Dragging {
            let delta = (self.last_pointer.x - primary_edge).abs() / self.content_width()
                * self.max_value;
            if delta > self.snap_threshold {
                return self.last_pointer.x;
            }
        }
        primary_edge
    }

    /// Derive the rectangles for the current state.
    #[must_use]
    pub fn geometry(&self) -> ProgressGeometry {
        let left = self.content_left();
        let right = self.content_right();
        let center_y = self.size.height / 2.0;

        let bar_half = BAR_HEIGHT_COEFFICIENT * self.size.height / 2.0;
        let bar_top = center_y - bar_half;
        let bar_bottom = center_y + bar_half;

        let thumb_x = self.thumb_center_x();
        let thumb_half = self.style.thumb_radius / 2.0;

        ProgressGeometry {
            bar: Rect::from_edges(left, bar_top, right, bar_bottom),
            primary_fill: Rect::from_edges(
                left,
                bar_top,
                self.primary_fill_right_edge(),
                bar_bottom,
            ),
            secondary_fill: Rect::from_edges(
                left,
                bar_top,
                self.secondary_fill_right_edge(),
                bar_bottom,
            ),
            thumb: Rect::from_edges(
                thumb_x - thumb_half,
                center_y - thumb_half,
                thumb_x + thumb_half,
                center_y + thumb_half,
            ),
        }
    }

    /// Value at horizontal position `x` (same ratio as the primary edge).
    #[must_use]
    pub fn value_at(&self, x: f32) -> f32 {
        (x - self.content_left()) / self.content_width() * self.max_value
    }

    // =========================================================================
    // Pointer state machine
    // =========================================================================

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether a pointer is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// Last recorded pointer position, X clamped to the content area.
    #[must_use]
    pub const fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    fn record_pointer(&mut self, position: Point) {
        // max/min rather than clamp: clamp panics when the content is inverted.
        let x = position
            .x
            .min(self.content_right())
            .max(self.content_left());
        self.last_pointer = Point::new(x, position.y);
    }

    /// Feed a pointer action in local coordinates.
    ///
    /// Always returns `true`: the bar claims every gesture that reaches it.
    pub fn handle_pointer(&mut self, action: PointerAction, position: Point) -> bool {
        match (action, self.drag) {
            (PointerAction::Down, _) => {
                self.record_pointer(position);
                self.drag = DragState::Dragging;
                tracing::debug!(x = self.last_pointer.x, "drag started");
                self.notify(ProgressEvent::TouchStart);
                self.invalidate();
            }
            (PointerAction::Move, DragState::Dragging) => {
                self.record_pointer(position);
                self.invalidate();
            }
            (PointerAction::Up, DragState::Dragging) => {
                self.record_pointer(position);
                let value = self.value_at(self.last_pointer.x);
                tracing::debug!(value, "drag released");
                self.commit_primary(value, true);
                self.drag = DragState::Idle;
                self.notify(ProgressEvent::TouchEnd);
            }
            (PointerAction::Cancel, DragState::Dragging) => {
                tracing::debug!("drag cancelled");
                self.drag = DragState::Idle;
                self.notify(ProgressEvent::TouchEnd);
                self.invalidate();
            }
            (PointerAction::Move | PointerAction::Up | PointerAction::Cancel, DragState::Idle) => {
            }
        }
        true
    }
}
