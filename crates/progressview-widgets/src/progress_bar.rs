//! Progress bar view: the [`Widget`] adapter around [`ProgressModel`].

use crate::listener::ProgressListener;
use crate::model::{PointerAction, ProgressModel};
use crate::style::{ProgressAttrs, ProgressStyle};
use crate::StyleError;
use progressview_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Constraints, Event, MouseButton, Padding, Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;

/// Message emitted when a drag commits a new primary value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressChanged {
    /// The new primary value
    pub value: f32,
    /// Always true for messages returned from [`Widget::event`]
    pub from_user: bool,
}

/// Preferred width when the parent leaves it open.
const PREFERRED_WIDTH: f32 = 200.0;

/// Horizontal progress bar with a secondary fill and a draggable thumb.
#[derive(Debug, Default)]
pub struct ProgressBarView {
    model: ProgressModel,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Current layout bounds
    bounds: Rect,
}

impl ProgressBarView {
    /// Create a view with default values and the given style.
    #[must_use]
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            model: ProgressModel::new(style),
            ..Self::default()
        }
    }

    /// Create a view from construction-time attributes.
    pub fn from_attrs(attrs: &ProgressAttrs, defaults: &ProgressStyle) -> Result<Self, StyleError> {
        Ok(Self {
            model: ProgressModel::from_attrs(attrs, defaults)?,
            ..Self::default()
        })
    }

    /// Set padding between the bounds and the drawable content.
    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        let size = self.model.size();
        self.model.resize(size, padding);
        self
    }

    /// Register a listener.
    #[must_use]
    pub fn listener(mut self, listener: impl ProgressListener + 'static) -> Self {
        self.model.set_listener(listener);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// The underlying model.
    #[must_use]
    pub const fn model(&self) -> &ProgressModel {
        &self.model
    }

    /// Mutable access for the runtime setters.
    pub fn model_mut(&mut self) -> &mut ProgressModel {
        &mut self.model
    }

    /// Current padding.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.model.padding()
    }

    fn to_local(&self, position: Point) -> Point {
        position - self.bounds.origin()
    }

    fn pointer(&mut self, action: PointerAction, position: Point) -> Option<Box<dyn Any + Send>> {
        // Only a press on the bar claims the gesture; once claimed, the rest
        // of it is tracked wherever the pointer goes.
        if action == PointerAction::Down && !self.bounds.contains_point(&position) {
            return None;
        }
        let committing = action == PointerAction::Up && self.model.is_dragging();
        let local = self.to_local(position);
        self.model.handle_pointer(action, local);
        if committing {
            return Some(Box::new(ProgressChanged {
                value: self.model.primary_value(),
                from_user: true,
            }));
        }
        None
    }
}

impl Widget for ProgressBarView {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(
            PREFERRED_WIDTH,
            self.model.thumb_radius() + self.model.padding().vertical(),
        );
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        if bounds.size() != self.model.size() {
            self.model.resize(bounds.size(), self.model.padding());
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let style = self.model.style();
        let geometry = self.model.geometry().translate(self.bounds.origin());

        canvas.fill_rect(geometry.bar, style.bar_color);
        canvas.fill_rect(geometry.secondary_fill, style.secondary_color);
        canvas.fill_rect(geometry.primary_fill, style.primary_color);

        let center = geometry.thumb_center();
        let radius = geometry.thumb_circle_radius();
        canvas.stroke_circle(
            center,
            radius,
            style.thumb_border_color,
            style.thumb_border_width,
        );
        canvas.fill_circle(center, radius, style.thumb_fill_color);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match *event {
            Event::PointerDown { position, .. }
            | Event::TouchStart { position, .. }
            | Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.pointer(PointerAction::Down, position),
            Event::PointerMove { position, .. }
            | Event::TouchMove { position, .. }
            | Event::MouseMove { position } => self.pointer(PointerAction::Move, position),
            Event::PointerUp { position, .. }
            | Event::TouchEnd { position, .. }
            | Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => self.pointer(PointerAction::Up, position),
            Event::PointerCancel { .. } | Event::TouchCancel { .. } => {
                self.pointer(PointerAction::Cancel, self.bounds.origin())
            }
            Event::Resize { width, height } => {
                self.bounds = Rect::new(self.bounds.x, self.bounds.y, width, height);
                self.model.resize(Size::new(width, height), self.model.padding());
                None
            }
            Event::MouseDown { .. } | Event::MouseUp { .. } => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{ProgressEvent, RecordingListener};
    use progressview_core::draw::DrawCommand;
    use progressview_core::{Color, PointerId, PointerType, RecordingCanvas, TouchId};

    fn view_at(bounds: Rect) -> ProgressBarView {
        let mut view = ProgressBarView::new(ProgressStyle {
            thumb_radius: 20.0,
            ..ProgressStyle::default()
        });
        view.layout(bounds);
        view
    }

    fn pointer_down(x: f32, y: f32) -> Event {
        Event::PointerDown {
            pointer_id: PointerId::new(1),
            pointer_type: PointerType::Touch,
            position: Point::new(x, y),
        }
    }

    fn pointer_up(x: f32, y: f32) -> Event {
        Event::PointerUp {
            pointer_id: PointerId::new(1),
            pointer_type: PointerType::Touch,
            position: Point::new(x, y),
        }
    }

    // =========================================================================
    // Construction Tests
    // =========================================================================

    #[test]
    fn test_view_builder() {
        let view = ProgressBarView::default()
            .with_padding(Padding::uniform(4.0))
            .with_test_id("seek")
            .with_accessible_name("Playback position")
            .listener(RecordingListener::new());

        assert_eq!(view.padding(), Padding::uniform(4.0));
        assert_eq!(Widget::test_id(&view), Some("seek"));
        assert_eq!(view.accessible_name(), Some("Playback position"));
        assert!(view.model().has_listener());
    }

    #[test]
    fn test_view_from_attrs() {
        let attrs = ProgressAttrs::from_yaml("max_value: 100\nprimary_value: 40\n").unwrap();
        let view = ProgressBarView::from_attrs(&attrs, &ProgressStyle::default()).unwrap();
        assert_eq!(view.model().max_value(), 100.0);
        assert_eq!(view.model().primary_value(), 40.0);
    }

    // =========================================================================
    // Widget Trait Tests
    // =========================================================================

    #[test]
    fn test_view_type_id_and_role() {
        let view = ProgressBarView::default();
        assert_eq!(Widget::type_id(&view), TypeId::of::<ProgressBarView>());
        assert_eq!(view.accessible_role(), AccessibleRole::Slider);
        assert!(view.is_interactive());
    }

    #[test]
    fn test_view_measure() {
        let view = ProgressBarView::new(ProgressStyle {
            thumb_radius: 30.0,
            ..ProgressStyle::default()
        })
        .with_padding(Padding::new(0.0, 5.0, 0.0, 5.0));

        let size = view.measure(Constraints::loose(Size::new(400.0, 100.0)));
        assert_eq!(size, Size::new(200.0, 40.0));

        let size = view.measure(Constraints::tight(Size::new(120.0, 24.0)));
        assert_eq!(size, Size::new(120.0, 24.0));
    }

    #[test]
    fn test_view_layout_reports_size_change() {
        let mut view = ProgressBarView::new(ProgressStyle {
            thumb_radius: 80.0,
            ..ProgressStyle::default()
        });
        let result = view.layout(Rect::new(10.0, 20.0, 300.0, 48.0));
        assert_eq!(result.size, Size::new(300.0, 48.0));
        assert_eq!(Widget::bounds(&view), Rect::new(10.0, 20.0, 300.0, 48.0));
        assert_eq!(view.model().size(), Size::new(300.0, 48.0));
        assert_eq!(view.model().thumb_radius(), 48.0);
    }

    #[test]
    fn test_view_layout_same_size_does_not_invalidate() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        assert!(view.model_mut().take_repaint_request());

        view.layout(Rect::new(50.0, 0.0, 200.0, 40.0));
        assert!(!view.model().needs_repaint());
    }

    #[test]
    fn test_resize_event_updates_model() {
        let mut view = view_at(Rect::new(10.0, 5.0, 200.0, 40.0));

        let msg = view.event(&Event::Resize {
            width: 300.0,
            height: 12.0,
        });

        assert!(msg.is_none());
        assert_eq!(Widget::bounds(&view), Rect::new(10.0, 5.0, 300.0, 12.0));
        assert_eq!(view.model().size(), Size::new(300.0, 12.0));
        assert_eq!(view.model().thumb_radius(), 12.0);
        assert!(view.model().needs_repaint());
    }

    #[test]
    fn test_padding_lives_on_the_model() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        view = view.with_padding(Padding::new(10.0, 0.0, 10.0, 0.0));

        assert_eq!(view.padding(), view.model().padding());
        assert_eq!(view.model().content_left(), 10.0);
        assert_eq!(view.model().content_right(), 190.0);

        view.layout(Rect::new(0.0, 0.0, 200.0, 40.0));
        assert_eq!(view.padding(), Padding::new(10.0, 0.0, 10.0, 0.0));
    }

    // =========================================================================
    // Paint Tests
    // =========================================================================

    #[test]
    fn test_paint_z_order() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        let model = view.model_mut();
        model.set_bar_color(Color::BLACK);
        model.set_secondary_color(Color::BLUE);
        model.set_primary_color(Color::GREEN);
        model.set_thumb_border_color(Color::RED);
        model.set_thumb_fill_color(Color::WHITE);

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);

        let commands = canvas.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0].fill_color(), Some(Color::BLACK));
        assert_eq!(commands[1].fill_color(), Some(Color::BLUE));
        assert_eq!(commands[2].fill_color(), Some(Color::GREEN));
        match &commands[3] {
            DrawCommand::Circle { style, .. } => {
                assert!(style.fill.is_none());
                assert_eq!(style.stroke.map(|s| s.color), Some(Color::RED));
            }
            DrawCommand::Rect { .. } => panic!("Expected thumb border circle"),
        }
        assert_eq!(commands[4].fill_color(), Some(Color::WHITE));
    }

    #[test]
    fn test_paint_offsets_by_layout_origin() {
        let mut view = view_at(Rect::new(50.0, 100.0, 200.0, 40.0));
        view.model_mut().set_primary_value(0.5);

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);

        match &canvas.commands()[0] {
            DrawCommand::Rect { bounds, .. } => {
                assert_eq!(bounds.x, 50.0);
                assert_eq!(bounds.width, 200.0);
                assert_eq!(bounds.y, 116.0); // 100 + 20 - 4
                assert_eq!(bounds.height, 8.0);
            }
            DrawCommand::Circle { .. } => panic!("Expected Rect command for bar"),
        }
        match &canvas.commands()[4] {
            DrawCommand::Circle { center, radius, .. } => {
                assert_eq!(*center, Point::new(150.0, 120.0));
                assert_eq!(*radius, 10.0);
            }
            DrawCommand::Rect { .. } => panic!("Expected Circle command for thumb"),
        }
    }

    #[test]
    fn test_paint_does_not_mutate() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        view.model_mut().take_repaint_request();

        let mut canvas = RecordingCanvas::new();
        view.paint(&mut canvas);
        view.paint(&mut canvas);

        assert!(!view.model().needs_repaint());
        assert_eq!(canvas.command_count(), 10);
        assert_eq!(canvas.commands()[..5], canvas.commands()[5..]);
    }

    // =========================================================================
    // Event Handling Tests
    // =========================================================================

    #[test]
    fn test_pointer_gesture_emits_progress_changed() {
        let mut view = view_at(Rect::new(100.0, 0.0, 200.0, 40.0));
        view.model_mut().set_max_value(100.0);

        assert!(view.event(&pointer_down(150.0, 20.0)).is_none());
        assert!(view.model().is_dragging());

        let msg = view
            .event(&pointer_up(250.0, 20.0))
            .expect("release commits a value")
            .downcast::<ProgressChanged>()
            .expect("ProgressChanged message");
        assert_eq!(
            *msg,
            ProgressChanged {
                value: 75.0,
                from_user: true
            }
        );
        assert_eq!(view.model().primary_value(), 75.0);
    }

    #[test]
    fn test_touch_events_drive_the_model() {
        let recorder = RecordingListener::new();
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0)).listener(recorder.clone());

        view.event(&Event::TouchStart {
            id: TouchId::new(3),
            position: Point::new(20.0, 20.0),
            pressure: 1.0,
        });
        view.event(&Event::TouchMove {
            id: TouchId::new(3),
            position: Point::new(60.0, 20.0),
            pressure: 1.0,
        });
        view.event(&Event::TouchEnd {
            id: TouchId::new(3),
            position: Point::new(100.0, 20.0),
        });

        assert_eq!(
            recorder.events(),
            vec![
                ProgressEvent::TouchStart,
                ProgressEvent::ProgressChanged {
                    progress: 0.5,
                    from_user: true
                },
                ProgressEvent::TouchEnd,
            ]
        );
    }

    #[test]
    fn test_touch_cancel_keeps_value() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        view.model_mut().set_primary_value(0.25);

        view.event(&pointer_down(190.0, 20.0));
        let msg = view.event(&Event::TouchCancel { id: TouchId::new(1) });

        assert!(msg.is_none());
        assert!(!view.model().is_dragging());
        assert_eq!(view.model().primary_value(), 0.25);
    }

    #[test]
    fn test_mouse_left_button_drag() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));

        view.event(&Event::MouseDown {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        view.event(&Event::MouseMove {
            position: Point::new(150.0, 10.0),
        });
        assert_eq!(view.model().thumb_center_x(), 150.0);

        let msg = view.event(&Event::MouseUp {
            position: Point::new(150.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(msg.is_some());
        assert_eq!(view.model().primary_value(), 0.75);
    }

    #[test]
    fn test_right_button_is_ignored() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        view.event(&Event::MouseDown {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Right,
        });
        assert!(!view.model().is_dragging());
    }

    #[test]
    fn test_release_without_press_emits_nothing() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));
        assert!(view.event(&pointer_up(100.0, 20.0)).is_none());
        assert_eq!(view.model().primary_value(), 0.0);
    }

    #[test]
    fn test_press_outside_bounds_is_ignored() {
        let recorder = RecordingListener::new();
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0)).listener(recorder.clone());
        view.model_mut().set_primary_value(0.3);
        recorder.clear();

        assert!(view.event(&pointer_down(600.0, 400.0)).is_none());
        assert!(!view.model().is_dragging());
        assert!(view.event(&pointer_up(600.0, 400.0)).is_none());

        assert_eq!(view.model().primary_value(), 0.3);
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_press_outside_offset_bounds_is_ignored() {
        let mut view = view_at(Rect::new(100.0, 100.0, 200.0, 40.0));
        view.event(&Event::MouseDown {
            position: Point::new(50.0, 120.0),
            button: MouseButton::Left,
        });
        assert!(!view.model().is_dragging());
    }

    #[test]
    fn test_claimed_drag_tracks_outside_bounds() {
        let mut view = view_at(Rect::new(0.0, 0.0, 200.0, 40.0));

        view.event(&pointer_down(100.0, 20.0));
        let msg = view
            .event(&pointer_up(600.0, 400.0))
            .expect("release commits a value")
            .downcast::<ProgressChanged>()
            .expect("ProgressChanged message");

        assert_eq!(msg.value, 1.0);
        assert!(!view.model().is_dragging());
    }
}
