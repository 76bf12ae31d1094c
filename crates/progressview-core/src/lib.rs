//! Core types and traits for the progressview widget toolkit.
//!
//! This crate provides the host-side vocabulary widgets are written against:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Padding`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`]
//! - Rendering: [`Widget`], [`Canvas`], [`DrawCommand`], [`RecordingCanvas`]

mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, MouseButton, PointerId, PointerType, TouchId};
pub use geometry::{Padding, Point, Rect, Size};
pub use widget::{AccessibleRole, Canvas, LayoutResult, TypeId, Widget};
