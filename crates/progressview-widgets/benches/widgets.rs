//! Benchmark tests for progress bar operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use progressview_core::{Padding, Point, RecordingCanvas, Size, Widget};
use progressview_widgets::{PointerAction, ProgressBarView, ProgressModel, ProgressStyle};

fn laid_out_model() -> ProgressModel {
    let mut model = ProgressModel::new(ProgressStyle::default());
    model.resize(Size::new(400.0, 48.0), Padding::uniform(8.0));
    model.set_max_value(100.0);
    model.set_primary_value(30.0);
    model.set_secondary_value(60.0);
    model
}

fn bench_geometry(c: &mut Criterion) {
    let model = laid_out_model();

    c.bench_function("progress_geometry", |b| {
        b.iter(|| black_box(&model).geometry())
    });
}

fn bench_drag_gesture(c: &mut Criterion) {
    let mut model = laid_out_model();

    c.bench_function("progress_drag_gesture", |b| {
        b.iter(|| {
            model.handle_pointer(PointerAction::Down, black_box(Point::new(50.0, 24.0)));
            for x in [80.0, 120.0, 200.0, 260.0] {
                model.handle_pointer(PointerAction::Move, Point::new(x, 24.0));
            }
            model.handle_pointer(PointerAction::Up, Point::new(300.0, 24.0));
        })
    });
}

fn bench_paint(c: &mut Criterion) {
    let mut view = ProgressBarView::new(ProgressStyle::default());
    view.layout(progressview_core::Rect::new(0.0, 0.0, 400.0, 48.0));
    let mut canvas = RecordingCanvas::new();

    c.bench_function("progress_paint", |b| {
        b.iter(|| {
            canvas.clear();
            view.paint(black_box(&mut canvas));
        })
    });
}

criterion_group!(benches, bench_geometry, bench_drag_gesture, bench_paint);
criterion_main!(benches);
