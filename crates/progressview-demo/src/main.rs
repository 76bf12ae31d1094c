//! Progressview demo: lays out one progress bar, drives it like the sample
//! screen does, and prints the resulting frame.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::Parser;
use progressview_core::{
    DrawCommand, Event, Padding, PointerId, PointerType, Point, Rect, RecordingCanvas, Widget,
};
use progressview_widgets::{
    ProgressAttrs, ProgressBarView, ProgressChanged, ProgressListener, ProgressModel,
    ProgressStyle,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "progressview-demo")]
#[command(about = "Drive a progress bar through a scripted session")]
#[command(version)]
struct Cli {
    /// YAML attribute file for the bar
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of simulated button presses, each setting a random progress
    #[arg(short, long, default_value = "1")]
    presses: u32,

    /// Bar width in pixels
    #[arg(long, default_value = "432")]
    width: f32,

    /// Bar height in pixels
    #[arg(long, default_value = "48")]
    height: f32,

    /// Uniform padding in pixels
    #[arg(long, default_value = "16")]
    padding: f32,

    /// Release a drag from the thumb at this x coordinate
    #[arg(long)]
    drag_to: Option<f32>,

    /// Print draw commands as JSON
    #[arg(long)]
    json: bool,
}

/// Listener that reports every notification through `tracing`.
struct LoggingListener;

impl ProgressListener for LoggingListener {
    fn on_progress_changed(&mut self, _model: &ProgressModel, progress: f32, from_user: bool) {
        tracing::info!(progress, from_user, "progress changed");
    }

    fn on_touch_start(&mut self, model: &ProgressModel) {
        tracing::info!(progress = model.primary_value(), "touch start");
    }

    fn on_touch_end(&mut self, model: &ProgressModel) {
        tracing::info!(progress = model.primary_value(), "touch end");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let attrs = match &cli.config {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ProgressAttrs::from_yaml(&yaml)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => ProgressAttrs::default(),
    };

    let mut view = ProgressBarView::from_attrs(&attrs, &ProgressStyle::default())?
        .with_padding(Padding::uniform(cli.padding))
        .listener(LoggingListener)
        .with_test_id("progress");
    view.layout(Rect::new(0.0, 0.0, cli.width, cli.height));

    let model = view.model_mut();
    model.set_min_value(0.0);
    model.set_max_value(100.0);
    model.set_primary_value(30.0);
    model.set_secondary_value(60.0);

    for _ in 0..cli.presses {
        let value = random_progress()?;
        tracing::debug!(value, "button pressed");
        view.model_mut().set_primary_value(value);
    }

    if let Some(target) = cli.drag_to {
        if let Some(changed) = drag(&mut view, target) {
            tracing::info!(value = changed.value, "drag committed");
        }
    }

    let mut canvas = RecordingCanvas::new();
    view.paint(&mut canvas);
    let commands = canvas.take_commands();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&commands)?);
    } else {
        let model = view.model();
        println!(
            "primary {:.2} / secondary {:.2} in [{}, {}]",
            model.primary_value(),
            model.secondary_value(),
            model.min_value(),
            model.max_value()
        );
        for command in &commands {
            println!("  {}", describe(command));
        }
    }

    Ok(())
}

/// Uniform value in `1..=100`, like the sample's "set progress" button.
fn random_progress() -> Result<f32> {
    let mut bytes = [0u8; 4];
    getrandom::getrandom(&mut bytes).context("Failed to read random bytes")?;
    Ok((u32::from_le_bytes(bytes) % 100 + 1) as f32)
}

/// Intermediate moves between press and release.
const DRAG_STEPS: u32 = 4;

/// Press on the thumb, move to `target` in a few steps, then release.
fn drag(view: &mut ProgressBarView, target: f32) -> Option<ProgressChanged> {
    let start = view.model().geometry().thumb_center();
    let pointer = |x: f32| Point::new(x, start.y);
    let pointer_id = PointerId(1);
    let pointer_type = PointerType::Touch;

    view.event(&Event::PointerDown {
        pointer_id,
        pointer_type,
        position: pointer(start.x),
    });

    for step in 1..=DRAG_STEPS {
        let x = start.x + (target - start.x) * step as f32 / DRAG_STEPS as f32;
        view.event(&Event::PointerMove {
            pointer_id,
            pointer_type,
            position: pointer(x),
        });
    }

    view.event(&Event::PointerUp {
        pointer_id,
        pointer_type,
        position: pointer(target),
    })
    .and_then(|message| message.downcast::<ProgressChanged>().ok())
    .map(|changed| *changed)
}

fn describe(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Rect { bounds, .. } => format!(
            "rect   x {:7.2}..{:7.2}  y {:6.2}..{:6.2}",
            bounds.x,
            bounds.right(),
            bounds.y,
            bounds.bottom()
        ),
        DrawCommand::Circle { center, radius, .. } => format!(
            "circle center ({:7.2}, {:6.2})  radius {:5.2}",
            center.x, center.y, radius
        ),
    }
}
