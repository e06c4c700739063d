//! Render celestial coordinate grids to an SVG file.
//!
//! Usage:
//!   render_grid_svg --config grids.toml --output grids.svg
//!
//! Set `RUST_LOG=sky_grid=debug` for per-frame render statistics.

mod config;
mod svg;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sky_grid::{
  Lines, PerspectiveProjection, Projection, RecordingCanvas, RenderContext, StereographicProjection,
};
use tracing_subscriber::EnvFilter;

use config::{ProjectionKind, RenderConfig};

#[derive(Parser, Debug)]
#[command(name = "render_grid_svg")]
#[command(about = "Render celestial coordinate grids with border labels to SVG")]
struct Args {
  /// Path to the TOML render configuration
  #[arg(short, long)]
  config: PathBuf,

  /// Output SVG path
  #[arg(short, long, default_value = "grids.svg")]
  output: PathBuf,

  /// Override the configured field of view, in degrees
  #[arg(long)]
  fov: Option<f64>,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
  init_tracing();
  let args = Args::parse();

  let mut config = RenderConfig::load(&args.config)?;
  if let Some(fov) = args.fov {
    config.fov_deg = fov;
    config
      .validate()
      .with_context(|| format!("Invalid --fov {}", fov))?;
  }
  tracing::info!(
    config = %args.config.display(),
    projection = ?config.projection,
    fov_deg = config.fov_deg,
    grids = ?config.grids,
    "Loaded render config"
  );

  let window = config.window_size();
  let fov = config.fov();
  let projection: Box<dyn Projection> = match config.projection {
    ProjectionKind::Stereographic => Box::new(StereographicProjection::new(fov, window)),
    ProjectionKind::Perspective => Box::new(PerspectiveProjection::new(fov, window)),
  };
  let observer = config.observer();
  let ctx = RenderContext {
    projection: projection.as_ref(),
    frames: &observer,
    fov,
  };

  let lines_config = config.lines_config();
  let mut lines = Lines::new(lines_config);
  for id in &config.grids {
    lines.set_visible(id, true);
  }
  // One full fade brings every selected grid to full opacity.
  lines.update(lines_config.fade_duration);

  let mut canvas = RecordingCanvas::new();
  let stats = lines.render(&ctx, &mut canvas).context("Grid rendering failed")?;
  tracing::info!(
    segments = stats.segments,
    labels = stats.labels,
    nodes = stats.traversal.nodes_visited,
    peak_nodes = stats.traversal.peak_nodes,
    "Rendered grids"
  );

  let document = svg::to_svg(&canvas.commands, window, config.background.as_deref())
    .context("Failed to format SVG")?;
  std::fs::write(&args.output, document)
    .with_context(|| format!("Failed to write SVG: {}", args.output.display()))?;
  tracing::info!(output = %args.output.display(), "Done");

  Ok(())
}
