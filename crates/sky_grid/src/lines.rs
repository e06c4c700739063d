//! Lines - the grid container driven once per frame.
//!
//! ```text
//! Lines::update(dt)      fade every grid toward its visibility target
//! Lines::render(ctx, ..) for each visible grid:
//!                          select steps -> traverse quadtree -> paint + label
//! ```

use std::f64::consts::FRAC_PI_2;

use glam::DMat3;
use web_time::Instant;

use crate::config::LinesConfig;
use crate::error::TraversalError;
use crate::fader::Fader;
use crate::frames::FrameConverter;
use crate::grid::{GridDefinition, GridTransform, Rgba, GRID_DEFINITIONS};
use crate::metrics::LinesMetrics;
use crate::painter::{Canvas, Painter, SPHERE_UV};
use crate::projection::Projection;
use crate::qtree::{traverse_surface, NodeArena, TraversalStats};
use crate::steps::{select_steps, theta_range, StepPair};
use crate::visitor::GridVisitor;

/// Per-frame collaborators shared by every grid.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
  pub projection: &'a dyn Projection,
  pub frames: &'a dyn FrameConverter,
  /// Horizontal field of view, radians.
  pub fov: f64,
}

/// What one render call produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
  pub traversal: TraversalStats,
  /// Line strips stroked.
  pub segments: usize,
  /// Border labels drawn.
  pub labels: usize,
}

impl RenderStats {
  pub fn merge(&mut self, other: &RenderStats) {
    self.traversal.merge(&other.traversal);
    self.segments += other.segments;
    self.labels += other.labels;
  }
}

/// One grid and its fade state.
#[derive(Clone, Debug)]
pub struct GridLine {
  pub def: &'static GridDefinition,
  pub visible: Fader,
  pub color: Rgba,
}

impl GridLine {
  /// Hidden grid for `def`.
  pub fn new(def: &'static GridDefinition, config: &LinesConfig) -> Self {
    Self {
      def,
      visible: Fader::new(false, config.fade_duration),
      color: Rgba::from_hex(def.color),
    }
  }

  #[inline]
  pub fn id(&self) -> &'static str {
    self.def.id
  }

  /// Advance the fade. Returns true if anything changed.
  pub fn update(&mut self, dt: f64) -> bool {
    self.visible.update(dt)
  }

  /// Rotation from grid coordinates into the grid's frame.
  pub fn transform(&self, frames: &dyn FrameConverter) -> DMat3 {
    match self.def.transform {
      GridTransform::Identity => DMat3::IDENTITY,
      GridTransform::Ecliptic => frames.ecliptic_to_observed() * DMat3::from_rotation_x(FRAC_PI_2),
    }
  }

  /// Steps for the current view.
  pub fn steps(&self, ctx: &RenderContext) -> StepPair {
    match self.def.label_format {
      Some(format) => {
        let range = theta_range(ctx.projection, ctx.frames, self.def.frame);
        select_steps(ctx.fov, format, range)
      }
      None => StepPair::single_line(),
    }
  }

  /// Draw the grid. A fully faded-out grid draws nothing.
  pub fn render(
    &self,
    ctx: &RenderContext,
    canvas: &mut dyn Canvas,
    arena: &mut NodeArena,
    config: &LinesConfig,
  ) -> Result<RenderStats, TraversalError> {
    let fade = self.visible.value();
    if fade == 0.0 {
      return Ok(RenderStats::default());
    }
    let _span = tracing::info_span!("grid_render", grid = self.def.id).entered();

    let steps = self.steps(ctx);
    let painter = Painter {
      projection: ctx.projection,
      frames: ctx.frames,
      canvas,
      color: self.color.with_alpha(self.color.a * fade),
      transform: self.transform(ctx.frames),
    };
    let mut visitor = GridVisitor::new(painter, self.def, steps, config);
    let surface = visitor.painter.surface(self.def.frame);
    let traversal = traverse_surface(arena, &SPHERE_UV, &surface, ctx.projection, &mut visitor)?;

    Ok(RenderStats {
      traversal,
      segments: visitor.segments,
      labels: visitor.labels,
    })
  }
}

/// All compiled-in grids.
pub struct Lines {
  lines: Vec<GridLine>,
  config: LinesConfig,
  arena: NodeArena,
  metrics: LinesMetrics,
}

impl Lines {
  /// One hidden [`GridLine`] per entry of [`GRID_DEFINITIONS`].
  pub fn new(config: LinesConfig) -> Self {
    let lines = GRID_DEFINITIONS
      .iter()
      .map(|def| GridLine::new(def, &config))
      .collect();
    Self {
      lines,
      arena: NodeArena::from_config(&config),
      config,
      metrics: LinesMetrics::new(),
    }
  }

  #[inline]
  pub fn config(&self) -> &LinesConfig {
    &self.config
  }

  #[inline]
  pub fn metrics(&self) -> &LinesMetrics {
    &self.metrics
  }

  pub fn iter(&self) -> impl Iterator<Item = &GridLine> {
    self.lines.iter()
  }

  pub fn get(&self, id: &str) -> Option<&GridLine> {
    self.lines.iter().find(|line| line.id() == id)
  }

  pub fn get_mut(&mut self, id: &str) -> Option<&mut GridLine> {
    self.lines.iter_mut().find(|line| line.id() == id)
  }

  /// Set a grid's visibility target. Returns false for an unknown id.
  pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
    match self.get_mut(id) {
      Some(line) => {
        line.visible.target = visible;
        true
      }
      None => {
        tracing::warn!(id, "unknown grid id");
        false
      }
    }
  }

  /// Visibility target of a grid; false for an unknown id.
  pub fn is_visible(&self, id: &str) -> bool {
    self.get(id).is_some_and(|line| line.visible.target)
  }

  /// Advance every fade. Returns true if any grid changed.
  pub fn update(&mut self, dt: f64) -> bool {
    self
      .lines
      .iter_mut()
      .fold(false, |changed, line| line.update(dt) | changed)
  }

  /// Render every visible grid, in definition order.
  pub fn render(
    &mut self,
    ctx: &RenderContext,
    canvas: &mut dyn Canvas,
  ) -> Result<RenderStats, TraversalError> {
    let _span = tracing::info_span!("lines_render").entered();
    let start = Instant::now();
    self.metrics.begin_frame();

    let mut total = RenderStats::default();
    for (index, line) in self.lines.iter().enumerate() {
      let stats = line
        .render(ctx, &mut *canvas, &mut self.arena, &self.config)
        .inspect_err(|err| tracing::warn!(grid = line.id(), %err, "grid traversal aborted"))?;
      self
        .metrics
        .record_grid(index, stats.segments, stats.labels, &stats.traversal);
      total.merge(&stats);
    }

    self
      .metrics
      .record_render_timing(start.elapsed().as_micros() as u64);
    tracing::debug!(
      segments = total.segments,
      labels = total.labels,
      nodes = total.traversal.nodes_visited,
      "grids rendered"
    );
    Ok(total)
  }
}

impl Default for Lines {
  fn default() -> Self {
    Self::new(LinesConfig::DEFAULT)
  }
}

#[cfg(test)]
#[path = "lines_test.rs"]
mod lines_test;
