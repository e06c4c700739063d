//! GridVisitor - decides, per quadtree node, which grid lines to draw.
//!
//! Lines live on node edges. A node draws the leading edge of an axis when
//! that edge falls on a multiple of the axis step; the crossed flags handed
//! down the tree keep the same boundary from being drawn again by the
//! children that share it.

use glam::{DVec2, DVec3};

use crate::config::LinesConfig;
use crate::grid::{Frame, GridDefinition, LabelFormat};
use crate::intersect::check_borders;
use crate::label::{place_label, LabelStyle};
use crate::painter::Painter;
use crate::qtree::{Emit, Emitted, QuadNode, QuadVisitor, Visit};
use crate::steps::StepPair;

/// Quadtree visitor drawing one grid.
pub struct GridVisitor<'a> {
  pub painter: Painter<'a>,
  steps: StepPair,
  frame: Frame,
  label_format: Option<LabelFormat>,
  is_full_grid: bool,
  subdivisions: usize,
  label_style: LabelStyle,
  /// Line strips stroked so far.
  pub segments: usize,
  /// Labels drawn so far.
  pub labels: usize,
}

impl<'a> GridVisitor<'a> {
  pub fn new(
    painter: Painter<'a>,
    def: &GridDefinition,
    steps: StepPair,
    config: &LinesConfig,
  ) -> Self {
    let label_style = LabelStyle::new(config, painter.color);
    Self {
      painter,
      steps,
      frame: def.frame,
      label_format: def.label_format,
      is_full_grid: def.is_full_grid,
      subdivisions: config.line_subdivisions,
      label_style,
      segments: 0,
      labels: 0,
    }
  }

  #[inline]
  pub fn steps(&self) -> StepPair {
    self.steps
  }

  /// Whether the leading edge of `axis` sits on a step boundary.
  ///
  /// The edge lies at `xy / divisions` of the axis span. Axis 0 spans the
  /// full circle and has `n` boundaries, axis 1 spans half a circle and has
  /// `n / 2`, so the edge is a grid line when `xy * n` is a multiple of
  /// `divisions` (twice that on axis 1). Testing the cell position rather
  /// than the depth keeps nodes that were widened past the step on one axis
  /// from drawing lines between two step boundaries.
  pub fn axis_visible(&self, node: &QuadNode, axis: usize) -> bool {
    let step = self.steps.axis(axis);
    let span = if axis == 0 { 1 } else { 2 };
    node.level >= step.level
      && (node.xy[axis] as u64 * step.n as u64) % (span * node.divisions[axis] as u64) == 0
  }
}

impl QuadVisitor for GridVisitor<'_> {
  fn root_split(&mut self, node: &QuadNode) -> [u32; 2] {
    // The latitude axis spans half a circle, so it skips the leading 2.
    let split = [
      self.steps.axis(0).split(node.level),
      self.steps.axis(1).split(node.level + 1),
    ];
    if split == [1, 1] {
      [2, 2]
    } else {
      split
    }
  }

  fn after_visibility(&mut self, node: &QuadNode) -> Visit {
    if node.level < self.steps.min_level() || node.level < 2 {
      Visit::Subdivide
    } else {
      Visit::Render
    }
  }

  fn emit(&mut self, node: &QuadNode, uv: &[DVec2; 4], pos: &[DVec3; 4]) -> Emitted {
    let mut crossed = node.crossed;
    let axes = if self.is_full_grid { 2 } else { 1 };

    for axis in 0..axes {
      if crossed[axis] || !self.axis_visible(node, axis) {
        continue;
      }
      crossed[axis] = true;

      // Axis 0: left edge (meridian). Axis 1: top edge (parallel).
      let end = 2 - axis;
      self.segments += self
        .painter
        .paint_lines(self.frame, &[[uv[0], uv[end]]], self.subdivisions);

      let Some(format) = self.label_format else {
        continue;
      };
      let Some(crossing) = check_borders(self.painter.projection, pos[0], pos[end]) else {
        continue;
      };
      let placed = place_label(
        &crossing,
        uv[0],
        axis,
        format,
        self.steps.axis(axis).n,
        &mut *self.painter.canvas,
        &self.label_style,
      );
      if placed.is_some() {
        self.labels += 1;
      }
    }

    Emitted {
      crossed,
      next: if node.level >= self.steps.max_level() {
        Emit::Stop
      } else {
        Emit::Subdivide
      },
    }
  }
}

#[cfg(test)]
#[path = "visitor_test.rs"]
mod visitor_test;
