//! Depth-first surface traversal.
//!
//! Each node goes through the visitor phases in order:
//!
//! ```text
//! root_split -> (cone test) -> after_visibility -> emit -> children
//! ```
//!
//! The root always subdivides and is never culled. Every other node is first
//! tested against the view cone; a culled node is dropped together with its
//! whole subtree.

use std::f64::consts::FRAC_PI_2;

use glam::{DVec2, DVec3};

use super::{Emit, NodeArena, QuadNode, QuadVisitor, SurfaceMap, TraversalStats, Visit};
use crate::error::TraversalError;
use crate::projection::Projection;

/// Node bounding caps are grown by this factor; edges bulge between the
/// sampled points.
const CAP_MARGIN: f64 = 1.1;

/// Cone around the view axis (-Z) containing the whole viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCone {
  /// Half angle, radians.
  pub radius: f64,
}

impl ViewCone {
  /// Smallest cone around -Z through the viewport corners and edge midpoints.
  pub fn from_projection(projection: &dyn Projection) -> Self {
    let mut radius: f64 = 0.0;
    for y in [-1.0, 0.0, 1.0] {
      for x in [-1.0, 0.0, 1.0] {
        let dir = projection.backward(DVec2::new(x, y));
        radius = radius.max(dir.angle_between(DVec3::NEG_Z));
      }
    }
    Self { radius }
  }

  /// Whether a spherical cap can overlap the cone.
  #[inline]
  pub fn intersects_cap(&self, center: DVec3, cap_radius: f64) -> bool {
    cap_radius >= FRAC_PI_2 || center.angle_between(DVec3::NEG_Z) <= cap_radius + self.radius
  }
}

/// Bounding cap of a node: center direction and angular radius.
fn bounding_cap(surface: &dyn SurfaceMap, uv: &[DVec2; 4], pos: &[DVec3; 4]) -> (DVec3, f64) {
  let mid = (uv[0] + uv[1] + uv[2] + uv[3]) / 4.0;
  let center = surface.map(mid).normalize_or_zero();
  let edges = [
    uv[0].lerp(uv[1], 0.5),
    uv[1].lerp(uv[3], 0.5),
    uv[3].lerp(uv[2], 0.5),
    uv[2].lerp(uv[0], 0.5),
  ];
  let radius = pos
    .iter()
    .copied()
    .chain(edges.iter().map(|&e| surface.map(e)))
    .map(|p| center.angle_between(p))
    .fold(0.0, f64::max);
  (center, radius * CAP_MARGIN)
}

/// Walk the patch spanned by `root_uv`, driving `visitor` through every
/// node that can reach the viewport.
///
/// `root_uv` lists the patch corners as `[origin, +axis0, +axis1, +both]`.
/// The arena bounds the number of pending nodes; exceeding it aborts the
/// walk with [`TraversalError::CapacityExceeded`].
pub fn traverse_surface(
  arena: &mut NodeArena,
  root_uv: &[DVec2; 4],
  surface: &dyn SurfaceMap,
  projection: &dyn Projection,
  visitor: &mut dyn QuadVisitor,
) -> Result<TraversalStats, TraversalError> {
  let _span = tracing::info_span!("traverse_surface").entered();

  let cone = ViewCone::from_projection(projection);
  let mut stats = TraversalStats::default();

  arena.clear();
  arena.push(QuadNode::ROOT)?;

  while let Some(mut node) = arena.pop() {
    stats.nodes_visited += 1;

    let split = visitor.root_split(&node);
    let uv = node.corners(root_uv);
    let pos = uv.map(|p| surface.map(p));

    let subdivide = if node.level == 0 {
      true
    } else {
      let (center, radius) = bounding_cap(surface, &uv, &pos);
      if !cone.intersects_cap(center, radius) {
        stats.nodes_culled += 1;
        continue;
      }
      match visitor.after_visibility(&node) {
        Visit::Subdivide => true,
        Visit::Render => {
          stats.nodes_rendered += 1;
          let emitted = visitor.emit(&node, &uv, &pos);
          node.crossed = emitted.crossed;
          emitted.next == Emit::Subdivide
        }
      }
    };

    if !subdivide {
      continue;
    }
    // Reverse order so children pop with axis 0 varying fastest.
    for child in node.children(split).into_iter().rev() {
      arena.push(child)?;
    }
  }

  stats.peak_nodes = arena.peak();
  tracing::trace!(
    visited = stats.nodes_visited,
    culled = stats.nodes_culled,
    rendered = stats.nodes_rendered,
    peak = stats.peak_nodes,
    "traversal done"
  );
  Ok(stats)
}

#[cfg(test)]
#[path = "traverse_test.rs"]
mod traverse_test;
