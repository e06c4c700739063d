//! Segment / viewport intersection for border labels.

use glam::{DVec2, DVec3};

use crate::projection::Projection;

/// Viewport border, in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Border {
  /// x = -1
  Left,
  /// x = +1
  Right,
  /// y = -1
  Bottom,
  /// y = +1
  Top,
}

impl Border {
  /// Inward unit normal in window coordinates (y down).
  #[inline]
  pub fn inward_normal(self) -> DVec2 {
    match self {
      Border::Left => DVec2::new(1.0, 0.0),
      Border::Right => DVec2::new(-1.0, 0.0),
      Border::Bottom => DVec2::new(0.0, -1.0),
      Border::Top => DVec2::new(0.0, 1.0),
    }
  }
}

/// Where an on-screen segment leaves (or enters) the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderCrossing {
  /// Crossing point, window pixels.
  pub point: DVec2,
  /// Segment direction in window pixels (end minus start).
  pub direction: DVec2,
  /// Inward normal of the crossed border.
  pub normal: DVec2,
  pub border: Border,
  /// Crossing parameter along the segment, in [0, 1].
  pub t: f64,
}

/// Slab-axis entry/exit parameters, `(t_low_plane, t_high_plane)`.
///
/// An endpoint lying exactly on a plane maps to the sentinel instead of a
/// computed value so no infinities leak into the comparison below. A segment
/// parallel to the slab is unbounded inside it and misses it entirely
/// outside, which returns None.
fn slab(a: f64, b: f64) -> Option<(f64, f64)> {
  if a == b {
    return (a.abs() <= 1.0).then_some((f64::MIN, f64::MAX));
  }
  let inv = 1.0 / (b - a);
  let t1 = if a == -1.0 { f64::MIN } else { (-1.0 - a) * inv };
  let t2 = if a == 1.0 { f64::MAX } else { (1.0 - a) * inv };
  Some((t1, t2))
}

/// Intersect segment `a -> b` with the `[-1, 1]²` box.
///
/// Returns the first boundary parameter in `[0, 1]` (exit when `a` is
/// inside, entry otherwise) and the border it lies on.
pub fn seg_intersect(a: DVec2, b: DVec2) -> Option<(f64, Border)> {
  let (tx1, tx2) = slab(a.x, b.x)?;
  let (ty1, ty2) = slab(a.y, b.y)?;
  let (txmin, txmax) = (tx1.min(tx2), tx1.max(tx2));
  let (tymin, tymax) = (ty1.min(ty2), ty1.max(ty2));

  if !(tymin <= txmax && txmin <= tymax) {
    return None;
  }
  let vmin = txmin.max(tymin);
  let vmax = txmax.min(tymax);
  if !(0.0 <= vmax && vmin <= 1.0) {
    return None;
  }
  let t = if vmin >= 0.0 { vmin } else { vmax };
  if !(0.0..=1.0).contains(&t) {
    return None;
  }

  let border = if t == tx1 {
    Border::Left
  } else if t == tx2 {
    Border::Right
  } else if t == ty1 {
    Border::Bottom
  } else {
    Border::Top
  };
  Some((t, border))
}

/// Check whether the segment between two view-space points crosses the
/// viewport border.
///
/// Only segments with exactly one visible endpoint cross; both endpoints must
/// be in front of the projection.
pub fn check_borders(projection: &dyn Projection, a: DVec3, b: DVec3) -> Option<BorderCrossing> {
  let pa = projection.to_ndc(a);
  let pb = projection.to_ndc(b);
  if pa.visible == pb.visible || !pa.front || !pb.front {
    return None;
  }
  let (t, border) = seg_intersect(pa.ndc, pb.ndc)?;
  let point = projection.ndc_to_window(pa.ndc.lerp(pb.ndc, t));
  let direction = projection.ndc_to_window(pb.ndc) - projection.ndc_to_window(pa.ndc);
  Some(BorderCrossing {
    point,
    direction,
    normal: border.inward_normal(),
    border,
    t,
  })
}

#[cfg(test)]
#[path = "intersect_test.rs"]
mod intersect_test;
