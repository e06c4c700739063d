//! Projection of view-space directions onto the viewport.
//!
//! View space looks down -Z with +X right and +Y up. Normalized device
//! coordinates cover `[-1, 1]²`; window pixels have their origin top-left
//! with y growing downward.

use glam::{DVec2, DVec3};

/// A view-space direction projected to normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
  pub ndc: DVec2,
  /// Inside the viewport.
  pub visible: bool,
  /// Away from the projection's singularity; `ndc` is meaningful.
  pub front: bool,
}

/// Projection service consumed by the grid renderer.
pub trait Projection {
  /// Window size in pixels.
  fn window_size(&self) -> DVec2;

  /// Project a view-space direction.
  fn to_ndc(&self, v: DVec3) -> Projected;

  /// Unproject normalized device coordinates to a unit view-space direction.
  fn backward(&self, ndc: DVec2) -> DVec3;

  /// Normalized device coordinates to window pixels.
  #[inline]
  fn ndc_to_window(&self, ndc: DVec2) -> DVec2 {
    let size = self.window_size();
    DVec2::new((ndc.x + 1.0) / 2.0 * size.x, (-ndc.y + 1.0) / 2.0 * size.y)
  }
}

/// Viewport scale for a horizontal field of view.
fn aspect_scale(half_width: f64, window_size: DVec2) -> DVec2 {
  DVec2::new(half_width, half_width * window_size.y / window_size.x)
}

#[inline]
fn inside_viewport(ndc: DVec2) -> bool {
  ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0
}

/// Stereographic projection: conformal, shows more than a hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StereographicProjection {
  /// Horizontal field of view, radians.
  pub fov: f64,
  window_size: DVec2,
  scale: DVec2,
}

impl StereographicProjection {
  pub fn new(fov: f64, window_size: DVec2) -> Self {
    Self {
      fov,
      window_size,
      scale: aspect_scale(2.0 * (fov / 4.0).tan(), window_size),
    }
  }
}

impl Projection for StereographicProjection {
  fn window_size(&self) -> DVec2 {
    self.window_size
  }

  fn to_ndc(&self, v: DVec3) -> Projected {
    let v = v.normalize_or_zero();
    let one_plus = 1.0 - v.z;
    if one_plus <= 1e-12 {
      return Projected {
        ndc: DVec2::splat(f64::MAX),
        visible: false,
        front: false,
      };
    }
    let ndc = DVec2::new(v.x, v.y) * (2.0 / one_plus) / self.scale;
    Projected {
      ndc,
      visible: inside_viewport(ndc),
      front: true,
    }
  }

  fn backward(&self, ndc: DVec2) -> DVec3 {
    let p = ndc * self.scale;
    let r2 = p.length_squared();
    DVec3::new(4.0 * p.x, 4.0 * p.y, -(4.0 - r2)) / (4.0 + r2)
  }
}

/// Rectilinear (pinhole) projection, limited to the front hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveProjection {
  /// Horizontal field of view, radians.
  pub fov: f64,
  window_size: DVec2,
  scale: DVec2,
}

impl PerspectiveProjection {
  pub fn new(fov: f64, window_size: DVec2) -> Self {
    Self {
      fov,
      window_size,
      scale: aspect_scale((fov / 2.0).tan(), window_size),
    }
  }
}

impl Projection for PerspectiveProjection {
  fn window_size(&self) -> DVec2 {
    self.window_size
  }

  fn to_ndc(&self, v: DVec3) -> Projected {
    let depth = -v.z;
    if depth <= 1e-9 * v.length() {
      return Projected {
        ndc: DVec2::splat(f64::MAX),
        visible: false,
        front: false,
      };
    }
    let ndc = DVec2::new(v.x, v.y) / depth / self.scale;
    Projected {
      ndc,
      visible: inside_viewport(ndc),
      front: true,
    }
  }

  fn backward(&self, ndc: DVec2) -> DVec3 {
    let p = ndc * self.scale;
    DVec3::new(p.x, p.y, -1.0).normalize()
  }
}

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;
