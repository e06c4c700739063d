//! Frame conversion between ICRF, the observer's horizon and the camera.
//!
//! Directions are unit vectors. Every frame is related to [`Frame::View`] by
//! an orthogonal matrix, so converting between any two frames goes through
//! view space with a transpose for the inverse.
//!
//! ```text
//! icrf --(sidereal rotation, latitude tilt)--> observed --(yaw, pitch)--> view
//! ```

use glam::{DMat3, DVec3};

use crate::constants::ECLIPTIC_OBLIQUITY;
use crate::grid::Frame;

/// Spherical to cartesian: `theta` is the longitude, `phi` the latitude.
#[inline]
pub fn s2c(theta: f64, phi: f64) -> DVec3 {
  let (st, ct) = theta.sin_cos();
  let (sp, cp) = phi.sin_cos();
  DVec3::new(cp * ct, cp * st, sp)
}

/// Cartesian to spherical `(theta, phi)`, theta in (-π, π].
#[inline]
pub fn c2s(v: DVec3) -> (f64, f64) {
  let d2 = v.x * v.x + v.y * v.y;
  let theta = if d2 == 0.0 { 0.0 } else { v.y.atan2(v.x) };
  let phi = if v.z == 0.0 { 0.0 } else { v.z.atan2(d2.sqrt()) };
  (theta, phi)
}

/// Converts direction vectors between named frames.
pub trait FrameConverter {
  /// Rotate `v` from frame `from` into frame `to`.
  fn convert(&self, from: Frame, to: Frame, v: DVec3) -> DVec3;

  /// Ecliptic coordinates to the observed frame.
  fn ecliptic_to_observed(&self) -> DMat3;
}

/// Observer on the ground looking in a given direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
  /// Geographic latitude, radians.
  pub latitude: f64,
  /// Local sidereal time, radians.
  pub sidereal_time: f64,
  /// View azimuth, radians from north toward east.
  pub yaw: f64,
  /// View altitude, radians.
  pub pitch: f64,
  ri2h: DMat3,
  rh2v: DMat3,
  re2h: DMat3,
}

impl Observer {
  pub fn new(latitude: f64, sidereal_time: f64, yaw: f64, pitch: f64) -> Self {
    let (sl, cl) = latitude.sin_cos();
    // Hour-angle frame (x on the local meridian, y east, z celestial pole)
    // into the horizon. Observed axes are north/east/zenith, so this is an
    // orthogonal reflection rather than a proper rotation.
    let tilt = DMat3::from_cols(
      DVec3::new(-sl, 0.0, cl),
      DVec3::Y,
      DVec3::new(cl, 0.0, sl),
    );
    let ri2h = tilt * DMat3::from_rotation_z(-sidereal_time);

    let forward = s2c(yaw, pitch);
    let right = s2c(yaw + std::f64::consts::FRAC_PI_2, 0.0);
    let up = forward.cross(right);
    let rh2v = DMat3::from_cols(right, up, -forward).transpose();

    let re2h = ri2h * DMat3::from_rotation_x(ECLIPTIC_OBLIQUITY);

    Self {
      latitude,
      sidereal_time,
      yaw,
      pitch,
      ri2h,
      rh2v,
      re2h,
    }
  }

  /// Same observer looking in another direction.
  pub fn looking_at(&self, yaw: f64, pitch: f64) -> Self {
    Self::new(self.latitude, self.sidereal_time, yaw, pitch)
  }

  /// Matrix taking `frame` coordinates into view space.
  fn to_view(&self, frame: Frame) -> DMat3 {
    match frame {
      Frame::View => DMat3::IDENTITY,
      Frame::Observed => self.rh2v,
      Frame::Icrf => self.rh2v * self.ri2h,
    }
  }
}

impl FrameConverter for Observer {
  fn convert(&self, from: Frame, to: Frame, v: DVec3) -> DVec3 {
    if from == to {
      return v;
    }
    self.to_view(to).transpose() * (self.to_view(from) * v)
  }

  fn ecliptic_to_observed(&self) -> DMat3 {
    self.re2h
  }
}

#[cfg(test)]
#[path = "frames_test.rs"]
mod frames_test;
