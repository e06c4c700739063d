//! Step selection from the field of view.
//!
//! The target angular increment is `fov / 8`; the table index grows with the
//! log of how many such increments fit in the full circle. Near a pole the
//! meridians converge, so the azimuth/hour axis is thinned until at most
//! [`MAX_VISIBLE_MERIDIANS`] of them cross the visible range.

use std::f64::consts::TAU;

use glam::DVec2;

use super::{StepPair, StepTable, STEPS_DEG, STEPS_HOUR};
use crate::constants::{
  DEGREE_INDEX_FACTOR, FOV_DIVISIONS, HOUR_INDEX_FACTOR, MAX_VISIBLE_MERIDIANS,
  POLE_CORRECTION_MIN_DIVISIONS,
};
use crate::frames::{c2s, FrameConverter};
use crate::grid::{Frame, LabelFormat};
use crate::projection::Projection;

/// Table index for increment `a`, clamped to `[0, len - 1]`.
fn table_index(factor: f64, a: f64, len: usize) -> usize {
  let i = (factor * (TAU / a).ln()).round();
  if i.is_nan() || i <= 0.0 {
    0
  } else {
    (i as usize).min(len - 1)
  }
}

/// Degree table index; entries whose `n` is not a multiple of 4 are skipped
/// once so the grid stays symmetric across quadrants.
fn degree_index(a: f64) -> usize {
  let i = table_index(DEGREE_INDEX_FACTOR, a, STEPS_DEG.len());
  if STEPS_DEG[i].n % 4 != 0 {
    (i + 1).min(STEPS_DEG.len() - 1)
  } else {
    i
  }
}

/// Select the step pair for a labeled grid.
///
/// `theta_range` is the visible azimuthal range in the grid frame (see
/// [`theta_range`]); values near 2π mean a pole is in view.
pub fn select_steps(fov: f64, format: LabelFormat, theta_range: f64) -> StepPair {
  let a = fov / FOV_DIVISIONS;
  let deg = degree_index(a);

  let (table, mut index) = match format {
    LabelFormat::Degrees => (StepTable::Degrees, deg),
    LabelFormat::Hours => (
      StepTable::Hours,
      table_index(HOUR_INDEX_FACTOR, a, STEPS_HOUR.len()),
    ),
  };
  let entries = table.entries();

  let theta_range = if theta_range.is_finite() {
    theta_range
  } else {
    tracing::warn!(theta_range, "non-finite visible range, skipping pole correction");
    0.0
  };

  // Pole correction. The explicit floor never triggers on valid input: every
  // entry above POLE_CORRECTION_MIN_DIVISIONS sits at index 6 or later.
  while index > 0
    && entries[index].n > POLE_CORRECTION_MIN_DIVISIONS
    && theta_range / entries[index].angle() > MAX_VISIBLE_MERIDIANS
  {
    index -= 1;
  }

  tracing::debug!(
    fov_deg = fov.to_degrees(),
    ?table,
    axis0_n = entries[index].n,
    axis1_n = STEPS_DEG[deg].n,
    "selected grid steps"
  );

  StepPair {
    steps: [&entries[index], &STEPS_DEG[deg]],
  }
}

/// Estimate the visible range of azimuthal angle in `frame`.
///
/// Unprojects the four viewport corners, converts them into the grid frame
/// and returns `max(theta) - min(theta)`. Looking at a pole pushes this
/// toward 2π.
pub fn theta_range(projection: &dyn Projection, frames: &dyn FrameConverter, frame: Frame) -> f64 {
  let mut theta_min = f64::MAX;
  let mut theta_max = f64::MIN;
  for i in 0..4 {
    let corner = DVec2::new(
      2.0 * ((i % 2) as f64 - 0.5),
      2.0 * ((i / 2) as f64 - 0.5),
    );
    let view = projection.backward(corner);
    let (theta, _phi) = c2s(frames.convert(Frame::View, frame, view));
    theta_min = theta_min.min(theta);
    theta_max = theta_max.max(theta);
  }
  theta_max - theta_min
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;
