//! Angular step tables for adaptive grid density.
//!
//! Each step divides the full circle (or 24h) into `n` parts. Its `splits`
//! sequence is the ordered 2/3/5 factorization of `n`: a quadtree whose
//! children split a cell by `splits[level]` lands exactly on the step's round
//! angular boundaries at depth `level`.
//!
//! ```text
//! n = splits[0] * splits[1] * ... * splits[level - 1]
//!
//! 10° = 36 divisions = 2 * 2 * 3 * 3        (level 4)
//! 15m = 96 divisions = 2 * 2 * 2 * 2 * 2 * 3 (level 6)
//! ```
//!
//! # Module Structure
//!
//! - [`STEPS_DEG`] / [`STEPS_HOUR`]: immutable tables, coarse to fine
//! - [`selector`]: picks a [`StepPair`] from the field of view

pub mod selector;

pub use selector::{select_steps, theta_range};

use std::f64::consts::TAU;

use crate::constants::MAX_LEVEL;

/// One admissible angular step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepEntry {
  /// Number of steps in the full circle (or in 24h).
  pub n: u32,
  /// Quadtree depth at which the step becomes representable.
  pub level: u32,
  /// Split factor per depth; trailing entries are 1.
  pub splits: [u8; MAX_LEVEL as usize],
}

impl StepEntry {
  const fn new(n: u32, level: u32, factors: &[u8]) -> Self {
    let mut splits = [1u8; MAX_LEVEL as usize];
    let mut i = 0;
    while i < factors.len() {
      splits[i] = factors[i];
      i += 1;
    }
    Self { n, level, splits }
  }

  /// Split factor applied to children of a node at `level`.
  ///
  /// Past the end of the sequence the step is fully resolved, so 1.
  #[inline]
  pub fn split(&self, level: u32) -> u32 {
    self
      .splits
      .get(level as usize)
      .copied()
      .map_or(1, u32::from)
  }

  /// Angular size of one step, radians of the full circle.
  #[inline]
  pub fn angle(&self) -> f64 {
    TAU / self.n as f64
  }
}

/// Degree steps, from 360° down to 1".
pub static STEPS_DEG: [StepEntry; 25] = [
  StepEntry::new(1, 0, &[]),         // 360°
  StepEntry::new(2, 1, &[2]),        // 180°
  StepEntry::new(4, 2, &[2, 2]),     //  90°
  StepEntry::new(6, 2, &[2, 3]),     //  60°
  StepEntry::new(12, 3, &[2, 2, 3]), //  30°
  StepEntry::new(18, 3, &[2, 3, 3]), //  20°
  StepEntry::new(24, 4, &[2, 2, 2, 3]), //  15°
  StepEntry::new(36, 4, &[2, 2, 3, 3]), //  10°
  StepEntry::new(72, 5, &[2, 2, 2, 3, 3]), //   5°
  StepEntry::new(180, 5, &[2, 2, 3, 3, 5]), //   2°
  StepEntry::new(360, 6, &[2, 2, 2, 3, 3, 5]), //   1°
  StepEntry::new(720, 7, &[2, 2, 2, 2, 3, 3, 5]), //  30'
  StepEntry::new(1080, 7, &[2, 2, 2, 3, 3, 3, 5]), //  20'
  StepEntry::new(1440, 8, &[2, 2, 2, 2, 2, 3, 3, 5]), //  15'
  StepEntry::new(2160, 8, &[2, 2, 2, 2, 3, 3, 3, 5]), //  10'
  StepEntry::new(4320, 9, &[2, 2, 2, 2, 2, 3, 3, 3, 5]), //   5'
  StepEntry::new(10800, 9, &[2, 2, 2, 2, 3, 3, 3, 5, 5]), //   2'
  StepEntry::new(21600, 10, &[2, 2, 2, 2, 2, 3, 3, 3, 5, 5]), //   1'
  StepEntry::new(43200, 11, &[2, 2, 2, 2, 2, 2, 3, 3, 3, 5, 5]), //  30"
  StepEntry::new(64800, 11, &[2, 2, 2, 2, 2, 3, 3, 3, 3, 5, 5]), //  20"
  StepEntry::new(86400, 12, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 5, 5]), //  15"
  StepEntry::new(129600, 12, &[2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 5, 5]), //  10"
  StepEntry::new(259200, 13, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 5, 5]), //   5"
  StepEntry::new(648000, 13, &[2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 5, 5, 5]), //   2"
  StepEntry::new(1296000, 14, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 5, 5, 5]), //   1"
];

/// Hour steps, from 24h down to 1s.
pub static STEPS_HOUR: [StepEntry; 20] = [
  StepEntry::new(1, 0, &[]),            // 24h
  StepEntry::new(2, 1, &[2]),           // 12h
  StepEntry::new(3, 1, &[3]),           //  8h
  StepEntry::new(6, 2, &[2, 3]),        //  4h
  StepEntry::new(12, 3, &[2, 2, 3]),    //  2h
  StepEntry::new(24, 4, &[2, 2, 2, 3]), //  1h
  StepEntry::new(48, 5, &[2, 2, 2, 2, 3]), // 30m
  StepEntry::new(72, 5, &[2, 2, 2, 3, 3]), // 20m
  StepEntry::new(96, 6, &[2, 2, 2, 2, 2, 3]), // 15m
  StepEntry::new(144, 6, &[2, 2, 2, 2, 3, 3]), // 10m
  StepEntry::new(288, 7, &[2, 2, 2, 2, 2, 3, 3]), //  5m
  StepEntry::new(720, 7, &[2, 2, 2, 2, 3, 3, 5]), //  2m
  StepEntry::new(1440, 8, &[2, 2, 2, 2, 2, 3, 3, 5]), //  1m
  StepEntry::new(2880, 9, &[2, 2, 2, 2, 2, 2, 3, 3, 5]), // 30s
  StepEntry::new(4320, 9, &[2, 2, 2, 2, 2, 3, 3, 3, 5]), // 20s
  StepEntry::new(5760, 10, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 5]), // 15s
  StepEntry::new(8640, 10, &[2, 2, 2, 2, 2, 2, 3, 3, 3, 5]), // 10s
  StepEntry::new(17280, 11, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 5]), //  5s
  StepEntry::new(43200, 11, &[2, 2, 2, 2, 2, 2, 3, 3, 3, 5, 5]), //  2s
  StepEntry::new(86400, 12, &[2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 5, 5]), //  1s
];

/// Which table an axis draws its step from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepTable {
  Degrees,
  Hours,
}

impl StepTable {
  /// The table's entries, coarse to fine.
  #[inline]
  pub fn entries(self) -> &'static [StepEntry] {
    match self {
      StepTable::Degrees => &STEPS_DEG,
      StepTable::Hours => &STEPS_HOUR,
    }
  }
}

/// Steps selected for one render call.
///
/// Axis 0 runs along UV.x (longitude / right ascension, meridians).
/// Axis 1 runs along UV.y (latitude / declination, parallels).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepPair {
  pub steps: [&'static StepEntry; 2],
}

impl StepPair {
  /// Pair used by single-line grids: the 0°/180° great circle, no parallels.
  pub fn single_line() -> Self {
    Self {
      steps: [&STEPS_DEG[1], &STEPS_DEG[0]],
    }
  }

  /// Step of one axis.
  #[inline]
  pub fn axis(&self, axis: usize) -> &'static StepEntry {
    self.steps[axis]
  }

  /// Shallowest level at which either axis resolves.
  #[inline]
  pub fn min_level(&self) -> u32 {
    self.steps[0].level.min(self.steps[1].level)
  }

  /// Deepest level needed for both axes to resolve.
  #[inline]
  pub fn max_level(&self) -> u32 {
    self.steps[0].level.max(self.steps[1].level)
  }
}
