//! Fixed numeric constants shared by step selection, traversal and labels.

/// Maximum quadtree depth; matches the length of a step's split sequence.
pub const MAX_LEVEL: u32 = 16;

/// Smallest node arena the traversal accepts.
pub const MIN_NODE_CAPACITY: usize = 128;

/// Target angular increment is the field of view divided by this.
pub const FOV_DIVISIONS: f64 = 8.0;

/// Table index scale for degree axes: `i = round(k * ln(2π / a))`.
pub const DEGREE_INDEX_FACTOR: f64 = 1.7;

/// Table index scale for hour axes.
pub const HOUR_INDEX_FACTOR: f64 = 1.5;

/// Hour/azimuth steps at or below this many divisions skip the pole correction.
pub const POLE_CORRECTION_MIN_DIVISIONS: u32 = 24;

/// Upper bound on converging meridians drawn in the visible azimuth range.
pub const MAX_VISIBLE_MERIDIANS: f64 = 15.0;

/// Minimum |cos| between a line and the border normal to place a label.
pub const MIN_LABEL_INCIDENCE: f64 = 0.25;

/// Tangential label offset as a fraction of text height.
pub const LABEL_TANGENT_OFFSET: f64 = 0.7;

/// Obliquity of the ecliptic at J2000, radians.
pub const ECLIPTIC_OBLIQUITY: f64 = 23.439_291_1 * std::f64::consts::PI / 180.0;

// Label precision tiers (step division counts, inclusive upper bounds).

/// Degree labels show whole degrees up to this step.
pub const DEG_WHOLE_MAX_N: u32 = 360;
/// Degree labels show arcminutes up to this step, arcseconds beyond.
pub const DEG_MINUTES_MAX_N: u32 = 21_600;
/// Hour labels show whole hours up to this step.
pub const HOUR_WHOLE_MAX_N: u32 = 24;
/// Hour labels show minutes up to this step, seconds beyond.
pub const HOUR_MINUTES_MAX_N: u32 = 1_440;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
