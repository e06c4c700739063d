//! LinesConfig - tunables for grid traversal and label rendering.

use crate::constants::MIN_NODE_CAPACITY;

/// Configuration shared by every grid line of a [`Lines`](crate::Lines)
/// container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinesConfig {
  /// Maximum number of live quadtree nodes during one traversal.
  /// Values below [`MIN_NODE_CAPACITY`] are raised to it.
  pub node_capacity: usize,

  /// Polyline samples per emitted grid edge.
  pub line_subdivisions: usize,

  /// Label font size in pixels.
  pub label_font_size: f64,

  /// Label offset from the viewport border along its normal, in pixels.
  pub label_margin: f64,

  /// Seconds for a grid to fade fully in or out.
  pub fade_duration: f64,
}

impl LinesConfig {
  /// Default configuration.
  pub const DEFAULT: Self = Self {
    node_capacity: 512,
    line_subdivisions: 8,
    label_font_size: 13.0,
    label_margin: 4.0,
    fade_duration: 0.2,
  };

  /// Node capacity with the lower bound applied.
  #[inline]
  pub fn effective_node_capacity(&self) -> usize {
    self.node_capacity.max(MIN_NODE_CAPACITY)
  }
}

impl Default for LinesConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}
