//! Engine-agnostic metrics collection for grid rendering.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use sky_grid::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! lines.render(&ctx, &mut canvas)?;
//! println!("{:.1} us/frame", lines.metrics().avg_render_timing_us());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::grid::GRID_COUNT;
use crate::qtree::TraversalStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-size history of render timings in microseconds, oldest evicted
/// first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  buffer: VecDeque<u64>,
  capacity: usize,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: u64) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Mean of the stored values; 0 when empty.
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      return 0.0;
    }
    self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
  }
}

impl Default for RollingWindow {
  /// Two seconds of frames at 60 fps.
  fn default() -> Self {
    Self::new(120)
  }
}

/// Statistics updated by every [`Lines::render`](crate::Lines::render).
#[derive(Debug, Clone, Default)]
pub struct LinesMetrics {
  /// Line strips drawn in the last frame, indexed like `GRID_DEFINITIONS`.
  pub segments_per_grid: [u64; GRID_COUNT],
  /// Labels drawn in the last frame, indexed like `GRID_DEFINITIONS`.
  pub labels_per_grid: [u64; GRID_COUNT],

  /// Traversal totals over all grids in the last frame.
  pub last_traversal: TraversalStats,

  /// Rolling window of full render times in microseconds.
  pub render_timings: RollingWindow,
  pub last_render_us: u64,
  /// Frames rendered this session.
  pub total_renders: u64,
}

impl LinesMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear per-frame counters before a render.
  pub fn begin_frame(&mut self) {
    if !is_enabled() {
      return;
    }
    self.segments_per_grid.fill(0);
    self.labels_per_grid.fill(0);
    self.last_traversal = TraversalStats::default();
  }

  /// Record one grid's output.
  pub fn record_grid(
    &mut self,
    index: usize,
    segments: usize,
    labels: usize,
    stats: &TraversalStats,
  ) {
    if !is_enabled() {
      return;
    }
    if let Some(slot) = self.segments_per_grid.get_mut(index) {
      *slot += segments as u64;
    }
    if let Some(slot) = self.labels_per_grid.get_mut(index) {
      *slot += labels as u64;
    }
    self.last_traversal.merge(stats);
  }

  /// Record a full render timing.
  pub fn record_render_timing(&mut self, timing_us: u64) {
    if is_enabled() {
      self.render_timings.push(timing_us);
      self.last_render_us = timing_us;
      self.total_renders += 1;
    }
  }

  pub fn total_segments(&self) -> u64 {
    self.segments_per_grid.iter().sum()
  }

  pub fn total_labels(&self) -> u64 {
    self.labels_per_grid.iter().sum()
  }

  pub fn avg_render_timing_us(&self) -> f64 {
    self.render_timings.average()
  }

  /// Reset everything except the session render count.
  pub fn reset(&mut self) {
    self.segments_per_grid.fill(0);
    self.labels_per_grid.fill(0);
    self.last_traversal = TraversalStats::default();
    self.render_timings.clear();
    self.last_render_us = 0;
  }
}
