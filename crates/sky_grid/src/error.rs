//! Error types for grid traversal.

use thiserror::Error;

/// Failure while walking the grid quadtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraversalError {
  /// More nodes were live at once than the arena can hold.
  ///
  /// The capacity is a deployment parameter; raise
  /// [`LinesConfig::node_capacity`](crate::LinesConfig::node_capacity).
  #[error("quadtree node arena exhausted (capacity {capacity})")]
  CapacityExceeded { capacity: usize },
}
