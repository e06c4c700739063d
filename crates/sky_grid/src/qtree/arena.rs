//! Bounded node storage for quadtree traversal.
//!
//! The traversal is depth-first over an explicit stack. The stack never grows
//! past its capacity: pushing into a full arena is an error, not a silent
//! truncation of the grid.

use super::QuadNode;
use crate::config::LinesConfig;
use crate::error::TraversalError;

/// Fixed-capacity stack of pending quadtree nodes.
#[derive(Clone, Debug)]
pub struct NodeArena {
  nodes: Vec<QuadNode>,
  capacity: usize,
  peak: usize,
}

impl NodeArena {
  /// Arena holding at most `capacity` pending nodes.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      nodes: Vec::with_capacity(capacity),
      capacity,
      peak: 0,
    }
  }

  /// Arena sized from a config, with the capacity floor applied.
  pub fn from_config(config: &LinesConfig) -> Self {
    Self::with_capacity(config.effective_node_capacity())
  }

  #[inline]
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Highest number of pending nodes since the last [`clear`](Self::clear).
  #[inline]
  pub fn peak(&self) -> usize {
    self.peak
  }

  pub fn push(&mut self, node: QuadNode) -> Result<(), TraversalError> {
    if self.nodes.len() >= self.capacity {
      return Err(TraversalError::CapacityExceeded {
        capacity: self.capacity,
      });
    }
    self.nodes.push(node);
    self.peak = self.peak.max(self.nodes.len());
    Ok(())
  }

  #[inline]
  pub fn pop(&mut self) -> Option<QuadNode> {
    self.nodes.pop()
  }

  /// Drop pending nodes and reset the peak counter.
  pub fn clear(&mut self) {
    self.nodes.clear();
    self.peak = 0;
  }
}

impl Default for NodeArena {
  fn default() -> Self {
    Self::from_config(&LinesConfig::DEFAULT)
  }
}

/// Statistics from one traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
  /// Nodes popped from the arena.
  pub nodes_visited: usize,
  /// Nodes rejected by the view cone test.
  pub nodes_culled: usize,
  /// Nodes handed to the emit phase.
  pub nodes_rendered: usize,
  /// Arena high-water mark.
  pub peak_nodes: usize,
}

impl TraversalStats {
  /// Nodes that passed the cone test.
  #[inline]
  pub fn nodes_kept(&self) -> usize {
    self.nodes_visited - self.nodes_culled
  }

  /// Accumulate another traversal into this one.
  pub fn merge(&mut self, other: &TraversalStats) {
    self.nodes_visited += other.nodes_visited;
    self.nodes_culled += other.nodes_culled;
    self.nodes_rendered += other.nodes_rendered;
    self.peak_nodes = self.peak_nodes.max(other.peak_nodes);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_push_pop_lifo() {
    let mut arena = NodeArena::with_capacity(4);
    let a = QuadNode::ROOT;
    let b = QuadNode {
      level: 1,
      ..QuadNode::ROOT
    };
    arena.push(a).unwrap();
    arena.push(b).unwrap();
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.pop(), Some(b));
    assert_eq!(arena.pop(), Some(a));
    assert_eq!(arena.pop(), None);
    assert!(arena.is_empty());
  }

  #[test]
  fn test_overflow_is_an_error() {
    let mut arena = NodeArena::with_capacity(2);
    arena.push(QuadNode::ROOT).unwrap();
    arena.push(QuadNode::ROOT).unwrap();
    assert_eq!(
      arena.push(QuadNode::ROOT),
      Err(TraversalError::CapacityExceeded { capacity: 2 })
    );
    assert_eq!(arena.len(), 2, "failed push must not store the node");
  }

  #[test]
  fn test_peak_and_clear() {
    let mut arena = NodeArena::with_capacity(8);
    for _ in 0..5 {
      arena.push(QuadNode::ROOT).unwrap();
    }
    arena.pop();
    arena.pop();
    assert_eq!(arena.peak(), 5);
    arena.clear();
    assert_eq!(arena.peak(), 0);
    assert!(arena.is_empty());
  }

  #[test]
  fn test_from_config_applies_floor() {
    let config = LinesConfig {
      node_capacity: 1,
      ..Default::default()
    };
    assert_eq!(NodeArena::from_config(&config).capacity(), 128);
    assert_eq!(NodeArena::default().capacity(), 512);
  }

  #[test]
  fn test_stats_merge() {
    let mut total = TraversalStats {
      nodes_visited: 10,
      nodes_culled: 4,
      nodes_rendered: 3,
      peak_nodes: 7,
    };
    total.merge(&TraversalStats {
      nodes_visited: 5,
      nodes_culled: 1,
      nodes_rendered: 2,
      peak_nodes: 9,
    });
    assert_eq!(total.nodes_visited, 15);
    assert_eq!(total.nodes_kept(), 10);
    assert_eq!(total.nodes_rendered, 5);
    assert_eq!(total.peak_nodes, 9);
  }
}
