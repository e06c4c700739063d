//! Quadtree module for adaptive tessellation of a UV patch.
//!
//! The patch is a `[0, 1]²` UV square mapped onto the sphere by a
//! [`SurfaceMap`]. A [`QuadVisitor`] decides per node how to split, whether
//! to keep descending, and what to draw.
//!
//! # Module Structure
//!
//! - [`node`]: `QuadNode` - value type for a cell and its child math
//! - [`arena`]: `NodeArena` - bounded DFS stack, `TraversalStats`
//! - [`traverse`]: `traverse_surface` - the walk itself with cone culling

pub mod arena;
pub mod node;
pub mod traverse;

use glam::{DVec2, DVec3};

// Re-exports
pub use arena::{NodeArena, TraversalStats};
pub use node::QuadNode;
pub use traverse::{traverse_surface, ViewCone};

/// Maps patch UV to a view-space direction.
pub trait SurfaceMap {
  fn map(&self, uv: DVec2) -> DVec3;
}

/// Outcome of the visibility phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
  /// Too coarse to draw, descend without emitting.
  Subdivide,
  /// Run the emit phase on this node.
  Render,
}

/// Whether to descend after emitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emit {
  Stop,
  Subdivide,
}

/// Result of the emit phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emitted {
  /// Crossed flags handed down to the children.
  pub crossed: [bool; 2],
  pub next: Emit,
}

/// Per-node callbacks driven by [`traverse_surface`].
pub trait QuadVisitor {
  /// Split factors for the children of `node`, per axis.
  fn root_split(&mut self, node: &QuadNode) -> [u32; 2];

  /// Called on nodes that passed the cone test.
  fn after_visibility(&mut self, node: &QuadNode) -> Visit;

  /// Draw what this node carries. `uv` are the node corners and `pos` their
  /// view-space directions, in the same order.
  fn emit(&mut self, node: &QuadNode, uv: &[DVec2; 4], pos: &[DVec3; 4]) -> Emitted;
}
