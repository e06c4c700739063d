//! QuadNode - value type for a cell of the grid quadtree.
//!
//! Unlike a binary quadtree, each level splits every axis by its own factor
//! (1, 2, 3 or 5), so the cell index along an axis is cumulative: `xy[axis]`
//! counts cells of width `1 / divisions[axis]` from the UV origin.

use glam::DVec2;
use smallvec::SmallVec;

use crate::constants::MAX_LEVEL;

/// Quadtree node - transient, lives for one traversal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct QuadNode {
  /// Depth, 0 = root.
  pub level: u32,
  /// Cell index along each axis at this depth.
  pub xy: [u32; 2],
  /// Cells per axis at this depth.
  pub divisions: [u32; 2],
  /// Axis lines already emitted along this node's leading edges.
  pub crossed: [bool; 2],
}

impl QuadNode {
  pub const ROOT: Self = Self {
    level: 0,
    xy: [0, 0],
    divisions: [1, 1],
    crossed: [false, false],
  };

  /// Child at `local` inside a `split` subdivision.
  ///
  /// A child keeps the parent's crossed flag on an axis only when it sits on
  /// the parent's leading edge (local index 0), since that edge is the one
  /// already painted.
  ///
  /// Returns None at [`MAX_LEVEL`] or for an out-of-range index.
  pub fn get_child(&self, split: [u32; 2], local: [u32; 2]) -> Option<Self> {
    if self.level >= MAX_LEVEL || local[0] >= split[0] || local[1] >= split[1] {
      return None;
    }
    Some(Self {
      level: self.level + 1,
      xy: [
        self.xy[0] * split[0] + local[0],
        self.xy[1] * split[1] + local[1],
      ],
      divisions: [self.divisions[0] * split[0], self.divisions[1] * split[1]],
      crossed: [
        self.crossed[0] && local[0] == 0,
        self.crossed[1] && local[1] == 0,
      ],
    })
  }

  /// All children of a `split` subdivision, axis 0 varying fastest.
  pub fn children(&self, split: [u32; 2]) -> SmallVec<[Self; 25]> {
    (0..split[1])
      .flat_map(|j| (0..split[0]).map(move |i| [i, j]))
      .filter_map(|local| self.get_child(split, local))
      .collect()
  }

  /// Normalized `[s0, s1] x [t0, t1]` extent inside the root patch.
  #[inline]
  pub fn extent(&self) -> [DVec2; 2] {
    let d = DVec2::new(self.divisions[0] as f64, self.divisions[1] as f64);
    let lo = DVec2::new(self.xy[0] as f64, self.xy[1] as f64) / d;
    let hi = DVec2::new((self.xy[0] + 1) as f64, (self.xy[1] + 1) as f64) / d;
    [lo, hi]
  }

  /// Corner UVs, bilinear in the root corners.
  ///
  /// Corner order follows the root: `[origin, +axis0, +axis1, +both]`, so
  /// `uv[0] -> uv[2]` is the leading edge of axis 0 (constant u) and
  /// `uv[0] -> uv[1]` the leading edge of axis 1 (constant v).
  pub fn corners(&self, root: &[DVec2; 4]) -> [DVec2; 4] {
    let [lo, hi] = self.extent();
    let at = |s: f64, t: f64| {
      let top = root[0].lerp(root[1], s);
      let bottom = root[2].lerp(root[3], s);
      top.lerp(bottom, t)
    };
    [at(lo.x, lo.y), at(hi.x, lo.y), at(lo.x, hi.y), at(hi.x, hi.y)]
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
