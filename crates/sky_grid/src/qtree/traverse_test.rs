use std::collections::HashSet;

use super::*;
use crate::constants::MAX_LEVEL;
use crate::painter::spherical_project;
use crate::projection::{PerspectiveProjection, Projected};
use crate::qtree::Emitted;

const ROOT_UV: [DVec2; 4] = [
  DVec2::new(0.0, 1.0),
  DVec2::new(1.0, 1.0),
  DVec2::new(0.0, 0.0),
  DVec2::new(1.0, 0.0),
];

/// UV straight onto the unit sphere, view space = grid frame.
struct Sphere;

impl SurfaceMap for Sphere {
  fn map(&self, uv: DVec2) -> DVec3 {
    spherical_project(uv)
  }
}

/// Projection whose viewport covers the whole sphere.
struct AllSky;

impl Projection for AllSky {
  fn window_size(&self) -> DVec2 {
    DVec2::new(100.0, 100.0)
  }

  fn to_ndc(&self, v: DVec3) -> Projected {
    Projected {
      ndc: DVec2::new(v.x, v.y),
      visible: true,
      front: true,
    }
  }

  fn backward(&self, _ndc: DVec2) -> DVec3 {
    DVec3::Z
  }
}

/// Splits uniformly and stops at a fixed depth.
struct Uniform {
  split: [u32; 2],
  depth: u32,
  mark_at: Option<u32>,
  emitted: Vec<QuadNode>,
}

impl Uniform {
  fn new(split: [u32; 2], depth: u32) -> Self {
    Self {
      split,
      depth,
      mark_at: None,
      emitted: Vec::new(),
    }
  }
}

impl QuadVisitor for Uniform {
  fn root_split(&mut self, _node: &QuadNode) -> [u32; 2] {
    self.split
  }

  fn after_visibility(&mut self, _node: &QuadNode) -> Visit {
    Visit::Render
  }

  fn emit(&mut self, node: &QuadNode, _uv: &[DVec2; 4], _pos: &[DVec3; 4]) -> Emitted {
    self.emitted.push(*node);
    let crossed = if self.mark_at == Some(node.level) {
      [true, true]
    } else {
      node.crossed
    };
    Emitted {
      crossed,
      next: if node.level >= self.depth {
        Emit::Stop
      } else {
        Emit::Subdivide
      },
    }
  }
}

/// The root is split even when every other node stops immediately.
#[test]
fn test_root_always_subdivides() {
  let mut arena = NodeArena::default();
  let mut visitor = Uniform::new([2, 2], 1);
  let stats = traverse_surface(&mut arena, &ROOT_UV, &Sphere, &AllSky, &mut visitor).unwrap();
  assert_eq!(stats.nodes_visited, 5);
  assert_eq!(stats.nodes_rendered, 4);
  assert_eq!(stats.nodes_culled, 0);
  assert!(visitor.emitted.iter().all(|n| n.level == 1));
}

#[test]
fn test_visit_order_axis0_fastest() {
  let mut arena = NodeArena::default();
  let mut visitor = Uniform::new([3, 2], 1);
  traverse_surface(&mut arena, &ROOT_UV, &Sphere, &AllSky, &mut visitor).unwrap();
  let order: Vec<_> = visitor.emitted.iter().map(|n| n.xy).collect();
  assert_eq!(order, vec![[0, 0], [1, 0], [2, 0], [0, 1], [1, 1], [2, 1]]);
}

#[test]
fn test_capacity_exceeded() {
  let mut arena = NodeArena::with_capacity(4);
  let mut visitor = Uniform::new([5, 5], 2);
  let result = traverse_surface(&mut arena, &ROOT_UV, &Sphere, &AllSky, &mut visitor);
  assert_eq!(result, Err(TraversalError::CapacityExceeded { capacity: 4 }));
}

/// Unit splits walk a single chain down to the depth limit.
#[test]
fn test_depth_limit() {
  let mut arena = NodeArena::default();
  let mut visitor = Uniform::new([1, 1], u32::MAX);
  let stats = traverse_surface(&mut arena, &ROOT_UV, &Sphere, &AllSky, &mut visitor).unwrap();
  assert_eq!(stats.nodes_visited, MAX_LEVEL as usize + 1);
  assert_eq!(visitor.emitted.last().map(|n| n.level), Some(MAX_LEVEL));
}

/// Crossed flags returned by emit reach the children on the leading edge.
#[test]
fn test_crossed_flags_propagate() {
  let mut arena = NodeArena::default();
  let mut visitor = Uniform::new([2, 2], 2);
  visitor.mark_at = Some(1);
  traverse_surface(&mut arena, &ROOT_UV, &Sphere, &AllSky, &mut visitor).unwrap();

  let level2: Vec<_> = visitor.emitted.iter().filter(|n| n.level == 2).collect();
  assert_eq!(level2.len(), 16);
  for node in level2 {
    assert_eq!(node.crossed[0], node.xy[0] % 2 == 0, "{:?}", node);
    assert_eq!(node.crossed[1], node.xy[1] % 2 == 0, "{:?}", node);
  }
}

/// Culling drops far nodes but keeps every node reaching into the view.
#[test]
fn test_culling_is_conservative() {
  let projection = PerspectiveProjection::new(30f64.to_radians(), DVec2::new(800.0, 600.0));
  let cone = ViewCone::from_projection(&projection);
  let depth = 4;

  let mut arena = NodeArena::default();
  let mut visitor = Uniform::new([2, 2], depth);
  let stats =
    traverse_surface(&mut arena, &ROOT_UV, &Sphere, &projection, &mut visitor).unwrap();
  assert!(stats.nodes_culled > 0);
  assert!(stats.nodes_rendered > 0);
  assert!(stats.nodes_rendered < 4 + 16 + 64 + 256);

  let emitted: HashSet<_> = visitor
    .emitted
    .iter()
    .filter(|n| n.level == depth)
    .map(|n| n.xy)
    .collect();

  let mut all = vec![QuadNode::ROOT];
  for _ in 0..depth {
    all = all.iter().flat_map(|n| n.children([2, 2])).collect();
  }
  for node in all {
    let touches_view = node
      .corners(&ROOT_UV)
      .iter()
      .any(|&uv| spherical_project(uv).angle_between(DVec3::NEG_Z) < cone.radius);
    if touches_view {
      assert!(emitted.contains(&node.xy), "visible node culled: {:?}", node);
    }
  }
}

#[test]
fn test_view_cone_radius() {
  let projection = PerspectiveProjection::new(90f64.to_radians(), DVec2::new(600.0, 600.0));
  let cone = ViewCone::from_projection(&projection);
  let expected = 2f64.sqrt().atan();
  assert!((cone.radius - expected).abs() < 1e-9, "{}", cone.radius);

  assert!(cone.intersects_cap(DVec3::NEG_Z, 0.0));
  assert!(!cone.intersects_cap(DVec3::Z, 0.1));
  // Caps of a hemisphere or more always intersect.
  assert!(cone.intersects_cap(DVec3::Z, std::f64::consts::FRAC_PI_2));
}
