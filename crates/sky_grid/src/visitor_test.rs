use std::collections::HashSet;
use std::f64::consts::PI;

use glam::DMat3;

use super::*;
use crate::frames::FrameConverter;
use crate::grid::{find_definition, Rgba};
use crate::painter::{RecordingCanvas, SPHERE_UV};
use crate::projection::{Projected, Projection};
use crate::qtree::{traverse_surface, NodeArena};
use crate::steps::{select_steps, STEPS_DEG, STEPS_HOUR};

/// Every frame is the same frame.
struct Identity;

impl FrameConverter for Identity {
  fn convert(&self, _from: Frame, _to: Frame, v: DVec3) -> DVec3 {
    v
  }

  fn ecliptic_to_observed(&self) -> DMat3 {
    DMat3::IDENTITY
  }
}

/// Equirectangular all-sky view: x = longitude, y = sin(latitude).
struct Panorama;

impl Projection for Panorama {
  fn window_size(&self) -> DVec2 {
    DVec2::new(3600.0, 1800.0)
  }

  fn to_ndc(&self, v: DVec3) -> Projected {
    let v = v.normalize();
    Projected {
      ndc: DVec2::new(v.y.atan2(v.x) / PI, v.z),
      visible: true,
      front: true,
    }
  }

  fn backward(&self, _ndc: DVec2) -> DVec3 {
    DVec3::Z
  }
}

fn render(grid: &str, steps: StepPair, canvas: &mut RecordingCanvas) -> (usize, usize) {
  let def = find_definition(grid).unwrap();
  let painter = Painter {
    projection: &Panorama,
    frames: &Identity,
    canvas,
    color: Rgba::from_hex(def.color),
    transform: DMat3::IDENTITY,
  };
  let mut visitor = GridVisitor::new(painter, def, steps, &LinesConfig::DEFAULT);
  let surface = visitor.painter.surface(def.frame);
  let mut arena = NodeArena::default();
  traverse_surface(&mut arena, &SPHERE_UV, &surface, &Panorama, &mut visitor).unwrap();
  (visitor.segments, visitor.labels)
}

fn hour_steps() -> StepPair {
  // 30m meridians, 10° parallels.
  StepPair {
    steps: [&STEPS_HOUR[6], &STEPS_DEG[7]],
  }
}

fn is_degenerate(strip: &[DVec2]) -> bool {
  strip.iter().all(|p| (*p - strip[0]).length() < 1e-6)
}

fn is_meridian(strip: &[DVec2]) -> bool {
  strip.iter().all(|p| (p.x - strip[0].x).abs() < 1e-6)
}

/// Each grid boundary is painted exactly once.
#[test]
fn test_each_boundary_emitted_once() {
  let mut canvas = RecordingCanvas::new();
  let (segments, labels) = render("equatorial", hour_steps(), &mut canvas);
  assert_eq!(labels, 0, "no border crossings in an all-sky view");

  let strips: Vec<_> = canvas.line_strips().collect();
  assert_eq!(strips.len(), segments);

  // 48 meridians cut into 18 rows, 18 parallels cut into 16 columns.
  assert_eq!(segments, 48 * 18 + 18 * 16);

  let mut seen = HashSet::new();
  for strip in strips.iter().filter(|s| !is_degenerate(s)) {
    let key: Vec<_> = strip
      .iter()
      .map(|p| ((p.x * 1e3).round() as i64, (p.y * 1e3).round() as i64))
      .collect();
    assert!(seen.insert(key), "boundary painted twice: {:?}", strip);
  }
}

#[test]
fn test_every_meridian_present() {
  let mut canvas = RecordingCanvas::new();
  render("equatorial", hour_steps(), &mut canvas);

  let meridians: Vec<_> = canvas
    .line_strips()
    .filter(|s| !is_degenerate(s) && is_meridian(s))
    .collect();
  assert_eq!(meridians.len(), 48 * 18);

  let columns: HashSet<i64> = meridians.iter().map(|s| s[0].x.round() as i64).collect();
  assert_eq!(columns.len(), 48);
}

/// Single-line grids draw the 0°/180° great circle and no parallels.
#[test]
fn test_single_line_grid() {
  let mut canvas = RecordingCanvas::new();
  let (segments, labels) = render("meridian", StepPair::single_line(), &mut canvas);
  assert_eq!(segments, 4);
  assert_eq!(labels, 0);

  let columns: HashSet<i64> = canvas
    .line_strips()
    .inspect(|s| assert!(is_meridian(s)))
    .map(|s| s[0].x.round() as i64)
    .collect();
  // u = 0 sits at the window center, u = 0.5 at the right edge.
  assert_eq!(columns, HashSet::from([1800, 3600]));
}

/// Latitude in degrees of a parallel drawn through [`Panorama`].
fn parallel_latitude(strip: &[DVec2]) -> Option<f64> {
  let y = strip[0].y;
  if is_meridian(strip) || strip.iter().any(|p| (p.y - y).abs() > 1e-6) {
    return None;
  }
  Some((1.0 - 2.0 * y / 1800.0).clamp(-1.0, 1.0).asin().to_degrees())
}

/// Parallels sit on whole steps even when the meridian axis has run out of
/// splits before the latitude axis resolves.
#[test]
fn test_parallels_on_step_boundaries() {
  let cases = [
    (select_steps(170f64.to_radians(), LabelFormat::Hours, 0.0), 24),
    // Pole in view: the hour axis is coarsened.
    (select_steps(30f64.to_radians(), LabelFormat::Hours, 6.2), 72),
  ];
  for (steps, n) in cases {
    assert_eq!(steps.axis(1).n, n);
    let step_deg = 360.0 / n as f64;

    let mut canvas = RecordingCanvas::new();
    render("equatorial", steps, &mut canvas);
    let latitudes: Vec<f64> = canvas.line_strips().filter_map(parallel_latitude).collect();
    for &lat in &latitudes {
      let k = lat / step_deg;
      assert!(
        (k - k.round()).abs() < 1e-6,
        "parallel at {}° is not a multiple of {}°",
        lat,
        step_deg
      );
    }

    // One row per step between the poles.
    let rows: HashSet<i64> = latitudes
      .iter()
      .filter(|lat| lat.abs() < 89.9)
      .map(|lat| (lat / step_deg).round() as i64)
      .collect();
    assert_eq!(rows.len(), n as usize / 2 - 1, "n = {}", n);
  }
}

fn visitor_for<'a>(canvas: &'a mut RecordingCanvas, steps: StepPair) -> GridVisitor<'a> {
  let def = find_definition("azimuthal").unwrap();
  let painter = Painter {
    projection: &Panorama,
    frames: &Identity,
    canvas,
    color: Rgba::from_hex(def.color),
    transform: DMat3::IDENTITY,
  };
  GridVisitor::new(painter, def, steps, &LinesConfig::DEFAULT)
}

#[test]
fn test_root_split_sequence() {
  let mut canvas = RecordingCanvas::new();
  let mut visitor = visitor_for(&mut canvas, hour_steps());
  let at = |level| QuadNode {
    level,
    ..QuadNode::ROOT
  };
  assert_eq!(visitor.root_split(&at(0)), [2, 2]);
  assert_eq!(visitor.root_split(&at(1)), [2, 3]);
  assert_eq!(visitor.root_split(&at(3)), [2, 1]);
  assert_eq!(visitor.root_split(&at(4)), [3, 1]);
  // Both axes exhausted.
  assert_eq!(visitor.root_split(&at(5)), [2, 2]);
}

#[test]
fn test_after_visibility() {
  let mut canvas = RecordingCanvas::new();
  let mut visitor = visitor_for(&mut canvas, hour_steps());
  let at = |level| QuadNode {
    level,
    ..QuadNode::ROOT
  };
  assert_eq!(visitor.after_visibility(&at(3)), Visit::Subdivide);
  assert_eq!(visitor.after_visibility(&at(4)), Visit::Render);

  // Coarse steps still descend to level 2.
  let mut visitor = visitor_for(&mut canvas, StepPair::single_line());
  assert_eq!(visitor.after_visibility(&at(1)), Visit::Subdivide);
  assert_eq!(visitor.after_visibility(&at(2)), Visit::Render);
}

#[test]
fn test_axis_visible() {
  let mut canvas = RecordingCanvas::new();
  let visitor = visitor_for(&mut canvas, StepPair::single_line());
  let node = |xy: [u32; 2]| QuadNode {
    level: 2,
    xy,
    divisions: [4, 2],
    crossed: [false; 2],
  };
  assert!(visitor.axis_visible(&node([0, 1]), 0));
  assert!(!visitor.axis_visible(&node([1, 1]), 0));
  assert!(visitor.axis_visible(&node([2, 0]), 0));

  let shallow = QuadNode::ROOT;
  let visitor = visitor_for(&mut canvas, hour_steps());
  assert!(!visitor.axis_visible(&shallow, 0));
}

/// A node whose edges are already crossed draws nothing.
#[test]
fn test_emit_skips_crossed_axes() {
  let mut canvas = RecordingCanvas::new();
  let mut visitor = visitor_for(&mut canvas, hour_steps());
  let node = QuadNode {
    level: 5,
    xy: [0, 3],
    divisions: [48, 18],
    crossed: [true, true],
  };
  let uv = node.corners(&SPHERE_UV);
  let pos = uv.map(crate::painter::spherical_project);
  let emitted = visitor.emit(&node, &uv, &pos);
  assert_eq!(emitted.crossed, [true, true]);
  assert_eq!(emitted.next, Emit::Stop);
  assert_eq!(visitor.segments, 0);
}
