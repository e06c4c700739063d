//! Painter - maps grid UV segments to window-space polylines.
//!
//! The drawing backend is a [`Canvas`]. [`RecordingCanvas`] keeps every
//! command in memory, which is what the tests and the SVG exporter use.

use std::f64::consts::{PI, TAU};

use glam::{DMat3, DVec2, DVec3};
use smallvec::SmallVec;

use crate::frames::{s2c, FrameConverter};
use crate::grid::{Frame, Rgba};
use crate::projection::Projection;
use crate::qtree::SurfaceMap;

/// Drawing backend.
pub trait Canvas {
  /// Stroke a connected polyline given in window pixels.
  fn stroke_line_strip(&mut self, points: &[DVec2], color: Rgba);

  /// Size of `text` in pixels when drawn at `font_size`.
  fn text_size(&self, text: &str, font_size: f64) -> DVec2;

  /// Draw `text` centered on `pos`, rotated by `angle` radians.
  fn fill_text(&mut self, text: &str, pos: DVec2, font_size: f64, color: Rgba, angle: f64);
}

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
  LineStrip {
    points: Vec<DVec2>,
    color: Rgba,
  },
  Text {
    text: String,
    pos: DVec2,
    font_size: f64,
    color: Rgba,
    angle: f64,
  },
}

/// Canvas that records commands instead of rasterizing.
///
/// Text is measured with a fixed advance of `0.6 * font_size` per character
/// and a height of `font_size`.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
  pub commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn line_strips(&self) -> impl Iterator<Item = &[DVec2]> + '_ {
    self.commands.iter().filter_map(|cmd| match cmd {
      CanvasCommand::LineStrip { points, .. } => Some(points.as_slice()),
      CanvasCommand::Text { .. } => None,
    })
  }

  /// `(text, pos, angle)` for every recorded label.
  pub fn texts(&self) -> impl Iterator<Item = (&str, DVec2, f64)> + '_ {
    self.commands.iter().filter_map(|cmd| match cmd {
      CanvasCommand::Text {
        text, pos, angle, ..
      } => Some((text.as_str(), *pos, *angle)),
      CanvasCommand::LineStrip { .. } => None,
    })
  }

  pub fn clear(&mut self) {
    self.commands.clear();
  }
}

impl Canvas for RecordingCanvas {
  fn stroke_line_strip(&mut self, points: &[DVec2], color: Rgba) {
    self.commands.push(CanvasCommand::LineStrip {
      points: points.to_vec(),
      color,
    });
  }

  fn text_size(&self, text: &str, font_size: f64) -> DVec2 {
    DVec2::new(0.6 * font_size * text.chars().count() as f64, font_size)
  }

  fn fill_text(&mut self, text: &str, pos: DVec2, font_size: f64, color: Rgba, angle: f64) {
    self.commands.push(CanvasCommand::Text {
      text: text.to_owned(),
      pos,
      font_size,
      color,
      angle,
    });
  }
}

/// Root patch covering the whole sphere, north pole on the leading edge.
pub const SPHERE_UV: [DVec2; 4] = [
  DVec2::new(0.0, 1.0),
  DVec2::new(1.0, 1.0),
  DVec2::new(0.0, 0.0),
  DVec2::new(1.0, 0.0),
];

/// Grid UV to a unit direction: `u` spans the full longitude circle, `v`
/// runs from the south pole (0) to the north pole (1).
#[inline]
pub fn spherical_project(uv: DVec2) -> DVec3 {
  s2c(uv.x * TAU, (uv.y - 0.5) * PI)
}

/// The celestial sphere seen through one grid's frame and transform.
#[derive(Clone, Copy)]
pub struct SphereSurface<'a> {
  pub frames: &'a dyn FrameConverter,
  pub frame: Frame,
  pub transform: DMat3,
}

impl SurfaceMap for SphereSurface<'_> {
  fn map(&self, uv: DVec2) -> DVec3 {
    let dir = self.transform * spherical_project(uv);
    self.frames.convert(self.frame, Frame::View, dir)
  }
}

/// Per-grid drawing state.
pub struct Painter<'a> {
  pub projection: &'a dyn Projection,
  pub frames: &'a dyn FrameConverter,
  pub canvas: &'a mut dyn Canvas,
  /// Stroke color, alpha already multiplied by the grid fade.
  pub color: Rgba,
  /// Extra rotation applied in the grid frame.
  pub transform: DMat3,
}

impl<'a> Painter<'a> {
  /// Surface mapping grid UV into view space for `frame`.
  pub fn surface(&self, frame: Frame) -> SphereSurface<'a> {
    SphereSurface {
      frames: self.frames,
      frame,
      transform: self.transform,
    }
  }

  /// Paint UV segments as window-space polylines.
  ///
  /// Each segment is sampled `split` times along the sphere. A polyline is
  /// broken wherever two neighbouring samples are both off screen, or where
  /// either one cannot be projected. Returns the number of strips drawn.
  pub fn paint_lines(&mut self, frame: Frame, segments: &[[DVec2; 2]], split: usize) -> usize {
    let surface = self.surface(frame);
    let split = split.max(1);
    let mut strips = 0;

    for &[a, b] in segments {
      let samples: SmallVec<[_; 17]> = (0..=split)
        .map(|i| {
          let uv = a.lerp(b, i as f64 / split as f64);
          self.projection.to_ndc(surface.map(uv))
        })
        .collect();

      let mut strip: SmallVec<[DVec2; 17]> = SmallVec::new();
      for pair in samples.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        if p0.front && p1.front && (p0.visible || p1.visible) {
          if strip.is_empty() {
            strip.push(self.projection.ndc_to_window(p0.ndc));
          }
          strip.push(self.projection.ndc_to_window(p1.ndc));
        } else if !strip.is_empty() {
          self.canvas.stroke_line_strip(&strip, self.color);
          strips += 1;
          strip.clear();
        }
      }
      if !strip.is_empty() {
        self.canvas.stroke_line_strip(&strip, self.color);
        strips += 1;
      }
    }
    strips
  }
}

#[cfg(test)]
#[path = "painter_test.rs"]
mod painter_test;
