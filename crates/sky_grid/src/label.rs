//! Border labels.
//!
//! A grid line leaving the viewport gets its coordinate printed right at the
//! crossing, rotated along the line and pushed inside the window.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use crate::config::LinesConfig;
use crate::constants::{
  DEG_MINUTES_MAX_N, DEG_WHOLE_MAX_N, HOUR_MINUTES_MAX_N, HOUR_WHOLE_MAX_N, LABEL_TANGENT_OFFSET,
  MIN_LABEL_INCIDENCE,
};
use crate::grid::{LabelFormat, Rgba};
use crate::intersect::BorderCrossing;
use crate::painter::Canvas;

/// Text settings for border labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
  pub font_size: f64,
  /// Offset from the border along its inward normal, pixels.
  pub margin: f64,
  /// Line color; labels are drawn fully opaque regardless of its alpha.
  pub color: Rgba,
}

impl LabelStyle {
  pub fn new(config: &LinesConfig, color: Rgba) -> Self {
    Self {
      font_size: config.label_font_size,
      margin: config.label_margin,
      color,
    }
  }
}

/// A drawn label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
  pub text: String,
  /// Text center, window pixels.
  pub pos: DVec2,
  /// Rotation, radians in [-π/2, π/2].
  pub angle: f64,
}

/// Sexagesimal split of `value` (in whole units) rounded to a tenth of the
/// third field: `(units, minutes, seconds)`.
fn sexagesimal(value: f64) -> (u64, u64, u64) {
  let tenths = (value.abs() * 36_000.0).round() as u64;
  let seconds = tenths / 10;
  (seconds / 3600, (seconds / 60) % 60, seconds % 60)
}

/// Format an angle for a grid line at step `step_n`.
///
/// The precision follows the step: a grid of whole degrees (or hours) never
/// prints minutes. Degrees are used for [`LabelFormat::Degrees`], hours of
/// right ascension for [`LabelFormat::Hours`].
pub fn format_angle(angle: f64, format: LabelFormat, step_n: u32) -> String {
  let sign = if angle < 0.0 { '-' } else { '+' };
  match format {
    LabelFormat::Degrees => {
      let (d, m, s) = sexagesimal(angle.to_degrees());
      if step_n <= DEG_WHOLE_MAX_N {
        format!("{sign}{d}°")
      } else if step_n <= DEG_MINUTES_MAX_N {
        format!("{sign}{d}°{m:02}'")
      } else {
        format!("{sign}{d}°{m:02}'{s:02}\"")
      }
    }
    LabelFormat::Hours => {
      let (h, m, s) = sexagesimal(angle / TAU * 24.0);
      if step_n <= HOUR_WHOLE_MAX_N {
        format!("{sign}{h}h")
      } else if step_n <= HOUR_MINUTES_MAX_N {
        format!("{sign}{h}h{m:02}m")
      } else {
        format!("{sign}{h}h{m:02}m{s:02}s")
      }
    }
  }
}

/// Fold an angle into [-π/2, π/2] so text never reads upside-down.
fn upright(angle: f64) -> f64 {
  if angle > FRAC_PI_2 {
    angle - PI
  } else if angle < -FRAC_PI_2 {
    angle + PI
  } else {
    angle
  }
}

/// Place and draw the label of a grid line crossing the viewport border.
///
/// `uv` is the node origin the line starts from. Axis 0 lines carry a
/// longitude (`uv.x` over the full circle) written in the grid's `format`;
/// axis 1 lines carry a latitude (`uv.y` from -90° to +90°), always in
/// degrees.
///
/// Returns None when the line meets the border at too grazing an angle.
pub fn place_label(
  crossing: &BorderCrossing,
  uv: DVec2,
  axis: usize,
  format: LabelFormat,
  step_n: u32,
  canvas: &mut dyn Canvas,
  style: &LabelStyle,
) -> Option<LabelPlacement> {
  let v = crossing.normal;
  let mut u = crossing.direction;
  let mut n = u.try_normalize()?;

  let incidence = n.dot(v);
  if incidence.abs() < MIN_LABEL_INCIDENCE {
    return None;
  }
  if incidence < 0.0 {
    u = -u;
    n = -n;
  }
  let angle = upright(u.y.atan2(u.x));

  let (value, format) = if axis == 0 {
    (uv.x * TAU, format)
  } else {
    ((uv.y - 0.5) * PI, LabelFormat::Degrees)
  };
  let text = format_angle(value, format, step_n);

  let size = canvas.text_size(&text, style.font_size);
  let mut pos = crossing.point + n * size.x / 2.0 + v * style.margin;
  pos += DVec2::new(v.y.abs(), v.x.abs()) * size.y * LABEL_TANGENT_OFFSET;

  canvas.fill_text(&text, pos, style.font_size, style.color.with_alpha(1.0), angle);
  Some(LabelPlacement { text, pos, angle })
}

#[cfg(test)]
#[path = "label_test.rs"]
mod label_test;
