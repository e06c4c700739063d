//! Recorded canvas commands to SVG markup.
//!
//! Window pixels already have their origin top-left with y down, so points
//! and label rotations map onto SVG user units unchanged.

use std::fmt::{self, Write};

use glam::DVec2;
use sky_grid::{CanvasCommand, Rgba};

/// Render `commands` as a standalone SVG document of `size` pixels.
pub fn to_svg(
  commands: &[CanvasCommand],
  size: DVec2,
  background: Option<&str>,
) -> Result<String, fmt::Error> {
  let mut out = String::new();
  write_svg(&mut out, commands, size, background)?;
  Ok(out)
}

pub fn write_svg<W: Write>(
  out: &mut W,
  commands: &[CanvasCommand],
  size: DVec2,
  background: Option<&str>,
) -> fmt::Result {
  writeln!(
    out,
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
    w = size.x,
    h = size.y
  )?;
  if let Some(fill) = background {
    writeln!(out, r#"  <rect width="100%" height="100%" fill="{}"/>"#, escape(fill))?;
  }

  for cmd in commands {
    match cmd {
      CanvasCommand::LineStrip { points, color } => {
        if points.len() < 2 {
          continue;
        }
        write!(out, r#"  <polyline fill="none" stroke-width="1" "#)?;
        write_paint(out, "stroke", *color)?;
        write!(out, r#" points=""#)?;
        for (i, p) in points.iter().enumerate() {
          if i > 0 {
            out.write_char(' ')?;
          }
          write!(out, "{:.2},{:.2}", p.x, p.y)?;
        }
        writeln!(out, r#""/>"#)?;
      }
      CanvasCommand::Text {
        text,
        pos,
        font_size,
        color,
        angle,
      } => {
        write!(
          out,
          r#"  <text x="{x:.2}" y="{y:.2}" font-size="{font_size}" font-family="sans-serif" "#,
          x = pos.x,
          y = pos.y,
        )?;
        write!(out, r#"text-anchor="middle" dominant-baseline="central" "#)?;
        write!(
          out,
          r#"transform="rotate({deg:.2} {x:.2} {y:.2})" "#,
          deg = angle.to_degrees(),
          x = pos.x,
          y = pos.y,
        )?;
        write_paint(out, "fill", *color)?;
        writeln!(out, ">{}</text>", escape(text))?;
      }
    }
  }

  writeln!(out, "</svg>")
}

fn write_paint<W: Write>(out: &mut W, attr: &str, color: Rgba) -> fmt::Result {
  let [r, g, b] = color.to_rgb8();
  write!(out, r#"{attr}="rgb({r},{g},{b})""#)?;
  if color.a < 1.0 {
    write!(out, r#" {attr}-opacity="{:.3}""#, color.a.clamp(0.0, 1.0))?;
  }
  Ok(())
}

fn escape(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

#[cfg(test)]
mod tests {
  use std::f64::consts::FRAC_PI_2;

  use super::*;

  const SIZE: DVec2 = DVec2::new(200.0, 100.0);

  #[test]
  fn test_empty_document() {
    let svg = to_svg(&[], SIZE, None).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 200 100""#));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(!svg.contains("<rect"));
  }

  #[test]
  fn test_background() {
    let svg = to_svg(&[], SIZE, Some("#102030")).unwrap();
    assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#102030"/>"##));
  }

  #[test]
  fn test_polyline() {
    let commands = [CanvasCommand::LineStrip {
      points: vec![DVec2::new(0.0, 0.0), DVec2::new(10.5, 20.25)],
      color: Rgba::from_hex(0xff000080),
    }];
    let svg = to_svg(&commands, SIZE, None).unwrap();
    assert!(svg.contains(r#"points="0.00,0.00 10.50,20.25""#), "{}", svg);
    assert!(svg.contains(r#"stroke="rgb(255,0,0)""#));
    assert!(svg.contains(r#"stroke-opacity="0.502""#));
  }

  #[test]
  fn test_degenerate_strip_skipped() {
    let commands = [CanvasCommand::LineStrip {
      points: vec![DVec2::ZERO],
      color: Rgba::from_hex(0xffffffff),
    }];
    let svg = to_svg(&commands, SIZE, None).unwrap();
    assert!(!svg.contains("<polyline"));
  }

  #[test]
  fn test_rotated_text() {
    let commands = [CanvasCommand::Text {
      text: "+45°30'".to_owned(),
      pos: DVec2::new(50.0, 60.0),
      font_size: 13.0,
      color: Rgba::from_hex(0x336699ff),
      angle: -FRAC_PI_2,
    }];
    let svg = to_svg(&commands, SIZE, None).unwrap();
    assert!(svg.contains(r#"transform="rotate(-90.00 50.00 60.00)""#), "{}", svg);
    assert!(svg.contains(r#"fill="rgb(51,102,153)""#));
    assert!(!svg.contains("fill-opacity"), "opaque text has no opacity");
    assert!(svg.contains(">+45°30'</text>"));
  }

  #[test]
  fn test_escape() {
    assert_eq!(escape(r#"+12"<&>"#), "+12&quot;&lt;&amp;&gt;");
  }
}
