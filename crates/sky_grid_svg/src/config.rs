use std::path::Path;

use anyhow::{bail, Context, Result};
use glam::DVec2;
use serde::Deserialize;
use sky_grid::{find_definition, LinesConfig, Observer};

/// Which projection maps the sky onto the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
  Stereographic,
  Perspective,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
  #[serde(default = "default_width")]
  pub width: u32,
  #[serde(default = "default_height")]
  pub height: u32,
  #[serde(default = "default_projection")]
  pub projection: ProjectionKind,
  /// Horizontal field of view in degrees.
  #[serde(default = "default_fov")]
  pub fov_deg: f64,
  /// Grid ids to draw, in any order.
  pub grids: Vec<String>,
  /// SVG fill for the whole canvas; transparent when absent.
  #[serde(default)]
  pub background: Option<String>,
  #[serde(default)]
  pub observer: ObserverConfig,
  #[serde(default)]
  pub view: ViewConfig,
  #[serde(default)]
  pub lines: LinesOverrides,
}

#[derive(Debug, Default, Deserialize)]
pub struct ObserverConfig {
  #[serde(default)]
  pub latitude_deg: f64,
  #[serde(default)]
  pub sidereal_time_hours: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewConfig {
  /// Azimuth from north toward east.
  #[serde(default)]
  pub yaw_deg: f64,
  /// Altitude above the horizon.
  #[serde(default)]
  pub pitch_deg: f64,
}

/// Optional overrides of [`LinesConfig::DEFAULT`].
#[derive(Debug, Default, Deserialize)]
pub struct LinesOverrides {
  pub node_capacity: Option<usize>,
  pub line_subdivisions: Option<usize>,
  pub label_font_size: Option<f64>,
  pub label_margin: Option<f64>,
}

fn default_width() -> u32 {
  1280
}

fn default_height() -> u32 {
  720
}

fn default_projection() -> ProjectionKind {
  ProjectionKind::Stereographic
}

fn default_fov() -> f64 {
  60.0
}

impl RenderConfig {
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Self::parse(&content)
  }

  pub fn parse(content: &str) -> Result<Self> {
    let config: RenderConfig =
      toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    if self.width == 0 || self.height == 0 {
      bail!("Window size must be positive, got {}x{}", self.width, self.height);
    }

    let max_fov = match self.projection {
      ProjectionKind::Stereographic => 360.0,
      ProjectionKind::Perspective => 180.0,
    };
    if !(self.fov_deg > 0.0 && self.fov_deg < max_fov) {
      bail!(
        "fov_deg must be in (0, {}) for {:?}, got {}",
        max_fov,
        self.projection,
        self.fov_deg
      );
    }

    if !(-90.0..=90.0).contains(&self.observer.latitude_deg) {
      bail!("latitude_deg out of range: {}", self.observer.latitude_deg);
    }

    if self.grids.is_empty() {
      bail!("No grids selected");
    }
    for id in &self.grids {
      if find_definition(id).is_none() {
        bail!("Unknown grid '{}'", id);
      }
    }

    if let Some(size) = self.lines.label_font_size {
      if size <= 0.0 {
        bail!("label_font_size must be positive, got {}", size);
      }
    }
    if self.lines.line_subdivisions == Some(0) {
      bail!("line_subdivisions must be at least 1");
    }

    Ok(())
  }

  pub fn window_size(&self) -> DVec2 {
    DVec2::new(self.width as f64, self.height as f64)
  }

  pub fn fov(&self) -> f64 {
    self.fov_deg.to_radians()
  }

  pub fn observer(&self) -> Observer {
    Observer::new(
      self.observer.latitude_deg.to_radians(),
      self.observer.sidereal_time_hours * std::f64::consts::TAU / 24.0,
      self.view.yaw_deg.to_radians(),
      self.view.pitch_deg.to_radians(),
    )
  }

  pub fn lines_config(&self) -> LinesConfig {
    let base = LinesConfig::DEFAULT;
    LinesConfig {
      node_capacity: self.lines.node_capacity.unwrap_or(base.node_capacity),
      line_subdivisions: self.lines.line_subdivisions.unwrap_or(base.line_subdivisions),
      label_font_size: self.lines.label_font_size.unwrap_or(base.label_font_size),
      label_margin: self.lines.label_margin.unwrap_or(base.label_margin),
      ..base
    }
  }
}
