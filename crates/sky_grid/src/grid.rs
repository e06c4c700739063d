//! Grid definitions - the four compiled-in coordinate grids.

/// Reference frame of a direction vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Frame {
  /// Local horizon: x north, y east, z zenith.
  Observed,
  /// Equatorial (ICRF): x toward the equinox, z toward the celestial pole.
  Icrf,
  /// Camera space: x right, y up, looking down -z.
  View,
}

/// Label style of a grid's meridians.
///
/// Parallels are always labeled in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelFormat {
  Degrees,
  Hours,
}

/// Extra rotation applied to grid coordinates before frame conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridTransform {
  Identity,
  /// Rotates the 0°/180° great circle onto the ecliptic.
  Ecliptic,
}

/// Linear RGBA color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
  pub r: f64,
  pub g: f64,
  pub b: f64,
  pub a: f64,
}

impl Rgba {
  /// Parse a `0xRRGGBBAA` constant.
  pub fn from_hex(hex: u32) -> Self {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f64 / 255.0;
    Self {
      r: channel(24),
      g: channel(16),
      b: channel(8),
      a: channel(0),
    }
  }

  /// Same color with a different alpha.
  #[inline]
  pub fn with_alpha(self, a: f64) -> Self {
    Self { a, ..self }
  }

  /// 8-bit RGB components.
  pub fn to_rgb8(self) -> [u8; 3] {
    let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(self.r), q(self.g), q(self.b)]
  }
}

/// Immutable description of one grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDefinition {
  pub name: &'static str,
  pub id: &'static str,
  /// `0xRRGGBBAA`.
  pub color: u32,
  pub frame: Frame,
  /// `None` renders without labels.
  pub label_format: Option<LabelFormat>,
  /// Render every line of the family, or only the meridian great circle.
  pub is_full_grid: bool,
  pub transform: GridTransform,
}

/// Number of compiled-in grids.
pub const GRID_COUNT: usize = 4;

pub static GRID_DEFINITIONS: [GridDefinition; GRID_COUNT] = [
  GridDefinition {
    name: "Azimuthal",
    id: "azimuthal",
    color: 0x4c3319ff,
    frame: Frame::Observed,
    label_format: Some(LabelFormat::Degrees),
    is_full_grid: true,
    transform: GridTransform::Identity,
  },
  GridDefinition {
    name: "Equatorial",
    id: "equatorial",
    color: 0x2a81ad80,
    frame: Frame::Icrf,
    label_format: Some(LabelFormat::Hours),
    is_full_grid: true,
    transform: GridTransform::Identity,
  },
  GridDefinition {
    name: "Meridian",
    id: "meridian",
    color: 0x339933ff,
    frame: Frame::Observed,
    label_format: None,
    is_full_grid: false,
    transform: GridTransform::Identity,
  },
  GridDefinition {
    name: "Ecliptic",
    id: "ecliptic",
    color: 0xb33333ff,
    frame: Frame::Observed,
    label_format: None,
    is_full_grid: false,
    transform: GridTransform::Ecliptic,
  },
];

/// Look up a definition by id.
pub fn find_definition(id: &str) -> Option<&'static GridDefinition> {
  GRID_DEFINITIONS.iter().find(|def| def.id == id)
}
