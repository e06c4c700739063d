//! sky_grid - Framework/engine independent celestial coordinate grids
//!
//! This crate renders azimuthal, equatorial, meridian and ecliptic grids over
//! a projected view of the celestial sphere. Line density follows the field of
//! view, and grid lines that leave the viewport get a coordinate label at the
//! exact border crossing.
//!
//! # Features
//!
//! - **Round-angle step tables**: every admissible step is factored into 2, 3
//!   and 5 so a quadtree lands on whole degrees, minutes and seconds (or hours,
//!   minutes and seconds) at a known depth
//! - **Adaptive step selection**: coarsest acceptable step for the field of
//!   view, with a correction that thins out meridians around the poles
//! - **Quadtree tessellation**: each grid boundary is painted exactly once
//! - **Border labels**: sexagesimal labels oriented along the line, never
//!   upside-down
//!
//! # Example
//!
//! ```ignore
//! use sky_grid::{Lines, LinesConfig, Observer, RecordingCanvas, RenderContext,
//!   StereographicProjection};
//! use glam::DVec2;
//!
//! let fov = 60f64.to_radians();
//! let projection = StereographicProjection::new(fov, DVec2::new(800.0, 600.0));
//! let observer = Observer::new(45f64.to_radians(), 0.0, 0.0, 30f64.to_radians());
//! let ctx = RenderContext { projection: &projection, frames: &observer, fov };
//!
//! let mut lines = Lines::new(LinesConfig::default());
//! lines.set_visible("equatorial", true);
//! lines.update(1.0);
//!
//! let mut canvas = RecordingCanvas::default();
//! let stats = lines.render(&ctx, &mut canvas)?;
//! println!("{} segments, {} labels", stats.segments, stats.labels);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod fader;
pub mod frames;
pub mod grid;
pub mod intersect;
pub mod label;
pub mod lines;
pub mod metrics;
pub mod painter;
pub mod projection;
pub mod qtree;
pub mod steps;
pub mod visitor;

// Re-export commonly used items
pub use config::LinesConfig;
pub use error::TraversalError;
pub use fader::Fader;
pub use frames::{c2s, s2c, FrameConverter, Observer};
pub use grid::{
  find_definition, Frame, GridDefinition, GridTransform, LabelFormat, Rgba, GRID_COUNT,
  GRID_DEFINITIONS,
};
pub use intersect::{check_borders, seg_intersect, Border, BorderCrossing};
pub use label::{format_angle, place_label, LabelPlacement, LabelStyle};
pub use lines::{GridLine, Lines, RenderContext, RenderStats};
pub use metrics::LinesMetrics;
pub use painter::{
  spherical_project, Canvas, CanvasCommand, Painter, RecordingCanvas, SphereSurface, SPHERE_UV,
};
pub use projection::{PerspectiveProjection, Projected, Projection, StereographicProjection};
pub use qtree::{
  traverse_surface, Emit, Emitted, NodeArena, QuadNode, QuadVisitor, SurfaceMap, TraversalStats,
  ViewCone, Visit,
};
pub use steps::{select_steps, theta_range, StepEntry, StepPair, StepTable, STEPS_DEG, STEPS_HOUR};
pub use visitor::GridVisitor;
