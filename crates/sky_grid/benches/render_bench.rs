//! Grid rendering benchmarks.
//!
//! - **step selection**: the pure table lookup, including the pole correction
//! - **full render**: every grid visible, recorded into a `RecordingCanvas`,
//!   across fields of view from wide angle to telescope
//! - **pole**: equatorial grid centered on the celestial pole, where meridians
//!   converge and the pole correction kicks in

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use sky_grid::{
  select_steps, LabelFormat, Lines, LinesConfig, Observer, RecordingCanvas, RenderContext,
  StereographicProjection,
};

const WINDOW: DVec2 = DVec2::new(1920.0, 1080.0);

fn all_visible() -> Lines {
  let mut lines = Lines::new(LinesConfig::default());
  for id in ["azimuthal", "equatorial", "meridian", "ecliptic"] {
    lines.set_visible(id, true);
  }
  lines.update(1.0);
  lines
}

fn bench_select_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("select_steps");
  group.bench_function("degrees", |b| {
    b.iter(|| select_steps(black_box(0.7), LabelFormat::Degrees, black_box(0.5)))
  });
  group.bench_function("hours_pole", |b| {
    b.iter(|| select_steps(black_box(0.01), LabelFormat::Hours, black_box(6.28)))
  });
  group.finish();
}

fn bench_full_render(c: &mut Criterion) {
  let mut group = c.benchmark_group("render/all_grids");
  let observer = Observer::new(45f64.to_radians(), 1.0, 0.3, 30f64.to_radians());

  for fov_deg in [120.0, 60.0, 10.0, 1.0] {
    let fov = f64::to_radians(fov_deg);
    let projection = StereographicProjection::new(fov, WINDOW);
    let ctx = RenderContext {
      projection: &projection,
      frames: &observer,
      fov,
    };
    let mut lines = all_visible();
    let mut canvas = RecordingCanvas::new();

    group.bench_with_input(
      BenchmarkId::new("stereographic", format!("fov={}", fov_deg)),
      &fov_deg,
      |b, _| {
        b.iter(|| {
          canvas.clear();
          let stats = lines.render(black_box(&ctx), &mut canvas);
          black_box(stats)
        })
      },
    );
  }
  group.finish();
}

fn bench_pole(c: &mut Criterion) {
  let fov = 20f64.to_radians();
  let lat = 50f64.to_radians();
  // Facing north with the pitch equal to the latitude: the pole is centered.
  let observer = Observer::new(lat, 0.0, 0.0, lat);
  let projection = StereographicProjection::new(fov, WINDOW);
  let ctx = RenderContext {
    projection: &projection,
    frames: &observer,
    fov,
  };
  let mut lines = Lines::default();
  lines.set_visible("equatorial", true);
  lines.update(1.0);
  let mut canvas = RecordingCanvas::new();

  c.bench_function("render/equatorial_pole", |b| {
    b.iter(|| {
      canvas.clear();
      black_box(lines.render(&ctx, &mut canvas))
    })
  });
}

criterion_group!(benches, bench_select_steps, bench_full_render, bench_pole);
criterion_main!(benches);
