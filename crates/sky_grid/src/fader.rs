//! Fader - visibility value ramping toward an on/off target.

/// Linear fade between hidden (0) and shown (1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fader {
  /// Requested state.
  pub target: bool,
  value: f64,
  duration: f64,
}

impl Fader {
  /// New fader settled at `visible`.
  pub fn new(visible: bool, duration: f64) -> Self {
    Self {
      target: visible,
      value: if visible { 1.0 } else { 0.0 },
      duration,
    }
  }

  /// Current visibility in [0, 1].
  #[inline]
  pub fn value(&self) -> f64 {
    self.value
  }

  /// Advance by `dt` seconds. Returns true if the value moved.
  pub fn update(&mut self, dt: f64) -> bool {
    let goal = if self.target { 1.0 } else { 0.0 };
    if self.value == goal {
      return false;
    }
    let step = if self.duration > 0.0 {
      dt.max(0.0) / self.duration
    } else {
      1.0
    };
    let previous = self.value;
    self.value = if goal > previous {
      (previous + step).min(goal)
    } else {
      (previous - step).max(goal)
    };
    self.value != previous
  }
}
