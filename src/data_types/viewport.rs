use serde::{Deserialize, Serialize};

/// Percentage-based time window shared by every chart of a group.
///
/// `start` and `end` are percentages of the data range, not sample indices,
/// so the window keeps its meaning while a series grows or is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: f64,
    pub end: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::FULL
    }
}

impl Viewport {
    pub const FULL: Viewport = Viewport {
        start: 0.0,
        end: 100.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True when both bounds lie in `[0, 100]` and `start <= end`.
    pub fn is_normalized(&self) -> bool {
        self.start >= 0.0 && self.end <= 100.0 && self.start <= self.end
    }

    /// Brings the bounds back into `[0, 100]` with `start <= end`.
    ///
    /// Non-finite bounds fall back to the matching edge of the full range.
    /// An inverted pair collapses onto the clamped start.
    pub fn clamped(&self) -> Self {
        let start = clamp_pct(self.start, 0.0);
        let end = clamp_pct(self.end, 100.0);
        Self {
            start,
            end: end.max(start),
        }
    }
}

fn clamp_pct(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        return fallback;
    }
    value.clamp(0.0, 100.0)
}

/// State held once per chart group: the window plus the drag flag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportState {
    pub viewport: Viewport,
    pub interacting: bool,
}
