//! Mapping between the shared percentage viewport and sample indices.
//!
//! Every chart runs these independently against its own series length, so
//! charts whose lengths differ for a moment still agree on the window.

use crate::data_types::Viewport;
use std::ops::Range;

/// Inclusive index bounds of the visible part of a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleWindow {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index: end_index.max(start_index),
        }
    }

    /// Half-open range for slicing a series of `series_len` samples.
    /// Empty when the series is empty.
    pub fn range(&self, series_len: usize) -> Range<usize> {
        if series_len == 0 {
            return 0..0;
        }
        let end = (self.end_index + 1).min(series_len);
        self.start_index.min(end)..end
    }
}

/// Index of the sample sitting at `pct` percent of a series.
pub fn percent_to_index(pct: f64, series_len: usize) -> usize {
    if series_len <= 1 {
        return 0;
    }
    let max_index = series_len - 1;
    let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) };
    let index = (pct / 100.0 * max_index as f64).round() as usize;
    index.min(max_index)
}

/// Derives the visible indices of a series from the shared viewport.
pub fn visible_window(viewport: Viewport, series_len: usize) -> VisibleWindow {
    let start_index = percent_to_index(viewport.start, series_len);
    let end_index = percent_to_index(viewport.end, series_len);
    VisibleWindow::new(start_index, end_index)
}

/// Percentage position of `index` in a series of `series_len` samples.
///
/// The divisor is `max(len - 1, 1)`, so a single-sample series always
/// reports 0 whatever index the renderer sends.
pub fn index_to_percent(index: usize, series_len: usize) -> f64 {
    let max_index = series_len.saturating_sub(1);
    let index = index.min(max_index);
    let ratio = index as f64 / max_index.max(1) as f64;
    ratio.clamp(0.0, 1.0) * 100.0
}

/// Converts a drag reported in index space back into a viewport.
/// The two indices may arrive in either order.
pub fn viewport_from_indices(start_index: usize, end_index: usize, series_len: usize) -> Viewport {
    let (lo, hi) = if start_index <= end_index {
        (start_index, end_index)
    } else {
        (end_index, start_index)
    };
    Viewport::new(
        index_to_percent(lo, series_len),
        index_to_percent(hi, series_len),
    )
}
