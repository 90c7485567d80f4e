use std::ops::Range;

use crate::document::LogDocument;
use crate::error::AppError;
use crate::timecode::Resolution;

/// Query window `[base - tolerance, base + tolerance]` in the units of its
/// resolution. Bounds are signed: a tolerance larger than the base pushes
/// `low` below zero, which simply means the window starts before midnight's
/// first possible timestamp. Wrapping across midnight is not supported.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub resolution: Resolution,
    pub base: i64,
    pub low: i64,
    pub high: i64,
}

impl TimeWindow {
    pub fn from_params(
        time: &str,
        tolerance: &str,
        resolution: Resolution,
    ) -> Result<Self, AppError> {
        let base = i64::from(resolution.decode_prefix(time).ok_or_else(|| {
            AppError::BadRequest(format!("invalid time parameter T: {time:?}"))
        })?);
        let tolerance = i64::from(resolution.decode_prefix(tolerance).ok_or_else(|| {
            AppError::BadRequest(format!("invalid tolerance parameter dT: {tolerance:?}"))
        })?);
        Ok(Self {
            resolution,
            base,
            low: base - tolerance,
            high: base + tolerance,
        })
    }

    /// True when the window lies strictly inside the span `[first, last]`,
    /// i.e. the covered range exceeds the window on both ends. Mere overlap
    /// is not enough.
    pub fn inside(&self, first: i64, last: i64) -> bool {
        first < self.low && last > self.high
    }
}

/// First index in `range` whose line timestamp is >= `target`, or
/// `range.end` when no such line exists. O(log n) probes, no state shared
/// between calls.
fn insertion_point(
    doc: &LogDocument,
    range: Range<usize>,
    target: i64,
    resolution: Resolution,
) -> Result<usize, AppError> {
    let mut low = range.start;
    let mut high = range.end;
    while low < high {
        let mid = low + (high - low) / 2;
        let probe = i64::from(doc.timestamp_at(mid, resolution)?);
        if probe < target {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    Ok(low)
}

/// Inclusive index bounds of the lines falling inside `window`, or `None`
/// when the window contains no lines. Three independent searches: the window
/// center over the whole document, the lower bound over `[0, center)`, and
/// the upper bound over `[lower, len)`. The floor of the final pass is the
/// lower bound, not the center, so duplicates of a boundary timestamp are
/// always swept in whole.
pub fn window_bounds(
    doc: &LogDocument,
    window: &TimeWindow,
) -> Result<Option<(usize, usize)>, AppError> {
    if doc.is_empty() {
        return Err(AppError::EmptyDocument);
    }
    let len = doc.len();
    let resolution = window.resolution;
    let center = insertion_point(doc, 0..len, window.base, resolution)?;
    let start = insertion_point(doc, 0..center, window.low, resolution)?;
    let end = insertion_point(doc, start..len, window.high + 1, resolution)?;
    if end == start {
        Ok(None)
    } else {
        Ok(Some((start, end - 1)))
    }
}
