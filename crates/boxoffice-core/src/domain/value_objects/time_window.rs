//! Time window value object and interval arithmetic
//!
//! Windows are half-open `[start, end)`: two windows that merely touch at
//! a shared boundary instant do not overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Window validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// `start` is not strictly before `end`
    #[error("window start {start} is not before its end {end}")]
    Inverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Violations of the parent/child window containment rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NestingError {
    /// The inner window leaves the bounds of its parent
    #[error("window {inner} exceeds its parent bounds {outer}")]
    OutOfBounds { inner: TimeWindow, outer: TimeWindow },
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a validated window
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        let window = Self::unchecked(start, end);
        window.validate()?;
        Ok(window)
    }

    /// Create a window without validating it.
    ///
    /// Form state arrives raw from the editing UI; validation reports
    /// problems instead of preventing construction.
    pub fn unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window start (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end (exclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Fails when `start >= end`
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.start >= self.end {
            return Err(WindowError::Inverted {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Check that this window lies entirely within `outer`
    pub fn check_nested_in(&self, outer: &TimeWindow) -> Result<(), NestingError> {
        if self.start < outer.start || self.end > outer.end {
            return Err(NestingError::OutOfBounds {
                inner: *self,
                outer: *outer,
            });
        }
        Ok(())
    }

    /// Half-open overlap test; touching boundaries do not overlap
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the window
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Report every overlapping pair among `windows`.
///
/// Pairs come back as `(lower index, higher index)` into the input slice,
/// each overlapping pair exactly once, in an order independent of the
/// input permutation. Sort by `(start, original index)` then sweep an
/// active set: O(n log n + k) for k reported pairs. Callers are expected
/// to hand in windows that passed [`TimeWindow::validate`].
pub fn find_overlapping_pairs(windows: &[TimeWindow]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..windows.len()).collect();
    // tie-break on the original index keeps reporting deterministic
    order.sort_by_key(|&i| (windows[i].start, i));

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for &index in &order {
        let window = &windows[index];
        active.retain(|&open| windows[open].end > window.start);
        for &open in &active {
            if windows[open].overlaps(window) {
                let (first, second) = if open < index {
                    (open, index)
                } else {
                    (index, open)
                };
                pairs.push((first, second));
            }
        }
        active.push(index);
    }
    pairs.sort_unstable();
    pairs
}
