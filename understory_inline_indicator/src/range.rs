// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Half-open pixel ranges used to clamp the indicator into the visible band.

/// A half-open range `[start, end)` of pixel offsets.
///
/// ## Semantics
///
/// - [`contains`](Self::contains) includes `start` and excludes `end`.
/// - [`clip`](Self::clip) clamps to `[start, end - 1]`, the last whole pixel row inside the range.
/// - If `end < start` at construction, the range collapses to the empty range at `start`.
///   Clipping into an empty range yields `start`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelRange {
    start: f64,
    end: f64,
}

impl PixelRange {
    /// Create `[start, end)`, collapsing to `[start, start)` when `end < start`.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end_exclusive(&self) -> f64 {
        self.end
    }

    /// Whether the range holds no values.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `value` lies in `[start, end)`.
    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value < self.end
    }

    /// Clamp `value` to `[start, end - 1]`; never below `start`.
    pub fn clip(&self, value: f64) -> f64 {
        if self.is_empty() {
            return self.start;
        }
        self.start.max(value.min(self.end - 1.0))
    }
}
