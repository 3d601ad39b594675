//! Cumulative offsets along one axis (rows or columns).
//!
//! Sizes are measured once and turned into edge positions so that index
//! lookups at a pixel offset are O(log n) and span sizes are O(1).

use std::ops::Range;

/// Pre-computed edge positions for `count` items.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// `positions[i]` is the leading edge of item `i`; the final entry is the
    /// trailing edge of the last item.
    positions: Vec<f64>,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            positions: vec![0.0],
        }
    }
}

impl Axis {
    /// Measure `count` items with `size(index)`. Negative or non-finite sizes
    /// count as zero.
    pub fn measure<F>(count: usize, size: F) -> Self
    where
        F: Fn(usize) -> f64,
    {
        let mut positions = Vec::with_capacity(count + 1);
        let mut edge = 0.0;
        for index in 0..count {
            positions.push(edge);
            let s = size(index);
            if s.is_finite() && s > 0.0 {
                edge += s;
            }
        }
        positions.push(edge);
        Self { positions }
    }

    pub fn uniform(count: usize, size: f64) -> Self {
        Self::measure(count, |_| size)
    }

    pub fn count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Leading edge of `index`; the total length for indices past the end.
    pub fn offset(&self, index: usize) -> f64 {
        self.positions
            .get(index)
            .copied()
            .unwrap_or_else(|| self.total())
    }

    /// Size of `index`, or 0 past the end.
    pub fn size(&self, index: usize) -> f64 {
        if index >= self.count() {
            return 0.0;
        }
        self.offset(index + 1) - self.offset(index)
    }

    /// Length covered by the items in `range`.
    pub fn span(&self, range: &Range<usize>) -> f64 {
        if range.is_empty() {
            return 0.0;
        }
        self.offset(range.end) - self.offset(range.start)
    }

    pub fn total(&self) -> f64 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Item containing pixel `px`. Offsets past the end map to the last item.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let after = self.positions.partition_point(|&edge| edge <= px);
        Some(after.saturating_sub(1).min(self.count() - 1))
    }

    /// Items of `within` whose extent intersects the window
    /// `[scroll, scroll + extent)`, where `scroll` is measured from the
    /// leading edge of `within.start`. Widened by `overscan` items on both
    /// sides, never leaving `within`.
    pub fn visible_range(
        &self,
        within: Range<usize>,
        scroll: f64,
        extent: f64,
        overscan: usize,
    ) -> Range<usize> {
        let within = within.start.min(self.count())..within.end.min(self.count());
        if within.is_empty() || extent <= 0.0 {
            return within.start..within.start;
        }

        let base = self.offset(within.start);
        let window_start = base + scroll.max(0.0);
        let window_end = window_start + extent;

        let first = self
            .positions
            .partition_point(|&edge| edge <= window_start)
            .saturating_sub(1);
        let end = self.positions.partition_point(|&edge| edge < window_end);

        let first = first.clamp(within.start, within.end);
        let end = end.clamp(first, within.end);
        if first == end {
            return first..first;
        }

        let start = first.saturating_sub(overscan).max(within.start);
        start..end.saturating_add(overscan).min(within.end)
    }

    /// Scroll offset (relative to `within.start`) that brings `index` fully
    /// into a window of `extent`, moving as little as possible from
    /// `current`.
    pub fn scroll_offset_for(
        &self,
        index: usize,
        within: &Range<usize>,
        extent: f64,
        current: f64,
    ) -> f64 {
        if !within.contains(&index) {
            return current;
        }
        let base = self.offset(within.start);
        let top = self.offset(index) - base;
        let bottom = top + self.size(index);
        if top < current {
            top
        } else if bottom > current + extent {
            (bottom - extent).max(0.0)
        } else {
            current
        }
    }
}
