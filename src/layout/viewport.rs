//! Viewport state: container size and the single shared scroll position.

use super::GridLayout;

/// Scroll deltas below this are treated as no movement.
const SCROLL_EPSILON: f64 = 0.01;

/// The visible area of the grid.
///
/// Scroll offsets are measured within the scrollable content, i.e. from the
/// edge of the fixed rows/columns. Every pane reads the same offsets, which
/// keeps the header row aligned with the body horizontally and the fixed
/// columns aligned with the body vertically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_left: f64,
    pub scroll_top: f64,
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
            ..Self::default()
        }
    }

    /// Resize the container. Scroll is re-clamped by the caller once the new
    /// layout is known.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize(width);
        self.height = sanitize(height);
    }

    /// Space left for the scrollable panes after the fixed rows/columns.
    pub fn body_extent(&self, layout: &GridLayout) -> (f64, f64) {
        (
            (self.width - layout.fixed_columns_width()).max(0.0),
            (self.height - layout.fixed_rows_height()).max(0.0),
        )
    }

    /// Largest (left, top) offsets that still show content.
    pub fn max_scroll(&self, layout: &GridLayout) -> (f64, f64) {
        let (body_w, body_h) = self.body_extent(layout);
        (
            (layout.scrollable_width() - body_w).max(0.0),
            (layout.scrollable_height() - body_h).max(0.0),
        )
    }

    pub fn clamp_scroll(&mut self, layout: &GridLayout) {
        let (max_left, max_top) = self.max_scroll(layout);
        self.scroll_left = sanitize(self.scroll_left).min(max_left);
        self.scroll_top = sanitize(self.scroll_top).min(max_top);
    }

    /// Scroll by a delta. Returns whether the position moved.
    pub fn scroll_by(&mut self, delta_x: f64, delta_y: f64, layout: &GridLayout) -> bool {
        let (left, top) = (self.scroll_left, self.scroll_top);
        self.scroll_left += delta_x;
        self.scroll_top += delta_y;
        self.clamp_scroll(layout);
        moved(left, self.scroll_left) || moved(top, self.scroll_top)
    }

    /// Set the absolute position. Returns whether the position moved.
    pub fn set_scroll(&mut self, left: f64, top: f64, layout: &GridLayout) -> bool {
        let (prev_left, prev_top) = (self.scroll_left, self.scroll_top);
        self.scroll_left = left;
        self.scroll_top = top;
        self.clamp_scroll(layout);
        moved(prev_left, self.scroll_left) || moved(prev_top, self.scroll_top)
    }

    /// Minimal scroll that brings (row, column) into view. Fixed rows and
    /// columns are always in view and leave the matching axis untouched.
    pub fn scroll_to_cell(&mut self, row: usize, column: usize, layout: &GridLayout) -> bool {
        let (body_w, body_h) = self.body_extent(layout);
        let top = layout.rows.scroll_offset_for(
            row,
            &layout.scrollable_row_range(),
            body_h,
            self.scroll_top,
        );
        let left = layout.columns.scroll_offset_for(
            column,
            &layout.scrollable_column_range(),
            body_w,
            self.scroll_left,
        );
        self.set_scroll(left, top, layout)
    }
}

fn sanitize(px: f64) -> f64 {
    if px.is_finite() {
        px.max(0.0)
    } else {
        0.0
    }
}

fn moved(before: f64, after: f64) -> bool {
    (before - after).abs() > SCROLL_EPSILON
}
