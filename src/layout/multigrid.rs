//! MultiGrid layout engine.
//!
//! One logical grid split into four panes around the fixed rows/columns. All
//! panes read a single shared [`Viewport`], so a vertical scroll of the main
//! pane moves the bottom-left pane by the same offset and a horizontal scroll
//! moves the top-right pane. Fixed offsets never diverge because there is
//! only one copy of them.

use log::{debug, trace};
use serde::Serialize;

use super::{GridLayout, GridMetrics, Rect, Region, RegionKind, Viewport};

/// Extra rows/columns rendered past each edge of a scrolling pane.
pub const DEFAULT_OVERSCAN: usize = 1;

/// Scroll position of the main pane, as reported to scroll listeners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollInfo {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_height: f64,
    pub scroll_width: f64,
    pub client_height: f64,
    pub client_width: f64,
}

#[derive(Debug, Clone)]
pub struct MultiGrid {
    layout: GridLayout,
    viewport: Viewport,
    /// Requested fixed counts; the layout holds the clamped values.
    fixed_rows: usize,
    fixed_columns: usize,
    overscan_rows: usize,
    overscan_columns: usize,
    measurements: u64,
}

impl Default for MultiGrid {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl MultiGrid {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            layout: GridLayout::default(),
            viewport: Viewport::new(width, height),
            fixed_rows: 0,
            fixed_columns: 0,
            overscan_rows: DEFAULT_OVERSCAN,
            overscan_columns: DEFAULT_OVERSCAN,
            measurements: 0,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of times the cached sizes have been re-measured.
    pub fn measurement_count(&self) -> u64 {
        self.measurements
    }

    pub fn set_overscan(&mut self, rows: usize, columns: usize) {
        self.overscan_rows = rows;
        self.overscan_columns = columns;
    }

    /// Container resize. Clamps the scroll against the current layout.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Change the fixed counts. Sizes are already measured, so only the pane
    /// boundaries move.
    pub fn set_fixed_counts(&mut self, rows: usize, columns: usize) {
        self.fixed_rows = rows;
        self.fixed_columns = columns;
        self.layout.fixed_rows = rows.min(self.layout.row_count());
        self.layout.fixed_columns = columns.min(self.layout.column_count());
        self.viewport.clamp_scroll(&self.layout);
    }

    /// Drop cached row heights and column widths and measure them again.
    pub fn recompute_grid_size(&mut self, metrics: &dyn GridMetrics) {
        self.layout = GridLayout::measure(metrics, self.fixed_rows, self.fixed_columns);
        self.viewport.clamp_scroll(&self.layout);
        self.measurements += 1;
        debug!(
            "grid re-measured: {}x{} cells, {:.0}x{:.0}px",
            self.layout.row_count(),
            self.layout.column_count(),
            self.layout.total_width(),
            self.layout.total_height()
        );
    }

    /// The four panes windowed against the current scroll position.
    pub fn regions(&self) -> [Region; 4] {
        RegionKind::ALL.map(|kind| self.region(kind))
    }

    pub fn region(&self, kind: RegionKind) -> Region {
        let layout = &self.layout;
        let vp = &self.viewport;
        let fixed_w = layout.fixed_columns_width().min(vp.width);
        let fixed_h = layout.fixed_rows_height().min(vp.height);
        let (body_w, body_h) = (vp.width - fixed_w, vp.height - fixed_h);

        let (x, width, scroll_left, overscan_x) = if kind.scrolls_x() {
            (fixed_w, body_w, vp.scroll_left, self.overscan_columns)
        } else {
            (0.0, fixed_w, 0.0, 0)
        };
        let (y, height, scroll_top, overscan_y) = if kind.scrolls_y() {
            (fixed_h, body_h, vp.scroll_top, self.overscan_rows)
        } else {
            (0.0, fixed_h, 0.0, 0)
        };

        let rows = kind.row_range(layout);
        let columns = kind.column_range(layout);
        let visible_rows = layout
            .rows
            .visible_range(rows.clone(), scroll_top, height, overscan_y);
        let visible_columns =
            layout
                .columns
                .visible_range(columns.clone(), scroll_left, width, overscan_x);

        Region {
            kind,
            rect: Rect {
                x,
                y,
                width,
                height,
            },
            content_width: layout.columns.span(&columns),
            content_height: layout.rows.span(&rows),
            rows,
            columns,
            visible_rows,
            visible_columns,
            scroll_left,
            scroll_top,
            scrollbar_hidden: kind.hides_scrollbar(),
        }
    }

    /// Set the shared scroll offsets. Returns the new scroll info when the
    /// position actually moved.
    pub fn scroll_to(&mut self, left: f64, top: f64) -> Option<ScrollInfo> {
        let moved = self.viewport.set_scroll(left, top, &self.layout);
        trace!(
            "scroll_to({left:.1}, {top:.1}) -> ({:.1}, {:.1})",
            self.viewport.scroll_left,
            self.viewport.scroll_top
        );
        moved.then(|| self.scroll_info())
    }

    /// Wheel/drag input on one pane. Axes the pane does not scroll are
    /// ignored; the resulting offsets apply to every pane.
    pub fn scroll_region(&mut self, kind: RegionKind, dx: f64, dy: f64) -> Option<ScrollInfo> {
        let dx = if kind.scrolls_x() { dx } else { 0.0 };
        let dy = if kind.scrolls_y() { dy } else { 0.0 };
        let moved = self.viewport.scroll_by(dx, dy, &self.layout);
        trace!("scroll {kind:?} by ({dx:.1}, {dy:.1}), moved={moved}");
        moved.then(|| self.scroll_info())
    }

    /// Scroll the minimum amount needed to show grid cell (row, column).
    pub fn scroll_to_cell(&mut self, row: usize, column: usize) -> Option<ScrollInfo> {
        let moved = self.viewport.scroll_to_cell(row, column, &self.layout);
        moved.then(|| self.scroll_info())
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        let (client_width, client_height) = self.viewport.body_extent(&self.layout);
        ScrollInfo {
            scroll_top: self.viewport.scroll_top,
            scroll_left: self.viewport.scroll_left,
            scroll_height: self.layout.scrollable_height(),
            scroll_width: self.layout.scrollable_width(),
            client_height,
            client_width,
        }
    }

    /// Grid cell under container point (x, y), if any.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let vp = &self.viewport;
        if x < 0.0 || y < 0.0 || x >= vp.width || y >= vp.height {
            return None;
        }
        let fixed_w = self.layout.fixed_columns_width();
        let fixed_h = self.layout.fixed_rows_height();
        let content_x = if x < fixed_w { x } else { x + vp.scroll_left };
        let content_y = if y < fixed_h { y } else { y + vp.scroll_top };
        if content_x >= self.layout.total_width() || content_y >= self.layout.total_height() {
            return None;
        }
        Some((
            self.layout.rows.index_at(content_y)?,
            self.layout.columns.index_at(content_x)?,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    struct Uniform {
        rows: usize,
        cols: usize,
    }

    impl GridMetrics for Uniform {
        fn row_count(&self) -> usize {
            self.rows
        }
        fn column_count(&self) -> usize {
            self.cols
        }
        fn row_height(&self, _row: usize) -> f64 {
            40.0
        }
        fn column_width(&self, _column: usize) -> f64 {
            100.0
        }
    }

    fn grid(rows: usize, cols: usize, fixed_rows: usize, fixed_cols: usize) -> MultiGrid {
        let mut g = MultiGrid::new(400.0, 200.0);
        g.set_fixed_counts(fixed_rows, fixed_cols);
        g.recompute_grid_size(&Uniform { rows, cols });
        g
    }

    #[test]
    fn test_region_rects() {
        let g = grid(101, 10, 1, 1);
        let [tl, tr, bl, br] = g.regions();
        assert_eq!(tl.rect, Rect { x: 0.0, y: 0.0, width: 100.0, height: 40.0 });
        assert_eq!(tr.rect, Rect { x: 100.0, y: 0.0, width: 300.0, height: 40.0 });
        assert_eq!(bl.rect, Rect { x: 0.0, y: 40.0, width: 100.0, height: 160.0 });
        assert_eq!(br.rect, Rect { x: 100.0, y: 40.0, width: 300.0, height: 160.0 });
        assert!(tr.scrollbar_hidden && bl.scrollbar_hidden);
        assert!(!tl.scrollbar_hidden && !br.scrollbar_hidden);
    }

    #[test]
    fn test_visible_windows_with_overscan() {
        let g = grid(101, 10, 1, 1);
        let br = g.region(RegionKind::BottomRight);
        // 160px body = rows 1..5, plus one overscan row.
        assert_eq!(br.visible_rows, 1..6);
        // 300px body = columns 1..4, plus one overscan column.
        assert_eq!(br.visible_columns, 1..5);
        let tl = g.region(RegionKind::TopLeft);
        assert_eq!(tl.visible_rows, 0..1);
        assert_eq!(tl.visible_columns, 0..1);
    }

    #[test]
    fn test_scroll_sync() {
        let mut g = grid(101, 10, 1, 1);
        g.set_overscan(0, 0);
        g.scroll_region(RegionKind::BottomRight, 250.0, 400.0).unwrap();
        let [tl, tr, bl, br] = g.regions();
        assert_eq!(bl.scroll_top, br.scroll_top);
        assert_eq!(tr.scroll_left, br.scroll_left);
        assert_eq!(bl.visible_rows, br.visible_rows);
        assert_eq!(tr.visible_columns, br.visible_columns);
        assert_eq!((tl.scroll_left, tl.scroll_top), (0.0, 0.0));
        assert_eq!(br.visible_rows, 11..15);
    }

    #[test]
    fn test_fixed_panes_ignore_their_fixed_axis() {
        let mut g = grid(101, 10, 1, 1);
        assert!(g.scroll_region(RegionKind::TopLeft, 50.0, 50.0).is_none());
        let info = g.scroll_region(RegionKind::TopRight, 50.0, 50.0).unwrap();
        assert_eq!((info.scroll_left, info.scroll_top), (50.0, 0.0));
        let info = g.scroll_region(RegionKind::BottomLeft, 50.0, 50.0).unwrap();
        assert_eq!((info.scroll_left, info.scroll_top), (50.0, 50.0));
    }

    #[test]
    fn test_zero_size_renders_nothing() {
        let mut g = grid(101, 10, 1, 1);
        g.set_size(0.0, 0.0);
        assert!(g.regions().iter().all(Region::is_empty));
        g.set_size(400.0, 0.0);
        assert!(g.regions().iter().all(Region::is_empty));
    }

    #[test]
    fn test_scroll_info() {
        let mut g = grid(101, 10, 1, 1);
        let info = g.scroll_to(0.0, 100.0).unwrap();
        assert_eq!(info.scroll_top, 100.0);
        assert_eq!(info.scroll_height, 4_000.0);
        assert_eq!(info.scroll_width, 900.0);
        assert_eq!(info.client_height, 160.0);
        assert_eq!(info.client_width, 300.0);
        assert!(g.scroll_to(0.0, 100.0).is_none());
    }

    #[test]
    fn test_cell_at() {
        let mut g = grid(101, 10, 1, 1);
        g.scroll_to(100.0, 80.0);
        // Fixed corner is unaffected by scroll.
        assert_eq!(g.cell_at(10.0, 10.0), Some((0, 0)));
        // Header row follows horizontal scroll only.
        assert_eq!(g.cell_at(150.0, 10.0), Some((0, 2)));
        // Body follows both.
        assert_eq!(g.cell_at(150.0, 50.0), Some((3, 2)));
        assert_eq!(g.cell_at(500.0, 50.0), None);
    }

    #[test]
    fn test_recompute_counts_and_clamps_scroll() {
        let mut g = grid(101, 10, 1, 1);
        g.scroll_to(0.0, 3_000.0);
        g.recompute_grid_size(&Uniform { rows: 11, cols: 10 });
        assert_eq!(g.measurement_count(), 2);
        // 10 scrollable rows * 40 - 160
        assert_eq!(g.viewport().scroll_top, 240.0);
    }
}
