//! The four panes of a multi-grid as one parameterised type.

use std::ops::Range;

use serde::Serialize;

use super::{CellRect, GridLayout, Rect};

/// Which corner of the grid a pane covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionKind {
    /// Fixed rows x fixed columns. Never scrolls.
    TopLeft,
    /// Fixed rows x scrollable columns. Follows the horizontal offset.
    TopRight,
    /// Scrollable rows x fixed columns. Follows the vertical offset.
    BottomLeft,
    /// Scrollable rows x scrollable columns. Owns both scrollbars.
    BottomRight,
}

impl RegionKind {
    /// Render order: fixed corner first, main body last.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub fn scrolls_x(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    pub fn scrolls_y(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }

    /// Panes driven by the main pane hide their own scrollbar.
    pub fn hides_scrollbar(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomLeft)
    }

    /// Grid rows this pane covers.
    pub fn row_range(self, layout: &GridLayout) -> Range<usize> {
        if self.scrolls_y() {
            layout.scrollable_row_range()
        } else {
            layout.fixed_row_range()
        }
    }

    /// Grid columns this pane covers.
    pub fn column_range(self, layout: &GridLayout) -> Range<usize> {
        if self.scrolls_x() {
            layout.scrollable_column_range()
        } else {
            layout.fixed_column_range()
        }
    }
}

/// One pane after windowing: where it sits, which grid rows/columns it
/// covers and which of those intersect its viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub kind: RegionKind,
    /// Position and size inside the container.
    pub rect: Rect,
    pub rows: Range<usize>,
    pub columns: Range<usize>,
    pub visible_rows: Range<usize>,
    pub visible_columns: Range<usize>,
    /// Horizontal offset applied to this pane's content (0 if fixed in x).
    pub scroll_left: f64,
    /// Vertical offset applied to this pane's content (0 if fixed in y).
    pub scroll_top: f64,
    pub scrollbar_hidden: bool,
    /// Full content size of the pane.
    pub content_width: f64,
    pub content_height: f64,
}

impl Region {
    /// No visible cells, e.g. a zero-size container or no fixed rows.
    pub fn is_empty(&self) -> bool {
        self.visible_rows.is_empty() || self.visible_columns.is_empty()
    }

    /// Visible cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.visible_rows
            .clone()
            .flat_map(move |row| self.visible_columns.clone().map(move |col| (row, col)))
    }

    /// Bounds of a cell in this pane's content coordinates (before the pane's
    /// scroll offset is applied).
    pub fn cell_rect(&self, layout: &GridLayout, row: usize, column: usize) -> Option<CellRect> {
        if !self.rows.contains(&row) || !self.columns.contains(&column) {
            return None;
        }
        let mut rect = layout.cell_rect(row, column)?;
        rect.x -= layout.columns.offset(self.columns.start);
        rect.y -= layout.rows.offset(self.rows.start);
        Some(rect)
    }
}
