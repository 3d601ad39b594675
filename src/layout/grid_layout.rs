//! Pre-computed layout data for a grid.
//!
//! Row and column edges are measured once per `recompute_grid_size`, enabling
//! O(log n) hit testing and O(1) cell rectangles while scrolling.

use std::ops::Range;

use serde::Serialize;

use super::Axis;

/// Size source for a grid. Implemented by the table controller over its
/// mapped columns and row-height setting.
pub trait GridMetrics {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn row_height(&self, row: usize) -> f64;
    fn column_width(&self, column: usize) -> f64;
}

/// Rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A cell's bounds within its region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRect {
    pub row_index: usize,
    pub column_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Measured rows and columns plus the fixed (frozen) leading counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    pub rows: Axis,
    pub columns: Axis,
    /// Leading rows pinned to the top. Never exceeds `rows.count()`.
    pub fixed_rows: usize,
    /// Leading columns pinned to the left. Never exceeds `columns.count()`.
    pub fixed_columns: usize,
}

impl GridLayout {
    pub fn measure(metrics: &dyn GridMetrics, fixed_rows: usize, fixed_columns: usize) -> Self {
        let rows = Axis::measure(metrics.row_count(), |r| metrics.row_height(r));
        let columns = Axis::measure(metrics.column_count(), |c| metrics.column_width(c));
        let fixed_rows = fixed_rows.min(rows.count());
        let fixed_columns = fixed_columns.min(columns.count());
        Self {
            rows,
            columns,
            fixed_rows,
            fixed_columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.count()
    }

    pub fn fixed_rows_height(&self) -> f64 {
        self.rows.offset(self.fixed_rows)
    }

    pub fn fixed_columns_width(&self) -> f64 {
        self.columns.offset(self.fixed_columns)
    }

    pub fn fixed_row_range(&self) -> Range<usize> {
        0..self.fixed_rows
    }

    pub fn fixed_column_range(&self) -> Range<usize> {
        0..self.fixed_columns
    }

    pub fn scrollable_row_range(&self) -> Range<usize> {
        self.fixed_rows..self.row_count()
    }

    pub fn scrollable_column_range(&self) -> Range<usize> {
        self.fixed_columns..self.column_count()
    }

    pub fn total_width(&self) -> f64 {
        self.columns.total()
    }

    pub fn total_height(&self) -> f64 {
        self.rows.total()
    }

    /// Content height below the fixed rows.
    pub fn scrollable_height(&self) -> f64 {
        self.total_height() - self.fixed_rows_height()
    }

    /// Content width right of the fixed columns.
    pub fn scrollable_width(&self) -> f64 {
        self.total_width() - self.fixed_columns_width()
    }

    /// Bounds of cell (row, column) in whole-grid coordinates, or None when
    /// the cell is out of range.
    pub fn cell_rect(&self, row: usize, column: usize) -> Option<CellRect> {
        if row >= self.row_count() || column >= self.column_count() {
            return None;
        }
        Some(CellRect {
            row_index: row,
            column_index: column,
            x: self.columns.offset(column),
            y: self.rows.offset(row),
            width: self.columns.size(column),
            height: self.rows.size(row),
        })
    }
}
