//! Column width distribution.

use log::debug;

use crate::types::ColumnDef;

/// Horizontal space reserved for the main pane's vertical scrollbar.
pub const DEFAULT_SCROLLBAR_WIDTH: f64 = 17.0;

/// A column definition with its normalized width and share of the total.
#[derive(Debug, Clone)]
pub struct MappedColumn {
    pub def: ColumnDef,
    /// Configured width, falling back to the default. Also the minimum
    /// rendered width.
    pub width: f64,
    /// `width / sum(widths)`. Not rounded, so the set sums to 1.
    pub percent: f64,
}

impl MappedColumn {
    pub fn data_key(&self) -> &str {
        &self.def.data_key
    }

    /// Rendered width for `available` pixels: the proportional share, never
    /// narrower than the configured width.
    pub fn pixel_width(&self, available: f64) -> f64 {
        (available * self.percent).max(self.width)
    }
}

/// Normalize widths and compute each column's share of the total width.
pub fn recompute_columns(columns: &[ColumnDef]) -> Vec<MappedColumn> {
    let widths: Vec<f64> = columns.iter().map(ColumnDef::resolved_width).collect();
    let total: f64 = widths.iter().sum();
    let mapped: Vec<MappedColumn> = columns
        .iter()
        .zip(widths)
        .map(|(def, width)| MappedColumn {
            def: def.clone(),
            width,
            percent: width / total,
        })
        .collect();
    debug!(
        "columns recomputed: {} columns, {:.0}px configured",
        mapped.len(),
        total
    );
    mapped
}

/// Width the columns are distributed over: the container minus the
/// scrollbar allowance.
pub fn available_width(container_width: f64, scrollbar_width: f64) -> f64 {
    (container_width - scrollbar_width).max(0.0)
}
