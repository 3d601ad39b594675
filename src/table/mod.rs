//! Grid table: column widths, sort order, selection and cell views on top of
//! the multi-grid layout engine.

mod cell;
mod columns;
mod controller;
mod reconcile;
mod rows;
mod selection;

pub use cell::{wrap_rendered, CellContent, CellKind, CellView, RowState};
pub use columns::{available_width, recompute_columns, MappedColumn, DEFAULT_SCROLLBAR_WIDTH};
pub use controller::{
    CellClass, RegionView, RowHeight, TableConfig, TableController, TableView, DEFAULT_ROW_HEIGHT,
};
pub use reconcile::{ResizeReconciler, ResizeTriggers};
pub use rows::{compare_values, recompute_rows, Comparator, Sorter};
pub use selection::SelectionState;
