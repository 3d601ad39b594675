//! virtgrid - headless virtualized data table and search select
//!
//! Computes what a host should draw for very large tabular data:
//! - Four-pane grid with frozen rows and columns sharing one scroll position
//! - Windowed row and column ranges with overscan
//! - Three-state column sorting and single, toggle or range row selection
//! - Percentage column widths with minimum pixel widths
//! - Searchable select with a debounced filter and a windowed menu
//!
//! The cores are plain Rust and never touch a DOM. In the browser the
//! [`GridTable`] and [`SearchSelect`] facades take host JSON, emit events to
//! a callback and return render views as plain objects.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridTable } from 'virtgrid';
//! await init();
//! const table = new GridTable({ fixedColumnCount: 1, sortBy: "name" });
//! table.set_columns(columns);
//! table.set_rows(rows);
//! table.set_size(800, 600);
//! draw(table.render());
//! ```

pub mod error;
pub mod events;
pub mod layout;
pub mod memo;
pub mod select;
pub mod table;
pub mod types;

#[cfg(target_arch = "wasm32")]
mod bindings;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use bindings::{GridTable, SearchSelect};

pub use error::{Result, VirtgridError};
pub use select::SelectController;
pub use table::TableController;
pub use types::*;

/// Render a table snapshot from JSON inputs.
///
/// `config` is a table configuration record (may be `"{}"`); the container is
/// `width` x `height` pixels. Returns the [`table::TableView`] as JSON.
///
/// # Errors
/// Returns an error if any input is malformed JSON or the configuration is
/// invalid.
#[wasm_bindgen]
pub fn render_table_json(
    rows: &str,
    columns: &str,
    config: &str,
    width: f64,
    height: f64,
) -> std::result::Result<String, JsValue> {
    render_snapshot(rows, columns, config, width, height)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native form of [`render_table_json`].
///
/// # Errors
/// Returns an error if any input is malformed JSON or the configuration is
/// invalid.
pub fn render_snapshot(
    rows: &str,
    columns: &str,
    config: &str,
    width: f64,
    height: f64,
) -> Result<String> {
    let config = table::TableConfig::from_json(config)?;
    let rows: Vec<Row> = serde_json::from_str(rows)?;
    let columns: Vec<ColumnDef> = serde_json::from_str(columns)?;

    let mut controller = TableController::with_data(config, rows, columns);
    controller.set_size(width, height);
    let view = controller.render();
    Ok(serde_json::to_string(&view)?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
