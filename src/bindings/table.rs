use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::{deliver, from_js, from_js_or_default, to_js};
use crate::events::TableEvent;
use crate::layout::RegionKind;
use crate::table::{Sorter, TableConfig, TableController};
use crate::types::{ColumnDef, Modifiers, MultipleMode, Row, SelectionValue, SortState};

/// Virtualized multi-pane table for a JavaScript host.
///
/// ```javascript
/// const table = new GridTable({ fixedColumnCount: 1, multiple: "shift" });
/// table.set_columns(columns);
/// table.set_rows(rows);
/// table.on_event((e) => console.log(e.type, e));
/// table.set_size(width, height);
/// const view = table.render();
/// ```
#[wasm_bindgen]
pub struct GridTable {
    table: TableController,
    queue: Rc<RefCell<Vec<TableEvent>>>,
    callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl GridTable {
    /// # Errors
    /// Returns an error if `config` is not a valid configuration record.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GridTable, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = from_js_or_default(config)?;
        config.validate()?;

        let mut table = TableController::new(config);
        let queue = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&queue);
        table.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Ok(GridTable {
            table,
            queue,
            callback: None,
        })
    }

    /// Register the event callback, replacing any previous one.
    pub fn on_event(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }

    /// # Errors
    /// Returns an error if `rows` is not an array of objects.
    pub fn set_rows(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<Row> = from_js(rows)?;
        self.table.set_rows(Rc::new(rows));
        Ok(())
    }

    /// # Errors
    /// Returns an error if `columns` is not an array of column definitions.
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let columns: Vec<ColumnDef> = from_js(columns)?;
        self.table.set_columns(Rc::new(columns));
        Ok(())
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.table.set_size(width, height);
    }

    pub fn set_fixed_counts(&mut self, fixed_rows: usize, fixed_columns: usize) {
        self.table.set_fixed_counts(fixed_rows, fixed_columns);
    }

    /// # Errors
    /// Returns an error if `value` is not a key, a key list or null.
    pub fn set_value(&mut self, value: JsValue) -> Result<(), JsValue> {
        let value: SelectionValue = from_js_or_default(value)?;
        self.table.set_value(value);
        Ok(())
    }

    /// # Errors
    /// Returns an error if `sort` is not `{sortBy, sortDirection}`.
    pub fn set_sort(&mut self, sort: JsValue) -> Result<(), JsValue> {
        let sort: SortState = from_js_or_default(sort)?;
        self.table.set_sort(sort);
        Ok(())
    }

    /// # Errors
    /// Returns an error if `mode` is not `false`, `true` or `"shift"`.
    pub fn set_multiple(&mut self, mode: JsValue) -> Result<(), JsValue> {
        let mode: MultipleMode = from_js_or_default(mode)?;
        self.table.set_multiple(mode);
        Ok(())
    }

    pub fn set_sorting_enabled(&mut self, enabled: bool) {
        self.table.set_sorter(if enabled {
            Sorter::Default
        } else {
            Sorter::Disabled
        });
    }

    /// Visible cells of all four panes.
    ///
    /// # Errors
    /// Returns an error if the view cannot be serialized.
    pub fn render(&mut self) -> Result<JsValue, JsValue> {
        let view = self.table.render();
        self.flush();
        to_js(&view)
    }

    /// Pointer click at a container point.
    pub fn click(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, meta: bool) -> bool {
        let changed = self.table.click_at(x, y, Modifiers { shift, ctrl, meta });
        self.flush();
        changed
    }

    /// Click on grid cell (row, column); row 0 is the header.
    pub fn click_cell(
        &mut self,
        row: usize,
        column: usize,
        shift: bool,
        ctrl: bool,
        meta: bool,
    ) -> bool {
        let changed = self
            .table
            .click_grid_cell(row, column, Modifiers { shift, ctrl, meta });
        self.flush();
        changed
    }

    pub fn hover(&mut self, x: f64, y: f64) {
        self.table.hover_at(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.table.pointer_leave();
    }

    /// Scroll event from the main pane.
    pub fn scroll(&mut self, left: f64, top: f64) {
        self.table.scroll_to(left, top);
        self.flush();
    }

    /// Wheel input over the pane at `region` (`"topLeft"`, `"topRight"`,
    /// `"bottomLeft"`, `"bottomRight"`).
    pub fn wheel(&mut self, region: &str, dx: f64, dy: f64) {
        let kind = match region {
            "topLeft" => RegionKind::TopLeft,
            "topRight" => RegionKind::TopRight,
            "bottomLeft" => RegionKind::BottomLeft,
            _ => RegionKind::BottomRight,
        };
        self.table.scroll_region(kind, dx, dy);
        self.flush();
    }

    pub fn scroll_to_cell(&mut self, row: usize, column: usize) {
        self.table.scroll_to_cell(row, column);
    }

    /// # Errors
    /// Returns an error if the value cannot be serialized.
    pub fn value(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.value())
    }

    /// # Errors
    /// Returns an error if the sort state cannot be serialized.
    pub fn sort(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.sort())
    }

    fn flush(&mut self) {
        let events: Vec<TableEvent> = self.queue.borrow_mut().drain(..).collect();
        deliver(self.callback.as_ref(), events);
    }
}
