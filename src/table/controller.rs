//! Table data/sort/selection controller.
//!
//! Owns the host inputs (rows, columns, value, sort) and the views derived
//! from them. Derived state is recomputed lazily in [`TableController::sync`],
//! once per change of the input it depends on, then fed to the multi-grid.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use super::cell::{CellView, RowState};
use super::columns::{available_width, recompute_columns, DEFAULT_SCROLLBAR_WIDTH};
use super::reconcile::{ResizeReconciler, ResizeTriggers};
use super::rows::{recompute_rows, Sorter};
use super::selection::SelectionState;
use super::MappedColumn;
use crate::error::{Result, VirtgridError};
use crate::events::{ListenerId, Listeners, TableEvent};
use crate::layout::{GridMetrics, MultiGrid, Region, RegionKind, ScrollInfo, DEFAULT_OVERSCAN};
use crate::memo::{Identity, Memo};
use crate::types::{
    ColumnDef, Key, Modifiers, MultipleMode, Row, SelectionValue, SortDirection, SortState,
};

/// Default height of every grid row, header included.
pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;

/// Rows above the data: the header row at grid index 0.
const HEADER_ROWS: usize = 1;

/// Host configuration record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Data rows pinned below the header.
    pub fixed_row_count: usize,
    pub fixed_column_count: usize,
    pub row_height: f64,
    /// Field holding each row's identity.
    pub row_key: String,
    pub multiple: MultipleMode,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// `false` keeps rows in source order whatever the sort state.
    pub sorter: bool,
    /// Grid row (header = 0) to bring into view initially.
    pub scroll_to_row: usize,
    pub scroll_to_column: usize,
    pub overscan_row_count: usize,
    pub overscan_column_count: usize,
    pub scrollbar_width: f64,
    /// Class added to every body cell.
    pub class_name_cell: Option<String>,
    pub value: SelectionValue,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            fixed_row_count: 0,
            fixed_column_count: 0,
            row_height: DEFAULT_ROW_HEIGHT,
            row_key: "id".to_string(),
            multiple: MultipleMode::None,
            sort_by: None,
            sort_direction: None,
            sorter: true,
            scroll_to_row: 0,
            scroll_to_column: 0,
            overscan_row_count: DEFAULT_OVERSCAN,
            overscan_column_count: DEFAULT_OVERSCAN,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            class_name_cell: None,
            value: SelectionValue::None,
        }
    }
}

impl TableConfig {
    /// Parse and validate a JSON configuration record. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or unusable sizes.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns [`VirtgridError::Config`] if a size is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(VirtgridError::Config(format!(
                "rowHeight must be a positive number, got {}",
                self.row_height
            )));
        }
        if !self.scrollbar_width.is_finite() || self.scrollbar_width < 0.0 {
            return Err(VirtgridError::Config(format!(
                "scrollbarWidth must be a non-negative number, got {}",
                self.scrollbar_width
            )));
        }
        Ok(())
    }

    fn sort_state(&self) -> SortState {
        SortState {
            sort_by: self.sort_by.clone(),
            sort_direction: self.sort_direction,
        }
    }
}

/// Height of grid rows: one value, or a function of the grid row index
/// (header = 0).
#[derive(Clone)]
pub enum RowHeight {
    Fixed(f64),
    PerRow(Rc<dyn Fn(usize) -> f64>),
}

impl RowHeight {
    pub fn per_row<F>(height: F) -> Self
    where
        F: Fn(usize) -> f64 + 'static,
    {
        Self::PerRow(Rc::new(height))
    }

    pub fn height(&self, row: usize) -> f64 {
        match self {
            Self::Fixed(h) => *h,
            Self::PerRow(f) => f(row),
        }
    }
}

impl fmt::Debug for RowHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(h) => write!(f, "Fixed({h})"),
            Self::PerRow(_) => f.write_str("PerRow(..)"),
        }
    }
}

/// Extra class for body cells: a constant, or computed from
/// `(identity, row, row_index)`.
#[derive(Clone)]
pub enum CellClass {
    Static(String),
    Computed(Rc<dyn Fn(Option<&Key>, &Row, usize) -> String>),
}

impl CellClass {
    pub fn computed<F>(class: F) -> Self
    where
        F: Fn(Option<&Key>, &Row, usize) -> String + 'static,
    {
        Self::Computed(Rc::new(class))
    }

    fn resolve(&self, key: Option<&Key>, row: &Row, row_index: usize) -> String {
        match self {
            Self::Static(class) => class.clone(),
            Self::Computed(f) => f(key, row, row_index),
        }
    }
}

impl fmt::Debug for CellClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(class) => write!(f, "Static({class:?})"),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Inputs the display order is derived from.
#[derive(Debug, Clone, PartialEq)]
struct OrderInputs {
    rows: Identity<Vec<Row>>,
    sort: SortState,
    sorter: Sorter,
}

/// Sizes the multi-grid is measured from.
struct TableMetrics<'a> {
    columns: &'a [MappedColumn],
    available_width: f64,
    row_count: usize,
    row_height: &'a RowHeight,
}

impl GridMetrics for TableMetrics<'_> {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn row_height(&self, row: usize) -> f64 {
        self.row_height.height(row)
    }

    fn column_width(&self, column: usize) -> f64 {
        self.columns
            .get(column)
            .map_or(0.0, |c| c.pixel_width(self.available_width))
    }
}

/// One rendered pane with its visible cells.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionView {
    #[serde(flatten)]
    pub region: Region,
    pub cells: Vec<CellView>,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub regions: Vec<RegionView>,
    pub scroll: ScrollInfo,
    pub total_width: f64,
    pub total_height: f64,
}

impl TableView {
    pub fn region(&self, kind: RegionKind) -> Option<&RegionView> {
        self.regions.iter().find(|r| r.region.kind == kind)
    }

    pub fn cell_count(&self) -> usize {
        self.regions.iter().map(|r| r.cells.len()).sum()
    }
}

pub struct TableController {
    config: TableConfig,
    rows: Rc<Vec<Row>>,
    columns: Rc<Vec<ColumnDef>>,
    value: Rc<SelectionValue>,
    sort: SortState,
    sorter: Sorter,
    row_height: RowHeight,
    class_name_cell: Option<CellClass>,

    mapped_columns: Memo<Identity<Vec<ColumnDef>>, Vec<MappedColumn>>,
    order: Memo<OrderInputs, Vec<usize>>,
    selected: Memo<Identity<SelectionValue>, HashSet<Key>>,

    selection: SelectionState,
    grid: MultiGrid,
    reconciler: ResizeReconciler,
    /// Rows or row heights changed since the last measurement.
    rows_dirty: bool,
    /// Hovered grid row (body rows only).
    hover: Option<usize>,
    pending_scroll: Option<(usize, usize)>,
    listeners: Listeners<TableEvent>,
}

impl fmt::Debug for TableController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableController")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.len())
            .field("sort", &self.sort)
            .field("value", &self.value)
            .field("hover", &self.hover)
            .finish_non_exhaustive()
    }
}

impl TableController {
    pub fn new(config: TableConfig) -> Self {
        let mut grid = MultiGrid::new(0.0, 0.0);
        grid.set_overscan(config.overscan_row_count, config.overscan_column_count);
        let pending_scroll = (config.scroll_to_row > 0 || config.scroll_to_column > 0)
            .then_some((config.scroll_to_row, config.scroll_to_column));
        Self {
            rows: Rc::new(Vec::new()),
            columns: Rc::new(Vec::new()),
            value: Rc::new(config.value.clone()),
            sort: config.sort_state(),
            sorter: if config.sorter {
                Sorter::Default
            } else {
                Sorter::Disabled
            },
            row_height: RowHeight::Fixed(config.row_height),
            class_name_cell: config.class_name_cell.clone().map(CellClass::Static),
            mapped_columns: Memo::new(),
            order: Memo::new(),
            selected: Memo::new(),
            selection: SelectionState::new(config.multiple),
            grid,
            reconciler: ResizeReconciler::new(),
            rows_dirty: true,
            hover: None,
            pending_scroll,
            listeners: Listeners::new(),
            config,
        }
    }

    pub fn with_data(config: TableConfig, rows: Vec<Row>, columns: Vec<ColumnDef>) -> Self {
        let mut table = Self::new(config);
        table.set_rows(Rc::new(rows));
        table.set_columns(Rc::new(columns));
        table
    }

    // ── Inputs ──────────────────────────────────────────────────────────

    /// Replace the rows. A new reference re-derives the display order.
    pub fn set_rows(&mut self, rows: Rc<Vec<Row>>) {
        if !Rc::ptr_eq(&self.rows, &rows) {
            self.rows = rows;
            self.rows_dirty = true;
            self.hover = None;
        }
    }

    /// Replace the column definitions. A new reference re-maps the columns
    /// and re-measures the grid.
    pub fn set_columns(&mut self, columns: Rc<Vec<ColumnDef>>) {
        self.columns = columns;
    }

    /// Container size, as reported by the size observer.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.grid.set_size(width, height);
    }

    pub fn set_fixed_counts(&mut self, fixed_rows: usize, fixed_columns: usize) {
        self.config.fixed_row_count = fixed_rows;
        self.config.fixed_column_count = fixed_columns;
    }

    pub fn set_value(&mut self, value: SelectionValue) {
        if *self.value != value {
            self.value = Rc::new(value);
        }
    }

    /// Controlled sort state.
    pub fn set_sort(&mut self, sort: SortState) {
        if self.sort != sort {
            self.selection.reset_anchor();
            self.sort = sort;
        }
    }

    pub fn set_sorter(&mut self, sorter: Sorter) {
        self.sorter = sorter;
    }

    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.row_height = row_height;
        self.rows_dirty = true;
    }

    pub fn set_class_name_cell(&mut self, class: Option<CellClass>) {
        self.class_name_cell = class;
    }

    pub fn set_multiple(&mut self, mode: MultipleMode) {
        self.config.multiple = mode;
        self.selection.set_mode(mode);
    }

    pub fn set_overscan(&mut self, rows: usize, columns: usize) {
        self.config.overscan_row_count = rows;
        self.config.overscan_column_count = columns;
        self.grid.set_overscan(rows, columns);
    }

    // ── Listeners ───────────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TableEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ── State ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn rows(&self) -> &Rc<Vec<Row>> {
        &self.rows
    }

    pub fn columns(&self) -> &Rc<Vec<ColumnDef>> {
        &self.columns
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn value(&self) -> &SelectionValue {
        &self.value
    }

    /// Hovered grid row.
    pub fn hovered_row(&self) -> Option<usize> {
        self.hover
    }

    /// Range-selection anchor as a display index.
    pub fn anchor(&self) -> Option<usize> {
        self.selection.anchor()
    }

    pub fn grid(&self) -> &MultiGrid {
        &self.grid
    }

    pub fn mapped_columns(&mut self) -> &[MappedColumn] {
        self.sync();
        self.mapped_columns.get().map_or(&[][..], Vec::as_slice)
    }

    /// Source indices of the rows in display order.
    pub fn display_order(&mut self) -> &[usize] {
        self.sync();
        self.order.get().map_or(&[][..], Vec::as_slice)
    }

    /// Rows in display order.
    pub fn sorted_rows(&mut self) -> Vec<&Row> {
        self.sync();
        let order = self.order.get().map_or(&[][..], Vec::as_slice);
        order.iter().filter_map(|&i| self.rows.get(i)).collect()
    }

    /// Fixed (rows, columns) handed to the grid. The header row is always
    /// fixed and at least one row and one column stay scrollable; with no
    /// data rows the header alone stays pinned.
    pub fn effective_fixed_counts(&self) -> (usize, usize) {
        let grid_rows = self.rows.len() + HEADER_ROWS;
        let rows = (HEADER_ROWS + self.config.fixed_row_count).min((grid_rows - 1).max(HEADER_ROWS));
        let columns = self
            .config
            .fixed_column_count
            .min(self.columns.len().saturating_sub(1));
        (rows, columns)
    }

    // ── Derivation ──────────────────────────────────────────────────────

    /// Bring every derived view up to date with the current inputs, then
    /// reconcile the grid's cached sizes.
    pub fn sync(&mut self) {
        let columns = Rc::clone(&self.columns);
        self.mapped_columns
            .get_or_derive(Identity::of(&columns), |_| recompute_columns(&columns));

        let rows = Rc::clone(&self.rows);
        let inputs = OrderInputs {
            rows: Identity::of(&rows),
            sort: self.sort.clone(),
            sorter: self.sorter.clone(),
        };
        let (_, reordered) = self.order.get_or_derive(inputs, |inputs| {
            recompute_rows(
                &rows,
                inputs.sort.sort_by.as_deref(),
                inputs.sort.sort_direction,
                &inputs.sorter,
            )
        });
        if reordered {
            self.selection.reset_anchor();
        }

        let (fixed_rows, fixed_columns) = self.effective_fixed_counts();
        self.grid.set_fixed_counts(fixed_rows, fixed_columns);

        let triggers =
            self.reconciler
                .check(self.grid.viewport().width, fixed_columns, &self.columns);
        if triggers.any() || self.rows_dirty {
            self.remeasure(triggers);
        }

        if let Some((row, column)) = self.pending_scroll.take() {
            if let Some(info) = self.grid.scroll_to_cell(row, column) {
                self.listeners.emit(&TableEvent::Scroll(info));
            }
        }
    }

    fn remeasure(&mut self, triggers: ResizeTriggers) {
        self.rows_dirty = false;
        let mapped = self.mapped_columns.get().map_or(&[][..], Vec::as_slice);
        let metrics = TableMetrics {
            columns: mapped,
            available_width: available_width(self.grid.viewport().width, self.config.scrollbar_width),
            row_count: self.rows.len() + HEADER_ROWS,
            row_height: &self.row_height,
        };
        debug!("recompute grid size: {triggers:?}");
        self.grid.recompute_grid_size(&metrics);
    }

    fn is_selected(&mut self, key: Option<&Key>) -> bool {
        let Some(key) = key else {
            return false;
        };
        let value = Rc::clone(&self.value);
        let (keyed, _) = self
            .selected
            .get_or_derive(Identity::of(&value), |_| value.keyed());
        keyed.contains(key)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Cells of every pane that intersect the viewport.
    pub fn render(&mut self) -> TableView {
        self.sync();
        let regions = self.grid.regions();
        let views = regions
            .into_iter()
            .map(|region| {
                let cells = region
                    .cells()
                    .filter_map(|(row, column)| self.cell_view(&region, row, column))
                    .collect();
                RegionView { region, cells }
            })
            .collect();
        let layout = self.grid.layout();
        TableView {
            regions: views,
            scroll: self.grid.scroll_info(),
            total_width: layout.total_width(),
            total_height: layout.total_height(),
        }
    }

    fn cell_view(&mut self, region: &Region, row: usize, column: usize) -> Option<CellView> {
        let rect = region.cell_rect(self.grid.layout(), row, column)?;
        if row < HEADER_ROWS {
            let mapped = self.mapped_columns.get()?.get(column)?;
            return Some(CellView::header(rect, mapped, &self.sort));
        }

        let display_index = row - HEADER_ROWS;
        let source = *self.order.get()?.get(display_index)?;
        let rows = Rc::clone(&self.rows);
        let data = rows.get(source)?;
        let key = Key::of(data, &self.config.row_key);
        let state = RowState {
            hovered: self.hover == Some(row),
            selected: self.is_selected(key.as_ref()),
        };
        let extra = self
            .class_name_cell
            .as_ref()
            .map(|c| c.resolve(key.as_ref(), data, display_index));
        let mapped = self.mapped_columns.get()?.get(column)?;
        Some(CellView::body(rect, mapped, data, display_index, key, state, extra))
    }

    // ── Interaction ─────────────────────────────────────────────────────

    /// Header click: step the three-state sort toggle on a sortable column.
    /// Returns the new sort state, or None if the column does not sort.
    pub fn header_click(&mut self, column_key: &str) -> Option<SortState> {
        let column = self.columns.iter().find(|c| c.data_key == column_key)?;
        if !column.sort {
            return None;
        }
        let next = self.sort.toggled(column_key);
        debug!("sort {:?} -> {:?}", self.sort, next);
        self.set_sort(next.clone());
        self.listeners.emit(&TableEvent::SortChange(next.clone()));
        Some(next)
    }

    /// Body cell click on display row `row_index`. Returns the new selection,
    /// or None when the row is out of range or has no identity.
    pub fn cell_click(
        &mut self,
        row_index: usize,
        column_key: &str,
        modifiers: Modifiers,
    ) -> Option<SelectionValue> {
        self.sync();
        let rows = Rc::clone(&self.rows);
        let order = self.order.get()?;
        let data = rows.get(*order.get(row_index)?)?;
        let key = Key::of(data, &self.config.row_key)?;
        let row_key = self.config.row_key.as_str();
        let key_at = |i: usize| {
            order
                .get(i)
                .and_then(|&source| rows.get(source))
                .and_then(|r| Key::of(r, row_key))
        };
        let next = self
            .selection
            .click(&self.value, row_index, key, modifiers, key_at);

        self.value = Rc::new(next.clone());
        self.listeners.emit(&TableEvent::RowClick {
            value: next.clone(),
            row: data.clone(),
            row_index,
            column_key: column_key.to_string(),
            modifiers,
        });
        Some(next)
    }

    /// Click on grid cell (row, column): the header row sorts, body rows
    /// select. Returns whether anything changed.
    pub fn click_grid_cell(&mut self, row: usize, column: usize, modifiers: Modifiers) -> bool {
        let Some(column_key) = self.columns.get(column).map(|c| c.data_key.clone()) else {
            return false;
        };
        if row < HEADER_ROWS {
            self.header_click(&column_key).is_some()
        } else {
            self.cell_click(row - HEADER_ROWS, &column_key, modifiers)
                .is_some()
        }
    }

    /// Click at a container point.
    pub fn click_at(&mut self, x: f64, y: f64, modifiers: Modifiers) -> bool {
        self.sync();
        match self.grid.cell_at(x, y) {
            Some((row, column)) => self.click_grid_cell(row, column, modifiers),
            None => false,
        }
    }

    /// Pointer entered grid row `row`. The header row never highlights.
    pub fn hover(&mut self, row: usize) {
        self.hover = (row >= HEADER_ROWS && row < self.rows.len() + HEADER_ROWS).then_some(row);
    }

    pub fn hover_at(&mut self, x: f64, y: f64) {
        self.sync();
        match self.grid.cell_at(x, y) {
            Some((row, _)) => self.hover(row),
            None => self.pointer_leave(),
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Set the shared scroll offsets (from the main pane's scroll event).
    pub fn scroll_to(&mut self, left: f64, top: f64) -> Option<ScrollInfo> {
        self.sync();
        let info = self.grid.scroll_to(left, top)?;
        self.listeners.emit(&TableEvent::Scroll(info));
        Some(info)
    }

    /// Wheel input over one pane.
    pub fn scroll_region(&mut self, kind: RegionKind, dx: f64, dy: f64) -> Option<ScrollInfo> {
        self.sync();
        let info = self.grid.scroll_region(kind, dx, dy)?;
        self.listeners.emit(&TableEvent::Scroll(info));
        Some(info)
    }

    /// Bring grid cell (row, column) into view on the next sync.
    pub fn scroll_to_cell(&mut self, row: usize, column: usize) {
        self.pending_scroll = Some((row, column));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn table(n: usize) -> TableController {
        let rows = (0..n)
            .map(|i| {
                serde_json::from_value(json!({"id": i, "name": format!("row {i}"), "v": (n - i) % 3}))
                    .unwrap()
            })
            .collect();
        let columns = vec![
            ColumnDef::new("id", "Id").width(60.0).sortable(true),
            ColumnDef::new("name", "Name").width(200.0),
            ColumnDef::new("v", "V").width(100.0).sortable(true),
        ];
        let mut t = TableController::with_data(TableConfig::default(), rows, columns);
        t.set_size(400.0, 300.0);
        t
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config = TableConfig::from_json(r#"{"fixedColumnCount": 1, "multiple": "shift"}"#).unwrap();
        assert_eq!(config.fixed_column_count, 1);
        assert_eq!(config.multiple, MultipleMode::Range);
        assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.row_key, "id");
        assert!(config.sorter);
        assert!(TableConfig::from_json(r#"{"rowHeight": -1}"#).is_err());
        assert!(TableConfig::from_json("[").is_err());
    }

    #[test]
    fn test_fixed_counts_clamped() {
        let mut t = table(3);
        t.set_fixed_counts(10, 10);
        assert_eq!(t.effective_fixed_counts(), (3, 2));
        let mut empty = TableController::new(TableConfig::default());
        empty.set_fixed_counts(2, 0);
        assert_eq!(empty.effective_fixed_counts(), (1, 0));
    }

    #[test]
    fn test_header_row_rendered() {
        let mut t = table(50);
        let view = t.render();
        let top = view.region(RegionKind::TopRight).unwrap();
        let labels: Vec<_> = top.cells.iter().filter_map(|c| c.content.as_text()).collect();
        assert_eq!(labels, vec!["Id", "Name", "V"]);
    }

    #[test]
    fn test_render_is_windowed() {
        let mut t = table(10_000);
        let view = t.render();
        let body = view.region(RegionKind::BottomRight).unwrap();
        // 260px body / 40px rows = 7 rows, plus overscan.
        assert!(body.region.visible_rows.len() <= 9);
        assert!(view.cell_count() < 40);
    }

    #[test]
    fn test_sort_via_header_click() {
        let mut t = table(3);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        t.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        assert!(t.header_click("name").is_none());
        let s = t.header_click("v").unwrap();
        assert_eq!(s, SortState::new("v", SortDirection::Asc));
        // v = (3 - i) % 3 -> [0, 2, 1]
        assert_eq!(t.display_order(), &[0, 2, 1]);
        t.header_click("v");
        assert_eq!(t.display_order(), &[1, 2, 0]);
        t.header_click("v");
        assert_eq!(t.display_order(), &[0, 1, 2]);
        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn test_sort_resets_anchor() {
        let mut t = table(5);
        t.set_multiple(MultipleMode::Range);
        t.cell_click(1, "id", Modifiers::NONE);
        assert_eq!(t.anchor(), Some(1));
        t.header_click("id");
        t.sync();
        assert_eq!(t.anchor(), None);
    }

    #[test]
    fn test_new_rows_reset_anchor() {
        let mut t = table(5);
        t.set_multiple(MultipleMode::Range);
        t.cell_click(1, "id", Modifiers::NONE);
        let rows = Rc::new(t.rows().as_ref().clone());
        t.set_rows(rows);
        t.sync();
        assert_eq!(t.anchor(), None);
    }

    #[test]
    fn test_single_selection_highlights_row() {
        let mut t = table(5);
        let value = t.cell_click(2, "name", Modifiers::NONE).unwrap();
        assert_eq!(value, SelectionValue::Single(Key::Int(2)));
        let view = t.render();
        let selected: Vec<_> = view
            .regions
            .iter()
            .flat_map(|r| &r.cells)
            .filter(|c| c.has_class("cellSelected"))
            .map(|c| c.row_index.unwrap())
            .collect();
        assert_eq!(selected, vec![2, 2, 2]);
    }

    #[test]
    fn test_click_grid_cell_routes_header_and_body() {
        let mut t = table(5);
        assert!(t.click_grid_cell(0, 0, Modifiers::NONE));
        assert_eq!(t.sort().sort_by.as_deref(), Some("id"));
        assert!(t.click_grid_cell(1, 1, Modifiers::NONE));
        assert_eq!(t.value(), &SelectionValue::Single(Key::Int(0)));
        assert!(!t.click_grid_cell(1, 9, Modifiers::NONE));
    }

    #[test]
    fn test_hover_highlights_whole_row() {
        let mut t = table(5);
        t.hover(3);
        let view = t.render();
        let hovered: Vec<_> = view
            .regions
            .iter()
            .flat_map(|r| &r.cells)
            .filter(|c| c.has_class("cellHover"))
            .map(|c| c.rect.row_index)
            .collect();
        assert_eq!(hovered, vec![3, 3, 3]);
        t.pointer_leave();
        assert_eq!(t.hovered_row(), None);
        t.hover(0);
        assert_eq!(t.hovered_row(), None);
    }

    #[test]
    fn test_reconcile_on_resize_only_when_width_changes() {
        let mut t = table(5);
        t.sync();
        let n = t.grid().measurement_count();
        t.sync();
        assert_eq!(t.grid().measurement_count(), n);
        t.set_size(400.0, 500.0);
        t.sync();
        assert_eq!(t.grid().measurement_count(), n);
        t.set_size(800.0, 500.0);
        t.sync();
        assert_eq!(t.grid().measurement_count(), n + 1);
    }

    #[test]
    fn test_column_widths_follow_container() {
        let mut t = table(5);
        t.sync();
        // available = 400 - 17 = 383; widths 60/200/100 of 360 -> all above floor
        let w = t.grid().layout().columns.size(1);
        assert!((w - 383.0 * 200.0 / 360.0).abs() < 1e-9);
        t.set_size(117.0, 300.0);
        t.sync();
        assert_eq!(t.grid().layout().columns.size(1), 200.0);
    }

    #[test]
    fn test_class_name_cell() {
        let mut t = table(3);
        t.set_class_name_cell(Some(CellClass::computed(|key, _row, index| {
            format!("k{}-i{index}", key.map(ToString::to_string).unwrap_or_default())
        })));
        let view = t.render();
        let body = view.region(RegionKind::BottomRight).unwrap();
        assert!(body.cells.iter().any(|c| c.has_class("k1-i1")));
    }

    #[test]
    fn test_scroll_emits_event() {
        let mut t = table(100);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        t.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        let info = t.scroll_to(0.0, 120.0).unwrap();
        assert_eq!(info.scroll_top, 120.0);
        assert!(matches!(events.borrow().last(), Some(TableEvent::Scroll(_))));
        assert!(t.scroll_to(0.0, 120.0).is_none());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_initial_scroll_to_row() {
        let config = TableConfig {
            scroll_to_row: 50,
            ..TableConfig::default()
        };
        let rows = (0..100)
            .map(|i| serde_json::from_value(json!({"id": i})).unwrap())
            .collect();
        let mut t = TableController::with_data(config, rows, vec![ColumnDef::new("id", "Id")]);
        t.set_size(300.0, 240.0);
        t.sync();
        // Body is 200px; row 50 must end at the bottom edge.
        assert_eq!(t.grid().viewport().scroll_top, 50.0 * 40.0 - 200.0);
    }
}
