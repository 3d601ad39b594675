//! Table controller tests
//!
//! Column width distribution, sorting, selection, pinned panes and resize
//! reconciliation through the public controller API.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use test_case::test_case;
use virtgrid::events::TableEvent;
use virtgrid::layout::RegionKind;
use virtgrid::table::{CellContent, TableConfig, TableController};
use virtgrid::{ColumnDef, Key, Modifiers, MultipleMode, Row, SelectionValue, SortDirection, SortState};

fn make_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            serde_json::from_value(json!({
                "id": i,
                "name": format!("row {i}"),
                "v": (n - i) % 3,
            }))
            .unwrap()
        })
        .collect()
}

fn make_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "Id").width(60.0).sortable(true),
        ColumnDef::new("name", "Name").width(200.0),
        ColumnDef::new("v", "V").width(100.0).sortable(true),
    ]
}

fn create_table(n: usize, config: TableConfig) -> TableController {
    let mut table = TableController::with_data(config, make_rows(n), make_columns());
    table.set_size(400.0, 300.0);
    table
}

fn ids(table: &mut TableController) -> Vec<i64> {
    table
        .sorted_rows()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

fn int_keys(value: &SelectionValue) -> Vec<i64> {
    value
        .keys()
        .iter()
        .map(|k| match k {
            Key::Int(i) => *i,
            Key::Text(t) => panic!("unexpected text key {t}"),
        })
        .collect()
}

// ============================================================================
// Column widths
// ============================================================================

#[test_case(&[60.0, 200.0, 100.0] ; "mixed")]
#[test_case(&[1.0, 1.0, 1.0] ; "thirds")]
#[test_case(&[33.3, 0.7, 1000.0, 7.0] ; "uneven")]
#[test_case(&[250.0] ; "single column")]
fn test_column_percents_sum_to_one(widths: &[f64]) {
    let columns = widths
        .iter()
        .enumerate()
        .map(|(i, w)| ColumnDef::new(format!("c{i}"), "").width(*w))
        .collect();
    let mut table = TableController::with_data(TableConfig::default(), Vec::new(), columns);
    let sum: f64 = table.mapped_columns().iter().map(|c| c.percent).sum();
    assert!((sum - 1.0).abs() < 1e-9, "percents sum to {sum}");
}

#[test_case(100.0 ; "narrow container")]
#[test_case(400.0 ; "snug container")]
#[test_case(1600.0 ; "wide container")]
fn test_rendered_width_never_below_configured(container: f64) {
    let mut table = create_table(10, TableConfig::default());
    table.set_size(container, 300.0);
    table.sync();
    let configured: Vec<f64> = table.mapped_columns().iter().map(|c| c.width).collect();
    let layout = table.grid().layout();
    for (i, width) in configured.iter().enumerate() {
        assert!(layout.columns.size(i) >= *width);
    }
}

#[test]
fn test_widths_are_proportional_to_available_space() {
    let mut table = create_table(10, TableConfig::default());
    // 737 - 17 scrollbar = 720 available, 2x the configured 360
    table.set_size(737.0, 300.0);
    table.sync();
    let layout = table.grid().layout();
    assert!((layout.columns.size(0) - 120.0).abs() < 1e-9);
    assert!((layout.columns.size(1) - 400.0).abs() < 1e-9);
    assert!((layout.columns.size(2) - 200.0).abs() < 1e-9);
}

#[test]
fn test_unusable_widths_fall_back_to_default() {
    let columns: Vec<ColumnDef> = serde_json::from_value(json!([
        {"dataKey": "a", "width": "abc"},
        {"dataKey": "b", "width": "150"},
        {"dataKey": "c"},
    ]))
    .unwrap();
    let mut table = TableController::with_data(TableConfig::default(), Vec::new(), columns);
    let widths: Vec<f64> = table.mapped_columns().iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![100.0, 150.0, 100.0]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_header_click_cycles_sort() {
    let mut table = create_table(6, TableConfig::default());
    let source = ids(&mut table);

    assert_eq!(
        table.header_click("id"),
        Some(SortState::new("id", SortDirection::Asc))
    );
    assert_eq!(ids(&mut table), source);

    assert_eq!(
        table.header_click("id"),
        Some(SortState::new("id", SortDirection::Desc))
    );
    assert_eq!(ids(&mut table), vec![5, 4, 3, 2, 1, 0]);

    assert_eq!(table.header_click("id"), Some(SortState::none()));
    assert_eq!(ids(&mut table), source);
}

#[test]
fn test_header_click_on_unsortable_column_is_ignored() {
    let mut table = create_table(4, TableConfig::default());
    assert_eq!(table.header_click("name"), None);
    assert_eq!(table.sort(), &SortState::none());
}

#[test_case(SortDirection::Asc ; "ascending")]
#[test_case(SortDirection::Desc ; "descending")]
fn test_sort_is_stable(direction: SortDirection) {
    let mut table = create_table(30, TableConfig::default());
    table.set_sort(SortState::new("v", direction));
    let rows: Vec<(u64, i64)> = table
        .sorted_rows()
        .iter()
        .map(|r| (r["v"].as_u64().unwrap(), r["id"].as_i64().unwrap()))
        .collect();

    for pair in rows.windows(2) {
        let ((va, ia), (vb, ib)) = (pair[0], pair[1]);
        match direction {
            SortDirection::Asc => assert!(va <= vb),
            SortDirection::Desc => assert!(va >= vb),
        }
        if va == vb {
            assert!(ia < ib, "equal keys must keep source order");
        }
    }
}

#[test]
fn test_header_cells_carry_sort_classes() {
    let mut table = create_table(4, TableConfig::default());
    table.set_sort(SortState::new("v", SortDirection::Desc));
    let view = table.render();
    let headers: Vec<_> = view
        .regions
        .iter()
        .flat_map(|r| &r.cells)
        .filter(|c| c.rect.row_index == 0)
        .collect();
    assert_eq!(headers.len(), 3);

    let v = headers.iter().find(|c| c.data_key == "v").unwrap();
    assert!(v.has_class("sortBy"));
    assert!(v.has_class("descSort"));
    let name = headers.iter().find(|c| c.data_key == "name").unwrap();
    assert!(!name.has_class("sortBy"));
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_shift_click_selects_range_in_display_order() {
    let config = TableConfig {
        multiple: MultipleMode::Range,
        ..TableConfig::default()
    };
    let mut table = create_table(10, config);
    table.set_sort(SortState::new("id", SortDirection::Desc));

    table.cell_click(2, "name", Modifiers::NONE);
    let value = table.cell_click(5, "name", Modifiers::shift()).unwrap();
    // display rows 2..=5 of 9,8,...,0
    assert_eq!(int_keys(&value), vec![7, 6, 5, 4]);
}

#[test]
fn test_anchor_resets_when_sort_changes() {
    let config = TableConfig {
        multiple: MultipleMode::Range,
        ..TableConfig::default()
    };
    let mut table = create_table(10, config);

    table.cell_click(1, "name", Modifiers::NONE);
    assert_eq!(table.anchor(), Some(1));
    table.header_click("v");
    assert_eq!(table.anchor(), None);

    let value = table.cell_click(3, "name", Modifiers::shift()).unwrap();
    assert_eq!(value.keys().len(), 1);
    assert_eq!(table.anchor(), Some(3));
}

#[test]
fn test_anchor_resets_when_rows_change() {
    let config = TableConfig {
        multiple: MultipleMode::Range,
        ..TableConfig::default()
    };
    let mut table = create_table(10, config);
    table.cell_click(4, "name", Modifiers::NONE);
    table.set_rows(Rc::new(make_rows(10)));
    table.sync();
    assert_eq!(table.anchor(), None);
}

#[test]
fn test_toggle_mode_adds_and_removes() {
    let config = TableConfig {
        multiple: MultipleMode::Toggle,
        ..TableConfig::default()
    };
    let mut table = create_table(5, config);
    table.cell_click(1, "id", Modifiers::NONE);
    table.cell_click(3, "id", Modifiers::NONE);
    assert_eq!(int_keys(table.value()), vec![1, 3]);
    table.cell_click(1, "id", Modifiers::NONE);
    assert_eq!(int_keys(table.value()), vec![3]);
}

#[test]
fn test_selected_rows_render_highlighted() {
    let mut table = create_table(5, TableConfig::default());
    table.set_value(SelectionValue::Single(Key::Int(2)));
    let view = table.render();
    let selected: Vec<usize> = view
        .regions
        .iter()
        .flat_map(|r| &r.cells)
        .filter(|c| c.has_class("cellSelected"))
        .map(|c| c.row_index.unwrap())
        .collect();
    assert_eq!(selected, vec![2, 2, 2]);
}

#[test]
fn test_row_click_event_carries_row_and_value() {
    let mut table = create_table(5, TableConfig::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    table.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    table.cell_click(3, "name", Modifiers::ctrl());
    let events = events.borrow();
    match events.as_slice() {
        [TableEvent::RowClick {
            value,
            row,
            row_index,
            column_key,
            modifiers,
        }] => {
            assert_eq!(value, &SelectionValue::Single(Key::Int(3)));
            assert_eq!(row["name"], json!("row 3"));
            assert_eq!(*row_index, 3);
            assert_eq!(column_key, "name");
            assert!(modifiers.ctrl);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

// ============================================================================
// Panes and scrolling
// ============================================================================

#[test]
fn test_header_stays_pinned_while_scrolling() {
    let mut table = create_table(100, TableConfig::default());
    table.scroll_to(0.0, 2000.0);
    let view = table.render();

    let header = view.region(RegionKind::TopRight).unwrap();
    assert_eq!(header.region.visible_rows, 0..1);
    assert!(header.cells.iter().all(|c| c.rect.row_index == 0));

    // 2000px into the body is data row 50 (grid row 51)
    let body = view.region(RegionKind::BottomRight).unwrap();
    assert!(body.region.visible_rows.contains(&51));
    assert!(!body.region.visible_rows.contains(&0));
}

#[test]
fn test_unbounded_overscan_renders_every_row() {
    let config = TableConfig::from_json(r#"{"overscanRowCount": 18446744073709551615}"#).unwrap();
    let mut table = create_table(50, config);
    let view = table.render();
    let body = view.region(RegionKind::BottomRight).unwrap();
    assert_eq!(body.region.visible_rows.end, 51);
}

#[test]
fn test_fixed_panes_follow_shared_scroll() {
    let config = TableConfig {
        fixed_column_count: 1,
        ..TableConfig::default()
    };
    let mut table = create_table(100, config);
    table.set_size(200.0, 300.0);
    table.scroll_to(100.0, 400.0);
    let view = table.render();

    let top_right = view.region(RegionKind::TopRight).unwrap();
    let bottom_left = view.region(RegionKind::BottomLeft).unwrap();
    let main = view.region(RegionKind::BottomRight).unwrap();

    assert_eq!(top_right.region.scroll_left, main.region.scroll_left);
    assert_eq!(bottom_left.region.scroll_top, main.region.scroll_top);
    assert_eq!(main.region.scroll_left, 100.0);
    assert_eq!(main.region.scroll_top, 400.0);
    assert!(top_right.region.scrollbar_hidden);
    assert!(bottom_left.region.scrollbar_hidden);
    assert!(!main.region.scrollbar_hidden);
}

#[test]
fn test_scroll_is_clamped_and_reported() {
    let mut table = create_table(20, TableConfig::default());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    table.subscribe(move |e| {
        if let TableEvent::Scroll(info) = e {
            sink.borrow_mut().push(*info);
        }
    });

    // 20 rows x 40px = 800 content, 300 - 40 header = 260 visible
    let info = table.scroll_to(0.0, 10_000.0).unwrap();
    assert_eq!(info.scroll_top, 540.0);
    assert_eq!(info.scroll_height, 800.0);
    assert_eq!(info.client_height, 260.0);

    // Same position again does not notify
    assert!(table.scroll_to(0.0, 10_000.0).is_none());
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_click_on_header_point_sorts() {
    let mut table = create_table(5, TableConfig::default());
    assert!(table.click_at(10.0, 10.0, Modifiers::NONE));
    assert_eq!(table.sort(), &SortState::new("id", SortDirection::Asc));
}

#[test]
fn test_click_on_body_point_selects() {
    let mut table = create_table(5, TableConfig::default());
    // y = 40 header + 2 rows + 10
    assert!(table.click_at(100.0, 130.0, Modifiers::NONE));
    assert_eq!(table.value(), &SelectionValue::Single(Key::Int(2)));
}

#[test]
fn test_empty_rows_render_header_only() {
    let mut table = create_table(0, TableConfig::default());
    let view = table.render();
    assert_eq!(view.cell_count(), 3);
    assert!(view
        .regions
        .iter()
        .flat_map(|r| &r.cells)
        .all(|c| c.row_index.is_none()));
}

#[test]
fn test_custom_render_passes_composites_through() {
    let columns = vec![
        ColumnDef::new("id", "Id").width(60.0),
        ColumnDef::new("name", "Name")
            .width(200.0)
            .render(|value, _row, index| json!({"tag": "b", "text": value, "index": index})),
        ColumnDef::new("v", "V")
            .width(100.0)
            .render(|value, _row, _index| json!(format!("v={}", value.unwrap()))),
    ];
    let mut table = TableController::with_data(TableConfig::default(), make_rows(3), columns);
    table.set_size(400.0, 300.0);
    let view = table.render();
    let cells: Vec<_> = view
        .regions
        .iter()
        .flat_map(|r| &r.cells)
        .filter(|c| c.row_index == Some(1))
        .collect();

    let name = cells.iter().find(|c| c.data_key == "name").unwrap();
    assert_eq!(
        name.content,
        CellContent::Custom {
            body: json!({"tag": "b", "text": "row 1", "index": 1})
        }
    );
    let v = cells.iter().find(|c| c.data_key == "v").unwrap();
    assert_eq!(v.content.as_text(), Some("v=2"));
}

// ============================================================================
// Resize reconciliation
// ============================================================================

#[test]
fn test_repeated_renders_do_not_remeasure() {
    let mut table = create_table(50, TableConfig::default());
    table.render();
    let n = table.grid().measurement_count();
    table.render();
    table.scroll_to(0.0, 200.0);
    table.render();
    assert_eq!(table.grid().measurement_count(), n);
}

#[test]
fn test_new_column_set_remeasures_once() {
    let mut table = create_table(50, TableConfig::default());
    table.render();
    let n = table.grid().measurement_count();

    table.set_columns(Rc::new(make_columns()));
    table.render();
    table.render();
    assert_eq!(table.grid().measurement_count(), n + 1);
}

#[test]
fn test_width_change_remeasures() {
    let mut table = create_table(50, TableConfig::default());
    table.render();
    let n = table.grid().measurement_count();

    table.set_size(900.0, 300.0);
    table.render();
    assert_eq!(table.grid().measurement_count(), n + 1);
    assert!((table.grid().layout().total_width() - 883.0).abs() < 1e-9);
}

#[test]
fn test_sub_pixel_width_change_remeasures() {
    let mut table = create_table(50, TableConfig::default());
    table.set_size(517.0, 300.0);
    table.render();
    assert!((table.grid().layout().total_width() - 500.0).abs() < 1e-9);

    table.set_size(517.4, 300.0);
    table.render();
    assert!((table.grid().layout().total_width() - 500.4).abs() < 1e-9);
}

#[test]
fn test_render_snapshot_from_json() {
    let rows = serde_json::to_string(&make_rows(3)).unwrap();
    let columns = r#"[{"dataKey":"id","label":"Id","width":50},{"dataKey":"name","label":"Name"}]"#;
    let json = virtgrid::render_snapshot(&rows, columns, "{}", 400.0, 300.0).unwrap();
    let view: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(view["regions"].as_array().unwrap().len(), 4);
    assert_eq!(view["regions"][0]["kind"], json!("topLeft"));
    assert_eq!(view["scroll"]["scrollTop"], json!(0.0));
}

#[test]
fn test_render_snapshot_rejects_bad_config() {
    let err = virtgrid::render_snapshot("[]", "[]", r#"{"rowHeight": -1}"#, 400.0, 300.0);
    assert!(err.is_err());
}
