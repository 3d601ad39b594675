//! Browser smoke tests for the WebAssembly facades.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

use virtgrid::{GridTable, SearchSelect};

wasm_bindgen_test_configure!(run_in_browser);

fn json(text: &str) -> JsValue {
    js_sys::JSON::parse(text).unwrap()
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn test_table_renders_four_regions() {
    let mut table = GridTable::new(json(r#"{"fixedColumnCount": 1}"#)).unwrap();
    table
        .set_columns(json(r#"[{"dataKey":"id","label":"Id","width":60,"sort":true},{"dataKey":"name","label":"Name"}]"#))
        .unwrap();
    table
        .set_rows(json(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#))
        .unwrap();
    table.set_size(400.0, 300.0);

    let view = table.render().unwrap();
    let regions: Array = get(&view, "regions").dyn_into().unwrap();
    assert_eq!(regions.length(), 4);
    assert_eq!(get(&regions.get(0), "kind").as_string().as_deref(), Some("topLeft"));
}

#[wasm_bindgen_test]
fn test_table_events_reach_callback() {
    let mut table = GridTable::new(JsValue::UNDEFINED).unwrap();
    table
        .set_columns(json(r#"[{"dataKey":"id","label":"Id","sort":true}]"#))
        .unwrap();
    table.set_rows(json(r#"[{"id":1},{"id":2}]"#)).unwrap();
    table.set_size(400.0, 300.0);

    let seen = Array::new();
    let sink = seen.clone();
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        sink.push(&event);
    });
    table.on_event(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());

    assert!(table.click_cell(0, 0, false, false, false));
    assert_eq!(seen.length(), 1);
    assert_eq!(get(&seen.get(0), "type").as_string().as_deref(), Some("sortChange"));
    drop(callback);
}

#[wasm_bindgen_test]
fn test_select_menu_and_choice() {
    let mut select = SearchSelect::new(json(r#"{"valueKey":"id","labelKey":"name"}"#)).unwrap();
    select
        .set_options(json(r#"[{"id":1,"name":"Apple"},{"id":2,"name":"Banana"}]"#))
        .unwrap();
    select.open_menu();

    let menu = select.menu().unwrap();
    assert_eq!(get(&menu, "type").as_string().as_deref(), Some("list"));
    assert!(select.select_option(1));
    assert_eq!(select.value().unwrap().as_f64(), Some(2.0));
    assert!(!select.is_menu_open());
}

#[wasm_bindgen_test]
fn test_select_rejects_bad_config() {
    assert!(SearchSelect::new(json(r#"{"optionHeight": -5}"#)).is_err());
}
