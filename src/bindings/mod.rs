//! WebAssembly facades for a JavaScript host.
//!
//! Events raised while a method runs are queued and delivered to the JS
//! callback after the controller borrow is released, so a callback may call
//! straight back into the same instance.

mod select;
mod table;

pub use select::SearchSelect;
pub use table::GridTable;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::VirtgridError;

pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Serialize with plain objects for maps, so rows arrive as JS objects.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from(VirtgridError::from(e)))
}

/// Deserialize a host value; `undefined` and `null` give the default.
pub(crate) fn from_js_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
) -> Result<T, VirtgridError> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, VirtgridError> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Deliver queued events to `callback`, one call per event.
pub(crate) fn deliver<E: Serialize>(callback: Option<&js_sys::Function>, events: Vec<E>) {
    let Some(callback) = callback else {
        return;
    };
    for event in events {
        let payload = match to_js(&event) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("event serialization failed: {e:?}");
                continue;
            }
        };
        if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
            log::warn!("event callback threw: {e:?}");
        }
    }
}
