//! Widget Bindings
//!
//! `wasm-bindgen` bindings to the page's JavaScript widgets (FullCalendar,
//! Leaflet, Chart.js) and the browser geolocation API. Each widget type
//! implements the matching projection surface.

mod calendar;
mod chart;
mod geolocation;
mod map;

use wasm_bindgen::JsValue;

use crate::error::WidgetError;

pub use calendar::CalendarWidget;
pub use chart::ChartWidget;
pub use geolocation::current_position;
pub use map::MapWidget;

/// Render a JSON value as a plain JS object (maps become objects, not `Map`s)
fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, WidgetError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| WidgetError::Js(e.to_string()))
}

fn js_error(err: JsValue) -> WidgetError {
    WidgetError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// `target[key]` as a string, empty when absent
fn js_string(target: &JsValue, key: &str) -> String {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn js_f64(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// Whether the page loaded the script defining `global`
fn global_defined(global: &str) -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str(global)).unwrap_or(false)
}
