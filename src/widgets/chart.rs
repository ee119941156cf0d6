//! Chart.js binding

use serde_json::json;
use wasm_bindgen::prelude::*;

use super::{global_defined, js_error, to_js};
use crate::error::WidgetError;
use crate::projection::{ChartSurface, MONTH_LABELS};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &web_sys::HtmlCanvasElement, config: &JsValue) -> Result<ChartJs, JsValue>;

    #[wasm_bindgen(method, getter, js_class = "Chart")]
    fn data(this: &ChartJs) -> JsValue;

    #[wasm_bindgen(method, js_class = "Chart")]
    fn update(this: &ChartJs);

    #[wasm_bindgen(method, js_class = "Chart")]
    fn destroy(this: &ChartJs);
}

/// One chart with a single monthly dataset
pub struct ChartWidget {
    chart: ChartJs,
}

impl ChartWidget {
    /// `kind` is a Chart.js chart type such as `bar` or `line`
    pub fn mount(canvas: &web_sys::HtmlCanvasElement, kind: &str) -> Result<Self, WidgetError> {
        if !global_defined("Chart") {
            return Err(WidgetError::Unavailable("Chart.js"));
        }
        let config = to_js(&json!({
            "type": kind,
            "data": {
                "labels": MONTH_LABELS,
                "datasets": [{ "label": "Events", "data": vec![0u32; 12] }],
            },
        }))?;
        let chart = ChartJs::new(canvas, &config).map_err(js_error)?;
        Ok(Self { chart })
    }

    fn first_dataset(&self) -> Option<JsValue> {
        let datasets = js_sys::Reflect::get(&self.chart.data(), &JsValue::from_str("datasets")).ok()?;
        let first = js_sys::Reflect::get_u32(&datasets, 0).ok()?;
        (!first.is_undefined()).then_some(first)
    }
}

impl ChartSurface for ChartWidget {
    fn replace_data(&self, data: &[u32]) {
        let Some(dataset) = self.first_dataset() else {
            log::warn!("[ChartWidget] Chart has no dataset to fill");
            return;
        };
        let values: js_sys::Array = data.iter().map(|&n| JsValue::from(n)).collect();
        if let Err(e) = js_sys::Reflect::set(&dataset, &JsValue::from_str("data"), &values) {
            log::error!("[ChartWidget] {}", js_error(e));
        }
    }

    fn update(&self) {
        self.chart.update();
    }
}

impl Drop for ChartWidget {
    fn drop(&mut self) {
        self.chart.destroy();
    }
}
