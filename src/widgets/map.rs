//! Leaflet binding

use std::cell::RefCell;

use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{global_defined, js_error, js_f64, to_js};
use crate::error::WidgetError;
use crate::models::Coordinates;
use crate::projection::{MapClick, MapSurface, MarkerClickHandler, MarkerSpec};

const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const INITIAL_ZOOM: u8 = 13;
const ICON_BASE: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/";

#[wasm_bindgen]
extern "C" {
    type LeafletMap;
    type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = map, catch)]
    fn leaflet_map(el: &web_sys::HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on_map(this: &LeafletMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(lat_lng: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = icon)]
    fn icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, target: &JsValue);

    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &Layer, text: &str);

    #[wasm_bindgen(method, js_name = on)]
    fn on_layer(this: &Layer, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &Layer);

    #[wasm_bindgen(js_namespace = ["L", "DomEvent"], js_name = stopPropagation)]
    fn dom_stop_propagation(event: &JsValue);
}

/// Leaflet mouse event
struct LeafletClick(JsValue);

impl MapClick for LeafletClick {
    fn coordinates(&self) -> Coordinates {
        let lat_lng = js_sys::Reflect::get(&self.0, &JsValue::from_str("latlng")).unwrap_or(JsValue::UNDEFINED);
        Coordinates::new(
            js_f64(&lat_lng, "lat").unwrap_or_default(),
            js_f64(&lat_lng, "lng").unwrap_or_default(),
        )
    }

    fn stop_propagation(&self) {
        dom_stop_propagation(&self.0);
    }
}

/// OpenStreetMap map with one marker layer owned by the projection
pub struct MapWidget {
    map: LeafletMap,
    markers: Layer,
    marker_options: JsValue,
    _map_click: Closure<dyn FnMut(JsValue)>,
    marker_clicks: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl MapWidget {
    /// Mount centered on `center` with a pin on it; empty-space clicks go to `on_map_click`
    pub fn mount(
        el: &web_sys::HtmlElement,
        center: Coordinates,
        mut on_map_click: impl FnMut(Coordinates) + 'static,
    ) -> Result<Self, WidgetError> {
        if !global_defined("L") {
            return Err(WidgetError::Unavailable("Leaflet"));
        }
        let options = to_js(&json!({ "center": [center.lat, center.lng], "zoom": INITIAL_ZOOM }))?;
        let map = leaflet_map(el, &options).map_err(js_error)?;
        tile_layer(TILE_URL, &to_js(&json!({ "attribution": TILE_ATTRIBUTION }))?).add_to(&map);

        let icon = icon(&to_js(&json!({
            "iconUrl": format!("{ICON_BASE}marker-icon.png"),
            "shadowUrl": format!("{ICON_BASE}marker-shadow.png"),
            "iconSize": [25, 41],
            "iconAnchor": [12, 41],
        }))?);
        let marker_options = to_js(&json!({}))?;
        js_sys::Reflect::set(&marker_options, &JsValue::from_str("icon"), &icon).map_err(js_error)?;
        marker(&lat_lng(center), &marker_options).add_to(&map);

        let markers = layer_group();
        markers.add_to(&map);

        let map_click = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            on_map_click(LeafletClick(event).coordinates());
        });
        map.on_map("click", map_click.as_ref().unchecked_ref());

        // the container is sized by CSS after the first layout
        let resize: LeafletMap = JsValue::clone(&map).unchecked_into();
        gloo_timers::callback::Timeout::new(0, move || resize.invalidate_size()).forget();

        log::info!("[MapWidget] Mounted at {:.4}, {:.4}", center.lat, center.lng);
        Ok(Self {
            map,
            markers,
            marker_options,
            _map_click: map_click,
            marker_clicks: RefCell::new(Vec::new()),
        })
    }
}

fn lat_lng(at: Coordinates) -> JsValue {
    js_sys::Array::of2(&at.lat.into(), &at.lng.into()).into()
}

impl MapSurface for MapWidget {
    fn clear_markers(&self) {
        self.markers.clear_layers();
        self.marker_clicks.borrow_mut().clear();
    }

    fn add_marker(&self, spec: &MarkerSpec, on_click: MarkerClickHandler) {
        let pin = marker(&lat_lng(spec.position), &self.marker_options);
        pin.bind_tooltip(&spec.label);
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            on_click(&LeafletClick(event));
        });
        pin.on_layer("click", handler.as_ref().unchecked_ref());
        pin.add_to(&self.markers);
        self.marker_clicks.borrow_mut().push(handler);
    }
}

impl Drop for MapWidget {
    fn drop(&mut self) {
        self.map.remove();
    }
}
