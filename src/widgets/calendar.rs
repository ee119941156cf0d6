//! FullCalendar binding

use serde_json::json;
use wasm_bindgen::prelude::*;

use super::{global_defined, js_error, js_string, to_js};
use crate::error::WidgetError;
use crate::forms::EventClick;
use crate::projection::{CalendarEntry, CalendarSurface};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = FullCalendar, js_name = Calendar)]
    type CalendarJs;

    #[wasm_bindgen(constructor, js_namespace = FullCalendar, js_class = "Calendar", catch)]
    fn new(el: &web_sys::HtmlElement, options: &JsValue) -> Result<CalendarJs, JsValue>;

    #[wasm_bindgen(method, js_class = "Calendar")]
    fn render(this: &CalendarJs);

    #[wasm_bindgen(method, js_class = "Calendar", js_name = removeAllEvents)]
    fn remove_all_events(this: &CalendarJs);

    #[wasm_bindgen(method, js_class = "Calendar", js_name = addEvent)]
    fn add_event(this: &CalendarJs, event: &JsValue);

    #[wasm_bindgen(method, js_class = "Calendar")]
    fn destroy(this: &CalendarJs);
}

/// Month grid with date and event click callbacks
pub struct CalendarWidget {
    calendar: CalendarJs,
    _date_click: Closure<dyn FnMut(JsValue)>,
    _event_click: Closure<dyn FnMut(JsValue)>,
}

impl CalendarWidget {
    pub fn mount(
        el: &web_sys::HtmlElement,
        mut on_date_click: impl FnMut(String) + 'static,
        mut on_event_click: impl FnMut(EventClick) + 'static,
    ) -> Result<Self, WidgetError> {
        if !global_defined("FullCalendar") {
            return Err(WidgetError::Unavailable("FullCalendar"));
        }
        let date_click = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
            on_date_click(js_string(&arg, "dateStr"));
        });
        let event_click = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
            let event = js_sys::Reflect::get(&arg, &JsValue::from_str("event")).unwrap_or(JsValue::UNDEFINED);
            let id = js_string(&event, "id");
            let color = js_string(&event, "backgroundColor");
            on_event_click(EventClick {
                id: (!id.is_empty()).then_some(id),
                title: js_string(&event, "title"),
                color: (!color.is_empty()).then_some(color),
                start: js_string(&event, "startStr"),
            });
        });

        let options = to_js(&json!({ "initialView": "dayGridMonth", "events": [] }))?;
        let set = |key: &str, value: &JsValue| js_sys::Reflect::set(&options, &JsValue::from_str(key), value);
        set("dateClick", date_click.as_ref()).map_err(js_error)?;
        set("eventClick", event_click.as_ref()).map_err(js_error)?;

        let calendar = CalendarJs::new(el, &options).map_err(js_error)?;
        calendar.render();
        log::info!("[CalendarWidget] Rendered");
        Ok(Self {
            calendar,
            _date_click: date_click,
            _event_click: event_click,
        })
    }
}

impl CalendarSurface for CalendarWidget {
    fn remove_all_events(&self) {
        self.calendar.remove_all_events();
    }

    fn add_event(&self, entry: &CalendarEntry) {
        match to_js(entry) {
            Ok(event) => self.calendar.add_event(&event),
            Err(e) => log::error!("[CalendarWidget] Skipping event {}: {}", entry.id, e),
        }
    }
}

impl Drop for CalendarWidget {
    fn drop(&mut self) {
        self.calendar.destroy();
    }
}
