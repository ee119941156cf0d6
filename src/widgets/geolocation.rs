//! One-shot browser geolocation

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{js_error, js_f64, js_string};
use crate::error::WidgetError;
use crate::models::Coordinates;

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, WidgetError>>>>>;

fn settle(reply: &Reply, result: Result<Coordinates, WidgetError>) {
    if let Some(tx) = reply.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

/// Ask the browser for the current position. Resolves once, with whichever
/// callback fires first.
pub async fn current_position() -> Result<Coordinates, WidgetError> {
    let geolocation = web_sys::window()
        .ok_or(WidgetError::Unavailable("window"))?
        .navigator()
        .geolocation()
        .map_err(|_| WidgetError::Unavailable("navigator.geolocation"))?;

    let (tx, rx) = oneshot::channel();
    let reply: Reply = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let reply = Rc::clone(&reply);
        Closure::once_into_js(move |position: JsValue| {
            let coords = js_sys::Reflect::get(&position, &JsValue::from_str("coords")).unwrap_or(JsValue::UNDEFINED);
            let result = match (js_f64(&coords, "latitude"), js_f64(&coords, "longitude")) {
                (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
                _ => Err(WidgetError::Geolocation("position without coordinates".to_string())),
            };
            settle(&reply, result);
        })
    };
    let on_error = {
        let reply = Rc::clone(&reply);
        Closure::once_into_js(move |error: JsValue| {
            settle(&reply, Err(WidgetError::Geolocation(js_string(&error, "message"))));
        })
    };

    geolocation
        .get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
        .map_err(js_error)?;

    rx.await
        .unwrap_or_else(|_| Err(WidgetError::Geolocation("request dropped".to_string())))
}
