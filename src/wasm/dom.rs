//! Small DOM helpers shared by the wasm side.

use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::{Error, Result};

pub fn js_err(e: JsValue) -> Error {
    Error::Js(format!("{e:?}"))
}

/// Element with `id`, cast to `T`. Missing or differently typed elements are `None`.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Site config from the inline JSON element, or defaults when there is none.
pub fn read_config(document: &Document) -> Result<SiteConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(text) => SiteConfig::from_json(&text),
        None => Ok(SiteConfig::default()),
    }
}

pub fn set_class(element: &Element, class: &str, present: bool) -> Result<()> {
    let list = element.class_list();
    if present {
        list.add_1(class).map_err(js_err)
    } else {
        list.remove_1(class).map_err(js_err)
    }
}

/// Plain JS object from key/value pairs.
pub fn object(entries: &[(&str, JsValue)]) -> Result<Object> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value).map_err(js_err)?;
    }
    Ok(obj)
}

pub fn set_timeout(window: &Window, delay_ms: f64, f: impl FnOnce() + 'static) -> Result<()> {
    let callback = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms.max(0.0).round() as i32,
        )
        .map(|_| ())
        .map_err(js_err)
}

/// Run `f` once the document has loaded: immediately if `load` has already fired,
/// otherwise on `load`. The module is fetched asynchronously, so startup usually
/// runs after `load`.
pub fn when_loaded(window: &Window, document: &Document, f: impl FnOnce() + 'static) -> Result<()> {
    if document.ready_state() == "complete" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    window
        .add_event_listener_with_callback("load", callback.unchecked_ref())
        .map_err(js_err)
}

pub fn request_animation_frame(window: &Window, f: impl FnOnce() + 'static) -> Result<()> {
    let callback = Closure::once_into_js(f);
    window
        .request_animation_frame(callback.unchecked_ref())
        .map(|_| ())
        .map_err(js_err)
}

/// Turn CSS transitions off for two frames so a class change applies instantly.
pub fn suppress_transition(window: &Window, element: &HtmlElement) -> Result<()> {
    element
        .style()
        .set_property("transition", "none")
        .map_err(js_err)?;
    let element = element.clone();
    let outer = window.clone();
    request_animation_frame(window, move || {
        let restore = request_animation_frame(&outer, move || {
            let _ = element.style().set_property("transition", "");
        });
        if let Err(e) = restore {
            log::warn!("could not restore navbar transition: {e}");
        }
    })
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}
