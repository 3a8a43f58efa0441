//! Bindings to GSAP and its ScrollTrigger plugin (`gsap` / `ScrollTrigger` globals).

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;

use super::dom::js_err;
use crate::error::Result;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = gsap, js_name = registerPlugin)]
    fn register_plugin(plugin: &JsValue);

    #[wasm_bindgen(js_namespace = gsap)]
    pub fn to(targets: &JsValue, vars: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = gsap, js_name = fromTo)]
    pub fn from_to(targets: &JsValue, from: &JsValue, to: &JsValue) -> JsValue;

    #[wasm_bindgen(js_namespace = gsap)]
    pub fn set(targets: &JsValue, vars: &JsValue) -> JsValue;

    /// Receives the ticker time in seconds.
    #[wasm_bindgen(js_namespace = ["gsap", "ticker"], js_name = add)]
    pub fn ticker_add(callback: &Function);

    #[wasm_bindgen(js_namespace = ["gsap", "ticker"], js_name = lagSmoothing)]
    pub fn lag_smoothing(threshold: f64);

    pub type Trigger;

    #[wasm_bindgen(js_namespace = ScrollTrigger)]
    pub fn create(vars: &JsValue) -> Trigger;

    #[wasm_bindgen(js_namespace = ScrollTrigger)]
    pub fn refresh();

    #[wasm_bindgen(js_namespace = ScrollTrigger)]
    pub fn update();

    /// Current scroll position seen by the trigger.
    #[wasm_bindgen(method)]
    pub fn scroll(this: &Trigger) -> f64;
}

/// Register the ScrollTrigger plugin with gsap.
pub fn register_scroll_trigger() -> Result<()> {
    let plugin = Reflect::get(&js_sys::global(), &"ScrollTrigger".into()).map_err(js_err)?;
    if plugin.is_undefined() {
        return Err(crate::Error::Js("ScrollTrigger is not loaded".into()));
    }
    register_plugin(&plugin);
    Ok(())
}
