//! Bindings to the Lenis smooth-scroll library (`Lenis` UMD global).

use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::dom::object;
use crate::config::SmoothScrollConfig;
use crate::error::Result;
use crate::scroll::ease_out_expo;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type Lenis;

    #[wasm_bindgen(constructor)]
    fn new(options: &JsValue) -> Lenis;

    #[wasm_bindgen(method)]
    pub fn on(this: &Lenis, event: &str, callback: &Function);

    /// Advance one frame; must be called from exactly one frame driver.
    #[wasm_bindgen(method)]
    pub fn raf(this: &Lenis, time_ms: f64);

    #[wasm_bindgen(method, js_name = scrollTo)]
    pub fn scroll_to(this: &Lenis, target: &JsValue);

    #[wasm_bindgen(method, getter)]
    pub fn scroll(this: &Lenis) -> f64;

    /// Total scrollable distance.
    #[wasm_bindgen(method, getter)]
    pub fn limit(this: &Lenis) -> f64;
}

pub fn create(config: &SmoothScrollConfig) -> Result<Lenis> {
    let easing = Closure::<dyn Fn(f64) -> f64>::new(ease_out_expo);
    let options = object(&[
        ("duration", config.duration.into()),
        ("easing", easing.into_js_value()),
        ("orientation", "vertical".into()),
        ("gestureOrientation", "vertical".into()),
        ("smoothWheel", config.smooth_wheel.into()),
        ("infinite", config.infinite.into()),
    ])?;
    Ok(Lenis::new(&options))
}
