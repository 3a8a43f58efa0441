//! Bindings to the Rive web runtime (`rive` UMD global).

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::dom::{js_err, object};
use crate::engine::{AnimationInstance, EngineConfig, EngineEvent};
use crate::error::Result;

/// `EventType.RiveEvent`.
const RIVE_EVENT: &str = "riveevent";
/// `RiveEventType.General`.
const EVENT_GENERAL: f64 = 128.0;
/// `RiveEventType.OpenUrl`.
const EVENT_OPEN_URL: f64 = 131.0;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = rive)]
    pub type Rive;

    #[wasm_bindgen(constructor, js_namespace = rive, catch)]
    fn new(params: &JsValue) -> std::result::Result<Rive, JsValue>;

    #[wasm_bindgen(method, js_name = resizeDrawingSurfaceToCanvas)]
    fn resize_drawing_surface_to_canvas(this: &Rive, pixel_ratio: f64);

    #[wasm_bindgen(method)]
    fn play(this: &Rive);

    #[wasm_bindgen(method)]
    fn pause(this: &Rive);

    #[wasm_bindgen(method)]
    fn cleanup(this: &Rive);

    #[wasm_bindgen(method)]
    fn on(this: &Rive, event: &str, callback: &Function);

    #[wasm_bindgen(method, getter, js_name = viewModelInstance)]
    fn view_model_instance(this: &Rive) -> Option<ViewModelInstance>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = rive)]
    type Layout;

    #[wasm_bindgen(constructor, js_namespace = rive)]
    fn new(params: &JsValue) -> Layout;
}

#[wasm_bindgen]
extern "C" {
    type ViewModelInstance;

    #[wasm_bindgen(method)]
    fn number(this: &ViewModelInstance, path: &str) -> Option<ViewModelInstanceNumber>;

    type ViewModelInstanceNumber;

    #[wasm_bindgen(method, setter)]
    fn set_value(this: &ViewModelInstanceNumber, value: f64);
}

/// A running Rive animation bound to one canvas.
pub struct RiveWidget {
    rive: Rive,
}

/// Callbacks wired into the runtime's constructor.
pub struct Callbacks {
    pub on_load: Closure<dyn FnMut()>,
    pub on_load_error: Closure<dyn FnMut(JsValue)>,
}

impl RiveWidget {
    pub fn new(canvas: &HtmlCanvasElement, config: &EngineConfig, callbacks: Callbacks) -> Result<Self> {
        let layout = Layout::new(&object(&[
            ("fit", config.layout.fit.as_str().into()),
            ("alignment", config.layout.alignment.as_str().into()),
            ("layoutScaleFactor", config.layout.scale_factor.into()),
        ])?);
        let state_machines: Array = config
            .state_machines
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect();

        let params = object(&[
            ("src", config.source.as_str().into()),
            ("canvas", canvas.clone().into()),
            ("stateMachines", state_machines.into()),
            ("layout", layout.into()),
            ("autoplay", config.autoplay.into()),
            ("autoBind", config.auto_bind.into()),
            ("useOffscreenRenderer", config.offscreen_renderer.into()),
            // open-url events are routed through the controller instead
            ("automaticallyHandleEvents", false.into()),
            ("isTouchScrollEnabled", config.touch_scroll.into()),
            ("onLoad", callbacks.on_load.into_js_value()),
            ("onLoadError", callbacks.on_load_error.into_js_value()),
        ])?;
        if let Some(artboard) = &config.artboard {
            Reflect::set(&params, &"artboard".into(), &artboard.as_str().into()).map_err(js_err)?;
        }

        let rive = Rive::new(&params).map_err(js_err)?;
        Ok(Self { rive })
    }

    /// Forward runtime events to `handler`. Unknown event kinds are dropped.
    pub fn on_event(&self, mut handler: impl FnMut(EngineEvent) + 'static) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let data = Reflect::get(&event, &"data".into()).unwrap_or(JsValue::UNDEFINED);
            if let Some(event) = parse_event(&data) {
                handler(event);
            }
        });
        self.rive.on(RIVE_EVENT, callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

impl AnimationInstance for RiveWidget {
    fn resize_to_anchor(&self, pixel_ratio: f64) {
        self.rive.resize_drawing_surface_to_canvas(pixel_ratio);
    }

    fn play(&self) {
        self.rive.play();
    }

    fn pause(&self) {
        self.rive.pause();
    }

    fn dispose(&self) {
        self.rive.cleanup();
    }

    fn set_number(&self, property: &str, value: f64) -> bool {
        let Some(input) = self
            .rive
            .view_model_instance()
            .and_then(|vmi| vmi.number(property))
        else {
            return false;
        };
        input.set_value(value);
        true
    }
}

fn string_field(data: &JsValue, key: &str) -> Option<String> {
    Reflect::get(data, &key.into()).ok()?.as_string()
}

/// Decode the `data` payload of a Rive event.
fn parse_event(data: &JsValue) -> Option<EngineEvent> {
    if data.is_undefined() || data.is_null() {
        return None;
    }
    let kind = Reflect::get(data, &"type".into()).ok()?.as_f64()?;
    if kind == EVENT_OPEN_URL {
        Some(EngineEvent::OpenUrl {
            url: string_field(data, "url")?,
            target: string_field(data, "target"),
        })
    } else if kind == EVENT_GENERAL {
        Some(EngineEvent::General {
            name: string_field(data, "name").unwrap_or_default(),
        })
    } else {
        None
    }
}
