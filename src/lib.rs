//! Landing page controller.
//!
//! The host-independent part decides when the page's canvas animations are
//! constructed, played, paused, resized and disposed, and computes the scroll
//! effects (navbar, works gallery, text reveal). The `wasm` module binds all of it
//! to the browser and to the Rive, Lenis and GSAP globals loaded by the page.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod host;
pub mod lazy;
pub mod navbar;
pub mod overlay;
pub mod pixel_ratio;
pub mod reveal;
pub mod scroll;
pub mod site;
pub mod widget;

pub use config::SiteConfig;
pub use controller::{Controller, ControllerConfig};
pub use error::{Error, Result};
pub use host::{Host, Timer};
pub use widget::{WidgetDescriptor, WidgetId, WidgetState};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod dom;
    mod gsap;
    mod host;
    mod lenis;
    pub mod page;
    mod rive;
    mod video;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let (config, config_error) = match dom::read_config(&document) {
            Ok(config) => (config, None),
            Err(e) => (crate::SiteConfig::default(), Some(e)),
        };
        let _ = console_log::init_with_level(config.log_level());
        if let Some(e) = config_error {
            log::warn!("{e}; using defaults");
        }

        page::init(window, document, config).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
