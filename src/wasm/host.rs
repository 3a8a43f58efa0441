use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use super::dom::{self, element_by_id, js_err};
use super::rive::{Callbacks, RiveWidget};
use crate::controller::{Controller, ControllerConfig};
use crate::engine::EngineConfig;
use crate::error::{Error, Result};
use crate::host::{Host, Timer};
use crate::lazy;
use crate::site::{HIDDEN_CLASS, LOADING_OVERLAY};
use crate::widget::WidgetId;

pub type Shared = Rc<RefCell<Controller<DomHost>>>;
pub type WeakShared = Weak<RefCell<Controller<DomHost>>>;

/// Browser side of the controller: DOM lookups, observers, timers and the Rive
/// runtime.
pub struct DomHost {
    window: Window,
    document: Document,
    overlay: Option<HtmlElement>,
    me: WeakShared,
    proximity: HashMap<String, IntersectionObserver>,
    // observers live as long as the page
    visibility: Vec<IntersectionObserver>,
}

pub fn shared(window: Window, document: Document, config: ControllerConfig) -> Shared {
    Rc::new_cyclic(|me: &WeakShared| {
        let overlay = element_by_id::<HtmlElement>(&document, LOADING_OVERLAY);
        let host = DomHost {
            window,
            document,
            overlay,
            me: me.clone(),
            proximity: HashMap::new(),
            visibility: Vec::new(),
        };
        RefCell::new(Controller::new(host, config))
    })
}

/// Run `f` against the controller. Browser callbacks never nest, but a runtime may
/// call back synchronously while the controller is borrowed; such calls are
/// retried on the next task.
pub fn dispatch(me: WeakShared, f: impl FnOnce(&mut Controller<DomHost>) + 'static) {
    let Some(shared) = me.upgrade() else {
        return;
    };
    let Ok(mut controller) = shared.try_borrow_mut() else {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = dom::set_timeout(&window, 0.0, move || dispatch(me, f)) {
            log::error!("could not defer controller call: {e}");
        }
        return;
    };
    f(&mut controller);
}

fn observer(
    mut callback: impl FnMut(Vec<IntersectionObserverEntry>) + 'static,
    options: &IntersectionObserverInit,
) -> Result<IntersectionObserver> {
    let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            callback(entries.iter().map(|e| e.unchecked_into()).collect());
        },
    );
    let observer = IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), options)
        .map_err(js_err)?;
    closure.forget();
    Ok(observer)
}

impl Host for DomHost {
    type Instance = RiveWidget;

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn has_anchor(&self, anchor: &str) -> bool {
        self.document.get_element_by_id(anchor).is_some()
    }

    fn construct(&mut self, id: WidgetId, anchor: &str, config: &EngineConfig) -> Result<RiveWidget> {
        let canvas = element_by_id::<HtmlCanvasElement>(&self.document, anchor)
            .ok_or_else(|| Error::Js(format!("#{anchor} is not a canvas")))?;

        let me = self.me.clone();
        let on_load = Closure::<dyn FnMut()>::new(move || {
            dispatch(me.clone(), move |c| c.on_widget_ready(id));
        });
        let me = self.me.clone();
        let on_load_error = Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
            log::warn!("{id}: {e:?}");
            dispatch(me.clone(), move |c| c.on_widget_failed(id));
        });

        let widget = RiveWidget::new(
            &canvas,
            config,
            Callbacks {
                on_load,
                on_load_error,
            },
        )?;
        if config.handle_events {
            let me = self.me.clone();
            widget.on_event(move |event| {
                dispatch(me.clone(), move |c| c.on_engine_event(id, event));
            });
        }
        Ok(widget)
    }

    fn watch_proximity(&mut self, anchor: &str, margin_px: f64) {
        let Some(element) = self.document.get_element_by_id(anchor) else {
            return;
        };
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&lazy::root_margin(margin_px));

        let me = self.me.clone();
        let watcher = observer(
            move |entries| {
                for entry in entries.into_iter().filter(|e| e.is_intersecting()) {
                    let anchor = entry.target().id();
                    dispatch(me.clone(), move |c| {
                        c.on_proximity(&anchor);
                    });
                }
            },
            &options,
        );
        match watcher {
            Ok(watcher) => {
                watcher.observe(&element);
                self.proximity.insert(anchor.to_string(), watcher);
            }
            Err(e) => log::warn!("proximity watcher for #{anchor}: {e}"),
        }
    }

    fn unwatch_proximity(&mut self, anchor: &str) {
        if let Some(watcher) = self.proximity.remove(anchor) {
            watcher.disconnect();
        }
    }

    fn watch_visibility(&mut self, id: WidgetId, anchor: &str, threshold: f64) {
        let Some(element) = self.document.get_element_by_id(anchor) else {
            return;
        };
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let me = self.me.clone();
        let watcher = observer(
            move |entries| {
                for entry in entries {
                    let visible = entry.is_intersecting() && entry.intersection_ratio() >= threshold;
                    dispatch(me.clone(), move |c| c.on_visibility_change(id, visible));
                }
            },
            &options,
        );
        match watcher {
            Ok(watcher) => {
                watcher.observe(&element);
                self.visibility.push(watcher);
            }
            Err(e) => log::warn!("visibility watcher for #{anchor}: {e}"),
        }
    }

    fn set_timeout(&mut self, delay_ms: f64, timer: Timer) {
        let me = self.me.clone();
        let scheduled = dom::set_timeout(&self.window, delay_ms, move || {
            dispatch(me, move |c| c.on_timer(timer));
        });
        if let Err(e) = scheduled {
            log::error!("could not schedule {timer:?}: {e}");
        }
    }

    fn hide_overlay(&mut self) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        if let Err(e) = dom::set_class(overlay, HIDDEN_CLASS, true) {
            log::warn!("could not hide loading overlay: {e}");
        }
    }

    fn open_url(&mut self, url: &str, target: &str) {
        if let Err(e) = self.window.open_with_url_and_target(url, target) {
            log::warn!("could not open {url}: {e:?}");
        }
    }
}
