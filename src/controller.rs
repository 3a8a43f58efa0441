//! Viewport-driven widget lifecycle.
//!
//! The controller owns every widget record and decides when each one is
//! constructed, played, paused, resized and, for the loading overlay, disposed.
//! It never talks to the browser directly; everything goes through [`Host`].

use std::collections::{BTreeMap, HashMap};

use crate::config::{OverlayConfig, SiteConfig};
use crate::engine::{AnimationInstance, EngineEvent};
use crate::error::{Error, Result};
use crate::host::{Host, Timer};
use crate::lazy::LazyLoader;
use crate::overlay::{LoadingOverlay, OverlayPhase};
use crate::pixel_ratio;
use crate::scroll::ScrollState;
use crate::widget::{Activation, Widget, WidgetDescriptor, WidgetId, WidgetState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub max_pixel_ratio: f64,
    pub overlay: OverlayConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for ControllerConfig {
    fn from(site: &SiteConfig) -> Self {
        Self {
            max_pixel_ratio: site.max_pixel_ratio,
            overlay: site.overlay,
        }
    }
}

pub struct Controller<H: Host> {
    host: H,
    config: ControllerConfig,
    widgets: BTreeMap<WidgetId, Widget<H::Instance>>,
    anchors: HashMap<String, WidgetId>,
    lazy: LazyLoader<String, WidgetId>,
    /// Ready widgets that receive resize broadcasts, in readiness order.
    live: Vec<WidgetId>,
    primary: Option<WidgetId>,
    overlay: Option<LoadingOverlay>,
    next_id: u32,
}

impl<H: Host> Controller<H> {
    pub fn new(host: H, config: ControllerConfig) -> Self {
        Self {
            host,
            lazy: LazyLoader::new(),
            config,
            widgets: BTreeMap::new(),
            anchors: HashMap::new(),
            live: Vec::new(),
            primary: None,
            overlay: None,
            next_id: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self, id: WidgetId) -> Option<WidgetState> {
        self.widgets.get(&id).map(|w| w.state)
    }

    pub fn widget_id(&self, anchor: &str) -> Option<WidgetId> {
        self.anchors.get(anchor).copied()
    }

    pub fn live(&self) -> &[WidgetId] {
        &self.live
    }

    pub fn overlay_phase(&self) -> Option<OverlayPhase> {
        self.overlay.as_ref().map(LoadingOverlay::phase)
    }

    /// Register a widget. A missing anchor is not an error: the widget is skipped
    /// and `Ok(None)` returned.
    pub fn register(&mut self, descriptor: WidgetDescriptor) -> Result<Option<WidgetId>> {
        if self.anchors.contains_key(&descriptor.anchor) {
            return Err(Error::DuplicateAnchor(descriptor.anchor));
        }
        if !self.host.has_anchor(&descriptor.anchor) {
            log::debug!("#{} not in document, skipping widget", descriptor.anchor);
            return Ok(None);
        }

        let id = WidgetId(self.next_id);
        self.next_id += 1;
        let anchor = descriptor.anchor.clone();
        let activation = descriptor.activation;
        self.anchors.insert(anchor.clone(), id);
        self.widgets.insert(id, Widget::new(id, descriptor));

        match activation {
            Activation::Eager => self.construct(id),
            Activation::Lazy { margin_px } => {
                self.lazy.observe(anchor.clone(), id);
                self.host.watch_proximity(&anchor, margin_px);
                log::debug!("{id} waiting for #{anchor} ({margin_px}px margin)");
            }
        }
        Ok(Some(id))
    }

    /// Register the page's mandatory widget. Its absence aborts startup, and its
    /// ready signal releases the loading overlay.
    pub fn register_primary(&mut self, descriptor: WidgetDescriptor) -> Result<WidgetId> {
        let anchor = descriptor.anchor.clone();
        let id = self
            .register(descriptor)?
            .ok_or(Error::MissingPrimarySurface(anchor))?;
        self.primary = Some(id);
        Ok(id)
    }

    /// The proximity watcher saw `anchor` approach. Only the first report for a
    /// lazy widget constructs it; returns whether this call did.
    pub fn on_proximity(&mut self, anchor: &str) -> bool {
        let Some(id) = self.lazy.fire(anchor) else {
            return false;
        };
        self.host.unwatch_proximity(anchor);
        self.construct(id);
        true
    }

    fn construct(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if widget.state != WidgetState::Unconstructed {
            return;
        }
        match self
            .host
            .construct(id, &widget.descriptor.anchor, &widget.descriptor.engine)
        {
            Ok(instance) => {
                log::debug!("{id} loading {}", widget.descriptor.engine.source);
                widget.instance = Some(instance);
                widget.state = WidgetState::Loading;
            }
            Err(e) => {
                log::warn!("{id} could not be constructed: {e}");
                widget.state = WidgetState::Failed;
            }
        }
    }

    /// The runtime finished loading the widget's source.
    pub fn on_widget_ready(&mut self, id: WidgetId) {
        let ratio = self.pixel_ratio();
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if widget.state != WidgetState::Loading {
            return;
        }
        let Some(instance) = widget.instance.as_ref() else {
            return;
        };
        instance.resize_to_anchor(ratio);
        widget.state = WidgetState::ReadyPaused;
        self.host
            .watch_visibility(id, &widget.descriptor.anchor, widget.descriptor.visibility_threshold);
        self.live.push(id);
        log::info!("{id} ready (#{})", widget.descriptor.anchor);

        if self.primary == Some(id) {
            self.maybe_hide_loading_overlay();
        }
    }

    /// The runtime gave up on the widget's source. It stays blank for the rest of
    /// the page's life.
    pub fn on_widget_failed(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if widget.state != WidgetState::Loading {
            return;
        }
        log::warn!("{id} failed to load {}", widget.descriptor.engine.source);
        widget.state = WidgetState::Failed;
    }

    /// Play on entering the viewport, pause on leaving. Repeated reports in the
    /// same direction and reports for widgets that are not ready do nothing.
    pub fn on_visibility_change(&mut self, id: WidgetId, visible: bool) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        let Some(instance) = widget.instance.as_ref() else {
            return;
        };
        match (widget.state, visible) {
            (WidgetState::ReadyPaused, true) => {
                instance.play();
                widget.state = WidgetState::ReadyPlaying;
            }
            (WidgetState::ReadyPlaying, false) => {
                instance.pause();
                widget.state = WidgetState::ReadyPaused;
            }
            _ => {}
        }
    }

    /// Current device pixel ratio, capped.
    pub fn pixel_ratio(&self) -> f64 {
        pixel_ratio::capped(self.host.device_pixel_ratio(), self.config.max_pixel_ratio)
    }

    /// Resize every ready widget to its canvas. Returns how many were resized.
    pub fn broadcast_resize(&mut self) -> usize {
        let ratio = self.pixel_ratio();
        let mut resized = 0;
        for id in &self.live {
            if let Some(instance) = self.widgets.get(id).and_then(Widget::ready_instance) {
                instance.resize_to_anchor(ratio);
                resized += 1;
            }
        }
        log::debug!("resized {resized} widgets at {ratio}x");
        resized
    }

    /// Start the one-shot loading overlay, optionally backed by its own animation.
    pub fn start_loading_overlay(&mut self, descriptor: Option<WidgetDescriptor>) -> Result<()> {
        if self.overlay.is_some() {
            return Err(Error::OverlayAlreadyStarted);
        }
        let widget = match descriptor {
            Some(descriptor) => self.register(descriptor)?,
            None => None,
        };
        self.overlay = Some(LoadingOverlay::new(
            self.host.now_ms(),
            self.config.overlay,
            widget,
        ));
        Ok(())
    }

    /// Ask the overlay to go away once its minimum display time is up. Safe to call
    /// any number of times; only the first call schedules anything.
    pub fn maybe_hide_loading_overlay(&mut self) -> bool {
        let now = self.host.now_ms();
        let Some(delay) = self.overlay.as_mut().and_then(|o| o.request_hide(now)) else {
            return false;
        };
        log::debug!("hiding loading overlay in {delay}ms");
        self.host.set_timeout(delay, Timer::HideOverlay);
        true
    }

    pub fn on_timer(&mut self, timer: Timer) {
        match timer {
            Timer::HideOverlay => {
                let Some(fade) = self.overlay.as_mut().and_then(LoadingOverlay::begin_fade) else {
                    return;
                };
                self.host.hide_overlay();
                self.host.set_timeout(fade, Timer::DisposeOverlay);
            }
            Timer::DisposeOverlay => {
                let Some(widget) = self.overlay.as_mut().and_then(LoadingOverlay::finish) else {
                    return;
                };
                if let Some(id) = widget {
                    self.dispose(id);
                }
                log::debug!("loading overlay disposed");
            }
        }
    }

    fn dispose(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if let Some(instance) = widget.instance.take() {
            instance.dispose();
        }
        widget.state = WidgetState::Disposed;
        self.live.retain(|live| *live != id);
        if self.lazy.fire(widget.descriptor.anchor.as_str()).is_some() {
            self.host.unwatch_proximity(&widget.descriptor.anchor);
        }
    }

    /// Feed scroll progress into every ready widget bound to it. Returns how many
    /// properties were written.
    pub fn on_scroll(&mut self, scroll: &ScrollState) -> usize {
        let mut written = 0;
        for widget in self.widgets.values() {
            let (Some(binding), Some(instance)) =
                (widget.descriptor.scroll_binding.as_ref(), widget.ready_instance())
            else {
                continue;
            };
            if instance.set_number(&binding.property, binding.value(scroll.progress)) {
                written += 1;
            }
        }
        written
    }

    pub fn on_engine_event(&mut self, id: WidgetId, event: EngineEvent) {
        match event {
            EngineEvent::OpenUrl { url, target } => {
                let target = target.as_deref().unwrap_or("_blank");
                log::info!("{id} opening {url}");
                self.host.open_url(&url, target);
            }
            EngineEvent::General { name } => {
                log::trace!("{id} event {name}");
            }
        }
    }
}
