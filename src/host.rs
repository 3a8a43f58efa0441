//! What the controller needs from its environment.
//!
//! In the browser this is the DOM, `IntersectionObserver`, `setTimeout` and the
//! animation runtime; in tests it is a recording fake with a manual clock. Every
//! callback the host installs must report back through the matching
//! [`Controller`](crate::Controller) method (`on_proximity`, `on_widget_ready`,
//! `on_visibility_change`, `on_timer`, ...).

use crate::engine::{AnimationInstance, EngineConfig};
use crate::error::Result;
use crate::widget::WidgetId;

/// Deferred work the controller asks the host to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Minimum overlay time has passed: start the CSS fade.
    HideOverlay,
    /// The fade is over: release the overlay animation.
    DisposeOverlay,
}

pub trait Host {
    type Instance: AnimationInstance;

    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;

    /// Raw device pixel ratio; capping is the controller's job.
    fn device_pixel_ratio(&self) -> f64;

    fn has_anchor(&self, anchor: &str) -> bool;

    /// Start loading `config.source` into the canvas `anchor`. Completion is
    /// reported later via `on_widget_ready(id)` or `on_widget_failed(id)`.
    fn construct(&mut self, id: WidgetId, anchor: &str, config: &EngineConfig) -> Result<Self::Instance>;

    /// Report `anchor` once it comes within `margin_px` of the viewport.
    fn watch_proximity(&mut self, anchor: &str, margin_px: f64);

    fn unwatch_proximity(&mut self, anchor: &str);

    /// Report every crossing of `threshold` for the widget's anchor.
    fn watch_visibility(&mut self, id: WidgetId, anchor: &str, threshold: f64);

    fn set_timeout(&mut self, delay_ms: f64, timer: Timer);

    /// Apply the hide transition to the overlay element.
    fn hide_overlay(&mut self);

    fn open_url(&mut self, url: &str, target: &str);
}
