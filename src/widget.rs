use std::fmt;

use crate::engine::{EngineConfig, Layout, ScrollBinding};

/// Stable key for a registered widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Unconstructed,
    Loading,
    ReadyPaused,
    ReadyPlaying,
    /// The runtime could not load the source. Terminal; never retried.
    Failed,
    Disposed,
}

impl WidgetState {
    pub fn is_ready(self) -> bool {
        matches!(self, WidgetState::ReadyPaused | WidgetState::ReadyPlaying)
    }
}

/// When a widget gets constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    /// Right away; for above-the-fold content.
    Eager,
    /// Once the anchor comes within `margin_px` of the viewport.
    Lazy { margin_px: f64 },
}

/// Registration request for one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDescriptor {
    /// DOM id of the canvas the widget renders into.
    pub anchor: String,
    pub engine: EngineConfig,
    pub activation: Activation,
    pub visibility_threshold: f64,
    pub scroll_binding: Option<ScrollBinding>,
}

impl WidgetDescriptor {
    pub fn eager(anchor: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            engine: EngineConfig::new(source),
            activation: Activation::Eager,
            visibility_threshold: 0.1,
            scroll_binding: None,
        }
    }

    pub fn lazy(anchor: impl Into<String>, source: impl Into<String>, margin_px: f64) -> Self {
        Self {
            activation: Activation::Lazy { margin_px },
            ..Self::eager(anchor, source)
        }
    }

    pub fn artboard(mut self, name: impl Into<String>) -> Self {
        self.engine.artboard = Some(name.into());
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.engine.layout = layout;
        self
    }

    pub fn handle_events(mut self) -> Self {
        self.engine.handle_events = true;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn bind_scroll(mut self, property: impl Into<String>, scale: f64) -> Self {
        self.scroll_binding = Some(ScrollBinding {
            property: property.into(),
            scale,
        });
        self
    }
}

/// Controller-side record of a widget and, once constructed, its instance.
#[derive(Debug)]
pub struct Widget<I> {
    pub id: WidgetId,
    pub descriptor: WidgetDescriptor,
    pub state: WidgetState,
    pub instance: Option<I>,
}

impl<I> Widget<I> {
    pub fn new(id: WidgetId, descriptor: WidgetDescriptor) -> Self {
        Self {
            id,
            descriptor,
            state: WidgetState::Unconstructed,
            instance: None,
        }
    }

    pub fn anchor(&self) -> &str {
        &self.descriptor.anchor
    }

    /// The instance, but only once the runtime has reported it ready.
    pub fn ready_instance(&self) -> Option<&I> {
        if self.state.is_ready() {
            self.instance.as_ref()
        } else {
            None
        }
    }
}
