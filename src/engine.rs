//! Boundary with the vector-animation runtime.
//!
//! Only what the controller needs is modelled here: the construction options, the
//! handful of calls made on a live instance, and the runtime events it reacts to.

/// How an artboard is fitted into its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    #[default]
    Contain,
    Cover,
    Fill,
    FitWidth,
    FitHeight,
    ScaleDown,
    None,
    /// Resize the artboard to the canvas using the file's own layout rules.
    Layout,
}

impl Fit {
    /// Name used by the runtime's `Fit` enum.
    pub fn as_str(self) -> &'static str {
        match self {
            Fit::Contain => "contain",
            Fit::Cover => "cover",
            Fit::Fill => "fill",
            Fit::FitWidth => "fitWidth",
            Fit::FitHeight => "fitHeight",
            Fit::ScaleDown => "scaleDown",
            Fit::None => "none",
            Fit::Layout => "layout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Center,
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::TopLeft => "topLeft",
            Alignment::TopCenter => "topCenter",
            Alignment::TopRight => "topRight",
            Alignment::CenterLeft => "centerLeft",
            Alignment::CenterRight => "centerRight",
            Alignment::BottomLeft => "bottomLeft",
            Alignment::BottomCenter => "bottomCenter",
            Alignment::BottomRight => "bottomRight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub fit: Fit,
    pub alignment: Alignment,
    /// Only honoured with [`Fit::Layout`].
    pub scale_factor: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            fit: Fit::Layout,
            alignment: Alignment::Center,
            scale_factor: 1.1,
        }
    }
}

impl Layout {
    pub fn contain_centered() -> Self {
        Self {
            fit: Fit::Contain,
            alignment: Alignment::Center,
            scale_factor: 1.0,
        }
    }
}

/// Pushes scroll progress into a numeric view-model property of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollBinding {
    pub property: String,
    /// Progress 0..=1 is mapped onto `0..=scale`.
    pub scale: f64,
}

impl ScrollBinding {
    pub fn value(&self, progress: f64) -> f64 {
        progress * self.scale
    }
}

/// Everything handed to the runtime's constructor besides the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub source: String,
    pub state_machines: Vec<String>,
    pub artboard: Option<String>,
    pub layout: Layout,
    pub autoplay: bool,
    pub auto_bind: bool,
    pub offscreen_renderer: bool,
    pub handle_events: bool,
    pub touch_scroll: bool,
}

impl EngineConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state_machines: vec!["State Machine 1".into()],
            artboard: Some("Artboard".into()),
            layout: Layout::default(),
            autoplay: false,
            auto_bind: true,
            offscreen_renderer: true,
            handle_events: false,
            touch_scroll: true,
        }
    }
}

/// Events raised by a running animation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The animation asked to open a link.
    OpenUrl { url: String, target: Option<String> },
    /// A named general-purpose event; the page has no use for these yet.
    General { name: String },
}

/// A constructed animation. Calls before the instance reports ready are the
/// controller's responsibility to avoid.
pub trait AnimationInstance {
    /// Match the drawing surface to the canvas' CSS size at `pixel_ratio`.
    fn resize_to_anchor(&self, pixel_ratio: f64);
    fn play(&self);
    fn pause(&self);
    /// Release GPU and runtime resources. The instance is unusable afterwards.
    fn dispose(&self);
    /// Write a numeric view-model property. Returns false if the property is unknown.
    fn set_number(&self, property: &str, value: f64) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_names() {
        assert_eq!(Fit::Layout.as_str(), "layout");
        assert_eq!(Fit::FitWidth.as_str(), "fitWidth");
        assert_eq!(Alignment::BottomRight.as_str(), "bottomRight");
    }

    #[test]
    fn scroll_binding_scales_progress() {
        let binding = ScrollBinding {
            property: "ScrollParalax".into(),
            scale: 60.0,
        };
        assert_eq!(binding.value(0.5), 30.0);
        assert_eq!(binding.value(0.0), 0.0);
    }

    #[test]
    fn defaults_wait_for_visibility() {
        let cfg = EngineConfig::new("a.riv");
        assert!(!cfg.autoplay);
        assert_eq!(cfg.state_machines, vec!["State Machine 1".to_string()]);
        assert_eq!(cfg.layout.fit, Fit::Layout);
    }
}
