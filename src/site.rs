//! The page's widget catalogue and element ids.

use crate::config::SiteConfig;
use crate::engine::Layout;
use crate::widget::WidgetDescriptor;

pub const PRIMARY_CANVAS: &str = "rive-canvas";
pub const LOADING_OVERLAY: &str = "loading-overlay";
pub const LOADING_CANVAS: &str = "loading-canvas";
pub const LOGO_NAV_CANVAS: &str = "logo-canvas-nav";
pub const LOGO_HERO_CANVAS: &str = "logo-canvas-hero";
pub const CTA_NAV_CANVAS: &str = "cta-canvas-nav";
pub const CALCULATOR_CANVAS: &str = "riveCanvas2";
pub const BALLS_CANVAS: &str = "riveCanvas3";
pub const WORKS_SECTION: &str = "works";

pub const NAVBAR: &str = ".navbar";
pub const HERO: &str = ".hero-container";
pub const HORIZONTAL_WRAPPER: &str = ".horizontal-wrapper";
pub const SCROLL_BOX: &str = ".scroll-box";
pub const ABOUT_TEXT: &str = ".about-desc-text";
pub const ABOUT_SECTION: &str = ".about-section";
pub const IN_PAGE_LINKS: &str = "a[href^=\"#\"]";
pub const LAZY_VIDEOS: &str = "video.lazy-video";
pub const LAZY_VIDEO_CLASS: &str = "lazy-video";

/// Class that fades the loading overlay out.
pub const HIDDEN_CLASS: &str = "hidden";

/// View-model property the mascot maps scroll progress onto.
pub const MASCOT_SCROLL_PROPERTY: &str = "ScrollParalax";
pub const MASCOT_SCROLL_SCALE: f64 = 60.0;

/// Spinner shown in the loading overlay.
pub fn loading(config: &SiteConfig) -> WidgetDescriptor {
    let mut spinner = WidgetDescriptor::eager(LOADING_CANVAS, config.asset("loadingRiv2.riv"))
        .layout(Layout::contain_centered())
        .threshold(0.0);
    // plain timeline animation: no state machine, default artboard
    spinner.engine.state_machines.clear();
    spinner.engine.artboard = None;
    spinner
}

/// The mascot under the hero. Mandatory: the page does not start without its canvas.
pub fn primary(config: &SiteConfig) -> WidgetDescriptor {
    WidgetDescriptor::eager(PRIMARY_CANVAS, config.asset("raivumascotNewVersion.riv"))
        .artboard("MainArtboard")
        .threshold(config.visibility_threshold)
        .bind_scroll(MASCOT_SCROLL_PROPERTY, MASCOT_SCROLL_SCALE)
}

/// Every other widget, eager above-the-fold ones first.
pub fn widgets(config: &SiteConfig) -> Vec<WidgetDescriptor> {
    let margin = config.widget_margin_px;
    let threshold = config.visibility_threshold;
    vec![
        WidgetDescriptor::eager(LOGO_NAV_CANVAS, config.asset("logo_raivu2.riv")).threshold(threshold),
        WidgetDescriptor::eager(LOGO_HERO_CANVAS, config.asset("logo_raivu2.riv")).threshold(threshold),
        WidgetDescriptor::eager(CTA_NAV_CANVAS, config.asset("contact_us_raivuNewVersion.riv"))
            .layout(Layout::contain_centered())
            .handle_events()
            .threshold(threshold),
        WidgetDescriptor::lazy(CALCULATOR_CANVAS, config.asset("calkulatorCompress.riv"), margin)
            .artboard("mainCal")
            .handle_events()
            .threshold(threshold),
        WidgetDescriptor::lazy(BALLS_CANVAS, config.asset("ball_pysicupdateoldversionV5.riv"), margin)
            .artboard("mainPlay")
            .handle_events()
            .threshold(threshold),
    ]
}
