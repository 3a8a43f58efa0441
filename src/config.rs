//! Site configuration.
//!
//! Every knob has a default matching the shipped page, so the config element is
//! optional. A page can override any subset with
//! `<script type="application/json" id="site-config">{ ... }</script>`.

use serde::Deserialize;

use crate::error::Result;
use crate::lazy::{VIDEO_MARGIN_PX, WIDGET_MARGIN_PX};
use crate::pixel_ratio::DEFAULT_MAX_PIXEL_RATIO;

/// Id of the optional inline JSON config element.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `log` level name used for the console logger.
    pub log_level: String,
    pub max_pixel_ratio: f64,
    /// Fraction of a widget's anchor that must be on screen for it to play.
    pub visibility_threshold: f64,
    pub widget_margin_px: f64,
    pub video_margin_px: f64,
    pub overlay: OverlayConfig,
    pub navbar: NavbarConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub gallery: GalleryConfig,
    /// Base URL the `.riv` sources are resolved against.
    pub asset_base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            visibility_threshold: 0.1,
            widget_margin_px: WIDGET_MARGIN_PX,
            video_margin_px: VIDEO_MARGIN_PX,
            overlay: OverlayConfig::default(),
            navbar: NavbarConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            gallery: GalleryConfig::default(),
            asset_base: "assets/rive/".into(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parsed level, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    pub fn asset(&self, file: &str) -> String {
        format!("{}{}", self.asset_base, file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// The overlay never disappears sooner than this after startup.
    pub minimum_ms: f64,
    /// Length of the CSS fade; the backing animation is disposed once it ends.
    pub fade_ms: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            minimum_ms: 1000.0,
            fade_ms: 500.0,
        }
    }
}

/// Thresholds for the show/hide navbar, all in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Below this offset the navbar gets its transparent `navbar-top` look.
    pub top_offset: f64,
    /// At or below this offset a sticky navbar snaps back to its original place.
    pub reset_offset: f64,
    /// Travel in one direction needed before the navbar hides or shows.
    pub direction_threshold: f64,
    /// Per-sample deltas smaller than this are trackpad noise and ignored.
    pub jitter: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            top_offset: 50.0,
            reset_offset: 10.0,
            direction_threshold: 15.0,
            jitter: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Seconds.
    pub duration: f64,
    pub smooth_wheel: bool,
    pub infinite: bool,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration: 1.2,
            smooth_wheel: true,
            infinite: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Viewports this wide or narrower skip the horizontal gallery.
    pub mobile_breakpoint: f64,
    /// Curve radius as a multiple of viewport width; larger is flatter.
    pub radius_factor: f64,
    pub scrub: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            radius_factor: 12.0,
            scrub: 0.1,
        }
    }
}
