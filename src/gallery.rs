//! Horizontal "works" gallery geometry.
//!
//! On desktop the works section is pinned while its wrapper slides left by the
//! overflow width, and every card is bent onto a shallow arc centred on the
//! viewport.

use crate::config::GalleryConfig;

/// Per-card transform for the arc effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Downward offset in CSS pixels; 0 at the viewport centre.
    pub y: f64,
    pub rotation_deg: f64,
}

pub fn is_mobile(config: &GalleryConfig, viewport_width: f64) -> bool {
    viewport_width <= config.mobile_breakpoint
}

/// Horizontal travel of the wrapper: negative, by however much it overflows.
pub fn scroll_amount(scroll_width: f64, viewport_width: f64) -> f64 {
    -(scroll_width - viewport_width)
}

/// ScrollTrigger `end` expression: keep the section pinned for one wrapper width.
pub fn pin_end(scroll_width: f64) -> String {
    format!("+={scroll_width}")
}

/// Parabolic approximation of a circle of radius `viewport_width * radius_factor`.
pub fn card_transform(config: &GalleryConfig, card_center_x: f64, viewport_width: f64) -> CardTransform {
    let radius = viewport_width * config.radius_factor;
    let distance = card_center_x - viewport_width / 2.0;
    if radius <= 0.0 {
        return CardTransform {
            y: 0.0,
            rotation_deg: 0.0,
        };
    }
    CardTransform {
        y: distance * distance / (2.0 * radius),
        rotation_deg: (distance / radius).to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        let cfg = GalleryConfig::default();
        assert!(is_mobile(&cfg, 768.0));
        assert!(!is_mobile(&cfg, 769.0));
    }

    #[test]
    fn travel_is_overflow() {
        assert_eq!(scroll_amount(4000.0, 1280.0), -2720.0);
        assert_eq!(pin_end(4000.0), "+=4000");
    }

    #[test]
    fn centre_card_is_flat() {
        let t = card_transform(&GalleryConfig::default(), 500.0, 1000.0);
        assert_eq!(t.y, 0.0);
        assert_eq!(t.rotation_deg, 0.0);
    }

    #[test]
    fn off_centre_cards_drop_and_tilt() {
        let cfg = GalleryConfig::default();
        // radius 12_000, distance 600
        let right = card_transform(&cfg, 1100.0, 1000.0);
        assert!((right.y - 15.0).abs() < 1e-9);
        assert!((right.rotation_deg - 0.05f64.to_degrees()).abs() < 1e-9);
        let left = card_transform(&cfg, -100.0, 1000.0);
        assert_eq!(left.y, right.y);
        assert_eq!(left.rotation_deg, -right.rotation_deg);
    }
}
