//! Device pixel ratio capping.
//!
//! High-density displays can report ratios of 3 or more; rendering a vector
//! animation at that density costs far more than it shows, so every resize goes
//! through [`capped`].

/// Upper bound applied when no configuration overrides it.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Clamp `actual` to `max`. A missing or nonsensical ratio counts as 1.
pub fn capped(actual: f64, max: f64) -> f64 {
    let actual = if actual.is_finite() && actual > 0.0 { actual } else { 1.0 };
    actual.min(max)
}

/// Media query that stops matching once the ratio changes, e.g. when a window
/// is dragged to a screen with another density.
pub fn resolution_query(ratio: f64) -> String {
    format!("(resolution: {ratio}dppx)")
}
