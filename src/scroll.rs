//! Scroll position as seen by the rest of the page.

/// One sample of the smooth-scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current scroll offset in CSS pixels.
    pub offset: f64,
    /// Position through the scrollable distance, 0..=1.
    pub progress: f64,
    /// Signed change in `offset` since the previous sample.
    pub delta: f64,
}

/// Derives [`ScrollState`] from raw offsets, remembering the previous sample.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last: Option<f64>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// `limit` is the total scrollable distance; a page that cannot scroll reports
    /// progress 0.
    pub fn sample(&mut self, offset: f64, limit: f64) -> ScrollState {
        let progress = if limit > 0.0 {
            (offset / limit).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let delta = self.last.map_or(0.0, |last| offset - last);
        self.last = Some(offset);
        ScrollState {
            offset,
            progress,
            delta,
        }
    }
}

/// Lenis' default easing: exponential ease-out, pinned to 1 at the end.
pub fn ease_out_expo(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}
