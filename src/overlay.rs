//! Loading overlay timing.
//!
//! The overlay goes through its phases exactly once. Both the primary widget's
//! ready signal and the page-load fallback ask it to hide; only the first request
//! counts.

use crate::config::OverlayConfig;
use crate::widget::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayPhase {
    Showing,
    /// The hide transition will start at `at_ms`.
    HideScheduled { at_ms: f64 },
    Fading,
    Disposed,
}

#[derive(Debug)]
pub struct LoadingOverlay {
    started_at_ms: f64,
    config: OverlayConfig,
    phase: OverlayPhase,
    widget: Option<WidgetId>,
}

impl LoadingOverlay {
    pub fn new(started_at_ms: f64, config: OverlayConfig, widget: Option<WidgetId>) -> Self {
        Self {
            started_at_ms,
            config,
            phase: OverlayPhase::Showing,
            widget,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn widget(&self) -> Option<WidgetId> {
        self.widget
    }

    /// Milliseconds until the overlay may start hiding, measured at `now_ms`.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.config.minimum_ms - (now_ms - self.started_at_ms)).max(0.0)
    }

    /// Schedule the hide. Returns the delay to wait, or `None` if a hide was already
    /// requested.
    pub fn request_hide(&mut self, now_ms: f64) -> Option<f64> {
        if self.phase != OverlayPhase::Showing {
            return None;
        }
        let delay = self.remaining_ms(now_ms);
        self.phase = OverlayPhase::HideScheduled {
            at_ms: now_ms + delay,
        };
        Some(delay)
    }

    /// The hide timer fired. Returns the fade duration to wait before disposal.
    pub fn begin_fade(&mut self) -> Option<f64> {
        match self.phase {
            OverlayPhase::HideScheduled { .. } => {
                self.phase = OverlayPhase::Fading;
                Some(self.config.fade_ms)
            }
            _ => None,
        }
    }

    /// The fade finished. `Some` the first time, carrying the backing widget if
    /// there is one.
    pub fn finish(&mut self) -> Option<Option<WidgetId>> {
        if self.phase != OverlayPhase::Fading {
            return None;
        }
        self.phase = OverlayPhase::Disposed;
        Some(self.widget.take())
    }
}
