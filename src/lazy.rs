//! One-shot proximity triggers.
//!
//! The loader only keeps the bookkeeping: which keys are still waiting and what to
//! hand back when they fire. Whatever actually watches the viewport (an
//! `IntersectionObserver` in the browser) reports hits through [`LazyLoader::fire`].

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Default pre-load distance for lazily constructed widgets, in CSS pixels.
pub const WIDGET_MARGIN_PX: f64 = 1700.0;
/// Default pre-load distance for lazy videos.
pub const VIDEO_MARGIN_PX: f64 = 500.0;

/// `rootMargin` for an observer that fires `margin_px` before the target scrolls in.
pub fn root_margin(margin_px: f64) -> String {
    format!("{margin_px}px 0px")
}

#[derive(Debug)]
pub struct LazyLoader<K, V> {
    pending: HashMap<K, V>,
}

impl<K, V> Default for LazyLoader<K, V> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> LazyLoader<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `payload` under `key`. Returns false (and keeps the first payload) if
    /// the key is already waiting.
    pub fn observe(&mut self, key: K, payload: V) -> bool {
        if self.pending.contains_key(&key) {
            return false;
        }
        self.pending.insert(key, payload);
        true
    }

    /// Take the payload for `key`. Every key yields at most once, however often the
    /// observer reports it.
    pub fn fire<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pending.remove(key)
    }

    pub fn is_pending<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending trigger.
    pub fn disconnect(&mut self) {
        self.pending.clear();
    }
}
