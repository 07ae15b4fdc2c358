//! Proximity observation: "is this region about to scroll into view?"
//!
//! A [`ProximityObserver`] watches keyed vertical regions of the scrollable
//! content.  Each [`poll`](ProximityObserver::poll) compares them against the
//! viewport grown by a margin and reports the keys that *became* near since
//! the previous poll.  A region that stays near is reported once; it has to
//! leave the margin (or be re-registered somewhere else) before it can fire
//! again.

use std::collections::BTreeMap;

/// A vertical span in content coordinates (virtual pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: u32,
    pub height: u32,
}

impl Region {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Inclusive overlap test, so zero-height regions on an edge still count.
    pub fn touches(self, other: Region) -> bool {
        self.top <= other.bottom() && other.top <= self.bottom()
    }

    /// Grow the region by `margin` on both sides (clamped at the top).
    pub fn expand(self, margin: u32) -> Region {
        let top = self.top.saturating_sub(margin);
        let bottom = self.bottom().saturating_add(margin);
        Region::new(top, bottom - top)
    }
}

/// Capability interface for near-viewport detection.
pub trait ProximityObserver<K> {
    /// Start (or restart) watching `key`.  Re-observing with an unchanged
    /// region keeps the crossing state; a moved region starts afresh.
    fn observe(&mut self, key: K, region: Region);
    fn unobserve(&mut self, key: &K);
    /// Stop watching everything.
    fn dispose(&mut self);
    /// Keys whose region entered the margin since the last poll, in key order.
    fn poll(&mut self, viewport: Region) -> Vec<K>;
}

#[derive(Debug, Clone, Copy)]
struct Watched {
    region: Region,
    near: bool,
}

/// Margin-based observer over an ordered key space.
#[derive(Debug, Clone)]
pub struct MarginObserver<K> {
    margin: u32,
    watched: BTreeMap<K, Watched>,
}

impl<K: Ord + Clone> MarginObserver<K> {
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            watched: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }
}

impl<K: Ord + Clone> ProximityObserver<K> for MarginObserver<K> {
    fn observe(&mut self, key: K, region: Region) {
        match self.watched.get_mut(&key) {
            Some(w) if w.region == region => {}
            Some(w) => {
                w.region = region;
                w.near = false;
            }
            None => {
                self.watched.insert(key, Watched { region, near: false });
            }
        }
    }

    fn unobserve(&mut self, key: &K) {
        self.watched.remove(key);
    }

    fn dispose(&mut self) {
        self.watched.clear();
    }

    fn poll(&mut self, viewport: Region) -> Vec<K> {
        let zone = viewport.expand(self.margin);
        let mut entered = Vec::new();
        for (key, w) in self.watched.iter_mut() {
            let near = w.region.touches(zone);
            if near && !w.near {
                entered.push(key.clone());
            }
            w.near = near;
        }
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_crossing() {
        let mut obs = MarginObserver::new(100);
        obs.observe("card", Region::new(1_000, 80));

        assert!(obs.poll(Region::new(0, 500)).is_empty());
        // Viewport bottom 850 + margin 100 reaches 950 < 1000: still far.
        assert!(obs.poll(Region::new(350, 500)).is_empty());
        assert_eq!(obs.poll(Region::new(420, 500)), vec!["card"]);
        assert!(obs.poll(Region::new(440, 500)).is_empty());
        // Leave and come back.
        assert!(obs.poll(Region::new(0, 300)).is_empty());
        assert_eq!(obs.poll(Region::new(600, 300)), vec!["card"]);
    }

    #[test]
    fn reobserving_same_region_keeps_state() {
        let mut obs = MarginObserver::new(0);
        obs.observe(1u32, Region::new(0, 10));
        assert_eq!(obs.poll(Region::new(0, 100)), vec![1]);
        obs.observe(1, Region::new(0, 10));
        assert!(obs.poll(Region::new(0, 100)).is_empty());
    }

    #[test]
    fn moved_region_fires_again() {
        let mut obs = MarginObserver::new(0);
        obs.observe(1u32, Region::new(0, 10));
        assert_eq!(obs.poll(Region::new(0, 100)), vec![1]);
        obs.observe(1, Region::new(50, 10));
        assert_eq!(obs.poll(Region::new(0, 100)), vec![1]);
    }

    #[test]
    fn reports_in_key_order_and_respects_unobserve() {
        let mut obs = MarginObserver::new(0);
        obs.observe(3u32, Region::new(30, 5));
        obs.observe(1, Region::new(10, 5));
        obs.observe(2, Region::new(20, 5));
        obs.unobserve(&2);
        assert_eq!(obs.poll(Region::new(0, 100)), vec![1, 3]);
        obs.dispose();
        assert_eq!(obs.len(), 0);
    }

    #[test]
    fn expand_clamps_at_zero() {
        assert_eq!(Region::new(50, 10).expand(100), Region::new(0, 160));
    }
}
