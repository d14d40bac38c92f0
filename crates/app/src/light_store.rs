//! Light state store — brightness saved when a group becomes occupied.

use std::collections::HashMap;

use occulight_domain::id::LightId;
use occulight_domain::light::{Brightness, LightSavedState};
use occulight_domain::time::now;

/// Saved pre-automation brightness per light, for one occupancy cycle.
///
/// An entry is written at most once per cycle and removed when it is
/// consumed on the way back to unoccupied.
#[derive(Debug, Default, Clone)]
pub struct LightStateStore {
    saved: HashMap<LightId, LightSavedState>,
}

impl LightStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `brightness` for `light_id` unless something is already saved.
    ///
    /// Returns `true` if this call captured the value.
    pub fn capture_if_absent(&mut self, light_id: &LightId, brightness: Option<Brightness>) -> bool {
        if self.saved.contains_key(light_id) {
            return false;
        }
        self.saved.insert(
            light_id.clone(),
            LightSavedState {
                light_id: light_id.clone(),
                brightness,
                captured_at: now(),
            },
        );
        true
    }

    /// Remove the saved entry for `light_id` and return its brightness.
    ///
    /// Returns `None` both when nothing was captured and when the captured
    /// value had no brightness.
    pub fn consume_and_clear(&mut self, light_id: &LightId) -> Option<Brightness> {
        self.saved.remove(light_id).and_then(|s| s.brightness)
    }

    #[must_use]
    pub fn contains(&self, light_id: &LightId) -> bool {
        self.saved.contains_key(light_id)
    }

    #[must_use]
    pub fn get(&self, light_id: &LightId) -> Option<&LightSavedState> {
        self.saved.get(light_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Saved entries sorted by light id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LightSavedState> {
        let mut entries: Vec<_> = self.saved.values().cloned().collect();
        entries.sort_by(|a, b| a.light_id.cmp(&b.light_id));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light(id: &str) -> LightId {
        LightId::new(id).unwrap()
    }

    fn pct(v: u8) -> Brightness {
        Brightness::new(v).unwrap()
    }

    #[test]
    fn should_capture_when_absent() {
        let mut store = LightStateStore::new();
        assert!(store.capture_if_absent(&light("l1"), Some(pct(40))));
        assert_eq!(store.get(&light("l1")).unwrap().brightness, Some(pct(40)));
    }

    #[test]
    fn should_keep_first_value_when_captured_twice() {
        let mut store = LightStateStore::new();
        store.capture_if_absent(&light("l1"), Some(pct(40)));
        assert!(!store.capture_if_absent(&light("l1"), Some(pct(100))));
        assert_eq!(store.consume_and_clear(&light("l1")), Some(pct(40)));
    }

    #[test]
    fn should_not_overwrite_absent_brightness() {
        let mut store = LightStateStore::new();
        store.capture_if_absent(&light("l1"), None);
        assert!(!store.capture_if_absent(&light("l1"), Some(pct(100))));
        assert!(store.contains(&light("l1")));
        assert_eq!(store.consume_and_clear(&light("l1")), None);
    }

    #[test]
    fn should_delete_entry_on_consume() {
        let mut store = LightStateStore::new();
        store.capture_if_absent(&light("l1"), Some(pct(10)));
        assert_eq!(store.consume_and_clear(&light("l1")), Some(pct(10)));
        assert!(store.is_empty());
        assert_eq!(store.consume_and_clear(&light("l1")), None);
    }

    #[test]
    fn should_return_none_when_nothing_captured() {
        let mut store = LightStateStore::new();
        assert_eq!(store.consume_and_clear(&light("never")), None);
    }

    #[test]
    fn should_allow_capture_again_after_consume() {
        let mut store = LightStateStore::new();
        store.capture_if_absent(&light("l1"), Some(pct(10)));
        store.consume_and_clear(&light("l1"));
        assert!(store.capture_if_absent(&light("l1"), Some(pct(70))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn should_snapshot_sorted_by_light() {
        let mut store = LightStateStore::new();
        store.capture_if_absent(&light("light.b"), None);
        store.capture_if_absent(&light("light.a"), Some(pct(5)));
        let ids: Vec<_> = store
            .snapshot()
            .into_iter()
            .map(|s| s.light_id.to_string())
            .collect();
        assert_eq!(ids, ["light.a", "light.b"]);
    }
}
