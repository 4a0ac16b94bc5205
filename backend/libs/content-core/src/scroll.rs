use std::collections::HashMap;

/// Remembered scroll offsets, keyed by an opaque view key.
///
/// Owned by the navigation layer and passed to views explicitly; offsets are
/// written on view teardown and read back on mount. Keys are cleared when a
/// view is discarded for good, so the map does not grow with navigation
/// history.
#[derive(Debug, Default)]
pub struct ScrollOffsetCache {
    offsets: HashMap<String, f64>,
}

impl ScrollOffsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset for a view, replacing any previous value.
    pub fn save(&mut self, key: impl Into<String>, offset: f64) {
        self.offsets.insert(key.into(), offset);
    }

    /// Last known offset for a view, if one was saved.
    pub fn restore(&self, key: &str) -> Option<f64> {
        self.offsets.get(key).copied()
    }

    /// Forget one view's offset, returning it if present.
    pub fn clear(&mut self, key: &str) -> Option<f64> {
        self.offsets.remove(key)
    }

    /// Forget everything, e.g. on sign-out.
    pub fn clear_all(&mut self) {
        self.offsets.clear();
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
