//! Memoized text measurements.
//!
//! Entries are keyed by the exact text, font size and style. A stored
//! baseline of zero reads back as a miss, so text whose reference face has
//! no ascent is measured again on every call.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use glint_config::{Size, TextStyle};
use parking_lot::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetricsKey {
    text: String,
    size_bits: u32,
    style: TextStyle,
}

impl MetricsKey {
    fn new(text: &str, size: f32, style: &TextStyle) -> Self {
        Self {
            text: text.to_string(),
            size_bits: size.to_bits(),
            style: *style,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct MetricsEntry {
    size: Size,
    baseline: f32,
}

type MetricsMap = RwLock<HashMap<MetricsKey, MetricsEntry>>;

/// Measurement results keyed by (text, size, style).
pub struct MetricsCache {
    entries: ArcSwap<MetricsMap>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(RwLock::new(HashMap::new())),
        }
    }

    pub fn get(&self, text: &str, size: f32, style: &TextStyle) -> Option<(Size, f32)> {
        let key = MetricsKey::new(text, size, style);
        let entries = self.entries.load();
        let entry = *entries.read().get(&key)?;
        if entry.baseline == 0.0 {
            return None;
        }
        Some((entry.size, entry.baseline))
    }

    pub fn set(&self, text: &str, size: f32, style: &TextStyle, measured: Size, baseline: f32) {
        let key = MetricsKey::new(text, size, style);
        self.entries.load().write().insert(
            key,
            MetricsEntry {
                size: measured,
                baseline,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.store(Arc::new(RwLock::new(HashMap::new())));
    }

    pub fn len(&self) -> usize {
        self.entries.load().read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new()
    }
}
