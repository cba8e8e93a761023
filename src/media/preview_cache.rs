// SPDX-License-Identifier: MPL-2.0
//! Preview cache for faster browsing.
//!
//! Decoding a full-size photograph takes far longer than drawing it, and the
//! operator often steps back and forth over the same few images. Scaled
//! previews are therefore kept in a small LRU keyed by path and target box.

use super::image::{Bounds, Preview};
use crate::config::{DEFAULT_PREVIEW_CAPACITY, MAX_PREVIEW_CAPACITY, MIN_PREVIEW_CAPACITY};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Identifies one scaled rendition of one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub path: PathBuf,
    pub bounds: Bounds,
}

impl PreviewKey {
    pub fn new(path: impl Into<PathBuf>, bounds: Bounds) -> Self {
        Self {
            path: path.into(),
            bounds,
        }
    }
}

/// Count-bounded LRU of scaled previews.
///
/// Recency follows what the screens ask for: every [`missing`](Self::missing)
/// call marks the wanted previews that are already cached as just used.
pub struct PreviewCache {
    cache: LruCache<PreviewKey, Preview>,
}

impl PreviewCache {
    /// Creates a cache holding at most `capacity` previews (clamped).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.clamp(MIN_PREVIEW_CAPACITY, MAX_PREVIEW_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn insert(&mut self, key: PreviewKey, preview: Preview) {
        self.cache.put(key, preview);
    }

    /// Reads without touching LRU order; used while rendering.
    #[must_use]
    pub fn peek(&self, key: &PreviewKey) -> Option<&Preview> {
        self.cache.peek(key)
    }

    /// Returns the keys among `wanted` that still need decoding, and
    /// promotes the ones already cached.
    pub fn missing(&mut self, wanted: &[PreviewKey]) -> Vec<PreviewKey> {
        let mut missing = Vec::new();
        for key in wanted {
            if self.cache.contains(key) {
                self.cache.promote(key);
            } else {
                missing.push(key.clone());
            }
        }
        missing
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CAPACITY)
    }
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("len", &self.cache.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> Preview {
        Preview::from_rgba(1, 1, vec![255, 255, 255, 255])
    }

    fn key(name: &str) -> PreviewKey {
        PreviewKey::new(format!("/photos/{name}"), Bounds::square(300))
    }

    fn full_cache(names: &[&str]) -> PreviewCache {
        let mut cache = PreviewCache::new(MIN_PREVIEW_CAPACITY);
        for name in names {
            cache.insert(key(name), preview());
        }
        cache
    }

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{i}.jpg")).collect()
    }

    #[test]
    fn oldest_untouched_preview_goes_first() {
        let names = names(MIN_PREVIEW_CAPACITY);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut cache = full_cache(&refs);

        cache.insert(key("new.jpg"), preview());

        assert!(cache.peek(&key(refs[0])).is_none());
        assert!(cache.peek(&key("new.jpg")).is_some());
    }

    #[test]
    fn recently_wanted_preview_survives_an_insertion() {
        let names = names(MIN_PREVIEW_CAPACITY);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut cache = full_cache(&refs);

        // The screen goes back to the oldest image.
        assert!(cache.missing(&[key(refs[0])]).is_empty());
        assert!(cache.peek(&key(refs[0])).is_some());
        cache.insert(key("new.jpg"), preview());

        assert!(cache.peek(&key(refs[0])).is_some());
        assert!(cache.peek(&key(refs[1])).is_none());
    }

    #[test]
    fn same_path_different_bounds_are_distinct() {
        let mut cache = PreviewCache::new(4);
        cache.insert(PreviewKey::new("/p/a.jpg", Bounds::square(300)), preview());
        assert!(cache
            .peek(&PreviewKey::new("/p/a.jpg", Bounds::new(700, 500)))
            .is_none());
    }

    #[test]
    fn missing_filters_cached_keys() {
        let mut cache = PreviewCache::new(4);
        cache.insert(key("a.jpg"), preview());
        let wanted = vec![key("a.jpg"), key("b.jpg")];
        assert_eq!(cache.missing(&wanted), vec![key("b.jpg")]);
    }

    #[test]
    fn capacity_is_clamped() {
        assert_eq!(PreviewCache::new(0).capacity(), MIN_PREVIEW_CAPACITY);
        assert_eq!(PreviewCache::new(10_000).capacity(), MAX_PREVIEW_CAPACITY);
    }
}
