// SPDX-License-Identifier: MPL-2.0
//! LRU cache of rendered previews.
//!
//! Keys combine a content digest of the base image with the filter
//! settings, so undoing back to an earlier slider position reuses the
//! earlier render instead of decoding again.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::domain::editing::FilterSettings;
use crate::domain::media::EncodedImage;

/// Default number of cached previews.
pub const DEFAULT_PREVIEW_CACHE_ENTRIES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PreviewKey {
    digest: [u8; 32],
    filters: FilterSettings,
}

impl PreviewKey {
    fn new(base: &EncodedImage, filters: &FilterSettings) -> Self {
        Self {
            digest: *blake3::hash(base.bytes()).as_bytes(),
            filters: *filters,
        }
    }
}

/// Bounded cache of previews keyed by base content and filters.
pub struct PreviewCache {
    entries: LruCache<PreviewKey, EncodedImage>,
    hits: u64,
    misses: u64,
}

impl PreviewCache {
    /// Creates a cache holding at most `capacity` previews (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns a cached preview and marks it most recently used.
    pub fn get(&mut self, base: &EncodedImage, filters: &FilterSettings) -> Option<EncodedImage> {
        let found = self.entries.get(&PreviewKey::new(base, filters)).cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Stores a rendered preview.
    pub fn insert(&mut self, base: &EncodedImage, filters: &FilterSettings, preview: EncodedImage) {
        self.entries.put(PreviewKey::new(base, filters), preview);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `(hits, misses)` since creation.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CACHE_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::{FilterKind, FilterValue};
    use crate::test_utils::{sample_jpeg, sample_png};

    #[test]
    fn lookup_matches_on_content_not_identity() {
        let base = sample_png(4, 4);
        let same_content = EncodedImage::new(base.bytes().to_vec(), base.format(), 4, 4);
        let preview = sample_jpeg(4, 4);

        let mut cache = PreviewCache::new(4);
        cache.insert(&base, &FilterSettings::neutral(), preview.clone());

        let hit = cache.get(&same_content, &FilterSettings::neutral());
        assert_eq!(hit, Some(preview));
        assert_eq!(cache.stats(), (1, 0));
    }

    #[test]
    fn different_filters_miss() {
        let base = sample_png(4, 4);
        let mut cache = PreviewCache::new(4);
        cache.insert(&base, &FilterSettings::neutral(), sample_jpeg(4, 4));

        let warmer = FilterSettings::neutral().with(FilterKind::Warmth, FilterValue::new(5));
        assert!(cache.get(&base, &warmer).is_none());
        assert_eq!(cache.stats(), (0, 1));
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let base = sample_png(4, 4);
        let mut cache = PreviewCache::new(2);
        let settings: Vec<FilterSettings> = (1..=3)
            .map(|v| FilterSettings::neutral().with(FilterKind::Brightness, FilterValue::new(v)))
            .collect();

        cache.insert(&base, &settings[0], sample_jpeg(2, 2));
        cache.insert(&base, &settings[1], sample_jpeg(2, 2));
        assert!(cache.get(&base, &settings[0]).is_some());
        cache.insert(&base, &settings[2], sample_jpeg(2, 2));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&base, &settings[1]).is_none());
        assert!(cache.get(&base, &settings[0]).is_some());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let base = sample_png(2, 2);
        let mut cache = PreviewCache::new(0);
        cache.insert(&base, &FilterSettings::neutral(), sample_jpeg(2, 2));
        assert_eq!(cache.len(), 1);
    }
}
