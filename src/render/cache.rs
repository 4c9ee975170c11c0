use std::num::NonZeroUsize;

use lru::LruCache;

use crate::backend::PageFrame;

/// Identity of one rendered frame: document, 0-based page, and the viewer
/// width it was rendered for. A resize changes the width and naturally
/// invalidates every key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub doc_id: u64,
    pub page_index: usize,
    pub px_width: u32,
}

/// LRU cache of rendered page frames, bounded by entry count and byte
/// budget.
pub struct FrameCache {
    entries: LruCache<FrameKey, PageFrame>,
    budget_bytes: usize,
    used_bytes: usize,
}

impl FrameCache {
    pub fn new(max_entries: usize, budget_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            budget_bytes: budget_bytes.max(1),
            used_bytes: 0,
        }
    }

    pub fn insert(&mut self, key: FrameKey, frame: PageFrame) {
        let frame_bytes = frame.byte_len();
        // push reports the displaced entry for both same-key replacement and
        // capacity eviction.
        if let Some((_, displaced)) = self.entries.push(key, frame) {
            self.used_bytes = self.used_bytes.saturating_sub(displaced.byte_len());
        }
        self.used_bytes += frame_bytes;

        while self.used_bytes > self.budget_bytes && self.entries.len() > 1 {
            let Some((_, dropped)) = self.entries.pop_lru() else {
                break;
            };
            self.used_bytes = self.used_bytes.saturating_sub(dropped.byte_len());
        }
    }

    pub fn get(&mut self, key: &FrameKey) -> Option<&PageFrame> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &FrameKey) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::backend::PageFrame;

    use super::{FrameCache, FrameKey};

    fn key(page_index: usize) -> FrameKey {
        FrameKey {
            doc_id: 11,
            page_index,
            px_width: 80,
        }
    }

    fn frame(bytes: usize) -> PageFrame {
        PageFrame {
            width: 1,
            height: 1,
            pixels: Arc::from(vec![0_u8; bytes]),
        }
    }

    #[test]
    fn entry_cap_evicts_least_recently_used() {
        let mut cache = FrameCache::new(2, usize::MAX);
        cache.insert(key(0), frame(4));
        cache.insert(key(1), frame(4));
        cache.get(&key(0));
        cache.insert(key(2), frame(4));

        assert!(cache.contains(&key(0)));
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn byte_budget_evicts_down_to_the_newest_entry() {
        let mut cache = FrameCache::new(16, 100);
        cache.insert(key(0), frame(60));
        cache.insert(key(1), frame(60));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&key(1)));
        assert_eq!(cache.used_bytes(), 60);
    }

    #[test]
    fn reinserting_a_key_replaces_its_bytes() {
        let mut cache = FrameCache::new(4, usize::MAX);
        cache.insert(key(0), frame(40));
        cache.insert(key(0), frame(8));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.used_bytes(), 8);
    }

    #[test]
    fn oversized_single_entry_is_still_kept() {
        let mut cache = FrameCache::new(4, 10);
        cache.insert(key(0), frame(50));
        assert!(cache.contains(&key(0)));
        assert_eq!(cache.used_bytes(), 50);
    }
}
