//! In-process render cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{RenderCache, RoutePattern};

#[derive(Debug)]
struct Entry {
    html: String,
    tags: Vec<String>,
}

/// [`RenderCache`] kept in a `RwLock<HashMap>`.
///
/// Entries never expire on their own; they are dropped by
/// [`invalidate_tag`](RenderCache::invalidate_tag) or
/// [`invalidate_route`](RenderCache::invalidate_route). A poisoned lock is
/// treated as a miss and writes are skipped.
///
/// The generation is advanced while the write lock is held, so a
/// [`set_if_generation`](RenderCache::set_if_generation) either lands before an
/// invalidation (and is dropped by it) or sees the new generation and skips.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    generation: AtomicU64,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached routes.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Whether the cache holds no routes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove_where(&self, predicate: impl Fn(&str, &Entry) -> bool) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        self.generation.fetch_add(1, Ordering::AcqRel);
        let before = entries.len();
        entries.retain(|route, entry| !predicate(route, entry));
        before - entries.len()
    }

    fn entry(tags: &[&str], html: &str) -> Entry {
        Entry {
            html: html.to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        }
    }
}

impl RenderCache for MemoryCache {
    fn get(&self, route: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(route).map(|entry| entry.html.clone())
    }

    fn set(&self, route: &str, tags: &[&str], html: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(route.to_owned(), Self::entry(tags, html));
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn set_if_generation(&self, route: &str, tags: &[&str], html: &str, generation: u64) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        if self.generation.load(Ordering::Acquire) != generation {
            return false;
        }
        entries.insert(route.to_owned(), Self::entry(tags, html));
        true
    }

    fn invalidate_tag(&self, tag: &str) -> usize {
        let removed = self.remove_where(|_, entry| entry.tags.iter().any(|t| t == tag));
        tracing::debug!(tag, removed, "Invalidated cache tag");
        removed
    }

    fn invalidate_route(&self, pattern: &RoutePattern) -> usize {
        let removed = self.remove_where(|route, _| pattern.matches(route));
        tracing::debug!(pattern = pattern.as_str(), removed, "Invalidated cache route");
        removed
    }
}
