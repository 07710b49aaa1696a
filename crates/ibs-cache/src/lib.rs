//! Render cache for the IBS site.
//!
//! Rendered pages are stored by route together with the content tags they
//! were built from. The revalidation webhook drops entries by tag or by
//! route pattern; the next request renders fresh content.
//!
//! - [`RenderCache`]: object-safe cache trait
//! - [`RenderCacheExt`]: read-through [`get_or_render`](RenderCacheExt::get_or_render)
//! - [`MemoryCache`]: in-process implementation
//! - [`NullCache`]: no-op implementation (always miss)
//!
//! # Example
//!
//! ```
//! use ibs_cache::{MemoryCache, RenderCache, RenderCacheExt, RoutePattern};
//!
//! let cache = MemoryCache::new();
//! let html = cache.get_or_render("/blog/hello", &["blog"], || Ok::<_, ()>("<h1>Hello</h1>".to_owned()));
//! assert_eq!(html, Ok("<h1>Hello</h1>".to_owned()));
//!
//! assert_eq!(cache.invalidate_route(&RoutePattern::parse("/blog/[slug]")), 1);
//! assert_eq!(cache.get("/blog/hello"), None);
//! ```

mod ext;
mod memory;
mod route;

pub use ext::RenderCacheExt;
pub use memory::MemoryCache;
pub use route::RoutePattern;

/// Store of rendered pages keyed by route.
pub trait RenderCache: Send + Sync {
    /// Cached HTML for a route, if present.
    fn get(&self, route: &str) -> Option<String>;

    /// Store HTML for a route, tagged with the content collections it shows.
    ///
    /// Overwrites any existing entry for the route.
    fn set(&self, route: &str, tags: &[&str], html: &str);

    /// Invalidation counter, advanced by every `invalidate_*` call.
    fn generation(&self) -> u64;

    /// Store HTML only if no invalidation ran since `generation` was read.
    ///
    /// Returns whether the entry was stored.
    fn set_if_generation(&self, route: &str, tags: &[&str], html: &str, generation: u64) -> bool;

    /// Drop every entry carrying `tag`. Returns the number of entries removed.
    fn invalidate_tag(&self, tag: &str) -> usize;

    /// Drop every entry whose route matches `pattern`. Returns the number of
    /// entries removed.
    fn invalidate_route(&self, pattern: &RoutePattern) -> usize;
}

/// No-op [`RenderCache`].
///
/// Used when caching is disabled: every lookup misses and writes are discarded.
pub struct NullCache;

impl RenderCache for NullCache {
    fn get(&self, _route: &str) -> Option<String> {
        None
    }

    fn set(&self, _route: &str, _tags: &[&str], _html: &str) {}

    fn generation(&self) -> u64 {
        0
    }

    fn set_if_generation(&self, _route: &str, _tags: &[&str], _html: &str, _generation: u64) -> bool {
        false
    }

    fn invalidate_tag(&self, _tag: &str) -> usize {
        0
    }

    fn invalidate_route(&self, _pattern: &RoutePattern) -> usize {
        0
    }
}
