//! Extension trait for [`RenderCache`] with a read-through helper.

use crate::RenderCache;

/// Read-through access for [`RenderCache`].
///
/// Kept out of [`RenderCache`] so the core trait stays object-safe; the
/// blanket impl makes it available on `dyn RenderCache` as well.
pub trait RenderCacheExt: RenderCache {
    /// Return the cached HTML for `route`, or produce, store and return it.
    ///
    /// A producer error is returned as-is and nothing is stored, so the next
    /// request retries.
    fn get_or_render<E>(
        &self,
        route: &str,
        tags: &[&str],
        render: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        self.get_or_render_with(route, tags, || render().map(|html| (html, true)))
    }

    /// Like [`get_or_render`](Self::get_or_render), but the producer also
    /// says whether its output may be stored.
    ///
    /// Output rendered while an invalidation ran is returned but not stored.
    fn get_or_render_with<E>(
        &self,
        route: &str,
        tags: &[&str],
        render: impl FnOnce() -> Result<(String, bool), E>,
    ) -> Result<String, E> {
        if let Some(html) = self.get(route) {
            tracing::debug!(route, "Render cache hit");
            return Ok(html);
        }

        let generation = self.generation();
        let (html, store) = render()?;
        if store && !self.set_if_generation(route, tags, &html, generation) {
            tracing::debug!(route, "Invalidated during render, not stored");
        }
        Ok(html)
    }
}

impl<C: RenderCache + ?Sized> RenderCacheExt for C {}
