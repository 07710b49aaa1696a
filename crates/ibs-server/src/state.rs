//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use ibs_cache::RenderCache;
use ibs_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page assembler.
    pub(crate) site: Site,
    /// Rendered pages, dropped by the revalidation webhook.
    pub(crate) cache: Arc<dyn RenderCache>,
    /// Shared secret for the revalidation webhook. Empty rejects every call.
    pub(crate) revalidate_secret: String,
    /// Enable verbose output.
    pub(crate) verbose: bool,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}
