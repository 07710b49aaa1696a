//! Page assembly errors.

use ibs_content::ContentError;

/// Error assembling a page.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A single-record lookup matched nothing.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The content repository query failed.
    #[error("Content query failed: {0}")]
    Content(#[from] ContentError),
    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
