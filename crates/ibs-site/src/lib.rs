//! Page assembly for the IBS marketing site.
//!
//! [`Site`] turns content records into complete HTML pages:
//!
//! - Queries go through a [`ContentSource`](ibs_content::ContentSource), so
//!   tests run against `MockContentSource`.
//! - Rich text is rendered by `ibs-renderer` and inserted verbatim.
//! - Page shells come from embedded `minijinja` templates.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use ibs_content::{ImageUrlBuilder, SanityClient};
//! use ibs_site::Site;
//!
//! let site = Site::new(Arc::new(client), ImageUrlBuilder::new("proj", "production"))?;
//! let html = site.blog_post("treasury-trends")?;
//! ```

mod contact;
mod error;
pub mod queries;
mod site;
mod templates;
pub mod views;

pub use contact::{ContactForm, ContactState, FieldErrors};
pub use error::SiteError;
pub use queries::tags;
pub use site::{BlogIndex, Site};
