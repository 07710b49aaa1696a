//! Content repository access for the IBS site.
//!
//! This crate provides:
//! - [`ContentSource`]: read-only query seam, with typed helpers in [`ContentSourceExt`]
//! - [`SanityClient`]: HTTP implementation against the Sanity query API
//! - [`ImageUrlBuilder`]: image reference to CDN URL resolution
//! - Record types ([`BlogPost`], [`CaseStudy`], [`Event`], [`Award`]) and the
//!   rich text model ([`PortableText`])
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), ibs_content::ContentError> {
//! use ibs_content::{BlogPost, ContentSourceExt, Query, SanityClient, SanityConfig};
//!
//! let client = SanityClient::new(SanityConfig {
//!     project_id: "dm1tq9mh".to_owned(),
//!     dataset: "ibsdemo".to_owned(),
//!     api_version: "2023-05-03".to_owned(),
//!     use_cdn: true,
//! });
//!
//! let post: Option<BlogPost> = client.fetch_optional(
//!     &Query::new(r#"*[_type == "blog" && slug.current == $slug][0]"#).param("slug", "hello"),
//! )?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod image;
#[cfg(feature = "mock")]
mod mock;
mod query;
mod source;
mod types;

pub use client::{SanityClient, SanityConfig};
pub use error::ContentError;
pub use image::ImageUrlBuilder;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use query::Query;
pub use source::{ContentSource, ContentSourceExt};
pub use types::{
    AssetRef, Award, BlogPost, Block, CaseStudy, Crop, Event, Hotspot, ImageRef, MarkDef, Node,
    PortableText, Slug, Span,
};
