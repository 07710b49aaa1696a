//! Rich text renderer for the IBS site.
//!
//! Converts Portable Text nodes (as delivered by the content repository) into
//! HTML fragments styled with the site's utility classes.
//!
//! # Example
//!
//! ```
//! use ibs_content::{ImageUrlBuilder, Node};
//! use ibs_renderer::render_portable_text;
//!
//! let nodes: Vec<Node> = serde_json::from_str(r#"[
//!     {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Hello"}]}
//! ]"#).unwrap();
//!
//! let result = render_portable_text(&nodes, &ImageUrlBuilder::new("dm1tq9mh", "ibsdemo"));
//! assert_eq!(result.html, r#"<h2 class="text-3xl font-bold mt-8 mb-4">Hello</h2>"#);
//! ```

mod html;
mod renderer;
mod style;

pub use html::escape_html;
pub use renderer::{PortableTextRenderer, RenderResult, plain_text, render_portable_text};
