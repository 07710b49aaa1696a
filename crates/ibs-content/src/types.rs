//! Content record types.
//!
//! Field names follow the JSON shape the content repository returns. GROQ
//! projections yield `null` for fields a document does not have, so every
//! optional field is an `Option` even where a list would be more natural;
//! accessors hide that distinction from callers.

use serde::Deserialize;
use serde_json::Value;

/// URL slug.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Slug {
    /// Slug text (e.g. `"treasury-trends-2024"`).
    pub current: String,
}

/// Reference to an image asset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageRef {
    /// Asset pointer.
    #[serde(default)]
    pub asset: Option<AssetRef>,
    /// Crop rectangle, as fractions trimmed from each edge.
    #[serde(default)]
    pub crop: Option<Crop>,
    /// Focal area, as fractions of the image size.
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
    /// Alternative text.
    #[serde(default)]
    pub alt: Option<String>,
}

impl ImageRef {
    /// Create a reference to an asset id, without crop or hotspot.
    #[must_use]
    pub fn from_asset(reference: &str) -> Self {
        Self {
            asset: Some(AssetRef {
                reference: Some(reference.to_owned()),
            }),
            ..Self::default()
        }
    }

    /// Asset id (`image-<id>-<W>x<H>-<format>`), if present.
    pub fn asset_ref(&self) -> Option<&str> {
        self.asset.as_ref()?.reference.as_deref()
    }
}

/// Asset pointer inside an [`ImageRef`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AssetRef {
    /// Asset document id.
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
}

/// Crop fractions (0.0 - 1.0) removed from each edge.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Crop {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Hotspot centre and size as fractions of the image.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Blog post.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub content: Option<PortableText>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl BlogPost {
    /// Categories, empty when the post has none.
    pub fn categories(&self) -> &[String] {
        self.categories.as_deref().unwrap_or_default()
    }
}

/// Case study.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<PortableText>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<ImageRef>>,
}

impl CaseStudy {
    /// Services, empty when the study lists none.
    pub fn services(&self) -> &[String] {
        self.services.as_deref().unwrap_or_default()
    }

    /// Images, empty when the study has none.
    pub fn images(&self) -> &[ImageRef] {
        self.images.as_deref().unwrap_or_default()
    }
}

/// Event.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    /// Start time as an ISO 8601 string.
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub registration_link: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Award.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Award {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Rich text document: an ordered list of nodes.
pub type PortableText = Vec<Node>;

/// A top-level rich text node.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "Value")]
pub enum Node {
    /// Text block (paragraph, heading, quote or list item).
    Block(Block),
    /// Embedded image.
    Image(ImageRef),
    /// Any other custom type; only its `_type` is kept.
    Unknown(String),
}

impl TryFrom<Value> for Node {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        match kind.as_str() {
            "block" => Ok(Self::Block(serde_json::from_value(value)?)),
            "image" => Ok(Self::Image(serde_json::from_value(value)?)),
            _ => Ok(Self::Unknown(kind)),
        }
    }
}

/// Text block.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block style (`normal`, `h1`..`h6`, `blockquote`, ...).
    #[serde(default = "default_style")]
    pub style: String,
    /// List kind (`bullet`, `number`) when the block is a list item.
    #[serde(default)]
    pub list_item: Option<String>,
    /// List nesting level, starting at 1.
    #[serde(default)]
    pub level: Option<u32>,
    /// Inline children.
    #[serde(default)]
    pub children: Vec<Span>,
    /// Annotation definitions referenced from span marks by key.
    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
}

fn default_style() -> String {
    "normal".to_owned()
}

/// Inline text run.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    /// Decorator names (`strong`, `em`, ...) or keys into [`Block::mark_defs`].
    #[serde(default)]
    pub marks: Vec<String>,
}

/// Annotation definition (e.g. a link).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}
