//! Image reference resolution.
//!
//! Turns an [`ImageRef`] into a CDN URL. Resolution is pure string
//! construction: no request is made and equal inputs always produce equal
//! URLs.
//!
//! Asset ids have the form `image-<id>-<W>x<H>-<format>`; the resolved URL is
//! `https://cdn.sanity.io/images/<project>/<dataset>/<id>-<W>x<H>.<format>`
//! followed by transformation parameters.

use crate::types::{Crop, ImageRef};

/// Image CDN base URL.
const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Parsed image asset id.
#[derive(Debug, PartialEq, Eq)]
struct AssetId<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    format: &'a str,
}

impl<'a> AssetId<'a> {
    fn parse(reference: &'a str) -> Option<Self> {
        let mut parts = reference.rsplitn(3, '-');
        let format = parts.next()?;
        let dimensions = parts.next()?;
        let id = parts.next()?.strip_prefix("image-")?;
        let (width, height) = dimensions.split_once('x')?;

        if id.is_empty() || format.is_empty() {
            return None;
        }

        Some(Self {
            id,
            width: width.parse().ok()?,
            height: height.parse().ok()?,
            format,
        })
    }
}

/// Builds image URLs for one project and dataset.
///
/// # Example
///
/// ```
/// use ibs_content::{ImageRef, ImageUrlBuilder};
///
/// let builder = ImageUrlBuilder::new("dm1tq9mh", "ibsdemo");
/// let image = ImageRef::from_asset("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg");
///
/// assert_eq!(
///     builder.url_sized(&image, Some(400), Some(200)).as_deref(),
///     Some("https://cdn.sanity.io/images/dm1tq9mh/ibsdemo/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=400&h=200"),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    /// Create a builder for the given project and dataset.
    #[must_use]
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Resolve an image at its original size.
    ///
    /// Returns `None` when the reference has no asset or the asset id is
    /// malformed.
    pub fn url(&self, image: &ImageRef) -> Option<String> {
        self.url_sized(image, None, None)
    }

    /// Resolve an image scaled to the requested width and/or height.
    ///
    /// When both dimensions are requested and the image has a hotspot, the
    /// CDN is asked to crop around the hotspot.
    pub fn url_sized(
        &self,
        image: &ImageRef,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Option<String> {
        let asset = AssetId::parse(image.asset_ref()?)?;

        let mut url = format!(
            "{CDN_BASE}/{}/{}/{}-{}x{}.{}",
            self.project_id, self.dataset, asset.id, asset.width, asset.height, asset.format
        );

        let mut params: Vec<String> = Vec::new();
        if let Some(rect) = image.crop.and_then(|crop| crop_rect(crop, &asset)) {
            params.push(format!("rect={rect}"));
        }
        if let Some(w) = width {
            params.push(format!("w={w}"));
        }
        if let Some(h) = height {
            params.push(format!("h={h}"));
        }
        if width.is_some()
            && height.is_some()
            && let Some(hotspot) = image.hotspot
        {
            params.push("crop=focalpoint".to_owned());
            params.push(format!("fp-x={}", hotspot.x));
            params.push(format!("fp-y={}", hotspot.y));
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        Some(url)
    }
}

/// Pixel rectangle (`left,top,width,height`) left after cropping.
///
/// Returns `None` for an empty crop (nothing trimmed).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn crop_rect(crop: Crop, asset: &AssetId<'_>) -> Option<String> {
    let trimmed = [crop.top, crop.bottom, crop.left, crop.right];
    if trimmed.iter().all(|f| *f <= 0.0) {
        return None;
    }

    let w = f64::from(asset.width);
    let h = f64::from(asset.height);
    let left = (crop.left * w).round().max(0.0) as u32;
    let top = (crop.top * h).round().max(0.0) as u32;
    let width = ((1.0 - crop.left - crop.right) * w).round().max(0.0) as u32;
    let height = ((1.0 - crop.top - crop.bottom) * h).round().max(0.0) as u32;

    Some(format!("{left},{top},{width},{height}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::Hotspot;

    const REF: &str = "image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg";

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("dm1tq9mh", "ibsdemo")
    }

    #[test]
    fn test_parse_asset_id() {
        assert_eq!(
            AssetId::parse(REF),
            Some(AssetId {
                id: "Tb9Ew8CXIwaY6R1kjMvI0uRR",
                width: 2000,
                height: 3000,
                format: "jpg",
            })
        );
    }

    #[test]
    fn test_parse_malformed_asset_ids() {
        assert_eq!(AssetId::parse(""), None);
        assert_eq!(AssetId::parse("file-abc-pdf"), None);
        assert_eq!(AssetId::parse("image-abc-200-jpg"), None);
        assert_eq!(AssetId::parse("image-abc-wxh-jpg"), None);
        assert_eq!(AssetId::parse("image--10x10-jpg"), None);
    }

    #[test]
    fn test_url_original_size() {
        assert_eq!(
            builder().url(&ImageRef::from_asset(REF)).as_deref(),
            Some("https://cdn.sanity.io/images/dm1tq9mh/ibsdemo/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg")
        );
    }

    #[test]
    fn test_url_contains_identifier_and_dimensions() {
        let url = builder()
            .url_sized(&ImageRef::from_asset(REF), Some(1200), Some(600))
            .unwrap();
        assert!(url.contains("Tb9Ew8CXIwaY6R1kjMvI0uRR"));
        assert!(url.contains("w=1200"));
        assert!(url.contains("h=600"));
    }

    #[test]
    fn test_url_width_only() {
        let url = builder()
            .url_sized(&ImageRef::from_asset(REF), Some(800), None)
            .unwrap();
        assert!(url.ends_with("?w=800"));
    }

    #[test]
    fn test_missing_asset_resolves_to_none() {
        assert_eq!(builder().url(&ImageRef::default()), None);

        let image = ImageRef {
            asset: Some(crate::types::AssetRef { reference: None }),
            ..ImageRef::default()
        };
        assert_eq!(builder().url_sized(&image, Some(10), Some(10)), None);
    }

    #[test]
    fn test_crop_becomes_rect() {
        let image = ImageRef {
            crop: Some(Crop {
                top: 0.1,
                bottom: 0.1,
                left: 0.25,
                right: 0.25,
            }),
            ..ImageRef::from_asset(REF)
        };
        let url = builder().url(&image).unwrap();
        assert!(url.ends_with("?rect=500,300,1000,2400"), "{url}");
    }

    #[test]
    fn test_zero_crop_is_ignored() {
        let image = ImageRef {
            crop: Some(Crop::default()),
            ..ImageRef::from_asset(REF)
        };
        assert!(!builder().url(&image).unwrap().contains('?'));
    }

    #[test]
    fn test_hotspot_only_with_both_dimensions() {
        let image = ImageRef {
            hotspot: Some(Hotspot {
                x: 0.5,
                y: 0.25,
                width: 0.3,
                height: 0.3,
            }),
            ..ImageRef::from_asset(REF)
        };

        let both = builder().url_sized(&image, Some(400), Some(200)).unwrap();
        assert!(both.ends_with("?w=400&h=200&crop=focalpoint&fp-x=0.5&fp-y=0.25"), "{both}");

        let width_only = builder().url_sized(&image, Some(400), None).unwrap();
        assert!(!width_only.contains("focalpoint"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let image = ImageRef::from_asset(REF);
        assert_eq!(
            builder().url_sized(&image, Some(1), Some(2)),
            builder().url_sized(&image, Some(1), Some(2))
        );
    }
}
