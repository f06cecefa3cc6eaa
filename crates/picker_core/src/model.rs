use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;
use url::Url;

use crate::select::{select_best_fit, SelectionError};

/// Width or height reported when the source does not provide one.
pub const UNKNOWN_DIMENSION: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid image url {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

const INSECURE_PREFIX: &str = "http://";

/// Rewrites a plain `http://` URL (any case) to `https://`; anything else is returned as is.
pub fn secure_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.get(..INSECURE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(INSECURE_PREFIX) => {
            format!("https://{}", &trimmed[INSECURE_PREFIX.len()..])
        }
        _ => raw.to_string(),
    }
}

/// One rendition of a photo at a particular size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageVariant {
    source_url: Url,
    width: i32,
    height: i32,
}

impl ImageVariant {
    pub fn new(source_url: &str, width: i32, height: i32) -> Result<Self, ModelError> {
        let invalid = |message: String| ModelError::InvalidUrl {
            url: source_url.to_string(),
            message,
        };
        let mut parsed = Url::parse(source_url).map_err(|err| invalid(err.to_string()))?;
        // The parser has already normalized case and whitespace.
        if parsed.scheme() == "http" {
            parsed
                .set_scheme("https")
                .map_err(|()| invalid("cannot switch scheme to https".to_string()))?;
        }
        let source_url = parsed;
        Ok(Self {
            source_url,
            width,
            height,
        })
    }

    pub fn with_width(source_url: &str, width: i32) -> Result<Self, ModelError> {
        Self::new(source_url, width, UNKNOWN_DIMENSION)
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl fmt::Display for ImageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} x {}", self.source_url, self.width, self.height)
    }
}

/// A photo from the feed together with every size it is available in.
///
/// Two records are equal when their thumbnail and largest variants match;
/// the id and the remaining variants are not compared.
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    id: String,
    images: Vec<ImageVariant>,
    thumbnail: Option<usize>,
    largest: Option<usize>,
}

impl PhotoRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            images: Vec::new(),
            thumbnail: None,
            largest: None,
        }
    }

    /// Creates a record whose first variant is the designated thumbnail.
    pub fn with_thumbnail(
        id: impl Into<String>,
        thumbnail_url: &str,
        width: i32,
    ) -> Result<Self, ModelError> {
        let mut record = Self::new(id);
        record.push_variant(ImageVariant::with_width(thumbnail_url, width)?, true);
        Ok(record)
    }

    pub fn add_image(&mut self, url: &str, width: i32, height: i32) -> Result<&ImageVariant, ModelError> {
        let variant = ImageVariant::new(url, width, height)?;
        Ok(self.push_variant(variant, false))
    }

    pub fn add_image_with_width(&mut self, url: &str, width: i32) -> Result<&ImageVariant, ModelError> {
        self.add_image(url, width, UNKNOWN_DIMENSION)
    }

    /// Adds a variant and designates it as the thumbnail.
    pub fn add_thumbnail(&mut self, url: &str, width: i32, height: i32) -> Result<&ImageVariant, ModelError> {
        let variant = ImageVariant::new(url, width, height)?;
        Ok(self.push_variant(variant, true))
    }

    fn push_variant(&mut self, variant: ImageVariant, is_thumbnail: bool) -> &ImageVariant {
        let index = self.images.len();
        let becomes_largest = match self.largest_image() {
            None => true,
            Some(largest) => exceeds_on_any_axis(&variant, largest),
        };
        self.images.push(variant);
        if becomes_largest {
            self.largest = Some(index);
        }
        if is_thumbnail {
            self.thumbnail = Some(index);
        }
        &self.images[index]
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn images(&self) -> &[ImageVariant] {
        &self.images
    }

    pub fn thumbnail_image(&self) -> Option<&ImageVariant> {
        self.thumbnail.map(|index| &self.images[index])
    }

    pub fn largest_image(&self) -> Option<&ImageVariant> {
        self.largest.map(|index| &self.images[index])
    }

    pub fn thumbnail_url(&self) -> Option<&Url> {
        self.thumbnail_image().map(ImageVariant::source_url)
    }

    pub fn full_url(&self) -> Option<&Url> {
        self.largest_image().map(ImageVariant::source_url)
    }

    pub fn full_width(&self) -> Option<i32> {
        self.largest_image().map(ImageVariant::width)
    }

    pub fn full_height(&self) -> Option<i32> {
        self.largest_image().map(ImageVariant::height)
    }

    /// URL of the smallest variant that still covers the requested size.
    pub fn best_image_url(&self, min_width: i32, min_height: i32) -> Result<&Url, SelectionError> {
        select_best_fit(&self.images, min_width, min_height).map(ImageVariant::source_url)
    }
}

// Axes are compared independently and only when both sides are known.
fn exceeds_on_any_axis(candidate: &ImageVariant, largest: &ImageVariant) -> bool {
    let wider = candidate.width > 0 && largest.width > 0 && candidate.width > largest.width;
    let taller = candidate.height > 0 && largest.height > 0 && candidate.height > largest.height;
    wider || taller
}

impl PartialEq for PhotoRecord {
    fn eq(&self, other: &Self) -> bool {
        self.thumbnail_image() == other.thumbnail_image()
            && self.largest_image() == other.largest_image()
    }
}

impl Eq for PhotoRecord {}

impl Hash for PhotoRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.thumbnail_image().hash(state);
        self.largest_image().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_is_rewritten_to_https() {
        assert_eq!(secure_url("http://example.com/x.jpg"), "https://example.com/x.jpg");
        assert_eq!(secure_url("https://example.com/x.jpg"), "https://example.com/x.jpg");
    }

    #[test]
    fn mixed_case_and_padded_http_is_rewritten() {
        assert_eq!(secure_url("HTTP://example.com/x.jpg"), "https://example.com/x.jpg");
        assert_eq!(secure_url(" http://example.com/x.jpg"), "https://example.com/x.jpg");
        assert_eq!(secure_url("ftp://example.com/x.jpg"), "ftp://example.com/x.jpg");

        for raw in ["HTTP://e.com/x.jpg", "Http://e.com/x.jpg", " http://e.com/x.jpg "] {
            let variant = ImageVariant::new(raw, 1, 1).unwrap();
            assert_eq!(variant.source_url().scheme(), "https");
            assert_eq!(variant.source_url().as_str(), "https://e.com/x.jpg");
        }
    }

    #[test]
    fn variant_stores_secure_url() {
        let variant = ImageVariant::new("http://example.com/x.jpg", 10, 20).unwrap();
        assert_eq!(variant.source_url().as_str(), "https://example.com/x.jpg");
        assert_eq!(variant.to_string(), "https://example.com/x.jpg : 10 x 20");
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = ImageVariant::new("/x.jpg", 10, 20).unwrap_err();
        assert!(matches!(err, ModelError::InvalidUrl { .. }));
    }

    #[test]
    fn width_only_variant_has_unknown_height() {
        let variant = ImageVariant::with_width("https://example.com/a.jpg", 150).unwrap();
        assert_eq!(variant.height(), UNKNOWN_DIMENSION);
    }

    #[test]
    fn largest_follows_either_axis() {
        let mut record = PhotoRecord::new("1");
        record.add_image("https://e.com/a.jpg", 150, 150).unwrap();
        record.add_image("https://e.com/b.jpg", 320, 100).unwrap();
        assert_eq!(record.full_width(), Some(320));

        // Taller but narrower still wins on the height axis.
        record.add_image("https://e.com/c.jpg", 200, 400).unwrap();
        assert_eq!(record.full_url().unwrap().as_str(), "https://e.com/c.jpg");
        assert_eq!(record.full_height(), Some(400));
    }

    #[test]
    fn unknown_dimensions_never_replace_largest() {
        let mut record = PhotoRecord::with_thumbnail("1", "https://e.com/t.jpg", 150).unwrap();
        record.add_image("https://e.com/b.jpg", UNKNOWN_DIMENSION, 900).unwrap();
        // Thumbnail height is unknown, so the height comparison is skipped too.
        assert_eq!(record.full_url().unwrap().as_str(), "https://e.com/t.jpg");
    }

    #[test]
    fn no_designation_leaves_thumbnail_unset() {
        let mut record = PhotoRecord::new("1");
        record.add_image_with_width("https://e.com/a.jpg", 150).unwrap();
        assert!(record.thumbnail_url().is_none());
        assert!(record.largest_image().is_some());
    }
}
