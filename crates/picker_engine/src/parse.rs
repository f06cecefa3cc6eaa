use picker_core::{ModelError, PhotoRecord, UNKNOWN_DIMENSION};
use serde::Deserialize;
use serde_json::Value;

use engine_logging::{engine_debug, engine_warn};

/// Photos and pagination extracted from one media-listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    pub photos: Vec<PhotoRecord>,
    pub skipped: usize,
    pub next_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("body is not a JSON document: {0}")]
    NotJson(String),
    #[error("response has no `data` array")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    id: String,
    images: RawImages,
}

#[derive(Debug, Deserialize)]
struct RawImages {
    thumbnail: RawImage,
    low_resolution: RawImage,
    standard_resolution: RawImage,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: String,
    #[serde(default)]
    width: Option<i32>,
    #[serde(default)]
    height: Option<i32>,
}

impl RawImage {
    fn dimensions(&self) -> (i32, i32) {
        (
            self.width.unwrap_or(UNKNOWN_DIMENSION),
            self.height.unwrap_or(UNKNOWN_DIMENSION),
        )
    }
}

#[derive(Debug, thiserror::Error)]
enum EntryError {
    #[error(transparent)]
    Shape(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Parses a media-listing body.
///
/// Only the outer document and its `data` array are required. Entries that do
/// not match the expected shape are logged and counted in `skipped`. A body
/// without a `pagination` block (or without `next_url` in it) has no next page.
pub fn parse_feed_response(body: &[u8]) -> Result<ParsedPage, ParseError> {
    let document: Value =
        serde_json::from_slice(body).map_err(|err| ParseError::NotJson(err.to_string()))?;
    let data = document
        .get("data")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingData)?;

    engine_debug!("Found {} media entries", data.len());

    let mut photos = Vec::with_capacity(data.len());
    let mut skipped = 0;
    for (index, entry) in data.iter().enumerate() {
        match parse_entry(entry) {
            Ok(photo) => photos.push(photo),
            Err(err) => {
                engine_warn!("Skipping media entry {}: {}", index, err);
                skipped += 1;
            }
        }
    }

    let next_url = document
        .get("pagination")
        .and_then(|pagination| pagination.get("next_url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ParsedPage {
        photos,
        skipped,
        next_url,
    })
}

fn parse_entry(entry: &Value) -> Result<PhotoRecord, EntryError> {
    let raw = RawMedia::deserialize(entry).map_err(EntryError::Shape)?;
    let images = &raw.images;

    let mut photo = PhotoRecord::new(raw.id.clone());
    let (width, height) = images.thumbnail.dimensions();
    photo
        .add_thumbnail(&images.thumbnail.url, width, height)
        .map_err(EntryError::Model)?;
    for image in [&images.low_resolution, &images.standard_resolution] {
        let (width, height) = image.dimensions();
        photo
            .add_image(&image.url, width, height)
            .map_err(EntryError::Model)?;
    }
    Ok(photo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_height_comes_from_height_field() {
        let body = br#"{"data":[{"id":"1","images":{
            "thumbnail":{"url":"http://c.example.com/t.jpg","width":150,"height":100},
            "low_resolution":{"url":"http://c.example.com/l.jpg","width":320,"height":213},
            "standard_resolution":{"url":"http://c.example.com/s.jpg","width":640,"height":427}}}]}"#;
        let page = parse_feed_response(body).unwrap();
        let thumb = page.photos[0].thumbnail_image().unwrap();
        assert_eq!((thumb.width(), thumb.height()), (150, 100));
        assert_eq!(page.next_url, None);
    }

    #[test]
    fn missing_dimensions_are_unknown() {
        let body = br#"{"data":[{"id":"1","images":{
            "thumbnail":{"url":"https://c.example.com/t.jpg"},
            "low_resolution":{"url":"https://c.example.com/l.jpg","width":320},
            "standard_resolution":{"url":"https://c.example.com/s.jpg","width":640,"height":640}}}]}"#;
        let page = parse_feed_response(body).unwrap();
        let images = page.photos[0].images();
        assert_eq!(images[0].width(), UNKNOWN_DIMENSION);
        assert_eq!(images[1].height(), UNKNOWN_DIMENSION);
    }

    #[test]
    fn non_object_document_is_missing_data() {
        assert_eq!(parse_feed_response(b"[]").unwrap_err(), ParseError::MissingData);
        assert!(matches!(
            parse_feed_response(b"<html>").unwrap_err(),
            ParseError::NotJson(_)
        ));
    }

    #[test]
    fn invalid_image_url_skips_entry() {
        let body = br#"{"data":[{"id":"1","images":{
            "thumbnail":{"url":"not a url","width":150,"height":150},
            "low_resolution":{"url":"https://c.example.com/l.jpg","width":320,"height":320},
            "standard_resolution":{"url":"https://c.example.com/s.jpg","width":640,"height":640}}}],
            "pagination":{"next_url":null}}"#;
        let page = parse_feed_response(body).unwrap();
        assert!(page.photos.is_empty());
        assert_eq!(page.skipped, 1);
        assert_eq!(page.next_url, None);
    }

    #[test]
    fn missing_pagination_means_no_next_page() {
        let page = parse_feed_response(br#"{"data":[]}"#).unwrap();
        assert_eq!(page.next_url, None);

        let page = parse_feed_response(br#"{"data":[],"pagination":{}}"#).unwrap();
        assert_eq!(page.next_url, None);

        let page = parse_feed_response(
            br#"{"data":[],"pagination":{"next_url":"https://api.example.com/media?max_id=7"}}"#,
        )
        .unwrap();
        assert_eq!(
            page.next_url.as_deref(),
            Some("https://api.example.com/media?max_id=7")
        );
    }
}
