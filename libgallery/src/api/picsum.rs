//! List-only item service (Lorem Picsum shape)
//!
//! `GET {base}/list?page=&limit=` returns an array of records. There is no
//! single-item endpoint, so `fetch_by_id` fetches a large first page and
//! filters it client-side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{join_url, HttpClient, ItemSource};
use crate::error::ApiError;
use crate::types::GalleryImage;

/// Page size used when looking an item up by id
pub const LOOKUP_PAGE_SIZE: u32 = 100;

/// Record as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicsumItem {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub download_url: String,
}

/// Map a list record to the internal shape
pub fn map_picsum_item(item: PicsumItem) -> GalleryImage {
    GalleryImage {
        id: item.id,
        author: item.author,
        width: item.width,
        height: item.height,
        url: item.url,
        download_url: item.download_url,
        is_favorite: false,
        tags: Vec::new(),
    }
}

/// Sized rendition of an image, e.g. 300x200 for cards or 800x600 for details
pub fn thumbnail_url(media_base: &str, id: &str, width: u32, height: u32) -> String {
    join_url(media_base, &format!("id/{}/{}/{}", id, width, height))
}

pub struct PicsumSource {
    http: HttpClient,
    base_url: String,
    media_base_url: String,
}

impl PicsumSource {
    pub fn new(http: HttpClient, base_url: &str, media_base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            media_base_url: media_base_url.to_string(),
        }
    }

    async fn list(&self, page: u32, limit: u32) -> Result<Vec<PicsumItem>, ApiError> {
        self.http
            .get_json(
                &join_url(&self.base_url, "list"),
                &[("page", page.to_string()), ("limit", limit.to_string())],
                None,
            )
            .await
    }
}

#[async_trait(?Send)]
impl ItemSource for PicsumSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<GalleryImage>, ApiError> {
        let items = self.list(page, page_size).await?;
        tracing::debug!(page, count = items.len(), "Fetched picsum page");
        Ok(items.into_iter().map(map_picsum_item).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<GalleryImage, ApiError> {
        let items = self.list(1, LOOKUP_PAGE_SIZE).await?;
        find_by_id(items, id)
    }

    fn name(&self) -> &str {
        "picsum"
    }

    fn media_url(&self, image: &GalleryImage, width: u32, height: u32) -> String {
        thumbnail_url(&self.media_base_url, &image.id, width, height)
    }
}

/// Pick the record with `id` out of a fetched page
pub fn find_by_id(items: Vec<PicsumItem>, id: &str) -> Result<GalleryImage, ApiError> {
    items
        .into_iter()
        .find(|item| item.id == id)
        .map(map_picsum_item)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> PicsumItem {
        PicsumItem {
            id: id.to_string(),
            author: "Alejandro Escamilla".to_string(),
            width: 5616,
            height: 3744,
            url: "https://unsplash.com/photos/yC-Yzbqy7PY".to_string(),
            download_url: format!("https://picsum.photos/id/{}/5616/3744", id),
        }
    }

    #[test]
    fn test_mapping_copies_fields() {
        let image = map_picsum_item(item("0"));
        assert_eq!(image.id, "0");
        assert_eq!(image.author, "Alejandro Escamilla");
        assert_eq!(image.width, 5616);
        assert_eq!(image.download_url, "https://picsum.photos/id/0/5616/3744");
        assert!(!image.is_favorite);
    }

    #[test]
    fn test_decodes_wire_format() {
        let body = r#"[{"id":"1","author":"A","width":10,"height":20,"url":"u","download_url":"d"}]"#;
        let items: Vec<PicsumItem> = serde_json::from_str(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].download_url, "d");
    }

    #[test]
    fn test_find_by_id() {
        let found = find_by_id(vec![item("1"), item("2")], "2").unwrap();
        assert_eq!(found.id, "2");

        let missing = find_by_id(vec![item("1")], "9");
        assert_eq!(missing, Err(ApiError::NotFound("9".to_string())));
    }

    #[test]
    fn test_media_url_is_sized() {
        let http = HttpClient::new(std::time::Duration::from_secs(1)).unwrap();
        let source = PicsumSource::new(http, "https://picsum.photos/v2", "https://picsum.photos/");
        let image = map_picsum_item(item("12"));

        assert_eq!(source.media_url(&image, 300, 200), "https://picsum.photos/id/12/300/200");
        assert_eq!(image.download_url, "https://picsum.photos/id/12/5616/3744");
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url("https://picsum.photos", "10", 300, 200),
            "https://picsum.photos/id/10/300/200"
        );
    }
}
